use super::command::{Command, Compressor};

/// Threads handed to compressors that support multithreading
const THREADS: &str = "12";

/// The fixed set of compressors, in run order.
pub fn default_roster() -> Vec<Compressor> {
    let spring_threads = format!("-t{THREADS}");
    let dsrc_threads = format!("-t{THREADS}");

    vec![
        Compressor::new(
            "gzip",
            Command::new(["gzip", "-c"]).stdout(),
            Command::new(["gzip", "-c", "-d"]).stdout(),
        ),
        Compressor::new(
            "gzip_9",
            Command::new(["gzip", "-c", "-9"]).stdout(),
            Command::new(["gzip", "-c", "-d"]).stdout(),
        ),
        Compressor::new(
            "bzip2",
            Command::new(["bzip2", "-c"]).stdout(),
            Command::new(["bzip2", "-c", "-d"]).stdout(),
        ),
        Compressor::new(
            "bzip2_9",
            Command::new(["bzip2", "-c", "-9"]).stdout(),
            Command::new(["bzip2", "-c", "-d"]).stdout(),
        ),
        Compressor::new(
            "lzma",
            Command::new(["lzma", "-c", "-T", THREADS]).stdout(),
            Command::new(["lzma", "-c", "-d", "-T", THREADS]).stdout(),
        ),
        // FASTQ-specific
        Compressor::new(
            "fqzcomp_q2",
            Command::new(["fqzcomp", "-q2", "-s5+"]),
            Command::new(["fqzcomp", "-d"]),
        ),
        Compressor::new(
            "fqzcomp_q3",
            Command::new(["fqzcomp", "-q3", "-s5+"]),
            Command::new(["fqzcomp", "-d"]),
        ),
        // Genomics archivers
        Compressor::new(
            "genozip",
            Command::new(["genozip"]).output_option("-o"),
            Command::new(["genounzip"]).output_option("-o"),
        ),
        Compressor::new(
            "spring",
            Command::new(["spring", "-c", "--no-ids", spring_threads.as_str()])
                .input_option("-i")
                .output_option("-o"),
            Command::new(["spring", "-d", spring_threads.as_str()])
                .input_option("-i")
                .output_option("-o"),
        ),
        // DNA-sequence aware
        Compressor::new(
            "dsrc2",
            Command::new(["dsrc", "c", "-m1", dsrc_threads.as_str()]),
            Command::new(["dsrc", "d", dsrc_threads.as_str()]),
        ),
    ]
}
