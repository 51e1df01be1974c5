pub mod fastq;

pub use fastq::{write_record, FastqReader, FastqRecord, FileReader};
