use fqbench_lib::benchmark::{self, Command, Compressor};
use fqbench_lib::cli::{BenchmarkConfig, CombineConfig, PrepareConfig};
use fqbench_lib::prepare::{self, SizeSpec};
use fqbench_lib::CommandError;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Two short records, the running example for chunk selection.
const TWO_READS: &str = "@id\nACGT\n+\nFFFF\n@id2\nTTTT\n+\nGGGG\n";

/// Standard multi-read test data.
const MULTI_READ_DATA: &str = "\
@read1 instrument:1\nACGTACGTACGTACGT\n+\nIIIIIIIIIIIIIIII\n\
@read2 instrument:2\nTGCATGCATGCATGCA\n+read2\nHHHHHHHHHHHHHHHH\n\
@read3 instrument:3\nAAAACCCCGGGGTTTT\n+\nBBBBBBBBBBBBBBBB\n";

/// Write `data` to `name` in a fresh temp dir and run `prepare` with the given overrides.
/// Returns the temp dir (kept alive), the output path and its content.
fn prepare_with(
    name: &str,
    data: &str,
    config_fn: impl FnOnce(&mut PrepareConfig),
) -> (TempDir, PathBuf, String) {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join(name);
    fs::write(&input, data).unwrap();

    let mut config = PrepareConfig {
        input,
        ..PrepareConfig::default()
    };
    config_fn(&mut config);

    prepare::prepare(&config).unwrap();
    let output = config.output_path();
    let content = fs::read_to_string(&output).unwrap();
    (temp_dir, output, content)
}

#[test]
fn test_prepare_selects_chunk_by_index() {
    let (_dir, output, content) = prepare_with("reads.fastq", TWO_READS, |c| c.seq_length = 4);
    assert_eq!(content, "@\nACGT\n+\nFFFF\n");
    assert_eq!(output.file_name().unwrap(), "reads.noident.4.all.0.fastq");

    let (_dir, _, content) = prepare_with("reads.fastq", TWO_READS, |c| {
        c.seq_length = 4;
        c.chunk = 1;
    });
    assert_eq!(content, "@\nTTTT\n+\nGGGG\n");
}

#[test]
fn test_prepare_merges_records() {
    let (_dir, _, content) = prepare_with("reads.fastq", TWO_READS, |c| c.seq_length = 8);
    assert_eq!(content, "@\nACGTTTTT\n+\nFFFFGGGG\n");
}

#[test]
fn test_prepare_pass_through_strips_identifiers() {
    let (_dir, output, content) = prepare_with("reads.fastq", MULTI_READ_DATA, |_| {});
    assert_eq!(output.file_name().unwrap(), "reads.noident.fastq");

    let expected: String = MULTI_READ_DATA
        .lines()
        .collect::<Vec<_>>()
        .chunks(4)
        .map(|r| format!("@\n{}\n+\n{}\n", r[1], r[3]))
        .collect();
    assert_eq!(content, expected);
}

#[test]
fn test_prepare_chunk_out_of_range_is_empty() {
    let (_dir, output, content) = prepare_with("reads.fastq", MULTI_READ_DATA, |c| {
        c.seq_length = 16;
        c.chunk = 3;
    });
    assert!(output.exists());
    assert!(content.is_empty());
}

#[test]
fn test_prepare_size_budget_partitions() {
    // 48 bases at length 8 -> six 22-byte records; a 40-byte budget holds two
    let (_dir, output, content) = prepare_with("reads.fastq", MULTI_READ_DATA, |c| {
        c.seq_length = 8;
        c.size = Some("40".parse::<SizeSpec>().unwrap());
        c.chunk = 1;
    });
    assert_eq!(output.file_name().unwrap(), "reads.noident.8.40.1.fastq");
    assert_eq!(content, "@\nTGCATGCA\n+\nHHHHHHHH\n@\nTGCATGCA\n+\nHHHHHHHH\n");
}

#[test]
fn test_prepare_fixed_length_records() {
    let (_dir, _, content) = prepare_with("reads.fastq", MULTI_READ_DATA, |c| {
        c.seq_length = 5;
        c.size = Some("1k".parse().unwrap());
    });
    let lines: Vec<&str> = content.lines().collect();
    // 48 bases -> 9 records of 5, 3 bases dropped
    assert_eq!(lines.len(), 9 * 4);
    for rec in lines.chunks(4) {
        assert_eq!(rec[0], "@");
        assert_eq!(rec[1].len(), 5);
        assert_eq!(rec[3].len(), 5);
        assert_eq!(rec[2], "+");
    }
}

#[test]
fn test_prepare_truncated_input() {
    let data = format!("{TWO_READS}@id3\nCCCC\n+\n");
    let (_dir, _, content) = prepare_with("reads.fastq", &data, |_| {});
    assert_eq!(content, "@\nACGT\n+\nFFFF\n@\nTTTT\n+\nGGGG\n");
}

#[test]
fn test_prepare_gzip_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("reads.fastq.gz");
    let mut encoder =
        flate2::write::GzEncoder::new(fs::File::create(&input).unwrap(), flate2::Compression::default());
    encoder.write_all(TWO_READS.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let config = PrepareConfig {
        input,
        seq_length: 8,
        ..PrepareConfig::default()
    };
    let summary = prepare::prepare(&config).unwrap();
    assert_eq!(summary.records_read, 2);

    let output = temp_dir.path().join("reads.noident.8.all.0.fastq");
    assert_eq!(config.output_path(), output);
    assert_eq!(fs::read_to_string(output).unwrap(), "@\nACGTTTTT\n+\nFFFFGGGG\n");
}

#[test]
fn test_prepare_explicit_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("reads.fastq");
    let output = temp_dir.path().join("chunk.fq");
    fs::write(&input, TWO_READS).unwrap();

    let config = PrepareConfig {
        input,
        output: Some(output.clone()),
        ..PrepareConfig::default()
    };
    prepare::prepare(&config).unwrap();
    assert_eq!(fs::read_to_string(output).unwrap(), "@\nACGT\n+\nFFFF\n@\nTTTT\n+\nGGGG\n");
}

#[test]
fn test_prepare_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let config = PrepareConfig {
        input: temp_dir.path().join("missing.fastq"),
        ..PrepareConfig::default()
    };
    assert!(prepare::prepare(&config).is_err());
}

#[test]
fn test_prepare_unwritable_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("reads.fastq");
    fs::write(&input, TWO_READS).unwrap();
    let config = PrepareConfig {
        input,
        output: Some(temp_dir.path().join("no_such_dir").join("out.fastq")),
        ..PrepareConfig::default()
    };
    assert!(prepare::prepare(&config).is_err());
}

#[test]
fn test_combine_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("reads.fastq");
    let output = temp_dir.path().join("combined.fastq");
    fs::write(&input, MULTI_READ_DATA).unwrap();

    let config = CombineConfig {
        input,
        output: Some(output.clone()),
        label: Some("reads".to_string()),
        start: 12,
        end: 20,
    };
    fqbench_lib::combine::combine(&config).unwrap();
    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "@reads 12:20\nACGTTGCA\n+\nIIIIHHHH\n"
    );
}

// ---------------------------------------------------------------------------
// Benchmark driver (system tools stand in for real compressors)
// ---------------------------------------------------------------------------

fn test_roster() -> Vec<Compressor> {
    vec![
        Compressor::new(
            "cat",
            Command::new(["cat"]).stdout(),
            Command::new(["cat"]).stdout(),
        ),
        Compressor::new("cp", Command::new(["cp"]), Command::new(["cp"])),
    ]
}

fn benchmark_config(temp_dir: &TempDir, remove: bool) -> BenchmarkConfig {
    let input = temp_dir.path().join("reads.fastq");
    fs::write(&input, MULTI_READ_DATA).unwrap();
    BenchmarkConfig {
        input,
        output_dir: temp_dir.path().join("out"),
        remove,
    }
}

#[test]
fn test_benchmark_rows_and_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let config = benchmark_config(&temp_dir, false);

    let mut csv_out = Vec::new();
    let mut status_out = Vec::new();
    let results =
        benchmark::run_benchmark(&config, &test_roster(), &mut csv_out, &mut status_out).unwrap();

    let input_size = MULTI_READ_DATA.len() as u64;
    assert_eq!(results.len(), 2);
    for result in &results {
        assert_eq!(result.input_size, input_size);
        assert_eq!(result.output_size, input_size);
        assert_eq!(result.ratio(), 1.0);
        assert_eq!(result.compress_speed(), input_size as f64 / result.compress_secs());

        let decompressed = config.output_dir.join(format!("decompressed.{}", result.name));
        assert_eq!(fs::read_to_string(decompressed).unwrap(), MULTI_READ_DATA);
        assert!(config.output_dir.join(format!("compressed.{}", result.name)).exists());
    }

    let csv = String::from_utf8(csv_out).unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], benchmark::CSV_HEADER.join(","));
    assert!(rows[1].starts_with(&format!("cat,{input_size},{input_size},")));
    assert!(rows[2].starts_with(&format!("cp,{input_size},{input_size},")));
    for row in &rows[1..] {
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[5], "1.0");
    }

    let status = String::from_utf8(status_out).unwrap();
    let lines: Vec<&str> = status.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("            cat:"));
    assert!(lines[0].contains("(100.00%,"));
}

#[test]
fn test_benchmark_remove_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let config = benchmark_config(&temp_dir, true);

    benchmark::run_benchmark(&config, &test_roster(), Vec::new(), Vec::new()).unwrap();

    assert!(config.output_dir.exists());
    assert_eq!(fs::read_dir(&config.output_dir).unwrap().count(), 0);
}

#[test]
fn test_benchmark_failure_aborts_run() {
    let temp_dir = TempDir::new().unwrap();
    let config = benchmark_config(&temp_dir, false);

    let mut roster = test_roster();
    roster.insert(
        1,
        Compressor::new("broken", Command::new(["false"]), Command::new(["cp"])),
    );

    let mut csv_out = Vec::new();
    let err = benchmark::run_benchmark(&config, &roster, &mut csv_out, Vec::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CommandError>(),
        Some(CommandError::Failed { .. })
    ));

    // Only the compressor before the failure was reported; the one after never ran
    let csv = String::from_utf8(csv_out).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(!config.output_dir.join("compressed.cp").exists());
}

#[test]
fn test_benchmark_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let config = BenchmarkConfig {
        input: temp_dir.path().join("missing.fastq"),
        output_dir: temp_dir.path().join("out"),
        remove: false,
    };
    assert!(benchmark::run_benchmark(&config, &test_roster(), Vec::new(), Vec::new()).is_err());
    assert!(!config.output_dir.exists());
}
