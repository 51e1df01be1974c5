//! Whole-file benchmark of external compressors.
//!
//! Every compressor runs strictly one after another (compress, then
//! decompress) so that wall-clock timings are not disturbed by other work.

mod command;
mod report;
mod roster;

pub use command::{Command, Compressor};
pub use report::{format_float, human_bytes, summary_line, CsvReport, CSV_HEADER};
pub use roster::default_roster;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::BenchmarkConfig;

/// Measurements of one compressor on one input
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub name: String,
    pub input_size: u64,
    pub output_size: u64,
    pub compress_time: Duration,
    pub decompress_time: Duration,
}

impl BenchmarkResult {
    pub fn compress_secs(&self) -> f64 {
        self.compress_time.as_secs_f64()
    }

    pub fn decompress_secs(&self) -> f64 {
        self.decompress_time.as_secs_f64()
    }

    /// Compressed size over original size
    pub fn ratio(&self) -> f64 {
        self.output_size as f64 / self.input_size as f64
    }

    /// Input bytes per second of compression
    pub fn compress_speed(&self) -> f64 {
        self.input_size as f64 / self.compress_secs()
    }

    /// Input bytes per second of decompression
    pub fn decompress_speed(&self) -> f64 {
        self.input_size as f64 / self.decompress_secs()
    }
}

/// Paths of the intermediate files of one compressor
fn artifact_paths(output_dir: &Path, name: &str) -> (PathBuf, PathBuf) {
    (
        output_dir.join(format!("compressed.{name}")),
        output_dir.join(format!("decompressed.{name}")),
    )
}

fn file_size(path: &Path) -> Result<u64> {
    Ok(std::fs::metadata(path)
        .with_context(|| format!("Failed to stat file: {:?}", path))?
        .len())
}

/// Compress and decompress `input` with one compressor and measure both steps.
pub fn run_compressor(
    compressor: &Compressor,
    input: &Path,
    output_dir: &Path,
    remove: bool,
) -> Result<BenchmarkResult> {
    let input_size = file_size(input)?;
    let (compressed, decompressed) = artifact_paths(output_dir, &compressor.name);

    debug!(compressor = %compressor.name, command = %compressor.compress.description(), "compressing");
    let start = Instant::now();
    compressor
        .compress
        .run(input, &compressed)
        .with_context(|| format!("{}: compression failed", compressor.name))?;
    let compress_time = start.elapsed();
    let output_size = file_size(&compressed)?;

    debug!(compressor = %compressor.name, command = %compressor.decompress.description(), "decompressing");
    let start = Instant::now();
    compressor
        .decompress
        .run(&compressed, &decompressed)
        .with_context(|| format!("{}: decompression failed", compressor.name))?;
    let decompress_time = start.elapsed();

    if remove {
        std::fs::remove_file(&compressed)
            .with_context(|| format!("Failed to remove {:?}", compressed))?;
        std::fs::remove_file(&decompressed)
            .with_context(|| format!("Failed to remove {:?}", decompressed))?;
    }

    Ok(BenchmarkResult {
        name: compressor.name.clone(),
        input_size,
        output_size,
        compress_time,
        decompress_time,
    })
}

/// Run every compressor of `roster` in order, writing CSV rows to `csv_out`
/// and summary lines to `status_out`. The first failing step aborts the run.
pub fn run_benchmark<C: Write, S: Write>(
    config: &BenchmarkConfig,
    roster: &[Compressor],
    csv_out: C,
    mut status_out: S,
) -> Result<Vec<BenchmarkResult>> {
    // Fail before any compressor runs if the input is unusable
    file_size(&config.input)?;
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output directory: {:?}", config.output_dir)
    })?;

    info!(
        input = %config.input.display(),
        output_dir = %config.output_dir.display(),
        compressors = roster.len(),
        "Starting benchmark"
    );

    let mut report = CsvReport::new(csv_out)?;
    let mut results = Vec::with_capacity(roster.len());
    for compressor in roster {
        let result = run_compressor(compressor, &config.input, &config.output_dir, config.remove)?;
        report.add(&result)?;
        writeln!(status_out, "{}", summary_line(&result))?;
        results.push(result);
    }
    report.into_inner()?;

    info!("Benchmark complete");
    Ok(results)
}

/// Print every compressor's command lines without running anything
pub fn list_roster<W: Write>(roster: &[Compressor], mut out: W) -> Result<()> {
    for compressor in roster {
        writeln!(out, "{}", compressor.name)?;
        writeln!(out, "  compress:   {}", compressor.compress.description())?;
        writeln!(out, "  decompress: {}", compressor.decompress.description())?;
    }
    Ok(())
}
