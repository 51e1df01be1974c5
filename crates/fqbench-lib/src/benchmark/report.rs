use std::io::Write;

use anyhow::Result;

use super::BenchmarkResult;

pub const CSV_HEADER: [&str; 8] = [
    "cmd",
    "input_size",
    "output_size",
    "compress_time",
    "decompress_time",
    "ratio",
    "compress_speed",
    "decompress_speed",
];

/// Machine-readable benchmark output, one row per compressor
pub struct CsvReport<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvReport<W> {
    /// Create the report and write the header row
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(CSV_HEADER)?;
        Ok(Self { writer })
    }

    pub fn add(&mut self, result: &BenchmarkResult) -> Result<()> {
        self.writer.write_record([
            result.name.clone(),
            result.input_size.to_string(),
            result.output_size.to_string(),
            format_float(result.compress_secs()),
            format_float(result.decompress_secs()),
            format_float(result.ratio()),
            format_float(result.compress_speed()),
            format_float(result.decompress_speed()),
        ])?;
        // Rows should appear as soon as each compressor is done
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV report: {}", e.error()))
    }
}

/// Shortest round-trip form of a float that always reads back as a float:
/// whole values keep a trailing `.0` (`1.0`, `4000000.0`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Scale a number with decimal k/M/G suffixes
pub fn human_bytes(num: f64) -> String {
    let (value, suffix) = if num >= 1e9 {
        (num / 1e9, "G")
    } else if num >= 1e6 {
        (num / 1e6, "M")
    } else if num >= 1e3 {
        (num / 1e3, "k")
    } else {
        (num, "")
    };
    format!("{value:.2}{suffix}")
}

/// One-line human-readable summary of a compressor run
pub fn summary_line(result: &BenchmarkResult) -> String {
    format!(
        "{:>15}: {:>9} -> {:>9} in {:>7.2}s / {:>7.2}s ({:>6.2}%, {:>6}B/s / {:>6}B/s)",
        result.name,
        result.input_size,
        result.output_size,
        result.compress_secs(),
        result.decompress_secs(),
        result.ratio() * 100.0,
        human_bytes(result.compress_speed()),
        human_bytes(result.decompress_speed()),
    )
}
