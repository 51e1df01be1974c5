//! Identifier stripping and chunked rewriting of FASTQ files.

mod extractor;
mod naming;
mod size;

pub use extractor::{extract, Chunk, ChunkExtractor, Emission, ExtractSummary};
pub use naming::output_path;
pub use size::{SizeBudget, SizeSpec, SizeUnit};

use std::io::{BufWriter, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::PrepareConfig;
use crate::io::FastqReader;

/// I/O buffer size for the output file
const IO_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// Strip identifiers from `config.input` and write the selected chunk.
pub fn prepare(config: &PrepareConfig) -> Result<ExtractSummary> {
    let output = config.output_path();
    let budget = SizeBudget::from(config.size);

    info!(
        input = %config.input.display(),
        output = %output.display(),
        seq_length = config.seq_length,
        size = %config.size.map_or_else(|| "unbounded".to_string(), |s| s.to_string()),
        chunk = config.chunk,
        "Preparing FASTQ chunk"
    );
    if config.seq_length == 0 && config.chunk > 0 {
        warn!("Without --seq-length the whole file is chunk 0; output will be empty");
    }

    let start = Instant::now();
    let mut reader = FastqReader::from_path(&config.input)?;
    let file = std::fs::File::create(&output)
        .with_context(|| format!("Failed to create output file: {:?}", output))?;
    let mut writer = BufWriter::with_capacity(IO_BUFFER_SIZE, file);

    let mut extractor = ChunkExtractor::new(config.seq_length, budget, config.chunk);
    let summary = extract(&mut reader, &mut writer, &mut extractor)?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output file: {:?}", output))?;

    info!(
        records_read = summary.records_read,
        records_produced = summary.records_produced,
        records_written = summary.records_written,
        bytes_written = summary.bytes_written,
        bases_discarded = summary.bases_discarded,
        "Chunk written in {:.2}s",
        start.elapsed().as_secs_f64()
    );
    if summary.records_written == 0 {
        warn!(chunk = config.chunk, "Requested chunk is empty");
    }

    Ok(summary)
}
