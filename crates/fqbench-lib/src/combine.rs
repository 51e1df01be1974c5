//! Cut a single long record out of the concatenated sequence of a file.

use std::io::{BufRead, BufWriter, Write};

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::cli::CombineConfig;
use crate::io::{FastqReader, FastqRecord};

/// Concatenate records from `reader` until `end` bases are buffered and write
/// `@<label> <start>:<end>` with the `[start, end)` slice of sequence and
/// quality. The slice is clamped to the data available.
pub fn combine_range<R: BufRead, W: Write>(
    reader: &mut FastqReader<R>,
    writer: &mut W,
    label: &str,
    start: usize,
    end: usize,
) -> Result<usize> {
    if start > end {
        bail!("Invalid range: start ({start}) is greater than end ({end})");
    }

    let mut sequence = Vec::new();
    let mut quality = Vec::new();
    let mut record = FastqRecord::default();
    while sequence.len() < end && reader.read_into(&mut record)? {
        sequence.extend_from_slice(&record.sequence);
        quality.extend_from_slice(&record.quality);
    }

    let seq = &sequence[start.min(sequence.len())..end.min(sequence.len())];
    let qual = &quality[start.min(quality.len())..end.min(quality.len())];

    writeln!(writer, "@{label} {start}:{end}")?;
    writer.write_all(seq)?;
    writer.write_all(b"\n+\n")?;
    writer.write_all(qual)?;
    writer.write_all(b"\n")?;

    Ok(seq.len())
}

/// Run [`combine_range`] with file input and file or stdout output.
pub fn combine(config: &CombineConfig) -> Result<()> {
    let label = match &config.label {
        Some(label) => label.clone(),
        None => config.input.display().to_string(),
    };
    let mut reader = FastqReader::from_path(&config.input)?;

    let mut writer: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let bases = combine_range(&mut reader, &mut writer, &label, config.start, config.end)?;
    writer.flush()?;

    info!(
        records_read = reader.records_read(),
        bases,
        "Combined range {}:{}",
        config.start,
        config.end
    );
    Ok(())
}
