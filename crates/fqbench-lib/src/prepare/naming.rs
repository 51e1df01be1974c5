use std::path::{Path, PathBuf};

use crate::cli::PrepareConfig;

/// Derive the output path of a prepared chunk from its input path.
///
/// `reads.fastq` becomes `reads.noident.fastq`, or
/// `reads.noident.<seq-length>.<size>.<chunk>.fastq` when any parameter is
/// not at its default. A trailing `.gz` is dropped because output is plain.
pub fn output_path(config: &PrepareConfig) -> PathBuf {
    let input = &config.input;
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = Path::new(file_name.strip_suffix(".gz").unwrap_or(&file_name));

    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}.noident");

    if config.seq_length != 0 || config.size.is_some() || config.chunk != 0 {
        let size = config
            .size
            .map_or_else(|| "all".to_string(), |s| s.to_string());
        name.push_str(&format!(".{}.{}.{}", config.seq_length, size, config.chunk));
    }

    if let Some(ext) = base.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }

    input.with_file_name(name)
}
