use std::path::PathBuf;

use crate::prepare::SizeSpec;

#[derive(Clone, Debug)]
pub struct PrepareConfig {
    /// Input FASTQ file
    pub input: PathBuf,
    /// Output FASTQ file (None = derive from the input file name)
    pub output: Option<PathBuf>,
    /// Length of every synthetic sequence (0 = keep source records as-is)
    pub seq_length: usize,
    /// Size budget of a single chunk (None = unbounded)
    pub size: Option<SizeSpec>,
    /// Index of the chunk to write
    pub chunk: usize,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: None,
            seq_length: 0,
            size: None,
            chunk: 0,
        }
    }
}

impl PrepareConfig {
    /// Where the chunk will be written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| crate::prepare::output_path(self))
    }
}

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    /// Input FASTQ file
    pub input: PathBuf,
    /// Directory for compressed and decompressed artifacts
    pub output_dir: PathBuf,
    /// Remove the artifacts after measuring each compressor
    pub remove: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_dir: PathBuf::from("out"),
            remove: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CombineConfig {
    /// Input FASTQ file
    pub input: PathBuf,
    /// Output FASTQ file (None = stdout)
    pub output: Option<PathBuf>,
    /// Identifier written after `@` (None = input file name)
    pub label: Option<String>,
    /// First base of the range (inclusive)
    pub start: usize,
    /// Last base of the range (exclusive)
    pub end: usize,
}
