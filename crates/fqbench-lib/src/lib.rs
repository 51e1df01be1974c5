//! FASTQ chunk preparation and external compressor benchmarking.
//!
//! [`prepare`] strips identifiers from a FASTQ file and re-packs its
//! sequence/quality data into fixed-length synthetic records, selecting a
//! single size-bounded chunk. [`benchmark`] times a fixed roster of external
//! compressors against a FASTQ file. [`combine`] cuts one long record out of
//! the concatenated sequence of a file.

pub mod benchmark;
pub mod cli;
pub mod combine;
pub mod error;
pub mod io;
pub mod prepare;

pub use error::{CommandError, SizeError};
