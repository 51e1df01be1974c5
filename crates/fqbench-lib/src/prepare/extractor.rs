//! Chunk selection over a stream of re-packed FASTQ records.
//!
//! Source records are concatenated into a sequence buffer and a quality
//! buffer. Whenever `seq_length` bases are buffered they are cut off the
//! front and become one synthetic record (`@`, sequence, `+`, quality).
//! Synthetic records are grouped into chunks:
//!
//! * without a size budget every synthetic record is a chunk of its own;
//! * with a budget, records fill the current chunk until its serialized size
//!   reaches the budget, then the next chunk starts;
//! * with `seq_length == 0` source records pass through one by one, the whole
//!   stream is chunk 0 and the budget only stops the stream early.
//!
//! Only the target chunk is materialized; every other chunk is counted and
//! dropped.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use super::size::SizeBudget;
use crate::io::{write_record, FastqReader, FastqRecord};

/// Bytes added around sequence and quality: "@\n", "\n", "+\n", "\n"
const RECORD_OVERHEAD: usize = 6;

/// A synthetic record belonging to the target chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Index of the chunk this record belongs to
    pub index: usize,
    pub sequence: Vec<u8>,
    pub quality: Vec<u8>,
}

impl Chunk {
    /// Serialized size in bytes
    pub fn encoded_len(&self) -> u64 {
        encoded_len(self.sequence.len(), self.quality.len())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write_record(writer, &self.sequence, &self.quality)
    }
}

#[inline]
fn encoded_len(sequence_len: usize, quality_len: usize) -> u64 {
    (sequence_len + quality_len + RECORD_OVERHEAD) as u64
}

/// What happened to one synthetic record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// Belongs to another chunk; only its size was accounted
    Skipped { index: usize, len: u64 },
    /// Belongs to the target chunk
    Selected(Chunk),
}

/// Counters reported once extraction ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Complete source records consumed
    pub records_read: usize,
    /// Synthetic records produced, including skipped ones
    pub records_produced: usize,
    /// Synthetic records written to the output
    pub records_written: usize,
    pub bytes_written: u64,
    /// Buffered bases left over at end of input
    pub bases_discarded: usize,
}

/// Streaming state of the chunk extractor
#[derive(Debug)]
pub struct ChunkExtractor {
    seq_length: usize,
    budget: SizeBudget,
    target: usize,

    sequence: Vec<u8>,
    quality: Vec<u8>,
    /// Read positions in the buffers; consumed bytes are compacted on `push`
    seq_offset: usize,
    qual_offset: usize,
    /// Pass-through mode: a source record is waiting to be emitted
    pending: bool,

    chunk_index: usize,
    chunk_size: u64,
    produced: usize,
    finished: bool,
}

impl ChunkExtractor {
    pub fn new(seq_length: usize, budget: SizeBudget, target: usize) -> Self {
        Self {
            seq_length,
            budget,
            target,
            sequence: Vec::with_capacity(seq_length),
            quality: Vec::with_capacity(seq_length),
            seq_offset: 0,
            qual_offset: 0,
            pending: false,
            chunk_index: 0,
            chunk_size: 0,
            produced: 0,
            // Pass-through output is all chunk 0
            finished: seq_length == 0 && target > 0,
        }
    }

    /// True once no further input can change the output
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Index of the chunk currently being filled
    pub fn chunk_index(&self) -> usize {
        self.chunk_index
    }

    /// Synthetic records produced so far
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Number of bases waiting in the accumulation buffer
    pub fn buffered(&self) -> usize {
        self.sequence.len() - self.seq_offset
    }

    /// Drop the bytes already emitted, once per source record.
    fn compact(&mut self) {
        self.sequence.drain(..self.seq_offset);
        self.quality.drain(..self.qual_offset);
        self.seq_offset = 0;
        self.qual_offset = 0;
    }

    /// Append one source record. Drain [`next_chunk`](Self::next_chunk) afterwards.
    pub fn push(&mut self, record: &FastqRecord) {
        if self.finished {
            return;
        }
        self.compact();
        self.sequence.extend_from_slice(&record.sequence);
        self.quality.extend_from_slice(&record.quality);
        if self.seq_length == 0 {
            self.pending = true;
        }
    }

    /// Cut the next synthetic record out of the buffers, if one is complete.
    pub fn next_chunk(&mut self) -> Option<Emission> {
        if self.finished {
            return None;
        }

        let (seq_len, qual_len) = if self.seq_length == 0 {
            if !self.pending {
                return None;
            }
            self.pending = false;
            (
                self.sequence.len() - self.seq_offset,
                self.quality.len() - self.qual_offset,
            )
        } else {
            if self.buffered() < self.seq_length {
                return None;
            }
            (
                self.seq_length,
                self.seq_length.min(self.quality.len() - self.qual_offset),
            )
        };

        let seq_range = self.seq_offset..self.seq_offset + seq_len;
        let qual_range = self.qual_offset..self.qual_offset + qual_len;
        self.seq_offset = seq_range.end;
        self.qual_offset = qual_range.end;

        let index = self.chunk_index;
        let len = encoded_len(seq_len, qual_len);
        let emission = if index == self.target {
            Emission::Selected(Chunk {
                index,
                sequence: self.sequence[seq_range].to_vec(),
                quality: self.quality[qual_range].to_vec(),
            })
        } else {
            Emission::Skipped { index, len }
        };

        self.account(len);
        Some(emission)
    }

    /// Add a produced record to the running size and move chunk boundaries.
    fn account(&mut self, len: u64) {
        self.produced += 1;

        if self.seq_length == 0 {
            self.chunk_size += len;
            if self.budget.is_exhausted(self.chunk_size) {
                debug!(size = self.chunk_size, "size budget reached");
                self.finished = true;
            }
            return;
        }

        if self.budget.is_bounded() {
            self.chunk_size += len;
            if self.budget.is_exhausted(self.chunk_size) {
                debug!(chunk = self.chunk_index, size = self.chunk_size, "chunk complete");
                if self.chunk_index == self.target {
                    self.finished = true;
                    return;
                }
                self.chunk_index += 1;
                self.chunk_size = 0;
            }
        } else {
            self.chunk_index += 1;
        }

        if self.chunk_index > self.target {
            self.finished = true;
        }
    }

    /// End of input. Returns the number of buffered bases that never formed
    /// a complete synthetic record and are dropped.
    pub fn finish(&mut self) -> usize {
        let discarded = self.buffered();
        self.sequence.clear();
        self.quality.clear();
        self.seq_offset = 0;
        self.qual_offset = 0;
        self.pending = false;
        self.finished = true;
        discarded
    }
}

/// Run the extractor over `reader`, writing the target chunk to `writer`.
pub fn extract<R: BufRead, W: Write>(
    reader: &mut FastqReader<R>,
    writer: &mut W,
    extractor: &mut ChunkExtractor,
) -> Result<ExtractSummary> {
    let mut summary = ExtractSummary::default();
    let mut record = FastqRecord::default();

    while !extractor.is_finished() && reader.read_into(&mut record)? {
        extractor.push(&record);
        while let Some(emission) = extractor.next_chunk() {
            if let Emission::Selected(chunk) = emission {
                chunk
                    .write_to(writer)
                    .context("Failed to write chunk record")?;
                summary.records_written += 1;
                summary.bytes_written += chunk.encoded_len();
            }
        }
    }

    summary.records_read = reader.records_read();
    summary.records_produced = extractor.produced();
    summary.bases_discarded = extractor.finish();
    Ok(summary)
}
