use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

/// Read buffer size for input files
const IO_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// A single FASTQ record as four raw lines.
///
/// Fields are stored as bytes with their line terminators removed. Nothing
/// about the content is checked: a record is just four consecutive lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FastqRecord {
    pub id: Vec<u8>,
    pub sequence: Vec<u8>,
    pub separator: Vec<u8>,
    pub quality: Vec<u8>,
}

impl FastqRecord {
    /// Create a new FASTQ record
    pub fn new(id: Vec<u8>, sequence: Vec<u8>, separator: Vec<u8>, quality: Vec<u8>) -> Self {
        Self {
            id,
            sequence,
            separator,
            quality,
        }
    }
}

/// Write one record with an anonymous `@` identifier and a bare `+` separator.
pub fn write_record<W: Write>(writer: &mut W, sequence: &[u8], quality: &[u8]) -> std::io::Result<()> {
    writer.write_all(b"@\n")?;
    writer.write_all(sequence)?;
    writer.write_all(b"\n+\n")?;
    writer.write_all(quality)?;
    writer.write_all(b"\n")
}

/// Streaming FASTQ reader that groups input lines four at a time
pub struct FastqReader<R: BufRead> {
    reader: R,
    lines: [Vec<u8>; 4],
    records_read: usize,
}

// Enum to hold either a plain file reader or gzipped reader
pub enum FileReader {
    Plain(BufReader<std::fs::File>),
    Gzipped(BufReader<GzDecoder<BufReader<std::fs::File>>>),
}

impl Read for FileReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            FileReader::Plain(r) => r.read(buf),
            FileReader::Gzipped(r) => r.read(buf),
        }
    }
}

impl BufRead for FileReader {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        match self {
            FileReader::Plain(r) => r.fill_buf(),
            FileReader::Gzipped(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            FileReader::Plain(r) => r.consume(amt),
            FileReader::Gzipped(r) => r.consume(amt),
        }
    }
}

impl FastqReader<FileReader> {
    /// Open a FASTQ file (auto-detects gzip)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        // Check if file is gzipped by reading magic bytes
        let mut buffered = BufReader::with_capacity(IO_BUFFER_SIZE, file);
        let is_gzipped = {
            let peek = buffered.fill_buf()?;
            peek.len() >= 2 && peek[0] == 0x1f && peek[1] == 0x8b
        };

        let reader = if is_gzipped {
            let decoder = GzDecoder::new(buffered);
            FileReader::Gzipped(BufReader::new(decoder))
        } else {
            FileReader::Plain(buffered)
        };

        Ok(Self::new(reader))
    }
}

impl<R: BufRead> FastqReader<R> {
    /// Create a new FASTQ reader from any BufRead type
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            lines: Default::default(),
            records_read: 0,
        }
    }

    /// Number of complete records returned so far
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Trim trailing \n and \r\n from the buffer in-place, return the trimmed length.
    #[inline]
    fn trim_newline(buf: &mut Vec<u8>) -> usize {
        while buf.last().is_some_and(|&b| b == b'\n' || b == b'\r') {
            buf.pop();
        }
        buf.len()
    }

    /// Fill the four line buffers. Returns false if input ended first.
    fn fill_lines(&mut self) -> Result<bool> {
        for (i, line) in self.lines.iter_mut().enumerate() {
            line.clear();
            let bytes_read = self
                .reader
                .read_until(b'\n', line)
                .with_context(|| format!("Failed to read FASTQ line {} of record", i + 1))?;
            if bytes_read == 0 {
                if i > 0 {
                    tracing::debug!(lines = i, "dropping incomplete trailing record");
                }
                return Ok(false);
            }
            Self::trim_newline(line);
        }
        Ok(true)
    }

    /// Read the next record into `record`, reusing its allocations.
    ///
    /// Returns `Ok(false)` at end of input. A trailing group of fewer than
    /// four lines is dropped without error.
    pub fn read_into(&mut self, record: &mut FastqRecord) -> Result<bool> {
        if !self.fill_lines()? {
            return Ok(false);
        }
        let [id, sequence, separator, quality] = &mut self.lines;
        std::mem::swap(&mut record.id, id);
        std::mem::swap(&mut record.sequence, sequence);
        std::mem::swap(&mut record.separator, separator);
        std::mem::swap(&mut record.quality, quality);
        self.records_read += 1;
        Ok(true)
    }

    /// Read the next FASTQ record
    pub fn next(&mut self) -> Result<Option<FastqRecord>> {
        let mut record = FastqRecord::default();
        if self.read_into(&mut record)? {
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_fastq_parsing() {
        let data = b"@read1\nACGT\n+\nIIII\n@read2\nTGCA\n+read2\nJJJJ\n";
        let cursor = BufReader::new(Cursor::new(data));
        let mut reader = FastqReader::new(cursor);

        let record1 = reader.next().unwrap().unwrap();
        assert_eq!(record1.id, b"@read1");
        assert_eq!(record1.sequence, b"ACGT");
        assert_eq!(record1.separator, b"+");
        assert_eq!(record1.quality, b"IIII");

        let record2 = reader.next().unwrap().unwrap();
        assert_eq!(record2.id, b"@read2");
        assert_eq!(record2.separator, b"+read2");
        assert!(reader.next().unwrap().is_none());
        assert_eq!(reader.records_read(), 2);
    }

    #[test]
    fn test_trailing_partial_record_dropped() {
        let data = b"@read1\nACGT\n+\nIIII\n@read2\nTGCA\n";
        let cursor = BufReader::new(Cursor::new(data));
        let mut reader = FastqReader::new(cursor);

        assert!(reader.next().unwrap().is_some());
        assert!(reader.next().unwrap().is_none());
        assert_eq!(reader.records_read(), 1);
    }

    #[test]
    fn test_no_content_validation() {
        // Bad separator and mismatched lengths are passed through as-is
        let data = b"read1\nACGT\nBAD_LINE\nIII\n";
        let cursor = BufReader::new(Cursor::new(data));
        let mut reader = FastqReader::new(cursor);
        let record = reader.next().unwrap().unwrap();
        assert_eq!(record.separator, b"BAD_LINE");
        assert_eq!(record.quality, b"III");
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let data = b"@r\r\nAC\r\n+\r\nII";
        let cursor = BufReader::new(Cursor::new(data));
        let mut reader = FastqReader::new(cursor);
        let record = reader.next().unwrap().unwrap();
        assert_eq!(record.sequence, b"AC");
        assert_eq!(record.quality, b"II");
    }

    #[test]
    fn test_empty_file() {
        let data = b"";
        let cursor = BufReader::new(Cursor::new(data));
        let mut reader = FastqReader::new(cursor);
        assert!(reader.next().unwrap().is_none());
    }

    #[test]
    fn test_write_record() {
        let mut out = Vec::new();
        write_record(&mut out, b"ACGT", b"FFFF").unwrap();
        assert_eq!(out, b"@\nACGT\n+\nFFFF\n");
    }
}
