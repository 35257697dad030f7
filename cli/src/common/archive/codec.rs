//! # pkgrs Package Archive Codec (`common::archive::codec`)
//!
//! File: cli/src/common/archive/codec.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! Binary framing for single-package archives (`<package>.gz`). An archive is a
//! plain concatenation of records written through a gzip filter:
//!
//! | Field           | Size                   | Meaning                                   |
//! |-----------------|------------------------|-------------------------------------------|
//! | `nameLength`    | 4 bytes, native order  | UTF-16 code units in the relative path    |
//! | `name`          | `nameLength` × 2 bytes | relative path, UTF-16LE code units        |
//! | `contentLength` | 4 bytes, native order  | byte length of the file content           |
//! | `content`       | `contentLength` bytes  | raw file bytes                            |
//!
//! There is no record count and no terminator. The decoder treats a name-length
//! prefix that cannot be read in full (the stream is exhausted) or that reads as
//! zero as the end of the archive. A prefix that *was* read in full followed by a
//! short path, length or content read is a truncated archive and fails with
//! `PkgError::Format`; partial records are never returned.
//!
//! ## Architecture
//!
//! - `ArchiveWriter`: incremental encoder (`append` one record at a time, then `finish`).
//! - `ArchiveReader`: streaming decoder over `flate2::read::GzDecoder`, exposed as an
//!   `Iterator<Item = Result<ArchiveRecord>>`.
//! - `encode` / `decode`: whole-sequence conveniences.
//!
//! Path text encoding is confined to `encode_name` / `decode_name`; nothing outside
//! this file sees code units.
//!
//! ## Usage
//!
//! ```rust
//! let mut writer = ArchiveWriter::new(File::create("pkg.gz")?);
//! writer.append("Schemas/Account.js", b"define(...)")?;
//! writer.finish()?;
//!
//! for record in ArchiveReader::new(File::open("pkg.gz")?) {
//!     let record = record?;
//!     println!("{} ({} bytes)", record.path, record.content.len());
//! }
//! ```
//!
use super::ArchiveRecord;
use crate::core::error::{PkgError, Result};
use anyhow::Context;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use std::io::{BufReader, ErrorKind, Read, Write};

/// Size of every length prefix in the framing.
const PREFIX_LEN: usize = 4;

/// Incremental archive encoder writing framed records through a gzip filter.
pub struct ArchiveWriter<W: Write> {
    encoder: GzEncoder<W>,
    records: usize,
}

impl<W: Write> ArchiveWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            encoder: GzEncoder::new(inner, Compression::default()),
            records: 0,
        }
    }

    /// Writes one record. Paths must be non-empty: a zero name length is the
    /// end-of-archive marker on the decoding side.
    pub fn append(&mut self, path: &str, content: &[u8]) -> Result<()> {
        if path.is_empty() {
            anyhow::bail!(PkgError::Argument(
                "archive record path cannot be empty".to_string()
            ));
        }
        let (units, name_bytes) = encode_name(path);
        let content_len = u32::try_from(content.len()).map_err(|_| {
            PkgError::Format(format!(
                "'{}' is {} bytes, larger than a record can describe",
                path,
                content.len()
            ))
        })?;

        self.encoder
            .write_all(&units.to_ne_bytes())
            .and_then(|_| self.encoder.write_all(&name_bytes))
            .and_then(|_| self.encoder.write_all(&content_len.to_ne_bytes()))
            .and_then(|_| self.encoder.write_all(content))
            .with_context(|| format!("Failed to write archive record '{}'", path))?;
        self.records += 1;
        Ok(())
    }

    /// Number of records appended so far.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Flushes and closes the gzip stream, returning the inner writer.
    pub fn finish(self) -> Result<W> {
        self.encoder
            .finish()
            .context("Failed to finish gzip compression stream")
    }
}

/// Encodes `records` in order into `output`.
#[allow(dead_code)] // The engine streams through `ArchiveWriter`; kept for in-memory callers and tests.
pub fn encode<W, I>(records: I, output: W) -> Result<W>
where
    W: Write,
    I: IntoIterator<Item = ArchiveRecord>,
{
    let mut writer = ArchiveWriter::new(output);
    for record in records {
        writer.append(&record.path, &record.content)?;
    }
    writer.finish()
}

/// Streaming archive decoder. Yields records until the end-of-archive condition.
pub struct ArchiveReader<R: Read> {
    input: BufReader<GzDecoder<R>>,
    done: bool,
}

impl<R: Read> ArchiveReader<R> {
    pub fn new(compressed: R) -> Self {
        Self {
            input: BufReader::new(GzDecoder::new(compressed)),
            done: false,
        }
    }

    fn next_record(&mut self) -> Result<Option<ArchiveRecord>> {
        let mut prefix = [0u8; PREFIX_LEN];
        if read_full(&mut self.input, &mut prefix)? < PREFIX_LEN {
            return Ok(None);
        }
        let units = u32::from_ne_bytes(prefix) as usize;
        if units == 0 {
            return Ok(None);
        }

        let name_bytes = read_exact_len(&mut self.input, units * 2, "record name")?;
        let path = decode_name(&name_bytes)?;

        let mut len_prefix = [0u8; PREFIX_LEN];
        expect_full(&mut self.input, &mut len_prefix, "content length")
            .with_context(|| format!("Record '{}' is incomplete", path))?;
        let content_len = u32::from_ne_bytes(len_prefix) as usize;

        let content = read_exact_len(&mut self.input, content_len, "record content")
            .with_context(|| format!("Record '{}' is incomplete", path))?;

        Ok(Some(ArchiveRecord { path, content }))
    }
}

impl<R: Read> Iterator for ArchiveReader<R> {
    type Item = Result<ArchiveRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                // An error ends the sequence; callers never see records past corruption.
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Decodes every record of a compressed archive.
pub fn decode<R: Read>(compressed: R) -> ArchiveReader<R> {
    ArchiveReader::new(compressed)
}

/// Reads until `buf` is full or the stream ends, returning the bytes read.
fn read_full<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("Failed to read compressed archive stream"),
        }
    }
    Ok(filled)
}

fn expect_full<R: Read>(input: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    let got = read_full(input, buf)?;
    if got < buf.len() {
        anyhow::bail!(truncated(what, buf.len(), got));
    }
    Ok(())
}

/// Reads exactly `len` bytes. The buffer grows with the data actually read, so
/// a corrupt length prefix cannot force a huge allocation up front.
fn read_exact_len<R: Read>(input: &mut R, len: usize, what: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    input
        .take(len as u64)
        .read_to_end(&mut buf)
        .context("Failed to read compressed archive stream")?;
    if buf.len() < len {
        anyhow::bail!(truncated(what, len, buf.len()));
    }
    Ok(buf)
}

fn truncated(what: &str, expected: usize, found: usize) -> PkgError {
    PkgError::Format(format!(
        "truncated {}: expected {} bytes, found {}",
        what, expected, found
    ))
}

/// Encodes a path as UTF-16LE code units, returning the unit count and bytes.
fn encode_name(path: &str) -> (u32, Vec<u8>) {
    let mut bytes = Vec::with_capacity(path.len() * 2);
    let mut units = 0u32;
    for unit in path.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
        units += 1;
    }
    (units, bytes)
}

fn decode_name(bytes: &[u8]) -> Result<String> {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| {
        anyhow::anyhow!(PkgError::Format(
            "record name is not valid UTF-16".to_string()
        ))
    })
}
