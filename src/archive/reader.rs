//! Archive offset table and entry reading
//!
//! A PAK/HQR archive opens with a packed table of little-endian u32 offsets,
//! one per manifest entry. Each offset points at a 10-byte entry header
//! (uncompressed size, compressed size, mode word) followed immediately by
//! the compressed payload.

use crate::common::EntryHeader;
use crate::error::ArchiveError;
use std::io::{Read, Seek, SeekFrom};

/// Byte-addressable archive reader.
///
/// Seek-then-read is not atomic, so a reader must not be shared across
/// threads; parallel extraction wants one reader per entry instead.
#[derive(Debug)]
pub struct ArchiveReader<R: Read + Seek> {
    inner: R,
}

impl<R: Read + Seek> ArchiveReader<R> {
    /// Wrap a seekable byte source
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read the offset table from the start of the archive
    pub fn read_offsets(&mut self, count: usize) -> Result<Vec<u32>, ArchiveError> {
        self.inner.seek(SeekFrom::Start(0))?;
        let mut table = vec![0u8; count * 4];
        self.inner.read_exact(&mut table)?;
        Ok(table
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Read the entry header and payload stored at `offset`
    pub fn read_entry(&mut self, offset: u32) -> Result<(EntryHeader, Vec<u8>), ArchiveError> {
        self.inner.seek(SeekFrom::Start(u64::from(offset)))?;
        let mut raw = [0u8; EntryHeader::SIZE];
        self.inner.read_exact(&mut raw)?;
        let header = EntryHeader::from_bytes(&raw)?;

        let mut payload = vec![0u8; header.compressed_size as usize];
        self.inner.read_exact(&mut payload)?;
        Ok((header, payload))
    }
}
