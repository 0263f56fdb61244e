//! Per-entry extraction pipeline
//!
//! Binds a manifest to an archive and drives each entry through
//! decompression and, for texture-tagged paths, the PVR decoder. Entries are
//! independent: a failed entry yields a typed error for that index and the
//! caller moves on to the next one.

use super::{manifest, reader::ArchiveReader};
use crate::common::PVR_PRE_HEADER_SIZE;
use crate::error::{ArchiveError, TextureError};
use crate::lzss;
use crate::pvr::{self, DecodedTexture};
use std::io::{Read, Seek};

/// Decoded payload of one archive entry
#[derive(Debug)]
pub enum EntryPayload {
    /// A texture-tagged entry that decoded successfully
    Texture(DecodedTexture),
    /// Anything else: plain entry bytes, or the PVR container bytes when
    /// texture decoding hit a recoverable error
    Opaque(Vec<u8>),
}

/// One extracted archive entry
#[derive(Debug)]
pub struct Entry {
    /// Manifest path for this entry
    pub path: String,
    /// Decoded payload
    pub payload: EntryPayload,
}

/// Archive extractor driving the decode pipeline entry by entry
#[derive(Debug)]
pub struct Extractor<R: Read + Seek> {
    reader: ArchiveReader<R>,
    paths: Vec<String>,
    offsets: Vec<u32>,
}

impl<R: Read + Seek> Extractor<R> {
    /// Open an archive with its manifest bytes.
    ///
    /// Reads the offset table (one u32 per manifest path) and verifies the
    /// two agree: the first entry offset cannot fall inside the table
    /// itself. Disagreement means the manifest does not belong to this
    /// archive, which no per-entry recovery can fix, so it fails here before
    /// any entry is touched.
    pub fn open(source: R, manifest_bytes: &[u8]) -> Result<Self, ArchiveError> {
        let paths = manifest::parse(manifest_bytes);
        let mut reader = ArchiveReader::new(source);
        let offsets = reader.read_offsets(paths.len())?;

        if let Some(&first) = offsets.first() {
            let table_end = paths.len() as u32 * 4;
            if first < table_end {
                return Err(ArchiveError::OffsetTableMismatch {
                    entries: paths.len(),
                    first_offset: first,
                });
            }
        }

        Ok(Self {
            reader,
            paths,
            offsets,
        })
    }

    /// Number of entries in the archive
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the archive has no entries
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Manifest paths in entry order
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Read and decompress one entry without texture handling.
    ///
    /// The output length is verified against the entry header; a mismatch
    /// fails this entry only.
    pub fn read_raw(&mut self, index: usize) -> Result<Vec<u8>, ArchiveError> {
        let offset = *self
            .offsets
            .get(index)
            .ok_or(ArchiveError::EntryOutOfRange {
                index,
                entries: self.paths.len(),
            })?;
        let (header, payload) = self.reader.read_entry(offset)?;
        let data = lzss::decompress_entry(&payload, &header)?;
        Ok(data)
    }

    /// Extract one entry, decoding texture-tagged payloads.
    ///
    /// Paths containing `.pvr` carry a 16-byte global-index pre-header
    /// before the texture container; it is skipped before dispatch. Any
    /// texture error is recoverable: the entry falls back to its container
    /// bytes and the failure is logged.
    pub fn extract(&mut self, index: usize) -> Result<Entry, ArchiveError> {
        let data = self.read_raw(index)?;
        let path = self.paths[index].clone();

        if !path.contains(".pvr") {
            return Ok(Entry {
                path,
                payload: EntryPayload::Opaque(data),
            });
        }

        let container = if data.len() >= PVR_PRE_HEADER_SIZE {
            data[PVR_PRE_HEADER_SIZE..].to_vec()
        } else {
            data
        };

        match pvr::decode(&container) {
            Ok(texture) => {
                log::debug!(
                    "{}: decoded {}x{} texture",
                    path,
                    texture.width,
                    texture.height
                );
                Ok(Entry {
                    path,
                    payload: EntryPayload::Texture(texture),
                })
            }
            Err(TextureError::NotAContainer) => {
                log::debug!("{path}: no texture container tag, keeping raw bytes");
                Ok(Entry {
                    path,
                    payload: EntryPayload::Opaque(container),
                })
            }
            Err(err) => {
                log::warn!("{path}: texture decode failed ({err}), keeping raw bytes");
                Ok(Entry {
                    path,
                    payload: EntryPayload::Opaque(container),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CODEBOOK_SIZE;
    use std::io::Cursor;

    fn push_entry(archive: &mut Vec<u8>, uncompressed: u32, mode: u16, payload: &[u8]) {
        archive.extend_from_slice(&uncompressed.to_le_bytes());
        archive.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        archive.extend_from_slice(&mode.to_le_bytes());
        archive.extend_from_slice(payload);
    }

    fn pvr_entry_data() -> Vec<u8> {
        // 16-byte pre-header then a 2x2 RGB565 twiddled container
        let mut data = vec![0u8; PVR_PRE_HEADER_SIZE];
        data.extend_from_slice(b"PVRT");
        data.extend_from_slice(&16u32.to_le_bytes());
        data.extend_from_slice(&[0x1, 0x01, 0, 0]);
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&[0xFF; 8]);
        data
    }

    fn build_archive(entries: &[(&[u8], u32, u16)]) -> Vec<u8> {
        let table_len = entries.len() as u32 * 4;
        let mut offsets = Vec::new();
        let mut body = Vec::new();
        for &(payload, uncompressed, mode) in entries {
            offsets.push(table_len + body.len() as u32);
            push_entry(&mut body, uncompressed, mode, payload);
        }
        let mut archive = Vec::new();
        for offset in offsets {
            archive.extend_from_slice(&offset.to_le_bytes());
        }
        archive.extend_from_slice(&body);
        archive
    }

    #[test]
    fn test_extract_raw_and_lzss_entries() {
        let archive = build_archive(&[
            (b"plain bytes", 11, 0),
            (&[0xFF, b'p', b'a', b'k', b'r', b'i', b'p', b'!', b'!'], 8, 1),
        ]);
        let manifest = b"DATA\\ONE.DAT\nDATA\\TWO.DAT\n";
        let mut extractor = Extractor::open(Cursor::new(archive), manifest).unwrap();
        assert_eq!(extractor.len(), 2);

        match extractor.extract(0).unwrap().payload {
            EntryPayload::Opaque(data) => assert_eq!(data, b"plain bytes"),
            other => panic!("expected opaque payload, got {other:?}"),
        }
        match extractor.extract(1).unwrap().payload {
            EntryPayload::Opaque(data) => assert_eq!(data, b"pakrip!!"),
            other => panic!("expected opaque payload, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_decodes_pvr_entry() {
        let pvr = pvr_entry_data();
        let archive = build_archive(&[(&pvr, pvr.len() as u32, 0)]);
        let manifest = b"TEX\\STONE.PVR\n";
        let mut extractor = Extractor::open(Cursor::new(archive), manifest).unwrap();

        let entry = extractor.extract(0).unwrap();
        assert_eq!(entry.path, "tex/stone.pvr");
        match entry.payload {
            EntryPayload::Texture(texture) => {
                assert_eq!((texture.width, texture.height), (2, 2));
                assert_eq!(texture.pixels, vec![255u8; 12]);
            }
            other => panic!("expected texture payload, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_texture_falls_back_to_container_bytes() {
        // VQ-tagged BUMP format: recognized container, unsupported encoding
        let mut data = vec![0u8; PVR_PRE_HEADER_SIZE];
        data.extend_from_slice(b"PVRT");
        data.extend_from_slice(&((8 + CODEBOOK_SIZE + 1) as u32).to_le_bytes());
        data.extend_from_slice(&[0x4, 0x03, 0, 0]);
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&vec![0u8; CODEBOOK_SIZE + 1]);

        let archive = build_archive(&[(&data, data.len() as u32, 0)]);
        let mut extractor = Extractor::open(Cursor::new(archive), b"TEX\\BUMPY.PVR\n").unwrap();
        match extractor.extract(0).unwrap().payload {
            EntryPayload::Opaque(bytes) => {
                // Fallback bytes start at the container, pre-header stripped
                assert_eq!(&bytes[..4], b"PVRT");
            }
            other => panic!("expected opaque fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_length_mismatch_fails_entry_not_batch() {
        let archive = build_archive(&[
            (b"abc", 99, 0), // declared size is wrong
            (b"def", 3, 0),
        ]);
        let manifest = b"A\\BAD.BIN\nA\\GOOD.BIN\n";
        let mut extractor = Extractor::open(Cursor::new(archive), manifest).unwrap();

        assert!(matches!(
            extractor.extract(0),
            Err(ArchiveError::Decompress(_))
        ));
        // The failed entry must not poison the next one
        match extractor.extract(1).unwrap().payload {
            EntryPayload::Opaque(data) => assert_eq!(data, b"def"),
            other => panic!("expected opaque payload, got {other:?}"),
        }
    }

    #[test]
    fn test_offset_table_mismatch_aborts_open() {
        // First offset lands inside the offset table for a 2-entry manifest
        let mut archive = Vec::new();
        archive.extend_from_slice(&4u32.to_le_bytes());
        archive.extend_from_slice(&20u32.to_le_bytes());
        let manifest = b"A\\ONE.BIN\nA\\TWO.BIN\n";
        let result = Extractor::open(Cursor::new(archive), manifest);
        assert!(matches!(
            result,
            Err(ArchiveError::OffsetTableMismatch {
                entries: 2,
                first_offset: 4
            })
        ));
    }

    #[test]
    fn test_entry_index_out_of_range() {
        let archive = build_archive(&[(b"x!", 2, 0)]);
        let mut extractor = Extractor::open(Cursor::new(archive), b"A\\ONLY.BIN\n").unwrap();
        assert!(matches!(
            extractor.extract(5),
            Err(ArchiveError::EntryOutOfRange {
                index: 5,
                entries: 1
            })
        ));
    }
}
