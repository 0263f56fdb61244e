//! Error handling for archive extraction and texture decoding
//!
//! This module defines the error types used throughout the crate. It uses
//! thiserror for ergonomic error handling and keeps decompression, texture,
//! and archive-level failures as separate taxonomies so callers can decide
//! per entry whether to abort, fall back, or continue.

use thiserror::Error;

/// Error type for entry decompression
#[derive(Debug, Error)]
pub enum DecompressError {
    /// Decompressed length disagrees with the header-declared size.
    /// The entry data is untrustworthy and must be discarded.
    #[error("decompressed to {actual} bytes, expected {expected}")]
    LengthMismatch {
        /// Byte length declared by the entry header
        expected: usize,
        /// Byte length actually produced
        actual: usize,
    },

    /// Mode word outside the known set {0, 1, 2}
    #[error("unknown compression mode {0}")]
    UnknownMode(u16),
}

/// Error type for PVR texture decoding
#[derive(Debug, Error)]
pub enum TextureError {
    /// The buffer does not start with the PVRT magic tag. The bytes are not
    /// a texture container and should be treated as opaque data.
    #[error("not a PVR texture container")]
    NotAContainer,

    /// Header dimensions exceed the supported bound
    #[error("texture dimensions {width}x{height} out of range (must be < 0x8000)")]
    DimensionOutOfRange {
        /// Declared width in pixels
        width: u16,
        /// Declared height in pixels
        height: u16,
    },

    /// Recognized container with a pixel format / encoding combination this
    /// decoder does not implement
    #[error("unsupported encoding: pixel format {pixel_format:#04x}, encoding {encoding_format:#04x}")]
    UnsupportedEncoding {
        /// Raw pixel format byte from the header
        pixel_format: u8,
        /// Raw encoding format byte from the header
        encoding_format: u8,
    },

    /// Container too small for the layout its header declares
    #[error("truncated texture data: need {needed} bytes, have {available}")]
    Truncated {
        /// Byte count the declared layout requires
        needed: usize,
        /// Byte count actually present
        available: usize,
    },
}

/// Error type for archive-level extraction
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Manifest entry count disagrees with the archive offset table.
    /// Unrecoverable; detected before any entry is processed.
    #[error("manifest lists {entries} entries but first offset {first_offset:#x} falls inside the offset table")]
    OffsetTableMismatch {
        /// Number of paths the manifest yields
        entries: usize,
        /// First entry offset read from the archive
        first_offset: u32,
    },

    /// Entry index outside the manifest range
    #[error("entry index {index} out of range ({entries} entries)")]
    EntryOutOfRange {
        /// Requested entry index
        index: usize,
        /// Number of entries in the archive
        entries: usize,
    },

    /// Entry payload failed to decompress or verify
    #[error("decompression failed: {0}")]
    Decompress(#[from] DecompressError),

    /// I/O error reading the archive
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
