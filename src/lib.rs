//! pakrip - Rust extractor for PAK/HQR game archives
//!
//! This crate unpacks a proprietary game archive format: a manifest of
//! logical paths resolved against a binary blob of per-entry offsets, an
//! LZSS-family codec over a 4KB ring buffer, and a PVR texture decoder that
//! reverses Morton-ordered ("twiddled") pixel addressing and
//! vector-quantized codebook blocks for three 16-bit pixel formats.
//!
//! # Features
//!
//! - LZSS decompression with both archive length biases (`LZSS_ALT`, `LZSS`)
//! - Square-twiddled and VQ texture decoding (ARGB1555, ARGB4444, RGB565)
//! - Largest-mipmap extraction from mipmapped containers
//! - Manifest-driven archive walking with per-entry error containment
//!
//! # Example - Decompressing an entry
//!
//! ```
//! use pakrip::{decompress, CompressionMode};
//!
//! // Control byte 0xFF: the next eight payload bytes are literals
//! let payload = [0xFF, b'p', b'a', b'k', b'r', b'i', b'p', b'!', b'!'];
//! let data = decompress(&payload, CompressionMode::Lzss);
//! assert_eq!(data, b"pakrip!!");
//! ```
//!
//! # Example - Extracting an archive
//!
//! ```no_run
//! use pakrip::archive::{EntryPayload, Extractor};
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let manifest = std::fs::read("data.lst")?;
//! let archive = BufReader::new(File::open("data.pak")?);
//! let mut extractor = Extractor::open(archive, &manifest)?;
//! for index in 0..extractor.len() {
//!     match extractor.extract(index)?.payload {
//!         EntryPayload::Texture(texture) => { /* serialize pixels */ }
//!         EntryPayload::Opaque(bytes) => { /* write bytes */ }
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod archive;
pub mod common;
pub mod error;
pub mod lzss;
pub mod pvr;

// Re-export commonly used types
pub use common::{CompressionMode, EntryHeader, MAX_DIMENSION, RING_SIZE};
pub use error::{ArchiveError, DecompressError, TextureError};
pub use pvr::{ChannelLayout, DecodedTexture, EncodingFormat, PixelFormat};

// Convenience functions

/// Decompress an archive entry payload
///
/// # Arguments
/// * `payload` - The stored entry bytes
/// * `mode` - Compression mode from the entry header
///
/// # Returns
/// The decompressed bytes; `Raw` payloads come back verbatim
pub fn decompress(payload: &[u8], mode: CompressionMode) -> Vec<u8> {
    lzss::decompress(payload, mode)
}

/// Decode a PVR texture container into a flat pixel buffer
///
/// # Arguments
/// * `data` - Container bytes starting at the `PVRT` tag
///
/// # Returns
/// The decoded texture, or a typed error distinguishing "not a texture"
/// from "recognized but unsupported"
pub fn decode_texture(data: &[u8]) -> Result<DecodedTexture, TextureError> {
    pvr::decode(data)
}
