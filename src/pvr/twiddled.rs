//! Square-twiddled texture decoding
//!
//! Samples are stored along the Morton curve rather than row-major.
//! Mipmapped containers store levels smallest to largest, so the full
//! resolution level is always the trailing `width * height * 2` bytes; the
//! smaller levels are skipped by slicing from the tail.

use super::morton;
use crate::error::TextureError;

/// Decode a twiddled sample region into a row-major pixel buffer.
///
/// `chunk` is the whole container including its header. Output pixel
/// `(row i, col j)` comes from the little-endian 16-bit sample at Morton
/// index `interleave(i, j)`, expanded by `unpack`.
pub fn decode<const N: usize>(
    chunk: &[u8],
    width: u16,
    height: u16,
    unpack: fn(u16) -> [u8; N],
) -> Result<Vec<u8>, TextureError> {
    let w = width as usize;
    let h = height as usize;
    if w == 0 || h == 0 {
        return Ok(Vec::new());
    }

    let mip_bytes = w * h * 2;
    if chunk.len() < mip_bytes {
        return Err(TextureError::Truncated {
            needed: mip_bytes,
            available: chunk.len(),
        });
    }

    // The Morton span of the iteration grid must fit in the mipmap; a
    // rectangular grid would interleave to indices past the sample count
    let span = morton::interleave(height - 1, width - 1) as usize + 1;
    if span > w * h {
        return Err(TextureError::Truncated {
            needed: span * 2,
            available: mip_bytes,
        });
    }

    let mip = &chunk[chunk.len() - mip_bytes..];
    let mut pixels = Vec::with_capacity(w * h * N);
    for i in 0..h {
        for j in 0..w {
            let index = morton::interleave(i as u16, j as u16) as usize;
            let sample = u16::from_le_bytes([mip[2 * index], mip[2 * index + 1]]);
            pixels.extend_from_slice(&unpack(sample));
        }
    }
    Ok(pixels)
}
