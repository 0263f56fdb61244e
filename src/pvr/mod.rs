//! PVR texture decoding
//!
//! This module turns a PVR texture container into a flat row-major RGB or
//! RGBA pixel buffer. Two storage layouts are implemented, square twiddled
//! (Morton-ordered samples) and vector quantized (codebook-indexed 2x2
//! blocks), for the three 16-bit pixel formats the archives actually use.
//! Every other pixel format / encoding combination reports a typed
//! unsupported result so the caller can fall back to dumping raw bytes.

mod header;
pub mod morton;
pub mod pixel;
mod twiddled;
mod vq;

pub use header::{EncodingFormat, PixelFormat, TextureHeader};
pub use pixel::ChannelLayout;

use crate::error::TextureError;

/// A fully decoded texture: row-major pixels, 3 or 4 bytes per pixel
#[derive(Debug, Clone)]
pub struct DecodedTexture {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Channel count and order of `pixels`
    pub layout: ChannelLayout,
    /// `height * width * layout.channels()` bytes, rows top to bottom
    pub pixels: Vec<u8>,
}

/// Decode a PVR texture container into a pixel buffer.
///
/// `data` must start at the `PVRT` tag. The container is truncated to the
/// chunk size its header declares before the sample region is located, since
/// both decoders slice the largest mipmap from the tail.
///
/// Supported combinations are the cross product of ARGB1555 / ARGB4444 /
/// RGB565 with square-twiddled / VQ (each with or without mipmaps). Anything
/// else is a typed error, never a guess.
pub fn decode(data: &[u8]) -> Result<DecodedTexture, TextureError> {
    let header = TextureHeader::parse(data)?;
    let declared = 8usize.saturating_add(header.data_size as usize);
    let chunk = &data[..declared.min(data.len())];
    let (width, height) = (header.width, header.height);

    use EncodingFormat::{SquareTwiddled, SquareTwiddledMipmap, Vq, VqMipmap};
    use PixelFormat::{Argb1555, Argb4444, Rgb565};

    let (pixels, layout) = match (header.pixel_format, header.encoding_format) {
        (Argb1555, SquareTwiddled | SquareTwiddledMipmap) => (
            twiddled::decode(chunk, width, height, pixel::unpack_1555)?,
            ChannelLayout::Rgba,
        ),
        (Argb1555, Vq | VqMipmap) => (
            vq::decode(chunk, width, height, pixel::unpack_1555)?,
            ChannelLayout::Rgba,
        ),
        (Argb4444, SquareTwiddled | SquareTwiddledMipmap) => (
            twiddled::decode(chunk, width, height, pixel::unpack_4444)?,
            ChannelLayout::Rgba,
        ),
        (Argb4444, Vq | VqMipmap) => (
            vq::decode(chunk, width, height, pixel::unpack_4444)?,
            ChannelLayout::Rgba,
        ),
        (Rgb565, SquareTwiddled | SquareTwiddledMipmap) => (
            twiddled::decode(chunk, width, height, pixel::unpack_565)?,
            ChannelLayout::Rgb,
        ),
        (Rgb565, Vq | VqMipmap) => (
            vq::decode(chunk, width, height, pixel::unpack_565)?,
            ChannelLayout::Rgb,
        ),
        (pixel_format, encoding_format) => {
            return Err(TextureError::UnsupportedEncoding {
                pixel_format: pixel_format as u8,
                encoding_format: encoding_format as u8,
            })
        }
    };

    Ok(DecodedTexture {
        width,
        height,
        layout,
        pixels,
    })
}
