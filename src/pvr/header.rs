//! PVR container header parsing
//!
//! A texture container opens with the ASCII tag `PVRT`, a little-endian u32
//! chunk size, one pixel format byte, one encoding format byte, two reserved
//! bytes, and two little-endian u16 dimensions. The chunk size counts the
//! bytes following the size field itself.

use crate::common::{MAX_DIMENSION, PVR_HEADER_SIZE, PVR_MAGIC};
use crate::error::TextureError;

/// Pixel format of the packed 16-bit samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PixelFormat {
    /// 1-bit alpha, 5 bits per color channel
    Argb1555 = 0x0,
    /// 5-bit red and blue, 6-bit green, no alpha
    Rgb565 = 0x1,
    /// 4 bits per channel
    Argb4444 = 0x2,
    /// Packed luma/chroma; not decoded
    Yuv422 = 0x3,
    /// Normal-map bump encoding; not decoded
    Bump = 0x4,
    /// 4-bit palette indices; not decoded
    Pal4bpp = 0x5,
    /// 8-bit palette indices; not decoded
    Pal8bpp = 0x6,
}

impl PixelFormat {
    /// Create a PixelFormat from its header byte
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x0 => Some(PixelFormat::Argb1555),
            0x1 => Some(PixelFormat::Rgb565),
            0x2 => Some(PixelFormat::Argb4444),
            0x3 => Some(PixelFormat::Yuv422),
            0x4 => Some(PixelFormat::Bump),
            0x5 => Some(PixelFormat::Pal4bpp),
            0x6 => Some(PixelFormat::Pal8bpp),
            _ => None,
        }
    }

    /// Human-readable format name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            PixelFormat::Argb1555 => "ARGB1555",
            PixelFormat::Rgb565 => "RGB565",
            PixelFormat::Argb4444 => "ARGB4444",
            PixelFormat::Yuv422 => "YUV422",
            PixelFormat::Bump => "BUMP",
            PixelFormat::Pal4bpp => "4BPP",
            PixelFormat::Pal8bpp => "8BPP",
        }
    }
}

/// Storage layout of the sample data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EncodingFormat {
    /// Morton-ordered square texture
    SquareTwiddled = 0x01,
    /// Morton-ordered square texture with mipmap chain
    SquareTwiddledMipmap = 0x02,
    /// Vector-quantized with a 256-entry codebook
    Vq = 0x03,
    /// Vector-quantized with mipmap chain
    VqMipmap = 0x04,
    /// Palette-indexed twiddled, 8-bit; not decoded
    ClutTwiddled8bit = 0x05,
    /// Palette-indexed twiddled, 4-bit; not decoded
    ClutTwiddled4bit = 0x06,
    /// Direct-color twiddled, 8-bit; not decoded
    DirectTwiddled8bit = 0x07,
    /// Direct-color twiddled, 4-bit; not decoded
    DirectTwiddled4bit = 0x08,
    /// Row-major rectangle; not decoded
    Rectangle = 0x09,
    /// Rectangle with row stride; not decoded
    RectangularStride = 0x0B,
    /// Morton-ordered rectangle; not decoded
    RectangularTwiddled = 0x0D,
    /// VQ with a reduced codebook; not decoded
    SmallVq = 0x10,
    /// Reduced-codebook VQ with mipmaps; not decoded
    SmallVqMipmap = 0x11,
    /// Alternate mipmapped twiddled layout; not decoded
    SquareTwiddledMipmapAlt = 0x12,
}

impl EncodingFormat {
    /// Create an EncodingFormat from its header byte
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(EncodingFormat::SquareTwiddled),
            0x02 => Some(EncodingFormat::SquareTwiddledMipmap),
            0x03 => Some(EncodingFormat::Vq),
            0x04 => Some(EncodingFormat::VqMipmap),
            0x05 => Some(EncodingFormat::ClutTwiddled8bit),
            0x06 => Some(EncodingFormat::ClutTwiddled4bit),
            0x07 => Some(EncodingFormat::DirectTwiddled8bit),
            0x08 => Some(EncodingFormat::DirectTwiddled4bit),
            0x09 => Some(EncodingFormat::Rectangle),
            0x0B => Some(EncodingFormat::RectangularStride),
            0x0D => Some(EncodingFormat::RectangularTwiddled),
            0x10 => Some(EncodingFormat::SmallVq),
            0x11 => Some(EncodingFormat::SmallVqMipmap),
            0x12 => Some(EncodingFormat::SquareTwiddledMipmapAlt),
            _ => None,
        }
    }

    /// Human-readable encoding name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            EncodingFormat::SquareTwiddled => "SQUARE TWIDDLED",
            EncodingFormat::SquareTwiddledMipmap => "SQUARE TWIDDLED MIPMAP",
            EncodingFormat::Vq => "VQ",
            EncodingFormat::VqMipmap => "VQ MIPMAP",
            EncodingFormat::ClutTwiddled8bit => "CLUT TWIDDLED 8BIT",
            EncodingFormat::ClutTwiddled4bit => "CLUT TWIDDLED 4BIT",
            EncodingFormat::DirectTwiddled8bit => "DIRECT TWIDDLED 8BIT",
            EncodingFormat::DirectTwiddled4bit => "DIRECT TWIDDLED 4BIT",
            EncodingFormat::Rectangle => "RECTANGLE",
            EncodingFormat::RectangularStride => "RECTANGULAR STRIDE",
            EncodingFormat::RectangularTwiddled => "RECTANGULAR TWIDDLED",
            EncodingFormat::SmallVq => "SMALL VQ",
            EncodingFormat::SmallVqMipmap => "SMALL VQ MIPMAP",
            EncodingFormat::SquareTwiddledMipmapAlt => "SQUARE TWIDDLED MIPMAP ALT",
        }
    }
}

/// Parsed PVR container header
#[derive(Debug, Clone, Copy)]
pub struct TextureHeader {
    /// Chunk byte count declared after the size field
    pub data_size: u32,
    /// Sample pixel format
    pub pixel_format: PixelFormat,
    /// Sample storage layout
    pub encoding_format: EncodingFormat,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl TextureHeader {
    /// Parse a container header from the start of `data`.
    ///
    /// Checks run in order: magic tag, header length, dimension bounds, then
    /// format byte validity. Unknown format bytes report as an unsupported
    /// encoding so the caller can fall back to dumping the raw bytes.
    pub fn parse(data: &[u8]) -> Result<Self, TextureError> {
        if data.len() < PVR_MAGIC.len() || &data[..4] != PVR_MAGIC {
            return Err(TextureError::NotAContainer);
        }
        if data.len() < PVR_HEADER_SIZE {
            return Err(TextureError::Truncated {
                needed: PVR_HEADER_SIZE,
                available: data.len(),
            });
        }

        let data_size = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        let pixel_raw = data[8];
        let encoding_raw = data[9];
        let width = u16::from_le_bytes([data[12], data[13]]);
        let height = u16::from_le_bytes([data[14], data[15]]);

        if width >= MAX_DIMENSION || height >= MAX_DIMENSION {
            return Err(TextureError::DimensionOutOfRange { width, height });
        }

        let (Some(pixel_format), Some(encoding_format)) =
            (PixelFormat::from_u8(pixel_raw), EncodingFormat::from_u8(encoding_raw))
        else {
            return Err(TextureError::UnsupportedEncoding {
                pixel_format: pixel_raw,
                encoding_format: encoding_raw,
            });
        };

        Ok(Self {
            data_size,
            pixel_format,
            encoding_format,
            width,
            height,
        })
    }
}
