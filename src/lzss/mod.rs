//! LZSS-variant decompression for PAK/HQR archive entries
//!
//! Entries are compressed with an LZSS family codec over a 4096-byte history
//! window. The payload is a stream of 8-bit control words, consumed LSB
//! first: a set bit means the next payload byte is a literal, a clear bit
//! means the next two bytes are a little-endian match word whose low 4 bits
//! are a length and whose high 12 bits are a back-reference base.
//!
//! The two compressed modes share this loop and differ only in the constant
//! added to decoded match lengths, so the bias is a decoder parameter rather
//! than a second code path. The bitstream carries no end-of-stream marker and
//! no self-describing length; the caller must verify the output length
//! against the entry header, which [`decompress_entry`] does.

mod ring;

pub use ring::RingBuffer;

use crate::common::{CompressionMode, EntryHeader};
use crate::error::DecompressError;

/// Decompress an LZSS payload with an explicit match-length bias.
///
/// The loop is total: a payload truncated mid-control-word or mid-match
/// terminates cleanly with whatever output was produced. Corruption is caught
/// by the caller's length check, not here.
pub fn decompress_with_bias(payload: &[u8], length_bias: usize) -> Vec<u8> {
    let mut ring = RingBuffer::new();
    let mut out = Vec::new();
    let mut pos = 0;
    // Control word with a sentinel in bit 8: once eight data bits have been
    // shifted out, the sentinel clears and the next payload byte is loaded.
    let mut ctl: u16 = 0;

    while pos < payload.len() {
        if ctl & 0x100 == 0 {
            ctl = u16::from(payload[pos]) | 0xFF00;
            pos += 1;
            if pos >= payload.len() {
                break;
            }
        }

        if ctl & 1 != 0 {
            let byte = payload[pos];
            pos += 1;
            out.push(byte);
            ring.push(byte);
        } else {
            if pos + 1 >= payload.len() {
                break;
            }
            let word = u16::from_le_bytes([payload[pos], payload[pos + 1]]);
            pos += 2;
            let base = word >> 4;
            let length = (word & 0xF) as usize + length_bias;
            ring.copy_match(base, length, &mut out);
        }

        ctl >>= 1;
    }

    out
}

/// Decompress an entry payload according to its compression mode.
///
/// `Raw` payloads are returned verbatim.
pub fn decompress(payload: &[u8], mode: CompressionMode) -> Vec<u8> {
    match mode.length_bias() {
        Some(bias) => decompress_with_bias(payload, bias),
        None => payload.to_vec(),
    }
}

/// Decompress an entry payload and verify the produced length against the
/// header-declared uncompressed size.
///
/// This is the authoritative correctness check for the format: the bitstream
/// itself cannot express where it ends.
pub fn decompress_entry(payload: &[u8], header: &EntryHeader) -> Result<Vec<u8>, DecompressError> {
    let out = decompress(payload, header.mode);
    let expected = header.uncompressed_size as usize;
    if out.len() != expected {
        return Err(DecompressError::LengthMismatch {
            expected,
            actual: out.len(),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CompressionMode;

    #[test]
    fn test_literal_only_stream() {
        // Control byte 0xFF: all eight following bytes are literals
        let payload = [0xFF, b'p', b'a', b'k', b'r', b'i', b'p', b'!', b'!'];
        assert_eq!(decompress_with_bias(&payload, 2), b"pakrip!!");
    }

    #[test]
    fn test_short_literal_tail() {
        // A final control byte whose remaining bits go unused
        let payload = [0x03, b'h', b'i'];
        assert_eq!(decompress_with_bias(&payload, 2), b"hi");
    }

    #[test]
    fn test_match_copies_history() {
        // Literals "ab", then a match: base 1 (two bytes back), raw length 0.
        // Control word 0b011: bits 0,1 literal, bit 2 match.
        // Match word 0x0010: base = 1, length field = 0.
        let payload = [0x03, b'a', b'b', 0x10, 0x00];
        assert_eq!(decompress_with_bias(&payload, 2), b"abab");
        assert_eq!(decompress_with_bias(&payload, 3), b"ababa");
    }

    #[test]
    fn test_overlapping_match_expands_run() {
        // One literal then a self-overlapping match at base 0
        let payload = [0x01, b'z', 0x00, 0x00];
        assert_eq!(decompress_with_bias(&payload, 3), b"zzzz");
    }

    #[test]
    fn test_max_length_match() {
        // Length field 0xF with bias 3 copies 18 bytes
        let payload = [0x01, b'q', 0x0F, 0x00];
        assert_eq!(decompress_with_bias(&payload, 3).len(), 19);
    }

    #[test]
    fn test_control_words_refill_after_eight_bits() {
        // Two full control bytes, sixteen literals
        let mut payload = vec![0xFF];
        payload.extend_from_slice(b"01234567");
        payload.push(0xFF);
        payload.extend_from_slice(b"89abcdef");
        assert_eq!(decompress_with_bias(&payload, 2), b"0123456789abcdef");
    }

    #[test]
    fn test_truncated_control_byte_terminates() {
        // A trailing control byte with no payload after it
        let payload = [0xFF];
        assert!(decompress_with_bias(&payload, 2).is_empty());
    }

    #[test]
    fn test_truncated_match_word_terminates() {
        // Match flagged but only one byte of the match word present
        let payload = [0x01, b'a', 0x10];
        assert_eq!(decompress_with_bias(&payload, 2), b"a");
    }

    #[test]
    fn test_raw_mode_passthrough() {
        let payload = b"not compressed at all";
        assert_eq!(decompress(payload, CompressionMode::Raw), payload);
    }

    #[test]
    fn test_entry_length_verified() {
        let header = EntryHeader {
            uncompressed_size: 8,
            compressed_size: 9,
            mode: CompressionMode::LzssAlt,
        };
        let payload = [0xFF, b'p', b'a', b'k', b'r', b'i', b'p', b'!', b'!'];
        assert_eq!(decompress_entry(&payload, &header).unwrap(), b"pakrip!!");
    }

    #[test]
    fn test_entry_length_mismatch_reports_both_sizes() {
        // Declared size off by one from the actual output
        let header = EntryHeader {
            uncompressed_size: 9,
            compressed_size: 9,
            mode: CompressionMode::LzssAlt,
        };
        let payload = [0xFF, b'p', b'a', b'k', b'r', b'i', b'p', b'!', b'!'];
        match decompress_entry(&payload, &header) {
            Err(DecompressError::LengthMismatch { expected, actual }) => {
                assert_eq!(expected, 9);
                assert_eq!(actual, 8);
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_mode_bias_changes_output_length() {
        // Same payload decoded as LzssAlt and Lzss differs by one byte per match
        let payload = [0x01, b'r', 0x00, 0x00];
        let alt = decompress(&payload, CompressionMode::LzssAlt);
        let std = decompress(&payload, CompressionMode::Lzss);
        assert_eq!(alt.len() + 1, std.len());
    }
}
