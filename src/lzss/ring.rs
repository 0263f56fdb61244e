//! LZSS history window
//!
//! A 4096-byte circular buffer holding recently produced output. Match
//! back-references address it relative to a monotonically increasing write
//! cursor; only the low 12 bits of any position are used for addressing.

use crate::common::{RING_MASK, RING_SIZE};

/// Circular history window for one decompression call.
///
/// The window is zero-filled at construction, so back-references that reach
/// before the first written byte read zeros, matching the on-disk encoder.
#[derive(Debug)]
pub struct RingBuffer {
    window: [u8; RING_SIZE],
    cursor: usize,
}

impl RingBuffer {
    /// Create a zero-filled window with the cursor at the start
    pub fn new() -> Self {
        Self {
            window: [0; RING_SIZE],
            cursor: 0,
        }
    }

    /// Append a literal byte to the window
    pub fn push(&mut self, byte: u8) {
        self.window[self.cursor & RING_MASK] = byte;
        self.cursor = self.cursor.wrapping_add(1);
    }

    /// Copy a back-referenced match into `out`, re-appending each byte to the
    /// window as it is produced.
    ///
    /// `base` is the 12-bit back-reference field; the match source starts at
    /// `cursor - (base + 1)`. Reading byte-at-a-time lets the source overlap
    /// the write cursor, which is how the format encodes runs.
    pub fn copy_match(&mut self, base: u16, length: usize, out: &mut Vec<u8>) {
        let start = self.cursor.wrapping_sub(base as usize + 1);
        for i in 0..length {
            let byte = self.window[start.wrapping_add(i) & RING_MASK];
            out.push(byte);
            self.window[self.cursor & RING_MASK] = byte;
            self.cursor = self.cursor.wrapping_add(1);
        }
    }
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::new()
    }
}
