//! Bit reader for compressed data streams.
//!
//! Reads bits from a byte source, MSB first.

use std::io::{self, Read};

/// Bit reader over any byte source.
///
/// Pulls one byte at a time from the inner reader; wrap files in a
/// [`BufReader`](std::io::BufReader).
pub struct BitReader<R> {
    inner: R,
    /// Byte currently being consumed
    current: u8,
    /// Bits of `current` not yet returned
    bits_left: u32,
    bits_read: u64,
    at_eof: bool,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            current: 0,
            bits_left: 0,
            bits_read: 0,
            at_eof: false,
        }
    }

    /// Read a single bit. `None` once the source is exhausted.
    #[inline]
    pub fn read_bit(&mut self) -> io::Result<Option<u8>> {
        if self.bits_left == 0 && !self.fill()? {
            return Ok(None);
        }
        self.bits_left -= 1;
        self.bits_read += 1;
        Ok(Some((self.current >> self.bits_left) & 1))
    }

    fn fill(&mut self) -> io::Result<bool> {
        if self.at_eof {
            return Ok(false);
        }
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => {
                    self.at_eof = true;
                    return Ok(false);
                }
                Ok(_) => {
                    self.current = byte[0];
                    self.bits_left = 8;
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Bits returned so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Check if the source has been exhausted.
    pub fn is_eof(&self) -> bool {
        self.at_eof && self.bits_left == 0
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
