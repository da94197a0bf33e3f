//! Bit writer, MSB first.

use std::io::{self, Write};

/// Packs bits into bytes, most significant bit first.
pub struct BitWriter<W> {
    inner: W,
    current: u8,
    /// Bits already placed in `current`
    filled: u32,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            current: 0,
            filled: 0,
            bits_written: 0,
        }
    }

    /// Write the low bit of `bit`.
    #[inline]
    pub fn write_bit(&mut self, bit: u8) -> io::Result<()> {
        self.current = (self.current << 1) | (bit & 1);
        self.filled += 1;
        self.bits_written += 1;
        if self.filled == 8 {
            self.inner.write_all(&[self.current])?;
            self.current = 0;
            self.filled = 0;
        }
        Ok(())
    }

    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Flush whole bytes to the inner writer. A partial byte stays buffered.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Pad the last byte with zero bits and hand back the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        while self.filled != 0 {
            self.write_bit(0)?;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_and_pad() {
        let mut writer = BitWriter::new(Vec::new());
        for bit in [1, 0, 1, 1, 0, 1, 0, 0, 1, 1] {
            writer.write_bit(bit).unwrap();
        }
        assert_eq!(writer.bits_written(), 10);
        let out = writer.finish().unwrap();
        assert_eq!(out, [0b1011_0100, 0b1100_0000]);
    }

    #[test]
    fn test_finish_empty() {
        let writer = BitWriter::new(Vec::new());
        assert!(writer.finish().unwrap().is_empty());
    }
}
