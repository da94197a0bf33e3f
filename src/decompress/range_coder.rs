//! Arithmetic decoder.

use std::io::Read;

use super::{BitReader, DecompressError, Result};
use crate::ppm::range_coder::{CoderState, Renorm, HALF_RANGE, MAX_TOTAL, STATE_BITS, STATE_MASK};
use crate::ppm::FrequencyTable;

/// Decodes symbol indices from a bit stream, one frequency table at a time.
pub struct ArithmeticDecoder<R> {
    state: CoderState,
    /// Bits of the code value currently inside `[low, high]`.
    code: u64,
    input: BitReader<R>,
    /// Zero bits substituted past the end of the input.
    padding_bits: u32,
}

impl<R: Read> ArithmeticDecoder<R> {
    /// Prime the code register with the first `STATE_BITS` bits.
    pub fn new(input: BitReader<R>) -> Result<Self> {
        let mut decoder = Self {
            state: CoderState::new(),
            code: 0,
            input,
            padding_bits: 0,
        };
        for _ in 0..STATE_BITS {
            decoder.code = (decoder.code << 1) | decoder.read_code_bit()?;
        }
        Ok(decoder)
    }

    /// Decode the next symbol index against `table` and advance past it.
    pub fn read<T: FrequencyTable + ?Sized>(&mut self, table: &T) -> Result<u32> {
        let total = table.total();
        if total == 0 {
            return Err(DecompressError::MalformedStream("empty frequency table"));
        }
        if u64::from(total) > MAX_TOTAL {
            return Err(DecompressError::TotalTooLarge);
        }
        if self.code < self.state.low || self.code > self.state.high {
            return Err(DecompressError::MalformedStream("code outside coder range"));
        }

        // Translate from coding range scale to frequency table scale
        let total64 = u64::from(total);
        let range = self.state.range();
        let offset = self.code - self.state.low;
        let value = ((offset + 1) * total64 - 1) / range;
        if value * range / total64 > offset || value >= total64 {
            return Err(DecompressError::MalformedStream("code value out of scale"));
        }

        let Some((symbol, low, high)) = table.locate(value as u32) else {
            return Err(DecompressError::MalformedStream("code value outside table"));
        };
        if offset < u64::from(low) * range / total64
            || u64::from(high) * range / total64 <= offset
        {
            return Err(DecompressError::MalformedStream("symbol interval mismatch"));
        }

        self.state.narrow(total, low, high)?;
        while let Some(step) = self.state.renormalize() {
            let bit = self.read_code_bit()?;
            self.code = match step {
                Renorm::Shift(_) => ((self.code << 1) & STATE_MASK) | bit,
                Renorm::Underflow => {
                    (self.code & HALF_RANGE) | ((self.code << 1) & (STATE_MASK >> 1)) | bit
                }
            };
        }

        if self.code < self.state.low || self.code > self.state.high {
            return Err(DecompressError::MalformedStream("code outside coder range"));
        }
        Ok(symbol)
    }

    /// Total bits pulled from the input, padding excluded.
    pub fn bits_consumed(&self) -> u64 {
        self.input.bits_read()
    }

    /// The end of a valid stream is read ahead by less than one state width;
    /// anything further means the input was cut short.
    fn read_code_bit(&mut self) -> Result<u64> {
        match self.input.read_bit()? {
            Some(bit) => Ok(u64::from(bit)),
            None => {
                self.padding_bits += 1;
                if self.padding_bits > STATE_BITS {
                    return Err(DecompressError::UnexpectedEof);
                }
                Ok(0)
            }
        }
    }
}
