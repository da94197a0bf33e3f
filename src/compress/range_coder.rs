//! Arithmetic encoder.

use std::io::Write;

use super::{BitWriter, CompressError, Result};
use crate::ppm::range_coder::{CoderState, Renorm, StateError};
use crate::ppm::FrequencyTable;

/// Encodes symbol indices against frequency tables into a bit stream.
pub struct ArithmeticEncoder<W> {
    state: CoderState,
    output: BitWriter<W>,
    /// Underflow steps whose bits are only known after the next shift.
    pending_underflow: u64,
}

impl<W: Write> ArithmeticEncoder<W> {
    pub fn new(output: BitWriter<W>) -> Self {
        Self {
            state: CoderState::new(),
            output,
            pending_underflow: 0,
        }
    }

    /// Encode `symbol` with the probability `table` assigns it.
    pub fn write<T: FrequencyTable + ?Sized>(&mut self, table: &T, symbol: u32) -> Result<()> {
        let (low, high) = table.interval(symbol);
        self.state
            .narrow(table.total(), low, high)
            .map_err(|e| match e {
                StateError::ZeroFrequency => CompressError::ZeroFrequency(symbol),
                StateError::TotalTooLarge => CompressError::TotalTooLarge,
                StateError::RangeOutOfBounds => CompressError::InvalidState,
            })?;

        while let Some(step) = self.state.renormalize() {
            match step {
                Renorm::Shift(bit) => {
                    self.output.write_bit(bit)?;
                    for _ in 0..self.pending_underflow {
                        self.output.write_bit(bit ^ 1)?;
                    }
                    self.pending_underflow = 0;
                }
                Renorm::Underflow => self.pending_underflow += 1,
            }
        }
        Ok(())
    }

    pub fn bits_written(&self) -> u64 {
        self.output.bits_written()
    }

    /// Flush completed bytes without terminating the stream.
    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }

    /// Terminate the stream.
    ///
    /// A single `1` bit selects a value inside the final interval once the
    /// decoder pads with zeros; the pending underflow bits are spelled out so
    /// the decoder never needs more than one state width of padding.
    pub fn finish(mut self) -> Result<W> {
        self.output.write_bit(1)?;
        for _ in 0..self.pending_underflow {
            self.output.write_bit(0)?;
        }
        Ok(self.output.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompress::{ArithmeticDecoder, BitReader};
    use crate::ppm::{ContextFrequencies, FlatFrequencies};

    #[test]
    fn test_zero_frequency_rejected() {
        let mut encoder = ArithmeticEncoder::new(BitWriter::new(Vec::new()));
        let table = ContextFrequencies::new();
        assert!(matches!(
            encoder.write(&table, 65),
            Err(CompressError::ZeroFrequency(65))
        ));
    }

    #[test]
    fn test_skewed_table_sequence() {
        let mut table = ContextFrequencies::new();
        for _ in 0..500 {
            table.increment(0);
        }
        table.increment(9);
        let flat = FlatFrequencies::new(16);
        let symbols = [0, 0, 9, 0, 256, 0, 9, 9, 0, 0, 0];

        let mut encoder = ArithmeticEncoder::new(BitWriter::new(Vec::new()));
        for (i, &s) in symbols.iter().enumerate() {
            encoder.write(&table, s).unwrap();
            encoder.write(&flat, i as u32).unwrap();
        }
        let bytes = encoder.finish().unwrap();

        let mut decoder = ArithmeticDecoder::new(BitReader::new(&bytes[..])).unwrap();
        for (i, &s) in symbols.iter().enumerate() {
            assert_eq!(decoder.read(&table).unwrap(), s);
            assert_eq!(decoder.read(&flat).unwrap(), i as u32);
        }
    }
}
