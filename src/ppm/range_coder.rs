//! Interval state shared by the arithmetic encoder and decoder.
//!
//! Binary arithmetic coding with a 32-bit state held in 64-bit arithmetic.
//! Both sides narrow `[low, high]` identically and then renormalise one bit
//! at a time; the caller decides what a renormalisation step means (emit a
//! bit, or shift a new bit into the code register).

/// Width of the coder state.
pub const STATE_BITS: u32 = 32;

pub(crate) const FULL_RANGE: u64 = 1 << STATE_BITS;
pub(crate) const HALF_RANGE: u64 = FULL_RANGE >> 1;
pub(crate) const QUARTER_RANGE: u64 = HALF_RANGE >> 1;
pub(crate) const MIN_RANGE: u64 = QUARTER_RANGE + 2;
pub(crate) const STATE_MASK: u64 = FULL_RANGE - 1;

/// Largest frequency total the coder can handle at this precision.
pub const MAX_TOTAL: u64 = {
    let by_overflow = u64::MAX / FULL_RANGE;
    if by_overflow < MIN_RANGE {
        by_overflow
    } else {
        MIN_RANGE
    }
};

/// Interval inconsistencies. Only reachable with corrupt input or a table
/// that does not contain the coded symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StateError {
    RangeOutOfBounds,
    ZeroFrequency,
    TotalTooLarge,
}

/// One renormalisation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Renorm {
    /// Top bits of `low` and `high` agreed; carries that bit.
    Shift(u8),
    /// Interval straddled the midpoint inside the middle half.
    Underflow,
}

#[derive(Debug, Clone)]
pub(crate) struct CoderState {
    pub low: u64,
    pub high: u64,
}

impl CoderState {
    pub fn new() -> Self {
        Self {
            low: 0,
            high: STATE_MASK,
        }
    }

    #[inline]
    pub fn range(&self) -> u64 {
        self.high - self.low + 1
    }

    /// Narrow the interval to the sub-range `[sym_low, sym_high)` of `total`.
    pub fn narrow(&mut self, total: u32, sym_low: u32, sym_high: u32) -> Result<(), StateError> {
        if self.low >= self.high
            || (self.low & STATE_MASK) != self.low
            || (self.high & STATE_MASK) != self.high
        {
            return Err(StateError::RangeOutOfBounds);
        }
        let range = self.range();
        if !(MIN_RANGE..=FULL_RANGE).contains(&range) {
            return Err(StateError::RangeOutOfBounds);
        }
        if sym_low >= sym_high {
            return Err(StateError::ZeroFrequency);
        }
        let total = u64::from(total);
        if total > MAX_TOTAL {
            return Err(StateError::TotalTooLarge);
        }

        let new_low = self.low + u64::from(sym_low) * range / total;
        let new_high = self.low + u64::from(sym_high) * range / total - 1;
        self.low = new_low;
        self.high = new_high;
        Ok(())
    }

    /// Perform the next renormalisation step, if any.
    #[inline]
    pub fn renormalize(&mut self) -> Option<Renorm> {
        if ((self.low ^ self.high) & HALF_RANGE) == 0 {
            let bit = (self.low >> (STATE_BITS - 1)) as u8;
            self.low = (self.low << 1) & STATE_MASK;
            self.high = ((self.high << 1) & STATE_MASK) | 1;
            return Some(Renorm::Shift(bit));
        }
        if (self.low & !self.high & QUARTER_RANGE) != 0 {
            self.low = (self.low << 1) & (STATE_MASK >> 1);
            self.high = ((self.high << 1) & (STATE_MASK >> 1)) | HALF_RANGE | 1;
            return Some(Renorm::Underflow);
        }
        None
    }
}
