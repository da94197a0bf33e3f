//! PPM compression.
//!
//! The producer side of the format understood by [`crate::decompress`]. It
//! shares the context model, frequency tables and coder state with the
//! decoder, and updates the model at exactly the same point (after each
//! literal, before the next one), which keeps the two sides in lockstep.
//!
//! The stream has no header: it is the arithmetic-coded symbol sequence,
//! terminated by the end marker, padded with zero bits to a whole byte.

mod bit_writer;
mod encoder;
mod range_coder;

pub use bit_writer::BitWriter;
pub use encoder::{compress, encode_symbol, PpmEncoder};
pub use range_coder::ArithmeticEncoder;

use std::fmt;
use std::io;

/// Compression errors.
#[derive(Debug)]
pub enum CompressError {
    /// Tried to code a symbol the table gives no probability to.
    ZeroFrequency(u32),
    /// A frequency table exceeded the coder precision.
    TotalTooLarge,
    /// Coder interval invariants were violated.
    InvalidState,
    Io(io::Error),
}

impl fmt::Display for CompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroFrequency(symbol) => write!(f, "Symbol {} has zero frequency", symbol),
            Self::TotalTooLarge => write!(f, "Frequency total exceeds coder precision"),
            Self::InvalidState => write!(f, "Arithmetic coder state out of range"),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CompressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CompressError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<CompressError> for io::Error {
    fn from(e: CompressError) -> Self {
        match e {
            CompressError::Io(e) => e,
            _ => io::Error::new(io::ErrorKind::InvalidInput, e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompressError>;
