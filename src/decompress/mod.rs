//! PPM decompression.
//!
//! Reconstructs a byte stream coded by [`crate::compress`] with the same
//! [`ModelOrder`](crate::ModelOrder).
//!
//! ## Entry points
//!
//! | API | Input | Output |
//! |-----|-------|--------|
//! | [`decompress`] | `&[u8]` | `Vec<u8>` |
//! | [`decompress_stream`] | [`BitReader`] | any [`Write`](std::io::Write) |
//! | [`PpmDecoder`] | reusable, slice or reader | `Vec<u8>` or writer |
//! | [`PpmReader`] | any [`Read`](std::io::Read) | pull-based `Read` |
//!
//! ## Example
//!
//! ```rust
//! use ppm_stream::{compress, decompress, ModelOrder};
//!
//! let order = ModelOrder::new(2).unwrap();
//! let packed = compress(b"abracadabra", order).unwrap();
//! assert_eq!(decompress(&packed, order).unwrap(), b"abracadabra");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Compressed Data
//!       ↓
//! ┌──────────────────┐
//! │ BitReader        │ ← MSB-first bits, end-of-input as None
//! └──────────────────┘
//!       ↓
//! ┌──────────────────┐
//! │ ArithmeticDecoder│ ← interval narrowing against one frequency table
//! └──────────────────┘
//!       ↓
//! ┌──────────────────┐
//! │ decode_symbol    │ ← order N … 0 contexts, escapes, order -1 fallback
//! └──────────────────┘
//!       ↓
//! ┌──────────────────┐
//! │ PpmDecoder       │ ← write byte, update model, slide history
//! └──────────────────┘
//!       ↓
//! Decompressed Data
//! ```
//!
//! Every symbol depends on the exact coder state, model and history left by
//! the previous one, so a stream can only be decoded front to back and any
//! error is fatal.

mod bit_reader;
mod decoder;
mod range_coder;

#[cfg(test)]
mod tests;

pub use bit_reader::BitReader;
pub use decoder::{decode_symbol, decompress, decompress_stream, PpmDecoder, PpmReader};
pub use range_coder::ArithmeticDecoder;

use std::fmt;
use std::io;

use crate::ppm::range_coder::StateError;

/// Decompression errors.
#[derive(Debug)]
pub enum DecompressError {
    /// The input ended while a symbol was still being decoded.
    UnexpectedEof,
    /// The coder state became inconsistent (corrupt or foreign stream).
    MalformedStream(&'static str),
    /// A frequency table exceeded the coder precision.
    TotalTooLarge,
    Io(io::Error),
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "Unexpected end of data"),
            Self::MalformedStream(reason) => write!(f, "Malformed stream: {}", reason),
            Self::TotalTooLarge => write!(f, "Frequency total exceeds coder precision"),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for DecompressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DecompressError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<StateError> for DecompressError {
    fn from(e: StateError) -> Self {
        match e {
            StateError::RangeOutOfBounds => Self::MalformedStream("coder range out of bounds"),
            StateError::ZeroFrequency => Self::MalformedStream("decoded symbol has zero frequency"),
            StateError::TotalTooLarge => Self::TotalTooLarge,
        }
    }
}

impl From<DecompressError> for io::Error {
    fn from(e: DecompressError) -> Self {
        match e {
            DecompressError::Io(e) => e,
            DecompressError::UnexpectedEof => {
                io::Error::new(io::ErrorKind::UnexpectedEof, e.to_string())
            }
            _ => io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DecompressError>;
