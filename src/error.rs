//! Error types for PPM compression and decompression.
//!
//! This module provides the [`PpmError`] type which covers everything the
//! high-level API can fail with. The codec modules keep their own narrower
//! errors ([`DecompressError`], [`CompressError`]) which convert into it.
//!
//! ## Error Categories
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | Configuration | [`InvalidModelOrder`], [`InvalidModelOrderText`] | Order outside the supported range |
//! | Stream | [`Decompress`] | Truncated or corrupt compressed data |
//! | Encoding | [`Compress`] | Coder invariant violated while compressing |
//! | I/O | [`Io`] | Read/write errors |
//!
//! A stream decoded with a different model order than it was produced with
//! is *not* an error: there is no header to check against, so the output is
//! simply wrong.
//!
//! ## Example
//!
//! ```rust
//! use ppm_stream::{ModelOrder, PpmError};
//!
//! match ModelOrder::new(40) {
//!     Err(PpmError::InvalidModelOrder(n)) => assert_eq!(n, 40),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! [`InvalidModelOrder`]: PpmError::InvalidModelOrder
//! [`InvalidModelOrderText`]: PpmError::InvalidModelOrderText
//! [`Decompress`]: PpmError::Decompress
//! [`Compress`]: PpmError::Compress
//! [`Io`]: PpmError::Io
//! [`DecompressError`]: crate::decompress::DecompressError
//! [`CompressError`]: crate::compress::CompressError

use std::fmt;
use std::io;

use crate::compress::CompressError;
use crate::decompress::DecompressError;

/// Error type for PPM operations.
#[derive(Debug)]
pub enum PpmError {
    /// The model order is outside `-1..=16`.
    InvalidModelOrder(i32),

    /// The model order could not be parsed as an integer.
    InvalidModelOrderText(String),

    /// The compressed stream is truncated or corrupt.
    ///
    /// Decoding is a strict chain: once one symbol is wrong every later one
    /// is too, so no partial output is recovered.
    Decompress(DecompressError),

    /// The encoder hit an internal coder error.
    Compress(CompressError),

    /// An I/O error occurred.
    ///
    /// Wraps [`std::io::Error`] for file system operations.
    Io(io::Error),
}

impl fmt::Display for PpmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidModelOrder(n) => {
                write!(
                    f,
                    "Invalid model order: {} (expected {}..={})",
                    n,
                    crate::ppm::MIN_ORDER,
                    crate::ppm::MAX_ORDER
                )
            }
            Self::InvalidModelOrderText(s) => write!(f, "Invalid model order: {:?}", s),
            Self::Decompress(e) => write!(f, "Decompression failed: {}", e),
            Self::Compress(e) => write!(f, "Compression failed: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for PpmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decompress(e) => Some(e),
            Self::Compress(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PpmError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<DecompressError> for PpmError {
    fn from(e: DecompressError) -> Self {
        match e {
            DecompressError::Io(e) => Self::Io(e),
            _ => Self::Decompress(e),
        }
    }
}

impl From<CompressError> for PpmError {
    fn from(e: CompressError) -> Self {
        match e {
            CompressError::Io(e) => Self::Io(e),
            _ => Self::Compress(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, PpmError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_is_unwrapped_from_codec_errors() {
        let e: PpmError = DecompressError::Io(io::Error::other("disk")).into();
        assert!(matches!(e, PpmError::Io(_)));

        let e: PpmError = CompressError::Io(io::Error::other("disk")).into();
        assert!(matches!(e, PpmError::Io(_)));
    }

    #[test]
    fn test_stream_errors_keep_source() {
        let e: PpmError = DecompressError::UnexpectedEof.into();
        assert_eq!(
            e.to_string(),
            "Decompression failed: Unexpected end of data"
        );
        assert!(e.source().is_some());
    }
}
