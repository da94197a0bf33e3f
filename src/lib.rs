//! Adaptive PPM (prediction by partial matching) over binary arithmetic coding.
//!
//! Decompresses, and symmetrically compresses, byte streams coded with an
//! order-N context model: each byte is predicted from the longest previously
//! seen context of up to N preceding bytes, escaping to shorter contexts and
//! finally to a flat order -1 distribution when a context has no statistics
//! for it.
//!
//! ## Features
//! - Core library depends only on `tracing`
//! - `async` - Async file helpers with tokio
//! - `wasm` - Browser WASM bindings
//! - `cli` - `ppm-compress` / `ppm-decompress` binaries
//!
//! ## Example
//!
//! ```rust
//! use ppm_stream::{compress, decompress, ModelOrder};
//!
//! let order = ModelOrder::default();
//! let packed = compress(b"to be or not to be", order).unwrap();
//! let unpacked = decompress(&packed, order).unwrap();
//! assert_eq!(unpacked, b"to be or not to be");
//! ```
//!
//! The model order is not stored in the stream; both sides must agree on it.

pub mod compress;
pub mod decompress;
pub mod error;
mod file_media;
pub mod ppm;

#[cfg(feature = "wasm")]
mod wasm_bindings;

pub use error::PpmError;
pub use file_media::{compress_file, decompress_file, LocalFileMedia};

#[cfg(feature = "async")]
pub use file_media::{compress_file_async, decompress_file_async};

pub use compress::{compress, CompressError, PpmEncoder};
pub use decompress::{decompress, DecompressError, PpmDecoder, PpmReader};
pub use ppm::{ModelOrder, Symbol};

#[cfg(feature = "wasm")]
pub use wasm_bindings::WasmPpmDecoder;
