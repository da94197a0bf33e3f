//! Symbol decoder and decompression driver.

use std::io::{self, Read, Write};

use super::{ArithmeticDecoder, BitReader, DecompressError, Result};
use crate::ppm::{ContextModel, History, ModelOrder, Symbol, ESCAPE_SYMBOL};

/// Decode one symbol.
///
/// Tries the contexts of order `min(history.len(), N)` down to 0, longest
/// first. A context missing from the model is skipped without touching the
/// coder; a present one either yields a literal or an escape, which costs
/// coded bits and moves on to the next shorter context. When every context
/// escaped, the flat order -1 table decides, and it has no escape slot, so at
/// most `N + 2` tables are consulted.
pub fn decode_symbol<R: Read>(
    history: &History,
    model: &ContextModel,
    decoder: &mut ArithmeticDecoder<R>,
) -> Result<Symbol> {
    decode_with_order(history, model, decoder).map(|(symbol, _)| symbol)
}

/// [`decode_symbol`], also reporting the order that produced the symbol
/// (`-1` for the fallback table).
pub(crate) fn decode_with_order<R: Read>(
    history: &History,
    model: &ContextModel,
    decoder: &mut ArithmeticDecoder<R>,
) -> Result<(Symbol, i32)> {
    let max = history.len().min(model.order().history_len());
    for order in (0..=max).rev() {
        let Some(node) = model.find(history.suffix(order)) else {
            continue;
        };
        match decoder.read(model.frequencies(node))? {
            ESCAPE_SYMBOL => tracing::trace!(order, "escape"),
            index => return Ok((Symbol::Literal(index as u8), order as i32)),
        }
    }

    let index = decoder.read(model.order_minus_one())?;
    let symbol = Symbol::from_index(index)
        .ok_or(DecompressError::MalformedStream("symbol outside alphabet"))?;
    Ok((symbol, -1))
}

/// Decode one symbol and, for a literal, learn it and slide the history.
/// `None` at the end marker.
fn next_literal<R: Read>(
    model: &mut ContextModel,
    history: &mut History,
    decoder: &mut ArithmeticDecoder<R>,
) -> Result<Option<u8>> {
    match decode_symbol(history, model, decoder)? {
        Symbol::EndOfStream => Ok(None),
        Symbol::Literal(byte) => {
            // Must see the history from before `byte`, exactly as the encoder did
            model.increment(history, byte);
            history.push(byte);
            Ok(Some(byte))
        }
    }
}

/// Reusable PPM decompressor.
///
/// Every call decodes one complete stream with a fresh model; statistics do
/// not carry over between calls.
pub struct PpmDecoder {
    model: ContextModel,
    history: History,
    bytes_written: u64,
}

impl PpmDecoder {
    pub fn new(order: ModelOrder) -> Self {
        Self {
            model: ContextModel::new(order),
            history: History::new(order),
            bytes_written: 0,
        }
    }

    pub fn order(&self) -> ModelOrder {
        self.model.order()
    }

    /// Decompress a complete stream held in memory.
    pub fn decompress(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(data.len() * 2);
        self.decompress_to(data, &mut output)?;
        Ok(output)
    }

    /// Decompress from `input` into `output`, returning the byte count.
    pub fn decompress_to<R: Read, W: Write>(&mut self, input: R, output: &mut W) -> Result<u64> {
        self.run(BitReader::new(input), output)
    }

    fn run<R: Read, W: Write>(&mut self, bits: BitReader<R>, output: &mut W) -> Result<u64> {
        self.reset();
        let mut decoder = ArithmeticDecoder::new(bits)?;
        tracing::debug!(order = self.order().get(), "decompressing");

        while let Some(byte) = next_literal(&mut self.model, &mut self.history, &mut decoder)? {
            output.write_all(&[byte])?;
            self.bytes_written += 1;
        }
        output.flush()?;

        tracing::debug!(
            bytes = self.bytes_written,
            bits = decoder.bits_consumed(),
            contexts = self.model.node_count(),
            "decompressed"
        );
        Ok(self.bytes_written)
    }

    /// Bytes written by the current (or last) call.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Window of recent literals left by the last call.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Discard the model and history.
    pub fn reset(&mut self) {
        self.model.reset();
        self.history.clear();
        self.bytes_written = 0;
    }
}

/// Decompress an in-memory stream.
pub fn decompress(data: &[u8], order: ModelOrder) -> Result<Vec<u8>> {
    PpmDecoder::new(order).decompress(data)
}

/// Decompress everything `bits` yields into `output`.
pub fn decompress_stream<R: Read, W: Write>(
    bits: BitReader<R>,
    output: &mut W,
    order: ModelOrder,
) -> Result<u64> {
    PpmDecoder::new(order).run(bits, output)
}

/// Pull-based decompressor: decodes only as many bytes as are asked for.
///
/// A failure after some bytes of a `read` call were decoded is held back:
/// that call returns the bytes and the next one returns the error.
pub struct PpmReader<R: Read> {
    model: ContextModel,
    history: History,
    decoder: ArithmeticDecoder<R>,
    finished: bool,
    pending_error: Option<DecompressError>,
}

impl<R: Read> PpmReader<R> {
    pub fn new(inner: R, order: ModelOrder) -> Result<Self> {
        Ok(Self {
            model: ContextModel::new(order),
            history: History::new(order),
            decoder: ArithmeticDecoder::new(BitReader::new(inner))?,
            finished: false,
            pending_error: None,
        })
    }

    /// Whether decoding has stopped, at the end marker or on an error.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<R: Read> Read for PpmReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(e) = self.pending_error.take() {
            return Err(e.into());
        }
        if self.finished || buf.is_empty() {
            return Ok(0);
        }

        let mut decoded = 0;
        for slot in buf.iter_mut() {
            match next_literal(&mut self.model, &mut self.history, &mut self.decoder) {
                Ok(Some(byte)) => {
                    *slot = byte;
                    decoded += 1;
                }
                Ok(None) => {
                    self.finished = true;
                    break;
                }
                Err(e) => {
                    self.finished = true;
                    if decoded == 0 {
                        return Err(e.into());
                    }
                    self.pending_error = Some(e);
                    break;
                }
            }
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::compress;

    fn order(n: i32) -> ModelOrder {
        ModelOrder::new(n).unwrap()
    }

    #[test]
    fn test_decoder_reusable() {
        let packed = compress(b"mississippi", order(2)).unwrap();
        let mut decoder = PpmDecoder::new(order(2));
        assert_eq!(decoder.decompress(&packed).unwrap(), b"mississippi");
        assert_eq!(decoder.decompress(&packed).unwrap(), b"mississippi");
        assert_eq!(decoder.bytes_written(), 11);
        assert_eq!(decoder.history().iter().collect::<Vec<_>>(), b"pi");
    }

    #[test]
    fn test_reader_small_buffers() {
        let text = b"the quick brown fox jumps over the lazy dog";
        let packed = compress(text, order(3)).unwrap();
        let mut reader = PpmReader::new(&packed[..], order(3)).unwrap();

        let mut out = Vec::new();
        let mut buf = [0u8; 5];
        loop {
            let n = reader.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        assert!(reader.is_finished());
        assert_eq!(out, text);
    }

    /// Yields `data`, then fails instead of reporting end of input.
    struct FailingSource<'a> {
        data: &'a [u8],
    }

    impl Read for FailingSource<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::ErrorKind::ConnectionReset.into());
            }
            self.data.read(buf)
        }
    }

    #[test]
    fn test_reader_returns_decoded_bytes_before_error() {
        let text = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(40);
        let packed = compress(&text, order(2)).unwrap();
        let source = FailingSource {
            data: &packed[..packed.len() / 2],
        };
        let mut reader = PpmReader::new(source, order(2)).unwrap();

        let mut buf = vec![0u8; text.len()];
        let n = reader.read(&mut buf).unwrap();
        assert!(n > 0);
        assert_eq!(buf[..n], text[..n]);

        let err = reader.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert!(reader.is_finished());
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_stream_reports_length() {
        let packed = compress(b"aaaa", order(1)).unwrap();
        let mut out = Vec::new();
        let n = decompress_stream(BitReader::new(&packed[..]), &mut out, order(1)).unwrap();
        assert_eq!(n, 4);
        assert_eq!(out, b"aaaa");
    }
}
