//! Symbol encoder and compression driver.

use std::io::{self, Write};

use super::{ArithmeticEncoder, BitWriter, Result};
use crate::ppm::{ContextModel, FrequencyTable, History, ModelOrder, Symbol, ESCAPE_SYMBOL};

/// Encode one symbol: the mirror image of
/// [`decode_symbol`](crate::decompress::decode_symbol).
///
/// Every context present in the model from the longest down to order 0
/// either codes the symbol (when it has seen it) or codes an escape; the end
/// marker and never-seen literals fall through to the order -1 table.
pub fn encode_symbol<W: Write>(
    history: &History,
    model: &ContextModel,
    encoder: &mut ArithmeticEncoder<W>,
    symbol: Symbol,
) -> Result<()> {
    let max = history.len().min(model.order().history_len());
    for order in (0..=max).rev() {
        let Some(node) = model.find(history.suffix(order)) else {
            continue;
        };
        let table = model.frequencies(node);
        if let Symbol::Literal(byte) = symbol {
            if table.get(u32::from(byte)) > 0 {
                return encoder.write(table, u32::from(byte));
            }
        }
        encoder.write(table, ESCAPE_SYMBOL)?;
    }
    encoder.write(model.order_minus_one(), symbol.index())
}

/// Streaming PPM compressor.
///
/// Feed bytes through [`Write`], then call [`PpmEncoder::finish`] to append
/// the end marker; a stream without it cannot be decoded.
pub struct PpmEncoder<W: Write> {
    model: ContextModel,
    history: History,
    encoder: ArithmeticEncoder<W>,
    bytes_read: u64,
}

impl<W: Write> PpmEncoder<W> {
    pub fn new(writer: W, order: ModelOrder) -> Self {
        tracing::debug!(order = order.get(), "compressing");
        Self {
            model: ContextModel::new(order),
            history: History::new(order),
            encoder: ArithmeticEncoder::new(BitWriter::new(writer)),
            bytes_read: 0,
        }
    }

    /// Encode one literal and learn it.
    pub fn encode_byte(&mut self, byte: u8) -> Result<()> {
        encode_symbol(
            &self.history,
            &self.model,
            &mut self.encoder,
            Symbol::Literal(byte),
        )?;
        self.model.increment(&self.history, byte);
        self.history.push(byte);
        self.bytes_read += 1;
        Ok(())
    }

    /// Bytes accepted so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Code the end marker, pad to a byte and return the inner writer.
    pub fn finish(mut self) -> Result<W> {
        encode_symbol(
            &self.history,
            &self.model,
            &mut self.encoder,
            Symbol::EndOfStream,
        )?;
        let bits = self.encoder.bits_written();
        let writer = self.encoder.finish()?;
        tracing::debug!(
            bytes = self.bytes_read,
            bits,
            contexts = self.model.node_count(),
            "compressed"
        );
        Ok(writer)
    }
}

impl<W: Write> Write for PpmEncoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &byte in buf {
            self.encode_byte(byte)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.encoder.flush()?;
        Ok(())
    }
}

/// Compress `data` into a self-terminating stream.
pub fn compress(data: &[u8], order: ModelOrder) -> Result<Vec<u8>> {
    let mut encoder = PpmEncoder::new(Vec::with_capacity(data.len() / 2 + 8), order);
    for &byte in data {
        encoder.encode_byte(byte)?;
    }
    encoder.finish()
}
