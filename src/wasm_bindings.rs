//! WASM bindings for ppm-stream.
//!
//! Provides a browser-compatible API for PPM compression and decompression.

use wasm_bindgen::prelude::*;

use crate::decompress::PpmDecoder;
use crate::ppm::ModelOrder;

fn model_order(order: i32) -> Result<ModelOrder, JsError> {
    ModelOrder::new(order).map_err(|e| JsError::new(&e.to_string()))
}

/// Compress a buffer with the given model order.
#[wasm_bindgen]
pub fn compress(data: &[u8], order: i32) -> Result<Vec<u8>, JsError> {
    crate::compress::compress(data, model_order(order)?).map_err(|e| JsError::new(&e.to_string()))
}

/// Decompress a buffer produced with the same model order.
#[wasm_bindgen]
pub fn decompress(data: &[u8], order: i32) -> Result<Vec<u8>, JsError> {
    crate::decompress::decompress(data, model_order(order)?)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// WASM-compatible PPM decompressor.
#[wasm_bindgen]
pub struct WasmPpmDecoder {
    decoder: PpmDecoder,
}

#[wasm_bindgen]
impl WasmPpmDecoder {
    /// Create a new decoder for the given model order.
    #[wasm_bindgen(constructor)]
    pub fn new(order: i32) -> Result<WasmPpmDecoder, JsError> {
        Ok(Self {
            decoder: PpmDecoder::new(model_order(order)?),
        })
    }

    /// Decompress one complete stream.
    #[wasm_bindgen]
    pub fn decompress(&mut self, data: &[u8]) -> Result<Vec<u8>, JsError> {
        self.decoder
            .decompress(data)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Get total bytes produced by the last stream.
    #[wasm_bindgen]
    pub fn bytes_written(&self) -> u64 {
        self.decoder.bytes_written()
    }

    /// Model order this decoder was created with.
    #[wasm_bindgen]
    pub fn order(&self) -> i32 {
        self.decoder.order().get()
    }

    /// Reset the decoder.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.decoder.reset();
    }
}
