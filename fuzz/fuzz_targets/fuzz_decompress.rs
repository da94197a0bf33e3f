#![no_main]
use std::io::Read;

use libfuzzer_sys::fuzz_target;
use ppm_stream::{ModelOrder, PpmReader};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte: model order (-1..=6)
    let order = ModelOrder::new(i32::from(data[0] % 8) - 1).unwrap();

    // Garbage can decode to very long outputs; cap at 1MB
    let Ok(reader) = PpmReader::new(&data[1..], order) else {
        return;
    };
    let mut sink = Vec::new();
    let _ = reader.take(1 << 20).read_to_end(&mut sink);
});
