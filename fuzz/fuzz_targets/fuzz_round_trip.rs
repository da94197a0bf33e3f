#![no_main]
use libfuzzer_sys::fuzz_target;
use ppm_stream::{compress, decompress, ModelOrder};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte: model order (-1..=6)
    let order = ModelOrder::new(i32::from(data[0] % 8) - 1).unwrap();
    let input = &data[1..];

    let packed = compress(input, order).expect("compress");
    let unpacked = decompress(&packed, order).expect("decompress");
    assert_eq!(unpacked, input);
});
