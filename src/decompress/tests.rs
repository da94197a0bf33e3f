//! Decompression integration tests.
//!
//! Round-trips data through [`crate::compress`] and checks the decoder's
//! behaviour symbol by symbol where it matters.

use nanorand::RNG;

use super::decoder::decode_with_order;
use super::*;
use crate::compress::compress;
use crate::ppm::{ContextModel, History, ModelOrder, Symbol, MAX_ORDER};

const LOREM: &[u8] = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

fn order(n: i32) -> ModelOrder {
    ModelOrder::new(n).unwrap()
}

fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = nanorand::WyRand::new_seed(seed);
    (0..len)
        .map(|_| rng.generate_range::<u32>(0, 256) as u8)
        .collect()
}

/// Decode a stream symbol by symbol, returning each symbol with the order
/// that produced it. Checks the history length invariant on the way.
fn decode_traced(packed: &[u8], model_order: ModelOrder) -> Vec<(Symbol, i32)> {
    let mut model = ContextModel::new(model_order);
    let mut history = History::new(model_order);
    let mut decoder = ArithmeticDecoder::new(BitReader::new(packed)).unwrap();
    let mut trace = Vec::new();
    let mut literals = 0usize;

    loop {
        assert_eq!(history.len(), literals.min(model_order.history_len()));
        let (symbol, used) = decode_with_order(&history, &model, &mut decoder).unwrap();
        assert!(used >= -1 && used <= model_order.get());
        trace.push((symbol, used));
        match symbol {
            Symbol::EndOfStream => return trace,
            Symbol::Literal(byte) => {
                model.increment(&history, byte);
                history.push(byte);
                literals += 1;
            }
        }
    }
}

#[test]
fn test_round_trip_text_all_orders() {
    for n in -1..=MAX_ORDER {
        let packed = compress(LOREM, order(n)).unwrap();
        let unpacked = decompress(&packed, order(n)).unwrap();
        assert_eq!(unpacked, LOREM, "order {}", n);
    }
}

#[test]
fn test_empty_input_round_trips() {
    for n in -1..=4 {
        let packed = compress(&[], order(n)).unwrap();
        let unpacked = decompress(&packed, order(n)).unwrap();
        assert!(unpacked.is_empty(), "order {}", n);

        let trace = decode_traced(&packed, order(n));
        assert_eq!(trace, [(Symbol::EndOfStream, -1)]);
    }
}

#[test]
fn test_repeated_byte_round_trips() {
    let data = vec![0x41u8; 1000];
    for n in -1..=3 {
        let packed = compress(&data, order(n)).unwrap();
        let unpacked = decompress(&packed, order(n)).unwrap();
        assert_eq!(unpacked.len(), 1000, "order {}", n);
        assert_eq!(unpacked, data, "order {}", n);
    }
}

#[test]
fn test_random_10k_order_3() {
    let data = random_bytes(0x5eed, 10 * 1024);
    let packed = compress(&data, order(3)).unwrap();
    let unpacked = decompress(&packed, order(3)).unwrap();
    assert_eq!(unpacked, data);
}

#[test]
fn test_random_round_trip_low_orders() {
    for (seed, n) in [(1u64, -1), (2, 0), (3, 1), (4, 2)] {
        let data = random_bytes(seed, 3000);
        let packed = compress(&data, order(n)).unwrap();
        assert_eq!(decompress(&packed, order(n)).unwrap(), data, "order {}", n);
    }
}

#[test]
fn test_every_byte_value_round_trips() {
    let data: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).collect();
    for n in [0, 1, 4] {
        let packed = compress(&data, order(n)).unwrap();
        assert_eq!(decompress(&packed, order(n)).unwrap(), data);
    }
}

#[test]
fn test_escape_cascade_reaches_order_minus_one() {
    let model_order = order(3);
    let data = b"abcabcabcz";
    let packed = compress(data, model_order).unwrap();

    // Replay up to just before 'z' and check every context is present, so
    // 'z' must escape orders 3, 2, 1 and 0 before the flat table
    let mut model = ContextModel::new(model_order);
    let mut history = History::new(model_order);
    for &b in &data[..data.len() - 1] {
        model.increment(&history, b);
        history.push(b);
    }
    for j in 0..=3 {
        let node = model.find(history.suffix(j));
        assert!(node.is_some(), "order {} context missing", j);
    }

    let trace = decode_traced(&packed, model_order);
    let literals: Vec<u8> = trace
        .iter()
        .filter_map(|(s, _)| match s {
            Symbol::Literal(b) => Some(*b),
            Symbol::EndOfStream => None,
        })
        .collect();
    assert_eq!(literals, data);

    // First sightings come from the flat table
    assert_eq!(trace[0], (Symbol::Literal(b'a'), -1));
    assert_eq!(trace[1], (Symbol::Literal(b'b'), -1));
    assert_eq!(trace[2], (Symbol::Literal(b'c'), -1));
    // Second 'a': only the root has seen it
    assert_eq!(trace[3], (Symbol::Literal(b'a'), 0));
    // Third round is predicted by the full order-3 context
    assert_eq!(trace[7], (Symbol::Literal(b'b'), 3));
    // Never-seen 'z' falls all the way through
    assert_eq!(trace[9], (Symbol::Literal(b'z'), -1));
    assert_eq!(trace[10], (Symbol::EndOfStream, -1));
}

#[test]
fn test_decoding_is_deterministic() {
    let data = random_bytes(77, 2048);
    let packed = compress(&data, order(2)).unwrap();

    let run = || {
        let mut model = ContextModel::new(order(2));
        let mut history = History::new(order(2));
        let mut decoder = ArithmeticDecoder::new(BitReader::new(&packed[..])).unwrap();
        let mut steps = Vec::new();
        loop {
            let symbol = decode_symbol(&history, &model, &mut decoder).unwrap();
            steps.push((symbol, decoder.bits_consumed()));
            match symbol {
                Symbol::EndOfStream => return steps,
                Symbol::Literal(b) => {
                    model.increment(&history, b);
                    history.push(b);
                }
            }
        }
    };

    assert_eq!(run(), run());
}

#[test]
fn test_end_marker_not_written() {
    let packed = compress(b"xyz", order(1)).unwrap();
    let mut decoder = PpmDecoder::new(order(1));
    let out = decoder.decompress(&packed).unwrap();
    assert_eq!(out, b"xyz");
    assert_eq!(decoder.bytes_written(), 3);
}

#[test]
fn test_long_run_survives_rescaling() {
    let mut data = vec![b'A'; 150_000];
    data.extend_from_slice(b"B");
    data.extend(std::iter::repeat(b'A').take(1000));
    let packed = compress(&data, order(1)).unwrap();
    assert_eq!(decompress(&packed, order(1)).unwrap(), data);
}

#[test]
fn test_empty_bytes_are_unexpected_eof() {
    let result = decompress(&[], order(0));
    assert!(matches!(result, Err(DecompressError::UnexpectedEof)));
}

#[test]
fn test_truncated_stream_does_not_reproduce_input() {
    let data = random_bytes(9, 4096);
    let packed = compress(&data, order(2)).unwrap();
    let truncated = &packed[..packed.len() / 2];

    match decompress(truncated, order(2)) {
        Ok(out) => assert_ne!(out, data),
        Err(e) => assert!(matches!(
            e,
            DecompressError::UnexpectedEof | DecompressError::MalformedStream(_)
        )),
    }
}

#[test]
fn test_order_mismatch_goes_undetected() {
    let packed = compress(LOREM, order(3)).unwrap();
    // No header: a different order is not an error, just wrong output
    if let Ok(out) = decompress(&packed, order(1)) {
        assert_ne!(out, LOREM);
    }
}
