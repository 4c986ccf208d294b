//! Round-trip and determinism tests for the arithmetic coder itself, kept
//! alongside the module they exercise rather than under `tests/`.
//! Broader end-to-end scenarios (file layout byte-for-byte checks, magic
//! corruption) live in `tests/roundtrip.rs` and `tests/corruption.rs`.

use super::table::FrequencyTable;
use super::{Decoder, Encoder};

fn round_trip(input: &[u8]) -> Vec<u8> {
    let table: FrequencyTable<u32> = FrequencyTable::build(input);
    let mut encoded = Vec::new();
    table.write_to(&mut encoded).unwrap();

    if table.is_empty() {
        let encoder = Encoder::<_, u32>::new(&mut encoded).unwrap();
        encoder.finish().unwrap();
    } else {
        let total = table.total();
        let mut encoder = Encoder::<_, u32>::new(&mut encoded).unwrap();
        for &byte in input {
            let range = table.range_of(byte).unwrap();
            encoder.encode_symbol(range, total).unwrap();
        }
        encoder.finish().unwrap();
    }

    let mut cursor = &encoded[..];
    let table: FrequencyTable<u32> = FrequencyTable::read_from(&mut cursor).unwrap();
    let mut decoder = Decoder::<_, u32>::new(&mut cursor).unwrap();
    let mut out = Vec::new();
    for _ in 0..table.total() {
        out.push(decoder.decode_symbol(&table).unwrap());
    }
    out
}

#[test]
fn empty_input_round_trips() {
    assert_eq!(round_trip(b""), b"");
}

#[test]
fn single_byte_round_trips() {
    assert_eq!(round_trip(b"A"), b"A");
}

#[test]
fn single_repeated_symbol_round_trips() {
    assert_eq!(round_trip(b"AAAA"), b"AAAA");
}

#[test]
fn two_distinct_symbols_round_trip() {
    assert_eq!(round_trip(b"AB"), b"AB");
}

#[test]
fn all_256_byte_values_round_trip() {
    let input: Vec<u8> = (0u16..256).map(|b| b as u8).collect();
    assert_eq!(round_trip(&input), input);
}

#[test]
fn alternating_bytes_round_trip() {
    let input: Vec<u8> = (0..1000).map(|i| if i % 2 == 0 { 0x00 } else { 0xFF }).collect();
    assert_eq!(round_trip(&input), input);
}

#[test]
fn ascii_text_round_trips() {
    let text = b"the quick brown fox jumps over the lazy dog";
    assert_eq!(round_trip(text), text);
}

#[test]
fn encoding_is_bit_for_bit_deterministic() {
    let input = b"determinism matters for arithmetic coders";
    let table: FrequencyTable<u32> = FrequencyTable::build(input);
    let total = table.total();

    let encode_once = || {
        let mut buf = Vec::new();
        let mut encoder = Encoder::<_, u32>::new(&mut buf).unwrap();
        for &byte in input {
            encoder.encode_symbol(table.range_of(byte).unwrap(), total).unwrap();
        }
        encoder.finish().unwrap();
        buf
    };

    assert_eq!(encode_once(), encode_once());
}
