//! Magic-robustness tests: corrupting either 5-byte magic must fail decode
//! with `InvalidHeader` and produce no output.

use arcode::error::CoderError;

fn encode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    arcode::encode(input, &mut out).unwrap();
    out
}

#[test]
fn corrupted_table_magic_is_rejected() {
    let mut encoded = encode(b"hello, world");
    encoded[1] = b'X'; // flip a byte inside "tab"
    let mut out = Vec::new();
    let err = arcode::decode(&encoded[..], &mut out).unwrap_err();
    assert!(matches!(err, CoderError::InvalidHeader { section: "table", .. }));
    assert!(out.is_empty());
}

#[test]
fn corrupted_table_width_byte_is_rejected() {
    let mut encoded = encode(b"hello, world");
    encoded[4] = 0x40; // claim a 64-bit register instead of 32-bit
    let mut out = Vec::new();
    let err = arcode::decode(&encoded[..], &mut out).unwrap_err();
    assert!(matches!(err, CoderError::InvalidHeader { section: "table", .. }));
    assert!(out.is_empty());
}

#[test]
fn corrupted_data_magic_is_rejected() {
    let input = b"hello, world";
    let encoded = encode(input);

    // Locate the data-section magic: it immediately follows the table's
    // terminator record, which is the first all-zero 5-byte run after the
    // table magic.
    let mut offset = 5;
    loop {
        if encoded[offset] == 0 && encoded[offset + 1..offset + 5].iter().all(|&b| b == 0) {
            offset += 5;
            break;
        }
        offset += 5;
    }

    let mut corrupted = encoded.clone();
    corrupted[offset + 1] = b'X'; // flip a byte inside "dat"
    let mut out = Vec::new();
    let err = arcode::decode(&corrupted[..], &mut out).unwrap_err();
    assert!(matches!(err, CoderError::InvalidHeader { section: "data", .. }));
    assert!(out.is_empty());
}
