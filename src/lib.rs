//! A file-level arithmetic coder: a lossless compressor and matching
//! decompressor that maps a finite sequence of bytes to a compact binary
//! representation approaching the empirical entropy of the input.
//!
//! The core algorithm lives in [`entropy::ari`]; this crate root wires it up
//! to whole-file `encode`/`decode` passes over arbitrary `Read`/`Write`
//! streams, which is as much as the core promises: command-line parsing,
//! file opening and the debug-flag tracing facility are the `arcode`
//! binary's concern, not the library's.

pub mod error;

/// Entropy coder family.
// http://en.wikipedia.org/wiki/Entropy_encoding
pub mod entropy {
    pub mod ari;
}

use std::io::{Read, Write};

use entropy::ari::table::FrequencyTable;
use entropy::ari::{Decoder, Encoder};
use error::{CoderError, Result};

/// The canonical register width this crate ships: 32 bits.
pub type Word = u32;

/// Two-pass encode: build the frequency table over all of `input`, write
/// it, rewind, then drive the bit-level coder over the same bytes.
pub fn encode<W: Write>(input: &[u8], mut output: W) -> Result<()> {
    let table: FrequencyTable<Word> = FrequencyTable::build(input);
    table.write_to(&mut output)?;

    if table.is_empty() {
        // No symbols to narrow a range over; still emit the data magic and
        // the final zero word the decoder is guaranteed to be able to read.
        let encoder = Encoder::<_, Word>::new(&mut output)?;
        encoder.finish()?;
        return Ok(());
    }

    let total = table.total();
    let mut encoder = Encoder::<_, Word>::new(&mut output)?;
    for &byte in input {
        let range = table
            .range_of(byte)
            .expect("every byte of the input occurs in its own frequency table");
        encoder.encode_symbol(range, total)?;
    }
    encoder.finish()?;
    Ok(())
}

/// Read a table and compressed payload from `input`, decode all `N`
/// symbols the table promises, and write them to `output`.
pub fn decode<R: Read, W: Write>(mut input: R, mut output: W) -> Result<()> {
    let table: FrequencyTable<Word> = FrequencyTable::read_from(&mut input)?;
    let mut decoder = Decoder::<_, Word>::new(&mut input)?;

    let total = table.total();
    let mut written: Word = 0;
    let mut out = Vec::with_capacity(total as usize);
    while written < total {
        let symbol = decoder.decode_symbol(&table).map_err(|err| match err {
            CoderError::Io(_) => {
                CoderError::PrematureEnd { decoded: written as u64, expected: total as u64 }
            }
            other => other,
        })?;
        out.push(symbol);
        written += 1;
    }

    output.write_all(&out)?;
    Ok(())
}
