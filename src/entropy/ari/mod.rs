/*!

Static-model arithmetic encoder/decoder.

Unlike an adaptive byte-shifting range coder (which narrows a range a byte
at a time against a threshold cut, built for an online/adaptive model),
this coder narrows its `U`-bit register a *bit* at a time with the
classic three-case renormalization ("first bit agrees", E1/E2, and
"straddle", E3, pending bits) against a frequency table built in a single
static pass over the whole input. `Decoder` keeps two buffers distinct
throughout: the narrowing state in `RangeState`, and the comparison
register `E` kept separately from the bit lookahead in `BitSource`.
Conflating the two is an easy mistake to make in an implementation like
this one; this implementation keeps them apart.

# Example

```
use arcode::entropy::ari::{Encoder, Decoder};
use arcode::entropy::ari::table::FrequencyTable;

let input = b"some text";
let table: FrequencyTable<u32> = FrequencyTable::build(input);

let mut out = Vec::new();
let mut encoder = Encoder::<_, u32>::new(&mut out).unwrap();
for &byte in input {
    let range = table.range_of(byte).unwrap();
    encoder.encode_symbol(range, table.total()).unwrap();
}
encoder.finish().unwrap();

let mut cursor = &out[..];
let mut decoder = Decoder::<_, u32>::new(&mut cursor).unwrap();
let mut decoded = Vec::new();
for _ in 0..table.total() {
    decoded.push(decoder.decode_symbol(&table).unwrap());
}
assert_eq!(decoded, input);
```

# Credit

The renormalization design follows the classic finite-precision arithmetic
coder (Witten, Neal & Cleary); the wire format is this crate's own.

*/

use std::io::{Read, Write};

pub mod bits;
pub mod table;
pub mod word;

#[cfg(test)]
mod test;

use bits::{BitSink, BitSource};
pub use table::{FrequencyTable, SymbolRange};
pub use word::Word;

use crate::error::{CoderError, Result};

pub type Symbol = u8;

/// `(lower, upper, pending)` narrowed over the run of symbols coded so far.
///
/// `pending` counts E3 straddle bits: bits whose value is not yet decided,
/// but known to be the complement of whatever bit is decided next (see
/// `Encoder::encode_symbol`).
struct RangeState<U> {
    lower: U,
    upper: U,
    pending: usize,
}

impl<U: Word> RangeState<U> {
    fn new() -> Self {
        RangeState { lower: U::ZERO, upper: U::MAX, pending: 0 }
    }
}

/// Drives a `RangeState` from each symbol's interval, pushing emitted bits
/// into a `BitSink`.
pub struct Encoder<W, U> {
    sink: BitSink<W, U>,
    state: RangeState<U>,
}

impl<W: Write, U: Word> Encoder<W, U> {
    /// Create an encoder, writing the data-section magic immediately.
    pub fn new(mut writer: W) -> Result<Self> {
        writer.write_all(&table::MAGIC_DAT_PREFIX)?;
        writer.write_all(&[U::BITS as u8])?;
        Ok(Encoder { sink: BitSink::new(writer), state: RangeState::new() })
    }

    /// Narrow the current range by `range` (out of `total`), renormalizing
    /// and emitting bits as the narrowed range's top bits become decided.
    pub fn encode_symbol(&mut self, range: SymbolRange<U>, total: U) -> Result<()> {
        let old_range = self.state.upper - self.state.lower;
        let step = old_range / total;
        let mut upper = self.state.lower + step * range.upper;
        let mut lower = self.state.lower + step * range.lower;

        let top = U::top();
        let second = U::second();
        loop {
            if (upper ^ lower) < top {
                let bit = (lower & top) != U::ZERO;
                self.sink.put_bit(bit)?;
                for _ in 0..self.state.pending {
                    self.sink.put_bit(!bit)?;
                }
                self.state.pending = 0;
                lower = lower << 1;
                upper = (upper << 1) | U::ONE;
            } else if lower >= second && upper < (top | second) {
                self.state.pending += 1;
                lower = (lower << 1) & !top;
                upper = (upper << 1) | top | U::ONE;
            } else {
                break;
            }
        }

        self.state.lower = lower;
        self.state.upper = upper;
        Ok(())
    }

    /// Flush the final `lower` word, padding any partial bit buffer with
    /// `lower`'s high bits first. Both the padded partial word and the
    /// final full word are always written (the more defensive of two
    /// plausible end-of-stream behaviors), the one that never leaves a
    /// decoder short a bit mid-symbol.
    pub fn finish(mut self) -> Result<W> {
        let initial_pending = self.sink.pending_count();
        let top = U::top();
        let mut padding = self.state.lower;
        let mut consumed: u32 = 0;
        if initial_pending > 0 {
            for _ in initial_pending..U::BITS {
                self.sink.put_bit((padding & top) != U::ZERO)?;
                padding = padding << 1;
                consumed += 1;
            }
        }
        // The padding above already spent `lower`'s top `consumed` bits on
        // the partial word; the trailing full word must continue from
        // `lower`'s next bit, not retransmit what the decoder already read.
        self.sink.write_raw_word(self.state.lower << consumed)?;
        Ok(self.sink.into_inner())
    }
}

/// Given a `RangeState` and comparison register `E`, repeatedly selects the
/// symbol whose narrowed interval contains `E`, then applies the same
/// renormalization as the encoder to both the range and `E`.
pub struct Decoder<R, U> {
    source: BitSource<R, U>,
    state: RangeState<U>,
    register: U,
}

impl<R: Read, U: Word> Decoder<R, U> {
    /// Verify the data-section magic, then seed the comparison register `E`
    /// by reading one `U::BITS`-bit word directly from the stream. Every
    /// bit handed out afterwards by the bit source comes from words read
    /// strictly later in the stream (see `bits::BitSource::read_raw_word`).
    pub fn new(mut reader: R) -> Result<Self> {
        let mut prefix = [0u8; 4];
        let mut width = [0u8; 1];
        let read_ok =
            reader.read_exact(&mut prefix).is_ok() && reader.read_exact(&mut width).is_ok();
        if !read_ok || prefix != table::MAGIC_DAT_PREFIX || width[0] != U::BITS as u8 {
            let mut expected = table::MAGIC_DAT_PREFIX.to_vec();
            expected.push(U::BITS as u8);
            let mut found = prefix.to_vec();
            found.push(width[0]);
            return Err(CoderError::InvalidHeader { section: "data", expected, found });
        }

        let mut source = BitSource::new(reader);
        let register = source.read_raw_word()?;
        Ok(Decoder { source, state: RangeState::new(), register })
    }

    /// Decode exactly one symbol using `table`, narrowing the range and the
    /// register `E` the same way the encoder narrowed `lower`/`upper`.
    pub fn decode_symbol(&mut self, table: &FrequencyTable<U>) -> Result<Symbol> {
        let total = table.total();
        let old_range = self.state.upper - self.state.lower;
        let step = old_range / total;
        let offset = (self.register - self.state.lower) / step;

        let (symbol, range) = table
            .find_containing(offset)
            .expect("frequency table covers [0, total) with no gaps");

        let mut upper = self.state.lower + step * range.upper;
        let mut lower = self.state.lower + step * range.lower;
        let mut register = self.register;

        let top = U::top();
        let second = U::second();
        loop {
            if (upper ^ lower) < top {
                lower = lower << 1;
                upper = (upper << 1) | U::ONE;
                let bit = if self.source.next_bit()? { U::ONE } else { U::ZERO };
                register = (register << 1) | bit;
            } else if lower >= second && upper < (top | second) {
                lower = (lower << 1) & !top;
                upper = (upper << 1) | top | U::ONE;
                let bit = if self.source.next_bit()? { U::ONE } else { U::ZERO };
                register = ((register << 1) & !top) | (register & top) | bit;
            } else {
                break;
            }
        }

        self.state.lower = lower;
        self.state.upper = upper;
        self.register = register;
        Ok(symbol)
    }
}
