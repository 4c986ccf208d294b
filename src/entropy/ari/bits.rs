//! Bit-at-a-time packing on top of byte-oriented `Read`/`Write` streams.
//!
//! Mirrors a "pack whole bytes" / "look ahead by a whole word" split,
//! generalized here from a byte granularity to the coder's register
//! width `U::BITS`.

use std::io::{self, Read, Write};

use super::word::Word;

/// Packs single bits high-bit-first into `U`-sized words and flushes
/// completed words little-endian to the underlying writer.
pub struct BitSink<W, U> {
    writer: W,
    word: U,
    count: u32,
}

impl<W: Write, U: Word> BitSink<W, U> {
    pub fn new(writer: W) -> Self {
        BitSink {
            writer,
            word: U::ZERO,
            count: 0,
        }
    }

    /// Number of bits currently buffered (not yet flushed as a full word).
    pub fn pending_count(&self) -> u32 {
        self.count
    }

    /// Push a single bit into the buffer, flushing a word once it fills.
    pub fn put_bit(&mut self, bit: bool) -> io::Result<()> {
        self.word = (self.word << 1) | if bit { U::ONE } else { U::ZERO };
        self.count += 1;
        if self.count == U::BITS {
            self.flush_word()?;
        }
        Ok(())
    }

    fn flush_word(&mut self) -> io::Result<()> {
        self.word.write_le(&mut self.writer)?;
        self.word = U::ZERO;
        self.count = 0;
        Ok(())
    }

    /// Write `word` directly to the sink as `U::BITS` bits, bypassing the
    /// bit buffer. Used by the encoder driver to emit the final `lower`
    /// word at end of stream (see `super::Encoder::finish`).
    pub fn write_raw_word(&mut self, word: U) -> io::Result<()> {
        word.write_le(&mut self.writer)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Delivers single bits from a `U`-sized lookahead, refilling from the
/// underlying reader a whole word at a time.
pub struct BitSource<R, U> {
    reader: R,
    lookahead: U,
    count: u32,
}

impl<R: Read, U: Word> BitSource<R, U> {
    pub fn new(reader: R) -> Self {
        BitSource {
            reader,
            lookahead: U::ZERO,
            count: 0,
        }
    }

    /// Read one full `U::BITS`-bit word directly from the stream, bypassing
    /// the lookahead buffer. Used once by the decoder driver to seed the
    /// encoding register `E` (see `super::Decoder::new`); every bit handed
    /// out by `next_bit` afterwards comes from words read strictly later in
    /// the stream.
    pub fn read_raw_word(&mut self) -> io::Result<U> {
        U::read_le(&mut self.reader)
    }

    /// Return the next bit of the stream, high-bit-first, refilling the
    /// lookahead with a fresh word when it runs dry.
    pub fn next_bit(&mut self) -> io::Result<bool> {
        if self.count == 0 {
            self.lookahead = self.read_raw_word()?;
            self.count = U::BITS;
        }
        let bit = (self.lookahead & U::top()) != U::ZERO;
        self.lookahead = self.lookahead << 1;
        self.count -= 1;
        Ok(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_bits_through_words() {
        let mut sink: BitSink<Vec<u8>, u32> = BitSink::new(Vec::new());
        let pattern = [true, false, true, true, false, false, false, true];
        let bits: Vec<bool> = pattern.iter().copied().cycle().take(32).collect();
        for &b in &bits {
            sink.put_bit(b).unwrap();
        }
        assert_eq!(sink.pending_count(), 0);
        let bytes = sink.into_inner();
        assert_eq!(bytes.len(), 4);

        let mut source: BitSource<&[u8], u32> = BitSource::new(&bytes[..]);
        let decoded: Vec<bool> = (0..32).map(|_| source.next_bit().unwrap()).collect();
        assert_eq!(decoded, bits);
    }
}
