//! Frequency table and its on-disk codec.
//!
//! A flat-init, running-cumulative build gives the table's shape; the exact
//! wire layout follows an inline `symbols` map seen elsewhere in the corpus:
//! a magic, a run of `(symbol, occurrences)` records in ascending symbol
//! order, and a zero/zero terminator. Unlike an adaptive model, this table
//! is static: there is no `update`/`downscale` step, since the coder here
//! builds its model in one full pass and never revises it.

use std::io::{Read, Write};

use super::word::Word;
use crate::error::{CoderError, Result};

/// `0x1B 't' 'a' 'b'` followed by the register width in bits.
const MAGIC_TAB_PREFIX: [u8; 4] = [0x1B, b't', b'a', b'b'];
/// `0x1B 'd' 'a' 't'` followed by the register width in bits.
pub(super) const MAGIC_DAT_PREFIX: [u8; 4] = [0x1B, b'd', b'a', b't'];

/// A symbol's half-open cumulative-count interval `[lower, upper)` over
/// `[0, N)`, where `N` is the table's total occurrence count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolRange<U> {
    pub occurrences: U,
    pub lower: U,
    pub upper: U,
}

/// An ordered `Symbol -> SymbolRange` mapping, ascending by symbol value.
///
/// Invariants: the first entry's `lower == U::ZERO`; the last entry's
/// `upper == total()`; no entry has `occurrences == U::ZERO`; the table may
/// be empty only when the input it was built from was empty.
#[derive(Debug, Clone)]
pub struct FrequencyTable<U> {
    entries: Vec<(u8, SymbolRange<U>)>,
    total: U,
}

impl<U: Word> FrequencyTable<U> {
    /// Count `data` in one pass and assign ascending cumulative intervals.
    pub fn build(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &b in data {
            counts[b as usize] += 1;
        }
        let mut entries = Vec::new();
        let mut running = U::ZERO;
        for (sym, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let occurrences = U::from_u64(count);
            let lower = running;
            let upper = running + occurrences;
            entries.push((sym as u8, SymbolRange { occurrences, lower, upper }));
            running = upper;
        }
        FrequencyTable { entries, total: running }
    }

    /// Total number of symbols the table was built over (`N`).
    pub fn total(&self) -> U {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(u8, SymbolRange<U>)] {
        &self.entries
    }

    /// The interval assigned to `symbol`, if it occurs in the table.
    pub fn range_of(&self, symbol: u8) -> Option<SymbolRange<U>> {
        self.entries
            .binary_search_by_key(&symbol, |&(s, _)| s)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// The unique symbol whose `[lower, upper)` contains `target`, scanning
    /// in ascending symbol order as the wire contract requires.
    pub fn find_containing(&self, target: U) -> Option<(u8, SymbolRange<U>)> {
        self.entries
            .iter()
            .find(|&&(_, r)| r.lower <= target && target < r.upper)
            .copied()
    }

    /// Serialize as magic + ascending records + zero/zero terminator.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&MAGIC_TAB_PREFIX)?;
        w.write_all(&[U::BITS as u8])?;
        for &(symbol, range) in &self.entries {
            w.write_all(&[symbol])?;
            range.occurrences.write_le(w)?;
        }
        // terminator: symbol 0, occurrences 0
        w.write_all(&[0u8])?;
        U::ZERO.write_le(w)?;
        Ok(())
    }

    /// Deserialize: verify the magic, then read records until the
    /// zero/zero terminator, reconstructing cumulative intervals from the
    /// order records were written (ascending symbol value, by contract).
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut prefix = [0u8; 4];
        let mut width = [0u8; 1];
        if r.read_exact(&mut prefix).is_err() {
            return Err(CoderError::InvalidHeader {
                section: "table",
                expected: MAGIC_TAB_PREFIX.to_vec(),
                found: Vec::new(),
            });
        }
        r.read_exact(&mut width).map_err(CoderError::Io)?;
        if prefix != MAGIC_TAB_PREFIX || width[0] != U::BITS as u8 {
            let mut expected = MAGIC_TAB_PREFIX.to_vec();
            expected.push(U::BITS as u8);
            let mut found = prefix.to_vec();
            found.push(width[0]);
            return Err(CoderError::InvalidHeader {
                section: "table",
                expected,
                found,
            });
        }

        let mut entries = Vec::new();
        let mut running = U::ZERO;
        loop {
            let mut symbol = [0u8; 1];
            r.read_exact(&mut symbol).map_err(CoderError::Io)?;
            let occurrences = U::read_le(r).map_err(CoderError::Io)?;
            if occurrences == U::ZERO {
                break;
            }
            let lower = running;
            let upper = running + occurrences;
            entries.push((symbol[0], SymbolRange { occurrences, lower, upper }));
            running = upper;
        }

        Ok(FrequencyTable { entries, total: running })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_orders_ascending_and_sums_to_len() {
        let table: FrequencyTable<u32> = FrequencyTable::build(b"banana");
        let syms: Vec<u8> = table.entries().iter().map(|&(s, _)| s).collect();
        let mut sorted = syms.clone();
        sorted.sort_unstable();
        assert_eq!(syms, sorted);
        let sum: u32 = table.entries().iter().map(|&(_, r)| r.occurrences).sum();
        assert_eq!(sum, 6);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn write_then_read_round_trips() {
        let table: FrequencyTable<u32> = FrequencyTable::build(b"AABC");
        let mut buf = Vec::new();
        table.write_to(&mut buf).unwrap();
        let mut cursor = &buf[..];
        let back = FrequencyTable::<u32>::read_from(&mut cursor).unwrap();
        assert_eq!(back.entries(), table.entries());
        assert_eq!(back.total(), table.total());
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table: FrequencyTable<u32> = FrequencyTable::build(b"");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn corrupted_magic_is_rejected() {
        let table: FrequencyTable<u32> = FrequencyTable::build(b"x");
        let mut buf = Vec::new();
        table.write_to(&mut buf).unwrap();
        buf[1] = b'X';
        let mut cursor = &buf[..];
        let err = FrequencyTable::<u32>::read_from(&mut cursor).unwrap_err();
        assert!(matches!(err, CoderError::InvalidHeader { section: "table", .. }));
    }
}
