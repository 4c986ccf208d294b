//! The unsigned fixed-width register the range coder narrows.
//!
//! The engine in `super` is generic over the register width so that the
//! renormalization arithmetic can be unit-tested at a narrow width (easier
//! to reason about by hand) as well as exercised at the canonical width the
//! wire format commits to. `Word::BITS` is what gets written into the
//! register-width byte of both file magics (see `table::MAGIC_TAB` and
//! `super::MAGIC_DAT`); a decoder whose `Word::BITS` disagrees with that
//! byte must refuse the file rather than guess.

use std::fmt::Debug;
use std::io::{self, Read, Write};
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Not, Shl, Shr, Sub};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

/// An unsigned integer register usable as the arithmetic coder's `U`.
pub trait Word:
    Copy
    + Eq
    + Ord
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
    /// Width of the register in bits. Canonical value is 32.
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    /// All-ones value, i.e. `2^BITS - 1`.
    const MAX: Self;

    fn from_u64(v: u64) -> Self;

    /// Write one `BITS`-bit word to the wire, little-endian.
    fn write_le<W: Write>(self, w: &mut W) -> io::Result<()>;
    /// Read one `BITS`-bit word from the wire, little-endian.
    fn read_le<R: Read>(r: &mut R) -> io::Result<Self>;

    /// Top-bit mask (`1 << (BITS-1)`), used by the E1/E2 "first bit agrees"
    /// and E3 "straddle" renormalization cases.
    fn top() -> Self {
        Self::ONE << (Self::BITS - 1)
    }

    /// The mask one bit below `top()`.
    fn second() -> Self {
        Self::top() >> 1
    }
}

macro_rules! impl_word {
    ($t:ty, $write:ident, $read:ident) => {
        impl Word for $t {
            const BITS: u32 = <$t>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$t>::MAX;

            fn from_u64(v: u64) -> Self {
                v as $t
            }

            fn write_le<W: Write>(self, w: &mut W) -> io::Result<()> {
                w.$write::<LittleEndian>(self)
            }

            fn read_le<R: Read>(r: &mut R) -> io::Result<Self> {
                r.$read::<LittleEndian>()
            }
        }
    };
}

impl_word!(u32, write_u32, read_u32);
impl_word!(u64, write_u64, read_u64);
