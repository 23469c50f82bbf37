//! Two-valued logic, and helpers for reading bit-vectors as numbers.
//!
//! Every bit-vector in this crate is read most-significant-bit first: index 0
//! is the MSB and the last index is the LSB.

use bitvec::prelude::*;

/// A single logic element.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bit {
    #[default]
    Zero = 0,
    One = 1,
}

impl Bit {
    /// Interpret a sequence of [Bit] as an unsigned integer.
    pub fn to_number(bits: &[Bit]) -> usize {
        bits.iter().fold(0, |acc, b| (acc << 1) | *b as usize)
    }

    /// Collect the bits of some [BitSlice].
    pub fn vec_from_bitslice(bits: &BitSlice) -> Vec<Self> {
        bits.iter().by_vals().map(Self::from).collect()
    }

    pub fn is_one(&self) -> bool {
        *self == Self::One
    }
}

impl std::ops::BitXor for Bit {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        Self::from(self.is_one() ^ rhs.is_one())
    }
}

impl std::ops::Not for Bit {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }
}

impl From<bool> for Bit {
    fn from(x: bool) -> Self {
        match x {
            true => Self::One,
            false => Self::Zero,
        }
    }
}

impl From<Bit> for bool {
    fn from(x: Bit) -> Self {
        x.is_one()
    }
}

impl std::fmt::Display for Bit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Interpret a bit-vector as an unsigned integer.
pub fn to_number(bits: &BitSlice) -> usize {
    bits.iter().by_vals().fold(0, |acc, b| (acc << 1) | b as usize)
}

/// Build a `width`-bit vector holding `value`. Bits above `width` are dropped.
pub fn from_number(value: usize, width: usize) -> BitVec {
    (0..width)
        .rev()
        .map(|i| value.checked_shr(i as u32).unwrap_or(0) & 1 == 1)
        .collect()
}

/// Render a bit-vector as a string of '0' and '1', MSB first.
pub fn fmt_bits(bits: &BitSlice) -> String {
    bits.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect()
}
