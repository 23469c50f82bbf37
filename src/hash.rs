//! Combinational logic used to form table keys from branch addresses.

use bitvec::prelude::*;
use std::str::FromStr;

use crate::error::*;

/// Strategy for folding an address down to a smaller number of bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HashMode {
    /// Bit `i` of the input is XOR'ed into bit `i % k` of the output.
    #[default]
    Xor,
}

impl FromStr for HashMode {
    type Err = SimError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xor" => Ok(Self::Xor),
            _ => Err(SimError::UnsupportedHashMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for HashMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Xor => write!(f, "xor"),
        }
    }
}

/// Fold some bits into a `k`-bit value.
///
/// Collisions are expected: distinct addresses that fold to the same value
/// alias onto the same table entries.
pub fn hash(bits: &BitSlice, k: usize, mode: HashMode) -> Result<BitVec> {
    if k == 0 {
        return Err(SimError::InvalidWidth { name: "hash output", width: k });
    }
    match mode {
        HashMode::Xor => Ok(fold_xor(bits, k)),
    }
}

/// Fold [with XOR] consecutive `k`-bit chunks together.
fn fold_xor(bits: &BitSlice, k: usize) -> BitVec {
    bits.chunks(k).fold(bitvec![0; k], |mut res, chunk| {
        for (mut dst, src) in res.iter_mut().zip(chunk.iter().by_vals()) {
            *dst ^= src;
        }
        res
    })
}

/// Concatenate two bit-vectors. Bits from `hi` become the high-order bits.
pub fn concat(hi: &BitSlice, lo: &BitSlice) -> BitVec {
    let mut res = hi.to_bitvec();
    res.extend_from_bitslice(lo);
    res
}
