//! Types for representing branches and branch outcomes.

use bitvec::prelude::*;

use crate::bit::*;

/// A branch outcome.
#[repr(u32)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BranchResult {
    /// Not taken
    NotTaken = 0,
    /// Taken
    Taken = 1
}

impl BranchResult {
    pub fn is_taken(&self) -> bool {
        *self == Self::Taken
    }
}

impl std::fmt::Debug for BranchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::Taken => "t",
            Self::NotTaken => "n",
        };
        write!(f, "{}", s)
    }
}

impl std::ops::Not for BranchResult {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::NotTaken => Self::Taken,
            Self::Taken => Self::NotTaken,
        }
    }
}

impl From<bool> for BranchResult {
    fn from(x: bool) -> Self {
        match x {
            true => Self::Taken,
            false => Self::NotTaken
        }
    }
}

impl From<BranchResult> for bool {
    fn from(x: BranchResult) -> Self {
        x.is_taken()
    }
}

/// The bit shifted into a history register when a branch resolves.
impl From<BranchResult> for Bit {
    fn from(x: BranchResult) -> Self {
        Bit::from(x.is_taken())
    }
}


/// A branch instruction, identified by its address.
///
/// The address is a fixed-length bit-vector (MSB first) and cannot be
/// changed after the instruction is created.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BranchInstruction {
    address: BitVec,
}
impl BranchInstruction {
    pub fn new(address: BitVec) -> Self {
        Self { address }
    }

    /// Create an instruction from the low `width` bits of an integer address.
    pub fn from_address(pc: usize, width: usize) -> Self {
        Self::new(from_number(pc, width))
    }

    /// Return the address bits.
    pub fn address(&self) -> &BitSlice { self.address.as_bitslice() }

    /// Return the address as an integer.
    pub fn address_value(&self) -> usize { to_number(&self.address) }

    /// Return the width of the address in bits.
    pub fn len(&self) -> usize { self.address.len() }

    pub fn is_empty(&self) -> bool { self.address.is_empty() }
}

impl std::fmt::Debug for BranchInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "BranchInstruction({})", fmt_bits(&self.address))
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn outcome_conversions() {
        assert_eq!(BranchResult::from(true), BranchResult::Taken);
        assert_eq!(!BranchResult::Taken, BranchResult::NotTaken);
        assert_eq!(Bit::from(BranchResult::Taken), Bit::One);
        assert_eq!(Bit::from(BranchResult::NotTaken), Bit::Zero);
        assert!(!bool::from(BranchResult::NotTaken));
    }

    #[test]
    fn instruction_from_address() {
        let inst = BranchInstruction::from_address(0b1010_0110, 8);
        assert_eq!(inst.len(), 8);
        assert_eq!(inst.address(), bits![1, 0, 1, 0, 0, 1, 1, 0]);
        assert_eq!(inst.address_value(), 0b1010_0110);
        assert_eq!(format!("{:?}", inst), "BranchInstruction(10100110)");
    }
}
