//! History registers.

use bitvec::prelude::*;
use itertools::Itertools;
use tracing::debug;

use crate::bit::*;
use crate::error::*;
use crate::predictor::table::*;

/// A fixed-width shift register recording recent branch outcomes.
///
/// Index 0 holds the oldest bit and the last index holds the newest, so the
/// value read back with [to_number] has the most recent outcome in its
/// least-significant bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShiftRegister {
    data: BitVec,
}

// NOTE: Bits are printed in index order, so the rightmost character is the
// most recent outcome.
impl std::fmt::Display for ShiftRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", fmt_bits(&self.data))
    }
}

impl ShiftRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        Self { data: bitvec![0; len] }
    }

    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Return the contents of the register.
    pub fn read(&self) -> &BitSlice { self.data.as_bitslice() }

    /// Return the contents of the register as a list of [Bit].
    pub fn bits(&self) -> Vec<Bit> { Bit::vec_from_bitslice(&self.data) }

    /// Return the contents of the register as an integer.
    pub fn value(&self) -> usize { to_number(&self.data) }

    /// Drop the oldest bit and append `bit` as the newest.
    pub fn insert(&mut self, bit: Bit) {
        let len = self.len();
        if len == 0 {
            return;
        }
        self.data.shift_left(1);
        self.data.set(len - 1, bit.into());
    }

    /// Replace the entire contents of the register.
    pub fn set_bits(&mut self, bits: &BitSlice) -> Result<()> {
        SimError::check_len(self.len(), bits.len())?;
        self.data.copy_from_bitslice(bits);
        Ok(())
    }

    /// Clear every bit in the register.
    pub fn reset(&mut self) {
        self.data.fill(false);
    }
}


/// A bank of independent [ShiftRegister], one for each possible key.
///
/// Used to keep a separate branch history for each set of branches, where
/// the set is selected by a hash of the branch address.
#[derive(Clone, Debug)]
pub struct RegisterBank {
    regs: Vec<ShiftRegister>,
    key_width: usize,
}
impl RegisterBank {
    /// Create `2^key_width` registers of `width` bits each.
    pub fn new(width: usize, key_width: usize) -> Result<Self> {
        let size = table_size("register bank key", key_width)?;
        if width == 0 {
            return Err(SimError::InvalidWidth { name: "register", width });
        }
        debug!(width, key_width, size, "built register bank");
        Ok(Self {
            regs: vec![ShiftRegister::new(width); size],
            key_width,
        })
    }

    /// Width of every register in the bank.
    pub fn width(&self) -> usize {
        self.regs.first().map_or(0, ShiftRegister::len)
    }

    /// Return the register selected by `key`.
    pub fn read(&self, key: &BitSlice) -> Result<&ShiftRegister> {
        let idx = self.get_index(key)?;
        self.get_entry(idx)
    }

    /// Shift `bit` into the register selected by `key`.
    /// No other register in the bank is affected.
    pub fn insert(&mut self, key: &BitSlice, bit: Bit) -> Result<()> {
        let idx = self.get_index(key)?;
        self.get_entry_mut(idx)?.insert(bit);
        Ok(())
    }

    /// Clear every register in the bank.
    pub fn reset(&mut self) {
        for reg in self.regs.iter_mut() {
            reg.reset();
        }
    }

    /// Dump the bank, one "key: register" line per entry.
    pub fn monitor(&self) -> String {
        self.regs.iter().enumerate()
            .map(|(idx, reg)| {
                format!("  {}: {}",
                    fmt_bits(&from_number(idx, self.key_width)), reg
                )
            })
            .join("\n")
    }
}

impl PredictorTable for RegisterBank {
    type Entry = ShiftRegister;

    fn size(&self) -> usize { self.regs.len() }

    fn key_width(&self) -> usize { self.key_width }

    fn get_entry(&self, idx: usize) -> Result<&ShiftRegister> {
        self.check_index(idx)?;
        Ok(&self.regs[idx])
    }

    fn get_entry_mut(&mut self, idx: usize) -> Result<&mut ShiftRegister> {
        self.check_index(idx)?;
        Ok(&mut self.regs[idx])
    }
}
