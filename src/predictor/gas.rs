//! GAs: a global history register, concatenated with a hash of the branch
//! address, indexing a per-set PHT.

use bitvec::prelude::*;
use tracing::{ debug, trace };

use crate::branch::*;
use crate::error::*;
use crate::hash::*;
use crate::history::*;
use crate::predictor::*;

/// Configuration for building a [GAs].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GAsConfig {
    /// Number of bits in the global branch history register
    pub bhr_width: usize,

    /// Number of bits in each saturating counter
    pub counter_width: usize,

    /// Number of bits in a branch address
    pub address_width: usize,

    /// Number of bits produced by hashing a branch address
    pub hash_width: usize,

    /// Strategy for hashing a branch address
    pub hash_mode: HashMode,
}
impl Default for GAsConfig {
    fn default() -> Self {
        Self {
            bhr_width: 4,
            counter_width: 2,
            address_width: 8,
            hash_width: 4,
            hash_mode: HashMode::Xor,
        }
    }
}
impl GAsConfig {
    /// Number of bits in a PSPHT key.
    pub fn key_width(&self) -> usize {
        self.hash_width + self.bhr_width
    }

    /// Use this configuration to create a new [GAs].
    pub fn build(self) -> Result<GAs> {
        check_nonzero("history register", self.bhr_width)?;
        check_nonzero("hash output", self.hash_width)?;
        check_nonzero("branch address", self.address_width)?;
        SaturatingCounter::new(self.counter_width)?;
        let pspht = PatternHistoryTable::new(self.key_width(),
            self.counter_width)?;
        debug!(cfg = ?self, entries = pspht.size(), "built GAs predictor");
        Ok(GAs {
            cfg: self,
            bhr: ShiftRegister::new(self.bhr_width),
            pspht,
        })
    }
}

/// Global history, per-set pattern history table.
///
/// The hash of the branch address selects a set of counters, and the global
/// history selects a counter within that set. All branches share the same
/// history register.
#[derive(Clone, Debug)]
pub struct GAs {
    cfg: GAsConfig,

    /// Branch history register
    bhr: ShiftRegister,

    /// Per-set pattern history table, indexed by (hash ++ BHR)
    pspht: PatternHistoryTable,
}
impl GAs {
    pub fn new(bhr_width: usize, counter_width: usize, address_width: usize,
        hash_width: usize, hash_mode: HashMode) -> Result<Self>
    {
        GAsConfig {
            bhr_width,
            counter_width,
            address_width,
            hash_width,
            hash_mode,
        }.build()
    }

    pub fn cfg(&self) -> &GAsConfig { &self.cfg }
    pub fn bhr(&self) -> &ShiftRegister { &self.bhr }
    pub fn pspht(&self) -> &PatternHistoryTable { &self.pspht }

    /// Return the PSPHT key used for `instruction` given the current history.
    pub fn key(&self, instruction: &BranchInstruction) -> Result<BitVec> {
        check_address(instruction, self.cfg.address_width)?;
        let set = hash(instruction.address(), self.cfg.hash_width,
            self.cfg.hash_mode)?;
        Ok(concat(&set, self.bhr.read()))
    }
}

impl BranchPredictor for GAs {
    fn name(&self) -> &'static str { "GAs" }

    fn predict(&self, instruction: &BranchInstruction) -> Result<BranchResult> {
        let key = self.key(instruction)?;
        lookup_counter(&self.pspht, &key)
    }

    fn update(&mut self, instruction: &BranchInstruction, actual: BranchResult)
        -> Result<()>
    {
        let key = self.key(instruction)?;
        train_counter(&mut self.pspht, &key, actual)?;
        self.bhr.insert(actual.into());
        trace!(bhr = %self.bhr, "GAs history");
        Ok(())
    }

    fn monitor(&self) -> String {
        format!("GAs predictor snapshot:\nBHR: {}\nPSPHT:\n{}\n",
            self.bhr, self.pspht.monitor()
        )
    }

    fn reset(&mut self) {
        self.bhr.reset();
        self.pspht.reset();
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let p = GAsConfig::default().build().unwrap();
        assert_eq!(p.bhr().len(), 4);
        assert_eq!(p.pspht().size(), 256);
        assert_eq!(p.pspht().key_width(), 8);
    }

    #[test]
    fn key_layout() {
        let mut p = GAs::new(2, 2, 4, 2, HashMode::Xor).unwrap();
        // 10 ^ 11 = 01
        let inst = BranchInstruction::from_address(0b1011, 4);
        assert_eq!(p.key(&inst).unwrap(), bitvec![0, 1, 0, 0]);

        p.update(&inst, BranchResult::Taken).unwrap();
        assert_eq!(p.key(&inst).unwrap(), bitvec![0, 1, 0, 1]);
        assert_eq!(p.pspht().read(bits![0, 1, 0, 0]).unwrap(), bits![0, 1]);
    }

    #[test]
    fn rejects_wrong_address_width() {
        let p = GAs::new(2, 2, 8, 4, HashMode::Xor).unwrap();
        let inst = BranchInstruction::from_address(0x3, 4);
        assert_eq!(
            p.predict(&inst),
            Err(SimError::LengthMismatch { expected: 8, found: 4 })
        );
    }

    #[test]
    fn bad_widths() {
        assert!(GAs::new(2, 2, 8, 0, HashMode::Xor).is_err());
        assert!(GAs::new(0, 2, 8, 4, HashMode::Xor).is_err());
        assert!(GAs::new(2, 2, 0, 4, HashMode::Xor).is_err());
        assert_eq!(
            GAs::new(20, 2, 8, 8, HashMode::Xor).unwrap_err(),
            SimError::InvalidWidth { name: "table key", width: 28 }
        );
    }

    #[test]
    fn reset_and_monitor() {
        let mut p = GAs::new(1, 2, 2, 1, HashMode::Xor).unwrap();
        let inst = BranchInstruction::from_address(0b10, 2);
        p.update(&inst, BranchResult::Taken).unwrap();
        assert_eq!(
            p.monitor(),
            "GAs predictor snapshot:\nBHR: 1\nPSPHT:\n  00: 00\n  01: 00\n  10: 01\n  11: 00\n"
        );
        p.reset();
        assert_eq!(p.bhr().value(), 0);
        assert_eq!(p.pspht().read(bits![1, 0]).unwrap(), bits![0, 0]);
    }
}
