//! SAg: per-set history registers indexing a single global PHT.

use bitvec::prelude::*;
use tracing::{ debug, trace };

use crate::bit::*;
use crate::branch::*;
use crate::error::*;
use crate::hash::*;
use crate::history::*;
use crate::predictor::*;

/// Configuration for building a [SAg].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SAgConfig {
    /// Number of bits in each per-set branch history register
    pub bhr_width: usize,

    /// Number of bits in each saturating counter
    pub counter_width: usize,

    /// Number of bits in a branch address
    pub address_width: usize,

    /// Number of bits produced by hashing a branch address.
    /// There is one history register for each possible hash value.
    pub hash_width: usize,

    /// Strategy for hashing a branch address
    pub hash_mode: HashMode,
}
impl Default for SAgConfig {
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
impl SAgConfig {
    /// Use this configuration to create a new [SAg].
    pub fn build(self) -> Result<SAg> {
        check_nonzero("branch address", self.address_width)?;
        SaturatingCounter::new(self.counter_width)?;
        let psbhr = RegisterBank::new(self.bhr_width, self.hash_width)?;
        let pht = PatternHistoryTable::new(self.bhr_width, self.counter_width)?;
        debug!(cfg = ?self, "built SAg predictor");
        Ok(SAg { cfg: self, psbhr, pht })
    }
}

/// Per-set history, global pattern history table.
///
/// Branches are grouped into sets by a hash of their address. Each set keeps
/// its own history register, but every set reads from the same table of
/// counters.
#[derive(Clone, Debug)]
pub struct SAg {
    cfg: SAgConfig,

    /// Per-set branch history registers, selected by address hash
    psbhr: RegisterBank,

    /// Pattern history table, indexed by a per-set history register
    pht: PatternHistoryTable,
}
impl SAg {
    pub fn new(bhr_width: usize, counter_width: usize, address_width: usize,
        hash_width: usize, hash_mode: HashMode) -> Result<Self>
    {
        SAgConfig {
            bhr_width,
            counter_width,
            address_width,
            hash_width,
            hash_mode,
        }.build()
    }

    pub fn cfg(&self) -> &SAgConfig { &self.cfg }
    pub fn psbhr(&self) -> &RegisterBank { &self.psbhr }
    pub fn pht(&self) -> &PatternHistoryTable { &self.pht }

    /// Return the key selecting the history register for `instruction`.
    pub fn set_key(&self, instruction: &BranchInstruction) -> Result<BitVec> {
        check_address(instruction, self.cfg.address_width)?;
        hash(instruction.address(), self.cfg.hash_width, self.cfg.hash_mode)
    }

    /// Return the history register used for `instruction`.
    pub fn history(&self, instruction: &BranchInstruction)
        -> Result<&ShiftRegister>
    {
        let set = self.set_key(instruction)?;
        self.psbhr.read(&set)
    }
}

impl BranchPredictor for SAg {
    fn name(&self) -> &'static str { "SAg" }

    fn predict(&self, instruction: &BranchInstruction) -> Result<BranchResult> {
        let history = self.history(instruction)?;
        lookup_counter(&self.pht, history.read())
    }

    fn update(&mut self, instruction: &BranchInstruction, actual: BranchResult)
        -> Result<()>
    {
        let set = self.set_key(instruction)?;
        let history = self.psbhr.read(&set)?;
        train_counter(&mut self.pht, history.read(), actual)?;
        self.psbhr.insert(&set, actual.into())?;
        trace!(set = %fmt_bits(&set), ?actual, "SAg history");
        Ok(())
    }

    fn monitor(&self) -> String {
        format!("SAg predictor snapshot:\nPSBHR:\n{}\nPHT:\n{}\n",
            self.psbhr.monitor(), self.pht.monitor()
        )
    }

    fn reset(&mut self) {
        self.psbhr.reset();
        self.pht.reset();
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let p = SAgConfig::default().build().unwrap();
        assert_eq!(p.psbhr().size(), 16);
        assert_eq!(p.psbhr().width(), 4);
        assert_eq!(p.pht().size(), 16);
    }

    #[test]
    fn only_own_set_history_changes() {
        let mut p = SAg::new(2, 2, 4, 2, HashMode::Xor).unwrap();
        // 00 ^ 11 = 11, and 01 ^ 00 = 01
        let a = BranchInstruction::from_address(0b0011, 4);
        let b = BranchInstruction::from_address(0b0100, 4);

        p.update(&a, BranchResult::Taken).unwrap();
        assert_eq!(p.psbhr().read(bits![1, 1]).unwrap().read(), bits![0, 1]);
        assert_eq!(p.history(&b).unwrap().read(), bits![0, 0]);

        // Both sets started from the same history, so they trained the same
        // PHT entry
        assert_eq!(p.pht().read(bits![0, 0]).unwrap(), bits![0, 1]);
        p.update(&b, BranchResult::Taken).unwrap();
        assert_eq!(p.pht().read(bits![0, 0]).unwrap(), bits![1, 0]);
        assert_eq!(p.predict(&a).unwrap(), BranchResult::NotTaken);
    }

    #[test]
    fn bad_widths() {
        assert_eq!(
            SAg::new(2, 2, 8, 0, HashMode::Xor).unwrap_err(),
            SimError::InvalidWidth { name: "register bank key", width: 0 }
        );
        assert!(SAg::new(0, 2, 8, 4, HashMode::Xor).is_err());
        assert!(SAg::new(2, 9, 8, 4, HashMode::Xor).is_err());
    }

    #[test]
    fn reset_and_monitor() {
        let mut p = SAg::new(1, 1, 2, 1, HashMode::Xor).unwrap();
        let inst = BranchInstruction::from_address(0b01, 2);
        p.update(&inst, BranchResult::Taken).unwrap();
        assert_eq!(
            p.monitor(),
            "SAg predictor snapshot:\nPSBHR:\n  0: 0\n  1: 1\nPHT:\n  0: 1\n  1: 0\n"
        );
        p.reset();
        assert_eq!(p.history(&inst).unwrap().value(), 0);
    }
}
