//! GAg: a global history register indexing a single global PHT.

use tracing::{ debug, trace };

use crate::branch::*;
use crate::error::*;
use crate::history::*;
use crate::predictor::*;

/// Configuration for building a [GAg].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GAgConfig {
    /// Number of bits in the global branch history register
    pub bhr_width: usize,

    /// Number of bits in each saturating counter
    pub counter_width: usize,
}
impl Default for GAgConfig {
    fn default() -> Self {
        Self { bhr_width: 4, counter_width: 2 }
    }
}
impl GAgConfig {
    /// Get the number of storage bits.
    pub fn storage_bits(&self) -> usize {
        self.bhr_width + (self.counter_width << self.bhr_width)
    }

    /// Use this configuration to create a new [GAg].
    pub fn build(self) -> Result<GAg> {
        SaturatingCounter::new(self.counter_width)?;
        let pht = PatternHistoryTable::new(self.bhr_width, self.counter_width)?;
        debug!(cfg = ?self, "built GAg predictor");
        Ok(GAg {
            cfg: self,
            bhr: ShiftRegister::new(self.bhr_width),
            pht,
        })
    }
}

/// Global history, global pattern history table.
///
/// Every branch shares one history register and one table of counters, so
/// the branch address plays no part in the prediction.
#[derive(Clone, Debug)]
pub struct GAg {
    cfg: GAgConfig,

    /// Branch history register
    bhr: ShiftRegister,

    /// Pattern history table, indexed by the BHR
    pht: PatternHistoryTable,
}
impl GAg {
    pub fn new(bhr_width: usize, counter_width: usize) -> Result<Self> {
        GAgConfig { bhr_width, counter_width }.build()
    }

    pub fn cfg(&self) -> &GAgConfig { &self.cfg }
    pub fn bhr(&self) -> &ShiftRegister { &self.bhr }
    pub fn pht(&self) -> &PatternHistoryTable { &self.pht }
}

impl BranchPredictor for GAg {
    fn name(&self) -> &'static str { "GAg" }

    fn predict(&self, _instruction: &BranchInstruction) -> Result<BranchResult> {
        lookup_counter(&self.pht, self.bhr.read())
    }

    fn update(&mut self, _instruction: &BranchInstruction, actual: BranchResult)
        -> Result<()>
    {
        train_counter(&mut self.pht, self.bhr.read(), actual)?;
        self.bhr.insert(actual.into());
        trace!(bhr = %self.bhr, "GAg history");
        Ok(())
    }

    fn monitor(&self) -> String {
        format!("GAg predictor snapshot:\nBHR: {}\nPHT:\n{}\n",
            self.bhr, self.pht.monitor()
        )
    }

    fn reset(&mut self) {
        self.bhr.reset();
        self.pht.reset();
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use bitvec::prelude::*;

    #[test]
    fn defaults() {
        let p = GAgConfig::default().build().unwrap();
        assert_eq!(p.bhr().len(), 4);
        assert_eq!(p.pht().size(), 16);
        assert_eq!(p.pht().block_width(), 2);
        assert_eq!(p.cfg().storage_bits(), 4 + 16 * 2);
    }

    #[test]
    fn bad_widths() {
        assert_eq!(
            GAg::new(0, 2).unwrap_err(),
            SimError::InvalidWidth { name: "table key", width: 0 }
        );
        assert_eq!(
            GAg::new(4, 0).unwrap_err(),
            SimError::InvalidWidth { name: "counter", width: 0 }
        );
    }

    #[test]
    fn learns_alternating_pattern() {
        let mut p = GAg::new(2, 2).unwrap();
        let inst = BranchInstruction::from_address(0x40, 8);
        let pattern = [BranchResult::Taken, BranchResult::NotTaken];

        for i in 0..32 {
            p.update(&inst, pattern[i % 2]).unwrap();
        }
        // After a not-taken branch ("10") the next one is always taken
        assert_eq!(p.bhr().read(), bits![1, 0]);
        assert_eq!(p.predict(&inst).unwrap(), BranchResult::Taken);
        p.update(&inst, BranchResult::Taken).unwrap();
        assert_eq!(p.predict(&inst).unwrap(), BranchResult::NotTaken);
    }

    #[test]
    fn reset_clears_state() {
        let mut p = GAg::new(2, 2).unwrap();
        let inst = BranchInstruction::from_address(0, 8);
        for _ in 0..8 {
            p.update(&inst, BranchResult::Taken).unwrap();
        }
        assert_eq!(p.predict(&inst).unwrap(), BranchResult::Taken);
        p.reset();
        assert_eq!(p.bhr().value(), 0);
        assert_eq!(p.predict(&inst).unwrap(), BranchResult::NotTaken);
        assert!(p.monitor().starts_with("GAg predictor snapshot:\nBHR: 00\n"));
    }
}
