//! Implementations of different branch predictors.

pub mod table;
pub mod pht;
pub mod counter;
pub mod gag;
pub mod gas;
pub mod sag;

pub use table::*;
pub use pht::*;
pub use counter::*;
pub use gag::*;
pub use gas::*;
pub use sag::*;

use bitvec::prelude::*;
use tracing::trace;

use crate::bit::*;
use crate::branch::*;
use crate::error::*;


/// Interface to a predictor with some internal state which is only subject to
/// change by the correct branch outcome.
pub trait StatefulPredictor {
    fn name(&self) -> &'static str;

    /// Reset the internal state of the predictor.
    fn reset(&mut self);

    /// Return the current predicted outcome.
    fn predict(&self) -> BranchResult;

    /// Update the internal state of the predictor with the correct outcome.
    fn update(&mut self, outcome: BranchResult);
}

/// Interface to a predictor that guesses the outcome of a particular
/// [BranchInstruction].
///
/// Callers are expected to call [BranchPredictor::predict] and then
/// [BranchPredictor::update] exactly once for each branch, in program order.
pub trait BranchPredictor {
    fn name(&self) -> &'static str;

    /// Return the predicted outcome. This never changes any state.
    fn predict(&self, instruction: &BranchInstruction) -> Result<BranchResult>;

    /// Update the internal state of the predictor with the correct outcome.
    fn update(&mut self, instruction: &BranchInstruction, actual: BranchResult)
        -> Result<()>;

    /// Return a human-readable dump of all registers and tables.
    fn monitor(&self) -> String;

    /// Put the predictor back into the state it was built with.
    fn reset(&mut self);
}


/// Read the counter stored at `key` and return the direction it predicts.
pub(crate) fn lookup_counter(pht: &PatternHistoryTable, key: &BitSlice)
    -> Result<BranchResult>
{
    let ctr = SaturatingCounter::from_bits(pht.read(key)?)?;
    Ok(ctr.predict())
}

/// Move the counter stored at `key` one step toward `actual` and write it
/// back into the table.
pub(crate) fn train_counter(pht: &mut PatternHistoryTable, key: &BitSlice,
    actual: BranchResult) -> Result<()>
{
    let mut ctr = SaturatingCounter::from_bits(pht.read(key)?)?;
    let before = ctr.value();
    ctr.update(actual);
    trace!(key = %fmt_bits(key), before, after = ctr.value(), ?actual,
        "trained counter");
    pht.update(key, ctr.bits())
}

/// Fail unless the instruction address has the configured width.
pub(crate) fn check_address(instruction: &BranchInstruction, width: usize)
    -> Result<()>
{
    SimError::check_len(width, instruction.len())
}

/// Fail unless a configured width is non-zero.
pub(crate) fn check_nonzero(name: &'static str, width: usize) -> Result<()> {
    if width == 0 {
        Err(SimError::InvalidWidth { name, width })
    } else {
        Ok(())
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counter_helpers() {
        let mut pht = PatternHistoryTable::new(1, 2).unwrap();
        let key = bits![1];
        assert_eq!(lookup_counter(&pht, key), Ok(BranchResult::NotTaken));

        train_counter(&mut pht, key, BranchResult::Taken).unwrap();
        train_counter(&mut pht, key, BranchResult::Taken).unwrap();
        assert_eq!(pht.read(key).unwrap(), bits![1, 0]);
        assert_eq!(lookup_counter(&pht, key), Ok(BranchResult::Taken));

        // Saturates at the floor
        for _ in 0..4 {
            train_counter(&mut pht, key, BranchResult::NotTaken).unwrap();
        }
        assert_eq!(pht.read(key).unwrap(), bits![0, 0]);
        assert_eq!(pht.read(bits![0]).unwrap(), bits![0, 0]);
    }
}
