//! Implementation of a saturating counter.

use bitvec::prelude::*;

use crate::bit::*;
use crate::branch::BranchResult;
use crate::error::*;
use crate::predictor::StatefulPredictor;

/// Widest counter we support.
pub const MAX_COUNTER_BITS: usize = 8;

/// The value class of a [SaturatingCounter].
///
/// For a 2-bit counter these are exactly the codes `00`, `01`, `10` and `11`.
/// Wider counters have many "weak" values and a single "strong" value at each
/// end of the range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CounterState {
    StrongNotTaken,
    WeakNotTaken,
    WeakTaken,
    StrongTaken,
}
impl CounterState {
    /// Classify `value` within the range of a `width`-bit counter.
    pub fn classify(value: usize, width: usize) -> Self {
        assert!(width > 0 && width <= MAX_COUNTER_BITS);
        let max = (1 << width) - 1;
        let mid = 1 << (width - 1);
        if value >= max {
            Self::StrongTaken
        } else if value >= mid {
            Self::WeakTaken
        } else if value == 0 {
            Self::StrongNotTaken
        } else {
            Self::WeakNotTaken
        }
    }

    /// Return the direction predicted by this state.
    pub fn outcome(&self) -> BranchResult {
        match self {
            Self::StrongNotTaken | Self::WeakNotTaken => BranchResult::NotTaken,
            Self::WeakTaken | Self::StrongTaken => BranchResult::Taken,
        }
    }
}

/// An N-bit saturating counter used to follow the behavior of a branch.
///
/// The counter is stored as a bit-vector so that it can be moved in and out
/// of a [crate::predictor::PatternHistoryTable] block unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaturatingCounter {
    bits: BitVec,
}
impl SaturatingCounter {
    /// Create a counter of `width` bits, starting at zero.
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 || width > MAX_COUNTER_BITS {
            return Err(SimError::InvalidWidth { name: "counter", width });
        }
        Ok(Self { bits: bitvec![0; width] })
    }

    /// Create a counter whose width and value are taken from `bits`.
    pub fn from_bits(bits: &BitSlice) -> Result<Self> {
        let mut res = Self::new(bits.len())?;
        res.bits.copy_from_bitslice(bits);
        Ok(res)
    }

    /// Replace the counter value. The width can't change.
    pub fn set_bits(&mut self, bits: &BitSlice) -> Result<()> {
        SimError::check_len(self.width(), bits.len())?;
        self.bits.copy_from_bitslice(bits);
        Ok(())
    }

    pub fn bits(&self) -> &BitSlice { self.bits.as_bitslice() }
    pub fn width(&self) -> usize { self.bits.len() }
    pub fn value(&self) -> usize { to_number(&self.bits) }
    pub fn max(&self) -> usize { (1 << self.width()) - 1 }

    fn set_value(&mut self, value: usize) {
        self.bits = from_number(value, self.width());
    }

    /// Move one step toward the maximum. Does nothing at the ceiling.
    pub fn increment(&mut self) {
        let value = self.value();
        if value < self.max() {
            self.set_value(value + 1);
        }
    }

    /// Move one step toward zero. Does nothing at the floor.
    pub fn decrement(&mut self) {
        if let Some(next) = self.value().checked_sub(1) {
            self.set_value(next);
        }
    }

    /// Return the value class of the counter.
    pub fn state(&self) -> CounterState {
        CounterState::classify(self.value(), self.width())
    }
}

impl StatefulPredictor for SaturatingCounter {
    fn name(&self) -> &'static str { "SaturatingCounter" }
    fn predict(&self) -> BranchResult { self.state().outcome() }
    fn reset(&mut self) {
        self.bits.fill(false);
    }
    fn update(&mut self, outcome: BranchResult) {
        match outcome {
            BranchResult::Taken => self.increment(),
            BranchResult::NotTaken => self.decrement(),
        }
    }
}

impl std::fmt::Display for SaturatingCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", fmt_bits(&self.bits))
    }
}
