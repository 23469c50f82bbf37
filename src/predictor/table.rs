//! Types for implementing a direct-mapped table of predictor state.

use bitvec::prelude::*;

use crate::bit::to_number;
use crate::error::*;

/// Largest key width we're willing to back with a dense table.
pub const MAX_INDEX_BITS: usize = 24;

/// Interface to a direct-mapped table addressed by a bit-vector key.
///
/// There is no associativity and no eviction: the table has exactly one
/// entry for every possible key.
pub trait PredictorTable {
    /// The type of entry in the table.
    type Entry: ?Sized;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize;

    /// Returns the width of a key in bits.
    fn key_width(&self) -> usize;

    /// Given some key, return the corresponding index into the table.
    fn get_index(&self, key: &BitSlice) -> Result<usize> {
        SimError::check_len(self.key_width(), key.len())?;
        let index = to_number(key);
        self.check_index(index)?;
        Ok(index)
    }

    /// Fail with [SimError::InvalidIndex] unless the index is addressable.
    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.size() {
            Ok(())
        } else {
            Err(SimError::InvalidIndex { index, size: self.size() })
        }
    }

    /// Returns a reference to an entry in the table.
    fn get_entry(&self, idx: usize) -> Result<&Self::Entry>;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, idx: usize) -> Result<&mut Self::Entry>;
}

/// Number of entries needed to cover every `key_width`-bit key.
pub fn table_size(name: &'static str, key_width: usize) -> Result<usize> {
    if key_width == 0 || key_width > MAX_INDEX_BITS {
        return Err(SimError::InvalidWidth { name, width: key_width });
    }
    Ok(1 << key_width)
}
