//! Implementation of a pattern history table (PHT).

use bitvec::prelude::*;
use itertools::Itertools;
use tracing::debug;

use crate::bit::*;
use crate::error::*;
use crate::predictor::table::*;

/// A direct-mapped table of fixed-width blocks, indexed by a bit-vector key.
///
/// Every slot starts out holding the all-zero block, so a read never misses.
/// The predictors keep one saturating counter in each block.
#[derive(Clone, Debug)]
pub struct PatternHistoryTable {
    /// Table of blocks
    data: Vec<BitVec>,

    /// Number of bits in a key
    key_width: usize,

    /// Number of bits in a block
    block_width: usize,
}
impl PatternHistoryTable {
    /// Create a table with one block for each `key_width`-bit key.
    pub fn new(key_width: usize, block_width: usize) -> Result<Self> {
        let size = table_size("table key", key_width)?;
        if block_width == 0 {
            return Err(SimError::InvalidWidth {
                name: "table block",
                width: block_width,
            });
        }
        debug!(key_width, block_width, size, "built pattern history table");
        Ok(Self {
            data: vec![bitvec![0; block_width]; size],
            key_width,
            block_width,
        })
    }

    pub fn block_width(&self) -> usize { self.block_width }

    /// Return the block associated with `key`.
    pub fn read(&self, key: &BitSlice) -> Result<&BitSlice> {
        let idx = self.get_index(key)?;
        self.get_entry(idx)
    }

    /// Overwrite the block associated with `key`.
    pub fn write(&mut self, key: &BitSlice, block: &BitSlice) -> Result<()> {
        SimError::check_len(self.block_width, block.len())?;
        let idx = self.get_index(key)?;
        self.get_entry_mut(idx)?.copy_from_bitslice(block);
        Ok(())
    }

    /// Write back a block after a read-modify-write. Same as [Self::write].
    pub fn update(&mut self, key: &BitSlice, block: &BitSlice) -> Result<()> {
        self.write(key, block)
    }

    /// Put every block back to all-zero.
    pub fn reset(&mut self) {
        for block in self.data.iter_mut() {
            block.fill(false);
        }
    }

    /// Dump the table, one "key: block" line per entry.
    pub fn monitor(&self) -> String {
        self.data.iter().enumerate()
            .map(|(idx, block)| {
                format!("  {}: {}",
                    fmt_bits(&from_number(idx, self.key_width)),
                    fmt_bits(block)
                )
            })
            .join("\n")
    }
}

impl PredictorTable for PatternHistoryTable {
    type Entry = BitSlice;

    fn size(&self) -> usize { self.data.len() }

    fn key_width(&self) -> usize { self.key_width }

    fn get_entry(&self, idx: usize) -> Result<&BitSlice> {
        self.check_index(idx)?;
        Ok(self.data[idx].as_bitslice())
    }

    fn get_entry_mut(&mut self, idx: usize) -> Result<&mut BitSlice> {
        self.check_index(idx)?;
        Ok(self.data[idx].as_mut_bitslice())
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let pht = PatternHistoryTable::new(3, 2).unwrap();
        assert_eq!(pht.size(), 8);
        for key in 0..8 {
            let block = pht.read(&from_number(key, 3)).unwrap();
            assert_eq!(block, bits![0, 0]);
        }
    }

    #[test]
    fn write_then_read() {
        let mut pht = PatternHistoryTable::new(2, 2).unwrap();
        pht.write(bits![1, 0], bits![1, 1]).unwrap();
        assert_eq!(pht.read(bits![1, 0]).unwrap(), bits![1, 1]);
        assert_eq!(pht.read(bits![0, 1]).unwrap(), bits![0, 0]);

        pht.update(bits![1, 0], bits![0, 1]).unwrap();
        assert_eq!(pht.read(bits![1, 0]).unwrap(), bits![0, 1]);
        assert_eq!(pht.get_entry(0b10).unwrap(), bits![0, 1]);
    }

    #[test]
    fn width_errors() {
        let mut pht = PatternHistoryTable::new(2, 2).unwrap();
        assert_eq!(
            pht.read(bits![1, 0, 1]),
            Err(SimError::LengthMismatch { expected: 2, found: 3 })
        );
        assert_eq!(
            pht.write(bits![1, 0], bits![1]),
            Err(SimError::LengthMismatch { expected: 2, found: 1 })
        );
        assert_eq!(
            pht.get_entry(4),
            Err(SimError::InvalidIndex { index: 4, size: 4 })
        );
        assert!(PatternHistoryTable::new(2, 0).is_err());
        assert!(PatternHistoryTable::new(0, 2).is_err());
    }

    #[test]
    fn reset_and_monitor() {
        let mut pht = PatternHistoryTable::new(1, 2).unwrap();
        pht.write(bits![1], bits![1, 0]).unwrap();
        assert_eq!(pht.monitor(), "  0: 00\n  1: 10");
        pht.reset();
        assert_eq!(pht.read(bits![1]).unwrap(), bits![0, 0]);
    }
}
