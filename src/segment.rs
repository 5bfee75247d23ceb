//! Heuristic classification of program bytes as data.

use crate::addr::Addr;
use std::fmt;
use std::ops;

//===========================================================================//

/// A nonempty, half-open range `[start, end)` of image offsets presumed to
/// hold data rather than instructions.
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct DataBlock {
    start: usize,
    end: usize,
}

impl DataBlock {
    /// Returns the block covering `start` up to but not including `end`.
    ///
    /// Panics if `end <= start`.
    pub fn new(start: usize, end: usize) -> DataBlock {
        assert!(start < end);
        DataBlock { start, end }
    }

    /// Returns the first offset in the block.
    pub fn start(self) -> usize {
        self.start
    }

    /// Returns the offset just past the end of the block.
    pub fn end(self) -> usize {
        self.end
    }

    /// Returns the last offset in the block.
    pub fn last(self) -> usize {
        self.end - 1
    }

    /// Returns the number of bytes in the block.
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns true if this block contains `offset`.
    pub fn contains(self, offset: usize) -> bool {
        (self.start..self.end).contains(&offset)
    }
}

impl From<DataBlock> for ops::Range<usize> {
    fn from(block: DataBlock) -> ops::Range<usize> {
        block.start..block.end
    }
}

impl fmt::Display for DataBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "*{:#05x} to {:#05x} data block of length {}.",
            self.start,
            self.last(),
            self.len()
        )
    }
}

//===========================================================================//

/// Guesses the data blocks of an image of `image_len` bytes.
///
/// Each data reference starts a block, and the block runs until the nearest
/// branch target strictly after it, or until the end of the image if there is
/// none.  Blocks are returned in ascending order of their start offset.  They
/// are not checked against each other, so a reference that appears more than
/// once yields its block more than once, and blocks may overlap.
pub fn find_data_blocks(
    entries: &[Addr],
    branches: &[Addr],
    image_len: usize,
) -> Vec<DataBlock> {
    let mut starts: Vec<usize> = entries.iter().map(|&a| a.into()).collect();
    starts.sort_unstable();
    let mut bounds: Vec<usize> = branches.iter().map(|&a| a.into()).collect();
    bounds.push(image_len);
    bounds.sort_unstable();
    let mut blocks = Vec::with_capacity(starts.len());
    for start in starts {
        let Some(&end) = bounds.iter().find(|&&end| end > start) else {
            continue;
        };
        let block = DataBlock::new(start, end);
        log::debug!("guessed data block {block}");
        if start % 2 != 0 {
            log::warn!("data block at {start:#05x} starts on an odd offset");
        }
        blocks.push(block);
    }
    blocks
}

//===========================================================================//

/// The set of image offsets classified as data.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DataMap {
    is_data: Vec<bool>,
}

impl DataMap {
    /// Marks every offset of every block as data.  Offsets past `image_len`
    /// are dropped.
    pub fn from_blocks(blocks: &[DataBlock], image_len: usize) -> DataMap {
        let mut is_data = vec![false; image_len];
        for &block in blocks {
            let end = block.end().min(image_len);
            if let Some(slots) = is_data.get_mut(block.start()..end) {
                slots.fill(true);
            }
        }
        DataMap { is_data }
    }

    /// Returns true if `offset` is classified as data.
    pub fn contains(&self, offset: usize) -> bool {
        self.is_data.get(offset).copied().unwrap_or(false)
    }

    /// Returns the number of offsets classified as data.
    pub fn count(&self) -> usize {
        self.is_data.iter().filter(|&&is_data| is_data).count()
    }
}

//===========================================================================//


//===========================================================================//
