#![forbid(unsafe_code)]

//! The window registry: the bounded, contiguous run of resident blocks.

use std::collections::VecDeque;

use crate::block::PagingBlock;

/// Half-open interval of resident block indices, `[start, end)`.
///
/// An empty window reports `0..0`. The interval plus a copy of the flat
/// mirror is enough to rebuild an equivalent window after a view reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    /// Lowest resident block index.
    pub start: u32,
    /// One past the highest resident block index.
    pub end: u32,
}

impl WindowRange {
    /// Create a range. `end` is exclusive.
    #[must_use]
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of block indices covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    /// True when the range covers no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Iterate the covered block indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.start..self.end
    }
}

/// Ordered collection of resident blocks, contiguous in block index.
///
/// Contiguity is an invariant, so a deque plus the index of the front
/// block replaces an ordered map: lowest/highest are O(1) and rank is
/// plain subtraction.
#[derive(Debug, Clone, Default)]
pub struct BlockWindow<T> {
    blocks: VecDeque<PagingBlock<T>>,
    /// Block index of `blocks[0]`; meaningless when empty.
    base: u32,
}

impl<T> BlockWindow<T> {
    /// Create an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: VecDeque::new(),
            base: 0,
        }
    }

    /// Number of resident blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when no blocks are resident.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Lowest resident block index, or `None` when empty.
    #[must_use]
    pub fn lowest_index(&self) -> Option<u32> {
        if self.blocks.is_empty() {
            None
        } else {
            Some(self.base)
        }
    }

    /// Highest resident block index, or `None` when empty.
    #[must_use]
    pub fn highest_index(&self) -> Option<u32> {
        if self.blocks.is_empty() {
            None
        } else {
            Some(self.base + self.blocks.len() as u32 - 1)
        }
    }

    /// Append a block above the current highest index.
    ///
    /// Returns `false` (and drops nothing into the window) when the
    /// block's index would break contiguity.
    pub fn insert_back(&mut self, block: PagingBlock<T>) -> bool {
        if self.blocks.is_empty() {
            self.base = block.index();
            self.blocks.push_back(block);
            return true;
        }
        if block.index() != self.base + self.blocks.len() as u32 {
            return false;
        }
        self.blocks.push_back(block);
        true
    }

    /// Prepend a block below the current lowest index.
    ///
    /// Returns `false` when the block's index would break contiguity.
    pub fn insert_front(&mut self, block: PagingBlock<T>) -> bool {
        if self.blocks.is_empty() {
            self.base = block.index();
            self.blocks.push_back(block);
            return true;
        }
        if self.base == 0 || block.index() != self.base - 1 {
            return false;
        }
        self.base -= 1;
        self.blocks.push_front(block);
        true
    }

    /// Remove and return the block with the lowest index.
    pub fn remove_lowest(&mut self) -> Option<PagingBlock<T>> {
        let block = self.blocks.pop_front()?;
        self.base += 1;
        Some(block)
    }

    /// Remove and return the block with the highest index.
    pub fn remove_highest(&mut self) -> Option<PagingBlock<T>> {
        self.blocks.pop_back()
    }

    /// Look up a resident block by index.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<&PagingBlock<T>> {
        self.rank_of(index).map(|r| &self.blocks[r])
    }

    /// Mutable lookup by block index.
    pub fn get_mut(&mut self, index: u32) -> Option<&mut PagingBlock<T>> {
        let rank = self.rank_of(index)?;
        Some(&mut self.blocks[rank])
    }

    /// Whether a block index is currently resident.
    #[must_use]
    pub fn contains(&self, index: u32) -> bool {
        self.rank_of(index).is_some()
    }

    /// 0-based rank of a block index among resident blocks, or `None`
    /// when not resident.
    #[must_use]
    pub fn rank_of(&self, index: u32) -> Option<usize> {
        if self.blocks.is_empty() || index < self.base {
            return None;
        }
        let rank = (index - self.base) as usize;
        if rank < self.blocks.len() {
            Some(rank)
        } else {
            None
        }
    }

    /// Mirror position where the given block's first item lives.
    ///
    /// Sums the actual mirror spans of lower-ranked blocks, so a
    /// short-trimmed block shifts everything after it correctly.
    #[must_use]
    pub fn flat_start_position(&self, index: u32) -> Option<usize> {
        let rank = self.rank_of(index)?;
        Some(
            self.blocks
                .iter()
                .take(rank)
                .map(PagingBlock::mirror_span)
                .sum(),
        )
    }

    /// Total mirror positions occupied by all resident blocks.
    #[must_use]
    pub fn total_mirror_span(&self) -> usize {
        self.blocks.iter().map(PagingBlock::mirror_span).sum()
    }

    /// First page number in the window, or `None` when empty.
    #[must_use]
    pub fn first_page(&self) -> Option<u32> {
        self.blocks.front().map(PagingBlock::first_page)
    }

    /// Last page number in the window, or `None` when empty.
    #[must_use]
    pub fn last_page(&self) -> Option<u32> {
        self.blocks.back().map(PagingBlock::last_page)
    }

    /// Snapshot the resident block indices as a half-open interval.
    #[must_use]
    pub fn range(&self) -> WindowRange {
        match (self.lowest_index(), self.highest_index()) {
            (Some(low), Some(high)) => WindowRange::new(low, high + 1),
            _ => WindowRange::default(),
        }
    }

    /// Drop all blocks.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.base = 0;
    }

    /// Iterate resident blocks in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = &PagingBlock<T>> {
        self.blocks.iter()
    }
}
