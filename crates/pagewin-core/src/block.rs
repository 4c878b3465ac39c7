#![forbid(unsafe_code)]

//! A block: the unit of memory-window eviction.

use crate::page::Page;
use crate::template::{BlockTemplate, PageOrigin};

/// A fixed-capacity ordered group of consecutive pages.
///
/// A block derives its page span purely from its index and the numbering
/// origin: `first_page = origin + pages_per_block * index`. Page slots for
/// the whole span exist from construction; items arrive into them later.
#[derive(Debug, Clone)]
pub struct PagingBlock<T> {
    index: u32,
    first_page: u32,
    items_per_page: u32,
    pages: Vec<Page<T>>,
    /// Mirror positions trimmed off this block's slot by short pages.
    short_by: usize,
}

impl<T> PagingBlock<T> {
    /// Create a block with empty page slots spanning its page range.
    #[must_use]
    pub fn new(origin: PageOrigin, index: u32, template: &BlockTemplate) -> Self {
        let first_page = first_page_in_block(origin, template.pages_per_block(), index);
        let pages = (0..template.pages_per_block())
            .map(|i| Page::new(first_page + i))
            .collect();
        Self {
            index,
            first_page,
            items_per_page: template.items_per_page(),
            pages,
            short_by: 0,
        }
    }

    /// Block index within the window's coordinate system.
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// First page number held by this block.
    #[must_use]
    pub fn first_page(&self) -> u32 {
        self.first_page
    }

    /// Last page number held by this block (inclusive).
    #[must_use]
    pub fn last_page(&self) -> u32 {
        self.first_page + self.pages.len() as u32 - 1
    }

    /// Number of page slots in this block.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Zero-based slot offset of a page number within this block, or
    /// `None` if the page falls outside `[first_page, last_page]`.
    #[must_use]
    pub fn page_offset(&self, page_number: u32) -> Option<usize> {
        if page_number < self.first_page || page_number > self.last_page() {
            return None;
        }
        Some((page_number - self.first_page) as usize)
    }

    /// Look up a page slot by page number.
    #[must_use]
    pub fn page(&self, page_number: u32) -> Option<&Page<T>> {
        self.page_offset(page_number).map(|i| &self.pages[i])
    }

    /// Store arrived items for a page in this block's range.
    ///
    /// Returns `false` (and stores nothing) when the page number is outside
    /// the block's span; addressing a page in the wrong block is a caller
    /// bug, not a panic.
    pub fn set_page(&mut self, page_number: u32, items: Vec<T>) -> bool {
        match self.page_offset(page_number) {
            Some(i) => {
                self.pages[i].set_items(items);
                true
            }
            None => false,
        }
    }

    /// Sum of lengths of all arrived pages; absent pages contribute 0.
    #[must_use]
    pub fn materialized_len(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Number of mirror positions this block currently occupies.
    ///
    /// Placeholders for pages that never arrived still occupy their slots,
    /// so the span is the full capacity minus whatever short-page trimming
    /// has removed. Eviction must remove exactly this many positions.
    #[must_use]
    pub fn mirror_span(&self) -> usize {
        (self.pages.len() * self.items_per_page as usize).saturating_sub(self.short_by)
    }

    /// Record that `count` trailing positions of one page's slot were
    /// trimmed from the mirror (short page).
    pub fn record_short(&mut self, count: usize) {
        self.short_by += count;
    }

    /// Iterate page slots in ascending page-number order.
    pub fn pages(&self) -> impl Iterator<Item = &Page<T>> {
        self.pages.iter()
    }
}

/// First page number of block `index`: `origin + pages_per_block * index`.
#[must_use]
pub fn first_page_in_block(origin: PageOrigin, pages_per_block: u32, index: u32) -> u32 {
    origin.first_page() + pages_per_block * index
}

/// Last page number of block `index` (inclusive).
#[must_use]
pub fn last_page_in_block(origin: PageOrigin, pages_per_block: u32, index: u32) -> u32 {
    first_page_in_block(origin, pages_per_block, index) + pages_per_block - 1
}
