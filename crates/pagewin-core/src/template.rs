#![forbid(unsafe_code)]

//! Configuration for the paging window.

/// Page numbering origin of the backing data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageOrigin {
    /// Pages are numbered from 0.
    #[default]
    Zero,
    /// Pages are numbered from 1.
    One,
}

impl PageOrigin {
    /// The first page number the data source recognizes.
    #[must_use]
    pub fn first_page(self) -> u32 {
        match self {
            PageOrigin::Zero => 0,
            PageOrigin::One => 1,
        }
    }
}

/// Direction a block load is moving through the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadDirection {
    /// Toward higher page numbers (list end).
    Forward,
    /// Toward lower page numbers (list start).
    Backward,
}

/// Shape of every block: how many items per page and pages per block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockTemplate {
    items_per_page: u32,
    pages_per_block: u32,
}

impl BlockTemplate {
    /// Create a template. Zero values are rejected at pager construction.
    #[must_use]
    pub fn new(items_per_page: u32, pages_per_block: u32) -> Self {
        Self {
            items_per_page,
            pages_per_block,
        }
    }

    /// Items held by one full page.
    #[must_use]
    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    /// Pages held by one block.
    #[must_use]
    pub fn pages_per_block(&self) -> u32 {
        self.pages_per_block
    }

    /// Mirror positions occupied by one full block.
    #[must_use]
    pub fn items_per_block(&self) -> usize {
        self.items_per_page as usize * self.pages_per_block as usize
    }
}

/// Pager-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerConfig {
    origin: PageOrigin,
    max_blocks: u32,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            origin: PageOrigin::Zero,
            max_blocks: 2,
        }
    }
}

impl PagerConfig {
    /// Create a config with the default origin (zero) and window size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page numbering origin.
    #[must_use]
    pub fn with_origin(mut self, origin: PageOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Set the maximum number of resident blocks.
    #[must_use]
    pub fn with_max_blocks(mut self, max_blocks: u32) -> Self {
        self.max_blocks = max_blocks;
        self
    }

    /// Page numbering origin.
    #[must_use]
    pub fn origin(&self) -> PageOrigin {
        self.origin
    }

    /// Maximum number of resident blocks.
    #[must_use]
    pub fn max_blocks(&self) -> u32 {
        self.max_blocks
    }
}
