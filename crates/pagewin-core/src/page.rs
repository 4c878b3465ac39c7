#![forbid(unsafe_code)]

//! A single page: the unit the data source fetches.

/// A fixed-size ordered slice of items addressed by one page number.
///
/// A page exists in its block's slot before its items arrive. "Not yet
/// arrived" (`items == None`) is distinct from "arrived empty"
/// (`items == Some(vec![])`): an absent page contributes zero length but
/// still counts as pending, while an empty page is a short final page.
#[derive(Debug, Clone)]
pub struct Page<T> {
    number: u32,
    items: Option<Vec<T>>,
}

impl<T> Page<T> {
    /// Create an empty slot for the given page number.
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self {
            number,
            items: None,
        }
    }

    /// The page number this slot is addressed by.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Store arrived items, replacing any previous contents.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = Some(items);
    }

    /// Arrived items, or `None` if the page has not arrived yet.
    #[must_use]
    pub fn items(&self) -> Option<&[T]> {
        self.items.as_deref()
    }

    /// Whether items have arrived for this page.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.items.is_some()
    }

    /// Number of materialized items; an absent page contributes 0.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    /// True when no items are materialized (absent or arrived empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
