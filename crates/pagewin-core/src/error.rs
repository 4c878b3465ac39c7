#![forbid(unsafe_code)]

//! Error and outcome types.
//!
//! Only genuinely fatal conditions are errors here. The recoverable
//! conditions the paging machinery runs into (a stacked page addressing
//! an evicted block, first/last-page queries on an empty window, a mirror
//! write landing out of bounds after a clear) are expected under
//! asynchronous fetch and are represented as outcome values, `None`
//! returns, and logged no-ops rather than `Err`.

use std::fmt;

/// Fatal construction-time errors.
#[derive(Debug)]
pub enum PagerError {
    /// Invalid numeric configuration (zero page size, zero window, ...).
    Config(String),
}

impl fmt::Display for PagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagerError::Config(msg) => write!(f, "invalid pager configuration: {msg}"),
        }
    }
}

impl std::error::Error for PagerError {}

/// Result of handing a fetched page to the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOutcome {
    /// The page was written into its block and mirror slot.
    Stacked,
    /// The addressed block was no longer resident; the page was discarded.
    ///
    /// Expected when the user scrolls past a block before its fetches
    /// complete. Not an error.
    DroppedStale,
}
