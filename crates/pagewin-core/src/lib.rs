#![forbid(unsafe_code)]

//! Data model for windowed paging of unbounded scrollable lists.
//!
//! This crate holds the dependency-light building blocks: the [`Page`] /
//! [`PagingBlock`] model, the [`BlockWindow`] registry that keeps a bounded,
//! contiguous run of blocks in memory, and the flat-index arithmetic that
//! maps `(block, page, offset)` coordinates to positions in the view-facing
//! mirror list.
//!
//! The orchestration layer that drives loads and evictions lives in the
//! `pagewin` crate.

pub mod block;
pub mod error;
pub mod page;
pub mod template;
pub mod window;

pub use block::PagingBlock;
pub use error::{PagerError, StackOutcome};
pub use page::Page;
pub use template::{BlockTemplate, LoadDirection, PageOrigin, PagerConfig};
pub use window::{BlockWindow, WindowRange};
