#![forbid(unsafe_code)]

//! Windowed paging for unbounded, bidirectionally scrollable lists.
//!
//! `pagewin` keeps only a bounded window of a paged data source
//! materialized in memory. Pages of fixed size are grouped into
//! fixed-capacity blocks; the [`Pager`] evicts the farthest block and
//! fetches a new one as the viewport nears either edge, inserting
//! placeholders ahead of data arrival so the scroll extent never jumps.
//!
//! The pager drives its collaborators through narrow capability traits:
//! a [`ViewAdapter`] for change notifications, a [`Mirror`] as the flat
//! backing list, a [`PageLoader`] for fire-and-forget fetch requests,
//! and an optional [`ConnectivityProbe`] to gate fetches while offline.
//!
//! All pager methods belong to one owning sequence; fetch completions
//! must be marshaled back before calling [`Pager::stack_page`]. Late
//! completions for already-evicted blocks are silently dropped.

pub mod pager;
pub mod probe;
pub mod snapshot;
pub mod traits;

// --- Core re-exports -------------------------------------------------------

pub use pagewin_core::{
    BlockTemplate, BlockWindow, LoadDirection, Page, PageOrigin, PagerConfig, PagerError,
    PagingBlock, StackOutcome, WindowRange,
};

// --- Controller re-exports -------------------------------------------------

pub use pager::{Pager, PagerState};
pub use probe::TcpProbe;
pub use snapshot::{SnapshotError, WindowSnapshot};
pub use traits::{ConnectivityProbe, Mirror, PageLoader, ViewAdapter};

#[cfg(feature = "state-persistence")]
pub use snapshot::{load_snapshot, save_snapshot};

/// Commonly used types for day-to-day usage.
pub mod prelude {
    pub use crate::{
        BlockTemplate, ConnectivityProbe, LoadDirection, Mirror, PageLoader, PageOrigin, Pager,
        PagerConfig, PagerError, StackOutcome, ViewAdapter, WindowRange, WindowSnapshot,
    };
}
