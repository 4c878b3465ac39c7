#![forbid(unsafe_code)]

//! Test collaborators for exercising the pagewin controller.
//!
//! Provides a recording view adapter, a queueing page loader, and a
//! scenario builder so integration tests can drive the pager through
//! scroll/fetch sequences and assert on the exact notification traffic.

use pagewin::pager::Pager;
use pagewin::traits::{PageLoader, ViewAdapter};
use pagewin_core::{BlockTemplate, PagerConfig};

/// One view notification, as the pager emitted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// `count` items inserted starting at `at`.
    Inserted {
        /// First affected position.
        at: usize,
        /// Number of positions.
        count: usize,
    },
    /// `count` items removed starting at `at`.
    Removed {
        /// First affected position.
        at: usize,
        /// Number of positions.
        count: usize,
    },
    /// `count` items changed in place starting at `at`.
    Changed {
        /// First affected position.
        at: usize,
        /// Number of positions.
        count: usize,
    },
    /// Everything changed; the mirror now holds `new_len` items.
    Reset {
        /// Mirror length after the reset.
        new_len: usize,
    },
}

/// View adapter that records every notification and tracks item count
/// the way a real list view would.
#[derive(Debug, Default)]
pub struct RecordingView {
    events: Vec<ViewEvent>,
    count: usize,
}

impl RecordingView {
    /// Create an empty recording view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    /// Drop recorded notifications, keeping the tracked count.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl ViewAdapter for RecordingView {
    fn on_range_inserted(&mut self, at: usize, count: usize) {
        self.events.push(ViewEvent::Inserted { at, count });
        self.count += count;
    }

    fn on_range_removed(&mut self, at: usize, count: usize) {
        self.events.push(ViewEvent::Removed { at, count });
        self.count = self.count.saturating_sub(count);
    }

    fn on_range_changed(&mut self, at: usize, count: usize) {
        self.events.push(ViewEvent::Changed { at, count });
    }

    fn on_reset(&mut self, new_len: usize) {
        self.events.push(ViewEvent::Reset { new_len });
        self.count = new_len;
    }

    fn item_count(&self) -> usize {
        self.count
    }
}

/// Which edge a fetch request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Forward edge (`on_page_end_reached`).
    End,
    /// Backward edge (`on_page_start_reached`).
    Start,
}

/// A recorded fetch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    /// Block the page belongs to.
    pub block: u32,
    /// Requested page number.
    pub page: u32,
    /// Edge that triggered the request.
    pub edge: Edge,
}

/// Loader that queues requests for the test to answer by calling
/// `stack_page` itself, in whatever order the scenario needs.
#[derive(Debug, Default)]
pub struct QueueLoader {
    requests: Vec<FetchRequest>,
}

impl QueueLoader {
    /// Create an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending requests, oldest first.
    #[must_use]
    pub fn requests(&self) -> &[FetchRequest] {
        &self.requests
    }

    /// Take all pending requests, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl PageLoader for QueueLoader {
    fn on_page_end_reached(&mut self, block: u32, page: u32) {
        self.requests.push(FetchRequest {
            block,
            page,
            edge: Edge::End,
        });
    }

    fn on_page_start_reached(&mut self, block: u32, page: u32) {
        self.requests.push(FetchRequest {
            block,
            page,
            edge: Edge::Start,
        });
    }
}

/// Pager wired to the standard harness collaborators.
pub type HarnessPager = Pager<String, Vec<String>, RecordingView, QueueLoader>;

/// Placeholder sentinel used by [`harness_pager`].
pub const PLACEHOLDER: &str = "<loading>";

/// Build a pager over `String` items with a vec mirror, recording view,
/// and queueing loader.
///
/// # Panics
/// Panics when the template or config is degenerate; harness callers
/// pass literals.
#[must_use]
pub fn harness_pager(config: PagerConfig, template: BlockTemplate) -> HarnessPager {
    Pager::new(
        config,
        template,
        PLACEHOLDER.to_string(),
        Vec::new(),
        RecordingView::new(),
        QueueLoader::new(),
    )
    .expect("harness pager config must be valid")
}

/// `count` distinct real items for page `page`, e.g. `"p3-07"`.
#[must_use]
pub fn page_items(page: u32, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("p{page}-{i:02}")).collect()
}
