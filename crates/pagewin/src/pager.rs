#![forbid(unsafe_code)]

//! The pagination controller: windowing, eviction, and stacking.
//!
//! [`Pager`] owns the block window and drives the flat mirror through the
//! collaborator traits. All of its methods must be called from one owning
//! sequence; fetch completions arriving on worker tasks have to be
//! marshaled back before calling [`Pager::stack_page`]. The pager itself
//! never blocks, locks, or spawns.

use tracing::{debug, info, trace};

use pagewin_core::{
    BlockTemplate, BlockWindow, LoadDirection, PagerConfig, PagerError, PagingBlock, StackOutcome,
    WindowRange,
};

use crate::traits::{ConnectivityProbe, Mirror, PageLoader, ViewAdapter};

/// Controller state.
///
/// `Loading` covers the synchronous span of a load or evict operation:
/// the pager returns to `Idle` once the triggering block's placeholders
/// are in the mirror and its fetch requests are issued, not when real
/// data arrives. Late data updates content in place; data for a block
/// that was evicted in the meantime is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    /// No load or evict operation in progress.
    Idle,
    /// A load or evict operation is mutating the window and mirror.
    Loading,
}

/// Windowed pagination controller for an unbounded scrollable list.
///
/// Keeps at most `max_blocks` blocks of `pages_per_block` pages resident,
/// inserts placeholders ahead of data arrival so the scroll extent stays
/// stable, and evicts the farthest block when the viewport nears the
/// opposite edge.
pub struct Pager<T, M, V, L> {
    config: PagerConfig,
    template: BlockTemplate,
    placeholder: T,
    window: BlockWindow<T>,
    mirror: M,
    view: V,
    loader: L,
    probe: Option<Box<dyn ConnectivityProbe>>,
    total_pages: u32,
    state: PagerState,
    near_end: bool,
    near_start: bool,
}

impl<T, M, V, L> Pager<T, M, V, L>
where
    T: Clone,
    M: Mirror<T>,
    V: ViewAdapter,
    L: PageLoader,
{
    /// Create a pager.
    ///
    /// `placeholder` is the sentinel cloned into mirror slots before page
    /// data arrives. Fails fast on degenerate numeric configuration.
    pub fn new(
        config: PagerConfig,
        template: BlockTemplate,
        placeholder: T,
        mirror: M,
        view: V,
        loader: L,
    ) -> Result<Self, PagerError> {
        if template.items_per_page() == 0 {
            return Err(PagerError::Config("items_per_page must be nonzero".into()));
        }
        if template.pages_per_block() == 0 {
            return Err(PagerError::Config("pages_per_block must be nonzero".into()));
        }
        if config.max_blocks() == 0 {
            return Err(PagerError::Config("max_blocks must be nonzero".into()));
        }
        Ok(Self {
            config,
            template,
            placeholder,
            window: BlockWindow::new(),
            mirror,
            view,
            loader,
            probe: None,
            total_pages: 0,
            state: PagerState::Idle,
            near_end: false,
            near_start: false,
        })
    }

    /// Attach a connectivity probe; fetch-triggering idle events are
    /// skipped while the probe reports offline.
    #[must_use]
    pub fn with_probe(mut self, probe: Box<dyn ConnectivityProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Reset all state and load block 0 going forward.
    ///
    /// Must be called before any scroll-driven operation.
    pub fn initialize(&mut self) {
        info!("initializing paging window");
        self.state = PagerState::Loading;
        self.near_end = false;
        self.near_start = false;
        self.window.clear();
        self.mirror.clear();
        self.view.on_reset(0);
        self.total_pages = 0;
        self.load_next_block(0);
    }

    /// Latest total page count reported by the data source.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Record the total page count reported by the data source.
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
    }

    /// First page number of the data source's numbering scheme.
    #[must_use]
    pub fn first_page(&self) -> u32 {
        self.config.origin().first_page()
    }

    /// Whether no load or evict operation is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == PagerState::Idle
    }

    /// Whether the last scroll update put the viewport at the forward
    /// edge with more pages available.
    #[must_use]
    pub fn near_end(&self) -> bool {
        self.near_end
    }

    /// Whether the last scroll update put the viewport at the backward
    /// edge with earlier pages available.
    #[must_use]
    pub fn near_start(&self) -> bool {
        self.near_start
    }

    /// The resident block window.
    #[must_use]
    pub fn window(&self) -> &BlockWindow<T> {
        &self.window
    }

    /// The flat mirror.
    #[must_use]
    pub fn mirror(&self) -> &M {
        &self.mirror
    }

    /// The view adapter.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view adapter.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The page loader.
    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Mutable access to the page loader.
    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Recompute the near-start/near-end trigger flags from a scroll
    /// position update.
    ///
    /// Pure with respect to the window and mirror: repeated calls with
    /// unchanged inputs never mutate anything beyond the two flags. When
    /// the window is empty both flags are false; an empty window means
    /// "no pages ahead or behind", not an error. The mirror-empty guard
    /// suppresses spurious triggers during clear-and-reinitialize, where
    /// a freshly emptied list transiently reports its last item visible.
    pub fn on_scroll_position_changed(
        &mut self,
        first_visible: usize,
        last_visible: usize,
        item_count: usize,
        total_available_pages: u32,
    ) {
        let mirror_empty = self.mirror.is_empty();
        let is_last_visible = item_count > 0 && last_visible == item_count - 1;
        let is_first_visible = first_visible == 0;

        self.near_end = match self.window.last_page() {
            Some(last) => is_last_visible && last < total_available_pages && !mirror_empty,
            None => false,
        };
        self.near_start = match self.window.first_page() {
            Some(first) => is_first_visible && first > self.first_page() && !mirror_empty,
            None => false,
        };
    }

    /// React to the scroll settling: evict and load as the flags direct.
    ///
    /// At most one edge is serviced per idle event; the forward edge is
    /// checked first. With a probe attached, an offline report skips the
    /// load entirely (the flags stay set, so a later idle event retries).
    pub fn on_scroll_idle(&mut self) {
        if self.near_end {
            if !self.connectivity_ok() {
                debug!("probe reports offline; skipping forward load");
                return;
            }
            // The next index is taken before eviction so a window of one
            // block keeps its position.
            let Some(high) = self.window.highest_index() else {
                return;
            };
            if self.window.len() as u32 >= self.config.max_blocks() {
                self.remove_top_block();
            }
            self.load_next_block(high + 1);
        } else if self.near_start {
            if !self.connectivity_ok() {
                debug!("probe reports offline; skipping backward load");
                return;
            }
            let Some(low) = self.window.lowest_index() else {
                return;
            };
            let Some(index) = low.checked_sub(1) else {
                // Already at the origin block; nothing behind it.
                return;
            };
            if self.window.len() as u32 >= self.config.max_blocks() {
                self.remove_bottom_block();
            }
            self.load_previous_block(index);
        }
    }

    /// Write an arrived page into its reserved mirror slot.
    ///
    /// Called by the embedding application when the loader's fetch
    /// completes, after marshaling back onto the pager's owning sequence.
    /// `None` items signal a failed fetch and substitute a full page of
    /// placeholders so the slot stays materialized. `Some` items shorter
    /// than a full page trim the trailing slots of that page's slot; only
    /// the last page ever loaded may legitimately be short.
    ///
    /// If the addressed block was evicted while the request was in
    /// flight the call is a no-op returning
    /// [`StackOutcome::DroppedStale`]. That is required behavior, not an
    /// error.
    pub fn stack_page(
        &mut self,
        block_index: u32,
        page_number: u32,
        items: Option<Vec<T>>,
        direction: LoadDirection,
    ) -> StackOutcome {
        let Some(flat_start) = self.window.flat_start_position(block_index) else {
            debug!(
                block = block_index,
                page = page_number,
                ?direction,
                "dropping page for evicted block"
            );
            return StackOutcome::DroppedStale;
        };

        let items_per_page = self.template.items_per_page() as usize;
        let items =
            items.unwrap_or_else(|| vec![self.placeholder.clone(); items_per_page]);
        let len = items.len();

        let Some(block) = self.window.get_mut(block_index) else {
            return StackOutcome::DroppedStale;
        };
        let Some(offset) = block.page_offset(page_number) else {
            debug!(
                block = block_index,
                page = page_number,
                "page outside block span; dropping"
            );
            return StackOutcome::DroppedStale;
        };
        let was_set = block.page(page_number).is_some_and(|p| p.is_set());
        let first = flat_start + offset * items_per_page;

        trace!(
            block = block_index,
            page = page_number,
            at = first,
            count = len,
            ?direction,
            "stacking page"
        );
        for (i, item) in items.iter().enumerate() {
            if !self.mirror.set(first + i, item.clone()) {
                trace!(position = first + i, "mirror write out of bounds; ignored");
            }
        }
        self.view.on_range_changed(first, len);

        // Short page: trim the trailing placeholder slots of this page's
        // slot. Skipped on re-delivery so a duplicate arrival can't trim
        // twice.
        if !was_set && len < items_per_page {
            let trim = items_per_page - len;
            for _ in 0..trim {
                if self.mirror.remove(first + len).is_none() {
                    trace!(position = first + len, "trim out of bounds; ignored");
                    break;
                }
            }
            block.record_short(trim);
            self.view.on_range_removed(first + len, trim);
        }

        block.set_page(page_number, items);
        self.state = PagerState::Idle;
        StackOutcome::Stacked
    }

    /// Snapshot the resident block indices for later restoration.
    #[must_use]
    pub fn save_window_range(&self) -> WindowRange {
        self.window.range()
    }

    /// Rebuild the window and mirror from a saved range and a copy of
    /// the flat item list, re-chunking items into pages per the current
    /// template. No fetches are issued; the view gets a single reset.
    pub fn restore_window(&mut self, range: WindowRange, flat: Vec<T>) {
        debug!(start = range.start, end = range.end, items = flat.len(), "restoring window");
        self.state = PagerState::Loading;
        self.near_end = false;
        self.near_start = false;
        self.window.clear();
        self.mirror.clear();

        let items_per_page = self.template.items_per_page() as usize;
        let mut remaining = flat.as_slice();
        for index in range.iter() {
            let mut block = PagingBlock::new(self.config.origin(), index, &self.template);
            let first_page = block.first_page();
            for i in 0..self.template.pages_per_block() {
                let take = remaining.len().min(items_per_page);
                let (chunk, rest) = remaining.split_at(take);
                remaining = rest;
                block.set_page(first_page + i, chunk.to_vec());
            }
            // Keep the block's mirror span in step with what the flat
            // list actually held for it.
            let deficit = self.template.items_per_block() - block.materialized_len();
            if deficit > 0 {
                block.record_short(deficit);
            }
            self.window.insert_back(block);
        }

        for (i, item) in flat.into_iter().enumerate() {
            self.mirror.insert(i, item);
        }
        self.view.on_reset(self.mirror.len());
        self.state = PagerState::Idle;
    }

    fn connectivity_ok(&self) -> bool {
        self.probe.as_deref().is_none_or(ConnectivityProbe::is_online)
    }

    fn load_next_block(&mut self, index: u32) {
        self.state = PagerState::Loading;
        let block = PagingBlock::new(self.config.origin(), index, &self.template);
        let first_page = block.first_page();
        debug!(block = index, first_page, "loading block forward");
        if !self.window.insert_back(block) {
            debug!(block = index, "forward insert would break contiguity; skipped");
            self.state = PagerState::Idle;
            return;
        }
        for _ in 0..self.template.pages_per_block() {
            self.pre_stack_forward();
        }
        for i in 0..self.template.pages_per_block() {
            self.loader.on_page_end_reached(index, first_page + i);
        }
        self.state = PagerState::Idle;
    }

    fn load_previous_block(&mut self, index: u32) {
        self.state = PagerState::Loading;
        let block = PagingBlock::new(self.config.origin(), index, &self.template);
        let first_page = block.first_page();
        debug!(block = index, first_page, "loading block backward");
        if !self.window.insert_front(block) {
            debug!(block = index, "backward insert would break contiguity; skipped");
            self.state = PagerState::Idle;
            return;
        }
        for _ in 0..self.template.pages_per_block() {
            self.pre_stack_backward();
        }
        for i in 0..self.template.pages_per_block() {
            self.loader.on_page_start_reached(index, first_page + i);
        }
        self.state = PagerState::Idle;
    }

    /// Append one page's worth of placeholders at the mirror tail.
    fn pre_stack_forward(&mut self) {
        let at = self.mirror.len();
        for _ in 0..self.template.items_per_page() {
            let tail = self.mirror.len();
            self.mirror.insert(tail, self.placeholder.clone());
        }
        self.view
            .on_range_inserted(at, self.template.items_per_page() as usize);
    }

    /// Prepend one page's worth of placeholders at the mirror front.
    fn pre_stack_backward(&mut self) {
        for _ in 0..self.template.items_per_page() {
            self.mirror.insert(0, self.placeholder.clone());
        }
        self.view
            .on_range_inserted(0, self.template.items_per_page() as usize);
    }

    fn remove_top_block(&mut self) {
        self.state = PagerState::Loading;
        let Some(block) = self.window.remove_lowest() else {
            self.state = PagerState::Idle;
            return;
        };
        let span = block.mirror_span();
        debug!(block = block.index(), span, "evicting lowest block");
        for _ in 0..span {
            if self.mirror.remove(0).is_none() {
                trace!("eviction ran past mirror front; ignored");
                break;
            }
        }
        self.view.on_range_removed(0, span);
        self.state = PagerState::Idle;
    }

    fn remove_bottom_block(&mut self) {
        self.state = PagerState::Loading;
        let Some(block) = self.window.remove_highest() else {
            self.state = PagerState::Idle;
            return;
        };
        let span = block.mirror_span();
        let at = self.mirror.len().saturating_sub(span);
        debug!(block = block.index(), span, "evicting highest block");
        for _ in 0..span {
            let len = self.mirror.len();
            if len == 0 {
                trace!("eviction ran past mirror tail; ignored");
                break;
            }
            self.mirror.remove(len - 1);
        }
        self.view.on_range_removed(at, span);
        self.state = PagerState::Idle;
    }
}
