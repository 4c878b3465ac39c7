//! End-to-end scenarios driving the pager through scroll and fetch
//! sequences with the harness collaborators.

use pagewin::prelude::*;
use pagewin_harness::{
    Edge, FetchRequest, HarnessPager, PLACEHOLDER, ViewEvent, harness_pager, page_items,
};

fn standard_pager() -> HarnessPager {
    // itemsPerPage=10, pagesPerBlock=2, maxBlocks=2, origin 0.
    harness_pager(
        PagerConfig::new().with_max_blocks(2),
        BlockTemplate::new(10, 2),
    )
}

fn placeholder_count(pager: &HarnessPager) -> usize {
    pager
        .mirror()
        .iter()
        .filter(|s| s.as_str() == PLACEHOLDER)
        .count()
}

/// Drive a scroll-to-last-item update followed by an idle event.
fn scroll_to_end(pager: &mut HarnessPager, total_pages: u32) {
    let count = pager.mirror().len();
    pager.on_scroll_position_changed(count.saturating_sub(10), count - 1, count, total_pages);
    pager.on_scroll_idle();
}

fn scroll_to_start(pager: &mut HarnessPager, total_pages: u32) {
    let count = pager.mirror().len();
    pager.on_scroll_position_changed(0, count.saturating_sub(1).min(9), count, total_pages);
    pager.on_scroll_idle();
}

#[test]
fn scenario_a_initialize_and_fill_block_zero() {
    let mut pager = standard_pager();
    pager.initialize();

    assert_eq!(pager.save_window_range(), WindowRange::new(0, 1));
    assert_eq!(pager.mirror().len(), 20);
    assert_eq!(placeholder_count(&pager), 20);
    assert_eq!(
        pager.loader_mut().drain(),
        vec![
            FetchRequest {
                block: 0,
                page: 0,
                edge: Edge::End
            },
            FetchRequest {
                block: 0,
                page: 1,
                edge: Edge::End
            },
        ]
    );

    let outcome = pager.stack_page(0, 0, Some(page_items(0, 10)), LoadDirection::Forward);
    assert_eq!(outcome, StackOutcome::Stacked);
    let outcome = pager.stack_page(0, 1, Some(page_items(1, 10)), LoadDirection::Forward);
    assert_eq!(outcome, StackOutcome::Stacked);

    assert_eq!(pager.mirror().len(), 20);
    assert_eq!(placeholder_count(&pager), 0);
    assert_eq!(pager.mirror()[0], "p0-00");
    assert_eq!(pager.mirror()[19], "p1-09");
}

#[test]
fn scenario_b_forward_eviction_at_capacity() {
    let mut pager = standard_pager();
    pager.initialize();
    pager.set_total_pages(4);
    for req in pager.loader_mut().drain() {
        pager.stack_page(
            req.block,
            req.page,
            Some(page_items(req.page, 10)),
            LoadDirection::Forward,
        );
    }

    // First edge hit: window below capacity, no eviction.
    scroll_to_end(&mut pager, 4);
    assert_eq!(pager.save_window_range(), WindowRange::new(0, 2));
    assert_eq!(pager.mirror().len(), 40);
    for req in pager.loader_mut().drain() {
        pager.stack_page(
            req.block,
            req.page,
            Some(page_items(req.page, 10)),
            LoadDirection::Forward,
        );
    }

    // Second edge hit: at capacity, block 0 evicted before block 2 loads.
    pager.view_mut().clear_events();
    scroll_to_end(&mut pager, 4);
    assert_eq!(pager.save_window_range(), WindowRange::new(1, 3));

    // Block 0's 20 items left the mirror front; block 2's placeholders
    // were appended.
    assert_eq!(pager.mirror().len(), 40);
    assert_eq!(pager.mirror()[0], "p2-00");
    assert_eq!(placeholder_count(&pager), 20);
    assert_eq!(
        pager.view().events()[0],
        ViewEvent::Removed { at: 0, count: 20 }
    );

    // Block 2 spans pages 4-5.
    let requests = pager.loader_mut().drain();
    assert_eq!(
        requests,
        vec![
            FetchRequest {
                block: 2,
                page: 4,
                edge: Edge::End
            },
            FetchRequest {
                block: 2,
                page: 5,
                edge: Edge::End
            },
        ]
    );
}

#[test]
fn scenario_c_short_page_trims_slot_tail() {
    let mut pager = standard_pager();
    pager.initialize();
    pager.set_total_pages(4);
    for req in pager.loader_mut().drain() {
        pager.stack_page(
            req.block,
            req.page,
            Some(page_items(req.page, 10)),
            LoadDirection::Forward,
        );
    }
    scroll_to_end(&mut pager, 4);
    pager.loader_mut().drain();

    // Page 2 arrives full, page 3 arrives with only 6 of 10 items.
    pager.stack_page(1, 2, Some(page_items(2, 10)), LoadDirection::Forward);
    pager.view_mut().clear_events();
    pager.stack_page(1, 3, Some(page_items(3, 6)), LoadDirection::Forward);

    // Mirror shrank by 4 at the tail of page 3's slot.
    assert_eq!(pager.mirror().len(), 36);
    assert_eq!(pager.mirror()[35], "p3-05");
    assert_eq!(placeholder_count(&pager), 0);
    assert_eq!(
        pager.view().events(),
        &[
            ViewEvent::Changed { at: 30, count: 6 },
            ViewEvent::Removed { at: 36, count: 4 },
        ]
    );

    // Later flat-position arithmetic accounts for the shorter block.
    assert_eq!(pager.window().get(1).unwrap().mirror_span(), 16);
    assert_eq!(pager.window().total_mirror_span(), 36);
}

#[test]
fn stale_stack_after_eviction_is_noop() {
    let mut pager = standard_pager();
    pager.initialize();
    pager.set_total_pages(8);
    // Fill and walk the window forward until block 0 is evicted.
    for req in pager.loader_mut().drain() {
        pager.stack_page(
            req.block,
            req.page,
            Some(page_items(req.page, 10)),
            LoadDirection::Forward,
        );
    }
    scroll_to_end(&mut pager, 8);
    scroll_to_end(&mut pager, 8);
    assert_eq!(pager.save_window_range(), WindowRange::new(1, 3));

    let mirror_before: Vec<String> = pager.mirror().clone();
    let events_before = pager.view().events().len();

    // Block 0's fetch completes late: dropped, nothing moves.
    let outcome = pager.stack_page(0, 0, Some(page_items(0, 10)), LoadDirection::Forward);
    assert_eq!(outcome, StackOutcome::DroppedStale);
    assert_eq!(pager.mirror(), &mirror_before);
    assert_eq!(pager.view().events().len(), events_before);
}

#[test]
fn backward_load_evicts_highest_and_prepends() {
    let mut pager = standard_pager();
    // Window restored mid-list: blocks 1 and 2, all real items.
    let mut flat = Vec::new();
    for page in 2..6 {
        flat.extend(page_items(page, 10));
    }
    pager.restore_window(WindowRange::new(1, 3), flat);
    pager.set_total_pages(8);
    assert_eq!(pager.mirror().len(), 40);

    pager.view_mut().clear_events();
    scroll_to_start(&mut pager, 8);

    // Highest block (2) evicted, block 0 prepended as placeholders.
    assert_eq!(pager.save_window_range(), WindowRange::new(0, 2));
    assert_eq!(pager.mirror().len(), 40);
    assert_eq!(placeholder_count(&pager), 20);
    assert_eq!(pager.mirror()[20], "p2-00");
    assert_eq!(
        pager.view().events()[0],
        ViewEvent::Removed { at: 20, count: 20 }
    );
    assert_eq!(
        pager.loader_mut().drain(),
        vec![
            FetchRequest {
                block: 0,
                page: 0,
                edge: Edge::Start
            },
            FetchRequest {
                block: 0,
                page: 1,
                edge: Edge::Start
            },
        ]
    );

    // Pages arrive out of order; both land in the right slots.
    pager.stack_page(0, 1, Some(page_items(1, 10)), LoadDirection::Backward);
    pager.stack_page(0, 0, Some(page_items(0, 10)), LoadDirection::Backward);
    assert_eq!(pager.mirror()[0], "p0-00");
    assert_eq!(pager.mirror()[10], "p1-00");
    assert_eq!(placeholder_count(&pager), 0);
}

#[test]
fn backward_trigger_never_fires_at_origin() {
    let mut pager = standard_pager();
    pager.initialize();
    for req in pager.loader_mut().drain() {
        pager.stack_page(
            req.block,
            req.page,
            Some(page_items(req.page, 10)),
            LoadDirection::Forward,
        );
    }
    // First item visible, but block 0's first page is the origin page.
    pager.on_scroll_position_changed(0, 9, 20, 8);
    assert!(!pager.near_start());
    pager.on_scroll_idle();
    assert_eq!(pager.save_window_range(), WindowRange::new(0, 1));
}

#[test]
fn eviction_removes_full_span_when_pages_never_arrived() {
    let mut pager = standard_pager();
    pager.initialize();
    pager.set_total_pages(8);
    // Block 0's pages never arrive; scroll on regardless.
    scroll_to_end(&mut pager, 8);
    scroll_to_end(&mut pager, 8);

    // Both placeholder blocks evicted cleanly: mirror holds exactly the
    // two resident blocks' spans.
    assert_eq!(pager.save_window_range(), WindowRange::new(1, 3));
    assert_eq!(pager.mirror().len(), 40);
    assert_eq!(pager.window().total_mirror_span(), 40);
}

#[test]
fn save_restore_round_trip_preserves_structure() {
    let mut pager = standard_pager();
    pager.initialize();
    pager.set_total_pages(4);
    for req in pager.loader_mut().drain() {
        pager.stack_page(
            req.block,
            req.page,
            Some(page_items(req.page, 10)),
            LoadDirection::Forward,
        );
    }
    scroll_to_end(&mut pager, 4);
    pager.loader_mut().drain();
    pager.stack_page(1, 2, Some(page_items(2, 10)), LoadDirection::Forward);
    pager.stack_page(1, 3, Some(page_items(3, 6)), LoadDirection::Forward);

    let before: Vec<(u32, Vec<usize>)> = pager
        .window()
        .iter()
        .map(|b| (b.index(), b.pages().map(|p| p.len()).collect()))
        .collect();
    let range = pager.save_window_range();
    let flat: Vec<String> = pager.mirror().clone();

    pager.restore_window(range, flat);

    let after: Vec<(u32, Vec<usize>)> = pager
        .window()
        .iter()
        .map(|b| (b.index(), b.pages().map(|p| p.len()).collect()))
        .collect();
    assert_eq!(before, after);
    assert_eq!(pager.save_window_range(), range);
    assert_eq!(pager.mirror().len(), 36);
    assert_eq!(pager.window().total_mirror_span(), 36);
    assert_eq!(pager.mirror()[0], "p0-00");
    assert_eq!(pager.mirror()[35], "p3-05");
}

#[test]
fn snapshot_round_trip_via_value() {
    let mut pager = standard_pager();
    pager.initialize();
    for req in pager.loader_mut().drain() {
        pager.stack_page(
            req.block,
            req.page,
            Some(page_items(req.page, 10)),
            LoadDirection::Forward,
        );
    }

    let snapshot = pager.snapshot();
    assert_eq!(snapshot.range, WindowRange::new(0, 1));
    assert_eq!(snapshot.items.len(), 20);

    let mut restored = standard_pager();
    restored.restore_snapshot(snapshot);
    assert_eq!(restored.save_window_range(), WindowRange::new(0, 1));
    assert_eq!(restored.mirror(), pager.mirror());
}

#[test]
fn mirror_length_matches_window_after_every_operation() {
    let mut pager = standard_pager();
    pager.initialize();
    pager.set_total_pages(100);
    for _ in 0..20 {
        assert_eq!(pager.mirror().len(), pager.window().total_mirror_span());
        assert!(pager.window().len() <= 2);
        scroll_to_end(&mut pager, 100);
    }
    assert_eq!(pager.mirror().len(), 40);
}

mod window_cap_property {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any interleaving of forward/backward idles and (possibly
        /// partial) fetch completions keeps the window at or under
        /// capacity and the mirror length equal to the window span.
        #[test]
        fn window_never_exceeds_capacity(
            ops in proptest::collection::vec(0u8..3, 1..40),
            max_blocks in 1u32..4,
        ) {
            let mut pager = harness_pager(
                PagerConfig::new().with_max_blocks(max_blocks),
                BlockTemplate::new(4, 2),
            );
            pager.initialize();
            pager.set_total_pages(1_000);

            for op in ops {
                match op {
                    0 => {
                        let count = pager.mirror().len();
                        pager.on_scroll_position_changed(
                            count.saturating_sub(4),
                            count.saturating_sub(1),
                            count,
                            1_000,
                        );
                        pager.on_scroll_idle();
                    }
                    1 => {
                        let count = pager.mirror().len();
                        pager.on_scroll_position_changed(0, count.saturating_sub(1), count, 1_000);
                        pager.on_scroll_idle();
                    }
                    _ => {
                        for req in pager.loader_mut().drain() {
                            pager.stack_page(
                                req.block,
                                req.page,
                                Some(page_items(req.page, 4)),
                                LoadDirection::Forward,
                            );
                        }
                    }
                }
                prop_assert!(pager.window().len() <= max_blocks as usize);
                prop_assert_eq!(pager.mirror().len(), pager.window().total_mirror_span());
                prop_assert!(pager.is_idle());
            }
        }
    }
}
