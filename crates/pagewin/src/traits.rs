#![forbid(unsafe_code)]

//! Capability interfaces for the pager's collaborators.
//!
//! The pager never talks to a concrete view, list store, or fetch layer;
//! it drives everything through these narrow traits. Supplying a type that
//! lacks a capability is a compile error, so the old "adapter must
//! implement the callback interface" runtime check disappears into the
//! type system.

use std::collections::VecDeque;

/// Change notifications for the scrollable view.
///
/// Mirrors the minimal protocol a list view needs to stay in sync with
/// the flat mirror: range inserts/removals/changes plus a full reset.
/// The pager never reads layout or pixel state through this.
pub trait ViewAdapter {
    /// `count` items were inserted starting at `at`.
    fn on_range_inserted(&mut self, at: usize, count: usize);
    /// `count` items were removed starting at `at`.
    fn on_range_removed(&mut self, at: usize, count: usize);
    /// `count` items starting at `at` changed in place.
    fn on_range_changed(&mut self, at: usize, count: usize);
    /// Everything changed; the mirror now holds `new_len` items.
    fn on_reset(&mut self, new_len: usize);
    /// Number of items the view currently believes it has.
    fn item_count(&self) -> usize;
}

/// The flat, view-facing backing list the pager mutates.
///
/// Owned by the embedding application; the pager only requires random
/// access plus insertion/removal at arbitrary positions. Out-of-bounds
/// operations return `false`/`None` instead of panicking; a write that
/// lands outside current bounds (e.g. after an unrelated clear) is an
/// expected race, handled by dropping it.
pub trait Mirror<T> {
    /// Number of items.
    fn len(&self) -> usize;
    /// Item at position `i`.
    fn get(&self, i: usize) -> Option<&T>;
    /// Insert `value` at position `i`. Fails if `i > len()`.
    fn insert(&mut self, i: usize, value: T) -> bool;
    /// Remove and return the item at position `i`.
    fn remove(&mut self, i: usize) -> Option<T>;
    /// Overwrite the item at position `i`. Fails if out of bounds.
    fn set(&mut self, i: usize, value: T) -> bool;
    /// Remove all items.
    fn clear(&mut self);

    /// True when the mirror holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Mirror<T> for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, i: usize) -> Option<&T> {
        self.as_slice().get(i)
    }

    fn insert(&mut self, i: usize, value: T) -> bool {
        if i > Vec::len(self) {
            return false;
        }
        Vec::insert(self, i, value);
        true
    }

    fn remove(&mut self, i: usize) -> Option<T> {
        if i < Vec::len(self) {
            Some(Vec::remove(self, i))
        } else {
            None
        }
    }

    fn set(&mut self, i: usize, value: T) -> bool {
        match self.get_mut(i) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

impl<T> Mirror<T> for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, i: usize) -> Option<&T> {
        VecDeque::get(self, i)
    }

    fn insert(&mut self, i: usize, value: T) -> bool {
        if i > VecDeque::len(self) {
            return false;
        }
        VecDeque::insert(self, i, value);
        true
    }

    fn remove(&mut self, i: usize) -> Option<T> {
        VecDeque::remove(self, i)
    }

    fn set(&mut self, i: usize, value: T) -> bool {
        match VecDeque::get_mut(self, i) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        VecDeque::clear(self);
    }
}

/// Fire-and-forget page fetch requests.
///
/// The collaborator is responsible for eventually marshaling results back
/// onto the pager's owning sequence and calling
/// [`Pager::stack_page`](crate::Pager::stack_page), possibly late or
/// possibly never. There is no cancellation; requests for blocks that
/// have since been evicted are discarded at write time.
pub trait PageLoader {
    /// The viewport reached the forward edge; fetch `page` for `block`.
    fn on_page_end_reached(&mut self, block: u32, page: u32);
    /// The viewport reached the backward edge; fetch `page` for `block`.
    fn on_page_start_reached(&mut self, block: u32, page: u32);
}

/// Advisory reachability check consulted before dispatching fetches.
///
/// The check runs synchronously on the pager's owning sequence, so
/// implementations should be cheap or cached; embedders that want the
/// original off-thread probe behavior should marshal their idle events
/// accordingly.
pub trait ConnectivityProbe {
    /// Best-effort "is the network reachable right now".
    fn is_online(&self) -> bool;
}

impl<F> ConnectivityProbe for F
where
    F: Fn() -> bool,
{
    fn is_online(&self) -> bool {
        self()
    }
}
