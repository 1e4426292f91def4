//! Materialization window and display area.

use std::ops::Range;

use crate::geometry::{IntRect, ItemSize};

/// Number of pages kept materialized on the leading side of the current page.
pub const DEFAULT_BEYOND_BOUNDS_PAGE_COUNT: usize = 2;

/// Contiguous item range kept materialized around the current page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VirtualizationWindow {
    pub start: usize,
    pub stop: usize,
}

impl VirtualizationWindow {
    pub const EMPTY: VirtualizationWindow = VirtualizationWindow { start: 0, stop: 0 };

    /// Window starting `beyond_bounds_pages` pages before `page` and spanning
    /// twice that many pages, cut off at `item_count`.
    ///
    /// With the default of two pages this covers the two previous pages, the
    /// current page and the next one.
    pub fn around_page(
        page: usize,
        capacity: usize,
        item_count: usize,
        beyond_bounds_pages: usize,
    ) -> Self {
        let lead = capacity.saturating_mul(beyond_bounds_pages);
        let span = capacity.saturating_mul((2 * beyond_bounds_pages).max(1));
        let start = page.saturating_mul(capacity).saturating_sub(lead);
        let stop = start.saturating_add(span).min(item_count);
        Self {
            start: start.min(stop),
            stop,
        }
    }

    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.stop <= self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.stop).contains(&index)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.stop
    }

    /// Index visited at `step` when walking the window forward or backward.
    pub(crate) fn index_at(&self, step: usize, forward: bool) -> usize {
        if forward {
            self.start + step
        } else {
            self.stop - 1 - step
        }
    }
}

/// Visible area grown by one item on every side, clipped to the scrollable
/// content bounds. Returned in content coordinates.
///
/// An empty rectangle comes back when the two do not overlap, e.g. for a
/// zero-sized viewport.
pub fn display_rect(
    offset: (i32, i32),
    item_size: ItemSize,
    usable: (i32, i32),
    max_scroll: (i32, i32),
) -> IntRect {
    let (offset_x, offset_y) = offset;
    let (usable_width, usable_height) = usable;
    let mut rect = IntRect::new(
        offset_x - item_size.width,
        offset_y - item_size.height,
        offset_x + usable_width + item_size.width,
        offset_y + usable_height + item_size.height,
    );
    let bounds = IntRect::new(
        0,
        0,
        max_scroll.0 + usable_width,
        max_scroll.1 + usable_height,
    );
    if rect.intersect(&bounds) {
        rect
    } else {
        IntRect::default()
    }
}
