//! Page snapping.
//!
//! Decides which page a gesture settles on and how far the viewport has to
//! travel to get there.

use crate::geometry::GridGeometry;
use crate::lazy::{ItemRecycler, ViewHandle};
use crate::paging::{page_index_from_offset, PageArithmetic};
use crate::scroll::ScrollState;

/// Fling velocity, in pixels per second, needed to turn a page.
pub const DEFAULT_FLING_VELOCITY_THRESHOLD: i32 = 1000;

/// Page a gesture should settle on, identified by its first item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapTarget {
    pub page: usize,
    pub index: usize,
}

impl SnapTarget {
    pub fn for_page(page: usize, pages: PageArithmetic) -> Self {
        Self {
            page,
            index: pages.first_index_of_page(page),
        }
    }
}

/// Materialized view chosen as the snap anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapView {
    pub index: usize,
    pub handle: ViewHandle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapController {
    fling_velocity_threshold: i32,
}

impl Default for SnapController {
    fn default() -> Self {
        Self::new(DEFAULT_FLING_VELOCITY_THRESHOLD)
    }
}

impl SnapController {
    pub fn new(fling_velocity_threshold: i32) -> Self {
        Self {
            fling_velocity_threshold,
        }
    }

    pub fn fling_velocity_threshold(&self) -> i32 {
        self.fling_velocity_threshold
    }

    /// Whether `velocity` along the scroll axis is strong enough to turn a
    /// page on its own.
    pub fn is_fling(&self, velocity: i32) -> bool {
        velocity > self.fling_velocity_threshold || velocity < -self.fling_velocity_threshold
    }

    /// `(dx, dy)` that moves the viewport from its current offset onto the
    /// origin of the page holding `target_index`.
    pub fn compute_snap_vector(
        &self,
        geometry: &GridGeometry,
        pages: PageArithmetic,
        scroll: &ScrollState,
        target_index: usize,
    ) -> (i32, i32) {
        let page = pages.page_index_from_item(target_index);
        let (origin_x, origin_y) = geometry.page_origin(page);
        let (offset_x, offset_y) = scroll.offset_xy(geometry.orientation());
        (origin_x - offset_x, origin_y - offset_y)
    }

    /// Page a fling lands on, relative to the last settled page.
    ///
    /// Returns `None` when the velocity is under the threshold (the caller
    /// then falls back to the nearest page) or there are no pages.
    pub fn find_target_snap_position(
        &self,
        velocity: i32,
        last_settled_page: Option<usize>,
        total_pages: usize,
        pages: PageArithmetic,
    ) -> Option<SnapTarget> {
        if total_pages == 0 {
            return None;
        }
        if !self.is_fling(velocity) {
            return None;
        }
        let last_page = total_pages - 1;
        let page = if velocity > 0 {
            last_settled_page.map_or(0, |page| page + 1).min(last_page)
        } else {
            last_settled_page
                .map_or(0, |page| page.saturating_sub(1))
                .min(last_page)
        };
        Some(SnapTarget::for_page(page, pages))
    }

    /// View to align after a gesture: the focused view, then the first item
    /// of the nearest page, then whatever was placed first.
    pub fn find_snap_view(
        &self,
        focused: Option<ViewHandle>,
        recycler: &ItemRecycler,
        pages: PageArithmetic,
        offset: i32,
        extent: i32,
    ) -> Option<SnapView> {
        if let Some(handle) = focused {
            if let Some(index) = recycler.index_of(handle) {
                return Some(SnapView { index, handle });
            }
        }
        let index = pages.first_index_of_page(page_index_from_offset(offset, extent));
        if let Some(handle) = recycler.handle_for(index) {
            return Some(SnapView { index, handle });
        }
        recycler
            .first_attached()
            .map(|(index, handle)| SnapView { index, handle })
    }
}
