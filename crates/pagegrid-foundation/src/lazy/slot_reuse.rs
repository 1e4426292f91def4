//! View recycling for paged grids.
//!
//! Every fill pass follows a scrap model: all attached views are detached
//! into a scrap list, each index of the window is re-evaluated against the
//! display rectangle, and views that are still needed are taken back out of
//! the scrap and re-placed. Whatever is left in the scrap afterwards is
//! released to the host.

use indexmap::IndexMap;
use smallvec::SmallVec;

use super::item_provider::{PagerGridHost, ViewHandle};
use super::window::VirtualizationWindow;
use crate::geometry::{GridGeometry, IntRect, Padding};

/// Statistics about the materialized views.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecyclerStats {
    /// Views attached after the last pass.
    pub items_in_use: usize,
    /// Views ever requested from the host.
    pub total_materialized: usize,
    /// Times a view was kept across a pass instead of being re-materialized.
    pub reused: usize,
    /// Views handed back to the host.
    pub released: usize,
}

/// Inputs of one fill pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillPass {
    /// Scroll offset as `(x, y)`.
    pub offset: (i32, i32),
    pub padding: Padding,
    pub display_rect: IntRect,
    pub window: VirtualizationWindow,
    /// Walk the window from `start` to `stop` when `true`.
    pub forward: bool,
}

/// Indices touched by a fill pass, in the order they were handled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FillOutcome {
    pub placed: SmallVec<[usize; 16]>,
    pub released: SmallVec<[usize; 8]>,
}

/// Tracks the views currently attached to the grid, in placement order.
#[derive(Debug, Default)]
pub struct ItemRecycler {
    attached: IndexMap<usize, ViewHandle>,
    stats: RecyclerStats,
}

impl ItemRecycler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    pub fn is_attached(&self, index: usize) -> bool {
        self.attached.contains_key(&index)
    }

    pub fn handle_for(&self, index: usize) -> Option<ViewHandle> {
        self.attached.get(&index).copied()
    }

    /// Item index a handle is currently bound to.
    pub fn index_of(&self, handle: ViewHandle) -> Option<usize> {
        self.attached
            .iter()
            .find(|(_, attached)| **attached == handle)
            .map(|(index, _)| *index)
    }

    /// First view placed by the last pass.
    pub fn first_attached(&self) -> Option<(usize, ViewHandle)> {
        self.attached.first().map(|(index, handle)| (*index, *handle))
    }

    pub fn stats(&self) -> RecyclerStats {
        RecyclerStats {
            items_in_use: self.attached.len(),
            ..self.stats
        }
    }

    /// Runs one pass over `pass.window`, placing every item whose frame meets
    /// the display rectangle and releasing everything else.
    pub fn recycle_and_fill(
        &mut self,
        host: &mut dyn PagerGridHost,
        geometry: &mut GridGeometry,
        pass: &FillPass,
    ) -> FillOutcome {
        let mut scrap = std::mem::take(&mut self.attached);
        let mut outcome = FillOutcome::default();
        let (offset_x, offset_y) = pass.offset;

        for step in 0..pass.window.len() {
            let index = pass.window.index_at(step, pass.forward);
            let frame = geometry.frame_for(index).rect();
            if !pass.display_rect.intersects(&frame) {
                if let Some(handle) = scrap.shift_remove(&index) {
                    host.release_view(handle);
                    self.stats.released += 1;
                    outcome.released.push(index);
                }
                continue;
            }

            let handle = match scrap.shift_remove(&index) {
                Some(handle) => {
                    self.stats.reused += 1;
                    handle
                }
                None => {
                    self.stats.total_materialized += 1;
                    host.materialize_view(index)
                }
            };
            let placed = frame.translate(
                pass.padding.left - offset_x,
                pass.padding.top - offset_y,
            );
            host.layout_view(handle, placed);
            self.attached.insert(index, handle);
            outcome.placed.push(index);
        }

        for (index, handle) in scrap {
            host.release_view(handle);
            self.stats.released += 1;
            outcome.released.push(index);
        }

        log::trace!(
            "fill pass {:?}: placed {}, released {}",
            pass.window.range(),
            outcome.placed.len(),
            outcome.released.len()
        );
        outcome
    }

    /// Releases every attached view, e.g. when the item set is emptied or
    /// the engine is detached.
    pub fn release_all(&mut self, host: &mut dyn PagerGridHost) -> usize {
        let count = self.attached.len();
        for (_, handle) in self.attached.drain(..) {
            host.release_view(handle);
        }
        self.stats.released += count;
        count
    }
}
