//! Host interface for paged grid layouts.
//!
//! This module defines the [`PagerGridHost`] trait, the side of the engine
//! that a concrete view system implements. The engine never creates or draws
//! views itself; it asks the host to materialize, place and release them.

use crate::geometry::{IntRect, Viewport};

/// Opaque handle to a view owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewHandle(pub u64);

impl ViewHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// View system adapter consumed by the paged grid engine.
///
/// Every method is called from the thread that owns the engine. Callbacks
/// must not call back into the engine.
pub trait PagerGridHost {
    /// Number of items currently backing the grid.
    fn item_count(&self) -> usize;

    /// Current viewport size and padding.
    fn viewport(&self) -> Viewport;

    /// Creates (or pulls from the host's own pool) a view bound to `index`.
    fn materialize_view(&mut self, index: usize) -> ViewHandle;

    /// Places a view at `frame`, in viewport coordinates.
    fn layout_view(&mut self, handle: ViewHandle, frame: IntRect);

    /// Hands a view back to the host. The handle is not used again.
    fn release_view(&mut self, handle: ViewHandle);

    /// The view holding input focus, if any.
    fn focused_view(&self) -> Option<ViewHandle> {
        None
    }

    /// Requests a call to `on_animation_frame` on the next frame.
    fn schedule_animation_frame(&mut self);

    /// Drops any pending animation frame request.
    fn cancel_animation_frame(&mut self);
}
