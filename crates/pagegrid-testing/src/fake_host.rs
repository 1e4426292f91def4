//! In-memory host that records every call the engine makes.

use std::collections::BTreeMap;

use pagegrid_foundation::{IntRect, PagerGridHost, ViewHandle, Viewport};
use rustc_hash::FxHashMap;

/// One call made by the engine on the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostCall {
    Materialize { index: usize, handle: ViewHandle },
    Layout { handle: ViewHandle, frame: IntRect },
    Release(ViewHandle),
    ScheduleFrame,
    CancelFrame,
}

/// Host with a fixed item count and viewport, no actual views.
#[derive(Debug)]
pub struct FakeGridHost {
    item_count: usize,
    viewport: Viewport,
    focused: Option<ViewHandle>,
    next_handle: u64,
    /// Live handles and the index each was materialized for.
    live: BTreeMap<ViewHandle, usize>,
    placements: FxHashMap<ViewHandle, IntRect>,
    calls: Vec<HostCall>,
    frame_requested: bool,
}

impl FakeGridHost {
    pub fn new(item_count: usize, viewport: Viewport) -> Self {
        Self {
            item_count,
            viewport,
            focused: None,
            next_handle: 0,
            live: BTreeMap::new(),
            placements: FxHashMap::default(),
            calls: Vec::new(),
            frame_requested: false,
        }
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_focused(&mut self, handle: Option<ViewHandle>) {
        self.focused = handle;
    }

    /// Number of views materialized and not yet released.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Item indices of live views, ascending.
    pub fn live_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.live.values().copied().collect();
        indices.sort_unstable();
        indices
    }

    pub fn handle_of(&self, index: usize) -> Option<ViewHandle> {
        self.live
            .iter()
            .find(|(_, live_index)| **live_index == index)
            .map(|(handle, _)| *handle)
    }

    /// Last frame a live view at `index` was placed at.
    pub fn frame_of(&self, index: usize) -> Option<IntRect> {
        self.handle_of(index)
            .and_then(|handle| self.placements.get(&handle).copied())
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn materialized_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::Materialize { .. }))
            .count()
    }

    pub fn released_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::Release(_)))
            .count()
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Consumes a pending animation frame request.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::replace(&mut self.frame_requested, false)
    }
}

impl PagerGridHost for FakeGridHost {
    fn item_count(&self) -> usize {
        self.item_count
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn materialize_view(&mut self, index: usize) -> ViewHandle {
        self.next_handle += 1;
        let handle = ViewHandle(self.next_handle);
        self.live.insert(handle, index);
        self.calls.push(HostCall::Materialize { index, handle });
        handle
    }

    fn layout_view(&mut self, handle: ViewHandle, frame: IntRect) {
        assert!(
            self.live.contains_key(&handle),
            "layout of released view {:?}",
            handle
        );
        self.placements.insert(handle, frame);
        self.calls.push(HostCall::Layout { handle, frame });
    }

    fn release_view(&mut self, handle: ViewHandle) {
        assert!(
            self.live.remove(&handle).is_some(),
            "double release of {:?}",
            handle
        );
        self.placements.remove(&handle);
        if self.focused == Some(handle) {
            self.focused = None;
        }
        self.calls.push(HostCall::Release(handle));
    }

    fn focused_view(&self) -> Option<ViewHandle> {
        self.focused
    }

    fn schedule_animation_frame(&mut self) {
        self.frame_requested = true;
        self.calls.push(HostCall::ScheduleFrame);
    }

    fn cancel_animation_frame(&mut self) {
        self.frame_requested = false;
        self.calls.push(HostCall::CancelFrame);
    }
}
