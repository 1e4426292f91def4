//! Debounced page change notifications.
//!
//! Page count and page selection are tracked separately and each callback
//! kind has its own de-duplication state. Selection has two independent
//! toggles:
//! - `continuous_during_scroll` decides whether the tracked page index
//!   follows the viewport while a drag or fling is in progress, or only
//!   updates once the scroller is at rest.
//! - `emit_during_scroll` decides whether "page selected" callbacks fire
//!   while scrolling at all.

use smallvec::SmallVec;

/// Identifier returned when registering a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Notification kinds raised by the emitter, in a form convenient for
/// recording.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageEvent {
    CountChanged(usize),
    Selected(usize),
    Scrolled {
        page: usize,
        offset_fraction: f32,
        offset_pixels: i32,
    },
}

/// Last page count and page index seen by the emitter. `None` means no page
/// has been reported yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageChangeRecord {
    pub last_page_count: Option<usize>,
    pub last_page_index: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub continuous_during_scroll: bool,
    pub emit_during_scroll: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            continuous_during_scroll: true,
            emit_during_scroll: true,
        }
    }
}

type CountListener = Box<dyn FnMut(usize)>;
type SelectedListener = Box<dyn FnMut(usize)>;
type ScrolledListener = Box<dyn FnMut(usize, f32, i32)>;

pub struct PageChangeEmitter {
    record: PageChangeRecord,
    /// Last index handed to "page selected" listeners.
    last_selected_emitted: Option<usize>,
    policy: SelectionPolicy,
    count_listeners: SmallVec<[(ListenerId, CountListener); 2]>,
    selected_listeners: SmallVec<[(ListenerId, SelectedListener); 2]>,
    scrolled_listeners: SmallVec<[(ListenerId, ScrolledListener); 2]>,
    next_listener_id: u64,
}

impl PageChangeEmitter {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            record: PageChangeRecord::default(),
            last_selected_emitted: None,
            policy,
            count_listeners: SmallVec::new(),
            selected_listeners: SmallVec::new(),
            scrolled_listeners: SmallVec::new(),
            next_listener_id: 1,
        }
    }

    pub fn record(&self) -> PageChangeRecord {
        self.record
    }

    pub fn last_page_count(&self) -> Option<usize> {
        self.record.last_page_count
    }

    /// Page index the emitter currently considers settled.
    pub fn last_page_index(&self) -> Option<usize> {
        self.record.last_page_index
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: SelectionPolicy) {
        self.policy = policy;
    }

    pub fn add_page_count_listener(&mut self, listener: impl FnMut(usize) + 'static) -> ListenerId {
        let id = self.allocate_id();
        self.count_listeners.push((id, Box::new(listener)));
        id
    }

    pub fn add_page_selected_listener(
        &mut self,
        listener: impl FnMut(usize) + 'static,
    ) -> ListenerId {
        let id = self.allocate_id();
        self.selected_listeners.push((id, Box::new(listener)));
        id
    }

    /// Registers a `(page, offset_fraction, offset_pixels)` listener.
    pub fn add_page_scrolled_listener(
        &mut self,
        listener: impl FnMut(usize, f32, i32) + 'static,
    ) -> ListenerId {
        let id = self.allocate_id();
        self.scrolled_listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener of any kind. Returns `false` for unknown ids.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listener_count();
        self.count_listeners.retain(|(listener_id, _)| *listener_id != id);
        self.selected_listeners.retain(|(listener_id, _)| *listener_id != id);
        self.scrolled_listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listener_count() != before
    }

    pub fn listener_count(&self) -> usize {
        self.count_listeners.len() + self.selected_listeners.len() + self.scrolled_listeners.len()
    }

    /// Records the page count, notifying listeners if it changed.
    pub fn set_page_count(&mut self, page_count: usize) -> bool {
        let changed = self.record.last_page_count != Some(page_count);
        self.record.last_page_count = Some(page_count);
        if changed {
            log::debug!("page count changed to {}", page_count);
            for (_, listener) in self.count_listeners.iter_mut() {
                listener(page_count);
            }
        }
        changed
    }

    /// Records the selected page. Returns `true` if listeners were notified.
    pub fn set_page_index(&mut self, page_index: usize, is_scrolling: bool) -> bool {
        let tracked = Some(page_index);
        if self.record.last_page_index == tracked && self.last_selected_emitted == tracked {
            return false;
        }
        if self.policy.continuous_during_scroll || !is_scrolling {
            self.record.last_page_index = tracked;
        }
        if is_scrolling && !self.policy.emit_during_scroll {
            return false;
        }
        if self.last_selected_emitted == tracked {
            return false;
        }
        self.last_selected_emitted = tracked;
        log::debug!("page {} selected (scrolling: {})", page_index, is_scrolling);
        for (_, listener) in self.selected_listeners.iter_mut() {
            listener(page_index);
        }
        true
    }

    pub fn page_scrolled(&mut self, page: usize, offset_fraction: f32, offset_pixels: i32) {
        for (_, listener) in self.scrolled_listeners.iter_mut() {
            listener(page, offset_fraction, offset_pixels);
        }
    }

    /// Forgets the selected page, so the next `set_page_index` reports again.
    /// Used when the item set is emptied.
    pub fn reset_selection(&mut self) {
        self.record.last_page_index = None;
        self.last_selected_emitted = None;
    }

    fn allocate_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        id
    }
}

impl Default for PageChangeEmitter {
    fn default() -> Self {
        Self::new(SelectionPolicy::default())
    }
}

impl std::fmt::Debug for PageChangeEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageChangeEmitter")
            .field("record", &self.record)
            .field("last_selected_emitted", &self.last_selected_emitted)
            .field("policy", &self.policy)
            .field("listeners", &self.listener_count())
            .finish()
    }
}
