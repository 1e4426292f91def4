use std::cell::RefCell;
use std::rc::Rc;

use pagegrid_foundation::{
    ConfigError, PageEvent, PagerGridConfig, PagerGridLayoutManager, ReleaseDecision, Viewport,
};

use crate::fake_host::FakeGridHost;

/// Frame interval used when pumping animations.
pub const FRAME_INTERVAL_NANOS: u64 = 16_000_000;

const MAX_ANIMATION_FRAMES: usize = 1_000;

/// Drives a [`PagerGridLayoutManager`] against a [`FakeGridHost`] with a
/// virtual clock, recording every page event.
pub struct PagerTestRule {
    manager: PagerGridLayoutManager,
    host: FakeGridHost,
    events: Rc<RefCell<Vec<PageEvent>>>,
    now_ms: u64,
    frame_time_nanos: u64,
}

impl PagerTestRule {
    /// Builds an attached manager and runs the first layout pass.
    pub fn new(
        config: PagerGridConfig,
        item_count: usize,
        viewport: Viewport,
    ) -> Result<Self, ConfigError> {
        let mut manager = PagerGridLayoutManager::new(config)?;
        let events = Rc::new(RefCell::new(Vec::new()));

        let sink = events.clone();
        manager.add_page_count_listener(move |count| {
            sink.borrow_mut().push(PageEvent::CountChanged(count))
        });
        let sink = events.clone();
        manager.add_page_selected_listener(move |page| {
            sink.borrow_mut().push(PageEvent::Selected(page))
        });
        let sink = events.clone();
        manager.add_page_scrolled_listener(move |page, offset_fraction, offset_pixels| {
            sink.borrow_mut().push(PageEvent::Scrolled {
                page,
                offset_fraction,
                offset_pixels,
            })
        });

        let mut host = FakeGridHost::new(item_count, viewport);
        manager.attach();
        manager.layout(&mut host);
        Ok(Self {
            manager,
            host,
            events,
            now_ms: 0,
            frame_time_nanos: 0,
        })
    }

    pub fn manager(&self) -> &PagerGridLayoutManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut PagerGridLayoutManager {
        &mut self.manager
    }

    pub fn host(&self) -> &FakeGridHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut FakeGridHost {
        &mut self.host
    }

    /// Both halves at once, for calling manager commands directly.
    pub fn split(&mut self) -> (&mut PagerGridLayoutManager, &mut FakeGridHost) {
        (&mut self.manager, &mut self.host)
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.events.borrow().clone()
    }

    pub fn take_events(&mut self) -> Vec<PageEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Page count and page selected events, without scroll progress.
    pub fn page_events(&self) -> Vec<PageEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|event| !matches!(event, PageEvent::Scrolled { .. }))
            .copied()
            .collect()
    }

    pub fn selected_pages(&self) -> Vec<usize> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                PageEvent::Selected(page) => Some(*page),
                _ => None,
            })
            .collect()
    }

    pub fn layout(&mut self) {
        self.manager.layout(&mut self.host);
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        self.host.set_item_count(item_count);
        self.manager.on_items_changed(&mut self.host);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.host.set_viewport(viewport);
        self.manager.layout(&mut self.host);
    }

    /// Touches down and drags through `deltas`, returning the total consumed.
    pub fn drag(&mut self, deltas: &[i32]) -> i32 {
        self.manager.begin_drag(&mut self.host);
        deltas
            .iter()
            .map(|delta| self.manager.drag_by(&mut self.host, *delta))
            .sum()
    }

    /// Lifts the finger with `velocity` at the current virtual time.
    pub fn release(&mut self, velocity: i32) -> Option<ReleaseDecision> {
        self.manager.end_drag(&mut self.host, velocity, self.now_ms)
    }

    /// Moves the virtual clock and commits a due release, if any.
    pub fn advance_time(&mut self, millis: u64) -> Option<ReleaseDecision> {
        self.now_ms += millis;
        self.manager.poll_release(&mut self.host, self.now_ms)
    }

    /// Delivers animation frames until the manager stops asking for them.
    /// Returns the number of frames delivered.
    pub fn run_animation(&mut self) -> usize {
        let mut frames = 0;
        while self.host.take_frame_request() {
            self.manager
                .on_animation_frame(&mut self.host, self.frame_time_nanos);
            self.frame_time_nanos += FRAME_INTERVAL_NANOS;
            frames += 1;
            assert!(
                frames < MAX_ANIMATION_FRAMES,
                "animation failed to settle after {} frames",
                MAX_ANIMATION_FRAMES
            );
        }
        log::trace!("animation settled after {} frames", frames);
        frames
    }

    /// Delivers at most `frames` animation frames.
    pub fn run_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            if !self.host.take_frame_request() {
                return;
            }
            self.manager
                .on_animation_frame(&mut self.host, self.frame_time_nanos);
            self.frame_time_nanos += FRAME_INTERVAL_NANOS;
        }
    }

    /// Drag, release, wait out the release delay and finish any animation.
    pub fn swipe(&mut self, deltas: &[i32], velocity: i32) -> Option<ReleaseDecision> {
        self.drag(deltas);
        let decision = self.release(velocity);
        let delay = self.manager.config().release.delay_ms;
        self.advance_time(delay);
        self.run_animation();
        decision
    }
}
