//! Paged grid layout manager.
//!
//! [`PagerGridLayoutManager`] owns the scroll state, frame cache and
//! materialized views of one paged grid. The host drives it with layout
//! passes, drag and fling gestures and animation frames, and gets views
//! placed through its [`PagerGridHost`] implementation.
//!
//! All calls happen on the thread that owns the host. Listeners are plain
//! closures that never see the manager, so they cannot start page jumps from
//! inside a callback.

use crate::config::PagerGridConfig;
use crate::error::{ConfigError, PagerGridError};
use crate::geometry::{GridGeometry, ItemFrame, Orientation, Padding};
use crate::lazy::{
    display_rect, FillOutcome, FillPass, ItemRecycler, PagerGridHost, RecyclerStats,
    VirtualizationWindow,
};
use crate::page_change::{ListenerId, PageChangeEmitter, PageChangeRecord};
use crate::paging::{page_index_from_offset, strict_page_index_from_offset, PageArithmetic};
use crate::release::{ReleaseDecision, ReleaseMode, ReleaseTracker};
use crate::scroll::{ScrollPhase, ScrollState};
use crate::smooth_scroll::SmoothScrollDriver;
use crate::snap::{SnapController, SnapView};

pub struct PagerGridLayoutManager {
    config: PagerGridConfig,
    geometry: GridGeometry,
    pages: PageArithmetic,
    scroll: ScrollState,
    emitter: PageChangeEmitter,
    recycler: ItemRecycler,
    snap: SnapController,
    smooth: SmoothScrollDriver,
    release: ReleaseTracker,
    window: VirtualizationWindow,
    settled_page: Option<usize>,
    item_count: usize,
    padding: Padding,
    attached: bool,
}

impl PagerGridLayoutManager {
    /// Creates a manager for `config`, rejecting invalid configurations up
    /// front.
    pub fn new(config: PagerGridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            geometry: GridGeometry::new(
                config.rows,
                config.columns,
                config.orientation,
                config.item_size,
            ),
            pages: PageArithmetic::new(config.page_capacity()),
            scroll: ScrollState::new(),
            emitter: PageChangeEmitter::new(config.selection_policy()),
            recycler: ItemRecycler::new(),
            snap: SnapController::new(config.fling_velocity_threshold),
            smooth: SmoothScrollDriver::new(config.smooth_scroll),
            release: ReleaseTracker::new(config.release),
            window: VirtualizationWindow::EMPTY,
            settled_page: None,
            item_count: 0,
            padding: Padding::default(),
            attached: false,
            config,
        })
    }

    pub fn config(&self) -> &PagerGridConfig {
        &self.config
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn orientation(&self) -> Orientation {
        self.geometry.orientation()
    }

    pub fn page_capacity(&self) -> usize {
        self.pages.capacity()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn offset(&self) -> i32 {
        self.scroll.offset()
    }

    /// Scroll offset as `(x, y)`; the inactive axis is always zero.
    pub fn offset_xy(&self) -> (i32, i32) {
        self.scroll.offset_xy(self.geometry.orientation())
    }

    pub fn max_scroll(&self) -> i32 {
        self.scroll.max_scroll()
    }

    pub fn max_scroll_xy(&self) -> (i32, i32) {
        self.scroll.max_scroll_xy(self.geometry.orientation())
    }

    pub fn scroll_phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    pub fn usable_extent(&self) -> i32 {
        self.geometry.usable_extent()
    }

    pub fn window(&self) -> VirtualizationWindow {
        self.window
    }

    pub fn recycler(&self) -> &ItemRecycler {
        &self.recycler
    }

    pub fn recycler_stats(&self) -> RecyclerStats {
        self.recycler.stats()
    }

    pub fn page_change_record(&self) -> PageChangeRecord {
        self.emitter.record()
    }

    pub fn pending_release(&self) -> Option<ReleaseDecision> {
        self.release.pending()
    }

    pub fn is_animating(&self) -> bool {
        self.smooth.is_running()
    }

    /// Page the scroller last came to rest on. Flings turn one page from
    /// here, whatever was selected while dragging.
    pub fn settled_page(&self) -> Option<usize> {
        self.settled_page
    }

    /// Content frame of the item at `index`.
    pub fn item_frame(&mut self, index: usize) -> ItemFrame {
        self.geometry.frame_for(index)
    }

    // --- Queries ---------------------------------------------------------

    /// Page closest to the current offset.
    pub fn current_page_index(&self) -> usize {
        page_index_from_offset(self.scroll.offset(), self.geometry.usable_extent())
    }

    /// Page being approached: any partial scroll past a page boundary counts
    /// as the next page.
    pub fn approaching_page_index(&self) -> usize {
        strict_page_index_from_offset(self.scroll.offset(), self.geometry.usable_extent())
    }

    pub fn total_page_count(&self) -> usize {
        self.pages.total_page_count(self.item_count)
    }

    /// `(dx, dy)` that brings the page holding `item_index` into place.
    pub fn snap_offset_for(&self, item_index: usize) -> (i32, i32) {
        self.snap
            .compute_snap_vector(&self.geometry, self.pages, &self.scroll, item_index)
    }

    /// View to align when a gesture ends without a fling.
    pub fn find_snap_view(&self, host: &dyn PagerGridHost) -> Option<SnapView> {
        self.snap.find_snap_view(
            host.focused_view(),
            &self.recycler,
            self.pages,
            self.scroll.offset(),
            self.geometry.usable_extent(),
        )
    }

    // --- Listeners -------------------------------------------------------

    pub fn add_page_count_listener(&mut self, listener: impl FnMut(usize) + 'static) -> ListenerId {
        self.emitter.add_page_count_listener(listener)
    }

    pub fn add_page_selected_listener(
        &mut self,
        listener: impl FnMut(usize) + 'static,
    ) -> ListenerId {
        self.emitter.add_page_selected_listener(listener)
    }

    /// Registers a `(page, offset_fraction, offset_pixels)` listener.
    pub fn add_page_scrolled_listener(
        &mut self,
        listener: impl FnMut(usize, f32, i32) + 'static,
    ) -> ListenerId {
        self.emitter.add_page_scrolled_listener(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.emitter.remove_listener(id)
    }

    pub fn set_continuous_selection_during_scroll(&mut self, enabled: bool) {
        self.config.continuous_selection_during_scroll = enabled;
        self.emitter.set_policy(self.config.selection_policy());
    }

    pub fn set_emit_selection_during_scroll(&mut self, enabled: bool) {
        self.config.emit_selection_during_scroll = enabled;
        self.emitter.set_policy(self.config.selection_policy());
    }

    // --- Lifecycle -------------------------------------------------------

    pub fn attach(&mut self) {
        self.attached = true;
        log::debug!(
            "attached {}x{} pager grid ({:?})",
            self.config.rows,
            self.config.columns,
            self.geometry.orientation()
        );
    }

    /// Stops any motion and hands every view back to the host.
    pub fn detach(&mut self, host: &mut dyn PagerGridHost) {
        if self.smooth.cancel().is_some() {
            host.cancel_animation_frame();
        }
        self.release.cancel();
        self.scroll.set_phase(ScrollPhase::Idle);
        let released = self.recycler.release_all(host);
        self.window = VirtualizationWindow::EMPTY;
        self.attached = false;
        log::debug!("detached, released {} views", released);
    }

    /// Full layout pass: re-reads item count and viewport, rebuilds the
    /// window and reports page count and page index.
    pub fn layout(&mut self, host: &mut dyn PagerGridHost) {
        self.item_count = host.item_count();
        let viewport = host.viewport();
        self.padding = viewport.padding;
        if self.geometry.update_viewport(&viewport) {
            log::debug!(
                "viewport changed to {}x{} usable",
                self.geometry.usable_width(),
                self.geometry.usable_height()
            );
        }

        if self.item_count == 0 {
            self.layout_empty(host);
            return;
        }
        if self.geometry.usable_extent() <= 0 {
            log::warn!(
                "usable {:?} extent is zero, no items can be placed",
                self.geometry.orientation()
            );
        }

        let total_pages = self.total_page_count();
        self.scroll.set_max_scroll(
            self.pages
                .max_scroll(self.item_count, self.geometry.usable_extent()),
        );
        self.geometry.ensure_item_size();
        let warm = (2 * self.pages.capacity()).min(self.item_count);
        for index in 0..warm {
            self.geometry.frame_for(index);
        }

        let outcome = self.fill(host, true);
        log::debug!(
            "layout: {} items, {} pages, window {:?}, {} placed",
            self.item_count,
            total_pages,
            self.window.range(),
            outcome.placed.len()
        );

        let scrolling = !self.scroll.is_idle();
        if !scrolling {
            self.settled_page = Some(self.current_page_index());
        }
        self.emitter.set_page_count(total_pages);
        self.emitter
            .set_page_index(self.current_page_index(), scrolling);
    }

    /// Called by the host after the backing items changed.
    pub fn on_items_changed(&mut self, host: &mut dyn PagerGridHost) {
        self.layout(host);
    }

    fn layout_empty(&mut self, host: &mut dyn PagerGridHost) {
        if self.smooth.cancel().is_some() {
            host.cancel_animation_frame();
        }
        self.release.cancel();
        self.scroll.set_phase(ScrollPhase::Idle);
        self.scroll.set_max_scroll(0);
        self.recycler.release_all(host);
        self.window = VirtualizationWindow::EMPTY;
        self.settled_page = None;
        if self.emitter.last_page_count() != Some(0) {
            self.emitter.reset_selection();
        }
        self.emitter.set_page_count(0);
        self.emitter.set_page_index(0, false);
        log::debug!("layout: no items");
    }

    fn fill(&mut self, host: &mut dyn PagerGridHost, forward: bool) -> FillOutcome {
        let orientation = self.geometry.orientation();
        let offset = self.scroll.offset_xy(orientation);
        let usable = (self.geometry.usable_width(), self.geometry.usable_height());
        let item_size = self.geometry.item_size();
        self.window = VirtualizationWindow::around_page(
            self.current_page_index(),
            self.pages.capacity(),
            self.item_count,
            self.config.beyond_bounds_page_count,
        );
        let pass = FillPass {
            offset,
            padding: self.padding,
            display_rect: display_rect(
                offset,
                item_size,
                usable,
                self.scroll.max_scroll_xy(orientation),
            ),
            window: self.window,
            forward,
        };
        self.recycler
            .recycle_and_fill(host, &mut self.geometry, &pass)
    }

    // --- Scrolling -------------------------------------------------------

    /// Scrolls by `delta` pixels along the active axis and returns the part
    /// that was consumed before hitting either end.
    pub fn scroll_by(&mut self, host: &mut dyn PagerGridHost, delta: i32) -> i32 {
        let consumed = self.scroll.apply_delta(delta);
        log::trace!(
            "scroll by {} consumed {}, offset {}",
            delta,
            consumed,
            self.scroll.offset()
        );
        self.emitter.set_page_index(self.current_page_index(), true);
        if consumed != 0 {
            self.dispatch_page_scrolled(consumed);
        }
        if self.item_count > 0 {
            self.fill(host, consumed > 0);
        }
        consumed
    }

    fn dispatch_page_scrolled(&mut self, consumed: i32) {
        let extent = self.geometry.usable_extent();
        if extent <= 0 {
            return;
        }
        let offset = self.scroll.offset();
        let page = offset / extent;
        let pixels = offset - page * extent;
        let mut fraction = pixels as f32 / extent as f32;
        if consumed < 0 {
            fraction = -fraction;
        }
        self.emitter.page_scrolled(page as usize, fraction, pixels);
    }

    /// Touch down: interrupts any animation or pending release.
    pub fn begin_drag(&mut self, host: &mut dyn PagerGridHost) {
        if self.smooth.cancel().is_some() {
            host.cancel_animation_frame();
            log::debug!("smooth scroll interrupted by drag");
        }
        if self.release.begin_drag(self.approaching_page_index()) {
            log::debug!("pending release cancelled by drag");
        }
        self.scroll.set_phase(ScrollPhase::Dragging);
    }

    pub fn drag_by(&mut self, host: &mut dyn PagerGridHost, delta: i32) -> i32 {
        if self.scroll.phase() != ScrollPhase::Dragging {
            self.begin_drag(host);
        }
        let consumed = self.scroll_by(host, delta);
        self.release.record_drag(consumed);
        consumed
    }

    /// Touch up with the release `velocity` along the scroll axis, positive
    /// toward increasing offset.
    ///
    /// A fling above the threshold starts settling at once. Otherwise the
    /// settle page is decided now and committed by [`Self::poll_release`]
    /// after the configured delay.
    pub fn end_drag(
        &mut self,
        host: &mut dyn PagerGridHost,
        velocity: i32,
        now_ms: u64,
    ) -> Option<ReleaseDecision> {
        if self.scroll.phase() != ScrollPhase::Dragging {
            return None;
        }
        if self.on_fling(host, velocity) {
            return None;
        }
        let total_pages = self.total_page_count();
        if total_pages == 0 || self.is_tap_on_page_origin() {
            self.enter_idle();
            return None;
        }

        let nearest = match self.config.release.mode {
            ReleaseMode::NearestPage => self
                .find_snap_view(host)
                .map(|view| self.pages.page_index_from_item(view.index))
                .unwrap_or_else(|| self.current_page_index()),
            ReleaseMode::TouchSlop(_) => self.current_page_index(),
        };
        let decision = self.release.release(now_ms, nearest, total_pages);
        log::debug!(
            "release after {}px drag from page {}: {:?}",
            self.release.drag_distance(),
            self.release.drag_start_page(),
            decision
        );
        self.scroll.set_phase(ScrollPhase::Settling);
        if self.config.release.delay_ms == 0 {
            self.poll_release(host, now_ms);
        }
        Some(decision)
    }

    /// A release that never moved the content off a page origin has nothing
    /// to settle.
    fn is_tap_on_page_origin(&self) -> bool {
        if self.release.drag_distance() != 0 {
            return false;
        }
        let first_index = self.pages.first_index_of_page(self.current_page_index());
        self.snap_offset_for(first_index) == (0, 0)
    }

    /// Commits a pending release once its delay has passed.
    pub fn poll_release(
        &mut self,
        host: &mut dyn PagerGridHost,
        now_ms: u64,
    ) -> Option<ReleaseDecision> {
        let decision = self.release.poll(now_ms)?;
        self.settle_on_page(host, decision.page);
        Some(decision)
    }

    /// Fling with `velocity` along the scroll axis. Returns `true` if it was
    /// strong enough to pick a target page.
    pub fn on_fling(&mut self, host: &mut dyn PagerGridHost, velocity: i32) -> bool {
        let Some(target) = self.snap.find_target_snap_position(
            velocity,
            self.settled_page,
            self.total_page_count(),
            self.pages,
        ) else {
            return false;
        };
        log::debug!("fling at {}px/s targets page {}", velocity, target.page);
        self.release.cancel();
        self.settle_on_page(host, target.page);
        true
    }

    fn settle_on_page(&mut self, host: &mut dyn PagerGridHost, page: usize) {
        let (dx, dy) = self.snap_offset_for(self.pages.first_index_of_page(page));
        let distance = self.geometry.orientation().primary(dx, dy);
        if distance == 0 {
            self.smooth.cancel();
            self.enter_idle();
            return;
        }
        self.smooth.start(page, distance);
        self.scroll.set_phase(ScrollPhase::Settling);
        host.schedule_animation_frame();
    }

    /// Advances the smooth scroll. Returns `true` while more frames are
    /// needed.
    pub fn on_animation_frame(
        &mut self,
        host: &mut dyn PagerGridHost,
        frame_time_nanos: u64,
    ) -> bool {
        let Some(step) = self.smooth.advance(frame_time_nanos) else {
            return false;
        };
        if step.delta != 0 {
            self.scroll_by(host, step.delta);
        }
        if step.finished {
            log::debug!("smooth scroll finished at offset {}", self.scroll.offset());
            self.enter_idle();
            false
        } else {
            host.schedule_animation_frame();
            true
        }
    }

    /// Abandons the running animation where it is.
    pub fn cancel_animation(&mut self, host: &mut dyn PagerGridHost) {
        if self.smooth.cancel().is_some() {
            host.cancel_animation_frame();
            self.enter_idle();
        }
    }

    fn enter_idle(&mut self) {
        self.scroll.set_phase(ScrollPhase::Idle);
        self.settled_page = Some(self.current_page_index());
        self.emitter
            .set_page_index(self.current_page_index(), false);
    }

    /// Switches the scroll axis, keeping the viewport on the same page.
    pub fn set_orientation(
        &mut self,
        host: &mut dyn PagerGridHost,
        orientation: Orientation,
    ) -> Result<(), PagerGridError> {
        let current = self.geometry.orientation();
        if orientation == current {
            return Ok(());
        }
        if !self.scroll.is_idle() || self.smooth.is_running() {
            let err = PagerGridError::OrientationChangeWhileScrolling(self.scroll.phase());
            log::warn!("{}", err);
            return Err(err);
        }
        let old_extent = self.geometry.usable_extent();
        if old_extent <= 0 {
            let err = PagerGridError::ZeroUsableExtent(current);
            log::warn!("{}", err);
            return Err(err);
        }
        let new_extent = match orientation {
            Orientation::Horizontal => self.geometry.usable_width(),
            Orientation::Vertical => self.geometry.usable_height(),
        };

        let offset = self.scroll.offset() / old_extent * new_extent;
        let max_scroll = self.scroll.max_scroll() / old_extent * new_extent;
        self.geometry.set_orientation(orientation);
        self.config.orientation = orientation;
        self.scroll.remap(offset, max_scroll);
        log::debug!("orientation switched to {:?}, offset {}", orientation, offset);

        if self.attached {
            self.layout(host);
        }
        Ok(())
    }

    // --- Page commands ---------------------------------------------------

    /// Jumps straight to `page`.
    pub fn go_to_page(
        &mut self,
        host: &mut dyn PagerGridHost,
        page: usize,
    ) -> Result<(), PagerGridError> {
        self.scroll_to_page(host, page as i64)
    }

    pub fn next_page(&mut self, host: &mut dyn PagerGridHost) -> Result<(), PagerGridError> {
        self.scroll_to_page(host, self.current_page_index() as i64 + 1)
    }

    pub fn previous_page(&mut self, host: &mut dyn PagerGridHost) -> Result<(), PagerGridError> {
        self.scroll_to_page(host, self.current_page_index() as i64 - 1)
    }

    /// Jumps to the page holding item `index`.
    pub fn scroll_to_position(
        &mut self,
        host: &mut dyn PagerGridHost,
        index: usize,
    ) -> Result<(), PagerGridError> {
        self.scroll_to_page(host, self.pages.page_index_from_item(index) as i64)
    }

    /// Animates to `page`, jumping first when it is far away.
    pub fn smooth_go_to_page(
        &mut self,
        host: &mut dyn PagerGridHost,
        page: usize,
    ) -> Result<(), PagerGridError> {
        self.smooth_scroll_to_page(host, page as i64)
    }

    pub fn smooth_next_page(
        &mut self,
        host: &mut dyn PagerGridHost,
    ) -> Result<(), PagerGridError> {
        self.smooth_scroll_to_page(host, self.current_page_index() as i64 + 1)
    }

    pub fn smooth_previous_page(
        &mut self,
        host: &mut dyn PagerGridHost,
    ) -> Result<(), PagerGridError> {
        self.smooth_scroll_to_page(host, self.current_page_index() as i64 - 1)
    }

    pub fn smooth_scroll_to_position(
        &mut self,
        host: &mut dyn PagerGridHost,
        index: usize,
    ) -> Result<(), PagerGridError> {
        self.smooth_scroll_to_page(host, self.pages.page_index_from_item(index) as i64)
    }

    fn scroll_to_page(
        &mut self,
        host: &mut dyn PagerGridHost,
        page: i64,
    ) -> Result<(), PagerGridError> {
        let page = self.check_page_command(page)?;
        self.jump_to_page(host, page);
        Ok(())
    }

    fn smooth_scroll_to_page(
        &mut self,
        host: &mut dyn PagerGridHost,
        page: i64,
    ) -> Result<(), PagerGridError> {
        let page = self.check_page_command(page)?;
        if let Some(jump) = self.smooth.jump_page(self.current_page_index(), page) {
            log::debug!("page {} is far away, jumping to page {} first", page, jump);
            self.jump_to_page(host, jump);
        }
        self.settle_on_page(host, page);
        Ok(())
    }

    fn jump_to_page(&mut self, host: &mut dyn PagerGridHost, page: usize) {
        let (dx, dy) = self.snap_offset_for(self.pages.first_index_of_page(page));
        self.scroll_by(host, self.geometry.orientation().primary(dx, dy));
        self.settled_page = Some(page);
        self.emitter.set_page_index(page, false);
    }

    /// Validates a programmatic page command without touching any state.
    fn check_page_command(&self, page: i64) -> Result<usize, PagerGridError> {
        let page_count = self.emitter.last_page_count().unwrap_or(0);
        let err = if page < 0 || page >= page_count as i64 {
            PagerGridError::PageOutOfBounds { page, page_count }
        } else if !self.attached {
            PagerGridError::NotAttached
        } else if !self.scroll.is_idle() {
            PagerGridError::NotIdle(self.scroll.phase())
        } else {
            return Ok(page as usize);
        };
        log::error!("{}", err);
        Err(err)
    }
}

impl std::fmt::Debug for PagerGridLayoutManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagerGridLayoutManager")
            .field("config", &self.config)
            .field("item_count", &self.item_count)
            .field("scroll", &self.scroll)
            .field("window", &self.window)
            .field("settled_page", &self.settled_page)
            .field("record", &self.emitter.record())
            .field("attached", &self.attached)
            .finish()
    }
}
