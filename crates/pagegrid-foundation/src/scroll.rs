//! Scroll position and clamping.
//!
//! Only the primary axis scrolls; the other axis is pinned at zero. The
//! offset is kept in integer pixels inside `[0, max_scroll]` after every
//! mutation.

use crate::geometry::Orientation;

/// Phase of the scroller, driven by gestures and animations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollPhase {
    #[default]
    Idle,
    Dragging,
    Settling,
}

/// Scroll offset along the active axis and its upper bound.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrollState {
    offset: i32,
    max_scroll: i32,
    phase: ScrollPhase,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset along the active axis.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn max_scroll(&self) -> i32 {
        self.max_scroll
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == ScrollPhase::Idle
    }

    /// Returns the previous phase.
    pub fn set_phase(&mut self, phase: ScrollPhase) -> ScrollPhase {
        std::mem::replace(&mut self.phase, phase)
    }

    /// Offset split into `(x, y)` for `orientation`.
    pub fn offset_xy(&self, orientation: Orientation) -> (i32, i32) {
        orientation.to_xy(self.offset)
    }

    /// Max scroll split into `(x, y)` for `orientation`.
    pub fn max_scroll_xy(&self, orientation: Orientation) -> (i32, i32) {
        orientation.to_xy(self.max_scroll)
    }

    /// Updates the bound and pulls the offset back inside it.
    pub fn set_max_scroll(&mut self, max_scroll: i32) {
        self.max_scroll = max_scroll.max(0);
        self.offset = self.offset.clamp(0, self.max_scroll);
    }

    /// Replaces bound and offset at once, used when the scroll axis changes.
    pub fn remap(&mut self, offset: i32, max_scroll: i32) {
        self.max_scroll = max_scroll.max(0);
        self.offset = offset.clamp(0, self.max_scroll);
    }

    /// Applies `delta` and returns how much of it was consumed.
    ///
    /// Overshoot past either end is cut off, so the caller can hand the
    /// unconsumed remainder back to its own host.
    pub fn apply_delta(&mut self, delta: i32) -> i32 {
        let target = self.offset.saturating_add(delta);
        let consumed = if target > self.max_scroll {
            self.max_scroll - self.offset
        } else if target < 0 {
            -self.offset
        } else {
            delta
        };
        self.offset += consumed;
        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(offset: i32, max_scroll: i32) -> ScrollState {
        let mut state = ScrollState::new();
        state.set_max_scroll(max_scroll);
        let consumed = state.apply_delta(offset);
        assert_eq!(consumed, offset);
        state
    }

    #[test]
    fn delta_inside_bounds_is_fully_consumed() {
        let mut state = state(100, 500);
        assert_eq!(state.apply_delta(50), 50);
        assert_eq!(state.offset(), 150);
        assert_eq!(state.apply_delta(-150), -150);
        assert_eq!(state.offset(), 0);
    }

    #[test]
    fn overshoot_past_max_is_clamped() {
        let mut state = state(480, 500);
        assert_eq!(state.apply_delta(100), 20);
        assert_eq!(state.offset(), 500);
        assert_eq!(state.apply_delta(1), 0);
    }

    #[test]
    fn overshoot_below_zero_is_clamped() {
        let mut state = state(30, 500);
        assert_eq!(state.apply_delta(-100), -30);
        assert_eq!(state.offset(), 0);
    }

    #[test]
    fn offset_never_leaves_bounds() {
        let mut state = state(0, 700);
        for delta in [350, 900, -20, -2000, 1, i32::MAX, i32::MIN + 1, 0, -1] {
            state.apply_delta(delta);
            assert!((0..=700).contains(&state.offset()), "offset {}", state.offset());
        }
    }

    #[test]
    fn shrinking_max_pulls_offset_back() {
        let mut state = state(400, 500);
        state.set_max_scroll(250);
        assert_eq!(state.offset(), 250);
        state.set_max_scroll(-10);
        assert_eq!(state.max_scroll(), 0);
        assert_eq!(state.offset(), 0);
    }

    #[test]
    fn inactive_axis_stays_zero() {
        let state = state(300, 500);
        assert_eq!(state.offset_xy(Orientation::Horizontal), (300, 0));
        assert_eq!(state.offset_xy(Orientation::Vertical), (0, 300));
        assert_eq!(state.max_scroll_xy(Orientation::Vertical), (0, 500));
    }
}
