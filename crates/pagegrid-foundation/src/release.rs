//! Drag release decisions.
//!
//! When a drag ends without a fling, the page to settle on is decided right
//! away but only committed after a short delay. A new drag inside that delay
//! cancels the pending decision, so quick back-and-forth gestures do not
//! start a settle animation that is immediately interrupted.

/// Delay between a drag release and committing the settle target.
pub const DEFAULT_RELEASE_DELAY_MS: u64 = 100;

/// How a non-fling release picks its page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReleaseMode {
    /// Settle on whichever page is closest to the current offset.
    #[default]
    NearestPage,
    /// Turn one page in the drag direction once the drag covered more than
    /// this many pixels, otherwise return to the page the drag started on.
    TouchSlop(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReleasePolicy {
    pub mode: ReleaseMode,
    pub delay_ms: u64,
}

impl Default for ReleasePolicy {
    fn default() -> Self {
        Self {
            mode: ReleaseMode::default(),
            delay_ms: DEFAULT_RELEASE_DELAY_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseKind {
    Nearest,
    TurnForward,
    TurnBackward,
    /// Drag too short; go back to the starting page.
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReleaseDecision {
    pub page: usize,
    pub kind: ReleaseKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingRelease {
    decision: ReleaseDecision,
    due_ms: u64,
}

/// Follows one drag from start to committed release.
#[derive(Clone, Debug, Default)]
pub struct ReleaseTracker {
    policy: ReleasePolicy,
    drag_start_page: usize,
    drag_distance: i32,
    pending: Option<PendingRelease>,
}

impl ReleaseTracker {
    pub fn new(policy: ReleasePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> ReleasePolicy {
        self.policy
    }

    pub fn drag_start_page(&self) -> usize {
        self.drag_start_page
    }

    /// Signed distance consumed since the drag started.
    pub fn drag_distance(&self) -> i32 {
        self.drag_distance
    }

    pub fn pending(&self) -> Option<ReleaseDecision> {
        self.pending.map(|pending| pending.decision)
    }

    /// Starts tracking a new drag. Returns `true` if a pending release was
    /// cancelled by it.
    pub fn begin_drag(&mut self, start_page: usize) -> bool {
        self.drag_start_page = start_page;
        self.drag_distance = 0;
        self.cancel()
    }

    pub fn record_drag(&mut self, consumed: i32) {
        self.drag_distance = self.drag_distance.saturating_add(consumed);
    }

    /// Decides the settle page for a release and holds it until `due`.
    ///
    /// `nearest_page` is the page closest to the offset at release time.
    pub fn release(
        &mut self,
        now_ms: u64,
        nearest_page: usize,
        total_pages: usize,
    ) -> ReleaseDecision {
        let decision = self.decide(nearest_page, total_pages);
        self.pending = Some(PendingRelease {
            decision,
            due_ms: now_ms.saturating_add(self.policy.delay_ms),
        });
        decision
    }

    /// Takes the pending decision once its delay has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<ReleaseDecision> {
        match self.pending {
            Some(pending) if now_ms >= pending.due_ms => {
                self.pending = None;
                Some(pending.decision)
            }
            _ => None,
        }
    }

    /// Drops the pending decision. Returns `true` if there was one.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    fn decide(&self, nearest_page: usize, total_pages: usize) -> ReleaseDecision {
        let last_page = total_pages.saturating_sub(1);
        match self.policy.mode {
            ReleaseMode::NearestPage => ReleaseDecision {
                page: nearest_page.min(last_page),
                kind: ReleaseKind::Nearest,
            },
            ReleaseMode::TouchSlop(slop) => {
                let start = self.drag_start_page.min(last_page);
                if self.drag_distance.unsigned_abs() <= slop.max(0) as u32 {
                    ReleaseDecision {
                        page: start,
                        kind: ReleaseKind::Reset,
                    }
                } else if self.drag_distance > 0 {
                    ReleaseDecision {
                        page: (start + 1).min(last_page),
                        kind: ReleaseKind::TurnForward,
                    }
                } else {
                    ReleaseDecision {
                        page: start.saturating_sub(1),
                        kind: ReleaseKind::TurnBackward,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slop_tracker(slop: i32) -> ReleaseTracker {
        ReleaseTracker::new(ReleasePolicy {
            mode: ReleaseMode::TouchSlop(slop),
            delay_ms: 100,
        })
    }

    #[test]
    fn nearest_mode_uses_nearest_page() {
        let mut tracker = ReleaseTracker::default();
        tracker.begin_drag(1);
        tracker.record_drag(400);
        let decision = tracker.release(0, 2, 5);
        assert_eq!(
            decision,
            ReleaseDecision {
                page: 2,
                kind: ReleaseKind::Nearest
            }
        );
    }

    #[test]
    fn long_drag_turns_one_page() {
        let mut tracker = slop_tracker(16);
        tracker.begin_drag(2);
        tracker.record_drag(10);
        tracker.record_drag(30);
        assert_eq!(tracker.release(0, 2, 5).page, 3);

        tracker.begin_drag(2);
        tracker.record_drag(-17);
        assert_eq!(
            tracker.release(0, 2, 5),
            ReleaseDecision {
                page: 1,
                kind: ReleaseKind::TurnBackward
            }
        );
    }

    #[test]
    fn short_drag_resets() {
        let mut tracker = slop_tracker(16);
        tracker.begin_drag(2);
        tracker.record_drag(-16);
        assert_eq!(tracker.release(0, 2, 5).kind, ReleaseKind::Reset);
        assert_eq!(tracker.release(0, 2, 5).page, 2);
    }

    #[test]
    fn turns_stay_inside_page_range() {
        let mut tracker = slop_tracker(0);
        tracker.begin_drag(4);
        tracker.record_drag(200);
        assert_eq!(tracker.release(0, 4, 5).page, 4);

        tracker.begin_drag(0);
        tracker.record_drag(-200);
        assert_eq!(tracker.release(0, 0, 5).page, 0);
    }

    #[test]
    fn decision_waits_for_delay() {
        let mut tracker = slop_tracker(8);
        tracker.begin_drag(0);
        tracker.record_drag(50);
        tracker.release(1_000, 0, 3);
        assert_eq!(tracker.poll(1_050), None);
        assert_eq!(tracker.pending().map(|d| d.page), Some(1));
        assert_eq!(tracker.poll(1_100).map(|d| d.page), Some(1));
        assert_eq!(tracker.poll(1_200), None);
    }

    #[test]
    fn new_drag_cancels_pending_decision() {
        let mut tracker = slop_tracker(8);
        tracker.begin_drag(0);
        tracker.record_drag(50);
        tracker.release(0, 0, 3);
        assert!(tracker.begin_drag(0));
        assert_eq!(tracker.poll(500), None);
        assert!(!tracker.begin_drag(0));
    }
}
