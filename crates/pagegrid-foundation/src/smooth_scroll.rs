//! Smooth page scrolling driven by host animation frames.
//!
//! An animation covers a fixed pixel distance along the scroll axis. Each
//! frame the host reports its frame time; the animation turns that into a
//! delta relative to what it already applied, so frames may be dropped or
//! arrive late without the total drifting.

use crate::error::ConfigError;

/// 60 ms per inch at the 160 dpi baseline density.
pub const DEFAULT_MILLISECONDS_PER_UNIT_DISTANCE: f32 = 60.0 / 160.0;

/// Targets further away than this many pages are reached by jumping first.
pub const DEFAULT_MAX_ANIMATED_PAGE_DISTANCE: usize = 3;

/// Progress curve of a smooth scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolator {
    Linear,
    /// Quadratic ease-out: fast start, slowing into the target.
    #[default]
    Decelerate,
}

impl Interpolator {
    /// Maps elapsed fraction `[0, 1]` to distance fraction `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Interpolator::Linear => t,
            Interpolator::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothScrollConfig {
    /// Animation time per pixel travelled.
    pub milliseconds_per_unit_distance: f32,
    pub max_animated_page_distance: usize,
    pub interpolator: Interpolator,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            milliseconds_per_unit_distance: DEFAULT_MILLISECONDS_PER_UNIT_DISTANCE,
            max_animated_page_distance: DEFAULT_MAX_ANIMATED_PAGE_DISTANCE,
            interpolator: Interpolator::default(),
        }
    }
}

impl SmoothScrollConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let speed = self.milliseconds_per_unit_distance;
        if !speed.is_finite() || speed < 0.0 {
            return Err(ConfigError::InvalidScrollSpeed(speed));
        }
        Ok(())
    }

    /// Duration of an animation covering `distance` pixels, rounded up.
    pub fn duration_ms(&self, distance: i32) -> u32 {
        let millis = (distance.unsigned_abs() as f32 * self.milliseconds_per_unit_distance).ceil();
        millis.min(u32::MAX as f32) as u32
    }
}

/// Result of advancing an animation by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationStep {
    /// Pixels to scroll on this frame.
    pub delta: i32,
    pub finished: bool,
}

/// One in-flight smooth scroll.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothScrollAnimation {
    target_page: usize,
    distance: i32,
    applied: i32,
    duration_ms: u32,
    interpolator: Interpolator,
    /// Set from the first frame that reaches the animation.
    start_frame_time_nanos: Option<u64>,
}

impl SmoothScrollAnimation {
    pub fn new(
        target_page: usize,
        distance: i32,
        duration_ms: u32,
        interpolator: Interpolator,
    ) -> Self {
        Self {
            target_page,
            distance,
            applied: 0,
            duration_ms,
            interpolator,
            start_frame_time_nanos: None,
        }
    }

    pub fn target_page(&self) -> usize {
        self.target_page
    }

    /// Total signed distance along the scroll axis.
    pub fn distance(&self) -> i32 {
        self.distance
    }

    pub fn applied(&self) -> i32 {
        self.applied
    }

    pub fn remaining(&self) -> i32 {
        self.distance - self.applied
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn advance(&mut self, frame_time_nanos: u64) -> AnimationStep {
        let start = *self.start_frame_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_ms = frame_time_nanos.saturating_sub(start) as f64 / 1_000_000.0;
        let fraction = if self.duration_ms == 0 {
            1.0
        } else {
            (elapsed_ms / self.duration_ms as f64).min(1.0) as f32
        };

        let finished = fraction >= 1.0;
        let position = if finished {
            self.distance
        } else {
            (self.distance as f32 * self.interpolator.transform(fraction)).round() as i32
        };
        let delta = position - self.applied;
        self.applied = position;
        AnimationStep { delta, finished }
    }
}

/// Owns the active smooth scroll, if any.
#[derive(Clone, Debug, Default)]
pub struct SmoothScrollDriver {
    config: SmoothScrollConfig,
    active: Option<SmoothScrollAnimation>,
}

impl SmoothScrollDriver {
    pub fn new(config: SmoothScrollConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    pub fn config(&self) -> &SmoothScrollConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&SmoothScrollAnimation> {
        self.active.as_ref()
    }

    /// Page to jump to before animating from `current_page` to `target_page`,
    /// or `None` when the target is close enough to animate all the way.
    pub fn jump_page(&self, current_page: usize, target_page: usize) -> Option<usize> {
        let max = self.config.max_animated_page_distance;
        if target_page > current_page.saturating_add(max) {
            Some(target_page - max)
        } else if current_page > target_page.saturating_add(max) {
            Some(target_page + max)
        } else {
            None
        }
    }

    /// Starts animating `distance` pixels toward `target_page`, replacing any
    /// running animation.
    pub fn start(&mut self, target_page: usize, distance: i32) {
        let duration = self.config.duration_ms(distance);
        log::debug!(
            "smooth scroll to page {}: {}px over {}ms",
            target_page,
            distance,
            duration
        );
        self.active = Some(SmoothScrollAnimation::new(
            target_page,
            distance,
            duration,
            self.config.interpolator,
        ));
    }

    /// Advances the running animation. Returns `None` when idle; the
    /// animation is dropped after its final step.
    pub fn advance(&mut self, frame_time_nanos: u64) -> Option<AnimationStep> {
        let step = self.active.as_mut()?.advance(frame_time_nanos);
        if step.finished {
            self.active = None;
        }
        Some(step)
    }

    pub fn cancel(&mut self) -> Option<SmoothScrollAnimation> {
        self.active.take()
    }
}
