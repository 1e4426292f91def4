//! Error types for the paged grid engine.

use crate::geometry::Orientation;
use crate::scroll::ScrollPhase;

/// Fatal setup errors. Returned when the engine is constructed or reconfigured
/// and never deferred to first use.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("page capacity must be positive, got {rows} rows x {columns} columns")]
    ZeroPageCapacity { rows: usize, columns: usize },

    #[error("milliseconds per unit distance must be finite and non-negative, got {0}")]
    InvalidScrollSpeed(f32),

    #[error("fling velocity threshold must be non-negative, got {0}")]
    NegativeFlingThreshold(i32),

    #[error("explicit item size must be positive, got {width}x{height}")]
    InvalidItemSize { width: i32, height: i32 },
}

/// Recoverable errors reported by engine commands. A command that returns one
/// of these has not mutated any state.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PagerGridError {
    #[error("page index {page} is out of bounds, must be in [0, {page_count})")]
    PageOutOfBounds { page: i64, page_count: usize },

    #[error("layout manager is not attached to a host view")]
    NotAttached,

    #[error("programmatic page jumps require an idle scroller, current phase is {0:?}")]
    NotIdle(ScrollPhase),

    #[error("cannot switch orientation while the scroller is {0:?}")]
    OrientationChangeWhileScrolling(ScrollPhase),

    #[error("usable extent is zero for {0:?} orientation, cannot remap the scroll offset")]
    ZeroUsableExtent(Orientation),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
