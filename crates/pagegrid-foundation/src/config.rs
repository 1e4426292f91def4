//! Layout manager configuration.

use crate::error::ConfigError;
use crate::geometry::{ItemSize, Orientation};
use crate::lazy::DEFAULT_BEYOND_BOUNDS_PAGE_COUNT;
use crate::page_change::SelectionPolicy;
use crate::release::ReleasePolicy;
use crate::smooth_scroll::SmoothScrollConfig;
use crate::snap::DEFAULT_FLING_VELOCITY_THRESHOLD;

/// Configuration for a [`PagerGridLayoutManager`](crate::PagerGridLayoutManager).
#[derive(Clone, Debug, PartialEq)]
pub struct PagerGridConfig {
    pub rows: usize,
    pub columns: usize,
    pub orientation: Orientation,

    /// Fixed item size. Derived from the viewport when `None`.
    pub item_size: Option<ItemSize>,

    /// Fling velocity, in pixels per second, needed to turn a page.
    pub fling_velocity_threshold: i32,

    /// Pages kept materialized before the current page. The window spans
    /// twice this many pages.
    pub beyond_bounds_page_count: usize,

    /// Track the selected page while a drag or fling is in progress.
    pub continuous_selection_during_scroll: bool,

    /// Fire "page selected" callbacks while scrolling.
    pub emit_selection_during_scroll: bool,

    pub smooth_scroll: SmoothScrollConfig,
    pub release: ReleasePolicy,
}

impl Default for PagerGridConfig {
    fn default() -> Self {
        Self {
            rows: 1,
            columns: 1,
            orientation: Orientation::Horizontal,
            item_size: None,
            fling_velocity_threshold: DEFAULT_FLING_VELOCITY_THRESHOLD,
            beyond_bounds_page_count: DEFAULT_BEYOND_BOUNDS_PAGE_COUNT,
            continuous_selection_during_scroll: true,
            emit_selection_during_scroll: true,
            smooth_scroll: SmoothScrollConfig::default(),
            release: ReleasePolicy::default(),
        }
    }
}

impl PagerGridConfig {
    /// A `rows x columns` grid with default tuning.
    pub fn grid(rows: usize, columns: usize, orientation: Orientation) -> Self {
        Self {
            rows,
            columns,
            orientation,
            ..Self::default()
        }
    }

    pub fn page_capacity(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            continuous_during_scroll: self.continuous_selection_during_scroll,
            emit_during_scroll: self.emit_selection_during_scroll,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::ZeroPageCapacity {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if self.fling_velocity_threshold < 0 {
            return Err(ConfigError::NegativeFlingThreshold(
                self.fling_velocity_threshold,
            ));
        }
        if let Some(size) = self.item_size {
            if size.width <= 0 || size.height <= 0 {
                return Err(ConfigError::InvalidItemSize {
                    width: size.width,
                    height: size.height,
                });
            }
        }
        self.smooth_scroll.validate()
    }
}
