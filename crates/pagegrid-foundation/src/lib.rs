//! Paged grid engine: item geometry, virtualization, page snapping and page
//! change notifications for grids that scroll one page at a time.

pub mod collections;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout_manager;
pub mod lazy;
pub mod page_change;
pub mod paging;
pub mod release;
pub mod scroll;
pub mod smooth_scroll;
pub mod snap;

// Re-export commonly used items
pub use config::PagerGridConfig;
pub use error::{ConfigError, PagerGridError};
pub use geometry::{IntRect, ItemFrame, ItemSize, Orientation, Padding, Viewport};
pub use layout_manager::PagerGridLayoutManager;
pub use lazy::{PagerGridHost, RecyclerStats, ViewHandle, VirtualizationWindow};
pub use page_change::{ListenerId, PageChangeRecord, PageEvent};
pub use release::{ReleaseDecision, ReleaseKind, ReleaseMode, ReleasePolicy};
pub use scroll::ScrollPhase;
pub use smooth_scroll::{Interpolator, SmoothScrollConfig};
pub use snap::{SnapTarget, SnapView};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::geometry::*;
    pub use crate::layout_manager::*;
    pub use crate::lazy::*;
    pub use crate::page_change::*;
    pub use crate::release::*;
    pub use crate::scroll::*;
    pub use crate::smooth_scroll::*;
    pub use crate::snap::*;
}
