//! Virtualization for paged grids.
//!
//! Only a window of items around the current page is materialized:
//! - [`PagerGridHost`] - View system adapter implemented by the host
//! - [`VirtualizationWindow`] - Item range kept materialized
//! - [`display_rect`] - Area an item must meet to be placed
//! - [`ItemRecycler`] - Scrap-and-refill pass over the window

mod item_provider;
mod slot_reuse;
mod window;

pub use item_provider::*;
pub use slot_reuse::*;
pub use window::*;
