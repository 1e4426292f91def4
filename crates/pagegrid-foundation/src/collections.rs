//! Hash map aliases used by the engine.
//!
//! Item indices are small dense integers, so the Fx hasher is used unless the
//! `std-hash` feature asks for the standard SipHash maps.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::HashMap;
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::FxHashMap as HashMap;
}
