//! # Services Module
//!
//! Browser-side plumbing shared by the map and the tracking controls.

pub mod map_events;

pub use map_events::*;
