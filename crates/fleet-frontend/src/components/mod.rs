//! # UI Components Module
//!
//! Leptos components for the dispatch page.

pub mod footer;
pub mod header;
pub mod map;
pub mod status_legend;
pub mod tracking_controls;
pub mod vehicle_card;

pub use footer::*;
pub use header::*;
pub use map::*;
pub use status_legend::*;
pub use tracking_controls::*;
pub use vehicle_card::*;
