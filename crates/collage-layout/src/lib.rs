#![forbid(unsafe_code)]

//! Layout for the fixed 7-slot collage grid.
//!
//! Two pure pieces live here:
//!
//! - [`grid`]: maps container dimensions to each slot's rectangle and scale.
//! - [`hit_test`]: maps a pointer-down position back to the slot under it.
//!
//! Neither holds state. The runtime recomputes layouts whenever a slot's
//! occupant or the container size changes.

pub mod grid;

pub use collage_core::geometry::{Point, Rect};
pub use collage_core::slot::{Slot, SlotSet};
pub use grid::{
    EdgeScales, GridMetrics, GridMetricsError, MAX_DIMENSION, SlotLayout, edge_scales, layout_all,
    layout_for, measured_height,
};
pub use hit_test::{Zone, classify, zone_of};
