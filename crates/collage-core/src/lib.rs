#![forbid(unsafe_code)]

//! Core: slot identities, geometry primitives, pointer events, and logging glue.
//!
//! # Role in the collage editor
//! `collage-core` is the vocabulary layer. It owns the seven fixed [`Slot`]
//! identifiers and their total order, the pixel [`Point`]/[`Rect`] types that
//! every other layer speaks, and the normalized [`PointerEvent`] that the
//! gesture layer hands to the runtime.
//!
//! # How it fits in the system
//! `collage-layout` maps slots to rectangles and pointer positions back to
//! slots. `collage-runtime` owns the slot registry, the reorder engine, and the
//! drag session. Neither layer defines its own coordinate or slot types; they
//! all come from here.

pub mod event;
pub mod geometry;
pub mod logging;
pub mod slot;

pub use event::{PointerEvent, exceeds_drag_threshold};
pub use geometry::{Point, Rect};
pub use slot::{Slot, SlotSet};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
