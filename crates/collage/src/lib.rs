#![forbid(unsafe_code)]

//! Draggable 7-slot photo collage.
//!
//! One large cell in the top-left, two cells down the right, four along the
//! bottom. Pictures are dragged between cells; dropping onto the large cell
//! or dragging the large cell away shifts the cells in between instead of
//! swapping.
//!
//! This crate re-exports the stable surface of the workspace crates and
//! offers a prelude:
//!
//! ```
//! use collage::prelude::*;
//!
//! let mut board = CollageBoard::new(BoardConfig::default(), 1080)?;
//! board.append_content("sunset.jpg");
//! board.append_content("harbour.jpg");
//! assert_eq!(board.occupied_slots(), vec![Slot::TopLeftLarge, Slot::TopRight]);
//!
//! let now = Instant::now();
//! let events = board.handle(PointerEvent::down(40, 40), now);
//! assert!(matches!(events[0], BoardEvent::RaiseToFront { .. }));
//! # Ok::<(), collage::Error>(())
//! ```

mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use collage_core::event::{PointerEvent, exceeds_drag_threshold};
pub use collage_core::geometry::{Point, Rect};
pub use collage_core::slot::{Slot, SlotSet};

// --- Layout re-exports -----------------------------------------------------

pub use collage_layout::{
    EdgeScales, GridMetrics, GridMetricsError, SlotLayout, Zone, classify, edge_scales, layout_all,
    layout_for, measured_height,
};

// --- Runtime re-exports ----------------------------------------------------

pub use collage_runtime::{
    BoardConfig, BoardEvent, CollageBoard, ConfigError, Content, DragSession, DragState, Duration,
    Element, ElementId, Instant, Registry, RegistryCorruption, ReorderKind, ReorderNoop,
    ReorderOutcome, SessionEffect,
};

/// Install the JSON log subscriber, filtered by `COLLAGE_LOG`.
#[cfg(feature = "tracing-json")]
pub fn init_logging() -> Result<()> {
    collage_core::logging::init_json_logging().map_err(Error::from)
}

/// Build a board from `COLLAGE_*` environment variables.
pub fn board_from_env(container_width: i32) -> Result<CollageBoard> {
    let config = BoardConfig::from_env()?;
    Ok(CollageBoard::new(config, container_width)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BoardConfig, BoardEvent, CollageBoard, Content, Duration, ElementId, Error, Instant,
        PointerEvent, Point, Rect, Result, Slot, SlotLayout, SlotSet,
    };

    pub use crate::{core, layout, runtime};
}

pub use collage_core as core;
pub use collage_layout as layout;
pub use collage_runtime as runtime;
