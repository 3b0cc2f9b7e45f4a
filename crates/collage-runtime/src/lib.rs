#![forbid(unsafe_code)]

//! Runtime for the draggable 7-slot collage.
//!
//! - [`registry`]: which element sits in which slot.
//! - [`reorder`]: region-based swap and chain-shift decisions.
//! - [`session`]: the pointer lifecycle of a single drag.
//! - [`anchor`]: the deferred recenter-anchor signal.
//! - [`board`]: ties the above to a measured grid and emits [`BoardEvent`]s.
//! - [`config`]: tunables and their env/file loaders.
//!
//! # Example
//!
//! ```
//! use collage_runtime::{BoardConfig, BoardEvent, CollageBoard};
//! use web_time::{Duration, Instant};
//!
//! let mut board = CollageBoard::new(BoardConfig::default(), 900)?;
//! for name in ["a.jpg", "b.jpg", "c.jpg"] {
//!     board.append_content(name);
//! }
//!
//! let t = Instant::now();
//! board.pointer_down(300, 300, t);
//! let events = board.pointer_move(750, 150, t + Duration::from_millis(16));
//! assert!(events.iter().any(|e| matches!(e, BoardEvent::SlotsChanged { .. })));
//! board.pointer_up(t + Duration::from_millis(32));
//! # Ok::<(), collage_runtime::ConfigError>(())
//! ```

pub mod anchor;
pub mod board;
pub mod config;
pub mod registry;
pub mod reorder;
pub mod session;

pub use anchor::AnchorTimer;
pub use board::{BoardEvent, CollageBoard};
pub use config::{
    BoardConfig, ConfigError, DEFAULT_ANCHOR_DELAY_MS, DEFAULT_SPACING, DEFAULT_TOUCH_SLOP,
};
pub use registry::{Content, Element, ElementId, Registry, RegistryCorruption};
pub use reorder::{Candidate, ReorderKind, ReorderNoop, ReorderOutcome, candidate, reorder};
pub use session::{DragSession, DragState, SessionEffect, SessionNoopReason, SessionTransition};

pub use web_time::{Duration, Instant};
