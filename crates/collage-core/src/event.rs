#![forbid(unsafe_code)]

//! Pointer events delivered by the touch/gesture layer.
//!
//! The gesture layer owns device specifics (touch ids, mouse buttons, scroll
//! disambiguation). By the time an event reaches the collage runtime it has
//! been reduced to one of four cases for a single active pointer.

use crate::geometry::Point;

/// Canonical pointer event for the single active pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PointerEvent {
    /// Pointer pressed at a container-space position.
    Down { position: Point },
    /// Pointer moved while pressed.
    Move { position: Point },
    /// Pointer lifted.
    Up,
    /// The gesture layer claimed the stream (e.g. for a scroll).
    Cancel,
}

impl PointerEvent {
    #[must_use]
    pub const fn down(x: i32, y: i32) -> Self {
        Self::Down {
            position: Point::new(x, y),
        }
    }

    #[must_use]
    pub const fn moved(x: i32, y: i32) -> Self {
        Self::Move {
            position: Point::new(x, y),
        }
    }

    /// Position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::Down { position } | Self::Move { position } => Some(*position),
            Self::Up | Self::Cancel => None,
        }
    }

    /// Whether this event ends the current gesture.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }
}

/// Whether `current` has moved far enough from `origin` to count as a drag.
///
/// This is the scroll-vs-tap disambiguation signal: the Manhattan displacement
/// must be strictly greater than `slop`.
#[inline]
#[must_use]
pub const fn exceeds_drag_threshold(origin: Point, current: Point, slop: u32) -> bool {
    origin.manhattan_distance(current) > slop
}
