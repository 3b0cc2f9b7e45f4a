#![forbid(unsafe_code)]

//! Grid geometry: container dimensions → per-slot rectangle and scale.
//!
//! The grid is measured in two systems at once:
//!
//! - **Top/right system**: the container width minus four gutters, split into
//!   thirds (`every_length`). The large cell spans two of them plus one gutter.
//!   `TopRight` and `RightMiddle` sit in the right column.
//! - **Bottom system**: the device width minus five gutters, split into
//!   quarters (`every_bottom_length`). It drives the three bottom cells and
//!   the horizontal alignment of `RightBottom`.
//!
//! Every cell is laid out at the large cell's native side length
//! (`2 * every_length + spacing`) and carries a scale factor that shrinks it to
//! its grid footprint. The large cell's scale is therefore exactly `1.0`.
//!
//! # Invariants
//!
//! 1. Pure: identical [`GridMetrics`] always produce identical layouts.
//! 2. Every slot rectangle is a square of side `2 * (side_length / 2)`.
//! 3. `scale == footprint / side_length` for every slot.
//!
//! # Failure Modes
//!
//! - Widths too small to fit the gutters are rejected by [`GridMetrics::new`]
//!   with [`GridMetricsError`]; nothing downstream ever sees a zero or
//!   negative cell length.
//! - Dimensions above [`MAX_DIMENSION`] are rejected too, so every derived
//!   center and edge fits in `i32`.

use std::fmt;

use collage_core::geometry::{Point, Rect};
use collage_core::slot::Slot;
use serde::Serialize;

/// Largest accepted width, height or spacing, in pixels.
pub const MAX_DIMENSION: i32 = i32::MAX / 8;

/// Validated container measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridMetrics {
    container_width: i32,
    container_height: i32,
    device_width: i32,
    spacing: i32,
}

impl GridMetrics {
    /// Validate and capture the measurements that drive every layout.
    ///
    /// `device_width` sizes the bottom row; on a full-width collage it equals
    /// `container_width`.
    pub fn new(
        container_width: i32,
        container_height: i32,
        device_width: i32,
        spacing: i32,
    ) -> Result<Self, GridMetricsError> {
        if spacing < 0 {
            return Err(GridMetricsError::NegativeSpacing { spacing });
        }
        for (dimension, value) in [
            ("spacing", spacing),
            ("container width", container_width),
            ("container height", container_height),
            ("device width", device_width),
        ] {
            if value > MAX_DIMENSION {
                return Err(GridMetricsError::TooLarge { dimension, value });
            }
        }
        if cell_room(container_width, 4, spacing).is_none_or(|room| room < 3) {
            return Err(GridMetricsError::ContainerTooNarrow {
                width: container_width,
                spacing,
            });
        }
        if cell_room(device_width, 5, spacing).is_none_or(|room| room < 4) {
            return Err(GridMetricsError::DeviceTooNarrow {
                width: device_width,
                spacing,
            });
        }
        if container_height <= 0 {
            return Err(GridMetricsError::InvalidHeight {
                height: container_height,
            });
        }
        Ok(Self {
            container_width,
            container_height,
            device_width,
            spacing,
        })
    }

    /// Metrics for a full-width collage at its natural height.
    pub fn for_device(device_width: i32, spacing: i32) -> Result<Self, GridMetricsError> {
        if spacing < 0 {
            return Err(GridMetricsError::NegativeSpacing { spacing });
        }
        Self::new(
            device_width,
            measured_height(device_width, spacing),
            device_width,
            spacing,
        )
    }

    #[inline]
    #[must_use]
    pub const fn container_width(&self) -> i32 {
        self.container_width
    }

    #[inline]
    #[must_use]
    pub const fn container_height(&self) -> i32 {
        self.container_height
    }

    #[inline]
    #[must_use]
    pub const fn device_width(&self) -> i32 {
        self.device_width
    }

    #[inline]
    #[must_use]
    pub const fn spacing(&self) -> i32 {
        self.spacing
    }

    /// Footprint of one top/right cell.
    #[inline]
    #[must_use]
    pub const fn every_length(&self) -> i32 {
        (self.container_width - 4 * self.spacing) / 3
    }

    /// Footprint of one bottom-row cell.
    #[inline]
    #[must_use]
    pub const fn every_bottom_length(&self) -> i32 {
        (self.device_width - 5 * self.spacing) / 4
    }

    /// Native side length shared by every cell.
    #[inline]
    #[must_use]
    pub const fn side_length(&self) -> i32 {
        self.every_length() * 2 + self.spacing
    }

    /// The container rectangle, origin at `(0, 0)`.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.container_width, self.container_height)
    }
}

/// Length left for cells once `gutters` spacings are taken out.
fn cell_room(length: i32, gutters: i32, spacing: i32) -> Option<i32> {
    length.checked_sub(spacing.checked_mul(gutters)?)
}

/// Rejected container measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMetricsError {
    NegativeSpacing { spacing: i32 },
    TooLarge { dimension: &'static str, value: i32 },
    ContainerTooNarrow { width: i32, spacing: i32 },
    DeviceTooNarrow { width: i32, spacing: i32 },
    InvalidHeight { height: i32 },
}

impl fmt::Display for GridMetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeSpacing { spacing } => {
                write!(f, "spacing must be >= 0 (got {spacing})")
            }
            Self::TooLarge { dimension, value } => {
                write!(f, "{dimension} {value} exceeds {MAX_DIMENSION}")
            }
            Self::ContainerTooNarrow { width, spacing } => write!(
                f,
                "container width {width} leaves no room for three cells with spacing {spacing}"
            ),
            Self::DeviceTooNarrow { width, spacing } => write!(
                f,
                "device width {width} leaves no room for four bottom cells with spacing {spacing}"
            ),
            Self::InvalidHeight { height } => {
                write!(f, "container height must be > 0 (got {height})")
            }
        }
    }
}

impl std::error::Error for GridMetricsError {}

/// Natural container height for a full-width collage on `device_width`.
///
/// Saturates on out-of-range input; [`GridMetrics::new`] rejects the result.
#[must_use]
pub const fn measured_height(device_width: i32, spacing: i32) -> i32 {
    let every_length = device_width.saturating_sub(spacing.saturating_mul(4)) / 3;
    let every_bottom_length = device_width.saturating_sub(spacing.saturating_mul(5)) / 4;
    spacing
        .saturating_mul(4)
        .saturating_add(every_bottom_length)
        .saturating_add(every_length.saturating_mul(2))
}

/// Target rectangle and scale for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotLayout {
    pub slot: Slot,
    /// Unscaled cell rectangle (native side length, centered on the slot).
    pub rect: Rect,
    /// Factor that shrinks `rect` to the slot's grid footprint.
    pub scale: f32,
}

impl SlotLayout {
    /// On-screen rectangle after applying `scale` about the center.
    #[must_use]
    pub fn footprint(&self) -> Rect {
        self.rect.scaled_about_center(self.scale)
    }

    /// Top-left corner of the unscaled rectangle; the settle destination.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.rect.origin()
    }

    #[inline]
    #[must_use]
    pub const fn center(&self) -> Point {
        self.rect.center()
    }
}

/// Compute the rectangle and scale for `slot`.
#[must_use]
pub fn layout_for(slot: Slot, metrics: &GridMetrics) -> SlotLayout {
    let s = metrics.spacing;
    let every = metrics.every_length();
    let every_bottom = metrics.every_bottom_length();
    let side = metrics.side_length();
    let half = side / 2;
    let right = metrics.container_width;
    let bottom = metrics.container_height;

    let right_center = right - s - every / 2;
    let right_center_bottom = right - s - every_bottom / 2;
    let bottom_row_center = bottom - s - every_bottom / 2;

    let center = match slot {
        Slot::TopLeftLarge => {
            let c = s + every + s / 2;
            Point::new(c, c)
        }
        Slot::TopRight => Point::new(right_center, s + every / 2),
        Slot::RightMiddle => Point::new(right_center, s * 2 + every + every / 2),
        Slot::RightBottom => Point::new(right_center_bottom, bottom_row_center),
        Slot::BottomMid1 => Point::new(s * 2 + every_bottom + every_bottom / 2, bottom_row_center),
        Slot::BottomMid2 => Point::new(
            s * 3 + every_bottom * 2 + every_bottom / 2,
            bottom_row_center,
        ),
        Slot::BottomLeft => Point::new(s + every_bottom / 2, bottom_row_center),
    };
    let footprint = if slot.is_large() {
        side
    } else if slot.uses_quarter_grid() {
        every_bottom
    } else {
        every
    };

    SlotLayout {
        slot,
        rect: Rect::around(center, half),
        scale: footprint as f32 / side as f32,
    }
}

/// Layouts for every slot, indexed by [`Slot::index`].
#[must_use]
pub fn layout_all(metrics: &GridMetrics) -> [SlotLayout; Slot::COUNT] {
    Slot::ALL.map(|slot| layout_for(slot, metrics))
}

/// Scales of the large cell's two edge neighbours.
///
/// Exposed for edge effects (e.g. fading a cell as it approaches an edge).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EdgeScales {
    pub top_right: f32,
    pub bottom_left: f32,
}

#[must_use]
pub fn edge_scales(metrics: &GridMetrics) -> EdgeScales {
    EdgeScales {
        top_right: layout_for(Slot::TopRight, metrics).scale,
        bottom_left: layout_for(Slot::BottomLeft, metrics).scale,
    }
}
