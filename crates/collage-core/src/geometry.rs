#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are signed pixels in container space (origin top-left, y grows
//! downward). Cell rectangles are intentionally allowed to extend past the
//! container: bottom and right cells render at the large cell's native side
//! length and are scaled down around their center.

/// A pixel position in container space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another point.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// Component-wise `(other - self)`.
    #[inline]
    #[must_use]
    pub const fn delta_to(self, other: Self) -> (i32, i32) {
        (
            other.x.saturating_sub(self.x),
            other.y.saturating_sub(self.y),
        )
    }

    /// Point shifted by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle given by its four edges.
///
/// `left`/`top` are inclusive, `right`/`bottom` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a new rectangle from its edges.
    #[inline]
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle spanning `[0, width) × [0, height)`.
    #[inline]
    #[must_use]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Square of half-extent `half` around `center`.
    ///
    /// The side is `2 * half`, so an odd side length loses one pixel, the same
    /// way the layout pass truncates it. Edges saturate at the `i32` range.
    #[inline]
    #[must_use]
    pub const fn around(center: Point, half: i32) -> Self {
        Self::new(
            center.x.saturating_sub(half),
            center.y.saturating_sub(half),
            center.x.saturating_add(half),
            center.y.saturating_add(half),
        )
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Center point (truncating).
    #[inline]
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(
            self.left.saturating_add(self.width() / 2),
            self.top.saturating_add(self.height() / 2),
        )
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Rectangle moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left.saturating_add(dx),
            self.top.saturating_add(dy),
            self.right.saturating_add(dx),
            self.bottom.saturating_add(dy),
        )
    }

    /// Same-sized rectangle shifted the minimum distance needed to sit inside
    /// `bounds`.
    ///
    /// If the rectangle is larger than `bounds` on an axis, it is pinned to
    /// the bounds' leading edge on that axis.
    #[must_use]
    pub fn clamp_within(&self, bounds: &Rect) -> Self {
        let dx = clamp_shift(self.left, self.right, bounds.left, bounds.right);
        let dy = clamp_shift(self.top, self.bottom, bounds.top, bounds.bottom);
        self.translate(dx, dy)
    }

    /// Square of side `round(side * scale)` sharing this rectangle's center.
    ///
    /// This is the on-screen footprint of a cell rendered at `scale`.
    #[must_use]
    pub fn scaled_about_center(&self, scale: f32) -> Self {
        let center = self.center();
        let half_w = ((self.width() as f32 * scale) / 2.0).round() as i32;
        let half_h = ((self.height() as f32 * scale) / 2.0).round() as i32;
        Self::new(
            center.x.saturating_sub(half_w),
            center.y.saturating_sub(half_h),
            center.x.saturating_add(half_w),
            center.y.saturating_add(half_h),
        )
    }
}

fn clamp_shift(lo: i32, hi: i32, bound_lo: i32, bound_hi: i32) -> i32 {
    if hi.saturating_sub(lo) >= bound_hi.saturating_sub(bound_lo) || lo < bound_lo {
        bound_lo.saturating_sub(lo)
    } else if hi > bound_hi {
        bound_hi.saturating_sub(hi)
    } else {
        0
    }
}
