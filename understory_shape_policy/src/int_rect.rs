// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer rectangles for viewport and shape bookkeeping.

use kurbo::{Point, Rect, Size};

/// Width and height in whole device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntSize {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl IntSize {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either extent is zero or negative.
    #[must_use]
    pub const fn is_degenerate(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Converts to a floating-point [`Size`].
    #[must_use]
    pub fn to_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Axis-aligned rectangle with integer edges.
///
/// `x0`/`y0` are the left/top edges and `x1`/`y1` the right/bottom edges.
/// Width and height are `x1 - x0` and `y1 - y0`; nothing prevents a caller
/// from building an inverted rectangle, and the clamping helpers in
/// [`crate::clamp_rect`] are written to repair one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntRect {
    /// Left edge.
    pub x0: i32,
    /// Top edge.
    pub y0: i32,
    /// Right edge.
    pub x1: i32,
    /// Bottom edge.
    pub y1: i32,
}

impl IntRect {
    /// Creates a rectangle from its four edges.
    #[must_use]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Creates a rectangle from its top-left corner and a size.
    #[must_use]
    pub const fn from_origin_size(x: i32, y: i32, size: IntSize) -> Self {
        Self::new(x, y, x + size.width, y + size.height)
    }

    /// Truncates each edge of a floating-point rectangle toward zero.
    ///
    /// This is deliberately not rounding: clamp comparisons downstream expect
    /// the same edges an integer cast would produce.
    #[must_use]
    pub fn from_rect_trunc(rect: Rect) -> Self {
        Self::new(
            trunc_i32(rect.x0),
            trunc_i32(rect.y0),
            trunc_i32(rect.x1),
            trunc_i32(rect.y1),
        )
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(self) -> i32 {
        self.x1 - self.x0
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(self) -> i32 {
        self.y1 - self.y0
    }

    /// Width and height as an [`IntSize`].
    #[must_use]
    pub const fn size(self) -> IntSize {
        IntSize::new(self.width(), self.height())
    }

    /// Top-left corner as a floating-point point.
    #[must_use]
    pub fn origin(self) -> Point {
        Point::new(f64::from(self.x0), f64::from(self.y0))
    }

    /// Returns `true` if either extent is zero or negative.
    #[must_use]
    pub const fn is_degenerate(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Returns a copy moved by `(dx, dy)`, saturating at the `i32` range.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x0.saturating_add(dx),
            self.y0.saturating_add(dy),
            self.x1.saturating_add(dx),
            self.y1.saturating_add(dy),
        )
    }

    /// Whether a point lies inside or on the boundary of this rectangle.
    ///
    /// The point is truncated to whole pixels first, so `(99.7, 0.0)` is
    /// inside `(0, 0, 99, 10)`.
    #[must_use]
    pub fn contains_point(self, pt: Point) -> bool {
        let x = trunc_i32(pt.x);
        let y = trunc_i32(pt.y);
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Whether `other` lies entirely within this rectangle (edges may touch).
    #[must_use]
    pub const fn contains_rect(self, other: Self) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }

    /// Converts to a floating-point [`Rect`].
    #[must_use]
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x0),
            f64::from(self.y0),
            f64::from(self.x1),
            f64::from(self.y1),
        )
    }
}

/// Integer conversion that drops the fractional part, like a C cast.
#[expect(
    clippy::cast_possible_truncation,
    reason = "truncation toward zero is the conversion rule for shape edges"
)]
pub(crate) fn trunc_i32(v: f64) -> i32 {
    v as i32
}
