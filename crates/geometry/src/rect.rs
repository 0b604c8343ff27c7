//! Axis-aligned rectangles
//!
//! Width and height are never negative: constructors and every helper that
//! shrinks a rectangle clamp at zero.

use crate::primitives::{Point, Size, Thickness};
use serde::{Deserialize, Serialize};

/// A rectangle in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Create a rectangle at the origin with the given size
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Create the rectangle spanned by two corner points
    pub fn from_points(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, a.x.max(b.x) - x, a.y.max(b.y) - y)
    }

    /// Get the right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Get the center X coordinate
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Get the center Y coordinate
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Whether the point lies inside the rectangle (edges inclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Whether the two rectangles overlap or touch
    pub fn intersects(&self, other: &Rect) -> bool {
        other.x <= self.right()
            && other.right() >= self.x
            && other.y <= self.bottom()
            && other.bottom() >= self.y
    }

    /// The smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Self {
        Self::from_points(
            Point::new(self.x.min(other.x), self.y.min(other.y)),
            Point::new(self.right().max(other.right()), self.bottom().max(other.bottom())),
        )
    }

    /// Shrink the rectangle by the given padding
    pub fn inset(&self, padding: f64) -> Self {
        self.inset_sides(padding, padding, padding, padding)
    }

    /// Shrink by different amounts on each side
    pub fn inset_sides(&self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            x: self.x + left,
            y: self.y + top,
            width: (self.width - left - right).max(0.0),
            height: (self.height - top - bottom).max(0.0),
        }
    }

    /// Shrink by a thickness
    pub fn deflate(&self, thickness: &Thickness) -> Self {
        self.inset_sides(thickness.top, thickness.right, thickness.bottom, thickness.left)
    }

    /// Scale width and height, keeping the origin
    pub fn scale_size(&self, width_factor: f64, height_factor: f64) -> Self {
        Self::new(self.x, self.y, self.width * width_factor, self.height * height_factor)
    }

    /// Layout rounding: snap every component to the nearest whole pixel
    pub fn round(&self) -> Self {
        Self::new(
            round_half_up(self.x),
            round_half_up(self.y),
            round_half_up(self.width),
            round_half_up(self.height),
        )
    }

    /// Snap every component down to a whole pixel
    pub fn floor(&self) -> Self {
        Self::new(self.x.floor(), self.y.floor(), self.width.floor(), self.height.floor())
    }

    /// Make the rectangle square using its shorter side.
    ///
    /// With `offset` the square is centered inside the original bounds,
    /// otherwise it keeps the original origin.
    pub fn to_square(&self, offset: bool) -> Self {
        let side = self.width.min(self.height);
        let mut square = Self::new(self.x, self.y, side, side);
        if offset {
            square.x += (self.width - side) / 2.0;
            square.y += (self.height - side) / 2.0;
        }
        square
    }

    /// Move this rectangle so that it is centered within `bounds`
    pub fn center_in(&self, bounds: &Rect) -> Self {
        Self {
            x: bounds.x + (bounds.width - self.width) / 2.0,
            y: bounds.y + (bounds.height - self.height) / 2.0,
            width: self.width,
            height: self.height,
        }
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
