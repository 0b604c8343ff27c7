//! Point, size, thickness and line value types

use serde::{Deserialize, Serialize};

/// A point in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A point with both coordinates set to NaN, used as a "not renderable" sentinel
    pub fn nan() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    /// Whether either coordinate is NaN
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Translate by the given offsets
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const EMPTY: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Per-side lengths, used for axis margins and overhangs
///
/// Every component is expected to be non-negative; constructors clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Thickness {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Thickness {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left: left.max(0.0),
            top: top.max(0.0),
            right: right.max(0.0),
            bottom: bottom.max(0.0),
        }
    }

    /// The same length on all four sides
    pub fn uniform(length: f64) -> Self {
        Self::new(length, length, length, length)
    }

    /// Sum of the left and right components
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of the top and bottom components
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Component-wise maximum of two thicknesses
    pub fn max(&self, other: &Thickness) -> Self {
        Self {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }
}

/// A line segment in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Snap both end points to whole pixels
    pub fn round(&self) -> Self {
        Self {
            start: Point::new(self.start.x.round(), self.start.y.round()),
            end: Point::new(self.end.x.round(), self.end.y.round()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_nan_sentinel() {
        assert!(Point::nan().is_nan());
        assert!(!Point::new(1.0, 2.0).is_nan());
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn test_thickness_clamps_negative() {
        let t = Thickness::new(-1.0, 2.0, -3.0, 4.0);
        assert_eq!(t.left, 0.0);
        assert_eq!(t.right, 0.0);
        assert_eq!(t.vertical(), 6.0);
    }

    #[test]
    fn test_thickness_max() {
        let a = Thickness::new(1.0, 5.0, 0.0, 2.0);
        let b = Thickness::new(3.0, 1.0, 4.0, 2.0);
        assert_eq!(a.max(&b), Thickness::new(3.0, 5.0, 4.0, 2.0));
    }

    #[test]
    fn test_size_empty() {
        assert!(Size::EMPTY.is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_line_round() {
        let line = Line::new(Point::new(0.4, 1.6), Point::new(10.5, 3.2));
        let rounded = line.round();
        assert_eq!(rounded.start, Point::new(0.0, 2.0));
        assert_eq!(rounded.end, Point::new(11.0, 3.0));
    }
}
