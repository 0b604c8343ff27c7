//! Trigonometric helpers for radial layout
//!
//! Angles are in degrees. Layout space has Y growing downwards, so an
//! increasing angle sweeps clockwise on screen.

use crate::primitives::Point;

/// Tolerance used by [`is_zero`] and [`is_one`]
pub const EPSILON: f64 = 1e-9;

pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

pub fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

pub fn is_one(value: f64) -> bool {
    is_zero(value - 1.0)
}

/// Clamp `value` into `[min, max]`
pub fn coerce(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Wrap an angle into `[0, 360)`
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle % 360.0;
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    // -1e-17 % 360 + 360 rounds to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// The point on the circle around `center` at `angle` degrees (clockwise on screen)
pub fn arc_point(angle: f64, center: Point, radius: f64) -> Point {
    let radians = angle * DEG_TO_RAD;
    Point::new(
        center.x + radians.cos() * radius,
        center.y + radians.sin() * radius,
    )
}

/// Convert a layout point into `(radius, angle)` around `center`.
///
/// The angle is the clockwise screen angle in `[0, 360)`. With `reverse` it is
/// mirrored through `360 - angle`, which yields the counter-clockwise angle.
pub fn to_polar_coordinates(point: Point, center: Point, reverse: bool) -> (f64, f64) {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let radius = (dx * dx + dy * dy).sqrt();

    if is_zero(radius) {
        return (0.0, 0.0);
    }

    let mut angle = wrap_degrees(dy.atan2(dx).to_degrees());
    if reverse {
        angle = (360.0 - angle) % 360.0;
    }

    (radius, angle)
}

/// Offset of the point at `radius`/`angle` from the origin
pub fn to_cartesian_coordinates(radius: f64, angle: f64) -> Point {
    let radians = angle * DEG_TO_RAD;
    Point::new(radius * radians.cos(), radius * radians.sin())
}
