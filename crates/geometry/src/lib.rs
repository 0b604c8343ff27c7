//! Chart geometry - value types shared by every part of the chart layout engine
//!
//! This crate provides:
//! - Rectangles, points, sizes, thicknesses and lines in layout coordinates
//! - Layout rounding helpers that snap geometry to whole pixels
//! - Conversions between cartesian and polar coordinates

mod math;
mod primitives;
mod rect;

pub use math::*;
pub use primitives::*;
pub use rect::*;
