//! Chart engine - layout and coordinate mapping for two-axis charts
//!
//! This crate provides:
//! - An axis model (numerical and categorical scales, ticks, labels, titles)
//! - Axis stacks that group same-side axes into one layout unit
//! - An iterative plot-area solver for cartesian charts
//! - Radial framing and angle normalization for polar/radar charts
//! - Pixel <-> data conversion that honors pan and zoom
//! - A chart area that owns axes, grid and annotations and batches invalidation
//!
//! Rendering, input handling and data binding belong to the host. The host
//! calls [`ChartArea::arrange`] with the available rectangle and reads back
//! the plot rectangle plus the arranged geometry of axes, grid and annotations.

mod annotation;
mod area;
mod axis;
pub mod cartesian;
mod config;
mod error;
mod grid;
mod invalidate;
mod measure;
pub mod polar;
mod stack;
mod value;
mod view;

pub use annotation::*;
pub use area::*;
pub use axis::*;
pub use cartesian::{calculate_plot_area_rect, CartesianLayout};
pub use config::*;
pub use error::*;
pub use grid::*;
pub use invalidate::*;
pub use measure::*;
pub use polar::normalize_angle;
pub use stack::*;
pub use value::*;
pub use view::*;

pub use chart_geometry::{Line, Point, Rect, Size, Thickness};
