//! Chart grid
//!
//! Cartesian grids draw a line through every visible major tick; polar grids
//! draw a circle per radius tick and a spoke per angle tick.

use crate::axis::Axis;
use crate::polar::normalize_angle;
use crate::view::ViewContext;
use chart_geometry::{arc_point, is_zero, Line, Point, Rect};
use serde::{Deserialize, Serialize};

/// A grid circle around the polar center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCircle {
    pub center: Point,
    pub radius: f64,
}

/// Grid attached to a chart area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGrid {
    /// Lines for the First axis ticks
    pub show_first_lines: bool,
    /// Lines for the Second axis ticks
    pub show_second_lines: bool,
    #[serde(skip)]
    first_lines: Vec<Line>,
    #[serde(skip)]
    second_lines: Vec<Line>,
    #[serde(skip)]
    circles: Vec<GridCircle>,
    #[serde(skip)]
    is_valid: bool,
}

impl Default for ChartGrid {
    fn default() -> Self {
        Self {
            show_first_lines: true,
            show_second_lines: true,
            first_lines: Vec::new(),
            second_lines: Vec::new(),
            circles: Vec::new(),
            is_valid: false,
        }
    }
}

impl ChartGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertical lines of a cartesian grid
    pub fn first_lines(&self) -> &[Line] {
        &self.first_lines
    }

    /// Horizontal lines of a cartesian grid, or the spokes of a polar grid
    pub fn second_lines(&self) -> &[Line] {
        &self.second_lines
    }

    /// Circles of a polar grid
    pub fn circles(&self) -> &[GridCircle] {
        &self.circles
    }

    /// Whether the geometry matches the last arrange
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub(crate) fn invalidate(&mut self) {
        self.is_valid = false;
    }

    fn clear(&mut self) {
        self.first_lines.clear();
        self.second_lines.clear();
        self.circles.clear();
    }

    /// Lines through the visible ticks of the primary axes
    pub(crate) fn arrange_cartesian(
        &mut self,
        first: Option<&Axis>,
        second: Option<&Axis>,
        plot_rect: &Rect,
        view: &ViewContext,
    ) {
        self.clear();
        let virtual_rect = view.virtual_rect(plot_rect);
        let pan = view.pan_offset(plot_rect);

        if let Some(axis) = first.filter(|_| self.show_first_lines) {
            for tick in axis.ticks().iter().filter(|t| t.is_visible) {
                let x = virtual_rect.x + tick.normalized_value * virtual_rect.width + pan.x;
                self.first_lines.push(Line::new(
                    Point::new(x, plot_rect.y),
                    Point::new(x, plot_rect.bottom()),
                ));
            }
        }

        if let Some(axis) = second.filter(|_| self.show_second_lines) {
            for tick in axis.ticks().iter().filter(|t| t.is_visible) {
                let y = virtual_rect.y + (1.0 - tick.normalized_value) * virtual_rect.height + pan.y;
                self.second_lines.push(Line::new(
                    Point::new(plot_rect.x, y),
                    Point::new(plot_rect.right(), y),
                ));
            }
        }

        self.is_valid = true;
    }

    /// Circles for radius ticks, spokes for angle ticks
    pub(crate) fn arrange_polar(
        &mut self,
        radius_axis: Option<&Axis>,
        angle_axis: Option<&Axis>,
        plot_rect: &Rect,
        start_angle: f64,
    ) {
        self.clear();
        let center = plot_rect.center();
        let max_radius = plot_rect.width / 2.0;

        if let Some(axis) = radius_axis.filter(|_| self.show_first_lines) {
            for tick in axis.ticks() {
                let radius = tick.normalized_value * max_radius;
                if is_zero(radius) {
                    continue;
                }
                self.circles.push(GridCircle { center, radius });
            }
        }

        if let Some(axis) = angle_axis.filter(|_| self.show_second_lines) {
            for tick in axis.ticks() {
                let angle = normalize_angle(axis.tick_angle(tick), start_angle, axis.is_inverse());
                self.second_lines
                    .push(Line::new(center, arc_point(angle, center, max_radius)));
            }
        }

        self.is_valid = true;
    }
}
