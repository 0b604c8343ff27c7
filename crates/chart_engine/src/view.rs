//! View context supplied by the host
//!
//! The host owns pan and zoom. The engine only reads them to build the
//! virtual plot rectangle and to cull ticks outside the visible clip.

use chart_geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Pan/zoom state of the control that displays the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewContext {
    /// Horizontal pan as a fraction of the plot width
    pub plot_origin_x: f64,
    /// Vertical pan as a fraction of the plot height
    pub plot_origin_y: f64,
    /// Horizontal scale factor, never below 1
    pub zoom_width: f64,
    /// Vertical scale factor, never below 1
    pub zoom_height: f64,
    /// Visible part of the plot area, used to cull ticks when zoomed
    pub plot_area_clip: Rect,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self {
            plot_origin_x: 0.0,
            plot_origin_y: 0.0,
            zoom_width: 1.0,
            zoom_height: 1.0,
            plot_area_clip: Rect::default(),
        }
    }
}

impl ViewContext {
    /// Create an unzoomed, unpanned view
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether either zoom factor is above 1
    pub fn is_zoomed(&self) -> bool {
        self.zoom_width > 1.0 || self.zoom_height > 1.0
    }

    /// Pan offset in pixels for the given plot rectangle
    pub fn pan_offset(&self, plot: &Rect) -> Point {
        Point::new(self.plot_origin_x * plot.width, self.plot_origin_y * plot.height)
    }

    /// The full pannable surface: the plot rectangle scaled by the zoom factors
    pub fn virtual_rect(&self, plot: &Rect) -> Rect {
        plot.scale_size(self.zoom_width, self.zoom_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_identity() {
        let view = ViewContext::new();
        let plot = Rect::new(30.0, 0.0, 170.0, 80.0);

        assert!(!view.is_zoomed());
        assert_eq!(view.virtual_rect(&plot), plot);
        assert_eq!(view.pan_offset(&plot), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_zoomed_virtual_rect() {
        let view = ViewContext {
            plot_origin_x: -0.5,
            zoom_width: 2.0,
            ..ViewContext::default()
        };
        let plot = Rect::new(10.0, 10.0, 100.0, 50.0);

        assert!(view.is_zoomed());
        assert_eq!(view.virtual_rect(&plot), Rect::new(10.0, 10.0, 200.0, 50.0));
        assert_eq!(view.pan_offset(&plot).x, -50.0);
    }
}
