//! Data values and per-value plot information

use chart_geometry::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value in an axis domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    /// A point on a numerical axis (or an angle in degrees on a numerical radial axis)
    Number(f64),
    /// A category key on a categorical axis
    Category(String),
}

impl DataValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Number(v) => Some(*v),
            DataValue::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            DataValue::Category(key) => Some(key),
            DataValue::Number(_) => None,
        }
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Number(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::Category(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::Category(value)
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Number(v) => write!(f, "{}", v),
            DataValue::Category(key) => write!(f, "{}", key),
        }
    }
}

/// The result of converting one domain value against an axis.
///
/// Positions are normalized to `[0, 1]` along the axis, already flipped for
/// inverse axes. The `center_*` helpers project them onto a rectangle: X grows
/// to the right, Y grows upwards from the rectangle's bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisPlotInfo {
    Numerical {
        /// Position of the value
        normalized_value: f64,
        /// Position of the axis plot origin (the baseline bars grow from)
        normalized_origin: f64,
    },
    Categorical {
        key: String,
        index: usize,
        /// Position of the category's center
        position: f64,
        /// Normalized length of the category slot, net of the gap
        length: f64,
    },
}

impl AxisPlotInfo {
    pub fn normalized_position(&self) -> f64 {
        match self {
            AxisPlotInfo::Numerical { normalized_value, .. } => *normalized_value,
            AxisPlotInfo::Categorical { position, .. } => *position,
        }
    }

    pub fn center_x(&self, rect: &Rect) -> f64 {
        rect.x + self.normalized_position() * rect.width
    }

    pub fn center_y(&self, rect: &Rect) -> f64 {
        rect.y + (1.0 - self.normalized_position()) * rect.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(DataValue::from(2.5).as_f64(), Some(2.5));
        assert_eq!(DataValue::from("Q1").as_category(), Some("Q1"));
        assert_eq!(DataValue::from("Q1").as_f64(), None);
        assert_eq!(DataValue::from(3.0).to_string(), "3");
    }

    #[test]
    fn test_plot_info_projection() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        let info = AxisPlotInfo::Numerical {
            normalized_value: 0.25,
            normalized_origin: 0.0,
        };

        assert_eq!(info.center_x(&rect), 35.0);
        assert_eq!(info.center_y(&rect), 57.5);
    }
}
