//! Numerical axis scale
//!
//! The actual range is derived from optional user bounds and the data extent
//! reported by the host, extended to include zero for single-signed data and
//! rounded outward to a "nice" major step.

use crate::value::{AxisPlotInfo, DataValue};
use chart_geometry::{coerce, wrap_degrees};
use serde::{Deserialize, Serialize};

/// Number of major ticks the automatic step aims for
const AUTO_TICK_TARGET: usize = 8;

/// Major step of a radial (angle) numerical axis when none is given
const DEFAULT_RADIAL_STEP: f64 = 30.0;

/// Upper bound on the major ticks of one axis; a user step that would exceed
/// it is replaced by the automatic step
pub const MAX_MAJOR_TICKS: usize = 1000;

/// An inclusive value range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub minimum: f64,
    pub maximum: f64,
}

impl ValueRange {
    pub fn new(minimum: f64, maximum: f64) -> Self {
        Self { minimum, maximum }
    }

    pub fn delta(&self) -> f64 {
        self.maximum - self.minimum
    }
}

/// Scale state of a numerical axis
#[derive(Debug, Clone, PartialEq)]
pub struct NumericalScale {
    pub user_minimum: Option<f64>,
    pub user_maximum: Option<f64>,
    pub user_major_step: Option<f64>,
    /// Overrides the automatic tick target; at least 2
    pub desired_tick_count: Option<usize>,
    /// Value bars and areas grow from
    pub plot_origin: f64,
    /// Angle axes always span a full turn
    pub(crate) radial: bool,
    pub(crate) data_extent: Option<ValueRange>,
    pub(crate) actual_range: ValueRange,
    pub(crate) major_step: f64,
}

impl Default for NumericalScale {
    fn default() -> Self {
        Self {
            user_minimum: None,
            user_maximum: None,
            user_major_step: None,
            desired_tick_count: None,
            plot_origin: 0.0,
            radial: false,
            data_extent: None,
            actual_range: ValueRange::new(0.0, 0.0),
            major_step: 0.0,
        }
    }
}

impl NumericalScale {
    pub(crate) fn radial() -> Self {
        Self {
            radial: true,
            ..Self::default()
        }
    }

    pub fn actual_range(&self) -> ValueRange {
        self.actual_range
    }

    pub fn major_step(&self) -> f64 {
        self.major_step
    }

    pub(crate) fn reset(&mut self) {
        self.actual_range = ValueRange::new(0.0, 0.0);
        self.major_step = 0.0;
    }

    /// Recompute the actual range and major step
    pub(crate) fn update(&mut self) {
        if self.radial {
            self.actual_range = ValueRange::new(0.0, 360.0);
            self.major_step = self
                .user_major_step
                .filter(|s| *s > 0.0)
                .unwrap_or(DEFAULT_RADIAL_STEP);
            return;
        }

        let extent = self.data_extent.unwrap_or(ValueRange::new(0.0, 0.0));
        let mut range = extent;
        if let Some(min) = self.user_minimum {
            range.minimum = min;
        }
        if let Some(max) = self.user_maximum {
            range.maximum = max;
        }
        range.maximum = range.maximum.max(range.minimum);

        // include the origin for single-signed data
        if self.user_minimum.is_none() && range.minimum > 0.0 {
            range.minimum = 0.0;
        }
        if self.user_maximum.is_none() && range.maximum < 0.0 {
            range.maximum = 0.0;
        }
        if range.delta() == 0.0 {
            if self.user_maximum.is_none() {
                range.maximum = range.minimum + 1.0;
            } else if self.user_minimum.is_none() {
                range.minimum = range.maximum - 1.0;
            }
        }

        let tick_target = self
            .desired_tick_count
            .filter(|count| *count >= 2)
            .unwrap_or(AUTO_TICK_TARGET)
            .min(MAX_MAJOR_TICKS);
        self.major_step = match self.user_major_step.filter(|s| *s > 0.0) {
            Some(step) if range.delta() / step <= MAX_MAJOR_TICKS as f64 => step,
            Some(step) => {
                tracing::warn!(
                    target: "chart_engine::layout",
                    step,
                    delta = range.delta(),
                    "major step yields too many ticks, using the automatic step"
                );
                nice_step(range.delta(), tick_target)
            }
            None => nice_step(range.delta(), tick_target),
        };

        if self.major_step > 0.0 {
            if self.user_minimum.is_none() {
                range.minimum = (range.minimum / self.major_step).floor() * self.major_step;
            }
            if self.user_maximum.is_none() {
                range.maximum = (range.maximum / self.major_step).ceil() * self.major_step;
                if range.maximum <= range.minimum {
                    range.maximum = range.minimum + self.major_step;
                }
            }
        }

        self.actual_range = range;
    }

    /// Position of `value` in `[0, 1]` before inversion
    pub fn normalize(&self, value: f64) -> f64 {
        let delta = self.actual_range.delta();
        if delta == 0.0 {
            return 0.0;
        }
        (value - self.actual_range.minimum) / delta
    }

    /// Major ticks as `(value, normalized)` pairs, restricted to the visible range
    pub(crate) fn generate_ticks(&self, visible: (f64, f64), inverse: bool) -> Vec<(f64, f64)> {
        let mut ticks = Vec::new();
        let delta = self.actual_range.delta();
        if self.major_step <= 0.0 || delta <= 0.0 {
            return ticks;
        }

        let count = ((delta / self.major_step + 1e-9).floor() as usize).min(MAX_MAJOR_TICKS);
        let tolerance = self.major_step / delta;
        for i in 0..=count {
            let value = self.actual_range.minimum + i as f64 * self.major_step;
            let normalized = self.normalize(value);
            // a full turn ends where it starts
            if self.radial && i > 0 && chart_geometry::is_one(normalized) {
                continue;
            }
            let normalized = if inverse { 1.0 - normalized } else { normalized };
            if normalized < visible.0 - tolerance || normalized > visible.1 + tolerance {
                continue;
            }
            ticks.push((value, normalized));
        }

        ticks
    }

    pub(crate) fn plot_info(&self, value: &DataValue, inverse: bool) -> Option<AxisPlotInfo> {
        let value = value.as_f64()?;
        if !value.is_finite() {
            return None;
        }

        let normalized_value = self.normalize(value);
        let normalized_origin = coerce(self.normalize(self.plot_origin), 0.0, 1.0);

        Some(if inverse {
            AxisPlotInfo::Numerical {
                normalized_value: 1.0 - normalized_value,
                normalized_origin: 1.0 - normalized_origin,
            }
        } else {
            AxisPlotInfo::Numerical {
                normalized_value,
                normalized_origin,
            }
        })
    }

    /// Domain value at a relative position along the axis
    pub(crate) fn value_at(&self, relative_position: f64) -> DataValue {
        let range = self.actual_range;
        DataValue::Number(relative_position * range.delta() + range.minimum)
    }

    /// Domain angle of a value on a radial axis
    pub(crate) fn angle_of(&self, value: f64) -> f64 {
        wrap_degrees(self.normalize(value) * 360.0)
    }
}

/// Pick a 1/2/5 x 10^n step that splits `delta` into about `target` ticks
pub fn nice_step(delta: f64, target: usize) -> f64 {
    if delta <= 0.0 || !delta.is_finite() {
        return 1.0;
    }

    let intervals = target.saturating_sub(1).max(1) as f64;
    let raw = delta / intervals;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale_with_extent(min: f64, max: f64) -> NumericalScale {
        let mut scale = NumericalScale {
            data_extent: Some(ValueRange::new(min, max)),
            ..NumericalScale::default()
        };
        scale.update();
        scale
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(100.0, 6), 20.0);
        assert_eq!(nice_step(1.0, 11), 0.1);
        assert_eq!(nice_step(7.0, 8), 1.0);
        assert_eq!(nice_step(0.0, 8), 1.0);
    }

    #[test]
    fn test_auto_range_includes_zero() {
        let scale = scale_with_extent(12.0, 87.0);
        assert_eq!(scale.actual_range().minimum, 0.0);
        assert!(scale.actual_range().maximum >= 87.0);
        assert_eq!(scale.actual_range().maximum % scale.major_step(), 0.0);
    }

    #[test]
    fn test_negative_range_rounds_outward() {
        let scale = scale_with_extent(-47.0, 33.0);
        let range = scale.actual_range();
        assert!(range.minimum <= -47.0);
        assert!(range.maximum >= 33.0);
    }

    #[test]
    fn test_user_bounds_are_kept() {
        let mut scale = NumericalScale {
            user_minimum: Some(0.0),
            user_maximum: Some(100.0),
            user_major_step: Some(25.0),
            ..NumericalScale::default()
        };
        scale.update();

        assert_eq!(scale.actual_range(), ValueRange::new(0.0, 100.0));
        let ticks = scale.generate_ticks((0.0, 1.0), false);
        let values: Vec<f64> = ticks.iter().map(|t| t.0).collect();
        assert_eq!(values, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_dense_user_step_falls_back_to_auto_step() {
        let mut scale = NumericalScale {
            user_minimum: Some(0.0),
            user_maximum: Some(1_000_000.0),
            user_major_step: Some(1.0),
            ..NumericalScale::default()
        };
        scale.update();

        assert_eq!(scale.major_step(), nice_step(1_000_000.0, AUTO_TICK_TARGET));
        let ticks = scale.generate_ticks((0.0, 1.0), false);
        assert!(ticks.len() <= AUTO_TICK_TARGET + 1);

        scale.user_maximum = Some(1.0e9);
        scale.user_major_step = Some(1.0e-3);
        scale.update();
        assert!(scale.generate_ticks((0.0, 1.0), false).len() <= MAX_MAJOR_TICKS + 1);
    }

    #[test]
    fn test_desired_tick_count_sets_auto_step() {
        let mut scale = NumericalScale {
            user_minimum: Some(0.0),
            user_maximum: Some(100.0),
            desired_tick_count: Some(3),
            ..NumericalScale::default()
        };
        scale.update();
        let values: Vec<f64> = scale.generate_ticks((0.0, 1.0), false).iter().map(|t| t.0).collect();
        assert_eq!(values, vec![0.0, 50.0, 100.0]);

        scale.desired_tick_count = Some(6);
        scale.update();
        assert_eq!(scale.major_step(), 20.0);
        assert_eq!(scale.generate_ticks((0.0, 1.0), false).len(), 6);
    }

    #[test]
    fn test_degenerate_range_is_widened() {
        let scale = scale_with_extent(0.0, 0.0);
        assert!(scale.actual_range().delta() > 0.0);
    }

    #[test]
    fn test_inverse_ticks_are_flipped() {
        let mut scale = NumericalScale {
            user_minimum: Some(0.0),
            user_maximum: Some(10.0),
            user_major_step: Some(5.0),
            ..NumericalScale::default()
        };
        scale.update();

        let ticks = scale.generate_ticks((0.0, 1.0), true);
        assert_eq!(ticks, vec![(0.0, 1.0), (5.0, 0.5), (10.0, 0.0)]);
    }

    #[test]
    fn test_visible_range_culls_ticks() {
        let mut scale = NumericalScale {
            user_minimum: Some(0.0),
            user_maximum: Some(100.0),
            user_major_step: Some(10.0),
            ..NumericalScale::default()
        };
        scale.update();

        let ticks = scale.generate_ticks((0.0, 0.5), false);
        // one step of slack past the visible edge
        assert_eq!(ticks.last().map(|t| t.0), Some(60.0));
    }

    #[test]
    fn test_radial_scale_skips_closing_tick() {
        let mut scale = NumericalScale::radial();
        scale.update();

        let ticks = scale.generate_ticks((0.0, 1.0), false);
        assert_eq!(ticks.len(), 12);
        assert_eq!(ticks.last().map(|t| t.0), Some(330.0));
        assert_eq!(scale.angle_of(90.0), 90.0);
    }

    #[test]
    fn test_plot_info_and_value_at() {
        let scale = scale_with_extent(0.0, 100.0);
        let info = scale.plot_info(&DataValue::Number(50.0), false).unwrap();
        let position = info.normalized_position();
        assert_eq!(scale.value_at(position), DataValue::Number(50.0));

        assert!(scale.plot_info(&DataValue::Number(f64::NAN), false).is_none());
        assert!(scale.plot_info(&DataValue::from("a"), false).is_none());
    }
}
