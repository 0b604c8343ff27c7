//! Categorical axis scale

use super::AxisPlotMode;
use crate::value::{AxisPlotInfo, DataValue};
use chart_geometry::wrap_degrees;

/// Default gap between adjacent category slots, as a fraction of the step
pub const DEFAULT_GAP_LENGTH: f64 = 0.3;

/// Scale state of a categorical axis
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalScale {
    pub(crate) categories: Vec<String>,
    pub(crate) plot_mode: AxisPlotMode,
    pub(crate) gap_length: f64,
    /// Emit a major tick every N categories
    pub(crate) major_tick_interval: usize,
    /// Slices of a full turn instead of positions along a line
    pub(crate) radial: bool,
}

impl Default for CategoricalScale {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            plot_mode: AxisPlotMode::BetweenTicks,
            gap_length: DEFAULT_GAP_LENGTH,
            major_tick_interval: 1,
            radial: false,
        }
    }
}

impl CategoricalScale {
    pub(crate) fn radial() -> Self {
        Self {
            radial: true,
            ..Self::default()
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn plot_mode(&self) -> AxisPlotMode {
        self.plot_mode
    }

    pub fn gap_length(&self) -> f64 {
        self.gap_length
    }

    /// Plot mode the layout actually uses; slices of a circle always sit on ticks
    pub fn actual_plot_mode(&self) -> AxisPlotMode {
        if self.radial {
            AxisPlotMode::OnTicks
        } else {
            self.plot_mode
        }
    }

    /// Index of a category key
    pub fn index_of(&self, value: &DataValue) -> Option<usize> {
        match value {
            DataValue::Category(key) => self.categories.iter().position(|c| c == key),
            DataValue::Number(n) => {
                let index = *n as usize;
                if n.fract() == 0.0 && *n >= 0.0 && index < self.categories.len() {
                    Some(index)
                } else {
                    None
                }
            }
        }
    }

    /// Normalized distance between adjacent categories
    pub fn step(&self) -> f64 {
        let count = self.categories.len();
        if count == 0 {
            return 0.0;
        }
        if self.radial {
            return 1.0 / count as f64;
        }

        match self.plot_mode {
            AxisPlotMode::BetweenTicks | AxisPlotMode::OnTicksPadded => 1.0 / count as f64,
            AxisPlotMode::OnTicks => {
                if count == 1 {
                    1.0
                } else {
                    1.0 / (count - 1) as f64
                }
            }
        }
    }

    /// Offset added to a relative position so that truncation lands on the nearest category
    pub(crate) fn step_offset(&self) -> f64 {
        if self.actual_plot_mode() == AxisPlotMode::OnTicks {
            0.5 * self.step()
        } else {
            0.0
        }
    }

    /// Major ticks as `(category index, normalized)` pairs, restricted to the visible range
    pub(crate) fn generate_ticks(
        &self,
        visible: (f64, f64),
        inverse: bool,
        interval: usize,
    ) -> Vec<(f64, f64)> {
        let count = self.categories.len();
        if count == 0 {
            return Vec::new();
        }

        let step = self.step();
        let positions: Vec<(usize, f64)> = if self.radial {
            (0..count).map(|i| (i, i as f64 * step)).collect()
        } else {
            match self.plot_mode {
                AxisPlotMode::OnTicks => (0..count).map(|i| (i, i as f64 * step)).collect(),
                AxisPlotMode::BetweenTicks => (0..=count).map(|i| (i, i as f64 * step)).collect(),
                AxisPlotMode::OnTicksPadded => {
                    (0..count).map(|i| (i, (i as f64 + 0.5) * step)).collect()
                }
            }
        };

        let interval = interval.max(1);
        positions
            .into_iter()
            .filter(|(i, _)| i % interval == 0)
            .map(|(i, nv)| (i as f64, if inverse { 1.0 - nv } else { nv }))
            .filter(|(_, nv)| *nv >= visible.0 - step && *nv <= visible.1 + step)
            .collect()
    }

    /// Label content of the tick at a category index
    pub(crate) fn label_content(&self, index: f64) -> Option<&str> {
        if index < 0.0 {
            return None;
        }
        self.categories.get(index as usize).map(String::as_str)
    }

    pub(crate) fn plot_info(&self, value: &DataValue, inverse: bool) -> Option<AxisPlotInfo> {
        let index = self.index_of(value)?;
        let step = self.step();
        let gap = self.gap_length * step;
        let value_length = index as f64 * step;
        let offset = if self.actual_plot_mode() == AxisPlotMode::OnTicks {
            0.0
        } else {
            step / 2.0
        };

        let position = if inverse {
            1.0 - value_length - offset
        } else {
            value_length + offset
        };

        Some(AxisPlotInfo::Categorical {
            key: self.categories[index].clone(),
            index,
            position,
            length: step - gap,
        })
    }

    /// Category at a relative position that already includes the step offset
    pub(crate) fn category_at(&self, relative_position: f64) -> Option<DataValue> {
        let step = self.step();
        if step <= 0.0 || !relative_position.is_finite() {
            return None;
        }

        let index = (relative_position / step).floor();
        if index < 0.0 || index >= self.categories.len() as f64 {
            return None;
        }

        Some(DataValue::Category(self.categories[index as usize].clone()))
    }

    /// Domain angle of the slice that starts at a category
    pub fn slice_angle(&self, index: usize) -> f64 {
        let count = self.categories.len();
        if count == 0 {
            return 0.0;
        }
        index as f64 * 360.0 / count as f64
    }

    /// The category whose slice angle is nearest to a domain angle
    pub fn category_at_angle(&self, angle: f64) -> Option<DataValue> {
        let count = self.categories.len();
        if count == 0 || !angle.is_finite() {
            return None;
        }

        let slice = 360.0 / count as f64;
        let index = (wrap_degrees(angle + slice / 2.0) / slice).floor() as usize % count;
        Some(DataValue::Category(self.categories[index].clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(mode: AxisPlotMode, keys: &[&str]) -> CategoricalScale {
        CategoricalScale {
            categories: keys.iter().map(|k| k.to_string()).collect(),
            plot_mode: mode,
            ..CategoricalScale::default()
        }
    }

    #[test]
    fn test_step_per_plot_mode() {
        let keys = ["a", "b", "c", "d", "e"];
        assert_eq!(scale(AxisPlotMode::BetweenTicks, &keys).step(), 0.2);
        assert_eq!(scale(AxisPlotMode::OnTicksPadded, &keys).step(), 0.2);
        assert_eq!(scale(AxisPlotMode::OnTicks, &keys).step(), 0.25);
        assert_eq!(scale(AxisPlotMode::OnTicks, &["a"]).step(), 1.0);
        assert_eq!(scale(AxisPlotMode::OnTicks, &[]).step(), 0.0);
    }

    #[test]
    fn test_between_ticks_plot_info() {
        let scale = scale(AxisPlotMode::BetweenTicks, &["a", "b", "c", "d"]);
        let info = scale.plot_info(&DataValue::from("b"), false).unwrap();

        match info {
            AxisPlotInfo::Categorical { index, position, length, .. } => {
                assert_eq!(index, 1);
                assert_eq!(position, 0.375);
                assert!((length - 0.175).abs() < 1e-12);
            }
            _ => panic!("expected categorical plot info"),
        }

        let inverse = scale.plot_info(&DataValue::from("b"), true).unwrap();
        assert_eq!(inverse.normalized_position(), 0.625);
        assert!(scale.plot_info(&DataValue::from("z"), false).is_none());
    }

    #[test]
    fn test_category_at_position() {
        let scale = scale(AxisPlotMode::BetweenTicks, &["a", "b", "c", "d"]);
        assert_eq!(scale.category_at(0.1), Some(DataValue::from("a")));
        assert_eq!(scale.category_at(0.99), Some(DataValue::from("d")));
        assert_eq!(scale.category_at(1.0), None);
        assert_eq!(scale.category_at(-0.1), None);
    }

    #[test]
    fn test_on_ticks_rounds_to_nearest() {
        let scale = scale(AxisPlotMode::OnTicks, &["a", "b", "c"]);
        let offset = scale.step_offset();
        assert_eq!(offset, 0.25);
        assert_eq!(scale.category_at(0.4 + offset), Some(DataValue::from("b")));
        assert_eq!(scale.category_at(0.2 + offset), Some(DataValue::from("a")));
    }

    #[test]
    fn test_tick_generation() {
        let between = scale(AxisPlotMode::BetweenTicks, &["a", "b"]);
        assert_eq!(
            between.generate_ticks((0.0, 1.0), false, 1),
            vec![(0.0, 0.0), (1.0, 0.5), (2.0, 1.0)]
        );

        let padded = scale(AxisPlotMode::OnTicksPadded, &["a", "b"]);
        assert_eq!(
            padded.generate_ticks((0.0, 1.0), true, 1),
            vec![(0.0, 0.75), (1.0, 0.25)]
        );

        let on_ticks = scale(AxisPlotMode::OnTicks, &["a", "b", "c", "d", "e"]);
        let ticks = on_ticks.generate_ticks((0.0, 1.0), false, 2);
        assert_eq!(ticks, vec![(0.0, 0.0), (2.0, 0.5), (4.0, 1.0)]);
    }

    #[test]
    fn test_radial_slices() {
        let mut scale = CategoricalScale::radial();
        scale.categories = vec!["n".into(), "e".into(), "s".into(), "w".into()];

        assert_eq!(scale.slice_angle(1), 90.0);
        assert_eq!(scale.category_at_angle(100.0), Some(DataValue::from("e")));
        assert_eq!(scale.category_at_angle(350.0), Some(DataValue::from("n")));
        assert_eq!(scale.category_at_angle(-80.0), Some(DataValue::from("w")));
        assert_eq!(scale.generate_ticks((0.0, 1.0), false, 1).len(), 4);
    }
}
