//! Axis model
//!
//! An axis owns a value domain (a numerical range or a list of categories),
//! turns it into ticks and labels for the space it is given, and reports how
//! much room it needs. The chart area asks it to measure, arranges it into a
//! slot and then uses it to convert between data values and pixels.

mod categorical;
mod layout;
mod numerical;
mod tick;

pub use categorical::*;
pub use layout::*;
pub use numerical::*;
pub use tick::*;

use crate::config::AxisDefaults;
use crate::error::{ChartError, ChartResult};
use crate::invalidate::InvalidateFlags;
use crate::measure::ContentKind;
use crate::value::{AxisPlotInfo, DataValue};
use crate::view::ViewContext;
use chart_geometry::{is_one, Rect, Size, Thickness};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an axis owned by a chart area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisId(Uuid);

impl AxisId {
    /// Create a new random AxisId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AxisId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AxisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical role of an axis in a two-axis chart
///
/// Cartesian: First is horizontal, Second is vertical.
/// Polar: First is the radius axis, Second the angle axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisType {
    First,
    Second,
}

/// Side of the plot area a vertical axis sits on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisHorizontalLocation {
    #[default]
    Left,
    Right,
}

/// Side of the plot area a horizontal axis sits on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisVerticalLocation {
    #[default]
    Bottom,
    Top,
}

/// How labels are fitted when they overlap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisLabelFitMode {
    #[default]
    None,
    /// Wrap labels onto additional rows
    MultiLine,
}

/// Where data points are placed relative to the ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPlotMode {
    /// Points sit on the ticks
    OnTicks,
    /// Points sit in the middle of the slot between two ticks
    #[default]
    BetweenTicks,
    /// Points sit on ticks with half a slot of padding at both ends
    OnTicksPadded,
}

/// Treatment of the last axis label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisLastLabelVisibility {
    /// Shown, and the axis reserves margin so that it fits
    #[default]
    Visible,
    /// Not shown
    Hidden,
    /// Shown but allowed to be clipped by the host
    Clip,
}

/// The value domain of an axis
#[derive(Debug, Clone, PartialEq)]
pub enum AxisScale {
    Numerical(NumericalScale),
    Categorical(CategoricalScale),
}

/// A chart axis
#[derive(Debug, Clone)]
pub struct Axis {
    id: AxisId,
    axis_type: AxisType,
    scale: AxisScale,
    pub(crate) is_primary: bool,
    is_visible: bool,
    is_inverse: bool,
    horizontal_location: AxisHorizontalLocation,
    vertical_location: AxisVerticalLocation,
    major_tick_length: f64,
    major_tick_offset: usize,
    tick_thickness: f64,
    line_thickness: f64,
    show_labels: bool,
    label_interval: usize,
    label_offset: usize,
    label_fit_mode: AxisLabelFitMode,
    label_format: String,
    last_label_visibility: AxisLastLabelVisibility,
    title: AxisTitle,
    ticks: Vec<AxisTick>,
    labels: Vec<AxisLabel>,
    strategy: AxisLayoutStrategy,
    layout: LayoutState,
    desired_size: Size,
    desired_margin: Thickness,
    layout_slot: Rect,
    is_updated: bool,
    is_measure_valid: bool,
    last_measure_size: Option<Size>,
    visible_range: Option<(f64, f64)>,
    major_tick_count: usize,
}

impl Axis {
    /// Create an axis with the given role and scale
    pub fn new(axis_type: AxisType, scale: AxisScale) -> Self {
        let defaults = AxisDefaults::default();
        let strategy = AxisLayoutStrategy::for_type(axis_type);
        Self {
            id: AxisId::new(),
            axis_type,
            scale,
            is_primary: false,
            is_visible: true,
            is_inverse: false,
            horizontal_location: AxisHorizontalLocation::default(),
            vertical_location: AxisVerticalLocation::default(),
            major_tick_length: defaults.major_tick_length,
            major_tick_offset: 0,
            tick_thickness: defaults.tick_thickness,
            line_thickness: defaults.line_thickness,
            show_labels: true,
            label_interval: 1,
            label_offset: 0,
            label_fit_mode: defaults.label_fit_mode,
            label_format: String::new(),
            last_label_visibility: defaults.last_label_visibility,
            title: AxisTitle::default(),
            ticks: Vec::new(),
            labels: Vec::new(),
            strategy,
            layout: LayoutState::default(),
            desired_size: Size::EMPTY,
            desired_margin: Thickness::default(),
            layout_slot: Rect::default(),
            is_updated: false,
            is_measure_valid: false,
            last_measure_size: None,
            visible_range: None,
            major_tick_count: 0,
        }
    }

    /// A linear value axis
    pub fn numerical(axis_type: AxisType) -> Self {
        Self::new(axis_type, AxisScale::Numerical(NumericalScale::default()))
    }

    /// A category axis
    pub fn categorical(axis_type: AxisType) -> Self {
        Self::new(axis_type, AxisScale::Categorical(CategoricalScale::default()))
    }

    /// A numerical angle axis spanning a full turn in degrees
    pub fn radial_numerical() -> Self {
        Self::new(AxisType::Second, AxisScale::Numerical(NumericalScale::radial()))
    }

    /// A category angle axis that splits the circle into equal slices
    pub fn radial_categorical() -> Self {
        Self::new(AxisType::Second, AxisScale::Categorical(CategoricalScale::radial()))
    }

    /// Apply engine-wide axis defaults
    pub fn with_defaults(mut self, defaults: &AxisDefaults) -> Self {
        self.major_tick_length = defaults.major_tick_length;
        self.line_thickness = defaults.line_thickness;
        self.tick_thickness = defaults.tick_thickness;
        self.label_fit_mode = defaults.label_fit_mode;
        self.last_label_visibility = defaults.last_label_visibility;
        self
    }

    /// Adopt `defaults` for every metric still at its built-in value, so
    /// values set through the builders survive
    pub(crate) fn inherit_defaults(&mut self, defaults: &AxisDefaults) {
        let builtin = AxisDefaults::default();
        if self.major_tick_length == builtin.major_tick_length {
            self.major_tick_length = defaults.major_tick_length;
        }
        if self.line_thickness == builtin.line_thickness {
            self.line_thickness = defaults.line_thickness;
        }
        if self.tick_thickness == builtin.tick_thickness {
            self.tick_thickness = defaults.tick_thickness;
        }
        if self.label_fit_mode == builtin.label_fit_mode {
            self.label_fit_mode = defaults.label_fit_mode;
        }
        if self.last_label_visibility == builtin.last_label_visibility {
            self.last_label_visibility = defaults.last_label_visibility;
        }
    }

    pub fn with_primary(mut self, primary: bool) -> Self {
        self.is_primary = primary;
        self
    }

    pub fn with_inverse(mut self, inverse: bool) -> Self {
        self.is_inverse = inverse;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title.content = Some(title.into());
        self
    }

    pub fn with_horizontal_location(mut self, location: AxisHorizontalLocation) -> Self {
        self.horizontal_location = location;
        self
    }

    pub fn with_vertical_location(mut self, location: AxisVerticalLocation) -> Self {
        self.vertical_location = location;
        self
    }

    pub fn with_label_fit_mode(mut self, mode: AxisLabelFitMode) -> Self {
        self.label_fit_mode = mode;
        self
    }

    pub fn with_last_label_visibility(mut self, visibility: AxisLastLabelVisibility) -> Self {
        self.last_label_visibility = visibility;
        self
    }

    pub fn with_label_format(mut self, format: impl Into<String>) -> Self {
        self.label_format = format.into();
        self
    }

    /// Fix the numerical range; ignored by categorical axes
    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        if let AxisScale::Numerical(scale) = &mut self.scale {
            scale.user_minimum = Some(minimum);
            scale.user_maximum = Some(maximum);
        }
        self
    }

    /// Fix the numerical major step; ignored by categorical axes
    pub fn with_major_step(mut self, step: f64) -> Self {
        if let AxisScale::Numerical(scale) = &mut self.scale {
            scale.user_major_step = Some(step);
        }
        self
    }

    /// Aim the automatic major step of a numerical axis at `count` ticks
    pub fn with_desired_tick_count(mut self, count: usize) -> Self {
        if let AxisScale::Numerical(scale) = &mut self.scale {
            scale.desired_tick_count = Some(count).filter(|c| *c >= 2);
        }
        self
    }

    /// Set the data extent a numerical axis derives its range from
    pub fn with_data_extent(mut self, minimum: f64, maximum: f64) -> Self {
        if let AxisScale::Numerical(scale) = &mut self.scale {
            scale.data_extent = Some(ValueRange::new(minimum, maximum));
        }
        self
    }

    /// Set the categories of a categorical axis
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let AxisScale::Categorical(scale) = &mut self.scale {
            scale.categories = categories.into_iter().map(Into::into).collect();
        }
        self
    }

    pub fn with_plot_mode(mut self, mode: AxisPlotMode) -> Self {
        if let AxisScale::Categorical(scale) = &mut self.scale {
            scale.plot_mode = mode;
        }
        self
    }

    pub fn id(&self) -> AxisId {
        self.id
    }

    pub fn axis_type(&self) -> AxisType {
        self.axis_type
    }

    pub(crate) fn set_axis_type(&mut self, axis_type: AxisType) {
        self.axis_type = axis_type;
    }

    pub fn scale(&self) -> &AxisScale {
        &self.scale
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn is_inverse(&self) -> bool {
        self.is_inverse
    }

    /// Whether the axis has built its value domain since the last reset
    pub fn is_updated(&self) -> bool {
        self.is_updated
    }

    /// Whether the axis can be laid out on a circle
    pub fn is_radial(&self) -> bool {
        match &self.scale {
            AxisScale::Numerical(scale) => scale.radial,
            AxisScale::Categorical(scale) => scale.radial,
        }
    }

    pub fn horizontal_location(&self) -> AxisHorizontalLocation {
        self.horizontal_location
    }

    pub fn vertical_location(&self) -> AxisVerticalLocation {
        self.vertical_location
    }

    pub fn major_tick_length(&self) -> f64 {
        self.major_tick_length
    }

    pub fn tick_thickness(&self) -> f64 {
        self.tick_thickness
    }

    pub fn line_thickness(&self) -> f64 {
        self.line_thickness
    }

    pub fn label_fit_mode(&self) -> AxisLabelFitMode {
        self.label_fit_mode
    }

    pub fn last_label_visibility(&self) -> AxisLastLabelVisibility {
        self.last_label_visibility
    }

    pub fn strategy(&self) -> AxisLayoutStrategy {
        self.strategy
    }

    pub(crate) fn set_strategy(&mut self, strategy: AxisLayoutStrategy) {
        if self.strategy != strategy {
            self.strategy = strategy;
            self.invalidate();
        }
    }

    pub fn desired_size(&self) -> Size {
        self.desired_size
    }

    pub fn desired_margin(&self) -> Thickness {
        self.desired_margin
    }

    /// The rectangle the axis was last arranged into
    pub fn layout_slot(&self) -> Rect {
        self.layout_slot
    }

    pub fn ticks(&self) -> &[AxisTick] {
        &self.ticks
    }

    pub fn labels(&self) -> &[AxisLabel] {
        &self.labels
    }

    pub fn title(&self) -> &AxisTitle {
        &self.title
    }

    pub fn first_tick(&self) -> Option<&AxisTick> {
        self.ticks.first()
    }

    pub fn last_tick(&self) -> Option<&AxisTick> {
        self.ticks.last()
    }

    /// Categorical axes may plot between ticks; numerical axes always plot on them
    pub fn actual_plot_mode(&self) -> AxisPlotMode {
        match &self.scale {
            AxisScale::Numerical(_) => AxisPlotMode::OnTicks,
            AxisScale::Categorical(scale) => scale.actual_plot_mode(),
        }
    }

    pub fn set_visible(&mut self, visible: bool) -> InvalidateFlags {
        self.is_visible = visible;
        InvalidateFlags::ALL
    }

    pub fn set_inverse(&mut self, inverse: bool) -> InvalidateFlags {
        self.is_inverse = inverse;
        InvalidateFlags::ALL
    }

    pub fn set_primary(&mut self, primary: bool) -> InvalidateFlags {
        self.is_primary = primary;
        InvalidateFlags::ALL
    }

    pub fn set_title(&mut self, title: Option<String>) -> InvalidateFlags {
        self.title = AxisTitle {
            content: title,
            ..AxisTitle::default()
        };
        InvalidateFlags::ALL
    }

    pub fn set_horizontal_location(&mut self, location: AxisHorizontalLocation) -> InvalidateFlags {
        self.horizontal_location = location;
        InvalidateFlags::ALL
    }

    pub fn set_vertical_location(&mut self, location: AxisVerticalLocation) -> InvalidateFlags {
        self.vertical_location = location;
        InvalidateFlags::ALL
    }

    pub fn set_major_tick_length(&mut self, length: f64) -> ChartResult<InvalidateFlags> {
        self.major_tick_length = non_negative("major_tick_length", length)?;
        Ok(InvalidateFlags::ALL)
    }

    pub fn set_major_tick_offset(&mut self, offset: usize) -> InvalidateFlags {
        self.major_tick_offset = offset;
        InvalidateFlags::ALL
    }

    pub fn set_tick_thickness(&mut self, thickness: f64) -> ChartResult<InvalidateFlags> {
        self.tick_thickness = non_negative("tick_thickness", thickness)?;
        Ok(InvalidateFlags::INVALIDATE_AXES)
    }

    pub fn set_line_thickness(&mut self, thickness: f64) -> ChartResult<InvalidateFlags> {
        self.line_thickness = non_negative("line_thickness", thickness)?;
        Ok(InvalidateFlags::INVALIDATE_AXES)
    }

    pub fn set_show_labels(&mut self, show: bool) -> InvalidateFlags {
        self.show_labels = show;
        InvalidateFlags::ALL
    }

    /// Show a label on every `interval`-th tick
    pub fn set_label_interval(&mut self, interval: usize) -> ChartResult<InvalidateFlags> {
        if interval == 0 {
            return Err(ChartError::InvalidSetting(
                "label_interval must be at least 1".to_string(),
            ));
        }
        self.label_interval = interval;
        Ok(InvalidateFlags::ALL)
    }

    /// Skip the labels of the first `offset` ticks
    pub fn set_label_offset(&mut self, offset: usize) -> InvalidateFlags {
        self.label_offset = offset;
        InvalidateFlags::ALL
    }

    pub fn set_label_fit_mode(&mut self, mode: AxisLabelFitMode) -> InvalidateFlags {
        self.label_fit_mode = mode;
        InvalidateFlags::ALL
    }

    pub fn set_label_format(&mut self, format: impl Into<String>) -> InvalidateFlags {
        self.label_format = format.into();
        InvalidateFlags::ALL
    }

    pub fn set_last_label_visibility(
        &mut self,
        visibility: AxisLastLabelVisibility,
    ) -> InvalidateFlags {
        self.last_label_visibility = visibility;
        InvalidateFlags::ALL
    }

    /// Set or clear the user range of a numerical axis
    pub fn set_range(
        &mut self,
        minimum: Option<f64>,
        maximum: Option<f64>,
    ) -> ChartResult<InvalidateFlags> {
        if let (Some(min), Some(max)) = (minimum, maximum) {
            if min > max {
                return Err(ChartError::InvalidSetting(format!(
                    "minimum {} is greater than maximum {}",
                    min, max
                )));
            }
        }
        let scale = self.numerical_scale_mut()?;
        scale.user_minimum = minimum;
        scale.user_maximum = maximum;
        Ok(InvalidateFlags::ALL)
    }

    /// Set or clear the user major step of a numerical axis
    pub fn set_major_step(&mut self, step: Option<f64>) -> ChartResult<InvalidateFlags> {
        if let Some(step) = step {
            if step <= 0.0 || !step.is_finite() {
                return Err(ChartError::InvalidSetting(format!(
                    "major step must be positive, got {}",
                    step
                )));
            }
        }
        self.numerical_scale_mut()?.user_major_step = step;
        Ok(InvalidateFlags::ALL)
    }

    /// Set or clear the tick count the automatic step of a numerical axis aims for
    pub fn set_desired_tick_count(&mut self, count: Option<usize>) -> ChartResult<InvalidateFlags> {
        if let Some(count) = count {
            if count < 2 {
                return Err(ChartError::InvalidSetting(format!(
                    "desired tick count must be at least 2, got {}",
                    count
                )));
            }
        }
        self.numerical_scale_mut()?.desired_tick_count = count;
        Ok(InvalidateFlags::ALL)
    }

    /// Set the value bars and areas grow from
    pub fn set_plot_origin(&mut self, origin: f64) -> ChartResult<InvalidateFlags> {
        self.numerical_scale_mut()?.plot_origin = origin;
        Ok(InvalidateFlags::INVALIDATE_SERIES | InvalidateFlags::INVALIDATE_ANNOTATIONS)
    }

    /// Report the extent of the data plotted against a numerical axis
    pub fn set_data_extent(&mut self, minimum: f64, maximum: f64) -> ChartResult<InvalidateFlags> {
        if !minimum.is_finite() || !maximum.is_finite() || minimum > maximum {
            return Err(ChartError::InvalidSetting(format!(
                "invalid data extent {}..{}",
                minimum, maximum
            )));
        }
        self.numerical_scale_mut()?.data_extent = Some(ValueRange::new(minimum, maximum));
        Ok(InvalidateFlags::ALL)
    }

    /// Replace the categories of a categorical axis
    pub fn set_categories(&mut self, categories: Vec<String>) -> ChartResult<InvalidateFlags> {
        self.categorical_scale_mut()?.categories = categories;
        Ok(InvalidateFlags::ALL)
    }

    pub fn set_plot_mode(&mut self, mode: AxisPlotMode) -> ChartResult<InvalidateFlags> {
        self.categorical_scale_mut()?.plot_mode = mode;
        Ok(InvalidateFlags::ALL)
    }

    /// Gap between category slots as a fraction of the step, in `[0, 1]`
    pub fn set_gap_length(&mut self, gap: f64) -> ChartResult<InvalidateFlags> {
        if !(0.0..=1.0).contains(&gap) {
            return Err(ChartError::InvalidSetting(format!(
                "gap_length must be within [0, 1], got {}",
                gap
            )));
        }
        self.categorical_scale_mut()?.gap_length = gap;
        Ok(InvalidateFlags::INVALIDATE_SERIES)
    }

    pub fn set_major_tick_interval(&mut self, interval: usize) -> ChartResult<InvalidateFlags> {
        if interval == 0 {
            return Err(ChartError::InvalidSetting(
                "major_tick_interval must be at least 1".to_string(),
            ));
        }
        self.categorical_scale_mut()?.major_tick_interval = interval;
        Ok(InvalidateFlags::ALL)
    }

    fn numerical_scale_mut(&mut self) -> ChartResult<&mut NumericalScale> {
        match &mut self.scale {
            AxisScale::Numerical(scale) => Ok(scale),
            AxisScale::Categorical(_) => Err(ChartError::InvalidSetting(
                "setting applies to numerical axes only".to_string(),
            )),
        }
    }

    fn categorical_scale_mut(&mut self) -> ChartResult<&mut CategoricalScale> {
        match &mut self.scale {
            AxisScale::Categorical(scale) => Ok(scale),
            AxisScale::Numerical(_) => Err(ChartError::InvalidSetting(
                "setting applies to categorical axes only".to_string(),
            )),
        }
    }

    /// Build the value domain if it is stale
    pub(crate) fn update(&mut self) {
        if self.is_updated {
            return;
        }

        if let AxisScale::Numerical(scale) = &mut self.scale {
            scale.update();
        }
        self.is_updated = true;
        self.visible_range = None;
    }

    /// Mark the domain and layout stale
    pub(crate) fn reset_state(&mut self) {
        self.is_updated = false;
        self.is_measure_valid = false;
        self.visible_range = None;
    }

    /// Drop the domain, ticks and labels
    pub(crate) fn reset(&mut self) {
        self.reset_state();
        self.ticks.clear();
        self.labels.clear();
        if let AxisScale::Numerical(scale) = &mut self.scale {
            scale.reset();
        }
    }

    /// Drop cached measurement so that ticks and labels are rebuilt
    pub(crate) fn invalidate(&mut self) {
        self.is_measure_valid = false;
        self.visible_range = None;
        self.title.desired_size = None;
    }

    pub(crate) fn on_zoom_changed(&mut self) {
        self.is_measure_valid = false;
    }

    pub(crate) fn on_plot_origin_changed(&mut self) {
        self.is_measure_valid = false;
    }

    /// Measure the axis for the available size.
    ///
    /// Returns `true` when a new measurement was taken; repeated calls with
    /// the same size are served from the cache.
    pub(crate) fn measure(&mut self, available: Size, ctx: &LayoutContext<'_>) -> bool {
        if !self.is_visible {
            self.desired_size = Size::EMPTY;
            self.desired_margin = Thickness::default();
            return false;
        }

        if self.last_measure_size != Some(available) {
            self.is_measure_valid = false;
        }
        if self.is_measure_valid {
            return false;
        }

        self.last_measure_size = Some(available);
        self.measure_core(available, ctx);
        self.is_measure_valid = true;
        true
    }

    /// Arrange the axis into its final slot, re-measuring if the slot size
    /// differs from the last measured size.
    pub(crate) fn arrange(&mut self, rect: Rect, ctx: &LayoutContext<'_>) -> Rect {
        if !self.is_visible {
            self.layout_slot = Rect::default();
            return rect;
        }

        if self.last_measure_size != Some(rect.size()) {
            self.measure(rect.size(), ctx);
        }
        self.arrange_strategy(rect, ctx);
        self.layout_slot = rect;
        rect
    }

    fn measure_core(&mut self, available: Size, ctx: &LayoutContext<'_>) {
        self.build_ticks_and_labels(&ctx.view);

        for label in self.labels.iter_mut().filter(|l| l.desired_size.is_none()) {
            label.desired_size = Some(ctx.measurer.measure(&label.content, ContentKind::Label));
        }
        if self.title.desired_size.is_none() {
            self.title.desired_size = Some(match &self.title.content {
                Some(content) => ctx.measurer.measure(content, ContentKind::Title),
                None => Size::EMPTY,
            });
        }

        self.desired_size = self.strategy_desired_size(available);
        self.desired_margin = self.strategy_desired_margin(available, ctx);
    }

    fn build_ticks_and_labels(&mut self, view: &ViewContext) -> bool {
        let range = self.strategy_visible_range(view);
        if self.visible_range == Some(range) {
            return false;
        }
        self.visible_range = Some(range);

        self.labels.clear();
        self.ticks.clear();
        self.update_ticks(range, view);
        self.update_labels();
        true
    }

    fn update_ticks(&mut self, range: (f64, f64), view: &ViewContext) {
        let raw = match &self.scale {
            AxisScale::Numerical(scale) => scale.generate_ticks(range, self.is_inverse),
            AxisScale::Categorical(scale) => {
                // fewer categories per tick as the axis is zoomed in
                let zoom = (self.strategy_zoom(view) + 0.5).floor().max(1.0) as usize;
                let interval = (scale.major_tick_interval / zoom).max(1);
                scale.generate_ticks(range, self.is_inverse, interval)
            }
        };

        self.ticks = raw
            .into_iter()
            .skip(self.major_tick_offset)
            .map(|(value, normalized)| AxisTick::new(value, normalized))
            .collect();
        self.major_tick_count = self.ticks.len();

        if let Some(first) = self.ticks.first_mut() {
            first.position = TickPosition::First;
        }
        if self.ticks.len() > 1 {
            if let Some(last) = self.ticks.last_mut() {
                last.position = TickPosition::Last;
            }
        }
    }

    fn update_labels(&mut self) {
        if !self.show_labels {
            return;
        }

        let plot_mode = self.actual_plot_mode();
        let mut skip = 1;
        for index in 0..self.ticks.len() {
            if index < self.label_offset {
                continue;
            }
            if skip > 1 {
                skip -= 1;
                continue;
            }

            let normalized = self.ticks[index].normalized_value;
            let forward = if self.is_inverse { 1.0 - normalized } else { normalized };
            // the closing tick of the last slot has no label
            if plot_mode == AxisPlotMode::BetweenTicks && is_one(forward) {
                break;
            }

            let Some(content) = self.tick_label_content(&self.ticks[index]) else {
                continue;
            };
            let content = apply_label_format(&self.label_format, &content);

            let position = if plot_mode == AxisPlotMode::BetweenTicks {
                let length = match self.ticks.get(index + 1) {
                    Some(next) => next.normalized_value - normalized,
                    None if index > 0 => normalized - self.ticks[index - 1].normalized_value,
                    None => 0.0,
                };
                normalized + length / 2.0
            } else {
                normalized
            };

            self.ticks[index].label = Some(self.labels.len());
            self.labels.push(AxisLabel::new(content, position));
            skip = self.label_interval;
        }

        if self.labels.len() > 1 && self.last_label_visibility == AxisLastLabelVisibility::Hidden {
            if let Some(last) = self.labels.last_mut() {
                last.is_visible = false;
            }
        }
    }

    fn tick_label_content(&self, tick: &AxisTick) -> Option<String> {
        match &self.scale {
            AxisScale::Numerical(_) => Some(format_tick_value(tick.value)),
            AxisScale::Categorical(scale) => scale.label_content(tick.value).map(str::to_string),
        }
    }

    /// Relative position of a pixel coordinate along the axis.
    ///
    /// First axes run left to right, Second axes bottom to top. The step
    /// offset is added after inversion.
    pub(crate) fn relative_position(&self, coordinate: f64, rect: &Rect, step_offset: f64) -> f64 {
        let position = match self.axis_type {
            AxisType::First => (coordinate - rect.x) / rect.width,
            AxisType::Second => 1.0 - (coordinate - rect.y) / rect.height,
        };
        let position = if self.is_inverse { 1.0 - position } else { position };
        position + step_offset
    }

    /// Plot information for a domain value, or `None` if the axis is not
    /// updated or the value is not part of its domain
    pub fn plot_info(&self, value: &DataValue) -> Option<AxisPlotInfo> {
        if !self.is_updated {
            return None;
        }
        match &self.scale {
            AxisScale::Numerical(scale) => scale.plot_info(value, self.is_inverse),
            AxisScale::Categorical(scale) => scale.plot_info(value, self.is_inverse),
        }
    }

    /// Domain value at a pixel coordinate measured against the virtual plot rect
    pub fn physical_to_data(&self, coordinate: f64, virtual_rect: &Rect) -> Option<DataValue> {
        if !self.is_updated {
            return None;
        }

        match &self.scale {
            AxisScale::Numerical(scale) => {
                let position = self.relative_position(coordinate, virtual_rect, 0.0);
                position.is_finite().then(|| scale.value_at(position))
            }
            AxisScale::Categorical(scale) => {
                if scale.categories.is_empty() {
                    return None;
                }
                let position =
                    self.relative_position(coordinate, virtual_rect, scale.step_offset());
                scale.category_at(position)
            }
        }
    }

    /// Domain angle of a value on an angle axis
    pub fn value_angle(&self, value: &DataValue) -> Option<f64> {
        if !self.is_updated {
            return None;
        }
        match &self.scale {
            AxisScale::Numerical(scale) => value.as_f64().filter(|v| v.is_finite()).map(|v| scale.angle_of(v)),
            AxisScale::Categorical(scale) => scale.index_of(value).map(|i| scale.slice_angle(i)),
        }
    }

    /// Domain value at a domain angle on an angle axis
    pub fn angle_to_data(&self, angle: f64) -> Option<DataValue> {
        if !self.is_updated {
            return None;
        }
        match &self.scale {
            AxisScale::Numerical(_) => angle.is_finite().then_some(DataValue::Number(angle)),
            AxisScale::Categorical(scale) => scale.category_at_angle(angle),
        }
    }

    /// Domain angle of a tick on an angle axis
    pub(crate) fn tick_angle(&self, tick: &AxisTick) -> f64 {
        match &self.scale {
            AxisScale::Numerical(scale) => scale.angle_of(tick.value),
            AxisScale::Categorical(scale) => scale.slice_angle(tick.value as usize),
        }
    }
}

fn non_negative(name: &str, value: f64) -> ChartResult<f64> {
    if value < 0.0 || !value.is_finite() {
        return Err(ChartError::InvalidSetting(format!(
            "{} may not be negative, got {}",
            name, value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::CharWidthMeasurer;

    fn ctx(measurer: &CharWidthMeasurer) -> LayoutContext<'_> {
        LayoutContext::new(ViewContext::default(), measurer, 0.0)
    }

    #[test]
    fn test_axis_id_display() {
        let id = AxisId::new();
        assert_eq!(id.to_string(), id.as_uuid().to_string());
        assert_ne!(AxisId::new(), id);
    }

    #[test]
    fn test_conversions_require_update() {
        let mut axis = Axis::numerical(AxisType::First).with_range(0.0, 100.0);
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);

        assert!(axis.plot_info(&DataValue::Number(50.0)).is_none());
        assert!(axis.physical_to_data(100.0, &rect).is_none());

        axis.update();
        assert_eq!(axis.physical_to_data(100.0, &rect), Some(DataValue::Number(50.0)));
    }

    #[test]
    fn test_second_axis_runs_bottom_up() {
        let mut axis = Axis::numerical(AxisType::Second).with_range(0.0, 10.0);
        axis.update();
        let rect = Rect::new(0.0, 0.0, 50.0, 100.0);

        assert_eq!(axis.physical_to_data(100.0, &rect), Some(DataValue::Number(0.0)));
        assert_eq!(axis.physical_to_data(0.0, &rect), Some(DataValue::Number(10.0)));

        axis.set_inverse(true);
        assert_eq!(axis.physical_to_data(0.0, &rect), Some(DataValue::Number(0.0)));
    }

    #[test]
    fn test_categorical_inverse_lookup() {
        let mut axis = Axis::categorical(AxisType::First)
            .with_categories(["a", "b", "c"])
            .with_plot_mode(AxisPlotMode::OnTicks)
            .with_inverse(true);
        axis.update();
        let rect = Rect::new(0.0, 0.0, 100.0, 10.0);

        assert_eq!(axis.physical_to_data(0.0, &rect), Some(DataValue::from("c")));
        assert_eq!(axis.physical_to_data(100.0, &rect), Some(DataValue::from("a")));
        assert_eq!(axis.physical_to_data(45.0, &rect), Some(DataValue::from("b")));
    }

    #[test]
    fn test_labels_follow_ticks() {
        let measurer = CharWidthMeasurer::new();
        let mut axis = Axis::numerical(AxisType::First)
            .with_range(0.0, 100.0)
            .with_major_step(25.0)
            .with_label_format("{}%");
        axis.update();
        axis.measure(Size::new(400.0, 300.0), &ctx(&measurer));

        let contents: Vec<&str> = axis.labels().iter().map(|l| l.content.as_str()).collect();
        assert_eq!(contents, vec!["0%", "25%", "50%", "75%", "100%"]);
        assert_eq!(axis.first_tick().map(|t| t.position), Some(TickPosition::First));
        assert_eq!(axis.last_tick().map(|t| t.position), Some(TickPosition::Last));
        assert!(axis.labels().iter().all(|l| l.desired_size.is_some()));
    }

    #[test]
    fn test_between_ticks_labels_sit_mid_slot() {
        let measurer = CharWidthMeasurer::new();
        let mut axis = Axis::categorical(AxisType::First).with_categories(["a", "b"]);
        axis.update();
        axis.measure(Size::new(400.0, 300.0), &ctx(&measurer));

        assert_eq!(axis.ticks().len(), 3);
        let positions: Vec<f64> = axis.labels().iter().map(|l| l.normalized_position).collect();
        assert_eq!(positions, vec![0.25, 0.75]);
        assert_eq!(axis.ticks()[2].label, None);
    }

    #[test]
    fn test_label_interval_and_hidden_last_label() {
        let measurer = CharWidthMeasurer::new();
        let mut axis = Axis::numerical(AxisType::First)
            .with_range(0.0, 4.0)
            .with_major_step(1.0)
            .with_last_label_visibility(AxisLastLabelVisibility::Hidden);
        axis.set_label_interval(2).unwrap();
        axis.update();
        axis.measure(Size::new(400.0, 300.0), &ctx(&measurer));

        let contents: Vec<&str> = axis.labels().iter().map(|l| l.content.as_str()).collect();
        assert_eq!(contents, vec!["0", "2", "4"]);
        assert!(!axis.labels()[2].is_visible);
    }

    #[test]
    fn test_measure_is_cached_per_size() {
        let measurer = CharWidthMeasurer::new();
        let context = ctx(&measurer);
        let mut axis = Axis::numerical(AxisType::First).with_range(0.0, 10.0);
        axis.update();

        assert!(axis.measure(Size::new(200.0, 100.0), &context));
        assert!(!axis.measure(Size::new(200.0, 100.0), &context));
        assert!(axis.measure(Size::new(150.0, 100.0), &context));

        axis.on_zoom_changed();
        assert!(axis.measure(Size::new(150.0, 100.0), &context));
    }

    #[test]
    fn test_invisible_axis_has_no_size() {
        let measurer = CharWidthMeasurer::new();
        let mut axis = Axis::numerical(AxisType::First).with_range(0.0, 10.0);
        axis.set_visible(false);
        axis.update();

        assert!(!axis.measure(Size::new(200.0, 100.0), &ctx(&measurer)));
        assert_eq!(axis.desired_size(), Size::EMPTY);
    }

    #[test]
    fn test_setters_validate() {
        let mut axis = Axis::numerical(AxisType::First);
        assert!(matches!(axis.set_major_tick_length(-1.0), Err(ChartError::InvalidSetting(_))));
        assert!(matches!(axis.set_label_interval(0), Err(ChartError::InvalidSetting(_))));
        assert!(matches!(axis.set_categories(vec![]), Err(ChartError::InvalidSetting(_))));
        assert!(matches!(axis.set_range(Some(5.0), Some(1.0)), Err(ChartError::InvalidSetting(_))));
        assert_eq!(axis.set_tick_thickness(2.0).unwrap(), InvalidateFlags::INVALIDATE_AXES);
        assert_eq!(axis.set_inverse(true), InvalidateFlags::ALL);
    }

    #[test]
    fn test_desired_tick_count() {
        let measurer = CharWidthMeasurer::new();
        let mut axis = Axis::numerical(AxisType::First)
            .with_range(0.0, 100.0)
            .with_desired_tick_count(3);
        axis.update();
        axis.measure(Size::new(400.0, 300.0), &ctx(&measurer));
        assert_eq!(axis.ticks().len(), 3);

        assert!(matches!(axis.set_desired_tick_count(Some(1)), Err(ChartError::InvalidSetting(_))));
        assert_eq!(axis.set_desired_tick_count(Some(11)).unwrap(), InvalidateFlags::ALL);
        axis.reset();
        axis.update();
        axis.measure(Size::new(400.0, 300.0), &ctx(&measurer));
        assert_eq!(axis.ticks().len(), 11);

        let mut categories = Axis::categorical(AxisType::First);
        assert!(categories.set_desired_tick_count(Some(4)).is_err());
    }

    #[test]
    fn test_dense_user_step_is_bounded() {
        let measurer = CharWidthMeasurer::new();
        let mut axis = Axis::numerical(AxisType::First)
            .with_range(0.0, 1_000_000.0)
            .with_major_step(1.0);
        axis.update();
        axis.measure(Size::new(400.0, 300.0), &ctx(&measurer));

        assert!(axis.ticks().len() <= MAX_MAJOR_TICKS + 1);
        assert!(axis.labels().len() <= axis.ticks().len());
    }

    #[test]
    fn test_radial_angles() {
        let mut axis = Axis::radial_categorical().with_categories(["n", "e", "s", "w"]);
        assert!(axis.is_radial());
        assert!(axis.value_angle(&DataValue::from("s")).is_none());

        axis.update();
        assert_eq!(axis.value_angle(&DataValue::from("s")), Some(180.0));
        assert_eq!(axis.angle_to_data(265.0), Some(DataValue::from("w")));
    }
}
