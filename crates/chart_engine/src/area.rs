//! Chart area
//!
//! The chart area owns the axes, the grid and the annotations of one chart.
//! It tracks whether it is operational, batches invalidation while the host
//! makes structural edits, drives the cartesian solver or the polar framing,
//! and answers pixel <-> data queries against the last arranged plot area.

use crate::annotation::{Annotation, AnnotationContext, AnnotationId, AnnotationKind};
use crate::axis::{Axis, AxisId, AxisLayoutStrategy, AxisType, LayoutContext};
use crate::cartesian;
use crate::config::EngineSettings;
use crate::error::{ChartError, ChartResult};
use crate::grid::ChartGrid;
use crate::invalidate::InvalidateFlags;
use crate::measure::{CharWidthMeasurer, ContentMeasurer};
use crate::polar;
use crate::value::DataValue;
use crate::view::ViewContext;
use chart_geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// Which arrangement a chart area uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// Rectangular X/Y plot with axis stacks on its four sides
    Cartesian,
    /// Radius and angle axes inscribed in a circle
    Polar {
        /// Where domain angle 0 sits, in degrees counter-clockwise from 3 o'clock
        start_angle: f64,
    },
}

/// Lifecycle state of a chart area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaState {
    /// No view attached
    Unloaded,
    /// View attached but a required axis is missing
    AxesIncomplete,
    /// Arrange and conversions do real work
    Operational,
}

/// Why a chart area is not operational
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotLoadedReason {
    NoHorizontalAxis,
    NoVerticalAxis,
    NoPolarAxis,
    NoAngleAxis,
}

impl NotLoadedReason {
    /// Stable key a host can map to a localized placeholder message
    pub fn key(&self) -> &'static str {
        match self {
            NotLoadedReason::NoHorizontalAxis => "NoHorizontalAxis",
            NotLoadedReason::NoVerticalAxis => "NoVerticalAxis",
            NotLoadedReason::NoPolarAxis => "NoPolarAxis",
            NotLoadedReason::NoAngleAxis => "NoAngleAxis",
        }
    }
}

impl std::fmt::Display for NotLoadedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The resolved plot area of the last arrange
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotAreaLayout {
    /// Where series and grid are drawn
    pub plot_rect: Rect,
    /// The plot rect scaled by zoom: the full pannable surface series map onto
    pub virtual_rect: Rect,
    /// Solver passes; always 1 for polar areas
    pub passes: usize,
    pub converged: bool,
}

/// A chart area
pub struct ChartArea {
    system: CoordinateSystem,
    settings: EngineSettings,
    measurer: Box<dyn ContentMeasurer>,
    view: Option<ViewContext>,
    axes: Vec<Axis>,
    grid: Option<ChartGrid>,
    annotations: Vec<Annotation>,
    plot_area: Option<PlotAreaLayout>,
    suspend_count: usize,
    pending: InvalidateFlags,
    emitted: Vec<InvalidateFlags>,
}

impl ChartArea {
    pub fn new(system: CoordinateSystem) -> Self {
        Self {
            system,
            settings: EngineSettings::default(),
            measurer: Box::new(CharWidthMeasurer::new()),
            view: None,
            axes: Vec::new(),
            grid: None,
            annotations: Vec::new(),
            plot_area: None,
            suspend_count: 0,
            pending: InvalidateFlags::empty(),
            emitted: Vec::new(),
        }
    }

    pub fn cartesian() -> Self {
        Self::new(CoordinateSystem::Cartesian)
    }

    pub fn polar(start_angle: f64) -> Self {
        Self::new(CoordinateSystem::Polar { start_angle })
    }

    /// Use the host's text measurement for labels and titles
    pub fn with_measurer(mut self, measurer: Box<dyn ContentMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> ChartResult<Self> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.system
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: EngineSettings) -> ChartResult<()> {
        settings.validate()?;
        self.settings = settings;
        self.invalidate(InvalidateFlags::ALL);
        Ok(())
    }

    /// Start angle of a polar area
    pub fn set_start_angle(&mut self, start_angle: f64) -> ChartResult<()> {
        if !start_angle.is_finite() {
            return Err(ChartError::InvalidSetting(format!(
                "start angle must be finite, got {}",
                start_angle
            )));
        }
        match &mut self.system {
            CoordinateSystem::Polar { start_angle: current } => *current = start_angle,
            CoordinateSystem::Cartesian => {
                return Err(ChartError::InvalidSetting(
                    "start angle applies to polar chart areas only".to_string(),
                ))
            }
        }
        self.invalidate(InvalidateFlags::ALL.difference(InvalidateFlags::RESET_AXES));
        Ok(())
    }

    fn start_angle(&self) -> f64 {
        match self.system {
            CoordinateSystem::Polar { start_angle } => start_angle,
            CoordinateSystem::Cartesian => 0.0,
        }
    }

    pub fn state(&self) -> AreaState {
        if self.view.is_none() {
            AreaState::Unloaded
        } else if self.not_loaded_reasons().is_empty() {
            AreaState::Operational
        } else {
            AreaState::AxesIncomplete
        }
    }

    pub fn is_operational(&self) -> bool {
        self.state() == AreaState::Operational
    }

    /// Missing axis roles, in horizontal, vertical, polar, angle order
    pub fn not_loaded_reasons(&self) -> Vec<NotLoadedReason> {
        let mut reasons = Vec::new();
        match self.system {
            CoordinateSystem::Cartesian => {
                if !self.has_axis(AxisType::First) {
                    reasons.push(NotLoadedReason::NoHorizontalAxis);
                }
                if !self.has_axis(AxisType::Second) {
                    reasons.push(NotLoadedReason::NoVerticalAxis);
                }
            }
            CoordinateSystem::Polar { .. } => {
                if self.primary_index(AxisType::First).is_none() {
                    reasons.push(NotLoadedReason::NoPolarAxis);
                }
                if self.primary_index(AxisType::Second).is_none() {
                    reasons.push(NotLoadedReason::NoAngleAxis);
                }
            }
        }
        reasons
    }

    fn has_axis(&self, role: AxisType) -> bool {
        self.axes.iter().any(|axis| axis.axis_type() == role)
    }

    /// Attach the host view; the area can become operational from here on
    pub fn attach_view(&mut self, view: ViewContext) -> ChartResult<()> {
        validate_zoom(view.zoom_width, view.zoom_height)?;
        self.view = Some(view);
        for axis in self.axes.iter_mut() {
            axis.on_zoom_changed();
        }
        tracing::debug!(target: "chart_engine::area", state = ?self.state(), "view attached");
        self.invalidate(InvalidateFlags::ALL);
        Ok(())
    }

    pub fn detach_view(&mut self) {
        self.view = None;
        self.plot_area = None;
        tracing::debug!(target: "chart_engine::area", "view detached");
        self.invalidate(InvalidateFlags::ALL);
    }

    pub fn view(&self) -> Option<&ViewContext> {
        self.view.as_ref()
    }

    /// Replace the attached view's zoom factors
    pub fn set_zoom(&mut self, zoom_width: f64, zoom_height: f64) -> ChartResult<()> {
        validate_zoom(zoom_width, zoom_height)?;
        let Some(view) = self.view.as_mut() else {
            return Ok(());
        };
        if view.zoom_width == zoom_width && view.zoom_height == zoom_height {
            return Ok(());
        }

        view.zoom_width = zoom_width;
        view.zoom_height = zoom_height;
        for axis in self.axes.iter_mut() {
            axis.on_zoom_changed();
        }
        self.invalidate(
            InvalidateFlags::INVALIDATE_SERIES
                | InvalidateFlags::INVALIDATE_GRID
                | InvalidateFlags::INVALIDATE_ANNOTATIONS,
        );
        Ok(())
    }

    /// Replace the attached view's pan, as fractions of the plot size
    pub fn set_plot_origin(&mut self, origin_x: f64, origin_y: f64) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        if view.plot_origin_x == origin_x && view.plot_origin_y == origin_y {
            return;
        }

        view.plot_origin_x = origin_x;
        view.plot_origin_y = origin_y;
        for axis in self.axes.iter_mut() {
            axis.on_plot_origin_changed();
        }
        self.invalidate(
            InvalidateFlags::INVALIDATE_SERIES
                | InvalidateFlags::INVALIDATE_GRID
                | InvalidateFlags::INVALIDATE_ANNOTATIONS,
        );
    }

    /// Visible part of the plot, used to cull ticks while zoomed
    pub fn set_plot_area_clip(&mut self, clip: Rect) {
        if let Some(view) = self.view.as_mut() {
            view.plot_area_clip = clip;
            self.invalidate(InvalidateFlags::INVALIDATE_AXES | InvalidateFlags::INVALIDATE_GRID);
        }
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn axis(&self, id: AxisId) -> Option<&Axis> {
        self.axes.iter().find(|axis| axis.id() == id)
    }

    /// The axis used by default for conversions of a role
    pub fn primary_axis(&self, role: AxisType) -> Option<&Axis> {
        primary(&self.axes, role)
    }

    fn primary_index(&self, role: AxisType) -> Option<usize> {
        self.axes
            .iter()
            .position(|axis| axis.axis_type() == role && axis.is_primary())
    }

    fn index_of(&self, id: AxisId) -> ChartResult<usize> {
        self.axes
            .iter()
            .position(|axis| axis.id() == id)
            .ok_or(ChartError::AxisNotFound(id))
    }

    fn strategy_for(&self, role: AxisType) -> AxisLayoutStrategy {
        match (self.system, role) {
            (CoordinateSystem::Cartesian, role) => AxisLayoutStrategy::for_type(role),
            (CoordinateSystem::Polar { .. }, AxisType::First) => AxisLayoutStrategy::Polar,
            (CoordinateSystem::Polar { .. }, AxisType::Second) => AxisLayoutStrategy::Radial,
        }
    }

    fn clear_primary(&mut self, role: AxisType) {
        for axis in self.axes.iter_mut().filter(|a| a.axis_type() == role) {
            axis.is_primary = false;
        }
    }

    /// Make sure a role with axes has exactly one primary
    fn ensure_primary(&mut self, role: AxisType) {
        if self.primary_index(role).is_some() {
            return;
        }
        if let Some(axis) = self.axes.iter_mut().find(|a| a.axis_type() == role) {
            axis.is_primary = true;
        }
    }

    /// Attach an axis in the given role.
    ///
    /// Axis metrics left at their built-in values take the area's axis
    /// defaults. The first axis of a role becomes its primary; an axis flagged
    /// primary takes over from the current one.
    pub fn add_axis(&mut self, mut axis: Axis, role: AxisType) -> AxisId {
        axis.set_axis_type(role);
        axis.inherit_defaults(&self.settings.axis);
        axis.set_strategy(self.strategy_for(role));
        axis.reset_state();

        if axis.is_primary() {
            self.clear_primary(role);
        } else if self.primary_index(role).is_none() {
            axis.is_primary = true;
        }

        let id = axis.id();
        self.axes.push(axis);
        tracing::debug!(target: "chart_engine::area", %id, ?role, state = ?self.state(), "axis added");
        self.invalidate(InvalidateFlags::ALL);
        id
    }

    /// Detach an axis; another axis of the same role takes over as primary
    pub fn remove_axis(&mut self, id: AxisId) -> ChartResult<Axis> {
        let index = self.index_of(id)?;
        let mut axis = self.axes.remove(index);
        if axis.is_primary() {
            axis.is_primary = false;
            self.ensure_primary(axis.axis_type());
        }

        tracing::debug!(target: "chart_engine::area", %id, state = ?self.state(), "axis removed");
        self.invalidate(InvalidateFlags::ALL);
        Ok(axis)
    }

    /// Make an axis the primary one of its role
    pub fn set_primary(&mut self, id: AxisId) -> ChartResult<()> {
        let index = self.index_of(id)?;
        self.clear_primary(self.axes[index].axis_type());
        self.axes[index].is_primary = true;
        self.invalidate(InvalidateFlags::ALL);
        Ok(())
    }

    /// Replace the radius axis of a polar area
    pub fn set_polar_axis(&mut self, axis: Axis) -> ChartResult<AxisId> {
        self.replace_primary(axis, AxisType::First)
    }

    /// Replace the angle axis of a polar area
    pub fn set_angle_axis(&mut self, axis: Axis) -> ChartResult<AxisId> {
        self.replace_primary(axis, AxisType::Second)
    }

    fn replace_primary(&mut self, axis: Axis, role: AxisType) -> ChartResult<AxisId> {
        if self.system == CoordinateSystem::Cartesian {
            return Err(ChartError::InvalidSetting(
                "polar axes require a polar chart area".to_string(),
            ));
        }

        let mut batch = self.batch(true);
        if let Some(index) = batch.primary_index(role) {
            let id = batch.axes[index].id();
            batch.remove_axis(id)?;
        }
        let id = batch.add_axis(axis.with_primary(true), role);
        Ok(id)
    }

    /// Change an axis through one of its setters and route the returned
    /// invalidation through the area
    pub fn update_axis<F>(&mut self, id: AxisId, change: F) -> ChartResult<()>
    where
        F: FnOnce(&mut Axis) -> ChartResult<InvalidateFlags>,
    {
        let index = self.index_of(id)?;
        let was_primary = self.axes[index].is_primary();
        let flags = change(&mut self.axes[index])?;

        let role = self.axes[index].axis_type();
        if self.axes[index].is_primary() && !was_primary {
            self.clear_primary(role);
            self.axes[index].is_primary = true;
        }
        self.ensure_primary(role);

        self.invalidate(flags);
        Ok(())
    }

    /// Report the extent of the data plotted against a numerical axis
    pub fn set_axis_data_extent(&mut self, id: AxisId, minimum: f64, maximum: f64) -> ChartResult<()> {
        self.update_axis(id, |axis| axis.set_data_extent(minimum, maximum))
    }

    /// Replace the categories of a categorical axis
    pub fn set_categories<I, S>(&mut self, id: AxisId, categories: I) -> ChartResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories = categories.into_iter().map(Into::into).collect();
        self.update_axis(id, |axis| axis.set_categories(categories))
    }

    pub fn grid(&self) -> Option<&ChartGrid> {
        self.grid.as_ref()
    }

    pub fn set_grid(&mut self, grid: Option<ChartGrid>) {
        self.grid = grid;
        self.invalidate(InvalidateFlags::INVALIDATE_GRID);
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id() == id)
    }

    pub fn add_annotation(&mut self, kind: AnnotationKind) -> AnnotationId {
        let annotation = Annotation::new(kind);
        let id = annotation.id();
        self.annotations.push(annotation);
        self.invalidate(InvalidateFlags::INVALIDATE_ANNOTATIONS);
        id
    }

    pub fn remove_annotation(&mut self, id: AnnotationId) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id() == id)?;
        let annotation = self.annotations.remove(index);
        self.invalidate(InvalidateFlags::INVALIDATE_ANNOTATIONS);
        Some(annotation)
    }

    /// Suspend invalidation processing until the matching [`end_update`](Self::end_update)
    pub fn begin_update(&mut self) {
        self.suspend_count += 1;
    }

    /// Resume invalidation processing.
    ///
    /// Only the outermost call acts. With `refresh` the deferred flags (or
    /// everything, if nothing was deferred) are processed and emitted to the
    /// host as a single invalidation; without it they are processed silently.
    pub fn end_update(&mut self, refresh: bool) {
        if self.suspend_count == 0 {
            tracing::warn!(target: "chart_engine::area", "end_update without begin_update");
            return;
        }
        self.suspend_count -= 1;
        if self.suspend_count > 0 {
            return;
        }

        let flags = std::mem::take(&mut self.pending);
        if refresh {
            let flags = if flags.is_empty() { InvalidateFlags::ALL } else { flags };
            tracing::debug!(target: "chart_engine::area", ?flags, "flushing deferred invalidation");
            self.process_invalidation(flags);
            self.emitted.push(flags);
        } else if !flags.is_empty() {
            self.process_invalidation(flags);
        }
    }

    /// Scoped [`begin_update`](Self::begin_update); the batch ends when the
    /// guard is dropped, including on early return
    pub fn batch(&mut self, refresh: bool) -> UpdateBatch<'_> {
        self.begin_update();
        UpdateBatch {
            area: self,
            refresh,
        }
    }

    pub fn is_updating(&self) -> bool {
        self.suspend_count > 0
    }

    /// Apply invalidation flags, or defer them while updates are suspended
    pub fn invalidate(&mut self, flags: InvalidateFlags) {
        if flags.is_empty() {
            return;
        }
        if self.suspend_count > 0 {
            self.pending |= flags;
            return;
        }

        self.process_invalidation(flags);
        self.emitted.push(flags);
    }

    /// Drain the invalidations emitted since the last call
    pub fn take_invalidations(&mut self) -> Vec<InvalidateFlags> {
        std::mem::take(&mut self.emitted)
    }

    fn process_invalidation(&mut self, flags: InvalidateFlags) {
        tracing::trace!(target: "chart_engine::area", ?flags, "invalidate");

        if flags.contains(InvalidateFlags::RESET_AXES) {
            for axis in self.axes.iter_mut() {
                axis.reset();
            }
        }
        if flags.contains(InvalidateFlags::INVALIDATE_AXES) {
            for axis in self.axes.iter_mut() {
                axis.invalidate();
            }
        }
        if flags.contains(InvalidateFlags::INVALIDATE_GRID) {
            if let Some(grid) = self.grid.as_mut() {
                grid.invalidate();
            }
        }
        if flags.contains(InvalidateFlags::RESET_ANNOTATIONS) {
            for annotation in self.annotations.iter_mut() {
                annotation.reset();
            }
        } else if flags.contains(InvalidateFlags::INVALIDATE_ANNOTATIONS) {
            for annotation in self.annotations.iter_mut() {
                annotation.invalidate();
            }
        }
    }

    /// The plot area of the last arrange
    pub fn plot_area(&self) -> Option<&PlotAreaLayout> {
        self.plot_area.as_ref()
    }

    /// Lay out axes, grid and annotations in `available` and return the plot rect.
    ///
    /// A no-op returning `available` unchanged unless the area is operational.
    pub fn arrange(&mut self, available: Rect) -> ChartResult<Rect> {
        let Some(view) = self.view else {
            return Ok(available);
        };
        if !self.is_operational() {
            return Ok(available);
        }

        let mut batch = self.batch(false);
        let plot_rect = batch.arrange_core(available, view)?;
        Ok(plot_rect)
    }

    fn arrange_core(&mut self, available: Rect, view: ViewContext) -> ChartResult<Rect> {
        for axis in self.axes.iter_mut() {
            axis.update();
        }

        let polar_indices = (
            self.primary_index(AxisType::First),
            self.primary_index(AxisType::Second),
        );
        let ctx = LayoutContext::new(view, &*self.measurer, self.start_angle());

        let layout = match self.system {
            CoordinateSystem::Cartesian => {
                let layout = cartesian::arrange_axes(&mut self.axes, available, &ctx, &self.settings);
                PlotAreaLayout {
                    plot_rect: layout.plot_rect,
                    virtual_rect: view.virtual_rect(&layout.plot_rect),
                    passes: layout.passes,
                    converged: layout.converged,
                }
            }
            CoordinateSystem::Polar { .. } => {
                let (Some(radius), Some(angle)) = polar_indices else {
                    return Ok(available);
                };
                let rect = available.scale_size(view.zoom_width, view.zoom_height);
                let plot_rect = polar::arrange_axes(&mut self.axes, radius, angle, rect, &ctx)?;
                PlotAreaLayout {
                    plot_rect,
                    virtual_rect: plot_rect,
                    passes: 1,
                    converged: true,
                }
            }
        };

        if self.settings.layout_rounding {
            for axis in self.axes.iter_mut() {
                axis.apply_layout_rounding(&view);
            }
        }
        if view.is_zoomed() {
            for axis in self.axes.iter_mut() {
                axis.update_ticks_visibility(&view.plot_area_clip);
            }
        }

        let first = primary(&self.axes, AxisType::First);
        let second = primary(&self.axes, AxisType::Second);
        if let Some(grid) = self.grid.as_mut() {
            match self.system {
                CoordinateSystem::Cartesian => {
                    grid.arrange_cartesian(first, second, &layout.plot_rect, &view)
                }
                CoordinateSystem::Polar { start_angle } => {
                    grid.arrange_polar(first, second, &layout.plot_rect, start_angle)
                }
            }
        }

        // a moved plot area invalidates every annotation; otherwise only the
        // ones flagged since the last arrange are laid out again
        let moved = self.plot_area.map_or(true, |previous| {
            previous.plot_rect != layout.plot_rect || previous.virtual_rect != layout.virtual_rect
        });
        let annotation_ctx = AnnotationContext {
            system: self.system,
            axes: &self.axes,
            first,
            second,
            plot_rect: layout.plot_rect,
            view,
        };
        for annotation in self.annotations.iter_mut().filter(|a| moved || !a.is_valid()) {
            annotation.arrange(&annotation_ctx);
        }

        tracing::debug!(
            target: "chart_engine::area",
            plot_rect = ?layout.plot_rect,
            passes = layout.passes,
            "arranged"
        );
        self.plot_area = Some(layout);
        Ok(layout.plot_rect)
    }

    /// Screen angle of a domain angle on this polar area's angle axis
    pub fn normalize_angle(&self, angle: f64) -> f64 {
        let inverse = self
            .primary_axis(AxisType::Second)
            .is_some_and(|axis| axis.is_inverse());
        polar::normalize_angle(angle, self.start_angle(), inverse)
    }

    /// Convert a pixel to domain values of the primary axes
    pub fn point_to_data(&self, point: Point) -> (Option<DataValue>, Option<DataValue>) {
        self.convert_point(
            point,
            self.primary_axis(AxisType::First),
            self.primary_axis(AxisType::Second),
        )
    }

    /// Convert a pixel to domain values of two specific axes
    pub fn point_to_data_with(
        &self,
        point: Point,
        first: AxisId,
        second: AxisId,
    ) -> ChartResult<(Option<DataValue>, Option<DataValue>)> {
        let (first, second) = self.axis_pair(first, second)?;
        Ok(self.convert_point(point, first, second))
    }

    /// Convert domain values of the primary axes to a pixel; NaN when the
    /// area cannot map them yet
    pub fn data_to_point(&self, first_value: &DataValue, second_value: &DataValue) -> Point {
        self.convert_data(
            first_value,
            second_value,
            self.primary_axis(AxisType::First),
            self.primary_axis(AxisType::Second),
        )
    }

    /// Convert domain values of two specific axes to a pixel
    pub fn data_to_point_with(
        &self,
        first_value: &DataValue,
        second_value: &DataValue,
        first: AxisId,
        second: AxisId,
    ) -> ChartResult<Point> {
        let (first, second) = self.axis_pair(first, second)?;
        Ok(self.convert_data(first_value, second_value, first, second))
    }

    /// Look up a First and a Second axis; a role mismatch leaves that side unmapped
    fn axis_pair(&self, first: AxisId, second: AxisId) -> ChartResult<(Option<&Axis>, Option<&Axis>)> {
        let first = self.axis(first).ok_or(ChartError::AxisNotFound(first))?;
        let second = self.axis(second).ok_or(ChartError::AxisNotFound(second))?;
        Ok((
            Some(first).filter(|a| a.axis_type() == AxisType::First),
            Some(second).filter(|a| a.axis_type() == AxisType::Second),
        ))
    }

    fn convert_point(
        &self,
        point: Point,
        first: Option<&Axis>,
        second: Option<&Axis>,
    ) -> (Option<DataValue>, Option<DataValue>) {
        let (Some(view), Some(layout)) = (self.view.as_ref(), self.plot_area.as_ref()) else {
            return (None, None);
        };
        if !self.is_operational() {
            return (None, None);
        }

        match self.system {
            CoordinateSystem::Cartesian => {
                cartesian::point_to_data(first, second, point, &layout.plot_rect, view)
            }
            CoordinateSystem::Polar { start_angle } => {
                polar::point_to_data(first, second, point, &layout.plot_rect, view, start_angle)
            }
        }
    }

    fn convert_data(
        &self,
        first_value: &DataValue,
        second_value: &DataValue,
        first: Option<&Axis>,
        second: Option<&Axis>,
    ) -> Point {
        let (Some(view), Some(layout)) = (self.view.as_ref(), self.plot_area.as_ref()) else {
            return Point::nan();
        };
        if !self.is_operational() {
            return Point::nan();
        }

        match self.system {
            CoordinateSystem::Cartesian => cartesian::data_to_point(
                first,
                second,
                first_value,
                second_value,
                &layout.plot_rect,
                view,
            ),
            CoordinateSystem::Polar { start_angle } => polar::data_to_point(
                first,
                second,
                first_value,
                second_value,
                &layout.plot_rect,
                view,
                start_angle,
            ),
        }
    }
}

impl Default for ChartArea {
    fn default() -> Self {
        Self::cartesian()
    }
}

impl std::fmt::Debug for ChartArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartArea")
            .field("system", &self.system)
            .field("state", &self.state())
            .field("axes", &self.axes.len())
            .field("annotations", &self.annotations.len())
            .field("plot_area", &self.plot_area)
            .finish()
    }
}

fn primary(axes: &[Axis], role: AxisType) -> Option<&Axis> {
    axes.iter()
        .find(|axis| axis.axis_type() == role && axis.is_primary())
}

fn validate_zoom(zoom_width: f64, zoom_height: f64) -> ChartResult<()> {
    if zoom_width < 1.0 || zoom_height < 1.0 || !zoom_width.is_finite() || !zoom_height.is_finite() {
        return Err(ChartError::InvalidSetting(format!(
            "zoom must be at least 1, got {}x{}",
            zoom_width, zoom_height
        )));
    }
    Ok(())
}

/// Guard returned by [`ChartArea::batch`]
pub struct UpdateBatch<'a> {
    area: &'a mut ChartArea,
    refresh: bool,
}

impl Deref for UpdateBatch<'_> {
    type Target = ChartArea;

    fn deref(&self) -> &ChartArea {
        self.area
    }
}

impl DerefMut for UpdateBatch<'_> {
    fn deref_mut(&mut self) -> &mut ChartArea {
        self.area
    }
}

impl Drop for UpdateBatch<'_> {
    fn drop(&mut self) {
        self.area.end_update(self.refresh);
    }
}
