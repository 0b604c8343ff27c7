//! Axis layout strategies
//!
//! The strategy decides how an axis turns its ticks and labels into a desired
//! size, a desired margin and final slots. Cartesian areas use the horizontal
//! and vertical strategies; polar areas lay the angle axis out on a circle and
//! the radius axis along the radius.

use super::{Axis, AxisHorizontalLocation, AxisLabelFitMode, AxisLastLabelVisibility, AxisPlotMode, AxisType, AxisVerticalLocation};
use crate::measure::ContentMeasurer;
use crate::polar::normalize_angle;
use crate::view::ViewContext;
use chart_geometry::{arc_point, is_one, is_zero, Point, Rect, Size, Thickness, DEG_TO_RAD};
use serde::{Deserialize, Serialize};

/// How an axis is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisLayoutStrategy {
    /// Along the top or bottom edge of the plot area
    Horizontal,
    /// Along the left or right edge of the plot area
    Vertical,
    /// Around the circle of a polar plot area
    Radial,
    /// Along the radius of a polar plot area
    Polar,
}

impl AxisLayoutStrategy {
    /// Cartesian strategy for an axis role
    pub fn for_type(axis_type: AxisType) -> Self {
        match axis_type {
            AxisType::First => AxisLayoutStrategy::Horizontal,
            AxisType::Second => AxisLayoutStrategy::Vertical,
        }
    }
}

/// Values a strategy computes while measuring and reuses when arranging
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct LayoutState {
    pub max_label_width: f64,
    pub max_label_height: f64,
    pub label_rows: usize,
    pub total_label_height: f64,
    pub label_top: f64,
    pub radial_margins: Thickness,
}

/// Everything an axis needs from its chart area while laying out
#[derive(Clone, Copy)]
pub(crate) struct LayoutContext<'a> {
    pub view: ViewContext,
    pub measurer: &'a dyn ContentMeasurer,
    /// Start angle of a polar area, in degrees
    pub start_angle: f64,
}

impl<'a> LayoutContext<'a> {
    pub fn new(view: ViewContext, measurer: &'a dyn ContentMeasurer, start_angle: f64) -> Self {
        Self {
            view,
            measurer,
            start_angle,
        }
    }
}

/// Pixel offset of a tick of the given thickness, truncated like the tick itself
fn thickness_offset(thickness: f64) -> f64 {
    (thickness / 2.0).trunc()
}

impl Axis {
    /// Zoom factor along the axis direction
    pub(crate) fn strategy_zoom(&self, view: &ViewContext) -> f64 {
        match self.strategy {
            AxisLayoutStrategy::Horizontal => view.zoom_width,
            AxisLayoutStrategy::Vertical => view.zoom_height,
            AxisLayoutStrategy::Radial | AxisLayoutStrategy::Polar => 1.0,
        }
    }

    /// Normalized range of the axis that is currently visible
    pub(crate) fn strategy_visible_range(&self, view: &ViewContext) -> (f64, f64) {
        match self.strategy {
            AxisLayoutStrategy::Horizontal => {
                let zoom = view.zoom_width;
                if zoom == 1.0 {
                    return (0.0, 1.0);
                }
                let offset = -view.plot_origin_x / zoom;
                (offset, offset + 1.0 / zoom)
            }
            AxisLayoutStrategy::Vertical => {
                let zoom = view.zoom_height;
                if zoom == 1.0 {
                    return (0.0, 1.0);
                }
                let offset = (zoom - 1.0 + view.plot_origin_y) / zoom;
                (offset, offset + 1.0 / zoom)
            }
            AxisLayoutStrategy::Radial | AxisLayoutStrategy::Polar => (0.0, 1.0),
        }
    }

    pub(crate) fn strategy_desired_size(&mut self, available: Size) -> Size {
        match self.strategy {
            AxisLayoutStrategy::Horizontal => {
                self.update_max_label_size();
                self.update_total_label_height(available);
                Size::new(
                    0.0,
                    self.line_thickness
                        + self.major_tick_length
                        + self.layout.total_label_height
                        + self.title.size().height,
                )
            }
            AxisLayoutStrategy::Vertical => {
                self.update_max_label_size();
                // the title is rotated, so its height adds to the width
                Size::new(
                    self.line_thickness
                        + self.major_tick_length
                        + self.layout.max_label_width
                        + self.title.size().height,
                    0.0,
                )
            }
            AxisLayoutStrategy::Radial | AxisLayoutStrategy::Polar => {
                self.update_max_label_size();
                available
            }
        }
    }

    pub(crate) fn strategy_desired_margin(
        &mut self,
        available: Size,
        ctx: &LayoutContext<'_>,
    ) -> Thickness {
        match self.strategy {
            AxisLayoutStrategy::Horizontal => self.horizontal_margin(available),
            AxisLayoutStrategy::Vertical => {
                if self.layout.max_label_height == 0.0
                    || self.last_label_visibility != AxisLastLabelVisibility::Visible
                {
                    return Thickness::default();
                }
                if self.actual_plot_mode() == AxisPlotMode::OnTicks {
                    Thickness::new(0.0, (self.layout.max_label_height / 2.0).trunc(), 0.0, 0.0)
                } else {
                    Thickness::default()
                }
            }
            AxisLayoutStrategy::Radial => {
                let margins = self.radial_margins(available, ctx);
                self.layout.radial_margins = margins;
                margins
            }
            AxisLayoutStrategy::Polar => Thickness::default(),
        }
    }

    pub(crate) fn arrange_strategy(&mut self, rect: Rect, ctx: &LayoutContext<'_>) {
        match self.strategy {
            AxisLayoutStrategy::Horizontal => self.arrange_horizontal(rect, &ctx.view),
            AxisLayoutStrategy::Vertical => self.arrange_vertical(rect, &ctx.view),
            AxisLayoutStrategy::Radial => self.arrange_radial(rect, ctx),
            AxisLayoutStrategy::Polar => self.arrange_polar(rect),
        }
    }

    /// Fit the first and last ticks inside the axis slot
    pub(crate) fn apply_layout_rounding(&mut self, view: &ViewContext) {
        let offset = thickness_offset(self.tick_thickness);
        let slot = self.layout_slot;
        let count = self.ticks.len();
        if count == 0 {
            return;
        }

        match self.strategy {
            AxisLayoutStrategy::Horizontal => {
                if is_zero(self.ticks[0].normalized_value) {
                    self.ticks[0].layout_slot.x = slot.x - offset;
                }
                let last = &mut self.ticks[count - 1];
                if is_one(last.normalized_value) {
                    // one pixel less on the right; rendering runs left to right
                    last.layout_slot.x = slot.x + slot.width * view.zoom_width - offset - 1.0;
                }
            }
            AxisLayoutStrategy::Vertical => {
                if is_zero(self.ticks[0].normalized_value) {
                    // one pixel less at the bottom; rendering runs top to bottom
                    self.ticks[0].layout_slot.y = slot.y + slot.height * view.zoom_height - offset - 1.0;
                }
                let last = &mut self.ticks[count - 1];
                if is_one(last.normalized_value) {
                    last.layout_slot.y = slot.y - offset;
                }
            }
            AxisLayoutStrategy::Radial | AxisLayoutStrategy::Polar => {}
        }
    }

    /// Hide ticks and labels that fall outside the visible clip
    pub(crate) fn update_ticks_visibility(&mut self, clip: &Rect) {
        let plot_mode = self.actual_plot_mode();
        let strategy = self.strategy;

        for tick in self.ticks.iter_mut() {
            let center = tick.layout_slot.center();
            let visible = match strategy {
                AxisLayoutStrategy::Horizontal => center.x >= clip.x && center.x <= clip.right(),
                AxisLayoutStrategy::Vertical => center.y >= clip.y && center.y <= clip.bottom(),
                AxisLayoutStrategy::Radial | AxisLayoutStrategy::Polar => continue,
            };
            tick.is_visible = visible;

            let Some(label) = tick.label.and_then(|i| self.labels.get_mut(i)) else {
                continue;
            };
            if plot_mode == AxisPlotMode::OnTicks {
                label.is_visible = visible;
                continue;
            }

            let slot = label.layout_slot;
            match strategy {
                AxisLayoutStrategy::Horizontal => {
                    if label.is_visible && !visible {
                        label.is_visible = slot.x >= clip.x && slot.right() <= clip.right();
                    }
                }
                _ => {
                    label.is_visible = slot.y >= clip.y && slot.bottom() <= clip.bottom();
                }
            }
        }
    }

    fn update_max_label_size(&mut self) {
        self.layout.max_label_width = 0.0;
        self.layout.max_label_height = 0.0;
        for label in self.labels.iter().filter(|l| l.is_visible) {
            let size = label.size();
            self.layout.max_label_width = self.layout.max_label_width.max(size.width);
            self.layout.max_label_height = self.layout.max_label_height.max(size.height);
        }
    }

    /// Rows needed when every label is as wide as the widest one
    fn update_total_label_height(&mut self, available: Size) {
        let count = self.labels.len();
        let total_width = count as f64 * self.layout.max_label_width;
        let rows = if available.width > 0.0 {
            (total_width / available.width).trunc() as usize + 1
        } else {
            count
        };

        self.layout.label_rows = rows.min(count).max(1);
        self.layout.total_label_height = match self.label_fit_mode {
            AxisLabelFitMode::MultiLine => {
                self.layout.max_label_height * self.layout.label_rows as f64
            }
            AxisLabelFitMode::None => self.layout.max_label_height,
        };
    }

    fn horizontal_margin(&self, available: Size) -> Thickness {
        if self.layout.max_label_width == 0.0
            || self.last_label_visibility != AxisLastLabelVisibility::Visible
        {
            return Thickness::default();
        }
        let Some(last) = self.labels.last() else {
            return Thickness::default();
        };

        let reach = (last.size().width / 2.0).trunc();
        let right = if self.actual_plot_mode() == AxisPlotMode::OnTicks {
            reach
        } else {
            let slot_width = if self.major_tick_count > 0 {
                (available.width / self.major_tick_count as f64).trunc()
            } else {
                available.width
            };
            (reach - slot_width / 2.0).max(0.0)
        };

        Thickness::new(0.0, 0.0, right, 0.0)
    }

    fn arrange_horizontal(&mut self, rect: Rect, view: &ViewContext) {
        let mut rect = rect;
        let title_size = self.title.size();
        let title_top = match self.vertical_location {
            AxisVerticalLocation::Bottom => rect.bottom() - title_size.height,
            AxisVerticalLocation::Top => {
                let top = rect.y;
                rect.y += title_size.height;
                top
            }
        };
        self.title.layout_slot = Rect::new(
            rect.x + (rect.width - title_size.width) / 2.0,
            title_top,
            title_size.width,
            title_size.height,
        );

        let width = rect.width * view.zoom_width;
        let y = match self.vertical_location {
            AxisVerticalLocation::Bottom => rect.y,
            AxisVerticalLocation::Top => rect.y + self.layout.total_label_height + self.line_thickness,
        };
        let thickness = self.tick_thickness;
        let offset = thickness_offset(thickness);
        let tick_length = self.major_tick_length;

        for tick in self.ticks.iter_mut() {
            let nv = tick.normalized_value;
            let x = if nv == 0.0 {
                rect.x - offset
            } else if nv == 1.0 {
                rect.x + width
            } else {
                rect.x + nv * width - offset
            };
            tick.layout_slot = Rect::new(x, y, thickness, tick_length);
        }

        self.layout.label_top = match self.vertical_location {
            AxisVerticalLocation::Bottom => rect.y + tick_length,
            AxisVerticalLocation::Top => rect.y,
        };

        let rows = self.layout.label_rows.max(1);
        let shift_rows = self.label_fit_mode == AxisLabelFitMode::MultiLine && rows > 1;
        let label_top = self.layout.label_top;
        for (index, label) in self.labels.iter_mut().enumerate() {
            let size = label.size();
            let center = label.normalized_position * width;
            let row = if shift_rows { (index % rows) as f64 } else { 0.0 };
            label.layout_slot = Rect::new(
                rect.x + center - size.width / 2.0,
                label_top + row * size.height,
                size.width,
                size.height,
            );
        }
    }

    fn arrange_vertical(&mut self, rect: Rect, view: &ViewContext) {
        let title_size = self.title.size();
        let title_left = match self.horizontal_location {
            AxisHorizontalLocation::Left => rect.x,
            AxisHorizontalLocation::Right => rect.right() - title_size.height,
        };
        self.title.layout_slot = Rect::new(
            title_left,
            rect.y + (rect.height - title_size.height) / 2.0,
            title_size.width,
            title_size.height,
        );

        let height = rect.height * view.zoom_height;
        let bottom = rect.y + height;
        let thickness = self.tick_thickness;
        let offset = thickness_offset(thickness);
        let tick_length = self.major_tick_length;
        let location = self.horizontal_location;

        for tick in self.ticks.iter_mut() {
            let nv = tick.normalized_value;
            let y = if nv == 0.0 {
                bottom - offset
            } else if nv == 1.0 {
                rect.y
            } else {
                bottom - nv * height - offset
            };
            let x = match location {
                AxisHorizontalLocation::Left => rect.right() - tick_length,
                AxisHorizontalLocation::Right => rect.x,
            };
            tick.layout_slot = Rect::new(x, y, tick_length, thickness);
        }

        for label in self.labels.iter_mut() {
            let size = label.size();
            let center = label.normalized_position * height;
            let x = match location {
                AxisHorizontalLocation::Left => rect.right() - tick_length - size.width,
                AxisHorizontalLocation::Right => rect.x + tick_length,
            };
            label.layout_slot = Rect::new(x, bottom - center - size.height / 2.0, size.width, size.height);
        }
    }

    /// Label overhang around the inscribed circle, symmetrized per axis
    fn radial_margins(&self, available: Size, ctx: &LayoutContext<'_>) -> Thickness {
        let bounds = Rect::from_size(available);
        let ellipse = bounds.to_square(false).center_in(&bounds);
        let center = ellipse.center();
        let radius = ellipse.width / 2.0;

        let mut margins = Thickness::default();
        for tick in &self.ticks {
            let Some(label) = tick.label.and_then(|i| self.labels.get(i)) else {
                continue;
            };
            if !label.is_visible {
                continue;
            }

            let angle = normalize_angle(self.tick_angle(tick), ctx.start_angle, self.is_inverse);
            let arc = arc_point(angle, center, radius);
            let size = label.size();
            margins.left = margins.left.max(ellipse.x - (arc.x - size.width));
            margins.top = margins.top.max(ellipse.y - (arc.y - size.height));
            margins.right = margins.right.max(arc.x + size.width - ellipse.right());
            margins.bottom = margins.bottom.max(arc.y + size.height - ellipse.bottom());
        }

        let offset = self.line_thickness + self.major_tick_length;
        let horizontal = margins.left.max(margins.right) + offset;
        let vertical = margins.top.max(margins.bottom) + offset;
        Thickness::new(horizontal, vertical, horizontal, vertical)
    }

    fn arrange_radial(&mut self, rect: Rect, ctx: &LayoutContext<'_>) {
        let tick_rect = rect.deflate(&self.layout.radial_margins);
        let offset = self.line_thickness + self.major_tick_length;
        let label_rect = Rect::new(
            tick_rect.x - offset,
            tick_rect.y - offset,
            tick_rect.width + 2.0 * offset,
            tick_rect.height + 2.0 * offset,
        );

        let tick_center = tick_rect.center();
        let tick_radius = tick_rect.width / 2.0;
        let label_center = label_rect.center();
        let label_radius = label_rect.width / 2.0;

        for index in 0..self.ticks.len() {
            if !self.ticks[index].is_visible {
                continue;
            }

            let angle = normalize_angle(self.tick_angle(&self.ticks[index]), ctx.start_angle, self.is_inverse);
            let position = arc_point(angle, tick_center, tick_radius);
            self.ticks[index].layout_slot =
                Rect::new(position.x, position.y, self.tick_thickness, self.major_tick_length);

            let Some(label) = self.ticks[index].label.and_then(|i| self.labels.get_mut(i)) else {
                continue;
            };
            if !label.is_visible {
                continue;
            }

            // push the label outwards by half its size along the spoke
            let size = label.size();
            let radians = angle * DEG_TO_RAD;
            let anchor = arc_point(angle, label_center, label_radius);
            let anchor = Point::new(
                anchor.x + size.width * radians.cos() / 2.0,
                anchor.y + size.height * radians.sin() / 2.0,
            );
            label.layout_slot = Rect::new(
                anchor.x - size.width / 2.0,
                anchor.y - size.height / 2.0,
                size.width,
                size.height,
            );
        }
    }

    /// Ticks run from the center to the right edge of the radius rect
    fn arrange_polar(&mut self, rect: Rect) {
        let center = rect.center();
        let length = rect.width / 2.0;
        let thickness = self.tick_thickness;
        let offset = thickness_offset(thickness);
        let tick_length = self.major_tick_length;

        for tick in self.ticks.iter_mut() {
            let x = center.x + tick.normalized_value * length - offset;
            tick.layout_slot = Rect::new(x, center.y, thickness, tick_length);
        }

        for label in self.labels.iter_mut() {
            let size = label.size();
            let x = center.x + label.normalized_position * length;
            label.layout_slot = Rect::new(x - size.width / 2.0, center.y + tick_length, size.width, size.height);
        }

        let title_size = self.title.size();
        self.title.layout_slot = Rect::new(
            center.x + (length - title_size.width) / 2.0,
            center.y + tick_length + self.layout.max_label_height,
            title_size.width,
            title_size.height,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::ContentKind;

    /// Every label is 20x10; titles are 40x12
    struct FixedMeasurer;

    impl ContentMeasurer for FixedMeasurer {
        fn measure(&self, _content: &str, kind: ContentKind) -> Size {
            match kind {
                ContentKind::Label => Size::new(20.0, 10.0),
                ContentKind::Title => Size::new(40.0, 12.0),
            }
        }
    }

    fn ctx(view: ViewContext) -> LayoutContext<'static> {
        LayoutContext::new(view, &FixedMeasurer, 0.0)
    }

    fn bottom_axis() -> Axis {
        let mut axis = Axis::numerical(AxisType::First)
            .with_range(0.0, 100.0)
            .with_major_step(25.0);
        axis.update();
        axis
    }

    #[test]
    fn test_horizontal_desired_size_and_margin() {
        let mut axis = bottom_axis().with_title("Time");
        axis.measure(Size::new(400.0, 300.0), &ctx(ViewContext::default()));

        // line 1 + tick 5 + label 10 + title 12
        assert_eq!(axis.desired_size(), Size::new(0.0, 28.0));
        assert_eq!(axis.desired_margin(), Thickness::new(0.0, 0.0, 10.0, 0.0));
    }

    #[test]
    fn test_clipped_last_label_needs_no_margin() {
        let mut axis = bottom_axis().with_last_label_visibility(AxisLastLabelVisibility::Clip);
        axis.measure(Size::new(400.0, 300.0), &ctx(ViewContext::default()));
        assert!(axis.desired_margin().is_zero());
    }

    #[test]
    fn test_multiline_rows_grow_as_width_shrinks() {
        let mut axis = bottom_axis().with_label_fit_mode(AxisLabelFitMode::MultiLine);
        let context = ctx(ViewContext::default());

        // 5 labels x 20 = 100 wide
        axis.measure(Size::new(400.0, 300.0), &context);
        assert_eq!(axis.desired_size().height, 16.0);

        axis.measure(Size::new(60.0, 300.0), &context);
        assert_eq!(axis.desired_size().height, 26.0);
    }

    #[test]
    fn test_horizontal_arrange() {
        let mut axis = bottom_axis();
        let context = ctx(ViewContext::default());
        axis.measure(Size::new(200.0, 100.0), &context);
        axis.arrange(Rect::new(30.0, 80.0, 200.0, 16.0), &context);

        let ticks = axis.ticks();
        assert_eq!(ticks[0].layout_slot, Rect::new(30.0, 80.0, 1.0, 5.0));
        assert_eq!(ticks[2].layout_slot.x, 130.0);
        assert_eq!(ticks[4].layout_slot.x, 230.0);
        assert_eq!(axis.labels()[2].layout_slot, Rect::new(120.0, 85.0, 20.0, 10.0));

        axis.apply_layout_rounding(&context.view);
        assert_eq!(axis.ticks()[4].layout_slot.x, 229.0);
    }

    #[test]
    fn test_vertical_measure_and_arrange() {
        let mut axis = Axis::numerical(AxisType::Second)
            .with_range(0.0, 10.0)
            .with_major_step(5.0);
        axis.update();
        let context = ctx(ViewContext::default());
        axis.measure(Size::new(200.0, 100.0), &context);

        assert_eq!(axis.desired_size(), Size::new(26.0, 0.0));
        assert_eq!(axis.desired_margin(), Thickness::new(0.0, 5.0, 0.0, 0.0));

        axis.arrange(Rect::new(0.0, 0.0, 26.0, 100.0), &context);
        let ticks = axis.ticks();
        assert_eq!(ticks[0].layout_slot.y, 100.0);
        assert_eq!(ticks[1].layout_slot.y, 50.0);
        assert_eq!(ticks[2].layout_slot.y, 0.0);
        assert_eq!(ticks[1].layout_slot.x, 21.0);
        assert_eq!(axis.labels()[1].layout_slot, Rect::new(1.0, 45.0, 20.0, 10.0));
    }

    #[test]
    fn test_zoomed_visible_range() {
        let axis = bottom_axis();
        let view = ViewContext {
            plot_origin_x: -0.5,
            zoom_width: 2.0,
            ..ViewContext::default()
        };
        assert_eq!(axis.strategy_visible_range(&view), (0.25, 0.75));

        let mut vertical = Axis::numerical(AxisType::Second);
        vertical.set_strategy(AxisLayoutStrategy::Vertical);
        let view = ViewContext {
            zoom_height: 2.0,
            ..ViewContext::default()
        };
        assert_eq!(vertical.strategy_visible_range(&view), (0.5, 1.0));
    }

    #[test]
    fn test_ticks_outside_clip_are_hidden() {
        let mut axis = bottom_axis();
        let view = ViewContext {
            zoom_width: 2.0,
            ..ViewContext::default()
        };
        let context = ctx(view);
        axis.measure(Size::new(100.0, 100.0), &context);
        axis.arrange(Rect::new(0.0, 0.0, 100.0, 16.0), &context);
        axis.update_ticks_visibility(&Rect::new(0.0, 0.0, 100.0, 100.0));

        // ticks beyond the visible half plus one step are not generated at all
        let visible: Vec<bool> = axis.ticks().iter().map(|t| t.is_visible).collect();
        assert_eq!(visible, vec![true, true, false, false]);
        assert!(axis.labels()[1].is_visible);
        assert!(!axis.labels()[3].is_visible);
    }

    #[test]
    fn test_radial_margins_are_symmetric() {
        let mut axis = Axis::radial_numerical().with_major_step(90.0);
        axis.set_strategy(AxisLayoutStrategy::Radial);
        axis.update();
        let context = ctx(ViewContext::default());
        axis.measure(Size::new(200.0, 200.0), &context);

        // labels overhang by their full size at the four compass points, plus line and tick
        let margin = axis.desired_margin();
        assert_eq!(margin, Thickness::new(26.0, 16.0, 26.0, 16.0));
        assert_eq!(axis.desired_size(), Size::new(200.0, 200.0));

        axis.arrange(Rect::new(0.0, 0.0, 200.0, 200.0), &context);
        // angle 0 maps to the right-hand side of the circle
        let tick = axis.ticks()[0].layout_slot;
        assert!((tick.x - 174.0).abs() < 1e-9);
        assert!((tick.y - 100.0).abs() < 1e-9);
    }
}
