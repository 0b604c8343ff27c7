//! Cartesian plot-area solver and pixel <-> data mapping
//!
//! The solver measures every axis stack against the full available size,
//! derives a plot rectangle from the stack sizes and margins, then arranges
//! the stacks around it. Arranging can change an axis' desired size (labels
//! wrap onto more rows once the real width is known), in which case the plot
//! rectangle is recomputed and the stacks are arranged again.

use crate::axis::{Axis, LayoutContext};
use crate::config::EngineSettings;
use crate::stack::{AxisStack, AxisStacks};
use crate::value::DataValue;
use crate::view::ViewContext;
use chart_geometry::{Point, Rect};

/// Result of one cartesian layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianLayout {
    /// Final plot rectangle, before zoom
    pub plot_rect: Rect,
    /// Arrange passes the solver needed
    pub passes: usize,
    /// False when the pass cap was hit and the last rectangle was accepted as-is
    pub converged: bool,
}

/// Plot rectangle left over after the four stacks take their room.
///
/// Each side reserves the larger of its own stack extent (plus that stack's
/// own margins) and the margins the crossing stacks ask for at that side.
pub fn calculate_plot_area_rect(
    available: &Rect,
    left: &AxisStack,
    top: &AxisStack,
    right: &AxisStack,
    bottom: &AxisStack,
    rounding: bool,
) -> Rect {
    let left_margin = left.desired_margin();
    let top_margin = top.desired_margin();
    let right_margin = right.desired_margin();
    let bottom_margin = bottom.desired_margin();

    let left_offset = (left.desired_width() + left_margin.left + left_margin.right)
        .max(top_margin.left.max(bottom_margin.left));
    let top_offset = (top.desired_height() + top_margin.top + top_margin.bottom)
        .max(left_margin.top.max(right_margin.top));
    let right_offset = (right.desired_width() + right_margin.left + right_margin.right)
        .max(top_margin.right.max(bottom_margin.right));
    let bottom_offset = (bottom.desired_height() + bottom_margin.top + bottom_margin.bottom)
        .max(left_margin.bottom.max(right_margin.bottom));

    let x = available.x + left_offset;
    let y = available.y + top_offset;
    let rect = Rect::new(
        x,
        y,
        available.right() - right_offset - x,
        available.bottom() - bottom_offset - y,
    );

    if rounding {
        rect.round()
    } else {
        rect
    }
}

/// Measure and arrange all cartesian axes into `available`
pub(crate) fn arrange_axes(
    axes: &mut [Axis],
    available: Rect,
    ctx: &LayoutContext<'_>,
    settings: &EngineSettings,
) -> CartesianLayout {
    let mut stacks = AxisStacks::from_axes(axes);
    stacks.measure(axes, available.size(), ctx);

    let max_passes = settings.max_layout_passes.max(1);
    let rounding = settings.layout_rounding;
    let mut plot_rect = stacks_plot_rect(&available, &stacks, rounding);
    let mut passes = 0;

    loop {
        if passes == max_passes {
            tracing::warn!(
                target: "chart_engine::layout",
                passes,
                ?plot_rect,
                "plot area did not converge, keeping last layout"
            );
            debug_assert!(false, "plot area layout did not converge in {} passes", passes);
            return CartesianLayout {
                plot_rect,
                passes,
                converged: false,
            };
        }
        passes += 1;

        let valid = arrange_stacks(axes, &mut stacks, &plot_rect, ctx);
        tracing::trace!(target: "chart_engine::layout", passes, ?plot_rect, valid, "plot area pass");
        if valid {
            return CartesianLayout {
                plot_rect,
                passes,
                converged: true,
            };
        }

        plot_rect = stacks_plot_rect(&available, &stacks, rounding);
    }
}

fn stacks_plot_rect(available: &Rect, stacks: &AxisStacks, rounding: bool) -> Rect {
    calculate_plot_area_rect(
        available,
        &stacks.left,
        &stacks.top,
        &stacks.right,
        &stacks.bottom,
        rounding,
    )
}

/// Arrange every stack around `plot`. Returns false if any axis changed its
/// desired extent, after folding the change into the stack totals.
fn arrange_stacks(
    axes: &mut [Axis],
    stacks: &mut AxisStacks,
    plot: &Rect,
    ctx: &LayoutContext<'_>,
) -> bool {
    let mut valid = true;

    let mut last_right = plot.x;
    for index in stacks.left.axes().to_vec() {
        let axis = &mut axes[index];
        let before = axis.desired_size().width;
        let rect = Rect::new(last_right - before, plot.y, before, plot.height);
        last_right = rect.x;
        axis.arrange(rect, ctx);

        let after = axis.desired_size().width;
        if after != before {
            stacks.left.desired_width += after - before;
            valid = false;
        }
    }

    let mut last_bottom = plot.y;
    for index in stacks.top.axes().to_vec() {
        let axis = &mut axes[index];
        let before = axis.desired_size().height;
        let rect = Rect::new(plot.x, last_bottom - before, plot.width, before);
        last_bottom = rect.y;
        axis.arrange(rect, ctx);

        let after = axis.desired_size().height;
        if after != before {
            stacks.top.desired_height += after - before;
            valid = false;
        }
    }

    let mut last_left = plot.right();
    for index in stacks.right.axes().to_vec() {
        let axis = &mut axes[index];
        let before = axis.desired_size().width;
        let rect = Rect::new(last_left, plot.y, before, plot.height);
        last_left += before;
        axis.arrange(rect, ctx);

        let after = axis.desired_size().width;
        if after != before {
            stacks.right.desired_width += after - before;
            valid = false;
        }
    }

    let mut last_top = plot.bottom();
    for index in stacks.bottom.axes().to_vec() {
        let axis = &mut axes[index];
        let before = axis.desired_size().height;
        let rect = Rect::new(plot.x, last_top, plot.width, before);
        last_top += before;
        axis.arrange(rect, ctx);

        let after = axis.desired_size().height;
        if after != before {
            stacks.bottom.desired_height += after - before;
            valid = false;
        }
    }

    valid
}

/// Convert a pixel to `(first, second)` domain values.
///
/// The pan offset is removed first, then each axis maps the coordinate
/// against the zoomed virtual plot rectangle.
pub fn point_to_data(
    first: Option<&Axis>,
    second: Option<&Axis>,
    point: Point,
    plot_rect: &Rect,
    view: &ViewContext,
) -> (Option<DataValue>, Option<DataValue>) {
    let pan = view.pan_offset(plot_rect);
    let virtual_rect = view.virtual_rect(plot_rect);
    let x = point.x - pan.x;
    let y = point.y - pan.y;

    (
        first.and_then(|axis| axis.physical_to_data(x, &virtual_rect)),
        second.and_then(|axis| axis.physical_to_data(y, &virtual_rect)),
    )
}

/// Convert domain values to a pixel; a coordinate is NaN when its axis is
/// missing or the value is not in the axis domain
pub fn data_to_point(
    first: Option<&Axis>,
    second: Option<&Axis>,
    first_value: &DataValue,
    second_value: &DataValue,
    plot_rect: &Rect,
    view: &ViewContext,
) -> Point {
    let pan = view.pan_offset(plot_rect);
    let virtual_rect = view.virtual_rect(plot_rect);

    let x = first
        .and_then(|axis| axis.plot_info(first_value))
        .map_or(f64::NAN, |info| info.center_x(&virtual_rect) + pan.x);
    let y = second
        .and_then(|axis| axis.plot_info(second_value))
        .map_or(f64::NAN, |info| info.center_y(&virtual_rect) + pan.y);

    Point::new(x, y)
}
