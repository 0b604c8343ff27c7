//! Polar framing and pixel <-> data mapping
//!
//! A polar area inscribes a circle in the available rectangle. The angle axis
//! is laid out around that circle first; whatever its labels leave free,
//! squared and centered, becomes the plot rectangle the radius axis spans.
//!
//! Domain angles increase counter-clockwise from the start angle unless the
//! angle axis is inverse. Screen angles (what [`chart_geometry::arc_point`]
//! takes) increase clockwise from the positive X axis.

use crate::axis::{Axis, LayoutContext};
use crate::error::{ChartError, ChartResult};
use crate::value::DataValue;
use crate::view::ViewContext;
use chart_geometry::{arc_point, to_polar_coordinates, wrap_degrees, Point, Rect};

/// Screen angle of a domain angle.
///
/// ```
/// use chart_engine::normalize_angle;
///
/// // counter-clockwise 90 degrees from 3 o'clock is 12 o'clock
/// assert_eq!(normalize_angle(90.0, 0.0, false), 270.0);
/// assert_eq!(normalize_angle(90.0, 0.0, true), 90.0);
/// ```
pub fn normalize_angle(angle: f64, start_angle: f64, inverse: bool) -> f64 {
    let screen = if inverse {
        start_angle + angle
    } else {
        360.0 - start_angle - angle
    };
    wrap_degrees(screen)
}

/// Domain angle of a counter-clockwise screen angle, undoing [`normalize_angle`]
fn domain_angle(counter_clockwise: f64, start_angle: f64, inverse: bool) -> f64 {
    if inverse {
        let clockwise = wrap_degrees(360.0 - counter_clockwise);
        wrap_degrees(clockwise - start_angle)
    } else {
        wrap_degrees(counter_clockwise - start_angle)
    }
}

/// Frame both polar axes inside `rect` and return the plot rectangle
pub(crate) fn arrange_axes(
    axes: &mut [Axis],
    radius_index: usize,
    angle_index: usize,
    rect: Rect,
    ctx: &LayoutContext<'_>,
) -> ChartResult<Rect> {
    if !axes[angle_index].is_radial() {
        return Err(ChartError::NonRadialAngleAxis);
    }

    let ellipse = rect.to_square(false).center_in(&rect);

    let angle_axis = &mut axes[angle_index];
    angle_axis.measure(ellipse.size(), ctx);
    angle_axis.arrange(ellipse, ctx);
    let margins = angle_axis.desired_margin();

    let remaining = ellipse.deflate(&margins).to_square(false).center_in(&ellipse);

    let radius_axis = &mut axes[radius_index];
    radius_axis.measure(ellipse.size(), ctx);
    radius_axis.arrange(remaining, ctx);

    tracing::trace!(target: "chart_engine::layout", ?ellipse, ?remaining, "polar framing");
    Ok(remaining)
}

/// Convert a pixel to `(radius, angle)` domain values
pub fn point_to_data(
    radius_axis: Option<&Axis>,
    angle_axis: Option<&Axis>,
    point: Point,
    plot_rect: &Rect,
    view: &ViewContext,
    start_angle: f64,
) -> (Option<DataValue>, Option<DataValue>) {
    let pan = view.pan_offset(plot_rect);
    let center = plot_rect.center();
    let (radius, counter_clockwise) =
        to_polar_coordinates(point.offset(-pan.x, -pan.y), center, true);

    // the radius axis runs from the center to the right edge
    let radius_value = radius_axis.and_then(|axis| {
        let half = Rect::new(center.x, plot_rect.y, plot_rect.width / 2.0, plot_rect.height / 2.0);
        axis.physical_to_data(half.x + radius, &half)
    });
    let angle_value = angle_axis.and_then(|axis| {
        axis.angle_to_data(domain_angle(counter_clockwise, start_angle, axis.is_inverse()))
    });

    (radius_value, angle_value)
}

/// Convert `(radius, angle)` domain values to a pixel, or NaN if either
/// value cannot be mapped
pub fn data_to_point(
    radius_axis: Option<&Axis>,
    angle_axis: Option<&Axis>,
    radius_value: &DataValue,
    angle_value: &DataValue,
    plot_rect: &Rect,
    view: &ViewContext,
    start_angle: f64,
) -> Point {
    let radius = radius_axis
        .and_then(|axis| axis.plot_info(radius_value))
        .map(|info| info.normalized_position() * plot_rect.width / 2.0);
    let angle = angle_axis.and_then(|axis| {
        axis.value_angle(angle_value)
            .map(|angle| normalize_angle(angle, start_angle, axis.is_inverse()))
    });

    match (radius, angle) {
        (Some(radius), Some(angle)) => {
            let pan = view.pan_offset(plot_rect);
            arc_point(angle, plot_rect.center(), radius).offset(pan.x, pan.y)
        }
        _ => Point::nan(),
    }
}
