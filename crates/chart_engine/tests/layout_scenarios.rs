//! Integration tests for chart area layout
//!
//! These drive a chart area the way a host does: attach a view and axes,
//! arrange into an available rectangle, then query the plot area and convert
//! between pixels and data.

use chart_engine::{
    AnnotationGeometry, AnnotationKind, AreaState, Axis, AxisHorizontalLocation,
    AxisLastLabelVisibility, AxisType, ChartArea, ChartGrid, ContentKind, ContentMeasurer,
    DataValue, InvalidateFlags, NotLoadedReason, Point, Rect, Size, ViewContext,
};

/// Every label is 24x14 pixels
struct FixedMeasurer;

impl ContentMeasurer for FixedMeasurer {
    fn measure(&self, _content: &str, _kind: ContentKind) -> Size {
        Size::new(24.0, 14.0)
    }
}

fn area_with_fixed_labels() -> ChartArea {
    let mut area = ChartArea::cartesian().with_measurer(Box::new(FixedMeasurer));
    area.attach_view(ViewContext::default()).unwrap();
    area
}

fn value_axis(axis_type: AxisType, visibility: AxisLastLabelVisibility) -> Axis {
    Axis::numerical(axis_type)
        .with_range(0.0, 10.0)
        .with_major_step(5.0)
        .with_last_label_visibility(visibility)
}

#[test]
fn test_plot_rect_between_left_and_bottom_axes() {
    let mut area = area_with_fixed_labels();
    area.add_axis(value_axis(AxisType::First, AxisLastLabelVisibility::Clip), AxisType::First);
    area.add_axis(value_axis(AxisType::Second, AxisLastLabelVisibility::Clip), AxisType::Second);

    let plot = area.arrange(Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();

    // left axis: line 1 + tick 5 + label 24; bottom axis: line 1 + tick 5 + label 14
    assert_eq!(plot, Rect::new(30.0, 0.0, 170.0, 80.0));
    let layout = area.plot_area().unwrap();
    assert!(layout.converged);
    assert_eq!(layout.virtual_rect, plot);
}

#[test]
fn test_empty_stacks_take_only_cross_margins() {
    let mut area = area_with_fixed_labels();
    area.add_axis(value_axis(AxisType::First, AxisLastLabelVisibility::Visible), AxisType::First);
    area.add_axis(
        value_axis(AxisType::Second, AxisLastLabelVisibility::Visible)
            .with_horizontal_location(AxisHorizontalLocation::Right),
        AxisType::Second,
    );

    let plot = area.arrange(Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();

    // no left or top axes: those offsets come from the crossing stacks only
    assert_eq!(plot.x, 0.0);
    assert_eq!(plot.y, 7.0);
    assert_eq!(plot.right(), 170.0);
    assert_eq!(plot.bottom(), 80.0);
}

#[test]
fn test_polar_angle_normalization() {
    let mut area = ChartArea::polar(0.0);
    area.attach_view(ViewContext::default()).unwrap();
    area.set_polar_axis(Axis::numerical(AxisType::First).with_range(0.0, 10.0))
        .unwrap();
    area.set_angle_axis(Axis::radial_numerical()).unwrap();

    assert_eq!(area.normalize_angle(90.0), 270.0);
    assert_eq!(area.normalize_angle(0.0), 0.0);
}

#[test]
fn test_conversions_before_update_return_nothing() {
    let mut area = area_with_fixed_labels();
    let x = area.add_axis(Axis::numerical(AxisType::First), AxisType::First);
    area.add_axis(Axis::numerical(AxisType::Second), AxisType::Second);
    assert_eq!(area.state(), AreaState::Operational);

    assert_eq!(area.point_to_data(Point::new(50.0, 50.0)), (None, None));
    assert!(area
        .data_to_point(&DataValue::Number(1.0), &DataValue::Number(1.0))
        .is_nan());

    // a data change resets the axes until the next arrange
    area.arrange(Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();
    area.set_axis_data_extent(x, 0.0, 40.0).unwrap();
    assert_eq!(area.point_to_data(Point::new(50.0, 50.0)), (None, None));

    area.arrange(Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();
    let (first, second) = area.point_to_data(Point::new(100.0, 40.0));
    assert!(first.is_some() && second.is_some());
}

#[test]
fn test_nested_updates_invalidate_once() {
    let mut area = area_with_fixed_labels();
    area.take_invalidations();

    area.begin_update();
    area.begin_update();
    area.add_axis(Axis::numerical(AxisType::First), AxisType::First);
    area.add_annotation(AnnotationKind::Custom {
        first: DataValue::Number(1.0),
        second: DataValue::Number(1.0),
    });
    area.end_update(false);
    area.end_update(true);

    assert_eq!(area.take_invalidations(), vec![InvalidateFlags::ALL]);
}

#[test]
fn test_incomplete_area_reports_reasons() {
    let mut area = area_with_fixed_labels();
    area.add_axis(Axis::numerical(AxisType::Second), AxisType::Second);

    assert_eq!(area.state(), AreaState::AxesIncomplete);
    let keys: Vec<&str> = area.not_loaded_reasons().iter().map(|r| r.key()).collect();
    assert_eq!(keys, vec!["NoHorizontalAxis"]);
    assert_eq!(area.not_loaded_reasons(), vec![NotLoadedReason::NoHorizontalAxis]);

    let available = Rect::new(0.0, 0.0, 200.0, 100.0);
    assert_eq!(area.arrange(available).unwrap(), available);
}

#[test]
fn test_zoomed_area_maps_through_virtual_rect() {
    let mut area = area_with_fixed_labels();
    area.add_axis(
        Axis::numerical(AxisType::First).with_range(0.0, 100.0).with_major_step(10.0),
        AxisType::First,
    );
    area.add_axis(value_axis(AxisType::Second, AxisLastLabelVisibility::Clip), AxisType::Second);
    area.set_zoom(2.0, 1.0).unwrap();
    area.set_plot_origin(-0.5, 0.0);

    let plot = area.arrange(Rect::new(0.0, 0.0, 230.0, 100.0)).unwrap();
    let layout = *area.plot_area().unwrap();
    assert_eq!(layout.virtual_rect.width, plot.width * 2.0);

    // panned half a plot width: the left plot edge shows the middle of the data
    let (first, _) = area.point_to_data(Point::new(plot.x, plot.y));
    let first = first.and_then(|v| v.as_f64()).unwrap();
    assert!((first - 25.0).abs() < 1e-9);
}

#[test]
fn test_grid_and_annotations_follow_arrange() {
    let mut area = area_with_fixed_labels();
    let x = area.add_axis(value_axis(AxisType::First, AxisLastLabelVisibility::Clip), AxisType::First);
    area.add_axis(value_axis(AxisType::Second, AxisLastLabelVisibility::Clip), AxisType::Second);
    area.set_grid(Some(ChartGrid::new()));
    let band = area.add_annotation(AnnotationKind::PlotBand {
        axis: x,
        from: DataValue::Number(0.0),
        to: DataValue::Number(5.0),
    });

    let plot = area.arrange(Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();

    let grid = area.grid().unwrap();
    assert!(grid.is_valid());
    assert_eq!(grid.first_lines().len(), 3);
    assert_eq!(grid.second_lines().len(), 3);

    let annotation = area.annotation(band).unwrap();
    assert_eq!(
        annotation.geometry(),
        Some(&AnnotationGeometry::Band(Rect::new(plot.x, plot.y, plot.width / 2.0, plot.height)))
    );

    area.invalidate(InvalidateFlags::RESET_ANNOTATIONS);
    assert!(area.annotation(band).unwrap().geometry().is_none());
}

#[test]
fn test_polar_round_trip_through_area() {
    let mut area = ChartArea::polar(45.0);
    area.attach_view(ViewContext::default()).unwrap();
    area.set_polar_axis(Axis::numerical(AxisType::First).with_range(0.0, 10.0))
        .unwrap();
    area.set_angle_axis(Axis::radial_categorical().with_categories(["N", "E", "S", "W"]))
        .unwrap();

    let plot = area.arrange(Rect::new(0.0, 0.0, 300.0, 200.0)).unwrap();
    assert_eq!(plot.width, plot.height);

    let point = area.data_to_point(&DataValue::Number(5.0), &DataValue::from("S"));
    assert!(!point.is_nan());
    let (radius, angle) = area.point_to_data(point);
    let radius = radius.and_then(|v| v.as_f64()).unwrap();
    assert!((radius - 5.0).abs() < 1e-9);
    assert_eq!(angle, Some(DataValue::from("S")));
}
