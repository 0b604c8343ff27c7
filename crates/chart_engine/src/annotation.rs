//! Chart annotations
//!
//! Annotations are positioned in data space and arranged into plot-space
//! geometry after the axes. Geometry is laid out against the virtual plot
//! rectangle without the pan offset, like series geometry; the host applies
//! the pan when rendering.

use crate::area::CoordinateSystem;
use crate::axis::{Axis, AxisId, AxisType};
use crate::polar::normalize_angle;
use crate::value::DataValue;
use crate::view::ViewContext;
use chart_geometry::{arc_point, Line, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an annotation owned by a chart area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotationId(Uuid);

impl AnnotationId {
    /// Create a new random AnnotationId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AnnotationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an annotation marks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnnotationKind {
    /// A line across the plot at one value of an axis
    GridLine { axis: AxisId, value: DataValue },
    /// The band between two values of an axis
    PlotBand {
        axis: AxisId,
        from: DataValue,
        to: DataValue,
    },
    /// A single point given by a value on each primary axis
    Custom { first: DataValue, second: DataValue },
}

/// Arranged plot-space geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnnotationGeometry {
    Line(Line),
    Band(Rect),
    Point(Point),
    Circle { center: Point, radius: f64 },
    Ring {
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
    },
    /// Screen angles in degrees, sweeping clockwise from `start_angle`
    Sector {
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    id: AnnotationId,
    kind: AnnotationKind,
    pub(crate) geometry: Option<AnnotationGeometry>,
    is_valid: bool,
}

impl Annotation {
    pub fn new(kind: AnnotationKind) -> Self {
        Self {
            id: AnnotationId::new(),
            kind,
            geometry: None,
            is_valid: false,
        }
    }

    pub fn id(&self) -> AnnotationId {
        self.id
    }

    pub fn kind(&self) -> &AnnotationKind {
        &self.kind
    }

    /// Geometry from the last arrange; `None` if the annotation could not be
    /// placed or was reset since
    pub fn geometry(&self) -> Option<&AnnotationGeometry> {
        self.geometry.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Drop arranged geometry
    pub(crate) fn reset(&mut self) {
        self.geometry = None;
        self.is_valid = false;
    }

    pub(crate) fn invalidate(&mut self) {
        self.is_valid = false;
    }

    pub(crate) fn arrange(&mut self, ctx: &AnnotationContext<'_>) {
        self.geometry = match ctx.system {
            CoordinateSystem::Cartesian => self.arrange_cartesian(ctx),
            CoordinateSystem::Polar { start_angle } => self.arrange_polar(ctx, start_angle),
        };
        self.is_valid = true;
    }

    fn arrange_cartesian(&self, ctx: &AnnotationContext<'_>) -> Option<AnnotationGeometry> {
        let rect = ctx.view.virtual_rect(&ctx.plot_rect);

        match &self.kind {
            AnnotationKind::GridLine { axis, value } => {
                let axis = ctx.axis(*axis)?;
                let info = axis.plot_info(value)?;
                Some(AnnotationGeometry::Line(match axis.axis_type() {
                    AxisType::First => {
                        let x = info.center_x(&rect);
                        Line::new(Point::new(x, rect.y), Point::new(x, rect.bottom()))
                    }
                    AxisType::Second => {
                        let y = info.center_y(&rect);
                        Line::new(Point::new(rect.x, y), Point::new(rect.right(), y))
                    }
                }))
            }
            AnnotationKind::PlotBand { axis, from, to } => {
                let axis = ctx.axis(*axis)?;
                let from = axis.plot_info(from)?;
                let to = axis.plot_info(to)?;
                Some(AnnotationGeometry::Band(match axis.axis_type() {
                    AxisType::First => Rect::from_points(
                        Point::new(from.center_x(&rect), rect.y),
                        Point::new(to.center_x(&rect), rect.bottom()),
                    ),
                    AxisType::Second => Rect::from_points(
                        Point::new(rect.x, from.center_y(&rect)),
                        Point::new(rect.right(), to.center_y(&rect)),
                    ),
                }))
            }
            AnnotationKind::Custom { first, second } => {
                let x = ctx.first?.plot_info(first)?.center_x(&rect);
                let y = ctx.second?.plot_info(second)?.center_y(&rect);
                Some(AnnotationGeometry::Point(Point::new(x, y)))
            }
        }
    }

    fn arrange_polar(&self, ctx: &AnnotationContext<'_>, start_angle: f64) -> Option<AnnotationGeometry> {
        let center = ctx.plot_rect.center();
        let max_radius = ctx.plot_rect.width / 2.0;
        let radius_of = |axis: &Axis, value: &DataValue| {
            axis.plot_info(value)
                .map(|info| info.normalized_position() * max_radius)
        };
        let angle_of = |axis: &Axis, value: &DataValue| {
            axis.value_angle(value)
                .map(|angle| normalize_angle(angle, start_angle, axis.is_inverse()))
        };

        match &self.kind {
            AnnotationKind::GridLine { axis, value } => {
                let axis = ctx.axis(*axis)?;
                match axis.axis_type() {
                    AxisType::First => Some(AnnotationGeometry::Circle {
                        center,
                        radius: radius_of(axis, value)?,
                    }),
                    AxisType::Second => {
                        let angle = angle_of(axis, value)?;
                        Some(AnnotationGeometry::Line(Line::new(
                            center,
                            arc_point(angle, center, max_radius),
                        )))
                    }
                }
            }
            AnnotationKind::PlotBand { axis, from, to } => {
                let axis = ctx.axis(*axis)?;
                match axis.axis_type() {
                    AxisType::First => {
                        let a = radius_of(axis, from)?;
                        let b = radius_of(axis, to)?;
                        Some(AnnotationGeometry::Ring {
                            center,
                            inner_radius: a.min(b),
                            outer_radius: a.max(b),
                        })
                    }
                    AxisType::Second => {
                        let a = angle_of(axis, from)?;
                        let b = angle_of(axis, to)?;
                        // domain angles run counter-clockwise unless inverse
                        let (start, end) = if axis.is_inverse() { (a, b) } else { (b, a) };
                        let sweep = chart_geometry::wrap_degrees(end - start);
                        Some(AnnotationGeometry::Sector {
                            center,
                            radius: max_radius,
                            start_angle: start,
                            sweep_angle: sweep,
                        })
                    }
                }
            }
            AnnotationKind::Custom { first, second } => {
                let radius = radius_of(ctx.first?, first)?;
                let angle = angle_of(ctx.second?, second)?;
                Some(AnnotationGeometry::Point(arc_point(angle, center, radius)))
            }
        }
    }
}

/// What annotations need from their chart area while arranging
pub(crate) struct AnnotationContext<'a> {
    pub system: CoordinateSystem,
    pub axes: &'a [Axis],
    pub first: Option<&'a Axis>,
    pub second: Option<&'a Axis>,
    pub plot_rect: Rect,
    pub view: ViewContext,
}

impl AnnotationContext<'_> {
    fn axis(&self, id: AxisId) -> Option<&Axis> {
        self.axes.iter().find(|axis| axis.id() == id)
    }
}
