//! Axis stacks
//!
//! A stack groups the axes that share one side of a cartesian plot area so
//! that the solver can treat them as a single layout unit. Stacks refer to
//! axes by their index in the area's axis list and are rebuilt every pass.

use crate::axis::{Axis, AxisHorizontalLocation, AxisType, AxisVerticalLocation, LayoutContext};
use chart_geometry::{Size, Thickness};

/// Side of the plot area a stack occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackSide {
    Left,
    Top,
    Right,
    Bottom,
}

/// Same-side axes measured as one unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisStack {
    axes: Vec<usize>,
    pub(crate) desired_width: f64,
    pub(crate) desired_height: f64,
    pub(crate) desired_margin: Thickness,
}

impl AxisStack {
    /// Create a stack from axis indices, innermost first
    pub fn new(axes: Vec<usize>) -> Self {
        Self {
            axes,
            ..Self::default()
        }
    }

    /// Indices of the stacked axes, innermost first
    pub fn axes(&self) -> &[usize] {
        &self.axes
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Sum of the axes' desired widths
    pub fn desired_width(&self) -> f64 {
        self.desired_width
    }

    /// Sum of the axes' desired heights
    pub fn desired_height(&self) -> f64 {
        self.desired_height
    }

    /// Component-wise maximum of the axes' desired margins
    pub fn desired_margin(&self) -> Thickness {
        self.desired_margin
    }

    /// Measure every axis with the full available size and aggregate the results
    pub(crate) fn measure(&mut self, axes: &mut [Axis], available: Size, ctx: &LayoutContext<'_>) {
        self.desired_width = 0.0;
        self.desired_height = 0.0;
        self.desired_margin = Thickness::default();

        for &index in &self.axes {
            let axis = &mut axes[index];
            axis.measure(available, ctx);

            let size = axis.desired_size();
            self.desired_width += size.width;
            self.desired_height += size.height;
            self.desired_margin = self.desired_margin.max(&axis.desired_margin());
        }
    }
}

/// The four stacks of a cartesian area, in left, top, right, bottom order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisStacks {
    pub left: AxisStack,
    pub top: AxisStack,
    pub right: AxisStack,
    pub bottom: AxisStack,
}

impl AxisStacks {
    /// Distribute axes by role and location: Second axes go left or right,
    /// First axes go bottom or top
    pub fn from_axes(axes: &[Axis]) -> Self {
        let mut left = Vec::new();
        let mut top = Vec::new();
        let mut right = Vec::new();
        let mut bottom = Vec::new();

        for (index, axis) in axes.iter().enumerate() {
            match axis.axis_type() {
                AxisType::Second => match axis.horizontal_location() {
                    AxisHorizontalLocation::Left => left.push(index),
                    AxisHorizontalLocation::Right => right.push(index),
                },
                AxisType::First => match axis.vertical_location() {
                    AxisVerticalLocation::Bottom => bottom.push(index),
                    AxisVerticalLocation::Top => top.push(index),
                },
            }
        }

        Self {
            left: AxisStack::new(left),
            top: AxisStack::new(top),
            right: AxisStack::new(right),
            bottom: AxisStack::new(bottom),
        }
    }

    pub fn side(&self, side: StackSide) -> &AxisStack {
        match side {
            StackSide::Left => &self.left,
            StackSide::Top => &self.top,
            StackSide::Right => &self.right,
            StackSide::Bottom => &self.bottom,
        }
    }

    pub(crate) fn measure(&mut self, axes: &mut [Axis], available: Size, ctx: &LayoutContext<'_>) {
        self.left.measure(axes, available, ctx);
        self.top.measure(axes, available, ctx);
        self.right.measure(axes, available, ctx);
        self.bottom.measure(axes, available, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::CharWidthMeasurer;
    use crate::view::ViewContext;

    fn axes() -> Vec<Axis> {
        let mut axes = vec![
            Axis::numerical(AxisType::First).with_range(0.0, 10.0),
            Axis::numerical(AxisType::Second).with_range(0.0, 10.0),
            Axis::numerical(AxisType::Second)
                .with_range(0.0, 1000.0)
                .with_horizontal_location(AxisHorizontalLocation::Left),
            Axis::numerical(AxisType::First)
                .with_range(0.0, 10.0)
                .with_vertical_location(AxisVerticalLocation::Top),
        ];
        for axis in axes.iter_mut() {
            axis.update();
        }
        axes
    }

    #[test]
    fn test_axes_are_distributed_by_role_and_location() {
        let stacks = AxisStacks::from_axes(&axes());

        assert_eq!(stacks.bottom.axes(), &[0]);
        assert_eq!(stacks.left.axes(), &[1, 2]);
        assert_eq!(stacks.top.axes(), &[3]);
        assert!(stacks.side(StackSide::Right).is_empty());
    }

    #[test]
    fn test_measure_sums_sizes_and_maxes_margins() {
        let mut axes = axes();
        let measurer = CharWidthMeasurer::new();
        let ctx = LayoutContext::new(ViewContext::default(), &measurer, 0.0);
        let mut stacks = AxisStacks::from_axes(&axes);
        stacks.measure(&mut axes, Size::new(400.0, 300.0), &ctx);

        let first = axes[1].desired_size().width;
        let second = axes[2].desired_size().width;
        assert_eq!(stacks.left.desired_width(), first + second);
        assert_eq!(
            stacks.left.desired_margin(),
            axes[1].desired_margin().max(&axes[2].desired_margin())
        );

        // an empty stack contributes nothing
        assert_eq!(stacks.right.desired_width(), 0.0);
        assert!(stacks.right.desired_margin().is_zero());
    }
}
