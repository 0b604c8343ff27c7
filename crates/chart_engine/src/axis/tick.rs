//! Ticks, labels and titles produced by an axis

use chart_geometry::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Where a tick sits in the tick sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickPosition {
    First,
    Inner,
    Last,
}

/// A major tick mark
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Domain value of the tick (a number, or a category index)
    pub value: f64,
    /// Position along the axis in `[0, 1]`, flipped for inverse axes
    pub normalized_value: f64,
    pub position: TickPosition,
    /// Index into the axis label list when the tick carries a label
    pub label: Option<usize>,
    pub layout_slot: Rect,
    pub is_visible: bool,
}

impl AxisTick {
    pub(crate) fn new(value: f64, normalized_value: f64) -> Self {
        Self {
            value,
            normalized_value,
            position: TickPosition::Inner,
            label: None,
            layout_slot: Rect::default(),
            is_visible: true,
        }
    }
}

/// A tick label
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub content: String,
    /// Position along the axis in `[0, 1]`
    pub normalized_position: f64,
    /// Measured size; `None` until the host measurer has seen the label
    pub desired_size: Option<Size>,
    pub layout_slot: Rect,
    pub is_visible: bool,
}

impl AxisLabel {
    pub(crate) fn new(content: String, normalized_position: f64) -> Self {
        Self {
            content,
            normalized_position,
            desired_size: None,
            layout_slot: Rect::default(),
            is_visible: true,
        }
    }

    pub fn size(&self) -> Size {
        self.desired_size.unwrap_or(Size::EMPTY)
    }
}

/// Optional axis title
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisTitle {
    pub content: Option<String>,
    pub desired_size: Option<Size>,
    pub layout_slot: Rect,
}

impl AxisTitle {
    pub fn size(&self) -> Size {
        self.desired_size.unwrap_or(Size::EMPTY)
    }
}

/// Format a numeric tick value without trailing zeros
pub fn format_tick_value(value: f64) -> String {
    if value == 0.0 {
        // avoids "-0"
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }

    let formatted = format!("{:.10}", value);
    formatted.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Apply a label format such as `"{} %"` or `"${0}"` to label content
pub fn apply_label_format(format: &str, content: &str) -> String {
    if format.is_empty() {
        return content.to_string();
    }
    if format.contains("{0}") {
        return format.replace("{0}", content);
    }
    if format.contains("{}") {
        return format.replacen("{}", content, 1);
    }
    format.to_string()
}
