//! Error types for the chart engine

use crate::axis::AxisId;
use thiserror::Error;

/// Errors that can occur when configuring or arranging a chart area
///
/// Missing axes are not errors: they put the area into a non-operational
/// state that reports [`crate::NotLoadedReason`]s instead.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The angle axis of a polar chart cannot be laid out on a circle
    #[error("Angle axis of a polar chart area must be radial")]
    NonRadialAngleAxis,

    /// The chart area does not own the requested axis
    #[error("Axis not found: {0}")]
    AxisNotFound(AxisId),

    /// A setter received an out-of-range value
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// Settings could not be parsed or serialized
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
