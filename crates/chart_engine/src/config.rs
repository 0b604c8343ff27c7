//! Engine settings
//!
//! Settings are plain serde structs with defaults, so a host can keep them in
//! its own settings file or load them from a standalone JSON document.

use crate::axis::{AxisLabelFitMode, AxisLastLabelVisibility};
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default iteration cap of the cartesian plot-area solver
pub const DEFAULT_MAX_LAYOUT_PASSES: usize = 10;

/// Top-level engine settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Upper bound on solver passes before the layout is accepted as-is
    pub max_layout_passes: usize,
    /// Snap the plot rectangle and axis geometry to whole pixels
    pub layout_rounding: bool,
    /// Defaults applied to axes as they are added to a chart area
    pub axis: AxisDefaults,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_layout_passes: DEFAULT_MAX_LAYOUT_PASSES,
            layout_rounding: true,
            axis: AxisDefaults::default(),
        }
    }
}

/// Default visual metrics for new axes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AxisDefaults {
    /// Length of major ticks
    pub major_tick_length: f64,
    /// Thickness of the axis line
    pub line_thickness: f64,
    /// Thickness of a tick mark
    pub tick_thickness: f64,
    /// How labels are fitted when they do not fit on one row
    pub label_fit_mode: AxisLabelFitMode,
    /// Whether the last label is shown, hidden or clipped
    pub last_label_visibility: AxisLastLabelVisibility,
}

impl Default for AxisDefaults {
    fn default() -> Self {
        Self {
            major_tick_length: 5.0,
            line_thickness: 1.0,
            tick_thickness: 1.0,
            label_fit_mode: AxisLabelFitMode::None,
            last_label_visibility: AxisLastLabelVisibility::Visible,
        }
    }
}

impl EngineSettings {
    /// Parse settings from a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> ChartResult<Self> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load(path: &Path) -> ChartResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match Self::from_json(&content) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!(
                    target: "chart_engine::config",
                    "Failed to parse engine settings, using defaults: {}",
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self, path: &Path) -> ChartResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Reject values the layout code cannot work with
    pub fn validate(&self) -> ChartResult<()> {
        if self.max_layout_passes == 0 {
            return Err(ChartError::InvalidSetting(
                "max_layout_passes must be at least 1".to_string(),
            ));
        }
        self.axis.validate()
    }
}

impl AxisDefaults {
    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("major_tick_length", self.major_tick_length),
            ("line_thickness", self.line_thickness),
            ("tick_thickness", self.tick_thickness),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(ChartError::InvalidSetting(format!(
                    "{} may not be negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.max_layout_passes, 10);
        assert!(settings.layout_rounding);
        assert_eq!(settings.axis.major_tick_length, 5.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = EngineSettings::from_json(r#"{ "max_layout_passes": 4 }"#).unwrap();
        assert_eq!(settings.max_layout_passes, 4);
        assert!(settings.layout_rounding);
        assert_eq!(settings.axis, AxisDefaults::default());
    }

    #[test]
    fn test_zero_passes_rejected() {
        let result = EngineSettings::from_json(r#"{ "max_layout_passes": 0 }"#);
        assert!(matches!(result, Err(ChartError::InvalidSetting(_))));
    }

    #[test]
    fn test_negative_tick_length_rejected() {
        let result = EngineSettings::from_json(r#"{ "axis": { "major_tick_length": -2.0 } }"#);
        assert!(matches!(result, Err(ChartError::InvalidSetting(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine").join("settings.json");

        let mut settings = EngineSettings::default();
        settings.layout_rounding = false;
        settings.axis.label_fit_mode = AxisLabelFitMode::MultiLine;
        settings.save(&path).unwrap();

        let loaded = EngineSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_or_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(EngineSettings::load(&missing).unwrap(), EngineSettings::default());

        let corrupt = dir.path().join("corrupt.json");
        std::fs::write(&corrupt, "{ not json").unwrap();
        assert_eq!(EngineSettings::load(&corrupt).unwrap(), EngineSettings::default());
    }
}
