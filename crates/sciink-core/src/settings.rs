//! Editor configuration.

use crate::guides::DEFAULT_SNAP_THRESHOLD;
use crate::units::DEFAULT_DPI;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Settings errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid setting {name}: {value}")]
    Invalid { name: &'static str, value: f64 },
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Tunable editor behaviour. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Distance within which alignment guides appear.
    pub snap_threshold: f64,
    /// DPI used when converting to and from pixels.
    pub default_dpi: f64,
    /// Drawn size of anchor and control handles.
    pub handle_size: f64,
    /// Pick distance around handles.
    pub handle_hit_tolerance: f64,
    /// Douglas-Peucker tolerance for freehand input.
    pub simplify_tolerance: f64,
    /// Half-width of the gap cut for a connector jump.
    pub jump_arc_radius: f64,
    /// Height of a connector jump arc.
    pub jump_arc_height: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            default_dpi: DEFAULT_DPI,
            handle_size: 8.0,
            handle_hit_tolerance: 6.0,
            simplify_tolerance: 1.0,
            jump_arc_radius: 5.0,
            jump_arc_height: 5.0,
        }
    }
}

impl EditorSettings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> SettingsResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            SettingsError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded editor settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = [
            ("snap_threshold", self.snap_threshold),
            ("default_dpi", self.default_dpi),
            ("handle_size", self.handle_size),
            ("handle_hit_tolerance", self.handle_hit_tolerance),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::Invalid { name, value });
            }
        }

        let non_negative = [
            ("simplify_tolerance", self.simplify_tolerance),
            ("jump_arc_radius", self.jump_arc_radius),
            ("jump_arc_height", self.jump_arc_height),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Invalid { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = EditorSettings::default();
        assert_eq!(settings.snap_threshold, 5.0);
        assert_eq!(settings.default_dpi, 300.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = EditorSettings::from_json(r#"{ "default_dpi": 150 }"#).unwrap();
        assert_eq!(settings.default_dpi, 150.0);
        assert_eq!(settings.snap_threshold, DEFAULT_SNAP_THRESHOLD);
    }

    #[test]
    fn test_rejects_bad_values() {
        let result = EditorSettings::from_json(r#"{ "default_dpi": 0 }"#);
        assert!(matches!(result, Err(SettingsError::Invalid { name: "default_dpi", .. })));

        let result = EditorSettings::from_json(r#"{ "snap_threshold": -1 }"#);
        assert!(matches!(result, Err(SettingsError::Invalid { name: "snap_threshold", .. })));

        let result = EditorSettings::from_json("not json");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = EditorSettings::default();
        settings.handle_size = 12.0;
        fs::write(&path, settings.to_json().unwrap()).unwrap();

        let loaded = EditorSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(matches!(EditorSettings::load(&path), Err(SettingsError::Io(_))));
        assert_eq!(EditorSettings::load_or_default(&path).unwrap(), EditorSettings::default());
    }
}
