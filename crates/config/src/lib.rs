//! Shared configuration for Scenewright
//!
//! This crate provides the single source of truth for window dimensions,
//! snapping, gizmo tuning and undo history depth. The manipulation core and
//! the Bevy front-end both read from these types.

mod error;
mod gizmo;
mod snap;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

pub use error::ConfigError;
pub use gizmo::{GizmoKind, GizmoSettings, RotateMode};
pub use snap::{SnapSettings, SnapStep};

/// Default window width in pixels
pub const DEFAULT_WIDTH: u32 = 1280;

/// Default window height in pixels
pub const DEFAULT_HEIGHT: u32 = 720;

/// Default scale factor (1.0 = no scaling)
pub const DEFAULT_SCALE: f32 = 1.0;

/// Default number of undo steps kept
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "SCENEWRIGHT_CONFIG";

/// Display configuration for window and rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct DisplayConfig {
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Scale factor for DPI scaling
    pub scale: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
        }
    }
}

/// Undo/redo history limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of undo entries; the oldest are evicted first
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct EditorConfig {
    pub display: DisplayConfig,
    pub snap: SnapSettings,
    pub gizmo: GizmoSettings,
    pub history: HistoryConfig,
}

impl EditorConfig {
    /// Parse a config from a JSON string and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Load the file named by `SCENEWRIGHT_CONFIG`, falling back to defaults
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded editor config from {}", path);
                config
            }
            Err(err) => {
                warn!("Ignoring editor config {}: {}", path, err);
                Self::default()
            }
        }
    }

    /// Reject values the editor cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "history.max_depth must be at least 1".to_string(),
            ));
        }
        self.snap.validate()?;
        self.gizmo.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DisplayConfig::default();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.scale, DEFAULT_SCALE);
    }

    #[test]
    fn test_default_editor_config_is_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history.max_depth, 100);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{ "history": { "max_depth": 10 } }"#).unwrap();
        assert_eq!(config.history.max_depth, 10);
        assert_eq!(config.display.width, DEFAULT_WIDTH);
        assert!(!config.snap.position.enabled);
    }

    #[test]
    fn test_zero_history_rejected() {
        let result = EditorConfig::from_json(r#"{ "history": { "max_depth": 0 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = EditorConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = EditorConfig::load("/definitely/not/here/scenewright.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
