//! Snap settings shared by the settings UI and the snap engine.

use serde::{Deserialize, Serialize};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

use crate::ConfigError;

/// Enable flag and step for one snapping category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapStep {
    pub enabled: bool,
    pub step: f32,
}

impl SnapStep {
    pub const fn new(enabled: bool, step: f32) -> Self {
        Self { enabled, step }
    }
}

/// Snapping configuration read on every drag update.
///
/// The rotation step is stored in degrees because that is what users type;
/// use [`SnapSettings::rotation_step_radians`] when snapping Euler angles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct SnapSettings {
    /// Position snapping, step in world units
    pub position: SnapStep,
    /// Rotation snapping, step in degrees
    pub rotation: SnapStep,
    /// Scale snapping, step as a multiplier increment
    pub scale: SnapStep,
    /// Round absolute positions to the grid
    pub snap_to_grid: bool,
    /// Pull positions onto nearby objects
    pub snap_to_objects: bool,
    /// Round the drag offset instead of the absolute position
    pub relative_snap: bool,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            position: SnapStep::new(false, 1.0),
            rotation: SnapStep::new(false, 15.0),
            scale: SnapStep::new(false, 0.5),
            snap_to_grid: true,
            snap_to_objects: false,
            relative_snap: false,
        }
    }
}

impl SnapSettings {
    /// Rotation step converted to radians
    pub fn rotation_step_radians(&self) -> f32 {
        self.rotation.step.to_radians()
    }

    /// Whether the snap grid should be drawn in the viewport
    pub fn grid_visible(&self) -> bool {
        self.position.enabled && self.snap_to_grid
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (name, step) in [
            ("position", self.position),
            ("rotation", self.rotation),
            ("scale", self.scale),
        ] {
            if !(step.step.is_finite() && step.step > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "snap.{name}.step must be a positive number, got {}",
                    step.step
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
    fn test_rotation_step_in_radians() {
        let settings = SnapSettings::default();
        assert!((settings.rotation_step_radians() - std::f32::consts::PI / 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_grid_visible_needs_both_flags() {
        let mut settings = SnapSettings::default();
        assert!(!settings.grid_visible());
        settings.position.enabled = true;
        assert!(settings.grid_visible());
        settings.snap_to_grid = false;
        assert!(!settings.grid_visible());
    }

    #[test]
    fn test_negative_step_rejected() {
        let mut settings = SnapSettings::default();
        settings.scale.step = -0.5;
        assert!(settings.validate().is_err());
    }
}
