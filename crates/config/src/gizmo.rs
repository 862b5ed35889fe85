//! Gizmo tuning: sensitivities, handle geometry and rotate behavior.

use serde::{Deserialize, Serialize};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

use crate::ConfigError;

/// Which manipulation handle set is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GizmoKind {
    #[default]
    Translate,
    Rotate,
    Scale,
}

/// How mouse motion is turned into a rotation angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotateMode {
    /// Angle swept by the cursor around the projected gizmo center
    #[default]
    AngleAroundAxis,
    /// Mouse delta projected on the screen axis times `rotate_sensitivity`
    Linear,
}

/// Gizmo sensitivities and handle geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct GizmoSettings {
    /// World units per projected pixel
    pub translate_sensitivity: f32,
    /// Radians per projected pixel (linear rotate mode)
    pub rotate_sensitivity: f32,
    /// Scale factor change per projected pixel
    pub scale_sensitivity: f32,
    pub rotate_mode: RotateMode,
    /// Length of translate/scale handle shafts
    pub handle_length: f32,
    /// Pick tolerance around shafts and rings
    pub pick_thickness: f32,
    /// Size of arrow heads and scale boxes
    pub marker_size: f32,
    /// Radius of the rotation rings
    pub ring_radius: f32,
    /// Segments used to draw and pick rotation rings
    pub ring_segments: u32,
    /// Variant active at startup
    pub default_kind: GizmoKind,
}

impl Default for GizmoSettings {
    fn default() -> Self {
        Self {
            translate_sensitivity: 0.01,
            rotate_sensitivity: 0.01,
            scale_sensitivity: 0.01,
            rotate_mode: RotateMode::AngleAroundAxis,
            handle_length: 1.0,
            pick_thickness: 0.1,
            marker_size: 0.1,
            ring_radius: 1.0,
            ring_segments: 32,
            default_kind: GizmoKind::Translate,
        }
    }
}

impl GizmoSettings {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("handle_length", self.handle_length),
            ("pick_thickness", self.pick_thickness),
            ("marker_size", self.marker_size),
            ("ring_radius", self.ring_radius),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "gizmo.{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.ring_segments < 3 {
            return Err(ConfigError::Invalid(
                "gizmo.ring_segments must be at least 3".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert!(GizmoSettings::default().validate().is_ok());
    }

    #[test]
    fn test_degenerate_ring_rejected() {
        let settings = GizmoSettings {
            ring_segments: 2,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rotate_mode_roundtrips_by_name() {
        let json = serde_json::to_string(&RotateMode::Linear).unwrap();
        assert_eq!(json, "\"Linear\"");
    }
}
