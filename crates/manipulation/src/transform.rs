//! Position/rotation/scale state edited by the gizmos.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::EPSILON;
use crate::types::Axis;

/// Which transform field a gizmo or command edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformKind {
    Position,
    Rotation,
    Scale,
}

impl TransformKind {
    pub fn label(self) -> &'static str {
        match self {
            TransformKind::Position => "Move",
            TransformKind::Rotation => "Rotate",
            TransformKind::Scale => "Scale",
        }
    }
}

/// Local transform of one scene object.
///
/// Rotation is stored as Euler angles in radians, applied X first, then Y,
/// then Z. Scale components must stay non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformTarget {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for TransformTarget {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformTarget {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        debug_assert!(Self::is_valid(TransformKind::Scale, scale));
        self.scale = scale;
        self
    }

    pub fn get(&self, kind: TransformKind) -> Vec3 {
        match kind {
            TransformKind::Position => self.position,
            TransformKind::Rotation => self.rotation,
            TransformKind::Scale => self.scale,
        }
    }

    pub fn set(&mut self, kind: TransformKind, value: Vec3) {
        match kind {
            TransformKind::Position => self.position = value,
            TransformKind::Rotation => self.rotation = value,
            TransformKind::Scale => {
                debug_assert!(Self::is_valid(TransformKind::Scale, value));
                self.scale = value;
            }
        }
    }

    pub fn get_axis(&self, kind: TransformKind, axis: Axis) -> f32 {
        self.get(kind)[axis.index()]
    }

    pub fn set_axis(&mut self, kind: TransformKind, axis: Axis, value: f32) {
        let mut current = self.get(kind);
        current[axis.index()] = value;
        self.set(kind, current);
    }

    /// Whether `value` may be stored in the `kind` field.
    ///
    /// All fields must be finite; scale additionally rejects components
    /// within [`EPSILON`] of zero.
    pub fn is_valid(kind: TransformKind, value: Vec3) -> bool {
        value.is_finite() && (kind != TransformKind::Scale || value.abs().min_element() > EPSILON)
    }

    pub fn rotation_quat(&self) -> Quat {
        // Intrinsic ZYX == extrinsic XYZ: X is applied to the vector first
        Quat::from_euler(EulerRot::ZYX, self.rotation.z, self.rotation.y, self.rotation.x)
    }

    /// Local-to-parent matrix: `T * Rz * Ry * Rx * S`
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }
}
