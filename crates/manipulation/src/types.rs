use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{DETERMINANT_EPSILON, EPSILON};

/// One of the three handle axes of a gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// World-space unit direction of this axis
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// View and projection matrices for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    pub view: Mat4,
    pub projection: Mat4,
}

impl CameraMatrices {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self { view, projection }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Inverse view-projection, or `None` for a degenerate camera
    pub fn inverse_view_projection(&self) -> Option<Mat4> {
        let view_projection = self.view_projection();
        let det = view_projection.determinant();
        if !det.is_finite() || det.abs() < DETERMINANT_EPSILON {
            return None;
        }
        Some(view_projection.inverse())
    }

    /// Camera position in world space, or `None` for a degenerate view
    pub fn eye_position(&self) -> Option<Vec3> {
        let det = self.view.determinant();
        if !det.is_finite() || det.abs() < DETERMINANT_EPSILON {
            return None;
        }
        Some(self.view.inverse().w_axis.truncate())
    }
}

/// Screen rectangle the scene is rendered into, in pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// True when the viewport has no area or depth range to map into
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || (self.max_depth - self.min_depth).abs() < EPSILON
    }
}
