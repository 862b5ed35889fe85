use glam::{Vec2, Vec3};
use scenewright_config::{GizmoKind, GizmoSettings};

use super::drag::projected_scalar;
use super::{closest_axis, nearer, AxisState, Gizmo, GizmoFrame, GizmoPose};
use crate::constants::EPSILON;
use crate::picking::{ray_aabb, ray_segment, Ray};
use crate::render::{DrawList, GizmoPalette};
use crate::transform::TransformTarget;
use crate::types::Axis;

/// Box-tipped handles that scale the target along each axis
#[derive(Debug, Default)]
pub struct ScaleGizmo {
    state: AxisState,
}

impl Gizmo for ScaleGizmo {
    fn kind(&self) -> GizmoKind {
        GizmoKind::Scale
    }

    fn state(&self) -> &AxisState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AxisState {
        &mut self.state
    }

    fn pick(&self, ray: &Ray, pose: &GizmoPose, settings: &GizmoSettings) -> Option<(Axis, f32)> {
        let half = Vec3::splat(settings.marker_size);
        closest_axis(|axis| {
            let tip = pose.origin + pose.axis(axis) * settings.handle_length;
            let shaft = ray_segment(ray, pose.origin, tip, settings.pick_thickness)
                .map(|hit| hit.distance);
            let marker = ray_aabb(ray, tip - half, tip + half);
            nearer(shaft, marker)
        })
    }

    /// Multiplies the dragged component by `1 + scalar * sensitivity`.
    /// A frame whose factor would collapse or flip the axis is skipped.
    fn drag(
        &self,
        raw: Vec3,
        axis: Axis,
        pose: &GizmoPose,
        previous: Vec2,
        mouse: Vec2,
        frame: &GizmoFrame,
    ) -> Option<Vec3> {
        let scalar = projected_scalar(
            previous,
            mouse,
            pose.origin,
            pose.axis(axis),
            frame.camera,
            frame.viewport,
        )?;
        let factor = 1.0 + scalar * frame.settings.scale_sensitivity;
        if factor <= EPSILON {
            return None;
        }
        let mut value = raw;
        value[axis.index()] *= factor;
        Some(value)
    }

    fn draw(
        &self,
        _transform: &TransformTarget,
        pose: &GizmoPose,
        settings: &GizmoSettings,
        palette: &GizmoPalette,
        list: &mut DrawList,
    ) {
        for axis in Axis::ALL {
            let color = palette.axis_color(axis, self.state.hovered(), self.state.active());
            let tip = pose.origin + pose.axis(axis) * settings.handle_length;
            list.line(pose.origin, tip, color);
            list.wire_box(tip, Vec3::splat(settings.marker_size), color);
        }
    }
}
