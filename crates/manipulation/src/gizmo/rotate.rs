use glam::{Vec2, Vec3};
use scenewright_config::{GizmoKind, GizmoSettings, RotateMode};

use super::drag::projected_scalar;
use super::{closest_axis, AxisState, Gizmo, GizmoFrame, GizmoPose};
use crate::constants::{EPSILON, MIN_ANGLE_RADIUS_PX};
use crate::picking::{perpendicular_basis, ray_ring, ring_point, world_to_screen, Ray};
use crate::render::{DrawList, GizmoPalette};
use crate::transform::TransformTarget;
use crate::types::Axis;

/// Ring handles that rotate the target around each axis
#[derive(Debug, Default)]
pub struct RotateGizmo {
    state: AxisState,
}

impl RotateGizmo {
    /// Signed angle swept by the cursor around the projected gizmo center,
    /// as a rotation around `direction` (right-handed).
    fn swept_angle(
        pose: &GizmoPose,
        direction: Vec3,
        previous: Vec2,
        mouse: Vec2,
        frame: &GizmoFrame,
    ) -> Option<f32> {
        let center = world_to_screen(pose.origin, frame.camera, frame.viewport)?;
        let from = previous - center;
        let to = mouse - center;
        if from.length() < MIN_ANGLE_RADIUS_PX || to.length() < MIN_ANGLE_RADIUS_PX {
            return None;
        }

        // Ring seen edge-on: the sweep direction is ambiguous
        let facing = direction.dot(frame.camera.eye_position()? - pose.origin);
        if facing.abs() < EPSILON {
            return None;
        }

        // Screen y points down, so a positive screen sweep is clockwise as
        // seen by the viewer, which is a negative rotation around an axis
        // pointing at the viewer.
        let screen_angle = from.perp_dot(to).atan2(from.dot(to));
        Some(-screen_angle * facing.signum())
    }

    fn linear_angle(
        pose: &GizmoPose,
        direction: Vec3,
        previous: Vec2,
        mouse: Vec2,
        frame: &GizmoFrame,
    ) -> f32 {
        let scalar = projected_scalar(
            previous,
            mouse,
            pose.origin,
            direction,
            frame.camera,
            frame.viewport,
        )
        .unwrap_or((mouse - previous).x);
        scalar * frame.settings.rotate_sensitivity
    }
}

impl Gizmo for RotateGizmo {
    fn kind(&self) -> GizmoKind {
        GizmoKind::Rotate
    }

    fn state(&self) -> &AxisState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AxisState {
        &mut self.state
    }

    fn pick(&self, ray: &Ray, pose: &GizmoPose, settings: &GizmoSettings) -> Option<(Axis, f32)> {
        closest_axis(|axis| {
            ray_ring(
                ray,
                pose.origin,
                pose.axis(axis),
                settings.ring_radius,
                settings.pick_thickness,
                settings.ring_segments,
            )
        })
    }

    fn drag(
        &self,
        raw: Vec3,
        axis: Axis,
        pose: &GizmoPose,
        previous: Vec2,
        mouse: Vec2,
        frame: &GizmoFrame,
    ) -> Option<Vec3> {
        let direction = pose.axis(axis);
        let angle = match frame.settings.rotate_mode {
            RotateMode::AngleAroundAxis => {
                Self::swept_angle(pose, direction, previous, mouse, frame)
                    .unwrap_or_else(|| Self::linear_angle(pose, direction, previous, mouse, frame))
            }
            RotateMode::Linear => Self::linear_angle(pose, direction, previous, mouse, frame),
        };
        let mut value = raw;
        value[axis.index()] += angle;
        Some(value)
    }

    fn draw(
        &self,
        transform: &TransformTarget,
        pose: &GizmoPose,
        settings: &GizmoSettings,
        palette: &GizmoPalette,
        list: &mut DrawList,
    ) {
        let segments = settings.ring_segments.max(3);
        for axis in Axis::ALL {
            let color = palette.axis_color(axis, self.state.hovered(), self.state.active());
            let direction = pose.axis(axis);
            let ring: Vec<Vec3> = (0..segments)
                .map(|i| {
                    let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
                    ring_point(pose.origin, direction, settings.ring_radius, angle)
                })
                .collect();
            list.polyline(&ring, true, color);

            // Angle indicator: small octahedron at the current Euler angle
            let marker = ring_point(
                pose.origin,
                direction,
                settings.ring_radius,
                transform.get_axis(self.transform_kind(), axis),
            );
            let size = settings.marker_size * 0.5;
            let (tangent, bitangent) = perpendicular_basis(direction);
            let top = marker + direction * size;
            let bottom = marker - direction * size;
            let rim =
                [tangent, bitangent, -tangent, -bitangent].map(|offset| marker + offset * size);
            for i in 0..rim.len() {
                let next = rim[(i + 1) % rim.len()];
                list.triangle(top, rim[i], next, color);
                list.triangle(bottom, next, rim[i], color);
            }
        }
    }
}
