use glam::{Vec2, Vec3};
use scenewright_config::{GizmoKind, GizmoSettings};

use super::drag::projected_scalar;
use super::{closest_axis, nearer, AxisState, Gizmo, GizmoFrame, GizmoPose};
use crate::picking::{perpendicular_basis, ray_segment, ray_sphere, Ray};
use crate::render::{DrawList, GizmoPalette};
use crate::transform::TransformTarget;
use crate::types::Axis;

/// Arrow handles that move the target along each axis
#[derive(Debug, Default)]
pub struct TranslateGizmo {
    state: AxisState,
}

impl Gizmo for TranslateGizmo {
    fn kind(&self) -> GizmoKind {
        GizmoKind::Translate
    }

    fn state(&self) -> &AxisState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AxisState {
        &mut self.state
    }

    fn pick(&self, ray: &Ray, pose: &GizmoPose, settings: &GizmoSettings) -> Option<(Axis, f32)> {
        closest_axis(|axis| {
            let tip = pose.origin + pose.axis(axis) * settings.handle_length;
            let shaft = ray_segment(ray, pose.origin, tip, settings.pick_thickness)
                .map(|hit| hit.distance);
            let head = ray_sphere(ray, tip, settings.marker_size);
            nearer(shaft, head)
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
        let scalar = projected_scalar(
            previous,
            mouse,
            pose.origin,
            pose.axis(axis),
            frame.camera,
            frame.viewport,
        )?;
        Some(raw + axis.unit() * scalar * frame.settings.translate_sensitivity)
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
            let direction = pose.axis(axis);
            let tip = pose.origin + direction * settings.handle_length;
            let base = tip - direction * settings.marker_size * 2.0;
            list.line(pose.origin, base, color);

            // Four-sided arrow head
            let (tangent, bitangent) = perpendicular_basis(direction);
            let rim = [tangent, bitangent, -tangent, -bitangent]
                .map(|offset| base + offset * settings.marker_size);
            for i in 0..rim.len() {
                list.triangle(tip, rim[i], rim[(i + 1) % rim.len()], color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandStack;
    use crate::gizmo::test_support::*;
    use crate::input::InputSnapshot;
    use crate::picking::{screen_to_world_ray, world_to_screen};
    use crate::render::Color;
    use crate::scene::Scene;
    use scenewright_config::SnapSettings;

    #[test]
    fn test_pick_each_axis() {
        let (camera, viewport) = front_camera();
        let gizmo = TranslateGizmo::default();
        let settings = GizmoSettings::default();
        let pose = GizmoPose {
            origin: Vec3::ZERO,
            axes: [Vec3::X, Vec3::Y, Vec3::Z],
        };
        let handles = [(Vec3::new(0.6, 0.0, 0.0), Axis::X), (Vec3::new(0.0, 0.6, 0.0), Axis::Y)];
        for (point, axis) in handles {
            let screen = world_to_screen(point, &camera, &viewport).unwrap();
            let ray = screen_to_world_ray(screen, &camera, &viewport).unwrap();
            assert_eq!(gizmo.pick(&ray, &pose, &settings).map(|(a, _)| a), Some(axis));
        }
        let empty = screen_to_world_ray(Vec2::new(100.0, 100.0), &camera, &viewport).unwrap();
        assert!(gizmo.pick(&empty, &pose, &settings).is_none());
    }

    #[test]
    fn test_drag_along_x_with_grid_snap() {
        let (camera, viewport) = front_camera();
        let settings = GizmoSettings::default();
        let mut snap = SnapSettings::default();
        snap.position.enabled = true;
        snap.position.step = 0.5;
        let frame = GizmoFrame {
            camera: &camera,
            viewport: &viewport,
            settings: &settings,
            snap: &snap,
        };
        let mut scene = Scene::new();
        let id = scene.spawn("cube");
        let mut commands = CommandStack::default();
        let mut gizmo = TranslateGizmo::default();

        let handle = world_to_screen(Vec3::new(0.5, 0.0, 0.0), &camera, &viewport).unwrap();
        let mut input = hover(&InputSnapshot::default(), handle);
        gizmo.handle_input(&input, &frame, id, &mut scene, &mut commands);
        input = press(&input, handle);
        gizmo.handle_input(&input, &frame, id, &mut scene, &mut commands);

        // 10 px per frame at 0.01 units/px: raw 0.1, 0.2, ... snaps to 0 until 0.3
        for step in 1..=8 {
            input = press(&input, handle + Vec2::new(10.0 * step as f32, 0.0));
            gizmo.handle_input(&input, &frame, id, &mut scene, &mut commands);
        }
        let x = scene.transform(id).unwrap().position.x;
        assert!((x - 1.0).abs() < 1e-5, "raw 0.8 snaps to 1.0, got {x}");

        input = hover(&input, input.mouse_position);
        gizmo.handle_input(&input, &frame, id, &mut scene, &mut commands);
        assert_eq!(commands.undo_len(), 1);
        assert!(commands.undo(&mut scene));
        assert_eq!(scene.transform(id).unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn test_draw_highlights_hovered_axis() {
        let mut gizmo = TranslateGizmo::default();
        gizmo.state_mut().set_hovered(Some(Axis::Y));
        let pose = GizmoPose {
            origin: Vec3::ZERO,
            axes: [Vec3::X, Vec3::Y, Vec3::Z],
        };
        let palette = GizmoPalette::default();
        let mut list = DrawList::default();
        let settings = GizmoSettings::default();
        gizmo.draw(&TransformTarget::IDENTITY, &pose, &settings, &palette, &mut list);

        assert_eq!(list.lines.len(), 6);
        assert_eq!(list.triangles.len(), 3 * 4 * 3);
        let y_color = palette.axis_color(Axis::Y, Some(Axis::Y), None).to_array();
        assert_eq!(list.lines[2].color, y_color);
        assert_eq!(list.lines[0].color, Color::RED.to_array());
    }
}
