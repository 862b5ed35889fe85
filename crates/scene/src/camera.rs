//! Blender-style camera controller
//!
//! Controls:
//! - Middle mouse drag: Orbit around target
//! - Shift + Middle mouse drag: Pan
//! - Scroll wheel: Dolly (zoom)
//! - Home: Reset to the default view
//!
//! All controls are suspended while the pointer is captured by UI.

use bevy::input::mouse::{MouseButton, MouseMotion, MouseWheel};
use bevy::prelude::*;
use manipulation::CameraMatrices;

use crate::bridge::to_core_mat4;
use crate::editor::PointerCapture;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Camera orbit controller state
#[derive(Component)]
pub struct OrbitCamera {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Distance from target
    pub distance: f32,
    /// Horizontal angle (yaw) in radians
    pub yaw: f32,
    /// Vertical angle (pitch) in radians
    pub pitch: f32,
    /// Orbit sensitivity (radians per pixel)
    pub orbit_sensitivity: f32,
    /// Pan sensitivity (units per pixel, scaled by distance)
    pub pan_sensitivity: f32,
    /// Zoom sensitivity (distance units per scroll line)
    pub zoom_sensitivity: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        // Default position: (6, 5, 8) looking at origin
        // distance = sqrt(6^2 + 5^2 + 8^2) = sqrt(125) ≈ 11.18
        // yaw = atan2(6, 8) ≈ 0.6435 radians
        // pitch = asin(5 / 11.18) ≈ 0.4636 radians
        Self {
            target: Vec3::ZERO,
            distance: 11.18,
            yaw: 0.6435,
            pitch: 0.4636,
            orbit_sensitivity: 0.005,
            pan_sensitivity: 0.002,
            zoom_sensitivity: 1.0,
            min_distance: 0.5,
            max_distance: 200.0,
        }
    }
}

impl OrbitCamera {
    /// Calculate camera position from orbit parameters
    pub fn calculate_position(&self) -> Vec3 {
        // Spherical to Cartesian conversion
        // Note: pitch is angle from horizontal, yaw is angle around Y axis
        let horizontal_distance = self.distance * self.pitch.cos();
        let y = self.distance * self.pitch.sin();
        let x = horizontal_distance * self.yaw.sin();
        let z = horizontal_distance * self.yaw.cos();

        self.target + Vec3::new(x, y, z)
    }

    /// Reset to default view
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// View and projection for the manipulation core.
///
/// Bevy's own perspective matrix is reverse-Z with an infinite far plane,
/// so the projection is rebuilt as a finite right-handed one with depth in
/// [0, 1] from the same parameters.
pub fn camera_matrices(transform: &GlobalTransform, projection: &Projection) -> CameraMatrices {
    let view = transform.to_matrix().inverse();
    let clip = match projection {
        Projection::Perspective(p) => {
            Mat4::perspective_rh(p.fov, p.aspect_ratio, p.near, p.far)
        }
        Projection::Orthographic(o) => Mat4::orthographic_rh(
            o.area.min.x,
            o.area.max.x,
            o.area.min.y,
            o.area.max.y,
            o.near,
            o.far,
        ),
        _ => {
            let p = PerspectiveProjection::default();
            Mat4::perspective_rh(p.fov, p.aspect_ratio, p.near, p.far)
        }
    };
    CameraMatrices::new(to_core_mat4(view), to_core_mat4(clip))
}

/// Plugin for Blender-style camera controls
pub struct CameraControllerPlugin;

impl Plugin for CameraControllerPlugin {
    fn build(&self, app: &mut App) {
        // Order systems to avoid MessageReader conflicts:
        // orbit and pan both read MouseMotion, so they must run sequentially
        app.add_systems(
            Update,
            (
                camera_orbit_system,
                camera_pan_system.after(camera_orbit_system),
                camera_zoom_system,
                camera_reset_system,
                update_camera_transform
                    .after(camera_orbit_system)
                    .after(camera_pan_system)
                    .after(camera_zoom_system)
                    .after(camera_reset_system),
            ),
        );
    }
}

/// Handle orbit (middle mouse drag without shift)
fn camera_orbit_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    key_input: Res<ButtonInput<KeyCode>>,
    mut motion_events: MessageReader<MouseMotion>,
    mut camera_query: Query<&mut OrbitCamera>,
    capture: Res<PointerCapture>,
) {
    if capture.captured || !mouse_button.pressed(MouseButton::Middle) {
        motion_events.clear();
        return;
    }

    let shift_held =
        key_input.pressed(KeyCode::ShiftLeft) || key_input.pressed(KeyCode::ShiftRight);
    if shift_held {
        motion_events.clear();
        return;
    }

    let mut delta = Vec2::ZERO;
    for event in motion_events.read() {
        delta += event.delta;
    }

    if delta == Vec2::ZERO {
        return;
    }

    for mut orbit in camera_query.iter_mut() {
        // Horizontal movement rotates around Y axis (yaw)
        orbit.yaw -= delta.x * orbit.orbit_sensitivity;

        // Vertical movement changes pitch (elevation)
        orbit.pitch -= delta.y * orbit.orbit_sensitivity;

        // Clamp pitch to prevent flipping (just below straight up/down)
        orbit.pitch = orbit.pitch.clamp(-1.5, 1.5);
    }
}

/// Handle pan (shift + middle mouse drag)
fn camera_pan_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    key_input: Res<ButtonInput<KeyCode>>,
    mut motion_events: MessageReader<MouseMotion>,
    mut camera_query: Query<(&mut OrbitCamera, &Transform)>,
    capture: Res<PointerCapture>,
) {
    if capture.captured || !mouse_button.pressed(MouseButton::Middle) {
        motion_events.clear();
        return;
    }

    let shift_held =
        key_input.pressed(KeyCode::ShiftLeft) || key_input.pressed(KeyCode::ShiftRight);
    if !shift_held {
        motion_events.clear();
        return;
    }

    let mut delta = Vec2::ZERO;
    for event in motion_events.read() {
        delta += event.delta;
    }

    if delta == Vec2::ZERO {
        return;
    }

    for (mut orbit, transform) in camera_query.iter_mut() {
        // Pan in camera's local XY plane
        let right = transform.rotation * Vec3::X;
        let up = transform.rotation * Vec3::Y;

        // Scale pan by distance so it feels consistent at different zoom levels
        let pan_scale = orbit.pan_sensitivity * orbit.distance;

        // Move target (negative to feel like dragging the scene)
        let pan_offset = (-right * delta.x + up * delta.y) * pan_scale;
        orbit.target += pan_offset;
    }
}

/// Handle zoom (scroll wheel)
fn camera_zoom_system(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut OrbitCamera>,
    capture: Res<PointerCapture>,
) {
    if capture.captured {
        scroll_events.clear();
        return;
    }

    let mut scroll_delta = 0.0;
    for event in scroll_events.read() {
        scroll_delta += event.y;
    }

    if scroll_delta == 0.0 {
        return;
    }

    for mut orbit in camera_query.iter_mut() {
        // Zoom by adjusting distance (scroll up = zoom in = decrease distance)
        // Scale zoom speed by current distance for consistent feel
        let zoom_amount = scroll_delta * orbit.zoom_sensitivity * (orbit.distance * 0.1);
        orbit.distance -= zoom_amount;
        orbit.distance = orbit.distance.clamp(orbit.min_distance, orbit.max_distance);
    }
}

/// Handle reset (Home key)
fn camera_reset_system(
    key_input: Res<ButtonInput<KeyCode>>,
    mut camera_query: Query<&mut OrbitCamera>,
    capture: Res<PointerCapture>,
) {
    if capture.captured || !key_input.just_pressed(KeyCode::Home) {
        return;
    }

    for mut orbit in camera_query.iter_mut() {
        orbit.reset();
    }
}

/// Update camera transform from orbit state
fn update_camera_transform(
    mut camera_query: Query<(&OrbitCamera, &mut Transform), With<MainCamera>>,
) {
    for (orbit, mut transform) in camera_query.iter_mut() {
        let position = orbit.calculate_position();
        *transform = Transform::from_translation(position).looking_at(orbit.target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_orbit_position() {
        let position = OrbitCamera::default().calculate_position();
        assert!((position - Vec3::new(6.0, 5.0, 8.0)).length() < 0.01);
    }

    #[test]
    fn test_camera_matrices_eye_matches_transform() {
        let transform = GlobalTransform::from(
            Transform::from_xyz(0.0, 2.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        );
        let camera = camera_matrices(&transform, &Projection::default());
        let eye = camera.eye_position().unwrap();
        assert!((eye - glam::Vec3::new(0.0, 2.0, 10.0)).length() < 1e-3);
    }

    #[test]
    fn test_camera_matrices_orthographic_inverts() {
        let transform = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 10.0));
        let mut ortho = OrthographicProjection::default_3d();
        ortho.area = Rect::new(-50.0, -50.0, 50.0, 50.0);
        ortho.far = 1000.0;
        let camera = camera_matrices(&transform, &Projection::Orthographic(ortho));
        assert!(camera.inverse_view_projection().is_some());
    }

    #[test]
    fn test_reset_restores_default_view() {
        let mut orbit = OrbitCamera::default();
        orbit.distance = 40.0;
        orbit.target = Vec3::new(3.0, 0.0, 3.0);
        orbit.reset();
        assert_eq!(orbit.distance, OrbitCamera::default().distance);
        assert_eq!(orbit.target, Vec3::ZERO);
    }
}
