//! Bevy front-end for the Scenewright editor
//!
//! Hosts the manipulation core inside a Bevy app: an orbit camera, input
//! bridging, entity mirroring of scene objects and gizmo drawing.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;

mod bridge;
mod camera;
mod editor;
mod surface;

pub use camera::{camera_matrices, CameraControllerPlugin, MainCamera, OrbitCamera};
pub use editor::{primitive_mesh, EditorPlugin, EditorState, PointerCapture, SceneObjectLink};
pub use surface::GizmosSurface;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EditorPlugin);
        app.add_plugins(CameraControllerPlugin);
        app.add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    let orbit_camera = OrbitCamera::default();
    let camera_position = orbit_camera.calculate_position();
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(camera_position).looking_at(orbit_camera.target, Vec3::Y),
        Tonemapping::Reinhard,
        MainCamera,
        orbit_camera,
    ));
}
