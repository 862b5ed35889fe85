//! Scenewright - 3D scene editor with translate, rotate and scale gizmos

use bevy::prelude::*;
use bevy::window::WindowResolution;
use manipulation::Editor;
use scenewright_config::EditorConfig;
use scenewright_scene::{EditorState, ScenePlugin};

mod demo;

fn main() {
    let config = EditorConfig::from_env();

    let window_config = Window {
        title: "Scenewright".into(),
        resolution: WindowResolution::new(config.display.width, config.display.height)
            .with_scale_factor_override(config.display.scale),
        present_mode: bevy::window::PresentMode::AutoVsync,
        ..default()
    };

    let editor = Editor::new(demo::build_scene(), &config);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(window_config),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "wgpu=error,naga=warn".to_string(),
                    ..default()
                }),
        )
        .insert_resource(config.display.clone())
        .insert_resource(config)
        .insert_resource(EditorState::new(editor))
        .add_plugins(ScenePlugin)
        .add_systems(Startup, log_controls)
        .run();
}

fn log_controls() {
    info!("Scenewright: T/R/E switch gizmo, Ctrl+Z/Ctrl+Y undo/redo");
    info!("Scenewright: Esc cancels a drag, Delete removes the selection");
}
