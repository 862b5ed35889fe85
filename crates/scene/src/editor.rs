//! Bevy plugin driving the manipulation [`Editor`]
//!
//! Each frame the raw Bevy input is folded into an [`InputSnapshot`], the
//! editor runs one update, and the resulting object transforms are mirrored
//! onto their linked entities. Gizmo and grid geometry goes through
//! [`Gizmos`].

use bevy::input::mouse::MouseButton as BevyMouseButton;
use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use manipulation::{
    Component as SceneComponent, ComponentKind, Editor, InputSnapshot, Key, MeshPrimitive,
    ObjectId, Scene, Viewport,
};

use crate::bridge::{map_key, map_mouse_button, to_bevy_transform, to_core_vec2};
use crate::camera::{camera_matrices, MainCamera};
use crate::surface::GizmosSurface;

/// Set by overlay UI while it owns the pointer; the editor and camera
/// ignore pointer input (and abandon any drag) while it is set. The editor
/// treats an unfocused window the same way.
#[derive(Resource, Default)]
pub struct PointerCapture {
    pub captured: bool,
}

/// Editor core plus the input snapshot from the previous frame
#[derive(Resource, Default)]
pub struct EditorState {
    pub editor: Editor,
    input: InputSnapshot,
}

impl EditorState {
    pub fn new(editor: Editor) -> Self {
        Self {
            editor,
            input: InputSnapshot::default(),
        }
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }
}

/// Links a Bevy entity to the scene object it mirrors
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneObjectLink(pub ObjectId);

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerCapture>()
            .init_resource::<EditorState>()
            .add_systems(Startup, spawn_scene_entities)
            .add_systems(
                Update,
                (update_editor, sync_scene_entities, draw_editor).chain(),
            );
    }
}

/// Bevy mesh for a procedural primitive. Capsule height includes the caps.
pub fn primitive_mesh(primitive: &MeshPrimitive) -> Mesh {
    match *primitive {
        MeshPrimitive::Box { size } => Cuboid::new(size.x, size.y, size.z).into(),
        MeshPrimitive::Cylinder { radius, height } => Cylinder::new(radius, height).into(),
        MeshPrimitive::Capsule { radius, height } => {
            Capsule3d::new(radius, (height - 2.0 * radius).max(0.0)).into()
        }
    }
}

/// Spawn one entity per scene object, with a mesh or light when the object
/// carries one
fn spawn_scene_entities(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    state: Res<EditorState>,
) {
    let scene = &state.editor.scene;
    let mut spawned = 0;
    for id in scene.depth_first() {
        let (Some(object), Some(world)) = (scene.get(id), scene.world_matrix(id)) else {
            continue;
        };
        let mut entity = commands.spawn((
            to_bevy_transform(world),
            visibility_of(object.visible),
            Name::new(object.name.clone()),
            SceneObjectLink(id),
        ));

        if let Some(SceneComponent::Mesh(mesh)) = object.component(ComponentKind::Mesh) {
            let [r, g, b, a] = mesh.color;
            entity.insert((
                Mesh3d(meshes.add(primitive_mesh(&mesh.primitive))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgba(r, g, b, a),
                    perceptual_roughness: 0.6,
                    ..default()
                })),
            ));
        }
        if let Some(SceneComponent::Light(light)) = object.component(ComponentKind::Light) {
            entity.insert(DirectionalLight {
                color: Color::srgb(light.color.x, light.color.y, light.color.z),
                // Scene intensity 1.0 maps to overcast daylight
                illuminance: light.intensity * 10_000.0,
                shadows_enabled: light.cast_shadows,
                ..default()
            });
            commands.insert_resource(GlobalAmbientLight {
                brightness: light.ambient.max_element() * 800.0,
                ..default()
            });
        }
        spawned += 1;
    }
    info!("Editor: spawned {} scene entities", spawned);
}

fn visibility_of(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// Fold this frame's Bevy input into a snapshot and run one editor update
fn update_editor(
    mouse_button: Res<ButtonInput<BevyMouseButton>>,
    key_input: Res<ButtonInput<KeyCode>>,
    capture: Res<PointerCapture>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&GlobalTransform, &Projection), With<MainCamera>>,
    mut state: ResMut<EditorState>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok((camera_transform, projection)) = camera_query.single() else {
        return;
    };

    let state = &mut *state;
    // Keep the last known position while the cursor is outside the window
    let mouse = window
        .cursor_position()
        .map(to_core_vec2)
        .unwrap_or(state.input.mouse_position);
    // Button state is not released on focus loss, so an unfocused window
    // counts as captured and abandons any drag
    let input = state.input.advance(
        mouse,
        mouse_button.get_pressed().filter_map(|b| map_mouse_button(*b)),
        key_input.get_pressed().filter_map(|k| map_key(*k)),
        capture.captured || !window.focused,
    );

    let camera = camera_matrices(camera_transform, projection);
    let viewport = Viewport::new(window.width(), window.height());
    state.editor.update(&input, &camera, &viewport);

    if !input.pointer_captured && input.key_pressed(Key::Delete) {
        delete_selected(&mut state.editor);
    }
    state.input = input;
}

fn delete_selected(editor: &mut Editor) {
    let selected = editor.selection().selected().to_vec();
    for id in selected {
        // Already gone when an ancestor was removed earlier in the loop
        if !editor.scene.contains(id) {
            continue;
        }
        if let Err(e) = editor.remove_object(id) {
            warn!("Editor: failed to delete {}: {}", id, e);
        }
    }
}

/// Mirror world transforms and visibility onto linked entities, despawning
/// entities whose object was removed
fn sync_scene_entities(
    mut commands: Commands,
    state: Res<EditorState>,
    mut query: Query<(Entity, &SceneObjectLink, &mut Transform, &mut Visibility)>,
) {
    if !state.is_changed() {
        return;
    }
    let scene: &Scene = &state.editor.scene;
    for (entity, link, mut transform, mut visibility) in query.iter_mut() {
        let (Some(object), Some(world)) = (scene.get(link.0), scene.world_matrix(link.0)) else {
            commands.entity(entity).despawn();
            continue;
        };
        let mirrored = to_bevy_transform(world);
        if *transform != mirrored {
            *transform = mirrored;
        }
        let wanted = visibility_of(object.visible);
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

fn draw_editor(
    state: Res<EditorState>,
    camera_query: Query<(&GlobalTransform, &Projection), With<MainCamera>>,
    mut gizmos: Gizmos,
) {
    let Ok((camera_transform, projection)) = camera_query.single() else {
        return;
    };
    let camera = camera_matrices(camera_transform, projection);
    let mut surface = GizmosSurface::new(&mut gizmos);
    state.editor.draw(&camera, &mut surface);
}

#[cfg(test)]
mod tests {
    use super::*;
    use manipulation::MeshComponent;

    #[test]
    fn test_capsule_mesh_height_includes_caps() {
        let mesh = primitive_mesh(&MeshPrimitive::Capsule {
            radius: 0.5,
            height: 2.0,
        });
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .unwrap();
        let top = positions.iter().map(|p| p[1]).fold(f32::MIN, f32::max);
        assert!((top - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_delete_removes_selection_and_children() {
        let mut scene = Scene::new();
        let parent = scene.spawn("parent");
        let child = scene.spawn_child(parent, "child").unwrap();
        scene
            .add_component(parent, SceneComponent::Mesh(MeshComponent::default()))
            .unwrap();
        let mut editor = Editor::new(scene, &Default::default());
        editor.select(parent, false).unwrap();
        editor.select(child, true).unwrap();

        delete_selected(&mut editor);
        assert!(editor.scene.is_empty());
        assert!(editor.selection().is_empty());
        assert_eq!(editor.gizmos().target(), None);
    }
}
