//! Per-frame orchestration of selection, gizmos and history.
//!
//! One [`Editor::update`] call per rendered frame:
//! 1. undo/redo shortcuts
//! 2. gizmo hover/drag, which records commands on release
//! 3. selection click resolution, skipped when the gizmo took the pointer;
//!    a new selection retargets the gizmos

use scenewright_config::{EditorConfig, GizmoSettings, SnapSettings};
use tracing::info;

use crate::command::CommandStack;
use crate::gizmo::GizmoFrame;
use crate::gizmo_system::GizmoSystem;
use crate::input::{InputSnapshot, Key};
use crate::render::{DrawMatrices, RenderSurface};
use crate::scene::{ObjectId, Scene, SceneError};
use crate::selection::SelectionManager;
use crate::snap::grid_lines;
use crate::types::{CameraMatrices, Viewport};

/// Cells drawn to each side of the origin by the snap grid
const GRID_HALF_COUNT: u32 = 20;

#[derive(Debug)]
pub struct Editor {
    pub scene: Scene,
    commands: CommandStack,
    selection: SelectionManager,
    gizmos: GizmoSystem,
    pub snap: SnapSettings,
    pub gizmo_settings: GizmoSettings,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Scene::new(), &EditorConfig::default())
    }
}

impl Editor {
    pub fn new(scene: Scene, config: &EditorConfig) -> Self {
        Self {
            scene,
            commands: CommandStack::new(config.history.max_depth),
            selection: SelectionManager::new(),
            gizmos: GizmoSystem::new(config.gizmo.default_kind),
            snap: config.snap.clone(),
            gizmo_settings: config.gizmo.clone(),
        }
    }

    pub fn commands(&self) -> &CommandStack {
        &self.commands
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn gizmos(&self) -> &GizmoSystem {
        &self.gizmos
    }

    pub fn gizmos_mut(&mut self) -> &mut GizmoSystem {
        &mut self.gizmos
    }

    fn retarget(&mut self) {
        let active = self.selection.active();
        self.gizmos.set_target(active, &mut self.scene);
    }

    /// Run one frame of editor input
    pub fn update(&mut self, input: &InputSnapshot, camera: &CameraMatrices, viewport: &Viewport) {
        if !input.pointer_captured && input.ctrl() {
            let redo = input.key_pressed(Key::Y) || (input.shift() && input.key_pressed(Key::Z));
            if redo {
                self.redo();
            } else if input.key_pressed(Key::Z) {
                self.undo();
            }
        }

        let frame = GizmoFrame {
            camera,
            viewport,
            settings: &self.gizmo_settings,
            snap: &self.snap,
        };
        let gizmo_hovering = self
            .gizmos
            .handle_input(input, &frame, &mut self.scene, &mut self.commands);

        if self
            .selection
            .update(input, camera, viewport, &self.scene, gizmo_hovering)
        {
            self.retarget();
        }
    }

    /// Undo the last command. A drag in progress is cancelled first.
    pub fn undo(&mut self) -> bool {
        self.gizmos.cancel_drag(&mut self.scene);
        self.commands.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> bool {
        self.gizmos.cancel_drag(&mut self.scene);
        self.commands.redo(&mut self.scene)
    }

    /// Programmatic selection, e.g. from a hierarchy panel
    pub fn select(&mut self, id: ObjectId, additive: bool) -> Result<(), SceneError> {
        if !self.scene.contains(id) {
            return Err(SceneError::UnknownObject(id));
        }
        if self.selection.select(id, additive) {
            self.retarget();
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.retarget();
        }
    }

    /// Delete an object and its subtree, dropping it from the selection.
    /// History entries that refer to it become no-ops.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<Vec<ObjectId>, SceneError> {
        if self.gizmos.target().is_some_and(|t| self.scene.subtree(id).contains(&t)) {
            self.gizmos.cancel_drag(&mut self.scene);
        }
        let removed = self.scene.remove(id)?;
        info!("Editor: removed {} object(s)", removed.len());
        let target_removed = self.gizmos.target().is_some_and(|t| removed.contains(&t));
        if self.selection.prune(&self.scene) || target_removed {
            self.retarget();
        }
        Ok(removed)
    }

    /// Submit the snap grid (when visible) and the active gizmo
    pub fn draw(&self, camera: &CameraMatrices, surface: &mut dyn RenderSurface) {
        let grid = grid_lines(&self.snap, GRID_HALF_COUNT, self.gizmos.palette.grid);
        if !grid.is_empty() {
            surface.submit(&grid, &DrawMatrices::world_space(camera));
        }
        self.gizmos
            .draw(&self.scene, camera, &self.gizmo_settings, surface);
    }
}
