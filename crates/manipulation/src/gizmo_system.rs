//! Owns the three gizmo variants and routes input to the active one.

use scenewright_config::{GizmoKind, GizmoSettings};
use tracing::info;

use crate::command::CommandStack;
use crate::gizmo::{Gizmo, GizmoFrame, GizmoPose, RotateGizmo, ScaleGizmo, TranslateGizmo};
use crate::input::{InputSnapshot, Key};
use crate::render::{DrawList, DrawMatrices, GizmoPalette, RenderSurface};
use crate::scene::{ObjectId, Scene};
use crate::types::CameraMatrices;

#[derive(Debug)]
pub struct GizmoSystem {
    translate: TranslateGizmo,
    rotate: RotateGizmo,
    scale: ScaleGizmo,
    active: GizmoKind,
    target: Option<ObjectId>,
    pub palette: GizmoPalette,
    pub visible: bool,
}

impl Default for GizmoSystem {
    fn default() -> Self {
        Self::new(GizmoKind::default())
    }
}

impl GizmoSystem {
    pub fn new(active: GizmoKind) -> Self {
        Self {
            translate: TranslateGizmo::default(),
            rotate: RotateGizmo::default(),
            scale: ScaleGizmo::default(),
            active,
            target: None,
            palette: GizmoPalette::default(),
            visible: true,
        }
    }

    pub fn gizmo(&self, kind: GizmoKind) -> &dyn Gizmo {
        match kind {
            GizmoKind::Translate => &self.translate,
            GizmoKind::Rotate => &self.rotate,
            GizmoKind::Scale => &self.scale,
        }
    }

    fn gizmo_mut(&mut self, kind: GizmoKind) -> &mut dyn Gizmo {
        match kind {
            GizmoKind::Translate => &mut self.translate,
            GizmoKind::Rotate => &mut self.rotate,
            GizmoKind::Scale => &mut self.scale,
        }
    }

    pub fn active_kind(&self) -> GizmoKind {
        self.active
    }

    pub fn active_gizmo(&self) -> &dyn Gizmo {
        self.gizmo(self.active)
    }

    pub fn target(&self) -> Option<ObjectId> {
        self.target
    }

    pub fn is_dragging(&self) -> bool {
        self.active_gizmo().state().is_dragging()
    }

    /// True when a handle is under the cursor (or being dragged)
    pub fn is_hovering(&self) -> bool {
        self.target.is_some() && self.active_gizmo().state().hovered().is_some()
    }

    /// Abandon an in-progress drag, restoring the target's pre-drag value
    pub fn cancel_drag(&mut self, scene: &mut Scene) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let kind = self.active;
        self.gizmo_mut(kind).cancel(target, scene)
    }

    fn reset_all(&mut self) {
        for kind in [GizmoKind::Translate, GizmoKind::Rotate, GizmoKind::Scale] {
            self.gizmo_mut(kind).state_mut().reset();
        }
    }

    /// Point the gizmos at a new object (or none). A drag in progress on
    /// the previous target is cancelled.
    pub fn set_target(&mut self, target: Option<ObjectId>, scene: &mut Scene) {
        if self.target == target {
            return;
        }
        self.cancel_drag(scene);
        self.reset_all();
        self.target = target;
        match target {
            Some(id) => info!("Gizmo: target {id}"),
            None => info!("Gizmo: target cleared"),
        }
    }

    /// Switch variant, cancelling any drag of the current one
    pub fn set_active(&mut self, kind: GizmoKind, scene: &mut Scene) {
        if self.active == kind {
            return;
        }
        self.cancel_drag(scene);
        self.reset_all();
        self.active = kind;
        info!("Gizmo: {:?} mode", kind);
    }

    /// Per-frame input pass. Returns true when the gizmo used the pointer.
    ///
    /// `T`, `R` and `E` select translate, rotate and scale; `Escape`
    /// cancels a drag. Does nothing without a target.
    pub fn handle_input(
        &mut self,
        input: &InputSnapshot,
        frame: &GizmoFrame,
        scene: &mut Scene,
        commands: &mut CommandStack,
    ) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        if !scene.contains(target) {
            self.reset_all();
            self.target = None;
            info!("Gizmo: target {target} removed");
            return false;
        }

        if !input.pointer_captured {
            if input.key_pressed(Key::Escape) && self.cancel_drag(scene) {
                return true;
            }
            if !input.ctrl() && !self.is_dragging() {
                let requested = [
                    (Key::T, GizmoKind::Translate),
                    (Key::R, GizmoKind::Rotate),
                    (Key::E, GizmoKind::Scale),
                ]
                .into_iter()
                .find(|(key, _)| input.key_pressed(*key));
                if let Some((_, kind)) = requested {
                    self.set_active(kind, scene);
                }
            }
        }

        let kind = self.active;
        self.gizmo_mut(kind)
            .handle_input(input, frame, target, scene, commands)
    }

    /// Submit the active gizmo's geometry. Does nothing without a target.
    pub fn draw(
        &self,
        scene: &Scene,
        camera: &CameraMatrices,
        settings: &GizmoSettings,
        surface: &mut dyn RenderSurface,
    ) {
        if !self.visible {
            return;
        }
        let Some(target) = self.target else {
            return;
        };
        let (Some(transform), Some(pose)) =
            (scene.transform(target), GizmoPose::for_target(scene, target))
        else {
            return;
        };

        let mut list = DrawList::default();
        self.active_gizmo()
            .draw(transform, &pose, settings, &self.palette, &mut list);
        surface.submit(&list, &DrawMatrices::world_space(camera));
    }
}
