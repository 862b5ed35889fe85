//! Translate, rotate and scale gizmos.
//!
//! The three variants share one interaction state machine, implemented by
//! [`Gizmo::handle_input`]:
//!
//! ```text
//! Idle --ray hits a handle--> Hovering --primary press--> Dragging
//!   ^                            |                            |
//!   +-------ray misses-----------+<------primary release------+
//! ```
//!
//! Variants only supply their handle geometry ([`Gizmo::pick`],
//! [`Gizmo::draw`]) and how a mouse movement changes the edited field
//! ([`Gizmo::drag`]).

mod drag;
mod rotate;
mod scale;
mod state;
mod translate;

pub use rotate::RotateGizmo;
pub use scale::ScaleGizmo;
pub use state::AxisState;
pub use translate::TranslateGizmo;

use glam::{Vec2, Vec3};
use scenewright_config::{GizmoKind, GizmoSettings, SnapSettings};
use tracing::debug;

use crate::command::{CommandStack, TransformCommand};
use crate::input::{InputSnapshot, MouseButton};
use crate::picking::{screen_to_world_ray, Ray};
use crate::render::{DrawList, GizmoPalette};
use crate::scene::{ObjectId, Scene};
use crate::snap;
use crate::transform::{TransformKind, TransformTarget};
use crate::types::{Axis, CameraMatrices, Viewport};

/// Camera and settings for one frame of gizmo work
#[derive(Debug, Clone, Copy)]
pub struct GizmoFrame<'a> {
    pub camera: &'a CameraMatrices,
    pub viewport: &'a Viewport,
    pub settings: &'a GizmoSettings,
    pub snap: &'a SnapSettings,
}

/// Where the handles sit: the target's world position, with one world
/// direction per axis along which its local position moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoPose {
    pub origin: Vec3,
    pub axes: [Vec3; 3],
}

impl GizmoPose {
    pub fn for_target(scene: &Scene, target: ObjectId) -> Option<GizmoPose> {
        let origin = scene.world_position(target)?;
        let parent = scene
            .parent(target)
            .and_then(|parent| scene.world_matrix(parent))
            .unwrap_or(glam::Mat4::IDENTITY);
        let axes = Axis::ALL.map(|axis| {
            parent
                .transform_vector3(axis.unit())
                .try_normalize()
                .unwrap_or(axis.unit())
        });
        Some(GizmoPose { origin, axes })
    }

    pub fn axis(&self, axis: Axis) -> Vec3 {
        self.axes[axis.index()]
    }
}

/// Which field each gizmo variant edits
pub fn transform_kind(kind: GizmoKind) -> TransformKind {
    match kind {
        GizmoKind::Translate => TransformKind::Position,
        GizmoKind::Rotate => TransformKind::Rotation,
        GizmoKind::Scale => TransformKind::Scale,
    }
}

pub trait Gizmo: std::fmt::Debug + Send + Sync {
    fn kind(&self) -> GizmoKind;

    fn state(&self) -> &AxisState;

    fn state_mut(&mut self) -> &mut AxisState;

    /// Closest handle hit by `ray`, with its distance along the ray
    fn pick(&self, ray: &Ray, pose: &GizmoPose, settings: &GizmoSettings) -> Option<(Axis, f32)>;

    /// New unsnapped field value after the mouse moved from `previous` to
    /// `mouse` while dragging `axis`. `None` skips the frame.
    fn drag(
        &self,
        raw: Vec3,
        axis: Axis,
        pose: &GizmoPose,
        previous: Vec2,
        mouse: Vec2,
        frame: &GizmoFrame,
    ) -> Option<Vec3>;

    /// Emit handle geometry in world space
    fn draw(
        &self,
        transform: &TransformTarget,
        pose: &GizmoPose,
        settings: &GizmoSettings,
        palette: &GizmoPalette,
        list: &mut DrawList,
    );

    fn transform_kind(&self) -> TransformKind {
        transform_kind(self.kind())
    }

    /// Run one frame of the hover/drag state machine against `target`.
    ///
    /// Returns true while the gizmo owns the pointer (hovering a handle or
    /// dragging). On release a [`TransformCommand`] is recorded if the
    /// value changed.
    fn handle_input(
        &mut self,
        input: &InputSnapshot,
        frame: &GizmoFrame,
        target: ObjectId,
        scene: &mut Scene,
        commands: &mut CommandStack,
    ) -> bool {
        if input.pointer_captured {
            self.cancel(target, scene);
            return false;
        }
        let kind = self.transform_kind();
        let (Some(current), Some(pose)) = (
            scene.transform(target).map(|t| t.get(kind)),
            GizmoPose::for_target(scene, target),
        ) else {
            self.state_mut().reset();
            return false;
        };

        if let Some(axis) = self.state().active() {
            if !input.button_down(MouseButton::Primary) {
                finish_drag(self, target, current, commands);
                return true;
            }
            let previous = self.state().drag_start();
            let raw = self.state().raw_value();
            let mouse = input.mouse_position;
            let raw = self.drag(raw, axis, &pose, previous, mouse, frame).unwrap_or(raw);
            self.state_mut().advance_drag(mouse, raw);

            let original = self.state().original_value();
            let neighbors = snap_neighbors(scene, target, kind, frame.snap);
            let value = snap_value(kind, raw, original, frame.snap, &neighbors);
            if TransformTarget::is_valid(kind, value) {
                if let Some(transform) = scene.transform_mut(target) {
                    transform.set(kind, value);
                }
            }
            return true;
        }

        let hovered = screen_to_world_ray(input.mouse_position, frame.camera, frame.viewport)
            .and_then(|ray| self.pick(&ray, &pose, frame.settings))
            .map(|(axis, _)| axis);
        self.state_mut().set_hovered(hovered);

        if let Some(axis) = hovered {
            if input.button_pressed(MouseButton::Primary) {
                debug!("Gizmo: {:?} drag started on {:?} of {target}", self.kind(), axis);
                self.state_mut().begin_drag(axis, input.mouse_position, current);
            }
            return true;
        }
        false
    }

    /// Abandon an in-progress drag, restoring the pre-drag value. Returns
    /// true if a drag was cancelled.
    fn cancel(&mut self, target: ObjectId, scene: &mut Scene) -> bool {
        let kind = self.transform_kind();
        let original = self.state_mut().end_drag();
        self.state_mut().reset();
        let Some(original) = original else {
            return false;
        };
        if let Some(transform) = scene.transform_mut(target) {
            transform.set(kind, original);
        }
        debug!("Gizmo: {:?} drag on {target} cancelled", self.kind());
        true
    }
}

fn finish_drag<G: Gizmo + ?Sized>(
    gizmo: &mut G,
    target: ObjectId,
    current: Vec3,
    commands: &mut CommandStack,
) {
    let kind = gizmo.transform_kind();
    let Some(original) = gizmo.state_mut().end_drag() else {
        return;
    };
    match TransformCommand::new(target, kind, original, current) {
        Some(command) => {
            debug!("Gizmo: {:?} drag on {target} committed", gizmo.kind());
            commands.record(command);
        }
        None => debug!("Gizmo: {:?} drag on {target} made no change", gizmo.kind()),
    }
}

/// Apply the snap category matching `kind`
pub fn snap_value(
    kind: TransformKind,
    raw: Vec3,
    original: Vec3,
    settings: &SnapSettings,
    neighbors: &[Vec3],
) -> Vec3 {
    match kind {
        TransformKind::Position => snap::snap_position(raw, original, settings, neighbors),
        TransformKind::Rotation => snap::snap_rotation(raw, settings),
        TransformKind::Scale => snap::snap_scale(raw, settings),
    }
}

/// Positions of every other object in depth-first order, expressed in the
/// target's parent space so they compare directly with its local position.
/// Empty unless object snapping applies.
fn snap_neighbors(
    scene: &Scene,
    target: ObjectId,
    kind: TransformKind,
    settings: &SnapSettings,
) -> Vec<Vec3> {
    if kind != TransformKind::Position || !settings.position.enabled || !settings.snap_to_objects {
        return Vec::new();
    }
    let to_parent = scene
        .parent(target)
        .and_then(|parent| scene.world_matrix(parent))
        .map(|m| m.inverse())
        .unwrap_or(glam::Mat4::IDENTITY);
    scene
        .depth_first()
        .into_iter()
        .filter(|&id| id != target)
        .filter_map(|id| scene.world_position(id))
        .map(|p| to_parent.transform_point3(p))
        .collect()
}

/// Index of the closest hit among the three axes; ties keep the first
pub(crate) fn closest_axis(mut hit: impl FnMut(Axis) -> Option<f32>) -> Option<(Axis, f32)> {
    let mut closest: Option<(Axis, f32)> = None;
    for axis in Axis::ALL {
        if let Some(distance) = hit(axis) {
            if closest.is_none_or(|(_, best)| distance < best) {
                closest = Some((axis, distance));
            }
        }
    }
    closest
}

/// Closer of two optional distances
pub(crate) fn nearer(a: Option<f32>, b: Option<f32>) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use glam::{Mat4, Vec2, Vec3};

    use crate::input::{InputSnapshot, MouseButton};
    use crate::types::{CameraMatrices, Viewport};

    /// Camera at +Z looking at the origin, 800x600 viewport
    pub fn front_camera() -> (CameraMatrices, Viewport) {
        (
            CameraMatrices::new(
                Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y),
                Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 800.0 / 600.0, 0.1, 100.0),
            ),
            Viewport::new(800.0, 600.0),
        )
    }

    pub fn hover(previous: &InputSnapshot, at: Vec2) -> InputSnapshot {
        previous.advance(at, [], [], false)
    }

    pub fn press(previous: &InputSnapshot, at: Vec2) -> InputSnapshot {
        previous.advance(at, [MouseButton::Primary], [], false)
    }
}
