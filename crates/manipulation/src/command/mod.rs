//! Reversible scene mutations and the undo/redo history.

mod stack;

pub use stack::CommandStack;

use glam::Vec3;
use tracing::warn;

use crate::scene::{ObjectId, Scene};
use crate::transform::{TransformKind, TransformTarget};

/// One reversible scene mutation.
///
/// `execute` and `undo` must be exact inverses. A command whose target no
/// longer exists does nothing.
pub trait Command: std::fmt::Debug + Send + Sync {
    fn execute(&self, scene: &mut Scene);
    fn undo(&self, scene: &mut Scene);
    /// Short description for an Edit menu, e.g. "Move Cube"
    fn label(&self) -> String;
}

/// Replaces one transform field of one object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformCommand {
    target: ObjectId,
    kind: TransformKind,
    old_value: Vec3,
    new_value: Vec3,
}

impl TransformCommand {
    /// `None` when the values are equal: an unchanged field has nothing to
    /// undo.
    pub fn new(
        target: ObjectId,
        kind: TransformKind,
        old_value: Vec3,
        new_value: Vec3,
    ) -> Option<Self> {
        (old_value != new_value).then_some(Self {
            target,
            kind,
            old_value,
            new_value,
        })
    }

    pub fn target(&self) -> ObjectId {
        self.target
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    pub fn old_value(&self) -> Vec3 {
        self.old_value
    }

    pub fn new_value(&self) -> Vec3 {
        self.new_value
    }

    fn apply(&self, scene: &mut Scene, value: Vec3) {
        if !TransformTarget::is_valid(self.kind, value) {
            warn!("{}: refusing invalid {:?} value {value}", self.label(), self.kind);
            return;
        }
        match scene.transform_mut(self.target) {
            Some(transform) => transform.set(self.kind, value),
            None => warn!("{}: target {} no longer exists", self.label(), self.target),
        }
    }
}

impl Command for TransformCommand {
    fn execute(&self, scene: &mut Scene) {
        self.apply(scene, self.new_value);
    }

    fn undo(&self, scene: &mut Scene) {
        self.apply(scene, self.old_value);
    }

    fn label(&self) -> String {
        format!("{} {}", self.kind.label(), self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_values_make_no_command() {
        let mut scene = Scene::new();
        let id = scene.spawn("cube");
        assert!(TransformCommand::new(id, TransformKind::Position, Vec3::ONE, Vec3::ONE).is_none());
    }

    #[test]
    fn test_execute_then_undo() {
        let mut scene = Scene::new();
        let id = scene.spawn("cube");
        let command =
            TransformCommand::new(id, TransformKind::Scale, Vec3::ONE, Vec3::splat(2.0)).unwrap();

        command.execute(&mut scene);
        assert_eq!(scene.transform(id).unwrap().scale, Vec3::splat(2.0));
        command.undo(&mut scene);
        assert_eq!(scene.transform(id).unwrap().scale, Vec3::ONE);
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut scene = Scene::new();
        let id = scene.spawn("cube");
        let command =
            TransformCommand::new(id, TransformKind::Position, Vec3::ZERO, Vec3::X).unwrap();
        scene.remove(id).unwrap();
        command.execute(&mut scene);
        command.undo(&mut scene);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_label_names_operation() {
        let mut scene = Scene::new();
        let id = scene.spawn("cube");
        let command =
            TransformCommand::new(id, TransformKind::Rotation, Vec3::ZERO, Vec3::X).unwrap();
        assert!(command.label().starts_with("Rotate"));
    }
}
