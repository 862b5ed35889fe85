use std::collections::VecDeque;

use tracing::debug;

use super::Command;
use crate::scene::Scene;

/// Bounded undo/redo history.
///
/// Any new command clears the redo stack. When the undo stack exceeds
/// `max_depth`, the oldest entry is dropped and can no longer be undone.
#[derive(Debug)]
pub struct CommandStack {
    undo_stack: VecDeque<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
    max_depth: usize,
}

impl Default for CommandStack {
    fn default() -> Self {
        Self::new(scenewright_config::DEFAULT_HISTORY_DEPTH)
    }
}

impl CommandStack {
    /// History holding at most `max_depth` undoable commands (at least one)
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Apply `command` and push it onto the undo stack
    pub fn execute(&mut self, command: impl Command + 'static, scene: &mut Scene) {
        command.execute(scene);
        self.push(Box::new(command));
    }

    /// Push a command whose effect is already applied to the scene
    pub fn record(&mut self, command: impl Command + 'static) {
        self.push(Box::new(command));
    }

    fn push(&mut self, command: Box<dyn Command>) {
        debug!("History: {}", command.label());
        self.redo_stack.clear();
        self.undo_stack.push_back(command);
        while self.undo_stack.len() > self.max_depth {
            if let Some(evicted) = self.undo_stack.pop_front() {
                debug!("History: evicted {}", evicted.label());
            }
        }
    }

    /// Undo the most recent command.
    ///
    /// Returns true if an undo was performed, false if the history is empty
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        let Some(command) = self.undo_stack.pop_back() else {
            debug!("Undo: no entries available");
            return false;
        };
        debug!("Undo: {}", command.label());
        command.undo(scene);
        self.redo_stack.push(command);
        true
    }

    /// Re-apply the most recently undone command.
    ///
    /// Returns true if a redo was performed
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        let Some(command) = self.redo_stack.pop() else {
            debug!("Redo: no entries available");
            return false;
        };
        debug!("Redo: {}", command.label());
        command.execute(scene);
        self.undo_stack.push_back(command);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Label of the command `undo` would revert
    pub fn undo_label(&self) -> Option<String> {
        self.undo_stack.back().map(|c| c.label())
    }

    /// Label of the command `redo` would re-apply
    pub fn redo_label(&self) -> Option<String> {
        self.redo_stack.last().map(|c| c.label())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::command::TransformCommand;
    use crate::scene::ObjectId;
    use crate::transform::TransformKind;

    fn move_x(id: ObjectId, from: f32, to: f32) -> TransformCommand {
        TransformCommand::new(
            id,
            TransformKind::Position,
            Vec3::new(from, 0.0, 0.0),
            Vec3::new(to, 0.0, 0.0),
        )
        .unwrap()
    }

    fn x(scene: &Scene, id: ObjectId) -> f32 {
        scene.transform(id).unwrap().position.x
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut scene = Scene::new();
        let id = scene.spawn("cube");
        let mut stack = CommandStack::new(100);
        for i in 0..5 {
            stack.execute(move_x(id, i as f32, (i + 1) as f32), &mut scene);
        }
        assert_eq!(x(&scene, id), 5.0);

        for _ in 0..5 {
            assert!(stack.undo(&mut scene));
        }
        assert_eq!(x(&scene, id), 0.0);
        assert!(!stack.undo(&mut scene));

        for _ in 0..5 {
            assert!(stack.redo(&mut scene));
        }
        assert_eq!(x(&scene, id), 5.0);
        assert!(!stack.redo(&mut scene));
    }

    #[test]
    fn test_history_cap_evicts_oldest() {
        let mut scene = Scene::new();
        let id = scene.spawn("cube");
        let cap = 4;
        let extra = 3;
        let mut stack = CommandStack::new(cap);
        for i in 0..cap + extra {
            stack.execute(move_x(id, i as f32, (i + 1) as f32), &mut scene);
        }
        assert_eq!(stack.undo_len(), cap);

        while stack.undo(&mut scene) {}
        // The first `extra` moves can no longer be reverted
        assert_eq!(x(&scene, id), extra as f32);
    }

    #[test]
    fn test_new_command_clears_redo() {
        let mut scene = Scene::new();
        let id = scene.spawn("cube");
        let mut stack = CommandStack::default();
        stack.execute(move_x(id, 0.0, 1.0), &mut scene);
        stack.undo(&mut scene);
        assert!(stack.can_redo());

        stack.execute(move_x(id, 0.0, 2.0), &mut scene);
        assert_eq!(stack.redo_len(), 0);
        assert!(!stack.redo(&mut scene));
        assert_eq!(x(&scene, id), 2.0);
    }

    #[test]
    fn test_record_does_not_reapply() {
        let mut scene = Scene::new();
        let id = scene.spawn("cube");
        scene.transform_mut(id).unwrap().position.x = 7.0;
        let mut stack = CommandStack::default();
        // Claims 0 -> 1, but recording must leave the live value untouched
        stack.record(move_x(id, 0.0, 1.0));
        assert_eq!(x(&scene, id), 7.0);
        assert!(stack.undo(&mut scene));
        assert_eq!(x(&scene, id), 0.0);
    }

    #[test]
    fn test_labels_and_clear() {
        let mut scene = Scene::new();
        let id = scene.spawn("cube");
        let mut stack = CommandStack::default();
        assert_eq!(stack.undo_label(), None);
        stack.execute(move_x(id, 0.0, 1.0), &mut scene);
        assert!(stack.undo_label().is_some());
        stack.clear();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }
}
