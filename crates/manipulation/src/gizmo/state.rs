//! Hover/drag state shared by every gizmo variant

use glam::{Vec2, Vec3};

use crate::types::Axis;

/// Per-gizmo interaction state.
///
/// `active` is `Some` exactly while a drag is in progress, and then
/// `original_value` holds the field value captured at drag start.
/// `hovered` is frozen during a drag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisState {
    hovered: Option<Axis>,
    active: Option<Axis>,
    /// Mouse position at the last drag update
    drag_start: Vec2,
    original_value: Vec3,
    /// Unsnapped accumulated value; snapping is applied on top of this so
    /// small per-frame increments are not rounded away
    raw_value: Vec3,
}

impl AxisState {
    pub fn hovered(&self) -> Option<Axis> {
        self.hovered
    }

    pub fn active(&self) -> Option<Axis> {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn drag_start(&self) -> Vec2 {
        self.drag_start
    }

    pub fn original_value(&self) -> Vec3 {
        self.original_value
    }

    pub fn raw_value(&self) -> Vec3 {
        self.raw_value
    }

    pub(crate) fn set_hovered(&mut self, axis: Option<Axis>) {
        if !self.is_dragging() {
            self.hovered = axis;
        }
    }

    pub(crate) fn begin_drag(&mut self, axis: Axis, mouse: Vec2, value: Vec3) {
        self.active = Some(axis);
        self.hovered = Some(axis);
        self.drag_start = mouse;
        self.original_value = value;
        self.raw_value = value;
    }

    pub(crate) fn advance_drag(&mut self, mouse: Vec2, raw_value: Vec3) {
        self.drag_start = mouse;
        self.raw_value = raw_value;
    }

    /// End the drag, returning the value captured at its start
    pub(crate) fn end_drag(&mut self) -> Option<Vec3> {
        self.active.take().map(|_| self.original_value)
    }

    /// Back to Idle: no hover, no drag
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_frozen_while_dragging() {
        let mut state = AxisState::default();
        state.set_hovered(Some(Axis::X));
        state.begin_drag(Axis::X, Vec2::ZERO, Vec3::ZERO);
        state.set_hovered(Some(Axis::Y));
        assert_eq!(state.hovered(), Some(Axis::X));
        assert!(state.is_dragging());
    }

    #[test]
    fn test_end_drag_returns_original_once() {
        let mut state = AxisState::default();
        state.begin_drag(Axis::Z, Vec2::ZERO, Vec3::ONE);
        state.advance_drag(Vec2::new(3.0, 0.0), Vec3::splat(2.0));
        assert_eq!(state.end_drag(), Some(Vec3::ONE));
        assert_eq!(state.end_drag(), None);
        assert_eq!(state.active(), None);
    }
}
