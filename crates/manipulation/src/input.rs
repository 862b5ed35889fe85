//! Per-frame input snapshot.
//!
//! The core never polls devices. Each frame the host builds a new snapshot
//! with [`InputSnapshot::advance`], which carries the previous frame's state
//! forward so press/release edges can be queried.

use std::collections::HashSet;

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    T,
    R,
    E,
    Y,
    Z,
    Escape,
    Delete,
    ControlLeft,
    ControlRight,
    ShiftLeft,
    ShiftRight,
}

/// Immutable view of the mouse and keyboard for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub mouse_position: Vec2,
    pub previous_mouse_position: Vec2,
    buttons: HashSet<MouseButton>,
    previous_buttons: HashSet<MouseButton>,
    keys: HashSet<Key>,
    previous_keys: HashSet<Key>,
    /// Set when an overlay widget owns the pointer this frame
    pub pointer_captured: bool,
}

impl InputSnapshot {
    /// Snapshot for the next frame: this frame's state becomes "previous"
    pub fn advance(
        &self,
        mouse_position: Vec2,
        buttons: impl IntoIterator<Item = MouseButton>,
        keys: impl IntoIterator<Item = Key>,
        pointer_captured: bool,
    ) -> InputSnapshot {
        InputSnapshot {
            mouse_position,
            previous_mouse_position: self.mouse_position,
            buttons: buttons.into_iter().collect(),
            previous_buttons: self.buttons.clone(),
            keys: keys.into_iter().collect(),
            previous_keys: self.keys.clone(),
            pointer_captured,
        }
    }

    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_position - self.previous_mouse_position
    }

    /// Went down this frame
    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button) && !self.previous_buttons.contains(&button)
    }

    /// Went up this frame
    pub fn button_released(&self, button: MouseButton) -> bool {
        !self.buttons.contains(&button) && self.previous_buttons.contains(&button)
    }

    /// Down this frame and the previous one
    pub fn button_held(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button) && self.previous_buttons.contains(&button)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key) && !self.previous_keys.contains(&key)
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn ctrl(&self) -> bool {
        self.key_down(Key::ControlLeft) || self.key_down(Key::ControlRight)
    }

    pub fn shift(&self) -> bool {
        self.key_down(Key::ShiftLeft) || self.key_down(Key::ShiftRight)
    }

    /// Ctrl or Shift extends the selection instead of replacing it
    pub fn multi_select(&self) -> bool {
        self.ctrl() || self.shift()
    }
}
