//! Conversions between Bevy types and the manipulation core

use bevy::input::mouse::MouseButton as BevyMouseButton;
use bevy::prelude::*;
use manipulation::{Key, MouseButton};

pub fn to_core_mat4(m: Mat4) -> glam::Mat4 {
    glam::Mat4::from_cols_array(&m.to_cols_array())
}

pub fn to_core_vec2(v: Vec2) -> glam::Vec2 {
    glam::Vec2::from_array(v.to_array())
}

pub fn to_bevy_vec3(v: glam::Vec3) -> Vec3 {
    Vec3::from_array(v.to_array())
}

/// Decompose a core world matrix into a Bevy transform
pub fn to_bevy_transform(world: glam::Mat4) -> Transform {
    Transform::from_matrix(Mat4::from_cols_array(&world.to_cols_array()))
}

pub fn map_mouse_button(button: BevyMouseButton) -> Option<MouseButton> {
    match button {
        BevyMouseButton::Left => Some(MouseButton::Primary),
        BevyMouseButton::Right => Some(MouseButton::Secondary),
        BevyMouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

pub fn map_key(key: KeyCode) -> Option<Key> {
    Some(match key {
        KeyCode::KeyT => Key::T,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        KeyCode::Escape => Key::Escape,
        KeyCode::Delete => Key::Delete,
        KeyCode::ControlLeft => Key::ControlLeft,
        KeyCode::ControlRight => Key::ControlRight,
        KeyCode::ShiftLeft => Key::ShiftLeft,
        KeyCode::ShiftRight => Key::ShiftRight,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(KeyCode::KeyE), Some(Key::E));
        assert_eq!(map_key(KeyCode::ControlRight), Some(Key::ControlRight));
        assert_eq!(map_key(KeyCode::KeyQ), None);
        assert_eq!(map_mouse_button(BevyMouseButton::Left), Some(MouseButton::Primary));
        assert_eq!(map_mouse_button(BevyMouseButton::Back), None);
    }

    #[test]
    fn test_world_matrix_decomposes() {
        let world = glam::Mat4::from_scale_rotation_translation(
            glam::Vec3::new(2.0, 1.0, 1.0),
            glam::Quat::from_rotation_y(0.5),
            glam::Vec3::new(1.0, 2.0, 3.0),
        );
        let transform = to_bevy_transform(world);
        assert!((transform.translation - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
        assert!((transform.scale - Vec3::new(2.0, 1.0, 1.0)).length() < 1e-5);
        assert!(transform.rotation.angle_between(Quat::from_rotation_y(0.5)) < 1e-4);
    }
}
