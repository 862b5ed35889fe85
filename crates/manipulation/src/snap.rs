//! Snap engine: quantizes dragged values to grid, angle and scale steps.
//!
//! All functions are pure. A disabled category returns its input unchanged.

use glam::Vec3;
use scenewright_config::SnapSettings;

use crate::constants::EPSILON;
use crate::render::{Color, DrawList};

/// Round `value` to the nearest multiple of `step`. Non-positive steps are
/// the identity.
pub fn snap_to_interval(value: f32, step: f32) -> f32 {
    if step <= EPSILON {
        return value;
    }
    (value / step).round() * step
}

fn snap_vec(value: Vec3, step: f32) -> Vec3 {
    Vec3::new(
        snap_to_interval(value.x, step),
        snap_to_interval(value.y, step),
        snap_to_interval(value.z, step),
    )
}

/// Snap a dragged position.
///
/// With relative snap the offset from `original` is rounded instead of the
/// absolute value. Object snap then pulls the result onto the nearest
/// `neighbors` position closer than one step; on equal distance the first
/// neighbor wins. A value already resting on a neighbor is left there, so
/// snapping is idempotent. `neighbors` must not contain the dragged object
/// itself.
pub fn snap_position(
    value: Vec3,
    original: Vec3,
    settings: &SnapSettings,
    neighbors: &[Vec3],
) -> Vec3 {
    if !settings.position.enabled {
        return value;
    }
    let step = settings.position.step;
    if settings.snap_to_objects && neighbors.iter().any(|n| n.distance(value) <= EPSILON) {
        return value;
    }

    let mut snapped = if settings.relative_snap {
        original + snap_vec(value - original, step)
    } else if settings.snap_to_grid {
        snap_vec(value, step)
    } else {
        value
    };

    if settings.snap_to_objects {
        snapped = snap_to_nearest(snapped, neighbors, step);
    }
    snapped
}

/// Replace `value` with the closest candidate strictly within `radius`.
pub fn snap_to_nearest(value: Vec3, candidates: &[Vec3], radius: f32) -> Vec3 {
    let mut nearest = value;
    let mut best = radius;
    for &candidate in candidates {
        let distance = candidate.distance(value);
        if distance < best {
            best = distance;
            nearest = candidate;
        }
    }
    nearest
}

/// Snap Euler angles (radians) to the configured rotation step.
pub fn snap_rotation(value: Vec3, settings: &SnapSettings) -> Vec3 {
    if !settings.rotation.enabled {
        return value;
    }
    snap_vec(value, settings.rotation_step_radians())
}

/// Snap per-axis scale to the configured scale step.
pub fn snap_scale(value: Vec3, settings: &SnapSettings) -> Vec3 {
    if !settings.scale.enabled {
        return value;
    }
    snap_vec(value, settings.scale.step)
}

/// Line geometry for the snap grid on the XZ plane, `half_count` cells to
/// each side of the origin. Empty when the grid is hidden.
pub fn grid_lines(settings: &SnapSettings, half_count: u32, color: Color) -> DrawList {
    let mut list = DrawList::default();
    if !settings.grid_visible() || settings.position.step <= EPSILON {
        return list;
    }
    let step = settings.position.step;
    let extent = half_count as f32 * step;
    let half = half_count as i32;
    for i in -half..=half {
        let offset = i as f32 * step;
        list.line(
            Vec3::new(offset, 0.0, -extent),
            Vec3::new(offset, 0.0, extent),
            color,
        );
        list.line(
            Vec3::new(-extent, 0.0, offset),
            Vec3::new(extent, 0.0, offset),
            color,
        );
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenewright_config::SnapStep;

    fn position_settings(step: f32) -> SnapSettings {
        SnapSettings {
            position: SnapStep::new(true, step),
            ..Default::default()
        }
    }

    #[test]
    fn test_disabled_is_identity() {
        let settings = SnapSettings::default();
        let value = Vec3::new(0.37, -1.2, 4.9);
        assert_eq!(snap_position(value, Vec3::ZERO, &settings, &[]), value);
        assert_eq!(snap_rotation(value, &settings), value);
        assert_eq!(snap_scale(value, &settings), value);
    }

    #[test]
    fn test_grid_rounds_each_axis() {
        let settings = position_settings(0.5);
        let snapped = snap_position(Vec3::new(0.7, -1.3, 2.24), Vec3::ZERO, &settings, &[]);
        assert_eq!(snapped, Vec3::new(0.5, -1.5, 2.0));
    }

    #[test]
    fn test_relative_keeps_original_offset() {
        let mut settings = position_settings(1.0);
        settings.relative_snap = true;
        let original = Vec3::new(0.3, 0.0, 0.0);
        let snapped = snap_position(Vec3::new(2.1, 0.0, 0.0), original, &settings, &[]);
        assert!((snapped.x - 2.3).abs() < 1e-5);
    }

    #[test]
    fn test_object_snap_nearest_within_step() {
        let mut settings = position_settings(1.0);
        settings.snap_to_grid = false;
        settings.snap_to_objects = true;
        let neighbors = [Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.4, 0.0, 0.0)];
        let snapped = snap_position(Vec3::new(0.1, 0.0, 0.0), Vec3::ZERO, &settings, &neighbors);
        assert_eq!(snapped, Vec3::new(0.4, 0.0, 0.0));

        let far = snap_position(Vec3::new(1.6, 0.0, 0.0), Vec3::ZERO, &settings, &neighbors);
        assert_eq!(far, Vec3::new(1.6, 0.0, 0.0));
    }

    #[test]
    fn test_object_snap_tie_goes_to_first() {
        let neighbors = [Vec3::new(0.5, 0.0, 0.0), Vec3::new(-0.5, 0.0, 0.0)];
        assert_eq!(snap_to_nearest(Vec3::ZERO, &neighbors, 1.0), neighbors[0]);
    }

    #[test]
    fn test_object_snap_applies_after_grid() {
        let mut settings = position_settings(1.0);
        settings.snap_to_objects = true;
        let neighbors = [Vec3::new(2.6, 0.0, 0.0)];
        // Grid takes 2.2 to 2.0, which is within one step of the neighbor
        let snapped = snap_position(Vec3::new(2.2, 0.0, 0.0), Vec3::ZERO, &settings, &neighbors);
        assert_eq!(snapped, neighbors[0]);
    }

    #[test]
    fn test_snap_position_idempotent() {
        let values = [
            Vec3::new(0.26, -7.49, 13.51),
            Vec3::new(-0.5, 0.5, 1.5),
            Vec3::new(123.456, -0.001, 9.999),
        ];
        let originals = [Vec3::ZERO, Vec3::new(0.3, -0.7, 2.25)];
        for relative in [false, true] {
            for objects in [false, true] {
                let mut settings = position_settings(0.25);
                settings.relative_snap = relative;
                settings.snap_to_objects = objects;
                let neighbors = [Vec3::new(0.3, -7.4, 13.6), Vec3::new(0.4, -7.6, 13.4)];
                for value in values {
                    for original in originals {
                        let once = snap_position(value, original, &settings, &neighbors);
                        let twice = snap_position(once, original, &settings, &neighbors);
                        assert_eq!(once, twice, "relative={relative} objects={objects}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_value_on_neighbor_is_not_regridded() {
        let mut settings = position_settings(1.0);
        settings.snap_to_objects = true;
        let neighbors = [Vec3::new(0.6, 0.0, 0.0), Vec3::new(1.3, 0.0, 0.0)];
        // Grid takes 0.4 to 0.0, then the pull lands on 0.6
        let once = snap_position(Vec3::new(0.4, 0.0, 0.0), Vec3::ZERO, &settings, &neighbors);
        assert_eq!(once, neighbors[0]);
        // Re-gridding 0.6 would reach 1.0, closer to the second neighbor
        let twice = snap_position(once, Vec3::ZERO, &settings, &neighbors);
        assert_eq!(twice, neighbors[0]);
    }

    #[test]
    fn test_rotation_uses_degree_step() {
        let settings = SnapSettings {
            rotation: SnapStep::new(true, 15.0),
            ..Default::default()
        };
        let snapped = snap_rotation(Vec3::new(0.3, 0.0, -0.1), &settings);
        assert!((snapped.x - 15f32.to_radians()).abs() < 1e-6);
        assert_eq!(snapped.z, 0.0);
    }

    #[test]
    fn test_scale_step() {
        let settings = SnapSettings {
            scale: SnapStep::new(true, 0.5),
            ..Default::default()
        };
        assert_eq!(snap_scale(Vec3::new(1.2, 0.8, 2.3), &settings), Vec3::new(1.0, 1.0, 2.5));
    }

    #[test]
    fn test_grid_lines_only_when_visible() {
        let hidden = SnapSettings::default();
        assert!(grid_lines(&hidden, 5, Color::WHITE).is_empty());

        let visible = position_settings(1.0);
        let grid = grid_lines(&visible, 5, Color::WHITE);
        // 11 lines per direction, two vertices each
        assert_eq!(grid.lines.len(), 2 * 11 * 2);
    }
}
