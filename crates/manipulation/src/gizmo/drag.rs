//! Screen-space drag projection

use glam::{Vec2, Vec3};

use crate::picking::world_to_screen;
use crate::types::{CameraMatrices, Viewport};

/// Unit screen direction of the world-space segment `origin -> origin + direction`.
/// `None` when the segment projects to (almost) a point, i.e. the axis
/// faces the camera, or either end is behind it.
pub(crate) fn screen_direction(
    origin: Vec3,
    direction: Vec3,
    camera: &CameraMatrices,
    viewport: &Viewport,
) -> Option<Vec2> {
    let start = world_to_screen(origin, camera, viewport)?;
    let end = world_to_screen(origin + direction, camera, viewport)?;
    (end - start).try_normalize()
}

/// Mouse movement from `previous` to `mouse` measured along the screen
/// projection of `direction`. Dragging along the drawn handle is positive
/// whichever way it points on screen.
pub(crate) fn projected_scalar(
    previous: Vec2,
    mouse: Vec2,
    origin: Vec3,
    direction: Vec3,
    camera: &CameraMatrices,
    viewport: &Viewport,
) -> Option<f32> {
    let axis = screen_direction(origin, direction, camera, viewport)?;
    Some((mouse - previous).dot(axis))
}
