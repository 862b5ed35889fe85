/// Tolerance shared by every geometric test in this crate.
pub const EPSILON: f32 = 1e-5;

/// View-projection determinants below this are treated as non-invertible.
///
/// The determinant is the product of the clip scale factors, so a valid wide
/// orthographic or deep perspective camera sits far below [`EPSILON`].
pub const DETERMINANT_EPSILON: f32 = 1e-12;

/// Picking radius for objects without a collider or mesh.
pub const DEFAULT_BOUNDS_RADIUS: f32 = 1.0;

/// Below this cursor distance (pixels) from the projected gizmo center the
/// swept angle is unstable and rotation falls back to the linear mapping.
pub const MIN_ANGLE_RADIUS_PX: f32 = 4.0;
