//! Ray construction and ray-primitive intersection tests.
//!
//! Everything here is stateless. Degenerate input (non-invertible camera,
//! zero-area viewport, zero-length axis) produces "no hit" rather than a
//! fault, so a bad frame never takes picking down.

use glam::{Vec2, Vec3, Vec4Swizzles};

use crate::constants::EPSILON;
use crate::types::{CameraMatrices, Viewport};

/// World-space pick ray. `direction` is unit length when built by
/// [`screen_to_world_ray`], so hit distances are in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Closest approach between a ray and a finite segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Distance along the ray to the closest point
    pub distance: f32,
    /// Parametric position along the segment, in [0, 1]
    pub segment_t: f32,
    /// Separation between the ray and the segment at closest approach
    pub gap: f32,
}

/// Map a screen position and a normalized depth back into world space.
fn unproject(
    screen: Vec2,
    depth: f32,
    camera: &CameraMatrices,
    viewport: &Viewport,
) -> Option<Vec3> {
    let inverse = camera.inverse_view_projection()?;
    let ndc_x = (screen.x - viewport.x) / viewport.width * 2.0 - 1.0;
    let ndc_y = -((screen.y - viewport.y) / viewport.height * 2.0 - 1.0);
    let ndc_z = (depth - viewport.min_depth) / (viewport.max_depth - viewport.min_depth);

    let clip = inverse * glam::Vec4::new(ndc_x, ndc_y, ndc_z, 1.0);
    if clip.w.abs() < EPSILON {
        return None;
    }
    let world = clip.xyz() / clip.w;
    world.is_finite().then_some(world)
}

/// Build a world-space pick ray through `screen_pos` (pixels, y down).
///
/// Unprojects the point at the near and far depth and returns the
/// normalized direction between them. Returns `None` when the camera is not
/// invertible or the viewport has no area.
pub fn screen_to_world_ray(
    screen_pos: Vec2,
    camera: &CameraMatrices,
    viewport: &Viewport,
) -> Option<Ray> {
    if viewport.is_degenerate() {
        return None;
    }
    let near = unproject(screen_pos, viewport.min_depth, camera, viewport)?;
    let far = unproject(screen_pos, viewport.max_depth, camera, viewport)?;
    let direction = (far - near).try_normalize()?;
    Some(Ray::new(near, direction))
}

/// Project a world-space point into screen pixels (y down).
///
/// Returns `None` for points at or behind the camera plane, where the
/// perspective divide would mirror them across the screen.
pub fn world_to_screen(world: Vec3, camera: &CameraMatrices, viewport: &Viewport) -> Option<Vec2> {
    let clip = camera.view_projection() * world.extend(1.0);
    if clip.w <= EPSILON {
        return None;
    }
    let ndc = clip.xyz() / clip.w;
    let screen = Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.width + viewport.x,
        (1.0 - ndc.y) * 0.5 * viewport.height + viewport.y,
    );
    screen.is_finite().then_some(screen)
}

/// Ray-sphere intersection test.
/// Returns the distance to the closest intersection in front of the origin.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.direction.dot(ray.direction);
    if a < EPSILON {
        return None;
    }
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * a);
    let t2 = (-b + sqrt_d) / (2.0 * a);

    if t1 > EPSILON {
        Some(t1)
    } else if t2 > EPSILON {
        Some(t2)
    } else {
        None
    }
}

/// Ray-box intersection (axis-aligned, slab method).
pub fn ray_aabb(ray: &Ray, min: Vec3, max: Vec3) -> Option<f32> {
    let inverse = |d: f32| {
        if d.abs() > EPSILON {
            1.0 / d
        } else {
            f32::INFINITY.copysign(d)
        }
    };
    let inv_dir = Vec3::new(
        inverse(ray.direction.x),
        inverse(ray.direction.y),
        inverse(ray.direction.z),
    );

    let t1 = (min - ray.origin) * inv_dir;
    let t2 = (max - ray.origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    if tmin > EPSILON {
        Some(tmin)
    } else if tmax > EPSILON {
        Some(tmax)
    } else {
        None
    }
}

/// Ray versus finite segment with a thickness tolerance.
///
/// Uses the skew-line closest-point solution without clamping: a hit
/// requires the closest point to lie within the segment (`segment_t` in
/// [0, 1]), in front of the ray origin, and closer than `thickness`.
/// Parallel rays never hit.
pub fn ray_segment(ray: &Ray, start: Vec3, end: Vec3, thickness: f32) -> Option<SegmentHit> {
    let d1 = ray.direction;
    let d2 = end - start;
    let r = ray.origin - start;

    let a = d1.dot(d1);
    let e = d2.dot(d2);
    if a < EPSILON || e < EPSILON {
        return None;
    }
    let b = d1.dot(d2);
    let c = d1.dot(r);
    let f = d2.dot(r);

    let denom = a * e - b * b;
    if denom < EPSILON * a * e {
        return None;
    }

    let t = (b * f - c * e) / denom;
    let s = (a * f - b * c) / denom;
    if t < 0.0 || !(0.0..=1.0).contains(&s) {
        return None;
    }

    let gap = (ray.at(t) - (start + d2 * s)).length();
    (gap < thickness).then(|| SegmentHit {
        distance: t * a.sqrt(),
        segment_t: s,
        gap,
    })
}

/// Ray-triangle intersection using the Möller–Trumbore algorithm.
/// Returns the distance along the ray, rejecting hits behind the origin
/// and rays nearly parallel to the triangle plane.
pub fn ray_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let det = edge1.dot(h);

    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - v0;
    let u = inv_det * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = inv_det * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

/// Ray against a circle of `radius` around `axis`, approximated by
/// `segments` straight pieces each picked with [`ray_segment`].
pub fn ray_ring(
    ray: &Ray,
    center: Vec3,
    axis: Vec3,
    radius: f32,
    thickness: f32,
    segments: u32,
) -> Option<f32> {
    let segments = segments.max(3);
    let mut closest: Option<f32> = None;
    let mut previous = ring_point(center, axis, radius, 0.0);
    for i in 1..=segments {
        let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
        let current = ring_point(center, axis, radius, angle);
        if let Some(hit) = ray_segment(ray, previous, current, thickness) {
            if closest.is_none_or(|best| hit.distance < best) {
                closest = Some(hit.distance);
            }
        }
        previous = current;
    }
    closest
}

/// Point on the circle of `radius` around `axis` at `angle` radians.
///
/// The angle is measured from the first basis vector of
/// [`perpendicular_basis`], counter-clockwise when viewed from the tip of
/// `axis`.
pub fn ring_point(center: Vec3, axis: Vec3, radius: f32, angle: f32) -> Vec3 {
    let (tangent, bitangent) = perpendicular_basis(axis);
    center + (tangent * angle.cos() + bitangent * angle.sin()) * radius
}

/// Two unit vectors perpendicular to `v` and to each other, forming a
/// right-handed basis `(tangent, bitangent, v)`.
///
/// A zero-length `v` falls back to the XY plane.
pub fn perpendicular_basis(v: Vec3) -> (Vec3, Vec3) {
    let Some(axis) = v.try_normalize() else {
        return (Vec3::X, Vec3::Y);
    };
    let arbitrary = if axis.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let bitangent = axis.cross(arbitrary).normalize_or(Vec3::Y);
    let tangent = bitangent.cross(axis).normalize_or(Vec3::X);
    (tangent, bitangent)
}
