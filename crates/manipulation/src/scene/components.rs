//! Closed set of components a scene object can carry.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Procedural mesh shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MeshPrimitive {
    Box { size: Vec3 },
    Cylinder { radius: f32, height: f32 },
    Capsule { radius: f32, height: f32 },
}

impl Default for MeshPrimitive {
    fn default() -> Self {
        MeshPrimitive::Box { size: Vec3::ONE }
    }
}

impl MeshPrimitive {
    /// Radius of a sphere around the local origin enclosing the shape
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            MeshPrimitive::Box { size } => size.length() * 0.5,
            MeshPrimitive::Cylinder { radius, height } => {
                (radius * radius + height * height * 0.25).sqrt()
            }
            MeshPrimitive::Capsule { radius, height } => (height * 0.5).max(radius),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshComponent {
    pub primitive: MeshPrimitive,
    pub color: [f32; 4],
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            primitive: MeshPrimitive::default(),
            color: [0.8, 0.8, 0.8, 1.0],
        }
    }
}

/// Scene camera (distinct from the editor viewport camera)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraComponent {
    /// Vertical field of view, radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            fov: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Directional light; shines along the owner's rotated -Z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightComponent {
    pub color: Vec3,
    pub intensity: f32,
    pub ambient: Vec3,
    pub cast_shadows: bool,
}

impl Default for LightComponent {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
            ambient: Vec3::splat(0.1),
            cast_shadows: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    Box { size: Vec3 },
    Sphere { radius: f32 },
}

impl ColliderShape {
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            ColliderShape::Box { size } => size.length() * 0.5,
            ColliderShape::Sphere { radius } => radius,
        }
    }
}

impl Default for ColliderShape {
    fn default() -> Self {
        ColliderShape::Box { size: Vec3::ONE }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColliderComponent {
    pub shape: ColliderShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidbodyComponent {
    pub mass: f32,
    pub is_static: bool,
    pub use_gravity: bool,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub is_trigger: bool,
}

impl Default for RigidbodyComponent {
    fn default() -> Self {
        Self {
            mass: 1.0,
            is_static: false,
            use_gravity: true,
            linear_damping: 0.01,
            angular_damping: 0.01,
            is_trigger: false,
        }
    }
}

/// Discriminant of [`Component`], one slot per object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Mesh,
    Camera,
    Light,
    Collider,
    Rigidbody,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Component {
    Mesh(MeshComponent),
    Camera(CameraComponent),
    Light(LightComponent),
    Collider(ColliderComponent),
    Rigidbody(RigidbodyComponent),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Mesh(_) => ComponentKind::Mesh,
            Component::Camera(_) => ComponentKind::Camera,
            Component::Light(_) => ComponentKind::Light,
            Component::Collider(_) => ComponentKind::Collider,
            Component::Rigidbody(_) => ComponentKind::Rigidbody,
        }
    }

    /// Local picking radius contributed by this component, if it has a shape
    pub fn bounding_radius(&self) -> Option<f32> {
        match self {
            Component::Mesh(mesh) => Some(mesh.primitive.bounding_radius()),
            Component::Collider(collider) => Some(collider.shape.bounding_radius()),
            Component::Camera(_) | Component::Light(_) | Component::Rigidbody(_) => None,
        }
    }
}
