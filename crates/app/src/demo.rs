//! Starter scene shown on launch

use glam::Vec3;
use manipulation::{
    CameraComponent, ColliderComponent, ColliderShape, Component, LightComponent, MeshComponent,
    MeshPrimitive, ObjectId, RigidbodyComponent, Scene, TransformTarget,
};

/// Ground, a box with a cylinder child, a capsule, a camera and a sun
pub fn build_scene() -> Scene {
    let mut scene = Scene::new();

    let ground = scene.spawn("Ground");
    let ground_transform = TransformTarget::from_position(Vec3::new(0.0, -0.05, 0.0));
    set_transform(&mut scene, ground, ground_transform);
    let ground_mesh = MeshComponent {
        primitive: MeshPrimitive::Box {
            size: Vec3::new(10.0, 0.1, 10.0),
        },
        color: [0.3, 0.3, 0.3, 1.0],
    };
    attach(&mut scene, ground, Component::Mesh(ground_mesh));
    let ground_body = RigidbodyComponent {
        is_static: true,
        ..Default::default()
    };
    attach(&mut scene, ground, Component::Rigidbody(ground_body));

    let cube = scene.spawn("Cube");
    let cube_transform = TransformTarget::from_position(Vec3::new(0.0, 0.5, 0.0));
    set_transform(&mut scene, cube, cube_transform);
    let cube_mesh = MeshComponent {
        color: [0.8, 0.2, 0.2, 1.0],
        ..Default::default()
    };
    attach(&mut scene, cube, Component::Mesh(cube_mesh));
    let cube_collider = ColliderComponent {
        shape: ColliderShape::Box { size: Vec3::ONE },
    };
    attach(&mut scene, cube, Component::Collider(cube_collider));

    // Child follows the cube when it is moved
    if let Ok(pillar) = scene.spawn_child(cube, "Pillar") {
        let pillar_transform = TransformTarget::from_position(Vec3::new(0.0, 1.0, 0.0))
            .with_scale(Vec3::new(0.5, 1.0, 0.5));
        set_transform(&mut scene, pillar, pillar_transform);
        let pillar_mesh = MeshComponent {
            primitive: MeshPrimitive::Cylinder {
                radius: 0.5,
                height: 1.0,
            },
            color: [0.2, 0.6, 0.8, 1.0],
        };
        attach(&mut scene, pillar, Component::Mesh(pillar_mesh));
    }

    let capsule = scene.spawn("Capsule");
    let capsule_transform = TransformTarget::from_position(Vec3::new(-2.5, 1.0, 0.0));
    set_transform(&mut scene, capsule, capsule_transform);
    let capsule_mesh = MeshComponent {
        primitive: MeshPrimitive::Capsule {
            radius: 0.4,
            height: 2.0,
        },
        color: [0.2, 0.8, 0.2, 1.0],
    };
    attach(&mut scene, capsule, Component::Mesh(capsule_mesh));
    attach(
        &mut scene,
        capsule,
        Component::Rigidbody(RigidbodyComponent::default()),
    );

    let camera = scene.spawn("Scene Camera");
    let camera_transform = TransformTarget::from_position(Vec3::new(3.0, 2.0, 6.0))
        .with_rotation(Vec3::new(-0.3, 0.45, 0.0));
    set_transform(&mut scene, camera, camera_transform);
    attach(&mut scene, camera, Component::Camera(CameraComponent::default()));

    let sun = scene.spawn("Sun");
    let sun_transform = TransformTarget::from_position(Vec3::new(0.0, 6.0, 0.0))
        .with_rotation(Vec3::new(-0.9, 0.5, 0.0));
    set_transform(&mut scene, sun, sun_transform);
    let sunlight = LightComponent {
        color: Vec3::new(1.0, 0.96, 0.9),
        ..Default::default()
    };
    attach(&mut scene, sun, Component::Light(sunlight));

    scene
}

fn set_transform(scene: &mut Scene, id: ObjectId, transform: TransformTarget) {
    if let Some(target) = scene.transform_mut(id) {
        *target = transform;
    }
}

fn attach(scene: &mut Scene, id: ObjectId, component: Component) {
    if let Err(e) = scene.add_component(id, component) {
        bevy::log::warn!("Demo: {}", e);
    }
}
