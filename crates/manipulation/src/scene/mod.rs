//! Scene object arena.
//!
//! Objects live in a slot vector indexed by [`ObjectId`]. Parent and child
//! links are ids, so reparenting or removing an object never leaves a
//! dangling reference; ids of removed objects are never reused.

mod components;

pub use components::{
    CameraComponent, ColliderComponent, ColliderShape, Component, ComponentKind,
    LightComponent, MeshComponent, MeshPrimitive, RigidbodyComponent,
};

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::constants::DEFAULT_BOUNDS_RADIUS;
use crate::transform::TransformTarget;

/// Stable handle to a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u32);

impl ObjectId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors from structural scene edits
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("no scene object with id {0}")]
    UnknownObject(ObjectId),

    #[error("cannot parent {child} under {parent}: it would create a cycle")]
    CyclicParent { child: ObjectId, parent: ObjectId },
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    id: ObjectId,
    pub name: String,
    pub transform: TransformTarget,
    pub visible: bool,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
    components: Vec<Component>,
}

impl SceneObject {
    fn new(id: ObjectId, name: String, parent: Option<ObjectId>) -> Self {
        Self {
            id,
            name,
            transform: TransformTarget::IDENTITY,
            visible: true,
            parent,
            children: Vec::new(),
            components: Vec::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|c| c.kind() == kind)
    }

    pub fn component_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.kind() == kind)
    }

    /// Local picking radius: collider first, then mesh, then the default
    pub fn bounds_radius(&self) -> f32 {
        [ComponentKind::Collider, ComponentKind::Mesh]
            .into_iter()
            .find_map(|kind| self.component(kind).and_then(Component::bounding_radius))
            .unwrap_or(DEFAULT_BOUNDS_RADIUS)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    slots: Vec<Option<SceneObject>>,
    roots: Vec<ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.slots.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    pub fn transform(&self, id: ObjectId) -> Option<&TransformTarget> {
        self.get(id).map(|object| &object.transform)
    }

    pub fn transform_mut(&mut self, id: ObjectId) -> Option<&mut TransformTarget> {
        self.get_mut(id).map(|object| &mut object.transform)
    }

    fn allocate(&mut self, name: impl Into<String>, parent: Option<ObjectId>) -> ObjectId {
        let id = ObjectId(self.slots.len() as u32);
        self.slots.push(Some(SceneObject::new(id, name.into(), parent)));
        id
    }

    /// Add a root object with an identity transform
    pub fn spawn(&mut self, name: impl Into<String>) -> ObjectId {
        let id = self.allocate(name, None);
        self.roots.push(id);
        debug!("Scene: spawned {id}");
        id
    }

    pub fn spawn_child(
        &mut self,
        parent: ObjectId,
        name: impl Into<String>,
    ) -> Result<ObjectId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownObject(parent));
        }
        let id = self.allocate(name, Some(parent));
        if let Some(parent_object) = self.get_mut(parent) {
            parent_object.children.push(id);
        }
        debug!("Scene: spawned {id} under {parent}");
        Ok(id)
    }

    /// Remove an object and its whole subtree. Returns the removed ids,
    /// parent first.
    pub fn remove(&mut self, id: ObjectId) -> Result<Vec<ObjectId>, SceneError> {
        if !self.contains(id) {
            return Err(SceneError::UnknownObject(id));
        }
        self.detach(id);

        let removed = self.subtree(id);
        for &gone in &removed {
            if let Some(slot) = self.slots.get_mut(gone.0 as usize) {
                *slot = None;
            }
        }
        debug!("Scene: removed {} object(s) rooted at {id}", removed.len());
        Ok(removed)
    }

    /// Move `child` under `parent`, or to the root list when `parent` is
    /// `None`. The local transform is kept as is.
    pub fn set_parent(
        &mut self,
        child: ObjectId,
        parent: Option<ObjectId>,
    ) -> Result<(), SceneError> {
        if !self.contains(child) {
            return Err(SceneError::UnknownObject(child));
        }
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(SceneError::UnknownObject(parent));
            }
            if self.ancestors_and_self(parent).any(|ancestor| ancestor == child) {
                return Err(SceneError::CyclicParent { child, parent });
            }
        }

        self.detach(child);
        match parent {
            Some(parent) => {
                if let Some(parent_object) = self.get_mut(parent) {
                    parent_object.children.push(child);
                }
            }
            None => self.roots.push(child),
        }
        if let Some(object) = self.get_mut(child) {
            object.parent = parent;
        }
        Ok(())
    }

    fn detach(&mut self, id: ObjectId) {
        match self.get(id).and_then(SceneObject::parent) {
            Some(parent) => {
                if let Some(parent_object) = self.get_mut(parent) {
                    parent_object.children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }
    }

    fn ancestors_and_self(&self, id: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        std::iter::successors(Some(id), |&current| self.get(current)?.parent)
    }

    /// Top-level objects in insertion order
    pub fn root_objects(&self) -> &[ObjectId] {
        &self.roots
    }

    /// Children of `id`; empty for unknown ids
    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.get(id).map(SceneObject::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.get(id)?.parent
    }

    /// `id` and all its descendants in pre-order
    pub fn subtree(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut out = Vec::new();
        self.visit(id, &mut out);
        out
    }

    /// Every object, roots in order, each followed by its descendants
    pub fn depth_first(&self) -> Vec<ObjectId> {
        let mut out = Vec::with_capacity(self.len());
        for &root in &self.roots {
            self.visit(root, &mut out);
        }
        out
    }

    fn visit(&self, id: ObjectId, out: &mut Vec<ObjectId>) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !self.contains(current) {
                continue;
            }
            out.push(current);
            stack.extend(self.children(current).iter().rev());
        }
    }

    /// Local-to-world matrix through the parent chain
    pub fn world_matrix(&self, id: ObjectId) -> Option<Mat4> {
        let mut matrix = self.get(id)?.transform.local_matrix();
        let mut parent = self.parent(id);
        while let Some(current) = parent {
            let object = self.get(current)?;
            matrix = object.transform.local_matrix() * matrix;
            parent = object.parent;
        }
        Some(matrix)
    }

    pub fn world_position(&self, id: ObjectId) -> Option<Vec3> {
        self.world_matrix(id).map(|m| m.w_axis.truncate())
    }

    /// Attach a component, replacing any existing one of the same kind.
    /// Returns the replaced component.
    pub fn add_component(
        &mut self,
        id: ObjectId,
        component: Component,
    ) -> Result<Option<Component>, SceneError> {
        let object = self.get_mut(id).ok_or(SceneError::UnknownObject(id))?;
        match object.component_mut(component.kind()) {
            Some(existing) => Ok(Some(std::mem::replace(existing, component))),
            None => {
                object.components.push(component);
                Ok(None)
            }
        }
    }

    pub fn remove_component(
        &mut self,
        id: ObjectId,
        kind: ComponentKind,
    ) -> Result<Option<Component>, SceneError> {
        let object = self.get_mut(id).ok_or(SceneError::UnknownObject(id))?;
        let index = object.components.iter().position(|c| c.kind() == kind);
        Ok(index.map(|i| object.components.remove(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family() -> (Scene, ObjectId, ObjectId, ObjectId) {
        let mut scene = Scene::new();
        let root = scene.spawn("root");
        let child = scene.spawn_child(root, "child").unwrap();
        let grandchild = scene.spawn_child(child, "grandchild").unwrap();
        (scene, root, child, grandchild)
    }

    #[test]
    fn test_depth_first_order() {
        let (mut scene, root, child, grandchild) = family();
        let sibling = scene.spawn_child(root, "sibling").unwrap();
        let other = scene.spawn("other");
        assert_eq!(
            scene.depth_first(),
            vec![root, child, grandchild, sibling, other]
        );
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let (mut scene, root, child, _) = family();
        scene.transform_mut(root).unwrap().position = Vec3::new(1.0, 0.0, 0.0);
        scene.transform_mut(root).unwrap().scale = Vec3::splat(2.0);
        scene.transform_mut(child).unwrap().position = Vec3::new(0.0, 1.0, 0.0);
        let world = scene.world_position(child).unwrap();
        assert!((world - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_remove_takes_subtree() {
        let (mut scene, root, child, grandchild) = family();
        let removed = scene.remove(child).unwrap();
        assert_eq!(removed, vec![child, grandchild]);
        assert!(!scene.contains(grandchild));
        assert!(scene.children(root).is_empty());
        assert_eq!(scene.remove(child), Err(SceneError::UnknownObject(child)));
    }

    #[test]
    fn test_ids_not_reused() {
        let mut scene = Scene::new();
        let first = scene.spawn("a");
        scene.remove(first).unwrap();
        let second = scene.spawn("b");
        assert_ne!(first, second);
        assert!(scene.get(first).is_none());
    }

    #[test]
    fn test_set_parent_rejects_cycle() {
        let (mut scene, root, _, grandchild) = family();
        assert_eq!(
            scene.set_parent(root, Some(grandchild)),
            Err(SceneError::CyclicParent {
                child: root,
                parent: grandchild
            })
        );
        assert!(matches!(
            scene.set_parent(root, Some(root)),
            Err(SceneError::CyclicParent { .. })
        ));
    }

    #[test]
    fn test_set_parent_to_root() {
        let (mut scene, root, child, grandchild) = family();
        scene.set_parent(grandchild, None).unwrap();
        assert_eq!(scene.root_objects(), &[root, grandchild]);
        assert!(scene.children(child).is_empty());
        assert_eq!(scene.parent(grandchild), None);
    }

    #[test]
    fn test_component_slot_per_kind() {
        let mut scene = Scene::new();
        let id = scene.spawn("box");
        assert_eq!(scene.get(id).unwrap().bounds_radius(), DEFAULT_BOUNDS_RADIUS);

        let sphere = Component::Collider(ColliderComponent {
            shape: ColliderShape::Sphere { radius: 0.5 },
        });
        assert_eq!(scene.add_component(id, sphere), Ok(None));
        assert_eq!(scene.get(id).unwrap().bounds_radius(), 0.5);

        let bigger = Component::Collider(ColliderComponent {
            shape: ColliderShape::Sphere { radius: 2.0 },
        });
        assert_eq!(scene.add_component(id, bigger), Ok(Some(sphere)));
        assert_eq!(scene.get(id).unwrap().components().len(), 1);
    }
}
