//! Click-to-select over the scene arena.
//!
//! Each object is picked by a bounding sphere around its origin, scaled by
//! the largest axis of its world matrix. Clicking empty space keeps the
//! current selection.

use tracing::debug;

use crate::input::{InputSnapshot, MouseButton};
use crate::picking::{ray_sphere, screen_to_world_ray, Ray};
use crate::scene::{ObjectId, Scene};
use crate::types::{CameraMatrices, Viewport};

/// Ordered, duplicate-free selection. The first entry is the active object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionManager {
    selected: Vec<ObjectId>,
    hovered: Option<ObjectId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[ObjectId] {
        &self.selected
    }

    /// Object the gizmos should edit
    pub fn active(&self) -> Option<ObjectId> {
        self.selected.first().copied()
    }

    /// Object under the cursor as of the last update
    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Select `id`. With `additive` its membership is toggled, otherwise it
    /// replaces the selection. Returns true if the selection changed.
    pub fn select(&mut self, id: ObjectId, additive: bool) -> bool {
        if additive {
            match self.selected.iter().position(|&s| s == id) {
                Some(index) => {
                    self.selected.remove(index);
                }
                None => self.selected.push(id),
            }
            debug!("Selection: toggled {id}, {} selected", self.selected.len());
            return true;
        }
        if self.selected == [id] {
            return false;
        }
        self.selected.clear();
        self.selected.push(id);
        debug!("Selection: {id}");
        true
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// Drop ids that no longer exist in `scene`
    pub fn prune(&mut self, scene: &Scene) -> bool {
        let before = self.selected.len();
        self.selected.retain(|&id| scene.contains(id));
        if self.hovered.is_some_and(|id| !scene.contains(id)) {
            self.hovered = None;
        }
        self.selected.len() != before
    }

    /// Nearest visible object hit by `ray`, walking the hierarchy
    /// depth-first. Equal distances keep the first object visited.
    pub fn pick(ray: &Ray, scene: &Scene) -> Option<(ObjectId, f32)> {
        let mut closest: Option<(ObjectId, f32)> = None;
        for id in scene.depth_first() {
            let Some(object) = scene.get(id) else {
                continue;
            };
            if !object.visible {
                continue;
            }
            let Some(world) = scene.world_matrix(id) else {
                continue;
            };
            let max_scale = world
                .x_axis
                .truncate()
                .length()
                .max(world.y_axis.truncate().length())
                .max(world.z_axis.truncate().length());
            let center = world.w_axis.truncate();
            let radius = object.bounds_radius() * max_scale;

            if let Some(distance) = ray_sphere(ray, center, radius) {
                if closest.is_none_or(|(_, best)| distance < best) {
                    closest = Some((id, distance));
                }
            }
        }
        closest
    }

    /// Per-frame pass: track the hovered object and resolve a primary
    /// click. `gizmo_hovering` suppresses the click when it lands on a
    /// gizmo handle. Returns true if the selection changed.
    pub fn update(
        &mut self,
        input: &InputSnapshot,
        camera: &CameraMatrices,
        viewport: &Viewport,
        scene: &Scene,
        gizmo_hovering: bool,
    ) -> bool {
        if input.pointer_captured {
            self.hovered = None;
            return false;
        }
        self.hovered = screen_to_world_ray(input.mouse_position, camera, viewport)
            .and_then(|ray| Self::pick(&ray, scene))
            .map(|(id, _)| id);

        if !input.button_pressed(MouseButton::Primary) || gizmo_hovering {
            return false;
        }
        match self.hovered {
            Some(id) => self.select(id, input.multi_select()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec2, Vec3};

    use super::*;
    use crate::input::Key;
    use crate::picking::world_to_screen;

    fn camera() -> (CameraMatrices, Viewport) {
        (
            CameraMatrices::new(
                Mat4::look_at_rh(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, Vec3::Y),
                Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 800.0 / 600.0, 0.1, 100.0),
            ),
            Viewport::new(800.0, 600.0),
        )
    }

    fn scene_with_two() -> (Scene, ObjectId, ObjectId) {
        let mut scene = Scene::new();
        let left = scene.spawn("left");
        scene.transform_mut(left).unwrap().position = Vec3::new(-3.0, 0.0, 0.0);
        let right = scene.spawn("right");
        scene.transform_mut(right).unwrap().position = Vec3::new(3.0, 0.0, 0.0);
        (scene, left, right)
    }

    fn click(at: Vec2, keys: &[Key]) -> InputSnapshot {
        InputSnapshot::default().advance(
            at,
            [MouseButton::Primary],
            keys.iter().copied(),
            false,
        )
    }

    fn screen_of(scene: &Scene, id: ObjectId) -> Vec2 {
        let (camera, viewport) = camera();
        world_to_screen(scene.world_position(id).unwrap(), &camera, &viewport).unwrap()
    }

    #[test]
    fn test_click_replaces_selection() {
        let (scene, left, right) = scene_with_two();
        let (camera, viewport) = camera();
        let mut selection = SelectionManager::new();

        let input = click(screen_of(&scene, left), &[]);
        assert!(selection.update(&input, &camera, &viewport, &scene, false));
        assert_eq!(selection.selected(), &[left]);
        let input = click(screen_of(&scene, right), &[]);
        assert!(selection.update(&input, &camera, &viewport, &scene, false));
        assert_eq!(selection.selected(), &[right]);
        assert_eq!(selection.active(), Some(right));
    }

    #[test]
    fn test_modifier_toggles_membership() {
        let (scene, left, right) = scene_with_two();
        let (camera, viewport) = camera();
        let mut selection = SelectionManager::new();

        let input = click(screen_of(&scene, left), &[]);
        selection.update(&input, &camera, &viewport, &scene, false);
        let input = click(screen_of(&scene, right), &[Key::ShiftLeft]);
        selection.update(&input, &camera, &viewport, &scene, false);
        assert_eq!(selection.selected(), &[left, right]);

        let input = click(screen_of(&scene, left), &[Key::ControlLeft]);
        selection.update(&input, &camera, &viewport, &scene, false);
        assert_eq!(selection.selected(), &[right]);
        assert_eq!(selection.active(), Some(right));
    }

    #[test]
    fn test_click_on_empty_space_keeps_selection() {
        let (scene, left, _) = scene_with_two();
        let (camera, viewport) = camera();
        let mut selection = SelectionManager::new();
        selection.select(left, false);

        let input = click(Vec2::new(400.0, 20.0), &[]);
        let changed = selection.update(&input, &camera, &viewport, &scene, false);
        assert!(!changed);
        assert_eq!(selection.selected(), &[left]);
    }

    #[test]
    fn test_gizmo_hover_and_capture_suppress_click() {
        let (scene, left, _) = scene_with_two();
        let (camera, viewport) = camera();
        let mut selection = SelectionManager::new();
        let at = screen_of(&scene, left);

        assert!(!selection.update(&click(at, &[]), &camera, &viewport, &scene, true));
        assert_eq!(selection.hovered(), Some(left));

        let captured = InputSnapshot::default().advance(at, [MouseButton::Primary], [], true);
        assert!(!selection.update(&captured, &camera, &viewport, &scene, false));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_pick_nearest_and_scaled_bounds() {
        let mut scene = Scene::new();
        let far = scene.spawn("far");
        let near = scene.spawn("near");
        scene.transform_mut(near).unwrap().position = Vec3::new(0.0, 0.0, 5.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 20.0), Vec3::NEG_Z);
        assert_eq!(SelectionManager::pick(&ray, &scene).map(|(id, _)| id), Some(near));

        // A ray 2.5 units off-axis only hits the far object once it is scaled up
        let off = Ray::new(Vec3::new(2.5, 0.0, 20.0), Vec3::NEG_Z);
        assert!(SelectionManager::pick(&off, &scene).is_none());
        scene.transform_mut(far).unwrap().scale = Vec3::new(1.0, 3.0, 1.0);
        assert_eq!(SelectionManager::pick(&off, &scene).map(|(id, _)| id), Some(far));
    }

    #[test]
    fn test_pick_walks_children() {
        let mut scene = Scene::new();
        let parent = scene.spawn("parent");
        scene.transform_mut(parent).unwrap().position = Vec3::new(10.0, 0.0, 0.0);
        let child = scene.spawn_child(parent, "child").unwrap();
        scene.transform_mut(child).unwrap().position = Vec3::new(0.0, 10.0, 0.0);
        let ray = Ray::new(Vec3::new(10.0, 10.0, 20.0), Vec3::NEG_Z);
        assert_eq!(SelectionManager::pick(&ray, &scene).map(|(id, _)| id), Some(child));
    }

    #[test]
    fn test_prune_removed() {
        let (mut scene, left, right) = scene_with_two();
        let mut selection = SelectionManager::new();
        selection.select(left, true);
        selection.select(right, true);
        scene.remove(left).unwrap();
        assert!(selection.prune(&scene));
        assert_eq!(selection.selected(), &[right]);
    }

    #[test]
    fn test_reselecting_single_is_unchanged() {
        let (_, left, _) = scene_with_two();
        let mut selection = SelectionManager::new();
        assert!(selection.select(left, false));
        assert!(!selection.select(left, false));
    }
}
