//! Draws manipulation geometry through Bevy's immediate-mode gizmos

use bevy::gizmos::gizmos::Gizmos;
use bevy::prelude::*;
use manipulation::{ColoredVertex, DrawList, DrawMatrices, RenderSurface};

use crate::bridge::to_bevy_vec3;

/// Line-only backend: triangles are drawn as their outlines
pub struct GizmosSurface<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
}

impl<'a, 'w, 's> GizmosSurface<'a, 'w, 's> {
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>) -> Self {
        Self { gizmos }
    }

    fn segment(&mut self, world: &glam::Mat4, a: &ColoredVertex, b: &ColoredVertex) {
        let start = to_bevy_vec3(world.transform_point3(a.position()));
        let end = to_bevy_vec3(world.transform_point3(b.position()));
        let [r, g, bl, alpha] = a.color;
        self.gizmos.line(start, end, Color::srgba(r, g, bl, alpha));
    }
}

impl RenderSurface for GizmosSurface<'_, '_, '_> {
    fn submit(&mut self, list: &DrawList, matrices: &DrawMatrices) {
        // Bevy applies its own camera; only the world matrix is used here
        let world = matrices.world;
        for pair in list.lines.chunks_exact(2) {
            self.segment(&world, &pair[0], &pair[1]);
        }
        for tri in list.triangles.chunks_exact(3) {
            self.segment(&world, &tri[0], &tri[1]);
            self.segment(&world, &tri[1], &tri[2]);
            self.segment(&world, &tri[2], &tri[0]);
        }
    }
}
