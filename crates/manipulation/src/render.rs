//! Colored line/triangle geometry handed to the renderer.
//!
//! The core only decides *what* to draw and in which color; a
//! [`RenderSurface`] implementation owns GPU submission.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::{Axis, CameraMatrices};

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Color = Color::rgba(0.5, 0.5, 0.5, 0.6);
    pub const RED: Color = Color::rgb(0.9, 0.2, 0.2);
    pub const GREEN: Color = Color::rgb(0.2, 0.9, 0.2);
    pub const BLUE: Color = Color::rgb(0.2, 0.2, 0.9);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.2);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// One vertex of gizmo geometry, laid out for direct upload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ColoredVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl ColoredVertex {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Line list (pairs of vertices) and triangle list (triples of vertices)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub lines: Vec<ColoredVertex>,
    pub triangles: Vec<ColoredVertex>,
}

impl DrawList {
    pub fn line(&mut self, start: Vec3, end: Vec3, color: Color) {
        self.lines.push(ColoredVertex::new(start, color));
        self.lines.push(ColoredVertex::new(end, color));
    }

    /// Connected lines through `points`; closes the loop when `closed`
    pub fn polyline(&mut self, points: &[Vec3], closed: bool, color: Color) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color);
        }
        if closed && points.len() > 2 {
            if let (Some(&last), Some(&first)) = (points.last(), points.first()) {
                self.line(last, first, color);
            }
        }
    }

    pub fn triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: Color) {
        self.triangles.push(ColoredVertex::new(a, color));
        self.triangles.push(ColoredVertex::new(b, color));
        self.triangles.push(ColoredVertex::new(c, color));
    }

    /// The 12 edges of an axis-aligned box
    pub fn wire_box(&mut self, center: Vec3, half_size: Vec3, color: Color) {
        let corner = |x: f32, y: f32, z: f32| center + half_size * Vec3::new(x, y, z);
        let bottom = [
            corner(-1.0, -1.0, -1.0),
            corner(1.0, -1.0, -1.0),
            corner(1.0, -1.0, 1.0),
            corner(-1.0, -1.0, 1.0),
        ];
        let top = bottom.map(|p| p + Vec3::Y * half_size.y * 2.0);
        self.polyline(&bottom, true, color);
        self.polyline(&top, true, color);
        for (b, t) in bottom.iter().zip(top.iter()) {
            self.line(*b, *t, color);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.triangles.is_empty()
    }
}

/// World, view and projection matrices for one draw submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawMatrices {
    pub world: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl DrawMatrices {
    /// Geometry already in world space
    pub fn world_space(camera: &CameraMatrices) -> Self {
        Self {
            world: Mat4::IDENTITY,
            view: camera.view,
            projection: camera.projection,
        }
    }
}

/// Draw call contract implemented by the rendering backend
pub trait RenderSurface {
    fn submit(&mut self, list: &DrawList, matrices: &DrawMatrices);
}

/// Records submissions instead of drawing them
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub submissions: Vec<(DrawList, DrawMatrices)>,
}

impl RenderSurface for RecordingSurface {
    fn submit(&mut self, list: &DrawList, matrices: &DrawMatrices) {
        self.submissions.push((list.clone(), *matrices));
    }
}

/// Axis colors and the highlight substitutions for hover and drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GizmoPalette {
    pub axes: [Color; 3],
    pub hovered: Color,
    pub active: Color,
    pub grid: Color,
}

impl Default for GizmoPalette {
    fn default() -> Self {
        Self {
            axes: [Color::RED, Color::GREEN, Color::BLUE],
            hovered: Color::WHITE,
            active: Color::YELLOW,
            grid: Color::GRAY,
        }
    }
}

impl GizmoPalette {
    /// Color of `axis` given the gizmo's hovered and active axes.
    /// The active axis wins over the hovered one.
    pub fn axis_color(&self, axis: Axis, hovered: Option<Axis>, active: Option<Axis>) -> Color {
        if active == Some(axis) {
            self.active
        } else if hovered == Some(axis) && active.is_none() {
            self.axes[axis.index()].lerp(self.hovered, 0.5)
        } else {
            self.axes[axis.index()]
        }
    }
}
