//! Scenewright manipulation core
//!
//! This crate holds everything between "the user moved the mouse" and "a
//! scene object's transform changed, reversibly":
//! - [`picking`] - screen/world projection and ray intersection tests
//! - [`snap`] - grid, relative and object snapping
//! - [`scene`] - arena of scene objects addressed by [`ObjectId`]
//! - [`command`] - reversible commands and the bounded undo/redo stack
//! - [`gizmo`] - translate/rotate/scale handles and their drag state machine
//! - [`selection`] - click-to-select via bounding sphere ray casts
//! - [`editor`] - per-frame orchestration of all of the above
//!
//! The crate is designed to be driven from Bevy systems but does not depend
//! on Bevy itself. All per-frame input arrives as an explicit
//! [`InputSnapshot`]; there is no global state.

pub mod command;
pub mod constants;
pub mod editor;
pub mod gizmo;
pub mod gizmo_system;
pub mod input;
pub mod picking;
pub mod render;
pub mod scene;
pub mod selection;
pub mod snap;
pub mod transform;
pub mod types;

pub use command::{Command, CommandStack, TransformCommand};
pub use constants::*;
pub use editor::Editor;
pub use gizmo::{AxisState, Gizmo, GizmoFrame, GizmoPose, RotateGizmo, ScaleGizmo, TranslateGizmo};
pub use gizmo_system::GizmoSystem;
pub use input::{InputSnapshot, Key, MouseButton};
pub use picking::Ray;
pub use render::{Color, ColoredVertex, DrawList, DrawMatrices, GizmoPalette, RenderSurface};
pub use scene::{
    CameraComponent, ColliderComponent, ColliderShape, Component, ComponentKind,
    LightComponent, MeshComponent, MeshPrimitive, ObjectId, RigidbodyComponent, Scene,
    SceneError, SceneObject,
};
pub use selection::SelectionManager;
pub use transform::{TransformKind, TransformTarget};
pub use types::{Axis, CameraMatrices, Viewport};

pub use scenewright_config::{GizmoKind, GizmoSettings, RotateMode, SnapSettings, SnapStep};
