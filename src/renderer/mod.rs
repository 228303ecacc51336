//! Rendering seam
//!
//! Builds backend-agnostic draw data from the simulation: instance transforms
//! and tints, point lights, and an optional hitbox overlay.

pub mod draw_list;
pub mod instance;

pub use draw_list::{projection_view, DrawCommand, DrawList, MeshId, PointLight, TextureId};
pub use instance::{colors, Instance};
