//! World-space math shared by the animation update and the renderer.
//!
//! Canonical CPU space:
//! - world units, origin at the centre of the camera volume
//! - +X right, +Y up
//!
//! The camera's orthographic projection maps world units to clip space; sprites
//! carry a model matrix built by [`transform::compose`].

mod camera;
pub mod transform;

pub use camera::{Camera, CameraConfig};
pub use transform::{compose, placement, safe_axis};
