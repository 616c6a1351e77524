//! Vignette engine crate.
//!
//! Animated textured sprites under a fixed orthographic camera: the animation
//! clock, transform composition, the sprite world and its per-frame update,
//! and the wgpu/winit runtime that presents it.

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod render;
pub mod scene;
