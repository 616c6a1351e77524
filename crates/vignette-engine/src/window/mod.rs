//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, and wires them to the GPU
//! layer, the animation clock and the application.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
