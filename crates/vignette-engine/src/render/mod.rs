//! GPU rendering subsystem.
//!
//! The renderer consumes the world's draw items and issues wgpu commands.
//! It owns its GPU resources (pipeline, buffers, textures).
//!
//! Convention:
//! - sprites are unit quads placed by their model matrix in world units
//! - the vertex shader applies the camera's view-projection, then the model
//! - draw order is the order of the draw items, never sorted

mod common;
mod ctx;
mod pass;
mod sprite;
mod texture;

pub use ctx::{RenderCtx, RenderTarget};
pub use pass::{encode_sprites, SpritePass};
pub use sprite::SpriteRenderer;
pub use texture::{ImageData, TextureError, TextureHandle};
