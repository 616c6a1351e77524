//! Sprite world: animated sprites and their per-frame update.
//!
//! Responsibilities:
//! - hold every sprite's accumulated animation state
//! - advance that state from the frame's elapsed time and the shared phase
//! - rebuild model matrices (leaders first, then followers)
//! - expose draw items in declaration order

mod motion;
mod sprite;
mod world;

pub use motion::{orbit_step, pulse_factor, spin_axis, Motion, SpriteId};
pub use sprite::{AnimationState, Sprite, SpriteDesc, SpriteDraw};
pub use world::{Phase, SceneError, World, WorldBuilder};
