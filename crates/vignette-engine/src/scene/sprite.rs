use glam::{Mat4, Vec3};

use crate::render::TextureHandle;

use super::motion::Motion;

/// Accumulated per-sprite animation state.
///
/// These are the only sprite fields that carry over from one frame to the next.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct AnimationState {
    pub cumulative_translation: Vec3,
    pub rotation_angle: f32,
}

/// Construction parameters for a sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDesc {
    pub name: String,
    pub texture: TextureHandle,
    pub base_position: Vec3,
    pub scale: Vec3,
    pub motion: Motion,
}

impl SpriteDesc {
    pub fn new(name: impl Into<String>, texture: TextureHandle) -> Self {
        Self {
            name: name.into(),
            texture,
            base_position: Vec3::ZERO,
            scale: Vec3::ONE,
            motion: Motion::Fixed,
        }
    }

    pub fn at(mut self, base_position: Vec3) -> Self {
        self.base_position = base_position;
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }
}

/// A textured unit quad with its animation state.
///
/// `placement` and `model` are derived: both are rebuilt from identity on every
/// update and never accumulate on their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub(crate) name: String,
    pub(crate) texture: TextureHandle,
    pub(crate) base_position: Vec3,
    pub(crate) scale: Vec3,
    pub(crate) motion: Motion,
    pub(crate) state: AnimationState,

    /// Model matrix before the constant (and pulse) scale.
    pub(crate) placement: Mat4,
    pub(crate) model: Mat4,
}

impl Sprite {
    pub(crate) fn from_desc(desc: SpriteDesc) -> Self {
        Self {
            name: desc.name,
            texture: desc.texture,
            base_position: desc.base_position,
            scale: desc.scale,
            motion: desc.motion,
            state: AnimationState::default(),
            placement: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    pub fn base_position(&self) -> Vec3 {
        self.base_position
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn placement(&self) -> Mat4 {
        self.placement
    }

    pub fn model(&self) -> Mat4 {
        self.model
    }

    pub fn draw(&self) -> SpriteDraw {
        SpriteDraw {
            model: self.model,
            texture: self.texture,
        }
    }
}

/// What the renderer needs for one sprite: its model matrix and its texture.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteDraw {
    pub model: Mat4,
    pub texture: TextureHandle,
}
