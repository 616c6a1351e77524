use std::fmt;

use glam::{Mat4, Vec3};

use crate::coords::placement;

use super::motion::{orbit_step, pulse_factor, spin_axis, Motion, SpriteId};
use super::sprite::{Sprite, SpriteDesc, SpriteDraw};

/// Shared phase counter ("theta") driving every periodic motion.
///
/// Advances by exactly one per animated frame, independent of the frame's duration.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Phase(u64);

impl Phase {
    #[inline]
    pub const fn new(start: u64) -> Self {
        Self(start)
    }

    #[inline]
    pub fn count(self) -> u64 {
        self.0
    }

    /// Phase as used by the trigonometric motions.
    #[inline]
    pub fn value(self) -> f32 {
        self.0 as f32
    }

    #[inline]
    fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Invalid sprite relationships or parameters detected while building a [`World`].
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    UnknownLeader { follower: String, leader: usize },
    SelfFollow { follower: String },
    ChainedFollow { follower: String, leader: String },
    InvalidMotion { sprite: String },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownLeader { follower, leader } => {
                write!(f, "sprite '{follower}' follows unknown sprite #{leader}")
            }
            SceneError::SelfFollow { follower } => {
                write!(f, "sprite '{follower}' cannot follow itself")
            }
            SceneError::ChainedFollow { follower, leader } => write!(
                f,
                "sprite '{follower}' follows '{leader}', which is itself a follower"
            ),
            SceneError::InvalidMotion { sprite } => {
                write!(f, "sprite '{sprite}' has non-finite or zero-period motion parameters")
            }
        }
    }
}

impl std::error::Error for SceneError {}

/// Collects sprites in declaration order and validates their relationships.
#[derive(Debug, Default)]
pub struct WorldBuilder {
    sprites: Vec<SpriteDesc>,
    phase: Phase,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting value of the shared phase.
    pub fn phase(mut self, start: u64) -> Self {
        self.phase = Phase::new(start);
        self
    }

    /// Declares a sprite. Declaration order is draw order.
    pub fn add(&mut self, desc: SpriteDesc) -> SpriteId {
        self.sprites.push(desc);
        SpriteId(self.sprites.len() - 1)
    }

    pub fn build(self) -> Result<World, SceneError> {
        for (index, desc) in self.sprites.iter().enumerate() {
            if !desc.motion.is_valid() {
                return Err(SceneError::InvalidMotion { sprite: desc.name.clone() });
            }

            let Some(leader) = desc.motion.leader() else { continue };

            if leader.0 == index {
                return Err(SceneError::SelfFollow { follower: desc.name.clone() });
            }
            let Some(leader_desc) = self.sprites.get(leader.0) else {
                return Err(SceneError::UnknownLeader {
                    follower: desc.name.clone(),
                    leader: leader.0,
                });
            };
            if leader_desc.motion.is_follower() {
                return Err(SceneError::ChainedFollow {
                    follower: desc.name.clone(),
                    leader: leader_desc.name.clone(),
                });
            }
        }

        let sprites: Vec<Sprite> = self.sprites.into_iter().map(Sprite::from_desc).collect();
        for (index, sprite) in sprites.iter().enumerate() {
            log::debug!(
                "sprite #{index} '{}': texture {:?}, motion {:?}",
                sprite.name,
                sprite.texture,
                sprite.motion
            );
        }

        Ok(World {
            sprites,
            phase: self.phase,
        })
    }
}

/// All sprite state of the running scene.
///
/// Owned by the frame loop's application; updated through `&mut` once per frame
/// and read through `&` by the renderer.
#[derive(Debug, Clone)]
pub struct World {
    sprites: Vec<Sprite>,
    phase: Phase,
}

impl World {
    pub fn builder() -> WorldBuilder {
        WorldBuilder::new()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<SpriteId> {
        self.sprites.iter().position(|s| s.name == name).map(SpriteId)
    }

    /// Sprites in declaration order.
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Draw items in declaration order.
    pub fn draws(&self) -> impl Iterator<Item = SpriteDraw> + '_ {
        self.sprites.iter().map(Sprite::draw)
    }

    /// Advances every sprite by `dt` seconds and rebuilds all model matrices.
    ///
    /// Independent sprites are updated first, followers second, so a follower
    /// always extends its leader's placement from this same frame. The shared
    /// phase is read once up front and advanced once at the end, only when
    /// time actually passed. Non-finite or negative `dt` counts as zero.
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let theta = self.phase.value();

        for sprite in self.sprites.iter_mut().filter(|s| !s.motion.is_follower()) {
            advance_independent(sprite, theta, dt);
        }

        for index in 0..self.sprites.len() {
            let Motion::Follow { leader, offset } = self.sprites[index].motion else { continue };
            let leader_placement = self.sprites[leader.0].placement;

            let sprite = &mut self.sprites[index];
            sprite.placement = leader_placement * Mat4::from_translation(offset);
            sprite.model = sprite.placement * Mat4::from_scale(sprite.scale);
        }

        if dt > 0.0 {
            self.phase.advance();
        }
    }
}

fn advance_independent(sprite: &mut Sprite, theta: f32, dt: f32) {
    let state = &mut sprite.state;

    let (offset, angle, axis) = match sprite.motion {
        Motion::Orbit { radius, period } => {
            state.cumulative_translation += orbit_step(theta, period, radius, dt);
            (state.cumulative_translation, 0.0, Vec3::Z)
        }
        Motion::Spin { speed } => {
            state.rotation_angle += speed * dt;
            (Vec3::ZERO, state.rotation_angle, spin_axis(state.rotation_angle))
        }
        Motion::Fixed | Motion::Pulse { .. } | Motion::Follow { .. } => (Vec3::ZERO, 0.0, Vec3::Z),
    };

    sprite.placement = placement(sprite.base_position, offset, angle, axis);
    sprite.model = sprite.placement * Mat4::from_scale(sprite.scale);

    // Heartbeat scale goes on last, after the constant scale.
    if let Motion::Pulse { amplitude, period } = sprite.motion {
        let f = pulse_factor(theta, amplitude, period);
        sprite.model *= Mat4::from_scale(Vec3::new(f, f, 1.0));
    }
}
