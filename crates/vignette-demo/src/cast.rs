//! The four characters on stage and how they move.

use glam::Vec3;
use vignette_engine::render::TextureHandle;
use vignette_engine::scene::{Motion, SceneError, SpriteDesc, World};

/// Sprite name and image file, in draw order.
pub const ROSTER: [(&str, &str); 4] = [
    ("kim", "kimPossible.png"),
    ("shego", "shego.png"),
    ("ron", "ronStoppable.png"),
    ("drakken", "drDrakken.png"),
];

/// Texture for each cast member.
#[derive(Debug, Copy, Clone)]
pub struct CastTextures {
    pub kim: TextureHandle,
    pub shego: TextureHandle,
    pub ron: TextureHandle,
    pub drakken: TextureHandle,
}

fn flat_scale(s: f32) -> Vec3 {
    Vec3::new(s, s, 1.0)
}

/// Kim orbits, Shego spins, Ron tags along beside Kim, Drakken pulses.
pub fn build_world(textures: &CastTextures) -> Result<World, SceneError> {
    let mut world = World::builder();

    let kim = world.add(
        SpriteDesc::new("kim", textures.kim)
            .scaled(flat_scale(3.56))
            .with_motion(Motion::Orbit { radius: 2.0, period: 200.0 }),
    );

    world.add(
        SpriteDesc::new("shego", textures.shego)
            .at(Vec3::new(-1.0, 0.0, 0.0))
            .scaled(flat_scale(2.58))
            .with_motion(Motion::Spin { speed: 2.0 }),
    );

    world.add(
        SpriteDesc::new("ron", textures.ron)
            .scaled(flat_scale(2.86))
            .with_motion(Motion::Follow { leader: kim, offset: Vec3::new(2.0, 0.0, 0.0) }),
    );

    world.add(
        SpriteDesc::new("drakken", textures.drakken)
            .at(Vec3::new(-3.5, 0.0, 0.0))
            .scaled(flat_scale(2.69))
            .with_motion(Motion::Pulse { amplitude: 0.1, period: 200.0 }),
    );

    world.build()
}
