use crate::scene::SpriteDraw;

use super::texture::TextureHandle;

/// Commands the sprite encoder issues, independent of the GPU backend.
///
/// Implementations must not assume any binding survives from one sprite to the next.
pub trait SpritePass {
    /// Selects which per-sprite model matrix the next draw reads.
    fn set_model_slot(&mut self, slot: u32);

    fn bind_texture(&mut self, texture: TextureHandle);

    /// Draws the 6 vertices of the shared unit quad.
    fn draw_quad(&mut self);
}

/// Encodes one textured quad per draw item, in the given order.
///
/// Returns the number of quads drawn.
pub fn encode_sprites<I>(draws: I, pass: &mut impl SpritePass) -> u32
where
    I: IntoIterator<Item = SpriteDraw>,
{
    let mut slot = 0u32;
    for draw in draws {
        pass.set_model_slot(slot);
        pass.bind_texture(draw.texture);
        pass.draw_quad();
        slot += 1;
    }
    slot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Motion, SpriteDesc, World};
    use glam::{Mat4, Vec3};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Slot(u32),
        Bind(TextureHandle),
        Draw,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl SpritePass for Recorder {
        fn set_model_slot(&mut self, slot: u32) {
            self.calls.push(Call::Slot(slot));
        }

        fn bind_texture(&mut self, texture: TextureHandle) {
            self.calls.push(Call::Bind(texture));
        }

        fn draw_quad(&mut self) {
            self.calls.push(Call::Draw);
        }
    }

    fn draw(texture: u32) -> SpriteDraw {
        SpriteDraw {
            model: Mat4::IDENTITY,
            texture: TextureHandle::new(texture),
        }
    }

    // ── encoding ──────────────────────────────────────────────────────────

    #[test]
    fn each_draw_binds_its_own_texture_first() {
        let mut rec = Recorder::default();
        let n = encode_sprites([draw(4), draw(2), draw(4)], &mut rec);

        assert_eq!(n, 3);
        assert_eq!(
            rec.calls,
            vec![
                Call::Slot(0),
                Call::Bind(TextureHandle::new(4)),
                Call::Draw,
                Call::Slot(1),
                Call::Bind(TextureHandle::new(2)),
                Call::Draw,
                Call::Slot(2),
                Call::Bind(TextureHandle::new(4)),
                Call::Draw,
            ]
        );
    }

    #[test]
    fn empty_input_draws_nothing() {
        let mut rec = Recorder::default();
        assert_eq!(encode_sprites(std::iter::empty::<SpriteDraw>(), &mut rec), 0);
        assert!(rec.calls.is_empty());
    }

    // ── end to end ────────────────────────────────────────────────────────

    #[test]
    fn one_draw_per_sprite_per_frame() {
        let mut b = World::builder();
        let lead = b.add(
            SpriteDesc::new("lead", TextureHandle::new(0))
                .with_motion(Motion::Orbit { radius: 2.0, period: 200.0 }),
        );
        b.add(SpriteDesc::new("spin", TextureHandle::new(1)).with_motion(Motion::Spin { speed: 2.0 }));
        b.add(
            SpriteDesc::new("follow", TextureHandle::new(2))
                .with_motion(Motion::Follow { leader: lead, offset: Vec3::X }),
        );
        b.add(
            SpriteDesc::new("pulse", TextureHandle::new(3))
                .with_motion(Motion::Pulse { amplitude: 0.1, period: 200.0 }),
        );
        let mut world = b.build().unwrap();

        for dt in [0.0, 0.016, 0.016, 0.016] {
            world.update(dt);

            let mut rec = Recorder::default();
            encode_sprites(world.draws(), &mut rec);

            let draws: Vec<usize> = rec
                .calls
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == Call::Draw)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(draws.len(), world.len());

            for (sprite, &at) in draws.iter().enumerate() {
                assert_eq!(rec.calls[at - 1], Call::Bind(TextureHandle::new(sprite as u32)));
                assert_eq!(rec.calls[at - 2], Call::Slot(sprite as u32));
            }
        }
    }
}
