use std::path::PathBuf;

use anyhow::{Context, Result};
use vignette_engine::coords::Camera;
use vignette_engine::core::{App, AppControl, FrameCtx, InitCtx};
use vignette_engine::render::{ImageData, SpriteRenderer, TextureHandle};
use vignette_engine::scene::{SpriteDraw, World};

use crate::cast::{self, CastTextures, ROSTER};

/// Runs the cast: loads their images at start-up, then animates and draws
/// them every frame.
pub struct StageApp {
    assets: PathBuf,
    camera: Camera,
    background: wgpu::Color,

    renderer: SpriteRenderer,
    world: Option<World>,
    draws: Vec<SpriteDraw>,
}

impl StageApp {
    pub fn new(assets: PathBuf, camera: Camera, background: wgpu::Color) -> Self {
        Self {
            assets,
            camera,
            background,
            renderer: SpriteRenderer::new(),
            world: None,
            draws: Vec::new(),
        }
    }
}

impl App for StageApp {
    fn on_init(&mut self, ctx: &mut InitCtx<'_, '_>) -> Result<()> {
        let rctx = ctx.render_ctx();
        let assets = &self.assets;
        let renderer = &mut self.renderer;

        let mut load = |(name, file): (&str, &str)| -> Result<TextureHandle> {
            let image = ImageData::decode(assets.join(file))
                .with_context(|| format!("failed to load the image for '{name}'"))?;
            renderer
                .create_texture(&rctx, name, &image)
                .with_context(|| format!("failed to upload the texture for '{name}'"))
        };

        let [kim, shego, ron, drakken] = ROSTER;
        let textures = CastTextures {
            kim: load(kim)?,
            shego: load(shego)?,
            ron: load(ron)?,
            drakken: load(drakken)?,
        };

        let world = cast::build_world(&textures).context("invalid cast")?;
        log::info!(
            "stage ready: {} sprites, {} textures",
            world.len(),
            self.renderer.texture_count()
        );

        self.world = Some(world);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(world) = self.world.as_mut() else {
            return AppControl::Exit;
        };

        world.update(ctx.time.dt);

        self.draws.clear();
        self.draws.extend(world.draws());

        let renderer = &mut self.renderer;
        let camera = &self.camera;
        let draws = &self.draws;

        ctx.render(self.background, |rctx, target| {
            renderer.render(rctx, target, camera, draws);
        })
    }
}
