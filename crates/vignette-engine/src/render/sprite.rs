use wgpu::util::DeviceExt;

use crate::coords::Camera;
use crate::scene::SpriteDraw;

use super::common::{
    model_slot_stride, pack_model_slots, straight_alpha_blend, uniform_binding_size,
    CameraUniform, ModelUniform, SpriteVertex, QUAD_VERTEX_COUNT, QUAD_VERTICES,
};
use super::pass::{encode_sprites, SpritePass};
use super::texture::{nearest_sampler, texture_format_for, GpuTexture, ImageData, TextureError};
use super::{RenderCtx, RenderTarget, TextureHandle};

/// Bind group layouts and the sampler; independent of the surface format.
struct Layouts {
    camera: wgpu::BindGroupLayout,
    texture: wgpu::BindGroupLayout,
    model: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl Layouts {
    fn new(device: &wgpu::Device) -> Self {
        let camera = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vignette camera bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: uniform_binding_size::<CameraUniform>(),
                },
                count: None,
            }],
        });

        let texture = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vignette texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let model = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vignette model bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: uniform_binding_size::<ModelUniform>(),
                },
                count: None,
            }],
        });

        Self {
            camera,
            texture,
            model,
            sampler: nearest_sampler(device),
        }
    }
}

/// Draws textured unit quads, one per [`SpriteDraw`], in the order given.
///
/// Owns every texture it hands out a [`TextureHandle`] for; they are released
/// when the renderer is dropped. GPU objects are created lazily and the
/// pipeline is rebuilt when the surface format changes.
#[derive(Default)]
pub struct SpriteRenderer {
    layouts: Option<Layouts>,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    quad_vbo: Option<wgpu::Buffer>,

    camera_ubo: Option<wgpu::Buffer>,
    camera_bind_group: Option<wgpu::BindGroup>,

    model_ubo: Option<wgpu::Buffer>,
    model_bind_group: Option<wgpu::BindGroup>,
    model_capacity: usize,
    model_stride: u64,
    model_bytes: Vec<u8>,
    model_scratch: Vec<glam::Mat4>,

    textures: Vec<GpuTexture>,
    warned_unknown_texture: bool,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Uploads `image` with nearest filtering and returns its handle.
    pub fn create_texture(
        &mut self,
        ctx: &RenderCtx<'_>,
        label: &str,
        image: &ImageData,
    ) -> Result<TextureHandle, TextureError> {
        image.check_limit(ctx.max_texture_dimension())?;

        let format = texture_format_for(ctx.surface_format);
        let layouts = self.ensure_layouts(ctx.device);
        let texture = GpuTexture::upload(
            ctx.device,
            ctx.queue,
            &layouts.texture,
            &layouts.sampler,
            format,
            label,
            image,
        );

        let handle = TextureHandle::new(self.textures.len() as u32);
        self.textures.push(texture);

        log::debug!(
            "texture {handle:?} '{label}': {}x{} {format:?}",
            image.width(),
            image.height()
        );
        Ok(handle)
    }

    /// Draws `draws` over the current contents of `target`.
    ///
    /// Returns the number of quads drawn.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &Camera,
        draws: &[SpriteDraw],
    ) -> u32 {
        if draws.is_empty() {
            return 0;
        }

        self.ensure_pipeline(ctx);
        self.ensure_quad(ctx);
        self.ensure_camera(ctx);
        self.ensure_model_capacity(ctx, draws.len());

        self.write_uniforms(ctx, camera, draws);

        // Immutable borrows from here on.
        let Some(pipeline) = self.pipeline.as_ref() else { return 0 };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return 0 };
        let Some(camera_bind_group) = self.camera_bind_group.as_ref() else { return 0 };
        let Some(model_bind_group) = self.model_bind_group.as_ref() else { return 0 };

        let mut rpass = target.begin_pass("vignette sprite pass", None);
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, camera_bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));

        let mut pass = WgpuSpritePass {
            rpass: &mut rpass,
            textures: &self.textures,
            model_bind_group,
            model_stride: self.model_stride,
            texture_bound: false,
            warned_unknown_texture: &mut self.warned_unknown_texture,
        };

        encode_sprites(draws.iter().copied(), &mut pass)
    }

    fn ensure_layouts(&mut self, device: &wgpu::Device) -> &Layouts {
        self.layouts.get_or_insert_with(|| Layouts::new(device))
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let surface_format = ctx.surface_format;
        let layouts = self.ensure_layouts(ctx.device);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vignette sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("vignette sprite pipeline layout"),
            bind_group_layouts: &[&layouts.camera, &layouts.texture, &layouts.model],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("vignette sprite pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[SpriteVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(straight_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Both windings are drawn: a sprite spinning about +Y shows its back face.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("sprite pipeline built for {surface_format:?}");

        self.pipeline_format = Some(surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_quad(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vignette quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }

    fn ensure_camera(&mut self, ctx: &RenderCtx<'_>) {
        if self.camera_ubo.is_some() && self.camera_bind_group.is_some() {
            return;
        }

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vignette camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layouts = self.ensure_layouts(ctx.device);
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vignette camera bind group"),
            layout: &layouts.camera,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(ubo);
        self.camera_bind_group = Some(bind_group);
    }

    fn ensure_model_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.model_capacity && self.model_bind_group.is_some() {
            return;
        }

        let stride = model_slot_stride(ctx.uniform_offset_alignment());
        let capacity = required.next_power_of_two().max(16);

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vignette model ubo"),
            size: capacity as u64 * stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layouts = self.ensure_layouts(ctx.device);
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vignette model bind group"),
            layout: &layouts.model,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: uniform_binding_size::<ModelUniform>(),
                }),
            }],
        });

        log::debug!("model buffer sized for {capacity} sprites (stride {stride})");

        self.model_ubo = Some(ubo);
        self.model_bind_group = Some(bind_group);
        self.model_capacity = capacity;
        self.model_stride = stride;
    }

    fn write_uniforms(&mut self, ctx: &RenderCtx<'_>, camera: &Camera, draws: &[SpriteDraw]) {
        if let Some(ubo) = self.camera_ubo.as_ref() {
            let u = CameraUniform::new(camera.view_projection());
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
        }

        let Some(ubo) = self.model_ubo.as_ref() else { return };

        self.model_scratch.clear();
        self.model_scratch.extend(draws.iter().map(|d| d.model));
        pack_model_slots(&self.model_scratch, self.model_stride, &mut self.model_bytes);
        ctx.queue.write_buffer(ubo, 0, &self.model_bytes);
    }
}

/// [`SpritePass`] over a live wgpu render pass.
struct WgpuSpritePass<'p, 'r> {
    rpass: &'p mut wgpu::RenderPass<'r>,
    textures: &'p [GpuTexture],
    model_bind_group: &'p wgpu::BindGroup,
    model_stride: u64,
    texture_bound: bool,
    warned_unknown_texture: &'p mut bool,
}

impl SpritePass for WgpuSpritePass<'_, '_> {
    fn set_model_slot(&mut self, slot: u32) {
        let offset = (u64::from(slot) * self.model_stride) as u32;
        self.rpass.set_bind_group(2, self.model_bind_group, &[offset]);
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        match lookup_texture(self.textures, texture, self.warned_unknown_texture) {
            Some(t) => {
                self.rpass.set_bind_group(1, &t.bind_group, &[]);
                self.texture_bound = true;
            }
            None => self.texture_bound = false,
        }
    }

    fn draw_quad(&mut self) {
        if self.texture_bound {
            self.rpass.draw(0..QUAD_VERTEX_COUNT, 0..1);
        }
    }
}

/// Resolves `handle` against this renderer's textures.
///
/// Handles from another renderer, or built by hand, resolve to `None`; the
/// first miss is logged.
fn lookup_texture<'t, T>(
    textures: &'t [T],
    handle: TextureHandle,
    warned: &mut bool,
) -> Option<&'t T> {
    let found = textures.get(handle.index());
    if found.is_none() && !*warned {
        log::warn!("sprite references unknown texture {handle:?}; not drawn");
        *warned = true;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── texture lookup ────────────────────────────────────────────────────

    #[test]
    fn known_handles_resolve() {
        let textures = ["kim", "shego"];
        let mut warned = false;
        assert_eq!(lookup_texture(&textures, TextureHandle::new(1), &mut warned), Some(&"shego"));
        assert!(!warned);
    }

    #[test]
    fn foreign_handle_is_skipped_and_warned_once() {
        let textures = ["kim"];
        let mut warned = false;
        assert_eq!(lookup_texture(&textures, TextureHandle::new(3), &mut warned), None);
        assert!(warned);

        // Later misses stay quiet; valid handles keep resolving.
        assert_eq!(lookup_texture(&textures, TextureHandle::new(7), &mut warned), None);
        assert_eq!(lookup_texture(&textures, TextureHandle::new(0), &mut warned), Some(&"kim"));
    }

    #[test]
    fn empty_renderer_resolves_nothing() {
        let textures: [u8; 0] = [];
        let mut warned = false;
        assert!(lookup_texture(&textures, TextureHandle::new(0), &mut warned).is_none());
    }
}
