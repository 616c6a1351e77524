//! GPU-side types shared by the sprite pipeline.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight (non-premultiplied) alpha: `src * a + dst * (1 - a)`.
pub(super) fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState::ALPHA_BLENDING
}

// ── uniforms ──────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub(super) fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ModelUniform {
    pub matrix: [[f32; 4]; 4],
}

impl ModelUniform {
    pub(super) fn new(model: Mat4) -> Self {
        Self {
            matrix: model.to_cols_array_2d(),
        }
    }
}

/// Minimum binding size of a uniform of type `T`.
pub(super) fn uniform_binding_size<T: Pod>() -> Option<NonZeroU64> {
    NonZeroU64::new(std::mem::size_of::<T>() as u64)
}

/// Distance between consecutive model slots in the dynamic uniform buffer.
pub(super) fn model_slot_stride(alignment: u32) -> u64 {
    let size = std::mem::size_of::<ModelUniform>() as u64;
    let alignment = u64::from(alignment.max(1));
    size.div_ceil(alignment) * alignment
}

/// Lays out one model matrix per slot, padding each to `stride` bytes.
pub(super) fn pack_model_slots(models: &[Mat4], stride: u64, out: &mut Vec<u8>) {
    let stride = stride as usize;
    out.clear();
    out.resize(models.len() * stride, 0);
    for (slot, model) in models.iter().enumerate() {
        let uniform = ModelUniform::new(*model);
        let bytes = bytemuck::bytes_of(&uniform);
        out[slot * stride..slot * stride + bytes.len()].copy_from_slice(bytes);
    }
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct SpriteVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

impl SpriteVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2  // uv
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const fn vertex(x: f32, y: f32, u: f32, v: f32) -> SpriteVertex {
    SpriteVertex { pos: [x, y], uv: [u, v] }
}

/// Unit quad centred on the origin, two triangles.
///
/// Texture v runs top to bottom, so the bottom edge samples v = 1.
pub(super) const QUAD_VERTICES: [SpriteVertex; 6] = [
    vertex(-0.5, -0.5, 0.0, 1.0),
    vertex(0.5, -0.5, 1.0, 1.0),
    vertex(0.5, 0.5, 1.0, 0.0),
    vertex(-0.5, -0.5, 0.0, 1.0),
    vertex(0.5, 0.5, 1.0, 0.0),
    vertex(-0.5, 0.5, 0.0, 0.0),
];

pub(super) const QUAD_VERTEX_COUNT: u32 = QUAD_VERTICES.len() as u32;

#[cfg(test)]
mod tests {
    use super::*;

    // ── quad ──────────────────────────────────────────────────────────────

    #[test]
    fn quad_spans_unit_square() {
        for v in QUAD_VERTICES {
            assert!(v.pos.iter().all(|c| c.abs() == 0.5));
        }
        assert_eq!(QUAD_VERTEX_COUNT, 6);
    }

    #[test]
    fn quad_uvs_are_flipped_vertically() {
        for v in QUAD_VERTICES {
            assert_eq!(v.uv[0], v.pos[0] + 0.5);
            assert_eq!(v.uv[1], 0.5 - v.pos[1]);
        }
    }

    // ── model slots ───────────────────────────────────────────────────────

    #[test]
    fn stride_respects_alignment() {
        assert_eq!(model_slot_stride(256), 256);
        assert_eq!(model_slot_stride(64), 64);
        assert_eq!(model_slot_stride(16), 64);
        assert_eq!(model_slot_stride(0), 64);
    }

    #[test]
    fn packed_slots_start_at_stride_boundaries() {
        let a = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let b = Mat4::from_scale(glam::Vec3::splat(4.0));
        let mut out = Vec::new();
        pack_model_slots(&[a, b], 256, &mut out);

        assert_eq!(out.len(), 512);
        let slot1: Vec<f32> = out[256..256 + 64]
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(slot1, b.to_cols_array());
        assert!(out[64..256].iter().all(|&x| x == 0));
    }
}
