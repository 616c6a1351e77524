use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque handle to a texture owned by a [`SpriteRenderer`](super::SpriteRenderer).
///
/// Handles returned by `create_texture` are valid for that renderer only. A
/// handle built with [`TextureHandle::new`] that the renderer never issued
/// draws nothing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Errors while preparing or uploading image data.
#[derive(Debug)]
pub enum TextureError {
    EmptyImage,
    LengthMismatch { expected: usize, actual: usize },
    TooLarge { width: u32, height: u32, max: u32 },
    Decode { path: PathBuf, source: image::ImageError },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::EmptyImage => write!(f, "image has zero width or height"),
            TextureError::LengthMismatch { expected, actual } => write!(
                f,
                "RGBA pixel buffer holds {actual} bytes, expected {expected}"
            ),
            TextureError::TooLarge { width, height, max } => write!(
                f,
                "image is {width}x{height}, device limit is {max}x{max}"
            ),
            TextureError::Decode { path, source } => {
                write!(f, "failed to decode '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Decoded RGBA8 pixels, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageData {
    pub fn from_rgba(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyImage);
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TextureError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { pixels, width, height })
    }

    /// Decodes an image file and converts it to RGBA8.
    pub fn decode(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(rgba.into_raw(), width, height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn check_limit(&self, max: u32) -> Result<(), TextureError> {
        if self.width > max || self.height > max {
            return Err(TextureError::TooLarge {
                width: self.width,
                height: self.height,
                max,
            });
        }
        Ok(())
    }
}

/// Sampled texture format matching how the surface encodes colour.
///
/// On an sRGB surface texels are decoded to linear and re-encoded on write;
/// on a linear surface they pass through unchanged.
pub(crate) fn texture_format_for(surface_format: wgpu::TextureFormat) -> wgpu::TextureFormat {
    if surface_format.is_srgb() {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    }
}

/// One uploaded texture with its bind group (texture + sampler).
pub(crate) struct GpuTexture {
    pub(crate) bind_group: wgpu::BindGroup,
    _texture: wgpu::Texture,
}

impl GpuTexture {
    pub(crate) fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        format: wgpu::TextureFormat,
        label: &str,
        image: &ImageData,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.width * 4),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            bind_group,
            _texture: texture,
        }
    }
}

/// Nearest-neighbour sampling with clamped edges, shared by every sprite texture.
pub(crate) fn nearest_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("vignette sprite sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── raw pixels ────────────────────────────────────────────────────────

    #[test]
    fn from_rgba_accepts_exact_length() {
        let img = ImageData::from_rgba(vec![255; 2 * 3 * 4], 2, 3).unwrap();
        assert_eq!((img.width(), img.height()), (2, 3));
        assert_eq!(img.pixels().len(), 24);
    }

    #[test]
    fn from_rgba_rejects_wrong_length() {
        let err = ImageData::from_rgba(vec![0; 10], 2, 2).unwrap_err();
        assert!(matches!(err, TextureError::LengthMismatch { expected: 16, actual: 10 }));
        assert!(err.to_string().contains("expected 16"));
    }

    #[test]
    fn from_rgba_rejects_empty() {
        assert!(matches!(ImageData::from_rgba(Vec::new(), 0, 4), Err(TextureError::EmptyImage)));
    }

    #[test]
    fn limit_is_checked_per_axis() {
        let img = ImageData::from_rgba(vec![0; 8 * 4], 8, 1).unwrap();
        assert!(img.check_limit(8).is_ok());
        assert!(matches!(img.check_limit(4), Err(TextureError::TooLarge { max: 4, .. })));
    }

    // ── files ─────────────────────────────────────────────────────────────

    #[test]
    fn missing_file_is_a_decode_error() {
        let err = ImageData::decode("does/not/exist.png").unwrap_err();
        let TextureError::Decode { path, .. } = &err else { panic!("unexpected {err:?}") };
        assert_eq!(path, Path::new("does/not/exist.png"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn decodes_png_to_rgba() {
        let path = std::env::temp_dir().join(format!("vignette-texture-{}.png", std::process::id()));
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgba([10, 20, 30, 40]));
        img.save(&path).unwrap();

        let data = ImageData::decode(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!((data.width(), data.height()), (3, 2));
        // Pixel (2, 1) is the last one: index 1 * 3 + 2.
        let last = &data.pixels()[5 * 4..];
        assert_eq!(last, &[10, 20, 30, 40]);
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn texture_format_follows_surface_encoding() {
        assert_eq!(
            texture_format_for(wgpu::TextureFormat::Bgra8UnormSrgb),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
        assert_eq!(
            texture_format_for(wgpu::TextureFormat::Bgra8Unorm),
            wgpu::TextureFormat::Rgba8Unorm
        );
    }
}
