use glam::Mat4;
use serde::Deserialize;

/// Orthographic clip volume in world units.
///
/// `left`/`right` and `bottom`/`top` bound the visible world-space extent,
/// `near`/`far` the clip range along z.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    /// A 10 × 7.5 unit volume (4:3) centred on the origin.
    fn default() -> Self {
        Self {
            left: -5.0,
            right: 5.0,
            bottom: -3.75,
            top: 3.75,
            near: -1.0,
            far: 1.0,
        }
    }
}

impl CameraConfig {
    /// All bounds finite and every axis with a non-zero extent.
    #[inline]
    pub fn is_valid(&self) -> bool {
        let bounds = [self.left, self.right, self.bottom, self.top, self.near, self.far];
        bounds.iter().all(|v| v.is_finite())
            && self.left != self.right
            && self.bottom != self.top
            && self.near != self.far
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}

/// Fixed orthographic camera shared by every sprite draw.
///
/// Immutable after construction. The projection maps the configured volume to
/// wgpu clip space (depth `0..1`), the view is identity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    projection: Mat4,
    view: Mat4,
}

impl Camera {
    pub fn orthographic(config: &CameraConfig) -> Self {
        let projection = Mat4::orthographic_rh(
            config.left,
            config.right,
            config.bottom,
            config.top,
            config.near,
            config.far,
        );

        Self {
            projection,
            view: Mat4::IDENTITY,
        }
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::orthographic(&CameraConfig::default())
    }
}
