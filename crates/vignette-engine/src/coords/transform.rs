use glam::{Mat4, Vec3};

/// Rotation axes shorter than this are treated as degenerate.
pub const AXIS_EPSILON: f32 = 1e-6;

/// Returns a unit rotation axis, substituting +Z for a degenerate input.
///
/// Degenerate means shorter than [`AXIS_EPSILON`] or containing non-finite components.
#[inline]
pub fn safe_axis(axis: Vec3) -> Vec3 {
    let len = axis.length();
    if !len.is_finite() || len < AXIS_EPSILON {
        Vec3::Z
    } else {
        axis / len
    }
}

/// Position part of a model matrix: `T(base) · T(offset) · R(angle, axis)`.
///
/// This is what dependent sprites extend when they are placed relative to another sprite.
pub fn placement(
    base_position: Vec3,
    translation_offset: Vec3,
    rotation_angle: f32,
    rotation_axis: Vec3,
) -> Mat4 {
    Mat4::from_translation(base_position)
        * Mat4::from_translation(translation_offset)
        * Mat4::from_axis_angle(safe_axis(rotation_axis), rotation_angle)
}

/// Composes a model matrix in the fixed order
/// `T(base) · T(offset) · R(angle, axis) · S(scale)`.
///
/// The order makes a sprite orbit/pulse around its anchor instead of spinning in place;
/// changing it changes the visual result.
pub fn compose(
    base_position: Vec3,
    translation_offset: Vec3,
    rotation_angle: f32,
    rotation_axis: Vec3,
    scale: Vec3,
) -> Mat4 {
    placement(base_position, translation_offset, rotation_angle, rotation_axis)
        * Mat4::from_scale(scale)
}
