pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

use crate::foundation::math::mul_div255_u8;

/// Live user transform of a movable element.
///
/// `position` is a delta from the element's origin location; `scale` and `rotation` are applied
/// about the element's own center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Translation from the untransformed anchor.
    pub position: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation in radians.
    pub rotation: f64,
}

impl Transform {
    /// Identity position.
    pub const DEFAULT_POSITION: Vec2 = Vec2::ZERO;
    /// Identity scale.
    pub const DEFAULT_SCALE: f64 = 1.0;
    /// Identity rotation.
    pub const DEFAULT_ROTATION: f64 = 0.0;

    /// Affine for an element of `size` whose untransformed center sits at `anchor`.
    ///
    /// Maps element-local coordinates (`0..width`, `0..height`) into parent space.
    pub fn to_affine(self, anchor: Point, size: Size) -> Affine {
        let t_center = Affine::translate(anchor.to_vec2() + self.position);
        let t_rotate = Affine::rotate(self.rotation);
        let t_scale = Affine::scale(self.scale);
        let t_uncenter = Affine::translate(Vec2::new(-size.width * 0.5, -size.height * 0.5));

        // T(anchor + position) * R(rot) * S(scale) * T(-size/2)
        t_center * t_rotate * t_scale * t_uncenter
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Self::DEFAULT_POSITION,
            scale: Self::DEFAULT_SCALE,
            rotation: Self::DEFAULT_ROTATION,
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let premul = |c: u8| mul_div255_u8(u16::from(c), u16::from(a));
        Self {
            r: premul(r),
            g: premul(g),
            b: premul(b),
            a,
        }
    }

    pub(crate) fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Pixel dimensions covering `size`, rounded up and at least one pixel per axis.
///
/// Returns `None` for non-finite, non-positive or oversized extents.
pub(crate) fn pixel_extent(size: Size) -> Option<(u32, u32)> {
    const MAX_DIM: f64 = 16_384.0;
    let ok = |v: f64| v.is_finite() && v > 0.0 && v.ceil() <= MAX_DIM;
    if !ok(size.width) || !ok(size.height) {
        return None;
    }
    Some((
        (size.width.ceil() as u32).max(1),
        (size.height.ceil() as u32).max(1),
    ))
}

/// Largest rect with `content`'s aspect that fits inside `bounds`, centered in it.
///
/// Degenerate content fills the whole bounds.
pub(crate) fn aspect_fit(content: Size, bounds: Size) -> Rect {
    if content.width <= 0.0 || content.height <= 0.0 {
        return bounds.to_rect();
    }
    let scale = (bounds.width / content.width).min(bounds.height / content.height);
    let fitted = content * scale;
    Rect::from_origin_size(
        Point::new(
            (bounds.width - fitted.width) / 2.0,
            (bounds.height - fitted.height) / 2.0,
        ),
        fitted,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
