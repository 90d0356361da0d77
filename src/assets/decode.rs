use std::sync::Arc;

use anyhow::Context;

use crate::assets::store::{PreparedImage, PreparedSvg};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::mul_div255_u8;

/// Decodes PNG/JPEG (or any format `image` recognizes) into premultiplied pixels.
pub fn decode_image(bytes: &[u8]) -> CanvasResult<PreparedImage> {
    let rgba = image::load_from_memory(bytes)
        .context("decode local image")?
        .to_rgba8();
    Ok(prepare_rgba_image(&rgba))
}

/// Premultiplied copy of a straight-alpha image.
pub fn prepare_rgba_image(rgba: &image::RgbaImage) -> PreparedImage {
    let (width, height) = rgba.dimensions();
    let mut data = rgba.as_raw().clone();
    premultiply_rgba8_in_place(&mut data);
    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(data),
    }
}

/// Straight-alpha copy of premultiplied pixels.
pub fn to_rgba_image(prepared: &PreparedImage) -> Option<image::RgbaImage> {
    let mut rgba = prepared.rgba8_premul.as_ref().clone();
    unpremultiply_rgba8_in_place(&mut rgba);
    image::RgbaImage::from_raw(prepared.width, prepared.height, rgba)
}

pub fn parse_svg(bytes: &[u8]) -> CanvasResult<PreparedSvg> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| CanvasError::asset(format!("parse svg brush: {e}")))?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

/// Renders `tree` stretched to exactly `width`×`height` pixels.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> CanvasResult<PreparedImage> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        CanvasError::asset(format!("cannot allocate a {width}x{height} svg pixmap"))
    })?;
    let stretch = resvg::tiny_skia::Transform::from_scale(
        width as f32 / tree.size().width(),
        height as f32 / tree.size().height(),
    );
    resvg::render(tree, stretch, &mut pixmap.as_mut());
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.data().to_vec()),
    })
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = mul_div255_u8(u16::from(*c), a);
        }
    }
}

/// Inverse of [`premultiply_rgba8_in_place`], exact for opaque pixels. Transparent pixels stay
/// zero.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if matches!(a, 0 | 255) {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
