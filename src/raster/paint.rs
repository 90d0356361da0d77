//! Pixel producers for element content and the `vello_cpu` glue shared by masks and flattening.

use std::sync::Arc;

use crate::assets::store::PreparedImage;
use crate::foundation::core::{Affine, BezPath, Point, Rgba8Premul};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::mul_div255_u8;
use crate::raster::mask::AlphaMask;
use crate::template::color::{HexColor, LinearGradientInfo, sample_stops};

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Wraps premultiplied pixels as an image paint sampled in element-local pixel space.
pub(crate) fn image_paint(image: &PreparedImage) -> CanvasResult<vello_cpu::Image> {
    let (Ok(w), Ok(h)) = (u16::try_from(image.width), u16::try_from(image.height)) else {
        return Err(CanvasError::render(format!(
            "{}x{} bitmap is too large to paint",
            image.width, image.height
        )));
    };
    if image.rgba8_premul.len() != image.width as usize * image.height as usize * 4 {
        return Err(CanvasError::render("bitmap byte length does not match its size"));
    }

    let pixels: Vec<_> = image
        .rgba8_premul
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
        .collect();
    let translucent = pixels.iter().any(|px| px.a != 255);
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, translucent);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

pub(crate) fn solid_image(color: Rgba8Premul, width: u32, height: u32) -> PreparedImage {
    let data = color.to_array().repeat(width as usize * height as usize);
    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(data),
    }
}

/// Flat color fill, or `None` when the hex is not a valid `RRGGBB`.
pub fn paint_color(color: &HexColor, width: u32, height: u32) -> Option<PreparedImage> {
    Some(solid_image(color.to_rgba8_premul()?, width, height))
}

/// Rasterizes a linear gradient whose start/end points are fractions of the fill rect.
pub fn paint_gradient(info: &LinearGradientInfo, width: u32, height: u32) -> Option<PreparedImage> {
    let (w, h) = (f64::from(width), f64::from(height));
    let start = Point::new(info.start_point.x * w, info.start_point.y * h);
    let end = Point::new(info.end_point.x * w, info.end_point.y * h);
    let axis = end - start;
    let len2 = axis.hypot2();
    let stops = info.resolved_stops();
    if stops.is_empty() {
        return None;
    }

    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let t = if len2 > 0.0 {
                (p - start).dot(axis) / len2
            } else {
                0.0
            };
            data.extend_from_slice(&sample_stops(&stops, t)?.to_array());
        }
    }
    Some(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(data),
    })
}

/// Multiplies every pixel by the mask coverage, sampling the mask at the matching relative
/// position (nearest neighbour).
pub fn apply_mask(image: &PreparedImage, mask: &AlphaMask) -> PreparedImage {
    let (w, h) = (image.width, image.height);
    let mut data = image.rgba8_premul.as_ref().clone();
    for y in 0..h {
        let my = scale_index(y, h, mask.height());
        for x in 0..w {
            let mx = scale_index(x, w, mask.width());
            let cov = u16::from(mask.coverage(mx, my));
            let i = (y as usize * w as usize + x as usize) * 4;
            for c in &mut data[i..i + 4] {
                *c = mul_div255_u8(u16::from(*c), cov);
            }
        }
    }
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(data),
    }
}

fn scale_index(i: u32, from: u32, to: u32) -> u32 {
    if from == to {
        return i;
    }
    let v = ((f64::from(i) + 0.5) * f64::from(to) / f64::from(from)).floor() as u32;
    v.min(to.saturating_sub(1))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/paint.rs"]
mod tests;
