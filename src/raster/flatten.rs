//! Rasterizes the whole element stack into one bitmap for export.

use crate::assets::decode::{prepare_rgba_image, unpremultiply_rgba8_in_place};
use crate::assets::store::PreparedImage;
use crate::canvas::element::{ElementContent, MovableElement};
use crate::canvas::engine::Canvas;
use crate::foundation::core::{Affine, Size, Vec2, aspect_fit, pixel_extent};
use crate::raster::paint::{affine_to_cpu, apply_mask, image_paint, paint_color, paint_gradient};

/// Flattened canvas pixels, row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy suitable for PNG encoding.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
    }
}

/// Draws every element bottom to top with its placement and mask.
///
/// `clear` is a straight RGBA8 color painted under the stack; without it uncovered pixels stay
/// transparent. Output is premultiplied and sized to the canvas bounds (rounded up). Elements
/// whose content cannot be painted are skipped with a warning. `None` when the bounds cannot
/// back a bitmap.
#[tracing::instrument(skip_all, fields(elements = canvas.elements().len()))]
pub fn flatten(canvas: &Canvas, clear: Option<[u8; 4]>) -> Option<FrameRGBA> {
    let bounds = canvas.bounds();
    let Some((width, height)) = pixel_extent(bounds.size()) else {
        tracing::warn!(?bounds, "canvas bounds cannot back a bitmap");
        return None;
    };
    let (w16, h16) = (u16::try_from(width).ok()?, u16::try_from(height).ok()?);

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    if let Some([r, g, b, a]) = clear {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));
    }

    let to_pixels = Affine::translate(Vec2::new(-bounds.x0, -bounds.y0));
    for el in canvas.elements() {
        let Some(image) = element_pixels(el) else {
            continue;
        };
        let paint = match image_paint(&image) {
            Ok(paint) => paint,
            Err(err) => {
                tracing::warn!(id = %el.id(), %err, "element skipped");
                continue;
            }
        };
        let size = el.size();
        let fit = Affine::scale_non_uniform(
            size.width / f64::from(image.width),
            size.height / f64::from(image.height),
        );
        ctx.set_transform(affine_to_cpu(to_pixels * el.affine() * fit));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
    }

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    Some(FrameRGBA {
        width,
        height,
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    })
}

/// Premultiplied content pixels with the element mask applied.
fn element_pixels(el: &MovableElement) -> Option<PreparedImage> {
    let image = match el.content() {
        ElementContent::Image { bitmap } => {
            if bitmap.width() == 0 || bitmap.height() == 0 {
                return None;
            }
            match letterbox(bitmap, el.size()) {
                Some(padded) => prepare_rgba_image(&padded),
                None => prepare_rgba_image(bitmap),
            }
        }
        ElementContent::Gradient { info } => {
            let (w, h) = pixel_extent(el.size())?;
            paint_gradient(info, w, h)?
        }
        ElementContent::Color { color } => {
            let (w, h) = pixel_extent(el.size())?;
            paint_color(color, w, h)?
        }
        ElementContent::Empty => return None,
    };
    Some(match el.mask() {
        Some(mask) => apply_mask(&image, mask),
        None => image,
    })
}

/// Pads `bitmap` with transparent borders to the aspect of `size`, keeping it centered.
///
/// `None` when the aspects already match to the pixel or the padded bitmap would be oversized.
fn letterbox(bitmap: &image::RgbaImage, size: Size) -> Option<image::RgbaImage> {
    let (w, h) = bitmap.dimensions();
    let fit = aspect_fit(Size::new(f64::from(w), f64::from(h)), size);
    let k = f64::from(w) / fit.width();
    let (pw, ph) = pixel_extent(Size::new(size.width * k, size.height * k))?;
    let (pw, ph) = (pw.max(w), ph.max(h));
    if pw - w < 2 && ph - h < 2 {
        return None;
    }
    let mut padded = image::RgbaImage::new(pw, ph);
    image::imageops::replace(
        &mut padded,
        bitmap,
        i64::from((pw - w) / 2),
        i64::from((ph - h) / 2),
    );
    Some(padded)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/flatten.rs"]
mod tests;
