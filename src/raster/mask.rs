use crate::assets::store::AssetStore;
use crate::foundation::core::{Affine, Point, Rect, Size, Vec2, pixel_extent};
use crate::foundation::math::{coverage_erase, coverage_over};
use crate::raster::paint::{affine_to_cpu, bezpath_to_cpu, image_paint};
use crate::template::model::{Corners, MaskBlendMode, MaskKind, MaskLayer, SizeType};
use crate::template::resolve::{resolve_center, resolve_origin, resolve_size};
use kurbo::Shape;

/// 8-bit coverage bitmap. 255 keeps content, 0 hides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl AlphaMask {
    /// Fully transparent mask.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Self::from_raw(width, height, vec![0; width as usize * height as usize])
    }

    /// `None` unless `alpha.len() == width * height` and both dimensions are non-zero.
    pub fn from_raw(width: u32, height: u32, alpha: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || alpha.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            alpha,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    /// Coverage at pixel `(x, y)`; zero outside the mask.
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[y as usize * self.width as usize + x as usize]
    }

    /// Coverage under `p`, where the mask spans `size` in the same coordinate space.
    pub fn coverage_at(&self, p: Point, size: Size) -> u8 {
        if size.width <= 0.0 || size.height <= 0.0 || p.x < 0.0 || p.y < 0.0 {
            return 0;
        }
        let x = (p.x / size.width * f64::from(self.width)).floor();
        let y = (p.y / size.height * f64::from(self.height)).floor();
        if !x.is_finite() || !y.is_finite() {
            return 0;
        }
        self.coverage(x as u32, y as u32)
    }

    fn combine(&mut self, src: &[u8], mode: MaskBlendMode) {
        for (d, &s) in self.alpha.iter_mut().zip(src) {
            *d = match mode {
                MaskBlendMode::Normal => coverage_over(*d, s),
                MaskBlendMode::Clear => coverage_erase(*d, s),
            };
        }
    }
}

/// Rasterizes `masks` in order over `bounds` into one coverage bitmap.
///
/// Returns `None` when there is nothing to mask or the bitmap cannot be allocated; callers treat
/// both as "unmasked".
#[tracing::instrument(skip(masks, assets), fields(masks = masks.len()))]
pub fn rasterize_mask(masks: &[MaskLayer], bounds: Rect, assets: &AssetStore) -> Option<AlphaMask> {
    if masks.is_empty() {
        return None;
    }
    let Some((w, h)) = pixel_extent(bounds.size()) else {
        tracing::warn!(?bounds, "mask bounds cannot back a bitmap");
        return None;
    };
    let (w16, h16) = (u16::try_from(w).ok()?, u16::try_from(h).ok()?);
    let mut out = AlphaMask::new(w, h)?;

    let local = Rect::from_origin_size(Point::ZERO, bounds.size());
    for mask in masks {
        let size = resolve_size(SizeType::Normal(mask.size), local, 1.0, false);
        let Some(src) = rasterize_one(mask, size, local, w16, h16, assets) else {
            continue;
        };
        out.combine(&src, mask.blend_mode);
    }
    Some(out)
}

fn rasterize_one(
    mask: &MaskLayer,
    size: Size,
    local: Rect,
    w: u16,
    h: u16,
    assets: &AssetStore,
) -> Option<Vec<u8>> {
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));

    let origin_rect = Rect::from_origin_size(resolve_origin(&mask.position, local, size), size);
    match &mask.kind {
        MaskKind::Circle => {
            let center = resolve_center(&mask.position, local, size);
            let circle = kurbo::Circle::new(center, size.width * 0.5);
            ctx.fill_path(&bezpath_to_cpu(&circle.to_path(0.1)));
        }
        MaskKind::Rectangle => {
            ctx.fill_path(&bezpath_to_cpu(&origin_rect.to_path(0.1)));
        }
        MaskKind::Oval => {
            let ellipse = kurbo::Ellipse::from_rect(origin_rect);
            ctx.fill_path(&bezpath_to_cpu(&ellipse.to_path(0.1)));
        }
        MaskKind::RoundedRectangle {
            corner_radii,
            round_corners,
        } => {
            let center = resolve_center(&mask.position, local, size);
            let rect = Rect::from_center_size(center, size);
            let r = corner_radii.width * size.width;
            let corners = Corners::from_names(round_corners.as_deref());
            let pick = |on: bool| if on { r } else { 0.0 };
            let radii = kurbo::RoundedRectRadii::new(
                pick(corners.top_left),
                pick(corners.top_right),
                pick(corners.bottom_right),
                pick(corners.bottom_left),
            );
            let rounded = kurbo::RoundedRect::from_rect(rect, radii);
            ctx.fill_path(&bezpath_to_cpu(&rounded.to_path(0.1)));
        }
        MaskKind::LocalImage(name) => {
            let (pw, ph) = pixel_extent(size)?;
            let image = match assets.prepare_image(name, pw, ph) {
                Ok(img) => img,
                Err(err) => {
                    tracing::warn!(%name, %err, "mask image unavailable");
                    return None;
                }
            };
            let paint = match image_paint(&image) {
                Ok(p) => p,
                Err(err) => {
                    tracing::warn!(%name, %err, "mask image cannot be painted");
                    return None;
                }
            };
            // Upright at (rect.x, 0); the mask rect's y offset does not apply to images.
            let placement = Affine::translate(Vec2::new(origin_rect.x0, 0.0))
                * Affine::scale_non_uniform(
                    size.width / f64::from(image.width),
                    size.height / f64::from(image.height),
                );
            ctx.set_transform(affine_to_cpu(placement));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(image.width),
                f64::from(image.height),
            ));
        }
        MaskKind::RemoteImage(remote) => {
            tracing::debug!(url = %remote.url, "remote mask images are not fetched");
            return None;
        }
    }

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Some(
        pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/raster/mask.rs"]
mod tests;
