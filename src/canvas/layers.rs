//! Turns a resolved template into canvas elements.

use std::sync::Arc;

use crate::assets::decode::to_rgba_image;
use crate::assets::store::AssetStore;
use crate::canvas::element::{ElementContent, ElementId, ElementSpec};
use crate::canvas::engine::Canvas;
use crate::foundation::core::{Point, Rect, Size, pixel_extent};
use crate::raster::mask::rasterize_mask;
use crate::template::model::{Layer, LayerKind, LayerType, Template};
use crate::template::resolve::resolve_layer;

/// Display label of a layer: `background`/`person` by type, `frame-<uuid>` for frames and a bare
/// uuid for untyped layers.
pub fn layer_label(layer_type: LayerType) -> String {
    match layer_type {
        LayerType::Background => "background".to_owned(),
        LayerType::Person => "person".to_owned(),
        LayerType::Frame => format!("frame-{}", uuid::Uuid::new_v4()),
        LayerType::None => uuid::Uuid::new_v4().to_string(),
    }
}

impl Canvas {
    /// Adds one element per template layer, bottom to top, resolved against the canvas bounds.
    ///
    /// Person layers show `cutout` sized by its aspect ratio; other layers are sized with an
    /// aspect ratio of 1. Masks are rasterized over each element's own bounds.
    #[tracing::instrument(skip_all, fields(layers = template.layers.len()))]
    pub fn add_template_layers(
        &mut self,
        template: &Template,
        cutout: &Arc<image::RgbaImage>,
        assets: &AssetStore,
    ) -> Vec<ElementId> {
        let bounds = self.bounds();
        let (cw, ch) = cutout.dimensions();
        let cutout_aspect = if cw > 0 && ch > 0 {
            f64::from(cw) / f64::from(ch)
        } else {
            1.0
        };

        let mut ids = Vec::with_capacity(template.layers.len());
        for layer in &template.layers {
            let is_person = layer.layer_type == LayerType::Person;
            let aspect = if is_person { cutout_aspect } else { 1.0 };
            let resolved = resolve_layer(layer, bounds, aspect);

            let content = if is_person {
                ElementContent::Image {
                    bitmap: Arc::clone(cutout),
                }
            } else {
                layer_content(layer, resolved.size, assets)
            };
            let mask = rasterize_mask(
                layer.masks(),
                Rect::from_origin_size(Point::ZERO, resolved.size),
                assets,
            );

            let spec = ElementSpec::new(content, resolved.center, resolved.size)
                .with_mask(mask)
                .with_label(layer_label(layer.layer_type));
            ids.push(self.add_element(spec, false));
        }
        ids
    }
}

fn layer_content(layer: &Layer, size: Size, assets: &AssetStore) -> ElementContent {
    match &layer.kind {
        LayerKind::Color(color) => ElementContent::Color {
            color: color.clone(),
        },
        LayerKind::LinearGradient(info) => ElementContent::Gradient { info: info.clone() },
        LayerKind::LocalImage(name) => {
            let Some((w, h)) = pixel_extent(size) else {
                return ElementContent::Empty;
            };
            let bitmap = assets
                .prepare_image(name, w, h)
                .map_err(|err| tracing::warn!(%name, %err, "layer image unavailable"))
                .ok()
                .and_then(|img| to_rgba_image(&img));
            match bitmap {
                Some(bitmap) => ElementContent::Image {
                    bitmap: Arc::new(bitmap),
                },
                None => ElementContent::Empty,
            }
        }
        LayerKind::RemoteImage(remote) => {
            tracing::debug!(url = %remote.url, "remote layer images are not fetched");
            ElementContent::Empty
        }
        LayerKind::MaskedImage { .. } | LayerKind::Undetermined => ElementContent::Empty,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/layers.rs"]
mod tests;
