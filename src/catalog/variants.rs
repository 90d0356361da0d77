use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::design::TemplateDesign;
use crate::catalog::image_template::ImageTemplate;
use crate::catalog::palette::PALETTE;
use crate::catalog::store::Catalog;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::segmentation::SegmentationResult;
use crate::template::color::HexColor;
use crate::template::model::LayerKind;

/// Variants of one archetype: the layer at `layer_index` is swapped for each palette color in
/// `colors` and then each gradient in `gradients`. Both ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSpec {
    pub design: TemplateDesign,
    #[serde(default)]
    pub layer_index: usize,
    pub colors: [usize; 2],
    pub gradients: [usize; 2],
    /// Alpha applied to every gradient stop, if set.
    #[serde(default)]
    pub gradient_alpha: Option<f64>,
}

impl VariantSpec {
    fn background(design: TemplateDesign, colors: [usize; 2], gradients: [usize; 2]) -> Self {
        Self {
            design,
            layer_index: 0,
            colors,
            gradients,
            gradient_alpha: None,
        }
    }
}

/// Ordered list of archetype variants offered for a cutout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantPlan {
    pub variants: Vec<VariantSpec>,
}

impl Default for VariantPlan {
    fn default() -> Self {
        use TemplateDesign as D;
        Self {
            variants: vec![
                VariantSpec::background(D::PlainBackground, [0, 3], [0, 3]),
                VariantSpec::background(D::FullCircleFrame, [4, 7], [4, 7]),
                VariantSpec::background(D::MediumCircleFrameHalfOpen, [7, 9], [7, 10]),
                VariantSpec::background(D::MediumRoundedRectFrameHalfOpen, [6, 8], [10, 13]),
                VariantSpec::background(D::BackgroundCircleBrush, [8, 10], [11, 14]),
                VariantSpec::background(D::FrameCircleBrushHalfOpen, [2, 4], [11, 14]),
                VariantSpec::background(D::FrameBrush2HalfOpen, [6, 9], [9, 15]),
                VariantSpec::background(D::FullCircleFrameSplashOverlay, [7, 9], [7, 11]),
            ],
        }
    }
}

impl VariantPlan {
    pub fn from_json(bytes: &[u8]) -> CanvasResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| CanvasError::template(format!("parse variant plan: {e}")))
    }

    pub fn specs_for(&self, design: TemplateDesign) -> impl Iterator<Item = &VariantSpec> + '_ {
        self.variants.iter().filter(move |v| v.design == design)
    }
}

/// Inclusive `[start, end]` clipped to a pool of `len` entries.
fn clip(range: [usize; 2], len: usize, pool: &str, design: TemplateDesign) -> Range<usize> {
    let [start, end] = range;
    if start > end || start >= len {
        tracing::warn!(%design, pool, start, end, len, "variant range outside pool; skipped");
        return 0..0;
    }
    if end >= len {
        tracing::warn!(%design, pool, start, end, len, "variant range clipped");
    }
    start..end.min(len - 1) + 1
}

impl Catalog {
    /// Color variants first, then gradient variants, of `base` per `spec`.
    pub fn variants(&self, spec: &VariantSpec, base: &ImageTemplate) -> Vec<ImageTemplate> {
        let colors = clip(spec.colors, PALETTE.len(), "colors", spec.design);
        let gradients = clip(spec.gradients, self.gradients().len(), "gradients", spec.design);

        let mut out = Vec::with_capacity(colors.len() + gradients.len());
        for hex in &PALETTE[colors] {
            let kind = LayerKind::Color(HexColor::new(*hex));
            out.push(base.with_layer_kind_at(spec.layer_index, kind));
        }
        for gradient in &self.gradients()[gradients] {
            let gradient = match spec.gradient_alpha {
                Some(alpha) => gradient.with_alpha(alpha),
                None => gradient.clone(),
            };
            let kind = LayerKind::LinearGradient(gradient);
            out.push(base.with_layer_kind_at(spec.layer_index, kind));
        }
        out
    }

    /// How many designs `spec` yields with this catalog's pools.
    pub fn variant_count(&self, spec: &VariantSpec) -> usize {
        if self.template(spec.design).is_none() {
            return 0;
        }
        clip(spec.colors, PALETTE.len(), "colors", spec.design).len()
            + clip(spec.gradients, self.gradients().len(), "gradients", spec.design).len()
    }

    /// The untouched photo on a plain black background.
    pub fn original_image_designs(&self, image: &Arc<image::RgbaImage>) -> Vec<ImageTemplate> {
        let Some(template) = self.template(TemplateDesign::PlainBackground) else {
            return Vec::new();
        };
        let base = ImageTemplate::new(Arc::clone(image), template.clone(), false);
        vec![base.with_layer_kind_at(0, LayerKind::Color(HexColor::new("000000")))]
    }

    /// Every design for one segmentation result, in plan order.
    pub fn masked_designs(
        &self,
        plan: &VariantPlan,
        result: &SegmentationResult,
    ) -> Vec<ImageTemplate> {
        plan.variants
            .iter()
            .filter_map(|spec| {
                let template = self.template(spec.design)?;
                let base = ImageTemplate::from_result(template.clone(), result);
                Some(self.variants(spec, &base))
            })
            .flatten()
            .collect()
    }

    /// Designs offered for `original`: the original image designs, followed by the masked
    /// designs once a segmentation result exists.
    pub fn templates_for(
        &self,
        plan: &VariantPlan,
        original: &Arc<image::RgbaImage>,
        result: Option<&SegmentationResult>,
    ) -> Vec<ImageTemplate> {
        let mut out = self.original_image_designs(original);
        if let Some(result) = result {
            out.extend(self.masked_designs(plan, result));
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/variants.rs"]
mod tests;
