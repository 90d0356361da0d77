use std::sync::Arc;

use crate::segmentation::SegmentationResult;
use crate::template::model::{LayerKind, LayerType, Template};

/// One design offered to the user: a cutout paired with a template.
///
/// Values are never edited in place. Every `with_*` method returns a new value, and every
/// change gets a fresh `id`.
#[derive(Debug, Clone)]
pub struct ImageTemplate {
    pub id: String,
    pub cutout: Arc<image::RgbaImage>,
    pub template: Template,
    pub is_loading: bool,
}

impl ImageTemplate {
    pub fn new(cutout: Arc<image::RgbaImage>, template: Template, is_loading: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            cutout,
            template,
            is_loading,
        }
    }

    /// Uses the cropped cutout when the template's person layer asks for it.
    pub fn from_result(template: Template, result: &SegmentationResult) -> Self {
        let cropped = template.person_layer().is_some_and(|l| l.is_cropped());
        let cutout = if cropped {
            Arc::clone(&result.cropped)
        } else {
            Arc::clone(&result.image)
        };
        Self::new(cutout, template, false)
    }

    /// Replaces the kind of the layer at `index`. Out of range leaves `self` as is.
    pub fn with_layer_kind_at(&self, index: usize, kind: LayerKind) -> Self {
        if index >= self.template.layers.len() {
            return self.clone();
        }
        let layers = self
            .template
            .layers
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                if i == index {
                    layer.with_kind(kind.clone())
                } else {
                    layer.clone()
                }
            })
            .collect();
        self.with_updates(Some(Template { layers }), None)
    }

    /// Replaces the kind of every layer of `layer_type`.
    pub fn with_layer_type_kind(&self, layer_type: LayerType, kind: LayerKind) -> Self {
        let layers = self
            .template
            .layers
            .iter()
            .map(|layer| {
                if layer.layer_type == layer_type {
                    layer.with_kind(kind.clone())
                } else {
                    layer.clone()
                }
            })
            .collect();
        self.with_updates(Some(Template { layers }), None)
    }

    /// Replaces the kind of the layer right below the person layer.
    pub fn with_person_previous_layer_kind(&self, kind: LayerKind) -> Self {
        match self
            .template
            .person_layer_index()
            .and_then(|i| i.checked_sub(1))
        {
            Some(index) => self.with_layer_kind_at(index, kind),
            None => self.clone(),
        }
    }

    pub fn with_updates(&self, template: Option<Template>, is_loading: Option<bool>) -> Self {
        Self::new(
            Arc::clone(&self.cutout),
            template.unwrap_or_else(|| self.template.clone()),
            is_loading.unwrap_or(self.is_loading),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/image_template.rs"]
mod tests;
