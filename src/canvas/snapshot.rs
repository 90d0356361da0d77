//! Versioned JSON encoding of the element stack.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::canvas::element::{ElementContent, ElementId, ElementSpec, MovableElement};
use crate::canvas::engine::{Canvas, CanvasOpts};
use crate::foundation::core::{Point, Rect, Size, Transform};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::raster::mask::AlphaMask;
use crate::template::color::{HexColor, LinearGradientInfo};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    pub version: u32,
    pub elements: Vec<ElementSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Element label.
    pub id: String,
    pub origin_location: Point,
    pub location: Point,
    pub size: Size,
    pub transform: Transform,
    pub content: ContentSnapshot,
    #[serde(default)]
    pub mask: Option<MaskSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentSnapshot {
    /// Straight-alpha RGBA8, row-major.
    Image {
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    },
    Gradient {
        info: LinearGradientInfo,
    },
    Color {
        color: HexColor,
    },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskSnapshot {
    pub width: u32,
    pub height: u32,
    pub alpha: Vec<u8>,
}

impl ElementSnapshot {
    fn capture(el: &MovableElement) -> Self {
        let content = match el.content() {
            ElementContent::Image { bitmap } => ContentSnapshot::Image {
                width: bitmap.width(),
                height: bitmap.height(),
                rgba: bitmap.as_raw().clone(),
            },
            ElementContent::Gradient { info } => ContentSnapshot::Gradient { info: info.clone() },
            ElementContent::Color { color } => ContentSnapshot::Color {
                color: color.clone(),
            },
            ElementContent::Empty => ContentSnapshot::Empty,
        };
        Self {
            id: el.label().to_owned(),
            origin_location: el.origin_location(),
            location: el.center(),
            size: el.size(),
            transform: el.transform(),
            content,
            mask: el.mask().map(|m| MaskSnapshot {
                width: m.width(),
                height: m.height(),
                alpha: m.alpha().to_vec(),
            }),
        }
    }

    fn to_spec(&self) -> CanvasResult<ElementSpec> {
        let content = match &self.content {
            ContentSnapshot::Image {
                width,
                height,
                rgba,
            } => {
                let bitmap = image::RgbaImage::from_raw(*width, *height, rgba.clone())
                    .ok_or_else(|| {
                        CanvasError::snapshot(format!(
                            "element \"{}\": image bytes do not match {width}x{height}",
                            self.id
                        ))
                    })?;
                ElementContent::Image {
                    bitmap: Arc::new(bitmap),
                }
            }
            ContentSnapshot::Gradient { info } => ElementContent::Gradient { info: info.clone() },
            ContentSnapshot::Color { color } => ElementContent::Color {
                color: color.clone(),
            },
            ContentSnapshot::Empty => ElementContent::Empty,
        };
        let mask = match &self.mask {
            Some(m) => Some(
                AlphaMask::from_raw(m.width, m.height, m.alpha.clone()).ok_or_else(|| {
                    CanvasError::snapshot(format!(
                        "element \"{}\": mask bytes do not match {}x{}",
                        self.id, m.width, m.height
                    ))
                })?,
            ),
            None => None,
        };
        Ok(ElementSpec::new(content, self.location, self.size)
            .with_transform(self.transform)
            .with_origin(self.origin_location)
            .with_mask(mask)
            .with_label(self.id.clone()))
    }
}

impl Canvas {
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            version: SNAPSHOT_VERSION,
            elements: self.elements().iter().map(ElementSnapshot::capture).collect(),
        }
    }

    pub fn encode_snapshot(&self) -> CanvasResult<String> {
        serde_json::to_string(&self.snapshot()).map_err(|e| CanvasError::snapshot(e.to_string()))
    }

    /// Rebuilds every snapshot element through [`Canvas::add_element`], unanimated.
    ///
    /// Nothing is added unless the whole snapshot is valid.
    pub fn restore(&mut self, snapshot: &CanvasSnapshot) -> CanvasResult<Vec<ElementId>> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CanvasError::snapshot(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            )));
        }
        let specs = snapshot
            .elements
            .iter()
            .map(ElementSnapshot::to_spec)
            .collect::<CanvasResult<Vec<_>>>()?;
        Ok(specs
            .into_iter()
            .map(|spec| self.add_element(spec, false))
            .collect())
    }

    pub fn decode_snapshot(bounds: Rect, opts: CanvasOpts, json: &str) -> CanvasResult<Self> {
        let snapshot: CanvasSnapshot =
            serde_json::from_str(json).map_err(|e| CanvasError::snapshot(e.to_string()))?;
        let mut canvas = Self::with_opts(bounds, opts);
        canvas.restore(&snapshot)?;
        Ok(canvas)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/snapshot.rs"]
mod tests;
