use std::sync::Arc;

use crate::canvas::gesture::Recognizers;
use crate::foundation::core::{Affine, Point, Rect, Size, Transform, aspect_fit};
use crate::raster::mask::AlphaMask;
use crate::template::color::{HexColor, LinearGradientInfo};

/// Canvas-unique element handle. Never reused within one canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u64);

impl ElementId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an element draws inside its `size`.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementContent {
    /// Straight-alpha bitmap, aspect-fit and centered in the element.
    Image { bitmap: Arc<image::RgbaImage> },
    Gradient { info: LinearGradientInfo },
    Color { color: HexColor },
    Empty,
}

impl ElementContent {
    /// Whether `p` (element-local, already inside the bounds) lands on drawn content.
    fn hits(&self, p: Point, size: Size) -> bool {
        match self {
            Self::Image { bitmap } => {
                let (w, h) = bitmap.dimensions();
                if w == 0 || h == 0 {
                    return false;
                }
                let fit = aspect_fit(Size::new(f64::from(w), f64::from(h)), size);
                if !fit.contains(p) {
                    return false;
                }
                let x = ((p.x - fit.x0) / fit.width() * f64::from(w)).floor() as u32;
                let y = ((p.y - fit.y0) / fit.height() * f64::from(h)).floor() as u32;
                bitmap
                    .get_pixel_checked(x.min(w - 1), y.min(h - 1))
                    .is_some_and(|px| px.0[3] > 0)
            }
            Self::Gradient { .. } | Self::Color { .. } | Self::Empty => true,
        }
    }
}

/// A placed element and its live transform.
///
/// `origin_location` is the untransformed center anchor; the drawn placement is
/// `origin_location + transform.position`, scaled and rotated about the element's own center.
#[derive(Debug, Clone)]
pub struct MovableElement {
    pub(crate) id: ElementId,
    pub(crate) label: String,
    pub(crate) content: ElementContent,
    pub(crate) size: Size,
    pub(crate) location: Point,
    pub(crate) origin_location: Point,
    pub(crate) transform: Transform,
    pub(crate) mask: Option<AlphaMask>,
    pub(crate) recognizers: Recognizers,
    pub(crate) baseline: Transform,
    placement: Affine,
}

impl MovableElement {
    pub(crate) fn new(id: ElementId, spec: ElementSpec) -> Self {
        let mut el = Self {
            id,
            label: spec.label.unwrap_or_else(|| format!("element-{}", id.0)),
            content: spec.content,
            size: spec.size,
            location: spec.location,
            origin_location: spec.origin.unwrap_or(spec.location),
            transform: spec.transform,
            mask: spec.mask,
            recognizers: Recognizers::default(),
            baseline: spec.transform,
            placement: Affine::IDENTITY,
        };
        el.move_to_defined_position();
        el
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn content(&self) -> &ElementContent {
        &self.content
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Center of the content as it was added.
    pub fn center(&self) -> Point {
        self.location
    }

    pub fn origin_location(&self) -> Point {
        self.origin_location
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn mask(&self) -> Option<&AlphaMask> {
        self.mask.as_ref()
    }

    pub fn recognizers(&self) -> &Recognizers {
        &self.recognizers
    }

    /// Element-local to canvas space, as of the last placement.
    pub fn affine(&self) -> Affine {
        self.placement
    }

    /// Axis-aligned bounds of the transformed element.
    pub fn frame(&self) -> Rect {
        self.placement
            .transform_rect_bbox(Rect::from_origin_size(Point::ZERO, self.size))
    }

    /// Recomputes the placement from `origin_location` and the transform alone.
    pub fn move_to_defined_position(&mut self) {
        self.placement = self.transform.to_affine(self.origin_location, self.size);
    }

    pub(crate) fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.move_to_defined_position();
    }

    /// Hit test in element-local coordinates: inside the bounds, not masked out and, for images,
    /// over a non-transparent pixel.
    pub fn hit_test(&self, p: Point) -> bool {
        let inside = p.x >= 0.0 && p.y >= 0.0 && p.x < self.size.width && p.y < self.size.height;
        if !inside {
            return false;
        }
        if let Some(mask) = &self.mask
            && mask.coverage_at(p, self.size) == 0
        {
            return false;
        }
        self.content.hits(p, self.size)
    }

    /// Hit test for a point in canvas space.
    pub fn contains(&self, p: Point) -> bool {
        if self.placement.determinant().abs() < f64::EPSILON {
            return false;
        }
        self.hit_test(self.placement.inverse() * p)
    }
}

/// Everything needed to place a new element.
#[derive(Debug, Clone)]
pub struct ElementSpec {
    pub content: ElementContent,
    pub transform: Transform,
    /// Content center before any transform.
    pub location: Point,
    /// Anchor the transform is applied from. Defaults to `location`.
    pub origin: Option<Point>,
    pub size: Size,
    pub mask: Option<AlphaMask>,
    pub label: Option<String>,
}

impl ElementSpec {
    pub fn new(content: ElementContent, location: Point, size: Size) -> Self {
        Self {
            content,
            transform: Transform::default(),
            location,
            origin: None,
            size,
            mask: None,
            label: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_mask(mut self, mask: Option<AlphaMask>) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/element.rs"]
mod tests;
