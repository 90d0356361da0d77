//! Maps normalized template geometry onto concrete container bounds.

use crate::foundation::core::{Point, Rect, Size};
use crate::template::model::{
    HorizontalAlignment, Layer, Position, SizeType, VerticalAlignment,
};

/// Concrete geometry of one layer inside its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLayer {
    pub size: Size,
    pub center: Point,
}

impl ResolvedLayer {
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    pub fn origin(&self) -> Point {
        self.rect().origin()
    }
}

/// Pixel size of a layer.
///
/// For intrinsic sizing the ratio-anchored axis depends on both `is_cropped` and whether the
/// content is landscape: cropped content fills the constraining axis, uncropped content fits
/// inside it.
pub fn resolve_size(size: SizeType, bounds: Rect, aspect_ratio: f64, is_cropped: bool) -> Size {
    match size {
        SizeType::Normal(s) => Size::new(s.width * bounds.width(), s.height * bounds.height()),
        SizeType::Intrinsic(i) => {
            let landscape = aspect_ratio > 1.0;
            let width_anchored = is_cropped == landscape;
            if width_anchored {
                let width = i.ratio * bounds.width();
                Size::new(width, width / aspect_ratio)
            } else {
                let height = i.ratio * bounds.height();
                Size::new(height * aspect_ratio, height)
            }
        }
    }
}

fn map_point(p: Point, bounds: Rect) -> Point {
    Point::new(
        bounds.x0 + p.x * bounds.width(),
        bounds.y0 + p.y * bounds.height(),
    )
}

/// Center of a child of size `child` placed by `position` inside `bounds`.
pub fn resolve_center(position: &Position, bounds: Rect, child: Size) -> Point {
    let half_bounds = (bounds.width() * 0.5, bounds.height() * 0.5);
    match position {
        Position::Center(p) => map_point(*p, bounds),
        Position::Origin(p) => {
            let m = map_point(*p, bounds);
            Point::new(m.x + half_bounds.0, m.y + half_bounds.1)
        }
        Position::Relative(a) => {
            let x = match a.horizontal.alignment {
                HorizontalAlignment::Left => child.width * 0.5,
                HorizontalAlignment::Center => half_bounds.0,
                HorizontalAlignment::Right => bounds.width() - child.width * 0.5,
            } + a.horizontal.offset * bounds.width();
            let y = match a.vertical.alignment {
                VerticalAlignment::Top => child.height * 0.5,
                VerticalAlignment::Center => half_bounds.1,
                VerticalAlignment::Bottom => bounds.height() - child.height * 0.5,
            } + a.vertical.offset * bounds.height();
            Point::new(bounds.x0 + x, bounds.y0 + y)
        }
    }
}

/// Origin (top-left) of a child of size `child` placed by `position` inside `bounds`.
///
/// `Center`/`Origin` positions convert between representations by half the *bounds*; only
/// `Relative` accounts for the child's own size.
pub fn resolve_origin(position: &Position, bounds: Rect, child: Size) -> Point {
    let half_bounds = (bounds.width() * 0.5, bounds.height() * 0.5);
    match position {
        Position::Center(p) => {
            let m = map_point(*p, bounds);
            Point::new(m.x - half_bounds.0, m.y - half_bounds.1)
        }
        Position::Origin(p) => map_point(*p, bounds),
        Position::Relative(a) => {
            let x = match a.horizontal.alignment {
                HorizontalAlignment::Left => 0.0,
                HorizontalAlignment::Center => (bounds.width() - child.width) * 0.5,
                HorizontalAlignment::Right => bounds.width() - child.width,
            } + a.horizontal.offset * bounds.width();
            let y = match a.vertical.alignment {
                VerticalAlignment::Top => 0.0,
                VerticalAlignment::Center => (bounds.height() - child.height) * 0.5,
                VerticalAlignment::Bottom => bounds.height() - child.height,
            } + a.vertical.offset * bounds.height();
            Point::new(bounds.x0 + x, bounds.y0 + y)
        }
    }
}

/// Rect of size `size` centered on the resolved center.
pub fn resolve_rect(size: Size, position: &Position, bounds: Rect) -> Rect {
    Rect::from_center_size(resolve_center(position, bounds, size), size)
}

/// Size and center of `layer` inside `bounds` for content with `aspect_ratio`.
pub fn resolve_layer(layer: &Layer, bounds: Rect, aspect_ratio: f64) -> ResolvedLayer {
    let size = resolve_size(layer.size, bounds, aspect_ratio, layer.is_cropped());
    ResolvedLayer {
        size,
        center: resolve_center(&layer.position, bounds, size),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/resolve.rs"]
mod tests;
