//! Snap heuristics applied after each continuous gesture update.

use crate::foundation::core::{Rect, Vec2};
use crate::foundation::math::normalize_angle;
use std::f64::consts::FRAC_PI_2;

/// Nearest multiple of `interval` when `angle` (wrapped to `[0, 2π)`) lies within `threshold`.
///
/// The result is wrapped to `[0, 2π)` as well.
pub fn snap_rotation(angle: f64, threshold: f64, interval: f64) -> Option<f64> {
    if !angle.is_finite() || interval <= 0.0 {
        return None;
    }
    let positive = normalize_angle(angle);
    let snapped = (positive / interval).round() * interval;
    if (snapped - positive).abs() <= threshold {
        Some(normalize_angle(snapped))
    } else {
        None
    }
}

/// Exact multiple of 90°.
pub fn is_axis_aligned(angle: f64) -> bool {
    snap_rotation(angle, 0.0, FRAC_PI_2).is_some()
}

pub fn snap_scale(scale: f64, threshold: f64) -> Option<f64> {
    ((scale - 1.0).abs() <= threshold).then_some(1.0)
}

/// Correction that moves `child` onto the parent's center or edges.
///
/// Each axis is handled independently. Center alignment applies the exact difference; when the
/// child is axis-aligned a near edge (min edge first, else max edge) overrides the center result
/// on that axis. `None` when nothing is within `threshold`.
pub fn snap_position(parent: Rect, child: Rect, axis_aligned: bool, threshold: f64) -> Option<Vec2> {
    let x = snap_axis(
        (parent.x0, parent.center().x, parent.x1),
        (child.x0, child.center().x, child.x1),
        axis_aligned,
        threshold,
    );
    let y = snap_axis(
        (parent.y0, parent.center().y, parent.y1),
        (child.y0, child.center().y, child.y1),
        axis_aligned,
        threshold,
    );
    if x.is_none() && y.is_none() {
        return None;
    }
    Some(Vec2::new(x.unwrap_or(0.0), y.unwrap_or(0.0)))
}

fn snap_axis(
    (p_min, p_mid, p_max): (f64, f64, f64),
    (c_min, c_mid, c_max): (f64, f64, f64),
    axis_aligned: bool,
    threshold: f64,
) -> Option<f64> {
    let mut out = None;
    if (p_mid - c_mid).abs() <= threshold {
        out = Some(p_mid - c_mid);
    }
    if axis_aligned {
        if (c_min - p_min).abs() <= threshold {
            out = Some(p_min - c_min);
        } else if (c_max - p_max).abs() <= threshold {
            out = Some(p_max - c_max);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/snap.rs"]
mod tests;
