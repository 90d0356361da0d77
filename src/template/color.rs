use crate::foundation::core::{Point, Rgba8Premul};
use serde::{Deserialize, Serialize};

/// A `RRGGBB` hex color plus a straight alpha in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HexColor {
    pub hex: String,
    pub alpha: f64,
}

impl HexColor {
    pub fn new(hex: impl Into<String>) -> Self {
        Self {
            hex: hex.into(),
            alpha: 1.0,
        }
    }

    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self {
            hex: self.hex.clone(),
            alpha,
        }
    }

    /// Straight-alpha RGBA8, or `None` unless the hex is exactly six hex digits.
    pub fn to_rgba8(&self) -> Option<[u8; 4]> {
        let s = self.hex.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        let a = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Some([byte(0)?, byte(2)?, byte(4)?, a])
    }

    pub fn to_rgba8_premul(&self) -> Option<Rgba8Premul> {
        let [r, g, b, a] = self.to_rgba8()?;
        Some(Rgba8Premul::from_straight_rgba(r, g, b, a))
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj {
                hex: String,
                #[serde(default = "one")]
                alpha: f64,
            },
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(hex) => Ok(Self::new(hex)),
            Repr::Obj { hex, alpha } => Ok(Self { hex, alpha }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: HexColor,
    pub position: f64,
}

impl GradientStop {
    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
            position: self.position,
        }
    }
}

/// Linear gradient across the unit square of whatever it fills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradientInfo {
    pub start_point: Point,
    pub end_point: Point,
    pub stops: Vec<GradientStop>,
}

impl LinearGradientInfo {
    /// Same gradient with every stop's alpha replaced.
    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self {
            start_point: self.start_point,
            end_point: self.end_point,
            stops: self.stops.iter().map(|s| s.with_alpha(alpha)).collect(),
        }
    }

    /// Premultiplied color at parameter `t` along the gradient axis.
    ///
    /// Stops with invalid colors are ignored; `None` when no stop is usable.
    pub(crate) fn sample(&self, t: f64) -> Option<Rgba8Premul> {
        sample_stops(&self.resolved_stops(), t)
    }

    /// Usable stops as `(position, straight RGBA8)`, in declaration order.
    pub(crate) fn resolved_stops(&self) -> Vec<(f64, [u8; 4])> {
        self.stops
            .iter()
            .filter_map(|s| Some((s.position, s.color.to_rgba8()?)))
            .collect()
    }
}

/// Interpolates already-resolved stops at `t`, clamping outside the first and last stop.
pub(crate) fn sample_stops(stops: &[(f64, [u8; 4])], t: f64) -> Option<Rgba8Premul> {
    let (first, last) = (stops.first()?, stops.last()?);

    let straight = if t <= first.0 {
        first.1
    } else if t >= last.0 {
        last.1
    } else {
        stops
            .windows(2)
            .find(|w| t >= w[0].0 && t <= w[1].0)
            .map_or(last.1, |w| {
                let ((p0, c0), (p1, c1)) = (w[0], w[1]);
                let span = p1 - p0;
                let u = if span > 0.0 { (t - p0) / span } else { 0.0 };
                std::array::from_fn(|i| {
                    let (a, b) = (f64::from(c0[i]), f64::from(c1[i]));
                    (a + (b - a) * u).round() as u8
                })
            })
    };

    let [r, g, b, a] = straight;
    Some(Rgba8Premul::from_straight_rgba(r, g, b, a))
}

#[cfg(test)]
#[path = "../../tests/unit/template/color.rs"]
mod tests;
