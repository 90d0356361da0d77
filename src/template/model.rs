use crate::foundation::core::Point;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::template::color::{HexColor, LinearGradientInfo};
use serde::{Deserialize, Serialize};

/// Ordered layer stack of one archetype. Index 0 is drawn first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Template {
    pub layers: Vec<Layer>,
}

impl Template {
    pub fn from_json(bytes: &[u8]) -> CanvasResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| CanvasError::template(e.to_string()))
    }

    /// First person layer. Templates with several person layers are ambiguous.
    pub fn person_layer(&self) -> Option<&Layer> {
        self.layers.iter().find(|l| l.layer_type == LayerType::Person)
    }

    pub fn person_layer_index(&self) -> Option<usize> {
        self.layers
            .iter()
            .position(|l| l.layer_type == LayerType::Person)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Background,
    Frame,
    Person,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size2D {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntrinsicSize {
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeType {
    /// Fractions of the container's width and height.
    Normal(Size2D),
    /// One axis is a fraction of the container, the other follows the content's aspect ratio.
    Intrinsic(IntrinsicSize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    RemoteImage(RemoteImage),
    LocalImage(String),
    LinearGradient(LinearGradientInfo),
    Color(HexColor),
    /// Placeholder for the cutout.
    MaskedImage { cropped: bool },
    Undetermined,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "LayerDef")]
pub struct Layer {
    pub layer_type: LayerType,
    pub kind: LayerKind,
    pub size: SizeType,
    pub position: Position,
    pub mask_layers: Option<Vec<MaskLayer>>,
}

impl Layer {
    pub fn is_cropped(&self) -> bool {
        matches!(self.kind, LayerKind::MaskedImage { cropped: true })
    }

    /// Structural copy with `kind` replaced.
    pub fn with_kind(&self, kind: LayerKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    pub fn masks(&self) -> &[MaskLayer] {
        self.mask_layers.as_deref().unwrap_or(&[])
    }
}

#[derive(Deserialize)]
struct LayerDef {
    #[serde(rename = "type")]
    layer_type: LayerType,
    position: Position,
    #[serde(default)]
    size: Option<Size2D>,
    #[serde(default)]
    intrinsic_size: Option<IntrinsicSize>,
    #[serde(default)]
    mask_layers: Option<Vec<MaskLayer>>,
    #[serde(default)]
    remote_image: Option<RemoteImage>,
    #[serde(default)]
    image_name: Option<String>,
    #[serde(default)]
    linear_gradient: Option<LinearGradientInfo>,
    #[serde(default)]
    color: Option<HexColor>,
    #[serde(default)]
    cropped: Option<bool>,
}

impl TryFrom<LayerDef> for Layer {
    type Error = String;

    fn try_from(def: LayerDef) -> Result<Self, Self::Error> {
        let size = match (def.size, def.intrinsic_size) {
            (Some(s), _) => SizeType::Normal(s),
            (None, Some(i)) => SizeType::Intrinsic(i),
            (None, None) => {
                return Err("expected either 'size' or 'intrinsic_size'".to_owned());
            }
        };

        let kind = if let Some(r) = def.remote_image {
            LayerKind::RemoteImage(r)
        } else if let Some(name) = def.image_name {
            LayerKind::LocalImage(name)
        } else if let Some(g) = def.linear_gradient {
            LayerKind::LinearGradient(g)
        } else if let Some(c) = def.color {
            LayerKind::Color(c)
        } else if let Some(cropped) = def.cropped {
            LayerKind::MaskedImage { cropped }
        } else {
            LayerKind::Undetermined
        };

        Ok(Self {
            layer_type: def.layer_type,
            kind,
            size,
            position: def.position,
            mask_layers: def.mask_layers,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalConstraint {
    pub alignment: HorizontalAlignment,
    /// Fraction of the container's width.
    #[serde(default)]
    pub offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalConstraint {
    pub alignment: VerticalAlignment,
    /// Fraction of the container's height.
    #[serde(default)]
    pub offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    pub horizontal: HorizontalConstraint,
    pub vertical: VerticalConstraint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Normalized point naming the element's center.
    Center(Point),
    /// Normalized point naming the element's origin.
    Origin(Point),
    Relative(Alignment),
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            #[serde(default)]
            center: Option<Point>,
            #[serde(default)]
            origin: Option<Point>,
            #[serde(default)]
            relative: Option<Alignment>,
        }

        let r = Repr::deserialize(deserializer)?;
        if let Some(p) = r.center {
            Ok(Self::Center(p))
        } else if let Some(p) = r.origin {
            Ok(Self::Origin(p))
        } else if let Some(a) = r.relative {
            Ok(Self::Relative(a))
        } else {
            Err(serde::de::Error::custom(
                "expected one of 'center', 'origin' or 'relative' in 'position'",
            ))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskBlendMode {
    #[default]
    Normal,
    /// Erases coverage drawn by earlier masks.
    Clear,
}

/// Which corners of a rounded rectangle get a radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corners {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl Corners {
    pub const ALL: Self = Self {
        top_left: true,
        top_right: true,
        bottom_left: true,
        bottom_right: true,
    };

    /// Parses `topLeft`-style names. Absent, empty or all-unknown selects every corner.
    pub fn from_names(names: Option<&[String]>) -> Self {
        let Some(names) = names else {
            return Self::ALL;
        };
        let mut out = Self {
            top_left: false,
            top_right: false,
            bottom_left: false,
            bottom_right: false,
        };
        let mut any = false;
        for name in names {
            let slot = match name.as_str() {
                "topLeft" => &mut out.top_left,
                "topRight" => &mut out.top_right,
                "bottomLeft" => &mut out.bottom_left,
                "bottomRight" => &mut out.bottom_right,
                _ => continue,
            };
            *slot = true;
            any = true;
        }
        if any { out } else { Self::ALL }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MaskKind {
    RemoteImage(RemoteImage),
    LocalImage(String),
    Circle,
    Rectangle,
    RoundedRectangle {
        /// Radii as fractions of the mask rect.
        corner_radii: Size2D,
        round_corners: Option<Vec<String>>,
    },
    Oval,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "MaskLayerDef")]
pub struct MaskLayer {
    pub kind: MaskKind,
    pub size: Size2D,
    pub position: Position,
    pub blend_mode: MaskBlendMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MaskLayerType {
    RemoteImage,
    LocalImage,
    Rectangle,
    Circle,
    RoundedRectangle,
    Oval,
}

#[derive(Deserialize)]
struct MaskLayerDef {
    #[serde(rename = "type")]
    mask_type: MaskLayerType,
    size: Size2D,
    position: Position,
    blend_mode: MaskBlendMode,
    #[serde(default)]
    image_name: Option<String>,
    #[serde(default)]
    remote_image: Option<RemoteImage>,
    #[serde(default)]
    corner_radii: Option<Size2D>,
    #[serde(default)]
    round_corners: Option<Vec<String>>,
}

impl TryFrom<MaskLayerDef> for MaskLayer {
    type Error = String;

    fn try_from(def: MaskLayerDef) -> Result<Self, Self::Error> {
        let kind = match def.mask_type {
            MaskLayerType::Circle => MaskKind::Circle,
            MaskLayerType::Rectangle => MaskKind::Rectangle,
            MaskLayerType::Oval => MaskKind::Oval,
            MaskLayerType::LocalImage => MaskKind::LocalImage(
                def.image_name
                    .ok_or("local_image mask requires 'image_name'")?,
            ),
            MaskLayerType::RemoteImage => MaskKind::RemoteImage(
                def.remote_image
                    .ok_or("remote_image mask requires 'remote_image'")?,
            ),
            MaskLayerType::RoundedRectangle => MaskKind::RoundedRectangle {
                corner_radii: def
                    .corner_radii
                    .ok_or("rounded_rectangle mask requires 'corner_radii'")?,
                round_corners: def.round_corners,
            },
        };

        Ok(Self {
            kind,
            size: def.size,
            position: def.position,
            blend_mode: def.blend_mode,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/model.rs"]
mod tests;
