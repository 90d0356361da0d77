use serde::{Deserialize, Serialize};

use crate::foundation::error::CanvasError;

/// Built-in template archetypes, named by their JSON file stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TemplateDesign {
    #[serde(rename = "01.plain-background")]
    PlainBackground,
    #[serde(rename = "02.full-circle-frame")]
    FullCircleFrame,
    #[serde(rename = "03.medium-circle-frame-half-open")]
    MediumCircleFrameHalfOpen,
    #[serde(rename = "04.background-circle-brush")]
    BackgroundCircleBrush,
    #[serde(rename = "05.frame-circle-brush-half-open")]
    FrameCircleBrushHalfOpen,
    #[serde(rename = "06.frame-brush-2-half-open")]
    FrameBrush2HalfOpen,
    #[serde(rename = "07.background-human-shape-brush")]
    BackgroundHumanShapeBrush,
    #[serde(rename = "08.full-circle-frame-splash-overlay")]
    FullCircleFrameSplashOverlay,
    #[serde(rename = "09.medium-rounded-rect-frame-half-open")]
    MediumRoundedRectFrameHalfOpen,
    #[serde(rename = "10.full-circle-frame-double-bg-layers")]
    FullCircleFrameDoubleBackgrounds,
}

impl TemplateDesign {
    pub const ALL: [Self; 10] = [
        Self::PlainBackground,
        Self::FullCircleFrame,
        Self::MediumCircleFrameHalfOpen,
        Self::BackgroundCircleBrush,
        Self::FrameCircleBrushHalfOpen,
        Self::FrameBrush2HalfOpen,
        Self::BackgroundHumanShapeBrush,
        Self::FullCircleFrameSplashOverlay,
        Self::MediumRoundedRectFrameHalfOpen,
        Self::FullCircleFrameDoubleBackgrounds,
    ];

    pub fn all() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    pub fn stem(self) -> &'static str {
        match self {
            Self::PlainBackground => "01.plain-background",
            Self::FullCircleFrame => "02.full-circle-frame",
            Self::MediumCircleFrameHalfOpen => "03.medium-circle-frame-half-open",
            Self::BackgroundCircleBrush => "04.background-circle-brush",
            Self::FrameCircleBrushHalfOpen => "05.frame-circle-brush-half-open",
            Self::FrameBrush2HalfOpen => "06.frame-brush-2-half-open",
            Self::BackgroundHumanShapeBrush => "07.background-human-shape-brush",
            Self::FullCircleFrameSplashOverlay => "08.full-circle-frame-splash-overlay",
            Self::MediumRoundedRectFrameHalfOpen => "09.medium-rounded-rect-frame-half-open",
            Self::FullCircleFrameDoubleBackgrounds => "10.full-circle-frame-double-bg-layers",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.stem())
    }
}

impl std::fmt::Display for TemplateDesign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.stem())
    }
}

/// Accepts the full stem (`02.full-circle-frame`) or the part after the number.
impl std::str::FromStr for TemplateDesign {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|d| {
                let stem = d.stem();
                stem == s || stem.split_once('.').is_some_and(|(_, name)| name == s)
            })
            .ok_or_else(|| CanvasError::template(format!("unknown template design '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/design.rs"]
mod tests;
