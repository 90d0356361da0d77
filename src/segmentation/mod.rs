//! The foreground segmentation collaborator and its result cache.
//!
//! The vision model itself lives outside this crate. Hosts implement [`SegmentationService`];
//! [`SegmentationCache`] makes sure one `(cache_key, mode)` pair is computed at most once.

pub(crate) mod cache;
pub(crate) mod crop;

use std::sync::Arc;

pub use cache::SegmentationCache;
pub use crop::{MaskFn, MaskedSegmenter, crop_transparent, isolate_with_mask};

use serde::{Deserialize, Serialize};

/// What to cut out of the photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentationMode {
    /// Every salient foreground instance: objects, people or animals.
    Foreground,
    /// People only, with finer edges.
    People,
}

impl SegmentationMode {
    /// Pick from face and animal counts: people only for one or two faces and no animals.
    pub fn suggest(counts: DetectionCounts) -> Self {
        if counts.animals > 0 || counts.faces == 0 || counts.faces > 2 {
            Self::Foreground
        } else {
            Self::People
        }
    }
}

impl std::fmt::Display for SegmentationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Foreground => "foreground",
            Self::People => "people",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetectionCounts {
    pub faces: usize,
    pub animals: usize,
}

/// Closed error set reported to the user. Display strings are user-facing.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationError {
    #[error("No human face detected. This option only works with images containing a human face.")]
    NoFaceDetected,

    #[error("The requested operation is not supported.")]
    UnsupportedRequest,

    #[error("Failed to perform segmentation.")]
    Failure,
}

/// A cutout at the photo's full size plus the same cutout cropped to its visible pixels.
#[derive(Debug, Clone)]
pub struct SegmentationResult {
    pub image: Arc<image::RgbaImage>,
    pub cropped: Arc<image::RgbaImage>,
}

impl SegmentationResult {
    /// Derives the cropped cutout from a full-size one.
    pub fn from_cutout(image: image::RgbaImage) -> Self {
        let cropped = crop::crop_transparent(&image);
        Self {
            image: Arc::new(image),
            cropped: Arc::new(cropped),
        }
    }
}

#[async_trait::async_trait]
pub trait SegmentationService: Send + Sync {
    /// Cuts the subject out of `image`. `cache_key` identifies the photo across calls.
    async fn segment(
        &self,
        image: Arc<image::RgbaImage>,
        mode: SegmentationMode,
        cache_key: &str,
    ) -> Result<SegmentationResult, SegmentationError>;

    /// Face and animal counts, when the service can detect them.
    async fn detect(
        &self,
        _image: Arc<image::RgbaImage>,
        _cache_key: &str,
    ) -> Option<DetectionCounts> {
        None
    }

    /// Mode that suits `image` best; [`SegmentationMode::People`] without detection support.
    async fn suggest_mode(
        &self,
        image: Arc<image::RgbaImage>,
        cache_key: &str,
    ) -> SegmentationMode {
        match self.detect(image, cache_key).await {
            Some(counts) => SegmentationMode::suggest(counts),
            None => SegmentationMode::People,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segmentation/mod.rs"]
mod tests;
