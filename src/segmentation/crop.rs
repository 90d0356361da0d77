use std::sync::Arc;

use image::{GrayImage, RgbaImage};

use crate::foundation::math::mul_div255_u8;
use crate::segmentation::{
    DetectionCounts, SegmentationError, SegmentationMode, SegmentationResult, SegmentationService,
};

/// Crops `image` to the bounding box of its non-transparent pixels.
///
/// A fully transparent image is returned unchanged.
pub fn crop_transparent(image: &RgbaImage) -> RgbaImage {
    let (w, h) = image.dimensions();
    let mut min = (w, h);
    let mut max = (0, 0);
    let mut any = false;
    for (x, y, px) in image.enumerate_pixels() {
        if px.0[3] == 0 {
            continue;
        }
        any = true;
        min = (min.0.min(x), min.1.min(y));
        max = (max.0.max(x), max.1.max(y));
    }
    if !any {
        return image.clone();
    }
    image::imageops::crop_imm(image, min.0, min.1, max.0 - min.0 + 1, max.1 - min.1 + 1)
        .to_image()
}

/// Keeps the pixels of `image` where `mask` is set, scaling the mask to the image size
/// (nearest neighbour). Straight alpha is multiplied by the mask value.
pub fn isolate_with_mask(image: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    let (w, h) = image.dimensions();
    let (mw, mh) = mask.dimensions();
    let mut out = image.clone();
    if mw == 0 || mh == 0 {
        out.pixels_mut().for_each(|px| px.0 = [0, 0, 0, 0]);
        return out;
    }
    for (x, y, px) in out.enumerate_pixels_mut() {
        let mx = (u64::from(x) * u64::from(mw) / u64::from(w)) as u32;
        let my = (u64::from(y) * u64::from(mh) / u64::from(h)) as u32;
        let m = mask.get_pixel(mx.min(mw - 1), my.min(mh - 1)).0[0];
        px.0[3] = mul_div255_u8(u16::from(px.0[3]), u16::from(m));
        if px.0[3] == 0 {
            px.0 = [0, 0, 0, 0];
        }
    }
    out
}

/// Produces a foreground mask for an image.
pub type MaskFn =
    dyn Fn(&RgbaImage, SegmentationMode) -> Result<GrayImage, SegmentationError> + Send + Sync;

type DetectFn = dyn Fn(&RgbaImage) -> DetectionCounts + Send + Sync;

/// [`SegmentationService`] over a synchronous mask producer, run on the blocking pool.
///
/// With a detector attached, [`SegmentationMode::People`] fails with
/// [`SegmentationError::NoFaceDetected`] when no face is found.
#[derive(Clone)]
pub struct MaskedSegmenter {
    mask: Arc<MaskFn>,
    detector: Option<Arc<DetectFn>>,
}

impl std::fmt::Debug for MaskedSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskedSegmenter")
            .field("detector", &self.detector.is_some())
            .finish_non_exhaustive()
    }
}

impl MaskedSegmenter {
    pub fn new(
        mask: impl Fn(&RgbaImage, SegmentationMode) -> Result<GrayImage, SegmentationError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            mask: Arc::new(mask),
            detector: None,
        }
    }

    /// Uses the image's own alpha channel as the mask, for photos that are already cut out.
    pub fn from_alpha() -> Self {
        Self::new(|image, _| {
            let (w, h) = image.dimensions();
            Ok(GrayImage::from_fn(w, h, |x, y| {
                image::Luma([image.get_pixel(x, y).0[3]])
            }))
        })
    }

    pub fn with_detector(
        mut self,
        detector: impl Fn(&RgbaImage) -> DetectionCounts + Send + Sync + 'static,
    ) -> Self {
        self.detector = Some(Arc::new(detector));
        self
    }
}

#[async_trait::async_trait]
impl SegmentationService for MaskedSegmenter {
    async fn segment(
        &self,
        image: Arc<RgbaImage>,
        mode: SegmentationMode,
        cache_key: &str,
    ) -> Result<SegmentationResult, SegmentationError> {
        if mode == SegmentationMode::People
            && let Some(counts) = self.detect(Arc::clone(&image), cache_key).await
            && counts.faces == 0
        {
            return Err(SegmentationError::NoFaceDetected);
        }

        let mask_fn = Arc::clone(&self.mask);
        let joined = tokio::task::spawn_blocking(move || {
            let mask = mask_fn(&image, mode)?;
            let (w, h) = image.dimensions();
            if w == 0 || h == 0 {
                return Err(SegmentationError::Failure);
            }
            Ok(SegmentationResult::from_cutout(isolate_with_mask(&image, &mask)))
        })
        .await;
        match joined {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(%cache_key, %err, "segmentation task failed");
                Err(SegmentationError::Failure)
            }
        }
    }

    async fn detect(&self, image: Arc<RgbaImage>, _cache_key: &str) -> Option<DetectionCounts> {
        let detector = self.detector.as_ref()?;
        Some(detector(&image))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segmentation/crop.rs"]
mod tests;
