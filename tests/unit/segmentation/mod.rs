use super::*;

#[test]
fn suggestion_prefers_people_for_one_or_two_faces() {
    let counts = |faces, animals| DetectionCounts { faces, animals };
    assert_eq!(SegmentationMode::suggest(counts(1, 0)), SegmentationMode::People);
    assert_eq!(SegmentationMode::suggest(counts(2, 0)), SegmentationMode::People);
    assert_eq!(SegmentationMode::suggest(counts(0, 0)), SegmentationMode::Foreground);
    assert_eq!(SegmentationMode::suggest(counts(3, 0)), SegmentationMode::Foreground);
    assert_eq!(SegmentationMode::suggest(counts(1, 1)), SegmentationMode::Foreground);
}

#[test]
fn errors_carry_user_messages() {
    assert!(
        SegmentationError::NoFaceDetected
            .to_string()
            .starts_with("No human face detected.")
    );
    assert_eq!(
        SegmentationError::UnsupportedRequest.to_string(),
        "The requested operation is not supported."
    );
    assert_eq!(
        SegmentationError::Failure.to_string(),
        "Failed to perform segmentation."
    );
}

#[test]
fn mode_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&SegmentationMode::People).unwrap(),
        "\"people\""
    );
    assert_eq!(SegmentationMode::Foreground.to_string(), "foreground");
}

#[test]
fn result_from_cutout_crops() {
    let mut img = image::RgbaImage::new(8, 6);
    img.put_pixel(2, 1, image::Rgba([1, 2, 3, 255]));
    img.put_pixel(4, 3, image::Rgba([1, 2, 3, 255]));
    let result = SegmentationResult::from_cutout(img);
    assert_eq!(result.image.dimensions(), (8, 6));
    assert_eq!(result.cropped.dimensions(), (3, 3));
}

struct NoDetection;

#[async_trait::async_trait]
impl SegmentationService for NoDetection {
    async fn segment(
        &self,
        _image: Arc<image::RgbaImage>,
        _mode: SegmentationMode,
        _cache_key: &str,
    ) -> Result<SegmentationResult, SegmentationError> {
        Err(SegmentationError::UnsupportedRequest)
    }
}

#[tokio::test]
async fn default_suggestion_is_people() {
    let image = Arc::new(image::RgbaImage::new(1, 1));
    assert_eq!(
        NoDetection.suggest_mode(image, "k").await,
        SegmentationMode::People
    );
}
