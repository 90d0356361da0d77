#![forbid(unsafe_code)]

mod assets;
mod canvas;
mod catalog;
mod foundation;
mod raster;
mod segmentation;
mod template;

pub use assets::decode::{
    decode_image, parse_svg, prepare_rgba_image, rasterize_svg_to_premul_rgba8, to_rgba_image,
};
pub use assets::store::{AssetStore, LocalAsset, PreparedImage, PreparedSvg};
pub use canvas::element::{ElementContent, ElementId, ElementSpec, MovableElement};
pub use canvas::engine::{Canvas, CanvasEvent, CanvasOpts};
pub use canvas::gesture::{
    GestureEvent, GesturePhase, RecognizerKind, RecognizerState, Recognizers,
    should_recognize_simultaneously,
};
pub use canvas::layers::layer_label;
pub use canvas::snap::{is_axis_aligned, snap_position, snap_rotation, snap_scale};
pub use canvas::snapshot::{
    CanvasSnapshot, ContentSnapshot, ElementSnapshot, MaskSnapshot, SNAPSHOT_VERSION,
};
pub use catalog::store::decode_gradients;
pub use catalog::{
    Catalog, CatalogSource, ImageTemplate, PALETTE, TemplateDesign, VariantPlan, VariantSpec,
    palette,
};
pub use foundation::core::{Affine, BezPath, Point, Rect, Rgba8Premul, Size, Transform, Vec2};
pub use foundation::error::{CanvasError, CanvasResult};
pub use raster::flatten::{FrameRGBA, flatten};
pub use raster::mask::{AlphaMask, rasterize_mask};
pub use raster::paint::{apply_mask, paint_color, paint_gradient};
pub use segmentation::{
    DetectionCounts, MaskFn, MaskedSegmenter, SegmentationCache, SegmentationError,
    SegmentationMode, SegmentationResult, SegmentationService, crop_transparent,
    isolate_with_mask,
};
pub use template::color::{GradientStop, HexColor, LinearGradientInfo};
pub use template::model::{
    Alignment, Corners, HorizontalAlignment, HorizontalConstraint, IntrinsicSize, Layer,
    LayerKind, LayerType, MaskBlendMode, MaskKind, MaskLayer, Position, RemoteImage, Size2D,
    SizeType, Template, VerticalAlignment, VerticalConstraint,
};
pub use template::resolve::{
    ResolvedLayer, resolve_center, resolve_layer, resolve_origin, resolve_rect, resolve_size,
};
