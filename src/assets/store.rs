use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode;
use crate::foundation::core::{Size, aspect_fit};
use crate::foundation::error::{CanvasError, CanvasResult};

#[derive(Clone, Debug)]
/// Raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Alpha channel at pixel `(x, y)`, zero outside the image.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4 + 3;
        self.rgba8_premul.get(i).copied().unwrap_or(0)
    }
}

#[derive(Clone, Debug)]
/// SVG asset represented as a parsed `usvg` tree.
pub struct PreparedSvg {
    /// Parsed SVG tree.
    pub tree: Arc<usvg::Tree>,
}

#[derive(Clone, Debug)]
pub enum LocalAsset {
    Image(PreparedImage),
    Svg(PreparedSvg),
}

const BUILTIN_ASSETS: &[(&str, &[u8])] = &[
    (
        "circle-brush.svg",
        include_bytes!("../../templates/assets/circle-brush.svg"),
    ),
    (
        "frame-circle-brush.svg",
        include_bytes!("../../templates/assets/frame-circle-brush.svg"),
    ),
    (
        "frame-brush-2.svg",
        include_bytes!("../../templates/assets/frame-brush-2.svg"),
    ),
    (
        "human-shape-brush.svg",
        include_bytes!("../../templates/assets/human-shape-brush.svg"),
    ),
    (
        "splash-overlay.svg",
        include_bytes!("../../templates/assets/splash-overlay.svg"),
    ),
];

/// Resolves local image names used by templates (`image_name` layers and `local_image` masks).
///
/// A name without extension is looked up as `<name>.png`, then `<name>.svg`, then verbatim.
/// In-memory entries win over files under `root`.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    root: Option<PathBuf>,
    memory: HashMap<String, Arc<[u8]>>,
}

impl AssetStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store holding the brush images shipped with the built-in templates.
    pub fn builtin() -> Self {
        let mut store = Self::empty();
        for (name, bytes) in BUILTIN_ASSETS {
            store.memory.insert((*name).to_owned(), Arc::from(*bytes));
        }
        store
    }

    /// Built-in brushes plus files under `root`.
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::builtin()
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn with_bytes(mut self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.memory.insert(name.into(), bytes.into());
        self
    }

    #[tracing::instrument(skip(self))]
    pub fn load(&self, name: &str) -> CanvasResult<LocalAsset> {
        let name = normalize_rel_path(name)?;
        for candidate in candidates(&name) {
            if let Some(bytes) = self.memory.get(&candidate) {
                return decode_named(&candidate, bytes);
            }
            if let Some(root) = &self.root {
                let path = root.join(&candidate);
                if path.is_file() {
                    let bytes = std::fs::read(&path).map_err(|e| {
                        CanvasError::asset(format!("read \"{}\": {e}", path.display()))
                    })?;
                    return decode_named(&candidate, &bytes);
                }
            }
        }
        Err(CanvasError::asset(format!("no local image named \"{name}\"")))
    }

    /// Loads `name` as premultiplied pixels. SVGs are rendered at the largest size with their
    /// own aspect that fits `width`×`height`; raster images keep their own dimensions.
    pub fn prepare_image(&self, name: &str, width: u32, height: u32) -> CanvasResult<PreparedImage> {
        match self.load(name)? {
            LocalAsset::Image(img) => Ok(img),
            LocalAsset::Svg(svg) => {
                let tree = svg.tree.size();
                let fit = aspect_fit(
                    Size::new(f64::from(tree.width()), f64::from(tree.height())),
                    Size::new(f64::from(width), f64::from(height)),
                );
                let w = (fit.width().round() as u32).max(1);
                let h = (fit.height().round() as u32).max(1);
                decode::rasterize_svg_to_premul_rgba8(&svg.tree, w, h)
            }
        }
    }
}

fn candidates(name: &str) -> Vec<String> {
    let has_ext = Path::new(name).extension().is_some();
    if has_ext {
        vec![name.to_owned()]
    } else {
        vec![format!("{name}.png"), format!("{name}.svg"), name.to_owned()]
    }
}

fn decode_named(name: &str, bytes: &[u8]) -> CanvasResult<LocalAsset> {
    let is_svg = name.to_ascii_lowercase().ends_with(".svg") || looks_like_svg(bytes);
    if is_svg {
        decode::parse_svg(bytes).map(LocalAsset::Svg)
    } else {
        decode::decode_image(bytes).map(LocalAsset::Image)
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start();
    head.starts_with("<svg") || head.starts_with("<?xml")
}

/// Normalize and validate store-relative asset names.
///
/// The result uses `/` separators, drops `.` segments and rejects absolute paths or parent
/// traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> CanvasResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(CanvasError::asset("asset names must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(CanvasError::asset("asset names must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(CanvasError::asset("asset name must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
