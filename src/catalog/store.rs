use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::catalog::design::TemplateDesign;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::template::color::LinearGradientInfo;
use crate::template::model::Template;

pub(crate) const GRADIENT_LIST_FILE: &str = "gradient-list.json";

const BUILTIN_FILES: &[(&str, &[u8])] = &[
    (
        "01.plain-background.json",
        include_bytes!("../../templates/01.plain-background.json"),
    ),
    (
        "02.full-circle-frame.json",
        include_bytes!("../../templates/02.full-circle-frame.json"),
    ),
    (
        "03.medium-circle-frame-half-open.json",
        include_bytes!("../../templates/03.medium-circle-frame-half-open.json"),
    ),
    (
        "04.background-circle-brush.json",
        include_bytes!("../../templates/04.background-circle-brush.json"),
    ),
    (
        "05.frame-circle-brush-half-open.json",
        include_bytes!("../../templates/05.frame-circle-brush-half-open.json"),
    ),
    (
        "06.frame-brush-2-half-open.json",
        include_bytes!("../../templates/06.frame-brush-2-half-open.json"),
    ),
    (
        "07.background-human-shape-brush.json",
        include_bytes!("../../templates/07.background-human-shape-brush.json"),
    ),
    (
        "08.full-circle-frame-splash-overlay.json",
        include_bytes!("../../templates/08.full-circle-frame-splash-overlay.json"),
    ),
    (
        "09.medium-rounded-rect-frame-half-open.json",
        include_bytes!("../../templates/09.medium-rounded-rect-frame-half-open.json"),
    ),
    (
        "10.full-circle-frame-double-bg-layers.json",
        include_bytes!("../../templates/10.full-circle-frame-double-bg-layers.json"),
    ),
    (
        GRADIENT_LIST_FILE,
        include_bytes!("../../templates/gradient-list.json"),
    ),
];

/// Where archetype JSON and the gradient list come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Files compiled into the crate.
    Builtin,
    /// `<stem>.json` files and `gradient-list.json` in a directory.
    Dir(PathBuf),
}

impl CatalogSource {
    fn read(&self, file_name: &str) -> CanvasResult<Cow<'static, [u8]>> {
        match self {
            Self::Builtin => BUILTIN_FILES
                .iter()
                .find(|(name, _)| *name == file_name)
                .map(|(_, bytes)| Cow::Borrowed(*bytes))
                .ok_or_else(|| CanvasError::template(format!("no built-in file '{file_name}'"))),
            Self::Dir(root) => {
                let path = root.join(file_name);
                std::fs::read(&path).map(Cow::Owned).map_err(|e| {
                    CanvasError::template(format!("read '{}': {e}", path.display()))
                })
            }
        }
    }
}

/// Decoded archetypes plus the gradient pool.
///
/// Loading never fails as a whole: an archetype that cannot be read or decoded is left out
/// and a broken gradient list leaves the pool empty.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    templates: BTreeMap<TemplateDesign, Template>,
    gradients: Vec<LinearGradientInfo>,
}

impl Catalog {
    #[tracing::instrument]
    pub fn load(source: &CatalogSource) -> Self {
        let mut templates = BTreeMap::new();
        for design in TemplateDesign::all() {
            let decoded = source
                .read(&design.file_name())
                .and_then(|bytes| Template::from_json(&bytes));
            match decoded {
                Ok(template) => {
                    templates.insert(design, template);
                }
                Err(err) => tracing::warn!(%design, %err, "template archetype skipped"),
            }
        }

        let gradients = source
            .read(GRADIENT_LIST_FILE)
            .and_then(|bytes| decode_gradients(&bytes))
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "gradient list unavailable");
                Vec::new()
            });

        tracing::debug!(
            templates = templates.len(),
            gradients = gradients.len(),
            "catalog loaded"
        );
        Self {
            templates,
            gradients,
        }
    }

    pub fn builtin() -> Self {
        Self::load(&CatalogSource::Builtin)
    }

    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self::load(&CatalogSource::Dir(root.into()))
    }

    pub fn template(&self, design: TemplateDesign) -> Option<&Template> {
        self.templates.get(&design)
    }

    /// Loaded archetypes in file order.
    pub fn designs(&self) -> impl Iterator<Item = TemplateDesign> + '_ {
        self.templates.keys().copied()
    }

    pub fn gradients(&self) -> &[LinearGradientInfo] {
        &self.gradients
    }
}

pub fn decode_gradients(bytes: &[u8]) -> CanvasResult<Vec<LinearGradientInfo>> {
    serde_json::from_slice(bytes)
        .map_err(|e| CanvasError::template(format!("parse gradient list: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/store.rs"]
mod tests;
