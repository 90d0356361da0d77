//! Template archetypes, the shared color and gradient pools, and the variant plan that mixes
//! them into the list of designs offered for a cutout.

pub(crate) mod design;
pub(crate) mod image_template;
pub(crate) mod palette;
pub(crate) mod store;
pub(crate) mod variants;

pub use design::TemplateDesign;
pub use image_template::ImageTemplate;
pub use palette::{PALETTE, palette};
pub use store::{Catalog, CatalogSource};
pub use variants::{VariantPlan, VariantSpec};
