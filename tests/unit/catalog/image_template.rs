use super::*;
use crate::catalog::{Catalog, TemplateDesign};
use crate::template::color::HexColor;

fn result() -> SegmentationResult {
    SegmentationResult {
        image: Arc::new(image::RgbaImage::new(8, 8)),
        cropped: Arc::new(image::RgbaImage::new(3, 5)),
    }
}

fn template(design: TemplateDesign) -> Template {
    Catalog::builtin().template(design).unwrap().clone()
}

fn red() -> LayerKind {
    LayerKind::Color(HexColor::new("FF0000"))
}

#[test]
fn cropped_person_layers_get_the_cropped_cutout() {
    let r = result();
    let cropped = ImageTemplate::from_result(template(TemplateDesign::FullCircleFrame), &r);
    assert!(Arc::ptr_eq(&cropped.cutout, &r.cropped));
    assert!(!cropped.is_loading);

    let full = ImageTemplate::from_result(template(TemplateDesign::PlainBackground), &r);
    assert!(Arc::ptr_eq(&full.cutout, &r.image));
    assert!(uuid::Uuid::parse_str(&full.id).is_ok());
}

#[test]
fn layer_edits_return_new_values() {
    let base = ImageTemplate::from_result(template(TemplateDesign::FullCircleFrame), &result());
    let edited = base.with_layer_kind_at(0, red());
    assert_ne!(edited.id, base.id);
    assert_eq!(edited.template.layers[0].kind, red());
    assert_ne!(base.template.layers[0].kind, red());
    assert_eq!(edited.template.layers[1], base.template.layers[1]);

    let same = base.with_layer_kind_at(99, red());
    assert_eq!(same.id, base.id);
    assert_eq!(same.template, base.template);
}

#[test]
fn edits_by_type_and_relative_to_person() {
    let base = ImageTemplate::from_result(template(TemplateDesign::FullCircleFrame), &result());
    let frames = base.with_layer_type_kind(LayerType::Frame, red());
    assert_eq!(frames.template.layers[2].kind, red());
    assert_ne!(frames.template.layers[0].kind, red());

    let below = base.with_person_previous_layer_kind(red());
    assert_eq!(below.template.layers[0].kind, red());

    let person_first = base.with_updates(
        Some(Template {
            layers: base.template.layers[1..].to_vec(),
        }),
        Some(true),
    );
    assert!(person_first.is_loading);
    let unchanged = person_first.with_person_previous_layer_kind(red());
    assert_eq!(unchanged.template, person_first.template);
}
