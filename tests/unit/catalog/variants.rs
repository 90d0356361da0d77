use super::*;
use crate::template::model::LayerType;

fn result() -> SegmentationResult {
    SegmentationResult {
        image: Arc::new(image::RgbaImage::new(8, 8)),
        cropped: Arc::new(image::RgbaImage::new(4, 6)),
    }
}

#[test]
fn default_plan_keeps_the_curated_ranges() {
    let plan = VariantPlan::default();
    let ranges: Vec<(TemplateDesign, [usize; 2], [usize; 2])> = plan
        .variants
        .iter()
        .map(|v| (v.design, v.colors, v.gradients))
        .collect();
    assert_eq!(
        ranges,
        vec![
            (TemplateDesign::PlainBackground, [0, 3], [0, 3]),
            (TemplateDesign::FullCircleFrame, [4, 7], [4, 7]),
            (TemplateDesign::MediumCircleFrameHalfOpen, [7, 9], [7, 10]),
            (TemplateDesign::MediumRoundedRectFrameHalfOpen, [6, 8], [10, 13]),
            (TemplateDesign::BackgroundCircleBrush, [8, 10], [11, 14]),
            (TemplateDesign::FrameCircleBrushHalfOpen, [2, 4], [11, 14]),
            (TemplateDesign::FrameBrush2HalfOpen, [6, 9], [9, 15]),
            (TemplateDesign::FullCircleFrameSplashOverlay, [7, 9], [7, 11]),
        ]
    );
    assert!(plan.variants.iter().all(|v| v.layer_index == 0));
}

#[test]
fn full_circle_variants_swap_the_background() {
    let catalog = Catalog::builtin();
    let spec = &VariantPlan::default().variants[1];
    let base = ImageTemplate::from_result(
        catalog.template(TemplateDesign::FullCircleFrame).unwrap().clone(),
        &result(),
    );
    let variants = catalog.variants(spec, &base);
    assert_eq!(variants.len(), 8);
    assert_eq!(
        variants[0].template.layers[0].kind,
        LayerKind::Color(HexColor::new("BF2A70"))
    );
    assert_eq!(
        variants[3].template.layers[0].kind,
        LayerKind::Color(HexColor::new("F27F3D"))
    );
    assert_eq!(
        variants[4].template.layers[0].kind,
        LayerKind::LinearGradient(catalog.gradients()[4].clone())
    );
    for v in &variants {
        assert_eq!(v.template.layers[1..], base.template.layers[1..]);
        assert_eq!(v.template.layers[0].masks(), base.template.layers[0].masks());
    }
}

#[test]
fn ranges_are_clipped_to_the_pools() {
    let catalog = Catalog::builtin();
    let spec = VariantSpec {
        design: TemplateDesign::PlainBackground,
        layer_index: 0,
        colors: [9, 40],
        gradients: [50, 60],
        gradient_alpha: None,
    };
    assert_eq!(catalog.variant_count(&spec), 2);

    let reversed = VariantSpec {
        colors: [3, 1],
        ..spec.clone()
    };
    assert_eq!(catalog.variant_count(&reversed), 0);
}

#[test]
fn gradient_alpha_and_layer_index_come_from_the_plan() {
    let plan = VariantPlan::from_json(
        br#"{"variants":[{"design":"10.full-circle-frame-double-bg-layers","layer_index":1,
             "colors":[0,0],"gradients":[5,5],"gradient_alpha":0.2}]}"#,
    )
    .unwrap();
    let catalog = Catalog::builtin();
    let designs = catalog.masked_designs(&plan, &result());
    assert_eq!(designs.len(), 2);
    let LayerKind::LinearGradient(g) = &designs[1].template.layers[1].kind else {
        panic!("expected a gradient layer");
    };
    assert!(g.stops.iter().all(|s| s.color.alpha == 0.2));
    assert_eq!(designs[0].template.layers[0], {
        let t = catalog
            .template(TemplateDesign::FullCircleFrameDoubleBackgrounds)
            .unwrap();
        t.layers[0].clone()
    });
}

#[test]
fn templates_for_starts_with_the_original_design() {
    let catalog = Catalog::builtin();
    let plan = VariantPlan::default();
    let original = Arc::new(image::RgbaImage::new(10, 10));

    let before = catalog.templates_for(&plan, &original, None);
    assert_eq!(before.len(), 1);
    assert!(Arc::ptr_eq(&before[0].cutout, &original));
    assert_eq!(
        before[0].template.layers[0].kind,
        LayerKind::Color(HexColor::new("000000"))
    );

    let after = catalog.templates_for(&plan, &original, Some(&result()));
    let expected: usize = plan.variants.iter().map(|s| catalog.variant_count(s)).sum();
    assert_eq!(expected, 63);
    assert_eq!(after.len(), 1 + expected);
    assert_eq!(
        after[1].template.layers[0].layer_type,
        LayerType::Background
    );
}

#[test]
fn missing_archetypes_yield_no_designs() {
    let catalog = Catalog::default();
    let original = Arc::new(image::RgbaImage::new(1, 1));
    assert!(catalog.original_image_designs(&original).is_empty());
    assert!(
        catalog
            .templates_for(&VariantPlan::default(), &original, Some(&result()))
            .is_empty()
    );
}
