use super::*;

#[test]
fn stems_are_ordered_and_unique() {
    let stems: Vec<&str> = TemplateDesign::all().map(TemplateDesign::stem).collect();
    assert_eq!(stems.len(), 10);
    for (i, stem) in stems.iter().enumerate() {
        assert!(stem.starts_with(&format!("{:02}.", i + 1)), "{stem}");
    }
}

#[test]
fn parses_full_and_short_names() {
    assert_eq!(
        "02.full-circle-frame".parse::<TemplateDesign>().unwrap(),
        TemplateDesign::FullCircleFrame
    );
    assert_eq!(
        "frame-brush-2-half-open".parse::<TemplateDesign>().unwrap(),
        TemplateDesign::FrameBrush2HalfOpen
    );
    let err = "circle".parse::<TemplateDesign>().unwrap_err();
    assert!(err.to_string().contains("unknown template design 'circle'"));
}

#[test]
fn serde_uses_the_stem() {
    let json = serde_json::to_string(&TemplateDesign::BackgroundCircleBrush).unwrap();
    assert_eq!(json, "\"04.background-circle-brush\"");
    let back: TemplateDesign = serde_json::from_str(&json).unwrap();
    assert_eq!(back, TemplateDesign::BackgroundCircleBrush);
    assert_eq!(TemplateDesign::PlainBackground.file_name(), "01.plain-background.json");
}
