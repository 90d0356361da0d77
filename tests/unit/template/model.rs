use super::*;

fn layer(json: &str) -> Result<Layer, serde_json::Error> {
    serde_json::from_str(json)
}

#[test]
fn size_is_preferred_over_intrinsic_size() {
    let l = layer(
        r#"{"type":"person","cropped":true,
            "size":{"width":0.5,"height":0.4},
            "intrinsic_size":{"ratio":0.8},
            "position":{"center":{"x":0.5,"y":0.5}}}"#,
    )
    .unwrap();
    assert_eq!(
        l.size,
        SizeType::Normal(Size2D {
            width: 0.5,
            height: 0.4
        })
    );
    assert!(l.is_cropped());
}

#[test]
fn missing_size_is_a_decode_error() {
    let err = layer(r#"{"type":"frame","color":"FFFFFF","position":{"center":{"x":0.5,"y":0.5}}}"#)
        .unwrap_err();
    assert!(
        err.to_string()
            .contains("expected either 'size' or 'intrinsic_size'")
    );
}

#[test]
fn missing_position_kind_is_a_decode_error() {
    let err = layer(r#"{"type":"frame","size":{"width":1,"height":1},"position":{}}"#)
        .unwrap_err();
    assert!(err.to_string().contains("'center', 'origin' or 'relative'"));
}

#[test]
fn kind_discriminators_follow_priority_order() {
    let l = layer(
        r#"{"type":"background","size":{"width":1,"height":1},
            "position":{"origin":{"x":0,"y":0}},
            "image_name":"brush","color":"FFFFFF"}"#,
    )
    .unwrap();
    assert_eq!(l.kind, LayerKind::LocalImage("brush".to_owned()));

    let l = layer(
        r#"{"type":"none","size":{"width":1,"height":1},
            "position":{"origin":{"x":0,"y":0}}}"#,
    )
    .unwrap();
    assert_eq!(l.kind, LayerKind::Undetermined);
    assert!(!l.is_cropped());

    let l = layer(
        r#"{"type":"background","size":{"width":1,"height":1},
            "position":{"origin":{"x":0,"y":0}},
            "remote_image":{"url":"https://example.invalid/a.png","width":626,"height":626},
            "cropped":false}"#,
    )
    .unwrap();
    assert!(matches!(l.kind, LayerKind::RemoteImage(ref r) if r.width == 626));
}

#[test]
fn relative_position_offsets_default_to_zero() {
    let p: Position = serde_json::from_str(
        r#"{"relative":{"horizontal":{"alignment":"right"},
                        "vertical":{"alignment":"bottom","offset":-0.1}}}"#,
    )
    .unwrap();
    let Position::Relative(a) = p else {
        panic!("expected relative position");
    };
    assert_eq!(a.horizontal.alignment, HorizontalAlignment::Right);
    assert_eq!(a.horizontal.offset, 0.0);
    assert_eq!(a.vertical.offset, -0.1);
}

#[test]
fn mask_layers_decode_with_required_payloads() {
    let m: MaskLayer = serde_json::from_str(
        r#"{"type":"rounded_rectangle","size":{"width":0.8,"height":0.8},
            "position":{"center":{"x":0.5,"y":0.5}},"blend_mode":"clear",
            "corner_radii":{"width":0.1,"height":0.1},"round_corners":["topLeft"]}"#,
    )
    .unwrap();
    assert_eq!(m.blend_mode, MaskBlendMode::Clear);
    assert!(matches!(m.kind, MaskKind::RoundedRectangle { .. }));

    let err = serde_json::from_str::<MaskLayer>(
        r#"{"type":"local_image","size":{"width":1,"height":1},
            "position":{"center":{"x":0.5,"y":0.5}},"blend_mode":"normal"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("image_name"));
}

#[test]
fn corner_selection_falls_back_to_all() {
    assert_eq!(Corners::from_names(None), Corners::ALL);
    assert_eq!(Corners::from_names(Some(&[])), Corners::ALL);
    assert_eq!(
        Corners::from_names(Some(&["nope".to_owned()])),
        Corners::ALL
    );
    let c = Corners::from_names(Some(&["topRight".to_owned(), "bottomLeft".to_owned()]));
    assert!(!c.top_left && c.top_right && c.bottom_left && !c.bottom_right);
}

#[test]
fn template_finds_first_person_layer_and_copies_on_edit() {
    let t = Template::from_json(
        br#"{"layers":[
            {"type":"background","color":"000000","size":{"width":1,"height":1},
             "position":{"center":{"x":0.5,"y":0.5}}},
            {"type":"person","cropped":false,"intrinsic_size":{"ratio":1},
             "position":{"center":{"x":0.5,"y":0.5}}}
        ]}"#,
    )
    .unwrap();
    assert_eq!(t.person_layer_index(), Some(1));
    assert!(t.person_layer().is_some());

    let bg = &t.layers[0];
    let swapped = bg.with_kind(LayerKind::Color(HexColor::new("FFFFFF")));
    assert_eq!(swapped.position, bg.position);
    assert_eq!(bg.kind, LayerKind::Color(HexColor::new("000000")));

    let err = Template::from_json(b"{}").unwrap_err();
    assert!(err.to_string().contains("template error:"));
}
