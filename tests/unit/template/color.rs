use super::*;

#[test]
fn hex_color_accepts_object_and_bare_string() {
    let c: HexColor = serde_json::from_str(r#"{"hex":"5BB5D9","alpha":0.5}"#).unwrap();
    assert_eq!(c.hex, "5BB5D9");
    assert_eq!(c.alpha, 0.5);

    let c: HexColor = serde_json::from_str(r##""#F27F3D""##).unwrap();
    assert_eq!(c.alpha, 1.0);
    assert_eq!(c.to_rgba8(), Some([0xF2, 0x7F, 0x3D, 255]));

    let c: HexColor = serde_json::from_str(r#"{"hex":"000000"}"#).unwrap();
    assert_eq!(c.alpha, 1.0);
}

#[test]
fn hex_color_requires_six_digits() {
    assert_eq!(HexColor::new("FFF").to_rgba8(), None);
    assert_eq!(HexColor::new("GG0000").to_rgba8(), None);
    assert_eq!(HexColor::new("FFFFFFFF").to_rgba8(), None);
    assert_eq!(
        HexColor::new("ffffff").with_alpha(0.0).to_rgba8(),
        Some([255, 255, 255, 0])
    );
}

#[test]
fn gradient_with_alpha_replaces_every_stop() {
    let g: LinearGradientInfo = serde_json::from_str(
        r#"{
            "start_point": {"x": 0.0, "y": 0.0},
            "end_point": {"x": 1.0, "y": 1.0},
            "stops": [
                {"color": {"hex": "FFFFFF", "alpha": 1}, "position": 0},
                {"color": {"hex": "000000", "alpha": 0.3}, "position": 1}
            ]
        }"#,
    )
    .unwrap();
    let faded = g.with_alpha(0.25);
    assert!(faded.stops.iter().all(|s| s.color.alpha == 0.25));
    assert_eq!(faded.stops[1].color.hex, "000000");
    assert_eq!(faded.start_point, g.start_point);
    assert_eq!(g.stops[0].color.alpha, 1.0);
}

#[test]
fn gradient_sample_interpolates_and_clamps() {
    let g = LinearGradientInfo {
        start_point: Point::new(0.0, 0.0),
        end_point: Point::new(1.0, 0.0),
        stops: vec![
            GradientStop {
                color: HexColor::new("000000"),
                position: 0.0,
            },
            GradientStop {
                color: HexColor::new("FFFFFF"),
                position: 1.0,
            },
        ],
    };
    assert_eq!(g.sample(-1.0).unwrap().r, 0);
    assert_eq!(g.sample(2.0).unwrap().r, 255);
    let mid = g.sample(0.5).unwrap();
    assert_eq!(mid.a, 255);
    assert!((127..=128).contains(&mid.r));

    let empty = LinearGradientInfo {
        stops: vec![],
        ..g.clone()
    };
    assert!(empty.sample(0.5).is_none());
}

#[test]
fn resolved_stops_skip_invalid_colors_and_sample_like_the_gradient() {
    let g = LinearGradientInfo {
        start_point: Point::new(0.0, 0.0),
        end_point: Point::new(0.0, 1.0),
        stops: vec![
            GradientStop {
                color: HexColor::new("FF0000"),
                position: 0.0,
            },
            GradientStop {
                color: HexColor::new("nope"),
                position: 0.5,
            },
            GradientStop {
                color: HexColor::new("0000FF").with_alpha(0.5),
                position: 1.0,
            },
        ],
    };
    let stops = g.resolved_stops();
    assert_eq!(stops, vec![(0.0, [255, 0, 0, 255]), (1.0, [0, 0, 255, 128])]);
    for t in [-0.5, 0.0, 0.25, 0.5, 0.9, 1.0, 3.0] {
        assert_eq!(sample_stops(&stops, t), g.sample(t), "t = {t}");
    }
    assert!(sample_stops(&[], 0.5).is_none());
}
