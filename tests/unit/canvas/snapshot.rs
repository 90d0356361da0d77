use super::*;
use crate::canvas::gesture::{GestureEvent, GesturePhase};

fn bounds() -> Rect {
    Rect::new(0.0, 0.0, 200.0, 200.0)
}

fn populated() -> Canvas {
    let mut canvas = Canvas::new(bounds());
    let bitmap = image::RgbaImage::from_fn(2, 2, |x, y| {
        image::Rgba([x as u8 * 100, y as u8 * 100, 7, 200])
    });
    canvas.add_element(
        ElementSpec::new(
            ElementContent::Image {
                bitmap: Arc::new(bitmap),
            },
            Point::new(100.0, 100.0),
            Size::new(80.0, 80.0),
        )
        .with_label("person")
        .with_mask(AlphaMask::from_raw(2, 1, vec![255, 0])),
        true,
    );
    canvas.add_element(
        ElementSpec::new(
            ElementContent::Color {
                color: HexColor::new("5BB5D9").with_alpha(0.5),
            },
            Point::new(40.0, 60.0),
            Size::new(20.0, 30.0),
        )
        .with_transform(Transform {
            position: crate::foundation::core::Vec2::new(3.0, -4.0),
            scale: 1.5,
            rotation: 0.3,
        }),
        false,
    );
    canvas.add_element(
        ElementSpec::new(ElementContent::Empty, Point::new(10.0, 10.0), Size::new(5.0, 5.0))
            .with_origin(Point::new(12.0, 12.0)),
        false,
    );
    canvas
}

#[test]
fn encode_decode_encode_is_stable() {
    let mut canvas = populated();
    let id = canvas.elements()[0].id();
    canvas.handle_gesture(
        id,
        GestureEvent::Pinch {
            phase: GesturePhase::Began,
            scale: 1.0,
        },
    );
    canvas.handle_gesture(
        id,
        GestureEvent::Pinch {
            phase: GesturePhase::Changed,
            scale: 1.7,
        },
    );

    let json = canvas.encode_snapshot().unwrap();
    let decoded = Canvas::decode_snapshot(bounds(), CanvasOpts::default(), &json).unwrap();
    assert_eq!(decoded.elements().len(), 3);
    assert_eq!(decoded.encode_snapshot().unwrap(), json);

    let first = &decoded.elements()[0];
    assert_eq!(first.label(), "person");
    assert_eq!(first.transform().scale, 1.7);
    assert_eq!(first.affine(), canvas.elements()[0].affine());
    assert_eq!(first.mask().unwrap().alpha(), &[255, 0]);
    assert_eq!(decoded.elements()[2].origin_location(), Point::new(12.0, 12.0));
}

#[test]
fn restore_adds_without_animation() {
    let snapshot = populated().snapshot();
    let mut canvas = Canvas::new(bounds());
    let ids = canvas.restore(&snapshot).unwrap();
    assert_eq!(ids.len(), 3);
    assert!(canvas.drain_events().iter().all(|e| matches!(
        e,
        crate::canvas::engine::CanvasEvent::ElementAdded {
            animated: false,
            ..
        }
    )));
}

#[test]
fn content_is_tagged_by_type() {
    let value = serde_json::to_value(populated().snapshot()).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["elements"][0]["id"], "person");
    assert_eq!(value["elements"][0]["content"]["type"], "image");
    assert_eq!(value["elements"][1]["content"]["type"], "color");
    assert_eq!(value["elements"][2]["content"]["type"], "empty");
    assert!(value["elements"][2]["mask"].is_null());
}

#[test]
fn unsupported_version_is_rejected() {
    let mut snapshot = populated().snapshot();
    snapshot.version = 2;
    let err = Canvas::new(bounds()).restore(&snapshot).unwrap_err();
    assert!(err.to_string().starts_with("snapshot error:"));
    assert!(err.to_string().contains("version 2"));
}

#[test]
fn malformed_payloads_add_nothing() {
    let mut snapshot = populated().snapshot();
    if let ContentSnapshot::Image { rgba, .. } = &mut snapshot.elements[0].content {
        rgba.pop();
    }
    let mut canvas = Canvas::new(bounds());
    assert!(canvas.restore(&snapshot).is_err());
    assert!(canvas.is_empty());

    let mut snapshot = populated().snapshot();
    snapshot.elements[0].mask = Some(MaskSnapshot {
        width: 3,
        height: 3,
        alpha: vec![0; 4],
    });
    assert!(Canvas::new(bounds()).restore(&snapshot).is_err());

    assert!(Canvas::decode_snapshot(bounds(), CanvasOpts::default(), "{\"version\":1}").is_err());
}
