use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let prepared = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_svg_parse_ok_and_err() {
    let ok = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
    parse_svg(ok).unwrap();

    let bad = br#"<svg"#;
    assert!(parse_svg(bad).is_err());
}

#[test]
fn svg_rasterizes_at_requested_size() {
    let svg = parse_svg(
        br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <rect x="0" y="0" width="10" height="5" fill="#FFFFFF"/>
        </svg>"##,
    )
    .unwrap();
    let img = rasterize_svg_to_premul_rgba8(&svg.tree, 20, 40).unwrap();
    assert_eq!((img.width, img.height), (20, 40));
    assert_eq!(img.alpha_at(10, 5), 255);
    assert_eq!(img.alpha_at(10, 35), 0);
}

#[test]
fn unpremultiply_inverts_premultiply_for_opaque_and_clear() {
    let mut px = vec![10u8, 20, 30, 255, 99, 99, 99, 0, 200, 100, 0, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[10, 20, 30, 255]);
    assert!((i16::from(px[8]) - 200).abs() <= 1);
    assert!((i16::from(px[9]) - 100).abs() <= 1);
}

#[test]
fn rgba_image_round_trips_opaque_pixels() {
    let src = image::RgbaImage::from_raw(2, 1, vec![1, 2, 3, 255, 9, 9, 9, 0]).unwrap();
    let back = to_rgba_image(&prepare_rgba_image(&src)).unwrap();
    assert_eq!(back.as_raw(), &vec![1, 2, 3, 255, 0, 0, 0, 0]);
}
