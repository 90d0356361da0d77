use super::*;
use std::f64::consts::{FRAC_PI_4, PI, TAU};

#[test]
fn rotation_snaps_to_nearest_eighth_turn() {
    assert_eq!(snap_rotation(0.785, 0.1, FRAC_PI_4), Some(FRAC_PI_4));
    assert_eq!(snap_rotation(0.5, 0.1, FRAC_PI_4), None);
    assert_eq!(snap_rotation(PI + 0.05, 0.1, FRAC_PI_4), Some(PI));
}

#[test]
fn rotation_snap_works_on_wrapped_angles() {
    let snapped = snap_rotation(-0.03, 0.1, FRAC_PI_4).unwrap();
    assert!(snapped.abs() < 1e-12);
    let snapped = snap_rotation(TAU + FRAC_PI_4 + 0.02, 0.1, FRAC_PI_4).unwrap();
    assert!((snapped - FRAC_PI_4).abs() < 1e-12);
}

#[test]
fn axis_alignment_requires_exact_right_angles() {
    assert!(is_axis_aligned(0.0));
    assert!(is_axis_aligned(std::f64::consts::FRAC_PI_2));
    assert!(is_axis_aligned(PI));
    assert!(!is_axis_aligned(FRAC_PI_4));
    assert!(!is_axis_aligned(0.001));
}

#[test]
fn scale_snaps_close_to_one() {
    assert_eq!(snap_scale(1.03, 0.05), Some(1.0));
    assert_eq!(snap_scale(0.96, 0.05), Some(1.0));
    assert_eq!(snap_scale(1.10, 0.05), None);
}

#[test]
fn center_snap_is_exact_and_per_axis() {
    let parent = Rect::new(0.0, 0.0, 300.0, 300.0);
    // Center x = 154, center y = 80.
    let child = Rect::new(104.0, 30.0, 204.0, 130.0);
    let offset = snap_position(parent, child, false, 6.0).unwrap();
    assert_eq!(offset, Vec2::new(-4.0, 0.0));
    assert_eq!((child + offset).center().x, parent.center().x);

    let far = Rect::new(10.0, 10.0, 60.0, 60.0);
    assert!(snap_position(parent, far, false, 6.0).is_none());
}

#[test]
fn edge_snap_only_when_axis_aligned_and_overrides_center() {
    let parent = Rect::new(0.0, 0.0, 300.0, 300.0);
    let child = Rect::new(4.0, 197.0, 104.0, 297.0);
    assert!(snap_position(parent, child, false, 6.0).is_none());
    let offset = snap_position(parent, child, true, 6.0).unwrap();
    assert_eq!(offset, Vec2::new(-4.0, 3.0));

    // Nearly full width: center and both edges are within reach; the min edge wins.
    let wide = Rect::new(2.0, 100.0, 299.0, 150.0);
    let offset = snap_position(parent, wide, true, 6.0).unwrap();
    assert_eq!(offset.x, -2.0);
    let offset = snap_position(parent, wide, false, 6.0).unwrap();
    assert_eq!(offset.x, -0.5);
}
