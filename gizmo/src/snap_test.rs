#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{MAX_FP_ERROR, ROTATION_SNAP_DEADZONE_DEG, SNAP_RADIUS};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Canonical 100x100 gizmo centred on the origin.
fn square(rotation: f64) -> HandleLayout {
    HandleLayout::rect(50.0, 50.0, rotation)
}

/// Square with the anchor placed at `local` in the gizmo's frame.
fn square_with_anchor(rotation: f64, local: Point) -> HandleLayout {
    let mut layout = square(rotation);
    layout.set_position(HandleId::Anchor, local);
    layout
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
}

// =============================================================
// try_snap_to_point
// =============================================================

#[test]
fn snaps_to_right_mid_edge_within_radius() {
    let layout = square(0.0).with_anchor(pt(50.0 + 5.0, 0.0));
    let snap = try_snap_to_point(&layout, SNAP_RADIUS, false).unwrap();
    assert_eq!(snap.target, HandleId::Right);
    assert_eq!(snap.world, pt(50.0, 0.0));
}

#[test]
fn no_snap_outside_radius() {
    let layout = square(0.0).with_anchor(pt(20.0, 20.0));
    assert!(try_snap_to_point(&layout, SNAP_RADIUS, false).is_none());
}

#[test]
fn radius_is_strict() {
    let layout = square(0.0).with_anchor(pt(50.0 + SNAP_RADIUS, 0.0));
    assert!(try_snap_to_point(&layout, SNAP_RADIUS, false).is_none());
}

#[test]
fn center_requires_flag() {
    let layout = square(0.0).with_anchor(pt(3.0, -2.0));
    assert!(try_snap_to_point(&layout, SNAP_RADIUS, false).is_none());
    let snap = try_snap_to_point(&layout, SNAP_RADIUS, true).unwrap();
    assert_eq!(snap.target, HandleId::Anchor);
    assert_eq!(snap.world, pt(0.0, 0.0));
}

#[test]
fn first_match_wins_over_nearest() {
    // Small rectangle: the anchor is within the radius of both the left
    // mid-edge and the top-left corner, but nearer the corner.
    let layout = HandleLayout::rect(10.0, 10.0, 0.0).with_anchor(pt(-9.0, 9.0));
    let snap = try_snap_to_point(&layout, SNAP_RADIUS, false).unwrap();
    assert_eq!(snap.target, HandleId::Left);
}

#[test]
fn center_checked_before_handles() {
    let layout = HandleLayout::rect(10.0, 10.0, 0.0).with_anchor(pt(-9.0, 0.0));
    let snap = try_snap_to_point(&layout, SNAP_RADIUS, true).unwrap();
    assert_eq!(snap.target, HandleId::Anchor);
}

#[test]
fn snap_in_rotated_frame_returns_world_position() {
    let rotation = 30.0;
    let target_local = pt(0.0, 50.0);
    let layout = square_with_anchor(rotation, pt(4.0, 47.0));
    let snap = try_snap_to_point(&layout, SNAP_RADIUS, false).unwrap();
    assert_eq!(snap.target, HandleId::Top);
    assert!(close(snap.world, to_world(target_local, rotation)));
}

#[test]
fn scaled_radius_widens_capture() {
    let layout = square(0.0).with_anchor(pt(-50.0 - 25.0, 0.0));
    assert!(try_snap_to_point(&layout, SNAP_RADIUS, false).is_none());
    let snap = try_snap_to_point(&layout, SNAP_RADIUS * 2.0, false).unwrap();
    assert_eq!(snap.target, HandleId::Left);
}

// =============================================================
// find_aligned_edge
// =============================================================

#[test]
fn centered_anchor_is_not_aligned() {
    assert_eq!(find_aligned_edge(&square(0.0), MAX_FP_ERROR), None);
}

#[test]
fn anchor_on_each_mid_edge() {
    let cases = [
        (pt(-50.0, 0.0), HandleId::Left),
        (pt(50.0, 0.0), HandleId::Right),
        (pt(0.0, 50.0), HandleId::Top),
        (pt(0.0, -50.0), HandleId::Bottom),
    ];
    for (anchor, expected) in cases {
        let layout = square(0.0).with_anchor(anchor);
        assert_eq!(find_aligned_edge(&layout, MAX_FP_ERROR), Some(expected), "{anchor:?}");
    }
}

#[test]
fn anchor_on_each_corner() {
    let cases = [
        (pt(-50.0, 50.0), HandleId::TopLeft),
        (pt(50.0, 50.0), HandleId::TopRight),
        (pt(-50.0, -50.0), HandleId::BottomLeft),
        (pt(50.0, -50.0), HandleId::BottomRight),
    ];
    for (anchor, expected) in cases {
        let layout = square(0.0).with_anchor(anchor);
        assert_eq!(find_aligned_edge(&layout, MAX_FP_ERROR), Some(expected), "{anchor:?}");
    }
}

#[test]
fn near_corner_within_tolerance_aligns_to_corner() {
    let layout = square(0.0).with_anchor(pt(49.99, 49.99));
    assert_eq!(find_aligned_edge(&layout, MAX_FP_ERROR), Some(HandleId::TopRight));
}

#[test]
fn edge_extension_counts_as_aligned() {
    // Beyond the right edge but on the top edge's line.
    let layout = square(0.0).with_anchor(pt(120.0, 50.0));
    assert_eq!(find_aligned_edge(&layout, MAX_FP_ERROR), Some(HandleId::Top));
}

#[test]
fn outside_tolerance_is_not_aligned() {
    let layout = square(0.0).with_anchor(pt(-50.02, 10.0));
    assert_eq!(find_aligned_edge(&layout, MAX_FP_ERROR), None);
}

#[test]
fn alignment_holds_in_rotated_frame() {
    let layout = square_with_anchor(-63.0, pt(-50.0, 12.0));
    assert_eq!(find_aligned_edge(&layout, MAX_FP_ERROR), Some(HandleId::Left));
}

#[test]
fn collapsed_width_aligns_with_opposite_edges_and_yields_none() {
    // Zero-width rectangle: left and right edges share a line.
    let layout = HandleLayout::rect(0.0, 50.0, 0.0).with_anchor(pt(0.0, 50.0));
    assert_eq!(find_aligned_edge(&layout, MAX_FP_ERROR), None);
}

#[test]
fn edge_pattern_table_rejects_non_adjacent_pairs() {
    assert_eq!(edge_pattern_handle(0b1010), None);
    assert_eq!(edge_pattern_handle(0b0101), None);
    assert_eq!(edge_pattern_handle(0b1111), None);
    assert_eq!(edge_pattern_handle(0), None);
}

#[test]
fn coincident_corners_never_align() {
    let p = pt(1.0, 1.0);
    assert!(!is_collinear(p, p, pt(1.0, 1.0), MAX_FP_ERROR));
}

// =============================================================
// snap_rotation
// =============================================================

#[test]
fn rotation_near_ninety_snaps() {
    assert_eq!(snap_rotation(88.0, ROTATION_SNAP_DEADZONE_DEG), Some(90.0));
    assert_eq!(snap_rotation(91.6, ROTATION_SNAP_DEADZONE_DEG), Some(90.0));
}

#[test]
fn rotation_outside_deadzone_does_not_snap() {
    assert_eq!(snap_rotation(85.0, ROTATION_SNAP_DEADZONE_DEG), None);
    assert_eq!(snap_rotation(45.0, ROTATION_SNAP_DEADZONE_DEG), None);
    assert_eq!(snap_rotation(3.0, ROTATION_SNAP_DEADZONE_DEG), None);
}

#[test]
fn negative_rotation_snaps() {
    assert_eq!(snap_rotation(-89.0, ROTATION_SNAP_DEADZONE_DEG), Some(-90.0));
    assert_eq!(snap_rotation(-181.0, ROTATION_SNAP_DEADZONE_DEG), Some(-180.0));
}

#[test]
fn near_zero_snaps_to_zero() {
    assert_eq!(snap_rotation(1.0, ROTATION_SNAP_DEADZONE_DEG), Some(0.0));
    assert_eq!(snap_rotation(0.0, ROTATION_SNAP_DEADZONE_DEG), Some(0.0));
    assert_eq!(snap_rotation(-1.0, ROTATION_SNAP_DEADZONE_DEG), Some(0.0));
}

#[test]
fn wide_deadzone_snaps_to_nearest_right_angle() {
    assert_eq!(snap_rotation(78.0, 15.0), Some(90.0));
    assert_eq!(snap_rotation(-77.0, 15.0), Some(-90.0));
    assert_eq!(snap_rotation(12.0, 15.0), Some(0.0));
    assert_eq!(snap_rotation(193.0, 15.0), Some(180.0));
    assert_eq!(snap_rotation(-259.0, 15.0), Some(-270.0));
    assert_eq!(snap_rotation(45.0, 15.0), None);
}

#[test]
fn deadzone_edge_never_jumps_past_a_right_angle() {
    for deadzone in [2.0, 10.0, 20.0, 44.0] {
        for tenth in -3600..=3600 {
            let raw = f64::from(tenth) / 10.0;
            if let Some(snapped) = snap_rotation(raw, deadzone) {
                assert!((snapped - raw).abs() <= 45.0, "{raw} with deadzone {deadzone} -> {snapped}");
            }
        }
    }
}

#[test]
fn snap_to_zero_is_positive_zero() {
    let snapped = snap_rotation(-1.0, ROTATION_SNAP_DEADZONE_DEG).unwrap();
    assert!(snapped.is_sign_positive());
}

#[test]
fn snapped_values_are_multiples_of_ninety() {
    for raw in [-359.0, -271.5, -178.0, 89.5, 268.0, 358.2] {
        if let Some(snapped) = snap_rotation(raw, ROTATION_SNAP_DEADZONE_DEG) {
            assert_eq!(snapped % 90.0, 0.0, "{raw} -> {snapped}");
        }
    }
}
