#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// HandleId
// =============================================================

#[test]
fn index_round_trips_for_every_handle() {
    for (i, handle) in HandleId::ALL.iter().enumerate() {
        let index = u8::try_from(i + 1).unwrap();
        assert_eq!(handle.index(), index);
        assert_eq!(HandleId::from_index(index), Some(*handle));
    }
}

#[test]
fn from_index_rejects_out_of_range() {
    assert_eq!(HandleId::from_index(0), None);
    assert_eq!(HandleId::from_index(13), None);
    assert_eq!(HandleId::from_index(u8::MAX), None);
}

#[test]
fn anchor_is_top_bit_and_rotation_is_lowest() {
    assert_eq!(HandleId::Anchor.bit(), 0b1000_0000_0000);
    assert_eq!(HandleId::Left.bit(), 0b0100_0000_0000);
    assert_eq!(HandleId::Rotation.bit(), 0b0000_0000_0001);
}

#[test]
fn handle_id_serializes_snake_case() {
    let json = serde_json::to_string(&HandleId::TopRight).unwrap();
    assert_eq!(json, "\"top_right\"");
}

// =============================================================
// HandleSet
// =============================================================

#[test]
fn empty_and_all() {
    assert!(HandleSet::empty().is_empty());
    assert_eq!(HandleSet::empty().len(), 0);
    assert_eq!(HandleSet::all().len(), 12);
    assert_eq!(HandleSet::all().bits(), 0b1111_1111_1111);
}

#[test]
fn from_bits_drops_high_bits() {
    assert_eq!(HandleSet::from_bits(0xFFFF), HandleSet::all());
    assert_eq!(HandleSet::from_bits(0b1_0000_0000_0000), HandleSet::empty());
}

#[test]
fn insert_remove_contains() {
    let mut set = HandleSet::empty();
    set.insert(HandleId::Top);
    assert!(set.contains(HandleId::Top));
    assert!(!set.contains(HandleId::Bottom));
    set.remove(HandleId::Top);
    assert!(set.is_empty());
}

#[test]
fn union_and_bitor_agree() {
    let a = HandleSet::of(&[HandleId::Left]);
    let b = HandleSet::of(&[HandleId::Right]);
    let mut c = a;
    c |= b;
    assert_eq!(a | b, a.union(b));
    assert_eq!(c, a.union(b));
    assert_eq!(c.len(), 2);
}

#[test]
fn iter_is_ascending() {
    let set = HandleSet::of(&[HandleId::Rotation, HandleId::Anchor, HandleId::TopLeft]);
    let members: Vec<_> = set.iter().collect();
    assert_eq!(members, [HandleId::Anchor, HandleId::TopLeft, HandleId::Rotation]);
}

#[test]
fn collect_into_set() {
    let set: HandleSet = [HandleId::Top, HandleId::TopLeft].into_iter().collect();
    assert_eq!(set, HandleSet::of(&[HandleId::TopLeft, HandleId::Top]));
}

#[test]
fn without_leaves_original_untouched() {
    let all = HandleSet::all();
    let fewer = all.without(HandleId::Rotation);
    assert_eq!(all.len(), 12);
    assert_eq!(fewer.len(), 11);
    assert!(!fewer.contains(HandleId::Rotation));
}

#[test]
fn named_sets_match_packed_bits() {
    assert_eq!(HandleSet::left_aligned().bits(), 0b0100_0101_0000);
    assert_eq!(HandleSet::right_aligned().bits(), 0b0010_0010_1000);
    assert_eq!(HandleSet::top_aligned().bits(), 0b0001_0110_0000);
    assert_eq!(HandleSet::bottom_aligned().bits(), 0b0000_1001_1000);
    assert_eq!(HandleSet::top_left_aligned().bits(), 0b0101_0111_0000);
    assert_eq!(HandleSet::top_right_aligned().bits(), 0b0011_0110_1000);
    assert_eq!(HandleSet::bottom_left_aligned().bits(), 0b0100_1101_1000);
    assert_eq!(HandleSet::bottom_right_aligned().bits(), 0b0010_1011_1000);
}

#[test]
fn handle_set_serializes_as_bits() {
    let set = HandleSet::top_aligned();
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, set.bits().to_string());
    let back: HandleSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, set);
}

// =============================================================
// HandleLayout
// =============================================================

#[test]
fn rect_places_corners_and_mid_edges() {
    let layout = HandleLayout::rect(50.0, 30.0, 0.0);
    assert_eq!(layout.position(HandleId::Left), Point::new(-50.0, 0.0));
    assert_eq!(layout.position(HandleId::Right), Point::new(50.0, 0.0));
    assert_eq!(layout.position(HandleId::Top), Point::new(0.0, 30.0));
    assert_eq!(layout.position(HandleId::Bottom), Point::new(0.0, -30.0));
    assert_eq!(layout.position(HandleId::TopLeft), Point::new(-50.0, 30.0));
    assert_eq!(layout.position(HandleId::BottomRight), Point::new(50.0, -30.0));
}

#[test]
fn mid_edges_are_midpoints_of_corners() {
    let layout = HandleLayout::rect(40.0, 25.0, 0.0);
    let mid = |a, b| layout.position(a).midpoint(layout.position(b));
    assert_eq!(layout.position(HandleId::Top), mid(HandleId::TopLeft, HandleId::TopRight));
    assert_eq!(layout.position(HandleId::Bottom), mid(HandleId::BottomLeft, HandleId::BottomRight));
    assert_eq!(layout.position(HandleId::Left), mid(HandleId::TopLeft, HandleId::BottomLeft));
    assert_eq!(layout.position(HandleId::Right), mid(HandleId::TopRight, HandleId::BottomRight));
}

#[test]
fn rotation_handle_sits_beyond_right_edge() {
    let layout = HandleLayout::rect(50.0, 50.0, 0.0);
    assert!(layout.position(HandleId::Rotation).x > layout.position(HandleId::RotationArm).x);
    assert!(layout.position(HandleId::RotationArm).x > layout.position(HandleId::Right).x);
}

#[test]
fn center_of_symmetric_rect_is_origin() {
    let layout = HandleLayout::rect(50.0, 20.0, 33.0);
    assert_eq!(layout.center(), Point::new(0.0, 0.0));
}

#[test]
fn anchor_position_is_converted_to_local() {
    let layout = HandleLayout::rect(50.0, 50.0, 90.0).with_anchor(Point::new(1.0, 0.0));
    let local = layout.position(HandleId::Anchor);
    assert!((local.x - 0.0).abs() < 1e-9);
    assert!((local.y - 1.0).abs() < 1e-9);
}

#[test]
fn set_anchor_position_in_local_space() {
    let mut layout = HandleLayout::rect(50.0, 50.0, 30.0);
    layout.set_position(HandleId::Anchor, Point::new(-50.0, 0.0));
    let local = layout.anchor_local();
    assert!((local.x + 50.0).abs() < 1e-9);
    assert!(local.y.abs() < 1e-9);
}

#[test]
fn corners_clockwise_order() {
    let layout = HandleLayout::rect(10.0, 10.0, 0.0);
    assert_eq!(
        layout.corners_clockwise(),
        [Point::new(-10.0, 10.0), Point::new(10.0, 10.0), Point::new(10.0, -10.0), Point::new(-10.0, -10.0)]
    );
}

#[test]
fn builders_override_fields() {
    let layout = HandleLayout::rect(10.0, 10.0, 0.0).with_rotation(45.0).with_handle_scale(2.0);
    assert_eq!(layout.rotation, 45.0);
    assert_eq!(layout.handle_scale, 2.0);
}
