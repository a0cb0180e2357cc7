//! Anchor and rotation snapping.
//!
//! Two anchor checks run at different times. While the anchor is dragged,
//! [`try_snap_to_point`] pulls it onto a nearby handle (or the rectangle's
//! centre). At release, when no point snap applies, [`find_aligned_edge`]
//! reports whether the anchor still sits on a rectangle edge or its extension.
//! Both work on the anchor converted into the gizmo's local frame.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::handle::{HandleId, HandleLayout};
use crate::transform::{Point, to_world};

/// Candidate handles for a point snap, in match order.
const POINT_SNAP_TARGETS: [HandleId; 8] = [
    HandleId::Left,
    HandleId::Right,
    HandleId::Top,
    HandleId::Bottom,
    HandleId::TopLeft,
    HandleId::TopRight,
    HandleId::BottomLeft,
    HandleId::BottomRight,
];

/// Result of a successful point snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSnap {
    /// Snapped anchor position in world space.
    pub world: Point,
    /// Handle the anchor snapped onto. `HandleId::Anchor` stands for the
    /// rectangle's centre.
    pub target: HandleId,
}

/// Snap the anchor onto the first candidate within `radius`.
///
/// The centre is checked first when `include_center` is set, then handles 2
/// through 9 in index order. The first candidate inside the radius wins even
/// if a later one is closer.
#[must_use]
pub fn try_snap_to_point(layout: &HandleLayout, radius: f64, include_center: bool) -> Option<PointSnap> {
    let anchor = layout.anchor_local();
    let limit_sq = radius * radius;

    let center = include_center.then(|| (HandleId::Anchor, layout.center()));
    let handles = POINT_SNAP_TARGETS.iter().map(|&h| (h, layout.position(h)));

    center
        .into_iter()
        .chain(handles)
        .find(|(_, pos)| anchor.distance_sq(*pos) < limit_sq)
        .map(|(target, pos)| PointSnap { world: to_world(pos, layout.rotation), target })
}

/// Report the handle implied by the anchor lying on rectangle edges.
///
/// Alignment with exactly one edge yields that edge's mid handle; alignment
/// with two adjacent edges yields their shared corner. Any other pattern is
/// `None`.
#[must_use]
pub fn find_aligned_edge(layout: &HandleLayout, tolerance: f64) -> Option<HandleId> {
    let anchor = layout.anchor_local();
    let v = layout.corners_clockwise();

    // Edge ending at corner `b` sets bit `0b1000 >> b`.
    let mut aligned = 0u8;
    let mut a = v.len() - 1;
    for b in 0..v.len() {
        if is_collinear(v[a], v[b], anchor, tolerance) {
            aligned |= 0b1000 >> b;
        }
        a = b;
    }

    edge_pattern_handle(aligned)
}

/// Whether `c` lies on the infinite line through `a` and `b`.
///
/// The parametrization follows the edge's dominant axis so a perfectly
/// vertical or horizontal edge never divides by zero.
fn is_collinear(a: Point, b: Point, c: Point, tolerance: f64) -> bool {
    let ab = b - a;
    if ab.x.abs() > ab.y.abs() {
        let ac = c - a;
        let y = ab.y / ab.x * ac.x;
        (ac.y - y).abs() < tolerance
    } else {
        if ab.y == 0.0 {
            // Both corners coincide; no line to test against.
            return false;
        }
        let bc = b - c;
        let x = ab.x / ab.y * bc.y;
        (bc.x - x).abs() < tolerance
    }
}

/// Map the 4-bit aligned-edge pattern to a handle.
///
/// Bits, high to low: left, top, right, bottom.
fn edge_pattern_handle(aligned: u8) -> Option<HandleId> {
    match aligned {
        0b1000 => Some(HandleId::Left),
        0b0100 => Some(HandleId::Top),
        0b0010 => Some(HandleId::Right),
        0b0001 => Some(HandleId::Bottom),
        0b1100 => Some(HandleId::TopLeft),
        0b0110 => Some(HandleId::TopRight),
        0b0011 => Some(HandleId::BottomRight),
        0b1001 => Some(HandleId::BottomLeft),
        _ => None,
    }
}

/// Snap a rotation to the nearest multiple of 90° when within `deadzone_deg`.
///
/// Returns the snapped angle, or `None` when the rotation is outside the
/// deadzone.
///
/// The distance to the nearest right angle is measured in whole degrees, so
/// 87.6° counts as 2° away.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn snap_rotation(rotation_deg: f64, deadzone_deg: f64) -> Option<f64> {
    let diff = ((rotation_deg.abs() + 0.5) as i64 % 90) as f64;
    if diff > deadzone_deg && diff < 90.0 - deadzone_deg {
        return None;
    }
    // Adding zero turns -0.0 into 0.0.
    Some((rotation_deg / 90.0).round() * 90.0 + 0.0)
}
