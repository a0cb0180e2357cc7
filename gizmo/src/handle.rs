//! The gizmo's twelve handles, typed handle sets, and per-event layouts.
//!
//! ```text
//!       |10|
//!        |
//! (6)---(4)---(7)
//!  |           |
//! (2)   (1)   (3) -- |11| -- (12)
//!  |           |
//! (8)---(5)---(9)
//! ```
//!
//! Handle sets use the host's packed layout: handle `i` occupies bit `12 - i`,
//! so the anchor is the highest of the twelve bits and the rotation handle the
//! lowest.

#[cfg(test)]
#[path = "handle_test.rs"]
mod handle_test;

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::consts::{ROTATION_ARM_LENGTH, WARP_HANDLE_OFFSET};
use crate::transform::{Point, to_local, to_world};

/// One of the twelve fixed control points of the gizmo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleId {
    /// 1: user-positionable drag origin.
    Anchor,
    /// 2: left mid-edge.
    Left,
    /// 3: right mid-edge.
    Right,
    /// 4: top mid-edge.
    Top,
    /// 5: bottom mid-edge.
    Bottom,
    /// 6: top-left corner.
    TopLeft,
    /// 7: top-right corner.
    TopRight,
    /// 8: bottom-left corner.
    BottomLeft,
    /// 9: bottom-right corner.
    BottomRight,
    /// 10: skew / warp lock.
    WarpLock,
    /// 11: rotation arm pivot.
    RotationArm,
    /// 12: rotation handle.
    Rotation,
}

impl HandleId {
    /// All handles in ascending index order.
    pub const ALL: [HandleId; 12] = [
        Self::Anchor,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
        Self::WarpLock,
        Self::RotationArm,
        Self::Rotation,
    ];

    /// The host's 1-based index for this handle.
    #[must_use]
    pub fn index(self) -> u8 {
        self as u8 + 1
    }

    /// Look up a handle by its 1-based index.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        let slot = usize::from(index.checked_sub(1)?);
        Self::ALL.get(slot).copied()
    }

    /// Single-bit mask for this handle.
    #[must_use]
    pub fn bit(self) -> u16 {
        HandleSet::TOP_BIT >> (self.index() - 1)
    }
}

/// A set of handles, packed into the low twelve bits of a `u16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub struct HandleSet(u16);

impl HandleSet {
    const TOP_BIT: u16 = 0b1000_0000_0000;
    const MASK: u16 = 0b1111_1111_1111;

    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every handle.
    #[must_use]
    pub const fn all() -> Self {
        Self(Self::MASK)
    }

    /// Build a set from raw bits; bits above the twelfth are dropped.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & Self::MASK)
    }

    /// Build a set containing exactly `handles`.
    #[must_use]
    pub fn of(handles: &[HandleId]) -> Self {
        handles.iter().fold(Self::empty(), |set, &h| set.with(h))
    }

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn contains(self, handle: HandleId) -> bool {
        self.0 & handle.bit() != 0
    }

    pub fn insert(&mut self, handle: HandleId) {
        self.0 |= handle.bit();
    }

    pub fn remove(&mut self, handle: HandleId) {
        self.0 &= !handle.bit();
    }

    /// Copy of this set with `handle` added.
    #[must_use]
    pub fn with(mut self, handle: HandleId) -> Self {
        self.insert(handle);
        self
    }

    /// Copy of this set with `handle` removed.
    #[must_use]
    pub fn without(mut self, handle: HandleId) -> Self {
        self.remove(handle);
        self
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in ascending handle index order.
    pub fn iter(self) -> impl Iterator<Item = HandleId> {
        HandleId::ALL.into_iter().filter(move |&h| self.contains(h))
    }

    // --- Alignment disable-sets ---

    /// Anchor on the left mid-edge: {2, 6, 8}.
    #[must_use]
    pub fn left_aligned() -> Self {
        Self::of(&[HandleId::Left, HandleId::TopLeft, HandleId::BottomLeft])
    }

    /// Anchor on the right mid-edge: {3, 7, 9}.
    #[must_use]
    pub fn right_aligned() -> Self {
        Self::of(&[HandleId::Right, HandleId::TopRight, HandleId::BottomRight])
    }

    /// Anchor on the top mid-edge: {4, 6, 7}.
    #[must_use]
    pub fn top_aligned() -> Self {
        Self::of(&[HandleId::Top, HandleId::TopLeft, HandleId::TopRight])
    }

    /// Anchor on the bottom mid-edge: {5, 8, 9}.
    #[must_use]
    pub fn bottom_aligned() -> Self {
        Self::of(&[HandleId::Bottom, HandleId::BottomLeft, HandleId::BottomRight])
    }

    /// Anchor on the top-left corner: {2, 4, 6, 7, 8}.
    #[must_use]
    pub fn top_left_aligned() -> Self {
        Self::left_aligned().union(Self::top_aligned())
    }

    /// Anchor on the top-right corner: {3, 4, 6, 7, 9}.
    #[must_use]
    pub fn top_right_aligned() -> Self {
        Self::right_aligned().union(Self::top_aligned())
    }

    /// Anchor on the bottom-left corner: {2, 5, 6, 8, 9}.
    #[must_use]
    pub fn bottom_left_aligned() -> Self {
        Self::left_aligned().union(Self::bottom_aligned())
    }

    /// Anchor on the bottom-right corner: {3, 5, 7, 8, 9}.
    #[must_use]
    pub fn bottom_right_aligned() -> Self {
        Self::right_aligned().union(Self::bottom_aligned())
    }
}

impl BitOr for HandleSet {
    type Output = HandleSet;

    fn bitor(self, rhs: HandleSet) -> HandleSet {
        self.union(rhs)
    }
}

impl BitOrAssign for HandleSet {
    fn bitor_assign(&mut self, rhs: HandleSet) {
        *self = self.union(rhs);
    }
}

impl From<u16> for HandleSet {
    fn from(bits: u16) -> Self {
        Self::from_bits(bits)
    }
}

impl From<HandleSet> for u16 {
    fn from(set: HandleSet) -> Self {
        set.bits()
    }
}

impl FromIterator<HandleId> for HandleSet {
    fn from_iter<I: IntoIterator<Item = HandleId>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), HandleSet::with)
    }
}

/// Snapshot of the gizmo geometry for a single event.
///
/// Handles 2..=12 are stored in the gizmo's local frame. The anchor is stored
/// in world space because the host keeps it outside the rotated node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLayout {
    /// Gizmo rotation in degrees, clockwise positive.
    pub rotation: f64,
    /// Current on-screen scale of the handle sprites.
    pub handle_scale: f64,
    /// Anchor position in world space.
    pub anchor: Point,
    local: [Point; 12],
}

impl HandleLayout {
    /// Canonical layout for a rectangle of half extents `half_w` x `half_h`
    /// centred on the origin, with the anchor at the centre.
    #[must_use]
    pub fn rect(half_w: f64, half_h: f64, rotation: f64) -> Self {
        let mut local = [Point::default(); 12];
        let mut put = |h: HandleId, x: f64, y: f64| local[usize::from(h.index() - 1)] = Point::new(x, y);
        put(HandleId::Left, -half_w, 0.0);
        put(HandleId::Right, half_w, 0.0);
        put(HandleId::Top, 0.0, half_h);
        put(HandleId::Bottom, 0.0, -half_h);
        put(HandleId::TopLeft, -half_w, half_h);
        put(HandleId::TopRight, half_w, half_h);
        put(HandleId::BottomLeft, -half_w, -half_h);
        put(HandleId::BottomRight, half_w, -half_h);
        put(HandleId::WarpLock, 0.0, half_h + WARP_HANDLE_OFFSET);
        put(HandleId::RotationArm, half_w + ROTATION_ARM_LENGTH / 2.0, 0.0);
        put(HandleId::Rotation, half_w + ROTATION_ARM_LENGTH, 0.0);
        Self { rotation, handle_scale: 1.0, anchor: Point::default(), local }
    }

    /// Copy of this layout with the anchor moved to `world`.
    #[must_use]
    pub fn with_anchor(mut self, world: Point) -> Self {
        self.anchor = world;
        self
    }

    /// Copy of this layout with a different gizmo rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Copy of this layout with a different handle scale.
    #[must_use]
    pub fn with_handle_scale(mut self, handle_scale: f64) -> Self {
        self.handle_scale = handle_scale;
        self
    }

    /// Local-frame position of `handle`. The anchor is converted from world space.
    #[must_use]
    pub fn position(&self, handle: HandleId) -> Point {
        match handle {
            HandleId::Anchor => self.anchor_local(),
            other => self.local[usize::from(other.index() - 1)],
        }
    }

    /// Override the local-frame position of `handle`. The anchor is converted
    /// back to world space.
    pub fn set_position(&mut self, handle: HandleId, local: Point) {
        match handle {
            HandleId::Anchor => self.anchor = to_world(local, self.rotation),
            other => self.local[usize::from(other.index() - 1)] = local,
        }
    }

    /// The anchor in the gizmo's local frame.
    #[must_use]
    pub fn anchor_local(&self) -> Point {
        to_local(self.anchor, self.rotation)
    }

    /// Geometric centre of the rectangle (midpoint of the top-right and
    /// bottom-left corners), in local space.
    #[must_use]
    pub fn center(&self) -> Point {
        self.position(HandleId::TopRight).midpoint(self.position(HandleId::BottomLeft))
    }

    /// Corners in clockwise order starting at the top-left.
    #[must_use]
    pub fn corners_clockwise(&self) -> [Point; 4] {
        [
            self.position(HandleId::TopLeft),
            self.position(HandleId::TopRight),
            self.position(HandleId::BottomRight),
            self.position(HandleId::BottomLeft),
        ]
    }
}
