//! Which handles must refuse interaction.
//!
//! When the anchor coincides with a handle or an edge line, dragging certain
//! handles would collapse the rectangle to zero width or height at the anchor
//! and drive the host's scale to infinity. Those handles are disabled. Free
//! rotation disables everything except the rotation handle. The two reasons
//! are tracked separately and only combined when queried.

#[cfg(test)]
#[path = "mask_test.rs"]
mod mask_test;

use serde::Serialize;

use crate::handle::{HandleId, HandleSet};

/// Handles to disable while the anchor sits on `alignment`.
///
/// `None`, the anchor itself (the rectangle's centre), and the auxiliary
/// handles 10-12 disable nothing.
#[must_use]
pub fn mask_for_alignment(alignment: Option<HandleId>) -> HandleSet {
    match alignment {
        Some(HandleId::Left) => HandleSet::left_aligned(),
        Some(HandleId::Right) => HandleSet::right_aligned(),
        Some(HandleId::Top) => HandleSet::top_aligned(),
        Some(HandleId::Bottom) => HandleSet::bottom_aligned(),
        Some(HandleId::TopLeft) => HandleSet::top_left_aligned(),
        Some(HandleId::TopRight) => HandleSet::top_right_aligned(),
        Some(HandleId::BottomLeft) => HandleSet::bottom_left_aligned(),
        Some(HandleId::BottomRight) => HandleSet::bottom_right_aligned(),
        Some(HandleId::Anchor | HandleId::WarpLock | HandleId::RotationArm | HandleId::Rotation) | None => {
            HandleSet::empty()
        }
    }
}

/// Handles to disable for the free-rotation mode flag.
#[must_use]
pub fn mask_for_free_rotation(enabled: bool) -> HandleSet {
    if enabled { HandleSet::all().without(HandleId::Rotation) } else { HandleSet::empty() }
}

/// Disabled handles, split by cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DisabledMask {
    /// Disabled because the anchor coincides with a geometric feature.
    pub snap_mask: HandleSet,
    /// Disabled because free rotation is active.
    pub rotation_mask: HandleSet,
}

impl DisabledMask {
    /// Union of both causes.
    #[must_use]
    pub fn effective(self) -> HandleSet {
        self.snap_mask | self.rotation_mask
    }

    #[must_use]
    pub fn is_disabled(self, handle: HandleId) -> bool {
        self.effective().contains(handle)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
