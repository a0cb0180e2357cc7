//! Shared numeric constants for the gizmo crate.

// ── Geometry ────────────────────────────────────────────────────

/// Maximum floating-point error tolerated in geometric comparisons, in units.
pub const MAX_FP_ERROR: f64 = 0.01;

// ── Snapping ────────────────────────────────────────────────────

/// Anchor snap radius in units at a handle scale of 1.0.
pub const SNAP_RADIUS: f64 = 18.0;

/// Distance in degrees from a multiple of 90° within which rotation snaps.
pub const ROTATION_SNAP_DEADZONE_DEG: f64 = 2.0;

/// Upper bound (exclusive) for a configured rotation deadzone. At 45° every
/// angle would snap.
pub const MAX_ROTATION_DEADZONE_DEG: f64 = 45.0;

// ── Commit ──────────────────────────────────────────────────────

/// A skew of exactly this many degrees on both axes collapses objects.
pub const DEGENERATE_SKEW_DEG: f64 = 45.0;

/// Skew substituted for a degenerate double skew.
pub const CLAMPED_SKEW_DEG: f64 = 44.9;

// ── Layout ──────────────────────────────────────────────────────

/// Distance from the right mid-edge to the rotation handle, in units.
pub const ROTATION_ARM_LENGTH: f64 = 60.0;

/// Distance above the top mid-edge of the warp-lock handle, in units.
pub const WARP_HANDLE_OFFSET: f64 = 30.0;
