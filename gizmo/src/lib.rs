//! Interaction core for a 2D twelve-handle transform gizmo.
//!
//! The gizmo scales, skews, moves and rotates a selection of objects inside a
//! host level editor. This crate holds the logic the host lacks: snapping the
//! anchor onto handles and edges, snapping rotation to right angles, disabling
//! handles whose use would produce a degenerate (infinite) scale, and rotating
//! the gizmo without rotating the selection. The host keeps its own gizmo and
//! forwards events to [`core::GizmoCore`], then applies the returned
//! [`core::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`core`] | Gizmo state, event interface, and host [`core::Action`]s |
//! | [`handle`] | Handle identities, [`handle::HandleSet`], per-event layouts |
//! | [`transform`] | Points and local/world rotations |
//! | [`snap`] | Anchor point snap, edge alignment, rotation snap |
//! | [`mask`] | Alignment and free-rotation disabled-handle masks |
//! | [`proxy`] | Selection model and the free-rotation proxy machine |
//! | [`settings`] | User settings and environment loading |
//! | [`error`] | [`error::GizmoError`] |
//! | [`consts`] | Snap radii, tolerances, and layout offsets |

pub mod consts;
pub mod core;
pub mod error;
pub mod handle;
pub mod mask;
pub mod proxy;
pub mod settings;
pub mod snap;
pub mod transform;
