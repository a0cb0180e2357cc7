//! The active gizmo: state, disabled handles, and the host event interface.
//!
//! The integration shim owns one [`GizmoCore`] and calls its `on_*` methods
//! after delegating each event to the host's own gizmo behaviour. Every
//! method returns the [`Action`]s the shim must apply, in order.
//!
//! Activation runs in four steps so the free-rotation proxy is only ever in
//! the selection while the host recomputes the gizmo:
//!
//! 1. [`GizmoCore::prepare_activation`]
//! 2. [`GizmoCore::begin_recompute`] (may inject the proxy)
//! 3. the host derives the gizmo from the selection; a transform commit in
//!    this window goes through [`GizmoCore::on_transform_commit`]
//! 4. [`GizmoCore::end_recompute`], then [`GizmoCore::on_activate`]
//!
//! [`GizmoCore::activate`] runs the whole sequence around a closure.

#[cfg(test)]
#[path = "core_test.rs"]
mod core_test;

use serde::Serialize;

use crate::consts::{CLAMPED_SKEW_DEG, DEGENERATE_SKEW_DEG, MAX_FP_ERROR};
use crate::error::GizmoError;
use crate::handle::{HandleId, HandleLayout, HandleSet};
use crate::mask::{DisabledMask, mask_for_alignment, mask_for_free_rotation};
use crate::proxy::{FreeRotationProxy, ProxyState, Selectable, Selection};
use crate::settings::{GizmoSettings, InterfaceVisibility};
use crate::snap::{PointSnap, find_aligned_edge, snap_rotation, try_snap_to_point};
use crate::transform::Point;

/// Feedback colour for a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleTint {
    Normal,
    Snapped,
    Locked,
}

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// The effective disabled set was recomputed. Followed by a `TintHandle`
    /// for each handle whose locked state changed.
    HandlesDisabled { handles: HandleSet },
    /// Move the anchor to a world position.
    MoveAnchor { world: Point },
    /// Set the gizmo's visual rotation.
    SetRotation { degrees: f64 },
    /// Forward a rotation to the host's rotation-changed callback.
    RotationChanged { degrees: f64 },
    TintHandle { handle: HandleId, tint: HandleTint },
    SetInterfaceVisible { visible: bool },
    /// Replace the skew about to be committed.
    SetSkew { x: f64, y: f64 },
    /// Deactivate the gizmo. Always followed by `Activate`.
    Deactivate,
    /// Reactivate the gizmo from the current selection.
    Activate,
}

/// The handle drag in progress, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag; waiting for the next touch.
    #[default]
    Idle,
    /// A handle is being dragged.
    Dragging { handle: HandleId },
}

/// Per-gizmo mutable state.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GizmoState {
    /// Last known gizmo rotation in degrees.
    pub rotation: f64,
    pub snap_enabled: bool,
    pub free_rotation_enabled: bool,
    /// The rotation changed in free-rotation mode and has not been applied.
    pub free_rotation_dirty: bool,
    /// Rotation captured when leaving free-rotation mode, applied on reactivation.
    pub free_rotation_final_angle: f64,
    /// Rotation when free-rotation mode was entered; reported to the host
    /// while the gizmo turns freely.
    pub locked_rotation: f64,
    pub drag: DragState,
    /// Whether the gizmo is currently shown.
    pub active: bool,
    /// Set between `prepare_activation` and `on_activate`.
    pub activating: bool,
}

/// The active gizmo, owned by the integration shim.
#[derive(Debug)]
pub struct GizmoCore<O> {
    pub settings: GizmoSettings,
    pub state: GizmoState,
    pub mask: DisabledMask,
    proxy: FreeRotationProxy<O>,
    /// Handles the host currently shows as locked.
    tinted: HandleSet,
}

impl<O: Selectable> Default for GizmoCore<O> {
    fn default() -> Self {
        Self::new(GizmoSettings::default())
    }
}

impl<O: Selectable> GizmoCore<O> {
    /// A fresh gizmo with default state.
    #[must_use]
    pub fn new(settings: GizmoSettings) -> Self {
        Self {
            settings,
            state: GizmoState::default(),
            mask: DisabledMask::default(),
            proxy: FreeRotationProxy::new(),
            tinted: HandleSet::empty(),
        }
    }

    // --- Queries ---

    /// Handles that currently refuse interaction.
    #[must_use]
    pub fn disabled_handles(&self) -> HandleSet {
        self.mask.effective()
    }

    #[must_use]
    pub fn is_handle_enabled(&self, handle: HandleId) -> bool {
        !self.mask.is_disabled(handle)
    }

    /// Whether the drag in progress may be handed to the host.
    #[must_use]
    pub fn allows_drag(&self) -> bool {
        match self.state.drag {
            DragState::Dragging { handle } => self.is_handle_enabled(handle),
            DragState::Idle => false,
        }
    }

    #[must_use]
    pub fn proxy_state(&self) -> ProxyState {
        self.proxy.state()
    }

    /// Whether the rotation proxy is inside the selection right now.
    #[must_use]
    pub fn proxy_injected(&self) -> bool {
        self.proxy.is_injected()
    }

    // --- Toggles ---

    /// Flip anchor and rotation snapping. Returns the new value.
    pub fn toggle_snap(&mut self) -> bool {
        self.state.snap_enabled = !self.state.snap_enabled;
        tracing::debug!(enabled = self.state.snap_enabled, "snap toggled");
        self.state.snap_enabled
    }

    /// Enter free-rotation mode if off, leave it if on.
    pub fn toggle_free_rotation<F>(&mut self, factory: F) -> Result<Vec<Action>, GizmoError>
    where
        F: FnOnce() -> Result<O, GizmoError>,
    {
        if self.state.free_rotation_enabled {
            Ok(self.exit_free_rotation())
        } else {
            self.enter_free_rotation(factory)
        }
    }

    /// Lock the selection's rotation and disable everything but the rotation handle.
    ///
    /// Fails without changing any state if the proxy cannot be created.
    pub fn enter_free_rotation<F>(&mut self, factory: F) -> Result<Vec<Action>, GizmoError>
    where
        F: FnOnce() -> Result<O, GizmoError>,
    {
        if self.state.free_rotation_enabled {
            return Ok(Vec::new());
        }
        self.proxy.ensure_proxy(factory)?;

        self.state.free_rotation_enabled = true;
        self.state.locked_rotation = self.state.rotation;
        self.mask.rotation_mask = mask_for_free_rotation(true);
        tracing::info!(locked = self.state.locked_rotation, "free rotation on");
        Ok(self.mask_actions())
    }

    /// Leave free-rotation mode, applying a pending rotation through a
    /// deactivate/reactivate cycle.
    pub fn exit_free_rotation(&mut self) -> Vec<Action> {
        if !self.state.free_rotation_enabled {
            return Vec::new();
        }
        self.state.free_rotation_enabled = false;
        self.mask.rotation_mask = mask_for_free_rotation(false);

        if self.state.free_rotation_dirty {
            self.state.free_rotation_final_angle = self.state.rotation;
            self.proxy.schedule_reactivation();
            tracing::info!(angle = self.state.free_rotation_final_angle, "free rotation off; reactivating");
            return vec![Action::Deactivate, Action::Activate];
        }

        tracing::info!("free rotation off");
        self.mask_actions()
    }

    // --- Touch events ---

    /// Start dragging `handle`. Returns `false` if the handle is disabled, in
    /// which case the host must ignore the touch.
    pub fn on_touch_began(&mut self, handle: HandleId) -> bool {
        if !self.is_handle_enabled(handle) {
            tracing::debug!(?handle, "touch refused: handle disabled");
            self.state.drag = DragState::Idle;
            return false;
        }
        self.state.drag = DragState::Dragging { handle };
        true
    }

    /// React to a drag step the host has already applied.
    pub fn on_touch_moved(&mut self, layout: &HandleLayout) -> Vec<Action> {
        let DragState::Dragging { handle } = self.state.drag else {
            return Vec::new();
        };
        if !self.is_handle_enabled(handle) {
            return Vec::new();
        }

        self.state.rotation = layout.rotation;
        let mut actions = Vec::new();
        match handle {
            HandleId::Anchor if self.state.snap_enabled => self.snap_anchor(layout, &mut actions),
            HandleId::Rotation => self.rotate(layout, &mut actions),
            _ => {}
        }

        if self.settings.show_interface == InterfaceVisibility::OnInteraction {
            actions.push(Action::SetInterfaceVisible { visible: true });
        }
        actions
    }

    /// Finish a drag: work out where the anchor landed and disable the
    /// handles that would degenerate from there.
    pub fn on_touch_ended(&mut self, layout: &HandleLayout) -> Vec<Action> {
        let dragged = match self.state.drag {
            DragState::Dragging { handle } => Some(handle),
            DragState::Idle => None,
        };
        self.state.drag = DragState::Idle;
        self.state.rotation = layout.rotation;

        // Point snap decides for a snapped anchor drag; edge alignment for
        // everything else.
        let target = if dragged == Some(HandleId::Anchor) && self.state.snap_enabled {
            self.point_snap(layout).map(|snap| snap.target)
        } else {
            find_aligned_edge(layout, MAX_FP_ERROR)
        };
        self.mask.snap_mask = mask_for_alignment(target);
        tracing::debug!(?dragged, ?target, mask = self.mask.snap_mask.bits(), "touch ended");

        let mut actions = self.mask_actions();
        self.hide_interface_after_interaction(&mut actions);
        actions
    }

    /// Abandon a drag. Leaves the same state as a touch end without a point snap.
    pub fn on_touch_cancelled(&mut self, layout: &HandleLayout) -> Vec<Action> {
        self.state.drag = DragState::Idle;
        self.state.rotation = layout.rotation;
        let mut actions = self.refresh(layout);
        self.hide_interface_after_interaction(&mut actions);
        actions
    }

    // --- Activation ---

    /// Reset per-activation state. Call before the host activates the gizmo.
    pub fn prepare_activation(&mut self) {
        self.mask.clear();
        self.state.drag = DragState::Idle;
        self.state.activating = true;
        if self.state.free_rotation_enabled {
            self.state.free_rotation_enabled = false;
            tracing::debug!("free rotation dropped by activation");
        }
        if self.proxy.state() == ProxyState::RotationPending {
            self.proxy.discard_pending();
            self.state.free_rotation_dirty = false;
        }
    }

    /// Hook for the start of the host's recompute-from-selection. Injects the
    /// rotation proxy when a free rotation is being applied.
    pub fn begin_recompute(&mut self, selection: &mut Selection<O>) {
        if !self.state.activating || !self.state.free_rotation_dirty {
            return;
        }
        self.proxy.inject(selection, self.state.free_rotation_final_angle);
        self.state.free_rotation_dirty = false;
    }

    /// Hook called right before the host commits a transform to `selection`.
    ///
    /// Withdraws the proxy if present and substitutes a safe skew for the
    /// degenerate ±45° double skew.
    pub fn on_transform_commit(
        &mut self,
        selection: &mut Selection<O>,
        skew_x: f64,
        skew_y: f64,
    ) -> Vec<Action> {
        self.proxy.withdraw(selection);

        let mut actions = Vec::new();
        if let Some((x, y)) = clamp_skew(skew_x, skew_y) {
            tracing::debug!(from_x = skew_x, from_y = skew_y, x, y, "degenerate skew clamped");
            actions.push(Action::SetSkew { x, y });
        }
        actions
    }

    /// Hook for the end of the host's recompute-from-selection.
    pub fn end_recompute(&mut self, selection: &mut Selection<O>) {
        self.proxy.withdraw(selection);
        if self.state.activating {
            selection.unwrap_single();
        }
    }

    /// The host finished activating the gizmo.
    pub fn on_activate(&mut self, layout: &HandleLayout) -> Vec<Action> {
        self.state.activating = false;
        self.state.free_rotation_dirty = false;
        self.state.active = true;
        self.state.rotation = layout.rotation;

        let visible = self.settings.show_interface == InterfaceVisibility::Always;
        let mut actions = vec![Action::SetInterfaceVisible { visible }];
        actions.extend(self.refresh(layout));
        tracing::debug!(rotation = layout.rotation, "gizmo activated");
        actions
    }

    /// Run the full activation sequence. `derive` stands in for the host
    /// deriving the gizmo from the selection and returns the resulting layout.
    pub fn activate<F>(&mut self, selection: &mut Selection<O>, derive: F) -> Vec<Action>
    where
        F: FnOnce(&Selection<O>) -> HandleLayout,
    {
        self.prepare_activation();
        self.begin_recompute(selection);
        let layout = derive(selection);
        self.end_recompute(selection);
        self.on_activate(&layout)
    }

    pub fn on_deactivate(&mut self) {
        if self.proxy.is_injected() {
            tracing::warn!("gizmo deactivated while the rotation proxy is injected");
        }
        self.state.active = false;
        self.state.activating = false;
        self.state.drag = DragState::Idle;
    }

    // --- Undo / redo ---

    pub fn on_undo(&mut self, layout: &HandleLayout) -> Vec<Action> {
        if self.state.active { self.refresh(layout) } else { Vec::new() }
    }

    pub fn on_redo(&mut self, layout: &HandleLayout) -> Vec<Action> {
        if self.state.active { self.refresh(layout) } else { Vec::new() }
    }

    // --- Mask ---

    /// Recompute the snap mask from the anchor's current edge alignment and
    /// return the effective disabled set. Emits nothing; event handlers report
    /// the change to the host.
    pub fn refresh_disabled_mask(&mut self, layout: &HandleLayout) -> HandleSet {
        self.mask.snap_mask = mask_for_alignment(find_aligned_edge(layout, MAX_FP_ERROR));
        self.disabled_handles()
    }

    fn refresh(&mut self, layout: &HandleLayout) -> Vec<Action> {
        self.refresh_disabled_mask(layout);
        self.mask_actions()
    }

    /// Report the effective disabled set, then retint the handles whose
    /// locked state differs from what the host last showed.
    fn mask_actions(&mut self) -> Vec<Action> {
        let handles = self.disabled_handles();
        let mut actions = vec![Action::HandlesDisabled { handles }];
        for handle in HandleId::ALL {
            let locked = handles.contains(handle);
            if locked != self.tinted.contains(handle) {
                let tint = if locked { HandleTint::Locked } else { HandleTint::Normal };
                actions.push(Action::TintHandle { handle, tint });
            }
        }
        self.tinted = handles;
        actions
    }

    // --- Drag helpers ---

    fn point_snap(&self, layout: &HandleLayout) -> Option<PointSnap> {
        let radius = layout.handle_scale * self.settings.snap_radius;
        try_snap_to_point(layout, radius, self.settings.snap_center)
    }

    fn snap_anchor(&mut self, layout: &HandleLayout, actions: &mut Vec<Action>) {
        match self.point_snap(layout) {
            Some(snap) => {
                tracing::debug!(target = ?snap.target, "anchor snapped");
                actions.push(Action::MoveAnchor { world: snap.world });
                actions.push(Action::TintHandle { handle: HandleId::Anchor, tint: HandleTint::Snapped });
            }
            None => actions.push(Action::TintHandle { handle: HandleId::Anchor, tint: HandleTint::Normal }),
        }
    }

    fn rotate(&mut self, layout: &HandleLayout, actions: &mut Vec<Action>) {
        if self.state.snap_enabled {
            match snap_rotation(layout.rotation, self.settings.rotation_deadzone) {
                Some(degrees) => {
                    self.state.rotation = degrees;
                    actions.push(Action::SetRotation { degrees });
                    if !self.state.free_rotation_enabled {
                        actions.push(Action::RotationChanged { degrees });
                    }
                    actions.push(rotation_tint(HandleTint::Snapped));
                }
                None => actions.push(rotation_tint(HandleTint::Normal)),
            }
        }

        if self.state.free_rotation_enabled {
            self.state.free_rotation_dirty = true;
            self.proxy.mark_pending();
            actions.push(Action::RotationChanged { degrees: self.state.locked_rotation });
        }
    }

    fn hide_interface_after_interaction(&self, actions: &mut Vec<Action>) {
        if self.settings.show_interface == InterfaceVisibility::OnInteraction {
            actions.push(Action::SetInterfaceVisible { visible: false });
        }
    }
}

fn rotation_tint(tint: HandleTint) -> Action {
    Action::TintHandle { handle: HandleId::Rotation, tint }
}

/// Replacement skew for the degenerate double skew, if `(x, y)` is one.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn clamp_skew(x: f64, y: f64) -> Option<(f64, f64)> {
    if x == DEGENERATE_SKEW_DEG && y == DEGENERATE_SKEW_DEG {
        Some((CLAMPED_SKEW_DEG, CLAMPED_SKEW_DEG))
    } else if x == -DEGENERATE_SKEW_DEG && y == -DEGENERATE_SKEW_DEG {
        Some((-CLAMPED_SKEW_DEG, -CLAMPED_SKEW_DEG))
    } else {
        None
    }
}
