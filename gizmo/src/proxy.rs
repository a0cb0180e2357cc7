//! Free-rotation proxy: rotating the gizmo without rotating the selection.
//!
//! The host derives a freshly activated gizmo's rotation from the *first*
//! selected object. To apply a rotation chosen in free-rotation mode, a
//! synthetic proxy object carrying that rotation is spliced into slot 0 of the
//! selection for the duration of the host's recompute, then withdrawn before
//! any transform is committed.
//!
//! ```text
//! Idle ──drag rotation──▶ RotationPending ──exit mode──▶ Reactivating
//!   ▲                                                         │ recompute
//!   └────────────── withdraw ◀──────── ProxyInjected ◀────────┘
//! ```

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use crate::error::GizmoError;
use crate::transform::Point;

/// An object the host can place in its selection.
pub trait Selectable {
    /// World position used to seat the proxy on top of a real object.
    fn position(&self) -> Point;

    /// Overwrite the object's position and rotation.
    fn place(&mut self, position: Point, rotation_deg: f64);
}

/// The host's selection.
///
/// A single selected object is a scalar reference, never a one-element list.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<O> {
    Empty,
    Single(O),
    Many(Vec<O>),
}

impl<O> Default for Selection<O> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<O> Selection<O> {
    /// Build a selection from a list, using the scalar form for one object.
    #[must_use]
    pub fn from_vec(mut items: Vec<O>) -> Self {
        match items.len() {
            0 => Self::Empty,
            1 => items.pop().map_or(Self::Empty, Self::Single),
            _ => Self::Many(items),
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[O] {
        match self {
            Self::Empty => &[],
            Self::Single(obj) => std::slice::from_ref(obj),
            Self::Many(items) => items,
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [O] {
        match self {
            Self::Empty => &mut [],
            Self::Single(obj) => std::slice::from_mut(obj),
            Self::Many(items) => items,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&O> {
        self.as_slice().first()
    }

    /// Collapse a one-element list back into the scalar form.
    pub fn unwrap_single(&mut self) {
        if let Self::Many(items) = self {
            if items.len() == 1 {
                if let Some(obj) = items.pop() {
                    *self = Self::Single(obj);
                }
            }
        }
    }
}

/// Where the free-rotation protocol currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxyState {
    #[default]
    Idle,
    /// The rotation handle moved in free-rotation mode; nothing applied yet.
    RotationPending,
    /// Free-rotation mode was left with a pending rotation; the host has been
    /// asked to deactivate and reactivate the gizmo.
    Reactivating,
    /// The proxy occupies slot 0 of the selection.
    ProxyInjected,
}

/// Owns the proxy object and splices it in and out of the selection.
#[derive(Debug)]
pub struct FreeRotationProxy<O> {
    state: ProxyState,
    /// Held here whenever it is not in the selection.
    proxy: Option<O>,
}

impl<O> Default for FreeRotationProxy<O> {
    fn default() -> Self {
        Self { state: ProxyState::Idle, proxy: None }
    }
}

impl<O: Selectable> FreeRotationProxy<O> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> ProxyState {
        self.state
    }

    /// Whether the proxy is currently inside the host's selection.
    #[must_use]
    pub fn is_injected(&self) -> bool {
        self.state == ProxyState::ProxyInjected
    }

    /// Whether a proxy object has been created, injected or not.
    #[must_use]
    pub fn has_proxy(&self) -> bool {
        self.proxy.is_some() || self.is_injected()
    }

    /// Create the proxy on first use; later calls reuse it.
    pub fn ensure_proxy<F>(&mut self, factory: F) -> Result<(), GizmoError>
    where
        F: FnOnce() -> Result<O, GizmoError>,
    {
        if !self.has_proxy() {
            self.proxy = Some(factory()?);
            tracing::debug!("rotation proxy created");
        }
        Ok(())
    }

    /// Record that a free rotation is waiting to be applied.
    pub fn mark_pending(&mut self) {
        if self.state == ProxyState::Idle {
            self.state = ProxyState::RotationPending;
        }
    }

    /// Move a pending rotation to the reactivation step.
    pub fn schedule_reactivation(&mut self) {
        if self.state == ProxyState::RotationPending {
            self.state = ProxyState::Reactivating;
        }
    }

    /// Drop a pending rotation that will never be applied.
    pub fn discard_pending(&mut self) {
        if matches!(self.state, ProxyState::RotationPending | ProxyState::Reactivating) {
            self.state = ProxyState::Idle;
        }
    }

    /// Splice the proxy into slot 0 of `selection`, rotated to `rotation_deg`.
    ///
    /// Only acts while reactivating. Returns whether the proxy was injected;
    /// an empty selection leaves everything untouched and ends the protocol.
    pub fn inject(&mut self, selection: &mut Selection<O>, rotation_deg: f64) -> bool {
        if self.state != ProxyState::Reactivating {
            return false;
        }
        self.state = ProxyState::Idle;
        let Some(mut proxy) = self.proxy.take() else {
            tracing::warn!("reactivating without a rotation proxy");
            return false;
        };

        match std::mem::take(selection) {
            Selection::Single(obj) => {
                proxy.place(obj.position(), rotation_deg);
                *selection = Selection::Many(vec![proxy, obj]);
            }
            Selection::Many(mut items) if !items.is_empty() => {
                proxy.place(items[0].position(), rotation_deg);
                let first = std::mem::replace(&mut items[0], proxy);
                items.push(first);
                *selection = Selection::Many(items);
            }
            other => {
                *selection = other;
                self.proxy = Some(proxy);
                tracing::debug!("nothing selected; rotation proxy not injected");
                return false;
            }
        }

        self.state = ProxyState::ProxyInjected;
        tracing::debug!(rotation = rotation_deg, len = selection.len(), "rotation proxy injected");
        true
    }

    /// Take the proxy back out of slot 0 and restore the selection's order.
    ///
    /// Returns whether a proxy was withdrawn.
    pub fn withdraw(&mut self, selection: &mut Selection<O>) -> bool {
        if self.state != ProxyState::ProxyInjected {
            return false;
        }
        self.state = ProxyState::Idle;

        let Selection::Many(items) = selection else {
            tracing::warn!("rotation proxy lost: selection changed while injected");
            return false;
        };
        if items.is_empty() {
            tracing::warn!("rotation proxy lost: selection emptied while injected");
            return false;
        }

        // Swapping the last item into slot 0 undoes the rotate-to-end splice.
        self.proxy = Some(items.swap_remove(0));
        selection.unwrap_single();
        tracing::debug!(len = selection.len(), "rotation proxy withdrawn");
        true
    }
}
