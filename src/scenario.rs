//! Scenario replay: a simulated host driving a [`GizmoCore`].
//!
//! A scenario describes a selection, the rectangle the host would derive from
//! it, and an ordered list of user steps. The [`Host`] applies each step the way
//! the editor would, forwards it to the core, applies the returned actions, and
//! records them as output lines.

#[cfg(test)]
#[path = "scenario_test.rs"]
mod scenario_test;

use gizmo::core::{Action, DragState, GizmoCore};
use gizmo::error::GizmoError;
use gizmo::handle::{HandleId, HandleLayout, HandleSet};
use gizmo::mask::mask_for_alignment;
use gizmo::proxy::{Selectable, Selection};
use gizmo::settings::GizmoSettings;
use gizmo::transform::Point;
use serde::{Deserialize, Serialize};

/// Id given to the free-rotation proxy object.
pub const PROXY_ID: u32 = u32::MAX;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Overrides the environment when present.
    #[serde(default)]
    pub settings: Option<GizmoSettings>,
    pub selection: Vec<SceneObject>,
    pub layout: RectSpec,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Selectable for SceneObject {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn place(&mut self, position: Point, rotation_deg: f64) {
        self.x = position.x;
        self.y = position.y;
        self.rotation = rotation_deg;
    }
}

/// The rectangle the host derives from the selection.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RectSpec {
    pub half_width: f64,
    pub half_height: f64,
    #[serde(default = "default_handle_scale")]
    pub handle_scale: f64,
}

fn default_handle_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Activate,
    ToggleSnap,
    ToggleFreeRotation,
    TouchBegan { handle: HandleId },
    /// Drag the anchor to a world position.
    MoveAnchor { x: f64, y: f64 },
    /// Drag the rotation handle to an absolute angle.
    Rotate { degrees: f64 },
    TouchEnded,
    TouchCancelled,
    Undo,
    Redo,
    /// Commit the transform to the selection with the given skew.
    Commit {
        #[serde(default)]
        skew_x: f64,
        #[serde(default)]
        skew_y: f64,
    },
    Deactivate,
}

/// One emitted action, tagged with the step that caused it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub step: usize,
    #[serde(flatten)]
    pub action: Action,
}

/// One row of the alignment mask table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaskRow {
    pub alignment: Option<HandleId>,
    pub mask: HandleSet,
    pub handles: Vec<HandleId>,
}

/// The disabled set for every possible alignment result.
#[must_use]
pub fn mask_table() -> Vec<MaskRow> {
    std::iter::once(None)
        .chain(HandleId::ALL.into_iter().map(Some))
        .map(|alignment| {
            let mask = mask_for_alignment(alignment);
            MaskRow { alignment, mask, handles: mask.iter().collect() }
        })
        .collect()
}

/// The editor side of the integration: owns the selection and the gizmo geometry.
#[derive(Debug)]
pub struct Host {
    pub core: GizmoCore<SceneObject>,
    pub selection: Selection<SceneObject>,
    pub layout: HandleLayout,
    rect: RectSpec,
    /// Last rotation the host was told to apply to the selection.
    reported_rotation: f64,
    lines: Vec<Line>,
}

impl Host {
    #[must_use]
    pub fn new(settings: GizmoSettings, objects: Vec<SceneObject>, rect: RectSpec) -> Self {
        let layout = derive_layout(rect, 0.0);
        Self {
            core: GizmoCore::new(settings),
            selection: Selection::from_vec(objects),
            layout,
            rect,
            reported_rotation: 0.0,
            lines: Vec::new(),
        }
    }

    /// Replay every step of `scenario` and return the emitted lines.
    pub fn replay(scenario: Scenario, settings: GizmoSettings) -> Result<Vec<Line>, GizmoError> {
        settings.validate()?;
        let mut host = Self::new(settings, scenario.selection, scenario.layout);
        for (index, step) in scenario.steps.into_iter().enumerate() {
            host.apply(index, step)?;
        }
        Ok(host.lines)
    }

    /// Apply one user step.
    pub fn apply(&mut self, index: usize, step: Step) -> Result<(), GizmoError> {
        tracing::debug!(index, ?step, "step");
        let actions = match step {
            Step::Activate => self.activate(),
            Step::ToggleSnap => {
                self.core.toggle_snap();
                Vec::new()
            }
            Step::ToggleFreeRotation => self.core.toggle_free_rotation(make_proxy)?,
            Step::TouchBegan { handle } => {
                if !self.core.on_touch_began(handle) {
                    tracing::info!(index, ?handle, "touch refused");
                }
                Vec::new()
            }
            Step::MoveAnchor { x, y } => {
                if self.dragging(HandleId::Anchor) {
                    self.layout.anchor = Point::new(x, y);
                }
                self.core.on_touch_moved(&self.layout)
            }
            Step::Rotate { degrees } => {
                if self.dragging(HandleId::Rotation) {
                    self.layout.rotation = degrees;
                    self.reported_rotation = degrees;
                }
                self.core.on_touch_moved(&self.layout)
            }
            Step::TouchEnded => self.core.on_touch_ended(&self.layout),
            Step::TouchCancelled => self.core.on_touch_cancelled(&self.layout),
            Step::Undo => self.core.on_undo(&self.layout),
            Step::Redo => self.core.on_redo(&self.layout),
            Step::Commit { skew_x, skew_y } => self.commit(skew_x, skew_y),
            Step::Deactivate => {
                self.core.on_deactivate();
                Vec::new()
            }
        };
        self.process(index, actions);
        Ok(())
    }

    fn dragging(&self, handle: HandleId) -> bool {
        self.core.allows_drag() && self.core.state.drag == DragState::Dragging { handle }
    }

    fn activate(&mut self) -> Vec<Action> {
        let rect = self.rect;
        let mut derived = self.layout;
        let actions = self.core.activate(&mut self.selection, |selection| {
            derived = derive_layout(rect, selection.first().map_or(0.0, |o| o.rotation));
            derived
        });
        self.layout = derived;
        self.reported_rotation = derived.rotation;
        actions
    }

    fn commit(&mut self, skew_x: f64, skew_y: f64) -> Vec<Action> {
        let actions = self.core.on_transform_commit(&mut self.selection, skew_x, skew_y);
        for obj in self.selection.as_mut_slice() {
            obj.rotation = self.reported_rotation;
        }
        actions
    }

    /// Record actions and apply the ones that change host state. A
    /// deactivate/activate request runs a full reactivation.
    fn process(&mut self, index: usize, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::MoveAnchor { world } => self.layout.anchor = world,
                Action::SetRotation { degrees } => self.layout.rotation = degrees,
                Action::RotationChanged { degrees } => self.reported_rotation = degrees,
                Action::Deactivate => self.core.on_deactivate(),
                _ => {}
            }
            let reactivate = action == Action::Activate;
            self.lines.push(Line { step: index, action });
            if reactivate {
                let follow_up = self.activate();
                self.process(index, follow_up);
            }
        }
    }
}

fn derive_layout(rect: RectSpec, rotation: f64) -> HandleLayout {
    HandleLayout::rect(rect.half_width, rect.half_height, rotation).with_handle_scale(rect.handle_scale)
}

#[allow(clippy::unnecessary_wraps)]
fn make_proxy() -> Result<SceneObject, GizmoError> {
    Ok(SceneObject { id: PROXY_ID, x: 0.0, y: 0.0, rotation: 0.0 })
}
