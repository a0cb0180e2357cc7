//! Gizmo settings parsed from environment variables.

use std::env::VarError;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ROTATION_DEADZONE_DEG, ROTATION_SNAP_DEADZONE_DEG, SNAP_RADIUS};
use crate::error::GizmoError;

/// When the rectangle overlay is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterfaceVisibility {
    #[default]
    Never,
    Always,
    /// Shown while a handle is being dragged.
    OnInteraction,
}

impl InterfaceVisibility {
    /// Parse a setting value. Accepts names or the host's numeric codes
    /// (`1` never, `2` always, `3` on interaction); other numbers fall back to
    /// `Never`.
    pub fn parse(raw: &str) -> Result<Self, GizmoError> {
        match raw.trim() {
            "never" => Ok(Self::Never),
            "always" => Ok(Self::Always),
            "on-interaction" | "on-change" => Ok(Self::OnInteraction),
            other => match other.parse::<i64>() {
                Ok(2) => Ok(Self::Always),
                Ok(3) => Ok(Self::OnInteraction),
                Ok(code) => {
                    if code != 1 {
                        tracing::warn!(code, "interface visibility out of range; using never");
                    }
                    Ok(Self::Never)
                }
                Err(_) => Err(GizmoError::Config {
                    var: "GIZMO_SHOW_INTERFACE",
                    message: format!("unknown value '{other}' (expected never, always or on-interaction)"),
                }),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoSettings {
    /// Whether the anchor also snaps to the rectangle's centre.
    pub snap_center: bool,
    pub show_interface: InterfaceVisibility,
    /// Anchor snap radius at a handle scale of 1.0.
    pub snap_radius: f64,
    /// Rotation snap deadzone in degrees.
    pub rotation_deadzone: f64,
}

impl Default for GizmoSettings {
    fn default() -> Self {
        Self {
            snap_center: false,
            show_interface: InterfaceVisibility::Never,
            snap_radius: SNAP_RADIUS,
            rotation_deadzone: ROTATION_SNAP_DEADZONE_DEG,
        }
    }
}

impl GizmoSettings {
    /// Build settings from environment variables.
    ///
    /// Optional:
    /// - `GIZMO_SNAP_CENTER`: `true`/`false`/`1`/`0` (default false)
    /// - `GIZMO_SHOW_INTERFACE`: `never` (default), `always`, `on-interaction`, or `1`-`3`
    /// - `GIZMO_SNAP_RADIUS`: default 18
    /// - `GIZMO_ROTATION_DEADZONE`: default 2, below 45
    pub fn from_env() -> Result<Self, GizmoError> {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Build settings from an arbitrary key lookup shaped like `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GizmoError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Self::default();
        let snap_center = match lookup("GIZMO_SNAP_CENTER") {
            Ok(raw) => parse_bool("GIZMO_SNAP_CENTER", &raw)?,
            Err(_) => defaults.snap_center,
        };
        let show_interface = match lookup("GIZMO_SHOW_INTERFACE") {
            Ok(raw) => InterfaceVisibility::parse(&raw)?,
            Err(_) => defaults.show_interface,
        };
        let snap_radius = match lookup("GIZMO_SNAP_RADIUS") {
            Ok(raw) => parse_non_negative("GIZMO_SNAP_RADIUS", &raw)?,
            Err(_) => defaults.snap_radius,
        };
        let rotation_deadzone = match lookup("GIZMO_ROTATION_DEADZONE") {
            Ok(raw) => parse_non_negative("GIZMO_ROTATION_DEADZONE", &raw)?,
            Err(_) => defaults.rotation_deadzone,
        };

        let settings = Self { snap_center, show_interface, snap_radius, rotation_deadzone };
        settings.validate()?;
        Ok(settings)
    }

    /// Check ranges that parsing alone cannot, for settings from any source.
    pub fn validate(&self) -> Result<(), GizmoError> {
        if !self.snap_radius.is_finite() || self.snap_radius < 0.0 {
            return Err(GizmoError::Config {
                var: "GIZMO_SNAP_RADIUS",
                message: format!("expected a non-negative number, got {}", self.snap_radius),
            });
        }
        if !(0.0..MAX_ROTATION_DEADZONE_DEG).contains(&self.rotation_deadzone) {
            return Err(GizmoError::Config {
                var: "GIZMO_ROTATION_DEADZONE",
                message: format!(
                    "expected at least 0 and below {MAX_ROTATION_DEADZONE_DEG}, got {}",
                    self.rotation_deadzone
                ),
            });
        }
        Ok(())
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, GizmoError> {
    match raw.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(GizmoError::Config { var, message: format!("expected a boolean, got '{other}'") }),
    }
}

fn parse_non_negative(var: &'static str, raw: &str) -> Result<f64, GizmoError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(GizmoError::Config { var, message: format!("expected a non-negative number, got '{raw}'") }),
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
