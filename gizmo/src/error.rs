//! Error type for the gizmo crate.

/// Errors surfaced by the gizmo core.
///
/// Absence of a snap or alignment is never an error; those are `Option`s.
#[derive(Debug, thiserror::Error)]
pub enum GizmoError {
    /// The host could not provide the rotation proxy object.
    #[error("rotation proxy unavailable: {0}")]
    ProxyUnavailable(String),
    /// A settings value could not be parsed.
    #[error("invalid setting {var}: {message}")]
    Config { var: &'static str, message: String },
}
