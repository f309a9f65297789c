/// Error types shared across the vol3d crates
use thiserror::Error;

/// Unified error type for scene construction and export.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A runtime-sized vector had the wrong number of components.
    #[error("expected {expected} vector components, got {got}")]
    Dimension { expected: usize, got: usize },

    /// An unrecognized material kind was requested.
    #[error("unknown material kind: {0}")]
    InvalidMaterial(String),

    /// A scene description could not be parsed.
    #[error("scene description parse error: {0}")]
    Parse(String),

    /// An external renderer collaborator failed.
    #[error("{renderer} failed: {reason}")]
    RenderFailure { renderer: String, reason: String },

    /// I/O failure while writing frame output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, SceneError>`.
pub type SceneResult<T> = Result<T, SceneError>;
