//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`CatpointError`] via `From`.

use std::error::Error as StdError;

/// Boxed source error coming from an adapter.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Top-level error returned by ports and application services.
#[derive(Debug, thiserror::Error)]
pub enum CatpointError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The requested item does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The repository failed to read or write state.
    #[error("storage error")]
    Storage(#[source] BoxError),

    /// The image classifier failed to analyse a frame.
    #[error("image classifier error")]
    Classifier(#[source] BoxError),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A sensor name was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// A confidence threshold fell outside `0.0..=1.0`.
    #[error("confidence threshold {0} is outside 0.0..=1.0")]
    InvalidConfidenceThreshold(f32),
}

/// Lookup failure for an identified item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of item that was looked up (e.g. `"Sensor"`).
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}
