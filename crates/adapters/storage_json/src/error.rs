//! Storage-specific error type wrapping file and JSON errors.

use catpoint_domain::error::CatpointError;

/// Errors originating from the JSON storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the state file failed.
    #[error("state file I/O error")]
    Io(#[from] std::io::Error),

    /// The state file does not hold a valid state document.
    #[error("state file (de)serialization error")]
    Json(#[from] serde_json::Error),

    /// A previous writer panicked while holding the state lock.
    #[error("state lock poisoned")]
    LockPoisoned,
}

impl From<StorageError> for CatpointError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
