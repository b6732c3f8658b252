//! Storage configuration.

use std::env::VarError;
use std::path::PathBuf;

use crate::error::StorageError;
use crate::security_repo::JsonSecurityRepository;

/// Configuration for the JSON storage adapter.
pub struct Config {
    /// Location of the state file (e.g. `catpoint-state.json`).
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("catpoint-state.json"),
        }
    }
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `CATPOINT_STATE_PATH` is not set.
    pub fn from_env() -> Result<Self, VarError> {
        Self::from_lookup(std::env::var)
    }

    fn from_lookup(
        var: impl Fn(&'static str) -> Result<String, VarError>,
    ) -> Result<Self, VarError> {
        Ok(Self {
            path: var("CATPOINT_STATE_PATH")?.into(),
        })
    }

    /// Open the repository described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the state file exists but cannot be read
    /// or parsed.
    pub fn build(self) -> Result<JsonSecurityRepository, StorageError> {
        JsonSecurityRepository::open(self.path)
    }
}
