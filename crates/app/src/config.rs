//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `catpoint.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::Path;

use serde::Deserialize;

/// Cat-confidence threshold used when none is configured.
pub const DEFAULT_CAT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Alarm decision settings.
    pub security: SecurityConfig,
}

/// Settings of the [`SecurityService`](crate::services::security_service::SecurityService).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Minimum classifier confidence (`0.0..=1.0`) for a frame to count as
    /// showing a cat.
    pub cat_confidence_threshold: f32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cat_confidence_threshold: DEFAULT_CAT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl SecurityConfig {
    /// Check that the threshold is a usable probability.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the threshold is not in
    /// `0.0..=1.0` (NaN included).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.cat_confidence_threshold) {
            return Err(ConfigError::Validation(format!(
                "cat_confidence_threshold must be within 0.0..=1.0, got {}",
                self.cat_confidence_threshold
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from `catpoint.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting values are invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("catpoint.toml")
    }

    /// Same as [`load`](Self::load) with an explicit file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting values are invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with(path.as_ref(), |key| std::env::var(key).ok())
    }

    fn load_with(
        path: &Path,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(var);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("CATPOINT_CAT_CONFIDENCE_THRESHOLD") {
            if let Ok(threshold) = val.parse() {
                self.security.cat_confidence_threshold = threshold;
            } else {
                tracing::warn!(value = %val, "ignoring unparsable CATPOINT_CAT_CONFIDENCE_THRESHOLD");
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.security.validate()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
