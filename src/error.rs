//! Error types for settings loading and validation.
//!
//! The simulation itself never fails: degenerate geometry is handled by
//! guarded policies inside `sim`. Only the settings surface can be rejected.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or validating [`crate::Settings`].
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings JSON was malformed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is outside the range the simulation can use
    #[error("invalid setting `{name}` = {value}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl SettingsError {
    /// Creates a validation error for a named field.
    #[must_use]
    pub fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::Invalid {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
