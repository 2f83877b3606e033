//! Error types for Wayfinder.
//!
//! Only hard failures are errors. "Nothing found" outcomes (no route, no tile
//! overlap, no name match) are reported as empty results instead.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WayfinderError>;

#[derive(Debug, Error)]
pub enum WayfinderError {
    /// A query was issued against an empty or unbuilt structure.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Caller-supplied coordinates, bounds or names cannot be used.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[cfg(feature = "toml")]
    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

impl WayfinderError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        WayfinderError::InvalidInput {
            message: message.into(),
        }
    }
}
