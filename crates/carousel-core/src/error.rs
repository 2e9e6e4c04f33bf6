//! Error types for carousel setup and configuration.
//!
//! Navigation itself never fails: out-of-range indices clamp, hidden targets
//! fall back, and missing optional collaborators disable their feature.

use thiserror::Error;

/// Errors raised while mounting a carousel.
#[derive(Debug, Error)]
pub enum CarouselError {
    /// No scrollable slide container was found.
    #[error("Viewport unresolved: no scrollable slide container")]
    ViewportUnresolved,

    /// Configuration was rejected.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of its accepted range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Option name
        field: &'static str,
        /// Error message
        message: String,
    },
}
