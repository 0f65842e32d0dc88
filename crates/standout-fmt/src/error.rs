//! Error types for the fmt crate.
//!
//! Rendering itself never fails: count mismatches become diagnostic text and
//! bounded output truncates silently. Errors only arise when loading a
//! [`FmtConfig`](crate::FmtConfig) or from the destination of a stream.

use thiserror::Error;

/// Errors that can occur when loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML source could not be parsed.
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON source could not be parsed.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The placeholder character cannot be used.
    #[error("invalid placeholder {0:?}: must be a printable, non-NUL character")]
    InvalidPlaceholder(char),

    /// A diagnostic marker that must be visible was configured empty.
    #[error("diagnostic marker '{0}' must not be empty")]
    EmptyMarker(&'static str),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
