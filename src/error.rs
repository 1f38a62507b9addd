//! Error types for the extension builder.

use thiserror::Error;

/// Command-level errors
#[derive(Debug, Error)]
pub enum BuilderError {
    /// Missing required identifying input (extension and/or path)
    #[error("{0}")]
    InvalidArgument(String),

    /// Supplied input that does not parse or is not allowed
    #[error("{0}")]
    InvalidInput(String),

    #[error("Extension not found: {0}")]
    NotFound(String),

    #[error("Extension already exists: {0}")]
    AlreadyExists(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BuilderError {
    /// The precondition shared by the lint commands.
    pub fn missing_extension_or_path() -> Self {
        BuilderError::InvalidArgument(
            "Either \"extension\" or \"path\" or both must be specified".to_string(),
        )
    }
}

impl From<config::ConfigError> for BuilderError {
    fn from(err: config::ConfigError) -> Self {
        BuilderError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for BuilderError {
    fn from(err: serde_json::Error) -> Self {
        BuilderError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for BuilderError {
    fn from(err: toml::ser::Error) -> Self {
        BuilderError::Serialization(err.to_string())
    }
}

/// Per-file check failure reported by a checker.
///
/// Never aborts a scan; it travels inside a `CheckResult`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({code})")]
pub struct CheckError {
    pub message: String,
    pub code: i64,
}

impl CheckError {
    pub fn new(message: impl Into<String>, code: i64) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}
