use std::io;

/// Custom error type for cdw_planner operations
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("Malformed webhook payload: {0}")]
    MalformedPayload(String),

    #[error("Lookup failed for '{path}': {message}")]
    LookupFailed { path: String, message: String },

    #[error("Workshop is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Folder '{0}' is not a date (expected YYYY-MM-DD)")]
    InvalidDateFolder(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

/// Helper type for Results that use PlannerError
pub type Result<T> = std::result::Result<T, PlannerError>;
