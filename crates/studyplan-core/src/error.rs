//! Core error types for studyplan-core.
//!
//! Generation only fails on invalid configuration. Everything that comes from
//! outside the process (settings documents, CLI arguments, the config file)
//! fails with `MalformedInput` or `Config` before it reaches the planner.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Constraints that make generation impossible; nothing is generated.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ValidationError),

    /// Unparseable or structurally invalid input
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] InputError),

    /// Application configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Violations of the scheduling constraints.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Minimum session length above the maximum
    #[error("min_session_minutes ({min}) must not exceed max_session_minutes ({max})")]
    SessionBounds { min: u32, max: u32 },

    /// A value that must be positive is zero
    #[error("'{field}' must be greater than zero")]
    NotPositive { field: String },

    /// A subject attribute outside its allowed range
    #[error("{field} of subject '{subject}' is {value}, expected {min}..={max}")]
    OutOfRange {
        subject: String,
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Negative or non-finite goal
    #[error("goal_hours of subject '{subject}' must be a non-negative number, got {value}")]
    InvalidGoal { subject: String, value: f64 },

    /// Two subjects with the same name
    #[error("Duplicate subject name: {0}")]
    DuplicateSubject(String),

    /// Subject with a blank name
    #[error("Subject name must not be empty")]
    EmptySubjectName,

    /// Lookup of a subject that is not present
    #[error("Unknown subject: {0}")]
    UnknownSubject(String),

    /// Window index past the end of a day's list
    #[error("Index {index} out of bounds for {day} (length: {len})")]
    WindowOutOfBounds { day: String, index: usize, len: usize },
}

/// Errors from parsing externally supplied data.
#[derive(Error, Debug)]
pub enum InputError {
    /// Time string that is not `HH:MM` or `HH:MM:SS`
    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    /// Unrecognized weekday name
    #[error("Unknown day '{0}'")]
    UnknownDay(String),

    /// Settings document that cannot be parsed
    #[error("Invalid settings document{}: {source}", path_suffix(.path))]
    Document {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    /// Unknown output format name
    #[error("Unknown output format '{0}' (expected table, markdown, csv or json)")]
    UnknownFormat(String),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" at {}", p.display()),
        None => String::new(),
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key that does not exist
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home or config directory cannot be used
    #[error("Configuration directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts_to_invalid_configuration() {
        let err: CoreError = ValidationError::SessionBounds { min: 90, max: 60 }.into();
        assert!(matches!(err, CoreError::InvalidConfiguration(_)));
        assert_eq!(
            err.to_string(),
            "Invalid configuration: min_session_minutes (90) must not exceed max_session_minutes (60)"
        );
    }

    #[test]
    fn document_error_mentions_path() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = InputError::Document {
            path: Some(PathBuf::from("plan.json")),
            source,
        };
        assert!(err.to_string().starts_with("Invalid settings document at plan.json:"));
    }
}
