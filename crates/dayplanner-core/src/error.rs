//! Core error types for dayplanner-core.
//!
//! Validation failures are raised at the boundary where raw events and tasks
//! become intervals. The layout algorithm itself never fails; it only records
//! [`InvariantViolation`]s when its own bookkeeping goes wrong.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayplanner-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors for items entering the layout engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A task's scheduled time is not a valid `HH:MM` string
    #[error("Task '{task_id}' has an invalid scheduled time '{value}' (expected HH:MM)")]
    InvalidScheduledTime { task_id: String, value: String },

    /// End does not come after start
    #[error("Item '{id}' has an invalid time range: end ({end}) must be after start ({start})")]
    InvalidTimeRange {
        id: String,
        start: String,
        end: String,
    },

    /// Two items in one batch share an id
    #[error("Duplicate item id '{id}'")]
    DuplicateId { id: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Id of the offending item, when the error concerns a single item.
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Self::InvalidScheduledTime { task_id, .. } => Some(task_id),
            Self::InvalidTimeRange { id, .. } | Self::DuplicateId { id } => Some(id),
            Self::InvalidValue { .. } => None,
        }
    }
}

/// Column assignment could not place an interval even though the cluster's
/// peak concurrency said there was room. The interval was put in column 0.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Interval '{id}' did not fit in any of {total_columns} column(s); placed in column 0")]
pub struct InvariantViolation {
    pub id: String,
    pub total_columns: usize,
}

/// Error returned by the layout entry points.
pub type LayoutError = ValidationError;

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_time_error_names_task() {
        let err = ValidationError::InvalidScheduledTime {
            task_id: "task-7".to_string(),
            value: "9am".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("task-7"));
        assert!(message.contains("9am"));
        assert_eq!(err.item_id(), Some("task-7"));
    }

    #[test]
    fn validation_converts_into_core_error() {
        let err: CoreError = ValidationError::DuplicateId { id: "a".into() }.into();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(err.to_string(), "Validation error: Duplicate item id 'a'");
    }
}
