//! Custom error types for hrmigrate

use crate::models::EntityKind;
use thiserror::Error;

/// Main error type for hrmigrate operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Error parsing CSV file: {0}")]
    Decode(String),

    #[error("Batch size must be between 1 and 1000 rows. Received: {count}")]
    BatchSize { count: usize },

    #[error(
        "{} CSV must have {expected} columns: {} (row {row} has {found})",
        .kind.title_plural(),
        .kind.columns().join(", ")
    )]
    ColumnCount {
        kind: EntityKind,
        expected: usize,
        found: usize,
        row: usize,
    },

    #[error("Row {row}: column '{column}' expected {expected}, got {value:?}")]
    TypeCoercion {
        row: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Unknown entity kind: {0} (expected department, job or employee)")]
    UnknownKind(String),

    #[error("Already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Faults caused by the submitted data rather than the service.
    /// All of these are raised before anything is written.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Decode(_)
                | Error::BatchSize { .. }
                | Error::ColumnCount { .. }
                | Error::TypeCoercion { .. }
                | Error::InvalidPayload(_)
                | Error::UnknownKind(_)
        )
    }
}

/// Result type alias for hrmigrate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_size_message() {
        let err = Error::BatchSize { count: 1001 };
        assert_eq!(
            err.to_string(),
            "Batch size must be between 1 and 1000 rows. Received: 1001"
        );
    }

    #[test]
    fn test_column_count_message_names_expected() {
        let err = Error::ColumnCount {
            kind: EntityKind::Employee,
            expected: 5,
            found: 3,
            row: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("5 columns"));
        assert!(msg.contains("id, name, datetime, department_id, job_id"));
        assert!(msg.contains("row 2 has 3"));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::Decode("bad".into()).is_client_error());
        assert!(Error::BatchSize { count: 0 }.is_client_error());
        assert!(Error::InvalidPayload("empty".into()).is_client_error());
        assert!(Error::UnknownKind("manager".into()).is_client_error());
        assert!(!Error::Database(sqlx::Error::RowNotFound).is_client_error());
        assert!(!Error::Config("x".into()).is_client_error());
    }
}
