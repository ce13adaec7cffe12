//! Custom error types for the profiling engine.
//!
//! The engine never fails on malformed data values; those degrade into
//! per-column anomalies. Errors here represent broken caller contracts
//! (duplicate column names, rows missing a declared column) and I/O or
//! serialization failures at the reporting boundary.
//!
//! Errors are serializable so a host application can forward them to a
//! frontend for display.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// The main error type for profiling operations.
#[derive(Error, Debug)]
pub enum ProfilingError {
    /// The declared column list contains a duplicate name.
    #[error("Duplicate column '{0}' in declared column list")]
    DuplicateColumn(String),

    /// A row omits a declared column entirely (rather than holding a
    /// missing marker).
    #[error("Row {row} is missing declared column '{column}'")]
    ColumnNotFound { column: String, row: usize },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ProfilingError>,
    },
}

impl ProfilingError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ProfilingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateColumn(_) => "DUPLICATE_COLUMN",
            Self::ColumnNotFound { .. } => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Json(_) => "JSON_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error indicates a broken upstream ingestion guarantee.
    pub fn is_contract_violation(&self) -> bool {
        match self {
            Self::DuplicateColumn(_) | Self::ColumnNotFound { .. } => true,
            Self::WithContext { source, .. } => source.is_contract_violation(),
            _ => false,
        }
    }
}

/// Serialize implementation for frontend compatibility.
///
/// Errors are serialized as a struct with `code` and `message` fields,
/// making them easy to handle in a UI layer.
impl Serialize for ProfilingError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ProfilingError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for profiling operations.
pub type Result<T> = std::result::Result<T, ProfilingError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            ProfilingError::DuplicateColumn("age".to_string()).error_code(),
            "DUPLICATE_COLUMN"
        );
        assert_eq!(
            ProfilingError::ColumnNotFound {
                column: "age".to_string(),
                row: 3
            }
            .error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_is_contract_violation() {
        assert!(ProfilingError::DuplicateColumn("x".to_string()).is_contract_violation());
        assert!(
            ProfilingError::ColumnNotFound {
                column: "x".to_string(),
                row: 0
            }
            .with_context("while validating dataset")
            .is_contract_violation()
        );
    }

    #[test]
    fn test_error_serialization() {
        let error = ProfilingError::ColumnNotFound {
            column: "Age".to_string(),
            row: 7,
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_with_context() {
        let error = ProfilingError::DuplicateColumn("id".to_string())
            .with_context("During dataset validation");
        assert!(error.to_string().contains("During dataset validation"));
        assert_eq!(error.error_code(), "DUPLICATE_COLUMN"); // Preserves original code
    }
}
