//! Tabular error types.

use thiserror::Error;

/// Result type alias for tabular operations
pub type Result<T> = std::result::Result<T, TabularError>;

/// Errors that can occur while loading the training table
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TabularError {
    /// Source file could not be opened
    #[error("Failed to read '{path}': {reason}")]
    ReadError { path: String, reason: String },

    /// Source could not be parsed as CSV
    #[error("Failed to parse table: {0}")]
    ParseError(String),

    /// A required column is absent
    #[error("Missing required column '{name}'")]
    MissingColumn { name: String },

    /// Two cleaned rows share an identifier
    #[error("Duplicate identifier '{id}'")]
    DuplicateIdentifier { id: String },

    /// A non-empty feature cell is not numeric
    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        column: String,
        value: String,
        row: usize,
    },

    /// A label outside the binary domain
    #[error("Invalid label '{value}' at row {row}: labels must be 0 or 1")]
    InvalidLabel { value: String, row: usize },

    /// Table structure is internally inconsistent
    #[error("Misaligned table: {0}")]
    Misaligned(String),

    /// Cleaning removed every row
    #[error("No rows remain after cleaning")]
    EmptyTable,
}
