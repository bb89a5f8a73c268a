//! Selection error types.

use thiserror::Error;

/// Result type alias for selection operations
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Errors that can occur during search, evaluation and reporting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// A grid enumerated no candidates
    #[error("Empty parameter grid for {family}")]
    EmptyGrid { family: String },

    /// Invalid configuration value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Too few rows for the requested folds or split
    #[error("Insufficient data: need at least {required} rows, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// An underlying model failed
    #[error("Classifier error: {0}")]
    Classifier(#[from] classifier::ClassifierError),

    /// A results file could not be written
    #[error("Failed to write results to '{path}': {reason}")]
    WriteError { path: String, reason: String },
}
