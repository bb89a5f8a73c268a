//! Classifier error types
//!
//! Defines the standardized error type for all model operations.

use thiserror::Error;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Errors that can occur during classifier operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// Insufficient data rows for the operation
    #[error("Insufficient data: need at least {required} rows, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model has not been fitted yet
    #[error("Model must be fitted before prediction")]
    NotFitted,

    /// Prediction rows do not match the fitted feature width
    #[error("Feature count mismatch: model was fitted with {expected} features, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    /// Features and labels are not row-aligned
    #[error("Misaligned training data: {features} feature rows vs {labels} labels")]
    LabelMismatch { features: usize, labels: usize },

    /// Label outside the binary domain
    #[error("Invalid label {value}: labels must be 0 or 1")]
    InvalidLabel { value: u8 },

    /// Invalid training matrix
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),
}
