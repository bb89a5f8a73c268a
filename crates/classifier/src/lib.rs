//! Classical supervised classifiers for tabular data
//!
//! This crate provides the model families used by the reopening benchmark,
//! organized by category:
//!
//! - [`ensemble`]: Random forest over CART decision trees
//! - [`linear`]: Logistic regression
//! - [`neighbors`]: K-nearest-neighbors
//! - [`svm`]: Support-vector classification
//! - [`utils`]: Metrics, split and fold helpers
//!
//! ## Example
//!
//! ```rust
//! use classifier::prelude::*;
//!
//! let features = vec![
//!     vec![0.0, 0.1], vec![0.2, 0.0], vec![0.1, 0.2],
//!     vec![5.0, 5.1], vec![5.2, 5.0], vec![5.1, 5.2],
//! ];
//! let labels = vec![0, 0, 0, 1, 1, 1];
//!
//! let mut model = KnnClassifier::new(3, DistanceMetric::Euclidean, VoteWeighting::Uniform).unwrap();
//! model.fit(&features, &labels).unwrap();
//! let predictions = model.predict(&features).unwrap();
//! assert_eq!(predictions, labels);
//! ```

mod error;
pub mod ensemble;
pub mod linear;
pub mod neighbors;
pub mod svm;
pub mod utils;

pub use error::{ClassifierError, Result};

/// Common trait for all classifiers
///
/// Features are row-major (`features[row][column]`); labels are binary
/// (`0` or `1`) and row-aligned with the features.
pub trait Classifier {
    /// Fit the model to training rows
    fn fit(&mut self, features: &[Vec<f64>], labels: &[u8]) -> Result<()>;

    /// Predict a label for each row
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<u8>>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;
}

/// Validate a training matrix and its labels; returns the feature width.
pub(crate) fn check_training_data(
    features: &[Vec<f64>],
    labels: &[u8],
    min_rows: usize,
) -> Result<usize> {
    if features.len() != labels.len() {
        return Err(ClassifierError::LabelMismatch {
            features: features.len(),
            labels: labels.len(),
        });
    }
    if features.len() < min_rows {
        return Err(ClassifierError::InsufficientData {
            required: min_rows,
            actual: features.len(),
        });
    }
    let width = features[0].len();
    if width == 0 {
        return Err(ClassifierError::InvalidData(
            "feature rows must have at least one column".to_string(),
        ));
    }
    if features.iter().any(|row| row.len() != width) {
        return Err(ClassifierError::InvalidData(
            "feature rows have inconsistent widths".to_string(),
        ));
    }
    if let Some(&bad) = labels.iter().find(|&&label| label > 1) {
        return Err(ClassifierError::InvalidLabel { value: bad });
    }
    Ok(width)
}

/// Validate a prediction matrix against the fitted feature width.
pub(crate) fn check_prediction_data(features: &[Vec<f64>], expected: usize) -> Result<()> {
    if let Some(row) = features.iter().find(|row| row.len() != expected) {
        return Err(ClassifierError::FeatureMismatch {
            expected,
            actual: row.len(),
        });
    }
    Ok(())
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::Classifier;
    // Ensemble
    pub use crate::ensemble::{MaxFeatures, RandomForestClassifier};
    // Linear
    pub use crate::linear::LogisticRegression;
    // Neighbors
    pub use crate::neighbors::{DistanceMetric, KnnClassifier, VoteWeighting};
    // SVM
    pub use crate::svm::{Kernel, Svc};
    // Error types
    pub use crate::{ClassifierError, Result};
}
