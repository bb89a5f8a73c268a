//! Logistic regression
//!
//! L2-regularized logistic regression fitted with batch gradient descent.
//! Features are standardized internally during `fit` (the learned means
//! and deviations are reused at prediction time), which keeps the descent
//! stable across feature scales.

use crate::{check_prediction_data, check_training_data};
use crate::{Classifier, ClassifierError, Result};

const DEFAULT_LEARNING_RATE: f64 = 0.1;
const DEFAULT_MAX_ITER: usize = 500;
const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Logistic regression classifier
///
/// `c` is the inverse regularization strength: smaller values regularize
/// harder.
///
/// # Example
///
/// ```rust
/// use classifier::linear::LogisticRegression;
/// use classifier::Classifier;
///
/// let features = vec![
///     vec![0.0], vec![0.2], vec![0.4],
///     vec![5.0], vec![5.2], vec![5.4],
/// ];
/// let labels = vec![0, 0, 0, 1, 1, 1];
///
/// let mut model = LogisticRegression::new(1.0).unwrap();
/// model.fit(&features, &labels).unwrap();
/// assert_eq!(model.predict(&[vec![0.1], vec![5.1]]).unwrap(), vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// Inverse regularization strength
    c: f64,
    /// Gradient descent step size
    learning_rate: f64,
    /// Epoch budget
    max_iter: usize,
    /// Loss-change convergence threshold
    tol: f64,
    /// Learned weights (standardized feature space)
    weights: Vec<f64>,
    /// Learned intercept
    bias: f64,
    /// Per-feature means learned during fit
    means: Vec<f64>,
    /// Per-feature standard deviations learned during fit
    stds: Vec<f64>,
    /// Feature width seen during fit
    n_features: usize,
    /// Whether model has been fitted
    fitted: bool,
}

impl LogisticRegression {
    /// Create a new logistic regression classifier
    pub fn new(c: f64) -> Result<Self> {
        if !c.is_finite() || c <= 0.0 {
            return Err(ClassifierError::InvalidParameter {
                name: "c".to_string(),
                reason: "must be a positive number".to_string(),
            });
        }

        Ok(Self {
            c,
            learning_rate: DEFAULT_LEARNING_RATE,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOLERANCE,
            weights: Vec::new(),
            bias: 0.0,
            means: Vec::new(),
            stds: Vec::new(),
            n_features: 0,
            fitted: false,
        })
    }

    /// Set the epoch budget
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }

    /// Set the gradient descent step size
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate.clamp(1e-6, 10.0);
        self
    }

    fn sigmoid(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }

    /// Standardize one row with the learned means and deviations
    fn standardize_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(self.stds.iter()))
            .map(|(value, (mean, std))| (value - mean) / std)
            .collect()
    }

    fn decision(&self, standardized: &[f64]) -> f64 {
        let z: f64 = standardized
            .iter()
            .zip(self.weights.iter())
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.bias;
        Self::sigmoid(z)
    }

    /// Regularized mean cross-entropy over the training rows
    fn loss(&self, rows: &[Vec<f64>], labels: &[u8]) -> f64 {
        let n = rows.len() as f64;
        let data_loss: f64 = rows
            .iter()
            .zip(labels.iter())
            .map(|(row, &label)| {
                let p = self.decision(row).clamp(1e-12, 1.0 - 1e-12);
                if label == 1 {
                    -p.ln()
                } else {
                    -(1.0 - p).ln()
                }
            })
            .sum::<f64>()
            / n;

        let penalty: f64 = self.weights.iter().map(|w| w * w).sum::<f64>() / (2.0 * self.c * n);
        data_loss + penalty
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[u8]) -> Result<()> {
        let width = check_training_data(features, labels, 2)?;
        let n = features.len() as f64;

        // Learn standardization parameters
        self.means = (0..width)
            .map(|j| features.iter().map(|row| row[j]).sum::<f64>() / n)
            .collect();
        self.stds = (0..width)
            .map(|j| {
                let mean = self.means[j];
                let variance =
                    features.iter().map(|row| (row[j] - mean).powi(2)).sum::<f64>() / n;
                let std = variance.sqrt();
                if std > 1e-12 {
                    std
                } else {
                    1.0
                }
            })
            .collect();

        let rows: Vec<Vec<f64>> = features.iter().map(|row| self.standardize_row(row)).collect();

        self.weights = vec![0.0; width];
        self.bias = 0.0;
        self.n_features = width;

        let mut previous_loss = f64::MAX;
        for _ in 0..self.max_iter {
            let mut grad_w = vec![0.0f64; width];
            let mut grad_b = 0.0f64;

            for (row, &label) in rows.iter().zip(labels.iter()) {
                let residual = self.decision(row) - f64::from(label);
                for (g, x) in grad_w.iter_mut().zip(row.iter()) {
                    *g += residual * x;
                }
                grad_b += residual;
            }

            for (w, g) in self.weights.iter_mut().zip(grad_w.iter()) {
                let regularized = g / n + *w / (self.c * n);
                *w -= self.learning_rate * regularized;
            }
            self.bias -= self.learning_rate * grad_b / n;

            let loss = self.loss(&rows, labels);
            if !loss.is_finite() {
                return Err(ClassifierError::NumericalError(
                    "loss diverged during gradient descent".to_string(),
                ));
            }
            if (previous_loss - loss).abs() < self.tol {
                break;
            }
            previous_loss = loss;
        }

        self.fitted = true;
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<u8>> {
        if !self.fitted {
            return Err(ClassifierError::NotFitted);
        }
        check_prediction_data(features, self.n_features)?;

        Ok(features
            .iter()
            .map(|row| u8::from(self.decision(&self.standardize_row(row)) >= 0.5))
            .collect())
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
