//! Support-vector classifier
//!
//! Binary SVC trained with simplified sequential minimal optimization:
//! pairs of multipliers violating the KKT conditions are optimized
//! jointly until a full sweep makes no progress. The second multiplier of
//! each pair is drawn from a seeded generator, so training is
//! reproducible for a fixed seed.

use crate::{check_prediction_data, check_training_data};
use crate::{Classifier, ClassifierError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const DEFAULT_TOLERANCE: f64 = 1e-3;
const DEFAULT_MAX_PASSES: usize = 5;
const MAX_SWEEPS: usize = 200;
const ALPHA_THRESHOLD: f64 = 1e-8;

/// Kernel function for the SVC
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Kernel {
    /// Plain dot product
    Linear,
    /// Radial basis function: `exp(-gamma * ||a - b||^2)`
    Rbf { gamma: f64 },
}

impl Kernel {
    /// Evaluate the kernel for two rows
    pub fn eval(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Kernel::Linear => a.iter().zip(b.iter()).map(|(x, y)| x * y).sum(),
            Kernel::Rbf { gamma } => {
                let squared: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum();
                (-gamma * squared).exp()
            }
        }
    }
}

/// Support-vector classifier
///
/// # Example
///
/// ```rust
/// use classifier::svm::{Kernel, Svc};
/// use classifier::Classifier;
///
/// let features = vec![
///     vec![0.0, 0.0], vec![0.5, 0.0], vec![0.0, 0.5],
///     vec![4.0, 4.0], vec![4.5, 4.0], vec![4.0, 4.5],
/// ];
/// let labels = vec![0, 0, 0, 1, 1, 1];
///
/// let mut svc = Svc::new(1.0, Kernel::Linear).unwrap();
/// svc.fit(&features, &labels).unwrap();
/// assert_eq!(svc.predict(&[vec![0.1, 0.1], vec![4.2, 4.2]]).unwrap(), vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Svc {
    /// Soft-margin penalty
    c: f64,
    /// Kernel function
    kernel: Kernel,
    /// KKT violation tolerance
    tol: f64,
    /// Consecutive no-progress sweeps before stopping
    max_passes: usize,
    /// Seed for the partner-multiplier draw
    seed: u64,
    /// Retained support vectors
    support_vectors: Vec<Vec<f64>>,
    /// Targets of the support vectors, in {-1, +1}
    support_targets: Vec<f64>,
    /// Multipliers of the support vectors
    alphas: Vec<f64>,
    /// Learned bias
    bias: f64,
    /// Feature width seen during fit
    n_features: usize,
    /// Whether model has been fitted
    fitted: bool,
}

impl Svc {
    /// Create a new support-vector classifier
    pub fn new(c: f64, kernel: Kernel) -> Result<Self> {
        if !c.is_finite() || c <= 0.0 {
            return Err(ClassifierError::InvalidParameter {
                name: "c".to_string(),
                reason: "must be a positive number".to_string(),
            });
        }
        if let Kernel::Rbf { gamma } = kernel {
            if !gamma.is_finite() || gamma <= 0.0 {
                return Err(ClassifierError::InvalidParameter {
                    name: "gamma".to_string(),
                    reason: "must be a positive number".to_string(),
                });
            }
        }

        Ok(Self {
            c,
            kernel,
            tol: DEFAULT_TOLERANCE,
            max_passes: DEFAULT_MAX_PASSES,
            seed: 0,
            support_vectors: Vec::new(),
            support_targets: Vec::new(),
            alphas: Vec::new(),
            bias: 0.0,
            n_features: 0,
            fitted: false,
        })
    }

    /// Set the seed for the partner-multiplier draw
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the KKT violation tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tol = tol.clamp(1e-6, 1.0);
        self
    }

    /// Set the no-progress pass budget
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Number of retained support vectors
    pub fn n_support_vectors(&self) -> usize {
        self.support_vectors.len()
    }

    /// Raw decision value for one row
    fn decision(&self, row: &[f64]) -> f64 {
        self.support_vectors
            .iter()
            .zip(self.support_targets.iter().zip(self.alphas.iter()))
            .map(|(sv, (target, alpha))| alpha * target * self.kernel.eval(sv, row))
            .sum::<f64>()
            + self.bias
    }
}

impl Classifier for Svc {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[u8]) -> Result<()> {
        let width = check_training_data(features, labels, 2)?;
        let n = features.len();

        let targets: Vec<f64> = labels
            .iter()
            .map(|&label| if label == 1 { 1.0 } else { -1.0 })
            .collect();

        let kernel = self.kernel;
        let k = |a: usize, b: usize| kernel.eval(&features[a], &features[b]);
        let margin = |alphas: &[f64], bias: f64, idx: usize| -> f64 {
            let mut sum = bias;
            for (i, &alpha) in alphas.iter().enumerate() {
                if alpha > 0.0 {
                    sum += alpha * targets[i] * k(i, idx);
                }
            }
            sum
        };

        let mut alphas = vec![0.0f64; n];
        let mut bias = 0.0f64;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut passes = 0;
        let mut sweeps = 0;
        while passes < self.max_passes && sweeps < MAX_SWEEPS {
            sweeps += 1;
            let mut changed = 0;

            for i in 0..n {
                let error_i = margin(&alphas, bias, i) - targets[i];
                let violation = targets[i] * error_i;
                if !((violation < -self.tol && alphas[i] < self.c)
                    || (violation > self.tol && alphas[i] > 0.0))
                {
                    continue;
                }

                let mut j = rng.gen_range(0..n - 1);
                if j >= i {
                    j += 1;
                }
                let error_j = margin(&alphas, bias, j) - targets[j];

                let alpha_i_old = alphas[i];
                let alpha_j_old = alphas[j];
                let (low, high) = if (targets[i] - targets[j]).abs() > f64::EPSILON {
                    (
                        (alpha_j_old - alpha_i_old).max(0.0),
                        (self.c + alpha_j_old - alpha_i_old).min(self.c),
                    )
                } else {
                    (
                        (alpha_i_old + alpha_j_old - self.c).max(0.0),
                        (alpha_i_old + alpha_j_old).min(self.c),
                    )
                };
                if high - low < f64::EPSILON {
                    continue;
                }

                let eta = 2.0 * k(i, j) - k(i, i) - k(j, j);
                if eta >= 0.0 {
                    continue;
                }

                let alpha_j = (alpha_j_old - targets[j] * (error_i - error_j) / eta)
                    .clamp(low, high);
                if (alpha_j - alpha_j_old).abs() < 1e-5 {
                    continue;
                }
                let alpha_i = alpha_i_old + targets[i] * targets[j] * (alpha_j_old - alpha_j);

                let b1 = bias
                    - error_i
                    - targets[i] * (alpha_i - alpha_i_old) * k(i, i)
                    - targets[j] * (alpha_j - alpha_j_old) * k(i, j);
                let b2 = bias
                    - error_j
                    - targets[i] * (alpha_i - alpha_i_old) * k(i, j)
                    - targets[j] * (alpha_j - alpha_j_old) * k(j, j);
                bias = if alpha_i > 0.0 && alpha_i < self.c {
                    b1
                } else if alpha_j > 0.0 && alpha_j < self.c {
                    b2
                } else {
                    (b1 + b2) / 2.0
                };

                alphas[i] = alpha_i;
                alphas[j] = alpha_j;
                changed += 1;
            }

            if changed == 0 {
                passes += 1;
            } else {
                passes = 0;
            }
        }

        self.support_vectors.clear();
        self.support_targets.clear();
        self.alphas.clear();
        for i in 0..n {
            if alphas[i] > ALPHA_THRESHOLD {
                self.support_vectors.push(features[i].clone());
                self.support_targets.push(targets[i]);
                self.alphas.push(alphas[i]);
            }
        }
        self.bias = bias;
        self.n_features = width;
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
            .map(|row| u8::from(self.decision(row) >= 0.0))
            .collect())
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..8 {
            features.push(vec![i as f64 * 0.1, i as f64 * 0.2]);
            labels.push(0);
            features.push(vec![6.0 + i as f64 * 0.1, 6.0 + i as f64 * 0.2]);
            labels.push(1);
        }
        (features, labels)
    }

    #[test]
    fn test_kernel_evaluation() {
        let a = vec![1.0, 2.0];
        let b = vec![3.0, 4.0];
        assert!((Kernel::Linear.eval(&a, &b) - 11.0).abs() < 1e-10);

        let rbf = Kernel::Rbf { gamma: 0.5 };
        // ||a - b||^2 = 8, so exp(-4)
        assert!((rbf.eval(&a, &b) - (-4.0f64).exp()).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(Svc::new(0.0, Kernel::Linear).is_err());
        assert!(Svc::new(-1.0, Kernel::Linear).is_err());
        assert!(Svc::new(1.0, Kernel::Rbf { gamma: 0.0 }).is_err());
        assert!(Svc::new(1.0, Kernel::Rbf { gamma: -0.5 }).is_err());
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let svc = Svc::new(1.0, Kernel::Linear).unwrap();
        assert_eq!(
            svc.predict(&[vec![1.0]]).unwrap_err(),
            ClassifierError::NotFitted
        );
    }

    #[test]
    fn test_linear_kernel_separates_clusters() {
        let (features, labels) = separable_data();
        let mut svc = Svc::new(1.0, Kernel::Linear).unwrap().with_seed(7);
        svc.fit(&features, &labels).unwrap();
        assert_eq!(svc.predict(&features).unwrap(), labels);
        assert!(svc.n_support_vectors() > 0);
    }

    #[test]
    fn test_rbf_kernel_separates_clusters() {
        let (features, labels) = separable_data();
        let mut svc = Svc::new(1.0, Kernel::Rbf { gamma: 0.5 })
            .unwrap()
            .with_seed(7);
        svc.fit(&features, &labels).unwrap();
        assert_eq!(svc.predict(&features).unwrap(), labels);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let (features, labels) = separable_data();
        let mut a = Svc::new(1.0, Kernel::Linear).unwrap().with_seed(3);
        let mut b = Svc::new(1.0, Kernel::Linear).unwrap().with_seed(3);
        a.fit(&features, &labels).unwrap();
        b.fit(&features, &labels).unwrap();
        assert_eq!(a.alphas, b.alphas);
        assert!((a.bias - b.bias).abs() < 1e-15);
    }

    #[test]
    fn test_fit_requires_two_rows() {
        let mut svc = Svc::new(1.0, Kernel::Linear).unwrap();
        assert!(matches!(
            svc.fit(&[vec![1.0]], &[1]),
            Err(ClassifierError::InsufficientData { .. })
        ));
    }
}
