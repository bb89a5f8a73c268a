//! Repeated train/test evaluation
//!
//! Re-fits a chosen parameter combination over many 50/50 splits and
//! accumulates per-identifier predictions and per-iteration accuracy.
//!
//! Every iteration splits with the same seed, so every iteration's
//! partition is byte-identical; only model-internal randomness varies
//! between iterations. The repetition deliberately measures the model's
//! own variance on a fixed partition, not split variance.

use crate::grid::{ModelFamily, ModelParams};
use crate::{Result, SelectionError};
use classifier::utils::metrics::accuracy;
use classifier::utils::validation::train_test_split;
use std::collections::BTreeMap;
use tabular::TrainingSet;
use tracing::debug;

/// Repeated 50/50 resampling evaluator
#[derive(Debug, Clone)]
pub struct RepeatedEvaluator {
    iterations: usize,
    test_ratio: f64,
    split_seed: u64,
}

impl Default for RepeatedEvaluator {
    fn default() -> Self {
        Self {
            iterations: 20,
            test_ratio: 0.5,
            split_seed: 42,
        }
    }
}

/// Summed predictions for one identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionTotal {
    /// Row identifier
    pub id: String,
    /// Positive predictions across all iterations, in `0..=iterations`
    pub total: u32,
}

/// The aggregated result of one evaluation run
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Evaluated model family
    pub family: ModelFamily,
    /// Per-identifier totals, sorted by identifier; only identifiers that
    /// fell into the test split of every iteration are retained
    pub totals: Vec<PredictionTotal>,
    /// Per-iteration accuracy, length equals the iteration count
    pub accuracies: Vec<f64>,
}

impl Evaluation {
    /// Mean of the per-iteration accuracies
    pub fn mean_accuracy(&self) -> f64 {
        if self.accuracies.is_empty() {
            return f64::NAN;
        }
        self.accuracies.iter().sum::<f64>() / self.accuracies.len() as f64
    }
}

impl RepeatedEvaluator {
    /// Create an evaluator with the given iteration count
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    /// Set the seed of the train/test split
    pub fn with_split_seed(mut self, seed: u64) -> Self {
        self.split_seed = seed;
        self
    }

    /// Set the test fraction of each split
    pub fn with_test_ratio(mut self, ratio: f64) -> Self {
        self.test_ratio = ratio.clamp(0.1, 0.9);
        self
    }

    /// Seed for the model built in one iteration; distinct per iteration
    /// so model-internal randomness varies while the run stays
    /// reproducible.
    fn model_seed(&self, iteration: usize) -> u64 {
        self.split_seed.wrapping_add(1 + iteration as u64)
    }

    /// Run the repeated evaluation for one parameter combination.
    ///
    /// Fails when `iterations` is zero, when the data is too small to
    /// split, or when the model cannot be built or fitted.
    pub fn evaluate(&self, params: &ModelParams, data: &TrainingSet) -> Result<Evaluation> {
        if self.iterations == 0 {
            return Err(SelectionError::InvalidParameter {
                name: "iterations".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let n = data.n_rows();
        if n < 2 {
            return Err(SelectionError::InsufficientData {
                required: 2,
                actual: n,
            });
        }

        // identifier -> (iteration, prediction) history
        let mut tracks: BTreeMap<&str, Vec<(usize, u8)>> = BTreeMap::new();
        let mut accuracies = Vec::with_capacity(self.iterations);

        for iteration in 0..self.iterations {
            // Same seed every iteration: the partition never varies.
            let (train_idx, test_idx) = train_test_split(n, self.test_ratio, self.split_seed);
            let (train_x, train_y) = data.select(&train_idx);
            let (test_x, test_y) = data.select(&test_idx);

            let mut model = params.build(self.model_seed(iteration))?;
            model.fit(&train_x, &train_y)?;
            let predictions = model.predict(&test_x)?;

            accuracies.push(accuracy(&test_y, &predictions));

            for (&row, &prediction) in test_idx.iter().zip(predictions.iter()) {
                tracks
                    .entry(data.ids()[row].as_str())
                    .or_default()
                    .push((iteration, prediction));
            }

            debug!(
                family = params.family().name(),
                iteration,
                accuracy = accuracies[iteration],
                "evaluation iteration complete"
            );
        }

        // Keep identifiers that were tested in every iteration, then sum
        // their predictions. The presence check runs on the recorded
        // history, never on the summed value.
        let totals: Vec<PredictionTotal> = tracks
            .into_iter()
            .filter(|(_, history)| history.len() == self.iterations)
            .map(|(id, history)| PredictionTotal {
                id: id.to_string(),
                total: history.iter().map(|&(_, p)| u32::from(p)).sum(),
            })
            .collect();

        Ok(Evaluation {
            family: params.family(),
            totals,
            accuracies,
        })
    }
}
