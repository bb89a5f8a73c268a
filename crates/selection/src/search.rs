//! Cross-validated grid search
//!
//! Scores every candidate combination of a [`ParamGrid`] by k-fold
//! cross-validated accuracy and returns the best one. Candidates are
//! scored in parallel; the winner is picked afterwards with a strict
//! comparison over the in-order score list, so ties always resolve to the
//! first combination in enumeration order and the parallelism stays
//! unobservable.

use crate::grid::{ModelParams, ParamGrid};
use crate::{Result, SelectionError};
use classifier::utils::metrics::accuracy;
use classifier::utils::validation::kfold_splits;
use rayon::prelude::*;
use tabular::TrainingSet;
use tracing::debug;

/// Grid search over a family's parameter grid
#[derive(Debug, Clone)]
pub struct GridSearch {
    folds: usize,
}

impl Default for GridSearch {
    fn default() -> Self {
        Self { folds: 5 }
    }
}

/// The winning combination of one grid search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Best parameter combination
    pub params: ModelParams,
    /// Mean cross-validation accuracy of the winner; `None` when the grid
    /// held a single combination and no search ran
    pub mean_accuracy: Option<f64>,
    /// Number of combinations evaluated
    pub evaluated: usize,
}

impl GridSearch {
    /// Create a grid search with the given fold count (minimum 2)
    pub fn new(folds: usize) -> Self {
        Self {
            folds: folds.max(2),
        }
    }

    /// Find the best-scoring parameter combination in `grid`.
    ///
    /// Fails when the grid is empty, when the data has fewer rows than
    /// folds, or when any candidate cannot be built or fitted. A grid
    /// with a single combination returns it after validating that the
    /// family accepts it, without running the search.
    pub fn optimize(&self, grid: &ParamGrid, data: &TrainingSet) -> Result<SearchOutcome> {
        let mut candidates = grid.candidates();
        if candidates.is_empty() {
            return Err(SelectionError::EmptyGrid {
                family: grid.family().name().to_string(),
            });
        }

        if candidates.len() == 1 {
            let params = candidates.remove(0);
            params.build(0)?;
            return Ok(SearchOutcome {
                params,
                mean_accuracy: None,
                evaluated: 1,
            });
        }

        let scores: Vec<f64> = candidates
            .par_iter()
            .map(|params| self.cross_validate(params, data))
            .collect::<Result<Vec<f64>>>()?;

        let mut best = 0;
        for (index, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = index;
            }
        }

        debug!(
            family = grid.family().name(),
            evaluated = scores.len(),
            accuracy = scores[best],
            "grid search scored all candidates"
        );

        Ok(SearchOutcome {
            params: candidates[best].clone(),
            mean_accuracy: Some(scores[best]),
            evaluated: scores.len(),
        })
    }

    /// Mean k-fold cross-validated accuracy for one combination.
    ///
    /// Fold models are seeded by fold index, so the score is
    /// deterministic for a given dataset and combination.
    pub fn cross_validate(&self, params: &ModelParams, data: &TrainingSet) -> Result<f64> {
        let splits = kfold_splits(data.n_rows(), self.folds);
        if splits.is_empty() {
            return Err(SelectionError::InsufficientData {
                required: self.folds,
                actual: data.n_rows(),
            });
        }

        let mut total = 0.0;
        for (fold, (train_idx, test_idx)) in splits.iter().enumerate() {
            let (train_x, train_y) = data.select(train_idx);
            let (test_x, test_y) = data.select(test_idx);

            let mut model = params.build(fold as u64)?;
            model.fit(&train_x, &train_y)?;
            let predictions = model.predict(&test_x)?;
            total += accuracy(&test_y, &predictions);
        }

        Ok(total / splits.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{KnnGrid, KnnParams, LogisticGrid};
    use classifier::neighbors::{DistanceMetric, VoteWeighting};
    use tabular::TrainingSet;

    fn clustered_set(rows_per_class: usize) -> TrainingSet {
        let mut ids = Vec::new();
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..rows_per_class {
            let jitter = (i % 5) as f64 * 0.1;
            ids.push(format!("lo{i}"));
            features.push(vec![jitter, 0.2 + jitter]);
            labels.push(0);
            ids.push(format!("hi{i}"));
            features.push(vec![6.0 + jitter, 6.2 + jitter]);
            labels.push(1);
        }
        TrainingSet::new(
            ids,
            vec!["x1".to_string(), "x2".to_string()],
            features,
            labels,
        )
        .unwrap()
    }

    #[test]
    fn test_optimize_returns_a_grid_member() {
        let data = clustered_set(10);
        let grid = ParamGrid::Knn(KnnGrid::default());
        let outcome = GridSearch::new(5).optimize(&grid, &data).unwrap();

        assert!(grid.candidates().contains(&outcome.params));
        assert_eq!(outcome.evaluated, grid.candidates().len());
        let score = outcome.mean_accuracy.unwrap();
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_empty_grid_fails() {
        let data = clustered_set(5);
        let grid = ParamGrid::Knn(KnnGrid {
            k: Vec::new(),
            ..KnnGrid::default()
        });
        assert_eq!(
            GridSearch::default().optimize(&grid, &data).unwrap_err(),
            SelectionError::EmptyGrid {
                family: "KNN".to_string()
            }
        );
    }

    #[test]
    fn test_single_combination_short_circuits() {
        let data = clustered_set(5);
        let grid = ParamGrid::Knn(KnnGrid {
            k: vec![3],
            metric: vec![DistanceMetric::Euclidean],
            weighting: vec![VoteWeighting::Uniform],
        });
        let outcome = GridSearch::default().optimize(&grid, &data).unwrap();

        assert_eq!(outcome.evaluated, 1);
        assert_eq!(outcome.mean_accuracy, None);
        assert_eq!(
            outcome.params,
            ModelParams::Knn(KnnParams {
                k: 3,
                metric: DistanceMetric::Euclidean,
                weighting: VoteWeighting::Uniform,
            })
        );
    }

    #[test]
    fn test_single_invalid_combination_still_fails() {
        let data = clustered_set(5);
        let grid = ParamGrid::LogisticRegression(LogisticGrid {
            c: vec![-1.0],
            max_iter: vec![100],
        });
        assert!(matches!(
            GridSearch::default().optimize(&grid, &data),
            Err(SelectionError::Classifier(_))
        ));
    }

    #[test]
    fn test_cross_validate_needs_enough_rows() {
        let data = clustered_set(2);
        let params = ModelParams::Knn(KnnParams {
            k: 1,
            metric: DistanceMetric::Euclidean,
            weighting: VoteWeighting::Uniform,
        });
        // 4 rows, 5 folds
        assert!(matches!(
            GridSearch::new(5).cross_validate(&params, &data),
            Err(SelectionError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_cross_validate_is_deterministic() {
        let data = clustered_set(10);
        let params = ModelParams::Knn(KnnParams {
            k: 3,
            metric: DistanceMetric::Euclidean,
            weighting: VoteWeighting::Uniform,
        });
        let search = GridSearch::new(5);
        let a = search.cross_validate(&params, &data).unwrap();
        let b = search.cross_validate(&params, &data).unwrap();
        assert_eq!(a, b);
    }
}
