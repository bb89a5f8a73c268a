//! Random forest classification
//!
//! Bagged CART trees: each tree trains on a bootstrap sample of the rows
//! and each split draws a random feature subset. Trees are fitted in
//! parallel; every tree derives its own generator from the forest seed,
//! so a fixed seed reproduces the same forest.

use super::tree::{DecisionTree, MaxFeatures};
use crate::{check_prediction_data, check_training_data};
use crate::{Classifier, ClassifierError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Random forest classifier
///
/// # Example
///
/// ```rust
/// use classifier::ensemble::{MaxFeatures, RandomForestClassifier};
/// use classifier::Classifier;
///
/// let features: Vec<Vec<f64>> = (0..20)
///     .map(|i| vec![i as f64, (i * 2) as f64])
///     .collect();
/// let labels: Vec<u8> = (0..20).map(|i| u8::from(i >= 10)).collect();
///
/// let mut forest = RandomForestClassifier::new(25, Some(8), 2, MaxFeatures::Sqrt)
///     .unwrap()
///     .with_seed(42);
/// forest.fit(&features, &labels).unwrap();
/// assert_eq!(forest.predict(&[vec![2.0, 4.0], vec![18.0, 36.0]]).unwrap(), vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct RandomForestClassifier {
    /// Number of trees
    n_estimators: usize,
    /// Depth limit per tree; `None` grows until pure
    max_depth: Option<usize>,
    /// Minimum rows required to attempt a split
    min_samples_split: usize,
    /// Feature-subset policy per split
    max_features: MaxFeatures,
    /// Forest seed; per-tree seeds derive from it
    seed: u64,
    /// Fitted trees
    trees: Vec<DecisionTree>,
    /// Feature width seen during fit
    n_features: usize,
    /// Whether model has been fitted
    fitted: bool,
}

impl RandomForestClassifier {
    /// Create a new random forest classifier
    ///
    /// # Arguments
    ///
    /// * `n_estimators` - Number of trees in the forest
    /// * `max_depth` - Per-tree depth limit, `None` for unlimited
    /// * `min_samples_split` - Minimum rows needed to split a node
    /// * `max_features` - Feature-subset policy per split
    pub fn new(
        n_estimators: usize,
        max_depth: Option<usize>,
        min_samples_split: usize,
        max_features: MaxFeatures,
    ) -> Result<Self> {
        if n_estimators < 1 {
            return Err(ClassifierError::InvalidParameter {
                name: "n_estimators".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if min_samples_split < 2 {
            return Err(ClassifierError::InvalidParameter {
                name: "min_samples_split".to_string(),
                reason: "must be at least 2".to_string(),
            });
        }
        if let Some(depth) = max_depth {
            if depth == 0 {
                return Err(ClassifierError::InvalidParameter {
                    name: "max_depth".to_string(),
                    reason: "must be at least 1 when set".to_string(),
                });
            }
        }

        Ok(Self {
            n_estimators,
            max_depth,
            min_samples_split,
            max_features,
            seed: 0,
            trees: Vec::new(),
            n_features: 0,
            fitted: false,
        })
    }

    /// Set the forest seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of fitted trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for RandomForestClassifier {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[u8]) -> Result<()> {
        let width = check_training_data(features, labels, 2)?;
        let n = features.len();

        let seed = self.seed;
        let max_depth = self.max_depth;
        let min_samples_split = self.min_samples_split;
        let max_features = self.max_features;

        let trees: Result<Vec<DecisionTree>> = (0..self.n_estimators)
            .into_par_iter()
            .map(|index| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

                let mut tree = DecisionTree::new(max_depth, min_samples_split, max_features);
                tree.fit(features, labels, bootstrap, &mut rng)?;
                Ok(tree)
            })
            .collect();

        self.trees = trees?;
        self.n_features = width;
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<u8>> {
        if !self.fitted {
            return Err(ClassifierError::NotFitted);
        }
        check_prediction_data(features, self.n_features)?;

        features
            .iter()
            .map(|row| {
                let mut votes = [0usize; 2];
                for tree in &self.trees {
                    votes[tree.predict_row(row)? as usize] += 1;
                }
                Ok(u8::from(votes[1] > votes[0]))
            })
            .collect()
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
