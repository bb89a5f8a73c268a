//! CART decision tree
//!
//! Binary classification tree grown greedily on Gini impurity. Each split
//! considers a random subset of the feature columns, which is what gives
//! the forest its de-correlated trees.

use crate::{ClassifierError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// How many feature columns each split may consider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxFeatures {
    /// `round(sqrt(n_features))`
    Sqrt,
    /// `floor(log2(n_features))`
    Log2,
    /// Every column
    All,
}

impl MaxFeatures {
    /// Resolve to a concrete column count, always at least 1
    pub fn count(&self, n_features: usize) -> usize {
        let raw = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt().round() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2().floor() as usize,
            MaxFeatures::All => n_features,
        };
        raw.clamp(1, n_features)
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        label: u8,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A single classification tree, grown on a row subset chosen by the forest
#[derive(Debug, Clone)]
pub(crate) struct DecisionTree {
    max_depth: Option<usize>,
    min_samples_split: usize,
    max_features: MaxFeatures,
    root: Option<Node>,
}

impl DecisionTree {
    pub(crate) fn new(
        max_depth: Option<usize>,
        min_samples_split: usize,
        max_features: MaxFeatures,
    ) -> Self {
        Self {
            max_depth,
            min_samples_split: min_samples_split.max(2),
            max_features,
            root: None,
        }
    }

    /// Grow the tree on the given rows of the training matrix
    pub(crate) fn fit(
        &mut self,
        features: &[Vec<f64>],
        labels: &[u8],
        rows: Vec<usize>,
        rng: &mut StdRng,
    ) -> Result<()> {
        if rows.is_empty() {
            return Err(ClassifierError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        self.root = Some(self.grow(features, labels, rows, 0, rng));
        Ok(())
    }

    /// Predict the label for one row
    pub(crate) fn predict_row(&self, row: &[f64]) -> Result<u8> {
        let mut node = self.root.as_ref().ok_or(ClassifierError::NotFitted)?;
        loop {
            match node {
                Node::Leaf { label } => return Ok(*label),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    fn grow(
        &self,
        features: &[Vec<f64>],
        labels: &[u8],
        rows: Vec<usize>,
        depth: usize,
        rng: &mut StdRng,
    ) -> Node {
        let mut counts = [0usize; 2];
        for &row in &rows {
            counts[labels[row] as usize] += 1;
        }
        let majority = u8::from(counts[1] > counts[0]);

        let pure = counts[0] == 0 || counts[1] == 0;
        let depth_reached = self.max_depth.is_some_and(|limit| depth >= limit);
        if pure || depth_reached || rows.len() < self.min_samples_split {
            return Node::Leaf { label: majority };
        }

        let n_features = features[0].len();
        let mut pool: Vec<usize> = (0..n_features).collect();
        pool.shuffle(rng);
        pool.truncate(self.max_features.count(n_features));

        match best_split(features, labels, &rows, &pool) {
            None => Node::Leaf { label: majority },
            Some((feature, threshold)) => {
                let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
                    .into_iter()
                    .partition(|&row| features[row][feature] <= threshold);

                Node::Split {
                    feature,
                    threshold,
                    left: Box::new(self.grow(features, labels, left_rows, depth + 1, rng)),
                    right: Box::new(self.grow(features, labels, right_rows, depth + 1, rng)),
                }
            }
        }
    }
}

fn gini(counts: &[usize; 2], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p0 = counts[0] as f64 / total as f64;
    let p1 = counts[1] as f64 / total as f64;
    1.0 - p0 * p0 - p1 * p1
}

/// Find the impurity-minimizing `(feature, threshold)` over the candidate
/// columns, or `None` when no threshold improves on the parent node.
fn best_split(
    features: &[Vec<f64>],
    labels: &[u8],
    rows: &[usize],
    pool: &[usize],
) -> Option<(usize, f64)> {
    let total = rows.len();
    let mut parent_counts = [0usize; 2];
    for &row in rows {
        parent_counts[labels[row] as usize] += 1;
    }
    let parent_gini = gini(&parent_counts, total);

    let mut best: Option<(f64, usize, f64)> = None;

    for &feature in pool {
        let mut order: Vec<usize> = rows.to_vec();
        order.sort_by(|&a, &b| {
            features[a][feature]
                .partial_cmp(&features[b][feature])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut left_counts = [0usize; 2];
        for boundary in 1..total {
            let previous = order[boundary - 1];
            left_counts[labels[previous] as usize] += 1;

            let previous_value = features[previous][feature];
            let value = features[order[boundary]][feature];
            if value <= previous_value {
                continue;
            }

            let right_counts = [
                parent_counts[0] - left_counts[0],
                parent_counts[1] - left_counts[1],
            ];
            let left_weight = boundary as f64 / total as f64;
            let split_gini = left_weight * gini(&left_counts, boundary)
                + (1.0 - left_weight) * gini(&right_counts, total - boundary);
            let gain = parent_gini - split_gini;
            let threshold = (previous_value + value) / 2.0;

            let improved = match best {
                None => gain > 1e-12,
                Some((best_gain, _, _)) => gain > best_gain,
            };
            if improved {
                best = Some((gain, feature, threshold));
            }
        }
    }

    best.map(|(_, feature, threshold)| (feature, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn striped_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        let features: Vec<Vec<f64>> = (0..12).map(|i| vec![i as f64, (i % 3) as f64]).collect();
        let labels: Vec<u8> = (0..12).map(|i| u8::from(i >= 6)).collect();
        (features, labels)
    }

    #[test]
    fn test_max_features_counts() {
        assert_eq!(MaxFeatures::Sqrt.count(16), 4);
        assert_eq!(MaxFeatures::Log2.count(16), 4);
        assert_eq!(MaxFeatures::All.count(16), 16);
        // Always at least one column
        assert_eq!(MaxFeatures::Log2.count(1), 1);
    }

    #[test]
    fn test_gini_of_pure_and_even_nodes() {
        assert!((gini(&[4, 0], 4) - 0.0).abs() < 1e-10);
        assert!((gini(&[2, 2], 4) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_best_split_finds_the_class_boundary() {
        let (features, labels) = striped_data();
        let rows: Vec<usize> = (0..12).collect();
        let (feature, threshold) = best_split(&features, &labels, &rows, &[0, 1]).unwrap();
        assert_eq!(feature, 0);
        assert!((threshold - 5.5).abs() < 1e-10);
    }

    #[test]
    fn test_best_split_returns_none_for_pure_rows() {
        let features = vec![vec![1.0], vec![2.0], vec![3.0]];
        let labels = vec![1, 1, 1];
        assert!(best_split(&features, &labels, &[0, 1, 2], &[0]).is_none());
    }

    #[test]
    fn test_tree_memorizes_separable_rows() {
        let (features, labels) = striped_data();
        let mut tree = DecisionTree::new(None, 2, MaxFeatures::All);
        let mut rng = StdRng::seed_from_u64(0);
        tree.fit(&features, &labels, (0..12).collect(), &mut rng)
            .unwrap();

        for (row, &label) in features.iter().zip(labels.iter()) {
            assert_eq!(tree.predict_row(row).unwrap(), label);
        }
    }

    #[test]
    fn test_depth_limit_forces_a_leaf() {
        let (features, labels) = striped_data();
        let mut tree = DecisionTree::new(Some(0), 2, MaxFeatures::All);
        let mut rng = StdRng::seed_from_u64(0);
        tree.fit(&features, &labels, (0..12).collect(), &mut rng)
            .unwrap();

        // Depth 0 means a single leaf voting the majority class
        let first = tree.predict_row(&features[0]).unwrap();
        assert!(features
            .iter()
            .all(|row| tree.predict_row(row).unwrap() == first));
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let tree = DecisionTree::new(None, 2, MaxFeatures::All);
        assert_eq!(
            tree.predict_row(&[1.0]).unwrap_err(),
            ClassifierError::NotFitted
        );
    }
}
