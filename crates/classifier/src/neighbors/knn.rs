//! K-Nearest Neighbors classification
//!
//! Stores the training rows and classifies a query row by majority vote
//! over the K most similar stored rows.
//!
//! ## Distance Metrics
//!
//! - Euclidean distance (default)
//! - Manhattan (L1) distance

use crate::{check_prediction_data, check_training_data};
use crate::{Classifier, ClassifierError, Result};
use serde::{Deserialize, Serialize};

/// Distance metric for comparing feature rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Standard Euclidean distance
    Euclidean,
    /// Manhattan (L1) distance
    Manhattan,
}

/// Vote weighting for the neighbor tally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteWeighting {
    /// Each neighbor contributes one vote
    Uniform,
    /// Each neighbor is weighted by inverse distance
    Distance,
}

/// K-Nearest Neighbors classifier
///
/// # Example
///
/// ```rust
/// use classifier::neighbors::{DistanceMetric, KnnClassifier, VoteWeighting};
/// use classifier::Classifier;
///
/// let features = vec![
///     vec![0.0, 0.0], vec![0.1, 0.1], vec![0.2, 0.0],
///     vec![9.0, 9.0], vec![9.1, 9.1], vec![9.2, 9.0],
/// ];
/// let labels = vec![0, 0, 0, 1, 1, 1];
///
/// let mut knn = KnnClassifier::new(3, DistanceMetric::Euclidean, VoteWeighting::Uniform).unwrap();
/// knn.fit(&features, &labels).unwrap();
/// assert_eq!(knn.predict(&[vec![0.05, 0.05]]).unwrap(), vec![0]);
/// ```
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    /// Number of neighbors
    k: usize,
    /// Distance metric
    metric: DistanceMetric,
    /// Vote weighting
    weighting: VoteWeighting,
    /// Stored training rows
    train_features: Vec<Vec<f64>>,
    /// Stored training labels
    train_labels: Vec<u8>,
    /// Feature width seen during fit
    n_features: usize,
    /// Whether model has been fitted
    fitted: bool,
}

impl KnnClassifier {
    /// Create a new KNN classifier
    ///
    /// # Arguments
    ///
    /// * `k` - Number of neighbors to consider
    /// * `metric` - Distance metric for similarity
    /// * `weighting` - How neighbor votes are weighted
    pub fn new(k: usize, metric: DistanceMetric, weighting: VoteWeighting) -> Result<Self> {
        if k < 1 {
            return Err(ClassifierError::InvalidParameter {
                name: "k".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            k,
            metric,
            weighting,
            train_features: Vec::new(),
            train_labels: Vec::new(),
            n_features: 0,
            fitted: false,
        })
    }

    /// Compute distance between two rows
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self.metric {
            DistanceMetric::Euclidean => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y).powi(2))
                .sum::<f64>()
                .sqrt(),
            DistanceMetric::Manhattan => {
                a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
            }
        }
    }

    /// Find the K nearest stored rows to a query row
    fn find_neighbors(&self, query: &[f64]) -> Vec<(usize, f64)> {
        let mut distances: Vec<(usize, f64)> = self
            .train_features
            .iter()
            .enumerate()
            .map(|(i, row)| (i, self.distance(query, row)))
            .collect();

        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        distances.truncate(self.k);

        distances
    }

    /// Tally neighbor votes; ties resolve to the lower label
    fn vote(&self, neighbors: &[(usize, f64)]) -> u8 {
        let mut tally = [0.0f64; 2];
        for &(idx, dist) in neighbors {
            let weight = match self.weighting {
                VoteWeighting::Uniform => 1.0,
                VoteWeighting::Distance => 1.0 / (dist + 1e-10),
            };
            tally[self.train_labels[idx] as usize] += weight;
        }

        u8::from(tally[1] > tally[0])
    }
}

impl Classifier for KnnClassifier {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[u8]) -> Result<()> {
        let width = check_training_data(features, labels, self.k)?;

        self.train_features = features.to_vec();
        self.train_labels = labels.to_vec();
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
            .map(|row| self.vote(&self.find_neighbors(row)))
            .collect())
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

// Private method tests must stay here
#[cfg(test)]
mod tests {
    use super::*;

    fn two_clusters() -> (Vec<Vec<f64>>, Vec<u8>) {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..5 {
            features.push(vec![i as f64 * 0.1, i as f64 * 0.05]);
            labels.push(0);
            features.push(vec![8.0 + i as f64 * 0.1, 8.0 + i as f64 * 0.05]);
            labels.push(1);
        }
        (features, labels)
    }

    #[test]
    fn test_distance_metrics() {
        let knn = KnnClassifier::new(1, DistanceMetric::Euclidean, VoteWeighting::Uniform).unwrap();
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        assert!((knn.distance(&a, &b) - 27.0_f64.sqrt()).abs() < 1e-10);

        let knn = KnnClassifier::new(1, DistanceMetric::Manhattan, VoteWeighting::Uniform).unwrap();
        assert!((knn.distance(&a, &b) - 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_zero_k() {
        assert!(matches!(
            KnnClassifier::new(0, DistanceMetric::Euclidean, VoteWeighting::Uniform),
            Err(ClassifierError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let knn = KnnClassifier::new(3, DistanceMetric::Euclidean, VoteWeighting::Uniform).unwrap();
        assert_eq!(
            knn.predict(&[vec![1.0]]).unwrap_err(),
            ClassifierError::NotFitted
        );
    }

    #[test]
    fn test_classifies_separated_clusters() {
        let (features, labels) = two_clusters();
        let mut knn =
            KnnClassifier::new(3, DistanceMetric::Euclidean, VoteWeighting::Uniform).unwrap();
        knn.fit(&features, &labels).unwrap();

        assert_eq!(knn.predict(&[vec![0.2, 0.1]]).unwrap(), vec![0]);
        assert_eq!(knn.predict(&[vec![8.2, 8.1]]).unwrap(), vec![1]);
    }

    #[test]
    fn test_single_neighbor_memorizes_training_rows() {
        let (features, labels) = two_clusters();
        let mut knn =
            KnnClassifier::new(1, DistanceMetric::Euclidean, VoteWeighting::Uniform).unwrap();
        knn.fit(&features, &labels).unwrap();
        assert_eq!(knn.predict(&features).unwrap(), labels);
    }

    #[test]
    fn test_distance_weighting_favors_the_closest_cluster() {
        let (features, labels) = two_clusters();
        let mut knn =
            KnnClassifier::new(5, DistanceMetric::Euclidean, VoteWeighting::Distance).unwrap();
        knn.fit(&features, &labels).unwrap();
        assert_eq!(knn.predict(&[vec![0.0, 0.0]]).unwrap(), vec![0]);
    }

    #[test]
    fn test_fit_requires_k_rows() {
        let mut knn =
            KnnClassifier::new(5, DistanceMetric::Euclidean, VoteWeighting::Uniform).unwrap();
        let err = knn.fit(&[vec![1.0], vec![2.0]], &[0, 1]).unwrap_err();
        assert_eq!(
            err,
            ClassifierError::InsufficientData {
                required: 5,
                actual: 2
            }
        );
    }

    #[test]
    fn test_predict_rejects_width_mismatch() {
        let (features, labels) = two_clusters();
        let mut knn =
            KnnClassifier::new(3, DistanceMetric::Euclidean, VoteWeighting::Uniform).unwrap();
        knn.fit(&features, &labels).unwrap();
        assert!(matches!(
            knn.predict(&[vec![1.0, 2.0, 3.0]]),
            Err(ClassifierError::FeatureMismatch { .. })
        ));
    }
}
