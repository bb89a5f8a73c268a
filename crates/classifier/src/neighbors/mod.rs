//! Nearest-neighbor classification

mod knn;

pub use knn::{DistanceMetric, KnnClassifier, VoteWeighting};
