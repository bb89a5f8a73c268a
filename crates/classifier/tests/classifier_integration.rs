//! Integration tests for the classifier crate
//!
//! Every model family is exercised through the shared `Classifier` trait
//! on one common synthetic dataset.

use classifier::prelude::*;
use classifier::utils::metrics::accuracy;

/// Two well-separated clusters of 15 rows each, deterministic layout.
fn clusters() -> (Vec<Vec<f64>>, Vec<u8>) {
    let mut features = Vec::new();
    let mut labels = Vec::new();
    for i in 0..15 {
        let jitter = (i % 5) as f64 * 0.1;
        features.push(vec![jitter, 0.5 + jitter, (i % 3) as f64 * 0.2]);
        labels.push(0);
        features.push(vec![7.0 + jitter, 8.0 - jitter, 6.0 + (i % 3) as f64 * 0.2]);
        labels.push(1);
    }
    (features, labels)
}

fn model_suite() -> Vec<(&'static str, Box<dyn Classifier>)> {
    vec![
        (
            "forest",
            Box::new(
                RandomForestClassifier::new(25, Some(8), 2, MaxFeatures::Sqrt)
                    .unwrap()
                    .with_seed(42),
            ),
        ),
        (
            "svc",
            Box::new(Svc::new(1.0, Kernel::Linear).unwrap().with_seed(42)),
        ),
        (
            "knn",
            Box::new(
                KnnClassifier::new(5, DistanceMetric::Euclidean, VoteWeighting::Uniform).unwrap(),
            ),
        ),
        (
            "logistic",
            Box::new(LogisticRegression::new(1.0).unwrap()),
        ),
    ]
}

#[test]
fn every_family_learns_separated_clusters() {
    let (features, labels) = clusters();

    for (name, mut model) in model_suite() {
        assert!(!model.is_fitted(), "{name} claims fitted before fit");
        model.fit(&features, &labels).unwrap();
        assert!(model.is_fitted(), "{name} claims unfitted after fit");

        let predictions = model.predict(&features).unwrap();
        let score = accuracy(&labels, &predictions);
        assert!(
            score >= 0.9,
            "{name} reached only {score:.2} on separated clusters"
        );
    }
}

#[test]
fn every_family_rejects_prediction_before_fit() {
    for (name, model) in model_suite() {
        let result = model.predict(&[vec![1.0, 2.0, 3.0]]);
        assert!(
            matches!(result, Err(ClassifierError::NotFitted)),
            "{name} did not report NotFitted"
        );
    }
}

#[test]
fn every_family_rejects_out_of_domain_labels() {
    let features: Vec<Vec<f64>> = (0..6)
        .map(|i| vec![i as f64, i as f64 + 1.0, i as f64 + 2.0])
        .collect();
    let labels = vec![0, 1, 0, 1, 0, 8];

    for (name, mut model) in model_suite() {
        let result = model.fit(&features, &labels);
        assert!(
            matches!(result, Err(ClassifierError::InvalidLabel { value: 8 })),
            "{name} accepted label 8"
        );
    }
}

#[test]
fn every_family_rejects_misaligned_rows() {
    let features = vec![vec![1.0], vec![2.0], vec![3.0]];
    let labels = vec![0, 1];

    for (name, mut model) in model_suite() {
        let result = model.fit(&features, &labels);
        assert!(
            matches!(result, Err(ClassifierError::LabelMismatch { .. })),
            "{name} accepted misaligned training data"
        );
    }
}

#[test]
fn split_and_fold_helpers_compose_with_models() {
    use classifier::utils::validation::{kfold_splits, train_test_split};

    let (features, labels) = clusters();
    let (train_idx, test_idx) = train_test_split(features.len(), 0.5, 42);
    assert_eq!(train_idx.len() + test_idx.len(), features.len());

    let gather = |idx: &[usize]| -> (Vec<Vec<f64>>, Vec<u8>) {
        (
            idx.iter().map(|&i| features[i].clone()).collect(),
            idx.iter().map(|&i| labels[i]).collect(),
        )
    };

    let (train_x, train_y) = gather(&train_idx);
    let (test_x, test_y) = gather(&test_idx);

    let mut model =
        KnnClassifier::new(3, DistanceMetric::Euclidean, VoteWeighting::Uniform).unwrap();
    model.fit(&train_x, &train_y).unwrap();
    let score = accuracy(&test_y, &model.predict(&test_x).unwrap());
    assert!(score >= 0.9);

    for (fold_train, fold_test) in kfold_splits(features.len(), 5) {
        let (x, y) = gather(&fold_train);
        let (tx, ty) = gather(&fold_test);
        let mut fold_model =
            KnnClassifier::new(3, DistanceMetric::Euclidean, VoteWeighting::Uniform).unwrap();
        fold_model.fit(&x, &y).unwrap();
        let fold_score = accuracy(&ty, &fold_model.predict(&tx).unwrap());
        assert!(fold_score.is_finite());
    }
}
