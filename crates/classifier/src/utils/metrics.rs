//! Classification accuracy metrics
//!
//! Provides standard metrics for evaluating binary predictions.

/// Accuracy
///
/// Fraction of predictions matching the actual labels.
/// Higher is better. Value in [0, 1].
///
/// # Example
///
/// ```rust
/// use classifier::utils::metrics::accuracy;
///
/// let actual = vec![0, 1, 1, 0, 1];
/// let predicted = vec![0, 1, 0, 0, 1];
/// assert!((accuracy(&actual, &predicted) - 0.8).abs() < 1e-10);
/// ```
pub fn accuracy(actual: &[u8], predicted: &[u8]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let correct = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(a, p)| a == p)
        .count();

    correct as f64 / actual.len() as f64
}

/// Precision for the positive class
///
/// Fraction of positive predictions that are actually positive.
/// NaN when nothing was predicted positive.
pub fn precision(actual: &[u8], predicted: &[u8]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let (mut tp, mut fp) = (0usize, 0usize);
    for (&a, &p) in actual.iter().zip(predicted.iter()) {
        if p == 1 {
            if a == 1 {
                tp += 1;
            } else {
                fp += 1;
            }
        }
    }

    if tp + fp == 0 {
        return f64::NAN;
    }
    tp as f64 / (tp + fp) as f64
}

/// Recall for the positive class
///
/// Fraction of actual positives that were predicted positive.
/// NaN when there are no actual positives.
pub fn recall(actual: &[u8], predicted: &[u8]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let (mut tp, mut fnn) = (0usize, 0usize);
    for (&a, &p) in actual.iter().zip(predicted.iter()) {
        if a == 1 {
            if p == 1 {
                tp += 1;
            } else {
                fnn += 1;
            }
        }
    }

    if tp + fnn == 0 {
        return f64::NAN;
    }
    tp as f64 / (tp + fnn) as f64
}

/// F1 score for the positive class
///
/// Harmonic mean of precision and recall.
pub fn f1(actual: &[u8], predicted: &[u8]) -> f64 {
    let p = precision(actual, predicted);
    let r = recall(actual, predicted);
    if !p.is_finite() || !r.is_finite() || p + r == 0.0 {
        return f64::NAN;
    }
    2.0 * p * r / (p + r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_perfect() {
        let labels = vec![0, 1, 1, 0];
        assert!((accuracy(&labels, &labels) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_accuracy_partial() {
        let actual = vec![0, 1, 1, 0];
        let predicted = vec![0, 1, 0, 1];
        assert!((accuracy(&actual, &predicted) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_accuracy_mismatched_lengths() {
        let actual = vec![0, 1];
        let predicted = vec![0];
        assert!(accuracy(&actual, &predicted).is_nan());
    }

    #[test]
    fn test_accuracy_empty() {
        assert!(accuracy(&[], &[]).is_nan());
    }

    #[test]
    fn test_precision_and_recall() {
        // tp=2, fp=1, fn=1
        let actual = vec![1, 1, 1, 0, 0];
        let predicted = vec![1, 1, 0, 1, 0];
        assert!((precision(&actual, &predicted) - 2.0 / 3.0).abs() < 1e-10);
        assert!((recall(&actual, &predicted) - 2.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_precision_no_positive_predictions() {
        let actual = vec![1, 0];
        let predicted = vec![0, 0];
        assert!(precision(&actual, &predicted).is_nan());
    }

    #[test]
    fn test_f1_known_value() {
        let actual = vec![1, 1, 1, 0, 0];
        let predicted = vec![1, 1, 0, 1, 0];
        // precision = recall = 2/3, so f1 = 2/3
        assert!((f1(&actual, &predicted) - 2.0 / 3.0).abs() < 1e-10);
    }
}
