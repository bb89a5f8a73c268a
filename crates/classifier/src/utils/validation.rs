//! Resampling helpers for model selection and evaluation
//!
//! Rows carry no temporal order, so splits shuffle indices with a seeded
//! generator; the same seed always reproduces the same partition.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Seeded shuffle split of row indices into train and test sets.
///
/// The test set takes `ceil(n_rows * test_ratio)` rows (ratio clamped to
/// [0.1, 0.9]). Calling with the same `seed` yields an identical
/// partition regardless of how often it is called.
///
/// # Returns
///
/// `(train_indices, test_indices)`
pub fn train_test_split(n_rows: usize, test_ratio: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    if n_rows < 2 {
        return ((0..n_rows).collect(), Vec::new());
    }

    let test_ratio = test_ratio.clamp(0.1, 0.9);
    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_rows as f64) * test_ratio).ceil() as usize;
    let n_test = n_test.clamp(1, n_rows - 1);

    let test = indices[..n_test].to_vec();
    let train = indices[n_test..].to_vec();
    (train, test)
}

/// Deterministic k-fold splits over row indices.
///
/// Folds are contiguous; the first `n_rows % folds` folds take one extra
/// row. Training indices are the complement of the held-out fold.
/// Returns an empty vector when `folds < 2` or there are fewer rows than
/// folds.
pub fn kfold_splits(n_rows: usize, folds: usize) -> Vec<(Vec<usize>, Vec<usize>)> {
    if folds < 2 || n_rows < folds {
        return Vec::new();
    }

    let base = n_rows / folds;
    let extra = n_rows % folds;

    let mut splits = Vec::with_capacity(folds);
    let mut start = 0;
    for fold in 0..folds {
        let size = base + usize::from(fold < extra);
        let test: Vec<usize> = (start..start + size).collect();
        let train: Vec<usize> = (0..start).chain(start + size..n_rows).collect();
        splits.push((train, test));
        start += size;
    }

    splits
}
