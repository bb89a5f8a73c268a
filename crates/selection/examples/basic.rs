//! Basic example demonstrating the search and evaluation pipeline
//!
//! Run with: cargo run --example basic -p selection

use selection::{GridSearch, KnnGrid, ParamGrid, RepeatedEvaluator};
use tabular::TrainingSet;

fn main() {
    println!("=== selection Basic Example ===\n");

    // Synthetic table: two clusters of 10 rows each
    let mut ids = Vec::new();
    let mut features = Vec::new();
    let mut labels = Vec::new();
    for i in 0..10 {
        let jitter = (i % 5) as f64 * 0.1;
        ids.push(format!("lo{i}"));
        features.push(vec![jitter, 0.2 + jitter]);
        labels.push(0);
        ids.push(format!("hi{i}"));
        features.push(vec![6.0 + jitter, 6.2 + jitter]);
        labels.push(1);
    }
    let data = TrainingSet::new(
        ids,
        vec!["x1".to_string(), "x2".to_string()],
        features,
        labels,
    )
    .unwrap();
    println!("1. Loaded {} rows, {} features", data.n_rows(), data.n_features());

    // Grid search
    let grid = ParamGrid::Knn(KnnGrid::default());
    let outcome = GridSearch::new(5).optimize(&grid, &data).unwrap();
    println!("2. Best of {} candidates: {:?}", outcome.evaluated, outcome.params);
    if let Some(score) = outcome.mean_accuracy {
        println!("   CV accuracy: {score:.4}");
    }

    // Repeated evaluation
    let evaluation = RepeatedEvaluator::new(20)
        .with_split_seed(42)
        .evaluate(&outcome.params, &data)
        .unwrap();
    println!("3. Mean accuracy over 20 iterations: {:.2}", evaluation.mean_accuracy());
    println!("   {} identifiers retained:", evaluation.totals.len());
    for entry in evaluation.totals.iter().take(5) {
        println!("   {} -> {}", entry.id, entry.total);
    }
}
