//! Hyperparameter search and repeated evaluation
//!
//! This crate drives the model families from the `classifier` crate over a
//! cleaned [`tabular::TrainingSet`]:
//!
//! - [`grid`]: typed parameter grids and their Cartesian candidates
//! - [`search`]: cross-validated grid search over a grid's candidates
//! - [`evaluate`]: the repeated 50/50 resampling evaluator
//! - [`report`]: per-family results files
//!
//! ## Example
//!
//! ```rust,ignore
//! use selection::{GridSearch, ParamGrid, KnnGrid, RepeatedEvaluator};
//!
//! let data = tabular::load_csv("data/reopened.csv")?;
//! let grid = ParamGrid::Knn(KnnGrid::default());
//! let outcome = GridSearch::new(5).optimize(&grid, &data)?;
//! let evaluation = RepeatedEvaluator::new(20).evaluate(&outcome.params, &data)?;
//! println!("KNN Accuracy: {:.2}", evaluation.mean_accuracy());
//! ```

mod error;
pub mod evaluate;
pub mod grid;
pub mod report;
pub mod search;

pub use error::{Result, SelectionError};
pub use evaluate::{Evaluation, PredictionTotal, RepeatedEvaluator};
pub use grid::{
    ForestGrid, ForestParams, KnnGrid, KnnParams, LogisticGrid, LogisticParams, ModelFamily,
    ModelParams, ParamGrid, SvmGrid, SvmParams,
};
pub use report::write_results_csv;
pub use search::{GridSearch, SearchOutcome};
