//! # reopenml
//!
//! Batch benchmark of four classical classifier families on the business
//! reopening table. For each family, in declaration order: grid-search
//! the hyperparameters with cross-validation, run the repeated 50/50
//! evaluation, write `{model}Results.csv`, and print the mean accuracy.
//!
//! Running with no arguments uses the standard configuration:
//! 20 iterations, 5 folds, seed 42, fixed input path.

use clap::Parser;
use selection::{
    write_results_csv, ForestGrid, GridSearch, KnnGrid, LogisticGrid, ParamGrid,
    RepeatedEvaluator, SvmGrid,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "reopenml")]
#[command(about = "Reopening outcome classifier benchmark", long_about = None)]
struct Args {
    /// Input table (CSV)
    #[arg(short, long, default_value = "data/reopened.csv")]
    input: PathBuf,

    /// Directory for the per-model results files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Resampling iterations per model family
    #[arg(long, default_value = "20")]
    iterations: usize,

    /// Cross-validation folds for the grid search
    #[arg(long, default_value = "5")]
    folds: usize,

    /// Seed of the train/test split
    #[arg(long, default_value = "42")]
    seed: u64,
}

/// The four families and their fixed grids, in benchmark order.
fn model_grids() -> Vec<ParamGrid> {
    vec![
        ParamGrid::RandomForest(ForestGrid::default()),
        ParamGrid::Svm(SvmGrid::default()),
        ParamGrid::Knn(KnnGrid::default()),
        ParamGrid::LogisticRegression(LogisticGrid::default()),
    ]
}

fn run(args: &Args) -> CliResult<()> {
    let data = tabular::load_csv(&args.input).map_err(|e| e.to_string())?;
    info!(
        rows = data.n_rows(),
        features = data.n_features(),
        "benchmark starting"
    );

    let search = GridSearch::new(args.folds);
    let evaluator = RepeatedEvaluator::new(args.iterations).with_split_seed(args.seed);

    for grid in model_grids() {
        let family = grid.family();
        info!(
            model = family.name(),
            candidates = grid.candidates().len(),
            "optimizing hyperparameters"
        );
        let outcome = search.optimize(&grid, &data).map_err(|e| e.to_string())?;
        if let Some(score) = outcome.mean_accuracy {
            info!(
                model = family.name(),
                cv_accuracy = score,
                evaluated = outcome.evaluated,
                "grid search complete"
            );
        }

        let evaluation = evaluator
            .evaluate(&outcome.params, &data)
            .map_err(|e| e.to_string())?;

        let path = args
            .output_dir
            .join(format!("{}Results.csv", family.short_name()));
        write_results_csv(&path, &evaluation).map_err(|e| e.to_string())?;

        println!(
            "{} Accuracy: {:.2}",
            family.short_name(),
            evaluation.mean_accuracy()
        );
    }

    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
