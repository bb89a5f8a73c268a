//! Model families, typed parameters and their search grids
//!
//! Each family carries a typed parameter struct and a grid struct whose
//! fields are ordered candidate vectors. `candidates()` enumerates the
//! Cartesian product in field-declaration order, so the first candidate
//! combines every field's first value and enumeration order is stable —
//! the property grid-search tie-breaking relies on.

use classifier::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four model families of the benchmark, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelFamily {
    RandomForest,
    Svm,
    Knn,
    LogisticRegression,
}

impl ModelFamily {
    /// Full family name
    pub fn name(&self) -> &'static str {
        match self {
            ModelFamily::RandomForest => "RandomForest",
            ModelFamily::Svm => "SVC",
            ModelFamily::Knn => "KNN",
            ModelFamily::LogisticRegression => "LogisticRegression",
        }
    }

    /// Short name used for results files and console lines
    pub fn short_name(&self) -> &'static str {
        match self {
            ModelFamily::RandomForest => "RF",
            ModelFamily::Svm => "SVM",
            ModelFamily::Knn => "KNN",
            ModelFamily::LogisticRegression => "LR",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Random forest parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub max_features: MaxFeatures,
}

/// SVC parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvmParams {
    pub c: f64,
    pub kernel: Kernel,
}

/// KNN parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnnParams {
    pub k: usize,
    pub metric: DistanceMetric,
    pub weighting: VoteWeighting,
}

/// Logistic regression parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    pub c: f64,
    pub max_iter: usize,
}

/// One selected parameter combination for one model family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelParams {
    RandomForest(ForestParams),
    Svm(SvmParams),
    Knn(KnnParams),
    LogisticRegression(LogisticParams),
}

impl ModelParams {
    /// The family these parameters belong to
    pub fn family(&self) -> ModelFamily {
        match self {
            ModelParams::RandomForest(_) => ModelFamily::RandomForest,
            ModelParams::Svm(_) => ModelFamily::Svm,
            ModelParams::Knn(_) => ModelFamily::Knn,
            ModelParams::LogisticRegression(_) => ModelFamily::LogisticRegression,
        }
    }

    /// Instantiate the classifier for these parameters.
    ///
    /// `seed` feeds the model-internal randomness (forest bootstraps, SMO
    /// partner draws); families without internal randomness ignore it.
    /// Fails when the family cannot accept a parameter value.
    pub fn build(&self, seed: u64) -> classifier::Result<Box<dyn Classifier>> {
        match self {
            ModelParams::RandomForest(p) => Ok(Box::new(
                RandomForestClassifier::new(
                    p.n_estimators,
                    p.max_depth,
                    p.min_samples_split,
                    p.max_features,
                )?
                .with_seed(seed),
            )),
            ModelParams::Svm(p) => Ok(Box::new(Svc::new(p.c, p.kernel)?.with_seed(seed))),
            ModelParams::Knn(p) => Ok(Box::new(KnnClassifier::new(p.k, p.metric, p.weighting)?)),
            ModelParams::LogisticRegression(p) => {
                Ok(Box::new(LogisticRegression::new(p.c)?.with_max_iter(p.max_iter)))
            }
        }
    }
}

/// Search grid for the random forest family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestGrid {
    pub n_estimators: Vec<usize>,
    pub max_depth: Vec<Option<usize>>,
    pub min_samples_split: Vec<usize>,
    pub max_features: Vec<MaxFeatures>,
}

impl Default for ForestGrid {
    fn default() -> Self {
        Self {
            n_estimators: vec![50, 100, 200],
            max_depth: vec![Some(4), Some(8), None],
            min_samples_split: vec![2],
            max_features: vec![MaxFeatures::Sqrt, MaxFeatures::Log2],
        }
    }
}

impl ForestGrid {
    /// Cartesian candidates in field-declaration order
    pub fn candidates(&self) -> Vec<ModelParams> {
        let mut out = Vec::new();
        for &n_estimators in &self.n_estimators {
            for &max_depth in &self.max_depth {
                for &min_samples_split in &self.min_samples_split {
                    for &max_features in &self.max_features {
                        out.push(ModelParams::RandomForest(ForestParams {
                            n_estimators,
                            max_depth,
                            min_samples_split,
                            max_features,
                        }));
                    }
                }
            }
        }
        out
    }
}

/// Search grid for the SVC family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvmGrid {
    pub c: Vec<f64>,
    pub kernel: Vec<Kernel>,
}

impl Default for SvmGrid {
    fn default() -> Self {
        Self {
            c: vec![0.1, 1.0, 10.0],
            kernel: vec![
                Kernel::Linear,
                Kernel::Rbf { gamma: 0.01 },
                Kernel::Rbf { gamma: 0.1 },
            ],
        }
    }
}

impl SvmGrid {
    /// Cartesian candidates in field-declaration order
    pub fn candidates(&self) -> Vec<ModelParams> {
        let mut out = Vec::new();
        for &c in &self.c {
            for &kernel in &self.kernel {
                out.push(ModelParams::Svm(SvmParams { c, kernel }));
            }
        }
        out
    }
}

/// Search grid for the KNN family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnGrid {
    pub k: Vec<usize>,
    pub metric: Vec<DistanceMetric>,
    pub weighting: Vec<VoteWeighting>,
}

impl Default for KnnGrid {
    fn default() -> Self {
        Self {
            k: vec![3, 5, 7, 9],
            metric: vec![DistanceMetric::Euclidean],
            weighting: vec![VoteWeighting::Uniform, VoteWeighting::Distance],
        }
    }
}

impl KnnGrid {
    /// Cartesian candidates in field-declaration order
    pub fn candidates(&self) -> Vec<ModelParams> {
        let mut out = Vec::new();
        for &k in &self.k {
            for &metric in &self.metric {
                for &weighting in &self.weighting {
                    out.push(ModelParams::Knn(KnnParams {
                        k,
                        metric,
                        weighting,
                    }));
                }
            }
        }
        out
    }
}

/// Search grid for the logistic regression family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticGrid {
    pub c: Vec<f64>,
    pub max_iter: Vec<usize>,
}

impl Default for LogisticGrid {
    fn default() -> Self {
        Self {
            c: vec![0.01, 0.1, 1.0, 10.0],
            max_iter: vec![300],
        }
    }
}

impl LogisticGrid {
    /// Cartesian candidates in field-declaration order
    pub fn candidates(&self) -> Vec<ModelParams> {
        let mut out = Vec::new();
        for &c in &self.c {
            for &max_iter in &self.max_iter {
                out.push(ModelParams::LogisticRegression(LogisticParams {
                    c,
                    max_iter,
                }));
            }
        }
        out
    }
}

/// One family's search grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParamGrid {
    RandomForest(ForestGrid),
    Svm(SvmGrid),
    Knn(KnnGrid),
    LogisticRegression(LogisticGrid),
}

impl ParamGrid {
    /// The family this grid searches
    pub fn family(&self) -> ModelFamily {
        match self {
            ParamGrid::RandomForest(_) => ModelFamily::RandomForest,
            ParamGrid::Svm(_) => ModelFamily::Svm,
            ParamGrid::Knn(_) => ModelFamily::Knn,
            ParamGrid::LogisticRegression(_) => ModelFamily::LogisticRegression,
        }
    }

    /// All candidate combinations, in stable enumeration order
    pub fn candidates(&self) -> Vec<ModelParams> {
        match self {
            ParamGrid::RandomForest(grid) => grid.candidates(),
            ParamGrid::Svm(grid) => grid.candidates(),
            ParamGrid::Knn(grid) => grid.candidates(),
            ParamGrid::LogisticRegression(grid) => grid.candidates(),
        }
    }
}
