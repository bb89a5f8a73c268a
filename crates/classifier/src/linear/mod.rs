//! Linear classification models

mod logistic;

pub use logistic::LogisticRegression;
