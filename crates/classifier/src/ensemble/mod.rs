//! Tree ensembles

mod forest;
mod tree;

pub use forest::RandomForestClassifier;
pub use tree::MaxFeatures;
