//! The cleaned training table.

use crate::{Result, TabularError};
use std::collections::HashSet;

/// A cleaned, fully numeric training table.
///
/// Rows are aligned across `ids`, `features` and `labels`. The identifier
/// is deliberately not a feature column: models only ever see `features`,
/// while the identifier tracks each row across resampling iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    ids: Vec<String>,
    feature_names: Vec<String>,
    features: Vec<Vec<f64>>,
    labels: Vec<u8>,
}

impl TrainingSet {
    /// Assemble a training set, validating row alignment, feature widths,
    /// identifier uniqueness and the binary label domain.
    pub fn new(
        ids: Vec<String>,
        feature_names: Vec<String>,
        features: Vec<Vec<f64>>,
        labels: Vec<u8>,
    ) -> Result<Self> {
        if ids.len() != features.len() || ids.len() != labels.len() {
            return Err(TabularError::Misaligned(format!(
                "{} ids, {} feature rows, {} labels",
                ids.len(),
                features.len(),
                labels.len()
            )));
        }
        if ids.is_empty() {
            return Err(TabularError::EmptyTable);
        }
        if features.iter().any(|row| row.len() != feature_names.len()) {
            return Err(TabularError::Misaligned(format!(
                "feature rows do not all have {} columns",
                feature_names.len()
            )));
        }

        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(id.as_str()) {
                return Err(TabularError::DuplicateIdentifier { id: id.clone() });
            }
        }

        if let Some(position) = labels.iter().position(|&label| label > 1) {
            return Err(TabularError::InvalidLabel {
                value: labels[position].to_string(),
                row: position + 1,
            });
        }

        Ok(Self {
            ids,
            feature_names,
            features,
            labels,
        })
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.ids.len()
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Row identifiers
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Feature column names
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Feature rows
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// Labels
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Gather the feature rows and labels at the given indices.
    pub fn select(&self, rows: &[usize]) -> (Vec<Vec<f64>>, Vec<u8>) {
        (
            rows.iter().map(|&row| self.features[row].clone()).collect(),
            rows.iter().map(|&row| self.labels[row]).collect(),
        )
    }
}
