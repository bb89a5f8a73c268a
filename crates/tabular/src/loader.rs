//! Training table loader
//!
//! Cleaning order matches the source pipeline: rows with any missing cell
//! are dropped first (judged across every column, including columns that
//! are themselves about to be dropped), then the fixed administrative and
//! state-indicator columns are removed.

use crate::columns::{is_excluded, ID_COLUMN, LABEL_COLUMN};
use crate::{Result, TabularError, TrainingSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Load and clean the training table from a CSV file.
///
/// Fails if the file cannot be read or parsed, if the `unique` or label
/// column is absent, if a non-empty feature cell is not numeric, if a
/// label is outside {0, 1}, or if cleaning leaves duplicate identifiers
/// or no rows at all.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<TrainingSet> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| TabularError::ReadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| TabularError::ParseError(e.to_string()))?
        .clone();

    let id_index = headers
        .iter()
        .position(|header| header == ID_COLUMN)
        .ok_or_else(|| TabularError::MissingColumn {
            name: ID_COLUMN.to_string(),
        })?;
    let label_index = headers
        .iter()
        .position(|header| header == LABEL_COLUMN)
        .ok_or_else(|| TabularError::MissingColumn {
            name: LABEL_COLUMN.to_string(),
        })?;

    // Columns that survive into the feature matrix, in source order
    let kept: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|&(index, header)| {
            index != id_index && index != label_index && !is_excluded(header)
        })
        .map(|(index, header)| (index, header.to_string()))
        .collect();

    let mut ids = Vec::new();
    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut dropped = 0usize;

    for (record_index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| TabularError::ParseError(e.to_string()))?;
        // Header is row 1 in the source file
        let row = record_index + 2;

        if record.iter().any(|cell| cell.trim().is_empty()) {
            dropped += 1;
            continue;
        }

        let id = record
            .get(id_index)
            .ok_or_else(|| TabularError::ParseError(format!("row {row} is truncated")))?
            .trim()
            .to_string();

        let raw_label = record
            .get(label_index)
            .ok_or_else(|| TabularError::ParseError(format!("row {row} is truncated")))?
            .trim();
        let label = parse_label(raw_label).ok_or_else(|| TabularError::InvalidLabel {
            value: raw_label.to_string(),
            row,
        })?;

        let mut feature_row = Vec::with_capacity(kept.len());
        for (index, name) in &kept {
            let cell = record
                .get(*index)
                .ok_or_else(|| TabularError::ParseError(format!("row {row} is truncated")))?
                .trim();
            let value: f64 = cell.parse().map_err(|_| TabularError::InvalidValue {
                column: name.clone(),
                value: cell.to_string(),
                row,
            })?;
            feature_row.push(value);
        }

        ids.push(id);
        features.push(feature_row);
        labels.push(label);
    }

    let feature_names: Vec<String> = kept.into_iter().map(|(_, name)| name).collect();
    let set = TrainingSet::new(ids, feature_names, features, labels)?;

    info!(
        rows = set.n_rows(),
        dropped,
        features = set.n_features(),
        "training table loaded"
    );
    Ok(set)
}

/// Parse a label cell; accepts integer or float renderings of 0 and 1.
fn parse_label(cell: &str) -> Option<u8> {
    let value: f64 = cell.parse().ok()?;
    if value == 0.0 {
        Some(0)
    } else if value == 1.0 {
        Some(1)
    } else {
        None
    }
}
