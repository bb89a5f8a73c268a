//! Results files
//!
//! One CSV per model family: `unique,prediction_total`, one row per
//! retained identifier.

use crate::evaluate::Evaluation;
use crate::{Result, SelectionError};
use std::path::Path;
use tracing::info;

/// Write one evaluation's totals table as CSV.
pub fn write_results_csv<P: AsRef<Path>>(path: P, evaluation: &Evaluation) -> Result<()> {
    let path = path.as_ref();
    let wrap = |reason: String| SelectionError::WriteError {
        path: path.display().to_string(),
        reason,
    };

    let mut writer = csv::Writer::from_path(path).map_err(|e| wrap(e.to_string()))?;
    writer
        .write_record(["unique", "prediction_total"])
        .map_err(|e| wrap(e.to_string()))?;

    for entry in &evaluation.totals {
        let total = entry.total.to_string();
        writer
            .write_record([entry.id.as_str(), total.as_str()])
            .map_err(|e| wrap(e.to_string()))?;
    }

    writer.flush().map_err(|e| wrap(e.to_string()))?;

    info!(
        family = evaluation.family.name(),
        rows = evaluation.totals.len(),
        path = %path.display(),
        "results written"
    );
    Ok(())
}
