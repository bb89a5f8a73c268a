//! Training table loading and cleaning
//!
//! Reads the reopening source table, drops incomplete rows and the fixed
//! geographic/administrative columns, and produces a [`TrainingSet`] with
//! the row identifier carried out-of-band of the feature matrix.

mod columns;
mod error;
mod loader;
mod table;

pub use columns::{ADMIN_COLUMNS, ID_COLUMN, LABEL_COLUMN, STATE_COLUMNS};
pub use error::{Result, TabularError};
pub use loader::load_csv;
pub use table::TrainingSet;
