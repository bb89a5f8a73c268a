//! Fixed column names of the reopening source table.

/// Row identifier column; carried out-of-band of the feature matrix.
pub const ID_COLUMN: &str = "unique";

/// Binary outcome column.
pub const LABEL_COLUMN: &str = "ReopenedByMarch29_UR";

/// Administrative columns dropped before modeling.
pub const ADMIN_COLUMNS: [&str; 6] = [
    "Town",
    "County",
    "State",
    "TownID",
    "CountyFIPS",
    "StateFIPS",
];

/// Per-state indicator columns dropped before modeling.
///
/// The source table covers 47 states; Alaska, Hawaii and Wyoming have no
/// indicator column.
pub const STATE_COLUMNS: [&str; 47] = [
    "AL", "AR", "AZ", "CA", "CO", "CT", "DE", "FL", "GA", "IA", "ID", "IL", "IN", "KS", "KY",
    "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE", "NH", "NJ", "NM",
    "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VA", "VT", "WA",
    "WI", "WV",
];

/// True when a header names one of the 53 excluded columns.
pub(crate) fn is_excluded(header: &str) -> bool {
    ADMIN_COLUMNS.contains(&header) || STATE_COLUMNS.contains(&header)
}
