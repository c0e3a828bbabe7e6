#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! CSV readers and writers for the conflict panel tables.
//!
//! Readers accept the canonical column names plus the aliases seen in
//! source extracts (`admin1`/`admin2`, `case_id`, ...), tried in order.
//! Missing *required* columns are fatal and reported all at once; missing
//! optional columns just leave their fields empty for the normalizer to
//! default. Row-level problems are never raised here.

pub mod read;
pub mod write;

pub use read::{read_events, read_events_from, read_respondents, read_respondents_from};
pub use write::{
    write_location_year_csv, write_location_year_table, write_panel_csv, write_panel_table,
    write_raw_event_csv, write_raw_event_table, write_raw_respondent_csv,
    write_raw_respondent_table,
};

/// Error reading or writing a conflict panel table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The table is structurally unusable: required columns are absent.
    #[error("{table} table '{path}' is missing required column(s): {columns:?}")]
    MissingColumns {
        table: &'static str,
        path: String,
        columns: Vec<String>,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
