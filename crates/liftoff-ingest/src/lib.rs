// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! The record store: loads the launch table once, all-or-nothing, and
//! derives the global payload bounds. No other side effects.

mod csv;
mod logging;

use liftoff_model::{PayloadBounds, RecordTable};
use std::fmt::{Display, Formatter};
use std::path::Path;

pub const CRATE_NAME: &str = "liftoff-ingest";

pub use logging::{LoadEvent, LoadLog, LoadStage};

#[derive(Debug)]
pub struct LoadError(pub String);

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for LoadError {}

/// Bounds are undefined for a table with zero rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyTableError;

impl Display for EmptyTableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "payload bounds are undefined for an empty table")
    }
}
impl std::error::Error for EmptyTableError {}

/// Loads the launch table from a CSV file. Any defect (missing file,
/// empty file, missing required column, malformed row) fails the whole
/// load; there is no partial table.
pub fn load_launch_records(path: &Path) -> Result<RecordTable, LoadError> {
    load_launch_records_with_events(path).map(|(table, _)| table)
}

pub fn load_launch_records_with_events(
    path: &Path,
) -> Result<(RecordTable, Vec<LoadEvent>), LoadError> {
    let mut log = LoadLog::default();
    log.emit(LoadStage::Open, "load.start", [("path", path.display().to_string())]);

    let records = csv::parse_launch_csv(path, &mut log)?;
    log.emit(
        LoadStage::Validate,
        "load.complete",
        [("rows", records.len().to_string())],
    );
    Ok((RecordTable::from_records(records), log.into_events()))
}

/// Min/max payload mass over the loaded table. Pure.
pub fn payload_bounds(table: &RecordTable) -> Result<PayloadBounds, EmptyTableError> {
    let mut rows = table.iter();
    let first = rows.next().ok_or(EmptyTableError)?;
    let mut min = first.payload_mass_kg;
    let mut max = first.payload_mass_kg;
    for record in rows {
        if record.payload_mass_kg < min {
            min = record.payload_mass_kg;
        }
        if record.payload_mass_kg > max {
            max = record.payload_mass_kg;
        }
    }
    Ok(PayloadBounds { min, max })
}
