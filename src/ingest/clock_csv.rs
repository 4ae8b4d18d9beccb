//! Clock export reader.
//!
//! Expects a header row naming `Name` and `Date/Time`; other columns are
//! ignored. Timestamps are left as text for the engine to parse.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{ReconcileError, ReconcileResult};
use crate::models::ClockRow;

/// Reads the clock export at `path`.
pub fn read_clock_csv<P: AsRef<Path>>(path: P) -> ReconcileResult<Vec<ClockRow>> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    if !path.exists() {
        return Err(ReconcileError::MissingInput {
            source_name: "clock export".to_string(),
            path: path_str,
        });
    }

    let file = File::open(path).map_err(|e| ReconcileError::InputRead {
        path: path_str.clone(),
        message: e.to_string(),
    })?;
    let rows = read_clock_rows(file).map_err(|e| match e {
        ReconcileError::InputRead { message, .. } => ReconcileError::InputRead {
            path: path_str.clone(),
            message,
        },
        other => other,
    })?;

    tracing::info!(path = %path_str, rows = rows.len(), "Read clock export");
    Ok(rows)
}

/// Reads clock rows from any CSV source.
pub fn read_clock_rows<R: Read>(reader: R) -> ReconcileResult<Vec<ClockRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    csv_reader
        .deserialize::<ClockRow>()
        .map(|row| {
            row.map_err(|e| ReconcileError::InputRead {
                path: "<reader>".to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}
