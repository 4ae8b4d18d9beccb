//! Input adapters for the command-line front end.
//!
//! The engine works on materialized data; these adapters read it from disk.
//! A missing file is reported as [`ReconcileError::MissingInput`](crate::error::ReconcileError::MissingInput)
//! before anything else runs.

mod clock_csv;
mod timesheet_text;

pub use clock_csv::{read_clock_csv, read_clock_rows};
pub use timesheet_text::{read_timesheet_tokens, write_token_dump};
