//! Error types for the hours reconciler.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can stop a reconciliation run or a single
//! employee's part of it.

use thiserror::Error;

/// The main error type for the hours reconciler.
///
/// Fatal conditions (missing inputs, broken configuration) abort the run.
/// Record-level conditions (unparseable timestamps or hours) are either
/// skipped with a warning or fail a single employee, depending on the
/// configured [`ParsePolicy`](crate::config::ParsePolicy).
///
/// # Example
///
/// ```
/// use hours_reconciler::error::ReconcileError;
///
/// let error = ReconcileError::MissingInput {
///     source_name: "clock export".to_string(),
///     path: "/missing/punches.csv".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Missing required input (clock export): /missing/punches.csv"
/// );
/// ```
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A required source artifact was not found.
    #[error("Missing required input ({source_name}): {path}")]
    MissingInput {
        /// Which input was missing (e.g. "clock export").
        source_name: String,
        /// The path that was not found.
        path: String,
    },

    /// A source artifact was readable but held nothing usable.
    #[error("Input contains no usable records: {source_name}")]
    EmptyInput {
        /// Which input was empty.
        source_name: String,
    },

    /// A source artifact exists but could not be read or decoded.
    #[error("Failed to read input '{path}': {message}")]
    InputRead {
        /// The path of the unreadable input.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A clock timestamp did not match any configured timestamp format.
    #[error("Unparseable timestamp '{value}' for employee '{employee}'")]
    UnparseableTimestamp {
        /// The employee the record belongs to.
        employee: String,
        /// The raw timestamp text.
        value: String,
    },

    /// A timesheet hours token was not a decimal number.
    #[error("Unparseable hours value '{value}' for employee '{employee}'")]
    UnparseableHours {
        /// The employee the record belongs to.
        employee: String,
        /// The raw hours token.
        value: String,
    },

    /// The report could not be written.
    #[error("Failed to write report to '{path}': {message}")]
    ReportWrite {
        /// The destination path.
        path: String,
        /// A description of the write failure.
        message: String,
    },
}

/// A type alias for Results that return ReconcileError.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
