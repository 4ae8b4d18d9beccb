//! Non-fatal findings collected during a run.

use serde::{Deserialize, Serialize};

/// A data-quality finding that does not stop the run.
///
/// Every warning is logged when raised and kept on the final report so an
/// auditor sees the same list the log shows.
///
/// # Example
///
/// ```
/// use hours_reconciler::models::ReconcileWarning;
///
/// let warning = ReconcileWarning::NoTimesheetBlock {
///     employee: "Jane Doe".to_string(),
/// };
/// assert_eq!(warning.code(), "no_timesheet_block");
/// assert_eq!(warning.to_string(), "No timesheet block matched employee 'Jane Doe'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ReconcileWarning {
    /// A token accepted for `employee` also clears the threshold for other names.
    AmbiguousIdentityMatch {
        /// The employee the token was accepted for.
        employee: String,
        /// Position of the token in the stream.
        token_index: usize,
        /// The token text.
        token: String,
        /// Other employees whose names also match the token.
        rivals: Vec<String>,
    },
    /// No candidate name match was found in the timesheet.
    NoTimesheetBlock {
        /// The unmatched employee.
        employee: String,
    },
    /// A block scan ran to the end of the stream without a terminator.
    UnterminatedBlock {
        /// The employee being scanned.
        employee: String,
        /// Position the scan started at.
        start_index: usize,
    },
    /// A day entry was recognized but its hours or category token was missing.
    TruncatedDayEntry {
        /// The employee being scanned.
        employee: String,
        /// Position of the date token.
        token_index: usize,
    },
    /// A record was skipped under the lenient parse policy.
    SkippedRecord {
        /// The employee the record belongs to.
        employee: String,
        /// Why the record was skipped.
        reason: String,
    },
}

impl ReconcileWarning {
    /// A stable identifier for this kind of warning.
    pub fn code(&self) -> &'static str {
        match self {
            ReconcileWarning::AmbiguousIdentityMatch { .. } => "ambiguous_identity_match",
            ReconcileWarning::NoTimesheetBlock { .. } => "no_timesheet_block",
            ReconcileWarning::UnterminatedBlock { .. } => "unterminated_block",
            ReconcileWarning::TruncatedDayEntry { .. } => "truncated_day_entry",
            ReconcileWarning::SkippedRecord { .. } => "skipped_record",
        }
    }

    /// The employee the warning concerns.
    pub fn employee(&self) -> &str {
        match self {
            ReconcileWarning::AmbiguousIdentityMatch { employee, .. }
            | ReconcileWarning::NoTimesheetBlock { employee }
            | ReconcileWarning::UnterminatedBlock { employee, .. }
            | ReconcileWarning::TruncatedDayEntry { employee, .. }
            | ReconcileWarning::SkippedRecord { employee, .. } => employee,
        }
    }
}

impl std::fmt::Display for ReconcileWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileWarning::AmbiguousIdentityMatch {
                employee,
                token_index,
                token,
                rivals,
            } => write!(
                f,
                "Token {} ('{}') matched '{}' but also matches: {}",
                token_index,
                token,
                employee,
                rivals.join(", ")
            ),
            ReconcileWarning::NoTimesheetBlock { employee } => {
                write!(f, "No timesheet block matched employee '{}'", employee)
            }
            ReconcileWarning::UnterminatedBlock {
                employee,
                start_index,
            } => write!(
                f,
                "Timesheet block for '{}' starting at token {} has no terminator",
                employee, start_index
            ),
            ReconcileWarning::TruncatedDayEntry {
                employee,
                token_index,
            } => write!(
                f,
                "Day entry for '{}' at token {} is missing its hours or category",
                employee, token_index
            ),
            ReconcileWarning::SkippedRecord { employee, reason } => {
                write!(f, "Skipped record for '{}': {}", employee, reason)
            }
        }
    }
}
