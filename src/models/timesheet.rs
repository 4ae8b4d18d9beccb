//! Payroll timesheet (source B) day entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PayCategory;

/// One `(date, hours, category)` triple recovered from the timesheet tokens.
///
/// Hours are stored as whole minutes, truncated from the printed fractional
/// hours (`8.25` -> 495 minutes).
///
/// # Example
///
/// ```
/// use hours_reconciler::models::{PayCategory, TimesheetEntry, format_hm};
/// use chrono::NaiveDate;
///
/// let entry = TimesheetEntry {
///     date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     minutes: 495,
///     category: PayCategory::Straight,
/// };
/// assert_eq!(format_hm(entry.minutes), "08:15");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    /// The work date printed on the timesheet.
    pub date: NaiveDate,
    /// Worked minutes for this line.
    pub minutes: i64,
    /// The pay category code printed after the hours.
    pub category: PayCategory,
}

/// Formats minutes as zero-padded `HH:MM` (per-day timesheet detail).
pub fn format_hm(total_minutes: i64) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Formats minutes as `HH:MM:00` (weekly timesheet total).
pub fn format_hm_total(total_minutes: i64) -> String {
    format!("{}:00", format_hm(total_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hm() {
        assert_eq!(format_hm(0), "00:00");
        assert_eq!(format_hm(495), "08:15");
        assert_eq!(format_hm(2460), "41:00");
    }

    #[test]
    fn test_format_hm_total_appends_seconds() {
        assert_eq!(format_hm_total(480), "08:00:00");
    }
}
