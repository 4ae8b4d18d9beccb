//! Per-employee reconciliation records.
//!
//! An [`EmployeeRecord`] owns the normalized data from both sources. Weekly
//! totals and per-day durations are derived on demand from those maps and are
//! never stored, so they cannot drift from the underlying data.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ClockDay, PayCategory, TimesheetEntry, WeekWindow, format_hm};
use crate::reconciliation::{clock_total_seconds, timesheet_daily_minutes, timesheet_total_minutes};

/// Which system produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// The physical time clock (source A).
    Clock,
    /// The payroll timesheet document (source B).
    Timesheet,
}

impl Source {
    /// The heading used for this source in the text report.
    pub fn label(&self) -> &'static str {
        match self {
            Source::Clock => "CrossChex",
            Source::Timesheet => "TimeKeeper",
        }
    }
}

/// One source's value for one employee on one date.
///
/// At most one exists per `(employee, date, source)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDuration {
    /// Canonical employee name.
    pub employee: String,
    /// Calendar date (the logical work-day for clock data).
    pub date: NaiveDate,
    /// Provenance.
    pub source: Source,
    /// Summable worked seconds; `None` for a single clock punch.
    pub worked_seconds: Option<i64>,
    /// Per-day report text.
    pub detail: String,
    /// Raw pay categories seen on this date (timesheet only, before filtering).
    pub categories: Vec<PayCategory>,
}

/// Everything known about one employee for a run.
///
/// # Example
///
/// ```
/// use hours_reconciler::models::{ClockDay, EmployeeRecord, PayCategory, TimesheetEntry, WeekWindow};
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let mut record = EmployeeRecord::new("Jane Doe");
/// record.clock_days.insert(monday, ClockDay::Worked { seconds: 8 * 3600 });
/// record.timesheet_entries.push(TimesheetEntry {
///     date: monday,
///     minutes: 480,
///     category: PayCategory::Straight,
/// });
///
/// let window = WeekWindow::starting(monday);
/// assert_eq!(record.clock_total_seconds(&window), 8 * 3600);
/// assert_eq!(record.timesheet_total_minutes(&window, &PayCategory::default_included()), 480);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Canonical employee name.
    pub name: String,
    /// Normalized clock days keyed by logical work-day.
    pub clock_days: BTreeMap<NaiveDate, ClockDay>,
    /// Timesheet entries in document order.
    pub timesheet_entries: Vec<TimesheetEntry>,
    /// Set when a strict-policy parse failure stopped this employee.
    pub failure: Option<String>,
}

impl EmployeeRecord {
    /// Creates an empty record.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clock_days: BTreeMap::new(),
            timesheet_entries: Vec::new(),
            failure: None,
        }
    }

    /// Sum of summable clock days inside `window`, in seconds.
    pub fn clock_total_seconds(&self, window: &WeekWindow) -> i64 {
        clock_total_seconds(&self.clock_days, window)
    }

    /// Included-category timesheet minutes per date.
    pub fn timesheet_days(&self, included: &[PayCategory]) -> BTreeMap<NaiveDate, i64> {
        timesheet_daily_minutes(&self.timesheet_entries, included)
    }

    /// Included-category timesheet minutes inside `window`.
    pub fn timesheet_total_minutes(&self, window: &WeekWindow, included: &[PayCategory]) -> i64 {
        timesheet_total_minutes(&self.timesheet_entries, window, included)
    }

    /// Flattens both sources into provenance-tagged daily values, clock first.
    pub fn daily_durations(&self, included: &[PayCategory]) -> Vec<DailyDuration> {
        let mut durations: Vec<DailyDuration> = self
            .clock_days
            .iter()
            .map(|(date, day)| DailyDuration {
                employee: self.name.clone(),
                date: *date,
                source: Source::Clock,
                worked_seconds: day.worked().map(|d| d.num_seconds()),
                detail: day.detail(),
                categories: Vec::new(),
            })
            .collect();

        for (date, minutes) in self.timesheet_days(included) {
            let mut categories: Vec<PayCategory> = Vec::new();
            for entry in self.timesheet_entries.iter().filter(|e| e.date == date) {
                if !categories.contains(&entry.category) {
                    categories.push(entry.category.clone());
                }
            }

            durations.push(DailyDuration {
                employee: self.name.clone(),
                date,
                source: Source::Timesheet,
                worked_seconds: Some(minutes.saturating_mul(60)),
                detail: format_hm(minutes),
                categories,
            });
        }

        durations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn make_date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn entry(d: u32, minutes: i64, code: &str) -> TimesheetEntry {
        TimesheetEntry {
            date: make_date(d),
            minutes,
            category: PayCategory::from_code(code),
        }
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(Source::Clock.label(), "CrossChex");
        assert_eq!(Source::Timesheet.label(), "TimeKeeper");
    }

    #[test]
    fn test_daily_durations_one_per_date_and_source() {
        let mut record = EmployeeRecord::new("Jane Doe");
        record
            .clock_days
            .insert(make_date(4), ClockDay::Worked { seconds: 29_700 });
        record.clock_days.insert(
            make_date(5),
            ClockDay::SinglePunch {
                at: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            },
        );
        record.timesheet_entries = vec![
            entry(4, 480, "ST"),
            entry(4, 60, "OT"),
            entry(5, 480, "PERH"),
        ];

        let durations = record.daily_durations(&PayCategory::default_included());
        assert_eq!(durations.len(), 4);

        let clock: Vec<_> = durations
            .iter()
            .filter(|d| d.source == Source::Clock)
            .collect();
        assert_eq!(clock[0].detail, "08:15:00");
        assert_eq!(clock[1].worked_seconds, None);

        let timesheet: Vec<_> = durations
            .iter()
            .filter(|d| d.source == Source::Timesheet)
            .collect();
        assert_eq!(timesheet[0].detail, "09:00");
        assert_eq!(
            timesheet[0].categories,
            vec![PayCategory::Straight, PayCategory::Overtime]
        );
        assert_eq!(timesheet[1].detail, "00:00");
        assert_eq!(timesheet[1].categories, vec![PayCategory::PerDiemHours]);
    }

    #[test]
    fn test_totals_are_recomputed_from_maps() {
        let window = WeekWindow::starting(make_date(4));
        let mut record = EmployeeRecord::new("Jane Doe");
        record
            .clock_days
            .insert(make_date(4), ClockDay::Worked { seconds: 3600 });
        assert_eq!(record.clock_total_seconds(&window), 3600);

        record
            .clock_days
            .insert(make_date(6), ClockDay::Worked { seconds: 7200 });
        assert_eq!(record.clock_total_seconds(&window), 10_800);
    }
}
