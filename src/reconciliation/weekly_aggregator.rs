//! Weekly totals per source.
//!
//! Each source is totalled independently over the week window; comparing the
//! two is left to the person reading the report.
//!
//! - Clock: worked days inside the window. Single-punch days cannot be summed
//!   and are left out (they still appear in the per-day detail).
//! - Timesheet: entries whose pay category is in the inclusion set.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ClockDay, PayCategory, TimesheetEntry, WeekWindow, format_hm_total, format_hms};

/// Both weekly totals for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTotals {
    /// Clock total in seconds.
    pub clock_seconds: i64,
    /// Timesheet total in minutes.
    pub timesheet_minutes: i64,
}

impl WeeklyTotals {
    /// Clock total as `HH:MM:SS`.
    pub fn clock_display(&self) -> String {
        format_hms(self.clock_seconds)
    }

    /// Timesheet total as `HH:MM:00`.
    pub fn timesheet_display(&self) -> String {
        format_hm_total(self.timesheet_minutes)
    }
}

/// Sums summable clock days that fall inside `window`.
pub fn clock_total_seconds(days: &BTreeMap<NaiveDate, ClockDay>, window: &WeekWindow) -> i64 {
    days.iter()
        .filter(|(date, _)| window.contains(**date))
        .filter_map(|(_, day)| day.worked())
        .fold(0i64, |total, worked| total.saturating_add(worked.num_seconds()))
}

/// Included-category minutes per date.
///
/// Every date that has any entry is present, so a date carrying only excluded
/// categories maps to zero rather than disappearing.
pub fn timesheet_daily_minutes(
    entries: &[TimesheetEntry],
    included: &[PayCategory],
) -> BTreeMap<NaiveDate, i64> {
    let mut days: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for entry in entries {
        let minutes = days.entry(entry.date).or_insert(0);
        if included.contains(&entry.category) {
            *minutes = minutes.saturating_add(entry.minutes);
        }
    }
    days
}

/// Included-category minutes inside `window`.
///
/// # Example
///
/// ```
/// use hours_reconciler::models::{PayCategory, TimesheetEntry, WeekWindow};
/// use hours_reconciler::reconciliation::timesheet_total_minutes;
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// let entries = vec![
///     TimesheetEntry { date: monday, minutes: 480, category: PayCategory::Straight },
///     TimesheetEntry { date: tuesday, minutes: 480, category: PayCategory::PerDiemHours },
/// ];
///
/// let total = timesheet_total_minutes(
///     &entries,
///     &WeekWindow::starting(monday),
///     &PayCategory::default_included(),
/// );
/// assert_eq!(total, 480);
/// ```
pub fn timesheet_total_minutes(
    entries: &[TimesheetEntry],
    window: &WeekWindow,
    included: &[PayCategory],
) -> i64 {
    entries
        .iter()
        .filter(|entry| window.contains(entry.date))
        .filter(|entry| included.contains(&entry.category))
        .fold(0i64, |total, entry| total.saturating_add(entry.minutes))
}

/// Computes both totals.
pub fn weekly_totals(
    clock_days: &BTreeMap<NaiveDate, ClockDay>,
    entries: &[TimesheetEntry],
    window: &WeekWindow,
    included: &[PayCategory],
) -> WeeklyTotals {
    WeeklyTotals {
        clock_seconds: clock_total_seconds(clock_days, window),
        timesheet_minutes: timesheet_total_minutes(entries, window, included),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn make_date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn window() -> WeekWindow {
        WeekWindow::starting(make_date(3, 4))
    }

    fn entry(d: u32, minutes: i64, code: &str) -> TimesheetEntry {
        TimesheetEntry {
            date: make_date(3, d),
            minutes,
            category: PayCategory::from_code(code),
        }
    }

    #[test]
    fn test_clock_total_skips_single_punch() {
        let mut days = BTreeMap::new();
        days.insert(make_date(3, 4), ClockDay::Worked { seconds: 29_700 });
        days.insert(
            make_date(3, 5),
            ClockDay::SinglePunch {
                at: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            },
        );
        days.insert(make_date(3, 6), ClockDay::Worked { seconds: 28_800 });
        assert_eq!(clock_total_seconds(&days, &window()), 58_500);
    }

    #[test]
    fn test_clock_total_ignores_days_outside_window() {
        let mut days = BTreeMap::new();
        days.insert(make_date(3, 3), ClockDay::Worked { seconds: 3600 });
        days.insert(make_date(3, 10), ClockDay::Worked { seconds: 3600 });
        days.insert(make_date(3, 11), ClockDay::Worked { seconds: 3600 });
        assert_eq!(clock_total_seconds(&days, &window()), 3600);
    }

    #[test]
    fn test_timesheet_total_excludes_per_diem() {
        let entries = vec![entry(4, 480, "ST"), entry(5, 480, "PERH")];
        let totals = weekly_totals(
            &BTreeMap::new(),
            &entries,
            &window(),
            &PayCategory::default_included(),
        );
        assert_eq!(totals.timesheet_minutes, 480);
        assert_eq!(totals.timesheet_display(), "08:00:00");
    }

    #[test]
    fn test_timesheet_total_sums_st_ot_dt() {
        let entries = vec![entry(4, 480, "ST"), entry(4, 120, "OT"), entry(5, 60, "DT")];
        assert_eq!(
            timesheet_total_minutes(&entries, &window(), &PayCategory::default_included()),
            660
        );
    }

    #[test]
    fn test_custom_inclusion_set() {
        let entries = vec![entry(4, 480, "ST"), entry(5, 480, "PERH")];
        let included = vec![PayCategory::PerDiemHours];
        assert_eq!(timesheet_total_minutes(&entries, &window(), &included), 480);
    }

    #[test]
    fn test_daily_minutes_keep_excluded_only_dates() {
        let entries = vec![entry(4, 480, "ST"), entry(4, 30, "OT"), entry(5, 480, "PERH")];
        let days = timesheet_daily_minutes(&entries, &PayCategory::default_included());
        assert_eq!(days[&make_date(3, 4)], 510);
        assert_eq!(days[&make_date(3, 5)], 0);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let entries = vec![entry(4, i64::MAX, "ST"), entry(5, 480, "ST")];
        let included = PayCategory::default_included();
        assert_eq!(timesheet_total_minutes(&entries, &window(), &included), i64::MAX);
        assert_eq!(timesheet_daily_minutes(&entries, &included)[&make_date(3, 4)], i64::MAX);
    }

    #[test]
    fn test_totals_display() {
        let totals = WeeklyTotals {
            clock_seconds: 41 * 3600 + 15 * 60 + 9,
            timesheet_minutes: 40 * 60 + 15,
        };
        assert_eq!(totals.clock_display(), "41:15:09");
        assert_eq!(totals.timesheet_display(), "40:15:00");
    }
}
