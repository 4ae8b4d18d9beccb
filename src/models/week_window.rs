//! The seven-day reporting window and the calendar labels used on the timesheet.
//!
//! The payroll document prints dates without zero padding (`3/4/2024`) and
//! precedes each day entry with a full weekday name (`Monday`). Both forms are
//! produced and recognized here so the token parser never compares raw
//! substrings itself.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Number of days in a reporting window.
pub const WINDOW_DAYS: usize = 7;

/// Seven consecutive calendar dates anchored at the earliest clock date.
///
/// # Example
///
/// ```
/// use hours_reconciler::models::WeekWindow;
/// use chrono::NaiveDate;
///
/// let window = WeekWindow::starting(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
/// assert_eq!(window.label(window.start()), "3/4/2024");
/// assert!(window.contains(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
/// assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    start: NaiveDate,
}

impl WeekWindow {
    /// Creates a window starting on `start`.
    pub fn starting(start: NaiveDate) -> Self {
        Self { start }
    }

    /// Creates a window anchored at the minimum of `dates`, or `None` when empty.
    pub fn anchored_at_min<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates.into_iter().min().map(Self::starting)
    }

    /// The first date of the window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The last date of the window (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(WINDOW_DAYS as i64 - 1)
    }

    /// All seven dates in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..WINDOW_DAYS as i64)
            .map(|offset| self.start + Duration::days(offset))
            .collect()
    }

    /// Checks whether `date` falls inside the window (inclusive on both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// Formats `date` the way the payroll document prints it (`M/D/YYYY`).
    pub fn label(&self, date: NaiveDate) -> String {
        format_unpadded(date)
    }

    /// Resolves a literal timesheet date token to a window date.
    ///
    /// Only the exact unpadded form of one of the seven window dates matches;
    /// zero-padded or out-of-window dates return `None`.
    pub fn date_for_label(&self, token: &str) -> Option<NaiveDate> {
        self.dates()
            .into_iter()
            .find(|date| format_unpadded(*date) == token)
    }
}

/// Formats a date as `M/D/YYYY` without zero padding.
pub fn format_unpadded(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Abbreviated weekday name (`Mon`, `Tue`, ...) used on report day lines.
pub fn weekday_abbr(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Parses a full English weekday label as printed on the timesheet.
///
/// Matching is exact: `"Monday"` is a label, `"Mon"` and `"monday"` are not.
pub fn parse_weekday_label(token: &str) -> Option<Weekday> {
    match token {
        "Monday" => Some(Weekday::Mon),
        "Tuesday" => Some(Weekday::Tue),
        "Wednesday" => Some(Weekday::Wed),
        "Thursday" => Some(Weekday::Thu),
        "Friday" => Some(Weekday::Fri),
        "Saturday" => Some(Weekday::Sat),
        "Sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_has_seven_contiguous_dates() {
        let window = WeekWindow::starting(make_date(2024, 2, 26));
        let dates = window.dates();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], make_date(2024, 2, 26));
        assert_eq!(dates[4], make_date(2024, 3, 1));
        assert_eq!(dates[6], make_date(2024, 3, 3));
    }

    #[test]
    fn test_anchored_at_min_picks_earliest_date() {
        let window = WeekWindow::anchored_at_min(vec![
            make_date(2024, 3, 6),
            make_date(2024, 3, 4),
            make_date(2024, 3, 9),
        ])
        .unwrap();
        assert_eq!(window.start(), make_date(2024, 3, 4));
    }

    #[test]
    fn test_anchored_at_min_empty_is_none() {
        assert!(WeekWindow::anchored_at_min(Vec::new()).is_none());
    }

    #[test]
    fn test_label_is_unpadded() {
        let window = WeekWindow::starting(make_date(2024, 3, 4));
        assert_eq!(window.label(make_date(2024, 3, 4)), "3/4/2024");
        assert_eq!(window.label(make_date(2024, 11, 10)), "11/10/2024");
    }

    #[test]
    fn test_date_for_label_requires_exact_form() {
        let window = WeekWindow::starting(make_date(2024, 3, 4));
        assert_eq!(
            window.date_for_label("3/5/2024"),
            Some(make_date(2024, 3, 5))
        );
        assert_eq!(window.date_for_label("03/05/2024"), None);
        assert_eq!(window.date_for_label("3/11/2024"), None);
        assert_eq!(window.date_for_label("3/1/2024"), None);
    }

    #[test]
    fn test_weekday_abbr() {
        assert_eq!(weekday_abbr(make_date(2024, 3, 4)), "Mon");
        assert_eq!(weekday_abbr(make_date(2024, 3, 10)), "Sun");
    }

    #[test]
    fn test_parse_weekday_label_full_names_only() {
        assert_eq!(parse_weekday_label("Monday"), Some(Weekday::Mon));
        assert_eq!(parse_weekday_label("Sunday"), Some(Weekday::Sun));
        assert_eq!(parse_weekday_label("Mon"), None);
        assert_eq!(parse_weekday_label("monday"), None);
        assert_eq!(parse_weekday_label("Overtime:"), None);
    }

    proptest! {
        #[test]
        fn prop_window_is_contiguous_from_min(offsets in proptest::collection::vec(0i64..400, 1..20)) {
            let base = make_date(2023, 1, 1);
            let dates: Vec<NaiveDate> = offsets.iter().map(|o| base + Duration::days(*o)).collect();
            let min = *dates.iter().min().unwrap();
            let window = WeekWindow::anchored_at_min(dates).unwrap();

            prop_assert_eq!(window.start(), min);
            let days = window.dates();
            prop_assert_eq!(days.len(), WINDOW_DAYS);
            for pair in days.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
        }
    }
}
