//! Time-clock (source A) records.
//!
//! Raw rows come straight from the clock export; they become [`ClockEvent`]s
//! once their timestamp parses, and per-day [`ClockDay`] values after
//! normalization.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One unparsed row of the clock export.
///
/// Column names follow the clock software's export (`Name`, `Date/Time`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockRow {
    /// Employee display name as printed by the clock.
    #[serde(rename = "Name")]
    pub name: String,
    /// Timestamp text, normally `MM/DD/YYYY HH:MM:SS`.
    #[serde(rename = "Date/Time")]
    pub timestamp: String,
}

impl ClockRow {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// A parsed punch. Punches carry no in/out tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockEvent {
    /// Canonical employee name (after alias substitution).
    pub employee: String,
    /// Wall-clock time of the punch.
    pub timestamp: NaiveDateTime,
}

/// The normalized value of one logical work-day from the clock.
///
/// # Example
///
/// ```
/// use hours_reconciler::models::ClockDay;
/// use chrono::NaiveTime;
///
/// let worked = ClockDay::Worked { seconds: 8 * 3600 + 15 * 60 };
/// assert_eq!(worked.detail(), "08:15:00");
///
/// let punch = ClockDay::SinglePunch { at: NaiveTime::from_hms_opt(6, 58, 12).unwrap() };
/// assert_eq!(punch.detail(), "1 Time @ 06:58:12");
/// assert!(punch.worked().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClockDay {
    /// Two or more punches: net worked time after any break deduction.
    Worked {
        /// Worked time in whole seconds.
        seconds: i64,
    },
    /// Exactly one punch (missed punch). Not summable.
    SinglePunch {
        /// Time of the lone punch.
        at: NaiveTime,
    },
}

impl ClockDay {
    /// Worked duration, or `None` for a single punch.
    pub fn worked(&self) -> Option<Duration> {
        match self {
            ClockDay::Worked { seconds } => Some(Duration::seconds(*seconds)),
            ClockDay::SinglePunch { .. } => None,
        }
    }

    /// Per-day report text.
    pub fn detail(&self) -> String {
        match self {
            ClockDay::Worked { seconds } => format_hms(*seconds),
            ClockDay::SinglePunch { at } => format!("1 Time @ {}", at.format("%H:%M:%S")),
        }
    }
}

/// Formats seconds as zero-padded `HH:MM:SS`; hours are not wrapped at 24.
pub fn format_hms(total_seconds: i64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
