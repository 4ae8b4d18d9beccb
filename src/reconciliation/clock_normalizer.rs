//! Clock punch normalization.
//!
//! Turns raw punches into one [`ClockDay`] per logical work-day. Punches carry
//! no in/out tag, so a day is described purely by how many punches it has and
//! by its earliest and latest punch.
//!
//! Two policies apply:
//! - **Overnight cutoff**: a punch earlier in the day than the cutoff belongs
//!   to the previous date, so a shift crossing midnight stays one work-day.
//! - **Break deduction**: a span strictly longer than the break threshold is
//!   paid net of the break allowance.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::ReconcileConfig;
use crate::models::ClockDay;

/// Returns the logical work-day a punch belongs to.
///
/// The cutoff itself is not moved: with a 03:30 cutoff, 03:29:59 belongs to
/// the previous date and 03:30:00 stays on its own date.
///
/// # Example
///
/// ```
/// use hours_reconciler::reconciliation::work_day;
/// use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
///
/// let cutoff = NaiveTime::from_hms_opt(3, 30, 0).unwrap();
/// let late = NaiveDateTime::parse_from_str("03/05/2024 03:00:00", "%m/%d/%Y %H:%M:%S").unwrap();
/// assert_eq!(work_day(late, cutoff), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
/// ```
pub fn work_day(timestamp: NaiveDateTime, cutoff: NaiveTime) -> NaiveDate {
    let date = timestamp.date();
    if timestamp.time() < cutoff {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}

/// Parses a clock timestamp with the first matching format.
pub fn parse_clock_timestamp(raw: &str, formats: &[String]) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Applies the break rule to a raw punch span.
pub fn net_worked(span: Duration, config: &ReconcileConfig) -> Duration {
    if span > Duration::minutes(config.break_threshold_minutes) {
        span - Duration::minutes(config.break_deduction_minutes)
    } else {
        span
    }
}

/// Normalizes one employee's punches into per-work-day values.
///
/// - One punch on a work-day yields [`ClockDay::SinglePunch`] with its time.
/// - Two or more yield [`ClockDay::Worked`] holding `max - min`, net of the
///   break rule.
///
/// Days with no punches are simply absent from the map.
///
/// # Example
///
/// ```
/// use hours_reconciler::config::ReconcileConfig;
/// use hours_reconciler::models::ClockDay;
/// use hours_reconciler::reconciliation::normalize_clock_events;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let parse = |s| NaiveDateTime::parse_from_str(s, "%m/%d/%Y %H:%M:%S").unwrap();
/// let days = normalize_clock_events(
///     &[parse("03/04/2024 07:00:00"), parse("03/04/2024 15:45:00")],
///     &ReconcileConfig::default(),
/// );
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// // 8h45m exceeds 6h45m, so the 30 minute break comes off.
/// assert_eq!(days[&monday], ClockDay::Worked { seconds: 8 * 3600 + 15 * 60 });
/// ```
pub fn normalize_clock_events(
    timestamps: &[NaiveDateTime],
    config: &ReconcileConfig,
) -> BTreeMap<NaiveDate, ClockDay> {
    let mut by_day: BTreeMap<NaiveDate, Vec<NaiveDateTime>> = BTreeMap::new();
    for timestamp in timestamps {
        by_day
            .entry(work_day(*timestamp, config.overnight_cutoff))
            .or_default()
            .push(*timestamp);
    }

    by_day
        .into_iter()
        .filter_map(|(date, punches)| {
            let first = *punches.iter().min()?;
            let last = *punches.iter().max()?;
            let day = if punches.len() == 1 {
                ClockDay::SinglePunch { at: first.time() }
            } else {
                ClockDay::Worked {
                    seconds: net_worked(last - first, config).num_seconds(),
                }
            };
            Some((date, day))
        })
        .collect()
}
