//! Recovers `(date, hours, category)` entries from an employee's timesheet block.
//!
//! A block starts at a name candidate and runs to the first section-end or
//! next-block token. Inside it, a day entry is recognized positionally:
//!
//! ```text
//! ... Monday | 3/4/2024 | 8.25 | ST ...
//!     label    date       hours  category
//! ```
//!
//! The date must be one of the window's seven labels and the live token before
//! it must be a full weekday name; a date anywhere else (page headers, pay
//! period ranges) is ignored. Once parsed, the block's positions are consumed
//! so no later employee can re-read them.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, warn};

use crate::config::{ParsePolicy, ReconcileConfig};
use crate::error::{ReconcileError, ReconcileResult};
use crate::models::{PayCategory, ReconcileWarning, TimesheetEntry, WeekWindow, parse_weekday_label};

use super::identity_matcher::NameCandidate;
use super::token_stream::TokenStream;

/// The result of scanning one candidate block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockScan {
    /// Recognized entries in document order.
    pub entries: Vec<TimesheetEntry>,
    /// Last position belonging to the block (the terminator when present).
    pub end: usize,
    /// Whether the scan stopped at a terminator rather than the stream end.
    pub terminated: bool,
    /// Date positions whose hours or category token was missing.
    pub truncated: Vec<usize>,
    /// Hours tokens that were not decimal numbers.
    pub bad_hours: Vec<String>,
}

/// Entries and findings collected for one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimesheetCollection {
    /// All entries from the scanned blocks.
    pub entries: Vec<TimesheetEntry>,
    /// Non-fatal findings.
    pub warnings: Vec<ReconcileWarning>,
}

/// Largest hours value accepted for a single day entry (one full week).
pub const MAX_ENTRY_HOURS: i64 = 24 * 7;

/// Converts printed fractional hours to whole minutes, truncating partial minutes.
///
/// Negative values and values above [`MAX_ENTRY_HOURS`] are rejected like
/// non-numeric text.
///
/// # Example
///
/// ```
/// use hours_reconciler::reconciliation::hours_to_minutes;
///
/// assert_eq!(hours_to_minutes("8.25"), Some(495));
/// assert_eq!(hours_to_minutes("7.99"), Some(479));
/// assert_eq!(hours_to_minutes("eight"), None);
/// assert_eq!(hours_to_minutes("-1.00"), None);
/// ```
pub fn hours_to_minutes(token: &str) -> Option<i64> {
    let hours = Decimal::from_str(token.trim()).ok()?;
    if hours < Decimal::ZERO || hours > Decimal::from(MAX_ENTRY_HOURS) {
        return None;
    }
    hours.checked_mul(Decimal::from(60))?.trunc().to_i64()
}

/// Scans forward from `start` without modifying the stream.
///
/// Returns `None` when the candidate is already consumed or is immediately
/// followed by the role-heading marker.
pub fn scan_block(
    stream: &TokenStream,
    start: usize,
    window: &WeekWindow,
    config: &ReconcileConfig,
) -> Option<BlockScan> {
    if stream.is_consumed(start) {
        return None;
    }
    let next = stream.next_live(start);
    if next.and_then(|i| stream.token(i)) == Some(config.tokens.role_heading.as_str()) {
        return None;
    }

    let mut scan = BlockScan {
        end: start,
        ..BlockScan::default()
    };

    for index in stream.live_from(start) {
        let Some(token) = stream.token(index) else {
            break;
        };
        scan.end = index;

        if let Some(date) = window.date_for_label(token) {
            let after_label = stream
                .prev_live(index)
                .and_then(|i| stream.token(i))
                .and_then(parse_weekday_label)
                .is_some();
            if after_label {
                read_day_entry(stream, index, date, &mut scan);
            }
        }

        if config.tokens.is_terminator(token) {
            scan.terminated = true;
            break;
        }
    }

    Some(scan)
}

fn read_day_entry(
    stream: &TokenStream,
    date_index: usize,
    date: chrono::NaiveDate,
    scan: &mut BlockScan,
) {
    let hours_index = stream.next_live(date_index);
    let category_index = hours_index.and_then(|i| stream.next_live(i));
    let (Some(hours_token), Some(category_token)) = (
        hours_index.and_then(|i| stream.token(i)),
        category_index.and_then(|i| stream.token(i)),
    ) else {
        scan.truncated.push(date_index);
        return;
    };

    match hours_to_minutes(hours_token) {
        Some(minutes) => scan.entries.push(TimesheetEntry {
            date,
            minutes,
            category: PayCategory::from_code(category_token),
        }),
        None => scan.bad_hours.push(hours_token.to_string()),
    }
}

/// Parses the employee's blocks and consumes them from the stream.
///
/// Candidates are tried in order. Each scanned block is consumed through its
/// last position. The first block that ends at a terminator finishes the
/// employee; a block that runs off the end of the stream is kept with an
/// `UnterminatedBlock` warning.
///
/// Under [`ParsePolicy::Strict`] a bad hours token fails the employee after
/// its block has been consumed, so the text cannot leak into anyone else.
pub fn collect_timesheet_entries(
    stream: &mut TokenStream,
    employee: &str,
    candidates: &[NameCandidate],
    window: &WeekWindow,
    config: &ReconcileConfig,
) -> ReconcileResult<TimesheetCollection> {
    let mut collection = TimesheetCollection::default();
    let mut first_bad_hours: Option<String> = None;

    for candidate in candidates {
        let Some(scan) = scan_block(stream, candidate.index, window, config) else {
            continue;
        };

        stream.consume(candidate.index..=scan.end);
        debug!(
            employee = %employee,
            start = candidate.index,
            end = scan.end,
            entries = scan.entries.len(),
            "Consumed timesheet block"
        );

        collection.entries.extend(scan.entries);
        for token_index in scan.truncated {
            collection.warnings.push(ReconcileWarning::TruncatedDayEntry {
                employee: employee.to_string(),
                token_index,
            });
        }
        for value in scan.bad_hours {
            if first_bad_hours.is_none() {
                first_bad_hours = Some(value.clone());
            }
            collection.warnings.push(ReconcileWarning::SkippedRecord {
                employee: employee.to_string(),
                reason: format!("unparseable hours value '{}'", value),
            });
        }

        if scan.terminated {
            break;
        }
        warn!(employee = %employee, start = candidate.index, "Timesheet block has no terminator");
        collection.warnings.push(ReconcileWarning::UnterminatedBlock {
            employee: employee.to_string(),
            start_index: candidate.index,
        });
    }

    if config.parse_policy == ParsePolicy::Strict {
        if let Some(value) = first_bad_hours {
            return Err(ReconcileError::UnparseableHours {
                employee: employee.to_string(),
                value,
            });
        }
    }

    Ok(collection)
}
