//! One reconciliation run, end to end.
//!
//! Clock rows are grouped per canonical employee name (first-seen order),
//! normalized into work-days, and anchored into a week window. Each employee
//! is then located in the timesheet stream and their block parsed and
//! consumed, in roster order. A failure for one employee is recorded on that
//! employee and the run continues.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::config::{ParsePolicy, ReconcileConfig};
use crate::error::{ReconcileError, ReconcileResult};
use crate::models::{ClockEvent, ClockRow, EmployeeRecord, ReconcileWarning, WeekWindow};

use super::clock_normalizer::{normalize_clock_events, parse_clock_timestamp};
use super::identity_matcher::{ambiguity_warnings, find_name_candidates};
use super::report::ReconciliationReport;
use super::token_parser::collect_timesheet_entries;
use super::token_stream::TokenStream;

/// Punches grouped by canonical employee name.
#[derive(Debug, Default)]
struct ClockRoster {
    names: Vec<String>,
    punches: HashMap<String, Vec<NaiveDateTime>>,
    failures: HashMap<String, String>,
}

impl ClockRoster {
    fn admit(&mut self, name: &str) {
        if !self.punches.contains_key(name) {
            self.names.push(name.to_string());
            self.punches.insert(name.to_string(), Vec::new());
        }
    }

    fn record(&mut self, event: ClockEvent) {
        self.admit(&event.employee);
        if let Some(punches) = self.punches.get_mut(&event.employee) {
            punches.push(event.timestamp);
        }
    }
}

/// Runs the full reconciliation.
///
/// # Errors
///
/// Returns [`ReconcileError::EmptyInput`] when there are no clock rows or
/// none of them has a parseable timestamp (the week window cannot be
/// anchored). Record-level problems never fail the run; see
/// [`ParsePolicy`].
///
/// # Example
///
/// ```
/// use hours_reconciler::config::ReconcileConfig;
/// use hours_reconciler::models::ClockRow;
/// use hours_reconciler::reconciliation::{TokenStream, reconcile};
///
/// let rows = vec![
///     ClockRow::new("Jane Doe", "03/04/2024 07:00:00"),
///     ClockRow::new("Jane Doe", "03/04/2024 15:45:00"),
/// ];
/// let tokens = TokenStream::new(vec![
///     "Doe, Jane", "Monday", "3/4/2024", "8.00", "ST", "Overtime:",
/// ]);
///
/// let report = reconcile(&rows, tokens, &ReconcileConfig::default()).unwrap();
/// let jane = report.employee("Jane Doe").unwrap();
/// assert_eq!(jane.clock.total, "08:15:00");
/// assert_eq!(jane.timesheet.total, "08:00:00");
/// ```
pub fn reconcile(
    rows: &[ClockRow],
    mut tokens: TokenStream,
    config: &ReconcileConfig,
) -> ReconcileResult<ReconciliationReport> {
    if rows.is_empty() {
        return Err(ReconcileError::EmptyInput {
            source_name: "clock export".to_string(),
        });
    }

    let mut warnings = Vec::new();
    let roster = group_clock_rows(rows, config, &mut warnings);

    let window = WeekWindow::anchored_at_min(
        roster
            .punches
            .values()
            .flat_map(|punches| punches.iter().map(|p| p.date())),
    )
    .ok_or_else(|| ReconcileError::EmptyInput {
        source_name: "clock export (no parseable timestamps)".to_string(),
    })?;

    info!(
        employees = roster.names.len(),
        rows = rows.len(),
        tokens = tokens.len(),
        week_start = %window.start(),
        "Starting reconciliation"
    );

    let mut records = Vec::with_capacity(roster.names.len());
    for name in &roster.names {
        let mut record = EmployeeRecord::new(name.clone());
        record.failure = roster.failures.get(name).cloned();

        if let Some(punches) = roster.punches.get(name) {
            record.clock_days = normalize_clock_events(punches, config);
        }

        let candidates = find_name_candidates(&tokens, name, config);
        if candidates.is_empty() {
            raise(
                &mut warnings,
                ReconcileWarning::NoTimesheetBlock {
                    employee: name.clone(),
                },
            );
        }
        for warning in ambiguity_warnings(&tokens, name, &candidates, &roster.names, config) {
            raise(&mut warnings, warning);
        }

        match collect_timesheet_entries(&mut tokens, name, &candidates, &window, config) {
            Ok(collection) => {
                record.timesheet_entries = collection.entries;
                for warning in collection.warnings {
                    raise(&mut warnings, warning);
                }
            }
            Err(e) => {
                warn!(employee = %name, error = %e, "Employee failed");
                record.failure.get_or_insert_with(|| e.to_string());
            }
        }

        debug!(
            employee = %name,
            clock_days = record.clock_days.len(),
            timesheet_entries = record.timesheet_entries.len(),
            remaining_tokens = tokens.live_len(),
            "Employee reconciled"
        );
        records.push(record);
    }

    info!(
        employees = records.len(),
        failed = records.iter().filter(|r| r.failure.is_some()).count(),
        warnings = warnings.len(),
        "Reconciliation complete"
    );

    Ok(ReconciliationReport::build(&records, window, config, warnings))
}

fn group_clock_rows(
    rows: &[ClockRow],
    config: &ReconcileConfig,
    warnings: &mut Vec<ReconcileWarning>,
) -> ClockRoster {
    let mut roster = ClockRoster::default();

    for row in rows {
        let name = config.canonical_name(row.name.trim());
        roster.admit(&name);

        match parse_clock_timestamp(&row.timestamp, &config.timestamp_formats) {
            Some(timestamp) => roster.record(ClockEvent {
                employee: name,
                timestamp,
            }),
            None => {
                let error = ReconcileError::UnparseableTimestamp {
                    employee: name.clone(),
                    value: row.timestamp.clone(),
                };
                match config.parse_policy {
                    ParsePolicy::Lenient => raise(
                        warnings,
                        ReconcileWarning::SkippedRecord {
                            employee: name.clone(),
                            reason: error.to_string(),
                        },
                    ),
                    ParsePolicy::Strict => {
                        warn!(employee = %name, error = %error, "Employee failed");
                        roster.failures.entry(name).or_insert_with(|| error.to_string());
                    }
                }
            }
        }
    }

    roster
}

fn raise(warnings: &mut Vec<ReconcileWarning>, warning: ReconcileWarning) {
    warn!(code = warning.code(), employee = %warning.employee(), "{}", warning);
    warnings.push(warning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rows(data: &[(&str, &str)]) -> Vec<ClockRow> {
        data.iter().map(|(n, t)| ClockRow::new(*n, *t)).collect()
    }

    fn block(name: &str, days: &[(&str, &str, &str, &str)]) -> Vec<String> {
        let mut tokens = vec![name.to_string()];
        for (weekday, date, hours, category) in days {
            tokens.extend([weekday, date, hours, category].map(|s| s.to_string()));
        }
        tokens.push("Overtime:".to_string());
        tokens
    }

    #[test]
    fn test_empty_rows_is_fatal() {
        let result = reconcile(&[], TokenStream::new(Vec::<String>::new()), &ReconcileConfig::default());
        assert!(matches!(result, Err(ReconcileError::EmptyInput { .. })));
    }

    #[test]
    fn test_all_timestamps_unparseable_is_fatal() {
        let result = reconcile(
            &rows(&[("Jane Doe", "garbage")]),
            TokenStream::new(Vec::<String>::new()),
            &ReconcileConfig::default(),
        );
        assert!(matches!(result, Err(ReconcileError::EmptyInput { .. })));
    }

    #[test]
    fn test_window_starts_at_earliest_raw_clock_date() {
        let report = reconcile(
            &rows(&[
                ("Jane Doe", "03/06/2024 07:00:00"),
                ("John Smith", "03/05/2024 02:00:00"),
            ]),
            TokenStream::new(Vec::<String>::new()),
            &ReconcileConfig::default(),
        )
        .unwrap();
        // The 02:00 punch counts toward 3/4, but the window anchors on the raw date.
        assert_eq!(report.window.start(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_alias_applied_before_matching() {
        let tokens = block(
            "ZAPADENKO, BENJAMIN",
            &[("Monday", "3/4/2024", "8.00", "ST")],
        );
        let report = reconcile(
            &rows(&[
                ("Ben Zapadenko", "03/04/2024 07:00:00"),
                ("Ben Zapadenko", "03/04/2024 15:00:00"),
            ]),
            TokenStream::new(tokens),
            &ReconcileConfig::default(),
        )
        .unwrap();

        assert_eq!(report.employees.len(), 1);
        let section = report.employee("Benjamin Zapadenko").unwrap();
        assert_eq!(section.timesheet.total, "08:00:00");
    }

    #[test]
    fn test_employees_keep_first_seen_order() {
        let report = reconcile(
            &rows(&[
                ("Zed Young", "03/04/2024 07:00:00"),
                ("Amy Adams", "03/04/2024 07:00:00"),
                ("Zed Young", "03/04/2024 15:00:00"),
            ]),
            TokenStream::new(Vec::<String>::new()),
            &ReconcileConfig::default(),
        )
        .unwrap();
        let names: Vec<&str> = report.employees.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Zed Young", "Amy Adams"]);
    }

    #[test]
    fn test_unmatched_employee_warns() {
        let report = reconcile(
            &rows(&[("Jane Doe", "03/04/2024 07:00:00")]),
            TokenStream::new(vec!["Somebody Else", "Monday"]),
            &ReconcileConfig::default(),
        )
        .unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].code(), "no_timesheet_block");
    }

    #[test]
    fn test_lenient_bad_timestamp_skips_record() {
        let report = reconcile(
            &rows(&[
                ("Jane Doe", "03/04/2024 07:00:00"),
                ("Jane Doe", "not a time"),
                ("Jane Doe", "03/04/2024 11:00:00"),
            ]),
            TokenStream::new(Vec::<String>::new()),
            &ReconcileConfig::default(),
        )
        .unwrap();
        let section = report.employee("Jane Doe").unwrap();
        assert!(section.failure.is_none());
        assert_eq!(section.clock.total, "04:00:00");
        assert!(report.warnings.iter().any(|w| w.code() == "skipped_record"));
    }

    #[test]
    fn test_strict_bad_timestamp_fails_only_that_employee() {
        let config = ReconcileConfig {
            parse_policy: ParsePolicy::Strict,
            ..ReconcileConfig::default()
        };
        let report = reconcile(
            &rows(&[
                ("Jane Doe", "03/04/2024 07:00:00"),
                ("Jane Doe", "not a time"),
                ("John Smith", "03/04/2024 07:00:00"),
                ("John Smith", "03/04/2024 11:00:00"),
            ]),
            TokenStream::new(Vec::<String>::new()),
            &config,
        )
        .unwrap();

        let jane = report.employee("Jane Doe").unwrap();
        assert!(jane.failure.as_deref().unwrap().contains("not a time"));
        let john = report.employee("John Smith").unwrap();
        assert!(john.failure.is_none());
        assert_eq!(john.clock.total, "04:00:00");
    }

    #[test]
    fn test_consumed_block_cannot_leak_into_next_employee() {
        // Jane's block contains a roster line that fuzzy-matches John.
        let mut tokens = block(
            "Jane Doe",
            &[("Monday", "3/4/2024", "8.00", "ST")],
        );
        tokens.insert(1, "Crew: John Smith".to_string());
        tokens.extend(block(
            "John Smith",
            &[("Tuesday", "3/5/2024", "6.50", "ST")],
        ));

        let report = reconcile(
            &rows(&[
                ("Jane Doe", "03/04/2024 07:00:00"),
                ("John Smith", "03/05/2024 07:00:00"),
            ]),
            TokenStream::new(tokens),
            &ReconcileConfig::default(),
        )
        .unwrap();

        let jane = report.employee("Jane Doe").unwrap();
        assert_eq!(jane.timesheet.total, "08:00:00");
        let john = report.employee("John Smith").unwrap();
        assert_eq!(john.timesheet.total, "06:30:00");
        assert_eq!(john.timesheet.days[0].detail, None);
    }
}
