//! Reconciliation logic for the hours reconciler.
//!
//! This module contains the clock punch normalizer, the timesheet token
//! stream and parser, the fuzzy identity matcher, the weekly aggregator, the
//! report builder and the run orchestration that ties them together.

mod clock_normalizer;
mod engine;
mod identity_matcher;
mod report;
mod similarity;
mod token_parser;
mod token_stream;
mod weekly_aggregator;

pub use clock_normalizer::{net_worked, normalize_clock_events, parse_clock_timestamp, work_day};
pub use engine::reconcile;
pub use identity_matcher::{NameCandidate, ambiguity_warnings, find_name_candidates};
pub use report::{DayLine, EmployeeSection, NO_DATA, ReconciliationReport, SourceSection};
pub use similarity::{ratio, token_set_ratio};
pub use token_parser::{
    BlockScan, MAX_ENTRY_HOURS, TimesheetCollection, collect_timesheet_entries, hours_to_minutes,
    scan_block,
};
pub use token_stream::TokenStream;
pub use weekly_aggregator::{
    WeeklyTotals, clock_total_seconds, timesheet_daily_minutes, timesheet_total_minutes,
    weekly_totals,
};
