//! Core data models for the hours reconciler.
//!
//! This module contains the domain models shared by the normalizer, the
//! token parser, the aggregator and the report.

mod clock;
mod employee;
mod pay_category;
mod timesheet;
mod warning;
mod week_window;

pub use clock::{ClockDay, ClockEvent, ClockRow, format_hms};
pub use employee::{DailyDuration, EmployeeRecord, Source};
pub use pay_category::PayCategory;
pub use timesheet::{TimesheetEntry, format_hm, format_hm_total};
pub use warning::ReconcileWarning;
pub use week_window::{
    WINDOW_DAYS, WeekWindow, format_unpadded, parse_weekday_label, weekday_abbr,
};
