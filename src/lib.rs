//! Weekly hours reconciliation between a time clock and a payroll timesheet.
//!
//! This crate compares, per employee and per day, the hours recorded by a
//! badge/biometric clock against the hours reported on a payroll timesheet
//! for the same week, and lays both out side by side for review.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod reconciliation;
