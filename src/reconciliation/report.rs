//! The reconciliation report.
//!
//! One section per employee: the seven window days for each source (with a
//! `---` placeholder where a source has nothing for that day) and each
//! source's weekly total. No differencing is done; the two columns are laid
//! out for a person to compare.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ReconcileConfig;
use crate::models::{
    DailyDuration, EmployeeRecord, ReconcileWarning, Source, WeekWindow, weekday_abbr,
};

use super::weekly_aggregator::{WeeklyTotals, weekly_totals};

/// Placeholder printed for a day with no data.
pub const NO_DATA: &str = "---";

/// Width of the rule printed before each employee's name.
const SECTION_RULE: &str = "_________________________";

/// One report line for one date and source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLine {
    /// The calendar date.
    pub date: NaiveDate,
    /// Abbreviated weekday (`Mon`).
    pub weekday: String,
    /// Unpadded `M/D/YYYY` label.
    pub label: String,
    /// The source's value for the day, if any.
    pub detail: Option<String>,
}

impl DayLine {
    /// Renders `<weekday> <M/D/YYYY>\t<detail or --->`.
    pub fn render(&self) -> String {
        format!(
            "{} {}\t{}",
            self.weekday,
            self.label,
            self.detail.as_deref().unwrap_or(NO_DATA)
        )
    }
}

/// One source's seven days and total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSection {
    /// Which source this is.
    pub source: Source,
    /// Formatted weekly total.
    pub total: String,
    /// Exactly seven lines in date order.
    pub days: Vec<DayLine>,
}

/// The report block for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSection {
    /// Canonical employee name.
    pub name: String,
    /// Raw totals behind the formatted ones.
    pub totals: WeeklyTotals,
    /// Clock days and total.
    pub clock: SourceSection,
    /// Timesheet days and total.
    pub timesheet: SourceSection,
    /// Why this employee could not be reconciled, if it failed.
    pub failure: Option<String>,
}

/// The complete output of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// The week every section is scoped to.
    pub window: WeekWindow,
    /// Employees in clock order.
    pub employees: Vec<EmployeeSection>,
    /// Every non-fatal finding raised during the run.
    pub warnings: Vec<ReconcileWarning>,
}

impl ReconciliationReport {
    /// Joins each record's daily values against the window.
    pub fn build(
        records: &[EmployeeRecord],
        window: WeekWindow,
        config: &ReconcileConfig,
        warnings: Vec<ReconcileWarning>,
    ) -> Self {
        let employees = records
            .iter()
            .map(|record| build_section(record, &window, config))
            .collect();

        Self {
            window,
            employees,
            warnings,
        }
    }

    /// Looks up an employee's section by canonical name.
    pub fn employee(&self, name: &str) -> Option<&EmployeeSection> {
        self.employees.iter().find(|section| section.name == name)
    }

    /// Renders the plain-text report.
    ///
    /// Layout per employee:
    ///
    /// ```text
    ///
    /// _________________________Jane Doe
    ///
    /// CrossChex Hours: 08:15:00
    /// Mon 3/4/2024	08:15:00
    /// Tue 3/5/2024	---
    /// ...
    ///
    /// TimeKeeper Hours: 08:00:00
    /// Mon 3/4/2024	08:00
    /// ...
    /// ```
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for section in &self.employees {
            out.push_str(&format!("\n{}{}\n", SECTION_RULE, section.name));

            if let Some(failure) = &section.failure {
                out.push_str(&format!("\nFAILED: {}\n", failure));
                continue;
            }

            for source in [&section.clock, &section.timesheet] {
                out.push_str(&format!("\n{} Hours: {}\n", source.source.label(), source.total));
                for day in &source.days {
                    out.push_str(&day.render());
                    out.push('\n');
                }
            }
        }
        out
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for ReconciliationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_text())
    }
}

fn build_section(
    record: &EmployeeRecord,
    window: &WeekWindow,
    config: &ReconcileConfig,
) -> EmployeeSection {
    let durations = record.daily_durations(&config.included_categories);
    let totals = weekly_totals(
        &record.clock_days,
        &record.timesheet_entries,
        window,
        &config.included_categories,
    );

    EmployeeSection {
        name: record.name.clone(),
        totals,
        clock: SourceSection {
            source: Source::Clock,
            total: totals.clock_display(),
            days: day_lines(&durations, Source::Clock, window),
        },
        timesheet: SourceSection {
            source: Source::Timesheet,
            total: totals.timesheet_display(),
            days: day_lines(&durations, Source::Timesheet, window),
        },
        failure: record.failure.clone(),
    }
}

fn day_lines(durations: &[DailyDuration], source: Source, window: &WeekWindow) -> Vec<DayLine> {
    window
        .dates()
        .into_iter()
        .map(|date| DayLine {
            date,
            weekday: weekday_abbr(date),
            label: window.label(date),
            detail: durations
                .iter()
                .find(|d| d.source == source && d.date == date)
                .map(|d| d.detail.clone()),
        })
        .collect()
}
