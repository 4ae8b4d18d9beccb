//! Command-line front end.
//!
//! Reads the clock export and timesheet token file, runs the reconciliation
//! and writes the report as text or JSON.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{ConfigLoader, ReconcileConfig};
use crate::error::{ReconcileError, ReconcileResult};
use crate::ingest::{read_clock_csv, read_timesheet_tokens, write_token_dump};
use crate::reconciliation::{ReconciliationReport, reconcile};

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Plain text, one section per employee.
    #[default]
    Text,
    /// Pretty-printed JSON including warnings.
    Json,
}

/// Reconciles time-clock punches against a payroll timesheet for one week.
#[derive(Debug, Parser)]
#[command(
    name = "hours-reconciler",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compare weekly time-clock hours with payroll timesheet hours",
    long_about = None
)]
pub struct Cli {
    /// Clock export CSV with `Name` and `Date/Time` columns
    #[arg(long)]
    pub clock: PathBuf,

    /// Timesheet text, one extracted token per line
    #[arg(long)]
    pub timesheet: PathBuf,

    /// YAML configuration; built-in defaults are used when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Also write the filtered timesheet tokens to this path
    #[arg(long = "dump-tokens")]
    pub dump_tokens: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long = "log-json")]
    pub log_json: bool,
}

/// Executes one run as described by `cli`.
pub fn run(cli: &Cli) -> ReconcileResult<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => ReconcileConfig::default(),
    };

    let rows = read_clock_csv(&cli.clock)?;
    let tokens = read_timesheet_tokens(&cli.timesheet, &config)?;
    if let Some(path) = &cli.dump_tokens {
        write_token_dump(&tokens, path)?;
        tracing::info!(path = %path.display(), "Wrote token dump");
    }

    let report = reconcile(&rows, tokens, &config)?;
    let rendered = render(&report, cli.format)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered).map_err(|e| ReconcileError::ReportWrite {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            tracing::info!(path = %path.display(), "Wrote report");
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn render(report: &ReconciliationReport, format: ReportFormat) -> ReconcileResult<String> {
    match format {
        ReportFormat::Text => Ok(report.render_text()),
        ReportFormat::Json => report.to_json().map_err(|e| ReconcileError::ReportWrite {
            path: "<json>".to_string(),
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_required_and_optional_flags() {
        let cli = Cli::try_parse_from([
            "hours-reconciler",
            "--clock",
            "punches.csv",
            "--timesheet",
            "week.txt",
            "--format",
            "json",
            "--log-json",
        ])
        .unwrap();
        assert_eq!(cli.clock, PathBuf::from("punches.csv"));
        assert_eq!(cli.format, ReportFormat::Json);
        assert!(cli.log_json);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_timesheet_flag_is_required() {
        let result = Cli::try_parse_from(["hours-reconciler", "--clock", "punches.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_clock_file_fails_before_reading_timesheet() {
        let cli = Cli::try_parse_from([
            "hours-reconciler",
            "--clock",
            "/nonexistent/punches.csv",
            "--timesheet",
            "/nonexistent/week.txt",
        ])
        .unwrap();
        match run(&cli) {
            Err(ReconcileError::MissingInput { source_name, .. }) => {
                assert_eq!(source_name, "clock export");
            }
            other => panic!("Expected MissingInput, got {:?}", other),
        }
    }
}
