//! Timesheet text reader.
//!
//! The payroll document arrives as extracted text, one token per line. Lines
//! are filtered through the configured denylist and minimum length on the way
//! in.

use std::fs;
use std::path::Path;

use crate::config::ReconcileConfig;
use crate::error::{ReconcileError, ReconcileResult};
use crate::reconciliation::TokenStream;

/// Reads and filters the timesheet token file at `path`.
pub fn read_timesheet_tokens<P: AsRef<Path>>(
    path: P,
    config: &ReconcileConfig,
) -> ReconcileResult<TokenStream> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    if !path.exists() {
        return Err(ReconcileError::MissingInput {
            source_name: "timesheet tokens".to_string(),
            path: path_str,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ReconcileError::InputRead {
        path: path_str.clone(),
        message: e.to_string(),
    })?;

    let raw_lines = content.lines().count();
    let stream = TokenStream::from_lines(content.lines(), config);
    tracing::info!(
        path = %path_str,
        lines = raw_lines,
        tokens = stream.len(),
        "Read timesheet tokens"
    );
    Ok(stream)
}

/// Writes the filtered tokens one per line, for troubleshooting the parser.
pub fn write_token_dump<P: AsRef<Path>>(stream: &TokenStream, path: P) -> ReconcileResult<()> {
    let path = path.as_ref();
    let mut content = stream.tokens().join("\n");
    content.push('\n');
    fs::write(path, content).map_err(|e| ReconcileError::ReportWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("hours_reconciler_{}_{}", std::process::id(), name));
        path
    }

    #[test]
    fn test_reads_and_filters_lines() {
        let path = temp_path("tokens.txt");
        fs::write(&path, "Doe, Jane\nCraft: Laborer\n-\nMonday\n3/4/2024\n8.00\nST\nOvertime:\n")
            .unwrap();

        let stream = read_timesheet_tokens(&path, &ReconcileConfig::default()).unwrap();
        assert_eq!(
            stream.tokens(),
            &["Doe, Jane", "Monday", "3/4/2024", "8.00", "ST", "Overtime:"]
        );
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_missing_input() {
        let result = read_timesheet_tokens("/nonexistent/week.txt", &ReconcileConfig::default());
        assert!(matches!(
            result,
            Err(ReconcileError::MissingInput { .. })
        ));
    }

    #[test]
    fn test_token_dump_round_trip() {
        let path = temp_path("dump.txt");
        let stream = TokenStream::new(vec!["Jane Doe", "Monday"]);
        write_token_dump(&stream, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Jane Doe\nMonday\n");
        fs::remove_file(&path).ok();
    }
}
