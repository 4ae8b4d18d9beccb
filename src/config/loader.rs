//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a
//! [`ReconcileConfig`] from a YAML file and validating it.

use std::fs;
use std::path::Path;

use crate::error::{ReconcileError, ReconcileResult};

use super::types::ReconcileConfig;

/// Loads and validates reconciliation configuration.
///
/// # Example
///
/// ```no_run
/// use hours_reconciler::config::ConfigLoader;
///
/// let config = ConfigLoader::load("./config/reconcile.yaml")?;
/// println!("Match threshold: {}", config.match_threshold);
/// # Ok::<(), hours_reconciler::error::ReconcileError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns the configuration on success, or an error if:
    /// - The file cannot be read (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A value is out of range (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> ReconcileResult<ReconcileConfig> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ReconcileError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::parse(&content).map_err(|e| match e {
            ReconcileError::ConfigParseError { message, .. } => {
                ReconcileError::ConfigParseError {
                    path: path_str.clone(),
                    message,
                }
            }
            other => other,
        })?;

        tracing::debug!(path = %path_str, "Loaded reconciliation config");
        Ok(config)
    }

    /// Parses and validates configuration from YAML text.
    pub fn parse(content: &str) -> ReconcileResult<ReconcileConfig> {
        let config: ReconcileConfig =
            serde_yaml::from_str(content).map_err(|e| ReconcileError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot drive a run.
    pub fn validate(config: &ReconcileConfig) -> ReconcileResult<()> {
        if config.match_threshold > 100 {
            return Err(invalid("match_threshold", "must be between 0 and 100"));
        }
        if config.break_threshold_minutes < 0 {
            return Err(invalid("break_threshold_minutes", "must not be negative"));
        }
        if config.break_deduction_minutes < 0 {
            return Err(invalid("break_deduction_minutes", "must not be negative"));
        }
        if config.timestamp_formats.is_empty() {
            return Err(invalid("timestamp_formats", "at least one format is required"));
        }

        let tokens = &config.tokens;
        if tokens.section_end.is_empty() || tokens.next_block.is_empty() {
            return Err(invalid("tokens", "block terminators must not be empty"));
        }
        if config.denylist.iter().any(|word| word.is_empty()) {
            return Err(invalid("denylist", "empty entries would drop every token"));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ReconcileError {
    ReconcileError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}
