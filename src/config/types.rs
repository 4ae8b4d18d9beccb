//! Configuration types for a reconciliation run.
//!
//! Every policy constant the engine applies lives here and is passed
//! explicitly into each component. All fields default to the values the
//! payroll office has been running with, so a YAML file only needs to name
//! what it overrides.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::PayCategory;

/// How record-level parse failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsePolicy {
    /// Skip the bad record, record a warning and carry on.
    #[default]
    Lenient,
    /// Fail the affected employee; other employees still complete.
    Strict,
}

/// Literal tokens that structure the timesheet document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockTokens {
    /// Ends an employee's day-entry section.
    pub section_end: String,
    /// Starts the next weekly block.
    pub next_block: String,
    /// Follows a name that is a role heading rather than a person's row.
    pub role_heading: String,
}

impl Default for BlockTokens {
    fn default() -> Self {
        Self {
            section_end: "Overtime:".to_string(),
            next_block: "WEEK OF".to_string(),
            role_heading: "SUPERVISOR".to_string(),
        }
    }
}

impl BlockTokens {
    /// Returns true if `token` ends a block scan.
    pub fn is_terminator(&self, token: &str) -> bool {
        token == self.section_end || token == self.next_block
    }
}

/// Tunable policy for one reconciliation run.
///
/// # Example
///
/// ```
/// use hours_reconciler::config::ReconcileConfig;
///
/// let config = ReconcileConfig::default();
/// assert_eq!(config.match_threshold, 82);
/// assert_eq!(config.break_threshold_minutes, 405);
/// assert_eq!(config.canonical_name("Ben Zapadenko"), "Benjamin Zapadenko");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Punches before this time of day belong to the previous work-day.
    pub overnight_cutoff: NaiveTime,
    /// Shifts strictly longer than this (in minutes) get a break deducted.
    pub break_threshold_minutes: i64,
    /// Break deducted from long shifts, in minutes.
    pub break_deduction_minutes: i64,
    /// Minimum token-set similarity (0-100) for a name match; inclusive.
    pub match_threshold: u8,
    /// Pay categories counted toward timesheet totals.
    pub included_categories: Vec<PayCategory>,
    /// Timesheet lines containing any of these substrings are dropped.
    pub denylist: Vec<String>,
    /// Timesheet lines shorter than this many characters are dropped.
    pub min_token_len: usize,
    /// Alternate clock spellings mapped to the name used on the timesheet.
    pub aliases: BTreeMap<String, String>,
    /// Structural timesheet tokens.
    pub tokens: BlockTokens,
    /// `chrono` formats tried, in order, for clock timestamps.
    pub timestamp_formats: Vec<String>,
    /// Record-level parse failure handling.
    pub parse_policy: ParsePolicy,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        let aliases = [
            ("Ben Zapadenko", "Benjamin Zapadenko"),
            ("Mathew Jacobs", "Matthew Scott Jacobs"),
            ("Ben Kilgore", "Benjamin Kilgore"),
            ("Mattew VanConant", "Matthew VanConant"),
        ]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

        Self {
            overnight_cutoff: NaiveTime::from_hms_opt(3, 30, 0).unwrap_or(NaiveTime::MIN),
            break_threshold_minutes: 6 * 60 + 45,
            break_deduction_minutes: 30,
            match_threshold: 82,
            included_categories: PayCategory::default_included(),
            denylist: ["No", "Craft", "Perdiem", "QCT"]
                .into_iter()
                .map(String::from)
                .collect(),
            min_token_len: 2,
            aliases,
            tokens: BlockTokens::default(),
            timestamp_formats: vec![
                "%m/%d/%Y %H:%M:%S".to_string(),
                "%m/%d/%Y %H:%M".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
            ],
            parse_policy: ParsePolicy::default(),
        }
    }
}

impl ReconcileConfig {
    /// Applies the alias table to a clock name.
    pub fn canonical_name(&self, raw: &str) -> String {
        self.aliases
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_office_policy() {
        let config = ReconcileConfig::default();
        assert_eq!(
            config.overnight_cutoff,
            NaiveTime::from_hms_opt(3, 30, 0).unwrap()
        );
        assert_eq!(config.break_threshold_minutes, 405);
        assert_eq!(config.break_deduction_minutes, 30);
        assert_eq!(config.match_threshold, 82);
        assert_eq!(config.min_token_len, 2);
        assert_eq!(config.denylist.len(), 4);
        assert_eq!(config.parse_policy, ParsePolicy::Lenient);
    }

    #[test]
    fn test_canonical_name_uses_alias_table() {
        let config = ReconcileConfig::default();
        assert_eq!(config.canonical_name("Mathew Jacobs"), "Matthew Scott Jacobs");
        assert_eq!(config.canonical_name("Jane Doe"), "Jane Doe");
    }

    #[test]
    fn test_terminators() {
        let tokens = BlockTokens::default();
        assert!(tokens.is_terminator("Overtime:"));
        assert!(tokens.is_terminator("WEEK OF"));
        assert!(!tokens.is_terminator("SUPERVISOR"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "match_threshold: 90\nparse_policy: strict\n";
        let config: ReconcileConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.match_threshold, 90);
        assert_eq!(config.parse_policy, ParsePolicy::Strict);
        assert_eq!(config.break_deduction_minutes, 30);
        assert_eq!(config.tokens.section_end, "Overtime:");
    }

    #[test]
    fn test_yaml_categories_and_cutoff() {
        let yaml = "overnight_cutoff: \"04:00:00\"\nincluded_categories: [ST, PERH]\n";
        let config: ReconcileConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.overnight_cutoff,
            NaiveTime::from_hms_opt(4, 0, 0).unwrap()
        );
        assert_eq!(
            config.included_categories,
            vec![PayCategory::Straight, PayCategory::PerDiemHours]
        );
    }
}
