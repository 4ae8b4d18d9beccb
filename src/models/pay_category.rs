//! Pay category codes found in timesheet day entries.

use serde::{Deserialize, Serialize};

/// Classifies a worked-hours entry on the payroll timesheet.
///
/// Codes are validated once, at the token-parse boundary. Anything that is
/// not one of the known codes is kept verbatim in [`PayCategory::Other`] so
/// it can still be shown in per-day detail.
///
/// # Example
///
/// ```
/// use hours_reconciler::models::PayCategory;
///
/// assert_eq!(PayCategory::from_code("ST  "), PayCategory::Straight);
/// assert_eq!(PayCategory::from_code("PERH"), PayCategory::PerDiemHours);
/// assert_eq!(PayCategory::from_code("VAC").code(), "VAC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PayCategory {
    /// Straight time (`ST`).
    Straight,
    /// Overtime (`OT`).
    Overtime,
    /// Double time (`DT`).
    DoubleTime,
    /// Per-diem style hours (`PERH`), reported but not worked time.
    PerDiemHours,
    /// Any other code, kept as printed.
    Other(String),
}

impl PayCategory {
    /// Parses a raw category token. Trailing spaces are ignored.
    pub fn from_code(raw: &str) -> Self {
        match raw.trim_end_matches(' ') {
            "ST" => PayCategory::Straight,
            "OT" => PayCategory::Overtime,
            "DT" => PayCategory::DoubleTime,
            "PERH" => PayCategory::PerDiemHours,
            other => PayCategory::Other(other.to_string()),
        }
    }

    /// Returns the printed code for this category.
    pub fn code(&self) -> &str {
        match self {
            PayCategory::Straight => "ST",
            PayCategory::Overtime => "OT",
            PayCategory::DoubleTime => "DT",
            PayCategory::PerDiemHours => "PERH",
            PayCategory::Other(code) => code,
        }
    }

    /// The categories counted as worked time unless configured otherwise.
    pub fn default_included() -> Vec<PayCategory> {
        vec![
            PayCategory::Straight,
            PayCategory::Overtime,
            PayCategory::DoubleTime,
        ]
    }
}

impl From<String> for PayCategory {
    fn from(value: String) -> Self {
        PayCategory::from_code(&value)
    }
}

impl From<PayCategory> for String {
    fn from(value: PayCategory) -> Self {
        value.code().to_string()
    }
}

impl std::fmt::Display for PayCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
