//! The tabular report contract.
//!
//! Column names and order are fixed for downstream compatibility. Note the
//! final column's display name differs in casing and spacing from the check
//! columns.

use serde::{Deserialize, Serialize};

/// Report columns in output order.
pub const REPORT_COLUMNS: [&str; 13] = [
    "patient_id",
    "age",
    "gender",
    "diagnosis_codes",
    "procedure_code",
    "preauth",
    "policy_id",
    "procedure_match",
    "diagnosis_match",
    "age_check",
    "gender_check",
    "preauth_check",
    "Final Decision",
];

/// Separator used when a code list is rendered into a single CSV cell.
///
/// A code that itself contains the separator cannot be told apart from two
/// codes once joined. The advisory `separator-free-codes` rule flags such
/// claims; the JSON report keeps codes as an array and is unaffected.
pub const CODE_SEPARATOR: &str = ";";

/// Output format for the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{other}' (expected csv or json)")),
        }
    }
}
