//! Input validation schema and report types.
//!
//! Raw claim records and policies can be checked against a `RecordSchema`
//! before evaluation. Validation is advisory: a failing
//! `ValidationReport` is surfaced to operators but never changes a decision.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything a raw record is checked against.
///
/// Combines a JSON Schema document with business rules JSON Schema cannot
/// express (for example, membership in a reference code table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Unique identifier for this schema (e.g. "patient-record-v1").
    pub schema_id: String,
    /// A JSON Schema document used for structural validation. `Null` skips it.
    pub json_schema: Value,
    /// Additional rules evaluated after structural validation.
    pub rules: Vec<ValidationRule>,
}

/// A single validation rule applied to a raw record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Unique identifier for this rule, referenced in failure reports.
    pub rule_id: String,
    /// Human-readable description for logs.
    pub description: String,
    pub rule_type: ValidationRuleType,
}

/// The kinds of validation checks supported out of the box.
///
/// `Custom` hooks in logic registered by name at startup, such as the
/// reference code table checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ValidationRuleType {
    /// The field at `field_path` must be present and non-null.
    RequiredField {
        /// Dotted path, e.g. "diagnosis_codes".
        field_path: String,
    },

    /// The field at `field_path` must equal one of `allowed`.
    AllowedValues {
        field_path: String,
        allowed: Vec<Value>,
    },

    /// The string field at `field_path` must not contain `pattern`.
    ForbiddenPattern { field_path: String, pattern: String },

    /// Delegate to a named function registered with the validator.
    Custom { function_name: String },
}

/// The result of running a `RecordSchema` against one raw record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True only if every rule passed.
    pub passed: bool,
    /// All failures collected during this run. Empty on pass.
    pub failures: Vec<ValidationFailure>,
}

/// A single rule failure within a `ValidationReport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// The `rule_id` of the rule that failed, or "json-schema".
    pub rule_id: String,
    pub message: String,
}
