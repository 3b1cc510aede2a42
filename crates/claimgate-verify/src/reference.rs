//! Reference code table and the custom rules built on it.
//!
//! The table is an auxiliary lookup of known diagnosis and procedure codes.
//! The coverage evaluator never consults it; it only feeds advisory
//! validation:
//!
//! ```json
//! {
//!   "diagnosis_codes": { "D1": "Type 2 diabetes" },
//!   "procedure_codes": { "P1": "HbA1c panel" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use claimgate_contracts::error::{ClaimGateError, ClaimGateResult};

use crate::engine::SchemaValidator;

/// Custom rule: every claimed diagnosis code is in the table.
pub const KNOWN_DIAGNOSIS_CODES: &str = "known-diagnosis-codes";
/// Custom rule: the claimed procedure code is in the table.
pub const KNOWN_PROCEDURE_CODES: &str = "known-procedure-codes";
/// Custom rule: every diagnosis code a policy covers is in the table.
pub const KNOWN_COVERED_DIAGNOSIS_CODES: &str = "known-covered-diagnosis-codes";
/// Custom rule: every procedure code a policy covers is in the table.
pub const KNOWN_COVERED_PROCEDURE_CODES: &str = "known-covered-procedure-codes";

/// Known codes with their descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceCodes {
    pub diagnosis_codes: BTreeMap<String, String>,
    pub procedure_codes: BTreeMap<String, String>,
}

impl ReferenceCodes {
    /// Parse `s` as a reference code table.
    ///
    /// Returns `InputError` if `s` is not a JSON object of the expected shape.
    pub fn from_json_str(s: &str) -> ClaimGateResult<Self> {
        serde_json::from_str(s).map_err(|e| ClaimGateError::InputError {
            reason: format!("failed to parse reference codes: {e}"),
        })
    }

    /// Read and parse the reference code table at `path`.
    pub fn from_file(path: &Path) -> ClaimGateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ClaimGateError::InputError {
            reason: format!("failed to read reference codes file '{}': {}", path.display(), e),
        })?;
        let codes = Self::from_json_str(&contents)?;
        debug!(
            path = %path.display(),
            diagnosis_codes = codes.diagnosis_codes.len(),
            procedure_codes = codes.procedure_codes.len(),
            "reference codes loaded"
        );
        Ok(codes)
    }

    pub fn is_known_diagnosis(&self, code: &str) -> bool {
        self.diagnosis_codes.contains_key(code)
    }

    pub fn is_known_procedure(&self, code: &str) -> bool {
        self.procedure_codes.contains_key(code)
    }
}

/// Register the four reference-table rules on `validator`.
///
/// Each rule only inspects string values; a missing or mistyped field is
/// left to the structural phase.
pub fn register_reference_rules(validator: &mut SchemaValidator, codes: ReferenceCodes) {
    let codes = Arc::new(codes);

    let table = Arc::clone(&codes);
    validator.register_rule(
        KNOWN_DIAGNOSIS_CODES,
        Box::new(move |raw| {
            unknown_codes(raw, "diagnosis_codes", |c| table.is_known_diagnosis(c), "diagnosis")
        }),
    );

    let table = Arc::clone(&codes);
    validator.register_rule(
        KNOWN_PROCEDURE_CODES,
        Box::new(move |raw| {
            unknown_codes(raw, "procedure_code", |c| table.is_known_procedure(c), "procedure")
        }),
    );

    let table = Arc::clone(&codes);
    validator.register_rule(
        KNOWN_COVERED_DIAGNOSIS_CODES,
        Box::new(move |raw| {
            unknown_codes(
                raw,
                "covered_diagnosis_codes",
                |c| table.is_known_diagnosis(c),
                "diagnosis",
            )
        }),
    );

    let table = codes;
    validator.register_rule(
        KNOWN_COVERED_PROCEDURE_CODES,
        Box::new(move |raw| {
            unknown_codes(
                raw,
                "covered_procedure_codes",
                |c| table.is_known_procedure(c),
                "procedure",
            )
        }),
    );
}

/// Collect the codes at `field` (a string or an array of strings) that
/// `known` rejects, and describe them as one failure message.
fn unknown_codes(
    raw: &Value,
    field: &str,
    known: impl Fn(&str) -> bool,
    kind: &str,
) -> Option<String> {
    let codes: Vec<&str> = match raw.get(field) {
        Some(Value::String(code)) => vec![code.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => return None,
    };

    let unknown: Vec<&str> = codes.into_iter().filter(|&c| !known(c)).collect();
    if unknown.is_empty() {
        None
    } else {
        Some(format!(
            "field '{field}' has {kind} codes not in the reference table: {}",
            unknown.join(", ")
        ))
    }
}
