//! Record and policy summarizers.
//!
//! Raw claims and policies arrive as loosely-typed JSON. The summarizers are
//! the parsing boundary: they pull out exactly the fields the evaluator
//! reads and turn them into typed values, or fail with a structured
//! `MissingField` / `InvalidField` error. Values are copied verbatim, no
//! range checks, no normalization.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use claimgate_contracts::{
    coverage::CoverageRules,
    error::{ClaimGateError, ClaimGateResult},
    record::PatientRecord,
};

/// Fields a raw claim must carry, in the order they are checked.
pub const PATIENT_RECORD_FIELDS: [&str; 7] = [
    "patient_id",
    "age",
    "gender",
    "diagnosis_codes",
    "procedure_code",
    "preauth",
    "policy_id",
];

/// Fields a raw policy must carry, in the order they are checked.
pub const POLICY_RULE_FIELDS: [&str; 6] = [
    "covered_procedure_codes",
    "covered_diagnosis_codes",
    "age_min",
    "age_max",
    "gender",
    "requires_preauth",
];

/// Extract a `PatientRecord` from a raw claim object.
///
/// # Errors
///
/// - `MissingField` naming the first absent field of `PATIENT_RECORD_FIELDS`.
/// - `InvalidField` if `raw` is not an object or a field has the wrong JSON
///   type (e.g. `"age": "thirty"`).
pub fn summarize_patient_record(raw: &Value) -> ClaimGateResult<PatientRecord> {
    let context = match raw.get("patient_id").and_then(Value::as_str) {
        Some(id) => format!("patient record '{id}'"),
        None => "patient record".to_string(),
    };
    let obj = require_fields(raw, &context, &PATIENT_RECORD_FIELDS)?;

    Ok(PatientRecord {
        patient_id: field(obj, "patient_id", &context)?,
        age: field(obj, "age", &context)?,
        gender: field(obj, "gender", &context)?,
        diagnosis_codes: field(obj, "diagnosis_codes", &context)?,
        procedure_code: field(obj, "procedure_code", &context)?,
        preauth: field(obj, "preauth", &context)?,
        policy_id: field(obj, "policy_id", &context)?,
    })
}

/// Extract the `CoverageRules` from a raw policy object.
///
/// The policy id itself is not part of the summary; it only names the
/// policy in error messages.
///
/// # Errors
///
/// Same as [`summarize_patient_record`], over `POLICY_RULE_FIELDS`.
pub fn summarize_policy_guideline(raw: &Value) -> ClaimGateResult<CoverageRules> {
    let context = match raw.get("policy_id").and_then(Value::as_str) {
        Some(id) => format!("policy '{id}'"),
        None => "policy".to_string(),
    };
    let obj = require_fields(raw, &context, &POLICY_RULE_FIELDS)?;

    Ok(CoverageRules {
        covered_procedure_codes: field(obj, "covered_procedure_codes", &context)?,
        covered_diagnosis_codes: field(obj, "covered_diagnosis_codes", &context)?,
        age_min: field(obj, "age_min", &context)?,
        age_max: field(obj, "age_max", &context)?,
        gender: field(obj, "gender", &context)?,
        requires_preauth: field(obj, "requires_preauth", &context)?,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Check `raw` is an object carrying every name in `fields`.
///
/// Presence is checked for all fields before any type is, so an absent field
/// is always reported as `MissingField`.
fn require_fields<'v>(
    raw: &'v Value,
    context: &str,
    fields: &[&str],
) -> ClaimGateResult<&'v Map<String, Value>> {
    let obj = raw.as_object().ok_or_else(|| ClaimGateError::InvalidField {
        context: context.to_string(),
        field: "<record>".to_string(),
        reason: format!("expected a JSON object, found {}", json_kind(raw)),
    })?;

    if let Some(missing) = fields.iter().find(|name| !obj.contains_key(**name)) {
        return Err(ClaimGateError::MissingField {
            context: context.to_string(),
            field: (*missing).to_string(),
        });
    }

    Ok(obj)
}

fn field<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    name: &str,
    context: &str,
) -> ClaimGateResult<T> {
    let value = obj.get(name).ok_or_else(|| ClaimGateError::MissingField {
        context: context.to_string(),
        field: name.to_string(),
    })?;

    T::deserialize(value).map_err(|e| ClaimGateError::InvalidField {
        context: context.to_string(),
        field: name.to_string(),
        reason: e.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
