//! Bundled record schemas for claim records and policies.

use serde_json::{json, Value};

use claimgate_contracts::{
    report::CODE_SEPARATOR,
    verify::{RecordSchema, ValidationRule, ValidationRuleType},
};

use crate::{
    engine::SchemaValidator,
    reference::{
        KNOWN_COVERED_DIAGNOSIS_CODES, KNOWN_COVERED_PROCEDURE_CODES, KNOWN_DIAGNOSIS_CODES,
        KNOWN_PROCEDURE_CODES,
    },
};

pub const PATIENT_RECORD_SCHEMA_ID: &str = "patient-record-v1";
pub const POLICY_RECORD_SCHEMA_ID: &str = "insurance-policy-v1";

/// Custom rule: a policy's `age_min` does not exceed its `age_max`.
pub const ORDERED_AGE_RANGE: &str = "ordered-age-range";

/// Custom rule: no claimed diagnosis code contains `CODE_SEPARATOR`, which
/// would make the CSV report's code cell ambiguous.
pub const SEPARATOR_FREE_CODES: &str = "separator-free-codes";

/// Schema for a raw claim record.
///
/// The JSON Schema requires the seven record fields with their JSON types.
/// With `with_reference`, the reference-table rules are attached too; the
/// validator must then have them registered via
/// [`register_reference_rules`](crate::reference::register_reference_rules).
pub fn patient_record_schema(with_reference: bool) -> RecordSchema {
    let json_schema = json!({
        "type": "object",
        "properties": {
            "patient_id": { "type": "string", "minLength": 1 },
            "age": { "type": "integer" },
            "gender": { "type": "string" },
            "diagnosis_codes": { "type": "array", "items": { "type": "string" } },
            "procedure_code": { "type": "string" },
            "preauth": { "type": "boolean" },
            "policy_id": { "type": "string", "minLength": 1 }
        },
        "required": [
            "patient_id", "age", "gender", "diagnosis_codes",
            "procedure_code", "preauth", "policy_id"
        ]
    });

    let mut rules = vec![
        ValidationRule {
            rule_id: "claimed-diagnoses-present".to_string(),
            description: "a claim with no diagnoses can never match a policy".to_string(),
            rule_type: ValidationRuleType::Custom {
                function_name: NON_EMPTY_DIAGNOSES.to_string(),
            },
        },
        custom_rule(SEPARATOR_FREE_CODES, "diagnosis codes survive the CSV code cell"),
    ];

    if with_reference {
        rules.push(custom_rule(KNOWN_DIAGNOSIS_CODES, "claimed diagnosis codes are known"));
        rules.push(custom_rule(KNOWN_PROCEDURE_CODES, "claimed procedure code is known"));
    }

    RecordSchema {
        schema_id: PATIENT_RECORD_SCHEMA_ID.to_string(),
        json_schema,
        rules,
    }
}

/// Schema for a raw insurance policy.
pub fn policy_record_schema(with_reference: bool) -> RecordSchema {
    let code_list = json!({ "type": "array", "items": { "type": "string" } });
    let json_schema = json!({
        "type": "object",
        "properties": {
            "policy_id": { "type": "string", "minLength": 1 },
            "covered_procedure_codes": code_list.clone(),
            "covered_diagnosis_codes": code_list,
            "age_min": { "type": "integer" },
            "age_max": { "type": "integer" },
            "gender": { "type": "string" },
            "requires_preauth": { "type": "boolean" }
        },
        "required": [
            "policy_id", "covered_procedure_codes", "covered_diagnosis_codes",
            "age_min", "age_max", "gender", "requires_preauth"
        ]
    });

    let mut rules = vec![custom_rule(ORDERED_AGE_RANGE, "age_min does not exceed age_max")];

    if with_reference {
        rules.push(custom_rule(
            KNOWN_COVERED_DIAGNOSIS_CODES,
            "covered diagnosis codes are known",
        ));
        rules.push(custom_rule(
            KNOWN_COVERED_PROCEDURE_CODES,
            "covered procedure codes are known",
        ));
    }

    RecordSchema {
        schema_id: POLICY_RECORD_SCHEMA_ID.to_string(),
        json_schema,
        rules,
    }
}

const NON_EMPTY_DIAGNOSES: &str = "non-empty-diagnoses";

/// Register the custom rules the bundled schemas reference regardless of
/// whether a reference table is loaded.
pub fn register_builtin_rules(validator: &mut SchemaValidator) {
    validator.register_rule(
        NON_EMPTY_DIAGNOSES,
        Box::new(|raw| match raw.get("diagnosis_codes").and_then(Value::as_array) {
            Some(codes) if codes.is_empty() => {
                Some("field 'diagnosis_codes' is empty".to_string())
            }
            _ => None,
        }),
    );

    validator.register_rule(
        SEPARATOR_FREE_CODES,
        Box::new(|raw| {
            let codes = raw.get("diagnosis_codes").and_then(Value::as_array)?;
            let clashing: Vec<&str> = codes
                .iter()
                .filter_map(Value::as_str)
                .filter(|code| code.contains(CODE_SEPARATOR))
                .collect();
            (!clashing.is_empty()).then(|| {
                format!(
                    "diagnosis codes {clashing:?} contain '{CODE_SEPARATOR}' and will be split in the CSV report"
                )
            })
        }),
    );

    validator.register_rule(
        ORDERED_AGE_RANGE,
        Box::new(|raw| {
            let min = raw.get("age_min").and_then(Value::as_i64)?;
            let max = raw.get("age_max").and_then(Value::as_i64)?;
            (min > max).then(|| format!("age_min {min} exceeds age_max {max}; no age can pass"))
        }),
    );
}

fn custom_rule(function_name: &str, description: &str) -> ValidationRule {
    ValidationRule {
        rule_id: function_name.to_string(),
        description: description.to_string(),
        rule_type: ValidationRuleType::Custom {
            function_name: function_name.to_string(),
        },
    }
}
