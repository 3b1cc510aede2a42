//! # claimgate-verify
//!
//! Advisory validation of raw claim records and policies.
//!
//! This crate provides [`engine::SchemaValidator`], which implements the
//! [`claimgate_core::traits::RecordValidator`] trait. It checks raw JSON
//! records in two phases:
//!
//! 1. **Structural**: JSON Schema validation via the `jsonschema` crate.
//! 2. **Semantic**: rules (`RequiredField`, `AllowedValues`,
//!    `ForbiddenPattern`, `Custom`) evaluated against the record.
//!
//! Validation never changes a coverage decision. Failures are surfaced to the
//! operator as advisories.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use claimgate_verify::{build_validator, schemas::patient_record_schema, ReferenceCodes};
//!
//! let codes = ReferenceCodes::from_file(Path::new("data/reference_codes.json"))?;
//! let validator = build_validator(Some(codes));
//! let report = validator.validate(&raw_claim, &patient_record_schema(true))?;
//! ```

pub mod engine;
pub mod reference;
pub mod schemas;

pub use engine::SchemaValidator;
pub use reference::ReferenceCodes;

/// A validator with the built-in rules registered, plus the reference-table
/// rules when `reference` is given.
///
/// Pair it with `patient_record_schema(reference.is_some())` so every custom
/// rule the schema names is registered.
pub fn build_validator(reference: Option<ReferenceCodes>) -> SchemaValidator {
    let mut validator = SchemaValidator::new();
    schemas::register_builtin_rules(&mut validator);
    if let Some(codes) = reference {
        reference::register_reference_rules(&mut validator, codes);
    }
    validator
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use claimgate_contracts::error::ClaimGateError;
    use claimgate_core::traits::RecordValidator;

    use crate::{
        build_validator,
        engine::JSON_SCHEMA_RULE_ID,
        reference::{KNOWN_DIAGNOSIS_CODES, KNOWN_PROCEDURE_CODES},
        schemas::{
            patient_record_schema, policy_record_schema, ORDERED_AGE_RANGE, SEPARATOR_FREE_CODES,
        },
        ReferenceCodes,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn codes() -> ReferenceCodes {
        ReferenceCodes::from_json_str(
            r#"{
                "diagnosis_codes": { "D1": "Hypertension", "D2": "Asthma" },
                "procedure_codes": { "P1": "Cardiac stress test" }
            }"#,
        )
        .unwrap()
    }

    fn claim() -> Value {
        json!({
            "patient_id": "PAT-001",
            "age": 30,
            "gender": "F",
            "diagnosis_codes": ["D1"],
            "procedure_code": "P1",
            "preauth": true,
            "policy_id": "POL1"
        })
    }

    fn policy() -> Value {
        json!({
            "policy_id": "POL1",
            "covered_procedure_codes": ["P1"],
            "covered_diagnosis_codes": ["D1", "D2"],
            "age_min": 18,
            "age_max": 65,
            "gender": "Any",
            "requires_preauth": true
        })
    }

    fn rule_ids(report: &claimgate_contracts::verify::ValidationReport) -> Vec<&str> {
        report.failures.iter().map(|f| f.rule_id.as_str()).collect()
    }

    // ── Reference table ───────────────────────────────────────────────────────

    #[test]
    fn test_reference_codes_parse_and_lookup() {
        let codes = codes();
        assert!(codes.is_known_diagnosis("D2"));
        assert!(!codes.is_known_diagnosis("P1"));
        assert!(codes.is_known_procedure("P1"));
        assert!(!codes.is_known_procedure("P9"));
    }

    #[test]
    fn test_reference_codes_sections_default_to_empty() {
        let codes = ReferenceCodes::from_json_str(r#"{ "procedure_codes": {} }"#).unwrap();
        assert!(codes.diagnosis_codes.is_empty());
    }

    #[test]
    fn test_malformed_reference_codes_is_input_error() {
        match ReferenceCodes::from_json_str(r#"["D1"]"#) {
            Err(ClaimGateError::InputError { reason }) => {
                assert!(reason.contains("failed to parse reference codes"), "got: {reason}");
            }
            other => panic!("expected InputError, got {:?}", other),
        }
    }

    // ── Patient record schema ─────────────────────────────────────────────────

    #[test]
    fn test_well_formed_claim_passes() {
        let validator = build_validator(Some(codes()));
        let report = validator.validate(&claim(), &patient_record_schema(true)).unwrap();
        assert!(report.passed, "expected pass, failures: {:?}", report.failures);
    }

    #[test]
    fn test_claim_type_mismatch_is_structural_failure() {
        let mut raw = claim();
        raw["age"] = json!("thirty");

        let validator = build_validator(None);
        let report = validator.validate(&raw, &patient_record_schema(false)).unwrap();

        assert!(!report.passed);
        assert_eq!(rule_ids(&report), vec![JSON_SCHEMA_RULE_ID]);
    }

    #[test]
    fn test_claim_missing_field_is_structural_failure() {
        let mut raw = claim();
        raw.as_object_mut().unwrap().remove("preauth");

        let report = build_validator(None)
            .validate(&raw, &patient_record_schema(false))
            .unwrap();
        assert!(!report.passed);
        assert!(report.failures[0].message.contains("preauth"));
    }

    #[test]
    fn test_empty_diagnoses_flagged() {
        let mut raw = claim();
        raw["diagnosis_codes"] = json!([]);

        let report = build_validator(None)
            .validate(&raw, &patient_record_schema(false))
            .unwrap();
        assert_eq!(rule_ids(&report), vec!["claimed-diagnoses-present"]);
    }

    #[test]
    fn test_code_containing_separator_flagged() {
        let mut raw = claim();
        raw["diagnosis_codes"] = json!(["D1", "D2;D3"]);

        let report = build_validator(None)
            .validate(&raw, &patient_record_schema(false))
            .unwrap();
        assert_eq!(rule_ids(&report), vec![SEPARATOR_FREE_CODES]);
        assert!(report.failures[0].message.contains("D2;D3"), "got: {}", report.failures[0].message);
        assert!(!report.failures[0].message.contains("\"D1\""));
    }

    #[test]
    fn test_unknown_codes_flagged_by_reference_rules() {
        let mut raw = claim();
        raw["diagnosis_codes"] = json!(["D1", "Z99", "Z98"]);
        raw["procedure_code"] = json!("P404");

        let validator = build_validator(Some(codes()));
        let report = validator.validate(&raw, &patient_record_schema(true)).unwrap();

        assert_eq!(rule_ids(&report), vec![KNOWN_DIAGNOSIS_CODES, KNOWN_PROCEDURE_CODES]);
        assert!(report.failures[0].message.contains("Z99, Z98"));
        assert!(report.failures[1].message.contains("P404"));
    }

    #[test]
    fn test_reference_rules_absent_without_table() {
        let mut raw = claim();
        raw["procedure_code"] = json!("P404");

        let report = build_validator(None)
            .validate(&raw, &patient_record_schema(false))
            .unwrap();
        assert!(report.passed);
    }

    #[test]
    fn test_reference_schema_without_table_reports_unregistered_rules() {
        let report = build_validator(None)
            .validate(&claim(), &patient_record_schema(true))
            .unwrap();
        assert_eq!(rule_ids(&report), vec![KNOWN_DIAGNOSIS_CODES, KNOWN_PROCEDURE_CODES]);
        assert!(report.failures[0].message.contains("no custom rule registered"));
    }

    // ── Policy schema ─────────────────────────────────────────────────────────

    #[test]
    fn test_well_formed_policy_passes() {
        let validator = build_validator(Some(codes()));
        let report = validator.validate(&policy(), &policy_record_schema(true)).unwrap();
        assert!(report.passed, "expected pass, failures: {:?}", report.failures);
    }

    #[test]
    fn test_inverted_age_range_flagged() {
        let mut raw = policy();
        raw["age_min"] = json!(70);

        let report = build_validator(None)
            .validate(&raw, &policy_record_schema(false))
            .unwrap();
        assert_eq!(rule_ids(&report), vec![ORDERED_AGE_RANGE]);
        assert!(report.failures[0].message.contains("age_min 70 exceeds age_max 65"));
    }

    #[test]
    fn test_unknown_covered_codes_flagged() {
        let mut raw = policy();
        raw["covered_procedure_codes"] = json!(["P1", "P77"]);

        let report = build_validator(Some(codes()))
            .validate(&raw, &policy_record_schema(true))
            .unwrap();
        assert!(!report.passed);
        assert!(report.failures[0].message.contains("P77"));
    }
}
