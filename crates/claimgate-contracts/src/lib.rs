//! # claimgate-contracts
//!
//! Shared types, schemas, and contracts for the ClaimGate coverage evaluator.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate: only data definitions and error types.

pub mod batch;
pub mod codes;
pub mod coverage;
pub mod error;
pub mod record;
pub mod report;
pub mod verify;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use batch::{BatchId, DecisionOutcome, MissingPolicyMode};
    use codes::CodeSet;
    use coverage::{
        CheckOutcome, CoverageChecks, CoverageResult, FinalDecision, GenderRule, ResultRow,
    };
    use error::ClaimGateError;
    use record::PatientRecord;
    use report::{ReportFormat, REPORT_COLUMNS};

    fn all_pass() -> CoverageChecks {
        CoverageChecks {
            procedure_match: CheckOutcome::Pass,
            diagnosis_match: CheckOutcome::Pass,
            age_check: CheckOutcome::Pass,
            gender_check: CheckOutcome::Pass,
            preauth_check: CheckOutcome::Pass,
        }
    }

    fn patient() -> PatientRecord {
        PatientRecord {
            patient_id: "PAT-001".to_string(),
            age: 30,
            gender: "F".to_string(),
            diagnosis_codes: CodeSet::new(["D1", "D2"]),
            procedure_code: "P1".to_string(),
            preauth: true,
            policy_id: "POL1".to_string(),
        }
    }

    // ── CodeSet ──────────────────────────────────────────────────────────────

    #[test]
    fn code_set_membership_is_exact() {
        let codes = CodeSet::new(["E11.9", "I10"]);
        assert!(codes.contains("I10"));
        assert!(!codes.contains("i10"));
        assert!(!codes.contains("E11"));
    }

    #[test]
    fn code_set_intersects_on_any_shared_code() {
        let patient = CodeSet::new(["A", "B"]);
        let covered = CodeSet::new(["B", "C"]);
        assert!(patient.intersects(&covered));
        assert!(!patient.intersects(&CodeSet::new(["X"])));
    }

    #[test]
    fn empty_code_set_never_intersects() {
        let empty = CodeSet::default();
        let covered = CodeSet::new(["A"]);
        assert!(!empty.intersects(&covered));
        assert!(!covered.intersects(&empty));
        assert!(!empty.intersects(&empty));
    }

    #[test]
    fn code_set_keeps_input_order() {
        let codes: CodeSet = ["Z", "A", "M"].into_iter().collect();
        assert_eq!(codes.iter().collect::<Vec<_>>(), vec!["Z", "A", "M"]);
        assert_eq!(serde_json::to_value(&codes).unwrap(), json!(["Z", "A", "M"]));
    }

    // ── GenderRule ───────────────────────────────────────────────────────────

    #[test]
    fn gender_rule_any_is_the_wildcard() {
        let rule: GenderRule = serde_json::from_value(json!("Any")).unwrap();
        assert_eq!(rule, GenderRule::Any);
        assert!(rule.admits("F"));
        assert!(rule.admits("M"));
        assert!(rule.admits(""));
    }

    #[test]
    fn gender_rule_exact_code_is_case_sensitive() {
        let rule: GenderRule = serde_json::from_value(json!("F")).unwrap();
        assert_eq!(rule, GenderRule::Only("F".to_string()));
        assert!(rule.admits("F"));
        assert!(!rule.admits("f"));
        assert!(!rule.admits("M"));
    }

    #[test]
    fn gender_rule_lowercase_any_is_not_the_wildcard() {
        let rule: GenderRule = serde_json::from_value(json!("any")).unwrap();
        assert_eq!(rule, GenderRule::Only("any".to_string()));
        assert!(!rule.admits("F"));
    }

    #[test]
    fn gender_rule_serializes_back_to_string() {
        assert_eq!(serde_json::to_value(GenderRule::Any).unwrap(), json!("Any"));
        assert_eq!(
            serde_json::to_value(GenderRule::Only("M".to_string())).unwrap(),
            json!("M")
        );
    }

    // ── CoverageResult ───────────────────────────────────────────────────────

    #[test]
    fn all_pass_checks_approve() {
        let result = CoverageResult::from_checks(all_pass());
        assert_eq!(result.final_decision(), FinalDecision::Approve);
        assert!(result.is_approved());
    }

    #[test]
    fn any_single_fail_routes_for_review() {
        for position in 0..5 {
            let mut checks = all_pass();
            let slot = match position {
                0 => &mut checks.procedure_match,
                1 => &mut checks.diagnosis_match,
                2 => &mut checks.age_check,
                3 => &mut checks.gender_check,
                _ => &mut checks.preauth_check,
            };
            *slot = CheckOutcome::Fail;

            let result = CoverageResult::from_checks(checks);
            assert_eq!(
                result.final_decision(),
                FinalDecision::RouteForReview,
                "a fail at position {position} must route for review"
            );
        }
    }

    #[test]
    fn final_decision_display_names() {
        assert_eq!(FinalDecision::Approve.to_string(), "Approve");
        assert_eq!(FinalDecision::RouteForReview.to_string(), "Route for Review");
        assert_eq!(
            serde_json::to_value(FinalDecision::RouteForReview).unwrap(),
            json!("Route for Review")
        );
    }

    #[test]
    fn deserializing_a_result_recomputes_the_decision() {
        // The stored decision contradicts the checks; the checks win.
        let raw = json!({
            "procedure_match": "Fail",
            "diagnosis_match": "Pass",
            "age_check": "Pass",
            "gender_check": "Pass",
            "preauth_check": "Pass",
            "Final Decision": "Approve"
        });
        let result: CoverageResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.final_decision(), FinalDecision::RouteForReview);
    }

    // ── ResultRow ────────────────────────────────────────────────────────────

    #[test]
    fn result_row_serializes_flat_in_report_column_order() {
        let row = ResultRow {
            record: patient(),
            coverage: CoverageResult::from_checks(all_pass()),
        };

        let json = serde_json::to_string(&row).unwrap();

        // Every column appears, in the contract order.
        let mut cursor = 0;
        for column in REPORT_COLUMNS {
            let key = format!("\"{column}\":");
            let found = json[cursor..]
                .find(&key)
                .unwrap_or_else(|| panic!("column {column} missing or out of order in {json}"));
            cursor += found + key.len();
        }
        assert!(json.contains("\"Final Decision\":\"Approve\""));
    }

    #[test]
    fn result_row_reads_back_from_its_flat_form() {
        let row = ResultRow {
            record: patient(),
            coverage: CoverageResult::from_checks(all_pass()),
        };
        let value = serde_json::to_value(&row).unwrap();
        let decoded: ResultRow = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, row);
    }

    // ── Batch types ──────────────────────────────────────────────────────────

    #[test]
    fn batch_id_new_produces_unique_values() {
        let ids: std::collections::HashSet<String> =
            (0..100).map(|_| BatchId::new().to_string()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn missing_policy_mode_defaults_to_abort() {
        assert_eq!(MissingPolicyMode::default(), MissingPolicyMode::Abort);
        assert_eq!("skip".parse::<MissingPolicyMode>().unwrap(), MissingPolicyMode::Skip);
        assert_eq!("ABORT".parse::<MissingPolicyMode>().unwrap(), MissingPolicyMode::Abort);
        assert!("continue".parse::<MissingPolicyMode>().is_err());
    }

    #[test]
    fn report_format_parses_case_insensitively() {
        assert_eq!("CSV".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("xlsx".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn decision_outcome_is_tagged() {
        let skipped = DecisionOutcome::Skipped {
            reason: "policy 'GHOST' not found".to_string(),
        };
        let value = serde_json::to_value(&skipped).unwrap();
        assert_eq!(value["kind"], json!("skipped"));
    }

    // ── ClaimGateError display messages ──────────────────────────────────────

    #[test]
    fn error_missing_field_display() {
        let err = ClaimGateError::MissingField {
            context: "patient record #3".to_string(),
            field: "preauth".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing required field 'preauth'"));
        assert!(msg.contains("patient record #3"));
    }

    #[test]
    fn error_policy_not_found_display() {
        let err = ClaimGateError::PolicyNotFound {
            patient_id: "PAT-9".to_string(),
            policy_id: "GHOST".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("GHOST"));
        assert!(msg.contains("PAT-9"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn error_invalid_field_display() {
        let err = ClaimGateError::InvalidField {
            context: "policy 'POL1'".to_string(),
            field: "age_min".to_string(),
            reason: "invalid type: string \"18\", expected i64".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid field 'age_min'"));
        assert!(msg.contains("policy 'POL1'"));
    }

    #[test]
    fn error_duplicate_policy_display() {
        let err = ClaimGateError::DuplicatePolicy {
            policy_id: "POL1".to_string(),
        };
        assert!(err.to_string().contains("duplicate policy id 'POL1'"));
    }

    #[test]
    fn error_config_error_display() {
        let err = ClaimGateError::ConfigError {
            reason: "missing policies path".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("missing policies path"));
    }

    #[test]
    fn error_report_write_failed_display() {
        let err = ClaimGateError::ReportWriteFailed {
            reason: "disk full".to_string(),
        };
        assert!(err.to_string().contains("report write failed: disk full"));
    }
}
