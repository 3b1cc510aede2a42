//! The ClaimGate batch runner.
//!
//! Per claim, in input order:
//!
//!   Summarize record → Resolve policy → Summarize policy → [Validate] → Evaluate
//!
//! The runner holds no state between claims. Every settled claim also yields
//! a `DecisionRecord`, collected into `BatchOutcome::decisions`.
//! A `MissingField` / `InvalidField` from either summarizer always aborts
//! the batch. An unresolved policy id aborts it too, unless the runner was
//! built with `MissingPolicyMode::Skip`.

use serde_json::Value;
use tracing::{debug, info, warn};

use claimgate_contracts::{
    batch::{
        Advisory, BatchId, BatchOutcome, DecisionOutcome, DecisionRecord, MissingPolicyMode,
        SkippedClaim,
    },
    coverage::ResultRow,
    error::{ClaimGateError, ClaimGateResult},
    verify::RecordSchema,
};

use crate::{
    evaluator::check_claim_coverage,
    summarize::{summarize_patient_record, summarize_policy_guideline},
    traits::{PolicyLookup, RecordValidator},
};

/// How the runner settled a single claim.
#[derive(Debug, Clone)]
pub enum ClaimOutcome {
    /// The claim was evaluated.
    Decided {
        row: ResultRow,
        /// Present only when a validator is attached and reported failures.
        advisory: Option<Advisory>,
    },
    /// The claim's policy was unknown and the runner is in skip mode.
    Skipped(SkippedClaim),
}

impl ClaimOutcome {
    /// The decision-trail entry for this claim at position `index`.
    pub fn decision_record(&self, index: usize) -> DecisionRecord {
        match self {
            ClaimOutcome::Decided { row, .. } => DecisionRecord {
                index,
                patient_id: row.record.patient_id.clone(),
                policy_id: row.record.policy_id.clone(),
                outcome: DecisionOutcome::Decided {
                    coverage: row.coverage,
                },
            },
            ClaimOutcome::Skipped(claim) => DecisionRecord {
                index,
                patient_id: claim.patient_id.clone(),
                policy_id: claim.policy_id.clone(),
                outcome: DecisionOutcome::Skipped {
                    reason: claim.reason.clone(),
                },
            },
        }
    }
}

/// Drives one batch of claims through evaluation.
///
/// The runner owns its collaborators, handed in explicitly at startup. It
/// never loads data itself.
pub struct BatchRunner {
    policies: Box<dyn PolicyLookup>,
    validation: Option<(Box<dyn RecordValidator>, RecordSchema)>,
    on_missing_policy: MissingPolicyMode,
}

impl BatchRunner {
    /// Create a runner that aborts on unknown policies and does not validate.
    pub fn new(policies: Box<dyn PolicyLookup>) -> Self {
        Self {
            policies,
            validation: None,
            on_missing_policy: MissingPolicyMode::default(),
        }
    }

    pub fn with_missing_policy_mode(mut self, mode: MissingPolicyMode) -> Self {
        self.on_missing_policy = mode;
        self
    }

    /// Attach an advisory validator. Each raw record is checked against
    /// `schema`; failures become `Advisory` entries and never change a
    /// decision.
    pub fn with_validator(mut self, validator: Box<dyn RecordValidator>, schema: RecordSchema) -> Self {
        self.validation = Some((validator, schema));
        self
    }

    /// Run every record in `records` and collect the outcome.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: `MissingField` / `InvalidField` from a
    /// summarizer, `PolicyNotFound` in abort mode, or a validator failure.
    /// On error no outcome is produced.
    pub fn run(&self, records: &[Value]) -> ClaimGateResult<BatchOutcome> {
        let batch_id = BatchId::new();

        info!(
            batch_id = %batch_id,
            claims = records.len(),
            on_missing_policy = ?self.on_missing_policy,
            "batch starting"
        );

        let mut rows = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();
        let mut advisories = Vec::new();
        let mut decisions = Vec::with_capacity(records.len());

        for (index, raw) in records.iter().enumerate() {
            let claim = self.evaluate_claim(&batch_id, index, raw)?;
            decisions.push(claim.decision_record(index));
            match claim {
                ClaimOutcome::Decided { row, advisory } => {
                    rows.push(row);
                    advisories.extend(advisory);
                }
                ClaimOutcome::Skipped(claim) => skipped.push(claim),
            }
        }

        let outcome = BatchOutcome {
            batch_id,
            rows,
            skipped,
            advisories,
            decisions,
        };

        info!(
            batch_id = %outcome.batch_id,
            evaluated = outcome.rows.len(),
            approved = outcome.approved_count(),
            routed = outcome.routed_count(),
            skipped = outcome.skipped.len(),
            advisories = outcome.advisories.len(),
            "batch complete"
        );

        Ok(outcome)
    }

    /// Settle a single claim at position `index` of batch `batch_id`.
    ///
    /// `batch_id` only tags log lines; the result depends on `raw` and the
    /// runner's collaborators alone.
    pub fn evaluate_claim(
        &self,
        batch_id: &BatchId,
        index: usize,
        raw: &Value,
    ) -> ClaimGateResult<ClaimOutcome> {
        // ── Step 1: Summarize the claim ──────────────────────────────────────
        let record = summarize_patient_record(raw)?;

        debug!(
            batch_id = %batch_id,
            index,
            patient_id = %record.patient_id,
            policy_id = %record.policy_id,
            "claim summarized"
        );

        // ── Step 2: Resolve the policy ───────────────────────────────────────
        let Some(raw_policy) = self.policies.lookup(&record.policy_id) else {
            return self.unresolved(batch_id, index, record.patient_id, record.policy_id);
        };

        // ── Step 3: Summarize the policy ─────────────────────────────────────
        let rules = summarize_policy_guideline(raw_policy)?;

        // ── Step 4: Advisory validation ──────────────────────────────────────
        let advisory = match &self.validation {
            Some((validator, schema)) => {
                let report = validator.validate(raw, schema)?;
                if report.passed {
                    None
                } else {
                    for failure in &report.failures {
                        warn!(
                            batch_id = %batch_id,
                            index,
                            patient_id = %record.patient_id,
                            rule_id = %failure.rule_id,
                            message = %failure.message,
                            "advisory validation failure"
                        );
                    }
                    Some(Advisory {
                        index,
                        patient_id: record.patient_id.clone(),
                        failures: report.failures,
                    })
                }
            }
            None => None,
        };

        // ── Step 5: Evaluate ─────────────────────────────────────────────────
        let coverage = check_claim_coverage(&record, &rules);

        debug!(
            batch_id = %batch_id,
            index,
            patient_id = %record.patient_id,
            decision = %coverage.final_decision(),
            "claim evaluated"
        );

        Ok(ClaimOutcome::Decided {
            row: ResultRow { record, coverage },
            advisory,
        })
    }

    fn unresolved(
        &self,
        batch_id: &BatchId,
        index: usize,
        patient_id: String,
        policy_id: String,
    ) -> ClaimGateResult<ClaimOutcome> {
        match self.on_missing_policy {
            MissingPolicyMode::Abort => {
                warn!(
                    batch_id = %batch_id,
                    index,
                    patient_id = %patient_id,
                    policy_id = %policy_id,
                    "policy not found; aborting batch"
                );
                Err(ClaimGateError::PolicyNotFound {
                    patient_id,
                    policy_id,
                })
            }
            MissingPolicyMode::Skip => {
                let reason = format!("policy '{policy_id}' not found");
                warn!(
                    batch_id = %batch_id,
                    index,
                    patient_id = %patient_id,
                    policy_id = %policy_id,
                    "policy not found; skipping claim"
                );

                Ok(ClaimOutcome::Skipped(SkippedClaim {
                    index,
                    patient_id,
                    policy_id,
                    reason,
                }))
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::{json, Value};

    use claimgate_contracts::{
        batch::{BatchId, DecisionOutcome, MissingPolicyMode},
        coverage::FinalDecision,
        error::{ClaimGateError, ClaimGateResult},
        verify::{RecordSchema, ValidationFailure, ValidationReport},
    };

    use crate::traits::{PolicyLookup, RecordValidator};

    use super::{BatchRunner, ClaimOutcome};

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// A policy lookup over a plain map.
    struct MapPolicies(HashMap<String, Value>);

    impl PolicyLookup for MapPolicies {
        fn lookup(&self, policy_id: &str) -> Option<&Value> {
            self.0.get(policy_id)
        }
    }

    fn policies() -> Box<MapPolicies> {
        let mut map = HashMap::new();
        map.insert(
            "POL1".to_string(),
            json!({
                "policy_id": "POL1",
                "covered_procedure_codes": ["P1"],
                "covered_diagnosis_codes": ["D1"],
                "age_min": 18,
                "age_max": 65,
                "gender": "Any",
                "requires_preauth": true
            }),
        );
        map.insert(
            "POL2".to_string(),
            json!({
                "policy_id": "POL2",
                "covered_procedure_codes": ["P2"],
                "covered_diagnosis_codes": ["D2"],
                "age_min": 0,
                "age_max": 120,
                "gender": "M",
                "requires_preauth": false
            }),
        );
        // Referenced by no healthy claim: missing every rule field.
        map.insert("BROKEN".to_string(), json!({ "policy_id": "BROKEN" }));
        Box::new(MapPolicies(map))
    }

    fn claim(patient_id: &str, policy_id: &str) -> Value {
        json!({
            "patient_id": patient_id,
            "age": 30,
            "gender": "F",
            "diagnosis_codes": ["D1"],
            "procedure_code": "P1",
            "preauth": true,
            "policy_id": policy_id
        })
    }

    /// A validator that flags claims whose patient id starts with "BAD".
    struct MockValidator;

    impl RecordValidator for MockValidator {
        fn validate(&self, raw: &Value, _schema: &RecordSchema) -> ClaimGateResult<ValidationReport> {
            let bad = raw["patient_id"].as_str().unwrap_or("").starts_with("BAD");
            Ok(ValidationReport {
                passed: !bad,
                failures: if bad {
                    vec![ValidationFailure {
                        rule_id: "mock-rule".to_string(),
                        message: "flagged by mock".to_string(),
                    }]
                } else {
                    vec![]
                },
            })
        }
    }

    fn schema() -> RecordSchema {
        RecordSchema {
            schema_id: "test-schema-v1".to_string(),
            json_schema: Value::Null,
            rules: vec![],
        }
    }

    // ── Tests ────────────────────────────────────────────────────────────────

    #[test]
    fn test_rows_follow_input_order() {
        let runner = BatchRunner::new(policies());

        let records = vec![
            claim("PAT-C", "POL1"),
            claim("PAT-A", "POL2"),
            claim("PAT-B", "POL1"),
        ];
        let outcome = runner.run(&records).unwrap();

        let ids: Vec<&str> = outcome.rows.iter().map(|r| r.record.patient_id.as_str()).collect();
        assert_eq!(ids, vec!["PAT-C", "PAT-A", "PAT-B"]);
        assert_eq!(outcome.approved_count(), 2);
        assert_eq!(outcome.routed_count(), 1);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_one_decision_per_claim_in_input_order() {
        let runner = BatchRunner::new(policies());

        let outcome = runner
            .run(&[claim("PAT-1", "POL1"), claim("PAT-2", "POL2")])
            .unwrap();

        assert_eq!(outcome.decisions.len(), 2);
        assert_eq!(outcome.decisions[0].index, 0);
        assert_eq!(outcome.decisions[1].index, 1);
        assert_eq!(outcome.decisions[1].patient_id, "PAT-2");
        match &outcome.decisions[0].outcome {
            DecisionOutcome::Decided { coverage } => {
                assert_eq!(*coverage, outcome.rows[0].coverage);
            }
            other => panic!("expected Decided, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_policy_aborts_by_default() {
        let runner = BatchRunner::new(policies());

        let result = runner.run(&[claim("PAT-1", "POL1"), claim("PAT-2", "GHOST"), claim("PAT-3", "POL1")]);

        match result {
            Err(ClaimGateError::PolicyNotFound { patient_id, policy_id }) => {
                assert_eq!(patient_id, "PAT-2");
                assert_eq!(policy_id, "GHOST");
            }
            other => panic!("expected PolicyNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_policy_skipped_in_skip_mode() {
        let runner = BatchRunner::new(policies()).with_missing_policy_mode(MissingPolicyMode::Skip);

        let outcome = runner
            .run(&[claim("PAT-1", "POL1"), claim("PAT-2", "GHOST"), claim("PAT-3", "POL1")])
            .unwrap();

        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[1].record.patient_id, "PAT-3");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].index, 1);
        assert_eq!(outcome.skipped[0].policy_id, "GHOST");
        assert!(outcome.skipped[0].reason.contains("GHOST"));

        // Skipped claims still get a decision record, at their input position.
        assert_eq!(outcome.decisions.len(), 3);
        assert_eq!(outcome.decisions[1].index, 1);
        assert!(matches!(outcome.decisions[1].outcome, DecisionOutcome::Skipped { .. }));
        assert_eq!(outcome.decisions[2].patient_id, "PAT-3");
    }

    #[test]
    fn test_missing_field_aborts_even_in_skip_mode() {
        let runner = BatchRunner::new(policies()).with_missing_policy_mode(MissingPolicyMode::Skip);

        let mut bad = claim("PAT-2", "POL1");
        bad.as_object_mut().unwrap().remove("preauth");

        match runner.run(&[claim("PAT-1", "POL1"), bad]) {
            Err(ClaimGateError::MissingField { field, .. }) => assert_eq!(field, "preauth"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_policy_fails_only_when_referenced() {
        let runner = BatchRunner::new(policies());

        // BROKEN exists in the lookup but is never referenced.
        assert!(runner.run(&[claim("PAT-1", "POL1")]).is_ok());

        match runner.run(&[claim("PAT-1", "BROKEN")]) {
            Err(ClaimGateError::MissingField { context, field }) => {
                assert_eq!(field, "covered_procedure_codes");
                assert!(context.contains("BROKEN"));
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_advisories_do_not_change_decisions() {
        let runner = BatchRunner::new(policies()).with_validator(Box::new(MockValidator), schema());

        let outcome = runner
            .run(&[claim("PAT-1", "POL1"), claim("BAD-2", "POL1")])
            .unwrap();

        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.approved_count(), 2, "advisories must never route a claim");
        assert_eq!(outcome.advisories.len(), 1);
        assert_eq!(outcome.advisories[0].index, 1);
        assert_eq!(outcome.advisories[0].patient_id, "BAD-2");
        assert_eq!(outcome.advisories[0].failures[0].rule_id, "mock-rule");
    }

    #[test]
    fn test_empty_batch_produces_empty_outcome() {
        let outcome = BatchRunner::new(policies()).run(&[]).unwrap();
        assert!(outcome.rows.is_empty());
        assert!(outcome.decisions.is_empty());
    }

    #[test]
    fn test_running_twice_yields_identical_rows_and_decisions() {
        let runner = BatchRunner::new(policies());
        let records = vec![claim("PAT-1", "POL1"), claim("PAT-2", "POL2"), claim("PAT-3", "POL1")];

        let first = runner.run(&records).unwrap();
        let second = runner.run(&records).unwrap();

        assert_eq!(first.rows, second.rows);
        assert_eq!(first.decisions, second.decisions);
        assert_ne!(first.batch_id, second.batch_id);
    }

    #[test]
    fn test_evaluate_claim_reports_decision() {
        let runner = BatchRunner::new(policies());

        let mut raw = claim("PAT-1", "POL1");
        raw["procedure_code"] = json!("P9");

        let outcome = runner.evaluate_claim(&BatchId::new(), 4, &raw).unwrap();
        let record = outcome.decision_record(4);
        assert_eq!(record.index, 4);
        assert_eq!(record.policy_id, "POL1");

        match outcome {
            ClaimOutcome::Decided { row, advisory } => {
                assert_eq!(row.coverage.final_decision(), FinalDecision::RouteForReview);
                assert!(advisory.is_none());
            }
            other => panic!("expected Decided, got {:?}", other),
        }
    }
}
