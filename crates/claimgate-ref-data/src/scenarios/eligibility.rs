//! Scenario 1: Coverage eligibility
//!
//! Five claims against policy POL1, each differing from a fully covered
//! baseline in one field:
//!
//!   1a. baseline                    → Approve
//!   1b. procedure P9 (not covered)  → procedure_match Fail
//!   1c. age 17 (below age_min 18)   → age_check Fail
//!   1d. preauth false (required)    → preauth_check Fail
//!   1e. no diagnoses                → diagnosis_match Fail
//!
//! All five run as one batch, so the decision trail holds five decided
//! entries in input order.

use serde_json::{json, Value};

use claimgate_contracts::{
    batch::BatchOutcome,
    coverage::FinalDecision,
    error::ClaimGateResult,
};
use claimgate_core::BatchRunner;
use claimgate_policy::PolicyIndex;

use crate::sample_data::{baseline_claim, pol1};

use super::{print_row, print_trail};

/// One eligibility case: its label, claim, and the decision it must reach.
pub struct EligibilityCase {
    pub label: &'static str,
    pub claim: Value,
    pub expected: FinalDecision,
}

/// The five cases, in the order they are run.
pub fn cases() -> Vec<EligibilityCase> {
    let with = |patient_id: &str, field: &str, value: Value| {
        let mut claim = baseline_claim(patient_id);
        claim[field] = value;
        claim
    };

    vec![
        EligibilityCase {
            label: "1a. fully covered claim",
            claim: baseline_claim("PAT-101"),
            expected: FinalDecision::Approve,
        },
        EligibilityCase {
            label: "1b. procedure not covered",
            claim: with("PAT-102", "procedure_code", json!("P9")),
            expected: FinalDecision::RouteForReview,
        },
        EligibilityCase {
            label: "1c. patient below minimum age",
            claim: with("PAT-103", "age", json!(17)),
            expected: FinalDecision::RouteForReview,
        },
        EligibilityCase {
            label: "1d. preauthorization missing",
            claim: with("PAT-104", "preauth", json!(false)),
            expected: FinalDecision::RouteForReview,
        },
        EligibilityCase {
            label: "1e. no diagnoses on claim",
            claim: with("PAT-105", "diagnosis_codes", json!([])),
            expected: FinalDecision::RouteForReview,
        },
    ]
}

/// Run every case through one batch against POL1.
pub fn run_batch() -> ClaimGateResult<BatchOutcome> {
    let index = PolicyIndex::from_policies(vec![pol1()])?;
    let claims: Vec<Value> = cases().into_iter().map(|c| c.claim).collect();

    BatchRunner::new(Box::new(index)).run(&claims)
}

/// Run Scenario 1: Coverage eligibility.
pub fn run_scenario() -> ClaimGateResult<()> {
    println!("=== Scenario 1: Coverage eligibility ===");
    println!();
    println!("  Policy POL1:  P1 for D1, ages 18-65, any gender, preauth required");
    println!();

    let outcome = run_batch()?;

    for (case, row) in cases().iter().zip(&outcome.rows) {
        println!("  {}", case.label);
        print_row(row);
        if row.coverage.final_decision() != case.expected {
            println!("  UNEXPECTED: expected {}", case.expected);
        }
        println!();
    }

    println!(
        "  Decisions:      {} approved, {} routed for review",
        outcome.approved_count(),
        outcome.routed_count()
    );
    print_trail(&outcome);
    println!();

    Ok(())
}
