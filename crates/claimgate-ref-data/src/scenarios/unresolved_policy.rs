//! Scenario 2: Unresolved policy reference
//!
//! A three-claim batch whose middle claim references POL404, which is not
//! in the policy collection.
//!
//! Sub-case A (abort, the default): the batch fails with `PolicyNotFound`
//! and produces no rows, no decision trail and no report.
//!
//! Sub-case B (skip): the unresolved claim is recorded as skipped in the
//! outcome and its decision trail; the other two claims are decided normally.

use serde_json::{json, Value};

use claimgate_contracts::{
    batch::{BatchOutcome, MissingPolicyMode},
    error::ClaimGateResult,
};
use claimgate_core::BatchRunner;
use claimgate_policy::PolicyIndex;

use crate::sample_data::{baseline_claim, pol1};

use super::{print_row, print_trail};

pub const UNKNOWN_POLICY_ID: &str = "POL404";

/// The three claims: covered, unresolved, covered.
pub fn claims() -> Vec<Value> {
    let mut orphan = baseline_claim("PAT-202");
    orphan["policy_id"] = json!(UNKNOWN_POLICY_ID);
    vec![baseline_claim("PAT-201"), orphan, baseline_claim("PAT-203")]
}

/// Run the batch against POL1 only, under `mode`.
pub fn run_batch(mode: MissingPolicyMode) -> ClaimGateResult<BatchOutcome> {
    let index = PolicyIndex::from_policies(vec![pol1()])?;
    BatchRunner::new(Box::new(index))
        .with_missing_policy_mode(mode)
        .run(&claims())
}

/// Run Scenario 2: Unresolved policy reference.
pub fn run_scenario() -> ClaimGateResult<()> {
    println!("=== Scenario 2: Unresolved policy reference ===");
    println!();
    println!("  Claims:   PAT-201 (POL1), PAT-202 ({UNKNOWN_POLICY_ID}), PAT-203 (POL1)");
    println!();

    // ── Sub-case A: abort ─────────────────────────────────────────────────────

    println!("  ── Sub-case A: on_missing_policy = abort ──");
    println!();
    match run_batch(MissingPolicyMode::Abort) {
        Err(e) => {
            println!("  Batch result:   ABORTED");
            println!("  Error:          {e}");
            println!("  Report:         not written");
        }
        Ok(outcome) => {
            println!("  UNEXPECTED: batch completed with {} row(s)", outcome.rows.len());
        }
    }
    println!();

    // ── Sub-case B: skip ──────────────────────────────────────────────────────

    println!("  ── Sub-case B: on_missing_policy = skip ──");
    println!();
    {
        let outcome = run_batch(MissingPolicyMode::Skip)?;

        for row in &outcome.rows {
            print_row(row);
        }
        for skipped in &outcome.skipped {
            println!("  {:<8} SKIPPED: {}", skipped.patient_id, skipped.reason);
        }
        println!();
        println!(
            "  Decisions:      {} approved, {} routed, {} skipped",
            outcome.approved_count(),
            outcome.routed_count(),
            outcome.skipped.len()
        );
        print_trail(&outcome);
    }
    println!();

    Ok(())
}
