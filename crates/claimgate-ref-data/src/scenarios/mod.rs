//! Reference scenarios.
//!
//! Each scenario wires real ClaimGate components (policy index, batch
//! runner, decision trail, validator) with bundled fictional data and
//! prints what happened.

pub mod eligibility;
pub mod sample_batch;
pub mod unresolved_policy;

use claimgate_audit::DecisionTrail;
use claimgate_contracts::{
    batch::BatchOutcome, coverage::ResultRow, error::ClaimGateResult,
};

/// Run every scenario in order.
pub fn run_all() -> ClaimGateResult<()> {
    eligibility::run_scenario()?;
    unresolved_policy::run_scenario()?;
    sample_batch::run_scenario()?;
    Ok(())
}

/// Print one decided row with every check outcome.
pub(crate) fn print_row(row: &ResultRow) {
    let checks = &row.coverage.checks;
    println!(
        "  {:<8} {:<5} proc={:<4} diag={:<4} age={:<4} gender={:<4} preauth={:<4} => {}",
        row.record.patient_id,
        row.record.policy_id,
        checks.procedure_match,
        checks.diagnosis_match,
        checks.age_check,
        checks.gender_check,
        checks.preauth_check,
        row.coverage.final_decision()
    );
}

pub(crate) fn print_trail(outcome: &BatchOutcome) {
    let trail = DecisionTrail::from_outcome(outcome);
    println!(
        "  Decision trail: {} ({} entr{})",
        if trail.verify() { "VERIFIED" } else { "FAILED" },
        trail.entries.len(),
        if trail.entries.len() == 1 { "y" } else { "ies" }
    );
    println!("  Digest:         {}", trail.digest);
}
