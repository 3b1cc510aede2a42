//! Scenario 3: Sample batch
//!
//! The bundled ten-claim batch against the four sample policies, with
//! advisory validation and the reference code table attached. This is the
//! same run `claimgate run` performs with its default inputs.
//!
//! Advisories are expected for three claims (an unknown procedure code, an
//! empty diagnosis list, an unknown diagnosis code) and none of them change a
//! decision.

use claimgate_contracts::{batch::BatchOutcome, error::ClaimGateResult};
use claimgate_core::BatchRunner;
use claimgate_verify::{build_validator, schemas::patient_record_schema};

use crate::sample_data::{sample_policy_index, sample_records, sample_reference_codes};

use super::{print_row, print_trail};

/// Run the sample batch.
pub fn run_batch() -> ClaimGateResult<BatchOutcome> {
    let index = sample_policy_index()?;
    let records = sample_records()?;
    let validator = build_validator(Some(sample_reference_codes()?));

    BatchRunner::new(Box::new(index))
        .with_validator(Box::new(validator), patient_record_schema(true))
        .run(&records)
}

/// Run Scenario 3: Sample batch.
pub fn run_scenario() -> ClaimGateResult<()> {
    println!("=== Scenario 3: Sample batch ===");
    println!();

    let outcome = run_batch()?;

    println!("  Batch:          {}", outcome.batch_id);
    println!();
    for row in &outcome.rows {
        print_row(row);
    }
    println!();

    for advisory in &outcome.advisories {
        for failure in &advisory.failures {
            println!(
                "  ADVISORY {:<8} [{}] {}",
                advisory.patient_id, failure.rule_id, failure.message
            );
        }
    }
    println!();

    println!(
        "  Decisions:      {} approved, {} routed for review",
        outcome.approved_count(),
        outcome.routed_count()
    );
    println!("  Advisories:     {} claim(s)", outcome.advisories.len());
    print_trail(&outcome);
    println!();

    Ok(())
}
