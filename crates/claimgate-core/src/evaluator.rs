//! The coverage evaluator.
//!
//! Five independent checks, each computed every time:
//!
//! | Check           | Passes when                                                     |
//! |-----------------|-----------------------------------------------------------------|
//! | procedure_match | the claimed procedure is a covered procedure                    |
//! | diagnosis_match | at least one claimed diagnosis is a covered diagnosis           |
//! | age_check       | `age_min <= age <= age_max`                                     |
//! | gender_check    | the policy gender is `"Any"` or equals the patient gender       |
//! | preauth_check   | the policy does not require preauth, or the claim has it        |
//!
//! There is no short-circuit: a claim that fails the first check still has
//! the other four computed so the report shows every reason it was routed.

use claimgate_contracts::{
    coverage::{CheckOutcome, CoverageChecks, CoverageResult, CoverageRules},
    record::PatientRecord,
};

/// Evaluate one claim against one policy's coverage rules.
///
/// Pure and deterministic. The final decision is `Approve` iff all five
/// checks pass.
pub fn check_claim_coverage(patient: &PatientRecord, rules: &CoverageRules) -> CoverageResult {
    let checks = CoverageChecks {
        procedure_match: procedure_match(patient, rules),
        diagnosis_match: diagnosis_match(patient, rules),
        age_check: age_check(patient, rules),
        gender_check: gender_check(patient, rules),
        preauth_check: preauth_check(patient, rules),
    };
    CoverageResult::from_checks(checks)
}

pub fn procedure_match(patient: &PatientRecord, rules: &CoverageRules) -> CheckOutcome {
    rules
        .covered_procedure_codes
        .contains(&patient.procedure_code)
        .into()
}

/// Any-of intersection. An empty diagnosis list fails.
pub fn diagnosis_match(patient: &PatientRecord, rules: &CoverageRules) -> CheckOutcome {
    patient
        .diagnosis_codes
        .intersects(&rules.covered_diagnosis_codes)
        .into()
}

/// Inclusive on both bounds. Inverted bounds fail every age.
pub fn age_check(patient: &PatientRecord, rules: &CoverageRules) -> CheckOutcome {
    (rules.age_min <= patient.age && patient.age <= rules.age_max).into()
}

pub fn gender_check(patient: &PatientRecord, rules: &CoverageRules) -> CheckOutcome {
    rules.gender.admits(&patient.gender).into()
}

pub fn preauth_check(patient: &PatientRecord, rules: &CoverageRules) -> CheckOutcome {
    (!rules.requires_preauth || patient.preauth).into()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
