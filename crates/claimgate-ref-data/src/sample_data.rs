//! Bundled sample data for the ClaimGate reference scenarios.
//!
//! All data here is fictional. The same JSON files under `data/` are the
//! default inputs of the `claimgate run` command, so the scenarios and the
//! CLI work from one source of truth.

use serde_json::{json, Value};

use claimgate_contracts::error::ClaimGateResult;
use claimgate_policy::{load::parse_json_array, PolicyIndex};
use claimgate_verify::ReferenceCodes;

pub const SAMPLE_POLICIES_JSON: &str = include_str!("../../../data/insurance_policies.json");
pub const SAMPLE_RECORDS_JSON: &str = include_str!("../../../data/test_records.json");
pub const SAMPLE_REFERENCE_CODES_JSON: &str = include_str!("../../../data/reference_codes.json");

/// The four sample policies, indexed.
pub fn sample_policy_index() -> ClaimGateResult<PolicyIndex> {
    PolicyIndex::from_json_str(SAMPLE_POLICIES_JSON)
}

/// The ten sample claims, in file order.
pub fn sample_records() -> ClaimGateResult<Vec<Value>> {
    parse_json_array(SAMPLE_RECORDS_JSON, "sample claim records")
}

pub fn sample_reference_codes() -> ClaimGateResult<ReferenceCodes> {
    ReferenceCodes::from_json_str(SAMPLE_REFERENCE_CODES_JSON)
}

// ── Single-policy fixtures ────────────────────────────────────────────────────

/// Policy POL1: procedure P1 for diagnosis D1, ages 18 to 65, any gender,
/// preauthorization required.
pub fn pol1() -> Value {
    json!({
        "policy_id": "POL1",
        "covered_procedure_codes": ["P1"],
        "covered_diagnosis_codes": ["D1"],
        "age_min": 18,
        "age_max": 65,
        "gender": "Any",
        "requires_preauth": true
    })
}

/// A 30-year-old patient claiming P1 for D1 under POL1 with preauthorization.
/// Every eligibility case starts from this claim and changes one field.
pub fn baseline_claim(patient_id: &str) -> Value {
    json!({
        "patient_id": patient_id,
        "age": 30,
        "gender": "F",
        "diagnosis_codes": ["D1"],
        "procedure_code": "P1",
        "preauth": true,
        "policy_id": "POL1"
    })
}
