//! Patient claim record types.
//!
//! A `PatientRecord` is the summarized form of one raw claim: exactly the
//! fields the coverage evaluator reads, copied verbatim from input.

use serde::{Deserialize, Serialize};

use crate::codes::CodeSet;

/// The fields of a claim needed for coverage evaluation.
///
/// Built by the record summarizer and never mutated afterwards. Values are
/// not range-checked: a negative age or a malformed code is carried as-is
/// and simply fails the relevant check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Identifies the claimant. Uniqueness is not enforced.
    pub patient_id: String,
    pub age: i64,
    pub gender: String,
    /// Diagnoses attached to the claim. May be empty.
    pub diagnosis_codes: CodeSet,
    /// The single procedure being claimed.
    pub procedure_code: String,
    /// Whether prior authorization was obtained.
    pub preauth: bool,
    /// The policy this claim is evaluated against.
    pub policy_id: String,
}
