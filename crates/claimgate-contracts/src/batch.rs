//! Batch-level identifiers, outcomes, and per-claim decision records.
//!
//! `BatchOutcome` is what the batch runner returns to its caller.
//! `DecisionRecord` is the per-claim entry of the decision trail, one per
//! claim the runner settles.

use serde::{Deserialize, Serialize};

use crate::{
    coverage::{CoverageResult, ResultRow},
    verify::ValidationFailure,
};

/// Unique identifier for one batch run.
///
/// Appears in every log line the run produces and in the exported decision trail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(pub uuid::Uuid);

impl BatchId {
    /// Create a new, unique batch ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the batch runner does with a claim whose policy id is unknown.
///
/// Expressed in TOML as `"abort"` or `"skip"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPolicyMode {
    /// Halt the whole batch with `PolicyNotFound`. No outcome is produced.
    #[default]
    Abort,
    /// Leave the claim out of the rows, record it as skipped, and continue.
    Skip,
}

impl std::str::FromStr for MissingPolicyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(MissingPolicyMode::Abort),
            "skip" => Ok(MissingPolicyMode::Skip),
            other => Err(format!("unknown missing-policy mode '{other}' (expected abort or skip)")),
        }
    }
}

/// A claim the runner did not evaluate because its policy was unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedClaim {
    /// Zero-based position of the claim in the input sequence.
    pub index: usize,
    pub patient_id: String,
    pub policy_id: String,
    pub reason: String,
}

/// Advisory validation findings for one claim.
///
/// Advisories never change a decision; they are surfaced alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisory {
    /// Zero-based position of the claim in the input sequence.
    pub index: usize,
    pub patient_id: String,
    pub failures: Vec<ValidationFailure>,
}

/// Everything one batch run produced.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub batch_id: BatchId,
    /// One row per evaluated claim, in input order.
    pub rows: Vec<ResultRow>,
    /// Claims left out under `MissingPolicyMode::Skip`. Empty under `Abort`.
    pub skipped: Vec<SkippedClaim>,
    pub advisories: Vec<Advisory>,
    /// One record per settled claim, decided or skipped, in input order.
    pub decisions: Vec<DecisionRecord>,
}

impl BatchOutcome {
    pub fn approved_count(&self) -> usize {
        self.rows.iter().filter(|r| r.coverage.is_approved()).count()
    }

    pub fn routed_count(&self) -> usize {
        self.rows.len() - self.approved_count()
    }
}

/// How the runner settled a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// The claim was evaluated.
    Decided { coverage: CoverageResult },
    /// The claim was skipped because its policy could not be resolved.
    Skipped { reason: String },
}

/// One settled claim.
///
/// Carries no batch id or timestamp, so identical inputs always produce
/// identical records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Zero-based position of the claim in the input sequence.
    pub index: usize,
    pub patient_id: String,
    pub policy_id: String,
    pub outcome: DecisionOutcome,
}
