//! Coverage rule and coverage result types.
//!
//! The coverage evaluator consumes a `PatientRecord` and a `CoverageRules`
//! and produces a `CoverageResult`. The final decision is binary: any check
//! other than `Pass` routes the claim to a human reviewer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{codes::CodeSet, record::PatientRecord};

/// The wildcard policy gender that admits every patient.
pub const ANY_GENDER: &str = "Any";

/// Which patient genders a policy covers.
///
/// Serialized as a plain string: `"Any"` is the wildcard, any other value is
/// an exact, case-sensitive gender code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GenderRule {
    /// Matches every patient gender.
    Any,
    /// Matches only this exact gender code.
    Only(String),
}

impl GenderRule {
    /// Return true if a patient with `gender` satisfies this rule.
    pub fn admits(&self, gender: &str) -> bool {
        match self {
            GenderRule::Any => true,
            GenderRule::Only(code) => code == gender,
        }
    }
}

impl From<String> for GenderRule {
    fn from(value: String) -> Self {
        if value == ANY_GENDER {
            GenderRule::Any
        } else {
            GenderRule::Only(value)
        }
    }
}

impl From<GenderRule> for String {
    fn from(rule: GenderRule) -> Self {
        match rule {
            GenderRule::Any => ANY_GENDER.to_string(),
            GenderRule::Only(code) => code,
        }
    }
}

/// The coverage rules of one policy, as read by the evaluator.
///
/// Built by the policy summarizer. `age_min > age_max` is accepted and
/// makes the age check unsatisfiable; keeping policies sane is the policy
/// author's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRules {
    pub covered_procedure_codes: CodeSet,
    pub covered_diagnosis_codes: CodeSet,
    /// Inclusive lower age bound.
    pub age_min: i64,
    /// Inclusive upper age bound.
    pub age_max: i64,
    pub gender: GenderRule,
    pub requires_preauth: bool,
}

/// The verdict of a single coverage check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckOutcome {
    Pass,
    Fail,
}

impl CheckOutcome {
    pub fn is_pass(self) -> bool {
        self == CheckOutcome::Pass
    }
}

impl From<bool> for CheckOutcome {
    fn from(passed: bool) -> Self {
        if passed {
            CheckOutcome::Pass
        } else {
            CheckOutcome::Fail
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::Pass => f.pad("Pass"),
            CheckOutcome::Fail => f.pad("Fail"),
        }
    }
}

/// The final outcome for a claim. There is no partial approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinalDecision {
    /// Every check passed; the claim is approved automatically.
    Approve,
    /// At least one check failed; a reviewer must look at the claim.
    #[serde(rename = "Route for Review")]
    RouteForReview,
}

impl fmt::Display for FinalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinalDecision::Approve => f.pad("Approve"),
            FinalDecision::RouteForReview => f.pad("Route for Review"),
        }
    }
}

/// The five independent check verdicts for one claim.
///
/// Field order is the report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageChecks {
    pub procedure_match: CheckOutcome,
    pub diagnosis_match: CheckOutcome,
    pub age_check: CheckOutcome,
    pub gender_check: CheckOutcome,
    pub preauth_check: CheckOutcome,
}

impl CoverageChecks {
    /// All five outcomes, in report column order.
    pub fn outcomes(&self) -> [CheckOutcome; 5] {
        [
            self.procedure_match,
            self.diagnosis_match,
            self.age_check,
            self.gender_check,
            self.preauth_check,
        ]
    }

    pub fn all_pass(&self) -> bool {
        self.outcomes().iter().all(|o| o.is_pass())
    }
}

/// Per-check verdicts plus the derived final decision.
///
/// The decision is never set directly: it is computed from the checks on
/// construction and again on deserialization, so `Approve` always means
/// all five checks passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CoverageChecks")]
pub struct CoverageResult {
    #[serde(flatten)]
    pub checks: CoverageChecks,
    #[serde(rename = "Final Decision")]
    final_decision: FinalDecision,
}

impl CoverageResult {
    /// Derive the final decision from the five checks.
    pub fn from_checks(checks: CoverageChecks) -> Self {
        let final_decision = if checks.all_pass() {
            FinalDecision::Approve
        } else {
            FinalDecision::RouteForReview
        };
        Self {
            checks,
            final_decision,
        }
    }

    pub fn final_decision(&self) -> FinalDecision {
        self.final_decision
    }

    pub fn is_approved(&self) -> bool {
        self.final_decision == FinalDecision::Approve
    }
}

impl From<CoverageChecks> for CoverageResult {
    fn from(checks: CoverageChecks) -> Self {
        Self::from_checks(checks)
    }
}

/// One report row: the claim's fields followed by its coverage result.
///
/// Serializes as a single flat object whose key order matches the report
/// columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(flatten)]
    pub record: PatientRecord,
    #[serde(flatten)]
    pub coverage: CoverageResult,
}
