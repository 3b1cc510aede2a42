//! Core trait definitions for the ClaimGate pipeline.
//!
//! These two traits are the seams between the batch runner and the
//! collaborators it is handed at startup:
//!
//! - `PolicyLookup`: resolves a claim's policy id to its raw policy
//! - `RecordValidator`: advisory checks on raw input records
//!
//! The coverage evaluator itself is a pure function and needs no seam.

use serde_json::Value;

use claimgate_contracts::{
    error::ClaimGateResult,
    verify::{RecordSchema, ValidationReport},
};

/// Read-only access to the policy collection, keyed by policy id.
///
/// Implementations are built once before a batch starts and never mutated
/// while it runs.
pub trait PolicyLookup: Send + Sync {
    /// Return the raw policy object for `policy_id`, or `None` if unknown.
    ///
    /// The runner summarizes the returned value itself, so a malformed
    /// policy only fails the claims that reference it.
    fn lookup(&self, policy_id: &str) -> Option<&Value>;
}

/// Advisory validation of raw input records.
///
/// Implementations inspect the raw JSON against a declarative
/// `RecordSchema`. A failing report is surfaced but never changes a
/// decision.
pub trait RecordValidator: Send + Sync {
    /// Validate `raw` against `schema`, collecting every failure.
    fn validate(&self, raw: &Value, schema: &RecordSchema) -> ClaimGateResult<ValidationReport>;
}
