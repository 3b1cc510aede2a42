//! Error types for the ClaimGate evaluation pipeline.
//!
//! All fallible operations in ClaimGate return `ClaimGateResult<T>`.
//! Variants carry enough context to point an operator at the offending
//! record, policy, or file.

use thiserror::Error;

/// The unified error type for ClaimGate.
#[derive(Debug, Error)]
pub enum ClaimGateError {
    /// A required field is absent from a raw record or policy.
    ///
    /// Raised by the summarizers. Always fatal for the batch.
    #[error("missing required field '{field}' in {context}")]
    MissingField { context: String, field: String },

    /// A field is present but its JSON value cannot be read as the declared type.
    #[error("invalid field '{field}' in {context}: {reason}")]
    InvalidField {
        context: String,
        field: String,
        reason: String,
    },

    /// A claim references a policy id that is not in the policy index.
    #[error("policy '{policy_id}' referenced by patient '{patient_id}' was not found")]
    PolicyNotFound { patient_id: String, policy_id: String },

    /// Two policies in the same collection share a `policy_id`.
    #[error("duplicate policy id '{policy_id}' in policy collection")]
    DuplicatePolicy { policy_id: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// An input collection could not be read or parsed.
    #[error("input error: {reason}")]
    InputError { reason: String },

    /// A JSON Schema document could not be compiled or applied.
    #[error("schema validation error: {reason}")]
    SchemaValidation { reason: String },

    /// The requested decision-trail file could not be written.
    #[error("decision trail export failed: {reason}")]
    TrailExportFailed { reason: String },

    /// The tabular report could not be rendered or written.
    #[error("report write failed: {reason}")]
    ReportWriteFailed { reason: String },
}

/// Convenience alias used throughout the ClaimGate crates.
pub type ClaimGateResult<T> = Result<T, ClaimGateError>;
