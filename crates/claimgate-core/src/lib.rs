//! # claimgate-core
//!
//! The claim coverage pipeline for ClaimGate.
//!
//! This crate provides:
//! - The two seams (`PolicyLookup`, `RecordValidator`)
//! - The record and policy summarizers
//! - The coverage evaluator
//! - The `BatchRunner` that wires them together per claim
//!
//! ## Usage
//!
//! ```rust,ignore
//! use claimgate_core::BatchRunner;
//!
//! let runner = BatchRunner::new(Box::new(index));
//! let outcome = runner.run(&records)?;
//! ```

pub mod evaluator;
pub mod runner;
pub mod summarize;
pub mod traits;

pub use evaluator::check_claim_coverage;
pub use runner::{BatchRunner, ClaimOutcome};
pub use summarize::{summarize_patient_record, summarize_policy_guideline};
