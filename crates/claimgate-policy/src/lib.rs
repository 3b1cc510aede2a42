//! # claimgate-policy
//!
//! Policy index, input loading, and run configuration for ClaimGate.
//!
//! ## Overview
//!
//! This crate provides [`PolicyIndex`], which implements the
//! [`PolicyLookup`](claimgate_core::traits::PolicyLookup) trait. The index
//! is built once from the policy collection, keyed by `policy_id`, and is
//! read-only afterwards.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use claimgate_policy::{load::read_json_array, PolicyIndex, RunConfig};
//!
//! let config = RunConfig::from_file(Path::new("claimgate.toml"))?;
//! let index = PolicyIndex::from_file(&config.inputs.policies)?;
//! let records = read_json_array(&config.inputs.records, "claim records")?;
//! ```

pub mod config;
pub mod index;
pub mod load;

pub use config::RunConfig;
pub use index::PolicyIndex;

// ── Tests ─────────────────────────────────────────────────────────────────────
