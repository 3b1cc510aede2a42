//! # claimgate-audit
//!
//! Deterministic, hash-linked decision trail for ClaimGate batches.
//!
//! ## Overview
//!
//! After a batch finishes, its `DecisionRecord`s are linked in input order:
//! each `TrailEntry` hashes its claim's patient, policy, five check verdicts
//! and decision together with the previous entry's hash. The last hash is
//! the batch digest. Identical inputs give an identical digest, and editing,
//! dropping or reordering any decision is detected by `verify`.
//!
//! Building a trail cannot fail, so it never affects the batch it describes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use claimgate_audit::DecisionTrail;
//!
//! let outcome = runner.run(&records)?;
//! let trail = DecisionTrail::from_outcome(&outcome);
//! assert!(trail.verify());
//! println!("digest {}", trail.digest);
//! ```

pub mod digest;
pub mod trail;

pub use digest::{entry_hash, GENESIS_HASH};
pub use trail::{DecisionTrail, TrailEntry};

// ── Tests ─────────────────────────────────────────────────────────────────────
