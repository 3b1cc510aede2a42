//! # claimgate-ref-data
//!
//! Reference data and runnable scenarios for ClaimGate.
//!
//! Demonstrates three scenarios using bundled fictional data:
//!
//! 1. **Coverage eligibility**: one fully covered claim and four claims
//!    that each fail exactly one check.
//! 2. **Unresolved policy reference**: the same batch aborted under the
//!    default mode and completed with a skipped claim under `skip`.
//! 3. **Sample batch**: ten claims against four policies with advisory
//!    validation and the reference code table.
//!
//! All data is fictional. No external systems are contacted.

pub mod sample_data;
pub mod scenarios;

// ── Tests ─────────────────────────────────────────────────────────────────────
