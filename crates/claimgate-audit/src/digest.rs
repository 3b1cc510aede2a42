//! Claim-level hashing for the decision trail.
//!
//! Entry hash input layout (bytes, in order):
//!   1. index as 8-byte little-endian
//!   2. patient_id, length-prefixed
//!   3. policy_id, length-prefixed
//!   4. outcome tag: `0` decided, `1` skipped
//!   5. decided: one byte per check in report column order (`1` pass,
//!      `0` fail), then one decision byte (`1` approve, `0` route).
//!      skipped: the reason, length-prefixed
//!   6. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!
//! Length prefixes are 8-byte little-endian. Every field is fixed-width or
//! prefixed, so no two distinct records hash the same input bytes.

use sha2::{Digest, Sha256};

use claimgate_contracts::{
    batch::{DecisionOutcome, DecisionRecord},
    coverage::FinalDecision,
};

/// The `prev_hash` of the first entry, and the digest of an empty batch.
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Hash one decision record linked to `prev_hash`.
///
/// Returns a lowercase 64-character hex string.
pub fn entry_hash(record: &DecisionRecord, prev_hash: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update((record.index as u64).to_le_bytes());
    update_prefixed(&mut hasher, &record.patient_id);
    update_prefixed(&mut hasher, &record.policy_id);

    match &record.outcome {
        DecisionOutcome::Decided { coverage } => {
            hasher.update([0u8]);
            let checks = coverage.checks.outcomes().map(|c| u8::from(c.is_pass()));
            hasher.update(checks);
            hasher.update([u8::from(coverage.final_decision() == FinalDecision::Approve)]);
        }
        DecisionOutcome::Skipped { reason } => {
            hasher.update([1u8]);
            update_prefixed(&mut hasher, reason);
        }
    }

    hasher.update(prev_hash.as_bytes());
    hex::encode(hasher.finalize())
}

fn update_prefixed(hasher: &mut Sha256, field: &str) {
    hasher.update((field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}
