//! The decision trail of one batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use claimgate_contracts::batch::{BatchOutcome, DecisionOutcome, DecisionRecord};

use crate::digest::{entry_hash, GENESIS_HASH};

/// One decision, linked to the entry before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailEntry {
    #[serde(flatten)]
    pub record: DecisionRecord,
    /// `entry_hash` of the previous entry, or `GENESIS_HASH` for the first.
    pub prev_hash: String,
    pub entry_hash: String,
}

/// Every decision of a batch, in input order, with a digest over all of them.
///
/// The digest depends only on the decisions, so two runs over the same
/// inputs produce the same digest. `batch_id` and `generated_at` are
/// carried for the reader and are not hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTrail {
    pub batch_id: String,
    pub generated_at: DateTime<Utc>,
    pub approved: usize,
    pub routed: usize,
    pub skipped: usize,
    /// `entry_hash` of the last entry, or `GENESIS_HASH` when empty.
    pub digest: String,
    pub entries: Vec<TrailEntry>,
}

impl DecisionTrail {
    /// Build the trail for a finished batch.
    pub fn from_outcome(outcome: &BatchOutcome) -> Self {
        Self::from_decisions(&outcome.batch_id.to_string(), &outcome.decisions)
    }

    /// Link `decisions` in the order given.
    pub fn from_decisions(batch_id: &str, decisions: &[DecisionRecord]) -> Self {
        let mut entries = Vec::with_capacity(decisions.len());
        let mut prev_hash = GENESIS_HASH.to_string();
        let (mut approved, mut routed, mut skipped) = (0, 0, 0);

        for record in decisions {
            match &record.outcome {
                DecisionOutcome::Decided { coverage } if coverage.is_approved() => approved += 1,
                DecisionOutcome::Decided { .. } => routed += 1,
                DecisionOutcome::Skipped { .. } => skipped += 1,
            }
            let hash = entry_hash(record, &prev_hash);
            entries.push(TrailEntry {
                record: record.clone(),
                prev_hash,
                entry_hash: hash.clone(),
            });
            prev_hash = hash;
        }

        debug!(batch_id, entries = entries.len(), digest = %prev_hash, "decision trail built");

        Self {
            batch_id: batch_id.to_string(),
            generated_at: Utc::now(),
            approved,
            routed,
            skipped,
            digest: prev_hash,
            entries,
        }
    }

    /// True when every link and hash recomputes and the digest matches the
    /// last entry. An empty trail is valid if its digest is `GENESIS_HASH`.
    pub fn verify(&self) -> bool {
        let mut expected_prev = GENESIS_HASH;

        for entry in &self.entries {
            if entry.prev_hash != expected_prev {
                return false;
            }
            if entry_hash(&entry.record, &entry.prev_hash) != entry.entry_hash {
                return false;
            }
            expected_prev = entry.entry_hash.as_str();
        }

        self.digest == expected_prev
    }
}
