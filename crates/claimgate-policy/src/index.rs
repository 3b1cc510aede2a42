//! The policy index.
//!
//! `PolicyIndex` is built once from the policy collection and implements the
//! `PolicyLookup` trait from claimgate-core.
//!
//! Construction rules:
//!
//! 1. Every policy object must carry a string `policy_id`.
//! 2. Policy ids are unique across the collection; a repeat is rejected.
//! 3. The raw objects are stored as-is. Coverage fields are not checked here:
//!    the runner summarizes a policy only when a claim references it.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use claimgate_contracts::error::{ClaimGateError, ClaimGateResult};
use claimgate_core::traits::PolicyLookup;

use crate::load::{parse_json_array, read_json_array};

/// Read-only mapping from policy id to raw policy object.
///
/// ```rust,ignore
/// use claimgate_policy::PolicyIndex;
///
/// let index = PolicyIndex::from_file(Path::new("data/insurance_policies.json"))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolicyIndex {
    policies: HashMap<String, Value>,
}

impl PolicyIndex {
    /// Index `policies` by their `policy_id`.
    ///
    /// # Errors
    ///
    /// - `MissingField` if a policy has no `policy_id`.
    /// - `InvalidField` if a policy is not an object or its id is not a string.
    /// - `DuplicatePolicy` if two policies share an id.
    pub fn from_policies(policies: Vec<Value>) -> ClaimGateResult<Self> {
        let mut index = HashMap::with_capacity(policies.len());

        for (position, policy) in policies.into_iter().enumerate() {
            let context = format!("policy #{position}");
            let id = match policy.get("policy_id") {
                Some(Value::String(id)) => id.clone(),
                Some(other) => {
                    return Err(ClaimGateError::InvalidField {
                        context,
                        field: "policy_id".to_string(),
                        reason: format!("expected a string, found {other}"),
                    })
                }
                None if policy.is_object() => {
                    return Err(ClaimGateError::MissingField {
                        context,
                        field: "policy_id".to_string(),
                    })
                }
                None => {
                    return Err(ClaimGateError::InvalidField {
                        context,
                        field: "<record>".to_string(),
                        reason: "expected a JSON object".to_string(),
                    })
                }
            };

            if index.contains_key(&id) {
                return Err(ClaimGateError::DuplicatePolicy { policy_id: id });
            }

            debug!(policy_id = %id, "policy indexed");
            index.insert(id, policy);
        }

        info!(policies = index.len(), "policy index built");
        Ok(Self { policies: index })
    }

    /// Parse `s` as a JSON array of policies and index it.
    pub fn from_json_str(s: &str) -> ClaimGateResult<Self> {
        Self::from_policies(parse_json_array(s, "policy collection")?)
    }

    /// Read the policy collection at `path` and index it.
    pub fn from_file(path: &Path) -> ClaimGateResult<Self> {
        Self::from_policies(read_json_array(path, "policy collection")?)
    }

    /// The raw policy for `policy_id`, if indexed.
    pub fn get(&self, policy_id: &str) -> Option<&Value> {
        self.policies.get(policy_id)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// All indexed policy ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.policies.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate `(policy_id, raw policy)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ids()
            .into_iter()
            .filter_map(move |id| self.policies.get(id).map(|p| (id, p)))
    }
}

impl PolicyLookup for PolicyIndex {
    fn lookup(&self, policy_id: &str) -> Option<&Value> {
        self.get(policy_id)
    }
}
