//! JSON input loading.
//!
//! Every input collection (policies, claim records) is a top-level JSON
//! array of objects, read fully into memory before evaluation starts.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use claimgate_contracts::error::{ClaimGateError, ClaimGateResult};

/// Parse `s` as a JSON array. `what` names the collection in errors.
///
/// Returns `InputError` if `s` is not valid JSON or not an array.
pub fn parse_json_array(s: &str, what: &str) -> ClaimGateResult<Vec<Value>> {
    let value: Value = serde_json::from_str(s).map_err(|e| ClaimGateError::InputError {
        reason: format!("failed to parse {what}: {e}"),
    })?;

    match value {
        Value::Array(items) => Ok(items),
        _ => Err(ClaimGateError::InputError {
            reason: format!("{what} must be a JSON array"),
        }),
    }
}

/// Read the file at `path` and parse it as a JSON array.
///
/// Returns `InputError` if the file cannot be read or is not a JSON array.
pub fn read_json_array(path: &Path, what: &str) -> ClaimGateResult<Vec<Value>> {
    let contents = std::fs::read_to_string(path).map_err(|e| ClaimGateError::InputError {
        reason: format!("failed to read {what} file '{}': {}", path.display(), e),
    })?;
    let items = parse_json_array(&contents, what)?;
    debug!(path = %path.display(), count = items.len(), "{what} loaded");
    Ok(items)
}
