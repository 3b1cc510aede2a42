//! Schema-based record validator.
//!
//! `SchemaValidator` implements the `RecordValidator` trait from
//! `claimgate-core`. Validation runs in two phases:
//!
//! 1. **Structural**: the raw record is validated against the
//!    `RecordSchema::json_schema` document using the `jsonschema` crate.
//! 2. **Semantic**: each `ValidationRule` in `RecordSchema::rules` is
//!    evaluated in order. All failures are collected before returning.
//!
//! Custom rules delegate to named functions registered via `register_rule`.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use claimgate_contracts::{
    error::ClaimGateResult,
    verify::{RecordSchema, ValidationFailure, ValidationReport, ValidationRuleType},
};
use claimgate_core::traits::RecordValidator;

/// A caller-supplied validation function.
///
/// Receives the full raw record. Returns `Some(message)` when the check
/// fails, or `None` on success.
pub type CustomValidatorFn = Box<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Rule id attached to every structural (JSON Schema) failure.
pub const JSON_SCHEMA_RULE_ID: &str = "json-schema";

/// The ClaimGate record validator.
///
/// Combines JSON Schema structural validation with a set of semantic rules.
pub struct SchemaValidator {
    custom_rules: HashMap<String, CustomValidatorFn>,
}

impl SchemaValidator {
    /// Create a validator with no custom rules registered.
    pub fn new() -> Self {
        Self {
            custom_rules: HashMap::new(),
        }
    }

    /// Register a custom validation function under `name`.
    ///
    /// The name must match the `function_name` of a
    /// `ValidationRuleType::Custom` rule. Registering the same name twice
    /// replaces the previous function.
    pub fn register_rule(&mut self, name: impl Into<String>, f: CustomValidatorFn) {
        self.custom_rules.insert(name.into(), f);
    }

    /// Validate every item of a collection, returning one report per item in
    /// input order.
    pub fn validate_all(
        &self,
        items: &[Value],
        schema: &RecordSchema,
    ) -> ClaimGateResult<Vec<ValidationReport>> {
        items.iter().map(|item| self.validate(item, schema)).collect()
    }

    /// Resolve a dot-notation field path against a JSON value. Returns `None`
    /// when any segment is missing or the value is JSON `null`.
    fn resolve_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
        let mut current = value;
        for segment in path.split('.') {
            match current.get(segment) {
                Some(v) if !v.is_null() => current = v,
                _ => return None,
            }
        }
        Some(current)
    }

    fn structural_failures(raw: &Value, schema: &RecordSchema) -> Vec<ValidationFailure> {
        if schema.json_schema.is_null() {
            return Vec::new();
        }

        match jsonschema::validator_for(&schema.json_schema) {
            Ok(validator) => validator
                .iter_errors(raw)
                .map(|error| {
                    let message =
                        format!("JSON Schema violation at {}: {}", error.instance_path, error);
                    warn!(schema_id = %schema.schema_id, %message, "structural validation failure");
                    ValidationFailure {
                        rule_id: JSON_SCHEMA_RULE_ID.to_string(),
                        message,
                    }
                })
                .collect(),
            // A broken schema document is reported as one structural failure
            // rather than aborting the batch.
            Err(e) => {
                let message = format!("invalid JSON Schema document: {e}");
                warn!(schema_id = %schema.schema_id, %message, "schema compilation failure");
                vec![ValidationFailure {
                    rule_id: JSON_SCHEMA_RULE_ID.to_string(),
                    message,
                }]
            }
        }
    }

    fn evaluate_rule(&self, raw: &Value, rule_type: &ValidationRuleType) -> Option<String> {
        match rule_type {
            ValidationRuleType::RequiredField { field_path } => {
                match Self::resolve_path(raw, field_path) {
                    None => Some(format!("required field '{field_path}' is missing or null")),
                    Some(_) => None,
                }
            }

            ValidationRuleType::AllowedValues { field_path, allowed } => {
                match Self::resolve_path(raw, field_path) {
                    None => Some(format!(
                        "field '{field_path}' is missing; cannot check allowed values"
                    )),
                    Some(actual) if allowed.contains(actual) => None,
                    Some(actual) => Some(format!(
                        "field '{field_path}' has value {actual} which is not in the allowed set"
                    )),
                }
            }

            // Only string values are checked; anything else passes.
            ValidationRuleType::ForbiddenPattern { field_path, pattern } => {
                match Self::resolve_path(raw, field_path).and_then(Value::as_str) {
                    Some(s) if s.contains(pattern.as_str()) => Some(format!(
                        "field '{field_path}' contains forbidden pattern '{pattern}'"
                    )),
                    _ => None,
                }
            }

            // An unregistered name is itself a failure.
            ValidationRuleType::Custom { function_name } => {
                match self.custom_rules.get(function_name.as_str()) {
                    Some(f) => f(raw),
                    None => Some(format!(
                        "no custom rule registered for function name '{function_name}'"
                    )),
                }
            }
        }
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordValidator for SchemaValidator {
    /// Validate `raw` against `schema`.
    ///
    /// Runs structural JSON Schema validation first, then every semantic
    /// rule. All failures are accumulated into one report.
    fn validate(&self, raw: &Value, schema: &RecordSchema) -> ClaimGateResult<ValidationReport> {
        let mut failures = Self::structural_failures(raw, schema);

        for rule in &schema.rules {
            debug!(
                rule_id = %rule.rule_id,
                description = %rule.description,
                "evaluating validation rule"
            );

            if let Some(message) = self.evaluate_rule(raw, &rule.rule_type) {
                warn!(rule_id = %rule.rule_id, %message, "semantic rule failed");
                failures.push(ValidationFailure {
                    rule_id: rule.rule_id.clone(),
                    message,
                });
            }
        }

        let passed = failures.is_empty();
        debug!(
            schema_id = %schema.schema_id,
            passed,
            failure_count = failures.len(),
            "validation complete"
        );

        Ok(ValidationReport { passed, failures })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
