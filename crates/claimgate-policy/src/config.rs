//! Run configuration schema.
//!
//! A `RunConfig` is deserialized from TOML. Every section and every key is
//! optional; anything left out takes the default shown below.
//!
//! ```toml
//! [inputs]
//! policies = "data/insurance_policies.json"
//! records = "data/test_records.json"
//! reference_codes = "data/reference_codes.json"   # optional, no default
//!
//! [batch]
//! on_missing_policy = "abort"    # abort | skip
//! validate_records = true
//!
//! [report]
//! path = "claim_approval_results.csv"
//! format = "csv"                 # csv | json
//!
//! [audit]
//! log_path = "claim_decision_trail.json"   # optional, no default
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use claimgate_contracts::{
    batch::MissingPolicyMode,
    error::{ClaimGateError, ClaimGateResult},
    report::ReportFormat,
};

/// The top-level structure deserialized from a TOML run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub inputs: InputsConfig,
    pub batch: BatchConfig,
    pub report: ReportConfig,
    pub audit: AuditConfig,
}

/// Where the input collections live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputsConfig {
    pub policies: PathBuf,
    pub records: PathBuf,
    /// The reference code table. When absent, code membership is not checked.
    pub reference_codes: Option<PathBuf>,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            policies: PathBuf::from("data/insurance_policies.json"),
            records: PathBuf::from("data/test_records.json"),
            reference_codes: None,
        }
    }
}

/// How the batch runner behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    pub on_missing_policy: MissingPolicyMode,
    /// Attach the advisory record validator to the run.
    pub validate_records: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            on_missing_policy: MissingPolicyMode::Abort,
            validate_records: true,
        }
    }
}

/// Where and how the report is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub path: PathBuf,
    pub format: ReportFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("claim_approval_results.csv"),
            format: ReportFormat::Csv,
        }
    }
}

/// Where the decision trail is exported. No export when `log_path` is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    pub log_path: Option<PathBuf>,
}

impl RunConfig {
    /// Parse `s` as TOML and build a `RunConfig`.
    ///
    /// Returns `ClaimGateError::ConfigError` if the TOML is malformed or does
    /// not match the expected schema.
    pub fn from_toml_str(s: &str) -> ClaimGateResult<Self> {
        toml::from_str(s).map_err(|e| ClaimGateError::ConfigError {
            reason: format!("failed to parse run configuration TOML: {}", e),
        })
    }

    /// Read the file at `path` and parse it as a TOML run configuration.
    ///
    /// Returns `ClaimGateError::ConfigError` if the file cannot be read or its
    /// contents are not a valid `RunConfig`.
    pub fn from_file(path: &Path) -> ClaimGateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ClaimGateError::ConfigError {
            reason: format!("failed to read configuration file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}
