//! # claimgate-report
//!
//! Renders the decision report: one row per decided claim, in input order,
//! with the fixed column list of `REPORT_COLUMNS`.
//!
//! The full report is rendered in memory first. `write_report` then writes
//! it to a sibling temporary file and renames that over the target, so the
//! target is either the complete new report or untouched.
//!
//! ```rust,ignore
//! use claimgate_report::{render, write_report};
//!
//! let bytes = render(ReportFormat::Csv, &outcome.rows)?;
//! write_report(Path::new("claim_approval_results.csv"), &bytes)?;
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::info;

use claimgate_contracts::{
    coverage::ResultRow,
    error::{ClaimGateError, ClaimGateResult},
    report::{ReportFormat, CODE_SEPARATOR, REPORT_COLUMNS},
};

/// Render `rows` in `format`.
pub fn render(format: ReportFormat, rows: &[ResultRow]) -> ClaimGateResult<Vec<u8>> {
    match format {
        ReportFormat::Csv => render_csv(rows),
        ReportFormat::Json => render_json(rows),
    }
}

/// Render `rows` as CSV with a header line.
///
/// `diagnosis_codes` is joined with `CODE_SEPARATOR` into one cell, so a
/// code containing `;` reads back as two codes. Use JSON when that matters.
pub fn render_csv(rows: &[ResultRow]) -> ClaimGateResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(REPORT_COLUMNS).map_err(csv_error)?;
    for row in rows {
        writer.write_record(csv_cells(row)).map_err(csv_error)?;
    }

    writer.into_inner().map_err(|e| ClaimGateError::ReportWriteFailed {
        reason: format!("failed to finish CSV report: {e}"),
    })
}

/// Render `rows` as a pretty-printed JSON array of flat objects keyed by
/// `REPORT_COLUMNS`.
pub fn render_json(rows: &[ResultRow]) -> ClaimGateResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(rows).map_err(|e| {
        ClaimGateError::ReportWriteFailed {
            reason: format!("failed to serialize JSON report: {e}"),
        }
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write a rendered report to `path`, replacing any existing file.
pub fn write_report(path: &Path, report: &[u8]) -> ClaimGateResult<()> {
    persist(path, report).map_err(|e| ClaimGateError::ReportWriteFailed {
        reason: format!("failed to write report '{}': {}", path.display(), e),
    })?;

    info!(path = %path.display(), bytes = report.len(), "report written");
    Ok(())
}

/// Replace `path` with `bytes` in one step.
///
/// The bytes go to a hidden sibling file first, which is then renamed over
/// `path`. On failure the sibling is removed and `path` is left as it was.
pub fn persist(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = sibling_tmp_path(path)?;

    let result = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        fs::remove_file(&tmp).ok();
    }
    result
}

fn sibling_tmp_path(path: &Path) -> io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name")
    })?;
    Ok(path.with_file_name(format!(
        ".{}.{}.tmp",
        name.to_string_lossy(),
        std::process::id()
    )))
}

/// One CSV record, in `REPORT_COLUMNS` order.
fn csv_cells(row: &ResultRow) -> [String; 13] {
    let record = &row.record;
    let checks = &row.coverage.checks;
    [
        record.patient_id.clone(),
        record.age.to_string(),
        record.gender.clone(),
        record.diagnosis_codes.iter().collect::<Vec<_>>().join(CODE_SEPARATOR),
        record.procedure_code.clone(),
        record.preauth.to_string(),
        record.policy_id.clone(),
        checks.procedure_match.to_string(),
        checks.diagnosis_match.to_string(),
        checks.age_check.to_string(),
        checks.gender_check.to_string(),
        checks.preauth_check.to_string(),
        row.coverage.final_decision().to_string(),
    ]
}

fn csv_error(e: csv::Error) -> ClaimGateError {
    ClaimGateError::ReportWriteFailed {
        reason: format!("failed to render CSV report: {e}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
