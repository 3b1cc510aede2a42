//! ClaimGate command-line interface.
//!
//! Evaluates a batch of insurance claims against their policies and writes
//! the decision report, validates inputs without evaluating them, or runs
//! the bundled reference scenarios.
//!
//! Usage:
//!   cargo run -p claimgate-cli -- run
//!   cargo run -p claimgate-cli -- run --config claimgate.toml --format json
//!   cargo run -p claimgate-cli -- validate --reference-codes data/reference_codes.json
//!   cargo run -p claimgate-cli -- scenarios eligibility

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use claimgate_audit::DecisionTrail;
use claimgate_contracts::{
    batch::{BatchOutcome, MissingPolicyMode},
    error::{ClaimGateError, ClaimGateResult},
    report::ReportFormat,
    verify::RecordSchema,
};
use claimgate_core::BatchRunner;
use claimgate_policy::{load::read_json_array, PolicyIndex, RunConfig};
use claimgate_ref_data::scenarios::{self, eligibility, sample_batch, unresolved_policy};
use claimgate_report::{persist, render, write_report};
use claimgate_verify::{
    build_validator,
    schemas::{patient_record_schema, policy_record_schema},
    ReferenceCodes, SchemaValidator,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// ClaimGate: rule-based insurance claim coverage evaluation.
#[derive(Parser)]
#[command(
    name = "claimgate",
    about = "Evaluate insurance claims against their policies",
    long_about = "Evaluates each claim against the coverage rules of the policy it references\n\
                  and writes a report with five check outcomes and a final decision per claim."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a batch of claims and write the decision report.
    Run(RunArgs),
    /// Check claim records and policies against their schemas only.
    Validate(InputArgs),
    /// Run the bundled reference scenarios.
    Scenarios {
        #[arg(value_enum, default_value_t = Scenario::All)]
        which: Scenario,
    },
}

/// Input locations shared by `run` and `validate`. Each flag overrides the
/// config file, which overrides the built-in defaults.
#[derive(Args, Debug, Default)]
struct InputArgs {
    /// TOML run configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Policy collection (JSON array).
    #[arg(long)]
    policies: Option<PathBuf>,
    /// Claim records collection (JSON array).
    #[arg(long)]
    records: Option<PathBuf>,
    /// Reference code table (JSON object).
    #[arg(long)]
    reference_codes: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    #[command(flatten)]
    inputs: InputArgs,
    /// Report output path.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Report format: csv or json.
    #[arg(long)]
    format: Option<ReportFormat>,
    /// What to do with a claim whose policy is unknown: abort or skip.
    #[arg(long)]
    on_missing_policy: Option<MissingPolicyMode>,
    /// Write the decision trail as JSON to this path.
    #[arg(long)]
    audit_log: Option<PathBuf>,
    /// Skip advisory record validation.
    #[arg(long)]
    no_validate: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Scenario {
    All,
    Eligibility,
    UnresolvedPolicy,
    SampleBatch,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=info (or debug) for per-claim output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run(args) => run(args),
        Command::Validate(args) => validate(args),
        Command::Scenarios { which } => run_scenarios(which),
    };

    if let Err(e) = result {
        eprintln!("claimgate: {}", e);
        std::process::exit(1);
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Layer the config file (if any) and then the input flags over the defaults.
fn resolve_inputs(args: &InputArgs) -> ClaimGateResult<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };

    if let Some(path) = &args.policies {
        config.inputs.policies = path.clone();
    }
    if let Some(path) = &args.records {
        config.inputs.records = path.clone();
    }
    if let Some(path) = &args.reference_codes {
        config.inputs.reference_codes = Some(path.clone());
    }

    Ok(config)
}

fn resolve_run(args: &RunArgs) -> ClaimGateResult<RunConfig> {
    let mut config = resolve_inputs(&args.inputs)?;

    if let Some(path) = &args.out {
        config.report.path = path.clone();
    }
    if let Some(format) = args.format {
        config.report.format = format;
    }
    if let Some(mode) = args.on_missing_policy {
        config.batch.on_missing_policy = mode;
    }
    if let Some(path) = &args.audit_log {
        config.audit.log_path = Some(path.clone());
    }
    if args.no_validate {
        config.batch.validate_records = false;
    }

    Ok(config)
}

fn load_reference_codes(config: &RunConfig) -> ClaimGateResult<Option<ReferenceCodes>> {
    config
        .inputs
        .reference_codes
        .as_deref()
        .map(ReferenceCodes::from_file)
        .transpose()
}

// ── run ───────────────────────────────────────────────────────────────────────

fn run(args: RunArgs) -> ClaimGateResult<()> {
    let config = resolve_run(&args)?;
    let (outcome, trail) = execute(&config)?;
    print_summary(&outcome, &trail, &config);
    Ok(())
}

/// Evaluate the batch `config` describes and write its outputs.
///
/// Both outputs are rendered before either is written, and the report is
/// written last. Any error therefore leaves no new report on disk.
fn execute(config: &RunConfig) -> ClaimGateResult<(BatchOutcome, DecisionTrail)> {
    let index = PolicyIndex::from_file(&config.inputs.policies)?;
    let records = read_json_array(&config.inputs.records, "claim records")?;
    let reference = load_reference_codes(config)?;

    let mut runner =
        BatchRunner::new(Box::new(index)).with_missing_policy_mode(config.batch.on_missing_policy);
    if config.batch.validate_records {
        let schema = patient_record_schema(reference.is_some());
        runner = runner.with_validator(Box::new(build_validator(reference)), schema);
    }

    let outcome = runner.run(&records)?;
    let trail = DecisionTrail::from_outcome(&outcome);

    let report = render(config.report.format, &outcome.rows)?;
    let trail_export = match config.audit.log_path.as_deref() {
        Some(path) => Some((path, render_trail(&trail)?)),
        None => None,
    };

    if let Some((path, bytes)) = &trail_export {
        export_trail(path, bytes)?;
    }
    write_report(&config.report.path, &report)?;

    Ok((outcome, trail))
}

fn render_trail(trail: &DecisionTrail) -> ClaimGateResult<Vec<u8>> {
    serde_json::to_vec_pretty(trail).map_err(|e| ClaimGateError::TrailExportFailed {
        reason: format!("failed to serialize decision trail: {e}"),
    })
}

fn export_trail(path: &Path, bytes: &[u8]) -> ClaimGateResult<()> {
    persist(path, bytes).map_err(|e| ClaimGateError::TrailExportFailed {
        reason: format!("failed to write decision trail '{}': {}", path.display(), e),
    })?;

    info!(path = %path.display(), "decision trail exported");
    Ok(())
}

fn print_summary(outcome: &BatchOutcome, trail: &DecisionTrail, config: &RunConfig) {
    println!("Batch {}", outcome.batch_id);
    println!("  Approved:           {}", outcome.approved_count());
    println!("  Routed for review:  {}", outcome.routed_count());
    if !outcome.skipped.is_empty() {
        println!("  Skipped:            {}", outcome.skipped.len());
        for claim in &outcome.skipped {
            println!("    {} (#{}): {}", claim.patient_id, claim.index, claim.reason);
        }
    }
    if !outcome.advisories.is_empty() {
        println!("  Advisories:         {}", outcome.advisories.len());
    }
    println!("  Decision digest:    {}", trail.digest);
    println!("  Report:             {}", config.report.path.display());
    if let Some(path) = &config.audit.log_path {
        println!("  Decision trail:     {}", path.display());
    }
}

// ── validate ──────────────────────────────────────────────────────────────────

fn validate(args: InputArgs) -> ClaimGateResult<()> {
    let config = resolve_inputs(&args)?;

    let policies = read_json_array(&config.inputs.policies, "policy collection")?;
    let records = read_json_array(&config.inputs.records, "claim records")?;
    let reference = load_reference_codes(&config)?;
    let with_reference = reference.is_some();
    let validator = build_validator(reference);

    let failed_policies = report_failures(
        &validator,
        "policy",
        "policy_id",
        &policies,
        &policy_record_schema(with_reference),
    )?;
    let failed_records = report_failures(
        &validator,
        "claim",
        "patient_id",
        &records,
        &patient_record_schema(with_reference),
    )?;

    println!(
        "Validated {} policies ({} failed) and {} claims ({} failed)",
        policies.len(),
        failed_policies,
        records.len(),
        failed_records
    );

    if failed_policies + failed_records > 0 {
        return Err(ClaimGateError::SchemaValidation {
            reason: format!(
                "{} of {} inputs failed validation",
                failed_policies + failed_records,
                policies.len() + records.len()
            ),
        });
    }
    Ok(())
}

/// Validate every item, print each failure, and return how many items failed.
fn report_failures(
    validator: &SchemaValidator,
    kind: &str,
    id_field: &str,
    items: &[Value],
    schema: &RecordSchema,
) -> ClaimGateResult<usize> {
    let reports = validator.validate_all(items, schema)?;
    let mut failed = 0;
    for (index, (item, report)) in items.iter().zip(&reports).enumerate() {
        if report.passed {
            continue;
        }
        failed += 1;
        let id = item.get(id_field).and_then(Value::as_str).unwrap_or("?");
        for failure in &report.failures {
            println!("{kind} #{index} ({id}) [{}] {}", failure.rule_id, failure.message);
        }
    }
    Ok(failed)
}

// ── scenarios ─────────────────────────────────────────────────────────────────

fn run_scenarios(which: Scenario) -> ClaimGateResult<()> {
    match which {
        Scenario::All => scenarios::run_all(),
        Scenario::Eligibility => eligibility::run_scenario(),
        Scenario::UnresolvedPolicy => unresolved_policy::run_scenario(),
        Scenario::SampleBatch => sample_batch::run_scenario(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
