//! Batch run: discovery, planning, execution and report assembly.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::config::RunOptions;
use super::types::{RunError, RunFailure, RunReport};
use crate::config::resolve_jobs;
use crate::converter::{probe_converter, Converter, ConverterInfo, PandocConverter};
use crate::discovery::{discover, Discovery};
use crate::planner::{plan_targets, Plan};
use crate::runner::{self, RunSummary};

/// Warning added when the inputs contained nothing to convert.
pub const NOTHING_TO_CONVERT: &str = "no markdown files found to convert";

/// Runs one batch conversion.
///
/// When `converter` is `None` the configured pandoc binary is probed first
/// and a [`PandocConverter`] is built from `options.converter`; a missing
/// binary fails the run before any input is looked at.
pub async fn run(
    options: RunOptions,
    converter: Option<Arc<dyn Converter>>,
) -> Result<RunReport, RunError> {
    if options.inputs.is_empty() {
        return Err(RunError::NoInputs);
    }

    let started_at = Utc::now();
    let started = Instant::now();

    let cwd = match options
        .cwd
        .clone()
        .filter(|c| !c.as_os_str().to_string_lossy().trim().is_empty())
    {
        Some(cwd) => cwd,
        None => std::env::current_dir().map_err(RunError::CurrentDir)?,
    };
    let jobs = resolve_jobs(options.jobs);

    let (converter, info): (Arc<dyn Converter>, Option<ConverterInfo>) = match converter {
        Some(converter) => (converter, None),
        None => {
            let info = probe_converter(&options.converter.pandoc_path).await?;
            info!(
                "Using converter {:?} (version {})",
                info.binary_path,
                info.version.as_deref().unwrap_or("unknown")
            );
            let converter = PandocConverter::new(options.converter.clone())
                .with_binary(info.binary_path.clone());
            (Arc::new(converter), Some(info))
        }
    };

    let (discovery, plan) = prepare(&options, cwd).await?;
    info!(
        "Planned {} conversions ({} discovery failures) with {} workers",
        plan.tasks.len(),
        discovery.failures.len(),
        jobs
    );

    let planned = plan.tasks.len();
    let summary = runner::run(plan.tasks, jobs, converter, options.cancel.clone()).await;

    let mut report = assemble(discovery, plan.warnings, summary, planned, info, started_at);
    report.duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    if report.failure_count > 0 {
        warn!(
            "Run finished with {} failures ({} succeeded)",
            report.failure_count, report.success_count
        );
    } else {
        info!("Run finished: {} documents converted", report.success_count);
    }
    Ok(report)
}

/// Discovers the inputs and plans their targets off the async runtime.
async fn prepare(options: &RunOptions, cwd: PathBuf) -> Result<(Discovery, Plan), RunError> {
    let inputs = options.inputs.clone();
    let output = options.output.clone();
    let extension = options.converter.output_extension.clone();

    tokio::task::spawn_blocking(move || {
        let discovery = discover(&inputs, &cwd);
        debug!(
            "Discovered {} documents, {} warnings",
            discovery.items.len(),
            discovery.warnings.len()
        );
        let plan = plan_targets(&discovery.items, output.as_deref(), &cwd, &extension);
        (discovery, plan)
    })
    .await
    .map_err(|e| RunError::Planning(e.to_string()))
}

/// Merges discovery, planning and execution outcomes into the report.
fn assemble(
    discovery: Discovery,
    plan_warnings: Vec<String>,
    summary: RunSummary,
    planned: usize,
    info: Option<ConverterInfo>,
    started_at: DateTime<Utc>,
) -> RunReport {
    let no_discovery_failures = discovery.failures.is_empty();

    let mut warnings = discovery.warnings;
    warnings.extend(plan_warnings);

    let mut failures: Vec<RunFailure> = discovery
        .failures
        .into_iter()
        .map(|f| RunFailure {
            source: f.input,
            reason: f.reason,
        })
        .collect();

    let mut output_paths = Vec::new();
    for result in &summary.results {
        warnings.extend(result.warnings.iter().cloned());
        match &result.error {
            Some(reason) => failures.push(RunFailure {
                source: result.task.source_path.clone(),
                reason: reason.clone(),
            }),
            None => output_paths.push(result.task.target_path.clone()),
        }
    }

    if planned == 0 && no_discovery_failures {
        warnings.push(NOTHING_TO_CONVERT.to_string());
    }

    let (converter_path, converter_version) = match info {
        Some(info) => (Some(info.binary_path), info.version),
        None => (None, None),
    };

    RunReport {
        success_count: summary.success_count,
        failure_count: failures.len(),
        warning_count: warnings.len(),
        results: summary.results,
        output_paths,
        converter_path,
        converter_version,
        failures,
        warnings,
        started_at,
        duration_ms: 0,
    }
}
