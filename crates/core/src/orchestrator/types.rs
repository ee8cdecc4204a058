//! Types for the batch orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::converter::ConverterError;
use crate::job::TaskResult;

/// Errors that stop a run before any document is converted.
#[derive(Debug, Error)]
pub enum RunError {
    /// Nothing to convert.
    #[error("at least one input file or directory is required")]
    NoInputs,

    /// The working directory could not be determined.
    #[error("failed to read current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// The converter is unusable.
    #[error(transparent)]
    Converter(#[from] ConverterError),

    /// Discovery or planning stopped unexpectedly.
    #[error("failed to prepare tasks: {0}")]
    Planning(String),
}

/// An input or task that failed, with a readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFailure {
    /// Input path (discovery) or source document (conversion).
    pub source: PathBuf,
    pub reason: String,
}

/// Final report of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Tasks converted successfully.
    pub success_count: usize,
    /// Length of `failures`.
    pub failure_count: usize,
    /// Length of `warnings`.
    pub warning_count: usize,
    /// Per-task results in task order.
    pub results: Vec<TaskResult>,
    /// Targets of successful tasks, in task order.
    pub output_paths: Vec<PathBuf>,
    /// Resolved converter binary, when it was probed.
    pub converter_path: Option<PathBuf>,
    /// Converter version, when it could be read.
    pub converter_version: Option<String>,
    /// Discovery failures followed by task failures.
    pub failures: Vec<RunFailure>,
    /// Discovery, planning and task warnings, in that order.
    pub warnings: Vec<String>,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run.
    pub duration_ms: u64,
}

impl RunReport {
    /// Whether every input was converted.
    pub fn is_success(&self) -> bool {
        self.failure_count == 0
    }
}
