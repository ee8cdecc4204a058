//! Types for the job module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A discovered input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    /// Absolute path of the document.
    pub source_path: PathBuf,
    /// Whether the document was found by scanning a directory input.
    pub from_dir: bool,
    /// Root of the directory scan (only set when `from_dir`).
    pub base_dir: Option<PathBuf>,
    /// Path relative to `base_dir` (only set when `from_dir`).
    pub rel_path: Option<PathBuf>,
}

impl SourceItem {
    /// Creates an item for a document passed directly as an input.
    pub fn file(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            from_dir: false,
            base_dir: None,
            rel_path: None,
        }
    }

    /// Creates an item for a document found under `base_dir`.
    pub fn scanned(
        source_path: impl Into<PathBuf>,
        base_dir: impl Into<PathBuf>,
        rel_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            from_dir: true,
            base_dir: Some(base_dir.into()),
            rel_path: Some(rel_path.into()),
        }
    }
}

/// One source → target conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    /// Absolute path of the source document.
    pub source_path: PathBuf,
    /// Absolute path the converted document is written to.
    pub target_path: PathBuf,
}

impl Task {
    pub fn new(source_path: impl Into<PathBuf>, target_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            target_path: target_path.into(),
        }
    }
}

/// Outcome of executing one [`Task`].
///
/// A result is a failure exactly when `error` is set. Warnings may be
/// attached to successes and failures alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    /// The task this result belongs to.
    pub task: Task,
    /// Non-fatal diagnostics, in the order they were observed.
    pub warnings: Vec<String>,
    /// Human-readable reason the task failed.
    pub error: Option<String>,
}

impl TaskResult {
    /// Creates a successful result with no warnings.
    pub fn success(task: Task) -> Self {
        Self {
            task,
            warnings: Vec::new(),
            error: None,
        }
    }

    /// Creates a failed result.
    pub fn failure(task: Task, error: impl Into<String>) -> Self {
        Self {
            task,
            warnings: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Appends warnings, keeping their order.
    pub fn with_warnings<I, S>(mut self, warnings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.warnings.extend(warnings.into_iter().map(Into::into));
        self
    }

    /// Whether the task succeeded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn source_path(&self) -> &Path {
        &self.task.source_path
    }

    pub fn target_path(&self) -> &Path {
        &self.task.target_path
    }
}
