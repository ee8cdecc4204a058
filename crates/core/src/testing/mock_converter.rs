//! Mock converter for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::cancel::CancelSignal;
use crate::converter::{Converter, ConverterError};
use crate::job::{Task, TaskResult};

type DelayFn = dyn Fn(&Task) -> Duration + Send + Sync;

/// Mock implementation of the Converter trait.
///
/// Provides controllable behavior for testing:
/// - Record every task it is asked to convert
/// - Fail or warn for sources with a given file name
/// - Simulate conversion time and track how many calls overlap
/// - Optionally write a placeholder file at each successful target
///
/// # Example
///
/// ```rust,ignore
/// use docbatch_core::testing::MockConverter;
///
/// let converter = MockConverter::new()
///     .fail_on("bad.md", "conversion failed: parse error")
///     .with_delay(Duration::from_millis(10));
///
/// let summary = runner::run(tasks, 4, Arc::new(converter), cancel).await;
/// ```
pub struct MockConverter {
    /// Tasks in the order calls started.
    calls: Arc<RwLock<Vec<Task>>>,
    /// Failure reasons keyed by source file name.
    failures: HashMap<String, String>,
    /// Warnings keyed by source file name.
    warnings: HashMap<String, Vec<String>>,
    /// Simulated conversion time.
    delay: Option<Arc<DelayFn>>,
    /// Write a placeholder at the target of successful conversions.
    write_outputs: bool,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockConverter")
            .field("failures", &self.failures)
            .field("warnings", &self.warnings)
            .field("write_outputs", &self.write_outputs)
            .finish_non_exhaustive()
    }
}

impl MockConverter {
    /// Create a new mock converter that succeeds instantly.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(RwLock::new(Vec::new())),
            failures: HashMap::new(),
            warnings: HashMap::new(),
            delay: None,
            write_outputs: false,
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }

    /// Fail conversions of sources named `file_name` with `reason`.
    pub fn fail_on(mut self, file_name: &str, reason: &str) -> Self {
        self.failures
            .insert(file_name.to_string(), reason.to_string());
        self
    }

    /// Attach `warning` to conversions of sources named `file_name`.
    pub fn warn_on(mut self, file_name: &str, warning: &str) -> Self {
        self.warnings
            .entry(file_name.to_string())
            .or_default()
            .push(warning.to_string());
        self
    }

    /// Make every conversion take `delay`.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.with_delay_fn(move |_: &Task| delay)
    }

    /// Make each conversion take as long as `delay` says.
    pub fn with_delay_fn<F>(mut self, delay: F) -> Self
    where
        F: Fn(&Task) -> Duration + Send + Sync + 'static,
    {
        self.delay = Some(Arc::new(delay));
        self
    }

    /// Write a placeholder file at every successful target.
    pub fn writing_outputs(mut self) -> Self {
        self.write_outputs = true;
        self
    }

    /// Tasks passed to `convert`, in call order.
    pub async fn recorded_calls(&self) -> Vec<Task> {
        self.calls.read().await.clone()
    }

    /// Get the number of conversions attempted.
    pub async fn conversion_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Highest number of conversions observed running at the same time.
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    fn file_name(task: &Task) -> String {
        task.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    async fn simulate(&self, task: &Task, cancel: &CancelSignal) -> Result<(), ConverterError> {
        let Some(delay) = &self.delay else {
            return Ok(());
        };
        let delay = delay(task);
        tokio::select! {
            _ = tokio::time::sleep(delay) => Ok(()),
            _ = cancel.cancelled() => Err(ConverterError::Cancelled),
        }
    }
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(&self, task: &Task, cancel: &CancelSignal) -> TaskResult {
        self.calls.write().await.push(task.clone());

        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        let simulated = self.simulate(task, cancel).await;
        self.active.fetch_sub(1, Ordering::SeqCst);

        let name = Self::file_name(task);
        let warnings = self.warnings.get(&name).cloned().unwrap_or_default();

        if let Err(e) = simulated {
            return TaskResult::failure(task.clone(), e.to_string()).with_warnings(warnings);
        }
        if let Some(reason) = self.failures.get(&name) {
            return TaskResult::failure(task.clone(), reason.clone()).with_warnings(warnings);
        }

        if self.write_outputs {
            if let Some(parent) = task.target_path.parent() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    return TaskResult::failure(
                        task.clone(),
                        ConverterError::OutputDirectoryFailed {
                            path: parent.to_path_buf(),
                            source: e,
                        }
                        .to_string(),
                    );
                }
            }
            if let Err(e) = tokio::fs::write(&task.target_path, b"mock docx").await {
                return TaskResult::failure(task.clone(), ConverterError::Io(e).to_string());
            }
        }

        TaskResult::success(task.clone()).with_warnings(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_converter_records_and_scripts() {
        let converter = MockConverter::new()
            .fail_on("bad.md", "conversion failed: nope")
            .warn_on("a.md", "[WARNING] heads up");
        let cancel = CancelSignal::new();

        let ok = converter
            .convert(&Task::new("/d/a.md", "/o/a.docx"), &cancel)
            .await;
        assert!(ok.is_success());
        assert_eq!(ok.warnings, vec!["[WARNING] heads up".to_string()]);

        let bad = converter
            .convert(&Task::new("/d/bad.md", "/o/bad.docx"), &cancel)
            .await;
        assert_eq!(bad.error.as_deref(), Some("conversion failed: nope"));

        assert_eq!(converter.conversion_count().await, 2);
        assert_eq!(converter.max_active(), 1);
    }

    #[tokio::test]
    async fn test_mock_converter_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("a.docx");
        let converter = MockConverter::new().writing_outputs();

        let result = converter
            .convert(&Task::new("/d/a.md", &target), &CancelSignal::new())
            .await;
        assert!(result.is_success());
        assert!(target.exists());
    }

    #[tokio::test]
    async fn test_mock_converter_honours_cancellation() {
        let converter = MockConverter::new().with_delay(Duration::from_secs(30));
        let cancel = CancelSignal::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = converter
            .convert(&Task::new("/d/a.md", "/o/a.docx"), &cancel)
            .await;
        assert_eq!(result.error.as_deref(), Some("conversion cancelled"));
    }
}
