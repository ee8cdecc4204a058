//! Trait definitions for the converter module.

use async_trait::async_trait;

use crate::cancel::CancelSignal;
use crate::job::{Task, TaskResult};

/// Converts one source document into its target.
///
/// Implementations must be safe to call concurrently. Failures are reported
/// in the returned [`TaskResult`], never by panicking.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Converts `task.source_path` into `task.target_path`.
    ///
    /// When `cancel` fires the conversion is abandoned and reported as a
    /// failure.
    async fn convert(&self, task: &Task, cancel: &CancelSignal) -> TaskResult;
}
