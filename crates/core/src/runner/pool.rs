//! Bounded worker pool.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

use super::types::RunSummary;
use crate::cancel::CancelSignal;
use crate::converter::{Converter, ConverterError};
use crate::job::{Task, TaskResult};

/// Reason recorded for tasks whose worker died before reporting.
pub const WORKER_LOST_REASON: &str = "conversion worker terminated unexpectedly";

/// Runs `converter` over `tasks` with at most `concurrency` conversions in
/// flight.
///
/// `concurrency` is clamped to at least 1. Result `i` always belongs to
/// `tasks[i]`. Tasks claimed after `cancel` fires fail without reaching the
/// converter.
pub async fn run(
    tasks: Vec<Task>,
    concurrency: usize,
    converter: Arc<dyn Converter>,
    cancel: CancelSignal,
) -> RunSummary {
    if tasks.is_empty() {
        return RunSummary::default();
    }
    let concurrency = concurrency.max(1);
    debug!(
        "Running {} tasks with {} workers using {}",
        tasks.len(),
        concurrency,
        converter.name()
    );

    let tasks = Arc::new(tasks);
    let next = Arc::new(AtomicUsize::new(0));
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<(usize, TaskResult)>();

    let mut workers = Vec::with_capacity(concurrency);
    for worker_id in 0..concurrency {
        let tasks = Arc::clone(&tasks);
        let next = Arc::clone(&next);
        let converter = Arc::clone(&converter);
        let cancel = cancel.clone();
        let result_tx = result_tx.clone();

        workers.push(tokio::spawn(async move {
            loop {
                let idx = next.fetch_add(1, Ordering::Relaxed);
                let Some(task) = tasks.get(idx) else {
                    break;
                };

                let result = if cancel.is_cancelled() {
                    TaskResult::failure(task.clone(), ConverterError::Cancelled.to_string())
                } else {
                    converter.convert(task, &cancel).await
                };

                if result_tx.send((idx, result)).is_err() {
                    break;
                }
            }
            debug!("Worker {} finished", worker_id);
        }));
    }
    // Only workers hold senders now, so the channel closes when they exit.
    drop(result_tx);

    let mut slots: Vec<Option<TaskResult>> = vec![None; tasks.len()];
    while let Some((idx, result)) = result_rx.recv().await {
        slots[idx] = Some(result);
    }

    for worker in workers {
        if let Err(e) = worker.await {
            error!("Conversion worker failed: {}", e);
        }
    }

    let results = slots
        .into_iter()
        .zip(tasks.iter())
        .map(|(slot, task)| {
            slot.unwrap_or_else(|| TaskResult::failure(task.clone(), WORKER_LOST_REASON))
        })
        .collect();

    RunSummary::from_results(results)
}
