//! Runner module: executes conversion tasks on a bounded worker pool.
//!
//! Workers claim task indices from a shared counter, so at most
//! `concurrency` conversions run at once. Results are collected over a
//! channel and put back in task order before the summary is returned.
//!
//! # Example
//!
//! ```ignore
//! use docbatch_core::runner;
//!
//! let summary = runner::run(tasks, 4, converter, cancel.clone()).await;
//! println!("{} of {} converted", summary.success_count, summary.total);
//! ```

mod pool;
mod types;

pub use pool::{run, WORKER_LOST_REASON};
pub use types::RunSummary;
