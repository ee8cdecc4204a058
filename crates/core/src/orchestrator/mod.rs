//! Batch orchestrator.
//!
//! Drives one invocation end to end:
//! - **Probe**: the converter binary must exist before anything else happens
//! - **Discovery + planning**: inputs become tasks with unique targets
//! - **Execution**: tasks run on the bounded worker pool
//! - **Report**: warnings and failures from every stage are merged in order

mod batch;
mod config;
mod types;

pub use batch::{run, NOTHING_TO_CONVERT};
pub use config::RunOptions;
pub use types::{RunError, RunFailure, RunReport};
