//! Units of work shared by the planner, converter and runner.
//!
//! A [`Task`] pairs one source document with the output path the planner
//! picked for it. Executing a task yields a [`TaskResult`], which keeps the
//! task alongside any warnings and an optional terminal error.

mod types;

pub use types::{SourceItem, Task, TaskResult};
