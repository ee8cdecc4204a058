//! Batch Markdown to docx conversion driven by pandoc.
//!
//! Inputs are discovered ([`discovery`]), given unique target paths
//! ([`planner`]), converted on a bounded worker pool ([`runner`]) by a
//! [`Converter`], and summarised in a [`RunReport`] ([`orchestrator`]).

pub mod cancel;
pub mod config;
pub mod converter;
pub mod discovery;
pub mod job;
pub mod orchestrator;
pub mod paths;
pub mod planner;
pub mod runner;
pub mod testing;

pub use cancel::CancelSignal;
pub use config::{
    load_config, load_config_from_env, load_config_from_str, resolve_jobs, validate_config,
    Config, ConfigError, RunConfig,
};
pub use converter::{
    probe_converter, Converter, ConverterConfig, ConverterError, ConverterInfo, PandocConverter,
};
pub use discovery::{discover, Discovery, DiscoveryFailure};
pub use job::{SourceItem, Task, TaskResult};
pub use orchestrator::{run, RunError, RunFailure, RunOptions, RunReport};
pub use planner::{plan_targets, Plan, TargetPlanner};
pub use runner::RunSummary;
