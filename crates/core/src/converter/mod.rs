//! Converter module for turning Markdown documents into docx.
//!
//! This module provides the `Converter` trait and a pandoc-backed
//! implementation. One call converts one [`Task`](crate::job::Task):
//!
//! - the target's parent directory is created;
//! - the reference template is the configured one, or a built-in docx
//!   written to a per-call scratch directory;
//! - blank lines outside fenced code are rewritten into explicit empty
//!   paragraphs (on a scratch copy, never the original);
//! - bold text is optionally routed through a Lua filter that applies the
//!   `KeywordHighlight` character style;
//! - pandoc's stderr is classified into warnings and failures, tolerating
//!   missing images when the output was still written.
//!
//! # Example
//!
//! ```ignore
//! use docbatch_core::cancel::CancelSignal;
//! use docbatch_core::converter::{probe_converter, Converter, ConverterConfig, PandocConverter};
//! use docbatch_core::job::Task;
//!
//! let config = ConverterConfig::default();
//! let info = probe_converter(&config.pandoc_path).await?;
//! let converter = PandocConverter::new(config).with_binary(info.binary_path);
//!
//! let task = Task::new("/docs/guide.md", "/out/guide_a1B2c3.docx");
//! let result = converter.convert(&task, &CancelSignal::new()).await;
//! for warning in &result.warnings {
//!     println!("warning: {}", warning);
//! }
//! ```

mod classify;
mod command;
mod config;
mod error;
mod filter;
mod pandoc;
mod preprocess;
mod probe;
mod scratch;
mod template;
mod traits;

pub use classify::{
    classify, collect_warnings, is_missing_resource_only, looks_like_missing_resource, Outcome,
    MISSING_RESOURCES_TOLERATED, MISSING_RESOURCE_PATTERNS,
};
pub use command::{CommandOutput, CommandRunner, Invocation, ProcessRunner};
pub use config::ConverterConfig;
pub use error::ConverterError;
pub use filter::{highlight_filter, KEYWORD_STYLE};
pub use pandoc::PandocConverter;
pub use preprocess::{preserve_blank_lines, PARAGRAPH_BREAK};
pub use probe::{extract_version, probe_converter, resolve_binary, ConverterInfo};
pub use template::default_template;
pub use traits::Converter;
