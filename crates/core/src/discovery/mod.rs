//! Input discovery.
//!
//! Turns the raw input arguments (files and directories) into the list of
//! [`SourceItem`](crate::job::SourceItem)s the planner works on. Problems
//! with individual inputs never abort discovery: a missing input becomes a
//! [`DiscoveryFailure`], a non-Markdown file becomes a warning.

mod scan;
mod types;

pub use scan::{discover, discover_with_extension, SOURCE_EXTENSION};
pub use types::{Discovery, DiscoveryFailure};
