//! Types for the discovery module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::job::SourceItem;

/// An input that could not be used at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryFailure {
    /// Absolute path of the input.
    pub input: PathBuf,
    /// Why the input was rejected.
    pub reason: String,
}

/// Everything discovery found for one set of inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Documents to convert, sorted by source path.
    pub items: Vec<SourceItem>,
    /// Non-fatal notes such as ignored files, sorted.
    pub warnings: Vec<String>,
    /// Inputs that do not exist or cannot be read, sorted by input.
    pub failures: Vec<DiscoveryFailure>,
}
