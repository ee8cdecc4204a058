use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::converter::ConverterConfig;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// Batch run configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RunConfig {
    /// Number of parallel conversions. 0 means one per available CPU.
    #[serde(default)]
    pub jobs: usize,
    /// Output file or directory. Defaults to the working directory.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl RunConfig {
    /// Resolves `jobs`, mapping 0 to the number of available CPUs.
    pub fn effective_jobs(&self) -> usize {
        resolve_jobs(self.jobs)
    }
}

/// Maps a requested worker count to a usable one (at least 1).
pub fn resolve_jobs(jobs: usize) -> usize {
    if jobs > 0 {
        return jobs;
    }
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_jobs() {
        assert_eq!(resolve_jobs(3), 3);
        assert!(resolve_jobs(0) >= 1);
        assert_eq!(RunConfig { jobs: 2, output: None }.effective_jobs(), 2);
    }
}
