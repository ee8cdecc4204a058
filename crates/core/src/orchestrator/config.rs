//! Options for one batch run.

use std::path::PathBuf;

use crate::cancel::CancelSignal;
use crate::config::Config;
use crate::converter::ConverterConfig;

/// Everything a batch run needs besides the converter itself.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Files and directories to convert, as given by the user.
    pub inputs: Vec<String>,
    /// Output file (single input) or directory. Defaults to `cwd`.
    pub output: Option<PathBuf>,
    /// Parallel conversions. 0 means one per available CPU.
    pub jobs: usize,
    /// Directory relative inputs and outputs are resolved against.
    /// Defaults to the process working directory.
    pub cwd: Option<PathBuf>,
    /// Settings for the pandoc converter.
    pub converter: ConverterConfig,
    /// Cancels in-flight and pending conversions when triggered.
    pub cancel: CancelSignal,
}

impl RunOptions {
    /// Creates options for `inputs` with default settings.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Creates options for `inputs` using loaded configuration.
    pub fn from_config<I, S>(inputs: I, config: &Config) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            output: config.run.output.clone(),
            jobs: config.run.jobs,
            converter: config.converter.clone(),
            ..Self::new(inputs)
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_converter(mut self, converter: ConverterConfig) -> Self {
        self.converter = converter;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }
}
