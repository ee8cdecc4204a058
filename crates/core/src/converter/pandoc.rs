//! Pandoc-based converter implementation.

use async_trait::async_trait;
use std::borrow::Cow;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::classify::classify;
use super::command::{CommandRunner, Invocation, ProcessRunner};
use super::config::ConverterConfig;
use super::error::ConverterError;
use super::filter::{highlight_filter, FILTER_FILE_NAME};
use super::preprocess::preserve_blank_lines;
use super::scratch::Scratch;
use super::template::{default_template, TEMPLATE_FILE_NAME};
use super::traits::Converter;
use crate::cancel::CancelSignal;
use crate::job::{Task, TaskResult};

const PREPROCESSED_FILE_NAME: &str = "source.md";

/// Converts Markdown to docx by running pandoc.
pub struct PandocConverter {
    config: ConverterConfig,
    binary: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl PandocConverter {
    /// Creates a converter that spawns `config.pandoc_path`.
    pub fn new(config: ConverterConfig) -> Self {
        Self::with_runner(config, Arc::new(ProcessRunner))
    }

    /// Creates a converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    /// Creates a converter that hands its invocations to `runner`.
    pub fn with_runner(config: ConverterConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let binary = config.pandoc_path.clone();
        Self {
            config,
            binary,
            runner,
        }
    }

    /// Uses an already resolved binary path (see [`super::probe_converter`]).
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Builds the pandoc command line.
    fn build_args(
        &self,
        source: &Path,
        target: &Path,
        reference: &Path,
        filter: Option<&Path>,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            source.into(),
            "-f".into(),
            self.config.input_format.clone().into(),
            "-t".into(),
            self.config.output_format.clone().into(),
            "-o".into(),
            target.into(),
        ];

        let mut reference_arg = OsString::from("--reference-doc=");
        reference_arg.push(reference);
        args.push(reference_arg);

        if let Some(filter) = filter {
            let mut filter_arg = OsString::from("--lua-filter=");
            filter_arg.push(filter);
            args.push(filter_arg);
        }

        args
    }

    /// Returns the source pandoc should read: the original file, or a
    /// rewritten copy in the scratch directory.
    async fn effective_source(
        &self,
        source: &Path,
        scratch: &mut Scratch,
    ) -> Result<PathBuf, ConverterError> {
        let bytes = tokio::fs::read(source)
            .await
            .map_err(|e| ConverterError::PreprocessFailed {
                path: source.to_path_buf(),
                source: e,
            })?;

        // Non UTF-8 input is handed to pandoc untouched.
        let Ok(text) = std::str::from_utf8(&bytes) else {
            debug!("{:?} is not valid UTF-8, skipping preprocessing", source);
            return Ok(source.to_path_buf());
        };

        match preserve_blank_lines(text) {
            Cow::Borrowed(_) => Ok(source.to_path_buf()),
            Cow::Owned(rewritten) => {
                scratch.write("preprocessed source", PREPROCESSED_FILE_NAME, rewritten.as_bytes())
            }
        }
    }

    async fn run_conversion(
        &self,
        task: &Task,
        cancel: &CancelSignal,
    ) -> Result<Vec<String>, ConverterError> {
        if cancel.is_cancelled() {
            return Err(ConverterError::Cancelled);
        }

        if let Some(parent) = task.target_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ConverterError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                }
            })?;
        }

        let mut scratch = Scratch::new(&self.config.temp_dir);

        let reference = match &self.config.reference_doc {
            Some(path) => path.clone(),
            None => scratch.write("reference template", TEMPLATE_FILE_NAME, default_template()?)?,
        };

        let source = self.effective_source(&task.source_path, &mut scratch).await?;

        let filter = if self.config.highlight_keywords {
            Some(scratch.write(
                "highlight filter",
                FILTER_FILE_NAME,
                highlight_filter().as_bytes(),
            )?)
        } else {
            None
        };

        let invocation = Invocation {
            program: self.binary.clone(),
            args: self.build_args(&source, &task.target_path, &reference, filter.as_deref()),
            mirror_stdout: self.config.verbose,
        };

        let output = self.runner.run(&invocation, cancel).await?;
        let target_exists = tokio::fs::metadata(&task.target_path).await.is_ok();

        let outcome = classify(&output, target_exists);
        match outcome.error {
            None => Ok(outcome.warnings),
            Some(err) => Err(err),
        }
        // `scratch` is dropped here, removing the template, filter and copy.
    }
}

#[async_trait]
impl Converter for PandocConverter {
    fn name(&self) -> &str {
        "pandoc"
    }

    async fn convert(&self, task: &Task, cancel: &CancelSignal) -> TaskResult {
        debug!("Converting {:?} -> {:?}", task.source_path, task.target_path);

        match self.run_conversion(task, cancel).await {
            Ok(warnings) => {
                info!("Converted {:?}", task.target_path);
                TaskResult::success(task.clone()).with_warnings(warnings)
            }
            Err(e) => {
                warn!("Failed to convert {:?}: {}", task.source_path, e);
                TaskResult::failure(task.clone(), e.to_string())
            }
        }
    }
}
