//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting one document.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Converter binary not found.
    #[error("converter not found: {name} (install pandoc or point --pandoc-path at it)")]
    NotFound { name: String },

    /// Output directory does not exist and could not be created.
    #[error("failed to create output directory {path}: {source}")]
    OutputDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The reference template could not be prepared.
    #[error("failed to prepare reference template: {reason}")]
    TemplateFailed { reason: String },

    /// The source could not be read or the rewritten copy not written.
    #[error("failed to preprocess {path}: {source}")]
    PreprocessFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A scratch artifact (directory, filter script) could not be written.
    #[error("failed to prepare {what}: {source}")]
    ScratchFailed {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The converter process could not be started.
    #[error("failed to launch converter {program}: {source}")]
    LaunchFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The converter ran and reported failure.
    #[error("conversion failed: {reason}")]
    ConversionFailed { reason: String },

    /// The run was cancelled while this conversion was pending or running.
    #[error("conversion cancelled")]
    Cancelled,

    /// I/O error while talking to the converter.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConverterError {
    /// Creates a conversion failed error.
    pub fn conversion_failed(reason: impl Into<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
        }
    }

    /// Creates a template failed error.
    pub fn template_failed(reason: impl Into<String>) -> Self {
        Self::TemplateFailed {
            reason: reason.into(),
        }
    }

    /// Whether this error aborts the whole run rather than a single task.
    pub fn is_fatal_for_run(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
