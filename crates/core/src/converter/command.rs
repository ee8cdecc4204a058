//! Subprocess seam for running the external converter.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::error::ConverterError;
use crate::cancel::CancelSignal;

/// A fully built converter command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Binary to execute.
    pub program: PathBuf,
    /// Arguments, in order.
    pub args: Vec<OsString>,
    /// Forward the child's standard output to ours instead of discarding it.
    pub mirror_stdout: bool,
}

impl Invocation {
    /// Returns the value of the first `--<name>=<value>` argument.
    pub fn flag_value(&self, name: &str) -> Option<PathBuf> {
        let prefix = format!("--{}=", name);
        self.args.iter().find_map(|arg| {
            arg.to_str()
                .and_then(|s| s.strip_prefix(prefix.as_str()))
                .map(PathBuf::from)
        })
    }
}

/// What the converter process left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, when the process exited normally.
    pub code: Option<i32>,
    /// Captured standard error.
    pub stderr: String,
    /// The platform's description of the exit status (e.g. "exit status: 1").
    pub status_text: String,
}

impl CommandOutput {
    /// A clean exit with nothing on stderr.
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
            stderr: String::new(),
            status_text: "exit status: 0".to_string(),
        }
    }

    /// An exit with the given code and stderr text.
    pub fn exited(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: code == 0,
            code: Some(code),
            stderr: stderr.into(),
            status_text: format!("exit status: {}", code),
        }
    }
}

/// Runs converter invocations.
///
/// The production implementation spawns a real process; tests substitute a
/// scripted runner so the adapter can be exercised without pandoc.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `invocation` to completion, or until `cancel` fires.
    async fn run(
        &self,
        invocation: &Invocation,
        cancel: &CancelSignal,
    ) -> Result<CommandOutput, ConverterError>;
}

/// Spawns the converter with tokio's process support.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        cancel: &CancelSignal,
    ) -> Result<CommandOutput, ConverterError> {
        if cancel.is_cancelled() {
            return Err(ConverterError::Cancelled);
        }

        let stdout = if invocation.mirror_stdout {
            Stdio::inherit()
        } else {
            Stdio::null()
        };

        debug!(
            "Running {:?} with {} arguments",
            invocation.program,
            invocation.args.len()
        );

        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConverterError::NotFound {
                        name: invocation.program.display().to_string(),
                    }
                } else {
                    ConverterError::LaunchFailed {
                        program: invocation.program.clone(),
                        source: e,
                    }
                }
            })?;

        // Dropping the losing branch drops the child, and kill_on_drop
        // terminates it.
        tokio::select! {
            output = child.wait_with_output() => {
                let output = output?;
                Ok(CommandOutput {
                    success: output.status.success(),
                    code: output.status.code(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    status_text: output.status.to_string(),
                })
            }
            _ = cancel.cancelled() => Err(ConverterError::Cancelled),
        }
    }
}
