//! Command-line arguments.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use docbatch_core::Config;

/// How the run report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// `warn:`/`fail:` lines on stderr and a summary line on stdout.
    Text,
    /// One JSON event per line on stdout.
    Ndjson,
}

#[derive(Debug, Parser)]
#[command(name = "docbatch", version)]
#[command(about = "Batch convert Markdown files and directories to docx with pandoc")]
pub struct Args {
    /// Markdown files or directories to convert.
    #[arg(value_name = "INPUTS")]
    pub inputs: Vec<String>,

    /// Output directory, or output file when converting a single input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Parallel conversions (0 = one per CPU).
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Reference docx providing styles (defaults to a built-in template).
    #[arg(long)]
    pub reference_doc: Option<PathBuf>,

    /// Path or name of the pandoc executable.
    #[arg(long)]
    pub pandoc_path: Option<PathBuf>,

    /// Do not apply the KeywordHighlight style to bold text.
    #[arg(long)]
    pub no_highlight: bool,

    /// Configuration file (TOML). `DOCBATCH_*` environment variables still apply.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Enable verbose output (debug logs and pandoc's stdout).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Overlays the flags that were given on top of `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(output) = &self.output {
            config.run.output = Some(output.clone());
        }
        if let Some(jobs) = self.jobs {
            config.run.jobs = jobs;
        }
        if let Some(reference) = &self.reference_doc {
            config.converter.reference_doc = Some(reference.clone());
        }
        if let Some(pandoc) = &self.pandoc_path {
            config.converter.pandoc_path = pandoc.clone();
        }
        if self.no_highlight {
            config.converter.highlight_keywords = false;
        }
        if self.verbose {
            config.converter.verbose = true;
        }
        config
    }
}
