mod args;
mod logging;
mod report;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use docbatch_core::{
    load_config, load_config_from_env, validate_config, CancelSignal, RunOptions, RunReport,
};

use args::{Args, ReportFormat};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_cli_logger(args.verbose);
    let format = args.format;

    let report = match run(args).await {
        Ok(report) => report,
        Err(e) => {
            let message = format!("{:#}", e);
            match format {
                ReportFormat::Text => eprintln!("error: {}", message),
                ReportFormat::Ndjson => {
                    let _ = report::write_fatal(&message, &mut io::stdout().lock());
                }
            }
            return ExitCode::FAILURE;
        }
    };

    let written = match format {
        ReportFormat::Text => {
            report::write_text(&report, &mut io::stdout().lock(), &mut io::stderr().lock())
        }
        ReportFormat::Ndjson => report::write_ndjson(&report, &mut io::stdout().lock()),
    };
    if let Err(e) = written {
        eprintln!("error: failed to write report: {}", e);
        return ExitCode::FAILURE;
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(args: Args) -> Result<RunReport> {
    debug!("docbatch v{}", VERSION);

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => load_config_from_env().context("Failed to load config from environment")?,
    };
    let config = args.apply(config);
    validate_config(&config).context("Invalid configuration")?;

    let cancel = CancelSignal::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling pending conversions");
            on_interrupt.cancel();
        }
    });

    let options = RunOptions::from_config(args.inputs.iter(), &config).with_cancel(cancel);
    let report = docbatch_core::run(options, None).await?;
    Ok(report)
}
