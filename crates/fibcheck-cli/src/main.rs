use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use fibcheck_core::{verify_file, Outcome, DEFAULT_LOG_PATH};

/// Check the Fibonacci values a fibdrv client logged to `./out`.
///
/// Prints nothing when every value is correct. On the first wrong value,
/// prints the index, the reported value and the expected value, then stops.
#[derive(Parser)]
#[command(name = "fibcheck")]
#[command(version, about, long_about = None)]
struct Cli {}

fn main() -> Result<ExitCode> {
    // Diagnostics go to stderr; stdout carries only the failure report.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let _cli = Cli::parse();

    let outcome = verify_file(DEFAULT_LOG_PATH)
        .with_context(|| format!("verifying log '{}'", DEFAULT_LOG_PATH))?;

    match outcome {
        Outcome::Succeeded { .. } => Ok(ExitCode::SUCCESS),
        Outcome::Failed { mismatch } => {
            let mut stdout = io::stdout().lock();
            mismatch
                .write_report(&mut stdout)
                .context("writing failure report")?;
            stdout.flush().context("flushing stdout")?;
            Ok(ExitCode::FAILURE)
        }
    }
}
