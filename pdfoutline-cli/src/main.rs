//! pdfoutline - Derive a heading outline from PDF documents.
//!
//! CLI front end: parses arguments, sets up logging, runs the batch and
//! reports the results.

mod cli;

use clap::Parser;
use std::process;
use tracing::debug;

use crate::cli::Cli;
use pdfoutline::batch::{self, BatchReport};
use pdfoutline::config::Config;
use pdfoutline::error::PdfOutlineError;
use pdfoutline::output::{OutputFormatter, display_report};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(report) if report.is_success() => {}
        Ok(_) => process::exit(1),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(err.exit_code());
        }
    }
}

/// Install the log subscriber; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<BatchReport, PdfOutlineError> {
    cli.validate()?;

    let all_inputs = cli.get_all_inputs().await?;
    debug!(inputs = all_inputs.len(), "Collected inputs");

    let config = cli.to_config_with_inputs(all_inputs)?;

    let formatter = OutputFormatter::from_config(&config);
    print_header(&formatter, &config);

    let report = batch::run(&config).await?;

    if config.should_print() {
        display_report(&formatter, &report);
    }

    if config.dry_run {
        formatter.info("Run without --dry-run to write the outlines");
    }

    Ok(report)
}

fn print_header(formatter: &OutputFormatter, config: &Config) {
    formatter.debug(&format!("{} v{}", pdfoutline::NAME, pdfoutline::VERSION));
    formatter.detail("Output directory", &config.output_dir.display().to_string());
    formatter.detail("Jobs", &config.effective_jobs().to_string());
    formatter.detail(
        "Header band",
        &format!("{} pt", config.options.header_band),
    );
}
