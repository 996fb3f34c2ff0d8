//! CLI argument parsing for pdfoutline.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.

use clap::Parser;
use std::path::PathBuf;

use pdfoutline::config::{Config, OutlineOptions, OverwriteMode};
use pdfoutline::error::{PdfOutlineError, Result};
use pdfoutline::outline::HEADER_BAND_LIMIT;

/// Derive a heading outline from PDF documents.
///
/// pdfoutline reads the text of each PDF page by page and writes a JSON
/// file holding the document title and its H1/H2/H3 headings with their
/// page numbers. Running headers, page numbers and footers are skipped.
#[derive(Parser, Debug)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Derive a heading outline from PDF documents", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files, directories or glob patterns
    ///
    /// Directories are scanned for files with a .pdf extension (any case).
    /// Documents are processed in sorted order.
    ///
    /// Examples:
    ///   pdfoutline input/ -o output/
    ///   pdfoutline "rfps/*.pdf" -o outlines/
    #[arg(value_name = "INPUT", required_unless_present = "input_list")]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving one JSON outline per document
    ///
    /// Each outline is named after its PDF: report.pdf becomes report.json.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Descend into sub-directories of directory inputs
    ///
    /// The sub-directory layout is mirrored under the output directory.
    #[arg(short, long)]
    pub recursive: bool,

    /// Dry run - list the outlines that would be written
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show per-document results and log headings
    #[arg(short, long)]
    pub verbose: bool,

    /// Overwrite existing outlines (default)
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite an existing outline
    ///
    /// A document whose outline already exists fails with an error.
    #[arg(long, conflicts_with_all = ["force", "skip_existing"])]
    pub no_clobber: bool,

    /// Leave existing outlines untouched and skip their documents
    #[arg(long, conflicts_with = "force")]
    pub skip_existing: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Continue processing even if some PDFs fail
    ///
    /// By default, pdfoutline stops on the first error.
    /// With this flag, failing documents are reported and skipped.
    #[arg(long)]
    pub continue_on_error: bool,

    /// Read input paths from a file (one path per line)
    ///
    /// Lines starting with '#' and blank lines are ignored.
    /// Use '-' to read from stdin. Can be combined with direct inputs.
    #[arg(long, value_name = "FILE")]
    pub input_list: Option<PathBuf>,

    /// Number of documents processed concurrently
    ///
    /// Default is number of CPU cores. Use 1 for sequential processing.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Write single-line JSON instead of indented JSON
    #[arg(long)]
    pub compact: bool,

    /// Height of the running-header band, in points from the top of the page
    ///
    /// Text blocks starting inside this band are never headings.
    #[arg(long, value_name = "PTS", default_value_t = HEADER_BAND_LIMIT)]
    pub header_band: f32,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn to_config(&self) -> Result<Config> {
        self.to_config_with_inputs(self.inputs.clone())
    }

    /// Convert CLI arguments into a validated Config over `inputs`, usually
    /// the result of [`Cli::get_all_inputs`].
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn to_config_with_inputs(&self, inputs: Vec<PathBuf>) -> Result<Config> {
        let overwrite_mode = if self.no_clobber {
            OverwriteMode::NoClobber
        } else if self.skip_existing {
            OverwriteMode::Skip
        } else {
            OverwriteMode::Force
        };

        let config = Config {
            inputs,
            output_dir: self.output_dir.clone(),
            recursive: self.recursive,
            overwrite_mode,
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            continue_on_error: self.continue_on_error,
            jobs: self.jobs,
            compact: self.compact,
            options: OutlineOptions {
                header_band: self.header_band,
            },
        };

        config.validate().map_err(|e| {
            PdfOutlineError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// Performs early validation that doesn't require file I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() && self.input_list.is_none() {
            return Err(PdfOutlineError::invalid_config("No inputs specified"));
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(PdfOutlineError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        if !self.header_band.is_finite() || self.header_band < 0.0 {
            return Err(PdfOutlineError::invalid_config(format!(
                "Invalid header band: {}. Must be a non-negative number of points",
                self.header_band
            )));
        }

        Ok(())
    }

    /// Get all input paths including those from the input-list file.
    ///
    /// Paths from the file are appended after direct inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the input list cannot be read or nothing remains.
    pub async fn get_all_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut all_inputs = self.inputs.clone();

        if let Some(ref input_list_path) = self.input_list {
            let additional_inputs = read_input_list(input_list_path).await?;
            all_inputs.extend(additional_inputs);
        }

        if all_inputs.is_empty() {
            return Err(PdfOutlineError::NoInputs);
        }

        Ok(all_inputs)
    }
}

/// Read input paths, one per line, from a file or stdin (`-`).
async fn read_input_list(path: &PathBuf) -> Result<Vec<PathBuf>> {
    use tokio::io::AsyncReadExt;

    let read_err = |source| PdfOutlineError::FailedToReadInputList {
        path: path.clone(),
        source,
    };

    let mut content = String::new();
    if path.as_os_str() == "-" {
        tokio::io::stdin()
            .read_to_string(&mut content)
            .await
            .map_err(read_err)?;
    } else {
        content = tokio::fs::read_to_string(path).await.map_err(read_err)?;
    }

    Ok(parse_input_list(&content))
}

fn parse_input_list(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}
