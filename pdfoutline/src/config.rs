//! Configuration module for pdfoutline.
//!
//! This module holds the validated configuration that drives a batch run.
//! The CLI builds a [`Config`] from its arguments; library users may build
//! one directly. It covers:
//! - Input selection and output placement
//! - Overwrite behavior
//! - Concurrency
//! - Tuning of the outline core ([`OutlineOptions`])

use std::path::PathBuf;

use crate::PdfOutlineError;
use crate::outline::HEADER_BAND_LIMIT;

/// Tuning knobs of the outline core.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineOptions {
    /// Blocks whose top edge is closer than this to the top of the page are
    /// treated as running headers.
    pub header_band: f32,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            header_band: HEADER_BAND_LIMIT,
        }
    }
}

/// What to do when an output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Replace existing files (default).
    #[default]
    Force,
    /// Fail the document if its output exists.
    NoClobber,
    /// Leave existing files alone and report the document as skipped.
    Skip,
}

/// Complete configuration for an outline batch.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input files, directories or glob patterns.
    pub inputs: Vec<PathBuf>,

    /// Directory receiving one JSON file per document.
    pub output_dir: PathBuf,

    /// Descend into sub-directories of directory inputs.
    pub recursive: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Dry run mode - list planned outputs without processing.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Record failures and keep going instead of stopping.
    pub continue_on_error: bool,

    /// Number of parallel jobs (None = auto-detect).
    pub jobs: Option<usize>,

    /// Write single-line JSON instead of pretty-printed.
    pub compact: bool,

    /// Outline core options.
    pub options: OutlineOptions,
}

impl Config {
    /// Create a configuration with defaults for everything but the paths.
    pub fn new(inputs: Vec<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output_dir: output_dir.into(),
            recursive: false,
            overwrite_mode: OverwriteMode::default(),
            dry_run: false,
            verbose: false,
            quiet: false,
            continue_on_error: false,
            jobs: None,
            compact: false,
            options: OutlineOptions::default(),
        }
    }

    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No inputs are specified
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - The header band is negative or not finite
    pub fn validate(&self) -> crate::Result<()> {
        if self.inputs.is_empty() {
            return Err(PdfOutlineError::invalid_config("No inputs specified"));
        }

        if self.verbose && self.quiet {
            return Err(PdfOutlineError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(PdfOutlineError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        let band = self.options.header_band;
        if !band.is_finite() || band < 0.0 {
            return Err(PdfOutlineError::invalid_config(format!(
                "Header band must be a non-negative number of points, got {band}"
            )));
        }

        Ok(())
    }

    /// Get the effective number of parallel jobs.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
