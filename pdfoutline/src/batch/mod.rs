//! Batch processing.
//!
//! A batch discovers its documents ([`discover`]), then builds and writes one
//! outline per document. Documents run concurrently, bounded by the job
//! count, each on a blocking worker thread; outcomes are reported in
//! discovery order no matter which document finishes first.
//!
//! Documents share nothing. A failed document produces no output file and
//! leaves the others untouched. Without `continue_on_error` the first failure
//! stops the batch and is returned as the error.
//!
//! # Examples
//!
//! ```no_run
//! use pdfoutline::batch;
//! use pdfoutline::config::Config;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::new(vec![PathBuf::from("input")], "output");
//! config.continue_on_error = true;
//!
//! let report = batch::run(&config).await?;
//! println!("{} written, {} failed", report.written(), report.failed());
//! # Ok(())
//! # }
//! ```

pub mod discover;

pub use discover::{PlannedFile, discover, is_pdf, output_path_for};

use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, info, warn};

use crate::config::{Config, OutlineOptions, OverwriteMode};
use crate::error::{PdfOutlineError, Result};
use crate::io::{OutlineWriter, WriteStatistics, process_file};
use crate::observer::TracingObserver;
use crate::outline::OutlineResult;

/// What happened to one document.
#[derive(Debug)]
pub enum FileStatus {
    /// The outline was written.
    Written {
        /// Write statistics.
        stats: WriteStatistics,
        /// Detected title, empty if none.
        title: String,
        /// Number of outline entries.
        headings: usize,
    },
    /// An output already existed and was left alone.
    Skipped,
    /// Dry run: the document would be processed.
    Planned,
    /// The document failed.
    Failed(PdfOutlineError),
}

/// Outcome for one document.
#[derive(Debug)]
pub struct FileOutcome {
    /// Source PDF.
    pub input: PathBuf,
    /// Destination JSON file.
    pub output: PathBuf,
    /// What happened.
    pub status: FileStatus,
}

impl FileOutcome {
    /// Whether the document failed.
    pub fn is_failure(&self) -> bool {
        matches!(self.status, FileStatus::Failed(_))
    }
}

/// Result of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Outcomes in discovery order.
    pub outcomes: Vec<FileOutcome>,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl BatchReport {
    fn count(&self, pred: impl Fn(&FileStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }

    /// Number of outlines written.
    pub fn written(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Written { .. }))
    }

    /// Number of documents skipped because of an existing output.
    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Skipped))
    }

    /// Number of documents planned in a dry run.
    pub fn planned(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Planned))
    }

    /// Number of failed documents.
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Failed(_)))
    }

    /// True when no document failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Settings shared by every document of a batch.
#[derive(Debug)]
struct JobSettings {
    options: OutlineOptions,
    overwrite_mode: OverwriteMode,
    writer: OutlineWriter,
}

/// Run a batch according to `config`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, discovery fails, or a
/// document fails while `continue_on_error` is off.
pub async fn run(config: &Config) -> Result<BatchReport> {
    config.validate()?;

    let start = Instant::now();
    let planned = discover(config.inputs(), &config.output_dir, config.recursive)?;
    info!(documents = planned.len(), output_dir = %config.output_dir.display(), "Discovered inputs");

    if config.dry_run {
        let outcomes = planned
            .into_iter()
            .map(|p| FileOutcome {
                input: p.input,
                output: p.output,
                status: FileStatus::Planned,
            })
            .collect();
        return Ok(BatchReport {
            outcomes,
            elapsed: start.elapsed(),
        });
    }

    let settings = Arc::new(JobSettings {
        options: config.options.clone(),
        overwrite_mode: config.overwrite_mode,
        writer: if config.compact {
            OutlineWriter::compact()
        } else {
            OutlineWriter::new()
        },
    });

    let workers = config.effective_jobs().max(1);
    let tasks = planned.into_iter().enumerate().map(|(idx, file)| {
        let settings = Arc::clone(&settings);
        async move { (idx, process_planned(file, &settings).await) }
    });

    let mut results = stream::iter(tasks).buffer_unordered(workers);
    let mut indexed = Vec::new();

    while let Some((idx, outcome)) = results.next().await {
        match outcome.status {
            FileStatus::Failed(err) if !config.continue_on_error => {
                warn!(file = %outcome.input.display(), error = %err, "Stopping batch");
                return Err(err);
            }
            FileStatus::Failed(ref err) => {
                warn!(file = %outcome.input.display(), error = %err, "Failed to process document");
            }
            _ => {}
        }
        indexed.push((idx, outcome));
    }

    indexed.sort_by_key(|(idx, _)| *idx);

    Ok(BatchReport {
        outcomes: indexed.into_iter().map(|(_, outcome)| outcome).collect(),
        elapsed: start.elapsed(),
    })
}

async fn process_planned(file: PlannedFile, settings: &JobSettings) -> FileOutcome {
    let status = match process_document(&file, settings).await {
        Ok(status) => status,
        Err(err) => FileStatus::Failed(err),
    };

    FileOutcome {
        input: file.input,
        output: file.output,
        status,
    }
}

async fn process_document(file: &PlannedFile, settings: &JobSettings) -> Result<FileStatus> {
    if settings.writer.exists(&file.output).await {
        match settings.overwrite_mode {
            OverwriteMode::Force => {}
            OverwriteMode::NoClobber => {
                return Err(PdfOutlineError::output_exists(file.output.clone()));
            }
            OverwriteMode::Skip => {
                debug!(output = %file.output.display(), "Output exists, skipping");
                return Ok(FileStatus::Skipped);
            }
        }
    }

    debug!(file = %file.input.display(), "Processing document");

    let outline = build_outline(file.input.clone(), settings.options.clone()).await?;
    let stats = settings.writer.save(&outline, &file.output).await?;

    info!(
        file = %file.input.display(),
        output = %stats.output_path.display(),
        headings = outline.outline.len(),
        "Saved outline"
    );

    Ok(FileStatus::Written {
        stats,
        title: outline.title,
        headings: outline.outline.len(),
    })
}

async fn build_outline(input: PathBuf, options: OutlineOptions) -> Result<OutlineResult> {
    task::spawn_blocking(move || {
        let observer = TracingObserver::for_file(&input);
        process_file(&input, &options, &observer)
    })
    .await
    .map_err(|e| PdfOutlineError::other(format!("Outline task failed: {e}")))?
}
