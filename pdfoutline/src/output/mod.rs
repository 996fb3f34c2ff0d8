//! Output formatting and display for pdfoutline.
//!
//! This module handles all user-facing output:
//! - Formatted status messages
//! - Per-document results and the batch summary
//! - Quiet and verbose modes
//!
//! Diagnostics for developers go through `tracing`; this module is what the
//! person running the tool reads.
//!
//! # Examples
//!
//! ```no_run
//! use pdfoutline::output::OutputFormatter;
//! use pdfoutline::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Scanning inputs");
//! formatter.success("All outlines written");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::batch::{BatchReport, FileStatus};

/// One-line description of a document's outcome.
pub fn describe_outcome(status: &FileStatus) -> String {
    match status {
        FileStatus::Written {
            title, headings, ..
        } if title.is_empty() => format!("{headings} heading(s), no title"),
        FileStatus::Written {
            title, headings, ..
        } => format!("{headings} heading(s), title \"{title}\""),
        FileStatus::Skipped => "skipped, output exists".to_string(),
        FileStatus::Planned => "planned".to_string(),
        FileStatus::Failed(err) => format!("failed: {err}"),
    }
}

/// Display the outcome of every document and the batch summary.
pub fn display_report(formatter: &OutputFormatter, report: &BatchReport) {
    for (index, outcome) in report.outcomes.iter().enumerate() {
        let line = format!(
            "{} -> {}",
            outcome.input.display(),
            outcome.output.display()
        );

        match &outcome.status {
            FileStatus::Planned => formatter.list_item(index + 1, &line),
            FileStatus::Failed(_) => formatter.error(&format!(
                "{line}: {}",
                describe_outcome(&outcome.status)
            )),
            status => {
                formatter.debug(&format!("{line}: {}", describe_outcome(status)));
                if let FileStatus::Written { stats, .. } = status {
                    formatter.detail("Size", &format!("{} bytes", stats.file_size));
                }
            }
        }
    }

    if report.planned() > 0 {
        formatter.info(&format!(
            "Dry run: {} document(s) would be processed",
            report.planned()
        ));
        return;
    }

    let summary = format!(
        "{} outline(s) written, {} skipped, {} failed in {:.2}s",
        report.written(),
        report.skipped(),
        report.failed(),
        report.elapsed.as_secs_f64()
    );

    if report.is_success() {
        formatter.success(&summary);
    } else {
        formatter.warning(&summary);
    }
}
