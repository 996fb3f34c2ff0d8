//! Hooks into outline construction.
//!
//! The outline core never logs on its own. It reports what it decides to an
//! [`OutlineObserver`], and callers pick the sink: [`TracingObserver`] emits
//! `tracing` events, [`NoopObserver`] discards everything.

use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};

use crate::outline::{HeadingEntry, OutlineResult, Rejection};

/// Receives the decisions made while building one outline.
///
/// Every method has an empty default, so implementors override only what
/// they care about.
#[allow(unused_variables)]
pub trait OutlineObserver: Send + Sync {
    /// A page is about to be processed.
    fn page_started(&self, page: u32, blocks: usize) {}

    /// A text block was skipped for sitting in the header band.
    fn header_band_dropped(&self, page: u32, y0: f32) {}

    /// A normalized text was rejected by the candidate filter.
    fn candidate_rejected(&self, page: u32, text: &str, reason: Rejection) {}

    /// The document title was found.
    fn title_detected(&self, title: &str) {}

    /// An outline entry was appended. `numbered` tells whether its level
    /// came from a leading numeral rather than its position on the page.
    fn heading(&self, entry: &HeadingEntry, numbered: bool) {}

    /// The document is complete.
    fn document_finished(&self, result: &OutlineResult) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl OutlineObserver for NoopObserver {}

/// Observer that turns events into `tracing` events.
///
/// Titles and headings are logged at `info`, filter decisions at `debug`,
/// page boundaries at `trace`.
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    file: Option<PathBuf>,
}

impl TracingObserver {
    /// Create an observer without a file context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an observer that tags every event with `path`.
    pub fn for_file(path: &Path) -> Self {
        Self {
            file: Some(path.to_path_buf()),
        }
    }

    fn file(&self) -> String {
        self.file
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }
}

impl OutlineObserver for TracingObserver {
    fn page_started(&self, page: u32, blocks: usize) {
        trace!(file = %self.file(), page, blocks, "Processing page");
    }

    fn header_band_dropped(&self, page: u32, y0: f32) {
        debug!(file = %self.file(), page, y0, "Skipped block in header band");
    }

    fn candidate_rejected(&self, page: u32, text: &str, reason: Rejection) {
        debug!(file = %self.file(), page, text, %reason, "Rejected candidate");
    }

    fn title_detected(&self, title: &str) {
        info!(file = %self.file(), title, "Detected title");
    }

    fn heading(&self, entry: &HeadingEntry, numbered: bool) {
        info!(
            file = %self.file(),
            page = entry.page,
            level = %entry.level,
            numbered,
            text = %entry.text,
            "Heading"
        );
    }

    fn document_finished(&self, result: &OutlineResult) {
        debug!(
            file = %self.file(),
            headings = result.outline.len(),
            "Outline complete"
        );
    }
}
