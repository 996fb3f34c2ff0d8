//! PDF loading.
//!
//! Loading turns a path into a [`LoadedPdf`] or one of the typed load
//! failures: missing file, not a file, encrypted, or unparseable. Page-level
//! extraction failures surface later, when the outline is built.
//!
//! # Examples
//!
//! ```no_run
//! use pdfoutline::io::reader::PdfReader;
//! use pdfoutline::config::OutlineOptions;
//! use pdfoutline::observer::NoopObserver;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("rfp.pdf")).await?;
//! let outline = loaded.outline(&OutlineOptions::default(), &NoopObserver)?;
//! println!("{} headings on {} pages", outline.outline.len(), loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::OutlineOptions;
use crate::error::{PdfOutlineError, Result};
use crate::extract::LopdfSource;
use crate::observer::OutlineObserver;
use crate::outline::{OutlineResult, extract_outline};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }

    /// Build the outline of this document.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOutlineError::Extraction`] naming this file and the
    /// failing page when a page's content cannot be read.
    pub fn outline(
        &self,
        options: &OutlineOptions,
        observer: &dyn OutlineObserver,
    ) -> Result<OutlineResult> {
        let source = LopdfSource::new(&self.document);
        extract_outline(&source, options, observer).map_err(|e| e.with_path(&self.path))
    }
}

/// PDF reader.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a PDF document on a blocking worker thread.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - PDF is encrypted
    /// - File is not a valid PDF
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        let reader = self.clone();

        task::spawn_blocking(move || reader.load_blocking(&path_buf))
            .await
            .map_err(|e| PdfOutlineError::other(format!("Load task failed: {e}")))?
    }

    /// Load a PDF document on the current thread.
    pub fn load_blocking(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();

        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PdfOutlineError::file_not_found(path_buf.clone()),
            _ => PdfOutlineError::failed_to_load_pdf(path_buf.clone(), e.to_string()),
        })?;

        if !metadata.is_file() {
            return Err(PdfOutlineError::not_a_file(path_buf));
        }

        let start = Instant::now();

        let doc = Document::load(path).map_err(|e| {
            let err_msg = e.to_string();
            let lowered = err_msg.to_lowercase();
            if lowered.contains("encrypt") || lowered.contains("password") {
                PdfOutlineError::encrypted_pdf(path_buf.clone())
            } else {
                PdfOutlineError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        Ok(LoadedPdf::new(doc, path_buf, start.elapsed()))
    }
}

/// Load one PDF and build its outline.
///
/// This is the single-document entry point; it runs on the calling thread.
///
/// # Errors
///
/// Returns the load failure, or the extraction failure of the first page
/// that cannot be read. A document without headings is not an error.
pub fn process_file(
    path: &Path,
    options: &OutlineOptions,
    observer: &dyn OutlineObserver,
) -> Result<OutlineResult> {
    let loaded = PdfReader::new().load_blocking(path)?;
    loaded.outline(options, observer)
}
