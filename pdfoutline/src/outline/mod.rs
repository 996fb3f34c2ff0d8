//! Outline construction.
//!
//! This module turns the blocks of a document into an [`OutlineResult`]:
//! - blocks in the header band and non-text blocks are skipped
//! - remaining blocks are normalized and filtered ([`filter`])
//! - every candidate is leveled ([`classifier`]) and appended in page order,
//!   then encounter order
//! - the first H1 on page 1 becomes the document title
//!
//! # Examples
//!
//! ```
//! use pdfoutline::extract::PageBlock;
//! use pdfoutline::observer::NoopObserver;
//! use pdfoutline::outline::{Level, extract_outline};
//! use pdfoutline::config::OutlineOptions;
//!
//! let pages = vec![
//!     vec![PageBlock::from_lines(100.0, ["Acme Corp RFP Response"])],
//!     vec![
//!         PageBlock::from_lines(120.0, ["2. Background"]),
//!         PageBlock::from_lines(160.0, ["2.1. Scope"]),
//!     ],
//! ];
//!
//! let result = extract_outline(&pages, &OutlineOptions::default(), &NoopObserver).unwrap();
//! assert_eq!(result.title, "Acme Corp RFP Response");
//! assert_eq!(result.outline[2].level, Level::H3);
//! ```

pub mod classifier;
pub mod filter;

pub use classifier::{Classification, ClassificationContext, classify};
pub use filter::{HEADER_BAND_LIMIT, Rejection, is_candidate, normalize};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::OutlineOptions;
use crate::error::Result;
use crate::extract::{BlockSource, PageBlock};
use crate::observer::OutlineObserver;

/// Hierarchical heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Title or chapter.
    H1,
    /// Section.
    H2,
    /// Subsection.
    H3,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
        };
        f.write_str(name)
    }
}

/// One outline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Assigned level.
    pub level: Level,
    /// Heading text.
    pub text: String,
    /// 1-indexed page number.
    pub page: u32,
}

/// The outline of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Document title, empty when page 1 has no H1 entry.
    pub title: String,
    /// Entries in page order, then encounter order.
    pub outline: Vec<HeadingEntry>,
}

impl OutlineResult {
    /// Whether no headings were found.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Number of entries at `level`.
    pub fn count(&self, level: Level) -> usize {
        self.outline.iter().filter(|e| e.level == level).count()
    }
}

/// Accumulates the outline of a document one page at a time.
pub struct OutlineBuilder<'o> {
    options: OutlineOptions,
    observer: &'o dyn OutlineObserver,
    title: Option<String>,
    outline: Vec<HeadingEntry>,
}

impl<'o> OutlineBuilder<'o> {
    /// Create a builder reporting to `observer`.
    pub fn new(options: OutlineOptions, observer: &'o dyn OutlineObserver) -> Self {
        Self {
            options,
            observer,
            title: None,
            outline: Vec::new(),
        }
    }

    /// Process the blocks of the next page.
    ///
    /// `page` is 1-indexed. Pages must be added in ascending order.
    pub fn add_page(&mut self, page: u32, blocks: &[PageBlock]) {
        self.observer.page_started(page, blocks.len());

        let mut ctx = ClassificationContext::new_page();

        for block in blocks.iter().filter(|b| b.is_text()) {
            if filter::in_header_band(block, self.options.header_band) {
                self.observer.header_band_dropped(page, block.bbox.y0);
                continue;
            }

            let text = normalize(block);
            if let Some(rejection) = filter::rejection(&text) {
                self.observer.candidate_rejected(page, &text, rejection);
                continue;
            }

            let (classification, next) = classify(&text, ctx);
            ctx = next;

            if self.title.is_none() && page == 1 && classification.level == Level::H1 {
                self.observer.title_detected(&classification.text);
                self.title = Some(classification.text.clone());
            }

            let entry = HeadingEntry {
                level: classification.level,
                text: classification.text,
                page,
            };
            self.observer.heading(&entry, classification.numbered);
            self.outline.push(entry);
        }
    }

    /// Finish the document.
    pub fn finish(self) -> OutlineResult {
        let result = OutlineResult {
            title: self.title.unwrap_or_default(),
            outline: self.outline,
        };
        self.observer.document_finished(&result);
        result
    }
}

/// Build the outline of every page of `source`.
///
/// # Errors
///
/// Fails only when the source cannot produce a page; no partial outline is
/// returned in that case.
pub fn extract_outline<S>(
    source: &S,
    options: &OutlineOptions,
    observer: &dyn OutlineObserver,
) -> Result<OutlineResult>
where
    S: BlockSource + ?Sized,
{
    let mut builder = OutlineBuilder::new(options.clone(), observer);

    for index in 0..source.page_count() {
        let blocks = source.page_blocks(index)?;
        builder.add_page(index as u32 + 1, &blocks);
    }

    Ok(builder.finish())
}
