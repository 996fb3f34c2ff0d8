//! pdfoutline - Derive a heading outline from PDF documents.
//!
//! This library reads the text blocks of a PDF page by page and turns them
//! into a title plus an ordered list of H1/H2/H3 headings, each tagged with
//! its page. It is meant for PDFs without embedded bookmarks. It supports:
//!
//! - Positioned text extraction on top of `lopdf`
//! - Filtering of layout artifacts (running headers, page numbers, footers)
//! - Heading levels from dotted numbering or from position on the page
//! - JSON output, written atomically
//! - Concurrent batch processing of files, directories and glob patterns
//!
//! # Examples
//!
//! ## Single Document
//!
//! ```no_run
//! use pdfoutline::config::OutlineOptions;
//! use pdfoutline::io::process_file;
//! use pdfoutline::observer::TracingObserver;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let path = Path::new("rfp.pdf");
//! let outline = process_file(path, &OutlineOptions::default(), &TracingObserver::for_file(path))?;
//!
//! println!("Title: {}", outline.title);
//! for entry in &outline.outline {
//!     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Batch
//!
//! ```no_run
//! use pdfoutline::{Config, batch};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new(vec![PathBuf::from("input")], "output");
//! let report = batch::run(&config).await?;
//! println!("Wrote {} outline(s)", report.written());
//! # Ok(())
//! # }
//! ```
//!
//! ## Without a PDF
//!
//! The outline core works on any [`extract::BlockSource`]:
//!
//! ```
//! use pdfoutline::extract::PageBlock;
//! use pdfoutline::observer::NoopObserver;
//! use pdfoutline::outline::extract_outline;
//! use pdfoutline::config::OutlineOptions;
//!
//! let pages = vec![vec![
//!     PageBlock::from_lines(40.0, ["Running header"]),
//!     PageBlock::from_lines(120.0, ["Statement of Work"]),
//!     PageBlock::from_lines(700.0, ["Page 1 of 12"]),
//! ]];
//!
//! let outline = extract_outline(&pages, &OutlineOptions::default(), &NoopObserver).unwrap();
//! assert_eq!(outline.title, "Statement of Work");
//! assert_eq!(outline.outline.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod io;
pub mod observer;
pub mod outline;
pub mod output;

// Re-export commonly used types
pub use config::{Config, OutlineOptions, OverwriteMode};
pub use error::{PdfOutlineError, Result};
pub use outline::{HeadingEntry, Level, OutlineResult, extract_outline};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
