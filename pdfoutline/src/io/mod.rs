//! I/O operations for pdfoutline.
//!
//! This module handles all file I/O:
//! - Loading PDF documents from disk ([`reader`])
//! - Writing outlines as JSON ([`writer`])
//!
//! # Examples
//!
//! ```no_run
//! use pdfoutline::io::{OutlineWriter, PdfReader};
//! use pdfoutline::config::OutlineOptions;
//! use pdfoutline::observer::TracingObserver;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let path = Path::new("input.pdf");
//! let loaded = PdfReader::new().load(path).await?;
//! let outline = loaded.outline(&OutlineOptions::default(), &TracingObserver::for_file(path))?;
//!
//! OutlineWriter::new().save(&outline, Path::new("input.json")).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader, process_file};
pub use writer::{OutlineWriter, WriteOptions, WriteStatistics};
