//! Outline persistence.
//!
//! Outlines are written as UTF-8 JSON with keys in declaration order and
//! non-ASCII text left unescaped. Writes are atomic by default: the JSON goes
//! to a sibling temp file which is then renamed over the target, so a failed
//! document never leaves a partial output behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdfoutline::io::writer::OutlineWriter;
//! use pdfoutline::outline::OutlineResult;
//! use std::path::Path;
//!
//! # async fn example(outline: OutlineResult) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = OutlineWriter::new();
//! let stats = writer.save(&outline, Path::new("out/rfp.json")).await?;
//! println!("Wrote {} bytes", stats.file_size);
//! # Ok(())
//! # }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfOutlineError, Result};
use crate::outline::OutlineResult;

/// Options for writing outline files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Pretty-print with a two-space indent.
    pub pretty: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            pretty: true,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

/// Outline writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct OutlineWriter {
    options: WriteOptions,
}

impl OutlineWriter {
    /// Create a new writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer emitting single-line JSON.
    pub fn compact() -> Self {
        Self {
            options: WriteOptions {
                pretty: false,
                ..Default::default()
            },
        }
    }

    /// Serialize an outline to bytes.
    pub fn to_bytes(&self, outline: &OutlineResult) -> Result<Vec<u8>> {
        let bytes = if self.options.pretty {
            serde_json::to_vec_pretty(outline)?
        } else {
            serde_json::to_vec(outline)?
        };
        Ok(bytes)
    }

    /// Write an outline on a blocking worker thread.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - The file cannot be created, written or renamed into place
    pub async fn save(&self, outline: &OutlineResult, path: &Path) -> Result<WriteStatistics> {
        let bytes = self.to_bytes(outline)?;
        let path_buf = path.to_path_buf();
        let writer = self.clone();

        task::spawn_blocking(move || writer.write_bytes(&bytes, &path_buf))
            .await
            .map_err(|e| PdfOutlineError::other(format!("Write task failed: {e}")))?
    }

    /// Write an outline on the current thread.
    pub fn save_blocking(&self, outline: &OutlineResult, path: &Path) -> Result<WriteStatistics> {
        let bytes = self.to_bytes(outline)?;
        self.write_bytes(&bytes, path)
    }

    fn write_bytes(&self, bytes: &[u8], path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PdfOutlineError::FailedToCreateOutput {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let write_path = if self.options.atomic {
            temp_path(path)
        } else {
            path.to_path_buf()
        };

        let file = std::fs::File::create(&write_path).map_err(|e| {
            PdfOutlineError::FailedToCreateOutput {
                path: write_path.clone(),
                source: e,
            }
        })?;

        let mut writer = std::io::BufWriter::new(file);
        writer
            .write_all(bytes)
            .and_then(|_| writer.flush())
            .map_err(|e| {
                let _ = std::fs::remove_file(&write_path);
                PdfOutlineError::FailedToWrite {
                    path: write_path.clone(),
                    source: e,
                }
            })?;
        drop(writer);

        if self.options.atomic {
            std::fs::rename(&write_path, path).map_err(|e| {
                let _ = std::fs::remove_file(&write_path);
                PdfOutlineError::FailedToWrite {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size: bytes.len() as u64,
            output_path: path.to_path_buf(),
        })
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
