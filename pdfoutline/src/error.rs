//! Error types for pdfoutline.
//!
//! Classification itself cannot fail; every error here originates at a
//! boundary: locating inputs, loading a PDF, pulling text out of a page, or
//! persisting the resulting outline.
//!
//! # Error Categories
//!
//! - **I/O Errors**: File not found, permission denied, etc.
//! - **PDF Errors**: Unreadable, encrypted or undecodable documents
//! - **Configuration Errors**: Invalid arguments or glob patterns
//! - **Output Errors**: Problems serializing or writing the outline
//!
//! An empty outline (or an empty title) is a valid result and never an error.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfoutline operations.
pub type Result<T> = std::result::Result<T, PdfOutlineError>;

/// Main error type for pdfoutline operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfOutlineError {
    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// The PDF could not be opened or parsed.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// The PDF is encrypted and its text cannot be read.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Text could not be extracted from a page of a loaded document.
    #[error("Failed to extract text from {} (page {page})\n  Reason: {reason}", path.display())]
    Extraction {
        /// Path to the PDF file.
        path: PathBuf,
        /// 1-indexed page number that failed.
        page: u32,
        /// Details about the failure.
        reason: String,
    },

    /// No PDF files were found among the inputs.
    #[error("No PDF files found in the given inputs")]
    NoInputs,

    /// Output file already exists and overwriting is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or --skip-existing to leave it untouched",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Two documents would write the same outline file.
    #[error(
        "Two inputs map to the same output {}:\n  {}\n  {}\n  \
         Process them in separate runs or rename one of them",
        output.display(),
        first.display(),
        second.display()
    )]
    OutputCollision {
        /// The shared output path.
        output: PathBuf,
        /// Input that claimed the output first.
        first: PathBuf,
        /// Input that would overwrite it.
        second: PathBuf,
    },

    /// Failed to create the output file or its directory.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to the output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The outline could not be serialized.
    #[error("Failed to serialize outline: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The file listing input paths could not be read.
    #[error("Failed to read input list: {}\n  Reason: {source}", path.display())]
    FailedToReadInputList {
        /// Path to the input list.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A glob pattern on the command line is malformed.
    #[error("Invalid input pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl PdfOutlineError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an Extraction error for a 1-indexed page.
    pub fn extraction(path: PathBuf, page: u32, reason: impl Into<String>) -> Self {
        Self::Extraction {
            path,
            page,
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an OutputCollision error.
    pub fn output_collision(output: PathBuf, first: PathBuf, second: PathBuf) -> Self {
        Self::OutputCollision {
            output,
            first,
            second,
        }
    }

    /// Create an InvalidPattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Attach a path to an extraction failure reported without one.
    ///
    /// Block sources work on an already-loaded document and do not know
    /// where it came from; the caller fills the path in.
    pub fn with_path(self, path: &std::path::Path) -> Self {
        match self {
            Self::Extraction { page, reason, .. } => Self::Extraction {
                path: path.to_path_buf(),
                page,
                reason,
            },
            other => other,
        }
    }

    /// Check if this error only concerns a single document.
    ///
    /// Returns true for errors that can be recorded and skipped when a batch
    /// runs with `--continue-on-error`.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::NotAFile { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::Extraction { .. }
                | Self::OutputExists { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::Extraction { .. } => 3,
            Self::NoInputs => 1,
            Self::OutputExists { .. } => 4,
            Self::OutputCollision { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::Serialization(_) => 5,
            Self::FailedToReadInputList { .. } => 2,
            Self::InvalidPattern { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Io(_) => 5,
            Self::Other { .. } => 1,
        }
    }
}

impl From<lopdf::Error> for PdfOutlineError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}
