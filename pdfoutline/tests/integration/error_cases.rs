//! Failure modes surfaced to callers.

use pdfoutline::batch;
use pdfoutline::config::{Config, OutlineOptions};
use pdfoutline::error::PdfOutlineError;
use pdfoutline::io::{PdfReader, process_file};
use pdfoutline::observer::NoopObserver;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::write_garbage;

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.pdf");

    let err = process_file(&path, &OutlineOptions::default(), &NoopObserver).unwrap_err();
    assert!(matches!(err, PdfOutlineError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_garbage_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_garbage(temp_dir.path(), "junk.pdf");

    let err = PdfReader::new().load_blocking(&path).unwrap_err();
    assert!(matches!(err, PdfOutlineError::FailedToLoadPdf { .. }));
    assert!(err.is_recoverable());
    assert_eq!(err.exit_code(), 3);
    assert!(err.to_string().contains("junk.pdf"));
}

#[test]
fn test_directory_is_not_a_file() {
    let temp_dir = TempDir::new().unwrap();

    let err = PdfReader::new().load_blocking(temp_dir.path()).unwrap_err();
    assert!(matches!(err, PdfOutlineError::NotAFile { .. }));
}

#[tokio::test]
async fn test_empty_inputs_rejected() {
    let config = Config::new(Vec::new(), "out");
    let err = batch::run(&config).await.unwrap_err();
    assert!(matches!(err, PdfOutlineError::InvalidConfig { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_invalid_glob_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let pattern = temp_dir.path().join("[unclosed*.pdf");

    let config = Config::new(vec![pattern], temp_dir.path().join("out"));
    let err = batch::run(&config).await.unwrap_err();
    assert!(matches!(err, PdfOutlineError::InvalidPattern { .. }));
}

#[tokio::test]
async fn test_empty_directory_has_no_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in");
    std::fs::create_dir(&input).unwrap();

    let config = Config::new(vec![input], temp_dir.path().join("out"));
    let err = batch::run(&config).await.unwrap_err();
    assert!(matches!(err, PdfOutlineError::NoInputs));
}

#[tokio::test]
async fn test_negative_header_band_rejected() {
    let mut config = Config::new(vec![PathBuf::from("doc.pdf")], "out");
    config.options.header_band = -1.0;

    let err = batch::run(&config).await.unwrap_err();
    assert!(matches!(err, PdfOutlineError::InvalidConfig { .. }));
}
