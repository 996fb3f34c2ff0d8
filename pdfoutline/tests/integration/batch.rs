//! Batch runs over directories of generated PDFs.

use pdfoutline::batch::{self, FileStatus};
use pdfoutline::config::{Config, OverwriteMode};
use pdfoutline::error::PdfOutlineError;
use pdfoutline::outline::OutlineResult;
use std::path::Path;
use tempfile::TempDir;

use crate::common::{rfp_pages, run, write_garbage, write_pdf};

fn read_outline(path: &Path) -> OutlineResult {
    let bytes = std::fs::read(path).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn single_heading(dir: &Path, name: &str, heading: &str) {
    write_pdf(dir, name, &[vec![run(heading, 700.0, 18.0)]]);
}

#[tokio::test]
async fn test_directory_batch_writes_one_outline_per_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in");
    let output = temp_dir.path().join("out");

    write_pdf(&input, "rfp.pdf", &rfp_pages());
    single_heading(&input, "B.PDF", "Statement of Work");
    std::fs::write(input.join("notes.txt"), b"skip me").unwrap();

    let report = batch::run(&Config::new(vec![input.clone()], &output))
        .await
        .unwrap();

    assert_eq!(report.written(), 2);
    assert!(report.is_success());

    let inputs: Vec<_> = report
        .outcomes
        .iter()
        .map(|o| o.input.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(inputs, vec!["B.PDF", "rfp.pdf"]);

    let rfp = read_outline(&output.join("rfp.json"));
    assert_eq!(rfp.title, "Acme Corp RFP Response");
    assert_eq!(rfp.outline.len(), 5);

    let sow = read_outline(&output.join("B.json"));
    assert_eq!(sow.title, "Statement of Work");
    assert!(!output.join("notes.json").exists());
}

#[tokio::test]
async fn test_written_status_carries_summary() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_pdf(temp_dir.path(), "rfp.pdf", &rfp_pages());
    let output = temp_dir.path().join("out");

    let report = batch::run(&Config::new(vec![path], &output)).await.unwrap();

    match &report.outcomes[0].status {
        FileStatus::Written {
            stats,
            title,
            headings,
        } => {
            assert_eq!(title, "Acme Corp RFP Response");
            assert_eq!(*headings, 5);
            assert_eq!(stats.output_path, output.join("rfp.json"));
            assert!(stats.file_size > 0);
        }
        other => panic!("unexpected status: {other:?}"),
    }
}

#[tokio::test]
async fn test_overwrite_modes() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "doc.pdf", &rfp_pages());
    let output = temp_dir.path().join("out");
    let target = output.join("doc.json");
    std::fs::create_dir_all(&output).unwrap();

    std::fs::write(&target, b"stale").unwrap();
    let mut config = Config::new(vec![input.clone()], &output);
    config.overwrite_mode = OverwriteMode::Skip;
    let report = batch::run(&config).await.unwrap();
    assert_eq!(report.skipped(), 1);
    assert_eq!(std::fs::read(&target).unwrap(), b"stale");

    config.overwrite_mode = OverwriteMode::NoClobber;
    let err = batch::run(&config).await.unwrap_err();
    assert!(matches!(err, PdfOutlineError::OutputExists { .. }));
    assert_eq!(std::fs::read(&target).unwrap(), b"stale");

    config.overwrite_mode = OverwriteMode::Force;
    let report = batch::run(&config).await.unwrap();
    assert_eq!(report.written(), 1);
    assert_eq!(read_outline(&target).title, "Acme Corp RFP Response");
}

#[tokio::test]
async fn test_continue_on_error_keeps_good_documents() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in");
    let output = temp_dir.path().join("out");

    std::fs::create_dir_all(&input).unwrap();
    write_garbage(&input, "a-broken.pdf");
    write_pdf(&input, "b-good.pdf", &rfp_pages());

    let mut config = Config::new(vec![input], &output);
    config.continue_on_error = true;
    config.jobs = Some(2);

    let report = batch::run(&config).await.unwrap();

    assert_eq!(report.failed(), 1);
    assert_eq!(report.written(), 1);
    assert!(!report.is_success());
    assert!(report.outcomes[0].is_failure());
    assert!(matches!(
        report.outcomes[0].status,
        FileStatus::Failed(PdfOutlineError::FailedToLoadPdf { .. })
    ));

    assert!(!output.join("a-broken.json").exists());
    assert!(output.join("b-good.json").exists());
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "doc.pdf", &rfp_pages());
    let output = temp_dir.path().join("out");

    let mut config = Config::new(vec![input], &output);
    config.dry_run = true;

    let report = batch::run(&config).await.unwrap();
    assert_eq!(report.planned(), 1);
    assert_eq!(report.outcomes[0].output, output.join("doc.json"));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_compact_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in");
    single_heading(&input, "doc.pdf", "Scope");
    let output = temp_dir.path().join("out");

    let mut config = Config::new(vec![input.join("doc.pdf")], &output);
    config.compact = true;
    batch::run(&config).await.unwrap();

    let text = std::fs::read_to_string(output.join("doc.json")).unwrap();
    assert_eq!(
        text,
        r#"{"title":"Scope","outline":[{"level":"H1","text":"Scope","page":1}]}"#
    );
}

#[tokio::test]
async fn test_recursive_batch_mirrors_layout() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in");
    let output = temp_dir.path().join("out");

    single_heading(&input, "top.pdf", "Top");
    single_heading(&input.join("vendors"), "acme.pdf", "Acme");

    let mut config = Config::new(vec![input.clone()], &output);
    let report = batch::run(&config).await.unwrap();
    assert_eq!(report.written(), 1);
    assert!(!output.join("vendors").exists());

    config.recursive = true;
    let report = batch::run(&config).await.unwrap();
    assert_eq!(report.written(), 2);
    assert_eq!(
        read_outline(&output.join("vendors").join("acme.json")).title,
        "Acme"
    );
}

#[tokio::test]
async fn test_same_stem_in_two_directories_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("a");
    let second = temp_dir.path().join("b");
    let output = temp_dir.path().join("out");

    single_heading(&first, "doc.pdf", "First");
    single_heading(&second, "doc.pdf", "Second");

    for mode in [OverwriteMode::Force, OverwriteMode::NoClobber] {
        let mut config = Config::new(vec![first.clone(), second.clone()], &output);
        config.overwrite_mode = mode;
        config.continue_on_error = true;

        let err = batch::run(&config).await.unwrap_err();
        assert!(matches!(err, PdfOutlineError::OutputCollision { .. }));
        assert!(!output.exists());
    }
}
