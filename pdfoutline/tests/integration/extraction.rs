//! End-to-end outline extraction from generated PDFs.

use lopdf::Object;
use lopdf::content::Operation;
use pdfoutline::config::OutlineOptions;
use pdfoutline::extract::{BlockSource, LopdfSource};
use pdfoutline::io::{PdfReader, process_file};
use pdfoutline::observer::NoopObserver;
use pdfoutline::outline::{HeadingEntry, Level};
use tempfile::TempDir;

use crate::common::{build_document, rfp_pages, run, write_document, write_pdf};

fn entry(level: Level, text: &str, page: u32) -> HeadingEntry {
    HeadingEntry {
        level,
        text: text.to_string(),
        page,
    }
}

#[test]
fn test_rfp_outline() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_pdf(temp_dir.path(), "rfp.pdf", &rfp_pages());

    let result = process_file(&path, &OutlineOptions::default(), &NoopObserver).unwrap();

    assert_eq!(result.title, "Acme Corp RFP Response");
    assert_eq!(
        result.outline,
        vec![
            entry(Level::H1, "Acme Corp RFP Response", 1),
            entry(Level::H2, "Request for Proposal for Digital Services", 1),
            entry(Level::H2, "2. Background", 2),
            entry(Level::H3, "2.1 Scope", 2),
            entry(Level::H2, "Team", 2),
        ]
    );
}

#[test]
fn test_extracted_blocks_use_top_down_coordinates() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_pdf(temp_dir.path(), "rfp.pdf", &rfp_pages());
    let loaded = PdfReader::new().load_blocking(&path).unwrap();

    let source = LopdfSource::new(&loaded.document);
    assert_eq!(source.page_count(), 3);

    let blocks = source.page_blocks(0).unwrap();
    assert_eq!(blocks.len(), 3);

    // Running header: baseline 760, size 10 on a 792pt page.
    assert!((blocks[0].bbox.y0 - 22.0).abs() < 0.01);
    // Title: baseline 650, size 24.
    assert!((blocks[1].bbox.y0 - 118.0).abs() < 0.01);
    // Wrapped heading keeps both lines in one block.
    assert_eq!(blocks[2].lines.len(), 2);

    assert!(source.page_blocks(2).unwrap().is_empty());
}

#[test]
fn test_header_band_is_configurable() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_pdf(temp_dir.path(), "rfp.pdf", &rfp_pages());

    let options = OutlineOptions { header_band: 0.0 };
    let result = process_file(&path, &options, &NoopObserver).unwrap();

    assert_eq!(result.title, "Acme Corp | Confidential");
    assert_eq!(result.outline[1], entry(Level::H2, "Acme Corp RFP Response", 1));
}

#[test]
fn test_numbered_headings_from_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let pages = vec![vec![
        run("1. Introduction", 700.0, 16.0),
        run("1.1. Purpose", 650.0, 14.0),
        run("Table of Contents ........ 3", 600.0, 12.0),
        run("Version 2.0 draft", 550.0, 8.0),
    ]];
    let path = write_pdf(temp_dir.path(), "numbered.pdf", &pages);

    let result = process_file(&path, &OutlineOptions::default(), &NoopObserver).unwrap();

    assert_eq!(result.title, "");
    assert_eq!(
        result.outline,
        vec![
            entry(Level::H2, "1. Introduction", 1),
            entry(Level::H3, "1.1. Purpose", 1),
        ]
    );
}

#[test]
fn test_tj_arrays_and_split_runs() {
    let temp_dir = TempDir::new().unwrap();
    let page = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 18.into()]),
        Operation::new("Td", vec![72.into(), 700.into()]),
        Operation::new(
            "TJ",
            vec![Object::Array(vec![
                Object::string_literal("Exec"),
                (-40).into(),
                Object::string_literal("utive"),
                (-400).into(),
                Object::string_literal("Summary"),
            ])],
        ),
        Operation::new("ET", vec![]),
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 600.into()]),
        Operation::new("Tj", vec![Object::string_literal("Pricing")]),
        Operation::new("Td", vec![60.into(), 0.into()]),
        Operation::new("Tj", vec![Object::string_literal("Model")]),
        Operation::new("ET", vec![]),
    ];
    let path = write_document(temp_dir.path(), "tj.pdf", build_document(vec![page]));

    let result = process_file(&path, &OutlineOptions::default(), &NoopObserver).unwrap();

    assert_eq!(result.title, "Executive Summary");
    assert_eq!(result.outline[1], entry(Level::H2, "Pricing Model", 1));
}

#[test]
fn test_images_are_not_headings() {
    let temp_dir = TempDir::new().unwrap();
    let page = vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                200.into(),
                0.into(),
                0.into(),
                100.into(),
                72.into(),
                500.into(),
            ],
        ),
        Operation::new("Do", vec!["Im1".into()]),
        Operation::new("Q", vec![]),
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 14.into()]),
        Operation::new("Td", vec![72.into(), 480.into()]),
        Operation::new("Tj", vec![Object::string_literal("Figure caption")]),
        Operation::new("ET", vec![]),
    ];
    let path = write_document(temp_dir.path(), "image.pdf", build_document(vec![page]));

    let loaded = PdfReader::new().load_blocking(&path).unwrap();
    let blocks = LopdfSource::new(&loaded.document).page_blocks(0).unwrap();
    assert_eq!(blocks.len(), 2);
    assert!(!blocks[0].is_text());

    let result = loaded
        .outline(&OutlineOptions::default(), &NoopObserver)
        .unwrap();
    assert_eq!(result.outline, vec![entry(Level::H1, "Figure caption", 1)]);
}

#[test]
fn test_repeated_runs_are_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_pdf(temp_dir.path(), "rfp.pdf", &rfp_pages());

    let first = process_file(&path, &OutlineOptions::default(), &NoopObserver).unwrap();
    let second = process_file(&path, &OutlineOptions::default(), &NoopObserver).unwrap();
    assert_eq!(first, second);
}
