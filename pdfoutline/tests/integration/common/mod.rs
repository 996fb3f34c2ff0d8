//! Shared helpers for the integration tests.
//!
//! PDFs are generated in-test with `lopdf`: every page is US Letter, uses a
//! single Helvetica font and places each text run with its own `BT .. ET`
//! block, so positions are exactly what the test asks for.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

/// One positioned text run.
#[derive(Debug, Clone)]
pub struct Run {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
}

/// A text run at `x = 72`.
pub fn run(text: &str, baseline: f32, size: f32) -> Run {
    Run {
        text: text.to_string(),
        x: 72.0,
        baseline,
        size,
    }
}

fn page_operations(runs: &[Run]) -> Vec<Operation> {
    let mut ops = Vec::new();
    for r in runs {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec!["F1".into(), r.size.into()]));
        ops.push(Operation::new("Td", vec![r.x.into(), r.baseline.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(r.text.as_str())],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
    ops
}

/// Build a document whose pages hold the given operations.
pub fn build_document(pages: Vec<Vec<Operation>>) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for operations in pages {
        let content = Content { operations };
        let stream = Stream::new(Dictionary::new(), content.encode().unwrap());
        let content_id = doc.add_object(stream);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Write a PDF with one page per entry of `pages` into `dir`.
pub fn write_pdf(dir: &Path, name: &str, pages: &[Vec<Run>]) -> PathBuf {
    let operations = pages.iter().map(|runs| page_operations(runs)).collect();
    write_document(dir, name, build_document(operations))
}

/// Save a prepared document into `dir`.
pub fn write_document(dir: &Path, name: &str, mut doc: Document) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    doc.save(&path).unwrap();
    path
}

/// The three-page RFP used across tests.
///
/// Page 1 carries a running header, the title and a heading wrapped over two
/// lines. Page 2 holds a numbered section, an unnumbered sub-heading, a
/// plain heading and two footers. Page 3 is blank.
pub fn rfp_pages() -> Vec<Vec<Run>> {
    vec![
        vec![
            run("Acme Corp | Confidential", 760.0, 10.0),
            run("Acme Corp RFP Response", 650.0, 24.0),
            run("Request for Proposal", 500.0, 12.0),
            run("for Digital Services", 486.0, 12.0),
        ],
        vec![
            run("Acme Corp | Confidential", 760.0, 10.0),
            run("2. Background", 700.0, 16.0),
            run("2.1 Scope", 660.0, 14.0),
            run("Team", 620.0, 14.0),
            run("12", 40.0, 10.0),
            run("Page 2 of 3", 20.0, 10.0),
        ],
        vec![],
    ]
}

/// Write a file that is not a PDF.
pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"this is not a pdf").unwrap();
    path
}
