//! Text block extraction from PDF content streams.
//!
//! This module walks each page's content stream with `lopdf` and rebuilds
//! positioned text blocks:
//! - text operators (`Tj`, `TJ`, `'`, `"`) are decoded with the font's
//!   encoding and placed using the text matrix combined with the CTM
//! - spans sharing a baseline become a line
//! - consecutive lines become a block until a paragraph-sized gap, an upward
//!   jump, a size change or a painted graphic breaks it
//! - coordinates are flipped to top-down using the page MediaBox
//!
//! Glyph widths are not read from the font programs; horizontal extents are
//! estimated from the character count. Only vertical positions drive block
//! segmentation.
//!
//! # Examples
//!
//! ```no_run
//! use pdfoutline::extract::{BlockSource, LopdfSource};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = lopdf::Document::load("report.pdf")?;
//! let source = LopdfSource::new(&doc);
//! for index in 0..source.page_count() {
//!     let blocks = source.page_blocks(index)?;
//!     println!("page {}: {} blocks", index + 1, blocks.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};

use super::{BBox, BlockSource, Line, PageBlock, Span};
use crate::error::{PdfOutlineError, Result};

/// US Letter, used when a page has no usable MediaBox.
const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Bound on the Parent chain walk, guards against cyclic page trees.
const MAX_TREE_DEPTH: usize = 32;

/// Two spans belong to one line when their baselines differ by at most this
/// fraction of the font size.
const SAME_LINE_TOLERANCE: f32 = 0.5;

/// Largest baseline drop, relative to the previous line's size, that still
/// continues the current block.
const MAX_LINE_GAP: f32 = 1.6;

/// Size ratio above which a new line starts a new block.
const MAX_SIZE_RATIO: f32 = 1.25;

/// Average glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// `TJ` adjustments (thousandths of an em) beyond this are treated as a word
/// break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// [`BlockSource`] backed by a loaded [`lopdf::Document`].
pub struct LopdfSource<'a> {
    doc: &'a Document,
    pages: Vec<ObjectId>,
}

impl<'a> LopdfSource<'a> {
    /// Wrap a loaded document.
    pub fn new(doc: &'a Document) -> Self {
        let pages = doc.get_pages().into_values().collect();
        Self { doc, pages }
    }

    fn extraction_error(index: usize, reason: impl Into<String>) -> PdfOutlineError {
        PdfOutlineError::extraction(PathBuf::new(), index as u32 + 1, reason)
    }

    /// Walk up the page tree to find the MediaBox.
    fn media_box(&self, page_id: ObjectId) -> [f32; 4] {
        let mut current = self.doc.get_dictionary(page_id).ok();
        let mut depth = 0;

        while let Some(dict) = current
            && depth < MAX_TREE_DEPTH
        {
            depth += 1;
            if let Some(media_box) = dict
                .get(b"MediaBox")
                .ok()
                .and_then(|obj| self.resolve(obj).as_array().ok())
                .and_then(|arr| parse_rect(arr))
            {
                return media_box;
            }

            current = dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .and_then(|id| self.doc.get_dictionary(id))
                .ok();
        }

        DEFAULT_MEDIA_BOX
    }

    fn resolve<'o>(&'o self, obj: &'o Object) -> &'o Object {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(obj),
            other => other,
        }
    }
}

impl BlockSource for LopdfSource<'_> {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_blocks(&self, index: usize) -> Result<Vec<PageBlock>> {
        let page_id = *self
            .pages
            .get(index)
            .ok_or_else(|| Self::extraction_error(index, "page does not exist"))?;

        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Self::extraction_error(index, format!("cannot read fonts: {e}")))?;

        let data = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Self::extraction_error(index, format!("cannot read content: {e}")))?;

        let content = Content::decode(&data)
            .map_err(|e| Self::extraction_error(index, format!("cannot decode content: {e}")))?;

        let [_, _, _, page_top] = self.media_box(page_id);
        let decoder = TextDecoder {
            doc: self.doc,
            fonts,
        };

        let mut interpreter = Interpreter::new(decoder, BlockAssembler::new(page_top));
        for op in &content.operations {
            interpreter.apply(&op.operator, &op.operands);
        }

        Ok(interpreter.finish())
    }
}

/// Decodes string operands using the fonts of one page.
struct TextDecoder<'a> {
    doc: &'a Document,
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
}

impl TextDecoder<'_> {
    fn decode(&self, font: &[u8], bytes: &[u8]) -> String {
        if let Some(dict) = self.fonts.get(font)
            && let Ok(encoding) = dict.get_font_encoding(self.doc)
            && let Ok(text) = Document::decode_text(&encoding, bytes)
        {
            return text;
        }
        decode_text_simple(bytes)
    }
}

/// Affine transform `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(tx: f32, ty: f32) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    fn from_operands(operands: &[Object]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        let n: Vec<f32> = operands[..6].iter().filter_map(get_number).collect();
        if n.len() < 6 {
            return None;
        }
        Some(Self {
            a: n[0],
            b: n[1],
            c: n[2],
            d: n[3],
            e: n[4],
            f: n[5],
        })
    }

    /// `self × other`: apply `self` first, then `other`.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    fn vertical_scale(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

/// A decoded text run placed in unflipped page space.
#[derive(Debug, Clone)]
struct PlacedSpan {
    text: String,
    x: f32,
    baseline: f32,
    size: f32,
}

impl PlacedSpan {
    fn estimated_end(&self) -> f32 {
        self.x + estimate_width(&self.text, self.size)
    }
}

/// Content-stream state machine feeding a [`BlockAssembler`].
struct Interpreter<'a> {
    decoder: TextDecoder<'a>,
    assembler: BlockAssembler,
    ctm: Matrix,
    saved: Vec<Matrix>,
    tm: Matrix,
    tlm: Matrix,
    font: Vec<u8>,
    font_size: f32,
    leading: f32,
}

impl<'a> Interpreter<'a> {
    fn new(decoder: TextDecoder<'a>, assembler: BlockAssembler) -> Self {
        Self {
            decoder,
            assembler,
            ctm: Matrix::IDENTITY,
            saved: Vec::new(),
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            font: Vec::new(),
            font_size: 12.0,
            leading: 0.0,
        }
    }

    fn apply(&mut self, operator: &str, operands: &[Object]) {
        match operator {
            "q" => self.saved.push(self.ctm),
            "Q" => {
                if let Some(ctm) = self.saved.pop() {
                    self.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.ctm = m.then(&self.ctm);
                }
            }
            "BT" => {
                self.tm = Matrix::IDENTITY;
                self.tlm = Matrix::IDENTITY;
            }
            "Tf" => {
                if let Some(Object::Name(name)) = operands.first() {
                    self.font = name.clone();
                }
                if let Some(size) = operands.get(1).and_then(get_number) {
                    self.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(get_number) {
                    self.leading = leading;
                }
            }
            "Td" | "TD" => {
                let tx = operands.first().and_then(get_number).unwrap_or(0.0);
                let ty = operands.get(1).and_then(get_number).unwrap_or(0.0);
                if operator == "TD" {
                    self.leading = -ty;
                }
                self.move_line(tx, ty);
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.tm = m;
                    self.tlm = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decoder.decode(&self.font, bytes);
                    self.show(text);
                }
            }
            "'" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decoder.decode(&self.font, bytes);
                    self.show(text);
                }
            }
            "\"" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    let text = self.decoder.decode(&self.font, bytes);
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    self.show_array(items);
                }
            }
            "Do" | "BI" => {
                let (x0, y0) = self.ctm.apply(0.0, 0.0);
                let (x1, y1) = self.ctm.apply(1.0, 1.0);
                self.assembler.push_graphic(x0, y0, x1, y1);
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.tlm = Matrix::translation(tx, ty).then(&self.tlm);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            self.font_size * 1.2
        };
        self.move_line(0.0, -leading);
    }

    fn advance(&mut self, tx: f32) {
        self.tm = Matrix::translation(tx, 0.0).then(&self.tm);
    }

    fn show(&mut self, text: String) {
        let device = self.tm.then(&self.ctm);
        let (x, baseline) = device.apply(0.0, 0.0);
        let size = self.font_size * device.vertical_scale();
        let advance = estimate_width(&text, self.font_size);

        self.assembler.push_span(PlacedSpan {
            text,
            x,
            baseline,
            size,
        });
        self.advance(advance);
    }

    fn show_array(&mut self, items: &[Object]) {
        let mut combined = String::new();

        for item in items {
            match item {
                Object::String(bytes, _) => {
                    combined.push_str(&self.decoder.decode(&self.font, bytes));
                }
                other => {
                    let Some(adjustment) = get_number(other) else {
                        continue;
                    };
                    if -adjustment > TJ_SPACE_THRESHOLD
                        && !combined.is_empty()
                        && !combined.ends_with(char::is_whitespace)
                    {
                        combined.push(' ');
                    }
                }
            }
        }

        self.show(combined);
    }

    fn finish(mut self) -> Vec<PageBlock> {
        self.assembler.finish()
    }
}

/// A line being assembled.
#[derive(Debug)]
struct LineDraft {
    spans: Vec<String>,
    x0: f32,
    end: f32,
    baseline: f32,
    size: f32,
}

impl LineDraft {
    fn start(span: PlacedSpan) -> Self {
        let end = span.estimated_end();
        Self {
            x0: span.x,
            end,
            baseline: span.baseline,
            size: span.size,
            spans: vec![span.text],
        }
    }

    fn accepts(&self, span: &PlacedSpan) -> bool {
        let tolerance = SAME_LINE_TOLERANCE * self.size.max(span.size);
        (span.baseline - self.baseline).abs() <= tolerance
    }

    fn push(&mut self, mut span: PlacedSpan) {
        let gap = span.x - self.end;
        let joins_words = self
            .spans
            .last()
            .is_some_and(|prev| !prev.ends_with(char::is_whitespace))
            && !span.text.starts_with(char::is_whitespace);
        if joins_words && gap > 0.25 * span.size {
            span.text.insert(0, ' ');
        }

        self.x0 = self.x0.min(span.x);
        self.end = self.end.max(span.estimated_end());
        self.size = self.size.max(span.size);
        self.spans.push(span.text);
    }
}

/// Groups placed spans into lines and blocks for one page.
struct BlockAssembler {
    page_top: f32,
    lines: Vec<LineDraft>,
    blocks: Vec<PageBlock>,
}

impl BlockAssembler {
    fn new(page_top: f32) -> Self {
        Self {
            page_top,
            lines: Vec::new(),
            blocks: Vec::new(),
        }
    }

    fn push_span(&mut self, span: PlacedSpan) {
        if let Some(line) = self.lines.last_mut()
            && line.accepts(&span)
        {
            line.push(span);
            return;
        }

        if span.text.trim().is_empty() {
            return;
        }

        if let Some(prev) = self.lines.last()
            && !continues_block(prev, &span)
        {
            self.flush();
        }

        self.lines.push(LineDraft::start(span));
    }

    fn push_graphic(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        self.flush();
        let top = self.page_top - y0.max(y1);
        let bottom = self.page_top - y0.min(y1);
        self.blocks
            .push(PageBlock::graphic(BBox::new(x0.min(x1), top, x0.max(x1), bottom)));
    }

    fn flush(&mut self) {
        if self.lines.is_empty() {
            return;
        }

        let mut bbox: Option<BBox> = None;
        let mut lines = Vec::with_capacity(self.lines.len());

        for draft in self.lines.drain(..) {
            let line_box = BBox::new(
                draft.x0,
                self.page_top - (draft.baseline + draft.size),
                draft.end,
                self.page_top - draft.baseline + 0.25 * draft.size,
            );
            bbox = Some(match bbox {
                Some(acc) => acc.union(&line_box),
                None => line_box,
            });
            lines.push(Line::new(draft.spans.into_iter().map(Span::new).collect()));
        }

        if let Some(bbox) = bbox {
            self.blocks.push(PageBlock::text(bbox, lines));
        }
    }

    fn finish(&mut self) -> Vec<PageBlock> {
        self.flush();
        std::mem::take(&mut self.blocks)
    }
}

/// Whether a new line starting with `span` belongs to the block of `prev`.
fn continues_block(prev: &LineDraft, span: &PlacedSpan) -> bool {
    let drop = prev.baseline - span.baseline;
    if drop <= 0.0 || drop > MAX_LINE_GAP * prev.size {
        return false;
    }

    let (small, large) = if prev.size < span.size {
        (prev.size, span.size)
    } else {
        (span.size, prev.size)
    };
    small > 0.0 && large / small <= MAX_SIZE_RATIO
}

fn estimate_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_WIDTH
}

fn parse_rect(arr: &[Object]) -> Option<[f32; 4]> {
    if arr.len() < 4 {
        return None;
    }
    let llx = arr[0].as_float().ok()?;
    let lly = arr[1].as_float().ok()?;
    let urx = arr[2].as_float().ok()?;
    let ury = arr[3].as_float().ok()?;
    Some([llx.min(urx), lly.min(ury), llx.max(urx), lly.max(ury)])
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Decoding fallback when the font gives no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, baseline: f32, size: f32) -> PlacedSpan {
        PlacedSpan {
            text: text.to_string(),
            x,
            baseline,
            size,
        }
    }

    fn texts(block: &PageBlock) -> Vec<String> {
        block
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.text.as_str()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_matrix_then_composes_translation() {
        let m = Matrix::translation(10.0, 20.0).then(&Matrix::translation(5.0, -5.0));
        assert_eq!(m.apply(0.0, 0.0), (15.0, 15.0));
    }

    #[test]
    fn test_matrix_vertical_scale() {
        let m = Matrix {
            a: 2.0,
            b: 0.0,
            c: 0.0,
            d: 3.0,
            e: 0.0,
            f: 0.0,
        };
        assert_eq!(m.vertical_scale(), 3.0);
    }

    #[test]
    fn test_assembler_merges_wrapped_lines() {
        let mut asm = BlockAssembler::new(792.0);
        asm.push_span(span("Request for Proposal", 72.0, 500.0, 12.0));
        asm.push_span(span("for Digital Services", 72.0, 486.0, 12.0));
        let blocks = asm.finish();

        assert_eq!(blocks.len(), 1);
        assert_eq!(texts(&blocks[0]), vec!["Request for Proposal", "for Digital Services"]);
        assert_eq!(blocks[0].bbox.y0, 792.0 - 512.0);
    }

    #[test]
    fn test_assembler_splits_on_large_gap() {
        let mut asm = BlockAssembler::new(792.0);
        asm.push_span(span("Title", 72.0, 650.0, 24.0));
        asm.push_span(span("Body text", 72.0, 600.0, 12.0));
        let blocks = asm.finish();
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_assembler_splits_on_size_change() {
        let mut asm = BlockAssembler::new(792.0);
        asm.push_span(span("Heading", 72.0, 500.0, 18.0));
        asm.push_span(span("Body", 72.0, 484.0, 10.0));
        assert_eq!(asm.finish().len(), 2);
    }

    #[test]
    fn test_assembler_splits_on_upward_jump() {
        let mut asm = BlockAssembler::new(792.0);
        asm.push_span(span("Left column end", 72.0, 100.0, 12.0));
        asm.push_span(span("Right column start", 320.0, 700.0, 12.0));
        assert_eq!(asm.finish().len(), 2);
    }

    #[test]
    fn test_assembler_joins_same_baseline_spans() {
        let mut asm = BlockAssembler::new(792.0);
        asm.push_span(span("2.", 72.0, 500.0, 12.0));
        asm.push_span(span("Background", 100.0, 500.0, 12.0));
        let blocks = asm.finish();
        assert_eq!(blocks.len(), 1);
        assert_eq!(texts(&blocks[0]), vec!["2. Background"]);
    }

    #[test]
    fn test_assembler_graphic_breaks_block() {
        let mut asm = BlockAssembler::new(792.0);
        asm.push_span(span("Caption above", 72.0, 500.0, 12.0));
        asm.push_graphic(72.0, 300.0, 272.0, 480.0);
        asm.push_span(span("Caption below", 72.0, 488.0, 12.0));
        let blocks = asm.finish();

        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].is_text());
        assert!(!blocks[1].is_text());
        assert_eq!(blocks[1].bbox.y0, 792.0 - 480.0);
        assert!(blocks[2].is_text());
    }

    #[test]
    fn test_assembler_ignores_leading_whitespace_spans() {
        let mut asm = BlockAssembler::new(792.0);
        asm.push_span(span("   ", 72.0, 500.0, 12.0));
        assert!(asm.finish().is_empty());
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Scope"), "Scope");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42]), "AB");
        assert_eq!(decode_text_simple(&[0x43, 0x61, 0x66, 0xE9]), "Café");
    }

    #[test]
    fn test_parse_rect_normalizes_corners() {
        let arr = vec![
            Object::Integer(612),
            Object::Integer(792),
            Object::Integer(0),
            Object::Real(0.0),
        ];
        assert_eq!(parse_rect(&arr), Some([0.0, 0.0, 612.0, 792.0]));
        assert_eq!(parse_rect(&arr[..2]), None);
    }
}
