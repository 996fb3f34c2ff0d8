//! Positioned text blocks, as handed to the outline core.
//!
//! A [`BlockSource`] yields, page by page, the blocks found on that page in
//! content order. Each block carries a bounding box in top-down page
//! coordinates (y grows downward from the top edge) and its text as lines of
//! spans. The outline core only reads from this model.
//!
//! [`content::LopdfSource`] is the production source; slices of pages
//! (`[Vec<PageBlock>]`) implement the trait too, which is how the core is
//! exercised without a PDF.

pub mod content;

pub use content::LopdfSource;

use crate::error::Result;

/// What a block holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Text lines; the only kind the outline core looks at.
    Text,
    /// An image or other painted object.
    Graphic,
}

/// Axis-aligned bounding box in top-down page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BBox {
    /// Left edge.
    pub x0: f32,
    /// Top edge (distance from the top of the page).
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Bottom edge.
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from its four edges.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// A run of text sharing formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// The decoded text of the run.
    pub text: String,
}

impl Span {
    /// Create a span.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One visual line of a block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    /// Spans in reading order.
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from its spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }
}

/// A block of a page as segmented by the extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBlock {
    /// Whether the block holds text.
    pub kind: BlockKind,
    /// Bounding box; only `y0` matters to the outline core.
    pub bbox: BBox,
    /// Lines in reading order. Empty for graphic blocks.
    pub lines: Vec<Line>,
}

impl PageBlock {
    /// Create a text block.
    pub fn text(bbox: BBox, lines: Vec<Line>) -> Self {
        Self {
            kind: BlockKind::Text,
            bbox,
            lines,
        }
    }

    /// Create a graphic block.
    pub fn graphic(bbox: BBox) -> Self {
        Self {
            kind: BlockKind::Graphic,
            bbox,
            lines: Vec::new(),
        }
    }

    /// Convenience constructor: one span per line, laid out from `y0`.
    pub fn from_lines<I, S>(y0: f32, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<Line> = lines
            .into_iter()
            .map(|text| Line::new(vec![Span::new(text)]))
            .collect();
        let height = 12.0 * lines.len().max(1) as f32;
        Self::text(BBox::new(0.0, y0, 0.0, y0 + height), lines)
    }

    /// Whether the block holds text.
    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }
}

/// Anything that can hand out the blocks of a document, page by page.
///
/// Pages are addressed by zero-based index and must be requested in
/// ascending order by the outline core; implementations may still allow
/// random access.
pub trait BlockSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Blocks of the page at `index`, in content order.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOutlineError::Extraction`](crate::PdfOutlineError::Extraction)
    /// when the page cannot be read.
    fn page_blocks(&self, index: usize) -> Result<Vec<PageBlock>>;
}

impl BlockSource for [Vec<PageBlock>] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_blocks(&self, index: usize) -> Result<Vec<PageBlock>> {
        Ok(self.get(index).cloned().unwrap_or_default())
    }
}

impl BlockSource for Vec<Vec<PageBlock>> {
    fn page_count(&self) -> usize {
        self.as_slice().page_count()
    }

    fn page_blocks(&self, index: usize) -> Result<Vec<PageBlock>> {
        self.as_slice().page_blocks(index)
    }
}
