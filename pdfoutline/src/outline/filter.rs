//! Heading candidate filtering.
//!
//! Blocks are first normalized into one string, then checked against a fixed,
//! ordered list of rejection rules aimed at layout artifacts: dot leaders and
//! rules, page numbers, running footers, and repeated boilerplate.

use std::fmt;

use crate::extract::PageBlock;

/// Blocks whose top edge lies above this distance from the top of the page
/// sit in the running-header band and are never heading candidates.
pub const HEADER_BAND_LIMIT: f32 = 80.0;

/// Why a block's text is not a heading candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing left after normalization.
    Empty,
    /// Only whitespace, periods, hyphens or en-dashes.
    Punctuation,
    /// Ends in a page number.
    PageNumber,
    /// Contains a "Page " marker.
    PageMarker,
    /// Copyright or version footer.
    Boilerplate,
    /// Repeated "RFP:" boilerplate lines.
    RepeatedBoilerplate,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Empty => "empty",
            Self::Punctuation => "punctuation only",
            Self::PageNumber => "trailing page number",
            Self::PageMarker => "page marker",
            Self::Boilerplate => "footer boilerplate",
            Self::RepeatedBoilerplate => "repeated RFP boilerplate",
        };
        f.write_str(reason)
    }
}

/// Whether a block starts inside the header band.
pub fn in_header_band(block: &PageBlock, limit: f32) -> bool {
    block.bbox.y0 < limit
}

/// Merge a block's lines and spans into one string.
///
/// Spans of a line are concatenated as-is and the line trimmed; lines are
/// joined with a single space and the result trimmed again.
pub fn normalize(block: &PageBlock) -> String {
    block
        .lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.text.as_str())
                .collect::<String>()
                .trim()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Return the first rule that rejects `text`, if any.
pub fn rejection(text: &str) -> Option<Rejection> {
    if text.trim().is_empty() {
        return Some(Rejection::Empty);
    }
    if is_rule_line(text) {
        return Some(Rejection::Punctuation);
    }
    if ends_with_page_number(text) {
        return Some(Rejection::PageNumber);
    }
    if text.contains("Page ") {
        return Some(Rejection::PageMarker);
    }
    if text.starts_with('©') || text.starts_with("Version ") {
        return Some(Rejection::Boilerplate);
    }
    if text.contains("RFP:") {
        return Some(Rejection::RepeatedBoilerplate);
    }
    None
}

/// Whether normalized text may become an outline entry.
pub fn is_candidate(text: &str) -> bool {
    rejection(text).is_none()
}

fn is_rule_line(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_whitespace() || matches!(c, '.' | '-' | '–'))
}

/// A digit run at the very end, either preceded by whitespace or making up
/// the whole text.
fn ends_with_page_number(text: &str) -> bool {
    let body = text.trim_end_matches(|c: char| c.is_ascii_digit());
    if body.len() == text.len() {
        return false;
    }
    body.is_empty() || body.ends_with(char::is_whitespace)
}
