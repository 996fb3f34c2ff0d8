//! Heading level assignment.
//!
//! Every candidate block becomes an outline entry. Its level comes from one
//! of two policies:
//!
//! - **Numbered** text (`"3. Introduction"`, `"1.2. Scope"`) is leveled by the
//!   depth of its numeral alone: one group is H2, two or more are H3.
//! - **Unnumbered** text is leveled by its position on the page: the first
//!   entry of a page is H1, an entry following an H2 is H3, anything else H2.
//!
//! The page-local state is an explicit [`ClassificationContext`] value that
//! goes in and comes back out of [`classify`].

use super::Level;

/// Page-local state threaded through classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationContext {
    first_on_page: bool,
    prev_level: Option<Level>,
}

impl ClassificationContext {
    /// Context for the start of a page.
    pub fn new_page() -> Self {
        Self {
            first_on_page: true,
            prev_level: None,
        }
    }

    /// True until the page has produced its first entry.
    pub fn first_on_page(&self) -> bool {
        self.first_on_page
    }

    /// Level of the previous entry on this page.
    pub fn prev_level(&self) -> Option<Level> {
        self.prev_level
    }

    fn after(level: Level) -> Self {
        Self {
            first_on_page: false,
            prev_level: Some(level),
        }
    }
}

impl Default for ClassificationContext {
    fn default() -> Self {
        Self::new_page()
    }
}

/// Level and emitted text for one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Assigned level.
    pub level: Level,
    /// Text as it appears in the outline.
    pub text: String,
    /// Whether the numbered policy applied.
    pub numbered: bool,
}

/// A leading dotted numeral such as `"2."` or `"1.4.2."`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numbering<'a> {
    /// The numeral including its trailing period.
    pub numeral: &'a str,
    /// Everything after the numeral and any whitespace, up to the first line
    /// feed.
    pub rest: &'a str,
}

impl Numbering<'_> {
    /// Number of dot-separated groups, so `"1.4.2."` has depth 3.
    pub fn depth(&self) -> usize {
        self.numeral.trim_end_matches('.').split('.').count()
    }

    /// H2 for a single group, H3 for any deeper numeral.
    pub fn level(&self) -> Level {
        if self.depth() > 1 { Level::H3 } else { Level::H2 }
    }
}

/// Match a dotted numeral anchored at the start of `text`.
///
/// The numeral is the longest run of digit groups joined by single periods
/// and must be followed directly by one more period; `"2.1 Scope"` therefore
/// does not match, while `"2.1. Scope"` and `"2. Scope"` do.
pub fn parse_numbering(text: &str) -> Option<Numbering<'_>> {
    let bytes = text.as_bytes();
    let mut pos = digit_run(bytes, 0)?;

    while pos < bytes.len() && bytes[pos] == b'.' {
        match digit_run(bytes, pos + 1) {
            Some(next) => pos = next,
            None => break,
        }
    }

    if bytes.get(pos) != Some(&b'.') {
        return None;
    }

    let numeral = &text[..=pos];
    let after = text[pos + 1..].trim_start();
    let rest = after.split('\n').next().unwrap_or_default();

    Some(Numbering { numeral, rest })
}

/// End index of a non-empty ASCII digit run starting at `start`.
fn digit_run(bytes: &[u8], start: usize) -> Option<usize> {
    let len = bytes[start.min(bytes.len())..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    (len > 0).then_some(start + len)
}

/// Classify one candidate text against the page context.
///
/// Returns the classification together with the context for the next block
/// on the same page.
pub fn classify(
    text: &str,
    ctx: ClassificationContext,
) -> (Classification, ClassificationContext) {
    let classification = match parse_numbering(text) {
        Some(numbering) => Classification {
            level: numbering.level(),
            text: format!("{} {}", numbering.numeral, numbering.rest.trim()),
            numbered: true,
        },
        None => {
            let level = if ctx.first_on_page {
                Level::H1
            } else if ctx.prev_level == Some(Level::H2) {
                Level::H3
            } else {
                Level::H2
            };
            Classification {
                level,
                text: text.to_string(),
                numbered: false,
            }
        }
    };

    let next = ClassificationContext::after(classification.level);
    (classification, next)
}
