//! Line normalization.
//!
//! Canonicalizes line endings and splits the input into the immutable line
//! sequence that the block dispatcher walks.

use crate::escape::{TOKEN_END, TOKEN_START};

/// A normalized markdown document.
///
/// Owns the normalized text and exposes it as an ordered sequence of lines.
/// Created at the start of a parse and dropped at the end of it.
#[derive(Debug)]
pub struct Document {
    text: String,
    /// Byte ranges of each line within `text`.
    spans: Vec<(usize, usize)>,
}

impl Document {
    /// Normalize `input` and split it into lines.
    ///
    /// `\r\n` and lone `\r` become `\n`. Placeholder sentinel characters are
    /// removed so user text cannot collide with protected span tokens.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let text = normalize(input);
        let mut spans = Vec::new();
        if !text.is_empty() {
            let mut start = 0;
            for (idx, _) in text.match_indices('\n') {
                spans.push((start, idx));
                start = idx + 1;
            }
            spans.push((start, text.len()));
        }
        Self { text, spans }
    }

    /// Number of lines in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether the document has no lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Line at `index`, or `None` past the end.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.spans
            .get(index)
            .map(|&(start, end)| &self.text[start..end])
    }

    /// Lines in `range`, clamped to the document length.
    pub fn lines(&self, start: usize, end: usize) -> impl Iterator<Item = &str> {
        let end = end.min(self.len());
        (start.min(end)..end).filter_map(|idx| self.line(idx))
    }

    /// Whether the line at `index` is blank (empty or whitespace only).
    ///
    /// Lines past the end count as blank.
    #[must_use]
    pub fn is_blank(&self, index: usize) -> bool {
        self.line(index).is_none_or(|line| line.trim().is_empty())
    }

    /// Index of the first non-blank line.
    ///
    /// Returns [`len`](Self::len) when the document is entirely blank.
    #[must_use]
    pub fn first_content_line(&self) -> usize {
        (0..self.len())
            .find(|&idx| !self.is_blank(idx))
            .unwrap_or(self.len())
    }
}

fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            TOKEN_START | TOKEN_END => {}
            _ => out.push(c),
        }
    }
    out
}
