//! ATX headings: `# Title` through `###### Title`.

use std::sync::LazyLock;

use regex::Regex;

use super::{Block, Recognized};
use crate::html;
use crate::inline::render_inline;
use crate::lines::Document;

/// One to six `#`, whitespace, then non-blank text.
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*\S)\s*$").unwrap());

pub(super) fn matches(doc: &Document, index: usize) -> bool {
    doc.line(index).is_some_and(|line| HEADER_RE.is_match(line))
}

pub(super) fn consume(doc: &Document, start: usize) -> Recognized<'_> {
    let line = doc.line(start).unwrap_or_default();
    let block = match HEADER_RE.captures(line) {
        Some(caps) => Block::Header {
            level: caps.get(1).map_or(1, |m| u8::try_from(m.len()).unwrap_or(6)),
            text: caps.get(2).map_or("", |m| m.as_str()),
        },
        None => Block::Paragraph { lines: vec![line] },
    };
    Recognized {
        block,
        start,
        consumed: 1,
    }
}

pub(super) fn render(level: u8, text: &str, out: &mut String) {
    html::heading(level, &render_inline(text), out);
}
