//! Horizontal rules: `---`, `***`, `___`, optionally spaced.

use std::sync::LazyLock;

use regex::Regex;

use super::{Block, Recognized};
use crate::lines::Document;

/// Three or more of the same rule character, whitespace allowed between.
static RULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:-\s*){3,}|(?:\*\s*){3,}|(?:_\s*){3,})$").unwrap()
});

pub(super) fn matches(doc: &Document, index: usize) -> bool {
    doc.line(index).is_some_and(|line| RULE_RE.is_match(line))
}

pub(super) fn consume(_doc: &Document, start: usize) -> Recognized<'_> {
    Recognized {
        block: Block::HorizontalRule,
        start,
        consumed: 1,
    }
}

pub(super) fn render(out: &mut String) {
    out.push_str("<hr>");
}
