//! Paragraphs, the default block.

use super::{Block, Recognized, starts_block};
use crate::escape::protect_and_escape;
use crate::html;
use crate::inline::render_inline;
use crate::lines::Document;

/// Collect non-blank lines until one would open another block.
///
/// A blank starting line yields an empty paragraph that still consumes it.
pub(super) fn consume(doc: &Document, start: usize) -> Recognized<'_> {
    let mut lines = Vec::new();
    if !doc.is_blank(start) {
        lines.extend(doc.line(start));
        let mut idx = start + 1;
        while !doc.is_blank(idx) && !starts_block(doc, idx) {
            lines.extend(doc.line(idx));
            idx += 1;
        }
    }
    let consumed = lines.len().max(1);

    Recognized {
        block: Block::Paragraph { lines },
        start,
        consumed,
    }
}

/// Escape raw markup, then render inline spans.
pub(super) fn render(lines: &[&str], out: &mut String) {
    let text = lines.join(" ");
    html::paragraph(&render_inline(&protect_and_escape(&text)), out);
}
