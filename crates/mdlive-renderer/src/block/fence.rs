//! Fenced code blocks delimited by triple backticks.

use super::{Block, Recognized};
use crate::html;
use crate::lines::Document;

const FENCE: &str = "```";

pub(super) fn matches(doc: &Document, index: usize) -> bool {
    doc.line(index).is_some_and(|line| line.starts_with(FENCE))
}

/// Consume the opening fence, the content, and the closing fence.
///
/// Without a closing fence the block runs to the end of the document.
pub(super) fn consume(doc: &Document, start: usize) -> Recognized<'_> {
    let opening = doc.line(start).unwrap_or_default();
    let language = parse_language(&opening[FENCE.len().min(opening.len())..]);

    let close = (start + 1..doc.len()).find(|&idx| doc.line(idx).is_some_and(is_closing_fence));
    let (content_end, end) = match close {
        Some(idx) => (idx, idx + 1),
        None => {
            tracing::debug!(line = start + 1, "Unterminated code fence runs to end of document");
            (doc.len(), doc.len())
        }
    };

    Recognized {
        block: Block::FencedCode {
            language,
            lines: doc.lines(start + 1, content_end).collect(),
        },
        start,
        consumed: end - start,
    }
}

pub(super) fn render(language: Option<&str>, lines: &[&str], out: &mut String) {
    html::code_block(language, &lines.join("\n"), out);
}

/// Leading alphanumeric word after the opening backticks.
fn parse_language(info: &str) -> Option<&str> {
    let end = info
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(info.len());
    (end > 0).then(|| &info[..end])
}

fn is_closing_fence(line: &str) -> bool {
    line.trim_end() == FENCE
}
