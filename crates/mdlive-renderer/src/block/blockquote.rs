//! Blockquotes: contiguous `>` lines rendered as a single inline unit.

use super::{Block, Recognized};
use crate::html;
use crate::inline::render_inline;
use crate::lines::Document;

fn strip_marker(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

pub(super) fn matches(doc: &Document, index: usize) -> bool {
    doc.line(index).and_then(strip_marker).is_some()
}

pub(super) fn consume(doc: &Document, start: usize) -> Recognized<'_> {
    let lines: Vec<&str> = (start..doc.len())
        .map_while(|idx| doc.line(idx).and_then(strip_marker))
        .collect();
    let consumed = lines.len().max(1);

    Recognized {
        block: Block::Blockquote { lines },
        start,
        consumed,
    }
}

pub(super) fn render(lines: &[&str], out: &mut String) {
    html::blockquote(&render_inline(&lines.join("\n")), out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("> quoted"), Some("quoted"));
        assert_eq!(strip_marker(">tight"), Some("tight"));
        assert_eq!(strip_marker(">  two spaces"), Some(" two spaces"));
        assert_eq!(strip_marker(" > indented"), None);
    }

    #[test]
    fn test_contiguous_lines_joined() {
        let doc = Document::new("> one\n> *two*\n\n> three");
        let recognized = consume(&doc, 0);
        assert_eq!(recognized.consumed, 2);

        let mut out = String::new();
        if let Block::Blockquote { lines } = &recognized.block {
            render(lines, &mut out);
        }
        assert_eq!(out, "<blockquote>one\n<em>two</em></blockquote>");
    }

    #[test]
    fn test_no_nested_blocks() {
        let doc = Document::new("> # not a header\n> - not a list");
        let mut out = String::new();
        if let Block::Blockquote { lines } = &consume(&doc, 0).block {
            render(lines, &mut out);
        }
        assert_eq!(
            out,
            "<blockquote># not a header\n- not a list</blockquote>"
        );
    }
}
