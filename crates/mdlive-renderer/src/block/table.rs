//! Pipe tables.
//!
//! A table needs two lines of lookahead: a row containing `|` followed by a
//! separator line made only of `-`, `|`, `:` and whitespace. Without the
//! separator the row falls through to list or paragraph handling.

use std::sync::LazyLock;

use regex::Regex;

use super::{Block, Recognized, Row};
use crate::inline::render_inline;
use crate::lines::Document;

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|?[\s\-|:]+\|?\s*$").unwrap());

fn is_row(line: &str) -> bool {
    line.contains('|')
}

pub(super) fn matches(doc: &Document, index: usize) -> bool {
    let Some(line) = doc.line(index) else {
        return false;
    };
    is_row(line)
        && !line.trim().is_empty()
        && doc
            .line(index + 1)
            .is_some_and(|next| SEPARATOR_RE.is_match(next))
}

/// Consume the header row, the separator, and every following row line.
pub(super) fn consume(doc: &Document, start: usize) -> Recognized<'_> {
    let header = split_row(doc.line(start).unwrap_or_default());

    let mut end = start + 2;
    let mut rows = Vec::new();
    while let Some(line) = doc.line(end).filter(|line| is_row(line)) {
        rows.push(split_row(line));
        end += 1;
    }

    Recognized {
        block: Block::Table { header, rows },
        start,
        consumed: end.min(doc.len()) - start,
    }
}

/// Split a row on `|`, trim cells, and drop the empty outer cells.
fn split_row(line: &str) -> Row<'_> {
    let mut cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if cells.first().is_some_and(|cell| cell.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells
}

pub(super) fn render(header: &[&str], rows: &[Row<'_>], out: &mut String) {
    out.push_str("<table><thead><tr>");
    for cell in header {
        out.push_str("<th>");
        out.push_str(&render_inline(cell));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            out.push_str(&render_inline(cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
}
