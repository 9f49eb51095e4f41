//! Flat lists: unordered, ordered, and task items.
//!
//! The list tag is fixed by the first item of a contiguous run, so a run that
//! starts with `-` stays a `<ul>` even if later lines are numbered. Item
//! indentation is recorded but never produces nested lists.

use std::sync::LazyLock;

use regex::Regex;

use super::{Block, ItemKind, ListItem, ListKind, Recognized};
use crate::html;
use crate::inline::render_inline;
use crate::lines::Document;

static TASK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[-*+]\s+\[( |x)\]\s+(\S.*)$").unwrap());

static UNORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[-*+]\s+(\S.*)$").unwrap());

static ORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\d+\.\s+(\S.*)$").unwrap());

/// Parse one list item line.
fn parse_item(line: &str) -> Option<ListItem<'_>> {
    if let Some(caps) = TASK_RE.captures(line) {
        return Some(ListItem {
            kind: ItemKind::Task,
            indent: caps[1].len(),
            checked: Some(&caps[2] == "x"),
            content: caps.get(3)?.as_str().trim_end(),
        });
    }
    if let Some(caps) = UNORDERED_RE.captures(line) {
        return Some(ListItem {
            kind: ItemKind::Unordered,
            indent: caps[1].len(),
            checked: None,
            content: caps.get(2)?.as_str().trim_end(),
        });
    }
    ORDERED_RE.captures(line).and_then(|caps| {
        Some(ListItem {
            kind: ItemKind::Ordered,
            indent: caps[1].len(),
            checked: None,
            content: caps.get(2)?.as_str().trim_end(),
        })
    })
}

pub(super) fn matches(doc: &Document, index: usize) -> bool {
    doc.line(index).and_then(parse_item).is_some()
}

pub(super) fn consume(doc: &Document, start: usize) -> Recognized<'_> {
    let items: Vec<ListItem<'_>> = (start..doc.len())
        .map_while(|idx| doc.line(idx).and_then(parse_item))
        .collect();
    let kind = items
        .first()
        .map_or(ListKind::Unordered, |item| item.kind.list_kind());
    let consumed = items.len().max(1);

    Recognized {
        block: Block::List { kind, items },
        start,
        consumed,
    }
}

pub(super) fn render(kind: ListKind, items: &[ListItem<'_>], out: &mut String) {
    let tag = match kind {
        ListKind::Unordered => "ul",
        ListKind::Ordered => "ol",
    };
    out.push('<');
    out.push_str(tag);
    out.push('>');
    for item in items {
        match item.checked {
            Some(checked) => {
                out.push_str(r#"<li class="task-list-item">"#);
                html::task_checkbox(checked, out);
                out.push(' ');
            }
            None => out.push_str("<li>"),
        }
        out.push_str(&render_inline(item.content));
        out.push_str("</li>");
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
