//! Block recognition and dispatch.
//!
//! At each line index the dispatcher walks a fixed priority table of
//! `(kind, predicate, processor)` entries:
//!
//! Header → Fenced code → Table → List → Blockquote → Horizontal rule
//!
//! and falls back to a paragraph when nothing matches. Predicates look at one
//! line (two for tables) so the paragraph processor can cheaply stop at the
//! first line that would open another block.

mod blockquote;
mod fence;
mod header;
mod list;
mod paragraph;
mod rule;
mod table;

use crate::lines::Document;

/// A table row: trimmed cell strings with outer empty cells dropped.
pub type Row<'a> = Vec<&'a str>;

/// Tag family of a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListKind {
    /// `<ul>`, used for unordered and task items.
    Unordered,
    /// `<ol>`.
    Ordered,
}

/// Marker family of a single list item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// `- text`, `* text`, `+ text`.
    Unordered,
    /// `1. text`.
    Ordered,
    /// `- [ ] text`, `- [x] text`.
    Task,
}

impl ItemKind {
    /// List tag implied by this item.
    #[must_use]
    pub fn list_kind(self) -> ListKind {
        match self {
            Self::Unordered | Self::Task => ListKind::Unordered,
            Self::Ordered => ListKind::Ordered,
        }
    }
}

/// One recognized list item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListItem<'a> {
    pub kind: ItemKind,
    /// Leading whitespace width. Recorded only; lists always render flat.
    pub indent: usize,
    /// Checkbox state for task items, `None` otherwise.
    pub checked: Option<bool>,
    pub content: &'a str,
}

/// A recognized block, borrowing its text from the [`Document`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block<'a> {
    Header {
        level: u8,
        text: &'a str,
    },
    FencedCode {
        language: Option<&'a str>,
        lines: Vec<&'a str>,
    },
    Table {
        header: Row<'a>,
        rows: Vec<Row<'a>>,
    },
    List {
        kind: ListKind,
        items: Vec<ListItem<'a>>,
    },
    Blockquote {
        lines: Vec<&'a str>,
    },
    HorizontalRule,
    Paragraph {
        lines: Vec<&'a str>,
    },
}

/// Discriminant of [`Block`], used in the dispatch table and for counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockKind {
    Header,
    FencedCode,
    Table,
    List,
    Blockquote,
    HorizontalRule,
    Paragraph,
}

impl Block<'_> {
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Header { .. } => BlockKind::Header,
            Self::FencedCode { .. } => BlockKind::FencedCode,
            Self::Table { .. } => BlockKind::Table,
            Self::List { .. } => BlockKind::List,
            Self::Blockquote { .. } => BlockKind::Blockquote,
            Self::HorizontalRule => BlockKind::HorizontalRule,
            Self::Paragraph { .. } => BlockKind::Paragraph,
        }
    }

    /// Render this block to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        match self {
            Self::Header { level, text } => header::render(*level, text, &mut out),
            Self::FencedCode { language, lines } => fence::render(*language, lines, &mut out),
            Self::Table { header, rows } => table::render(header, rows, &mut out),
            Self::List { kind, items } => list::render(*kind, items, &mut out),
            Self::Blockquote { lines } => blockquote::render(lines, &mut out),
            Self::HorizontalRule => rule::render(&mut out),
            Self::Paragraph { lines } => paragraph::render(lines, &mut out),
        }
        out
    }

    fn is_empty_paragraph(&self) -> bool {
        matches!(self, Self::Paragraph { lines } if lines.is_empty())
    }
}

/// A block together with the lines it was recognized from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recognized<'a> {
    pub block: Block<'a>,
    /// Index of the first consumed line.
    pub start: usize,
    /// Number of lines consumed, always at least one.
    pub consumed: usize,
}

type Predicate = fn(&Document, usize) -> bool;
type Processor = for<'a> fn(&'a Document, usize) -> Recognized<'a>;

/// Block processors in priority order. Paragraph is the implicit default.
const MATCHERS: [(BlockKind, Predicate, Processor); 6] = [
    (BlockKind::Header, header::matches, header::consume),
    (BlockKind::FencedCode, fence::matches, fence::consume),
    (BlockKind::Table, table::matches, table::consume),
    (BlockKind::List, list::matches, list::consume),
    (BlockKind::Blockquote, blockquote::matches, blockquote::consume),
    (BlockKind::HorizontalRule, rule::matches, rule::consume),
];

/// Whether the line at `index` opens any non-paragraph block.
pub(crate) fn starts_block(doc: &Document, index: usize) -> bool {
    MATCHERS.iter().any(|(_, matches, _)| matches(doc, index))
}

/// Recognize every block in `doc`, in document order.
///
/// Leading blank lines are skipped; blank lines between blocks produce no
/// output. The line index strictly increases on every step.
pub fn scan(doc: &Document) -> Vec<Recognized<'_>> {
    let mut blocks = Vec::new();
    let mut index = doc.first_content_line();

    while index < doc.len() {
        let recognized = match MATCHERS.iter().find(|(_, matches, _)| matches(doc, index)) {
            Some((_, _, consume)) => consume(doc, index),
            None => paragraph::consume(doc, index),
        };
        debug_assert!(recognized.consumed >= 1, "block processor made no progress");
        index += recognized.consumed.max(1);

        if !recognized.block.is_empty_paragraph() {
            blocks.push(recognized);
        }
    }

    blocks
}
