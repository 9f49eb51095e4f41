//! Single-pass markdown to sanitized HTML renderer.
//!
//! This crate provides [`MarkdownParser`], a pure `markdown -> html` function
//! built as a two-level scanner:
//!
//! - **Blocks** ([`scan`]): at each line a fixed priority table is tried
//!   (header, fenced code, table, list, blockquote, horizontal rule) with
//!   paragraph as the default.
//! - **Inlines** ([`render_inline`]): code spans, images, links, emphasis,
//!   strikethrough, and a small raw HTML passthrough, in that order.
//!
//! Paragraph text has raw `<`, `>` and `&` escaped before inline rendering,
//! with code, link and image spans protected from the escaping pass
//! ([`protect_and_escape`]). The assembled document then crosses the
//! sanitizer boundary ([`Sanitizer`]).
//!
//! # Example
//!
//! ```
//! use mdlive_renderer::{MarkdownParser, ParserConfig};
//!
//! let parser = MarkdownParser::new(ParserConfig {
//!     sanitize_html: false,
//!     ..ParserConfig::default()
//! });
//!
//! let html = parser.parse("# Hello\n\n**Bold** text");
//! assert_eq!(html, "<h1>Hello</h1>\n<p><strong>Bold</strong> text</p>");
//! ```

mod block;
mod escape;
mod html;
mod inline;
mod lines;
mod parser;
mod sanitize;

use std::sync::LazyLock;

pub use block::{Block, BlockKind, ItemKind, ListItem, ListKind, Recognized, Row, scan};
pub use escape::{escape_html, escape_text, protect_and_escape};
pub use inline::{PASSTHROUGH_TAGS, render_inline};
pub use lines::Document;
pub use parser::{DEFAULT_ALLOWED_TAGS, MarkdownParser, ParserConfig};
#[cfg(feature = "ammonia")]
pub use sanitize::AmmoniaSanitizer;
pub use sanitize::{Sanitizer, strip_script_blocks};

static DEFAULT_PARSER: LazyLock<MarkdownParser> = LazyLock::new(MarkdownParser::default);

/// Convert markdown to HTML with the default configuration.
///
/// Uses the ammonia sanitizer when the `ammonia` feature is enabled (the
/// default), otherwise the script-stripping fallback.
pub fn parse(markdown: &str) -> String {
    DEFAULT_PARSER.parse(markdown)
}
