//! `mdlive stats` command implementation.

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::LazyLock;

use clap::Args;
use mdlive_renderer::{Block, Document, scan};
use regex::Regex;
use serde::Serialize;

use super::read_input;
use crate::error::CliError;

/// Inline link or image target, told apart by the leading `!`.
static LINK_OR_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(!?)\[([^\]]*)\]\(([^)\s]+)(?:\s+"[^"]*")?\)"#).unwrap()
});

/// Arguments for the stats command.
#[derive(Args)]
pub(crate) struct StatsArgs {
    /// Markdown file to inspect (default: stdin).
    file: Option<PathBuf>,

    /// Print statistics as JSON.
    #[arg(long)]
    json: bool,
}

impl StatsArgs {
    /// Execute the stats command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let markdown = read_input(self.file.as_deref())?;
        let stats = DocumentStats::collect(&markdown);

        let text = if self.json {
            serde_json::to_string_pretty(&stats)?
        } else {
            stats.to_text()
        };

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

/// Element counts for a markdown document.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub(crate) struct DocumentStats {
    pub headers: usize,
    pub paragraphs: usize,
    pub lists: usize,
    pub list_items: usize,
    pub tables: usize,
    pub code_blocks: usize,
    pub blockquotes: usize,
    pub rules: usize,
    pub links: usize,
    pub images: usize,
    pub words: usize,
}

impl DocumentStats {
    /// Count elements from the recognized block sequence.
    ///
    /// Links, images and words are counted over prose text only, so fenced
    /// code never contributes.
    pub(crate) fn collect(markdown: &str) -> Self {
        let doc = Document::new(markdown);
        let mut stats = Self::default();

        for recognized in scan(&doc) {
            match &recognized.block {
                Block::Header { text, .. } => {
                    stats.headers += 1;
                    stats.count_prose(text);
                }
                Block::FencedCode { .. } => stats.code_blocks += 1,
                Block::Table { header, rows } => {
                    stats.tables += 1;
                    for cell in header.iter().chain(rows.iter().flatten()) {
                        stats.count_prose(cell);
                    }
                }
                Block::List { items, .. } => {
                    stats.lists += 1;
                    stats.list_items += items.len();
                    for item in items {
                        stats.count_prose(item.content);
                    }
                }
                Block::Blockquote { lines } => {
                    stats.blockquotes += 1;
                    for line in lines {
                        stats.count_prose(line);
                    }
                }
                Block::HorizontalRule => stats.rules += 1,
                Block::Paragraph { lines } => {
                    stats.paragraphs += 1;
                    for line in lines {
                        stats.count_prose(line);
                    }
                }
            }
        }

        tracing::debug!(?stats, "Collected document statistics");
        stats
    }

    fn count_prose(&mut self, text: &str) {
        for caps in LINK_OR_IMAGE_RE.captures_iter(text) {
            if !caps[1].is_empty() {
                self.images += 1;
            } else if !caps[2].is_empty() {
                self.links += 1;
            }
        }
        self.words += text.split_whitespace().count();
    }

    /// Human-readable report, one count per line.
    pub(crate) fn to_text(&self) -> String {
        [
            ("Headers", self.headers),
            ("Paragraphs", self.paragraphs),
            ("Lists", self.lists),
            ("List items", self.list_items),
            ("Tables", self.tables),
            ("Code blocks", self.code_blocks),
            ("Blockquotes", self.blockquotes),
            ("Rules", self.rules),
            ("Links", self.links),
            ("Images", self.images),
            ("Words", self.words),
        ]
        .iter()
        .map(|(label, count)| format!("{label:<12} {count}"))
        .collect::<Vec<_>>()
        .join("\n")
    }
}
