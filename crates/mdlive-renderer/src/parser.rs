//! Document-level parser: dispatch, assembly, and the sanitizer boundary.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::block::scan;
use crate::lines::Document;
use crate::sanitize::{Sanitizer, strip_script_blocks};

/// Tags allowed through the sanitizer unless configured otherwise.
///
/// Covers everything the renderer emits plus the inline passthrough tags.
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "p",
    "br",
    "hr",
    "strong",
    "em",
    "del",
    "code",
    "pre",
    "blockquote",
    "ul",
    "ol",
    "li",
    "a",
    "img",
    "table",
    "thead",
    "tbody",
    "tr",
    "th",
    "td",
    "input",
    "kbd",
    "mark",
    "details",
    "summary",
];

/// Parser configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Pass the assembled HTML through the sanitizer boundary.
    pub sanitize_html: bool,
    /// Tags the sanitizer keeps.
    pub allowed_tags: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            sanitize_html: true,
            allowed_tags: DEFAULT_ALLOWED_TAGS
                .iter()
                .map(|&tag| tag.to_owned())
                .collect(),
        }
    }
}

/// Markdown to HTML parser.
///
/// Holds only configuration; every call to [`parse`](Self::parse) works on
/// call-local state, so one parser can be shared across threads.
///
/// # Example
///
/// ```
/// use mdlive_renderer::{MarkdownParser, ParserConfig};
///
/// let parser = MarkdownParser::new(ParserConfig::default())
///     .with_sanitizer(|html: &str, _tags: &[String]| html.to_owned());
///
/// let html = parser.parse("# Title\n\nSome *text*.");
/// assert_eq!(html, "<h1>Title</h1>\n<p>Some <em>text</em>.</p>");
/// ```
pub struct MarkdownParser {
    config: ParserConfig,
    sanitizer: Option<Box<dyn Sanitizer>>,
    fallback_warned: AtomicBool,
}

impl MarkdownParser {
    /// Create a parser with no sanitizer installed.
    ///
    /// With `sanitize_html` enabled, output goes through the weak
    /// [`strip_script_blocks`] fallback until a sanitizer is set with
    /// [`with_sanitizer`](Self::with_sanitizer).
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            sanitizer: None,
            fallback_warned: AtomicBool::new(false),
        }
    }

    /// Install the allow-list sanitizer used at the sanitizer boundary.
    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: impl Sanitizer + 'static) -> Self {
        self.sanitizer = Some(Box::new(sanitizer));
        self
    }

    /// Create a parser using [`AmmoniaSanitizer`](crate::AmmoniaSanitizer).
    #[cfg(feature = "ammonia")]
    #[must_use]
    pub fn with_ammonia(config: ParserConfig) -> Self {
        Self::new(config).with_sanitizer(crate::AmmoniaSanitizer)
    }

    /// Create a parser with the best available sanitizer for `config`.
    ///
    /// Ammonia when the `ammonia` feature is enabled, otherwise the
    /// script-stripping fallback.
    #[must_use]
    pub fn with_default_sanitizer(config: ParserConfig) -> Self {
        #[cfg(feature = "ammonia")]
        {
            Self::with_ammonia(config)
        }
        #[cfg(not(feature = "ammonia"))]
        {
            Self::new(config)
        }
    }

    /// The configuration this parser was built with.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Whether a real sanitizer is installed.
    #[must_use]
    pub fn has_sanitizer(&self) -> bool {
        self.sanitizer.is_some()
    }

    /// Convert markdown text to HTML.
    ///
    /// Never fails: malformed markdown degrades to paragraph text, and empty
    /// input yields an empty string.
    pub fn parse(&self, markdown: &str) -> String {
        let doc = Document::new(markdown);
        let blocks = scan(&doc);
        tracing::debug!(
            lines = doc.len(),
            blocks = blocks.len(),
            "Parsed markdown document"
        );

        let html = blocks
            .iter()
            .map(|recognized| recognized.block.to_html())
            .collect::<Vec<_>>()
            .join("\n");

        if !self.config.sanitize_html || html.is_empty() {
            return html;
        }
        self.sanitize(&html)
    }

    fn sanitize(&self, html: &str) -> String {
        if let Some(sanitizer) = &self.sanitizer {
            return sanitizer.sanitize(html, &self.config.allowed_tags);
        }

        if !self.fallback_warned.swap(true, Ordering::Relaxed) {
            tracing::warn!(
                "No HTML sanitizer configured; only <script> blocks are stripped from output"
            );
        }
        strip_script_blocks(html)
    }
}

impl Default for MarkdownParser {
    /// Default configuration with the best available sanitizer.
    fn default() -> Self {
        Self::with_default_sanitizer(ParserConfig::default())
    }
}

impl std::fmt::Debug for MarkdownParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownParser")
            .field("config", &self.config)
            .field("has_sanitizer", &self.has_sanitizer())
            .finish_non_exhaustive()
    }
}
