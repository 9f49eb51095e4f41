//! HTML escaping and span protection.
//!
//! Paragraph text is escaped before inline rendering, but spans that are about
//! to become HTML themselves (code, links, images) must survive that pass
//! untouched. [`Protector`] swaps such spans for opaque tokens, and
//! [`protect_and_escape`] ties the two steps together.

use std::borrow::Cow;

use regex::Regex;

use crate::inline::{CODE_SPAN_RE, IMAGE_RE, LINK_RE};

/// First character of a placeholder token (Unicode private use area).
pub(crate) const TOKEN_START: char = '\u{E000}';
/// Last character of a placeholder token.
pub(crate) const TOKEN_END: char = '\u{E001}';

/// Escape text for use inside an HTML attribute or verbatim code.
///
/// # Examples
///
/// ```
/// use mdlive_renderer::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">"#), "&lt;a href=&quot;x&quot;&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape raw markup characters in element text content.
///
/// Quotes are left alone since they carry no meaning outside attributes.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Remove placeholder sentinel characters from user text.
///
/// Tokens handed out by a [`Protector`] must be the only sentinels in the
/// working text.
pub(crate) fn strip_sentinels(text: &str) -> Cow<'_, str> {
    if text.contains([TOKEN_START, TOKEN_END]) {
        Cow::Owned(text.replace([TOKEN_START, TOKEN_END], ""))
    } else {
        Cow::Borrowed(text)
    }
}

#[derive(Debug)]
struct Protected {
    html: String,
    /// Plain-text form used when the span lands in an attribute.
    source: Option<String>,
}

/// Short-lived arena of protected spans.
///
/// Each protected string is stored by index and represented in the working
/// text by a token of the form `\u{E000}N\u{E001}`. The arena is scoped to a
/// single unit of text and dropped after [`restore`](Self::restore).
#[derive(Debug, Default)]
pub(crate) struct Protector {
    spans: Vec<Protected>,
}

impl Protector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store `span` and return the token standing in for it.
    pub(crate) fn protect(&mut self, span: impl Into<String>) -> String {
        self.push(span.into(), None)
    }

    /// Store `span` along with the plain text it stands for.
    pub(crate) fn protect_with_source(
        &mut self,
        span: impl Into<String>,
        source: impl Into<String>,
    ) -> String {
        self.push(span.into(), Some(source.into()))
    }

    fn push(&mut self, html: String, source: Option<String>) -> String {
        let token = format!("{TOKEN_START}{}{TOKEN_END}", self.spans.len());
        self.spans.push(Protected { html, source });
        token
    }

    /// Replace every match of `re` in `text` with a token for the matched source.
    pub(crate) fn protect_matches(&mut self, text: &str, re: &Regex) -> String {
        re.replace_all(text, |caps: &regex::Captures<'_>| self.protect(&caps[0]))
            .into_owned()
    }

    /// Substitute every token in `text` with its protected span.
    ///
    /// Spans may themselves contain tokens handed out earlier; those are
    /// restored too. Unknown tokens are dropped.
    pub(crate) fn restore(&self, text: &str) -> String {
        self.expand(text, self.spans.len(), false)
    }

    /// Like [`restore`](Self::restore), but spans stored with a plain-text
    /// source come back as that source.
    pub(crate) fn restore_plain(&self, text: &str) -> String {
        self.expand(text, self.spans.len(), true)
    }

    /// Expand tokens with an index below `limit`; any other token is dropped.
    ///
    /// A span only expands tokens older than itself, so expansion always
    /// terminates.
    fn expand(&self, text: &str, limit: usize, plain: bool) -> String {
        if !text.contains(TOKEN_START) {
            return text.to_owned();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(TOKEN_START) {
            out.push_str(&rest[..start]);
            let after = &rest[start + TOKEN_START.len_utf8()..];
            let Some(end) = after.find(TOKEN_END) else {
                // Unterminated token, keep the remainder verbatim
                out.push_str(&rest[start..]);
                return out;
            };
            let index = after[..end].parse::<usize>().ok().filter(|&idx| idx < limit);
            if let Some(idx) = index {
                let span = &self.spans[idx];
                let body = match (&span.source, plain) {
                    (Some(source), true) => source,
                    _ => &span.html,
                };
                out.push_str(&self.expand(body, idx, plain));
            }
            rest = &after[end + TOKEN_END.len_utf8()..];
        }
        out.push_str(rest);
        out
    }
}

/// Escape raw HTML in paragraph text while keeping markdown spans intact.
///
/// Inline code, links, and images (in that order) are protected, the rest of
/// the text is escaped, and the protected spans are put back as their original
/// markdown source for the inline renderer to process.
///
/// # Examples
///
/// ```
/// use mdlive_renderer::protect_and_escape;
///
/// assert_eq!(
///     protect_and_escape("<b> and [x](y?a=1&b=2)"),
///     "&lt;b&gt; and [x](y?a=1&b=2)"
/// );
/// ```
pub fn protect_and_escape(text: &str) -> String {
    let text = strip_sentinels(text);
    let mut protector = Protector::new();
    let text = protector.protect_matches(&text, &CODE_SPAN_RE);
    let text = protector.protect_matches(&text, &LINK_RE);
    let text = protector.protect_matches(&text, &IMAGE_RE);
    protector.restore(&escape_text(&text))
}
