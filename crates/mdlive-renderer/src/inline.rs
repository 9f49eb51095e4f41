//! Inline span rendering.
//!
//! Applies a fixed pipeline of span recognizers to one logical unit of text
//! (paragraph, heading, list item, table cell, blockquote body):
//!
//! 1. Code spans: content escaped, then hidden from every later stage
//! 2. Images: checked before links since `![alt](url)` contains a link
//! 3. Links
//! 4. Bold, then italic (no nested delimiters of the same kind)
//! 5. Strikethrough
//! 6. Whitelisted raw HTML (`kbd`, `mark`, `details`, `summary`)
//!
//! Finished code spans, images, and link tags are parked in a [`Protector`]
//! so that emphasis patterns never reach into generated markup.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::{Protector, escape_html, escape_text, strip_sentinels};
use crate::html;

/// Inline code span: `` `code` ``.
pub(crate) static CODE_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Image: `![alt](src "title")`.
pub(crate) static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[([^\]]*)\]\(([^)\s]+)(?:\s+"([^"]*)")?\)"#).unwrap()
});

/// Link: `[text](href "title")`.
pub(crate) static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[([^\]]+)\]\(([^)\s]+)(?:\s+"([^"]*)")?\)"#).unwrap()
});

static STRONG_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\s](?:[^*]*[^*\s])?)\*\*").unwrap());

static STRONG_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b__([^_\s](?:[^_]*[^_\s])?)__\b").unwrap());

static EM_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").unwrap());

static EM_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b_([^_\s](?:[^_]*[^_\s])?)_\b").unwrap());

static STRIKETHROUGH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~([^~\s](?:[^~]*[^~\s])?)~~").unwrap());

/// Raw HTML tags allowed through inline text when properly paired.
pub const PASSTHROUGH_TAGS: &[&str] = &["kbd", "mark", "details", "summary"];

/// Render inline markdown spans in `text` to HTML.
///
/// Text outside recognized spans is not escaped here; paragraphs escape
/// their raw text beforehand with [`protect_and_escape`](crate::protect_and_escape).
///
/// # Examples
///
/// ```
/// use mdlive_renderer::render_inline;
///
/// assert_eq!(
///     render_inline("**Bold** and `x < y`"),
///     "<strong>Bold</strong> and <code>x &lt; y</code>"
/// );
/// ```
pub fn render_inline(text: &str) -> String {
    let text = strip_sentinels(text);
    let mut protector = Protector::new();
    let text = code_spans(&text, &mut protector);
    let text = images(&text, &mut protector);
    let text = links(&text, &mut protector);
    protector.restore(&text_spans(&text))
}

/// Emphasis, strikethrough and raw HTML passthrough over one run of text.
fn text_spans(text: &str) -> String {
    let text = emphasis(text);
    let text = strikethrough(&text);
    passthrough_html(&text)
}

fn code_spans(text: &str, protector: &mut Protector) -> String {
    CODE_SPAN_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let code = format!("<code>{}</code>", escape_html(&caps[1]));
            protector.protect_with_source(code, &caps[1])
        })
        .into_owned()
}

fn images(text: &str, protector: &mut Protector) -> String {
    IMAGE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            // Alt text may hold a code span token from the previous stage
            let alt = protector.restore_plain(&caps[1]);
            let title = caps.get(3).map_or("", |m| m.as_str());
            let mut out = String::new();
            html::image(&caps[2], &alt, title, &mut out);
            protector.protect(out)
        })
        .into_owned()
}

fn links(text: &str, protector: &mut Protector) -> String {
    LINK_RE
        .replace_all(text, |caps: &Captures<'_>| {
            // The finished anchor is opaque, so outer emphasis cannot pair
            // with delimiters inside the link text
            let title = caps.get(3).map_or("", |m| m.as_str());
            let mut out = html::link_start(&caps[2], title);
            out.push_str(&text_spans(&escape_text(&caps[1])));
            out.push_str(html::LINK_END);
            protector.protect(out)
        })
        .into_owned()
}

fn emphasis(text: &str) -> String {
    let text = STRONG_STAR_RE.replace_all(text, "<strong>$1</strong>");
    let text = STRONG_UNDERSCORE_RE.replace_all(&text, "<strong>$1</strong>");
    let text = EM_STAR_RE.replace_all(&text, "<em>$1</em>");
    EM_UNDERSCORE_RE
        .replace_all(&text, "<em>$1</em>")
        .into_owned()
}

fn strikethrough(text: &str) -> String {
    STRIKETHROUGH_RE
        .replace_all(text, "<del>$1</del>")
        .into_owned()
}

/// Restore escaped whitelisted tags that appear as an open/close pair.
fn passthrough_html(text: &str) -> String {
    if !text.contains("&lt;") {
        return text.to_owned();
    }

    let mut out = text.to_owned();
    for tag in PASSTHROUGH_TAGS {
        let open = format!("&lt;{tag}&gt;");
        let close = format!("&lt;/{tag}&gt;");
        if out.contains(&open) && out.contains(&close) {
            out = out
                .replace(&open, &format!("<{tag}>"))
                .replace(&close, &format!("</{tag}>"));
        }
    }
    out
}
