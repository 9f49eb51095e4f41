//! HTML element writers.
//!
//! Produces the fixed HTML5 shapes emitted by the block processors and the
//! inline renderer.

use std::fmt::Write;

use crate::escape::escape_html;

/// Write a fenced code block. Content is escaped verbatim.
pub(crate) fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    if let Some(lang) = lang {
        write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(content)
        )
        .unwrap();
    } else {
        write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
    }
}

pub(crate) fn heading(level: u8, content: &str, out: &mut String) {
    write!(out, "<h{level}>{content}</h{level}>").unwrap();
}

pub(crate) fn blockquote(content: &str, out: &mut String) {
    out.push_str("<blockquote>");
    out.push_str(content);
    out.push_str("</blockquote>");
}

pub(crate) fn paragraph(content: &str, out: &mut String) {
    out.push_str("<p>");
    out.push_str(content);
    out.push_str("</p>");
}

/// Write an image tag. The title attribute is omitted when empty.
pub(crate) fn image(src: &str, alt: &str, title: &str, out: &mut String) {
    let title_attr = title_attr(title);
    write!(
        out,
        r#"<img src="{}"{title_attr} alt="{}">"#,
        escape_html(src),
        escape_html(alt)
    )
    .unwrap();
}

/// Opening anchor tag for a link.
pub(crate) fn link_start(href: &str, title: &str) -> String {
    format!(r#"<a href="{}"{}>"#, escape_html(href), title_attr(title))
}

pub(crate) const LINK_END: &str = "</a>";

/// Disabled checkbox rendered at the start of a task list item.
pub(crate) fn task_checkbox(checked: bool, out: &mut String) {
    if checked {
        out.push_str(r#"<input type="checkbox" disabled checked>"#);
    } else {
        out.push_str(r#"<input type="checkbox" disabled>"#);
    }
}

fn title_attr(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    }
}
