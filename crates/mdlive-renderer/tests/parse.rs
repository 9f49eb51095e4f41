//! End-to-end rendering tests through the public API.

use mdlive_renderer::{MarkdownParser, ParserConfig};
use pretty_assertions::assert_eq;

fn render(markdown: &str) -> String {
    MarkdownParser::new(ParserConfig {
        sanitize_html: false,
        ..ParserConfig::default()
    })
    .parse(markdown)
}

#[test]
fn test_end_to_end_document() {
    let markdown = "# Title

This is a **bold** paragraph with *italic* text and `code`.

- Item 1
- Item 2
";
    assert_eq!(
        render(markdown),
        "<h1>Title</h1>\n\
         <p>This is a <strong>bold</strong> paragraph with <em>italic</em> text and <code>code</code>.</p>\n\
         <ul><li>Item 1</li><li>Item 2</li></ul>"
    );
}

#[test]
fn test_header_levels() {
    assert_eq!(render("# H1"), "<h1>H1</h1>");
    assert_eq!(render("### H3"), "<h3>H3</h3>");
    assert_eq!(render("###### H6"), "<h6>H6</h6>");
}

#[test]
fn test_seven_hashes_is_paragraph() {
    assert_eq!(render("####### H7"), "<p>####### H7</p>");
}

#[test]
fn test_emphasis() {
    assert_eq!(render("**Bold text**"), "<p><strong>Bold text</strong></p>");
    assert_eq!(render("*Italic text*"), "<p><em>Italic text</em></p>");
    assert_eq!(
        render("~~Strikethrough text~~"),
        "<p><del>Strikethrough text</del></p>"
    );
}

#[test]
fn test_image_not_parsed_as_link() {
    let html = render("![Alt](x.png)");
    assert_eq!(html, r#"<p><img src="x.png" alt="Alt"></p>"#);
    assert!(!html.contains("<a "));
}

#[test]
fn test_image_and_link_side_by_side() {
    assert_eq!(
        render("![logo](l.png) [home](/)"),
        r#"<p><img src="l.png" alt="logo"> <a href="/">home</a></p>"#
    );
}

#[test]
fn test_emphasis_stays_outside_links() {
    assert_eq!(
        render("[a*](x)*b*"),
        r#"<p><a href="x">a*</a><em>b</em></p>"#
    );
    assert_eq!(
        render("**a [b**](c)"),
        r#"<p>**a <a href="c">b**</a></p>"#
    );
}

#[test]
fn test_sentinel_characters_in_public_helpers() {
    let input = "`\u{E000}0\u{E001}` and \u{E000}1\u{E001}";
    assert_eq!(
        mdlive_renderer::render_inline(input),
        "<code>0</code> and 1"
    );
    assert_eq!(
        mdlive_renderer::protect_and_escape(input),
        "`0` and 1"
    );
}

#[test]
fn test_fenced_code_escapes_script() {
    let html = render("```html\n<script>alert(1)</script>\n```");
    assert_eq!(
        html,
        r#"<pre><code class="language-html">&lt;script&gt;alert(1)&lt;/script&gt;</code></pre>"#
    );
}

#[test]
fn test_fenced_code_is_not_markdown() {
    assert_eq!(
        render("```\n# not a header\n- **not** a list\n```"),
        "<pre><code># not a header\n- **not** a list</code></pre>"
    );
}

#[test]
fn test_unterminated_fence_runs_to_end() {
    assert_eq!(
        render("text\n\n```\ncode\n\n# swallowed"),
        "<p>text</p>\n<pre><code>code\n\n# swallowed</code></pre>"
    );
}

#[test]
fn test_table_requires_separator() {
    assert_eq!(render("a | b"), "<p>a | b</p>");
    assert_eq!(render("a | b\nc | d"), "<p>a | b c | d</p>");
}

#[test]
fn test_table() {
    let markdown = "| Name | Value |\n|:-----|------:|\n| **a** | 1 |\n| b | `2` |";
    assert_eq!(
        render(markdown),
        "<table><thead><tr><th>Name</th><th>Value</th></tr></thead>\
         <tbody><tr><td><strong>a</strong></td><td>1</td></tr>\
         <tr><td>b</td><td><code>2</code></td></tr></tbody></table>"
    );
}

#[test]
fn test_table_ends_at_line_without_pipe() {
    assert_eq!(
        render("a | b\n---|---\n1 | 2\nafter"),
        "<table><thead><tr><th>a</th><th>b</th></tr></thead>\
         <tbody><tr><td>1</td><td>2</td></tr></tbody></table>\n<p>after</p>"
    );
}

#[test]
fn test_task_list() {
    assert_eq!(
        render("- [ ] Unchecked\n- [x] Checked"),
        "<ul>\
         <li class=\"task-list-item\"><input type=\"checkbox\" disabled> Unchecked</li>\
         <li class=\"task-list-item\"><input type=\"checkbox\" disabled checked> Checked</li>\
         </ul>"
    );
}

#[test]
fn test_ordered_list() {
    assert_eq!(
        render("1. one\n2. two\n10. ten"),
        "<ol><li>one</li><li>two</li><li>ten</li></ol>"
    );
}

#[test]
fn test_mixed_markers_keep_first_tag() {
    assert_eq!(
        render("1. first\n- second"),
        "<ol><li>first</li><li>second</li></ol>"
    );
}

#[test]
fn test_indented_items_render_flat() {
    // Known limitation: nested indentation is recorded but not rendered.
    assert_eq!(
        render("- a\n  - b\n    - c"),
        "<ul><li>a</li><li>b</li><li>c</li></ul>"
    );
}

#[test]
fn test_raw_html_escaped_in_paragraph() {
    let html = render("This has <script>alert(1)</script> text.");
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("&lt;/script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn test_passthrough_tags_in_paragraph() {
    assert_eq!(
        render("Press <kbd>Ctrl</kbd>+<kbd>C</kbd>"),
        "<p>Press <kbd>Ctrl</kbd>+<kbd>C</kbd></p>"
    );
    assert_eq!(
        render("<details>only open"),
        "<p>&lt;details&gt;only open</p>"
    );
}

#[test]
fn test_blockquote() {
    assert_eq!(
        render("> quoted **text**\n> more"),
        "<blockquote>quoted <strong>text</strong>\nmore</blockquote>"
    );
}

#[test]
fn test_horizontal_rules() {
    assert_eq!(render("***\n\n___\n\n- - -"), "<hr>\n<hr>\n<ul><li>- -</li></ul>");
}

#[test]
fn test_paragraph_lines_joined() {
    assert_eq!(
        render("line one\nline two\n\nnext"),
        "<p>line one line two</p>\n<p>next</p>"
    );
}

#[test]
fn test_paragraph_interrupted_by_header() {
    assert_eq!(render("text\n# Head"), "<p>text</p>\n<h1>Head</h1>");
}

#[test]
fn test_crlf_input() {
    assert_eq!(render("# A\r\n\r\nb\rc"), "<h1>A</h1>\n<p>b c</p>");
}

#[test]
fn test_leading_blank_lines_skipped() {
    assert_eq!(render("\n\n\n# Late"), "<h1>Late</h1>");
}

#[test]
fn test_code_span_escapes_in_header() {
    assert_eq!(render("## Use `<b>`"), "<h2>Use <code>&lt;b&gt;</code></h2>");
}

#[cfg(feature = "ammonia")]
mod sanitized {
    use mdlive_renderer::{MarkdownParser, ParserConfig, parse};

    #[test]
    fn test_default_parse_keeps_structure() {
        let html = parse("# Title\n\n- [x] done\n\n| a |\n|---|\n| b |");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains(r#"<li class="task-list-item">"#));
        assert!(html.contains(r#"type="checkbox""#));
        assert!(html.contains("<td>b</td>"));
    }

    #[test]
    fn test_raw_html_outside_paragraphs_is_sanitized() {
        let html = parse("# Hi <img src=x onerror=alert(1)>\n\n- <script>alert(1)</script>item");
        assert!(!html.contains("onerror"));
        assert!(!html.contains("<script"));
        assert!(html.contains("item"));
    }

    #[test]
    fn test_restricted_allow_list() {
        let parser = MarkdownParser::with_ammonia(ParserConfig {
            sanitize_html: true,
            allowed_tags: vec!["p".to_owned()],
        });
        assert_eq!(parser.parse("# Head\n\n**x**"), "Head\n<p>x</p>");
    }
}
