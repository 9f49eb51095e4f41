//! Sanitizer boundary.
//!
//! The assembled document HTML is passed through an allow-list [`Sanitizer`].
//! When none is configured, [`strip_script_blocks`] is applied instead. That
//! fallback only removes `<script>` elements and is **not** a security
//! guarantee: always install a real sanitizer such as [`AmmoniaSanitizer`]
//! when rendering untrusted input.

use std::sync::LazyLock;

use regex::Regex;

/// Allow-list HTML sanitizer strategy.
///
/// Any `Fn(&str, &[String]) -> String` closure is a sanitizer too.
pub trait Sanitizer: Send + Sync {
    /// Return `html` with every element outside `allowed_tags` removed.
    fn sanitize(&self, html: &str, allowed_tags: &[String]) -> String;
}

impl<F> Sanitizer for F
where
    F: Fn(&str, &[String]) -> String + Send + Sync,
{
    fn sanitize(&self, html: &str, allowed_tags: &[String]) -> String {
        self(html, allowed_tags)
    }
}

static SCRIPT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());

/// Remove `<script>…</script>` blocks.
///
/// Advisory only. Event handler attributes, `javascript:` URLs, unclosed
/// script tags and every other vector pass through untouched.
///
/// # Examples
///
/// ```
/// use mdlive_renderer::strip_script_blocks;
///
/// assert_eq!(
///     strip_script_blocks("<h1>x</h1><script>alert(1)</script>"),
///     "<h1>x</h1>"
/// );
/// ```
pub fn strip_script_blocks(html: &str) -> String {
    SCRIPT_BLOCK_RE.replace_all(html, "").into_owned()
}

#[cfg(feature = "ammonia")]
pub use self::ammonia_sanitizer::AmmoniaSanitizer;

#[cfg(feature = "ammonia")]
mod ammonia_sanitizer {
    use std::collections::{HashMap, HashSet};

    use ammonia::Builder;

    use super::Sanitizer;

    /// Tags whose content ammonia always drops; they cannot be allowed.
    const CLEAN_CONTENT_TAGS: &[&str] = &["script", "style"];

    /// Allow-list sanitizer backed by [`ammonia`].
    ///
    /// Permits the configured tags plus the attributes the renderer emits:
    /// `href`/`title` on links, `src`/`alt`/`title` on images, checkbox
    /// attributes on `input`, and `class` everywhere.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct AmmoniaSanitizer;

    impl Sanitizer for AmmoniaSanitizer {
        fn sanitize(&self, html: &str, allowed_tags: &[String]) -> String {
            let tags: HashSet<&str> = allowed_tags
                .iter()
                .map(String::as_str)
                .filter(|tag| {
                    let blocked = CLEAN_CONTENT_TAGS.contains(tag);
                    if blocked {
                        tracing::warn!(tag, "Ignoring allowed tag that is always stripped");
                    }
                    !blocked
                })
                .collect();

            let mut tag_attributes = HashMap::new();
            tag_attributes.insert("a", HashSet::from(["href", "title"]));
            tag_attributes.insert("img", HashSet::from(["src", "alt", "title"]));
            tag_attributes.insert("input", HashSet::from(["type", "checked", "disabled"]));

            Builder::new()
                .tags(tags)
                .tag_attributes(tag_attributes)
                .generic_attributes(HashSet::from(["class"]))
                .clean(html)
                .to_string()
        }
    }
}
