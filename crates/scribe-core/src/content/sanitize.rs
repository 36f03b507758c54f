//! HTML sanitization against an explicit allow-list.

use std::collections::{HashMap, HashSet};

use ammonia::{Builder, UrlRelative};

/// Structural and formatting elements a blog post may contain.
const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "h1", "h2", "h3", "h4", "h5", "h6", "em", "strong", "del", "blockquote", "ul",
    "ol", "li", "pre", "code", "a", "img", "table", "thead", "tbody", "tr", "th", "td", "hr",
];

/// Per-tag attribute allow-list. `rel` on anchors is managed by the builder
/// itself and must not appear here.
const ALLOWED_TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "title"]),
    ("img", &["src", "alt", "title"]),
    // Language tag emitted for fenced code blocks.
    ("code", &["class"]),
];

/// URL schemes permitted on `href` and `src`. Relative URLs pass through
/// unchanged; everything else (javascript:, data:, vbscript:, ...) is
/// stripped.
const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Elements removed together with their text content rather than unwrapped.
const CLEAN_CONTENT_TAGS: &[&str] = &["script", "style"];

/// Allow-list HTML sanitizer for rendered post content.
///
/// The policy is enumerated above rather than inherited from library
/// defaults. Sanitization is idempotent and fail-closed: anything the parser
/// cannot make sense of is dropped, never passed through.
pub struct HtmlSanitizer {
    builder: Builder<'static>,
}

impl HtmlSanitizer {
    pub fn new() -> Self {
        let tag_attributes: HashMap<&str, HashSet<&str>> = ALLOWED_TAG_ATTRIBUTES
            .iter()
            .map(|(tag, attrs)| (*tag, attrs.iter().copied().collect()))
            .collect();

        let mut builder = Builder::default();
        builder
            .tags(ALLOWED_TAGS.iter().copied().collect())
            .generic_attributes(HashSet::new())
            .tag_attributes(tag_attributes)
            .url_schemes(ALLOWED_URL_SCHEMES.iter().copied().collect())
            .url_relative(UrlRelative::PassThrough)
            .link_rel(Some("noopener noreferrer"))
            .clean_content_tags(CLEAN_CONTENT_TAGS.iter().copied().collect());

        Self { builder }
    }

    /// Reduce an arbitrary HTML fragment to allow-listed structure.
    pub fn clean(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}
