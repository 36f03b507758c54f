//! Markdown rendering.

use pulldown_cmark::{Event, Options, Parser, html};

/// Markdown renderer for post content.
///
/// Renders the GitHub-flavored dialect: tables, strikethrough, and autolinks,
/// plus visible line breaks on single newlines inside a paragraph. Raw HTML
/// embedded in the Markdown passes through untouched - the output of this
/// stage is NOT safe and must go through the sanitizer.
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_GFM;
        Self { options }
    }

    /// Render Markdown to an HTML fragment.
    ///
    /// Total and deterministic: malformed Markdown degrades to best-effort
    /// output, it never fails. Soft breaks (a single newline within a
    /// paragraph) are rewritten to hard breaks in the event stream so they
    /// render as `<br>` instead of collapsing into one line.
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options).map(|event| match event {
            Event::SoftBreak => Event::HardBreak,
            other => other,
        });

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, parser);
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
