//! Content pipeline: raw Markdown in, sanitized HTML out.
//!
//! Runs on every post create and update, never on read. The rendered HTML is
//! stored next to the raw Markdown so reads serve it verbatim.

mod markdown;
mod sanitize;

pub use markdown::MarkdownRenderer;
pub use sanitize::HtmlSanitizer;

/// Two-stage pipeline: render Markdown, then sanitize the result.
///
/// Both stages are total functions of their input: no I/O, no locks, no
/// shared mutable state. A single instance can be shared across concurrent
/// request handlers.
pub struct ContentPipeline {
    renderer: MarkdownRenderer,
    sanitizer: HtmlSanitizer,
}

impl ContentPipeline {
    pub fn new() -> Self {
        Self {
            renderer: MarkdownRenderer::new(),
            sanitizer: HtmlSanitizer::new(),
        }
    }

    /// Convert untrusted Markdown into HTML that is safe to inject into a
    /// browser DOM verbatim.
    pub fn process(&self, markdown: &str) -> String {
        let html = self.renderer.render(markdown);
        self.sanitizer.clean(&html)
    }
}

impl Default for ContentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_and_paragraphs_survive() {
        let pipeline = ContentPipeline::new();
        let html = pipeline.process("Hello **world**\n\nSecond para.");
        assert!(html.contains("<strong>world</strong>"));
        assert_eq!(html.matches("<p>").count(), 2);
        assert!(html.contains("Second para."));
    }

    #[test]
    fn script_tags_do_not_survive() {
        let pipeline = ContentPipeline::new();
        let html = pipeline.process("<script>alert(1)</script>Bye");
        assert!(!html.contains("<script"));
        assert!(!html.contains("alert(1)"));
        assert!(html.contains("Bye"));
    }

    #[test]
    fn javascript_links_are_neutralized() {
        let pipeline = ContentPipeline::new();
        let html = pipeline.process("[x](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("x"));
    }

    #[test]
    fn event_handlers_are_stripped() {
        let pipeline = ContentPipeline::new();
        let html = pipeline.process(r#"<img src=x onerror="alert(1)">"#);
        assert!(!html.contains("onerror"));
        assert!(!html.contains("alert"));
    }

    #[test]
    fn single_newline_becomes_line_break() {
        let pipeline = ContentPipeline::new();
        let html = pipeline.process("first line\nsecond line");
        assert_eq!(html.matches("<p>").count(), 1);
        assert!(html.contains("<br"));
    }

    #[test]
    fn benign_markdown_round_trips() {
        let pipeline = ContentPipeline::new();
        let html = pipeline.process(
            "# Title\n\nSome text with **bold** and a [link](https://example.com).",
        );
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains(r#"href="https://example.com""#));
        assert!(html.contains(">link</a>"));
    }

    #[test]
    fn pipeline_output_is_a_sanitizer_fixed_point() {
        let pipeline = ContentPipeline::new();
        let html = pipeline.process("**bold** <i>italic</i>\n\n<script>x</script>[a](javascript:b)");
        assert_eq!(pipeline.sanitizer.clean(&html), html);
    }

    #[test]
    fn identical_input_yields_identical_output() {
        let pipeline = ContentPipeline::new();
        let input = "# Heading\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~";
        assert_eq!(pipeline.process(input), pipeline.process(input));
    }
}
