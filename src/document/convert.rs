//! Markdown to HTML conversion.

use comrak::{Options, markdown_to_html};

/// Converts markdown source into HTML. Must be total and side-effect free.
pub trait Converter {
    fn render(&self, markdown: &str) -> String;
}

/// Comrak-backed converter.
///
/// Newlines inside paragraphs become `<br />`. By default raw HTML in the
/// source is passed through untouched: the text comes from the same user
/// who reads the preview, so it is trusted. Use
/// [`ComrakConverter::escaping_html`] to escape it instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComrakConverter {
    hard_breaks: bool,
    escape_html: bool,
}

impl ComrakConverter {
    pub const fn new() -> Self {
        Self {
            hard_breaks: true,
            escape_html: false,
        }
    }

    /// Converter that escapes raw HTML instead of passing it through.
    pub const fn escaping_html() -> Self {
        Self {
            hard_breaks: true,
            escape_html: true,
        }
    }

    #[must_use]
    pub const fn with_hard_breaks(mut self, enabled: bool) -> Self {
        self.hard_breaks = enabled;
        self
    }

    pub const fn escapes_html(&self) -> bool {
        self.escape_html
    }
}

impl Default for ComrakConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for ComrakConverter {
    fn render(&self, markdown: &str) -> String {
        let mut options = Options::default();
        configure_options(&mut options);
        options.render.hardbreaks = self.hard_breaks;
        options.render.unsafe_ = !self.escape_html;
        options.render.escape = self.escape_html;
        markdown_to_html(markdown, &options)
    }
}

/// Extensions shared by the HTML converter and the terminal preview.
pub(super) fn configure_options(options: &mut Options) {
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.render.hardbreaks = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(md: &str) -> String {
        ComrakConverter::default().render(md)
    }

    #[test]
    fn test_heading() {
        assert_eq!(render("# Hello"), "<h1>Hello</h1>\n");
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_newlines_become_line_breaks() {
        let html = render("one\ntwo");
        assert!(html.contains("one<br />"), "got: {html}");
        assert!(html.contains("two"));
    }

    #[test]
    fn test_hard_breaks_can_be_disabled() {
        let html = ComrakConverter::new().with_hard_breaks(false).render("one\ntwo");
        assert!(!html.contains("<br />"), "got: {html}");
    }

    #[test]
    fn test_bold() {
        assert_eq!(render("**bold**"), "<p><strong>bold</strong></p>\n");
    }

    #[test]
    fn test_raw_html_passes_through_by_default() {
        let html = render("<em class=\"x\">hi</em>");
        assert!(html.contains("<em class=\"x\">hi</em>"), "got: {html}");
    }

    #[test]
    fn test_escaping_converter_escapes_raw_html() {
        let converter = ComrakConverter::escaping_html();
        assert!(converter.escapes_html());
        let html = converter.render("<script>alert(1)</script>");
        assert!(!html.contains("<script>"), "got: {html}");
        assert!(html.contains("&lt;script&gt;"), "got: {html}");
    }

    #[test]
    fn test_gfm_extensions_enabled() {
        let html = render("~~gone~~\n\n| a |\n|---|\n| 1 |\n\n- [x] done");
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let md = "# Title\n\nSome *text* with `code`.";
        assert_eq!(render(md), render(md));
    }
}
