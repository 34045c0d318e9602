//! Low-level writer for HTML generation.
//!
//! This module provides the `HtmlWriter` struct which handles tag and
//! attribute emission with proper escaping and minimal allocations.

/// Low-level writer for efficient HTML generation.
pub(crate) struct HtmlWriter {
    /// The output buffer
    buffer: String,
}

impl HtmlWriter {
    /// Create a new writer with a reasonable pre-allocated buffer.
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(1024),
        }
    }

    /// Begin an opening tag: `<tag`.
    pub fn start_tag(&mut self, tag: &str) {
        self.buffer.push('<');
        self.buffer.push_str(tag);
    }

    /// Emit an attribute on the currently open tag: ` name="value"`.
    pub fn attr(&mut self, name: &str, value: &str) {
        self.buffer.push(' ');
        self.buffer.push_str(name);
        self.buffer.push_str("=\"");
        escape_into(&mut self.buffer, value, true);
        self.buffer.push('"');
    }

    /// Close the opening tag: `>`.
    pub fn finish_start(&mut self) {
        self.buffer.push('>');
    }

    /// Close a self-closing tag: `/>`.
    pub fn finish_self_closing(&mut self) {
        self.buffer.push_str("/>");
    }

    /// Emit a closing tag: `</tag>`.
    pub fn end_tag(&mut self, tag: &str) {
        self.buffer.push_str("</");
        self.buffer.push_str(tag);
        self.buffer.push('>');
    }

    /// Emit escaped text content.
    pub fn text(&mut self, text: &str) {
        escape_into(&mut self.buffer, text, false);
    }

    /// Emit pre-rendered HTML verbatim.
    pub fn raw(&mut self, html: &str) {
        self.buffer.push_str(html);
    }

    /// Get the final HTML output.
    pub fn finish(self) -> String {
        self.buffer
    }
}

/// HTML-escape `value` into `out`. Attribute values additionally escape the
/// double quote; text content leaves it alone.
fn escape_into(out: &mut String, value: &str, attribute: bool) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_attributes_and_text() {
        let mut writer = HtmlWriter::new();
        writer.start_tag("div");
        writer.attr("class", "a b");
        writer.finish_start();
        writer.text("x < y & z");
        writer.end_tag("div");
        assert_eq!(writer.finish(), r#"<div class="a b">x &lt; y &amp; z</div>"#);
    }

    #[test]
    fn attribute_values_escape_quotes() {
        let mut writer = HtmlWriter::new();
        writer.start_tag("img");
        writer.attr("src", "a\"b.png");
        writer.finish_self_closing();
        assert_eq!(writer.finish(), r#"<img src="a&quot;b.png"/>"#);
    }
}
