//! Serialization of the presentation tree back to block markup.
//!
//! Round-trip guarantee: re-parsing serialized output yields an equivalent
//! tree (content, classes, children, and data-attributes preserved).
//! Serialized text is also the replacement body used when an edited slide is
//! spliced back into a stored document.

use crate::dsl::ast::{Document, Element, Slide};
use std::fmt::Write;

/// Types that serialize to block markup.
pub trait ToDsl {
    /// Append this value's markup to `out`.
    fn write_dsl(&self, out: &mut String);

    /// Serialize to a fresh string.
    fn to_dsl(&self) -> String {
        let mut out = String::new();
        self.write_dsl(&mut out);
        out
    }
}

/// Escape a value for a double-quoted markup string.
pub(crate) fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out
}

impl ToDsl for Element {
    fn write_dsl(&self, out: &mut String) {
        out.push_str(&self.tag);
        out.push_str(" { ");
        if let Some(classes) = &self.classes {
            let _ = write!(out, "classes = \"{}\"; ", escape(classes));
        }
        if let Some(content) = &self.content {
            let _ = write!(out, "content = \"{}\"; ", escape(content));
        }
        if !self.children.is_empty() {
            out.push_str("children = [ ");
            for child in &self.children {
                child.write_dsl(out);
                out.push(' ');
            }
            out.push_str("]; ");
        }
        for (key, value) in &self.attrs {
            let _ = write!(out, "{} = \"{}\"; ", key, escape(value));
        }
        out.push_str("};");
    }
}

impl ToDsl for Slide {
    fn write_dsl(&self, out: &mut String) {
        write_slide(self, out, "");
    }
}

/// Write a `SLIDE { ... }` block with `indent` prepended to every structural
/// line. Indentation is applied only at line breaks the serializer itself
/// emits, never inside quoted values, so multi-line content survives intact.
fn write_slide(slide: &Slide, out: &mut String, indent: &str) {
    let _ = writeln!(out, "{indent}SLIDE {{");
    for (key, value) in &slide.attrs {
        let _ = writeln!(out, "{indent}  {} = \"{}\";", key, escape(value));
    }
    for element in &slide.elements {
        out.push_str(indent);
        out.push_str("  ");
        element.write_dsl(out);
        out.push('\n');
    }
    out.push_str(indent);
    out.push('}');
}

impl ToDsl for Document {
    fn write_dsl(&self, out: &mut String) {
        out.push_str("PRESENTATION {\n");
        if let Some(id) = &self.id {
            let _ = writeln!(out, "  id = \"{}\";", escape(id));
        }
        if let Some(title) = &self.title {
            let _ = writeln!(out, "  title = \"{}\";", escape(title));
        }
        out.push_str("  slides = [\n");
        for slide in &self.slides {
            write_slide(slide, out, "    ");
            out.push('\n');
        }
        out.push_str("  ];\n}\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parser::{parse_document, parse_slides};

    fn sample_document() -> Document {
        let source = r#"PRESENTATION {
            id = "deck-7";
            title = "Round \"trip\"";
            slides = [
                SLIDE {
                    data-transition = "zoom";
                    h1 { classes = "title big"; content = "Hello"; }
                    ul { children = [
                        li { content = "one"; };
                        li { content = "two"; data-idx = "2"; };
                    ]; }
                }
                SLIDE { img { content = "pic.png"; } }
                SLIDE { }
            ]
        }"#;
        parse_document(source)
    }

    #[test]
    fn document_round_trips() {
        let doc = sample_document();
        let reparsed = parse_document(&doc.to_dsl());
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn slide_round_trips() {
        for slide in sample_document().slides {
            let reparsed = parse_slides(&format!("slides = [ {} ]", slide.to_dsl()));
            assert_eq!(reparsed.len(), 1);
            assert_eq!(slide, reparsed[0]);
        }
    }

    #[test]
    fn multiline_content_survives_document_serialization() {
        let mut doc = Document::default();
        doc.slides.push(Slide::default());
        let mut el = Element::new("pre");
        el.content = Some("line one\nline two".to_string());
        doc.slides[0].elements.push(el);

        let reparsed = parse_document(&doc.to_dsl());
        assert_eq!(reparsed, doc);
        assert_eq!(
            reparsed.slides[0].elements[0].content.as_deref(),
            Some("line one\nline two")
        );
    }

    #[test]
    fn quotes_and_backslashes_survive() {
        let mut doc = Document::default();
        doc.slides.push(Slide::default());
        let mut el = Element::new("div");
        el.content = Some(r#"a "quoted" \path\"#.to_string());
        doc.slides[0].elements.push(el);
        assert_eq!(parse_document(&doc.to_dsl()), doc);
    }
}
