//! Batch block parser: a complete markup string to a slide tree.
//!
//! The parser is a recursive descent over a character cursor, sharing its
//! depth-tracked block scanning with the streaming parser and the splice
//! operation. It never fails: a missing or malformed `slides` array yields an
//! empty document (zero slides is valid empty state), and any construct that
//! cannot be read is skipped locally so the rest of the document still
//! renders.

use crate::common::scan::{self, Cursor};
use crate::dsl::ast::{push_attr, DataAttrs, Document, Element, Slide};
use crate::html::{render_slide, HtmlOptions};
use memchr::memmem;

/// Parse a complete document: `PRESENTATION` metadata plus all slides.
pub fn parse_document(source: &str) -> Document {
    let (id, title) = parse_metadata(source);
    Document {
        id,
        title,
        slides: parse_slides(source),
    }
}

/// Parse every top-level `SLIDE { ... }` block into a [`Slide`], in
/// discovery order.
pub fn parse_slides(source: &str) -> Vec<Slide> {
    scan::slide_spans(source)
        .into_iter()
        .filter_map(|span| {
            let block = &source[span];
            let open = memchr::memchr(b'{', block.as_bytes())?;
            let close = scan::matching_brace(block, open)?;
            Some(parse_slide_body(&block[open + 1..close]))
        })
        .collect()
}

/// Compile a complete document into one HTML string per slide, in order.
///
/// A slide whose parse yields no elements still contributes an (empty)
/// container, preserving slide count and order.
pub fn compile(source: &str) -> Vec<String> {
    let options = HtmlOptions::default();
    parse_slides(source)
        .iter()
        .map(|slide| render_slide(slide, &options))
        .collect()
}

/// Collect every image resource the document references: `content` values of
/// `img` elements and `data-background-image` values anywhere in the tree.
///
/// Used by callers that preload media before the deck is shown.
pub fn image_sources(source: &str) -> Vec<String> {
    fn visit(el: &Element, out: &mut Vec<String>) {
        if el.tag == "img"
            && let Some(src) = &el.content
        {
            out.push(src.clone());
        }
        for (key, value) in &el.attrs {
            if key == "data-background-image" {
                out.push(value.clone());
            }
        }
        for child in &el.children {
            visit(child, out);
        }
    }

    let mut out = Vec::new();
    for slide in parse_slides(source) {
        for (key, value) in &slide.attrs {
            if key == "data-background-image" {
                out.push(value.clone());
            }
        }
        for el in &slide.elements {
            visit(el, &mut out);
        }
    }
    out
}

/// Read `id` and `title` props from the `PRESENTATION { ... }` header,
/// stopping at the `slides` array.
fn parse_metadata(source: &str) -> (Option<String>, Option<String>) {
    let bytes = source.as_bytes();
    let Some(start) = memmem::find(bytes, b"PRESENTATION") else {
        return (None, None);
    };
    let mut cursor = Cursor::new(source);
    cursor.seek(start + "PRESENTATION".len());
    cursor.skip_whitespace();
    if !cursor.eat(b'{') {
        return (None, None);
    }

    let mut id = None;
    let mut title = None;
    loop {
        cursor.skip_trivia();
        let Some(ident) = cursor.read_identifier() else {
            break;
        };
        if ident == "slides" {
            break;
        }
        cursor.skip_whitespace();
        if !cursor.eat(b'=') {
            break;
        }
        cursor.skip_whitespace();
        let value = cursor.read_string();
        if value.is_none() {
            cursor.skip_value();
        }
        match ident {
            "id" => id = value,
            "title" => title = value,
            _ => {},
        }
    }
    (id, title)
}

/// Parse a bare run of element blocks, outside any slide context.
pub fn parse_elements(text: &str) -> Vec<Element> {
    parse_element_list(text, None)
}

/// Parse the interior of a `SLIDE` block: bare top-level data-attributes
/// become slide-level attrs, everything else parses as elements.
fn parse_slide_body(body: &str) -> Slide {
    let mut attrs = DataAttrs::new();
    let elements = parse_element_list(body, Some(&mut attrs));
    Slide { attrs, elements }
}

/// Parse a run of elements. When `slide_attrs` is provided, bare `data-*`
/// pairs at this level are collected into it; otherwise they are skipped
/// (data-attributes live on the slide wrapper by convention).
fn parse_element_list(text: &str, mut slide_attrs: Option<&mut DataAttrs>) -> Vec<Element> {
    let mut cursor = Cursor::new(text);
    let mut elements = Vec::new();
    loop {
        cursor.skip_trivia();
        if cursor.is_eof() {
            break;
        }
        let Some(ident) = cursor.read_identifier() else {
            // Stray punctuation; skip a character and keep going.
            cursor.bump();
            continue;
        };
        cursor.skip_whitespace();
        match cursor.peek() {
            Some(b'{') => {
                let open = cursor.pos();
                match scan::matching_brace(text, open) {
                    Some(close) => {
                        elements.push(parse_element(ident, &text[open + 1..close]));
                        cursor.seek(close + 1);
                    },
                    None => {
                        // Unbalanced block: nothing more can be read here.
                        tracing::debug!(tag = ident, "dropping unbalanced element block");
                        break;
                    },
                }
            },
            Some(b'=') => {
                cursor.bump();
                cursor.skip_whitespace();
                let value = read_value(&mut cursor);
                if ident.starts_with("data-")
                    && let Some(attrs) = slide_attrs.as_deref_mut()
                {
                    push_attr(attrs, ident, value);
                }
            },
            _ => {
                // Identifier with neither block nor value; ignore it.
            },
        }
    }
    elements
}

/// Parse the interior of one element block.
fn parse_element(tag: &str, interior: &str) -> Element {
    let mut el = Element::new(tag);
    let mut cursor = Cursor::new(interior);
    loop {
        cursor.skip_trivia();
        if cursor.is_eof() {
            break;
        }
        let Some(ident) = cursor.read_identifier() else {
            cursor.bump();
            continue;
        };
        cursor.skip_whitespace();
        if cursor.eat(b'=') {
            cursor.skip_whitespace();
            match ident {
                "classes" => el.classes = read_string_prop(&mut cursor),
                "content" => el.content = read_string_prop(&mut cursor),
                "children" => {
                    if cursor.peek() == Some(b'[') {
                        let open = cursor.pos();
                        match scan::matching_bracket(interior, open) {
                            Some(close) => {
                                el.children = parse_element_list(&interior[open + 1..close], None);
                                cursor.seek(close + 1);
                            },
                            None => break,
                        }
                    } else {
                        cursor.skip_value();
                    }
                },
                key if key.starts_with("data-") => {
                    let value = read_value(&mut cursor);
                    push_attr(&mut el.attrs, key, value);
                },
                other => {
                    tracing::debug!(tag, prop = other, "skipping unknown element property");
                    cursor.skip_value();
                },
            }
        } else if cursor.peek() == Some(b'{') {
            // Bare nested block outside a children list; tolerated as a child.
            let open = cursor.pos();
            match scan::matching_brace(interior, open) {
                Some(close) => {
                    el.children.push(parse_element(ident, &interior[open + 1..close]));
                    cursor.seek(close + 1);
                },
                None => break,
            }
        }
    }
    el
}

/// Read a quoted property value; on a miss the attribute is simply omitted.
fn read_string_prop(cursor: &mut Cursor) -> Option<String> {
    let value = cursor.read_string();
    if value.is_none() {
        cursor.skip_value();
    }
    value
}

/// Read a quoted value, or fall back to the bare token up to `;`.
fn read_value(cursor: &mut Cursor) -> String {
    if let Some(value) = cursor.read_string() {
        return value;
    }
    let start = cursor.pos();
    cursor.skip_value();
    cursor.source()[start..cursor.pos()].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str =
        r#"PRESENTATION { slides = [ SLIDE { div { classes="a"; content="hi"; } } ] }"#;

    #[test]
    fn parses_the_minimal_document() {
        let slides = parse_slides(EXAMPLE);
        assert_eq!(slides.len(), 1);
        assert!(slides[0].attrs.is_empty());
        let el = &slides[0].elements[0];
        assert_eq!(el.tag, "div");
        assert_eq!(el.classes.as_deref(), Some("a"));
        assert_eq!(el.content.as_deref(), Some("hi"));
        assert!(el.children.is_empty());
    }

    #[test]
    fn missing_slides_array_yields_empty_document() {
        assert!(parse_slides("PRESENTATION { title = \"x\"; }").is_empty());
        assert!(parse_slides("complete garbage").is_empty());
        assert!(parse_slides("").is_empty());
    }

    #[test]
    fn metadata_props_are_read() {
        let doc = parse_document(
            r#"PRESENTATION { id = "deck-1"; title = "Quarterly"; slides = [ SLIDE { } ] }"#,
        );
        assert_eq!(doc.id.as_deref(), Some("deck-1"));
        assert_eq!(doc.title.as_deref(), Some("Quarterly"));
        assert_eq!(doc.slides.len(), 1);
    }

    #[test]
    fn slide_level_data_attrs_are_hoisted() {
        let slides = parse_slides(
            r##"slides = [ SLIDE {
                data-transition = "zoom";
                data-background-color = "#112233";
                div { content = "x"; }
            } ]"##,
        );
        assert_eq!(
            slides[0].attrs,
            vec![
                ("data-transition".to_string(), "zoom".to_string()),
                ("data-background-color".to_string(), "#112233".to_string()),
            ]
        );
        assert_eq!(slides[0].elements.len(), 1);
    }

    #[test]
    fn duplicate_slide_attrs_use_last_seen() {
        let slides =
            parse_slides(r#"slides = [ SLIDE { data-state = "a"; data-state = "b"; } ]"#);
        assert_eq!(slides[0].attrs, vec![("data-state".into(), "b".into())]);
    }

    #[test]
    fn children_parse_recursively() {
        let slides = parse_slides(
            r#"slides = [ SLIDE {
                ul { classes = "list";
                    children = [
                        li { content = "one"; };
                        li { content = "two"; data-idx = "2"; };
                    ];
                }
            } ]"#,
        );
        let ul = &slides[0].elements[0];
        assert_eq!(ul.tag, "ul");
        assert_eq!(ul.children.len(), 2);
        assert_eq!(ul.children[1].content.as_deref(), Some("two"));
        assert_eq!(ul.children[1].attrs, vec![("data-idx".into(), "2".into())]);
    }

    #[test]
    fn data_attrs_inside_children_lists_are_skipped() {
        let slides = parse_slides(
            r#"slides = [ SLIDE { div { children = [ data-stray = "x"; p { content = "t"; }; ]; } } ]"#,
        );
        let div = &slides[0].elements[0];
        assert_eq!(div.children.len(), 1);
        assert!(div.children[0].attrs.is_empty());
    }

    #[test]
    fn unknown_properties_are_skipped_locally() {
        let slides = parse_slides(
            r#"slides = [ SLIDE { div { frobnicate = "??"; content = "kept"; } } ]"#,
        );
        assert_eq!(slides[0].elements[0].content.as_deref(), Some("kept"));
    }

    #[test]
    fn unquoted_prop_is_an_extraction_miss() {
        let slides = parse_slides(r#"slides = [ SLIDE { div { classes = oops; content = "c"; } } ]"#);
        let el = &slides[0].elements[0];
        assert_eq!(el.classes, None);
        assert_eq!(el.content.as_deref(), Some("c"));
    }

    #[test]
    fn braces_in_content_do_not_break_structure() {
        let slides = parse_slides(
            r#"slides = [ SLIDE { div { content = "if (x) { y(); }"; } } SLIDE { } ]"#,
        );
        assert_eq!(slides.len(), 2);
        assert_eq!(
            slides[0].elements[0].content.as_deref(),
            Some("if (x) { y(); }")
        );
    }

    #[test]
    fn empty_slide_is_preserved_in_count_and_order() {
        let html = compile("slides = [ SLIDE { } SLIDE { div { content = \"x\"; } } ]");
        assert_eq!(html.len(), 2);
        assert!(html[0].starts_with("<div"));
        assert!(html[1].contains(">x<"));
    }

    #[test]
    fn image_sources_cover_img_content_and_backgrounds_only() {
        let source = r#"slides = [
            SLIDE {
                data-background-image = "bg.png";
                img { content = "a.png"; }
                div { content = "not-an-image.png";
                    children = [ img { content = "b.png"; data-background-image = "c.png"; }; ];
                }
            }
        ]"#;
        assert_eq!(image_sources(source), vec!["bg.png", "a.png", "b.png", "c.png"]);
    }
}
