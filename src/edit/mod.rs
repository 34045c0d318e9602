//! Reverse serialization of edited slide markup.
//!
//! After a user edits a rendered slide in place, the edited DOM subtree has
//! to be persisted as block markup, not HTML. This module walks an edited
//! fragment with an HTML5 parser and reconstructs the markup, then splices
//! the result back into the stored document over the affected slide's exact
//! text span, leaving every other slide's original text untouched.
//!
//! Reconstruction is a heuristic, not a strict inverse: exactly one text
//! child becomes a scalar `content`, anything mixed becomes a `children`
//! list with bare text runs wrapped as synthetic `span` elements. Mixed
//! inline formatting inside a text run does not survive the trip.

mod dom;

use crate::common::scan;
use crate::dsl::serializer::escape;
use markup5ever_rcdom::Handle;

/// Convert an edited HTML fragment back into element markup.
///
/// Top-level bare text runs are wrapped as synthetic `span` elements, so any
/// fragment produces a parseable body; a fragment with nothing renderable
/// yields the empty string.
pub fn html_to_dsl(fragment: &str) -> String {
    let tree = dom::Fragment::parse(fragment);
    let mut out = String::new();
    for node in tree.roots() {
        write_node(&mut out, &node);
    }
    out.trim_end().to_string()
}

/// Convert an edited slide back into the body of a `SLIDE { ... }` block.
///
/// A single root container `<div>` (the slide wrapper emitted at render
/// time) is unwrapped: its `data-*` attributes become slide-level pairs and
/// its children become the slide's elements. Any other shape is treated as
/// the element list itself.
pub fn slide_to_dsl(fragment: &str) -> String {
    let tree = dom::Fragment::parse(fragment);
    let nodes = tree.roots();
    let roots: Vec<&Handle> = nodes
        .iter()
        .filter(|node| dom::element_name(node).is_some())
        .collect();

    if let [wrapper] = roots.as_slice()
        && dom::element_name(wrapper).as_deref() == Some("div")
        && dom::attr_value(wrapper, "class").is_some()
    {
        let mut out = String::new();
        for (key, value) in dom::data_attrs(wrapper) {
            out.push_str(&key);
            out.push_str(" = \"");
            out.push_str(&escape(&value));
            out.push_str("\"; ");
        }
        for child in wrapper.children.borrow().iter() {
            write_node(&mut out, child);
        }
        return out.trim_end().to_string();
    }

    html_to_dsl(fragment)
}

/// Replace the `index`th `SLIDE` block of `document` with `new_body`.
///
/// Only that slide's span changes; the rest of the document text survives
/// byte for byte, preserving formatting the parser does not model. Returns
/// `None` when the document has no such slide.
pub fn replace_slide(document: &str, index: usize, new_body: &str) -> Option<String> {
    let spans = scan::slide_spans(document);
    let span = spans.get(index)?.clone();

    let body = new_body.trim();
    let replacement = if body.is_empty() {
        "SLIDE { }".to_string()
    } else {
        format!("SLIDE {{ {body} }}")
    };

    let mut out = String::with_capacity(document.len() + replacement.len());
    out.push_str(&document[..span.start]);
    out.push_str(&replacement);
    out.push_str(&document[span.end..]);
    Some(out)
}

/// Serialize one DOM node as element markup, followed by a space.
fn write_node(out: &mut String, node: &Handle) {
    // Bare text at element-list level becomes a synthetic span.
    if let Some(text) = dom::text_content(node) {
        let text = text.trim();
        if !text.is_empty() {
            out.push_str("span { content = \"");
            out.push_str(&escape(text));
            out.push_str("\"; }; ");
        }
        return;
    }
    let Some(tag) = dom::element_name(node) else {
        // Comments and other non-element nodes have no markup counterpart.
        return;
    };

    // Rendered icons come back as <svg data-icon="name">.
    if tag == "svg"
        && let Some(name) = dom::attr_value(node, "data-icon")
    {
        out.push_str("icon { content = \"");
        out.push_str(&escape(&name));
        out.push_str("\"; ");
        for (key, value) in dom::data_attrs(node) {
            if key == "data-icon" {
                continue;
            }
            out.push_str(&key);
            out.push_str(" = \"");
            out.push_str(&escape(&value));
            out.push_str("\"; ");
        }
        out.push_str("}; ");
        return;
    }

    out.push_str(&tag);
    out.push_str(" { ");
    if let Some(classes) = dom::attr_value(node, "class") {
        out.push_str("classes = \"");
        out.push_str(&escape(&classes));
        out.push_str("\"; ");
    }

    if matches!(tag.as_str(), "img" | "input" | "br" | "hr") {
        if let Some(src) = dom::attr_value(node, "src") {
            out.push_str("content = \"");
            out.push_str(&escape(&src));
            out.push_str("\"; ");
        }
    } else {
        let children = node.children.borrow();
        let texts: Vec<String> = children
            .iter()
            .filter_map(dom::text_content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect();
        let element_count = children
            .iter()
            .filter(|child| dom::element_name(child).is_some())
            .count();

        if element_count == 0 && texts.len() == 1 {
            out.push_str("content = \"");
            out.push_str(&escape(&texts[0]));
            out.push_str("\"; ");
        } else if element_count > 0 || texts.len() > 1 {
            out.push_str("children = [ ");
            for child in children.iter() {
                write_node(out, child);
            }
            out.push_str("]; ");
        }
    }

    for (key, value) in dom::data_attrs(node) {
        out.push_str(&key);
        out.push_str(" = \"");
        out.push_str(&escape(&value));
        out.push_str("\"; ");
    }
    out.push_str("}; ");
}
