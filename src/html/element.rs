//! Element rendering.

use super::config::HtmlOptions;
use super::icons;
use super::traits::ToHtml;
use super::writer::HtmlWriter;
use crate::dsl::ast::Element;

/// Render one element and its subtree into `writer`.
///
/// Attribute order is fixed so output is deterministic: `class`, then `src`
/// for void tags, then data attributes in first-seen order.
pub(crate) fn write_element(writer: &mut HtmlWriter, el: &Element, options: &HtmlOptions) {
    if el.tag == "icon" {
        icons::write_icon(writer, el, options);
        return;
    }

    writer.start_tag(&el.tag);
    if let Some(classes) = &el.classes {
        writer.attr("class", classes);
    }

    if el.is_void_tag() {
        // Void tags carry no body; content doubles as the source URL.
        if let Some(src) = &el.content {
            writer.attr("src", src);
        }
        for (key, value) in &el.attrs {
            writer.attr(key, value);
        }
        writer.finish_self_closing();
        return;
    }

    for (key, value) in &el.attrs {
        writer.attr(key, value);
    }
    writer.finish_start();
    if let Some(content) = &el.content {
        writer.text(content);
    }
    for child in &el.children {
        write_element(writer, child, options);
    }
    writer.end_tag(&el.tag);
}

impl ToHtml for Element {
    fn to_html_with_options(&self, options: &HtmlOptions) -> String {
        let mut writer = HtmlWriter::new();
        write_element(&mut writer, self, options);
        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(tag: &str) -> Element {
        Element::new(tag)
    }

    #[test]
    fn simple_element_with_class_and_content() {
        let mut div = el("div");
        div.classes = Some("a".to_string());
        div.content = Some("hi".to_string());
        assert_eq!(div.to_html(), r#"<div class="a">hi</div>"#);
    }

    #[test]
    fn content_is_escaped() {
        let mut p = el("p");
        p.content = Some("1 < 2 & 3 > 2".to_string());
        assert_eq!(p.to_html(), "<p>1 &lt; 2 &amp; 3 &gt; 2</p>");
    }

    #[test]
    fn img_is_self_closing_with_src_from_content() {
        let mut img = el("img");
        img.classes = Some("hero".to_string());
        img.content = Some("photo.png".to_string());
        assert_eq!(img.to_html(), r#"<img class="hero" src="photo.png"/>"#);
    }

    #[test]
    fn children_render_in_order_after_content() {
        let mut inner_a = el("span");
        inner_a.content = Some("a".to_string());
        let mut inner_b = el("span");
        inner_b.content = Some("b".to_string());
        let mut outer = el("div");
        outer.content = Some("lead".to_string());
        outer.children = vec![inner_a, inner_b];
        assert_eq!(outer.to_html(), "<div>lead<span>a</span><span>b</span></div>");
    }

    #[test]
    fn data_attributes_follow_class() {
        let mut div = el("div");
        div.classes = Some("x".to_string());
        div.attrs.push(("data-id".to_string(), "7".to_string()));
        div.attrs.push(("data-role".to_string(), "note".to_string()));
        assert_eq!(div.to_html(), r#"<div class="x" data-id="7" data-role="note"></div>"#);
    }

    #[test]
    fn icon_tag_dispatches_to_icon_table() {
        let mut icon = el("icon");
        icon.content = Some("check".to_string());
        let html = icon.to_html();
        assert!(html.starts_with("<svg"));
        assert!(html.contains(r#"data-icon="check""#));
    }
}
