//! Value types for the presentation tree.
//!
//! A [`Document`] owns its [`Slide`]s, a slide owns its top-level
//! [`Element`]s, and every element exclusively owns its children; the grammar
//! admits no cycles or sharing. Slide order equals discovery order in the
//! source text and never changes after parsing.

use serde::{Deserialize, Serialize};

/// Ordered data-attribute pairs with last-seen-wins semantics.
///
/// Duplicate keys replace the earlier value in place, keeping the position of
/// the first occurrence, so attribute emission order stays deterministic.
pub type DataAttrs = Vec<(String, String)>;

/// Insert a data-attribute pair, replacing the value of an existing key.
pub(crate) fn push_attr(attrs: &mut DataAttrs, key: &str, value: String) {
    if let Some(slot) = attrs.iter_mut().find(|(k, _)| k == key) {
        slot.1 = value;
    } else {
        attrs.push((key.to_string(), value));
    }
}

/// A complete presentation document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier, when the source carries one
    pub id: Option<String>,
    /// Human-readable title
    pub title: Option<String>,
    /// Slides in presentation order
    pub slides: Vec<Slide>,
}

/// One `SLIDE` block: slide-level engine hints plus the element tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Slide-level `data-*` pairs (presentation-engine hints)
    pub attrs: DataAttrs,
    /// Top-level elements, in source order
    pub elements: Vec<Element>,
}

/// A typed node in a slide's tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Tag name (`div`, `img`, the reserved `icon`, ...)
    pub tag: String,
    /// Opaque style-class string; not validated
    pub classes: Option<String>,
    /// Scalar content: text, or a resource URL for self-closing tags
    pub content: Option<String>,
    /// Ordered child elements
    pub children: Vec<Element>,
    /// Element-level `data-*` pairs
    pub attrs: DataAttrs,
}

impl Element {
    /// Create an element with the given tag and no other properties.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Whether this tag renders self-closing, with `content` as its `src`.
    #[inline]
    pub fn is_void_tag(&self) -> bool {
        matches!(self.tag.as_str(), "img" | "input" | "br" | "hr")
    }
}

impl Slide {
    /// Number of elements in the whole tree, not just the top level.
    pub fn element_count(&self) -> usize {
        fn count(el: &Element) -> usize {
            1 + el.children.iter().map(count).sum::<usize>()
        }
        self.elements.iter().map(count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_attr_keys_keep_last_value_and_first_position() {
        let mut attrs = DataAttrs::new();
        push_attr(&mut attrs, "data-transition", "fade".into());
        push_attr(&mut attrs, "data-state", "intro".into());
        push_attr(&mut attrs, "data-transition", "zoom".into());
        assert_eq!(
            attrs,
            vec![
                ("data-transition".to_string(), "zoom".to_string()),
                ("data-state".to_string(), "intro".to_string()),
            ]
        );
    }

    #[test]
    fn element_count_descends_into_children() {
        let mut root = Element::new("div");
        root.children.push(Element::new("span"));
        root.children.push(Element::new("ul"));
        root.children[1].children.push(Element::new("li"));
        let slide = Slide {
            attrs: DataAttrs::new(),
            elements: vec![root],
        };
        assert_eq!(slide.element_count(), 4);
    }

    #[test]
    fn void_tags() {
        for tag in ["img", "input", "br", "hr"] {
            assert!(Element::new(tag).is_void_tag());
        }
        assert!(!Element::new("div").is_void_tag());
        assert!(!Element::new("icon").is_void_tag());
    }
}
