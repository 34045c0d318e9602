//! Fragment parsing helpers over the html5ever DOM.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// A parsed HTML fragment, owning its DOM tree.
///
/// Handles returned by [`roots`](Fragment::roots) are only meaningful while
/// this value is alive: dropping the tree detaches every node's children
/// (the rcdom destructor clears them to avoid unbounded recursion), so any
/// walk must finish before the `Fragment` goes out of scope.
pub(crate) struct Fragment {
    dom: RcDom,
}

impl Fragment {
    /// Parse an HTML fragment.
    ///
    /// The fragment is run through the full document parser, which wraps it
    /// in the `html`/`head`/`body` scaffold.
    pub fn parse(fragment: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(fragment);
        Self { dom }
    }

    /// Top-level nodes of the fragment: the children of `<body>`.
    pub fn roots(&self) -> Vec<Handle> {
        let document = self.dom.document.children.borrow();
        for node in document.iter() {
            if element_name(node).as_deref() == Some("html") {
                for child in node.children.borrow().iter() {
                    if element_name(child).as_deref() == Some("body") {
                        return child.children.borrow().clone();
                    }
                }
            }
        }
        Vec::new()
    }
}

/// Local tag name of an element node, lowercased by the parser.
pub(crate) fn element_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

/// Value of the named attribute on an element node.
pub(crate) fn attr_value(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// All `data-*` attributes on an element node, in document order.
pub(crate) fn data_attrs(node: &Handle) -> Vec<(String, String)> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .filter(|attr| attr.name.local.starts_with("data-"))
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

/// The text of a text node, or `None` for any other node kind.
pub(crate) fn text_content(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}
