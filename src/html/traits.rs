//! Core trait for HTML rendering.

use super::config::HtmlOptions;

/// Core trait for types that render to HTML.
///
/// Implemented for [`Element`](crate::dsl::Element),
/// [`Slide`](crate::dsl::Slide), and [`Document`](crate::dsl::Document).
/// Rendering never fails: pieces that cannot be rendered (an unknown icon
/// name, an empty slide) degrade to empty output so the rest of the document
/// still displays.
pub trait ToHtml {
    /// Render to HTML with default options.
    fn to_html(&self) -> String {
        self.to_html_with_options(&HtmlOptions::default())
    }

    /// Render to HTML with the given options.
    fn to_html_with_options(&self, options: &HtmlOptions) -> String;
}
