//! Adapter producing Reveal.js markup from compiled slide HTML.
//!
//! Reveal reads its hints (transitions, backgrounds, state) from attributes
//! on each slide's `<section>` element. This module lifts the recognized
//! attributes out of a compiled slide fragment onto a `<section>` wrapper,
//! stripping them from the body so they are not duplicated, and fills in a
//! deterministic default transition for slides that specify none.
//!
//! ```rust
//! use pitaya::reveal;
//!
//! let html = reveal::convert_slide(r#"<div class="slide"><p>hi</p></div>"#, 0);
//! assert_eq!(
//!     html,
//!     r#"<section data-transition="fade"><div class="slide"><p>hi</p></div></section>"#,
//! );
//! ```

mod attributes;

pub use attributes::{extract_and_strip, RECOGNIZED};

/// Transitions assigned to untagged slides, rotated by slide position so
/// consecutive slides stay visually distinct.
pub const TRANSITION_PALETTE: [&str; 5] = ["fade", "slide", "convex", "concave", "zoom"];

/// Wrap one compiled slide in a `<section>` carrying its engine attributes.
///
/// `index` is the slide's position in the deck; it selects the default
/// transition when the slide carries no `data-transition` of its own. The
/// recognized attributes appear on the wrapper in a fixed order regardless
/// of their order in the input.
pub fn convert_slide(html: &str, index: usize) -> String {
    let (attrs, body) = attributes::extract_and_strip(html);

    let mut out = String::with_capacity(html.len() + 64);
    out.push_str("<section");
    for name in RECOGNIZED {
        let value = match attrs.iter().find(|(key, _)| key == name) {
            Some((_, value)) => value.as_str(),
            None if name == "data-transition" => {
                TRANSITION_PALETTE[index % TRANSITION_PALETTE.len()]
            },
            None => continue,
        };
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
    out.push_str(&body);
    out.push_str("</section>");
    out
}

/// Assemble the whole deck scaffold expected by the engine.
pub fn convert<S: AsRef<str>>(slide_html_list: &[S]) -> String {
    let mut out = String::from("<div class=\"reveal\"><div class=\"slides\">\n");
    for (index, html) in slide_html_list.iter().enumerate() {
        out.push_str(&convert_slide(html.as_ref(), index));
        out.push('\n');
    }
    out.push_str("</div></div>");
    out
}
