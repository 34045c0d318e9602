//! Recognized engine-attribute extraction.

use aho_corasick::{AhoCorasick, MatchKind};
use memchr::memrchr;
use once_cell::sync::Lazy;

use crate::dsl::ast::DataAttrs;

/// Attributes the presentation engine reads from the `<section>` wrapper,
/// in the order they are emitted.
pub const RECOGNIZED: [&str; 10] = [
    "data-transition",
    "data-background-transition",
    "data-background-color",
    "data-background-image",
    "data-background-video",
    "data-background-size",
    "data-background-position",
    "data-background-repeat",
    "data-state",
    "data-auto-animate",
];

// Static initialization: automaton is built only once, thread-safe
static ATTR_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(RECOGNIZED)
        .expect("Failed to build attribute matcher")
});

/// Pull recognized `attr="value"` pairs out of a slide's HTML.
///
/// Returns the extracted pairs (last occurrence wins per key) and the body
/// with the matched ` attr="value"` spans removed, so the wrapper is the
/// only carrier of engine hints.
pub fn extract_and_strip(html: &str) -> (DataAttrs, String) {
    let bytes = html.as_bytes();
    let mut attrs = DataAttrs::new();
    // (start, end) byte spans to drop from the body, including the
    // preceding space.
    let mut cut: Vec<(usize, usize)> = Vec::new();

    for m in ATTR_MATCHER.find_iter(html) {
        let name = &html[m.start()..m.end()];
        // Only a real attribute position counts: preceded by a space,
        // followed by `="`.
        if m.start() == 0 || bytes[m.start() - 1] != b' ' {
            continue;
        }
        // The match must sit inside a tag. Rendered markup escapes angle
        // brackets in text and attribute values, so the nearest bracket
        // before the match tells whether a tag is still open.
        let before = &bytes[..m.start()];
        let open = memrchr(b'<', before);
        let close = memrchr(b'>', before);
        if open.is_none() || close > open {
            continue;
        }
        let after = &html[m.end()..];
        let Some(rest) = after.strip_prefix("=\"") else {
            continue;
        };
        let Some(quote) = rest.find('"') else {
            continue;
        };
        let value = &rest[..quote];
        crate::dsl::ast::push_attr(&mut attrs, name, value.to_string());
        cut.push((m.start() - 1, m.end() + 2 + quote + 1));
    }

    if cut.is_empty() {
        return (attrs, html.to_string());
    }

    let mut body = String::with_capacity(html.len());
    let mut pos = 0;
    for (start, end) in cut {
        body.push_str(&html[pos..start]);
        pos = end;
    }
    body.push_str(&html[pos..]);
    (attrs, body)
}
