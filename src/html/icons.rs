//! The static icon table behind the reserved `icon` tag.
//!
//! An `icon` element is never emitted literally; its `content` names an
//! entry in a compile-time table of vector paths, rendered as inline SVG
//! markup. The table is a data asset: extending the icon set means adding a
//! name/path pair here, nothing else.
//!
//! Icons are 24×24 stroke outlines. The rendered `<svg>` carries a
//! `data-icon` attribute naming its table entry so edited slides can be
//! serialized back to an `icon` element instead of raw SVG.

use super::config::HtmlOptions;
use super::writer::HtmlWriter;
use crate::dsl::ast::Element;
use phf::phf_map;

/// Compile-time lookup table mapping icon names to SVG path data.
static ICON_PATHS: phf::Map<&'static str, &'static str> = phf_map! {
    "check" => "M20 6L9 17l-5-5",
    "x" => "M18 6L6 18M6 6l12 12",
    "plus" => "M12 5v14M5 12h14",
    "minus" => "M5 12h14",
    "arrow-right" => "M5 12h14M12 5l7 7-7 7",
    "arrow-left" => "M19 12H5M12 19l-7-7 7-7",
    "arrow-up" => "M12 19V5M5 12l7-7 7 7",
    "arrow-down" => "M12 5v14M19 12l-7 7-7-7",
    "star" => "M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z",
    "heart" => "M20.84 4.61a5.5 5.5 0 0 0-7.78 0L12 5.67l-1.06-1.06a5.5 5.5 0 0 0-7.78 7.78l1.06 1.06L12 21.23l7.78-7.78 1.06-1.06a5.5 5.5 0 0 0 0-7.78z",
    "info" => "M12 22a10 10 0 1 1 0-20 10 10 0 0 1 0 20zM12 16v-4M12 8h.01",
    "warning" => "M10.29 3.86L1.82 18a2 2 0 0 0 1.71 3h16.94a2 2 0 0 0 1.71-3L13.71 3.86a2 2 0 0 0-3.42 0zM12 9v4M12 17h.01",
    "user" => "M20 21v-2a4 4 0 0 0-4-4H8a4 4 0 0 0-4 4v2M12 11a4 4 0 1 0 0-8 4 4 0 0 0 0 8z",
    "home" => "M3 9l9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2zM9 22V12h6v10",
    "search" => "M21 21l-4.35-4.35M11 19a8 8 0 1 0 0-16 8 8 0 0 0 0 16z",
    "mail" => "M4 4h16a2 2 0 0 1 2 2v12a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2zM22 6l-10 7L2 6",
    "calendar" => "M19 4H5a2 2 0 0 0-2 2v14a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2V6a2 2 0 0 0-2-2zM16 2v4M8 2v4M3 10h18",
    "clock" => "M12 22a10 10 0 1 0 0-20 10 10 0 0 0 0 20zM12 6v6l4 2",
    "globe" => "M12 22a10 10 0 1 0 0-20 10 10 0 0 0 0 20zM2 12h20M12 2a15.3 15.3 0 0 1 4 10 15.3 15.3 0 0 1-4 10 15.3 15.3 0 0 1-4-10 15.3 15.3 0 0 1 4-10z",
    "chart" => "M12 20V10M18 20V4M6 20v-4",
    "trending-up" => "M23 6l-9.5 9.5-5-5L1 18M17 6h6v6",
    "lightbulb" => "M9 18h6M10 22h4M15.09 14c.18-.98.65-1.74 1.41-2.5A4.65 4.65 0 0 0 18 8 6 6 0 0 0 6 8c0 1 .23 2.23 1.5 3.5.71.71 1.23 1.52 1.41 2.5",
    "rocket" => "M4.5 16.5c-1.5 1.26-2 5-2 5s3.74-.5 5-2c.71-.84.7-2.13-.09-2.91a2.18 2.18 0 0 0-2.91-.09zM12 15l-3-3a22 22 0 0 1 2-3.95A12.88 12.88 0 0 1 22 2c0 2.72-.78 7.5-6 11a22.35 22.35 0 0 1-4 2z",
    "play" => "M5 3l14 9-14 9V3z",
    "lock" => "M19 11H5a2 2 0 0 0-2 2v7a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2v-7a2 2 0 0 0-2-2zM7 11V7a5 5 0 0 1 10 0v4",
    "shield" => "M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z",
    "zap" => "M13 2L3 14h9l-1 8 10-12h-9l1-8z",
    "code" => "M16 18l6-6-6-6M8 6l-6 6 6 6",
};

/// Whether `name` is a known icon.
#[inline]
pub fn is_known_icon(name: &str) -> bool {
    ICON_PATHS.contains_key(name)
}

/// Iterate over every known icon name.
pub fn icon_names() -> impl Iterator<Item = &'static str> {
    ICON_PATHS.keys().copied()
}

/// Render an `icon` element as inline SVG. Unknown or missing names render
/// nothing; the rest of the slide still displays.
pub(crate) fn write_icon(writer: &mut HtmlWriter, el: &Element, options: &HtmlOptions) {
    let Some(name) = el.content.as_deref() else {
        tracing::warn!("icon element without a content name; skipping");
        return;
    };
    let Some(path) = ICON_PATHS.get(name) else {
        tracing::warn!(icon = name, "unknown icon name; skipping");
        return;
    };
    let size = el
        .attrs
        .iter()
        .find(|(key, _)| key == "data-size")
        .and_then(|(_, value)| value.parse::<u32>().ok())
        .unwrap_or(options.icon_size);
    let size = size.to_string();

    writer.start_tag("svg");
    writer.attr("xmlns", "http://www.w3.org/2000/svg");
    writer.attr("viewBox", "0 0 24 24");
    writer.attr("width", &size);
    writer.attr("height", &size);
    writer.attr("fill", "none");
    writer.attr("stroke", "currentColor");
    writer.attr("stroke-width", "2");
    writer.attr("stroke-linecap", "round");
    writer.attr("stroke-linejoin", "round");
    if let Some(classes) = &el.classes {
        writer.attr("class", classes);
    }
    writer.attr("data-icon", name);
    for (key, value) in &el.attrs {
        // The marker attribute is already written from the content name.
        if key == "data-icon" {
            continue;
        }
        writer.attr(key, value);
    }
    writer.finish_start();
    writer.start_tag("path");
    writer.attr("d", path);
    writer.finish_self_closing();
    writer.end_tag("svg");
}
