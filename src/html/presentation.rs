//! Slide and document rendering.

use super::config::HtmlOptions;
use super::element::write_element;
use super::traits::ToHtml;
use super::writer::HtmlWriter;
use crate::dsl::ast::{Document, Slide};
use rayon::prelude::*;

/// Minimum slide count before document rendering goes parallel.
const PARALLEL_THRESHOLD: usize = 10;

/// Render a single slide as a standalone HTML fragment.
///
/// The slide's elements are wrapped in a `<div>` carrying the configured
/// slide class and the slide's own data attributes.
pub fn render_slide(slide: &Slide, options: &HtmlOptions) -> String {
    let mut writer = HtmlWriter::new();
    writer.start_tag("div");
    writer.attr("class", &options.slide_class);
    for (key, value) in &slide.attrs {
        writer.attr(key, value);
    }
    writer.finish_start();
    for el in &slide.elements {
        write_element(&mut writer, el, options);
    }
    writer.end_tag("div");
    writer.finish()
}

impl ToHtml for Slide {
    fn to_html_with_options(&self, options: &HtmlOptions) -> String {
        render_slide(self, options)
    }
}

impl ToHtml for Document {
    /// Render every slide, one fragment per line. Large decks fan the work
    /// out across a thread pool since slides render independently.
    fn to_html_with_options(&self, options: &HtmlOptions) -> String {
        let fragments: Vec<String> =
            if options.use_parallel && self.slides.len() >= PARALLEL_THRESHOLD {
                self.slides
                    .par_iter()
                    .map(|slide| render_slide(slide, options))
                    .collect()
            } else {
                self.slides
                    .iter()
                    .map(|slide| render_slide(slide, options))
                    .collect()
            };
        fragments.join("\n")
    }
}
