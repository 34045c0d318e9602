//! HTML rendering for the presentation tree.
//!
//! This module compiles parsed slides to HTML strings. Rendering is a pure
//! function over the tree with no shared mutable state, safe to invoke
//! concurrently for distinct documents; large decks render their slides in
//! parallel.
//!
//! # Quick Start
//!
//! ```rust
//! use pitaya::dsl::parse_document;
//! use pitaya::html::ToHtml;
//!
//! let doc = parse_document(
//!     r#"PRESENTATION { slides = [ SLIDE { div { classes="a"; content="hi"; } } ] }"#,
//! );
//! let html = doc.slides[0].to_html();
//! assert_eq!(html, r#"<div class="slide"><div class="a">hi</div></div>"#);
//! ```
//!
//! # Architecture
//!
//! - [`ToHtml`]: core trait for types that render to HTML
//! - [`HtmlOptions`]: configuration for rendering behavior
//! - [`icons`]: the static icon table behind the reserved `icon` tag

// Submodule declarations
mod config;
mod element;
pub mod icons;
mod presentation;
mod traits;
mod writer;

// Re-exports for convenience
pub use config::HtmlOptions;
pub use presentation::render_slide;
pub use traits::ToHtml;
