//! Pitaya - a compiler and live-streaming parser for block slide markup
//!
//! This library parses a declarative block language describing slide
//! presentations and compiles it to HTML, one fragment per slide. It supports
//! two front ends over the same grammar: a batch parser for complete
//! documents, and a streaming parser that consumes the markup chunk by chunk
//! as a generation backend produces it, reporting each element the instant
//! its closing brace arrives.
//!
//! # Features
//!
//! - **Batch compiler**: Parse a complete document into a slide tree and
//!   render each slide to HTML
//! - **Streaming parser**: Feed arbitrary chunks, get back completed
//!   elements tagged with slide index and slide-completion state
//! - **Reveal adapter**: Lift engine attributes onto `<section>` wrappers
//!   with deterministic default transitions
//! - **Reverse serializer**: Turn an edited HTML slide back into markup and
//!   splice it over the original slide's text span
//! - **`.pmp` interchange**: Load, validate, and save documents as plain text
//!
//! # Example - Compiling a document
//!
//! ```rust
//! use pitaya::dsl::compile;
//!
//! let html = compile(
//!     r#"PRESENTATION { slides = [ SLIDE { div { classes="a"; content="hi"; } } ] }"#,
//! );
//! assert_eq!(html.len(), 1);
//! assert_eq!(html[0], r#"<div class="slide"><div class="a">hi</div></div>"#);
//! ```
//!
//! # Example - Streaming chunks
//!
//! ```rust
//! use pitaya::dsl::StreamingParser;
//!
//! let mut parser = StreamingParser::new();
//! let events = parser.add_chunk(r#"SLIDE { div { classes="x"; "#);
//! assert!(events.is_empty());
//!
//! let events = parser.add_chunk(r#"content="y"; } }"#);
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].element_type, "div");
//! assert_eq!(events[0].slide_index, 0);
//! assert!(events[0].is_slide_complete);
//! ```
//!
//! # Example - Editing a rendered slide
//!
//! ```rust
//! use pitaya::edit::{replace_slide, slide_to_dsl};
//!
//! let stored = r#"PRESENTATION { slides = [ SLIDE { p { content = "old"; } } ] }"#;
//! let body = slide_to_dsl(r#"<div class="slide"><p>new</p></div>"#);
//! let updated = replace_slide(stored, 0, &body).unwrap();
//! assert!(updated.contains(r#"content = "new""#));
//! ```

/// Shared primitives: the error type and depth-tracked block scanning
///
/// Every consumer of the markup delimits blocks the same way; this module is
/// the single implementation of that discipline.
pub mod common;

/// The block markup itself: data model, batch parser, streaming parser,
/// serializer, and `.pmp` file interchange
pub mod dsl;

/// Reverse serialization of edited slide HTML back into block markup
pub mod edit;

/// HTML rendering for the presentation tree
pub mod html;

/// Adapter producing Reveal.js markup from compiled slide HTML
pub mod reveal;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use dsl::{
    compile, parse_document, Document, Element, ElementEvent, Slide, StreamingParser, ToDsl,
};
pub use html::{HtmlOptions, ToHtml};
