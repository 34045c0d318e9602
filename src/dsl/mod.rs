//! The PMP block markup: data model, batch parser, streaming parser,
//! serializer, and `.pmp` file interchange.
//!
//! A document is a tree: a `PRESENTATION` block holds scalar metadata and an
//! ordered `slides = [ ... ]` array; each `SLIDE` block holds slide-level
//! data-attributes and a tree of elements. The [`parser`] module compiles a
//! complete document in one pass; the [`stream`] module consumes the same
//! markup incrementally as a generation backend produces it.

// Submodule declarations
pub mod ast;
pub mod file;
pub mod parser;
pub mod serializer;
pub mod stream;

// Re-exports for convenience
pub use ast::{Document, Element, Slide};
pub use parser::{compile, parse_document, parse_elements, parse_slides};
pub use serializer::ToDsl;
pub use stream::{ElementEvent, StreamingParser};
