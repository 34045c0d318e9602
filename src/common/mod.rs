//! Common types and utilities shared across the compiler pipeline.
//!
//! This module provides the unified error type and the depth-tracked scanning
//! primitives used by the batch parser, the streaming parser, and the slide
//! splice operation, ensuring all of them agree on block boundaries.

// Submodule declarations
pub mod error;
pub mod scan;

// Re-exports for convenience
pub use error::{Error, Result};
pub use scan::{Cursor, ScopeKind};
