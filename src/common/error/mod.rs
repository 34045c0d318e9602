//! Unified error types for the Pitaya library.
//!
//! This module provides a unified error type covering file interchange and
//! HTML (de)serialization. Parsing itself never fails: malformed markup
//! degrades to empty output or stays buffered, per the compiler's recovery
//! policy.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
