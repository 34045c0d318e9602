//! `.pmp` file interchange.
//!
//! Documents persist as plain markup text: no binary framing, no version
//! header. Import validation is deliberately shallow; it checks only for the
//! literal block signatures and leaves everything else to the tolerant
//! parser.

use crate::common::{Error, Result};
use std::fs;
use std::path::Path;

/// Validate imported text as a presentation document.
///
/// Checks only for the literal substrings `PRESENTATION {` and `SLIDE {`.
pub fn validate(text: &str) -> Result<()> {
    if !text.contains("PRESENTATION {") {
        return Err(Error::InvalidDocument(
            "missing PRESENTATION block".to_string(),
        ));
    }
    if !text.contains("SLIDE {") {
        return Err(Error::InvalidDocument("missing SLIDE block".to_string()));
    }
    Ok(())
}

/// Read and validate a `.pmp` file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<String> {
    let text = fs::read_to_string(path)?;
    validate(&text)?;
    Ok(text)
}

/// Write document text to a `.pmp` file.
pub fn save<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    fs::write(path, text)?;
    Ok(())
}
