//! Unified error types for Pitaya operations.
//!
//! Parsing APIs intentionally do not surface errors for malformed markup; a
//! live, partially generated presentation must always render something
//! coherent. Errors here cover the boundaries where failure is real: file
//! I/O and document validation.
use thiserror::Error;

/// Main error type for Pitaya operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File content is not a recognized presentation document
    #[error("Not a valid presentation document: {0}")]
    InvalidDocument(String),
}

/// Result type for Pitaya operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = Error::InvalidDocument("missing PRESENTATION block".to_string());
        assert_eq!(
            err.to_string(),
            "Not a valid presentation document: missing PRESENTATION block"
        );

        let io: Error = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(io.to_string().starts_with("IO error:"));
    }
}
