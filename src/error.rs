//! Error types for canondoc library.

use std::io;
use thiserror::Error;

/// Result type alias for canondoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, validating, or serializing documents.
///
/// Rendering itself never fails; these errors come from the JSON boundary
/// and from construction-time validation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid canonical document JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document violates a structural invariant.
    #[error("Invalid document: {0}")]
    Validation(String),

    /// A section was constructed without an identifier.
    #[error("Section at position {0} has no identifier")]
    MissingSectionId(usize),

    /// Two sections share the same identifier.
    #[error("Duplicate section identifier: {0}")]
    DuplicateSectionId(String),

    /// Two image resources share the same identifier.
    #[error("Duplicate image resource identifier: {0}")]
    DuplicateResourceId(String),

    /// A block was constructed without an identifier.
    #[error("Block without identifier in section {0}")]
    MissingBlockId(String),

    /// Two blocks share the same identifier.
    #[error("Duplicate block identifier: {0}")]
    DuplicateBlockId(String),

    /// Unknown output format name.
    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    /// Error during rendering (JSON serialization of output).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DuplicateSectionId("s1".to_string());
        assert_eq!(err.to_string(), "Duplicate section identifier: s1");

        let err = Error::MissingSectionId(3);
        assert_eq!(err.to_string(), "Section at position 3 has no identifier");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
