//! Document extraction error types

use thiserror::Error;

/// Extraction error type
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Declared media type is neither plain text nor PDF
    #[error("Unsupported media kind: {0}")]
    UnsupportedMediaKind(String),

    /// Decoding or parsing failed (corrupt, encrypted, truncated)
    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

impl From<::mupdf::Error> for ExtractError {
    fn from(err: ::mupdf::Error) -> Self {
        ExtractError::UnreadableDocument(err.to_string())
    }
}
