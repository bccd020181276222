//! Error types for rs-newspaper.
//!
//! Extraction itself is infallible on any input HTML; errors are reserved for
//! configuration problems (an unknown language) and for callers that insist on
//! a body being found ([`crate::Article::require_content`]).

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No stopword list is registered for the requested language code.
    #[error("Unsupported language: {0:?}")]
    UnsupportedLanguage(String),

    /// No article body could be located in the document.
    #[error("No extractable content found")]
    NoContent,
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_language_message() {
        let err = Error::UnsupportedLanguage("xx".to_string());
        assert_eq!(err.to_string(), "Unsupported language: \"xx\"");
    }

    #[test]
    fn test_no_content_message() {
        assert_eq!(Error::NoContent.to_string(), "No extractable content found");
    }
}
