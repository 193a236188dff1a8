//! Result and error types for Buscar.

use thiserror::Error;

/// Result type for Buscar operations
pub type BuscarResult<T> = Result<T, BuscarError>;

/// Errors that can occur in Buscar
///
/// A failed lookup is NOT an error: resolvers return an empty ranked list
/// and scan operations return `None`/`-1` sentinels. The variants here are
/// construction-time failures (malformed input rejected before any
/// resolution starts) plus the content-mismatch carrier used by assertion
/// callers.
#[derive(Debug, Error)]
pub enum BuscarError {
    /// Locator path could not be parsed
    #[error("Invalid locator: {message}")]
    InvalidLocator {
        /// Error message
        message: String,
    },

    /// Content pattern could not be parsed
    #[error("Invalid content pattern: {message}")]
    InvalidContentPattern {
        /// Error message
        message: String,
    },

    /// Content verification failed; `message` carries the full diagnostic
    #[error("{message}")]
    ContentMismatch {
        /// Diagnostic message in the stable wire format
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_locator_display() {
        let err = BuscarError::InvalidLocator {
            message: "unclosed coordinate bracket".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid locator: unclosed coordinate bracket"
        );
    }

    #[test]
    fn test_content_mismatch_is_transparent() {
        let err = BuscarError::ContentMismatch {
            message: "Expected content(s) {not found} or [in wrong order]: 'a' (content: 'b')."
                .to_string(),
        };
        assert!(err.to_string().starts_with("Expected content(s)"));
    }
}
