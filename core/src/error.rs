//! Error types for decoding and encoding documents.

use thiserror::Error;

/// Errors returned by the document codec.
///
/// Unknown fields in the input are never an error; they are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The payload is not well-formed structured data.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A value is present but cannot be coerced to the field's declared type.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// The serializer failed while encoding.
    #[error("encode failed: {0}")]
    Encode(String),
}

impl DocumentError {
    /// Returns `true` for [`DocumentError::MalformedInput`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }

    /// Returns `true` for [`DocumentError::ShapeMismatch`].
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch(_))
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => Self::ShapeMismatch(err.to_string()),
            Category::Syntax | Category::Eof | Category::Io => {
                Self::MalformedInput(err.to_string())
            }
        }
    }
}

/// Convenience alias for results with [`DocumentError`].
pub type Result<T> = std::result::Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_syntax_error_is_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{\"a\":").unwrap_err();
        assert!(DocumentError::from(err).is_malformed());
    }

    #[test]
    fn test_json_data_error_is_shape_mismatch() {
        let err = serde_json::from_str::<Vec<String>>("\"not a list\"").unwrap_err();
        assert!(DocumentError::from(err).is_shape_mismatch());
    }

    #[test]
    fn test_display_includes_kind() {
        let err = DocumentError::ShapeMismatch("expected bool".into());
        assert_eq!(err.to_string(), "shape mismatch: expected bool");
    }
}
