//! Response decoding errors.

use thiserror::Error;

/// Errors raised when a successful response cannot be turned into the caller's type.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The body, or the envelope's `data`, is not valid JSON for the expected type.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The response was empty but the caller expected a payload.
    #[error("Empty response body")]
    EmptyBody,
}

impl ValidationError {
    /// Returns `true` if this is a parsing error.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_parse_is_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = ValidationError::JsonParse(json_err);
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_empty_body_display() {
        let err = ValidationError::EmptyBody;
        assert!(!err.is_parse_error());
        assert_eq!(err.to_string(), "Empty response body");
    }
}
