//! Decode error types

use thiserror::Error;

/// Errors raised while decoding an inbound stats payload
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Binary frame was not valid UTF-8
    #[error("Payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Payload was not a single JSON value
    #[error("Payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = DecodeError::from(err);
        assert!(err.to_string().starts_with("Payload is not valid JSON"));
    }

    #[test]
    fn test_utf8_error_conversion() {
        let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: DecodeError = utf8_err.into();
        assert!(matches!(err, DecodeError::Utf8(_)));
    }
}
