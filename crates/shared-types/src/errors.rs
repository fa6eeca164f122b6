//! Common error types used across all page-params crates
//! Provides consistent error handling and reporting

use thiserror::Error;

/// Failure to decode a single query-string component
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed percent escape {sequence:?} at byte {offset}")]
    MalformedEscape { offset: usize, sequence: String },

    #[error("Decoded bytes are not valid UTF-8: {input}")]
    InvalidUtf8 { input: String },
}

/// Base error type for all page-params operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("Failed to decode query token {token:?}: {source}")]
    Decode {
        token: String,
        #[source]
        source: DecodeError,
    },

    #[error("Environment error: {message}")]
    Environment { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias for page-params operations
pub type ParamsResult<T> = Result<T, ParamsError>;

impl ParamsError {
    /// The underlying decode failure, if this error came from the decoder
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            ParamsError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ParamsError {
    fn from(err: serde_json::Error) -> Self {
        ParamsError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = ParamsError::Decode {
            token: "bad=%E".to_string(),
            source: DecodeError::MalformedEscape {
                offset: 0,
                sequence: "%E".to_string(),
            },
        };

        let message = err.to_string();
        assert!(message.contains("bad=%E"));
        assert!(message.contains("Malformed percent escape"));
        assert!(matches!(
            err.decode_error(),
            Some(DecodeError::MalformedEscape { offset: 0, .. })
        ));
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ParamsError = json_err.into();

        match err {
            ParamsError::InvalidConfig { message } => assert!(!message.is_empty()),
            _ => panic!("Wrong error variant"),
        }
    }
}
