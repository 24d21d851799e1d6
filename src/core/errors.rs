//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Invalid configuration or endpoint URL
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Token endpoint rejected the subscription key
    #[error("Authentication error: {status} - {message}")]
    AuthError {
        status: u16,
        message: String,
    },

    /// Translation endpoint answered with a non-200 status
    #[error("API error: {status} - {message}")]
    RemoteError {
        status: u16,
        message: String,
    },

    /// Response body could not be decoded
    #[error("Invalid response: {message}")]
    DecodeError {
        message: String,
    },

    /// Request body could not be encoded
    #[error("Invalid request: {message}")]
    EncodeError {
        message: String,
    },

    /// Request timeout
    #[error("Request timeout")]
    TimeoutError,

    /// Network error below the HTTP level
    #[error("Network error: {message}")]
    TransportError {
        message: String,
    },
}

impl TranslationError {
    /// Message carried by the error, as reported by the service where applicable
    pub fn message(&self) -> String {
        match self {
            TranslationError::ConfigError { message }
            | TranslationError::AuthError { message, .. }
            | TranslationError::RemoteError { message, .. }
            | TranslationError::DecodeError { message }
            | TranslationError::EncodeError { message }
            | TranslationError::TransportError { message } => message.clone(),
            TranslationError::TimeoutError => "request timed out".to_string(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        TranslationError::ConfigError {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TranslationError::TimeoutError
        } else if err.is_decode() {
            TranslationError::DecodeError {
                message: err.to_string(),
            }
        } else {
            TranslationError::TransportError {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(err: serde_json::Error) -> Self {
        TranslationError::DecodeError {
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for TranslationError {
    fn from(err: quick_xml::Error) -> Self {
        TranslationError::DecodeError {
            message: err.to_string(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
