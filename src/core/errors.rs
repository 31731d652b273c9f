//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Unreadable or unsupported input - fatal, reported before chunking
    #[error("Input error: {message}")]
    InputError {
        message: String,
    },

    /// API request rejected by the backend
    #[error("API error: {status} - {message}")]
    ApiError {
        status: u16,
        message: String,
    },

    /// Network error while reaching the backend
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
    },

    /// Invalid response from the backend
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        message: String,
    },

    /// Backend request timed out
    #[error("Request timeout")]
    TimeoutError,

    /// Tokenizer unavailable or failed for a given text
    #[error("Tokenization error: {message}")]
    TokenizationError {
        message: String,
    },

    /// File operation error
    #[error("File error: {path} - {message}")]
    FileError {
        path: String,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TranslationError {
    /// Whether this error aborts the whole run or only the current chunk.
    /// Backend failures are confined to their chunk; input and configuration
    /// problems surface before any chunk is dispatched.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TranslationError::InputError { .. } | TranslationError::ConfigError { .. }
        )
    }
}

impl From<anyhow::Error> for TranslationError {
    fn from(err: anyhow::Error) -> Self {
        TranslationError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let input = TranslationError::InputError {
            message: "not utf-8".to_string(),
        };
        let backend = TranslationError::ApiError {
            status: 429,
            message: "rate limited".to_string(),
        };

        assert!(input.is_fatal());
        assert!(!backend.is_fatal());
        assert!(!TranslationError::TimeoutError.is_fatal());
    }
}
