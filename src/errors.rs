/*!
 * Error types for the metatube-translator crate.
 *
 * This module contains custom error types for the different layers of the
 * crate, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors surfaced by a translation client (transport or provider side)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request was dropped because the caller cancelled it
    #[error("Request aborted")]
    Aborted,
}

/// Errors that can occur while translating a metadata record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslationError {
    /// The selected engine is not one this build knows how to address
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The caller asked for something the translator refuses to do
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error from the translation client, after retries were exhausted
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Cooperative cancellation was observed at a suspension point
    #[error("Translation cancelled")]
    Cancelled,
}

impl TranslationError {
    /// Whether this error is the cancellation signal rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
