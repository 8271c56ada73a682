//! Error types for guessing-service operations

use thiserror::Error;

/// Result type for guessing-service operations
pub type Result<T> = std::result::Result<T, AkiError>;

/// Errors that can occur while talking to the guessing service
#[derive(Error, Debug)]
pub enum AkiError {
    /// The service answered with a non-OK completion code
    #[error("Service rejected the request: {0}")]
    ServiceRejected(String),

    /// The remote session is gone (expired or never created)
    #[error("Session expired or unknown")]
    SessionExpired,

    /// A guess was requested but the service returned none
    #[error("No guess available at step {step}")]
    NoGuessAvailable { step: u32 },

    /// Stepping back before the first question
    #[error("Cannot step back from step 0")]
    NothingToUndo,

    /// HTTP error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
