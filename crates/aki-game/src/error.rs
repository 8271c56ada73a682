//! Error types for game operations

use crate::chat::ChatError;
use thiserror::Error;

/// Result type alias for game operations
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors that can occur while driving a game
#[derive(Error, Debug)]
pub enum GameError {
    /// The triggering message context is malformed
    #[error("Invalid message context: {0}")]
    InvalidMessage(String),

    /// Games cannot be started from direct-message contexts
    #[error("This cannot be used in DMs")]
    UnsupportedChannel,

    /// Guessing service failure
    #[error("Guessing service error: {0}")]
    Service(#[from] aki_api::AkiError),

    /// Chat platform failure
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl GameError {
    /// Whether this is the transient "message already deleted" platform
    /// error that is swallowed rather than reported
    pub fn is_transient(&self) -> bool {
        matches!(self, GameError::Chat(ChatError::MessageNotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_detection() {
        assert!(GameError::Chat(ChatError::MessageNotFound).is_transient());
        assert!(!GameError::UnsupportedChannel.is_transient());
        assert!(!GameError::Chat(ChatError::Closed).is_transient());
    }
}
