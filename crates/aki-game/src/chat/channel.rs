//! Chat platform collaborator trait
//!
//! The game loop publishes through and listens on a [`ChatChannel`]; the
//! platform behind it (terminal, Discord-style gateway, test fake) owns
//! authentication and transport.

use crate::chat::card::Card;
use crate::chat::message::{IncomingMessage, MessageId, UserId};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Result type for chat operations
pub type ChatResult<T> = std::result::Result<T, ChatError>;

/// Errors surfaced by the chat platform
#[derive(Error, Debug)]
pub enum ChatError {
    /// The referenced message no longer exists (already deleted)
    #[error("Message not found")]
    MessageNotFound,

    /// The channel or connection has been closed
    #[error("Channel closed")]
    Closed,

    /// Platform transport failure
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Predicate applied to candidate reply contents
pub type ReplyMatcher<'a> = &'a (dyn Fn(&str) -> bool + Send + Sync);

/// One chat channel the game publishes into
#[async_trait]
pub trait ChatChannel: Send + Sync {
    /// Publish a plain text message
    async fn send(&self, text: &str) -> ChatResult<MessageId>;

    /// Publish a rich card
    async fn send_card(&self, card: &Card) -> ChatResult<MessageId>;

    /// Delete a previously published message
    async fn delete(&self, id: &MessageId) -> ChatResult<()>;

    /// Wait for the next message from `author` whose content satisfies
    /// `matcher`, up to `timeout`
    ///
    /// Non-matching messages are ignored, not consumed against the caller.
    /// Returns `Ok(None)` when the window elapses without a match.
    async fn await_reply(
        &self,
        author: &UserId,
        matcher: ReplyMatcher<'_>,
        timeout: Duration,
    ) -> ChatResult<Option<IncomingMessage>>;
}
