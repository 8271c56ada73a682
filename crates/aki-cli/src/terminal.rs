//! Terminal chat channel
//!
//! Implements the game's chat seam over stdout/stdin so a session can be
//! played without any platform connection.

use aki_game::chat::{
    Card, ChatChannel, ChatError, ChatResult, IncomingMessage, MessageId, ReplyMatcher, UserId,
};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tokio::time::{Instant, timeout};
use uuid::Uuid;

/// Chat channel backed by the controlling terminal
pub struct TerminalChannel {
    user: UserId,
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl TerminalChannel {
    /// Create a channel whose replies are attributed to `user`
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: UserId::new(user),
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// The user this terminal speaks for
    pub fn user(&self) -> &UserId {
        &self.user
    }

    fn mint_id() -> MessageId {
        MessageId::new(Uuid::new_v4().to_string())
    }
}

/// Render a card as a bordered text block
pub(crate) fn render_card(card: &Card) -> String {
    let mut out = String::new();
    out.push_str("┌──────────────────────────────────────────────\n");

    if let Some(title) = &card.title {
        out.push_str(&format!("│ {title}\n"));
    }
    if let Some(author) = &card.author_name {
        out.push_str(&format!("│ {author}\n"));
    }
    if card.title.is_some() || card.author_name.is_some() {
        out.push_str("│\n");
    }

    if let Some(description) = &card.description {
        for line in description.replace("**", "").lines() {
            out.push_str(&format!("│ {line}\n"));
        }
    }

    for field in &card.fields {
        out.push_str(&format!(
            "│ {}: {}\n",
            field.name,
            field.value.replace("**", "")
        ));
    }

    if let Some(image) = &card.image {
        out.push_str(&format!("│ {image}\n"));
    }
    if let Some(footer) = &card.footer {
        out.push_str(&format!("│ {footer}\n"));
    }

    out.push_str("└──────────────────────────────────────────────");
    out
}

#[async_trait]
impl ChatChannel for TerminalChannel {
    async fn send(&self, text: &str) -> ChatResult<MessageId> {
        println!("{}", text.replace("**", ""));
        Ok(Self::mint_id())
    }

    async fn send_card(&self, card: &Card) -> ChatResult<MessageId> {
        println!("{}", render_card(card));
        Ok(Self::mint_id())
    }

    async fn delete(&self, _id: &MessageId) -> ChatResult<()> {
        // A terminal cannot unprint; these deletions are cosmetic anyway.
        Ok(())
    }

    async fn await_reply(
        &self,
        author: &UserId,
        matcher: ReplyMatcher<'_>,
        window: Duration,
    ) -> ChatResult<Option<IncomingMessage>> {
        let deadline = Instant::now() + window;
        let mut lines = self.lines.lock().await;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(None);
            }

            let line = match timeout(remaining, lines.next_line()).await {
                Err(_) => return Ok(None),
                Ok(Err(err)) => return Err(ChatError::Transport(err.to_string())),
                Ok(Ok(None)) => return Err(ChatError::Closed),
                Ok(Ok(Some(line))) => line,
            };

            if matcher(&line) {
                let message =
                    IncomingMessage::new(Self::mint_id().as_str(), "terminal", author.as_str(), line)
                        .with_guild("terminal");
                return Ok(Some(message));
            }
            // Anything else is not a game reply; keep listening until the
            // window closes.
        }
    }
}
