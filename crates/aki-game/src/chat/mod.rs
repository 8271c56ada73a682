//! Chat platform abstractions
//!
//! Everything the game needs from a chat platform: typed identifiers, the
//! incoming message value, the rich-card value, and the [`ChatChannel`]
//! collaborator trait.

pub mod card;
pub mod channel;
pub mod message;

pub use card::{Card, CardField};
pub use channel::{ChatChannel, ChatError, ChatResult, ReplyMatcher};
pub use message::{ChannelId, GuildId, IncomingMessage, MessageId, UserId};
