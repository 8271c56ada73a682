//! Akinator game loop for chat platforms
//!
//! This crate drives single-player Akinator games inside a chat
//! application. It provides:
//!
//! - [`Akinator`] - the host: hand it a triggering chat message and it runs
//!   one game session for that user
//! - [`SessionRegistry`] - process-wide per-user session locks and per-guild
//!   guess-confirmation locks
//! - [`Vocabulary`] - the locale's answer tokens and notice texts
//! - [`chat`] - the platform collaborator seam ([`chat::ChatChannel`])
//!
//! The remote guessing service is reached through the traits in
//! [`aki_api`]; any [`aki_api::GuessEngine`] implementation plugs in.
//!
//! # Example
//!
//! ```rust,ignore
//! use aki_api::AkiClient;
//! use aki_game::{Akinator, GameConfig, Vocabulary};
//! use std::sync::Arc;
//!
//! let akinator = Akinator::new(Arc::new(AkiClient::new()?))
//!     .with_config(GameConfig::default())
//!     .with_vocabulary(Vocabulary::turkish());
//!
//! // From the platform's message handler:
//! akinator.play(&message, &channel, None).await;
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod game;
pub mod registry;
pub mod vocab;

// Re-export main types for convenience
pub use config::{GameConfig, GameConfigBuilder};
pub use error::{GameError, Result};
pub use game::{Akinator, Outcome};
pub use registry::SessionRegistry;
pub use vocab::{ConfirmAction, PlayerAction, Texts, Vocabulary};

// Re-export the service seam callers wire in
pub use aki_api::{GuessEngine, GuessSession, Region};
