//! Client for the Akinator guessing-game web service
//!
//! This crate provides:
//!
//! - [`GuessSession`] / [`GuessEngine`] - the async traits a game front end
//!   is written against
//! - [`AkiClient`] / [`AkiSession`] - the HTTP implementation over the
//!   regional `ws` endpoints
//! - [`Region`], [`Answer`], [`Guess`] - the value types shared with callers
//!
//! # Example
//!
//! ```rust,ignore
//! use aki_api::{AkiClient, Answer, GuessEngine, Region};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AkiClient::new()?;
//!     let mut session = client.start_session(Region::En).await?;
//!
//!     while session.progress() < 95.0 {
//!         println!("Q{}: {}", session.step() + 1, session.question());
//!         session.answer(Answer::Yes).await?;
//!     }
//!
//!     let guesses = session.win().await?;
//!     println!("It is {}!", guesses[0].name);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod region;
pub mod session;
pub mod types;

// Re-export main types for convenience
pub use client::{AkiClient, AkiConfig, AkiSession};
pub use error::{AkiError, Result};
pub use region::Region;
pub use session::{GuessEngine, GuessSession};
pub use types::{Answer, Guess};
