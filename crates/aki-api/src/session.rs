//! Guessing-service traits
//!
//! These traits are the seam a game front end is written against. The
//! concrete HTTP implementation lives in [`crate::client`]; tests substitute
//! scripted fakes.

use crate::error::Result;
use crate::region::Region;
use crate::types::{Answer, Guess};
use async_trait::async_trait;

/// One in-progress remote game
///
/// A session owns the service-side cursor: the current question, the step
/// index, and the service's self-reported confidence ("progress", 0-100).
/// All mutating calls advance or rewind that cursor.
#[async_trait]
pub trait GuessSession: Send {
    /// Text of the current question
    fn question(&self) -> &str;

    /// Zero-based index of the current question
    fn step(&self) -> u32;

    /// Service confidence in its current best candidate, 0-100
    fn progress(&self) -> f64;

    /// Override the locally tracked progress value
    ///
    /// The override lasts until the next service response reports a fresh
    /// value. Used to de-prioritize a candidate the player has rejected.
    fn set_progress(&mut self, progress: f64);

    /// Submit an answer to the current question and advance to the next one
    async fn answer(&mut self, answer: Answer) -> Result<()>;

    /// Rewind to the previous question
    async fn back(&mut self) -> Result<()>;

    /// Fetch the service's current best candidates
    ///
    /// Also doubles as the finalize call: firing it and dropping the session
    /// is how a game ends from the service's point of view.
    async fn win(&mut self) -> Result<Vec<Guess>>;
}

/// Factory for remote game sessions
#[async_trait]
pub trait GuessEngine: Send + Sync {
    /// Open a new session in the given region
    async fn start_session(&self, region: Region) -> Result<Box<dyn GuessSession>>;

    /// Engine name for diagnostics
    fn name(&self) -> &str;
}
