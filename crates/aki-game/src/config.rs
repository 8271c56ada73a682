//! Configuration for the game loop

use crate::error::{GameError, Result};
use aki_api::Region;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the game loop
///
/// Defaults: a one-minute reply window, a guess once confidence reaches 95%
/// (re-asked at most every 10 steps), a hard cap of 78 questions, and a 50%
/// confidence fallback after a rejected guess.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Region used when the caller does not pass one
    pub region: Region,

    /// How long to wait for a matching reply before ending the game
    pub reply_timeout: Duration,

    /// Progress (0-100) at which the service's guess is worth presenting
    pub guess_progress_threshold: f64,

    /// Minimum steps between two guess attempts
    pub steps_between_guesses: u32,

    /// Step index at which the question budget is exhausted and a guess is
    /// forced
    pub max_steps: u32,

    /// Progress value assigned after the player rejects a guess, keeping the
    /// loop from re-presenting the same candidate immediately
    pub denied_guess_progress: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            region: Region::En,
            reply_timeout: Duration::from_secs(60),
            guess_progress_threshold: 95.0,
            steps_between_guesses: 10,
            max_steps: 78,
            denied_guess_progress: 50.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration builder
    pub fn builder() -> GameConfigBuilder {
        GameConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.guess_progress_threshold) {
            return Err(GameError::ConfigError(
                "guess_progress_threshold must be within 0-100".to_string(),
            ));
        }

        if self.denied_guess_progress >= self.guess_progress_threshold {
            return Err(GameError::ConfigError(
                "denied_guess_progress must stay below guess_progress_threshold".to_string(),
            ));
        }

        if self.reply_timeout.is_zero() {
            return Err(GameError::ConfigError(
                "reply_timeout must be greater than zero".to_string(),
            ));
        }

        if self.max_steps == 0 {
            return Err(GameError::ConfigError(
                "max_steps must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for GameConfig
#[derive(Debug, Default)]
pub struct GameConfigBuilder {
    region: Option<Region>,
    reply_timeout: Option<Duration>,
    guess_progress_threshold: Option<f64>,
    steps_between_guesses: Option<u32>,
    max_steps: Option<u32>,
    denied_guess_progress: Option<f64>,
}

impl GameConfigBuilder {
    /// Set the default region
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Set the reply window
    pub fn reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = Some(timeout);
        self
    }

    /// Set the guess confidence threshold
    pub fn guess_progress_threshold(mut self, threshold: f64) -> Self {
        self.guess_progress_threshold = Some(threshold);
        self
    }

    /// Set the minimum steps between guesses
    pub fn steps_between_guesses(mut self, steps: u32) -> Self {
        self.steps_between_guesses = Some(steps);
        self
    }

    /// Set the question budget
    pub fn max_steps(mut self, steps: u32) -> Self {
        self.max_steps = Some(steps);
        self
    }

    /// Set the progress fallback after a rejected guess
    pub fn denied_guess_progress(mut self, progress: f64) -> Self {
        self.denied_guess_progress = Some(progress);
        self
    }

    /// Build the configuration, falling back to defaults for unset fields
    pub fn build(self) -> GameConfig {
        let defaults = GameConfig::default();
        GameConfig {
            region: self.region.unwrap_or(defaults.region),
            reply_timeout: self.reply_timeout.unwrap_or(defaults.reply_timeout),
            guess_progress_threshold: self
                .guess_progress_threshold
                .unwrap_or(defaults.guess_progress_threshold),
            steps_between_guesses: self
                .steps_between_guesses
                .unwrap_or(defaults.steps_between_guesses),
            max_steps: self.max_steps.unwrap_or(defaults.max_steps),
            denied_guess_progress: self
                .denied_guess_progress
                .unwrap_or(defaults.denied_guess_progress),
        }
    }
}
