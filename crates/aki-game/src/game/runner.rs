//! The game loop state machine
//!
//! One [`GameRunner`] drives one session: ask the service for the current
//! question, wait for the player's reply, forward it, until a terminal state
//! is reached. The guess sub-phase interleaves whenever the trigger policy
//! fires and the guild has no other confirmation outstanding.

use crate::chat::{ChatChannel, GuildId, IncomingMessage, UserId};
use crate::config::GameConfig;
use crate::error::Result;
use crate::game::render;
use crate::game::Outcome;
use crate::registry::SessionRegistry;
use crate::vocab::{ConfirmAction, PlayerAction, Vocabulary};
use aki_api::{GuessEngine, GuessSession, Region};
use tracing::{debug, info};

/// Whether the service's guess is worth presenting now
///
/// Confidence has to clear the threshold, and either enough steps have
/// passed since the last attempt or none was ever made. Running out of
/// question budget forces a guess regardless of confidence.
pub(crate) fn guess_due(
    config: &GameConfig,
    progress: f64,
    step: u32,
    steps_since_guess: u32,
    has_guessed: bool,
) -> bool {
    let confident = progress >= config.guess_progress_threshold
        && (steps_since_guess >= config.steps_between_guesses || !has_guessed);
    confident || step >= config.max_steps
}

/// The player a session belongs to
pub(crate) struct Player {
    pub id: UserId,
    pub guild: GuildId,
    pub name: String,
    pub avatar: Option<String>,
}

impl Player {
    pub(crate) fn from_message(message: &IncomingMessage, guild: GuildId) -> Self {
        Self {
            id: message.author.clone(),
            guild,
            name: message.author_name.clone(),
            avatar: message.author_avatar.clone(),
        }
    }
}

/// Drives one game session to a terminal state
pub(crate) struct GameRunner<'a> {
    engine: &'a dyn GuessEngine,
    channel: &'a dyn ChatChannel,
    registry: &'a SessionRegistry,
    config: &'a GameConfig,
    vocab: &'a Vocabulary,
    player: Player,
    region: Region,
    steps_since_guess: u32,
    has_guessed: bool,
}

impl<'a> GameRunner<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        engine: &'a dyn GuessEngine,
        channel: &'a dyn ChatChannel,
        registry: &'a SessionRegistry,
        config: &'a GameConfig,
        vocab: &'a Vocabulary,
        player: Player,
        region: Region,
    ) -> Self {
        Self {
            engine,
            channel,
            registry,
            config,
            vocab,
            player,
            region,
            steps_since_guess: 0,
            has_guessed: false,
        }
    }

    /// Run the loop until a terminal state
    ///
    /// Lock release is the caller's job; every path out of here, including
    /// errors, goes back through [`crate::game::Akinator::play`].
    pub(crate) async fn run(mut self) -> Result<Outcome> {
        let starting = self.channel.send(&self.vocab.texts().starting).await?;
        let mut session = self.engine.start_session(self.region).await?;
        info!(player = %self.player.id, region = %self.region, "Game started");

        // The notice is transient; it goes away once the first question is
        // ready.
        self.channel.delete(&starting).await?;

        loop {
            self.steps_since_guess += 1;

            if guess_due(
                self.config,
                session.progress(),
                session.step(),
                self.steps_since_guess,
                self.has_guessed,
            ) && self.registry.try_lock_guess(&self.player.guild)
            {
                if let Some(outcome) = self.confirm_guess(&mut *session).await? {
                    return Ok(outcome);
                }
            }

            let prompt = render::question_prompt(self.vocab, session.step(), session.question());
            self.channel.send(&prompt).await?;

            let vocab = self.vocab;
            let reply = self
                .channel
                .await_reply(
                    &self.player.id,
                    &|content| vocab.matches_player(content),
                    self.config.reply_timeout,
                )
                .await?;

            let Some(reply) = reply else {
                session.win().await?;
                self.channel.send(&self.vocab.texts().inactivity).await?;
                info!(player = %self.player.id, "Game ended by inactivity");
                return Ok(Outcome::Inactive);
            };

            match self.vocab.player_action(&reply.content) {
                Some(PlayerAction::Answer(answer)) => {
                    session.answer(answer).await?;
                    debug!(
                        step = session.step(),
                        progress = session.progress(),
                        "Answer forwarded"
                    );
                }
                Some(PlayerAction::Back) => {
                    if session.step() >= 1 {
                        session.back().await?;
                    }
                }
                Some(PlayerAction::Stop) => {
                    session.win().await?;
                    self.channel.send(&self.vocab.texts().cancelled).await?;
                    info!(player = %self.player.id, "Game stopped by player");
                    return Ok(Outcome::Stopped);
                }
                // The reply filter only passes vocabulary tokens
                None => {}
            }
        }
    }

    /// The guess-confirmation sub-phase
    ///
    /// Returns `Some(outcome)` when the game is over, `None` when the loop
    /// should resume asking questions. The guild guess lock is held from the
    /// caller's `try_lock_guess` until the prompt is resolved, never longer.
    async fn confirm_guess(&mut self, session: &mut dyn GuessSession) -> Result<Option<Outcome>> {
        self.steps_since_guess = 0;
        self.has_guessed = true;

        let guesses = session.win().await?;
        let Some(top) = guesses.into_iter().next() else {
            self.registry.unlock_guess(&self.player.guild);
            debug!("Service has no candidate yet, resuming questions");
            return Ok(None);
        };

        let card = render::guess_card(
            self.vocab,
            &top,
            session.progress(),
            self.player.avatar.as_deref(),
        );
        self.channel.send_card(&card).await?;

        let vocab = self.vocab;
        let reply = self
            .channel
            .await_reply(
                &self.player.id,
                &|content| vocab.matches_confirm(content),
                self.config.reply_timeout,
            )
            .await?;

        let Some(reply) = reply else {
            // Confirmation timeout terminates the game the same way the
            // question phase does; the lock never outlives the prompt.
            self.registry.unlock_guess(&self.player.guild);
            self.channel.send(&self.vocab.texts().inactivity).await?;
            info!(player = %self.player.id, "Game ended by inactivity at confirmation");
            return Ok(Some(Outcome::Inactive));
        };

        let action = self.vocab.confirm_action(&reply.content);
        self.channel.delete(&reply.id).await?;
        self.registry.unlock_guess(&self.player.guild);

        match action {
            Some(ConfirmAction::Confirm) => {
                let notice =
                    render::victory_notice(self.vocab, &top.name, session.step(), top.ranking);
                self.channel.send(&notice).await?;
                info!(player = %self.player.id, character = %top.name, "Guess confirmed");
                Ok(Some(Outcome::Victory {
                    name: top.name,
                    steps: session.step(),
                    ranking: top.ranking,
                }))
            }
            Some(ConfirmAction::Deny) if session.step() >= self.config.max_steps => {
                let notice = render::defeat_notice(self.vocab, &self.player.name);
                self.channel.send(&notice).await?;
                info!(player = %self.player.id, "Question budget exhausted, player wins");
                Ok(Some(Outcome::Defeated))
            }
            Some(ConfirmAction::Deny) => {
                session.set_progress(self.config.denied_guess_progress);
                Ok(None)
            }
            None => Ok(None),
        }
    }
}
