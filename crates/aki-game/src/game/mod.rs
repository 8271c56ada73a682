//! The game: entry point and loop
//!
//! [`Akinator`] is the host callers hand incoming messages to. It owns the
//! collaborator handles and the [`SessionRegistry`]; each accepted message
//! becomes one run of the internal state machine.

mod render;
mod runner;

use crate::chat::{ChatChannel, GuildId, IncomingMessage};
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::registry::SessionRegistry;
use crate::vocab::Vocabulary;
use aki_api::{GuessEngine, Region};
use runner::{GameRunner, Player};
use std::sync::Arc;
use tracing::error;

/// Terminal state of one game
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The service guessed right
    Victory {
        /// Name of the guessed character
        name: String,
        /// Questions it took
        steps: u32,
        /// Popularity rank of the character
        ranking: u32,
    },
    /// The service ran out of questions; the player wins
    Defeated,
    /// The player stopped the game
    Stopped,
    /// The reply window elapsed
    Inactive,
}

/// Hosts Akinator games for a chat platform
///
/// # Example
///
/// ```rust,ignore
/// use aki_api::AkiClient;
/// use aki_game::Akinator;
/// use std::sync::Arc;
///
/// let akinator = Akinator::new(Arc::new(AkiClient::new()?));
///
/// // For every triggering chat message:
/// akinator.play(&message, &channel, None).await;
/// ```
pub struct Akinator {
    engine: Arc<dyn GuessEngine>,
    registry: SessionRegistry,
    config: GameConfig,
    vocab: Vocabulary,
}

impl Akinator {
    /// Create a host with default configuration and English vocabulary
    pub fn new(engine: Arc<dyn GuessEngine>) -> Self {
        Self {
            engine,
            registry: SessionRegistry::new(),
            config: GameConfig::default(),
            vocab: Vocabulary::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the vocabulary
    pub fn with_vocabulary(mut self, vocab: Vocabulary) -> Self {
        self.vocab = vocab;
        self
    }

    /// Share a registry with other hosts in the process
    pub fn with_registry(mut self, registry: SessionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The session registry
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// The active configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Play one game for the author of `message`
    ///
    /// Returns the outcome, or `None` when no game ran: malformed or
    /// direct-message contexts are logged and dropped, a second invocation
    /// while the author is already playing is silently ignored, and remote
    /// or transport failures are logged here rather than raised.
    pub async fn play(
        &self,
        message: &IncomingMessage,
        channel: &dyn ChatChannel,
        region: Option<Region>,
    ) -> Option<Outcome> {
        let guild = match validate(message) {
            Ok(guild) => guild,
            Err(err) => {
                error!("Akinator game not started: {err}");
                return None;
            }
        };

        // A second invocation while a game is active is deliberately
        // silent: no log, no chat message.
        if !self.registry.try_acquire(&message.author) {
            return None;
        }

        let player = Player::from_message(message, guild.clone());
        let region = region.unwrap_or(self.config.region);
        let result = GameRunner::new(
            self.engine.as_ref(),
            channel,
            &self.registry,
            &self.config,
            &self.vocab,
            player,
            region,
        )
        .run()
        .await;

        // Every terminal path funnels through here exactly once; the guess
        // lock release is defensive for paths that errored while holding it.
        self.registry.release(&message.author);
        self.registry.unlock_guess(&guild);

        match result {
            Ok(outcome) => Some(outcome),
            // The platform reporting an already-deleted message mid-game is
            // not worth a log line.
            Err(err) if err.is_transient() => None,
            Err(err) => {
                error!(player = %message.author, "Akinator game failed: {err}");
                None
            }
        }
    }
}

fn validate(message: &IncomingMessage) -> Result<GuildId> {
    if message.id.as_str().is_empty()
        || message.channel.as_str().is_empty()
        || message.author.as_str().is_empty()
    {
        return Err(GameError::InvalidMessage(
            "missing message, channel or author id".to_string(),
        ));
    }

    message.guild.clone().ok_or(GameError::UnsupportedChannel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{Card, ChatResult, MessageId, ReplyMatcher, UserId};
    use aki_api::{AkiError, Answer, Guess, GuessSession};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    // ------------------------------------------------------------------
    // Scripted guessing service
    // ------------------------------------------------------------------

    #[derive(Debug, Clone)]
    struct StepState {
        question: String,
        step: u32,
        progress: f64,
    }

    #[derive(Debug, Default)]
    struct SessionLog {
        answers: Vec<Answer>,
        backs: u32,
        wins: u32,
        progress_overrides: Vec<f64>,
    }

    struct ScriptedSession {
        current: StepState,
        upcoming: VecDeque<StepState>,
        guesses: Vec<Guess>,
        log: Arc<Mutex<SessionLog>>,
    }

    impl ScriptedSession {
        fn new(step: u32, progress: f64, guesses: Vec<Guess>) -> (Self, Arc<Mutex<SessionLog>>) {
            let log = Arc::new(Mutex::new(SessionLog::default()));
            let session = Self {
                current: StepState {
                    question: format!("Question at step {step}?"),
                    step,
                    progress,
                },
                upcoming: VecDeque::new(),
                guesses,
                log: Arc::clone(&log),
            };
            (session, log)
        }
    }

    #[async_trait]
    impl GuessSession for ScriptedSession {
        fn question(&self) -> &str {
            &self.current.question
        }

        fn step(&self) -> u32 {
            self.current.step
        }

        fn progress(&self) -> f64 {
            self.current.progress
        }

        fn set_progress(&mut self, progress: f64) {
            self.current.progress = progress;
            self.log.lock().unwrap().progress_overrides.push(progress);
        }

        async fn answer(&mut self, answer: Answer) -> aki_api::Result<()> {
            self.log.lock().unwrap().answers.push(answer);
            if let Some(next) = self.upcoming.pop_front() {
                self.current = next;
            } else {
                self.current.step += 1;
            }
            Ok(())
        }

        async fn back(&mut self) -> aki_api::Result<()> {
            self.log.lock().unwrap().backs += 1;
            self.current.step = self.current.step.saturating_sub(1);
            Ok(())
        }

        async fn win(&mut self) -> aki_api::Result<Vec<Guess>> {
            self.log.lock().unwrap().wins += 1;
            Ok(self.guesses.clone())
        }
    }

    struct ScriptedEngine {
        sessions: Mutex<VecDeque<ScriptedSession>>,
        started: Mutex<Vec<Region>>,
    }

    impl ScriptedEngine {
        fn new(sessions: Vec<ScriptedSession>) -> Self {
            Self {
                sessions: Mutex::new(sessions.into()),
                started: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GuessEngine for ScriptedEngine {
        async fn start_session(&self, region: Region) -> aki_api::Result<Box<dyn GuessSession>> {
            self.started.lock().unwrap().push(region);
            let session = self
                .sessions
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(AkiError::SessionExpired)?;
            Ok(Box::new(session))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    // ------------------------------------------------------------------
    // Fake chat channel
    // ------------------------------------------------------------------

    struct FakeChannel {
        replies: Mutex<VecDeque<Option<String>>>,
        sent: Mutex<Vec<String>>,
        cards: Mutex<Vec<Card>>,
        deleted: Mutex<Vec<MessageId>>,
        counter: AtomicU64,
    }

    impl FakeChannel {
        /// `None` entries simulate an elapsed reply window
        fn new(replies: &[Option<&str>]) -> Self {
            Self {
                replies: Mutex::new(
                    replies
                        .iter()
                        .map(|r| r.map(String::from))
                        .collect::<VecDeque<_>>(),
                ),
                sent: Mutex::new(Vec::new()),
                cards: Mutex::new(Vec::new()),
                deleted: Mutex::new(Vec::new()),
                counter: AtomicU64::new(0),
            }
        }

        fn next_id(&self) -> MessageId {
            let n = self.counter.fetch_add(1, Ordering::SeqCst);
            MessageId::new(format!("m{n}"))
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }

        fn sent_containing(&self, needle: &str) -> usize {
            self.sent()
                .iter()
                .filter(|text| text.contains(needle))
                .count()
        }

        fn card_count(&self) -> usize {
            self.cards.lock().unwrap().len()
        }

        fn deleted_count(&self) -> usize {
            self.deleted.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatChannel for FakeChannel {
        async fn send(&self, text: &str) -> ChatResult<MessageId> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(self.next_id())
        }

        async fn send_card(&self, card: &Card) -> ChatResult<MessageId> {
            self.cards.lock().unwrap().push(card.clone());
            Ok(self.next_id())
        }

        async fn delete(&self, id: &MessageId) -> ChatResult<()> {
            self.deleted.lock().unwrap().push(id.clone());
            Ok(())
        }

        async fn await_reply(
            &self,
            author: &UserId,
            matcher: ReplyMatcher<'_>,
            _timeout: Duration,
        ) -> ChatResult<Option<IncomingMessage>> {
            let mut replies = self.replies.lock().unwrap();
            while let Some(entry) = replies.pop_front() {
                match entry {
                    None => return Ok(None),
                    Some(content) if matcher(&content) => {
                        let id = self.next_id();
                        return Ok(Some(
                            IncomingMessage::new(id.as_str(), "c1", author.as_str(), content)
                                .with_guild("g1"),
                        ));
                    }
                    // Non-matching chatter is ignored by the platform filter
                    Some(_) => {}
                }
            }
            Ok(None)
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn trigger_message() -> IncomingMessage {
        IncomingMessage::new("trigger", "c1", "u1", "!akinator")
            .with_guild("g1")
            .with_author_name("Player One")
    }

    fn sample_guess() -> Guess {
        Guess {
            name: "Hercule Poirot".to_string(),
            description: "Detective".to_string(),
            image: None,
            confidence: 0.96,
            ranking: 209,
        }
    }

    fn akinator(sessions: Vec<ScriptedSession>) -> Akinator {
        Akinator::new(Arc::new(ScriptedEngine::new(sessions)))
            .with_vocabulary(Vocabulary::turkish())
    }

    // ------------------------------------------------------------------
    // Scenarios
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_answer_is_forwarded_and_loop_continues() {
        let (session, log) = ScriptedSession::new(0, 10.0, vec![]);
        let game = akinator(vec![session]);
        let channel = FakeChannel::new(&[Some("e"), Some("bitir")]);

        let outcome = game.play(&trigger_message(), &channel, None).await;

        assert_eq!(outcome, Some(Outcome::Stopped));
        assert_eq!(log.lock().unwrap().answers, vec![Answer::Yes]);
        // A second question prompt went out after the first answer
        assert_eq!(channel.sent_containing("Soru 2"), 1);
        assert!(!game.registry().is_playing(&UserId::new("u1")));
    }

    #[tokio::test]
    async fn test_starting_notice_is_deleted() {
        let (session, _log) = ScriptedSession::new(0, 10.0, vec![]);
        let game = akinator(vec![session]);
        let channel = FakeChannel::new(&[Some("bitir")]);

        game.play(&trigger_message(), &channel, None).await;

        assert_eq!(channel.sent_containing("Oyun başlıyor"), 1);
        assert_eq!(channel.deleted_count(), 1);
    }

    #[tokio::test]
    async fn test_timeout_finalizes_and_releases() {
        let (session, log) = ScriptedSession::new(0, 10.0, vec![]);
        let game = akinator(vec![session]);
        let channel = FakeChannel::new(&[None]);

        let outcome = game.play(&trigger_message(), &channel, None).await;

        assert_eq!(outcome, Some(Outcome::Inactive));
        assert_eq!(log.lock().unwrap().wins, 1);
        assert_eq!(channel.sent_containing("1 dakika"), 1);
        assert!(!game.registry().is_playing(&UserId::new("u1")));
    }

    #[tokio::test]
    async fn test_stop_token_cancels() {
        let (session, log) = ScriptedSession::new(0, 10.0, vec![]);
        let game = akinator(vec![session]);
        let channel = FakeChannel::new(&[Some("b")]);

        let outcome = game.play(&trigger_message(), &channel, None).await;

        assert_eq!(outcome, Some(Outcome::Stopped));
        assert_eq!(log.lock().unwrap().wins, 1);
        assert_eq!(channel.sent_containing("iptal edildi"), 1);
        assert!(!game.registry().is_playing(&UserId::new("u1")));
    }

    #[tokio::test]
    async fn test_back_token_steps_back() {
        let (session, log) = ScriptedSession::new(3, 10.0, vec![]);
        let game = akinator(vec![session]);
        let channel = FakeChannel::new(&[Some("g"), Some("bitir")]);

        game.play(&trigger_message(), &channel, None).await;

        assert_eq!(log.lock().unwrap().backs, 1);
    }

    #[tokio::test]
    async fn test_back_token_ignored_at_step_zero() {
        let (session, log) = ScriptedSession::new(0, 10.0, vec![]);
        let game = akinator(vec![session]);
        let channel = FakeChannel::new(&[Some("g"), Some("bitir")]);

        game.play(&trigger_message(), &channel, None).await;

        assert_eq!(log.lock().unwrap().backs, 0);
    }

    #[tokio::test]
    async fn test_confirmed_guess_is_a_victory() {
        let (session, log) = ScriptedSession::new(5, 96.0, vec![sample_guess()]);
        let game = akinator(vec![session]);
        let channel = FakeChannel::new(&[Some("evet")]);

        let outcome = game.play(&trigger_message(), &channel, None).await;

        assert_eq!(
            outcome,
            Some(Outcome::Victory {
                name: "Hercule Poirot".to_string(),
                steps: 5,
                ranking: 209,
            })
        );
        assert_eq!(log.lock().unwrap().wins, 1);
        assert_eq!(channel.card_count(), 1);
        // Victory notice goes out exactly once, with the name and the count
        assert_eq!(channel.sent_containing("Hercule Poirot"), 1);
        assert_eq!(channel.sent_containing("**5**"), 1);
        // Starting notice and the confirmation reply were both cleaned up
        assert_eq!(channel.deleted_count(), 2);
        assert!(!game.registry().is_playing(&UserId::new("u1")));
        assert!(game.registry().try_lock_guess(&crate::chat::GuildId::new("g1")));
    }

    #[tokio::test]
    async fn test_denied_guess_with_exhausted_budget_is_a_defeat() {
        let (session, _log) = ScriptedSession::new(80, 96.0, vec![sample_guess()]);
        let game = akinator(vec![session]);
        let channel = FakeChannel::new(&[Some("yanlış")]);

        let outcome = game.play(&trigger_message(), &channel, None).await;

        assert_eq!(outcome, Some(Outcome::Defeated));
        assert_eq!(channel.sent_containing("Tebrikler"), 1);
        assert_eq!(channel.sent_containing("Player One"), 1);
        assert!(!game.registry().is_playing(&UserId::new("u1")));
    }

    #[tokio::test]
    async fn test_denied_guess_resets_progress_and_continues() {
        let (session, log) = ScriptedSession::new(40, 96.0, vec![sample_guess()]);
        let game = akinator(vec![session]);
        let channel = FakeChannel::new(&[Some("yanlış"), Some("bitir")]);

        let outcome = game.play(&trigger_message(), &channel, None).await;

        assert_eq!(outcome, Some(Outcome::Stopped));
        assert_eq!(log.lock().unwrap().progress_overrides, vec![50.0]);
        // The loop resumed with the current question after the denial
        assert_eq!(channel.sent_containing("Soru 41"), 1);
    }

    #[tokio::test]
    async fn test_confirmation_timeout_terminates() {
        let (session, _log) = ScriptedSession::new(5, 96.0, vec![sample_guess()]);
        let game = akinator(vec![session]);
        let channel = FakeChannel::new(&[None]);

        let outcome = game.play(&trigger_message(), &channel, None).await;

        assert_eq!(outcome, Some(Outcome::Inactive));
        assert_eq!(channel.sent_containing("1 dakika"), 1);
        assert!(!game.registry().is_playing(&UserId::new("u1")));
        assert!(game.registry().try_lock_guess(&crate::chat::GuildId::new("g1")));
    }

    #[tokio::test]
    async fn test_second_session_is_a_silent_noop() {
        let (session, _log) = ScriptedSession::new(0, 10.0, vec![]);
        let game = akinator(vec![session]);
        let channel = FakeChannel::new(&[Some("bitir")]);

        // Simulate an in-flight game for the same user
        assert!(game.registry().try_acquire(&UserId::new("u1")));

        let outcome = game.play(&trigger_message(), &channel, None).await;

        assert_eq!(outcome, None);
        assert!(channel.sent().is_empty());
        // The in-flight session's lock is untouched
        assert!(game.registry().is_playing(&UserId::new("u1")));
    }

    #[tokio::test]
    async fn test_direct_message_is_rejected() {
        let (session, _log) = ScriptedSession::new(0, 10.0, vec![]);
        let game = akinator(vec![session]);
        let channel = FakeChannel::new(&[]);

        let message = IncomingMessage::new("trigger", "c1", "u1", "!akinator");
        let outcome = game.play(&message, &channel, None).await;

        assert_eq!(outcome, None);
        assert!(channel.sent().is_empty());
        assert!(!game.registry().is_playing(&UserId::new("u1")));
    }

    #[tokio::test]
    async fn test_malformed_message_is_rejected() {
        let (session, _log) = ScriptedSession::new(0, 10.0, vec![]);
        let game = akinator(vec![session]);
        let channel = FakeChannel::new(&[]);

        let message = IncomingMessage::new("", "c1", "u1", "!akinator").with_guild("g1");
        let outcome = game.play(&message, &channel, None).await;

        assert_eq!(outcome, None);
        assert!(channel.sent().is_empty());
    }

    #[tokio::test]
    async fn test_region_override_reaches_the_engine() {
        let (session, _log) = ScriptedSession::new(0, 10.0, vec![]);
        let engine = Arc::new(ScriptedEngine::new(vec![session]));
        let game = Akinator::new(engine.clone()).with_vocabulary(Vocabulary::turkish());
        let channel = FakeChannel::new(&[Some("bitir")]);

        game.play(&trigger_message(), &channel, Some(Region::Tr))
            .await;

        assert_eq!(*engine.started.lock().unwrap(), vec![Region::Tr]);
    }

    #[tokio::test]
    async fn test_engine_failure_releases_locks() {
        // No scripted session: start_session errors out
        let game = akinator(vec![]);
        let channel = FakeChannel::new(&[]);

        let outcome = game.play(&trigger_message(), &channel, None).await;

        assert_eq!(outcome, None);
        assert!(!game.registry().is_playing(&UserId::new("u1")));
        assert!(game.registry().try_lock_guess(&crate::chat::GuildId::new("g1")));
    }
}
