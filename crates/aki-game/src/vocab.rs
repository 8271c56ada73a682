//! Answer vocabulary and notice texts
//!
//! Maps the literal strings players may type to a small action type, and
//! carries every user-facing text the loop publishes. The state machine
//! itself never embeds a literal string, so adding a locale means adding a
//! constructor here.

use aki_api::Answer;
use std::collections::HashMap;

/// Action taken in response to a question prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Forward an answer to the guessing service
    Answer(Answer),
    /// Rewind one question
    Back,
    /// End the game
    Stop,
}

/// Action taken in response to a guess-confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// The guess is right
    Confirm,
    /// The guess is wrong
    Deny,
}

/// User-facing notice texts
///
/// `{placeholders}` are filled when the notice is rendered.
#[derive(Debug, Clone)]
pub struct Texts {
    /// Transient notice while the remote session is being opened
    pub starting: String,

    /// Heading of a question prompt; `{n}` is the 1-based question number
    pub question_heading: String,

    /// Allowed-answer line appended to every question prompt
    pub answer_hint: String,

    /// Body of the guess card; `{confidence}` is the rounded progress
    pub guess_confidence: String,

    /// Published when the reply window elapses
    pub inactivity: String,

    /// Published when the player stops the game
    pub cancelled: String,

    /// Published on a confirmed guess; `{name}`, `{steps}`, `{ranking}`
    pub victory: String,

    /// Published when the service runs out of questions; `{user}`
    pub defeat: String,
}

/// Token tables and texts for one locale
#[derive(Debug, Clone)]
pub struct Vocabulary {
    answers: HashMap<String, PlayerAction>,
    confirmations: HashMap<String, ConfirmAction>,
    texts: Texts,
}

impl Vocabulary {
    /// Build a vocabulary from token tables and texts
    pub fn new(
        answers: &[(&str, PlayerAction)],
        confirmations: &[(&str, ConfirmAction)],
        texts: Texts,
    ) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(token, action)| (Self::normalize(token), *action))
                .collect(),
            confirmations: confirmations
                .iter()
                .map(|(token, action)| (Self::normalize(token), *action))
                .collect(),
            texts,
        }
    }

    /// English vocabulary
    pub fn english() -> Self {
        Self::new(
            &[
                ("y", PlayerAction::Answer(Answer::Yes)),
                ("yes", PlayerAction::Answer(Answer::Yes)),
                ("n", PlayerAction::Answer(Answer::No)),
                ("no", PlayerAction::Answer(Answer::No)),
                ("i", PlayerAction::Answer(Answer::DontKnow)),
                ("idk", PlayerAction::Answer(Answer::DontKnow)),
                ("dont know", PlayerAction::Answer(Answer::DontKnow)),
                ("p", PlayerAction::Answer(Answer::Probably)),
                ("probably", PlayerAction::Answer(Answer::Probably)),
                ("pn", PlayerAction::Answer(Answer::ProbablyNot)),
                ("probably not", PlayerAction::Answer(Answer::ProbablyNot)),
                ("b", PlayerAction::Back),
                ("back", PlayerAction::Back),
                ("s", PlayerAction::Stop),
                ("stop", PlayerAction::Stop),
            ],
            &[
                ("y", ConfirmAction::Confirm),
                ("yes", ConfirmAction::Confirm),
                ("r", ConfirmAction::Confirm),
                ("right", ConfirmAction::Confirm),
                ("n", ConfirmAction::Deny),
                ("no", ConfirmAction::Deny),
                ("w", ConfirmAction::Deny),
                ("wrong", ConfirmAction::Deny),
            ],
            Texts {
                starting: ":alarm_clock: The game is starting, get ready!".to_string(),
                question_heading: "Question {n}".to_string(),
                answer_hint: "Yes (**y**), no (**n**), don't know (**i**), probably (**p**), \
                              probably not (**pn**), back (**b**), stop (**s**)"
                    .to_string(),
                guess_confidence: "I am **{confidence}%** sure of this guess.\n\nType **y** if \
                                   it is right, **n** if it is wrong."
                    .to_string(),
                inactivity: ":octagonal_sign: Your game was cancelled after **1 minute** of \
                             inactivity."
                    .to_string(),
                cancelled: ":octagonal_sign: Game cancelled.".to_string(),
                victory: ":confetti_ball: Great, I guessed **{name}** in **{steps}** questions.\n\
                          Your character ranks **#{ranking}**, it was fun playing with you!"
                    .to_string(),
                defeat: ":clap: Congratulations {user}, you defeated me.".to_string(),
            },
        )
    }

    /// Turkish vocabulary
    pub fn turkish() -> Self {
        Self::new(
            &[
                ("e", PlayerAction::Answer(Answer::Yes)),
                ("evet", PlayerAction::Answer(Answer::Yes)),
                ("h", PlayerAction::Answer(Answer::No)),
                ("hayır", PlayerAction::Answer(Answer::No)),
                ("i", PlayerAction::Answer(Answer::DontKnow)),
                ("idk", PlayerAction::Answer(Answer::DontKnow)),
                ("bilmiyorum", PlayerAction::Answer(Answer::DontKnow)),
                ("m", PlayerAction::Answer(Answer::Probably)),
                ("muhtemelen", PlayerAction::Answer(Answer::Probably)),
                ("md", PlayerAction::Answer(Answer::ProbablyNot)),
                ("muhtemelen değil", PlayerAction::Answer(Answer::ProbablyNot)),
                ("g", PlayerAction::Back),
                ("geri", PlayerAction::Back),
                ("b", PlayerAction::Stop),
                ("bitir", PlayerAction::Stop),
            ],
            &[
                ("e", ConfirmAction::Confirm),
                ("evet", ConfirmAction::Confirm),
                ("d", ConfirmAction::Confirm),
                ("doğru", ConfirmAction::Confirm),
                ("y", ConfirmAction::Deny),
                ("yanlış", ConfirmAction::Deny),
            ],
            Texts {
                starting: ":alarm_clock: Oyun başlıyor, hazır ol!".to_string(),
                question_heading: "Soru {n}".to_string(),
                answer_hint: "Evet (**e**), hayır (**h**), bilmiyorum (**i**), muhtemelen \
                              (**m**), muhtemelen değil (**md**), geri dön (**g**), bitir (**b**)"
                    .to_string(),
                guess_confidence: "Bu tahmini yaparken **%{confidence}** eminim.\n\nEğer doğru \
                                   tahmin ise **e**, yanlış tahmin ise **y** yazın."
                    .to_string(),
                inactivity: ":octagonal_sign: **1 dakika** içinde herhangi bir cevap \
                             vermediğiniz için oyun iptal edildi."
                    .to_string(),
                cancelled: ":octagonal_sign: Oyun başarıyla iptal edildi.".to_string(),
                victory: ":confetti_ball: Harika, seçtiğin **{name}** karakterini **{steps}** \
                          soruda bildim.\nSeçtiğin karakter **{ranking}.** sırada, senle oynamak \
                          güzeldi!"
                    .to_string(),
                defeat: ":clap: Tebrikler {user}, beni yendin.".to_string(),
            },
        )
    }

    /// Canonical form used for token lookups
    ///
    /// Lowercased, trimmed, apostrophes stripped - so "Muhtemelen Değil" and
    /// "muhtemelen değil" hit the same entry.
    pub fn normalize(input: &str) -> String {
        input.trim().to_lowercase().replace('\'', "")
    }

    /// Look up the action for a question-phase reply
    pub fn player_action(&self, input: &str) -> Option<PlayerAction> {
        self.answers.get(&Self::normalize(input)).copied()
    }

    /// Look up the action for a guess-confirmation reply
    pub fn confirm_action(&self, input: &str) -> Option<ConfirmAction> {
        self.confirmations.get(&Self::normalize(input)).copied()
    }

    /// Whether `input` is a valid question-phase reply
    pub fn matches_player(&self, input: &str) -> bool {
        self.player_action(input).is_some()
    }

    /// Whether `input` is a valid guess-confirmation reply
    pub fn matches_confirm(&self, input: &str) -> bool {
        self.confirm_action(input).is_some()
    }

    /// The notice texts
    pub fn texts(&self) -> &Texts {
        &self.texts
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::english()
    }
}
