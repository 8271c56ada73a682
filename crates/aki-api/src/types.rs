//! Shared value types for the guessing service

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A player's answer to a question
///
/// The wire protocol encodes answers as small integer codes; `code()` returns
/// the value the service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    /// "Yes"
    Yes,
    /// "No"
    No,
    /// "Don't know"
    DontKnow,
    /// "Probably"
    Probably,
    /// "Probably not"
    ProbablyNot,
}

impl Answer {
    /// Wire code for this answer (0-4)
    pub fn code(&self) -> u8 {
        match self {
            Answer::Yes => 0,
            Answer::No => 1,
            Answer::DontKnow => 2,
            Answer::Probably => 3,
            Answer::ProbablyNot => 4,
        }
    }

    /// Parse a wire code back into an answer
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Answer::Yes),
            1 => Some(Answer::No),
            2 => Some(Answer::DontKnow),
            3 => Some(Answer::Probably),
            4 => Some(Answer::ProbablyNot),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Answer::Yes => "yes",
            Answer::No => "no",
            Answer::DontKnow => "don't know",
            Answer::Probably => "probably",
            Answer::ProbablyNot => "probably not",
        };
        write!(f, "{label}")
    }
}

/// One candidate the service believes the player is thinking of
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    /// Character name
    pub name: String,

    /// Short description ("Singer", "Cartoon character", ...)
    pub description: String,

    /// Portrait image, when the service has one
    pub image: Option<Url>,

    /// Service confidence in this candidate, 0.0-1.0
    pub confidence: f64,

    /// Popularity rank of the character on the service
    pub ranking: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_codes() {
        assert_eq!(Answer::Yes.code(), 0);
        assert_eq!(Answer::No.code(), 1);
        assert_eq!(Answer::DontKnow.code(), 2);
        assert_eq!(Answer::Probably.code(), 3);
        assert_eq!(Answer::ProbablyNot.code(), 4);
    }

    #[test]
    fn test_answer_code_roundtrip() {
        for code in 0..=4 {
            let answer = Answer::from_code(code).expect("codes 0-4 are valid");
            assert_eq!(answer.code(), code);
        }
        assert_eq!(Answer::from_code(5), None);
    }
}
