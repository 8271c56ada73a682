//! Rendering of prompts and notices
//!
//! Pure functions from game state to the strings and cards the loop
//! publishes. All wording lives in the [`Vocabulary`]; this module only
//! fills placeholders.

use crate::chat::Card;
use crate::vocab::Vocabulary;
use aki_api::Guess;

const GUESS_CARD_COLOR: u32 = 0x00F1_C40F;

/// The question prompt: heading, question text, allowed-answer line
pub(crate) fn question_prompt(vocab: &Vocabulary, step: u32, question: &str) -> String {
    let heading = vocab
        .texts()
        .question_heading
        .replace("{n}", &(step + 1).to_string());
    format!(
        "**{heading}**: {question}\n{hint}",
        hint = vocab.texts().answer_hint
    )
}

/// The guess-confirmation card
pub(crate) fn guess_card(
    vocab: &Vocabulary,
    guess: &Guess,
    progress: f64,
    author_icon: Option<&str>,
) -> Card {
    let confidence = (progress.round() as u32).to_string();
    let description = vocab
        .texts()
        .guess_confidence
        .replace("{confidence}", &confidence);

    let mut card = Card::new()
        .with_author(
            format!("{} ({})", guess.name, guess.description),
            author_icon.map(String::from),
        )
        .with_description(description)
        .with_color(GUESS_CARD_COLOR);

    if let Some(image) = &guess.image {
        card = card.with_image(image.clone());
    }

    card
}

/// The victory notice after a confirmed guess
pub(crate) fn victory_notice(vocab: &Vocabulary, name: &str, steps: u32, ranking: u32) -> String {
    vocab
        .texts()
        .victory
        .replace("{name}", name)
        .replace("{steps}", &steps.to_string())
        .replace("{ranking}", &ranking.to_string())
}

/// The defeat notice when the question budget runs out
pub(crate) fn defeat_notice(vocab: &Vocabulary, user: &str) -> String {
    vocab.texts().defeat.replace("{user}", user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_guess() -> Guess {
        Guess {
            name: "Hercule Poirot".to_string(),
            description: "Detective".to_string(),
            image: None,
            confidence: 0.96,
            ranking: 209,
        }
    }

    #[test]
    fn test_question_prompt_numbering() {
        let vocab = Vocabulary::turkish();
        let prompt = question_prompt(&vocab, 4, "Gerçek bir insan mı?");

        // Step index is zero-based, the heading is one-based
        assert!(prompt.starts_with("**Soru 5**: Gerçek bir insan mı?"));
        assert!(prompt.contains("bitir (**b**)"));
    }

    #[test]
    fn test_guess_card_contents() {
        let vocab = Vocabulary::turkish();
        let card = guess_card(&vocab, &sample_guess(), 96.4, None);

        assert_eq!(
            card.author_name.as_deref(),
            Some("Hercule Poirot (Detective)")
        );
        let description = card.description.expect("card has a description");
        assert!(description.contains("%96"));
        assert_eq!(card.color, Some(GUESS_CARD_COLOR));
        assert!(card.image.is_none());
    }

    #[test]
    fn test_victory_notice() {
        let vocab = Vocabulary::turkish();
        let notice = victory_notice(&vocab, "Hercule Poirot", 37, 209);

        assert!(notice.contains("**Hercule Poirot**"));
        assert!(notice.contains("**37**"));
        assert!(notice.contains("**209.**"));
    }

    #[test]
    fn test_defeat_notice() {
        let vocab = Vocabulary::english();
        let notice = defeat_notice(&vocab, "Player One");
        assert!(notice.contains("Player One"));
    }
}
