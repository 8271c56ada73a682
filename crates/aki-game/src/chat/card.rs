//! Rich-card message value

use serde::{Deserialize, Serialize};
use url::Url;

/// A rich message (embed) published to the chat platform
///
/// Mirrors the capabilities chat platforms expose for card-style messages:
/// title, author line with icon, body text, image, labeled fields, footer,
/// and an accent color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub author_icon: Option<String>,
    pub description: Option<String>,
    pub image: Option<Url>,
    pub fields: Vec<CardField>,
    pub footer: Option<String>,
    pub color: Option<u32>,
}

/// One labeled field on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardField {
    pub name: String,
    pub value: String,
}

impl Card {
    /// Create an empty card
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author line, optionally with an icon URL
    pub fn with_author(mut self, name: impl Into<String>, icon: Option<String>) -> Self {
        self.author_name = Some(name.into());
        self.author_icon = icon;
        self
    }

    /// Set the body text
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the image
    pub fn with_image(mut self, image: Url) -> Self {
        self.image = Some(image);
        self
    }

    /// Add a labeled field
    pub fn add_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(CardField {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Set the footer text
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Set the accent color (0xRRGGBB)
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_builder() {
        let card = Card::new()
            .with_title("Question 5")
            .with_author("Akinator", None)
            .add_field("Please Type...", "Y or Yes")
            .with_color(0x00F1_C40F);

        assert_eq!(card.title.as_deref(), Some("Question 5"));
        assert_eq!(card.fields.len(), 1);
        assert_eq!(card.color, Some(0x00F1_C40F));
    }

    #[test]
    fn test_serde_roundtrip() {
        let card = Card::new()
            .with_title("Guess")
            .with_description("I am sure")
            .with_footer("yes / no");

        let json = serde_json::to_string(&card).expect("card serializes");
        let parsed: Card = serde_json::from_str(&json).expect("card deserializes");
        assert_eq!(parsed, card);
    }
}
