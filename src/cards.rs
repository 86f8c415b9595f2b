use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card faces of the deck. There is no 6 or 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Card {
    One,
    Two,
    Three,
    Four,
    Five,
    Seven,
    Eight,
    Ten,
    Eleven,
    Twelve,
    Sorry,
}

impl Card {
    pub const ALL: [Card; 11] = [
        Card::One,
        Card::Two,
        Card::Three,
        Card::Four,
        Card::Five,
        Card::Seven,
        Card::Eight,
        Card::Ten,
        Card::Eleven,
        Card::Twelve,
        Card::Sorry,
    ];

    /// Face value; `None` for the Sorry card.
    pub const fn value(self) -> Option<u8> {
        match self {
            Card::One => Some(1),
            Card::Two => Some(2),
            Card::Three => Some(3),
            Card::Four => Some(4),
            Card::Five => Some(5),
            Card::Seven => Some(7),
            Card::Eight => Some(8),
            Card::Ten => Some(10),
            Card::Eleven => Some(11),
            Card::Twelve => Some(12),
            Card::Sorry => None,
        }
    }

    /// Copies of this card in the shipped deck.
    pub const fn copies(self) -> usize {
        match self {
            Card::One => 5,
            _ => 4,
        }
    }

    /// Whether the card can bring a pawn out of Start by plain movement.
    pub const fn leaves_start(self) -> bool {
        matches!(self, Card::One | Card::Two)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Card::One => "1",
            Card::Two => "2",
            Card::Three => "3",
            Card::Four => "4",
            Card::Five => "5",
            Card::Seven => "7",
            Card::Eight => "8",
            Card::Ten => "10",
            Card::Eleven => "11",
            Card::Twelve => "12",
            Card::Sorry => "Sorry",
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let c = match t.to_ascii_lowercase().as_str() {
            "1" => Card::One,
            "2" => Card::Two,
            "3" => Card::Three,
            "4" => Card::Four,
            "5" => Card::Five,
            "7" => Card::Seven,
            "8" => Card::Eight,
            "10" => Card::Ten,
            "11" => Card::Eleven,
            "12" => Card::Twelve,
            "s" | "sorry" => Card::Sorry,
            _ => return Err(CardParseError::Invalid(s.to_string())),
        };
        Ok(c)
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use sorry_rs::cards::{parse_cards, Card};
///
/// let cards = parse_cards("1, 10 Sorry").unwrap();
/// assert_eq!(cards, vec![Card::One, Card::Ten, Card::Sorry]);
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}
