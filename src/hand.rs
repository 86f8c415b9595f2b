use crate::cards::{parse_cards, Card};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("card {0} is not in hand")]
    Missing(Card),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A side's cards. Unordered; duplicates are expected.
///
/// ```
/// use sorry_rs::cards::Card;
/// use sorry_rs::hand::Hand;
///
/// let hand: Hand = "2 2 Sorry".parse().unwrap();
/// assert_eq!(hand.len(), 3);
/// assert_eq!(hand.distinct(), vec![Card::Two, Card::Sorry]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Each card value once, in card order.
    pub fn distinct(&self) -> Vec<Card> {
        let mut out = self.cards.clone();
        out.sort_unstable();
        out.dedup();
        out
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub(crate) fn extend<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.extend(cards);
    }

    /// Remove one copy of `card`.
    pub fn remove(&mut self, card: Card) -> Result<(), HandError> {
        let idx = self.cards.iter().position(|c| *c == card).ok_or(HandError::Missing(card))?;
        self.cards.swap_remove(idx);
        Ok(())
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}

impl FromStr for Hand {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Ok(Self::new(cards))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_takes_one_copy() {
        let mut h = Hand::new(vec![Card::Two, Card::Seven, Card::Two]);
        h.remove(Card::Two).unwrap();
        assert_eq!(h.len(), 2);
        assert!(h.contains(Card::Two));
        assert!(matches!(h.remove(Card::Ten), Err(HandError::Missing(Card::Ten))));
    }

    #[test]
    fn parsing_interfaces_work() {
        let h: Hand = "1, 12 s".parse().unwrap();
        assert_eq!(h.as_slice(), &[Card::One, Card::Twelve, Card::Sorry]);
        assert!("13".parse::<Hand>().is_err());
    }
}
