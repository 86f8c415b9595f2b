use crate::cards::Card;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The shared draw pile plus the discard pile it is rebuilt from.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    discards: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Deck {
    /// Full 45-card deck, unshuffled.
    ///
    /// ```
    /// use sorry_rs::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 45);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(45);
        for card in Card::ALL {
            cards.extend(std::iter::repeat(card).take(card.copies()));
        }
        Self { cards, discards: Vec::new(), rng: ChaCha8Rng::seed_from_u64(0) }
    }

    /// Cards left in the draw pile.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn discards(&self) -> &[Card] {
        &self.discards
    }

    /// Shuffle using a seeded RNG for reproducibility. Later reshuffles of the
    /// discard pile continue from the same RNG.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut self.rng);
    }

    /// Put a played card on the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discards.push(card);
    }

    /// Draw one card, shuffling the discard pile back in when the draw pile runs
    /// out. `None` only when every card is held in hands.
    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() && !self.discards.is_empty() {
            self.cards.append(&mut self.discards);
            self.cards.shuffle(&mut self.rng);
            tracing::debug!(cards = self.cards.len(), "reshuffled discard pile into draw pile");
        }
        self.cards.pop()
    }

    /// Draw `n` cards from the top of the deck.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.draw()).collect()
    }
}
