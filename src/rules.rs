//! House-rule configuration.

use crate::board::Side;
use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Cards dealt to each side at the start, and the size hands are topped back up to.
pub const DEFAULT_HAND_SIZE: usize = 5;

/// Optional rules a table agrees on before play.
///
/// ```
/// use sorry_rs::rules::Rules;
///
/// let rules = Rules::default().with_teams(true).with_hand_size(0);
/// assert!(rules.teams);
/// // no-hand mode always draws after a 2 and forces the drawn card
/// assert!(rules.draw_after_two && rules.force_play_after_two);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Diagonally opposite sides play as partners.
    pub teams: bool,
    /// A 7 may be split across any number of pawns instead of at most two.
    pub seven_split_any: bool,
    /// Draw immediately after playing a 2.
    pub draw_after_two: bool,
    /// The card drawn after a 2 must be the next one played.
    pub force_play_after_two: bool,
    /// Zero means no hand: each turn draws and plays a single card.
    pub hand_size: usize,
    /// Each side begins with one pawn already on its exit square.
    pub fast_start: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            teams: false,
            seven_split_any: false,
            draw_after_two: false,
            force_play_after_two: false,
            hand_size: DEFAULT_HAND_SIZE,
            fast_start: false,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SetupError {
    #[error("team play needs all four sides, got {0}")]
    TeamsNeedFourSides(usize),
    #[error("{sides} hands of {hand_size} do not fit a {deck}-card deck")]
    HandTooLarge { sides: usize, hand_size: usize, deck: usize },
    #[error("invalid seating: {0}")]
    Seating(#[from] crate::state::StateError),
}

impl Rules {
    pub fn with_teams(mut self, teams: bool) -> Self {
        self.teams = teams;
        self
    }

    pub fn with_seven_split_any(mut self, any: bool) -> Self {
        self.seven_split_any = any;
        self
    }

    pub fn with_draw_after_two(mut self, draw: bool) -> Self {
        self.draw_after_two = draw;
        self.normalized()
    }

    pub fn with_force_play_after_two(mut self, force: bool) -> Self {
        self.force_play_after_two = force;
        self.normalized()
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self.normalized()
    }

    pub fn with_fast_start(mut self, fast: bool) -> Self {
        self.fast_start = fast;
        self
    }

    /// Playing without a hand only works if a 2 is always followed by its draw.
    pub fn normalized(mut self) -> Self {
        if self.hand_size == 0 {
            self.draw_after_two = true;
            self.force_play_after_two = true;
        }
        self
    }

    /// Cards a side holds between turns; no-hand mode holds one while acting.
    pub fn effective_hand_size(&self) -> usize {
        self.hand_size.max(1)
    }

    /// Check the rules against a seating of `num_sides` sides.
    pub fn validate(&self, num_sides: usize) -> Result<(), SetupError> {
        if self.teams && num_sides != Side::ALL.len() {
            return Err(SetupError::TeamsNeedFourSides(num_sides));
        }
        let deck: usize = Card::ALL.iter().map(|c| c.copies()).sum();
        if num_sides * self.effective_hand_size() > deck {
            return Err(SetupError::HandTooLarge {
                sides: num_sides,
                hand_size: self.hand_size,
                deck,
            });
        }
        Ok(())
    }
}
