// Game engine API boundary. Agents and frontends drive a game through this
// trait instead of reaching into `Game` directly. It is implemented for the
// core `Game` type.

use crate::board::Side;
use crate::cards::Card;
use crate::game::{ActionError, Game, TurnEvent};
use crate::hand::Hand;
use crate::play::Play;
use crate::rules::Rules;
use crate::state::GameState;

pub trait GameEngine {
    // Actions
    fn play(&mut self, play: &Play) -> Result<TurnEvent, ActionError>;

    // Queries
    fn current(&self) -> Side;
    fn state(&self) -> &GameState;
    fn rules(&self) -> &Rules;
    fn hand(&self, side: Side) -> &Hand;
    fn playable_hand(&self) -> Hand;
    fn legal_plays(&self) -> Vec<Play>;
    fn forced_card(&self) -> Option<Card>;
    fn is_over(&self) -> bool;
    fn winners(&self) -> &[Side];
}

impl GameEngine for Game {
    fn play(&mut self, play: &Play) -> Result<TurnEvent, ActionError> {
        self.play(play)
    }

    fn current(&self) -> Side {
        self.current
    }
    fn state(&self) -> &GameState {
        &self.state
    }
    fn rules(&self) -> &Rules {
        &self.rules
    }
    fn hand(&self, side: Side) -> &Hand {
        &self.hands[side.index()]
    }
    fn playable_hand(&self) -> Hand {
        self.playable_hand()
    }
    fn legal_plays(&self) -> Vec<Play> {
        self.legal_plays()
    }
    fn forced_card(&self) -> Option<Card> {
        self.forced
    }
    fn is_over(&self) -> bool {
        self.is_over()
    }
    fn winners(&self) -> &[Side] {
        &self.winners
    }
}
