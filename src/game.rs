use crate::board::Side;
use crate::cards::Card;
use crate::deck::Deck;
use crate::enumerate::enumerate_plays;
use crate::hand::{Hand, HandError};
use crate::play::{apply_play, Play, PlayError};
use crate::rules::{Rules, SetupError};
use crate::state::{GameState, PawnId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    Playing,
    Finished,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,
    #[error("the drawn {forced} must be played, got {got}")]
    ForcedCard { forced: Card, got: Card },
    #[error("illegal play: {0}")]
    Illegal(#[from] PlayError),
    #[error(transparent)]
    Hand(#[from] HandError),
}

/// What happened after a committed play.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TurnEvent {
    /// A 2 was played and the same side goes again.
    PlayAgain { bumped: Vec<PawnId>, drawn: Option<Card> },
    TurnPassed { next: Side, bumped: Vec<PawnId> },
    GameOver { winners: Vec<Side>, bumped: Vec<PawnId> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TurnRecord {
    pub turn: u32,
    pub side: Side,
    pub play: Play,
    /// Pawns the play sent back to Start.
    pub bumped: Vec<PawnId>,
}

/// A table of seated sides playing one game.
#[derive(Debug)]
#[non_exhaustive]
pub struct Game {
    pub(crate) rules: Rules,
    pub(crate) state: GameState,
    pub(crate) deck: Deck,
    pub(crate) hands: [Hand; 4],
    pub(crate) current: Side,
    pub(crate) phase: Phase,
    /// Card drawn after a 2 that has to be played next.
    pub(crate) forced: Option<Card>,
    /// Draws owed at the end of the turn for 2s played without an immediate draw.
    pub(crate) owed_draws: usize,
    pub(crate) turn: u32,
    pub(crate) winners: Vec<Side>,
    history: Vec<TurnRecord>,
}

impl Game {
    /// Seat `sides`, shuffle with `seed` and deal.
    ///
    /// ```
    /// use sorry_rs::board::Side;
    /// use sorry_rs::game::Game;
    /// use sorry_rs::rules::Rules;
    ///
    /// let game = Game::new(&[Side::Blue, Side::Red], Rules::default(), 7).unwrap();
    /// assert_eq!(game.hand(Side::Blue).len(), 5);
    /// assert!(Game::new(&[Side::Blue], Rules::default().with_teams(true), 7).is_err());
    /// ```
    pub fn new(sides: &[Side], rules: Rules, seed: u64) -> Result<Self, SetupError> {
        let rules = rules.normalized();
        rules.validate(sides.len())?;
        let mut state = GameState::new(sides)?;
        if rules.fast_start {
            state = state.with_fast_start();
        }
        let mut deck = Deck::standard();
        deck.shuffle_seeded(seed);

        let seated: Vec<Side> = state.sides().collect();
        let mut hands: [Hand; 4] = Default::default();
        for side in &seated {
            hands[side.index()] = Hand::new(deck.draw_n(rules.hand_size));
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let current = seated[rng.random_range(0..seated.len())];

        let mut game = Self {
            rules,
            state,
            deck,
            hands,
            current,
            phase: Phase::Playing,
            forced: None,
            owed_draws: 0,
            turn: 1,
            winners: Vec::new(),
            history: Vec::new(),
        };
        game.begin_turn();
        tracing::debug!(sides = seated.len(), first = %current, "game set up");
        Ok(game)
    }

    /// Returns the rules in force
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Returns the board position
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the side to act
    pub fn current(&self) -> Side {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Returns the winning sides once the game is over
    pub fn winners(&self) -> &[Side] {
        &self.winners
    }

    pub fn hand(&self, side: Side) -> &Hand {
        &self.hands[side.index()]
    }

    /// Returns the card the current side must play, if a 2 forced one
    pub fn forced_card(&self) -> Option<Card> {
        self.forced
    }

    /// Returns the deck
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the number of the turn in progress, starting at 1
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Cards the current side may choose from right now.
    pub fn playable_hand(&self) -> Hand {
        match self.forced {
            Some(card) => Hand::new(vec![card]),
            None => self.hands[self.current.index()].clone(),
        }
    }

    /// Every legal play for the side to act.
    pub fn legal_plays(&self) -> Vec<Play> {
        if self.is_over() {
            return Vec::new();
        }
        enumerate_plays(&self.playable_hand(), &self.state, self.current, &self.rules)
    }

    pub fn history_recent(&self, n: usize) -> Vec<TurnRecord> {
        if n == 0 {
            return Vec::new();
        }
        let start = self.history.len().saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Commit `play` for the current side and advance the turn.
    pub fn play(&mut self, play: &Play) -> Result<TurnEvent, ActionError> {
        if self.is_over() {
            return Err(ActionError::GameOver);
        }
        if let Some(forced) = self.forced {
            if play.card != forced {
                return Err(ActionError::ForcedCard { forced, got: play.card });
            }
        }
        let side = self.current;
        let hand = self.playable_hand();
        let mut held = self.hands[side.index()].clone();
        held.remove(play.card)?;
        let bumped = apply_play(&mut self.state, play, side, &hand, &self.rules)?;
        self.hands[side.index()] = held;
        self.deck.discard(play.card);
        self.forced = None;
        self.history.push(TurnRecord { turn: self.turn, side, play: play.clone(), bumped: bumped.clone() });

        if self.check_finished() {
            return Ok(TurnEvent::GameOver { winners: self.winners.clone(), bumped });
        }
        if play.card == Card::Two && !play.is_discard() {
            if let Some(event) = self.play_again(bumped.clone()) {
                return Ok(event);
            }
        }
        self.end_turn();
        Ok(TurnEvent::TurnPassed { next: self.current, bumped })
    }

    /// Keep the turn after a 2, or `None` when nothing is left to play.
    fn play_again(&mut self, bumped: Vec<PawnId>) -> Option<TurnEvent> {
        let side = self.current;
        if !self.rules.draw_after_two {
            // an emptied hand ends the turn, whose own draw replaces this 2
            if self.hands[side.index()].is_empty() {
                return None;
            }
            self.owed_draws += 1;
            return Some(TurnEvent::PlayAgain { bumped, drawn: None });
        }
        let drawn = self.deck.draw();
        if let Some(card) = drawn {
            self.hands[side.index()].push(card);
            if self.rules.force_play_after_two {
                self.forced = Some(card);
            }
        }
        if self.hands[side.index()].is_empty() {
            return None;
        }
        Some(TurnEvent::PlayAgain { bumped, drawn })
    }

    fn check_finished(&mut self) -> bool {
        let winners = self.state.winners(self.rules.teams);
        if winners.is_empty() {
            return false;
        }
        tracing::info!(winners = ?winners, turn = self.turn, "game over");
        self.winners = winners;
        self.phase = Phase::Finished;
        true
    }

    fn end_turn(&mut self) {
        let side = self.current;
        if self.rules.hand_size != 0 {
            let owed = 1 + std::mem::take(&mut self.owed_draws);
            let drawn = self.deck.draw_n(owed);
            self.hands[side.index()].extend(drawn);
        }
        self.owed_draws = 0;
        self.forced = None;
        self.current = self.next_side(side);
        self.turn += 1;
        self.begin_turn();
    }

    fn begin_turn(&mut self) {
        if self.rules.hand_size == 0 {
            if let Some(card) = self.deck.draw() {
                self.hands[self.current.index()].push(card);
            }
        }
    }

    fn next_side(&self, side: Side) -> Side {
        let seated: Vec<Side> = self.state.sides().collect();
        let at = seated.iter().position(|s| *s == side).unwrap_or(0);
        seated[(at + 1) % seated.len()]
    }
}
