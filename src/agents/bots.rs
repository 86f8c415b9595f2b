use crate::board::Side;
use crate::engine::GameEngine;
use crate::enumerate::enumerate_scored;
use crate::game::ActionError;
use crate::play::Play;
use crate::state::GameState;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{AgentKind, PlayerAgent, ScoringStrategy};

/// Uniform random score in `0..100`.
///
/// A stand-in heuristic: it makes bots play legal but aimless games.
#[derive(Debug)]
pub struct RandomScorer {
    rng: StdRng,
}

impl RandomScorer {
    /// Deterministic scorer for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl ScoringStrategy for RandomScorer {
    fn score(&mut self, _play: &Play, _state: &GameState, _side: Side) -> i64 {
        self.rng.random_range(0..100)
    }
}

/// Plays the best-scored legal play; the earliest play wins ties.
pub struct BotAgent {
    scorer: Box<dyn ScoringStrategy>,
}

impl BotAgent {
    pub fn new(scorer: Box<dyn ScoringStrategy>) -> Self {
        Self { scorer }
    }

    /// A bot driven by a seeded [`RandomScorer`].
    pub fn random(seed: u64) -> Self {
        Self::new(Box::new(RandomScorer::seeded(seed)))
    }

    fn choose(&mut self, engine: &dyn GameEngine, side: Side) -> Option<Play> {
        let hand = engine.playable_hand();
        let scored = enumerate_scored(&hand, engine.state(), side, engine.rules(), self.scorer.as_mut());
        let mut best: Option<(i64, Play)> = None;
        for sp in scored {
            if best.as_ref().map_or(true, |(score, _)| sp.score > *score) {
                best = Some((sp.score, sp.play));
            }
        }
        best.map(|(_, play)| play)
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
    fn on_turn(&mut self, engine: &mut dyn GameEngine, side: Side) -> Result<bool, ActionError> {
        if engine.is_over() || engine.current() != side {
            return Ok(false);
        }
        let Some(play) = self.choose(engine, side) else {
            return Ok(false);
        };
        tracing::trace!(side = %side, play = %play, "bot chose");
        engine.play(&play).map(|_| true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::game::Game;
    use crate::rules::Rules;

    #[test]
    fn seeded_scorers_agree() {
        let st = GameState::new(&[Side::Blue]).unwrap();
        let play = Play::discard(Card::One);
        let mut a = RandomScorer::seeded(9);
        let mut b = RandomScorer::seeded(9);
        for _ in 0..10 {
            let x = a.score(&play, &st, Side::Blue);
            assert_eq!(x, b.score(&play, &st, Side::Blue));
            assert!((0..100).contains(&x));
        }
    }

    #[test]
    fn bot_follows_its_scorer() {
        let mut g = Game::new(&[Side::Blue, Side::Red], Rules::default(), 5).unwrap();
        let side = g.current();
        let plays = g.legal_plays();
        let last = plays.last().cloned().unwrap();
        let target = last.clone();
        // prefer the last enumerated play
        let mut bot = BotAgent::new(Box::new(move |p: &Play, _: &GameState, _: Side| -> i64 {
            i64::from(*p == target)
        }));
        assert!(bot.on_turn(&mut g, side).unwrap());
        assert_eq!(g.history_recent(1)[0].play, last);
    }

    #[test]
    fn ties_go_to_the_first_play() {
        let g = Game::new(&[Side::Blue, Side::Red], Rules::default(), 5).unwrap();
        let side = g.current();
        let mut bot = BotAgent::new(Box::new(|_: &Play, _: &GameState, _: Side| -> i64 { 0 }));
        assert_eq!(bot.choose(&g, side), g.legal_plays().first().cloned());
    }
}
