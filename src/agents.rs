//! Agents: pluggable controllers for the seated sides.
//!
//! A `PlayerAgent` acts for one side when it is that side's turn, and an
//! `AgentTable` coordinates which agent controls which side. Bots rank legal
//! plays through a `ScoringStrategy`, so the heuristic can be swapped without
//! touching enumeration.

use crate::board::Side;
use crate::engine::GameEngine;
use crate::game::ActionError;
use crate::play::Play;
use crate::state::GameState;
use core::fmt;

/// Kinds of agents attached to sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// Ranks a candidate play; higher is better.
pub trait ScoringStrategy {
    fn score(&mut self, play: &Play, state: &GameState, side: Side) -> i64;
}

impl<F> ScoringStrategy for F
where
    F: FnMut(&Play, &GameState, Side) -> i64,
{
    fn score(&mut self, play: &Play, state: &GameState, side: Side) -> i64 {
        self(play, state, side)
    }
}

/// A side controller that can act when it is that side's turn.
pub trait PlayerAgent {
    /// Called when `side` is to act. Returns whether a play was made.
    fn on_turn(&mut self, engine: &mut dyn GameEngine, side: Side) -> Result<bool, ActionError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally receive an intended play; default is to ignore and return false.
    fn receive(&mut self, _play: Play) -> bool {
        false
    }
}

mod bots;

pub use bots::{BotAgent, RandomScorer};

/// Plays whatever play a frontend hands it, once it is this side's turn.
pub struct HumanAgent {
    pending: Option<Play>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl Default for HumanAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    fn receive(&mut self, play: Play) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(play);
        true
    }
    fn on_turn(&mut self, engine: &mut dyn GameEngine, side: Side) -> Result<bool, ActionError> {
        if engine.is_over() {
            self.pending = None;
            return Ok(false);
        }
        if engine.current() != side {
            return Ok(false);
        }
        match self.pending.take() {
            Some(play) => engine.play(&play).map(|_| true),
            None => Ok(false),
        }
    }
}

/// One optional agent per side; drives the agent of the side to act.
pub struct AgentTable {
    sides: [Option<Box<dyn PlayerAgent>>; 4],
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = Side::ALL
            .iter()
            .map(|s| match self.agent_kind(*s) {
                Some(AgentKind::Bot) => s.to_char(),
                Some(AgentKind::Human) => s.to_char().to_ascii_lowercase(),
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTable {
    /// Create a table with no agents.
    pub fn new() -> Self {
        Self { sides: [None, None, None, None] }
    }

    /// Assign an agent to a side (or remove when `None`).
    pub fn set_agent(&mut self, side: Side, agent: Option<Box<dyn PlayerAgent>>) {
        self.sides[side.index()] = agent;
    }

    /// Get immutable access to an agent for inspection.
    pub fn agent(&self, side: Side) -> Option<&dyn PlayerAgent> {
        self.sides[side.index()].as_deref()
    }

    /// Return the kind of agent at a side, if any.
    pub fn agent_kind(&self, side: Side) -> Option<AgentKind> {
        self.agent(side).map(|a| a.kind())
    }

    /// Send an intended play to a side's agent, if any.
    pub fn receive(&mut self, side: Side, play: Play) -> bool {
        match &mut self.sides[side.index()] {
            Some(agent) => agent.receive(play),
            None => false,
        }
    }

    pub fn has_agent(&self, side: Side) -> bool {
        self.sides[side.index()].is_some()
    }

    /// Whether any non-human (bot) agents are assigned.
    pub fn any_bots(&self) -> bool {
        self.sides.iter().filter_map(|a| a.as_deref()).any(|a| matches!(a.kind(), AgentKind::Bot))
    }

    /// Drive the agent assigned to the side to act, if any.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> Result<bool, ActionError> {
        let side = engine.current();
        match &mut self.sides[side.index()] {
            Some(agent) => agent.on_turn(engine, side),
            None => Ok(false),
        }
    }

    /// Keep driving agents until the game ends, nobody acts, or `max_plays`
    /// plays have been made. Returns the number of plays made.
    pub fn run(&mut self, engine: &mut dyn GameEngine, max_plays: usize) -> Result<usize, ActionError> {
        let mut plays = 0;
        while plays < max_plays && !engine.is_over() {
            if !self.on_turn(engine)? {
                break;
            }
            plays += 1;
        }
        Ok(plays)
    }

    /// Remove all agents.
    pub fn clear(&mut self) {
        for a in &mut self.sides {
            *a = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::game::Game;
    use crate::rules::Rules;

    fn mk_game() -> Game {
        Game::new(&[Side::Blue, Side::Red], Rules::default(), 3).unwrap()
    }

    #[test]
    fn human_agent_waits_for_a_play() {
        let mut g = mk_game();
        let side = g.current();
        let mut human = HumanAgent::new();
        assert!(!human.on_turn(&mut g, side).unwrap());
        let play = g.legal_plays().remove(0);
        assert!(human.receive(play.clone()));
        assert!(!human.receive(play));
        assert!(human.on_turn(&mut g, side).unwrap());
        assert_eq!(g.history_len(), 1);
    }

    #[test]
    fn human_agent_ignores_other_turns() {
        let mut g = mk_game();
        let other = if g.current() == Side::Blue { Side::Red } else { Side::Blue };
        let mut human = HumanAgent::new();
        human.receive(Play::discard(Card::One));
        assert!(!human.on_turn(&mut g, other).unwrap());
    }

    #[test]
    fn table_drives_bots() {
        let mut g = mk_game();
        let mut table = AgentTable::new();
        table.set_agent(Side::Blue, Some(Box::new(BotAgent::random(1))));
        table.set_agent(Side::Red, Some(Box::new(BotAgent::random(2))));
        assert!(table.any_bots());
        assert_eq!(format!("{table:?}"), "AgentTable(B--R)");
        let plays = table.run(&mut g, 500).unwrap();
        assert!(plays > 0);
        assert_eq!(g.history_len(), plays);
        if g.is_over() {
            assert!(!g.winners().is_empty());
        } else {
            assert_eq!(plays, 500);
        }
    }

    #[test]
    fn empty_side_stops_the_run() {
        let mut g = mk_game();
        let mut table = AgentTable::new();
        assert_eq!(table.run(&mut g, 100).unwrap(), 0);
        table.set_agent(Side::Blue, Some(Box::new(HumanAgent::new())));
        table.clear();
        assert!(!table.has_agent(Side::Blue));
    }
}
