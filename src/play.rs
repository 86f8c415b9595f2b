//! Plays and their effect on the board.

use crate::board::Side;
use crate::cards::Card;
use crate::hand::Hand;
use crate::movement::{advance, settle, MoveError, Transition};
use crate::rules::Rules;
use crate::state::{GameState, Location, PawnId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a play acts on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Targets {
    /// A 2 played only to draw again.
    None,
    /// One pawn for a move; two for an 11 swap or a Sorry.
    Pawns(Vec<PawnId>),
    /// A 7 split, applied in order.
    Split(Vec<(PawnId, u8)>),
    /// Throw the card away without moving.
    Discard,
}

impl Targets {
    /// Pawns named by the targets, in order.
    pub fn pawns(&self) -> Vec<PawnId> {
        match self {
            Targets::Pawns(ps) => ps.clone(),
            Targets::Split(moves) => moves.iter().map(|(p, _)| *p).collect(),
            Targets::None | Targets::Discard => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Targets::Pawns(ps) => ps.is_empty(),
            Targets::Split(moves) => moves.is_empty(),
            Targets::None | Targets::Discard => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Play {
    pub card: Card,
    pub targets: Targets,
    /// A 10 spent moving one square backward.
    pub backward: bool,
}

impl Play {
    pub fn new(card: Card, targets: Targets) -> Self {
        Self { card, targets, backward: false }
    }

    /// Move one pawn by the card's value.
    pub fn move_pawn(card: Card, pawn: PawnId) -> Self {
        Self::new(card, Targets::Pawns(vec![pawn]))
    }

    pub fn ten_backward(pawn: PawnId) -> Self {
        Self { backward: true, ..Self::move_pawn(Card::Ten, pawn) }
    }

    pub fn split(moves: Vec<(PawnId, u8)>) -> Self {
        Self::new(Card::Seven, Targets::Split(moves))
    }

    pub fn swap(a: PawnId, b: PawnId) -> Self {
        Self::new(Card::Eleven, Targets::Pawns(vec![a, b]))
    }

    pub fn sorry(a: PawnId, b: PawnId) -> Self {
        Self::new(Card::Sorry, Targets::Pawns(vec![a, b]))
    }

    pub fn draw_only() -> Self {
        Self::new(Card::Two, Targets::None)
    }

    pub fn discard(card: Card) -> Self {
        Self::new(card, Targets::Discard)
    }

    pub fn is_discard(&self) -> bool {
        self.targets == Targets::Discard
    }

    /// An 11 used to exchange two pawns.
    pub fn is_swap(&self) -> bool {
        self.card == Card::Eleven && matches!(&self.targets, Targets::Pawns(ps) if ps.len() == 2)
    }

    /// Signed distance a single-pawn move travels with this card.
    pub fn distance(&self) -> Option<i8> {
        match self.card {
            Card::Four => Some(-4),
            Card::Ten if self.backward => Some(-1),
            card => card.value().map(|v| v as i8),
        }
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.targets {
            Targets::None => write!(f, "{} (draw again)", self.card),
            Targets::Discard => write!(f, "discard {}", self.card),
            Targets::Pawns(ps) => {
                write!(f, "{}", self.card)?;
                for p in ps {
                    write!(f, " {p}")?;
                }
                if self.backward {
                    f.write_str(" backward")?;
                }
                Ok(())
            }
            Targets::Split(moves) => {
                write!(f, "{}", self.card)?;
                for (p, d) in moves {
                    write!(f, " {p}:{d}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayError {
    #[error("card {0} is not in hand")]
    CardNotInHand(Card),
    #[error("targets do not fit a {0}")]
    WrongTargets(Card),
    #[error("only a 10 can move backward")]
    BackwardNotAllowed,
    #[error("{0} is not a friendly pawn")]
    NotFriendly(PawnId),
    #[error("{pawn} cannot be moved from {location}")]
    Immovable { pawn: PawnId, location: Location },
    #[error("{0} would land on a friendly pawn")]
    FriendlyCapture(PawnId),
    #[error("a split 7 must total 7, got {0}")]
    SplitTotal(u32),
    #[error("{0} appears twice in the split")]
    RepeatedPawn(PawnId),
    #[error("a 7 may be split across at most two pawns, got {0}")]
    SplitTooWide(usize),
    #[error("split distances must be positive")]
    ZeroDistance,
    #[error("{0} has a legal move and must be played")]
    MustMove(Card),
    #[error("a draw-only 2 needs another card in hand")]
    NothingToDraw,
    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Board effect of `play`, computed on a copy of `state`.
///
/// Only the mechanics are applied here. Whether the play is allowed at all is
/// decided by [`crate::legality`].
pub fn transition(play: &Play, state: &GameState) -> Result<Transition, PlayError> {
    let unchanged = || Transition { state: *state, captured: Vec::new(), swept: Vec::new(), slid: None };
    match (&play.targets, play.card) {
        (Targets::None | Targets::Discard, _) => Ok(unchanged()),
        (Targets::Pawns(ps), card) if ps.len() == 1 => {
            let distance = play.distance().ok_or(PlayError::WrongTargets(card))?;
            Ok(advance(state, ps[0], distance)?)
        }
        (Targets::Pawns(ps), Card::Eleven) if ps.len() == 2 => Ok(swap(state, ps[0], ps[1])),
        (Targets::Pawns(ps), Card::Sorry) if ps.len() == 2 => {
            // the pawn coming out of Start is the one that moves
            let (mover, victim) =
                if state.location(ps[0]) == Location::Start { (ps[0], ps[1]) } else { (ps[1], ps[0]) };
            Ok(bump_into(state, mover, victim))
        }
        (Targets::Split(moves), Card::Seven) => {
            let mut out = unchanged();
            for &(pawn, distance) in moves {
                let location = out.state.location(pawn);
                if !location.is_on_board() {
                    return Err(PlayError::Immovable { pawn, location });
                }
                let step = advance(&out.state, pawn, distance as i8)?;
                out.captured.extend(step.captured);
                out.swept.extend(step.swept);
                out.slid = step.slid.or(out.slid);
                out.state = step.state;
            }
            Ok(out)
        }
        (_, card) => Err(PlayError::WrongTargets(card)),
    }
}

fn swap(state: &GameState, a: PawnId, b: PawnId) -> Transition {
    let mut next = *state;
    let (la, lb) = (state.location(a), state.location(b));
    next.set(a, lb);
    next.set(b, la);
    let first = settle(&next, a);
    let mut second = settle(&first.state, b);
    second.swept.splice(0..0, first.swept);
    second.slid = second.slid.or(first.slid);
    second
}

fn bump_into(state: &GameState, mover: PawnId, victim: PawnId) -> Transition {
    let mut next = *state;
    next.set(mover, state.location(victim));
    next.set(victim, Location::Start);
    let mut out = settle(&next, mover);
    out.captured.insert(0, victim);
    out
}

/// Validate `play` for `side` and commit it to `state`.
///
/// The state is replaced in one step, so a rejected play leaves it untouched.
/// Returns every pawn sent back to Start.
pub fn apply_play(
    state: &mut GameState,
    play: &Play,
    side: Side,
    hand: &Hand,
    rules: &Rules,
) -> Result<Vec<PawnId>, PlayError> {
    let t = crate::legality::check_play(play, state, side, hand, rules)?;
    let bumped: Vec<PawnId> = t.sent_to_start().collect();
    tracing::debug!(side = %side, play = %play, bumped = bumped.len(), "committed play");
    for pawn in &bumped {
        tracing::debug!(pawn = %pawn, "pawn sent back to start");
    }
    *state = t.state;
    Ok(bumped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pawn(s: &str) -> PawnId {
        s.parse().unwrap()
    }

    #[test]
    fn display_reads_like_a_move_list() {
        assert_eq!(Play::move_pawn(Card::Five, pawn("B1")).to_string(), "5 B1");
        assert_eq!(Play::ten_backward(pawn("G2")).to_string(), "10 G2 backward");
        assert_eq!(Play::split(vec![(pawn("B1"), 4), (pawn("B2"), 3)]).to_string(), "7 B1:4 B2:3");
        assert_eq!(Play::discard(Card::Seven).to_string(), "discard 7");
        assert_eq!(Play::draw_only().to_string(), "2 (draw again)");
    }

    #[test]
    fn distances_per_card() {
        assert_eq!(Play::move_pawn(Card::Four, pawn("B1")).distance(), Some(-4));
        assert_eq!(Play::ten_backward(pawn("B1")).distance(), Some(-1));
        assert_eq!(Play::move_pawn(Card::Twelve, pawn("B1")).distance(), Some(12));
        assert_eq!(Play::sorry(pawn("B1"), pawn("R1")).distance(), None);
    }

    #[test]
    fn swap_exchanges_then_slides() {
        let mut st = GameState::new(&[Side::Blue, Side::Red]).unwrap();
        st.place(pawn("B1"), Location::Track(40)).unwrap();
        // square 9 is the entrance of Green's long slide
        st.place(pawn("R1"), Location::Track(9)).unwrap();
        let t = transition(&Play::swap(pawn("B1"), pawn("R1")), &st).unwrap();
        assert_eq!(t.state.location(pawn("B1")), Location::Track(13));
        assert_eq!(t.state.location(pawn("R1")), Location::Track(40));
    }

    #[test]
    fn sorry_sends_the_victim_home_in_either_order() {
        let mut st = GameState::new(&[Side::Blue, Side::Red]).unwrap();
        st.place(pawn("R2"), Location::Track(25)).unwrap();
        for play in [Play::sorry(pawn("B1"), pawn("R2")), Play::sorry(pawn("R2"), pawn("B1"))] {
            let t = transition(&play, &st).unwrap();
            assert_eq!(t.state.location(pawn("B1")), Location::Track(25));
            assert_eq!(t.state.location(pawn("R2")), Location::Start);
            assert_eq!(t.captured, vec![pawn("R2")]);
        }
    }

    #[test]
    fn split_is_sequential() {
        let mut st = GameState::new(&[Side::Blue]).unwrap();
        st.place(pawn("B1"), Location::Track(40)).unwrap();
        st.place(pawn("B2"), Location::Track(45)).unwrap();
        let t = transition(&Play::split(vec![(pawn("B2"), 2), (pawn("B1"), 5)]), &st).unwrap();
        assert_eq!(t.state.location(pawn("B2")), Location::Track(47));
        assert_eq!(t.state.location(pawn("B1")), Location::Track(45));
        assert!(t.captured.is_empty());
    }
}
