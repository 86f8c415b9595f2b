//! Per-card legality.
//!
//! Every check runs the play on a copy of the state through
//! [`crate::play::transition`], so validation and commitment share one core.

use crate::board::{is_friendly, Side};
use crate::cards::Card;
use crate::hand::Hand;
use crate::movement::Transition;
use crate::play::{transition, Play, PlayError, Targets};
use crate::rules::Rules;
use crate::state::{GameState, Location, PawnId};

/// Whether `side` may make `play` holding `hand`.
///
/// ```
/// use sorry_rs::board::Side;
/// use sorry_rs::cards::Card;
/// use sorry_rs::hand::Hand;
/// use sorry_rs::play::Play;
/// use sorry_rs::rules::Rules;
/// use sorry_rs::state::GameState;
/// use sorry_rs::is_legal;
///
/// let state = GameState::new(&[Side::Blue, Side::Red]).unwrap();
/// let hand = Hand::new(vec![Card::One, Card::Three]);
/// let b1 = "B1".parse().unwrap();
/// let rules = Rules::default();
/// assert!(is_legal(&Play::move_pawn(Card::One, b1), &state, Side::Blue, &hand, &rules));
/// assert!(!is_legal(&Play::move_pawn(Card::Three, b1), &state, Side::Blue, &hand, &rules));
/// ```
pub fn is_legal(play: &Play, state: &GameState, side: Side, hand: &Hand, rules: &Rules) -> bool {
    check_play(play, state, side, hand, rules).is_ok()
}

/// Validate `play` and return its transition, or the reason it is illegal.
pub fn check_play(
    play: &Play,
    state: &GameState,
    side: Side,
    hand: &Hand,
    rules: &Rules,
) -> Result<Transition, PlayError> {
    if !hand.contains(play.card) {
        return Err(PlayError::CardNotInHand(play.card));
    }
    if play.backward && play.card != Card::Ten {
        return Err(PlayError::BackwardNotAllowed);
    }
    match (&play.targets, play.card) {
        (Targets::None, Card::Two) => {
            check_draw_only(state, side, hand, rules)?;
            transition(play, state)
        }
        (Targets::Discard, card) => {
            if crate::enumerate::has_any_play(hand, state, side, rules) {
                return Err(PlayError::MustMove(card));
            }
            transition(play, state)
        }
        (Targets::Pawns(ps), _) if ps.len() == 1 => check_single(play, ps[0], state, side, rules.teams),
        (Targets::Pawns(ps), Card::Eleven) if ps.len() == 2 => {
            check_swap(play, ps[0], ps[1], state, side, rules.teams)
        }
        (Targets::Pawns(ps), Card::Sorry) if ps.len() == 2 => {
            check_sorry(play, ps[0], ps[1], state, side, rules.teams)
        }
        (Targets::Split(moves), Card::Seven) => check_split(play, moves, state, side, rules),
        (_, card) => Err(PlayError::WrongTargets(card)),
    }
}

fn friendly(pawn: PawnId, state: &GameState, side: Side, teams: bool) -> bool {
    state.is_seated(pawn.side()) && is_friendly(side, pawn.side(), teams)
}

fn reject_friendly_capture(t: Transition, side: Side, teams: bool) -> Result<Transition, PlayError> {
    match t.captured.iter().find(|p| is_friendly(side, p.side(), teams)) {
        Some(p) => Err(PlayError::FriendlyCapture(*p)),
        None => Ok(t),
    }
}

fn check_single(
    play: &Play,
    pawn: PawnId,
    state: &GameState,
    side: Side,
    teams: bool,
) -> Result<Transition, PlayError> {
    if play.card == Card::Sorry {
        return Err(PlayError::WrongTargets(play.card));
    }
    if !friendly(pawn, state, side, teams) {
        return Err(PlayError::NotFriendly(pawn));
    }
    let location = state.location(pawn);
    let stuck = match location {
        Location::Home => true,
        Location::Start => !play.card.leaves_start(),
        _ => false,
    };
    if stuck {
        return Err(PlayError::Immovable { pawn, location });
    }
    reject_friendly_capture(transition(play, state)?, side, teams)
}

fn check_split(
    play: &Play,
    moves: &[(PawnId, u8)],
    state: &GameState,
    side: Side,
    rules: &Rules,
) -> Result<Transition, PlayError> {
    if moves.is_empty() {
        return Err(PlayError::WrongTargets(play.card));
    }
    if moves.len() > 2 && !rules.seven_split_any {
        return Err(PlayError::SplitTooWide(moves.len()));
    }
    for (i, &(pawn, distance)) in moves.iter().enumerate() {
        if distance == 0 {
            return Err(PlayError::ZeroDistance);
        }
        if moves[..i].iter().any(|(p, _)| *p == pawn) {
            return Err(PlayError::RepeatedPawn(pawn));
        }
        if !friendly(pawn, state, side, rules.teams) {
            return Err(PlayError::NotFriendly(pawn));
        }
    }
    let total: u32 = moves.iter().map(|(_, d)| u32::from(*d)).sum();
    if total != 7 {
        return Err(PlayError::SplitTotal(total));
    }
    reject_friendly_capture(transition(play, state)?, side, rules.teams)
}

/// 11 swap: exactly one target friendly, both on the Track. Under teams the
/// partner's pawns are friendly too, so a swap with the partner is rejected.
fn check_swap(
    play: &Play,
    a: PawnId,
    b: PawnId,
    state: &GameState,
    side: Side,
    teams: bool,
) -> Result<Transition, PlayError> {
    if a.side() == b.side() {
        return Err(PlayError::WrongTargets(play.card));
    }
    for pawn in [a, b] {
        let location = state.location(pawn);
        if !state.is_seated(pawn.side()) || !location.is_track() {
            return Err(PlayError::Immovable { pawn, location });
        }
    }
    match (friendly(a, state, side, teams), friendly(b, state, side, teams)) {
        (true, false) | (false, true) => transition(play, state),
        (false, false) => Err(PlayError::NotFriendly(a)),
        // swapping within a team is not a swap with another player
        (true, true) => Err(PlayError::WrongTargets(play.card)),
    }
}

/// Sorry: a friendly pawn at Start onto a non-friendly pawn on the Track.
/// Under teams the partner's pawns are friendly and cannot be the victim.
fn check_sorry(
    play: &Play,
    a: PawnId,
    b: PawnId,
    state: &GameState,
    side: Side,
    teams: bool,
) -> Result<Transition, PlayError> {
    if a.side() == b.side() {
        return Err(PlayError::WrongTargets(play.card));
    }
    let (mover, victim) = match (friendly(a, state, side, teams), friendly(b, state, side, teams)) {
        (true, false) => (a, b),
        (false, true) => (b, a),
        (false, false) => return Err(PlayError::NotFriendly(a)),
        (true, true) => return Err(PlayError::WrongTargets(play.card)),
    };
    let from = state.location(mover);
    if from != Location::Start {
        return Err(PlayError::Immovable { pawn: mover, location: from });
    }
    let at = state.location(victim);
    if !state.is_seated(victim.side()) || !at.is_track() {
        return Err(PlayError::Immovable { pawn: victim, location: at });
    }
    transition(play, state)
}

fn check_draw_only(state: &GameState, side: Side, hand: &Hand, rules: &Rules) -> Result<(), PlayError> {
    if two_can_move(state, side, rules.teams) {
        return Err(PlayError::MustMove(Card::Two));
    }
    if rules.draw_after_two && hand.len() <= 1 {
        return Err(PlayError::NothingToDraw);
    }
    Ok(())
}

/// Some friendly pawn has a legal move with a 2.
pub(crate) fn two_can_move(state: &GameState, side: Side, teams: bool) -> bool {
    state
        .pawns()
        .filter(|(p, _)| is_friendly(side, p.side(), teams))
        .any(|(p, _)| check_single(&Play::move_pawn(Card::Two, p), p, state, side, teams).is_ok())
}
