//! Exhaustive listing of legal plays.

use crate::agents::ScoringStrategy;
use crate::board::{is_friendly, Side};
use crate::cards::Card;
use crate::hand::Hand;
use crate::legality::is_legal;
use crate::play::{transition, Play};
use crate::rules::Rules;
use crate::state::{GameState, PawnId};
use std::ops::ControlFlow;

/// A legal play with the score a [`ScoringStrategy`] gave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredPlay {
    pub play: Play,
    pub score: i64,
}

/// Every distinct legal play for `side` holding `hand`.
///
/// When nothing can be played, or only 11 swaps can, one discard per distinct
/// card is listed as well.
///
/// ```
/// use sorry_rs::board::Side;
/// use sorry_rs::hand::Hand;
/// use sorry_rs::rules::Rules;
/// use sorry_rs::state::GameState;
/// use sorry_rs::enumerate_plays;
///
/// let state = GameState::new(&[Side::Blue, Side::Red]).unwrap();
/// let hand: Hand = "3 5".parse().unwrap();
/// // nobody is out of Start yet, so both cards can only be discarded
/// let plays = enumerate_plays(&hand, &state, Side::Blue, &Rules::default());
/// assert_eq!(plays.len(), 2);
/// assert!(plays.iter().all(|p| p.is_discard()));
/// ```
pub fn enumerate_plays(hand: &Hand, state: &GameState, side: Side, rules: &Rules) -> Vec<Play> {
    let mut plays = Vec::new();
    let _ = visit_plays(hand, state, side, rules, true, &mut |play| {
        plays.push(play);
        ControlFlow::Continue(())
    });
    tracing::trace!(side = %side, count = plays.len(), "enumerated plays");
    plays
}

/// Whether `side` has a play that forbids discarding. 11 swaps don't count.
pub fn has_any_play(hand: &Hand, state: &GameState, side: Side, rules: &Rules) -> bool {
    visit_plays(hand, state, side, rules, false, &mut |play| {
        if play.is_swap() {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    })
    .is_break()
}

/// [`enumerate_plays`] with a score attached to each play.
pub fn enumerate_scored(
    hand: &Hand,
    state: &GameState,
    side: Side,
    rules: &Rules,
    scorer: &mut dyn ScoringStrategy,
) -> Vec<ScoredPlay> {
    enumerate_plays(hand, state, side, rules)
        .into_iter()
        .map(|play| {
            let score = scorer.score(&play, state, side);
            ScoredPlay { play, score }
        })
        .collect()
}

/// Feed every legal play to `f` until it breaks.
pub fn visit_plays(
    hand: &Hand,
    state: &GameState,
    side: Side,
    rules: &Rules,
    with_discards: bool,
    f: &mut dyn FnMut(Play) -> ControlFlow<()>,
) -> ControlFlow<()> {
    let mut only_swaps = true;
    let mut emit = |play: Play| {
        only_swaps &= play.is_swap();
        f(play)
    };
    let friendly: Vec<PawnId> =
        state.pawns().filter(|(p, _)| is_friendly(side, p.side(), rules.teams)).map(|(p, _)| p).collect();
    let others: Vec<PawnId> =
        state.pawns().filter(|(p, _)| !is_friendly(side, p.side(), rules.teams)).map(|(p, _)| p).collect();
    let cards = hand.distinct();
    let legal = |play: &Play| is_legal(play, state, side, hand, rules);

    for &card in &cards {
        if card != Card::Sorry {
            let mut moved = false;
            for &pawn in &friendly {
                let play = Play::move_pawn(card, pawn);
                if legal(&play) {
                    moved = true;
                    emit(play)?;
                }
                if card == Card::Ten {
                    let back = Play::ten_backward(pawn);
                    if legal(&back) {
                        emit(back)?;
                    }
                }
            }
            if card == Card::Two && !moved && legal(&Play::draw_only()) {
                emit(Play::draw_only())?;
            }
        }
        match card {
            Card::Seven => {
                for play in split_sevens(&friendly, state, rules, &legal) {
                    emit(play)?;
                }
            }
            Card::Eleven | Card::Sorry => {
                for &mine in &friendly {
                    for &theirs in &others {
                        let play = if card == Card::Eleven {
                            Play::swap(mine, theirs)
                        } else {
                            Play::sorry(mine, theirs)
                        };
                        if legal(&play) {
                            emit(play)?;
                        }
                    }
                }
            }
            _ => {}
        }
    }

    if with_discards && only_swaps {
        for card in cards {
            f(Play::discard(card))?;
        }
    }
    ControlFlow::Continue(())
}

/// Legal split 7s: for each pawn to distance assignment, every order that
/// passes `legal` and ends in a board no earlier order reached.
fn split_sevens(
    friendly: &[PawnId],
    state: &GameState,
    rules: &Rules,
    legal: &dyn Fn(&Play) -> bool,
) -> Vec<Play> {
    let movable: Vec<PawnId> =
        friendly.iter().copied().filter(|p| state.location(*p).is_on_board()).collect();
    let widest = if rules.seven_split_any { movable.len() } else { 2 };
    let mut out = Vec::new();
    let mut distances = vec![0u8; movable.len()];
    assign(&mut distances, 0, 7, widest, &mut |distances| {
        let moves: Vec<(PawnId, u8)> = movable
            .iter()
            .zip(distances)
            .filter(|(_, d)| **d > 0)
            .map(|(p, d)| (*p, *d))
            .collect();
        if moves.len() >= 2 {
            out.extend(distinct_orders(&moves, state, legal));
        }
    });
    out
}

/// Enumerate every way to hand out `left` squares to `distances[at..]`,
/// touching at most `widest` pawns.
fn assign(distances: &mut [u8], at: usize, left: u8, widest: usize, f: &mut dyn FnMut(&[u8])) {
    if at == distances.len() {
        if left == 0 {
            f(distances);
        }
        return;
    }
    let used = distances[..at].iter().filter(|d| **d > 0).count();
    let max = if used < widest { left } else { 0 };
    for d in (0..=max).rev() {
        distances[at] = d;
        assign(distances, at + 1, left - d, widest, f);
    }
    distances[at] = 0;
}

/// Orders only differ when one pawn's slide sweeps another off its landing
/// square, so most assignments yield a single play.
fn distinct_orders(moves: &[(PawnId, u8)], state: &GameState, legal: &dyn Fn(&Play) -> bool) -> Vec<Play> {
    let mut order: Vec<usize> = (0..moves.len()).collect();
    let mut kept: Vec<(GameState, Play)> = Vec::new();
    loop {
        let play = Play::split(order.iter().map(|&i| moves[i]).collect());
        if legal(&play) {
            if let Ok(t) = transition(&play, state) {
                if kept.iter().all(|(after, _)| *after != t.state) {
                    kept.push((t.state, play));
                }
            }
        }
        if !next_permutation(&mut order) {
            return kept.into_iter().map(|(_, play)| play).collect();
        }
    }
}

/// Lexicographic next permutation; false once the order wraps around.
fn next_permutation(xs: &mut [usize]) -> bool {
    let Some(i) = (1..xs.len()).rev().find(|&i| xs[i - 1] < xs[i]) else {
        return false;
    };
    let pivot = i - 1;
    let Some(j) = (i..xs.len()).rev().find(|&j| xs[j] > xs[pivot]) else {
        return false;
    };
    xs.swap(pivot, j);
    xs[i..].reverse();
    true
}
