//! Walking pawns along the board: safety entry, slides and captures.
//!
//! [`resolve`] is the pure path walk over a single location. [`advance`] runs
//! that walk for a pawn inside a [`GameState`] and applies what happens where
//! it comes to rest.

use crate::board::{exit_location, safety_entrance, slide_for, wrap, Side, SlideSpec, SAFETY_DEPTH};
use crate::state::{GameState, Location, PawnId};

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    /// Landed exactly on Home.
    ReachedHome,
    /// The walk is impossible; the location is left unchanged.
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub location: Location,
    pub outcome: Outcome,
}

impl Resolution {
    const fn blocked(location: Location) -> Self {
        Self { location, outcome: Outcome::Blocked }
    }
}

/// Walk `distance` squares from `location` for a pawn of `side`; negative
/// distances walk backward.
///
/// ```
/// use sorry_rs::board::Side;
/// use sorry_rs::movement::{resolve, Outcome};
/// use sorry_rs::state::Location;
///
/// // Blue's safety entrance is square 32
/// let r = resolve(Location::Track(30), Side::Blue, 4);
/// assert_eq!(r.location, Location::SafetyZone(Side::Blue, 2));
/// assert_eq!(r.outcome, Outcome::Moved);
/// ```
pub fn resolve(location: Location, side: Side, distance: i8) -> Resolution {
    if distance == 0 {
        return Resolution { location, outcome: Outcome::Moved };
    }
    let forward = distance > 0;
    let mut at = location;
    match at {
        Location::Home => return Resolution::blocked(location),
        Location::Start if forward => {
            return Resolution { location: exit_location(side), outcome: Outcome::Moved }
        }
        Location::Start => return Resolution::blocked(location),
        _ => {}
    }
    for _ in 0..distance.unsigned_abs() {
        at = match at {
            Location::Track(pos) if forward && pos == safety_entrance(side) => {
                Location::SafetyZone(side, 1)
            }
            Location::Track(pos) if forward => Location::Track(wrap(pos as i16 + 1)),
            Location::Track(pos) => Location::Track(wrap(pos as i16 - 1)),
            Location::SafetyZone(_, step) if forward && step >= SAFETY_DEPTH => Location::Home,
            Location::SafetyZone(owner, step) if forward => Location::SafetyZone(owner, step + 1),
            Location::SafetyZone(_, 1) => Location::Track(safety_entrance(side)),
            Location::SafetyZone(owner, step) => Location::SafetyZone(owner, step - 1),
            // one more step after Home is an overshoot
            Location::Home | Location::Start => return Resolution::blocked(location),
        };
    }
    let outcome = if at == Location::Home { Outcome::ReachedHome } else { Outcome::Moved };
    Resolution { location: at, outcome }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MoveError {
    #[error("{pawn} cannot move {distance} from {from}")]
    Blocked { pawn: PawnId, from: Location, distance: i8 },
    #[error("side {0} is not seated")]
    NotSeated(Side),
}

/// Result of moving a pawn inside a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    /// Pawns bumped by landing on their square.
    pub captured: Vec<PawnId>,
    /// Pawns cleared off a slide the mover rode.
    pub swept: Vec<PawnId>,
    pub slid: Option<SlideSpec>,
}

impl Transition {
    fn unchanged(state: GameState) -> Self {
        Self { state, captured: Vec::new(), swept: Vec::new(), slid: None }
    }

    /// Every pawn this transition sent back to Start.
    pub fn sent_to_start(&self) -> impl Iterator<Item = PawnId> + '_ {
        self.swept.iter().chain(self.captured.iter()).copied()
    }
}

/// Move `pawn` by `distance` on a copy of `state`, then ride any slide it
/// stops on or capture whoever holds its landing square.
pub fn advance(state: &GameState, pawn: PawnId, distance: i8) -> Result<Transition, MoveError> {
    if !state.is_seated(pawn.side()) {
        return Err(MoveError::NotSeated(pawn.side()));
    }
    let from = state.location(pawn);
    let res = resolve(from, pawn.side(), distance);
    if res.outcome == Outcome::Blocked {
        return Err(MoveError::Blocked { pawn, from, distance });
    }
    let mut next = *state;
    next.set(pawn, res.location);
    Ok(land(next, pawn))
}

/// Ride the slide under `pawn`, if one triggers for it. Nothing else happens:
/// swaps and Sorry entries have already dealt with the square's occupant.
pub fn settle(state: &GameState, pawn: PawnId) -> Transition {
    let mut out = Transition::unchanged(*state);
    ride_slide(&mut out, pawn);
    out
}

fn land(state: GameState, pawn: PawnId) -> Transition {
    let mut out = Transition::unchanged(state);
    if ride_slide(&mut out, pawn) {
        return out;
    }
    let here = out.state.location(pawn);
    if !here.is_on_board() {
        return out;
    }
    let occupant = others_at(&out.state, here, pawn).next();
    if let Some(victim) = occupant {
        out.state.set(victim, Location::Start);
        out.captured.push(victim);
    }
    out
}

fn ride_slide(out: &mut Transition, pawn: PawnId) -> bool {
    let Location::Track(pos) = out.state.location(pawn) else {
        return false;
    };
    let Some(slide) = slide_for(pos, pawn.side()) else {
        return false;
    };
    for square in slide.squares() {
        let victims: Vec<PawnId> = others_at(&out.state, Location::Track(square), pawn).collect();
        for victim in victims {
            out.state.set(victim, Location::Start);
            out.swept.push(victim);
        }
    }
    out.state.set(pawn, Location::Track(slide.exit));
    out.slid = Some(slide);
    true
}

fn others_at(state: &GameState, location: Location, pawn: PawnId) -> impl Iterator<Item = PawnId> + '_ {
    state.pawns().filter(move |(p, l)| *p != pawn && *l == location).map(|(p, _)| p)
}
