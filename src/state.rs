//! Pawn identities, locations and the positional game state.

use crate::board::{exit_location, Side, PAWNS_PER_SIDE, SAFETY_DEPTH, TRACK_LEN};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A pawn: its side plus an index in `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PawnId {
    side: Side,
    index: u8,
}

impl PawnId {
    /// Returns `None` unless `index` is in `1..=4`.
    pub const fn new(side: Side, index: u8) -> Option<Self> {
        if index >= 1 && index as usize <= PAWNS_PER_SIDE {
            Some(Self { side, index })
        } else {
            None
        }
    }

    pub const fn side(self) -> Side {
        self.side
    }

    pub const fn index(self) -> u8 {
        self.index
    }

    /// The four pawns of a side.
    pub fn all_of(side: Side) -> impl Iterator<Item = PawnId> {
        (1..=PAWNS_PER_SIDE as u8).map(move |index| PawnId { side, index })
    }

    const fn slot(self) -> usize {
        self.index as usize - 1
    }
}

impl fmt::Display for PawnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side.to_char(), self.index)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PawnParseError {
    #[error("invalid pawn label: '{0}'")]
    Invalid(String),
}

impl FromStr for PawnId {
    type Err = PawnParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        let (Some(side), Some(index), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(PawnParseError::Invalid(s.to_string()));
        };
        let side = Side::try_from(side).map_err(|_| PawnParseError::Invalid(s.to_string()))?;
        index
            .to_digit(10)
            .and_then(|i| PawnId::new(side, i as u8))
            .ok_or_else(|| PawnParseError::Invalid(s.to_string()))
    }
}

/// Where a pawn is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Start,
    /// Absolute square on the shared loop, `0..60`.
    Track(u8),
    /// A step `1..=5` in the named side's safety zone; step 5 adjoins Home.
    SafetyZone(Side, u8),
    Home,
}

impl Location {
    /// On the track or in a safety zone.
    pub const fn is_on_board(self) -> bool {
        matches!(self, Location::Track(_) | Location::SafetyZone(..))
    }

    pub const fn is_track(self) -> bool {
        matches!(self, Location::Track(_))
    }

    /// Squares that hold at most one pawn.
    const fn is_exclusive(self) -> bool {
        self.is_on_board()
    }

    fn is_valid_for(self, side: Side) -> bool {
        match self {
            Location::Start | Location::Home => true,
            Location::Track(pos) => pos < TRACK_LEN,
            Location::SafetyZone(owner, step) => owner == side && (1..=SAFETY_DEPTH).contains(&step),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Start => f.write_str("start"),
            Location::Track(pos) => write!(f, "track {pos}"),
            Location::SafetyZone(side, step) => write!(f, "{} safety {step}", side.name()),
            Location::Home => f.write_str("home"),
        }
    }
}

/// Positions of every pawn of the seated sides.
///
/// Small and `Copy`: speculative moves run on a copy, never on the caller's
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    seated: [bool; 4],
    pawns: [[Location; PAWNS_PER_SIDE]; 4],
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateError {
    #[error("no sides seated")]
    NoSides,
    #[error("side {0} seated twice")]
    DuplicateSide(Side),
    #[error("side {0} is not seated")]
    NotSeated(Side),
    #[error("{pawn} cannot stand on {location}")]
    InvalidLocation { pawn: PawnId, location: Location },
    #[error("{first} and {second} share {location}")]
    Overlap { first: PawnId, second: PawnId, location: Location },
}

impl GameState {
    /// All pawns of the given sides at Start.
    pub fn new(sides: &[Side]) -> Result<Self, StateError> {
        if sides.is_empty() {
            return Err(StateError::NoSides);
        }
        let mut seated = [false; 4];
        for side in sides {
            if seated[side.index()] {
                return Err(StateError::DuplicateSide(*side));
            }
            seated[side.index()] = true;
        }
        Ok(Self { seated, pawns: [[Location::Start; PAWNS_PER_SIDE]; 4] })
    }

    /// The "faster play" opening: pawn 1 of every side starts on its exit.
    pub fn with_fast_start(mut self) -> Self {
        for side in self.sides().collect::<Vec<_>>() {
            self.pawns[side.index()][0] = exit_location(side);
        }
        self
    }

    /// Seated sides in turn order.
    pub fn sides(&self) -> impl Iterator<Item = Side> + '_ {
        Side::ALL.into_iter().filter(|s| self.seated[s.index()])
    }

    pub fn num_sides(&self) -> usize {
        self.seated.iter().filter(|s| **s).count()
    }

    pub fn is_seated(&self, side: Side) -> bool {
        self.seated[side.index()]
    }

    pub fn location(&self, pawn: PawnId) -> Location {
        self.pawns[pawn.side().index()][pawn.slot()]
    }

    /// Every pawn of the seated sides with its location.
    pub fn pawns(&self) -> impl Iterator<Item = (PawnId, Location)> + '_ {
        self.sides().flat_map(move |side| PawnId::all_of(side).map(move |p| (p, self.location(p))))
    }

    /// Pawn standing on an exclusive square, if any.
    pub fn occupant(&self, location: Location) -> Option<PawnId> {
        if !location.is_exclusive() {
            return None;
        }
        self.pawns().find(|(_, loc)| *loc == location).map(|(p, _)| p)
    }

    /// Place a pawn directly, checking the board invariants.
    pub fn place(&mut self, pawn: PawnId, location: Location) -> Result<(), StateError> {
        if !self.is_seated(pawn.side()) {
            return Err(StateError::NotSeated(pawn.side()));
        }
        if !location.is_valid_for(pawn.side()) {
            return Err(StateError::InvalidLocation { pawn, location });
        }
        if let Some(other) = self.occupant(location).filter(|o| *o != pawn) {
            return Err(StateError::Overlap { first: other, second: pawn, location });
        }
        self.set(pawn, location);
        Ok(())
    }

    pub(crate) fn set(&mut self, pawn: PawnId, location: Location) {
        self.pawns[pawn.side().index()][pawn.slot()] = location;
    }

    /// Pawns of `side` at Home.
    pub fn home_count(&self, side: Side) -> usize {
        self.pawns[side.index()].iter().filter(|l| **l == Location::Home).count()
    }

    /// True when all of `side`'s pawns, and under teams its teammate's, are Home.
    pub fn check_win(&self, side: Side, teams: bool) -> bool {
        if !self.is_seated(side) || self.home_count(side) != PAWNS_PER_SIDE {
            return false;
        }
        !teams || self.home_count(side.teammate()) == PAWNS_PER_SIDE
    }

    /// Seated sides that have won.
    pub fn winners(&self, teams: bool) -> Vec<Side> {
        self.sides().filter(|s| self.check_win(*s, teams)).collect()
    }
}

/// Free-function form of [`GameState::check_win`].
pub fn check_win(state: &GameState, side: Side, teams: bool) -> bool {
    state.check_win(side, teams)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pawn(s: &str) -> PawnId {
        s.parse().unwrap()
    }

    #[test]
    fn pawn_labels_round_trip_through_display() {
        assert_eq!(pawn("B1").to_string(), "B1");
        assert_eq!(pawn("r4").side(), Side::Red);
        assert!("B5".parse::<PawnId>().is_err());
        assert!("B".parse::<PawnId>().is_err());
        assert!("X1".parse::<PawnId>().is_err());
    }

    #[test]
    fn new_state_has_everyone_at_start() {
        let st = GameState::new(&[Side::Blue, Side::Green]).unwrap();
        assert_eq!(st.pawns().count(), 8);
        assert!(st.pawns().all(|(_, l)| l == Location::Start));
        assert!(!st.is_seated(Side::Red));
        assert!(matches!(GameState::new(&[]), Err(StateError::NoSides)));
        assert!(matches!(
            GameState::new(&[Side::Red, Side::Red]),
            Err(StateError::DuplicateSide(Side::Red))
        ));
    }

    #[test]
    fn place_enforces_invariants() {
        let mut st = GameState::new(&[Side::Blue, Side::Green]).unwrap();
        st.place(pawn("B1"), Location::Track(10)).unwrap();
        assert!(matches!(
            st.place(pawn("G1"), Location::Track(10)),
            Err(StateError::Overlap { .. })
        ));
        assert!(matches!(
            st.place(pawn("G1"), Location::SafetyZone(Side::Blue, 1)),
            Err(StateError::InvalidLocation { .. })
        ));
        assert!(matches!(st.place(pawn("R1"), Location::Home), Err(StateError::NotSeated(_))));
        assert_eq!(st.occupant(Location::Track(10)), Some(pawn("B1")));
        assert_eq!(st.occupant(Location::Start), None);
    }

    #[test]
    fn win_requires_teammate_under_teams() {
        let mut st = GameState::new(&Side::ALL).unwrap();
        for p in PawnId::all_of(Side::Blue) {
            st.place(p, Location::Home).unwrap();
        }
        assert!(st.check_win(Side::Blue, false));
        assert!(!st.check_win(Side::Blue, true));
        for p in PawnId::all_of(Side::Green) {
            st.place(p, Location::Home).unwrap();
        }
        assert!(st.check_win(Side::Blue, true));
        assert!(st.check_win(Side::Green, true));
        assert_eq!(st.winners(true), vec![Side::Blue, Side::Green]);
    }

    #[test]
    fn fast_start_moves_one_pawn_out() {
        let st = GameState::new(&[Side::Yellow]).unwrap().with_fast_start();
        assert_eq!(st.location(pawn("Y1")), exit_location(Side::Yellow));
        assert_eq!(st.location(pawn("Y2")), Location::Start);
    }
}
