//! Board topology: sides, the shared track, safety zones and slides.
//!
//! The track is a loop of 60 squares split into four 15-square quadrants, one
//! per side. Every quadrant has the same layout, so the whole board is derived
//! from a single quadrant description instead of per-square tables.

use crate::state::Location;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of squares on the shared loop.
pub const TRACK_LEN: u8 = 60;
/// Depth of every side's safety zone; one step further is Home.
pub const SAFETY_DEPTH: u8 = 5;
/// Pawns owned by each side.
pub const PAWNS_PER_SIDE: usize = 4;

const QUADRANT_LEN: u8 = TRACK_LEN / 4;
const SAFETY_ENTRANCE_OFFSET: u8 = 2;
const START_EXIT_OFFSET: u8 = 4;
/// (entrance offset, length) for the two slides of a quadrant.
const QUADRANT_SLIDES: [(u8, u8); 2] = [(1, 4), (9, 5)];

/// The four sides, in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Blue,
    Yellow,
    Green,
    Red,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Blue, Side::Yellow, Side::Green, Side::Red];

    /// Position in turn order.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The diagonally opposite side, partner under team play.
    pub const fn teammate(self) -> Side {
        match self {
            Side::Blue => Side::Green,
            Side::Green => Side::Blue,
            Side::Yellow => Side::Red,
            Side::Red => Side::Yellow,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Side::Blue => 'B',
            Side::Yellow => 'Y',
            Side::Green => 'G',
            Side::Red => 'R',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Side::Blue => "Blue",
            Side::Yellow => "Yellow",
            Side::Green => "Green",
            Side::Red => "Red",
        }
    }

    /// Quadrant of the loop whose edge this side owns.
    const fn quadrant(self) -> u8 {
        match self {
            Side::Green => 0,
            Side::Red => 1,
            Side::Blue => 2,
            Side::Yellow => 3,
        }
    }

    const fn from_quadrant(q: u8) -> Side {
        match q % 4 {
            0 => Side::Green,
            1 => Side::Red,
            2 => Side::Blue,
            _ => Side::Yellow,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SideParseError {
    #[error("invalid side: '{0}'")]
    Invalid(String),
}

impl TryFrom<char> for Side {
    type Error = SideParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'B' => Ok(Side::Blue),
            'Y' => Ok(Side::Yellow),
            'G' => Ok(Side::Green),
            'R' => Ok(Side::Red),
            _ => Err(SideParseError::Invalid(c.to_string())),
        }
    }
}

impl FromStr for Side {
    type Err = SideParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Side::try_from(c).map_err(|_| SideParseError::Invalid(s.to_string()));
        }
        match t.to_ascii_lowercase().as_str() {
            "blue" => Ok(Side::Blue),
            "yellow" => Ok(Side::Yellow),
            "green" => Ok(Side::Green),
            "red" => Ok(Side::Red),
            _ => Err(SideParseError::Invalid(s.to_string())),
        }
    }
}

/// A slide: landing on `entrance` carries a pawn to `exit`, clearing the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlideSpec {
    /// Side whose edge the slide sits on. Its own pawns never ride it.
    pub owner: Side,
    pub entrance: u8,
    pub exit: u8,
    /// Squares covered, entrance and exit included.
    pub length: u8,
}

impl SlideSpec {
    /// Track squares covered by the slide, entrance first.
    pub fn squares(self) -> impl Iterator<Item = u8> {
        (0..self.length).map(move |i| wrap(self.entrance as i16 + i as i16))
    }
}

/// Square a pawn occupies the moment it leaves Start.
pub const fn exit_location(side: Side) -> Location {
    Location::Track(side.quadrant() * QUADRANT_LEN + START_EXIT_OFFSET)
}

/// Track square immediately before `side`'s safety zone.
pub const fn safety_entrance(side: Side) -> u8 {
    side.quadrant() * QUADRANT_LEN + SAFETY_ENTRANCE_OFFSET
}

pub const fn home_approach_length(_side: Side) -> u8 {
    SAFETY_DEPTH
}

/// Slide whose entrance is `pos`, if any.
pub fn slide_at(pos: u8) -> Option<SlideSpec> {
    if pos >= TRACK_LEN {
        return None;
    }
    let quadrant = pos / QUADRANT_LEN;
    let offset = pos % QUADRANT_LEN;
    QUADRANT_SLIDES.iter().find(|(entry, _)| *entry == offset).map(|&(_, length)| SlideSpec {
        owner: Side::from_quadrant(quadrant),
        entrance: pos,
        exit: wrap(pos as i16 + length as i16 - 1),
        length,
    })
}

/// Slide a pawn of `side` rides when it comes to rest on `pos`.
///
/// Slides on a side's own edge lead into its home stretch and are skipped by
/// that side's pawns.
pub fn slide_for(pos: u8, side: Side) -> Option<SlideSpec> {
    slide_at(pos).filter(|slide| slide.owner != side)
}

/// Every slide on the board, in track order.
pub fn slides() -> impl Iterator<Item = SlideSpec> {
    (0..TRACK_LEN).filter_map(slide_at)
}

/// Whether a pawn of `pawn_side` is on the mover's team.
pub fn is_friendly(mover: Side, pawn_side: Side, teams: bool) -> bool {
    pawn_side == mover || (teams && pawn_side == mover.teammate())
}

/// Normalise a signed track offset into `0..TRACK_LEN`.
pub(crate) fn wrap(pos: i16) -> u8 {
    pos.rem_euclid(TRACK_LEN as i16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teammates_are_opposite() {
        for side in Side::ALL {
            assert_eq!(side.teammate().teammate(), side);
            assert_ne!(side.teammate(), side);
        }
        assert_eq!(Side::Blue.teammate(), Side::Green);
        assert_eq!(Side::Yellow.teammate(), Side::Red);
    }

    #[test]
    fn exits_and_entrances_per_side() {
        assert_eq!(exit_location(Side::Green), Location::Track(4));
        assert_eq!(exit_location(Side::Red), Location::Track(19));
        assert_eq!(exit_location(Side::Blue), Location::Track(34));
        assert_eq!(exit_location(Side::Yellow), Location::Track(49));
        assert_eq!(safety_entrance(Side::Green), 2);
        assert_eq!(safety_entrance(Side::Yellow), 47);
    }

    #[test]
    fn eight_slides_two_per_edge() {
        let all: Vec<SlideSpec> = slides().collect();
        assert_eq!(all.len(), 8);
        assert_eq!(all.iter().filter(|s| s.length == 4).count(), 4);
        assert_eq!(all.iter().filter(|s| s.length == 5).count(), 4);
        let first = slide_at(1).unwrap();
        assert_eq!((first.owner, first.exit), (Side::Green, 4));
        let long = slide_at(54).unwrap();
        assert_eq!((long.owner, long.exit), (Side::Yellow, 58));
    }

    #[test]
    fn own_slides_are_skipped() {
        assert!(slide_for(16, Side::Red).is_none());
        assert_eq!(slide_for(16, Side::Blue).map(|s| s.exit), Some(19));
        assert!(slide_for(17, Side::Blue).is_none());
    }

    #[test]
    fn side_parsing() {
        assert_eq!("b".parse::<Side>().unwrap(), Side::Blue);
        assert_eq!("Yellow".parse::<Side>().unwrap(), Side::Yellow);
        assert!("x".parse::<Side>().is_err());
    }
}
