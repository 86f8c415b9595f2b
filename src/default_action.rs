//! Completing a partial choice when only one completion is left.

use crate::board::{is_friendly, Side};
use crate::cards::Card;
use crate::play::{Play, Targets};
use crate::state::{GameState, Location, PawnId};

/// The unambiguous rest of a play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultAction {
    /// Targets still to be added to the chosen ones.
    pub remaining: Targets,
    /// The full play, when it is fully determined.
    pub play: Option<Play>,
    /// For a 10: the direction, if every completion agrees on it.
    pub ten_backward: Option<bool>,
    /// Plain-language description, e.g. "moving pawn B1 from start".
    pub rationale: String,
}

/// Work out whether `chosen` plus `card` leaves exactly one way to finish.
///
/// `plays` is the list from [`crate::enumerate_plays`]. Plays of `card` that
/// agree with `chosen` are grouped by what is left to choose; a single group
/// is the default. With nothing chosen yet for an 11 or a Sorry, a pawn that
/// every such play uses is returned as a forced first pick.
///
/// ```
/// use sorry_rs::board::Side;
/// use sorry_rs::cards::Card;
/// use sorry_rs::hand::Hand;
/// use sorry_rs::play::Targets;
/// use sorry_rs::rules::Rules;
/// use sorry_rs::state::GameState;
/// use sorry_rs::{enumerate_plays, resolve_default};
///
/// let state = GameState::new(&[Side::Blue, Side::Red]).unwrap();
/// let hand: Hand = "1".parse().unwrap();
/// let plays = enumerate_plays(&hand, &state, Side::Blue, &Rules::default());
/// let chosen = Targets::Pawns(vec!["B3".parse().unwrap()]);
/// let action = resolve_default(Card::One, &chosen, &plays, &state, Side::Blue, false).unwrap();
/// assert_eq!(action.rationale, "moving pawn B3 from start");
/// assert!(action.play.is_some());
/// ```
pub fn resolve_default(
    card: Card,
    chosen: &Targets,
    plays: &[Play],
    state: &GameState,
    side: Side,
    teams: bool,
) -> Option<DefaultAction> {
    let candidates: Vec<&Play> =
        plays.iter().filter(|p| p.card == card && consistent(chosen, &p.targets)).collect();
    if candidates.is_empty() {
        return None;
    }

    // an 11 started on a friendly pawn defaults to moving it
    if card == Card::Eleven {
        if let Targets::Pawns(ps) = chosen {
            if let [pawn] = ps.as_slice() {
                let single = Play::move_pawn(Card::Eleven, *pawn);
                if is_friendly(side, pawn.side(), teams) && candidates.contains(&&single) {
                    return Some(complete(chosen, &[&single], state));
                }
            }
        }
    }

    let mut groups: Vec<(Targets, Vec<&Play>)> = Vec::new();
    for play in candidates.iter().copied() {
        let key = remaining(chosen, &play.targets);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(play),
            None => groups.push((key, vec![play])),
        }
    }
    if let [(_, members)] = groups.as_slice() {
        return Some(complete(chosen, members, state));
    }

    if chosen.is_empty() && matches!(card, Card::Eleven | Card::Sorry) {
        return forced_first_pick(card, &candidates, state);
    }
    None
}

fn chosen_moves(targets: &Targets) -> Vec<(PawnId, u8)> {
    match targets {
        Targets::Split(moves) => moves.clone(),
        Targets::Pawns(ps) => ps.iter().map(|p| (*p, 7)).collect(),
        Targets::None | Targets::Discard => Vec::new(),
    }
}

fn consistent(chosen: &Targets, candidate: &Targets) -> bool {
    match chosen {
        _ if chosen.is_empty() => true,
        Targets::Split(prefix) => chosen_moves(candidate).starts_with(prefix),
        _ => {
            let have = candidate.pawns();
            chosen.pawns().iter().all(|p| have.contains(p))
        }
    }
}

fn remaining(chosen: &Targets, candidate: &Targets) -> Targets {
    match (chosen, candidate) {
        (_, Targets::Discard) => Targets::Discard,
        (_, Targets::None) => Targets::None,
        (Targets::Split(prefix), _) => Targets::Split(chosen_moves(candidate)[prefix.len()..].to_vec()),
        (_, Targets::Split(moves)) => Targets::Split(moves.clone()),
        (_, Targets::Pawns(ps)) => {
            let picked = chosen.pawns();
            let mut rest: Vec<PawnId> = ps.iter().copied().filter(|p| !picked.contains(p)).collect();
            rest.sort_unstable();
            Targets::Pawns(rest)
        }
    }
}

fn complete(chosen: &Targets, members: &[&Play], state: &GameState) -> DefaultAction {
    let first = members[0];
    let unanimous = members.iter().all(|p| *p == first);
    let ten_backward = if first.card != Card::Ten {
        None
    } else if members.iter().all(|p| p.backward == first.backward) {
        Some(first.backward)
    } else {
        None
    };
    let rationale = match (unanimous, first.card) {
        (true, _) => describe(first, state),
        (false, Card::Ten) => first.targets.pawns().iter().map(|p| format!("moving pawn {p}")).collect(),
        (false, _) => String::new(),
    };
    DefaultAction {
        remaining: remaining(chosen, &first.targets),
        play: unanimous.then(|| first.clone()),
        ten_backward,
        rationale,
    }
}

fn forced_first_pick(card: Card, candidates: &[&Play], state: &GameState) -> Option<DefaultAction> {
    let mut common = candidates.first()?.targets.pawns();
    for play in candidates {
        let pawns = play.targets.pawns();
        common.retain(|p| pawns.contains(p));
    }
    let pawn = *common.first()?;
    let rationale = match card {
        Card::Sorry if state.location(pawn) == Location::Start => format!(
            "putting pawn {pawn} in the place occupied by some other pawn and sending that other pawn back to its start"
        ),
        Card::Sorry => format!(
            "putting some pawn in the place occupied by {pawn} and sending pawn {pawn} back to its start"
        ),
        _ => format!("moving or swapping pawn {pawn}"),
    };
    Some(DefaultAction { remaining: Targets::Pawns(vec![pawn]), play: None, ten_backward: None, rationale })
}

fn describe(play: &Play, state: &GameState) -> String {
    let step = |pawn: PawnId, distance: i8| {
        if state.location(pawn) == Location::Start {
            format!("moving pawn {pawn} from start")
        } else if distance < 0 {
            format!("moving pawn {pawn} backward by {}", distance.unsigned_abs())
        } else {
            format!("moving pawn {pawn} forward by {distance}")
        }
    };
    match (&play.targets, play.card) {
        (Targets::Discard, card) => format!("discarding this {card}"),
        (Targets::None, _) => "drawing a card without moving any pawn".to_string(),
        (Targets::Split(moves), _) => {
            moves.iter().map(|(p, d)| step(*p, *d as i8)).collect::<Vec<_>>().join(" then ")
        }
        (Targets::Pawns(ps), Card::Eleven) if ps.len() == 2 => {
            format!("swapping the locations of pawns {} and {}", ps[0], ps[1])
        }
        (Targets::Pawns(ps), Card::Sorry) if ps.len() == 2 => {
            let (from_start, victim) =
                if state.location(ps[0]) == Location::Start { (ps[0], ps[1]) } else { (ps[1], ps[0]) };
            format!(
                "putting pawn {from_start} in the place occupied by {victim} and sending pawn {victim} back to its start"
            )
        }
        (Targets::Pawns(ps), _) => match (ps.first(), play.distance()) {
            (Some(p), Some(d)) => step(*p, d),
            _ => String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::enumerate_plays;
    use crate::hand::Hand;
    use crate::rules::Rules;

    fn pawn(s: &str) -> PawnId {
        s.parse().unwrap()
    }

    fn two_sides() -> GameState {
        GameState::new(&[Side::Blue, Side::Red]).unwrap()
    }

    #[test]
    fn ambiguous_choices_have_no_default() {
        let st = two_sides();
        let hand: Hand = "1".parse().unwrap();
        let plays = enumerate_plays(&hand, &st, Side::Blue, &Rules::default());
        assert!(resolve_default(Card::One, &Targets::None, &plays, &st, Side::Blue, false).is_none());
    }

    #[test]
    fn ten_direction_is_reported_only_when_unanimous() {
        let mut st = two_sides();
        st.place(pawn("B1"), Location::Track(40)).unwrap();
        let hand: Hand = "10".parse().unwrap();
        let plays = enumerate_plays(&hand, &st, Side::Blue, &Rules::default());
        assert_eq!(plays.len(), 2);
        let action = resolve_default(Card::Ten, &Targets::None, &plays, &st, Side::Blue, false).unwrap();
        assert_eq!(action.remaining, Targets::Pawns(vec![pawn("B1")]));
        assert_eq!(action.ten_backward, None);
        assert_eq!(action.play, None);
        assert_eq!(action.rationale, "moving pawn B1");
    }

    #[test]
    fn discard_is_a_default() {
        let st = two_sides();
        let hand: Hand = "7".parse().unwrap();
        let plays = enumerate_plays(&hand, &st, Side::Blue, &Rules::default());
        let action = resolve_default(Card::Seven, &Targets::None, &plays, &st, Side::Blue, false).unwrap();
        assert_eq!(action.remaining, Targets::Discard);
        assert_eq!(action.rationale, "discarding this 7");
    }

    #[test]
    fn sorry_with_one_victim_forces_it() {
        let mut st = two_sides();
        st.place(pawn("R1"), Location::Track(20)).unwrap();
        let hand: Hand = "Sorry".parse().unwrap();
        let plays = enumerate_plays(&hand, &st, Side::Blue, &Rules::default());
        // four Blue pawns at Start, one victim
        assert_eq!(plays.len(), 4);
        let action = resolve_default(Card::Sorry, &Targets::None, &plays, &st, Side::Blue, false).unwrap();
        assert_eq!(action.remaining, Targets::Pawns(vec![pawn("R1")]));
        assert!(action.play.is_none());
        assert!(action.rationale.contains("occupied by R1"));

        let chosen = Targets::Pawns(vec![pawn("B2")]);
        let action = resolve_default(Card::Sorry, &chosen, &plays, &st, Side::Blue, false).unwrap();
        assert_eq!(action.remaining, Targets::Pawns(vec![pawn("R1")]));
        assert_eq!(
            action.rationale,
            "putting pawn B2 in the place occupied by R1 and sending pawn R1 back to its start"
        );
    }

    #[test]
    fn eleven_on_a_friendly_pawn_moves_it() {
        let mut st = two_sides();
        st.place(pawn("B1"), Location::Track(40)).unwrap();
        st.place(pawn("R1"), Location::Track(20)).unwrap();
        let hand: Hand = "11".parse().unwrap();
        let plays = enumerate_plays(&hand, &st, Side::Blue, &Rules::default());
        let chosen = Targets::Pawns(vec![pawn("B1")]);
        let action = resolve_default(Card::Eleven, &chosen, &plays, &st, Side::Blue, false).unwrap();
        assert_eq!(action.remaining, Targets::Pawns(vec![]));
        assert_eq!(action.rationale, "moving pawn B1 forward by 11");
        let chosen = Targets::Pawns(vec![pawn("R1")]);
        let action = resolve_default(Card::Eleven, &chosen, &plays, &st, Side::Blue, false).unwrap();
        assert_eq!(action.remaining, Targets::Pawns(vec![pawn("B1")]));
        assert_eq!(action.rationale, "swapping the locations of pawns B1 and R1");
    }

    #[test]
    fn seven_prefix_narrows_the_split() {
        let mut st = two_sides();
        st.place(pawn("B1"), Location::Track(40)).unwrap();
        st.place(pawn("B2"), Location::Track(50)).unwrap();
        let hand: Hand = "7".parse().unwrap();
        let plays = enumerate_plays(&hand, &st, Side::Blue, &Rules::default());
        let chosen = Targets::Split(vec![(pawn("B1"), 3)]);
        let action = resolve_default(Card::Seven, &chosen, &plays, &st, Side::Blue, false).unwrap();
        assert_eq!(action.remaining, Targets::Split(vec![(pawn("B2"), 4)]));
        assert_eq!(action.rationale, "moving pawn B1 forward by 3 then moving pawn B2 forward by 4");
    }
}
