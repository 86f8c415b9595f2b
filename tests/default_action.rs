use sorry_rs::board::Side;
use sorry_rs::cards::Card;
use sorry_rs::hand::Hand;
use sorry_rs::play::{Play, Targets};
use sorry_rs::rules::Rules;
use sorry_rs::state::{GameState, Location, PawnId};
use sorry_rs::{enumerate_plays, resolve_default};

fn pawn(s: &str) -> PawnId {
    s.parse().unwrap()
}

fn board(places: &[(&str, Location)]) -> GameState {
    let mut st = GameState::new(&[Side::Blue, Side::Red]).unwrap();
    for (p, loc) in places {
        st.place(pawn(p), *loc).unwrap();
    }
    st
}

fn plays_for(cards: &str, st: &GameState) -> Vec<Play> {
    let hand: Hand = cards.parse().unwrap();
    enumerate_plays(&hand, st, Side::Blue, &Rules::default())
}

#[test]
fn single_movable_pawn_is_fully_determined() {
    let st = board(&[("B1", Location::Track(40))]);
    let plays = plays_for("12", &st);
    let action = resolve_default(Card::Twelve, &Targets::None, &plays, &st, Side::Blue, false).unwrap();
    assert_eq!(action.play, Some(Play::move_pawn(Card::Twelve, pawn("B1"))));
    assert_eq!(action.remaining, Targets::Pawns(vec![pawn("B1")]));
    assert_eq!(action.rationale, "moving pawn B1 forward by 12");
}

#[test]
fn four_is_described_as_backward() {
    let st = board(&[("B1", Location::Track(40))]);
    let plays = plays_for("4", &st);
    let action = resolve_default(Card::Four, &Targets::None, &plays, &st, Side::Blue, false).unwrap();
    assert_eq!(action.rationale, "moving pawn B1 backward by 4");
}

#[test]
fn card_without_plays_has_no_default() {
    let st = board(&[("B1", Location::Track(40))]);
    let plays = plays_for("12", &st);
    assert!(resolve_default(Card::Five, &Targets::None, &plays, &st, Side::Blue, false).is_none());
    // a pawn that is not part of any play
    let chosen = Targets::Pawns(vec![pawn("B2")]);
    assert!(resolve_default(Card::Twelve, &chosen, &plays, &st, Side::Blue, false).is_none());
}

#[test]
fn draw_only_two_is_described() {
    let st = board(&[
        ("B1", Location::SafetyZone(Side::Blue, 5)),
        ("B2", Location::Home),
        ("B3", Location::Home),
        ("B4", Location::Home),
    ]);
    let plays = plays_for("2 3", &st);
    let action = resolve_default(Card::Two, &Targets::None, &plays, &st, Side::Blue, false).unwrap();
    assert_eq!(action.remaining, Targets::None);
    assert_eq!(action.play, Some(Play::draw_only()));
    assert_eq!(action.rationale, "drawing a card without moving any pawn");
}

#[test]
fn sorry_forces_the_only_pawn_at_start() {
    let st = board(&[
        ("B2", Location::Track(40)),
        ("B3", Location::Track(41)),
        ("B4", Location::Home),
        ("R1", Location::Track(20)),
        ("R2", Location::Track(25)),
    ]);
    let plays = plays_for("Sorry", &st);
    assert_eq!(plays.len(), 2);
    let action = resolve_default(Card::Sorry, &Targets::None, &plays, &st, Side::Blue, false).unwrap();
    assert_eq!(action.remaining, Targets::Pawns(vec![pawn("B1")]));
    assert!(action.play.is_none());
    assert_eq!(
        action.rationale,
        "putting pawn B1 in the place occupied by some other pawn and sending that other pawn back to its start"
    );
}

#[test]
fn eleven_forces_the_only_pawn_out() {
    let st = board(&[("B1", Location::Track(40)), ("R1", Location::Track(20)), ("R2", Location::Track(25))]);
    let plays = plays_for("11", &st);
    assert_eq!(plays.len(), 3);
    let action = resolve_default(Card::Eleven, &Targets::None, &plays, &st, Side::Blue, false).unwrap();
    assert_eq!(action.remaining, Targets::Pawns(vec![pawn("B1")]));
    assert_eq!(action.rationale, "moving or swapping pawn B1");
}

#[test]
fn discarding_keeps_an_eleven_open() {
    // B1 is too close to Home for 11, so swapping competes with discarding
    let st = board(&[
        ("B1", Location::Track(29)),
        ("B2", Location::Home),
        ("B3", Location::Home),
        ("B4", Location::Home),
        ("R1", Location::Track(20)),
        ("R2", Location::Track(25)),
    ]);
    let plays = plays_for("11", &st);
    assert!(plays.contains(&Play::discard(Card::Eleven)));
    assert!(resolve_default(Card::Eleven, &Targets::None, &plays, &st, Side::Blue, false).is_none());
}
