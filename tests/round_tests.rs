//! Round resolution tests.
//!
//! These tests seat tables with fixed hands and check how single rounds
//! and wars resolve through the public `Game` interface.

use std::cell::RefCell;
use std::rc::Rc;

use war_engine::cards::{Card, Rank, Suit};
use war_engine::core::{GameConfig, PlayerId};
use war_engine::events::{CardPlayed, PlayerEliminated};
use war_engine::game::{Game, SetupRequest};
use war_engine::rules::{GameResult, RoundPhase};

fn c(rank: Rank) -> Card {
    Card::new(rank, Suit::Clubs)
}

/// Hand with `top` played first and `below` underneath (last played last).
fn hand(below: &[Rank], top: Rank) -> Vec<Card> {
    below.iter().copied().chain(std::iter::once(top)).map(c).collect()
}

fn table(hands: Vec<Vec<Card>>) -> Game {
    let setup = SetupRequest::with_default_players(hands.len()).unwrap();
    Game::with_hands(&setup, hands, GameConfig::default().with_seed(5)).unwrap()
}

fn p(index: u8) -> PlayerId {
    PlayerId::new(index)
}

/// Test that a 2 beats an Ace when both are on the table.
#[test]
fn test_two_beats_ace() {
    let mut game = table(vec![hand(&[Rank::Three], Rank::Ace), hand(&[Rank::Four], Rank::Two)]);

    let report = game.play_round().unwrap();

    assert_eq!(report.winner, Some(p(1)));
    assert_eq!(report.steps[0].highest_value, 2);
    assert_eq!(game.players()[1].discard_pile().len(), 2);
    assert_eq!(game.players()[0].card_count(), 1);
}

/// Test that a tie starts a war between the tied players only.
#[test]
fn test_tie_wars_between_tied_players() {
    let mut game = table(vec![
        hand(&[Rank::Ace, Rank::Four, Rank::Four, Rank::Four], Rank::King),
        hand(&[Rank::Eight, Rank::Five, Rank::Five, Rank::Five], Rank::King),
        hand(&[Rank::Three, Rank::Three, Rank::Three, Rank::Three], Rank::Queen),
    ]);

    let report = game.play_round().unwrap();

    assert_eq!(report.wars(), 1);
    assert_eq!(report.steps[0].winners, vec![p(0), p(1)]);
    let war_players: Vec<PlayerId> = report.steps[1].plays.iter().map(|(player, _)| *player).collect();
    assert_eq!(war_players, vec![p(0), p(1)]);

    assert_eq!(report.winner, Some(p(0)));
    assert!(game.players()[0].discard_pile().iter().any(|card| card.rank() == Rank::Queen));
    assert_eq!(game.players()[2].card_count(), 4);
}

/// Test that a tied player with two cards caps the war at one face-down card.
#[test]
fn test_war_threshold_caps_at_available_cards() {
    let mut game = table(vec![
        hand(&[Rank::Ten, Rank::Six], Rank::King),
        hand(&[Rank::Two, Rank::Two, Rank::Five, Rank::Seven, Rank::Nine], Rank::King),
    ]);

    let report = game.play_round().unwrap();

    assert_eq!(report.face_down_by(p(0)), 1);
    assert_eq!(report.face_down_by(p(1)), 1);
    assert_eq!(report.winner, Some(p(0)));
    assert_eq!(report.spoils, 6);
}

/// Test that a single winner takes exactly one card from every active player.
#[test]
fn test_single_winner_spoils_transfer() {
    let below = [Rank::Three, Rank::Three];
    let mut game = table(vec![
        hand(&below, Rank::Six),
        hand(&below, Rank::Nine),
        hand(&below, Rank::Jack),
        hand(&below, Rank::Seven),
    ]);

    let report = game.play_round().unwrap();

    assert_eq!(report.winner, Some(p(2)));
    assert_eq!(report.spoils, 4);
    assert_eq!(game.players()[2].discard_pile().len(), 4);
    for loser in [0, 1, 3] {
        assert_eq!(game.players()[loser].draw_pile().len(), 2);
        assert!(game.players()[loser].discard_pile().is_empty());
    }
}

/// Test that the order in which players play does not change the outcome.
#[test]
fn test_play_order_independent() {
    let hands = vec![
        hand(&[Rank::Two, Rank::Nine, Rank::Three, Rank::Four], Rank::Jack),
        hand(&[Rank::Ace, Rank::Ten, Rank::Five, Rank::Six], Rank::Jack),
        hand(&[Rank::Seven], Rank::Four),
    ];

    let mut forward = table(hands.clone());
    assert_eq!(forward.play_card(p(0)).unwrap(), None);
    assert_eq!(forward.play_card(p(1)).unwrap(), None);
    let a = forward.play_card(p(2)).unwrap().unwrap();

    let mut backward = table(hands);
    assert_eq!(backward.play_card(p(2)).unwrap(), None);
    assert_eq!(backward.play_card(p(0)).unwrap(), None);
    let b = backward.play_card(p(1)).unwrap().unwrap();

    assert_eq!(a, b);
}

/// Test that a second play in the same round changes nothing.
#[test]
fn test_double_play_is_noop() {
    let mut game = table(vec![hand(&[Rank::Three], Rank::Five), hand(&[Rank::Four], Rank::Six)]);

    assert_eq!(game.play_card(p(0)).unwrap(), None);
    assert_eq!(game.play_card(p(0)).unwrap(), None);

    assert_eq!(game.players()[0].card_count(), 1);
    assert_eq!(game.engine().has_yet_to_play().as_slice(), &[p(1)]);
    assert_eq!(game.phase(), RoundPhase::AwaitingPlays);
}

/// Test that a tied player out of cards forfeits the war to the other.
#[test]
fn test_exhausted_tied_player_forfeits() {
    let mut game = table(vec![vec![c(Rank::King)], hand(&[Rank::Three, Rank::Three], Rank::King)]);

    let report = game.play_round().unwrap();

    assert_eq!(report.winner, Some(p(1)));
    assert_eq!(report.eliminated, vec![p(0)]);
    assert_eq!(game.result(), Some(GameResult::Winner(p(1))));
    assert_eq!(game.players()[1].card_count(), 4);
}

/// Test that spoils go back to the table when every tied player is exhausted.
#[test]
fn test_exhausted_tie_returns_spoils() {
    let mut game = table(vec![
        vec![c(Rank::Queen)],
        vec![c(Rank::Queen)],
        hand(&[Rank::Eight], Rank::Nine),
    ]);

    let report = game.play_round().unwrap();

    assert_eq!(report.winner, None);
    assert_eq!(report.eliminated, vec![p(0), p(1)]);
    assert_eq!(game.result(), Some(GameResult::Winner(p(2))));
    assert_eq!(game.players()[2].card_count(), 4);
    assert_eq!(game.cards_in_play(), game.dealt_cards());
}

/// Test that the last two players exhausting each other is a draw.
#[test]
fn test_mutual_exhaustion_is_draw() {
    let mut game = table(vec![vec![c(Rank::Seven)], vec![c(Rank::Seven)]]);

    let report = game.play_round().unwrap();

    assert_eq!(report.winner, None);
    assert_eq!(game.result(), Some(GameResult::Draw));
    assert!(game.players().iter().all(|player| !player.is_active()));
    assert_eq!(game.cards_in_play(), 2);
}

/// Test that play events cover face-up war cards but not face-down ones.
#[test]
fn test_play_events_during_war() {
    let mut game = table(vec![
        hand(&[Rank::Ace, Rank::Four, Rank::Four, Rank::Four], Rank::King),
        hand(&[Rank::Eight, Rank::Five, Rank::Five, Rank::Five], Rank::King),
    ]);

    let seen = Rc::new(RefCell::new(Vec::new()));
    for player in [p(0), p(1)] {
        let seen = Rc::clone(&seen);
        game.subscribe_played(player, move |e: &CardPlayed| seen.borrow_mut().push((e.player, e.card.rank())));
    }

    game.play_round().unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![(p(0), Rank::King), (p(1), Rank::King), (p(0), Rank::Ace), (p(1), Rank::Eight)]
    );
}

/// Test that elimination is announced once per player.
#[test]
fn test_elimination_event_fires_once() {
    let mut game = table(vec![
        hand(&[Rank::Two, Rank::Two], Rank::Ace),
        vec![c(Rank::Three)],
        hand(&[Rank::Two], Rank::Four),
    ]);

    let fired = Rc::new(RefCell::new(Vec::new()));
    for player in [p(0), p(1), p(2)] {
        let fired = Rc::clone(&fired);
        game.subscribe_eliminated(player, move |e: &PlayerEliminated| fired.borrow_mut().push(e.player));
    }

    let report = game.play_round().unwrap();
    assert_eq!(report.eliminated, vec![p(1)]);

    game.play_round().unwrap();
    assert_eq!(fired.borrow().iter().filter(|id| **id == p(1)).count(), 1);
}

/// Test that a player playing their last card stays in if they win it back.
#[test]
fn test_last_card_winner_stays_active() {
    let mut game = table(vec![
        vec![c(Rank::Ace)],
        hand(&[Rank::Three], Rank::Five),
        hand(&[Rank::Three], Rank::Six),
    ]);

    let report = game.play_round().unwrap();

    assert_eq!(report.winner, Some(p(0)));
    assert!(report.eliminated.is_empty());
    assert!(game.players()[0].is_active());
    assert_eq!(game.players()[0].card_count(), 3);
    assert_eq!(game.round(), 2);
}
