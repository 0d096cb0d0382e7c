//! Whole-game tests.
//!
//! These tests verify dealing, setup validation, turn order, the play
//! scheduler and that games run to completion for every table size.

use std::cell::RefCell;
use std::rc::Rc;

use war_engine::cards::{Card, Rank, Suit, DECK_SIZE};
use war_engine::core::{GameConfig, PlayerId, WarError, MAX_PLAYERS, MIN_PLAYERS};
use war_engine::events::PlayerEliminated;
use war_engine::game::{Game, GameStatus, PlayerSetup, SetupRequest};
use war_engine::rules::{GameResult, RoundReport};

fn c(rank: Rank) -> Card {
    Card::new(rank, Suit::Hearts)
}

fn new_game(players: usize, seed: u64) -> Game {
    let setup = SetupRequest::with_default_players(players).unwrap();
    Game::new(&setup, GameConfig::default().with_seed(seed)).unwrap()
}

/// Test that dealing gives every player the same number of cards.
#[test]
fn test_dealing_is_even() {
    for players in MIN_PLAYERS..=MAX_PLAYERS {
        let mut game = new_game(players, 17);
        game.start().unwrap();

        let expected = DECK_SIZE / players;
        for player in game.players() {
            assert_eq!(player.draw_pile().len(), expected, "{players} players");
            assert!(player.discard_pile().is_empty());
        }
        assert_eq!(game.dealt_cards(), DECK_SIZE - DECK_SIZE % players);
        assert_eq!(game.cards_in_play(), game.dealt_cards());
    }
}

/// Test that every table size plays to a single winner holding every card.
#[test]
fn test_games_converge() {
    for players in MIN_PLAYERS..=MAX_PLAYERS {
        for seed in 0..3 {
            let mut game = new_game(players, seed);
            let result = game.play_until_complete().unwrap();

            match result {
                Some(GameResult::Winner(winner)) => {
                    for player in game.players() {
                        if player.id() == winner {
                            assert!(player.is_active());
                            assert_eq!(player.card_count(), game.dealt_cards());
                        } else {
                            assert!(!player.is_active());
                            assert_eq!(player.card_count(), 0);
                        }
                    }
                }
                Some(GameResult::Draw) => {
                    assert!(game.players().iter().all(|player| !player.is_active()));
                }
                None => panic!("{players} players, seed {seed}: no result"),
            }
            assert_eq!(game.cards_in_play(), game.dealt_cards());
        }
    }
}

/// Test that no card is created or lost by any round.
#[test]
fn test_card_conservation_every_round() {
    let mut game = new_game(5, 99);
    game.start().unwrap();

    while game.result().is_none() {
        let report = game.play_round().unwrap();
        assert_eq!(game.cards_in_play(), game.dealt_cards(), "round {}", report.round);
        assert_eq!(game.snapshot().total_cards(), game.dealt_cards());
    }
}

/// Test that the same seed replays the same game.
#[test]
fn test_same_seed_same_game() {
    fn play(seed: u64) -> (Vec<RoundReport>, Option<GameResult>) {
        let mut game = new_game(4, seed);
        game.start().unwrap();
        let mut reports = Vec::new();
        while game.result().is_none() {
            reports.push(game.play_round().unwrap());
        }
        (reports, game.result())
    }

    let (first, a) = play(2024);
    let (second, b) = play(2024);
    assert_eq!(first, second);
    assert_eq!(a, b);

    let other = new_game(4, 2025);
    assert_eq!(other.seed(), 2025);
}

/// Test that elimination events reach subscribers exactly once per player.
#[test]
fn test_eliminations_reported() {
    let players = 6;
    let mut game = new_game(players, 3);

    let fired = Rc::new(RefCell::new(Vec::new()));
    for index in 0..players {
        let fired = Rc::clone(&fired);
        game.subscribe_eliminated(PlayerId::new(index as u8), move |e: &PlayerEliminated| {
            fired.borrow_mut().push(e.player)
        });
    }

    let result = game.play_until_complete().unwrap().unwrap();

    let mut fired = fired.borrow().clone();
    fired.sort();
    let before = fired.len();
    fired.dedup();
    assert_eq!(fired.len(), before, "an elimination fired twice");

    let expected = match result {
        GameResult::Winner(_) => players - 1,
        GameResult::Draw => players,
    };
    assert_eq!(fired.len(), expected);
}

/// Test that an unsubscribed callback stops hearing plays.
#[test]
fn test_unsubscribe_played() {
    let mut game = new_game(2, 8);
    game.start().unwrap();

    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    let id = game.subscribe_played(PlayerId::new(0), move |_| *counter.borrow_mut() += 1);

    game.play_card(PlayerId::new(0)).unwrap();
    assert_eq!(*count.borrow(), 1);

    assert!(game.unsubscribe_played(id));
    assert!(!game.unsubscribe_played(id));
    game.play_card(PlayerId::new(1)).unwrap();
    game.play_round().unwrap();
    assert_eq!(*count.borrow(), 1);
}

/// Test that plays are offered only after the debounce delay.
#[test]
fn test_play_offered_after_debounce() {
    let setup = SetupRequest::with_default_players(3).unwrap();
    let config = GameConfig::default().with_seed(4).with_play_debounce_ms(100);
    let mut game = Game::new(&setup, config).unwrap();
    game.start().unwrap();

    assert!(game.advance_clock(99).is_empty());
    assert!(!game.is_play_offered(PlayerId::new(0)));

    let offered = game.advance_clock(1);
    assert_eq!(offered, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    assert!(game.snapshot().players.iter().all(|view| view.play_offered));

    game.play_card(PlayerId::new(1)).unwrap();
    assert!(!game.is_play_offered(PlayerId::new(1)));
    assert!(game.is_play_offered(PlayerId::new(0)));
    assert_eq!(game.snapshot().now_ms, 100);
}

/// Test that a new round re-schedules offers for the remaining players.
#[test]
fn test_offers_reset_each_round() {
    let setup = SetupRequest::with_default_players(2).unwrap();
    let hands = vec![vec![c(Rank::Two), c(Rank::Nine)], vec![c(Rank::Three), c(Rank::Four)]];
    let config = GameConfig::default().with_seed(12).with_play_debounce_ms(100);
    let mut game = Game::with_hands(&setup, hands, config).unwrap();
    assert_eq!(game.advance_clock(500).len(), 2);

    game.play_round().unwrap();
    assert_eq!(game.result(), None);
    assert!(!game.is_play_offered(PlayerId::new(0)));
    assert!(game.advance_clock(99).is_empty());
    assert_eq!(game.advance_clock(1), vec![PlayerId::new(0), PlayerId::new(1)]);
}

/// Test that setup failures block the game from being created.
#[test]
fn test_setup_validation() {
    let one = SetupRequest::new().with_player(PlayerSetup::new("Solo"));
    assert_eq!(
        Game::new(&one, GameConfig::default()).unwrap_err(),
        WarError::InvalidPlayerCount { input: "1".into() }
    );

    let twins = SetupRequest::new()
        .with_player(PlayerSetup::new("Kim"))
        .with_player(PlayerSetup::new("Kim"));
    assert!(matches!(
        Game::new(&twins, GameConfig::default()),
        Err(WarError::DuplicatePlayerName { .. })
    ));

    let setup = SetupRequest::with_default_players(2).unwrap();
    let bad = GameConfig::default().with_war_cards(0);
    assert!(matches!(Game::new(&setup, bad), Err(WarError::InvalidConfig { .. })));
}

/// Test that names and human flags reach the players.
#[test]
fn test_roster_from_setup() {
    let setup = SetupRequest::new()
        .with_player(PlayerSetup::new("Ada").with_human(true))
        .with_player(PlayerSetup::new(""))
        .with_player(PlayerSetup::new("Cy"));
    let game = Game::new(&setup, GameConfig::default().with_seed(1)).unwrap();

    let names: Vec<&str> = game.players().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Ada", "Player 2", "Cy"]);
    assert!(game.players()[0].is_human());
    assert!(!game.players()[2].is_human());
    assert_eq!(game.player(PlayerId::new(1)).unwrap().id(), PlayerId::new(1));
    assert!(game.player(PlayerId::new(3)).is_err());
}

/// Test that the turn marker moves to a live player after each round.
#[test]
fn test_turn_advances_each_round() {
    let mut game = new_game(3, 21);
    game.start().unwrap();

    for _ in 0..20 {
        if game.result().is_some() {
            break;
        }
        game.play_round().unwrap();
        let turn = game.whose_turn().unwrap();
        if game.result().is_none() {
            assert!(game.player(turn).unwrap().is_active());
        }
    }
}

/// Test the status lifecycle and that a finished game refuses plays.
#[test]
fn test_status_lifecycle() {
    let mut game = new_game(2, 6);
    assert_eq!(game.status(), GameStatus::NotStarted);
    assert!(matches!(game.play_round(), Err(WarError::GameNotStarted)));

    game.start().unwrap();
    assert!(game.is_started());
    assert_eq!(game.status(), GameStatus::InProgress);

    let result = game.play_until_complete().unwrap().unwrap();
    assert_eq!(game.status(), GameStatus::Over(result));
    assert!(matches!(game.play_round(), Err(WarError::GameOver)));
    assert!(game.last_report().is_some());
}

/// Test that the configured round cap stops auto-play without ending the game.
#[test]
fn test_round_cap() {
    let setup = SetupRequest::with_default_players(2).unwrap();
    let hands = vec![
        vec![c(Rank::Two), c(Rank::Five), c(Rank::Nine)],
        vec![c(Rank::Three), c(Rank::Six), c(Rank::Four)],
    ];
    let config = GameConfig::default().with_seed(1).with_max_rounds(1);
    let mut game = Game::with_hands(&setup, hands, config).unwrap();

    assert_eq!(game.play_until_complete().unwrap(), None);
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.round(), 2);
    assert_eq!(game.last_report().map(|r| r.round), Some(1));

    assert_eq!(game.play_until_complete().unwrap(), None);
    assert_eq!(game.round(), 3);
}
