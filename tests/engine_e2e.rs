//! End-to-end tests for the move/undo protocol
//!
//! These drive the controller the way a presentation layer would and verify
//! that every committed move is invertible exactly: after undo, the field,
//! reserve, and active slot are equal by id, rank, suit, position, and
//! orientation to their pre-move snapshot.

use cardfield::core::{Card, CardId, Position, Rank, Suit};
use cardfield::game::{GameController, GameState, PlayerIntent};
use cardfield::loader::{CardSpec, LevelConfig, LevelGenerator, LevelLoader};
use similar_asserts::assert_eq;

/// Comparable view of one card
#[derive(Debug, Clone, PartialEq)]
struct CardSnap {
    id: u32,
    rank: Rank,
    suit: Suit,
    position: (f32, f32),
    face_up: bool,
}

/// Comparable view of the whole table
#[derive(Debug, Clone, PartialEq)]
struct TableSnap {
    field: Vec<CardSnap>,
    reserve: Vec<CardSnap>,
    active: Option<CardSnap>,
}

fn snap_card(card: &Card) -> CardSnap {
    CardSnap {
        id: card.id.as_u32(),
        rank: card.rank,
        suit: card.suit,
        position: (card.position.x, card.position.y),
        face_up: card.face_up,
    }
}

fn snap(state: &GameState) -> TableSnap {
    TableSnap {
        field: state
            .field()
            .iter()
            .map(|id| snap_card(state.lookup(*id).unwrap()))
            .collect(),
        reserve: state
            .reserve()
            .iter()
            .map(|id| snap_card(state.lookup(*id).unwrap()))
            .collect(),
        active: state.active_card().map(snap_card),
    }
}

fn spec(rank: Rank, suit: Suit, x: f32, y: f32) -> CardSpec {
    CardSpec::new(rank, suit, Position::new(x, y))
}

/// field: rank 5 @ (10,10); reserve: [rank 2, rank 9]; active: rank 6
///
/// The generator deals the reserve in config order and opens with its top
/// card, so the config reserve lists [2, 9, 6].
fn scenario_table() -> GameController {
    let config = LevelConfig::new(
        vec![spec(Rank::Five, Suit::Hearts, 10.0, 10.0)],
        vec![
            spec(Rank::Two, Suit::Clubs, 0.0, 0.0),
            spec(Rank::Nine, Suit::Diamonds, 0.0, 0.0),
            spec(Rank::Six, Suit::Spades, 0.0, 0.0),
        ],
    );
    let state = LevelGenerator::new().generate(&config).unwrap();
    GameController::new(state)
}

fn ranks_of(ids: &[CardId], game: &GameController) -> Vec<u8> {
    ids.iter()
        .map(|id| game.table().card(*id).unwrap().value())
        .collect()
}

#[test]
fn match_move_round_trip_restores_the_table() {
    let mut game = scenario_table();
    let before = snap(game.state());

    // rank 5 matches the active rank 6
    assert!(game.select_card(CardId::new(1)).unwrap());
    game.state().verify_integrity().unwrap();

    // committed move: field emptied, matched card active at the slot origin,
    // displaced rank 6 queued as the next draw
    assert!(game.table().field().is_empty());
    let active = game.table().active().unwrap();
    assert_eq!(active.rank, Rank::Five);
    assert_eq!(active.position, Position::ZERO);
    assert_eq!(
        ranks_of(&game.state().reserve().cards, &game),
        vec![2, 9, 6]
    );

    assert!(game.request_undo().unwrap());
    game.state().verify_integrity().unwrap();
    assert_eq!(before, snap(game.state()));
    assert_eq!(game.history_len(), 0);
}

#[test]
fn draw_move_round_trip_restores_the_table() {
    let mut game = scenario_table();
    let before = snap(game.state());

    assert!(game.draw_reserve().unwrap());
    game.state().verify_integrity().unwrap();

    // the reserve's top (rank 9) became active; rank 6 is the next draw
    assert_eq!(game.table().active().unwrap().rank, Rank::Nine);
    assert_eq!(ranks_of(&game.state().reserve().cards, &game), vec![2, 6]);

    assert!(game.request_undo().unwrap());
    game.state().verify_integrity().unwrap();
    assert_eq!(before, snap(game.state()));
}

#[test]
fn undo_unwinds_a_whole_game_in_reverse() {
    let mut game = scenario_table();

    let mut snapshots = vec![snap(game.state())];

    assert!(game.select_card(CardId::new(1)).unwrap()); // 5 on 6
    snapshots.push(snap(game.state()));

    assert!(game.draw_reserve().unwrap()); // 6 becomes active again
    snapshots.push(snap(game.state()));

    assert!(game.draw_reserve().unwrap()); // 5 comes back up
    snapshots.push(snap(game.state()));

    assert_eq!(game.history_len(), 3);

    // rewind one committed move at a time, checking each restored state
    for expected in snapshots.iter().rev().skip(1) {
        assert!(game.request_undo().unwrap());
        game.state().verify_integrity().unwrap();
        assert_eq!(expected, &snap(game.state()));
    }
    assert_eq!(game.history_len(), 0);
    assert!(!game.request_undo().unwrap());
}

#[test]
fn rejected_moves_change_nothing() {
    let config = LevelConfig::new(
        vec![spec(Rank::Nine, Suit::Hearts, 10.0, 10.0)],
        vec![
            spec(Rank::Two, Suit::Clubs, 0.0, 0.0),
            spec(Rank::Six, Suit::Spades, 0.0, 0.0),
        ],
    );
    let state = LevelGenerator::new().generate(&config).unwrap();
    let mut game = GameController::new(state);
    let before = snap(game.state());

    // rank 9 does not match the active rank 6; rejection is idempotent
    assert!(!game.select_card(CardId::new(1)).unwrap());
    assert_eq!(before, snap(game.state()));
    assert_eq!(game.history_len(), 0);

    assert!(!game.select_card(CardId::new(1)).unwrap());
    assert_eq!(before, snap(game.state()));
    assert_eq!(game.history_len(), 0);
}

#[test]
fn draw_on_empty_reserve_is_rejected_without_history_growth() {
    let config = LevelConfig::new(
        vec![spec(Rank::Five, Suit::Hearts, 10.0, 10.0)],
        vec![spec(Rank::Six, Suit::Spades, 0.0, 0.0)],
    );
    let state = LevelGenerator::new().generate(&config).unwrap();
    let mut game = GameController::new(state);

    assert_eq!(game.table().reserve_len(), 0);
    let before = snap(game.state());

    assert!(!game.draw_reserve().unwrap());
    assert_eq!(before, snap(game.state()));
    assert_eq!(game.history_len(), 0);
}

#[test]
fn undo_on_empty_history_is_rejected() {
    let mut game = scenario_table();
    let before = snap(game.state());

    assert!(!game.request_undo().unwrap());
    assert_eq!(before, snap(game.state()));
}

#[test]
fn clearing_the_field_wins_through_the_intent_interface() {
    let config = LevelConfig::new(
        vec![
            spec(Rank::Five, Suit::Hearts, 10.0, 10.0),
            spec(Rank::Seven, Suit::Clubs, 20.0, 10.0),
        ],
        vec![
            spec(Rank::Eight, Suit::Diamonds, 0.0, 0.0),
            spec(Rank::Six, Suit::Spades, 0.0, 0.0),
        ],
    );
    let state = LevelGenerator::new().generate(&config).unwrap();
    let mut game = GameController::new(state);

    assert!(!game.table().field_cleared());

    // 5 on 6
    assert!(game.handle(PlayerIntent::SelectCard(CardId::new(1))).unwrap());
    // 7 does not match the promoted 5
    assert!(!game.handle(PlayerIntent::SelectCard(CardId::new(2))).unwrap());
    // drawing brings the displaced 6 back up
    assert!(game.handle(PlayerIntent::DrawReserve).unwrap());
    // 7 on 6 clears the field
    assert!(game.handle(PlayerIntent::SelectCard(CardId::new(2))).unwrap());

    assert!(game.table().field_cleared());
    game.state().verify_integrity().unwrap();
}

#[test]
fn level_file_drives_a_full_game() {
    let content = r#"
{
  "Playfield": [
    { "CardFace": 4, "CardSuit": 2, "Position": { "x": 250, "y": 900 } }
  ],
  "Stack": [
    { "CardFace": 1, "CardSuit": 0, "Position": { "x": 0, "y": 0 } },
    { "CardFace": 5, "CardSuit": 1, "Position": { "x": 0, "y": 0 } }
  ]
}
"#;
    let config = LevelLoader::parse(content).unwrap();
    let state = LevelGenerator::new().generate(&config).unwrap();
    let mut game = GameController::new(state);

    // field rank 5 matches the active rank 6 from the reserve top
    let field_id = game.table().field()[0];
    assert!(game.select_card(field_id).unwrap());
    assert!(game.table().field_cleared());
}

#[test]
fn moves_preserve_the_zone_partition() {
    let mut game = scenario_table();

    let intents = [
        PlayerIntent::SelectCard(CardId::new(1)),
        PlayerIntent::DrawReserve,
        PlayerIntent::Undo,
        PlayerIntent::DrawReserve,
        PlayerIntent::SelectCard(CardId::new(99)),
        PlayerIntent::Undo,
        PlayerIntent::Undo,
        PlayerIntent::Undo,
    ];
    let total = game.state().card_count();

    for intent in intents {
        game.handle(intent).unwrap();
        game.state().verify_integrity().unwrap();
        assert_eq!(game.state().card_count(), total);
    }
}
