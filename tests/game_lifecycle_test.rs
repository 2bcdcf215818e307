//! Tests for the game lifecycle and its rejection rules.

use rps_core::{
    Game, GameError, GameResult, GameState, Move, MoveForbiddenReason, Outcome, Player,
    PlayerMove, create, join, make_move, public_view,
};
use strum::IntoEnumIterator;

fn pelle() -> Player {
    Player::new("Pelle")
}

fn lisa() -> Player {
    Player::new("Lisa")
}

fn started() -> Game {
    create("g1", pelle()).join(lisa()).expect("Lisa joins")
}

fn one_move_in(choice: Move) -> Game {
    started()
        .make_move(PlayerMove::new(pelle(), choice))
        .expect("Pelle moves")
}

fn finished(first: Move, second: Move) -> Game {
    one_move_in(first)
        .make_move(PlayerMove::new(lisa(), second))
        .expect("Lisa moves")
}

#[test]
fn test_rock_beats_scissors_end_to_end() {
    let game = create("g1", pelle());
    let game = join(&game, lisa()).unwrap();
    let game = make_move(&game, PlayerMove::new(pelle(), Move::Rock)).unwrap();
    let game = make_move(&game, PlayerMove::new(lisa(), Move::Scissors)).unwrap();

    assert_eq!(game.state(), GameState::Finished);
    assert_eq!(game.result(), Some(&GameResult::Winner(pelle())));
    assert_eq!(game.moves().len(), 2);
}

#[test]
fn test_identical_moves_draw() {
    let game = finished(Move::Paper, Move::Paper);
    assert_eq!(game.result(), Some(&GameResult::Draw));
    assert_eq!(game.result().map(GameResult::outcome), Some(Outcome::Draw));
    assert!(game.result().and_then(GameResult::winner).is_none());
}

#[test]
fn test_second_mover_can_win() {
    let game = finished(Move::Scissors, Move::Rock);
    assert_eq!(game.result(), Some(&GameResult::Winner(lisa())));
}

#[test]
fn test_every_move_pair_resolves() {
    for first in Move::iter() {
        for second in Move::iter() {
            let game = finished(first, second);
            let expected = if first == second {
                GameResult::Draw
            } else if first.defeats(second) {
                GameResult::Winner(pelle())
            } else {
                GameResult::Winner(lisa())
            };
            assert_eq!(game.result(), Some(&expected), "{} vs {}", first, second);
        }
    }
}

#[test]
fn test_each_move_beats_exactly_one_other() {
    for choice in Move::iter() {
        let beaten = Move::iter().filter(|other| choice.defeats(*other)).count();
        assert_eq!(beaten, 1, "{} should beat exactly one move", choice);
        assert!(!choice.defeats(choice));
    }
}

#[test]
fn test_create_waits_for_opponent() {
    let game = create("g1", pelle());
    assert_eq!(game.id(), "g1");
    assert_eq!(game.state(), GameState::WaitingForPlayerToJoin);
    assert_eq!(game.players(), &[pelle()]);
    assert!(game.moves().is_empty());
    assert!(game.result().is_none());
}

#[test]
fn test_join_keeps_creator_first() {
    let game = started();
    assert_eq!(game.state(), GameState::WaitingForFirstMove);
    assert_eq!(game.players(), &[pelle(), lisa()]);
}

#[test]
fn test_join_with_same_name_conflicts() {
    let game = create("g1", pelle());
    assert_eq!(game.join(pelle()), Err(GameError::PlayerNameConflict));
}

#[test]
fn test_names_are_case_sensitive() {
    let game = create("g1", pelle());
    assert!(game.join(Player::new("pelle")).is_ok());
}

#[test]
fn test_join_rejected_after_start() {
    let games = [
        started(),
        one_move_in(Move::Rock),
        finished(Move::Rock, Move::Paper),
        finished(Move::Rock, Move::Rock),
    ];
    for game in games {
        assert_eq!(
            game.join(Player::new("Olle")),
            Err(GameError::GameNotJoinable),
            "state {}",
            game.state()
        );
    }
}

#[test]
fn test_state_check_precedes_name_check() {
    // Pelle is already playing, but the game is no longer joinable.
    assert_eq!(started().join(pelle()), Err(GameError::GameNotJoinable));
}

#[test]
fn test_moves_rejected_before_join_and_after_finish() {
    let games = [create("g1", pelle()), finished(Move::Rock, Move::Rock)];
    for game in games {
        assert_eq!(
            game.make_move(PlayerMove::new(pelle(), Move::Rock)),
            Err(MoveForbiddenReason::NotAcceptingMoves.into()),
            "state {}",
            game.state()
        );
    }
}

#[test]
fn test_outsider_cannot_move() {
    let outsider = PlayerMove::new(Player::new("Olle"), Move::Rock);
    assert_eq!(
        started().make_move(outsider.clone()),
        Err(MoveForbiddenReason::NotAParticipant.into())
    );
    assert_eq!(
        one_move_in(Move::Paper).make_move(outsider),
        Err(MoveForbiddenReason::NotAParticipant.into())
    );
}

#[test]
fn test_player_cannot_move_twice() {
    let game = one_move_in(Move::Paper);
    assert_eq!(
        game.make_move(PlayerMove::new(pelle(), Move::Rock)),
        Err(MoveForbiddenReason::AlreadyMoved.into())
    );
}

#[test]
fn test_either_player_may_move_first() {
    let game = started()
        .make_move(PlayerMove::new(lisa(), Move::Rock))
        .unwrap();
    assert_eq!(game.state(), GameState::WaitingForSecondMove);
    assert_eq!(game.moves()[0].player(), &lisa());
}

#[test]
fn test_rejection_leaves_game_unchanged() {
    let game = one_move_in(Move::Paper);
    let before = game.clone();
    let _ = game.make_move(PlayerMove::new(pelle(), Move::Rock));
    let _ = game.join(Player::new("Olle"));
    assert_eq!(game, before);
}

#[test]
fn test_public_view_hides_first_move() {
    let game = one_move_in(Move::Scissors);
    let view = public_view(&game);
    assert_eq!(*view.state(), GameState::WaitingForSecondMove);
    assert!(view.moves().is_empty());
    assert_eq!(view.players(), &vec![pelle(), lisa()]);
    // The stored game still knows the move.
    assert_eq!(game.moves().len(), 1);
}

#[test]
fn test_public_view_reveals_finished_moves() {
    let game = finished(Move::Rock, Move::Scissors);
    let view = game.public_view();
    assert_eq!(view.moves().len(), 2);
    assert_eq!(view.result(), &Some(GameResult::Winner(pelle())));
}

#[test]
fn test_wire_shape_of_public_view() {
    let view = public_view(&one_move_in(Move::Rock));
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "g1",
            "state": "WAITING_FOR_SECOND_MOVE",
            "players": [{"name": "Pelle"}, {"name": "Lisa"}],
            "moves": [],
            "result": null
        })
    );
}

#[test]
fn test_finished_game_round_trips_through_json() {
    let game = finished(Move::Paper, Move::Rock);
    let json = serde_json::to_string(&game).unwrap();
    let restored: Game = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, game);
}
