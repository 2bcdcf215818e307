//! Flat wire form of a game.
//!
//! `{"id", "state", "players", "moves", "result"}` where `result` is an
//! explicit `null` until the game finishes. The same shape carries the public
//! view handed to clients.

use super::{Game, GameId, GameResult, GameState, Player, PlayerMove};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Flat, serializable form of a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameRecord {
    id: GameId,
    state: GameState,
    players: Vec<Player>,
    #[serde(default)]
    moves: Vec<PlayerMove>,
    #[serde(default)]
    result: Option<GameResult>,
}

/// Client-facing projection returned by [`Game::public_view`].
pub type PublicGame = GameRecord;

impl GameRecord {
    /// Returns the record with its moves withheld.
    pub(crate) fn without_moves(self) -> Self {
        Self {
            moves: Vec::new(),
            ..self
        }
    }
}

impl From<&Game> for GameRecord {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id().clone(),
            state: game.state(),
            players: game.players().to_vec(),
            moves: game.moves().to_vec(),
            result: game.result().cloned(),
        }
    }
}

impl From<Game> for GameRecord {
    fn from(game: Game) -> Self {
        GameRecord::from(&game)
    }
}

/// A record whose shape does not match its state tag.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameRecordError {
    /// Wrong number of players for the state.
    #[display("{} expects {} player(s), found {}", state, expected, found)]
    PlayerCount {
        /// Declared state.
        state: GameState,
        /// Players the state requires.
        expected: usize,
        /// Players present.
        found: usize,
    },

    /// Wrong number of moves for the state.
    #[display("{} expects {} move(s), found {}", state, expected, found)]
    MoveCount {
        /// Declared state.
        state: GameState,
        /// Moves the state requires.
        expected: usize,
        /// Moves present.
        found: usize,
    },

    /// A result outside the finished state.
    #[display("{} cannot carry a result", _0)]
    UnexpectedResult(GameState),

    /// A finished game without a result.
    #[display("finished game is missing its result")]
    MissingResult,

    /// Two players share a name.
    #[display("player name '{}' appears twice", _0)]
    DuplicatePlayer(String),

    /// A move by someone who is not a player.
    #[display("'{}' moved but is not part of the game", _0)]
    UnknownMover(String),

    /// The same player moved twice.
    #[display("'{}' moved more than once", _0)]
    RepeatedMover(String),

    /// The recorded result does not follow from the moves.
    #[display("recorded result '{}' does not match the moves", _0)]
    InconsistentResult(GameResult),
}

impl std::error::Error for GameRecordError {}

fn exact_players<const N: usize>(
    state: GameState,
    players: Vec<Player>,
) -> Result<[Player; N], GameRecordError> {
    let found = players.len();
    <[Player; N]>::try_from(players).map_err(|_| GameRecordError::PlayerCount {
        state,
        expected: N,
        found,
    })
}

fn exact_moves<const N: usize>(
    state: GameState,
    moves: Vec<PlayerMove>,
) -> Result<[PlayerMove; N], GameRecordError> {
    let found = moves.len();
    <[PlayerMove; N]>::try_from(moves).map_err(|_| GameRecordError::MoveCount {
        state,
        expected: N,
        found,
    })
}

fn no_result(state: GameState, result: Option<GameResult>) -> Result<(), GameRecordError> {
    match result {
        None => Ok(()),
        Some(_) => Err(GameRecordError::UnexpectedResult(state)),
    }
}

fn distinct_players(players: [Player; 2]) -> Result<[Player; 2], GameRecordError> {
    if players[0].same_name(&players[1]) {
        return Err(GameRecordError::DuplicatePlayer(players[0].name().to_string()));
    }
    Ok(players)
}

fn check_mover(players: &[Player; 2], player_move: &PlayerMove) -> Result<(), GameRecordError> {
    if players.iter().any(|p| p.same_name(player_move.player())) {
        Ok(())
    } else {
        Err(GameRecordError::UnknownMover(
            player_move.player().name().to_string(),
        ))
    }
}

impl TryFrom<GameRecord> for Game {
    type Error = GameRecordError;

    #[instrument(skip(record), fields(game_id = %record.id, state = %record.state))]
    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let GameRecord {
            id,
            state,
            players,
            moves,
            result,
        } = record;

        match state {
            GameState::WaitingForPlayerToJoin => {
                let [creator] = exact_players::<1>(state, players)?;
                exact_moves::<0>(state, moves)?;
                no_result(state, result)?;
                Ok(Game::WaitingForPlayerToJoin { id, creator })
            }
            GameState::WaitingForFirstMove => {
                let players = distinct_players(exact_players::<2>(state, players)?)?;
                exact_moves::<0>(state, moves)?;
                no_result(state, result)?;
                Ok(Game::WaitingForFirstMove { id, players })
            }
            GameState::WaitingForSecondMove => {
                let players = distinct_players(exact_players::<2>(state, players)?)?;
                let [first_move] = exact_moves::<1>(state, moves)?;
                check_mover(&players, &first_move)?;
                no_result(state, result)?;
                Ok(Game::WaitingForSecondMove {
                    id,
                    players,
                    first_move,
                })
            }
            GameState::Finished => {
                let players = distinct_players(exact_players::<2>(state, players)?)?;
                let moves = exact_moves::<2>(state, moves)?;
                for player_move in &moves {
                    check_mover(&players, player_move)?;
                }
                if moves[0].player().same_name(moves[1].player()) {
                    return Err(GameRecordError::RepeatedMover(
                        moves[0].player().name().to_string(),
                    ));
                }
                let result = result.ok_or(GameRecordError::MissingResult)?;
                if result != GameResult::resolve(&moves[0], &moves[1]) {
                    return Err(GameRecordError::InconsistentResult(result));
                }
                Ok(Game::Finished {
                    id,
                    players,
                    moves,
                    result,
                })
            }
        }
    }
}
