//! The game aggregate and its lifecycle transitions.
//!
//! Each lifecycle state is its own variant carrying exactly the data that
//! state can have. A `Finished` game ALWAYS has a result and two moves; a game
//! waiting for its second move ALWAYS has exactly one. Transitions borrow the
//! current value and build a fresh one, so a loaded game is never mutated.

use super::contracts::{Contract, JoinContract, MoveContract, assert_transition};
use super::record::GameRecord;
use super::{GameError, GameId, GameResult, MoveForbiddenReason, Player, PlayerMove};
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::{debug, info, instrument, warn};

/// State tag of a game, as rendered on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    /// Only the creator is present.
    #[serde(rename = "WAITING_FOR_OPPONENT_TO_JOIN")]
    #[strum(serialize = "WAITING_FOR_OPPONENT_TO_JOIN")]
    WaitingForPlayerToJoin,
    /// Both players are present, nobody has moved.
    WaitingForFirstMove,
    /// One move has been recorded.
    WaitingForSecondMove,
    /// Both moves are recorded and the result is decided.
    Finished,
}

/// A rock-paper-scissors game in any lifecycle state.
///
/// Serializes through [`GameRecord`]; deserializing rejects records whose
/// shape does not match their state tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GameRecord", try_from = "GameRecord")]
pub enum Game {
    /// Waiting for a second player.
    WaitingForPlayerToJoin {
        /// Game identifier.
        id: GameId,
        /// The player who created the game.
        creator: Player,
    },
    /// Waiting for either player to move.
    WaitingForFirstMove {
        /// Game identifier.
        id: GameId,
        /// `[creator, joiner]`.
        players: [Player; 2],
    },
    /// Waiting for the player who has not moved yet.
    WaitingForSecondMove {
        /// Game identifier.
        id: GameId,
        /// `[creator, joiner]`.
        players: [Player; 2],
        /// The move made first.
        first_move: PlayerMove,
    },
    /// Terminal state.
    Finished {
        /// Game identifier.
        id: GameId,
        /// `[creator, joiner]`.
        players: [Player; 2],
        /// Moves in the order they were made.
        moves: [PlayerMove; 2],
        /// Draw or winner.
        result: GameResult,
    },
}

impl Game {
    /// Creates a game waiting for an opponent.
    ///
    /// The identifier is supplied by the caller. Always succeeds.
    #[instrument(skip(id, player), fields(creator = %player))]
    pub fn create(id: impl Into<GameId>, player: Player) -> Self {
        let game = Game::WaitingForPlayerToJoin {
            id: id.into(),
            creator: player,
        };
        info!(game_id = %game.id(), "Game created");
        game
    }

    /// Adds the second player.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameNotJoinable`] unless the game is waiting for a player.
    /// - [`GameError::PlayerNameConflict`] if the name equals the creator's.
    #[instrument(
        skip(self, player),
        fields(game_id = %self.id(), state = %self.state(), joiner = %player)
    )]
    pub fn join(&self, player: Player) -> Result<Game, GameError> {
        if let Err(e) = JoinContract::pre(self, &player) {
            warn!(error = %e, "Join rejected");
            return Err(e);
        }

        let next = match self {
            Game::WaitingForPlayerToJoin { id, creator } => Game::WaitingForFirstMove {
                id: id.clone(),
                players: [creator.clone(), player],
            },
            Game::WaitingForFirstMove { .. }
            | Game::WaitingForSecondMove { .. }
            | Game::Finished { .. } => return Err(GameError::GameNotJoinable),
        };

        assert_transition::<JoinContract, Player>(self, &next);
        info!(state = %next.state(), "Player joined");
        Ok(next)
    }

    /// Records a move, finishing the game on the second one.
    ///
    /// Either player may move first.
    ///
    /// # Errors
    ///
    /// [`GameError::MoveForbidden`] when the game is not accepting moves, the
    /// mover is not a participant, or the mover already moved.
    #[instrument(
        skip(self, player_move),
        fields(game_id = %self.id(), state = %self.state(), mover = %player_move.player())
    )]
    pub fn make_move(&self, player_move: PlayerMove) -> Result<Game, GameError> {
        if let Err(e) = MoveContract::pre(self, &player_move) {
            warn!(error = %e, "Move rejected");
            return Err(e);
        }

        let next = match self {
            Game::WaitingForFirstMove { id, players } => Game::WaitingForSecondMove {
                id: id.clone(),
                players: players.clone(),
                first_move: player_move,
            },
            Game::WaitingForSecondMove {
                id,
                players,
                first_move,
            } => {
                let result = GameResult::resolve(first_move, &player_move);
                debug!(%first_move, second_move = %player_move, %result, "Round resolved");
                Game::Finished {
                    id: id.clone(),
                    players: players.clone(),
                    moves: [first_move.clone(), player_move],
                    result,
                }
            }
            Game::WaitingForPlayerToJoin { .. } | Game::Finished { .. } => {
                return Err(MoveForbiddenReason::NotAcceptingMoves.into());
            }
        };

        assert_transition::<MoveContract, PlayerMove>(self, &next);
        info!(state = %next.state(), "Move recorded");
        Ok(next)
    }

    /// Returns the projection rendered to clients.
    ///
    /// Identical to the full record except while waiting for the second
    /// move, where the recorded move is withheld so it cannot leak to the
    /// opponent.
    #[instrument(skip(self), fields(game_id = %self.id(), state = %self.state()))]
    pub fn public_view(&self) -> GameRecord {
        let record = GameRecord::from(self);
        match self {
            Game::WaitingForSecondMove { .. } => {
                debug!("Redacting first move");
                record.without_moves()
            }
            Game::WaitingForPlayerToJoin { .. }
            | Game::WaitingForFirstMove { .. }
            | Game::Finished { .. } => record,
        }
    }

    /// Returns the identifier.
    pub fn id(&self) -> &GameId {
        match self {
            Game::WaitingForPlayerToJoin { id, .. }
            | Game::WaitingForFirstMove { id, .. }
            | Game::WaitingForSecondMove { id, .. }
            | Game::Finished { id, .. } => id,
        }
    }

    /// Returns the state tag.
    pub fn state(&self) -> GameState {
        match self {
            Game::WaitingForPlayerToJoin { .. } => GameState::WaitingForPlayerToJoin,
            Game::WaitingForFirstMove { .. } => GameState::WaitingForFirstMove,
            Game::WaitingForSecondMove { .. } => GameState::WaitingForSecondMove,
            Game::Finished { .. } => GameState::Finished,
        }
    }

    /// Returns the players in join order; the creator is always first.
    pub fn players(&self) -> &[Player] {
        match self {
            Game::WaitingForPlayerToJoin { creator, .. } => std::slice::from_ref(creator),
            Game::WaitingForFirstMove { players, .. }
            | Game::WaitingForSecondMove { players, .. }
            | Game::Finished { players, .. } => players,
        }
    }

    /// Returns the recorded moves in the order they were made.
    pub fn moves(&self) -> &[PlayerMove] {
        match self {
            Game::WaitingForPlayerToJoin { .. } | Game::WaitingForFirstMove { .. } => &[],
            Game::WaitingForSecondMove { first_move, .. } => std::slice::from_ref(first_move),
            Game::Finished { moves, .. } => moves,
        }
    }

    /// Returns the result, present only once finished.
    pub fn result(&self) -> Option<&GameResult> {
        match self {
            Game::Finished { result, .. } => Some(result),
            Game::WaitingForPlayerToJoin { .. }
            | Game::WaitingForFirstMove { .. }
            | Game::WaitingForSecondMove { .. } => None,
        }
    }

    /// Returns true once no further operation is valid.
    pub fn is_finished(&self) -> bool {
        matches!(self, Game::Finished { .. })
    }

    /// Returns the participant with the given name, if any.
    pub fn participant(&self, name: &str) -> Option<&Player> {
        self.players().iter().find(|p| p.name() == name)
    }
}

/// Creates a game waiting for an opponent. See [`Game::create`].
pub fn create(id: impl Into<GameId>, player: Player) -> Game {
    Game::create(id, player)
}

/// Adds the second player. See [`Game::join`].
pub fn join(game: &Game, player: Player) -> Result<Game, GameError> {
    game.join(player)
}

/// Records a move. See [`Game::make_move`].
pub fn make_move(game: &Game, player_move: PlayerMove) -> Result<Game, GameError> {
    game.make_move(player_move)
}

/// Returns the client-facing projection. See [`Game::public_view`].
pub fn public_view(game: &Game) -> GameRecord {
    game.public_view()
}
