//! Domain errors raised by game transitions.

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MoveForbiddenReason {
    /// The game is waiting for an opponent or already finished.
    #[display("the game does not accept any moves at this moment")]
    NotAcceptingMoves,

    /// The mover is not one of the two players.
    #[display("the player making the move is not part of this game")]
    NotAParticipant,

    /// The mover already made the first move.
    #[display("the player making the move has already made a move")]
    AlreadyMoved,
}

/// Error that can occur when applying a transition to a game.
///
/// Every variant is an expected, caller-recoverable rejection of the
/// current request. None of them are transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GameError {
    /// The game has already started or finished.
    #[display("the game has already started or finished")]
    GameNotJoinable,

    /// The joining player uses the creator's name.
    #[display("player names must be unique")]
    PlayerNameConflict,

    /// The move was rejected.
    #[display("{}", _0)]
    MoveForbidden(MoveForbiddenReason),
}

impl std::error::Error for GameError {}

impl From<MoveForbiddenReason> for GameError {
    fn from(reason: MoveForbiddenReason) -> Self {
        GameError::MoveForbidden(reason)
    }
}
