//! Contract-based validation for game transitions.
//!
//! Preconditions are small named checks composed in a fixed order, so the
//! first failing check decides which error the caller sees. Postconditions
//! compare the game before and after a transition.

use super::invariants::{GameInvariants, InvariantSet, InvariantViolation};
use super::{Game, GameError, MoveForbiddenReason, Player, PlayerMove};
use tracing::{error, instrument};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Join preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game is waiting for an opponent.
pub struct Joinable;

impl Joinable {
    /// Fails with [`GameError::GameNotJoinable`] outside the joinable state.
    #[instrument(skip(game))]
    pub fn check(game: &Game) -> Result<(), GameError> {
        match game {
            Game::WaitingForPlayerToJoin { .. } => Ok(()),
            Game::WaitingForFirstMove { .. }
            | Game::WaitingForSecondMove { .. }
            | Game::Finished { .. } => Err(GameError::GameNotJoinable),
        }
    }
}

/// Precondition: the joining player's name is not taken.
pub struct UniqueName;

impl UniqueName {
    /// Fails with [`GameError::PlayerNameConflict`] on a taken name.
    #[instrument(skip(game))]
    pub fn check(game: &Game, player: &Player) -> Result<(), GameError> {
        if game.players().iter().any(|p| p.same_name(player)) {
            Err(GameError::PlayerNameConflict)
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Move preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game is in one of the two move-accepting states.
pub struct AcceptsMoves;

impl AcceptsMoves {
    /// Fails with [`MoveForbiddenReason::NotAcceptingMoves`] outside the move states.
    #[instrument(skip(game))]
    pub fn check(game: &Game) -> Result<(), GameError> {
        match game {
            Game::WaitingForFirstMove { .. } | Game::WaitingForSecondMove { .. } => Ok(()),
            Game::WaitingForPlayerToJoin { .. } | Game::Finished { .. } => {
                Err(MoveForbiddenReason::NotAcceptingMoves.into())
            }
        }
    }
}

/// Precondition: the mover is one of the players.
pub struct IsParticipant;

impl IsParticipant {
    /// Fails with [`MoveForbiddenReason::NotAParticipant`] for strangers.
    #[instrument(skip(game))]
    pub fn check(game: &Game, player_move: &PlayerMove) -> Result<(), GameError> {
        match game.participant(player_move.player().name()) {
            Some(_) => Ok(()),
            None => Err(MoveForbiddenReason::NotAParticipant.into()),
        }
    }
}

/// Precondition: the mover has not moved yet.
pub struct HasNotMoved;

impl HasNotMoved {
    /// Fails with [`MoveForbiddenReason::AlreadyMoved`] on a repeat mover.
    #[instrument(skip(game))]
    pub fn check(game: &Game, player_move: &PlayerMove) -> Result<(), GameError> {
        if game
            .moves()
            .iter()
            .any(|m| m.player().same_name(player_move.player()))
        {
            Err(MoveForbiddenReason::AlreadyMoved.into())
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for moves, checked in order.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(game: &Game, player_move: &PlayerMove) -> Result<(), GameError> {
        AcceptsMoves::check(game)?;
        IsParticipant::check(game, player_move)?;
        HasNotMoved::check(game, player_move)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition contracts
// ─────────────────────────────────────────────────────────────

/// Checks what every transition must preserve.
///
/// - The identifier is unchanged.
/// - The creator stays at index 0 and existing players are kept.
/// - Existing moves are kept; new ones are only appended.
/// - The resulting game satisfies [`GameInvariants`].
fn preserved(before: &Game, after: &Game) -> Result<(), Vec<InvariantViolation>> {
    let mut violations = match GameInvariants::check_all(after) {
        Ok(()) => Vec::new(),
        Err(violations) => violations,
    };

    if before.id() != after.id() {
        violations.push(InvariantViolation::new("Game id is stable"));
    }
    if !after.players().starts_with(before.players()) {
        violations.push(InvariantViolation::new("Players are only appended"));
    }
    if !after.moves().starts_with(before.moves()) {
        violations.push(InvariantViolation::new("Moves are only appended"));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Contract for the join transition.
///
/// Preconditions:
/// - Game is joinable
/// - Joining name is unique
pub struct JoinContract;

impl Contract<Game, Player> for JoinContract {
    fn pre(game: &Game, player: &Player) -> Result<(), GameError> {
        Joinable::check(game)?;
        UniqueName::check(game, player)?;
        Ok(())
    }

    fn post(before: &Game, after: &Game) -> Result<(), Vec<InvariantViolation>> {
        preserved(before, after)
    }
}

/// Contract for the move transition.
///
/// Preconditions:
/// - Game accepts moves
/// - Mover is a participant
/// - Mover has not moved yet
pub struct MoveContract;

impl Contract<Game, PlayerMove> for MoveContract {
    fn pre(game: &Game, player_move: &PlayerMove) -> Result<(), GameError> {
        LegalMove::check(game, player_move)
    }

    fn post(before: &Game, after: &Game) -> Result<(), Vec<InvariantViolation>> {
        preserved(before, after)
    }
}

/// Verifies a transition's postconditions in debug builds.
pub(crate) fn assert_transition<C, A>(before: &Game, after: &Game)
where
    C: Contract<Game, A>,
{
    if !cfg!(debug_assertions) {
        return;
    }
    if let Err(violations) = C::post(before, after) {
        error!(?violations, "Transition broke game invariants");
        debug_assert!(false, "postcondition failed: {:?}", violations);
    }
}
