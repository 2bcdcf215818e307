//! First-class invariants for rock-paper-scissors games.
//!
//! The variant shapes of [`Game`] already fix how many players and moves a
//! state may hold. The invariants here cover what the type system cannot:
//! who those players and movers are.

use super::{Game, GameResult};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>),+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3, I4);

/// Invariant: no two players share a name.
pub struct UniquePlayerNames;

impl Invariant<Game> for UniquePlayerNames {
    fn holds(game: &Game) -> bool {
        match game.players() {
            [first, second] => !first.same_name(second),
            _ => true,
        }
    }

    fn description() -> &'static str {
        "Player names are unique within a game"
    }
}

/// Invariant: every recorded move belongs to a player of the game.
pub struct MoversAreParticipants;

impl Invariant<Game> for MoversAreParticipants {
    fn holds(game: &Game) -> bool {
        game.moves()
            .iter()
            .all(|m| game.participant(m.player().name()).is_some())
    }

    fn description() -> &'static str {
        "Every move is made by a participant"
    }
}

/// Invariant: a player contributes at most one move.
pub struct OneMovePerPlayer;

impl Invariant<Game> for OneMovePerPlayer {
    fn holds(game: &Game) -> bool {
        match game.moves() {
            [first, second] => !first.player().same_name(second.player()),
            _ => true,
        }
    }

    fn description() -> &'static str {
        "Each player moves at most once"
    }
}

/// Invariant: a finished game's result follows from its two moves.
pub struct ResultMatchesMoves;

impl Invariant<Game> for ResultMatchesMoves {
    fn holds(game: &Game) -> bool {
        match game {
            Game::Finished {
                moves: [first, second],
                result,
                ..
            } => *result == GameResult::resolve(first, second),
            Game::WaitingForPlayerToJoin { .. }
            | Game::WaitingForFirstMove { .. }
            | Game::WaitingForSecondMove { .. } => true,
        }
    }

    fn description() -> &'static str {
        "The result of a finished game follows from its moves"
    }
}

/// All game invariants as a composable set.
pub type GameInvariants = (
    UniquePlayerNames,
    MoversAreParticipants,
    OneMovePerPlayer,
    ResultMatchesMoves,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Player, PlayerMove};

    fn finished(result: GameResult) -> Game {
        Game::Finished {
            id: "g1".to_string(),
            players: [Player::new("Pelle"), Player::new("Lisa")],
            moves: [
                PlayerMove::new(Player::new("Pelle"), Move::Rock),
                PlayerMove::new(Player::new("Lisa"), Move::Scissors),
            ],
            result,
        }
    }

    #[test]
    fn test_holds_for_legal_game() {
        let game = Game::create("g1", Player::new("Pelle"))
            .join(Player::new("Lisa"))
            .unwrap();
        assert!(GameInvariants::check_all(&game).is_ok());
        let won = finished(GameResult::Winner(Player::new("Pelle")));
        assert!(GameInvariants::check_all(&won).is_ok());
    }

    #[test]
    fn test_detects_duplicate_names() {
        let game = Game::WaitingForFirstMove {
            id: "g1".to_string(),
            players: [Player::new("Pelle"), Player::new("Pelle")],
        };
        let violations = GameInvariants::check_all(&game).unwrap_err();
        assert_eq!(
            violations,
            vec![InvariantViolation::new(UniquePlayerNames::description())]
        );
    }

    #[test]
    fn test_detects_wrong_result() {
        let game = finished(GameResult::Draw);
        assert!(!ResultMatchesMoves::holds(&game));
        assert!(GameInvariants::check_all(&game).is_err());
    }

    #[test]
    fn test_detects_foreign_mover() {
        let game = Game::WaitingForSecondMove {
            id: "g1".to_string(),
            players: [Player::new("Pelle"), Player::new("Lisa")],
            first_move: PlayerMove::new(Player::new("Kalle"), Move::Paper),
        };
        assert!(!MoversAreParticipants::holds(&game));

        type TwoInvariants = (UniquePlayerNames, OneMovePerPlayer);
        assert!(TwoInvariants::check_all(&game).is_ok());
    }
}
