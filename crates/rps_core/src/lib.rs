//! Pure rock-paper-scissors game logic.
//!
//! A [`Game`] moves through four lifecycle states:
//!
//! ```text
//! WaitingForPlayerToJoin --join--> WaitingForFirstMove
//!     --move--> WaitingForSecondMove --move--> Finished
//! ```
//!
//! Every transition takes the current game by reference and returns a new
//! value or a [`GameError`]. Nothing here performs I/O; loading and storing
//! games is the caller's job.
//!
//! # Example
//!
//! ```
//! use rps_core::{Game, GameResult, Move, Player, PlayerMove};
//!
//! let pelle = Player::new("Pelle");
//! let lisa = Player::new("Lisa");
//!
//! let game = Game::create("g1", pelle.clone())
//!     .join(lisa.clone())?
//!     .make_move(PlayerMove::new(pelle.clone(), Move::Rock))?
//!     .make_move(PlayerMove::new(lisa, Move::Scissors))?;
//!
//! assert_eq!(game.result(), Some(&GameResult::Winner(pelle)));
//! # Ok::<(), rps_core::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod contracts;
mod error;
mod game;
mod invariants;
mod outcome;
mod record;
mod types;

pub use contracts::{
    AcceptsMoves, Contract, HasNotMoved, IsParticipant, JoinContract, Joinable, LegalMove,
    MoveContract, UniqueName,
};
pub use error::{GameError, MoveForbiddenReason};
pub use game::{Game, GameState, create, join, make_move, public_view};
pub use invariants::{
    GameInvariants, Invariant, InvariantSet, InvariantViolation, MoversAreParticipants,
    OneMovePerPlayer, ResultMatchesMoves, UniquePlayerNames,
};
pub use outcome::{GameResult, MalformedResult, Outcome};
pub use record::{GameRecord, GameRecordError, PublicGame};
pub use types::{GameId, Move, Player, PlayerMove};
