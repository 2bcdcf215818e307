//! Outcome of a finished game and the rule that decides it.

use super::{Player, PlayerMove};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Tag describing how a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// One player won.
    Winner,
    /// Both players chose the same move.
    Draw,
}

/// Result of a finished game.
///
/// Serialized as `{"outcome": "DRAW", "winner": null}` or
/// `{"outcome": "WINNER", "winner": {"name": ...}}`. No loser is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(into = "ResultRecord", try_from = "ResultRecord")]
pub enum GameResult {
    /// Both moves were identical.
    #[display("Draw")]
    Draw,
    /// The given player's move beat the opponent's.
    #[display("{} wins", _0)]
    Winner(Player),
}

impl GameResult {
    /// Decides the result of a round from the two recorded moves.
    #[instrument]
    pub fn resolve(first: &PlayerMove, second: &PlayerMove) -> Self {
        if first.choice() == second.choice() {
            GameResult::Draw
        } else if first.choice().defeats(second.choice()) {
            GameResult::Winner(first.player().clone())
        } else {
            GameResult::Winner(second.player().clone())
        }
    }

    /// Returns the outcome tag.
    pub fn outcome(&self) -> Outcome {
        match self {
            GameResult::Draw => Outcome::Draw,
            GameResult::Winner(_) => Outcome::Winner,
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<&Player> {
        match self {
            GameResult::Winner(player) => Some(player),
            GameResult::Draw => None,
        }
    }
}

/// Flat wire form of [`GameResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResultRecord {
    outcome: Outcome,
    #[serde(default)]
    winner: Option<Player>,
}

/// Result record whose outcome and winner disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MalformedResult {
    /// `WINNER` without a winner.
    #[display("WINNER result must name a winner")]
    MissingWinner,
    /// `DRAW` naming a winner.
    #[display("DRAW result must not name a winner")]
    UnexpectedWinner,
}

impl std::error::Error for MalformedResult {}

impl From<GameResult> for ResultRecord {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::Draw => ResultRecord {
                outcome: Outcome::Draw,
                winner: None,
            },
            GameResult::Winner(player) => ResultRecord {
                outcome: Outcome::Winner,
                winner: Some(player),
            },
        }
    }
}

impl TryFrom<ResultRecord> for GameResult {
    type Error = MalformedResult;

    fn try_from(record: ResultRecord) -> Result<Self, Self::Error> {
        match (record.outcome, record.winner) {
            (Outcome::Draw, None) => Ok(GameResult::Draw),
            (Outcome::Winner, Some(player)) => Ok(GameResult::Winner(player)),
            (Outcome::Draw, Some(_)) => Err(MalformedResult::UnexpectedWinner),
            (Outcome::Winner, None) => Err(MalformedResult::MissingWinner),
        }
    }
}
