//! Core domain types for rock-paper-scissors.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// Opaque, caller-supplied identifier of a game.
pub type GameId = String;

/// A participant, identified solely by display name.
///
/// Name uniqueness is only enforced within a single game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{name}")]
pub struct Player {
    name: String,
}

impl Player {
    /// Creates a player with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if both players carry the same display name.
    pub fn same_name(&self, other: &Player) -> bool {
        self.name == other.name
    }
}

/// One of the three symbolic moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Move {
    /// Beats scissors.
    Rock,
    /// Beats rock.
    Paper,
    /// Beats paper.
    Scissors,
}

impl Move {
    /// Returns the move this one defeats.
    pub fn beats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Scissors => Move::Paper,
            Move::Paper => Move::Rock,
        }
    }

    /// Returns true if this move defeats `other`.
    pub fn defeats(self, other: Move) -> bool {
        self.beats() == other
    }
}

/// A player paired with the move they chose this round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{player} plays {choice}")]
pub struct PlayerMove {
    player: Player,
    #[serde(rename = "move")]
    choice: Move,
}

impl PlayerMove {
    /// Creates a new player move.
    pub fn new(player: Player, choice: Move) -> Self {
        Self { player, choice }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Returns the chosen move.
    pub fn choice(&self) -> Move {
        self.choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_beats_map_is_cyclic() {
        assert_eq!(Move::Rock.beats(), Move::Scissors);
        assert_eq!(Move::Scissors.beats(), Move::Paper);
        assert_eq!(Move::Paper.beats(), Move::Rock);
    }

    #[test]
    fn test_exactly_one_side_defeats_the_other() {
        for a in Move::iter() {
            for b in Move::iter() {
                let wins = [a.defeats(b), b.defeats(a)];
                if a == b {
                    assert_eq!(wins, [false, false]);
                } else {
                    assert_eq!(wins.iter().filter(|w| **w).count(), 1, "{a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn test_move_parses_case_insensitively() {
        assert_eq!(Move::from_str("rock").unwrap(), Move::Rock);
        assert_eq!(Move::from_str("SCISSORS").unwrap(), Move::Scissors);
        assert!(Move::from_str("lizard").is_err());
    }

    #[test]
    fn test_wire_shapes() {
        let mv = PlayerMove::new(Player::new("Pelle"), Move::Paper);
        let json = serde_json::to_value(&mv).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "player": { "name": "Pelle" }, "move": "PAPER" })
        );
    }
}
