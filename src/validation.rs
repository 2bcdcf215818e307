//! Request payloads and their validation.
//!
//! Payloads are checked here before anything reaches the game logic:
//! names must be 1 to 255 UTF-16 code units long and moves one of the
//! three symbols.
//! Unknown fields are rejected.

use derive_more::{Display, Error};
use rps_core::{Move, Player, PlayerMove};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Longest accepted player name, in UTF-16 code units.
pub const MAX_NAME_LEN: usize = 255;

/// Payload rejected by validation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid request payload input: {}", reason)]
pub struct ValidationError {
    /// What was wrong with the payload.
    pub reason: String,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Body of create and join requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerRequest {
    /// Display name.
    pub name: String,
}

/// Player reference inside a move request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MovePlayer {
    /// Display name.
    pub name: String,
}

/// Body of move requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoveRequest {
    /// The player making the move.
    pub player: MovePlayer,
    /// The chosen move.
    #[serde(rename = "move")]
    pub choice: Move,
}

impl PlayerRequest {
    /// Creates a request for the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Validates the payload into a [`Player`].
    #[instrument(skip(self))]
    pub fn validate(self) -> Result<Player, ValidationError> {
        validate_name(&self.name)?;
        Ok(Player::new(self.name))
    }
}

impl MoveRequest {
    /// Creates a request for the given name and move.
    pub fn new(name: impl Into<String>, choice: Move) -> Self {
        Self {
            player: MovePlayer { name: name.into() },
            choice,
        }
    }

    /// Validates the payload into a [`PlayerMove`].
    #[instrument(skip(self))]
    pub fn validate(self) -> Result<PlayerMove, ValidationError> {
        validate_name(&self.player.name)?;
        Ok(PlayerMove::new(Player::new(self.player.name), self.choice))
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        warn!("Empty player name");
        return Err(ValidationError::new("name must not be empty"));
    }
    let len = name.encode_utf16().count();
    if len > MAX_NAME_LEN {
        warn!(len, "Player name too long");
        return Err(ValidationError::new(format!(
            "name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_bounds() {
        assert!(PlayerRequest::new("").validate().is_err());
        assert!(PlayerRequest::new("a".repeat(MAX_NAME_LEN)).validate().is_ok());
        assert!(PlayerRequest::new("a".repeat(MAX_NAME_LEN + 1)).validate().is_err());
        // Counted in UTF-16 code units, not bytes.
        assert!(PlayerRequest::new("å".repeat(MAX_NAME_LEN)).validate().is_ok());
    }

    #[test]
    fn test_astral_characters_count_twice() {
        let half = MAX_NAME_LEN / 2;
        assert!(PlayerRequest::new("🎲".repeat(half)).validate().is_ok());
        assert!(PlayerRequest::new("🎲".repeat(half + 1)).validate().is_err());
        assert!(PlayerRequest::new("🎲".repeat(200)).validate().is_err());
    }

    #[test]
    fn test_move_request_parses_wire_shape() {
        let req: MoveRequest =
            serde_json::from_str(r#"{"player":{"name":"Pelle"},"move":"ROCK"}"#).unwrap();
        let mv = req.validate().unwrap();
        assert_eq!(mv.player().name(), "Pelle");
        assert_eq!(mv.choice(), Move::Rock);
    }

    #[test]
    fn test_unknown_fields_and_moves_rejected() {
        assert!(serde_json::from_str::<PlayerRequest>(r#"{"foo":"bar"}"#).is_err());
        assert!(serde_json::from_str::<PlayerRequest>(r#"{"name":"a","x":1}"#).is_err());
        assert!(
            serde_json::from_str::<MoveRequest>(r#"{"player":{"name":"a"},"move":"LIZARD"}"#)
                .is_err()
        );
    }

    #[test]
    fn test_move_request_empty_name() {
        assert!(MoveRequest::new("", Move::Paper).validate().is_err());
    }
}
