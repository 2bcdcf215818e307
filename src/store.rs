//! Game storage keyed by game id.
//!
//! The store offers plain `get`/`set`. There is no compare-and-swap, so two
//! requests racing through load → transition → save on the same id can
//! overwrite each other.

use async_trait::async_trait;
use derive_more::{Display, Error};
use rps_core::{Game, GameId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Key-value association from game id to game.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Loads a game. `Ok(None)` if the id is unknown.
    async fn get(&self, id: &GameId) -> Result<Option<Game>, StoreError>;

    /// Stores a game under the given id, replacing any previous value.
    async fn set(&self, id: GameId, game: Game) -> Result<(), StoreError>;
}

/// Process-local store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameStore {
    games: Arc<RwLock<HashMap<GameId, Game>>>,
}

impl InMemoryGameStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored games.
    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    /// Returns true if no game is stored.
    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    #[instrument(skip(self))]
    async fn get(&self, id: &GameId) -> Result<Option<Game>, StoreError> {
        let game = self.games.read().await.get(id).cloned();
        if game.is_none() {
            debug!(game_id = %id, "Game not found");
        }
        Ok(game)
    }

    #[instrument(skip(self, game), fields(state = %game.state()))]
    async fn set(&self, id: GameId, game: Game) -> Result<(), StoreError> {
        self.games.write().await.insert(id, game);
        debug!("Game stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_core::Player;

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let store = InMemoryGameStore::new();
        assert!(store.get(&"nope".to_string()).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_replaces_and_clones_share() {
        let store = InMemoryGameStore::new();
        let view = store.clone();
        let created = Game::create("g1", Player::new("Pelle"));
        store.set("g1".to_string(), created.clone()).await.unwrap();
        assert_eq!(view.get(&"g1".to_string()).await.unwrap(), Some(created.clone()));

        let joined = created.join(Player::new("Lisa")).unwrap();
        store.set("g1".to_string(), joined.clone()).await.unwrap();
        assert_eq!(view.get(&"g1".to_string()).await.unwrap(), Some(joined));
        assert_eq!(view.len().await, 1);
    }

    #[test]
    fn test_error_tracks_location() {
        let err = StoreError::new("disk on fire");
        assert!(err.file.ends_with("store.rs"));
        assert!(err.to_string().starts_with("Store error: disk on fire"));
    }
}
