//! Load → transition → save orchestration around the game logic.

use crate::ids::IdGenerator;
use crate::store::{GameStore, StoreError};
use derive_new::new;
use rps_core::{Game, GameError, GameId, Player, PlayerMove, PublicGame};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Error returned by [`GameService`] operations.
#[derive(Debug, Clone, derive_more::Display)]
pub enum ServiceError {
    /// No game is stored under the id.
    #[display("Game does not exist: {}", _0)]
    NotFound(GameId),

    /// The game logic rejected the request.
    #[display("{}", _0)]
    Game(GameError),

    /// The store failed.
    #[display("{}", _0)]
    Store(StoreError),
}

impl From<GameError> for ServiceError {
    fn from(err: GameError) -> Self {
        ServiceError::Game(err)
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err)
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::NotFound(_) => None,
            ServiceError::Game(e) => Some(e),
            ServiceError::Store(e) => Some(e),
        }
    }
}

/// Game operations over an injected store and id generator.
///
/// Every mutating call loads the game, applies one transition and saves the
/// result. The load and save are separate store calls; concurrent requests
/// on one id are not serialized.
#[derive(Clone, new)]
pub struct GameService {
    store: Arc<dyn GameStore>,
    ids: Arc<dyn IdGenerator>,
}

impl std::fmt::Debug for GameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService").finish_non_exhaustive()
    }
}

impl GameService {
    /// Creates a game for `player` under a freshly generated id.
    #[instrument(skip(self, player), fields(creator = %player))]
    pub async fn create_game(&self, player: Player) -> Result<PublicGame, ServiceError> {
        let id = self.ids.next_id();
        let game = Game::create(id.clone(), player);
        let view = game.public_view();
        self.store.set(id.clone(), game).await?;
        info!(game_id = %id, "Game stored");
        Ok(view)
    }

    /// Returns the public view of a game.
    #[instrument(skip(self))]
    pub async fn get_game(&self, id: &GameId) -> Result<PublicGame, ServiceError> {
        Ok(self.load(id).await?.public_view())
    }

    /// Joins `player` to a game.
    #[instrument(skip(self, player), fields(joiner = %player))]
    pub async fn join_game(&self, id: &GameId, player: Player) -> Result<PublicGame, ServiceError> {
        let game = self.load(id).await?;
        let next = game.join(player)?;
        self.save(next).await
    }

    /// Records a move in a game.
    #[instrument(skip(self, player_move), fields(mover = %player_move.player()))]
    pub async fn make_move(
        &self,
        id: &GameId,
        player_move: PlayerMove,
    ) -> Result<PublicGame, ServiceError> {
        let game = self.load(id).await?;
        let next = game.make_move(player_move)?;
        self.save(next).await
    }

    async fn load(&self, id: &GameId) -> Result<Game, ServiceError> {
        match self.store.get(id).await? {
            Some(game) => Ok(game),
            None => {
                warn!(game_id = %id, "Unknown game");
                Err(ServiceError::NotFound(id.clone()))
            }
        }
    }

    async fn save(&self, game: Game) -> Result<PublicGame, ServiceError> {
        let view = game.public_view();
        self.store.set(game.id().clone(), game).await?;
        Ok(view)
    }
}
