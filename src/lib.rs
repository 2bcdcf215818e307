//! Rock-paper-scissors game server.
//!
//! Wraps the [`rps_core`] state machine in a JSON REST API with an
//! injectable store, plus a matching HTTP client.
//!
//! # Architecture
//!
//! - **Api**: axum router, payload validation, error-to-status mapping
//! - **Service**: load → transition → save around the game logic
//! - **Store**: async key-value persistence (in-memory by default)
//! - **Client**: reqwest client for the same API
//!
//! # Example
//!
//! ```no_run
//! use rps_server::{GameClient, Move};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = GameClient::new("http://localhost:3000");
//! let game = client.create_game("Pelle").await?;
//! client.join_game(game.id(), "Lisa").await?;
//! client.make_move(game.id(), "Pelle", Move::Rock).await?;
//! let finished = client.make_move(game.id(), "Lisa", Move::Scissors).await?;
//! println!("{:?}", finished.result());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod cli;
mod client;
mod config;
mod ids;
mod server;
mod service;
mod store;
mod validation;

// Crate-level exports - HTTP API
pub use api::{ApiError, ErrorBody, GAMES_PATH, JsonPayload, router};

// Crate-level exports - Command line
pub use cli::{Cli, Command, DEFAULT_SERVER_URL};

// Crate-level exports - Client
pub use client::{ClientError, GameClient};

// Crate-level exports - Configuration
pub use config::{ConfigError, HOST_ENV, LOG_ENV, PORT_ENV, ServerConfig};

// Crate-level exports - Ids
pub use ids::{IdGenerator, UuidGenerator};

// Crate-level exports - Server
pub use server::{app, run, serve};

// Crate-level exports - Service
pub use service::{GameService, ServiceError};

// Crate-level exports - Storage
pub use store::{GameStore, InMemoryGameStore, StoreError};

// Crate-level exports - Validation
pub use validation::{MAX_NAME_LEN, MovePlayer, MoveRequest, PlayerRequest, ValidationError};

// Crate-level exports - Game types
pub use rps_core::{
    Game, GameError, GameId, GameResult, GameState, Move, Outcome, Player, PlayerMove, PublicGame,
};
