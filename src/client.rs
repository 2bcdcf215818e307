//! Type-safe HTTP client for the game API.

use crate::api::{ErrorBody, GAMES_PATH};
use crate::validation::{MoveRequest, PlayerRequest};
use rps_core::{Move, PublicGame};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Error returned by [`GameClient`].
#[derive(Debug, derive_more::Display)]
pub enum ClientError {
    /// Transport or decoding failure.
    #[display("HTTP error: {}", _0)]
    Http(reqwest::Error),

    /// The server answered with an error status.
    #[display("Server returned {}: {}", status, message)]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided message.
        message: String,
    },
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Http(e) => Some(e),
            ClientError::Api { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err)
    }
}

/// HTTP client bound to one server.
#[derive(Debug, Clone)]
pub struct GameClient {
    base_url: String,
    client: reqwest::Client,
}

impl GameClient {
    /// Creates a client for the server at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Creates a game and returns it; the view carries the new id.
    #[instrument(skip(self))]
    pub async fn create_game(&self, name: &str) -> Result<PublicGame, ClientError> {
        info!("Creating game");
        let url = format!("{}{}", self.base_url, GAMES_PATH);
        self.post(&url, &PlayerRequest::new(name)).await
    }

    /// Fetches the public view of a game.
    #[instrument(skip(self))]
    pub async fn get_game(&self, id: &str) -> Result<PublicGame, ClientError> {
        let url = format!("{}{}/{}", self.base_url, GAMES_PATH, id);
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    /// Joins a game.
    #[instrument(skip(self))]
    pub async fn join_game(&self, id: &str, name: &str) -> Result<PublicGame, ClientError> {
        info!("Joining game");
        let url = format!("{}{}/{}/join", self.base_url, GAMES_PATH, id);
        self.post(&url, &PlayerRequest::new(name)).await
    }

    /// Submits a move.
    #[instrument(skip(self))]
    pub async fn make_move(
        &self,
        id: &str,
        name: &str,
        choice: Move,
    ) -> Result<PublicGame, ClientError> {
        info!("Making move");
        let url = format!("{}{}/{}/move", self.base_url, GAMES_PATH, id);
        self.post(&url, &MoveRequest::new(name, choice)).await
    }

    async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<PublicGame, ClientError> {
        let response = self.client.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<PublicGame, ClientError> {
        let status = response.status();
        debug!(status = %status, "Got response");
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await?;
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => body.message,
            Err(_) => text,
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
