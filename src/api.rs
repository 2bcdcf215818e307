//! JSON REST API over [`GameService`].
//!
//! | Method | Path                   | Body                                   |
//! |--------|------------------------|----------------------------------------|
//! | POST   | `/api/games`           | `{"name": ...}`                        |
//! | GET    | `/api/games/{id}`      |                                        |
//! | POST   | `/api/games/{id}/join` | `{"name": ...}`                        |
//! | POST   | `/api/games/{id}/move` | `{"player": {"name": ...}, "move": ...}` |
//!
//! Every success returns the game's public view. Errors use a
//! `{"statusCode", "error", "message"}` body, including unknown paths and
//! unsupported methods, which answer 404.
//!
//! Bodies without a `content-type` header are parsed as JSON.

use crate::service::{GameService, ServiceError};
use crate::validation::{MoveRequest, PlayerRequest, ValidationError};
use axum::body::Bytes;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rps_core::{GameError, GameId, PublicGame};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use tracing::{debug, error, info, instrument, warn};

/// Path of the game collection.
pub const GAMES_PATH: &str = "/api/games";

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// HTTP status code.
    pub status_code: u16,
    /// Status reason phrase.
    pub error: String,
    /// Human-readable explanation.
    pub message: String,
}

/// Failure of an API request, mapped onto an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ApiError {
    /// Malformed or invalid payload (400).
    #[display("{}", _0)]
    BadRequest(String),
    /// Unknown game (404).
    #[display("{}", _0)]
    NotFound(String),
    /// Game state forbids the request (403).
    #[display("{}", _0)]
    Forbidden(String),
    /// Player name already taken (409).
    #[display("{}", _0)]
    Conflict(String),
    /// Anything unexpected (500).
    #[display("{}", _0)]
    Internal(String),
}

impl std::error::Error for ApiError {}

const INVALID_INPUT: &str = "Invalid request payload input";
const INVALID_JSON: &str = "Invalid request payload JSON format";

impl ApiError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(_) => ApiError::NotFound("Game does not exist".to_string()),
            ServiceError::Game(e @ GameError::GameNotJoinable)
            | ServiceError::Game(e @ GameError::MoveForbidden(_)) => {
                ApiError::Forbidden(e.to_string())
            }
            ServiceError::Game(e @ GameError::PlayerNameConflict) => {
                ApiError::Conflict(e.to_string())
            }
            ServiceError::Store(e) => {
                error!(error = %e, "Store failure");
                ApiError::Internal("An internal server error occurred".to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        debug!(reason = %err.reason, "Payload failed validation");
        ApiError::BadRequest(INVALID_INPUT.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        debug!(error = %err, "Payload rejected");
        match err.classify() {
            Category::Syntax | Category::Eof => ApiError::BadRequest(INVALID_JSON.to_string()),
            Category::Data | Category::Io => ApiError::BadRequest(INVALID_INPUT.to_string()),
        }
    }
}

/// JSON request body.
///
/// A missing `content-type` is treated as JSON; any other non-JSON media
/// type is rejected. An empty body is invalid input, not a syntax error.
#[derive(Debug, Clone)]
pub struct JsonPayload<T>(pub T);

impl<S, T> FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declared_json = match req.headers().get(header::CONTENT_TYPE) {
            None => true,
            Some(value) => value.to_str().map(is_json_media_type).unwrap_or(false),
        };

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            debug!(rejection = %rejection.body_text(), "Body unreadable");
            ApiError::BadRequest(INVALID_INPUT.to_string())
        })?;

        if !declared_json {
            debug!("Non-JSON content type");
            return Err(ApiError::BadRequest(INVALID_INPUT.to_string()));
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!("Empty payload");
            return Err(ApiError::BadRequest(INVALID_INPUT.to_string()));
        }

        Ok(JsonPayload(serde_json::from_slice(&bytes)?))
    }
}

fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), message = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), message = %self, "Request rejected");
        }
        let body = ErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the API router over the given service.
pub fn router(service: GameService) -> Router {
    Router::new()
        .route(GAMES_PATH, post(create_game))
        .route("/api/games/{id}", get(get_game))
        .route("/api/games/{id}/join", post(join_game))
        .route("/api/games/{id}/move", post(move_game))
        .route("/health", get(health))
        .method_not_allowed_fallback(not_found)
        .fallback(not_found)
        .with_state(service)
}

#[instrument(skip(service, request))]
async fn create_game(
    State(service): State<GameService>,
    JsonPayload(request): JsonPayload<PlayerRequest>,
) -> Result<Json<PublicGame>, ApiError> {
    let player = request.validate()?;
    let view = service.create_game(player).await?;
    info!(game_id = %view.id(), "Created game");
    Ok(Json(view))
}

#[instrument(skip(service))]
async fn get_game(
    State(service): State<GameService>,
    Path(id): Path<GameId>,
) -> Result<Json<PublicGame>, ApiError> {
    Ok(Json(service.get_game(&id).await?))
}

#[instrument(skip(service, request))]
async fn join_game(
    State(service): State<GameService>,
    Path(id): Path<GameId>,
    JsonPayload(request): JsonPayload<PlayerRequest>,
) -> Result<Json<PublicGame>, ApiError> {
    let player = request.validate()?;
    let view = service.join_game(&id, player).await?;
    info!(state = %view.state(), "Joined game");
    Ok(Json(view))
}

#[instrument(skip(service, request))]
async fn move_game(
    State(service): State<GameService>,
    Path(id): Path<GameId>,
    JsonPayload(request): JsonPayload<MoveRequest>,
) -> Result<Json<PublicGame>, ApiError> {
    let player_move = request.validate()?;
    let view = service.make_move(&id, player_move).await?;
    info!(state = %view.state(), "Move accepted");
    Ok(Json(view))
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}
