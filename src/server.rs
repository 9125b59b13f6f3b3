//! HTTP request layer.
//!
//! Parses untyped input into typed commands, hands them to the
//! [`GameService`], and serializes records or typed errors back out. No
//! game logic lives here; every failure kind maps to one status code and a
//! stable error tag, and nothing is retried.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::engine::{GameRecord, Player};
use crate::service::{GameService, ServiceError};

/// Request body for making a move.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MakeMoveRequest {
    /// Board position, 0-8 row-major.
    pub position: usize,
    /// The player making the move.
    pub player: Player,
}

/// Error response wrapper translating service failures to HTTP.
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Move(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = json!({
            "error": self.0.kind(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

/// Builds the application router over the given service.
pub fn router(service: GameService) -> Router {
    Router::new()
        .route("/games", post(create_game).get(list_games))
        .route("/games/{id}", get(get_game))
        .route("/games/{id}/moves", post(make_move))
        .route("/games/{id}/reset", post(reset_game))
        .with_state(service)
}

#[instrument(skip(service))]
async fn create_game(
    State(service): State<GameService>,
) -> Result<(StatusCode, Json<GameRecord>), ApiError> {
    let record = service.create()?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[instrument(skip(service))]
async fn list_games(
    State(service): State<GameService>,
) -> Result<Json<Vec<GameRecord>>, ApiError> {
    Ok(Json(service.list()?))
}

#[instrument(skip(service))]
async fn get_game(
    State(service): State<GameService>,
    Path(id): Path<i32>,
) -> Result<Json<GameRecord>, ApiError> {
    let record = service.get(id)?.ok_or(ServiceError::NotFound { id })?;
    Ok(Json(record))
}

#[instrument(skip(service))]
async fn make_move(
    State(service): State<GameService>,
    Path(id): Path<i32>,
    Json(request): Json<MakeMoveRequest>,
) -> Result<Json<GameRecord>, ApiError> {
    let record = service.make_move(id, request.position, request.player)?;
    Ok(Json(record))
}

#[instrument(skip(service))]
async fn reset_game(
    State(service): State<GameService>,
    Path(id): Path<i32>,
) -> Result<Json<GameRecord>, ApiError> {
    Ok(Json(service.reset(id)?))
}
