//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs the game id and basic result info.

use std::sync::Arc;
use axum::{
  extract::{rejection::JsonRejection, Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument};

use crate::error::{GameError, SessionError};
use crate::game::Action;
use crate::ladder::MONEY_LADDER;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

/// JSON error body with a status derived from the error kind.
pub enum ApiError {
  Session(SessionError),
  /// Request body that does not decode to the expected type.
  Body(JsonRejection),
}

impl From<SessionError> for ApiError {
  fn from(e: SessionError) -> Self {
    Self::Session(e)
  }
}

impl From<JsonRejection> for ApiError {
  fn from(e: JsonRejection) -> Self {
    Self::Body(e)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, error) = match self {
      ApiError::Session(e) => {
        let status = match &e {
          SessionError::UnknownGame(_) => StatusCode::NOT_FOUND,
          SessionError::Stopped => StatusCode::GONE,
          SessionError::Game(GameError::InsufficientQuestions { .. } | GameError::EmptyBank) => StatusCode::CONFLICT,
          SessionError::Game(GameError::LevelOutOfRange(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, e.to_string())
      }
      ApiError::Body(rejection) => (rejection.status(), rejection.body_text()),
    };
    (status, Json(ErrorOut { error })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info")]
pub async fn http_get_ladder() -> impl IntoResponse { Json(&MONEY_LADDER[..]) }

#[instrument(level = "info", skip(state))]
pub async fn http_post_game(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let (game_id, _, snapshot) = new_game(&state).await;
  info!(target: "game", %game_id, "HTTP game created");
  (StatusCode::CREATED, Json(NewGameOut { game_id, state: snapshot }))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_game(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<Snapshot>, ApiError> {
  Ok(Json(game_snapshot(&state, &id).await?))
}

#[instrument(level = "info", skip(state, body), fields(%id))]
pub async fn http_post_action(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  body: Result<Json<Action>, JsonRejection>,
) -> Result<Json<Snapshot>, ApiError> {
  let Json(action) = body?;
  let snapshot = apply_action(&state, &id, action).await?;
  info!(target: "game", game_id = %id, phase = ?snapshot.state.phase, "HTTP action applied");
  Ok(Json(snapshot))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_delete_game(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  end_game(&state, &id).await?;
  Ok(StatusCode::NO_CONTENT)
}
