//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! Handlers only translate transport details; game lookup, creation and
//! action dispatch live here.

use tracing::{debug, info, instrument, warn};

use crate::error::SessionError;
use crate::game::Action;
use crate::protocol::Snapshot;
use crate::runner::GameHandle;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn new_game(state: &AppState) -> (String, GameHandle, Snapshot) {
  let (id, handle) = state.create_game().await;
  let snapshot = handle.snapshot();
  (id, handle, snapshot)
}

#[instrument(level = "info", skip(state), fields(%game_id))]
pub async fn game_handle(state: &AppState, game_id: &str) -> Result<GameHandle, SessionError> {
  state
    .get_game(game_id)
    .await
    .ok_or_else(|| SessionError::UnknownGame(game_id.to_string()))
}

#[instrument(level = "info", skip(state), fields(%game_id))]
pub async fn game_snapshot(state: &AppState, game_id: &str) -> Result<Snapshot, SessionError> {
  Ok(game_handle(state, game_id).await?.snapshot())
}

#[instrument(level = "info", skip(state, action), fields(%game_id, action = action.name()))]
pub async fn apply_action(state: &AppState, game_id: &str, action: Action) -> Result<Snapshot, SessionError> {
  let handle = game_handle(state, game_id).await?;
  let name = action.name();
  match handle.apply(action).await {
    Ok(snapshot) => {
      debug!(target: "game", %game_id, action = name, phase = ?snapshot.state.phase, "Action handled");
      Ok(snapshot)
    }
    Err(e) => {
      warn!(target: "game", %game_id, action = name, error = %e, "Action failed");
      Err(e)
    }
  }
}

#[instrument(level = "info", skip(state), fields(%game_id))]
pub async fn end_game(state: &AppState, game_id: &str) -> Result<(), SessionError> {
  if state.remove_game(game_id).await {
    info!(target: "game", %game_id, "Game ended by client");
    Ok(())
  } else {
    Err(SessionError::UnknownGame(game_id.to_string()))
  }
}
