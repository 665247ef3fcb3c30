//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. Once bound to a game, the socket also receives a
//! `state` message on every change of that game, including timed transitions.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};

use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage, Snapshot};
use crate::runner::GameHandle;
use crate::state::AppState;

/// Game this socket follows. Only the id and a receiver are held, so deleting
/// the game stops its runner and ends the subscription.
struct Binding {
  game_id: String,
  updates: watch::Receiver<Snapshot>,
}

enum Event {
  Client(Option<Result<Message, axum::Error>>),
  Update(Result<(), watch::error::RecvError>),
}

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "millionaire_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "millionaire_backend", "WebSocket connected");
  let mut binding: Option<Binding> = None;
  // Games created by this socket; they end when it disconnects.
  let mut owned: Vec<String> = Vec::new();

  'session: loop {
    let event = match binding.as_mut() {
      Some(b) => tokio::select! {
        msg = socket.recv() => Event::Client(msg),
        changed = b.updates.changed() => Event::Update(changed),
      },
      None => Event::Client(socket.recv().await),
    };

    let replies = match event {
      Event::Client(Some(Ok(Message::Text(txt)))) => match serde_json::from_str::<ClientWsMessage>(&txt) {
        Ok(incoming) => {
          debug!(target: "millionaire_backend", "WS received: {:?}", &incoming);
          handle_client_ws(incoming, &state, &mut binding, &mut owned).await
        }
        Err(e) => vec![ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) }],
      },
      Event::Client(Some(Ok(Message::Ping(payload)))) => {
        let _ = socket.send(Message::Pong(payload)).await;
        continue;
      }
      Event::Client(Some(Ok(Message::Close(_)))) | Event::Client(None) => break,
      Event::Client(Some(Err(e))) => {
        error!(target: "millionaire_backend", error = %e, "WS receive error");
        break;
      }
      Event::Client(Some(Ok(_))) => continue,
      Event::Update(Ok(())) => match binding.as_mut() {
        Some(b) => vec![ServerWsMessage::State { state: b.updates.borrow_and_update().clone() }],
        None => continue,
      },
      Event::Update(Err(_)) => {
        // The runner went away (game deleted); stop following it.
        let game_id = binding.take().map(|b| b.game_id).unwrap_or_default();
        vec![ServerWsMessage::Error { message: format!("Game {} has ended", game_id) }]
      }
    };

    for reply in replies {
      let out = serde_json::to_string(&reply).unwrap_or_else(|e| {
        serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
      });
      if let Err(e) = socket.send(Message::Text(out)).await {
        error!(target: "millionaire_backend", error = %e, "WS send error");
        break 'session;
      }
    }
  }
  release_owned(&state, owned).await;
  info!(target: "millionaire_backend", "WebSocket disconnected");
}

/// End every game this socket created and still registered.
async fn release_owned(state: &AppState, owned: Vec<String>) {
  for game_id in owned {
    if end_game(state, &game_id).await.is_ok() {
      debug!(target: "game", %game_id, "Released game of closed socket");
    }
  }
}

/// Dispatch one client message. State pushes for the bound game come from its
/// watch channel, so a successful action produces no direct reply.
#[instrument(level = "info", skip(state, binding, owned))]
async fn handle_client_ws(
  msg: ClientWsMessage,
  state: &AppState,
  binding: &mut Option<Binding>,
  owned: &mut Vec<String>,
) -> Vec<ServerWsMessage> {
  match msg {
    ClientWsMessage::Ping => vec![ServerWsMessage::Pong],

    ClientWsMessage::NewGame => {
      let (game_id, handle, _) = new_game(state).await;
      info!(target: "game", %game_id, "WS game created");
      owned.push(game_id.clone());
      bind(binding, game_id, &handle)
    }

    ClientWsMessage::Join { game_id } => match game_handle(state, &game_id).await {
      Ok(handle) => {
        info!(target: "game", %game_id, "WS joined game");
        bind(binding, game_id, &handle)
      }
      Err(e) => vec![ServerWsMessage::Error { message: e.to_string() }],
    },

    ClientWsMessage::Action { action } => {
      let Some(b) = binding.as_ref() else {
        return vec![ServerWsMessage::Error { message: "Not bound to a game; send new_game or join first".into() }];
      };
      match apply_action(state, &b.game_id, action).await {
        Ok(_) => Vec::new(),
        Err(e) => vec![ServerWsMessage::Error { message: e.to_string() }],
      }
    }
  }
}

fn bind(binding: &mut Option<Binding>, game_id: String, handle: &GameHandle) -> Vec<ServerWsMessage> {
  let mut updates = handle.subscribe();
  let snapshot = updates.borrow_and_update().clone();
  *binding = Some(Binding { game_id: game_id.clone(), updates });
  vec![
    ServerWsMessage::Joined { game_id },
    ServerWsMessage::State { state: snapshot },
  ]
}
