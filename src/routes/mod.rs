//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - game API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/ladder", get(http::http_get_ladder))
        .route("/api/v1/games", post(http::http_post_game))
        .route(
            "/api/v1/games/:id",
            get(http::http_get_game).delete(http::http_delete_game),
        )
        .route("/api/v1/games/:id/actions", post(http::http_post_action))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::seeds::seed_questions;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::with_parts(seed_questions(), GameConfig { seed: Some(11), ..GameConfig::default() });
        build_router(Arc::new(state))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    #[tokio::test]
    async fn health_and_ladder() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));

        let (_, ladder) = call(&app, Method::GET, "/api/v1/ladder", None).await;
        let levels = ladder.as_array().unwrap();
        assert_eq!(levels.len(), 15);
        assert_eq!(levels[4]["payout"], 1000);
        assert_eq!(levels[4]["safeHaven"], true);
    }

    #[tokio::test]
    async fn game_lifecycle_over_http() {
        let app = app();
        let (status, created) = call(&app, Method::POST, "/api/v1/games", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["state"]["phase"], "intro");
        let id = created["gameId"].as_str().unwrap().to_string();

        let actions = format!("/api/v1/games/{id}/actions");
        let (status, started) = call(&app, Method::POST, &actions, Some(json!({ "type": "start" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(started["phase"], "playing");
        assert_eq!(started["questionNumber"], 1);

        let option = started["question"]["options"][0]["id"].as_str().unwrap().to_string();
        let (_, selected) = call(
            &app,
            Method::POST,
            &actions,
            Some(json!({ "type": "select_answer", "optionId": option })),
        )
        .await;
        assert_eq!(selected["selectedAnswers"], json!([option]));

        let (_, fetched) = call(&app, Method::GET, &format!("/api/v1/games/{id}"), None).await;
        assert_eq!(fetched["selectedAnswers"], json!([option]));

        let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/games/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = call(&app, Method::GET, &format!("/api/v1/games/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("unknown game"));
    }

    #[tokio::test]
    async fn start_without_enough_questions_conflicts() {
        let bank = seed_questions().into_iter().filter(|q| q.difficulty >= 4).collect();
        let app = build_router(Arc::new(AppState::with_parts(bank, GameConfig::default())));

        let (_, created) = call(&app, Method::POST, "/api/v1/games", None).await;
        let id = created["gameId"].as_str().unwrap();
        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/v1/games/{id}/actions"),
            Some(json!({ "type": "start" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("not enough questions"));
    }

    #[tokio::test]
    async fn unknown_action_is_rejected() {
        let app = app();
        let (_, created) = call(&app, Method::POST, "/api/v1/games", None).await;
        let id = created["gameId"].as_str().unwrap();
        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/v1/games/{id}/actions"),
            Some(json!({ "type": "double_or_nothing" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("double_or_nothing"));
    }

    #[tokio::test]
    async fn malformed_action_body_is_a_json_error() {
        let app = app();
        let (_, created) = call(&app, Method::POST, "/api/v1/games", None).await;
        let id = created["gameId"].as_str().unwrap();
        let req = Request::builder()
            .method(Method::POST)
            .uri(format!("/api/v1/games/{id}/actions"))
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());
    }
}
