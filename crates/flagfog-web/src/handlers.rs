//! Request handlers: thin request/response mapping over the manager.

use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use flagfog_core::{next_reset_secs, GameError};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// `GET /api/game-state`
pub async fn game_state(State(state): State<Arc<AppState>>) -> Response {
    match state.manager.get_todays_puzzle().await {
        Ok(puzzle) => {
            let current_date = state.manager.current_stamp().await.map(|s| s.to_string());
            Json(json!({
                "blurred_image": puzzle.blurred_image,
                "game_id": puzzle.game_id(),
                "next_reset": next_reset_secs(Utc::now()),
                "current_date": current_date,
            }))
            .into_response()
        }
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// `GET /api/player-names`
///
/// Serves the sorted name list the country source maintains. When the
/// backing file is missing it is lazily created with an empty array.
pub async fn player_names(State(state): State<Arc<AppState>>) -> Response {
    match std::fs::read_to_string(&state.names_file) {
        Ok(content) => match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(names) => Json(names).into_response(),
            Err(e) => {
                tracing::warn!(
                    "corrupt name list {}: {}",
                    state.names_file.display(),
                    e
                );
                Json(json!([])).into_response()
            }
        },
        Err(_) => {
            if let Err(e) = std::fs::write(&state.names_file, "[]") {
                tracing::warn!(
                    "failed to create name list {}: {}",
                    state.names_file.display(),
                    e
                );
            }
            Json(json!([])).into_response()
        }
    }
}

/// `POST /api/guess` body.
#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    #[serde(default)]
    pub guess: String,
    #[serde(default)]
    pub hint_level: u8,
}

/// `POST /api/guess`
pub async fn submit_guess(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GuessRequest>,
) -> Response {
    match state
        .manager
        .evaluate_guess(&request.guess, request.hint_level)
        .await
    {
        Ok(result) => {
            let mut body = json!({
                "correct": result.correct,
                "hint_level": result.hint_level,
                "next_reset": next_reset_secs(Utc::now()),
                "hint_text": result.hint_text,
                "hint_image": result.hint_image,
                "player_name": result.player_name,
            });
            if let Some(url) = result.image_url {
                body["image_url"] = json!(url);
            }
            Json(body).into_response()
        }
        Err(GameError::NoActivePuzzle) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No active game" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
