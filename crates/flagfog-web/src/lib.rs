//! # Flagfog Web
//!
//! Thin HTTP layer over the daily puzzle manager:
//!
//! - `GET /api/game-state` - today's blurred flag, game id and reset timer
//! - `GET /api/player-names` - sorted country names for autocomplete
//! - `POST /api/guess` - guess evaluation with hint progression
//!
//! The route layer only maps requests and responses; all game state lives
//! in the injected [`DailyPuzzleManager`](flagfog_game::DailyPuzzleManager).

pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Create the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/game-state", get(handlers::game_state))
        .route("/api/player-names", get(handlers::player_names))
        .route("/api/guess", post(handlers::submit_guess))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve(state: Arc<AppState>, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("flagfog listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
