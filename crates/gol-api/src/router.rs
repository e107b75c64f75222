//! Axum router construction for the board API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use gol_core::SnapshotStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the board API.
///
/// The router includes:
/// - `POST /api/boards` -- create a board
/// - `GET /api/boards/{board_id}` -- latest generation
/// - `POST /api/boards/{board_id}/next` -- advance one generation
/// - `POST /api/boards/{board_id}/next/{steps}` -- advance several
/// - `POST /api/boards/{board_id}/final` -- advance until terminal
/// - `POST /api/boards/{board_id}/schedule` -- queue for a worker
///
/// CORS allows any origin.
pub fn build_router<S: SnapshotStore>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/boards", post(handlers::create_board::<S>))
        .route("/api/boards/{board_id}", get(handlers::get_board::<S>))
        .route(
            "/api/boards/{board_id}/next",
            post(handlers::next_generation::<S>),
        )
        .route(
            "/api/boards/{board_id}/next/{steps}",
            post(handlers::next_generations::<S>),
        )
        .route(
            "/api/boards/{board_id}/final",
            post(handlers::final_state::<S>),
        )
        .route(
            "/api/boards/{board_id}/schedule",
            post(handlers::schedule_board::<S>),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
