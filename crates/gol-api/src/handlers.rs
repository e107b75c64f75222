//! REST API endpoint handlers for boards.
//!
//! Every handler builds a [`ConvergenceController`] over its own store
//! session, so concurrent requests never share staged writes.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/boards` | Create a board from its live cells |
//! | `GET` | `/api/boards/{board_id}` | Latest generation |
//! | `POST` | `/api/boards/{board_id}/next` | Advance one generation |
//! | `POST` | `/api/boards/{board_id}/next/{steps}` | Advance `steps` generations |
//! | `POST` | `/api/boards/{board_id}/final` | Advance until terminal or out of attempts |
//! | `POST` | `/api/boards/{board_id}/schedule` | Queue for background processing |
//!
//! [`ConvergenceController`]: gol_core::ConvergenceController

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use gol_core::SnapshotStore;
use gol_types::{BoardId, BoardStateView, Coordinate, CreateBoardResponse};
use tracing::{info, warn};
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies and query parameters
// ---------------------------------------------------------------------------

/// Body of `POST /api/boards`.
#[derive(Debug, serde::Deserialize, Validate)]
pub struct CreateBoardRequest {
    /// Initial live cells as `[row, col]` pairs.
    #[validate(
        required(message = "Live cells were not set."),
        length(min = 1, message = "Live cells cannot be empty.")
    )]
    pub live_cells: Option<Vec<Coordinate>>,
}

/// Query parameters for `POST /api/boards/{board_id}/final`.
#[derive(Debug, serde::Deserialize)]
pub struct FinalStateQuery {
    /// Attempt budget; defaults to the configured value.
    pub max_attempts: Option<u64>,
}

// ---------------------------------------------------------------------------
// POST /api/boards -- create a board
// ---------------------------------------------------------------------------

/// Create a board and return its identifier.
pub async fn create_board<S: SnapshotStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateBoardRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::invalid(e.body_text()))?;
    request.validate()?;

    let snapshot = state.controller().start_board(request.live_cells).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBoardResponse {
            board_id: snapshot.board_id,
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /api/boards/{board_id} -- latest generation
// ---------------------------------------------------------------------------

/// Return the latest generation of a board.
pub async fn get_board<S: SnapshotStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(board_id): Path<String>,
) -> Result<Json<BoardStateView>, ApiError> {
    let board_id = parse_board_id(&board_id)?;
    let snapshot = state.controller().latest(board_id).await?;
    Ok(Json(snapshot.to_view()))
}

// ---------------------------------------------------------------------------
// POST /api/boards/{board_id}/next[/{steps}] -- advance
// ---------------------------------------------------------------------------

/// Advance a board by one generation.
pub async fn next_generation<S: SnapshotStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(board_id): Path<String>,
) -> Result<Json<BoardStateView>, ApiError> {
    let board_id = parse_board_id(&board_id)?;
    advance(&state, board_id, 1, false).await
}

/// Advance a board by `steps` generations without stopping early.
pub async fn next_generations<S: SnapshotStore>(
    State(state): State<Arc<AppState<S>>>,
    Path((board_id, steps)): Path<(String, String)>,
) -> Result<Json<BoardStateView>, ApiError> {
    let board_id = parse_board_id(&board_id)?;
    let steps = parse_budget("Steps", &steps, state.board.max_iterations)?;
    advance(&state, board_id, steps, false).await
}

// ---------------------------------------------------------------------------
// POST /api/boards/{board_id}/final -- run to a conclusion
// ---------------------------------------------------------------------------

/// Advance a board until it reaches a terminal status.
///
/// Fails with 422 when the attempt budget runs out first; the generations
/// computed so far stay stored.
pub async fn final_state<S: SnapshotStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(board_id): Path<String>,
    query: Result<Query<FinalStateQuery>, QueryRejection>,
) -> Result<Json<BoardStateView>, ApiError> {
    let board_id = parse_board_id(&board_id)?;
    let Query(query) = query.map_err(|e| ApiError::invalid(e.body_text()))?;

    let attempts = query
        .max_attempts
        .unwrap_or(state.board.final_state_default_attempts);
    let attempts = check_budget("Max attempts", attempts, state.board.max_iterations)?;

    advance(&state, board_id, attempts, true).await
}

// ---------------------------------------------------------------------------
// POST /api/boards/{board_id}/schedule -- background processing
// ---------------------------------------------------------------------------

/// Queue a board for a worker to run to completion.
pub async fn schedule_board<S: SnapshotStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(board_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let board_id = parse_board_id(&board_id)?;

    let scheduler = state.scheduler.as_ref().ok_or_else(|| {
        ApiError::Unavailable("Background processing is not available.".to_owned())
    })?;

    // Reject unknown boards before anything reaches the queue.
    state.controller().latest(board_id).await?;

    scheduler.schedule(board_id).await.map_err(|e| {
        warn!(%board_id, error = %e, "Failed to schedule board");
        ApiError::Unavailable("Background processing is not available.".to_owned())
    })?;

    info!(%board_id, "Board scheduled for background processing");
    Ok((StatusCode::ACCEPTED, Json(CreateBoardResponse { board_id })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn advance<S: SnapshotStore>(
    state: &AppState<S>,
    board_id: BoardId,
    iterations: u64,
    stop_at_terminal: bool,
) -> Result<Json<BoardStateView>, ApiError> {
    let snapshot = state
        .controller()
        .process(board_id, iterations, stop_at_terminal, &state.shutdown)
        .await?;
    Ok(Json(snapshot.to_view()))
}

/// Parse a board identifier from the request path.
fn parse_board_id(raw: &str) -> Result<BoardId, ApiError> {
    let board_id: BoardId = raw
        .parse()
        .map_err(|e| ApiError::invalid(format!("Board id '{raw}' is not valid: {e}")))?;
    if board_id.is_nil() {
        return Err(ApiError::invalid("Board id was not set."));
    }
    Ok(board_id)
}

/// Parse a step count or attempt budget from the request path.
fn parse_budget(name: &str, raw: &str, max: u64) -> Result<u64, ApiError> {
    let value = raw
        .parse::<u64>()
        .ok()
        .ok_or_else(|| budget_error(name, max))?;
    check_budget(name, value, max)
}

fn check_budget(name: &str, value: u64, max: u64) -> Result<u64, ApiError> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(budget_error(name, max))
    }
}

fn budget_error(name: &str, max: u64) -> ApiError {
    ApiError::invalid(format!("{name} must be between 1 and {max}."))
}
