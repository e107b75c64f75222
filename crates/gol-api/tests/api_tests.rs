//! Integration tests for the board API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server, over an in-memory snapshot store.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use gol_api::{AppState, build_router};
use gol_core::InMemorySnapshotStore;
use gol_core::config::BoardConfig;
use serde_json::{Value, json};
use tower::ServiceExt;

const BLINKER: &str = "[[1,0],[1,1],[1,2]]";
const BLOCK: &str = "[[0,0],[0,1],[1,0],[1,1]]";
const GLIDER: &str = "[[0,1],[1,2],[2,0],[2,1],[2,2]]";

fn make_state() -> Arc<AppState<InMemorySnapshotStore>> {
    let board = BoardConfig {
        max_iterations: 100,
        final_state_default_attempts: 20,
    };
    Arc::new(AppState::new(InMemorySnapshotStore::new(), board))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    state: &Arc<AppState<InMemorySnapshotStore>>,
    request: Request<Body>,
) -> (StatusCode, Value) {
    let response = build_router(Arc::clone(state))
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn post(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn create(state: &Arc<AppState<InMemorySnapshotStore>>, cells: &str) -> String {
    let body = format!(r#"{{"live_cells": {cells}}}"#);
    let (status, json) = send(state, post_json("/api/boards", &body)).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["board_id"].as_str().unwrap().to_owned()
}

// =============================================================================
// Create / read
// =============================================================================

#[tokio::test]
async fn test_create_then_get_board() {
    let state = make_state();
    let id = create(&state, "[[2,2],[0,1],[0,1]]").await;

    let (status, json) = send(&state, get(&format!("/api/boards/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["board_id"], id);
    assert_eq!(json["iteration"], 0);
    assert_eq!(json["status"], "NotFinished");
    assert_eq!(json["live_cells"], json!([[0, 1], [2, 2]]));
}

#[tokio::test]
async fn test_create_without_cells_is_rejected() {
    let state = make_state();

    let (status, json) = send(&state, post_json("/api/boards", "{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "One or more validation errors occurred.");
    assert_eq!(json["errors"], json!(["Live cells were not set."]));
    assert!(json["timestamp"].is_string());

    let (status, json) = send(&state, post_json("/api/boards", r#"{"live_cells": []}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"], json!(["Live cells cannot be empty."]));
}

#[tokio::test]
async fn test_create_with_malformed_body_is_rejected() {
    let state = make_state();
    let (status, json) = send(
        &state,
        post_json("/api/boards", r#"{"live_cells": [[1, 2, 3]]}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_get_unknown_board_is_not_found() {
    let state = make_state();
    let id = gol_types::BoardId::new();
    let (status, json) = send(&state, get(&format!("/api/boards/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], format!("board {id} was not found"));
    assert_eq!(json["errors"], json!([]));
}

#[tokio::test]
async fn test_invalid_board_ids_are_rejected() {
    let state = make_state();

    let (status, json) = send(
        &state,
        get("/api/boards/00000000-0000-0000-0000-000000000000"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"], json!(["Board id was not set."]));

    let (status, _) = send(&state, get("/api/boards/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Advancing
// =============================================================================

#[tokio::test]
async fn test_next_advances_one_generation() {
    let state = make_state();
    let id = create(&state, BLINKER).await;

    let (status, json) = send(&state, post(&format!("/api/boards/{id}/next"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["iteration"], 1);
    assert_eq!(json["live_cells"], json!([[0, 1], [1, 1], [2, 1]]));
    assert_eq!(json["status"], "NotFinished");
}

#[tokio::test]
async fn test_next_steps_runs_past_terminal() {
    let state = make_state();
    let id = create(&state, BLINKER).await;

    let (status, json) = send(&state, post(&format!("/api/boards/{id}/next/5"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["iteration"], 5);
    assert_eq!(json["status"], "Oscillatory");
}

#[tokio::test]
async fn test_next_steps_out_of_range() {
    let state = make_state();
    let id = create(&state, BLINKER).await;

    for steps in ["0", "101", "-3", "lots"] {
        let (status, json) = send(&state, post(&format!("/api/boards/{id}/next/{steps}"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "steps={steps}");
        assert_eq!(json["errors"], json!(["Steps must be between 1 and 100."]));
    }

    // Nothing was written by the rejected requests.
    let history = state.store.history(id.parse().unwrap()).await;
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_final_stops_at_terminal() {
    let state = make_state();
    let id = create(&state, BLOCK).await;

    let (status, json) = send(&state, post(&format!("/api/boards/{id}/final"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["iteration"], 1);
    assert_eq!(json["status"], "Stable");
}

#[tokio::test]
async fn test_final_without_conclusion_is_unprocessable() {
    let state = make_state();
    let id = create(&state, GLIDER).await;

    let (status, json) = send(
        &state,
        post(&format!("/api/boards/{id}/final?max_attempts=3")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json["message"],
        "After 3 iterations, the board did not go to conclusion."
    );

    // Generations computed before giving up stay stored.
    let (_, json) = send(&state, get(&format!("/api/boards/{id}"))).await;
    assert_eq!(json["iteration"], 3);
}

#[tokio::test]
async fn test_final_uses_configured_default_attempts() {
    let state = make_state();
    let id = create(&state, GLIDER).await;

    let (status, json) = send(&state, post(&format!("/api/boards/{id}/final"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json["message"],
        "After 20 iterations, the board did not go to conclusion."
    );
}

#[tokio::test]
async fn test_final_attempts_out_of_range() {
    let state = make_state();
    let id = create(&state, BLOCK).await;

    let (status, json) = send(
        &state,
        post(&format!("/api/boards/{id}/final?max_attempts=0")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["errors"],
        json!(["Max attempts must be between 1 and 100."])
    );
}

#[tokio::test]
async fn test_advancing_unknown_board_is_not_found() {
    let state = make_state();
    let id = gol_types::BoardId::new();
    let (status, _) = send(&state, post(&format!("/api/boards/{id}/next/3"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shutdown_cancels_processing() {
    let state = make_state();
    let id = create(&state, BLINKER).await;
    state.shutdown.cancel();

    let (status, _) = send(&state, post(&format!("/api/boards/{id}/next"))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

// =============================================================================
// Scheduling
// =============================================================================

#[tokio::test]
async fn test_schedule_without_queue_is_unavailable() {
    let state = make_state();
    let id = create(&state, BLINKER).await;

    let (status, json) = send(&state, post(&format!("/api/boards/{id}/schedule"))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["message"], "Background processing is not available.");
}
