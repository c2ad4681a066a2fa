// ============================================================================
// Pomodoro API - Timer Handlers
// File: crates/pomodoro-api/src/handlers/timer.rs
// ============================================================================
//! Timer protocol endpoints

use axum::{extract::State, response::Response};

use pomodoro_core::TimerRequest;

use crate::adapter::{reply_response, FormParams};
use crate::state::AppState;

/// POST /GetTimer - `token?`; never creates a record
pub async fn get_timer(State(state): State<AppState>, FormParams(params): FormParams) -> Response {
    let reply = state
        .timer_service
        .get_timer(TimerRequest::from_params(&params))
        .await;
    reply_response(reply)
}

/// POST /SetTimer - `token?`, `minutes?`; creates on the first call per token
pub async fn set_timer(State(state): State<AppState>, FormParams(params): FormParams) -> Response {
    let reply = state
        .timer_service
        .set_timer(TimerRequest::from_params(&params))
        .await;
    reply_response(reply)
}
