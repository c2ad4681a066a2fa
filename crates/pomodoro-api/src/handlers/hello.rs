//! POST /Hello - health check

use axum::{extract::State, response::Response};

use crate::adapter::reply_response;
use crate::state::AppState;

pub async fn hello(State(state): State<AppState>) -> Response {
    reply_response(state.timer_service.hello())
}
