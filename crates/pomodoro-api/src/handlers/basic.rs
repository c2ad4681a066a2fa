//! Root banner, not-found and panic handlers

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::any::Any;
use tracing::error;

use pomodoro_shared::constants::{NOT_FOUND_BODY, ROOT_BANNER};

/// GET / - liveness banner
pub async fn root() -> (StatusCode, &'static str) {
    (StatusCode::OK, ROOT_BANNER)
}

/// Any unmatched path or method
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

/// Echoes the panic message as a plain text 500.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown error".to_string()
    };
    error!("Handler panicked: {}", message);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        message,
    )
        .into_response()
}
