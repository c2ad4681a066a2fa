//! Request adapter: form-encoded bodies in, JSON replies out

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use pomodoro_core::TimerReply;
use pomodoro_shared::Params;

/// Decodes a form-urlencoded body. Anything undecodable yields an empty
/// mapping; missing parameters are left for the operation to handle.
pub fn decode_params(body: &[u8]) -> Params {
    match serde_urlencoded::from_bytes::<Vec<(String, String)>>(body) {
        Ok(pairs) => Params::from_pairs(pairs),
        Err(e) => {
            debug!("Undecodable form body treated as empty: {}", e);
            Params::new()
        }
    }
}

/// Extractor for the form body, independent of the request content type.
#[derive(Debug, Clone)]
pub struct FormParams(pub Params);

impl<S> FromRequest<S> for FormParams
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(FormParams(decode_params(&body)))
    }
}

/// Writes the reply with the status its error carries, else 200.
pub fn reply_response(reply: TimerReply) -> Response {
    let status = StatusCode::from_u16(reply.status_code()).unwrap_or(StatusCode::OK);
    (status, Json(reply)).into_response()
}
