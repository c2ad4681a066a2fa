//! Request and reply payloads of the timer protocol

use serde::{Deserialize, Serialize};

use pomodoro_shared::Params;

use crate::error::StoreError;

/// Decoded `{token?, minutes?}` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerRequest {
    /// `None` when absent or empty.
    pub token: Option<String>,
    /// Raw value as sent; not validated.
    pub minutes: Option<String>,
}

impl TimerRequest {
    pub fn new(token: Option<&str>, minutes: Option<&str>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()).map(str::to_string),
            minutes: minutes.map(str::to_string),
        }
    }

    pub fn from_params(params: &Params) -> Self {
        Self::new(params.non_empty("token"), params.get("minutes"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyError {
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl From<&StoreError> for ReplyError {
    fn from(err: &StoreError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
            status_code: err.status_code(),
        }
    }
}

/// `{success, token?, time?, minutes?, error?}`; absent fields are omitted
/// on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ReplyError>,
}

impl TimerReply {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn timer(token: String, time: Option<String>, minutes: Option<String>) -> Self {
        Self {
            success: true,
            token: Some(token),
            time,
            minutes,
            error: None,
        }
    }

    pub fn failure(err: &StoreError) -> Self {
        Self {
            success: false,
            error: Some(ReplyError::from(err)),
            ..Default::default()
        }
    }

    /// Status carried by the error, else 200.
    pub fn status_code(&self) -> u16 {
        self.error
            .as_ref()
            .and_then(|e| e.status_code)
            .unwrap_or(200)
    }

    /// Whether a timer is running from the client's point of view.
    pub fn has_timer(&self) -> bool {
        self.success && self.minutes.as_deref().is_some_and(|m| !m.is_empty())
    }
}
