//! HTTP client for the timer endpoints

use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use tracing::debug;

use pomodoro_core::TimerReply;

use crate::error::ClientError;

pub struct TimerClient {
    client: Client,
    base_url: String,
}

impl TimerClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(10)).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn hello(&self) -> Result<TimerReply, ClientError> {
        self.post("/Hello", &[]).await
    }

    pub async fn get_timer(&self, token: Option<&str>) -> Result<TimerReply, ClientError> {
        self.post("/GetTimer", &[("token", token.unwrap_or_default())]).await
    }

    pub async fn set_timer(&self, token: Option<&str>, minutes: u32) -> Result<TimerReply, ClientError> {
        let minutes = minutes.to_string();
        self.post(
            "/SetTimer",
            &[("token", token.unwrap_or_default()), ("minutes", minutes.as_str())],
        )
        .await
    }

    async fn post(&self, path: &str, params: &[(&str, &str)]) -> Result<TimerReply, ClientError> {
        let body = serde_urlencoded::to_string(params)?;
        debug!("POST {}{}", self.base_url, path);

        let reply = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?
            .json::<TimerReply>()
            .await?;
        Ok(reply)
    }
}
