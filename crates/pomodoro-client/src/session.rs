//! Client flow: cached token in, fresh reply out, token cached on success

use tracing::warn;

use pomodoro_core::TimerReply;

use crate::api_client::TimerClient;
use crate::error::ClientError;
use crate::session_cache::SessionCache;

pub struct PomodoroSession {
    client: TimerClient,
    cache: SessionCache,
}

impl PomodoroSession {
    pub fn new(client: TimerClient, cache: SessionCache) -> Self {
        Self { client, cache }
    }

    /// Re-fetches the timer for the cached token.
    pub async fn refresh(&self) -> Result<TimerReply, ClientError> {
        let token = self.cache.get_token()?;
        let reply = self.client.get_timer(token.as_deref()).await?;
        self.remember(&reply)?;
        Ok(reply)
    }

    pub async fn start(&self, minutes: u32) -> Result<TimerReply, ClientError> {
        let token = self.cache.get_token()?;
        let reply = self.client.set_timer(token.as_deref(), minutes).await?;
        self.remember(&reply)?;
        Ok(reply)
    }

    /// Drops the cached token; the next start creates a new timer.
    pub fn forget(&self) -> Result<(), ClientError> {
        self.cache.clear_token()
    }

    pub async fn hello(&self) -> Result<TimerReply, ClientError> {
        self.client.hello().await
    }

    /// Replies without `success` leave the cached state untouched.
    fn remember(&self, reply: &TimerReply) -> Result<(), ClientError> {
        if !reply.success {
            warn!("Server reported failure: {:?}", reply.error);
            return Ok(());
        }
        if let Some(token) = &reply.token {
            self.cache.set_token(token)?;
        }
        Ok(())
    }
}
