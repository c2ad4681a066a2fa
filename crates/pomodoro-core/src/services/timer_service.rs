// ============================================================================
// Pomodoro Core - Timer Service
// File: crates/pomodoro-core/src/services/timer_service.rs
// ============================================================================
//! Timer session protocol: token issuance and get-or-create of the single
//! timer stored per token.

use std::sync::Arc;
use tracing::{debug, info, warn};

use pomodoro_shared::utils::mask_token;

use crate::clock::{Clock, SystemClock};
use crate::domain::SessionRecord;
use crate::error::StoreError;
use crate::repositories::{DocumentStore, SessionRepository};
use crate::services::{TimerReply, TimerRequest};
use crate::token::generate_token;

/// Timer protocol over the `sessions` collection.
///
/// A token moves from "no record" to "record exists" on its first
/// `set_timer`; after that the record is never changed by either operation.
pub struct TimerService {
    sessions: SessionRepository,
    clock: Arc<dyn Clock>,
}

impl TimerService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: SessionRepository::new(store),
            clock,
        }
    }

    /// Health check.
    pub fn hello(&self) -> TimerReply {
        TimerReply::ok()
    }

    /// Looks up the timer for `token`, minting a token when none is given.
    /// Never creates a record.
    pub async fn get_timer(&self, request: TimerRequest) -> TimerReply {
        match self.try_get_timer(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("GetTimer failed: {}", e);
                TimerReply::failure(&e)
            }
        }
    }

    /// Returns the existing timer for `token` unchanged, or stores a new one
    /// started now with the requested minutes.
    pub async fn set_timer(&self, request: TimerRequest) -> TimerReply {
        match self.try_set_timer(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("SetTimer failed: {}", e);
                TimerReply::failure(&e)
            }
        }
    }

    async fn try_get_timer(&self, request: TimerRequest) -> Result<TimerReply, StoreError> {
        let token = request.token.unwrap_or_else(generate_token);
        let record = self.sessions.find_by_token(&token).await?;

        debug!(
            "GetTimer for {}: {}",
            mask_token(&token),
            if record.is_some() { "found" } else { "no timer" }
        );

        Ok(match record {
            Some(record) => TimerReply::timer(token, Some(record.time), Some(record.minutes)),
            None => TimerReply::timer(token, None, None),
        })
    }

    async fn try_set_timer(&self, request: TimerRequest) -> Result<TimerReply, StoreError> {
        let token = request.token.unwrap_or_else(generate_token);

        // An existing record wins over the requested minutes.
        if let Some(existing) = self.sessions.find_by_token(&token).await? {
            debug!(
                "SetTimer for {}: record exists, requested minutes {:?} ignored",
                mask_token(&token),
                request.minutes
            );
            return Ok(TimerReply::timer(token, Some(existing.time), Some(existing.minutes)));
        }

        let record = SessionRecord::new(
            token,
            self.clock.now_millis(),
            request.minutes.unwrap_or_default(),
        );
        self.sessions.insert(&record).await?;

        info!("Timer set for {}: {} minutes", mask_token(&record.token), record.minutes);
        Ok(TimerReply::timer(record.token, Some(record.time), Some(record.minutes)))
    }
}
