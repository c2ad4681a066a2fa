//! Client session cache: the current token in a short-lived and a durable
//! store, written together and read short-lived first.

use pomodoro_shared::constants::TOKEN_STORAGE_KEY;

use crate::error::ClientError;
use crate::storage::TokenStorage;

pub struct SessionCache {
    short_lived: Box<dyn TokenStorage>,
    durable: Box<dyn TokenStorage>,
}

impl SessionCache {
    pub fn new(short_lived: Box<dyn TokenStorage>, durable: Box<dyn TokenStorage>) -> Self {
        Self { short_lived, durable }
    }

    /// Durable first: a failed write leaves both stores untouched.
    pub fn set_token(&self, token: &str) -> Result<(), ClientError> {
        self.durable.set(TOKEN_STORAGE_KEY, token)?;
        self.short_lived.set(TOKEN_STORAGE_KEY, token)
    }

    /// Short-lived value if present and non-empty, else the durable one.
    pub fn get_token(&self) -> Result<Option<String>, ClientError> {
        if let Some(token) = self.short_lived.get(TOKEN_STORAGE_KEY)?.filter(|t| !t.is_empty()) {
            return Ok(Some(token));
        }
        Ok(self.durable.get(TOKEN_STORAGE_KEY)?.filter(|t| !t.is_empty()))
    }

    /// Forgets the token so the next start creates a new timer.
    pub fn clear_token(&self) -> Result<(), ClientError> {
        self.short_lived.remove(TOKEN_STORAGE_KEY)?;
        self.durable.remove(TOKEN_STORAGE_KEY)
    }
}
