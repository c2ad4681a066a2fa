//! Typed access to the `sessions` collection

use std::sync::Arc;

use pomodoro_shared::constants::{SESSIONS_COLLECTION, TOKEN_FIELD};

use crate::domain::SessionRecord;
use crate::error::StoreError;
use crate::repositories::{field_filter, DocumentStore};

#[derive(Clone)]
pub struct SessionRepository {
    store: Arc<dyn DocumentStore>,
}

impl SessionRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<SessionRecord>, StoreError> {
        let doc = self
            .store
            .find_one(SESSIONS_COLLECTION, &field_filter(TOKEN_FIELD, token))
            .await?;
        doc.map(SessionRecord::from_document).transpose()
    }

    pub async fn insert(&self, record: &SessionRecord) -> Result<(), StoreError> {
        self.store
            .insert(SESSIONS_COLLECTION, &record.to_document()?)
            .await
    }
}
