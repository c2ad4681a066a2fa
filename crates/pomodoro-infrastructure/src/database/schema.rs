//! Schema setup and maintenance actions

use tracing::info;

use pomodoro_core::repositories::{Document, DocumentStore};
use pomodoro_core::StoreError;
use pomodoro_shared::constants::{SESSIONS_COLLECTION, TOKEN_FIELD, USERNAME_FIELD, USERS_COLLECTION};

/// Unique indexes on `sessions.token` and `users.username`. The `users`
/// collection has no runtime consumer yet.
pub async fn initialize(store: &dyn DocumentStore) -> Result<(), StoreError> {
    store.ensure_unique_index(SESSIONS_COLLECTION, TOKEN_FIELD).await?;
    store.ensure_unique_index(USERS_COLLECTION, USERNAME_FIELD).await?;
    info!("Store initialized");
    Ok(())
}

/// Deletes every document, then drops the collection. Returns the number
/// of documents removed.
pub async fn reset_collection(store: &dyn DocumentStore, collection: &str) -> Result<u64, StoreError> {
    let removed = store.delete_many(collection, &Document::new()).await?;
    store.drop_collection(collection).await?;
    info!("Collection {} reset, {} documents removed", collection, removed);
    Ok(removed)
}

/// Header line followed by one JSON document per line.
pub async fn dump_collection(store: &dyn DocumentStore, collection: &str) -> Result<String, StoreError> {
    let docs = store.find_all(collection, &Document::new()).await?;
    let mut out = format!("All docs in collection {} :", collection);
    for doc in docs {
        out.push('\n');
        out.push_str(&serde_json::to_string(&doc)?);
    }
    Ok(out)
}
