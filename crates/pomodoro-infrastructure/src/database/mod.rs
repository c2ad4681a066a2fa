//! Database module (document store adapters)

pub mod connection;
pub mod memory;
pub mod postgres;
pub mod schema;

use std::sync::Arc;
use tracing::info;

use pomodoro_core::DocumentStore;
use pomodoro_shared::config::{StoreBackend, StoreSettings};

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Store selected by `store.backend`. Nothing connects here; the postgres
/// backend opens a connection per operation.
pub fn build_store(settings: &StoreSettings) -> Arc<dyn DocumentStore> {
    match settings.backend {
        StoreBackend::Postgres => {
            info!("Using postgres document store");
            Arc::new(PgDocumentStore::new(settings.clone()))
        }
        StoreBackend::Memory => {
            info!("Using in-memory document store");
            Arc::new(MemoryDocumentStore::new())
        }
    }
}
