//! Store errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Duplicate key in {collection}: {field} = {value}")]
    DuplicateKey {
        collection: String,
        field: String,
        value: String,
    },

    #[error("Invalid collection or field name: {0}")]
    InvalidName(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Query error: {0}")]
    Query(String),
}

impl StoreError {
    /// Short machine-readable kind, used in reply bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Connection(_) => "store_connection",
            StoreError::DuplicateKey { .. } => "duplicate_key",
            StoreError::InvalidName(_) => "invalid_name",
            StoreError::Serialization(_) => "serialization",
            StoreError::Query(_) => "query",
        }
    }

    /// HTTP status the error carries, if any. Errors without one are
    /// answered with 200 and `success: false`.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            StoreError::Connection(_) => Some(503),
            _ => None,
        }
    }

    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }
}
