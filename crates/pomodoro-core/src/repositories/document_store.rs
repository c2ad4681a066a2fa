//! Document store trait (port)

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// A stored document, also used as an equality filter.
pub type Document = Map<String, Value>;

/// Index metadata as reported by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexInfo {
    pub name: String,
    pub field: String,
    pub unique: bool,
}

/// Result of an upsert: how many documents matched the filter and whether
/// a new document was inserted instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpsertOutcome {
    pub matched: u64,
    pub upserted: bool,
}

/// Collections of schemaless documents with unique-index enforcement.
///
/// Filters are field equality patterns; the empty filter matches every
/// document. Every failure, including connectivity, is returned to the
/// caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(&self, collection: &str, filter: &Document) -> Result<Option<Document>, StoreError>;
    async fn find_all(&self, collection: &str, filter: &Document) -> Result<Vec<Document>, StoreError>;
    /// Fails with `StoreError::DuplicateKey` instead of overwriting.
    async fn insert(&self, collection: &str, doc: &Document) -> Result<(), StoreError>;
    async fn upsert(&self, collection: &str, filter: &Document, doc: &Document) -> Result<UpsertOutcome, StoreError>;
    async fn delete_many(&self, collection: &str, filter: &Document) -> Result<u64, StoreError>;
    async fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), StoreError>;
    async fn index_information(&self, collection: &str) -> Result<Vec<IndexInfo>, StoreError>;
    async fn collection_names(&self) -> Result<Vec<String>, StoreError>;
    /// Returns whether the collection existed.
    async fn drop_collection(&self, collection: &str) -> Result<bool, StoreError>;
}

pub fn field_filter(field: &str, value: impl Into<Value>) -> Document {
    let mut filter = Document::new();
    filter.insert(field.to_string(), value.into());
    filter
}

pub fn matches_filter(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| doc.get(key) == Some(expected))
}

/// Collection and field names end up in backend identifiers, so only
/// `[A-Za-z_][A-Za-z0-9_]*` is accepted.
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}
