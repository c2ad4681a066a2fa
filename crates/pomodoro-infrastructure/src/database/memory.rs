//! In-process document store with unique-index enforcement

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};

use pomodoro_core::repositories::{
    matches_filter, validate_name, Document, DocumentStore, IndexInfo, UpsertOutcome,
};
use pomodoro_core::StoreError;

#[derive(Default)]
struct MemoryCollection {
    docs: Vec<Document>,
    unique_fields: BTreeSet<String>,
}

impl MemoryCollection {
    /// Checks `doc` against every unique field, skipping the document at
    /// `replacing`. Documents without the field are not indexed.
    fn check_unique(&self, collection: &str, doc: &Document, replacing: Option<usize>) -> Result<(), StoreError> {
        for field in &self.unique_fields {
            let Some(value) = doc.get(field) else { continue };
            let clash = self
                .docs
                .iter()
                .enumerate()
                .any(|(i, existing)| Some(i) != replacing && existing.get(field) == Some(value));
            if clash {
                return Err(StoreError::DuplicateKey {
                    collection: collection.to_string(),
                    field: field.clone(),
                    value: value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string()),
                });
            }
        }
        Ok(())
    }
}

pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, MemoryCollection>>,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `collection`; 0 if it does not exist.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.docs.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_one(&self, collection: &str, filter: &Document) -> Result<Option<Document>, StoreError> {
        validate_name(collection)?;
        let guard = self.collections.read();
        Ok(guard
            .get(collection)
            .and_then(|c| c.docs.iter().find(|d| matches_filter(d, filter)).cloned()))
    }

    async fn find_all(&self, collection: &str, filter: &Document) -> Result<Vec<Document>, StoreError> {
        validate_name(collection)?;
        let guard = self.collections.read();
        Ok(guard
            .get(collection)
            .map(|c| c.docs.iter().filter(|d| matches_filter(d, filter)).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert(&self, collection: &str, doc: &Document) -> Result<(), StoreError> {
        validate_name(collection)?;
        let mut guard = self.collections.write();
        let coll = guard.entry(collection.to_string()).or_default();
        coll.check_unique(collection, doc, None)?;
        coll.docs.push(doc.clone());
        Ok(())
    }

    async fn upsert(&self, collection: &str, filter: &Document, doc: &Document) -> Result<UpsertOutcome, StoreError> {
        validate_name(collection)?;
        let mut guard = self.collections.write();
        let coll = guard.entry(collection.to_string()).or_default();

        match coll.docs.iter().position(|d| matches_filter(d, filter)) {
            Some(index) => {
                coll.check_unique(collection, doc, Some(index))?;
                coll.docs[index] = doc.clone();
                Ok(UpsertOutcome { matched: 1, upserted: false })
            }
            None => {
                coll.check_unique(collection, doc, None)?;
                coll.docs.push(doc.clone());
                Ok(UpsertOutcome { matched: 0, upserted: true })
            }
        }
    }

    async fn delete_many(&self, collection: &str, filter: &Document) -> Result<u64, StoreError> {
        validate_name(collection)?;
        let mut guard = self.collections.write();
        let Some(coll) = guard.get_mut(collection) else {
            return Ok(0);
        };
        let before = coll.docs.len();
        coll.docs.retain(|d| !matches_filter(d, filter));
        Ok((before - coll.docs.len()) as u64)
    }

    async fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), StoreError> {
        validate_name(collection)?;
        validate_name(field)?;
        let mut guard = self.collections.write();
        let coll = guard.entry(collection.to_string()).or_default();
        if coll.unique_fields.contains(field) {
            return Ok(());
        }

        // Refuse to build the index over existing duplicates.
        let mut seen = BTreeSet::new();
        for doc in &coll.docs {
            if let Some(value) = doc.get(field) {
                if !seen.insert(value.to_string()) {
                    return Err(StoreError::DuplicateKey {
                        collection: collection.to_string(),
                        field: field.to_string(),
                        value: value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string()),
                    });
                }
            }
        }

        coll.unique_fields.insert(field.to_string());
        Ok(())
    }

    async fn index_information(&self, collection: &str) -> Result<Vec<IndexInfo>, StoreError> {
        validate_name(collection)?;
        let guard = self.collections.read();
        Ok(guard
            .get(collection)
            .map(|c| {
                c.unique_fields
                    .iter()
                    .map(|field| IndexInfo {
                        name: format!("{}_{}_key", collection, field),
                        field: field.clone(),
                        unique: true,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self.collections.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn drop_collection(&self, collection: &str) -> Result<bool, StoreError> {
        validate_name(collection)?;
        Ok(self.collections.write().remove(collection).is_some())
    }
}
