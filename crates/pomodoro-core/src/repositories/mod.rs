//! Repository traits (ports) and typed repositories built on them

pub mod document_store;
pub mod session_repository;

pub use document_store::{
    field_filter, matches_filter, validate_name, Document, DocumentStore, IndexInfo, UpsertOutcome,
};
pub use session_repository::SessionRepository;

#[cfg(test)]
pub use document_store::MockDocumentStore;
