//! PostgreSQL document store implementation

pub mod document_store_impl;

pub use document_store_impl::PgDocumentStore;
