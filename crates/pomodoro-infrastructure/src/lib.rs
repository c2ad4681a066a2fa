//! # Pomodoro Infrastructure
//! 
//! Document store implementations (adapters) and schema maintenance.

pub mod database;

pub use database::{build_store, schema, MemoryDocumentStore, PgDocumentStore};
