//! # Pomodoro Core
//! 
//! Session records, the document store port, and the timer session protocol.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod clock;
pub mod token;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::StoreError;
pub use repositories::{Document, DocumentStore};
pub use services::{TimerReply, TimerRequest, TimerService};
