//! # Pomodoro API
//! 
//! HTTP handlers, the form request adapter, and router construction.

pub mod adapter;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
