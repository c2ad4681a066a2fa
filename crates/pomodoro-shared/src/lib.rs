//! # Pomodoro Shared
//! 
//! Shared configuration, telemetry, request parameters, and helpers for the
//! pomodoro timer service.

pub mod constants;
pub mod params;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use params::Params;
pub use error::AppError;
