//! # Pomodoro Client
//! 
//! Token cache, HTTP client, and countdown rendering for the pomodoro
//! timer service.

pub mod api_client;
pub mod countdown;
pub mod error;
pub mod session;
pub mod session_cache;
pub mod storage;

pub use api_client::TimerClient;
pub use countdown::{format_remaining, TimerView};
pub use error::ClientError;
pub use session::PomodoroSession;
pub use session_cache::SessionCache;
pub use storage::{FileStorage, MemoryStorage, TokenStorage};
