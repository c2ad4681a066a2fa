//! # Pomodoro Core - Domain Module
//! 
//! Persisted session records and the timer state derived from them.

pub mod session_record;
pub mod timer_state;

pub use session_record::SessionRecord;
pub use timer_state::TimerState;
