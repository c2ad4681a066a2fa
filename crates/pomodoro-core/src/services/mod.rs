//! Domain services (business logic)

pub mod reply;
pub mod timer_service;

pub use reply::{ReplyError, TimerReply, TimerRequest};
pub use timer_service::TimerService;
