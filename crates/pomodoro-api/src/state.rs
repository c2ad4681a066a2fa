use std::sync::Arc;

use pomodoro_core::TimerService;

#[derive(Clone)]
pub struct AppState {
    pub timer_service: Arc<TimerService>,
}

impl AppState {
    pub fn new(timer_service: TimerService) -> Self {
        Self {
            timer_service: Arc::new(timer_service),
        }
    }
}
