//! What to show for a timer reply

use pomodoro_core::{TimerReply, TimerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerView {
    /// No active timer; offer the start buttons.
    Buttons,
    Timer(TimerState),
}

impl TimerView {
    pub fn from_reply(reply: &TimerReply) -> Self {
        if !reply.has_timer() {
            return TimerView::Buttons;
        }
        match (reply.time.as_deref(), reply.minutes.as_deref()) {
            (Some(time), Some(minutes)) => TimerState::parse(time, minutes)
                .map(TimerView::Timer)
                .unwrap_or(TimerView::Buttons),
            _ => TimerView::Buttons,
        }
    }
}

/// Remaining time as `M:SS`, clamped at `0:00`.
pub fn format_remaining(state: &TimerState, now: i64) -> String {
    let secs = state.remaining_millis(now).max(0) / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}
