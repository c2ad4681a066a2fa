//! Timer state derived from a session record

use pomodoro_shared::constants::MILLIS_PER_MINUTE;

use super::SessionRecord;

/// Parsed timer: when it was set and for how long. Remaining time is never
/// stored, it is recomputed against the current clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub minutes: i64,
    pub time: i64,
}

impl TimerState {
    /// Parses stored string fields. Returns `None` when either field is
    /// empty or not an integer, which callers treat as "no active timer".
    pub fn parse(time: &str, minutes: &str) -> Option<Self> {
        let time = time.trim().parse::<i64>().ok()?;
        let minutes = minutes.trim().parse::<i64>().ok()?;
        Some(Self { minutes, time })
    }

    pub fn from_record(record: &SessionRecord) -> Option<Self> {
        Self::parse(&record.time, &record.minutes)
    }

    pub fn end_millis(&self) -> i64 {
        self.time.saturating_add(self.minutes.saturating_mul(MILLIS_PER_MINUTE))
    }

    /// `(time + minutes * 60000) - now`; negative once the timer has run out.
    pub fn remaining_millis(&self, now: i64) -> i64 {
        self.end_millis().saturating_sub(now)
    }

    pub fn is_finished(&self, now: i64) -> bool {
        self.remaining_millis(now) <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining() {
        let state = TimerState::parse("1000", "25").unwrap();
        assert_eq!(state.end_millis(), 1000 + 25 * 60_000);
        assert_eq!(state.remaining_millis(1000), 25 * 60_000);
        assert_eq!(state.remaining_millis(1000 + 60_000), 24 * 60_000);
        assert!(!state.is_finished(1000));
        assert!(state.is_finished(1000 + 25 * 60_000));
    }

    #[test]
    fn test_parse_rejects_blank_and_garbage() {
        assert!(TimerState::parse("", "25").is_none());
        assert!(TimerState::parse("1000", "").is_none());
        assert!(TimerState::parse("1000", "undefined").is_none());
    }

    #[test]
    fn test_from_record() {
        let record = SessionRecord::new("t", 42, "5");
        assert_eq!(
            TimerState::from_record(&record),
            Some(TimerState { minutes: 5, time: 42 })
        );
    }
}
