use chrono::Duration;
use meridian_core::Timestamp;
use meridian_ports::Clock;
use std::sync::RwLock;

/// Manually controlled clock for deterministic tests
///
/// Time only moves when `set` or `advance` is called, so a test can place
/// the scheduler exactly at 09:00 on a Tuesday, or walk it minute by
/// minute across a handoff boundary.
pub struct ManualClock {
    now: RwLock<Timestamp>,
}

impl ManualClock {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            now: RwLock::new(initial),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, time: Timestamp) {
        match self.now.write() {
            Ok(mut now) => *now = time,
            Err(poisoned) => *poisoned.into_inner() = time,
        }
    }

    /// Move forward (or backward, with a negative duration)
    pub fn advance(&self, duration: Duration) {
        match self.now.write() {
            Ok(mut now) => *now += duration,
            Err(poisoned) => *poisoned.into_inner() += duration,
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        match self.now.read() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_manual_clock_is_frozen() {
        let start = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();
        let clock = ManualClock::new(start);

        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_set_and_advance() {
        let start = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();
        let clock = ManualClock::new(start);

        clock.advance(Duration::minutes(30));
        assert_eq!(clock.now(), start + Duration::minutes(30));

        let later = Utc.with_ymd_and_hms(2024, 3, 6, 13, 30, 0).unwrap();
        clock.set(later);
        assert_eq!(clock.now(), later);
    }
}
