//! The "now" anchor.
//!
//! Engine functions never read the system clock directly; they ask a
//! [`Clock`]. Production code uses [`SystemClock`], tests pin an instant with
//! [`FixedClock`].

use chrono::{Local, NaiveDateTime, Utc};

pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Current instant as milliseconds since the Unix epoch, used to stamp
    /// history entries.
    fn timestamp_millis(&self) -> i64;
}

/// Reads the OS clock and the system's local UTC offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Always returns the same instant. The epoch timestamp treats the wall-clock
/// value as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }

    fn timestamp_millis(&self) -> i64 {
        self.0.and_utc().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fixed_clock_is_stable() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.timestamp_millis(), 1_740_830_400_000);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.timestamp_millis();
        let second = clock.timestamp_millis();
        assert!(second >= first);
    }
}
