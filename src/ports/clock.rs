//! Clock port.
//!
//! Every "now" and "today" in the core comes from here, so tests can pin
//! time and the batch command can be replayed for a given day.

use chrono::NaiveDate;

use crate::domain::foundation::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// UTC calendar date of `now()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Frozen(Timestamp);

    impl Clock for Frozen {
        fn now(&self) -> Timestamp {
            self.0
        }
    }

    #[test]
    fn clock_is_object_safe() {
        fn _accepts_dyn(_clock: &dyn Clock) {}
    }

    #[test]
    fn today_is_utc_date_of_now() {
        let clock = Frozen(Timestamp::from_unix_secs(1_704_412_800)); // 2024-01-05T00:00:00Z
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }
}
