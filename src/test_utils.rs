//! Test utilities.
//!
//! Only compiled for tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

use crate::traits::TimeProvider;

/// Clock that advances one millisecond on every reading.
#[derive(Debug)]
pub struct SteppingClock {
    next: AtomicI64,
}

impl SteppingClock {
    /// Start the clock at `start_millis`.
    #[must_use]
    pub const fn new(start_millis: i64) -> Self {
        Self {
            next: AtomicI64::new(start_millis),
        }
    }
}

impl TimeProvider for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.next.fetch_add(1, Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepping_clock_advances() {
        let clock = SteppingClock::new(500);
        assert_eq!(clock.now().timestamp_millis(), 500);
        assert_eq!(clock.now().timestamp_millis(), 501);
    }
}
