//! 时钟抽象
//!
//! Time-dependent guards (booking lead time, horizon, seating grace period)
//! read the clock through [`Clock`] so callers can pin it.

use std::sync::atomic::{AtomicI64, Ordering};

/// Source of "now" in Unix millis
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        shared::util::now_millis()
    }
}

/// Manually driven clock
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(now_millis),
        }
    }

    pub fn set(&self, now_millis: i64) {
        self.now.store(now_millis, Ordering::SeqCst);
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.now
            .fetch_add(minutes * shared::util::MINUTE_MS, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Unix millis → `YYYYMMDD` (UTC), used by order numbers
pub fn date_key(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y%m%d").to_string())
        .unwrap_or_else(|| "00000000".to_string())
}

/// Start of the UTC day containing `millis`
pub fn day_start_millis(millis: i64) -> i64 {
    millis - millis.rem_euclid(shared::util::DAY_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-12-25 19:00:00 UTC
    const XMAS_19H: i64 = 1_735_153_200_000;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(XMAS_19H);
        assert_eq!(clock.now_millis(), XMAS_19H);
        clock.advance_minutes(16);
        assert_eq!(clock.now_millis(), XMAS_19H + 16 * 60_000);
        clock.set(0);
        assert_eq!(clock.now_millis(), 0);
    }

    #[test]
    fn test_date_key() {
        assert_eq!(date_key(XMAS_19H), "20241225");
    }

    #[test]
    fn test_day_start() {
        let start = day_start_millis(XMAS_19H);
        assert_eq!(XMAS_19H - start, 19 * 60 * 60_000);
        assert_eq!(date_key(start), "20241225");
    }
}
