//! Age arithmetic shared by the scoring modules.
//!
//! A "month" is a fixed 30-day window everywhere in the scoring rules, so
//! the same posting always lands in the same age bucket regardless of
//! calendar month lengths.

use crate::types::Timestamp;

/// Seconds in one scoring month (30 days).
pub const MONTH_SECONDS: f64 = 30.0 * 24.0 * 60.0 * 60.0;

/// Fractional months elapsed between `earlier` and `now`.
///
/// Returns 0.0 when `earlier` is in the future relative to `now`.
pub fn months_between(earlier: Timestamp, now: Timestamp) -> f64 {
    let secs = (now - earlier).num_seconds();
    if secs <= 0 {
        0.0
    } else {
        secs as f64 / MONTH_SECONDS
    }
}

/// Whole months elapsed since `ts` (floor of [`months_between`]).
pub fn whole_months_since(ts: Timestamp, now: Timestamp) -> i64 {
    months_between(ts, now) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn months_between_thirty_days_is_one() {
        let now = Utc::now();
        let earlier = now - Duration::days(30);
        let months = months_between(earlier, now);
        assert!((months - 1.0).abs() < 0.001);
    }

    #[test]
    fn months_between_future_is_zero() {
        let now = Utc::now();
        let later = now + Duration::days(10);
        assert_eq!(months_between(later, now), 0.0);
    }

    #[test]
    fn whole_months_floors() {
        let now = Utc::now();
        let earlier = now - Duration::days(100);
        assert_eq!(whole_months_since(earlier, now), 3);
    }
}
