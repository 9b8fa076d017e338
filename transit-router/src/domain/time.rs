//! Time handling for the transit search.
//!
//! The round-based search works in whole seconds past "time-zero", the
//! midnight of the search date. `TransitTime` wraps that offset so that
//! overnight journeys simply run past 24h (or negative, for schedules
//! reaching into the previous day) without any calendar bookkeeping in
//! the hot path. Conversion back to calendar time happens once, when a
//! path is mapped to a user-facing itinerary.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{Duration, NaiveDateTime};

/// A point in time, in seconds relative to the search day's time-zero.
///
/// # Examples
///
/// ```
/// use transit_router::domain::TransitTime;
///
/// let t = TransitTime::hms(10, 4, 0);
/// assert_eq!(t.as_seconds(), 10 * 3600 + 4 * 60);
/// assert_eq!(t.to_string(), "10:04:00");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitTime(i64);

impl TransitTime {
    /// Construct from raw seconds past time-zero.
    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Construct from hour/minute/second components of the search day.
    pub const fn hms(hour: i64, minute: i64, second: i64) -> Self {
        Self(hour * 3600 + minute * 60 + second)
    }

    /// Seconds past time-zero. May exceed 24h or be negative.
    pub const fn as_seconds(self) -> i64 {
        self.0
    }

    /// Signed duration from `other` to `self`.
    pub fn signed_duration_since(self, other: TransitTime) -> Duration {
        Duration::seconds(self.0 - other.0)
    }

    /// Resolve to a calendar datetime given the search day's time-zero.
    pub fn to_datetime(self, time_zero: NaiveDateTime) -> NaiveDateTime {
        time_zero + Duration::seconds(self.0)
    }
}

impl Add<Duration> for TransitTime {
    type Output = TransitTime;

    fn add(self, rhs: Duration) -> TransitTime {
        TransitTime(self.0 + rhs.num_seconds())
    }
}

impl Sub<Duration> for TransitTime {
    type Output = TransitTime;

    fn sub(self, rhs: Duration) -> TransitTime {
        TransitTime(self.0 - rhs.num_seconds())
    }
}

impl fmt::Display for TransitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.rem_euclid(86_400);
        let days = (self.0 - total) / 86_400;
        let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
        write!(f, "{h:02}:{m:02}:{s:02}")?;
        if days > 0 {
            write!(f, "+{days}d")?;
        } else if days < 0 {
            write!(f, "{days}d")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TransitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransitTime({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn hms_and_seconds() {
        assert_eq!(TransitTime::hms(0, 0, 0).as_seconds(), 0);
        assert_eq!(TransitTime::hms(10, 4, 5).as_seconds(), 36_245);
        assert_eq!(TransitTime::from_seconds(36_245), TransitTime::hms(10, 4, 5));
    }

    #[test]
    fn arithmetic() {
        let t = TransitTime::hms(10, 0, 0);
        assert_eq!(t + Duration::minutes(4), TransitTime::hms(10, 4, 0));
        assert_eq!(t - Duration::seconds(45), TransitTime::hms(9, 59, 15));
        assert_eq!(
            TransitTime::hms(12, 0, 0).signed_duration_since(t),
            Duration::hours(2)
        );
    }

    #[test]
    fn display_same_day() {
        assert_eq!(TransitTime::hms(9, 5, 0).to_string(), "09:05:00");
        assert_eq!(TransitTime::hms(23, 59, 59).to_string(), "23:59:59");
    }

    #[test]
    fn display_overnight() {
        // 25:30 on the search day is 01:30 the next day.
        assert_eq!(TransitTime::hms(25, 30, 0).to_string(), "01:30:00+1d");
        assert_eq!(TransitTime::from_seconds(-3600).to_string(), "23:00:00-1d");
    }

    #[test]
    fn to_datetime_resolves_against_time_zero() {
        let time_zero = NaiveDate::from_ymd_opt(2026, 3, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let same_day = TransitTime::hms(10, 4, 0).to_datetime(time_zero);
        assert_eq!(same_day.to_string(), "2026-03-15 10:04:00");

        let next_day = TransitTime::hms(25, 30, 0).to_datetime(time_zero);
        assert_eq!(next_day.to_string(), "2026-03-16 01:30:00");
    }

    #[test]
    fn ordering() {
        assert!(TransitTime::hms(10, 0, 0) < TransitTime::hms(10, 0, 1));
        assert!(TransitTime::hms(25, 0, 0) > TransitTime::hms(23, 59, 59));
    }
}
