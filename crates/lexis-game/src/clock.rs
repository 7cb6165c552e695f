//! Day Clock
//!
//! Converts wall-clock time into game day indices.
//!
//! ```text
//! day(t) = floor((t - epoch) / 86_400_000 ms)
//! ```
//!
//! Instants before the epoch give negative days.

use chrono::{DateTime, Duration, Utc};

use crate::errors::{GameError, GameResult};

/// Milliseconds in one game day
pub const MS_PER_DAY: i64 = 86_400_000;

/// Day 0 starts at 2026-01-15T00:00:00Z
pub const DEFAULT_EPOCH_MS: i64 = 1_768_435_200_000;

/// The default day 0 instant
pub fn default_epoch() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(DEFAULT_EPOCH_MS).unwrap_or_default()
}

/// Maps instants to day indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClock {
    epoch: DateTime<Utc>,
}

impl DayClock {
    /// Clock with a custom epoch
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self { epoch }
    }

    /// Start of day 0
    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    /// Day index containing `instant`
    pub fn day_index_at(&self, instant: DateTime<Utc>) -> i64 {
        (instant - self.epoch).num_milliseconds().div_euclid(MS_PER_DAY)
    }

    /// Day index right now
    pub fn today(&self) -> i64 {
        self.day_index_at(Utc::now())
    }

    /// First instant of a day
    pub fn start_of_day(&self, day_index: i64) -> DateTime<Utc> {
        self.epoch + Duration::milliseconds(day_index.saturating_mul(MS_PER_DAY))
    }
}

impl Default for DayClock {
    fn default() -> Self {
        Self::new(default_epoch())
    }
}

/// Check a requested day against the current one
///
/// `None` means "today" and is always accepted. Explicit days must lie in
/// `0..=current`, so future secrets cannot be queried.
pub fn validate_day_index(requested: Option<i64>, current: i64) -> GameResult<()> {
    match requested {
        Some(day) if day < 0 || day > current => Err(GameError::DayOutOfRange {
            requested: day,
            current,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_default_epoch() {
        assert_eq!(default_epoch(), at("2026-01-15T00:00:00Z"));
    }

    #[test]
    fn test_day_boundaries() {
        let clock = DayClock::default();
        assert_eq!(clock.day_index_at(at("2026-01-15T00:00:00Z")), 0);
        assert_eq!(clock.day_index_at(at("2026-01-15T23:59:59.999Z")), 0);
        assert_eq!(clock.day_index_at(at("2026-01-16T00:00:00Z")), 1);
        assert_eq!(clock.day_index_at(at("2026-02-15T12:00:00Z")), 31);
    }

    #[test]
    fn test_before_epoch_is_negative() {
        let clock = DayClock::default();
        assert_eq!(clock.day_index_at(at("2026-01-14T23:59:59Z")), -1);
        assert_eq!(clock.day_index_at(at("2026-01-13T00:00:00Z")), -2);
    }

    #[test]
    fn test_start_of_day() {
        let clock = DayClock::new(at("2025-06-01T00:00:00Z"));
        assert_eq!(clock.start_of_day(3), at("2025-06-04T00:00:00Z"));
        assert_eq!(clock.day_index_at(clock.start_of_day(-5)), -5);
    }

    #[test]
    fn test_validate_day_index() {
        assert!(validate_day_index(None, 10).is_ok());
        assert!(validate_day_index(Some(0), 10).is_ok());
        assert!(validate_day_index(Some(10), 10).is_ok());
        assert!(matches!(
            validate_day_index(Some(11), 10),
            Err(GameError::DayOutOfRange { requested: 11, current: 10 })
        ));
        assert!(validate_day_index(Some(-1), 10).is_err());
    }
}
