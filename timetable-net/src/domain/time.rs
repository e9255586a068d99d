//! Wall-clock time handling for timetables.
//!
//! Timetable rows carry times as "HH:MM:SS" strings with no date component.
//! This module provides a date-free time-of-day type; subtraction is
//! same-day, so a difference across midnight comes out negative and it is
//! the caller's job to decide what that means.

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A date-free wall-clock time of day, with second precision.
///
/// # Examples
///
/// ```
/// use timetable_net::domain::WallClock;
///
/// let t = WallClock::parse_hms("05:12:30").unwrap();
/// assert_eq!(t.to_string(), "05:12:30");
///
/// // Missing seconds are rejected
/// assert!(WallClock::parse_hms("05:12").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WallClock(NaiveTime);

impl WallClock {
    /// Midnight, 00:00:00.
    pub const MIDNIGHT: WallClock = WallClock(NaiveTime::MIN);

    /// Build a time from hour/minute/second components.
    ///
    /// Returns `None` if any component is out of range.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(WallClock)
    }

    /// Parse a time from "HH:MM:SS" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_net::domain::WallClock;
    ///
    /// // Valid times
    /// assert!(WallClock::parse_hms("00:00:00").is_ok());
    /// assert!(WallClock::parse_hms("23:59:59").is_ok());
    ///
    /// // Invalid formats
    /// assert!(WallClock::parse_hms("5:00:00").is_err());
    /// assert!(WallClock::parse_hms("12:00").is_err());
    /// assert!(WallClock::parse_hms("24:00:00").is_err());
    /// ```
    pub fn parse_hms(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 8 characters: HH:MM:SS
        if s.len() != 8 {
            return Err(TimeError::new("expected HH:MM:SS format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' || bytes[5] != b':' {
            return Err(TimeError::new("expected colons at positions 2 and 5"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second = parse_two_digits(&bytes[6..8])
            .ok_or_else(|| TimeError::new("invalid second digits"))?;
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(WallClock(time))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the second (0-59).
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Signed same-day difference `self − earlier`, in whole seconds.
    ///
    /// Negative when `earlier` is numerically later in the day; there is
    /// no day-rollover correction.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_net::domain::WallClock;
    ///
    /// let dep = WallClock::parse_hms("05:00:00").unwrap();
    /// let arr = WallClock::parse_hms("05:10:00").unwrap();
    /// assert_eq!(arr.signed_seconds_since(dep), 600);
    /// assert_eq!(dep.signed_seconds_since(arr), -600);
    /// ```
    pub fn signed_seconds_since(&self, earlier: WallClock) -> i64 {
        self.0.signed_duration_since(earlier.0).num_seconds()
    }

    /// Add a number of seconds, wrapping around midnight.
    pub fn wrapping_add_seconds(&self, seconds: i64) -> Self {
        WallClock(self.0 + Duration::seconds(seconds))
    }

    /// Add a number of minutes, wrapping around midnight.
    pub fn wrapping_add_minutes(&self, minutes: i64) -> Self {
        WallClock(self.0 + Duration::minutes(minutes))
    }
}

impl fmt::Debug for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WallClock({self})")
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
