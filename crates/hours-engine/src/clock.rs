//! Minute-of-day clock values.
//!
//! A [`ClockTime`] stores a wall-clock time as `hour * 100 + minute`, so `830`
//! is 08:30. The encoding sorts the same way as the time of day it represents,
//! which lets slots and rules compare clock values directly, but it is not a
//! linear count of minutes: arithmetic goes through the hour/minute parts.

use std::fmt;
use std::ops::Add;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// A time of day with minute precision, encoded as `hour * 100 + minute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ClockTime(u16);

impl ClockTime {
    /// 00:00.
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Creates a clock time from an hour and a minute.
    ///
    /// # Panics
    /// Panics if `hour > 23` or `minute > 59`.
    pub fn new(hour: u32, minute: u32) -> Self {
        assert!(hour < 24, "invalid hour, {hour}");
        assert!(minute < 60, "invalid minute, {minute}");
        ClockTime((hour * 100 + minute) as u16)
    }

    /// Fallible variant of [`ClockTime::new`].
    pub fn try_new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then(|| ClockTime((hour * 100 + minute) as u16))
    }

    /// Builds a clock time from its integer encoding (e.g. `1730`).
    pub fn from_encoded(value: u16) -> Option<Self> {
        Self::try_new(u32::from(value / 100), u32::from(value % 100))
    }

    /// Truncates a `NaiveTime` to the minute.
    pub fn from_time(time: NaiveTime) -> Self {
        ClockTime::new(time.hour(), time.minute())
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0 / 100)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0 % 100)
    }

    pub fn as_i32(self) -> i32 {
        i32::from(self.0)
    }

    pub fn as_i64(self) -> i64 {
        i64::from(self.0)
    }

    /// Linear minutes since 00:00.
    pub fn minutes_since_midnight(self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Places this clock time on `date`, with zero seconds.
    pub fn align(self, date: NaiveDate) -> NaiveDateTime {
        // hour/minute are always in range, so the fallback is never taken.
        let time = NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN);
        date.and_time(time)
    }

    /// Appends the four-digit, zero-padded field encoding (`0830`).
    pub fn encode_into(self, buffer: &mut String) {
        use std::fmt::Write;
        // Writing to a String cannot fail.
        let _ = write!(buffer, "{:02}{:02}", self.hour(), self.minute());
    }
}

/// Adds a duration, wrapping past midnight. Sub-minute parts are dropped.
impl Add<Duration> for ClockTime {
    type Output = ClockTime;

    fn add(self, rhs: Duration) -> ClockTime {
        let total = (i64::from(self.minutes_since_midnight()) + rhs.num_minutes())
            .rem_euclid(MINUTES_PER_DAY);
        ClockTime::new((total / 60) as u32, (total % 60) as u32)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl From<ClockTime> for u16 {
    fn from(value: ClockTime) -> Self {
        value.0
    }
}

impl TryFrom<u16> for ClockTime {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        ClockTime::from_encoded(value).ok_or_else(|| format!("invalid clock time, {value}"))
    }
}

