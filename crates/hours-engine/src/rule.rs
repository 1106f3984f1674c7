//! Encoded schedule rules.
//!
//! A [`ScheduleRule`] is an immutable string of seven colon-delimited fields:
//!
//! ```text
//! version:date-from:date-to:from-time:to-time:weekdays:exclude
//! 1:2020-12-24:2020-12-26:0800:1200:MoTuWeThFr:
//! ```
//!
//! Fields are never omitted, only left empty. Both dates empty makes the rule
//! recurring; weekdays empty matches every day; the literal `exclude` in the
//! last field turns the rule into a blackout.
//!
//! # Key design decisions
//!
//! - **Positional decoding**: a field is located by counting delimiters from the
//!   left and returned as a borrowed slice of the rule. Nothing is split or
//!   copied, and two adjacent delimiters yield an empty field.
//! - **Byte-order dates**: date bounds are fixed-width ISO dates, so comparing
//!   their bytes against the target date is a chronological comparison.
//! - **Ordering**: rules order by their raw bytes, which is the deterministic
//!   tie-break used when resolving the hours for a day.

use std::fmt;
use std::num::ParseIntError;
use std::ops::Range;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Result, ScheduleError};
use crate::slot::TimeSlot;
use crate::weekday;

/// The only encoding version written by this crate.
pub const FORMAT_VERSION: &str = "1";

/// `chrono` format string for the date bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DELIMITER: u8 = b':';
const EXCLUDE: &str = "exclude";

/// 1-based positions of the encoded fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Version = 1,
    DateFrom = 2,
    DateTo = 3,
    From = 4,
    To = 5,
    Weekdays = 6,
    Exclude = 7,
}

/// How a rule takes part in resolving a day, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleKind {
    /// Blackout: no availability on matching dates, whatever else matches.
    Exclusion,
    /// Open hours scoped to a date range; displaces recurring hours.
    DatedOpen,
    /// Open hours on every matching weekday.
    RecurringOpen,
}

/// One encoded open-hours, override or blackout record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScheduleRule(String);

impl ScheduleRule {
    /// Open hours on the given weekdays (every day when empty), on every date.
    pub fn recurring(from: ClockTime, to: ClockTime, weekdays: &[Weekday]) -> Self {
        Self::build(None, from, to, weekdays, false)
    }

    /// Open hours that apply only between two dates, inclusive. Useful for
    /// special holiday hours.
    pub fn dated(
        date_from: NaiveDate,
        date_to: NaiveDate,
        from: ClockTime,
        to: ClockTime,
        weekdays: &[Weekday],
    ) -> Self {
        Self::build(Some((date_from, date_to)), from, to, weekdays, false)
    }

    /// A blackout between two dates, inclusive. Useful for holiday closures.
    pub fn excluded(date_from: NaiveDate, date_to: NaiveDate, weekdays: &[Weekday]) -> Self {
        let midnight = ClockTime::MIDNIGHT;
        Self::build(Some((date_from, date_to)), midnight, midnight, weekdays, true)
    }

    /// A blackout on the given weekdays of every week.
    pub fn recurring_exclusion(weekdays: &[Weekday]) -> Self {
        let midnight = ClockTime::MIDNIGHT;
        Self::build(None, midnight, midnight, weekdays, true)
    }

    fn build(
        dates: Option<(NaiveDate, NaiveDate)>,
        from: ClockTime,
        to: ClockTime,
        weekdays: &[Weekday],
        exclude: bool,
    ) -> Self {
        use std::fmt::Write;

        let mut buffer = String::with_capacity(64);
        buffer.push_str(FORMAT_VERSION);
        buffer.push(':');
        if let Some((date_from, date_to)) = dates {
            let _ = write!(buffer, "{}:{}", date_from.format(DATE_FORMAT), date_to.format(DATE_FORMAT));
        } else {
            buffer.push(':');
        }
        buffer.push(':');
        from.encode_into(&mut buffer);
        buffer.push(':');
        to.encode_into(&mut buffer);
        buffer.push(':');
        for &day in weekdays {
            buffer.push_str(weekday::code(day));
        }
        buffer.push(':');
        if exclude {
            buffer.push_str(EXCLUDE);
        }
        ScheduleRule(buffer)
    }

    /// Byte range of the `n`th field (1-based), found by counting delimiters.
    ///
    /// Returns `Some` for a field whose boundaries exist even when it is empty,
    /// and `None` when the rule has too few delimiters to hold field `n`.
    pub(crate) fn span(&self, n: usize) -> Option<Range<usize>> {
        if n == 0 {
            return None;
        }

        let bytes = self.0.as_bytes();
        let mut remaining = n;
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            if b == DELIMITER {
                remaining -= 1;
                if remaining == 0 {
                    return Some(start..i);
                }
                start = i + 1;
            }
        }

        // The last field runs to the end of the buffer.
        (remaining == 1).then_some(start..bytes.len())
    }

    /// The content of `field`, or `None` when it is empty or absent.
    pub fn field(&self, field: Field) -> Option<&str> {
        self.span(field as usize)
            .filter(|range| !range.is_empty())
            .map(|range| &self.0[range])
    }

    fn validate(&self) -> Result<()> {
        if self.field(Field::Version).is_none() {
            return Err(self.invalid("missing version"));
        }
        // The delimiter closing the to-time must exist, even if the field is empty.
        if self.span(Field::To as usize + 1).is_none() {
            return Err(self.invalid("missing to"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &'static str) -> ScheduleError {
        ScheduleError::InvalidRule {
            rule: self.0.clone(),
            reason,
        }
    }

    pub fn version(&self) -> Option<&str> {
        self.field(Field::Version)
    }

    pub fn date_from(&self) -> Option<&str> {
        self.field(Field::DateFrom)
    }

    pub fn date_to(&self) -> Option<&str> {
        self.field(Field::DateTo)
    }

    pub fn from(&self) -> Result<ClockTime> {
        self.time(Field::From, "from")
    }

    pub fn to(&self) -> Result<ClockTime> {
        self.time(Field::To, "to")
    }

    fn time(&self, field: Field, name: &'static str) -> Result<ClockTime> {
        let invalid = |source: Option<ParseIntError>| ScheduleError::InvalidTime {
            field: name,
            rule: self.0.clone(),
            source,
        };

        let raw = self.field(field).ok_or_else(|| invalid(None))?;
        let value: u16 = raw.parse().map_err(|e| invalid(Some(e)))?;
        ClockTime::from_encoded(value).ok_or_else(|| invalid(None))
    }

    /// The `[from, to]` open window of this rule.
    pub fn time_slot(&self) -> Result<TimeSlot> {
        Ok(TimeSlot::new(self.from()?, self.to()?))
    }

    /// Decoded weekdays in stored order. Unknown codes are skipped.
    pub fn weekdays(&self) -> Vec<Weekday> {
        self.field(Field::Weekdays)
            .map(|days| {
                days.as_bytes()
                    .chunks_exact(2)
                    .filter_map(weekday::from_code)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The rule is scoped to a date range.
    pub fn has_date_range(&self) -> bool {
        self.date_from().is_some()
    }

    /// The rule is a blackout rather than open hours.
    pub fn is_exclude(&self) -> bool {
        self.field(Field::Exclude) == Some(EXCLUDE)
    }

    pub fn kind(&self) -> RuleKind {
        if self.is_exclude() {
            RuleKind::Exclusion
        } else if self.has_date_range() {
            RuleKind::DatedOpen
        } else {
            RuleKind::RecurringOpen
        }
    }

    /// Matches the weekday and, when both bounds are set, the date range.
    /// The time of day plays no part.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if !self.contains_weekday(date.weekday()) {
            return false;
        }

        match (self.span(Field::DateFrom as usize), self.span(Field::DateTo as usize)) {
            (Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => {
                let target = iso_date(date);
                let bytes = self.0.as_bytes();
                bytes[from] <= target[..] && bytes[to] >= target[..]
            }
            _ => true,
        }
    }

    /// Matches the weekday only. An empty weekday field matches every day.
    pub fn contains_weekday(&self, day: Weekday) -> bool {
        match self.field(Field::Weekdays) {
            Some(days) => days.contains(weekday::code(day)),
            None => true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// `YYYY-MM-DD` into a stack buffer.
fn iso_date(date: NaiveDate) -> [u8; 10] {
    let year = date.year().clamp(0, 9999) as u32;
    let (month, day) = (date.month(), date.day());
    let digit = |v: u32| b'0' + (v % 10) as u8;
    [
        digit(year / 1000),
        digit(year / 100),
        digit(year / 10),
        digit(year),
        b'-',
        digit(month / 10),
        digit(month),
        b'-',
        digit(day / 10),
        digit(day),
    ]
}

impl fmt::Display for ScheduleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ScheduleRule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        ScheduleRule::try_from(s.to_string())
    }
}

impl TryFrom<String> for ScheduleRule {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self> {
        let rule = ScheduleRule(value);
        rule.validate()?;
        Ok(rule)
    }
}

impl From<ScheduleRule> for String {
    fn from(rule: ScheduleRule) -> Self {
        rule.0
    }
}

impl AsRef<str> for ScheduleRule {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
