//! # hours-engine
//!
//! Business-hours availability from compact, storable schedule rules.
//!
//! Weekly open hours, dated overrides and blackout dates are each encoded as a
//! short string rule. The engine resolves a set of rules into the open windows
//! of a date, removes reserved windows, and searches forward for the next open
//! slot of a required length.
//!
//! ```rust
//! use chrono::{NaiveDate, Weekday};
//! use hours_engine::{ClockTime, RuleSet, ScheduleRule, TimeSlot};
//!
//! let rules: RuleSet = vec![
//!     ScheduleRule::recurring(ClockTime::new(8, 0), ClockTime::new(18, 0), &[Weekday::Mon]),
//! ]
//! .into();
//! assert_eq!(rules.rules()[0].as_str(), "1:::0800:1800:Mo:");
//!
//! let monday = NaiveDate::from_ymd_opt(2020, 2, 17).unwrap();
//! let lunch = TimeSlot::new(ClockTime::new(12, 0), ClockTime::new(13, 0));
//! let open = rules.availability(monday, &[lunch]).unwrap();
//! assert_eq!(open.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`clock`] — minute-of-day `ClockTime` values
//! - [`slot`] — `TimeSlot` interval algebra (contains, sub, union, set operations)
//! - [`weekday`] — two-letter weekday codes
//! - [`rule`] — `ScheduleRule` encoding and positional decoding
//! - [`ruleset`] — rule precedence, availability and next-slot search
//! - [`dates`] — date stepping that skips excluded dates
//! - [`attribute`] — key-value store attribute marshaling
//! - [`error`] — Error types

pub mod attribute;
pub mod clock;
pub mod dates;
pub mod error;
pub mod rule;
pub mod ruleset;
pub mod slot;
pub mod weekday;

pub use attribute::AttributeValue;
pub use clock::ClockTime;
pub use dates::add_date;
pub use error::ScheduleError;
pub use rule::{RuleKind, ScheduleRule};
pub use ruleset::{RuleSet, SearchOptions};
pub use slot::TimeSlot;
