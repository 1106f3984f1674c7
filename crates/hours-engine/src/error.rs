//! Error types for hours-engine operations.
//!
//! An empty day is not an error: resolution functions report "no availability"
//! as `Ok(None)` or an empty slot list. Errors are reserved for malformed stored
//! rules and for a forward search that runs off its horizon.

use std::num::ParseIntError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The encoded rule is missing a required field boundary.
    #[error("invalid schedule rule {rule:?}: {reason}")]
    InvalidRule { rule: String, reason: &'static str },

    /// A time field is present but does not hold a valid clock value.
    #[error("invalid {field} time in rule {rule:?}")]
    InvalidTime {
        field: &'static str,
        rule: String,
        #[source]
        source: Option<ParseIntError>,
    },

    /// An attribute value did not carry the representation it was read as.
    #[error("attribute value is not a {expected}: missing {key} key")]
    MissingAttribute {
        expected: &'static str,
        key: &'static str,
    },

    /// Attribute JSON could not be read or written.
    #[error("attribute JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no time matches in next {days} days")]
    SearchExhausted { days: u32 },
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
