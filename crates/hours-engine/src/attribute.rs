//! Key-value store attribute marshaling.
//!
//! Rules are persisted as opaque strings: a single rule as a string (`S`)
//! attribute, a rule set as a string-set (`SS`) attribute. String sets carry no
//! order, so only the members of a rule set survive a round trip, not their
//! sequence. Every member is validated on the way back in.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, ScheduleError};
use crate::rule::ScheduleRule;
use crate::ruleset::RuleSet;

/// A store attribute value, in the store's JSON shape (`{"S": ...}` or
/// `{"SS": [...]}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    #[serde(rename = "S", default, skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,
    #[serde(rename = "SS", default, skip_serializing_if = "Option::is_none")]
    pub ss: Option<Vec<String>>,
}

impl AttributeValue {
    pub fn string(value: impl Into<String>) -> Self {
        AttributeValue {
            s: Some(value.into()),
            ss: None,
        }
    }

    pub fn string_set(values: Vec<String>) -> Self {
        AttributeValue {
            s: None,
            ss: Some(values),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl ScheduleRule {
    pub fn to_attribute(&self) -> AttributeValue {
        AttributeValue::string(self.as_str())
    }

    /// Reads a rule from a string attribute, validating its structure.
    pub fn from_attribute(item: &AttributeValue) -> Result<Self> {
        let raw = item.s.as_ref().ok_or(ScheduleError::MissingAttribute {
            expected: "ScheduleRule",
            key: "S",
        })?;
        raw.parse().inspect_err(|e| warn!(error = %e, "rejected stored rule"))
    }
}

impl RuleSet {
    /// An empty set has no string-set representation and marshals to an empty
    /// attribute.
    pub fn to_attribute(&self) -> AttributeValue {
        if self.is_empty() {
            return AttributeValue::default();
        }
        AttributeValue::string_set(self.iter().map(|rule| rule.to_string()).collect())
    }

    /// Reads a rule set from a string-set attribute. A missing set reads as an
    /// empty rule set; any malformed member fails the whole read.
    pub fn from_attribute(item: &AttributeValue) -> Result<Self> {
        let Some(members) = item.ss.as_ref() else {
            return Ok(RuleSet::new());
        };

        members
            .iter()
            .map(|raw| {
                raw.parse::<ScheduleRule>()
                    .inspect_err(|e| warn!(error = %e, "rejected stored rule"))
            })
            .collect()
    }
}
