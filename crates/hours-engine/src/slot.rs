//! Time-slot interval algebra.
//!
//! A [`TimeSlot`] is a `[from, to]` window of clock times. Both endpoints are
//! inclusive for the purposes of containment and merging: two slots that touch
//! at a shared endpoint are treated as adjacent and union into one.
//!
//! The set-level functions ([`subtract`], [`subtract_all`], [`union_set`]) work
//! on ordered slot lists and never reorder or mutate the caller's storage.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;

/// A window between two clock times on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub from: ClockTime,
    pub to: ClockTime,
}

impl TimeSlot {
    pub fn new(from: ClockTime, to: ClockTime) -> Self {
        TimeSlot { from, to }
    }

    /// `self` completely contains `other`, endpoints inclusive.
    pub fn contains(&self, other: &TimeSlot) -> bool {
        self.from <= other.from && self.to >= other.to
    }

    /// The start of `other` falls within `self`, endpoints inclusive.
    ///
    /// This is a merge test rather than a symmetric overlap test: it assumes
    /// `other` does not start before `self`, which holds once slots are sorted.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.from <= other.from && self.to >= other.from
    }

    /// The smallest slot covering both. Any gap between them is included.
    pub fn union(&self, other: &TimeSlot) -> TimeSlot {
        TimeSlot {
            from: self.from.min(other.from),
            to: self.to.max(other.to),
        }
    }

    /// Removes `other` from `self`, returning what remains.
    ///
    /// - disjoint (or only touching at an endpoint): `self` unchanged
    /// - identical: nothing remains
    /// - `other` sharing the start: the trailing remainder
    /// - `other` sharing the end: the leading remainder
    /// - `other` strictly inside: the leading and trailing remainders
    ///
    /// An `other` that hangs over one edge of `self` is clipped to `self`
    /// first, leaving a single truncated remainder.
    pub fn sub(&self, other: &TimeSlot) -> Vec<TimeSlot> {
        if self == other {
            return Vec::new();
        }
        if other.to <= self.from || other.from >= self.to {
            return vec![*self];
        }

        let cut = TimeSlot {
            from: other.from.max(self.from),
            to: other.to.min(self.to),
        };

        match (cut.from == self.from, cut.to == self.to) {
            (true, true) => Vec::new(),
            (true, false) => vec![TimeSlot::new(cut.to, self.to)],
            (false, true) => vec![TimeSlot::new(self.from, cut.from)],
            (false, false) => vec![
                TimeSlot::new(self.from, cut.from),
                TimeSlot::new(cut.to, self.to),
            ],
        }
    }

    /// Length of the slot, borrowing an hour when `to`'s minutes are smaller
    /// than `from`'s.
    pub fn duration(&self) -> Duration {
        let mut hours = self.to.hour() as i64 - self.from.hour() as i64;
        let mut minutes = self.to.minute() as i64 - self.from.minute() as i64;
        if minutes < 0 {
            minutes += 60;
            hours -= 1;
        }
        Duration::minutes(hours * 60 + minutes)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Removes `v` from the first slot that fully contains it.
///
/// Slots before the match are kept as-is, the match is replaced by whatever
/// [`TimeSlot::sub`] leaves, and later slots follow untouched. When no slot
/// contains `v` the set comes back unchanged.
pub fn subtract(slots: &[TimeSlot], v: &TimeSlot) -> Vec<TimeSlot> {
    let Some(index) = slots.iter().position(|slot| slot.contains(v)) else {
        return slots.to_vec();
    };

    let mut results = Vec::with_capacity(slots.len() + 1);
    results.extend_from_slice(&slots[..index]);
    results.extend(slots[index].sub(v));
    results.extend_from_slice(&slots[index + 1..]);
    results
}

/// Applies [`subtract`] once per element of `sans`, in order.
pub fn subtract_all(slots: &[TimeSlot], sans: &[TimeSlot]) -> Vec<TimeSlot> {
    sans.iter()
        .fold(slots.to_vec(), |remaining, v| subtract(&remaining, v))
}

/// Merges overlapping or touching slots into a sorted, minimal set.
///
/// Works on a private copy sorted by `from`, widest first on ties, then sweeps
/// left to right extending a running slot while the next one overlaps it.
pub fn union_set(slots: &[TimeSlot]) -> Vec<TimeSlot> {
    let mut sorted = slots.to_vec();
    sorted.sort_by(|a, b| a.from.cmp(&b.from).then(b.to.cmp(&a.to)));

    let mut merged: Vec<TimeSlot> = Vec::with_capacity(sorted.len());
    for slot in sorted {
        if let Some(last) = merged.last_mut() {
            if last.overlaps(&slot) {
                *last = last.union(&slot);
                continue;
            }
        }
        merged.push(slot);
    }

    merged
}
