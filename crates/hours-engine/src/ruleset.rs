//! Resolution of a rule set into open windows.
//!
//! A [`RuleSet`] is an ordered list of [`ScheduleRule`]s. Resolving a date runs
//! a small precedence pipeline over the rules that match it:
//!
//! 1. any matching [`RuleKind::Exclusion`] blacks the day out;
//! 2. otherwise matching [`RuleKind::DatedOpen`] rules are authoritative;
//! 3. otherwise matching [`RuleKind::RecurringOpen`] rules apply.
//!
//! On top of that sit [`RuleSet::availability`] (open windows minus
//! reservations), [`RuleSet::after`] (windows from a moment onward) and
//! [`RuleSet::next`] (forward search for the next open slot).
//!
//! A day with no open window is a normal result (`None` or an empty list),
//! never an error.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::clock::ClockTime;
use crate::dates;
use crate::error::{Result, ScheduleError};
use crate::rule::{RuleKind, ScheduleRule};
use crate::slot::{self, TimeSlot};

/// Default forward-search horizon for [`RuleSet::next`], start date included.
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Options for [`RuleSet::next_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Calendar days searched, counting the start date.
    pub horizon_days: u32,
    /// Shortest remaining slot that counts as open.
    pub min_duration: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            horizon_days: DEFAULT_HORIZON_DAYS,
            min_duration: Duration::zero(),
        }
    }
}

/// An ordered collection of rules. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(Vec<ScheduleRule>);

/// The open-hours rules matching one date, after exclusions are checked.
struct DayMatch<'a> {
    excluded: bool,
    open: Vec<&'a ScheduleRule>,
}

impl<'a> DayMatch<'a> {
    fn collect<I>(rules: I, date: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a ScheduleRule>,
    {
        let mut excluded = false;
        let mut open = Vec::new();
        for rule in rules {
            if !rule.contains(date) {
                continue;
            }
            match rule.kind() {
                RuleKind::Exclusion => excluded = true,
                RuleKind::DatedOpen | RuleKind::RecurringOpen => open.push(rule),
            }
        }
        DayMatch { excluded, open }
    }

    /// Dated rules when any matched, recurring rules otherwise.
    fn authoritative(&self) -> Vec<&'a ScheduleRule> {
        let dated = self.open.iter().any(|r| r.kind() == RuleKind::DatedOpen);
        self.open
            .iter()
            .copied()
            .filter(|r| !dated || r.kind() == RuleKind::DatedOpen)
            .collect()
    }
}

impl RuleSet {
    pub fn new() -> Self {
        RuleSet(Vec::new())
    }

    pub fn push(&mut self, rule: ScheduleRule) {
        self.0.push(rule);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleRule> {
        self.0.iter()
    }

    pub fn rules(&self) -> &[ScheduleRule] {
        &self.0
    }

    /// True if an identical rule (byte for byte) is in the set.
    pub fn contains(&self, want: &ScheduleRule) -> bool {
        self.0.iter().any(|rule| rule == want)
    }

    /// True if any rule matches the date, exclusions included.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.0.iter().any(|rule| rule.contains(date))
    }

    /// True if any rule matches the weekday.
    pub fn contains_weekday(&self, weekday: Weekday) -> bool {
        self.0.iter().any(|rule| rule.contains_weekday(weekday))
    }

    /// The single open window for `date`.
    ///
    /// Rules are considered in raw byte order. Any matching exclusion wins
    /// outright; otherwise the first matching open-hours rule decides the day.
    /// `Ok(None)` means no availability.
    pub fn hours(&self, date: NaiveDate) -> Result<Option<TimeSlot>> {
        let mut sorted: Vec<&ScheduleRule> = self.0.iter().collect();
        sorted.sort();

        let day = DayMatch::collect(sorted, date);
        if day.excluded {
            debug!(%date, "date blacked out by exclusion rule");
            return Ok(None);
        }

        day.open
            .first()
            .map(|rule| rule.time_slot())
            .transpose()
    }

    /// Every open window for `date`, unioned and sorted by start time.
    ///
    /// A blacked-out date yields an empty list. Matching dated rules replace
    /// the recurring rules for the date entirely.
    pub fn time_slots(&self, date: NaiveDate) -> Result<Vec<TimeSlot>> {
        let day = DayMatch::collect(&self.0, date);
        if day.excluded {
            debug!(%date, "date blacked out by exclusion rule");
            return Ok(Vec::new());
        }

        let rules = day.authoritative();
        if rules.len() < day.open.len() {
            debug!(%date, dated = rules.len(), "dated rules override recurring hours");
        }

        let windows = rules
            .into_iter()
            .map(ScheduleRule::time_slot)
            .collect::<Result<Vec<_>>>()?;

        Ok(slot::union_set(&windows))
    }

    /// Open windows for `date` with each reserved slot removed, in order.
    pub fn availability(&self, date: NaiveDate, reserved: &[TimeSlot]) -> Result<Vec<TimeSlot>> {
        let open = self.time_slots(date)?;
        Ok(slot::subtract_all(&open, reserved))
    }

    /// Open windows on the date of `now`, from the time of `now` onward.
    pub fn after(&self, now: NaiveDateTime) -> Result<Vec<TimeSlot>> {
        self.after_time(now.date(), ClockTime::from_time(now.time()))
    }

    /// Drops slots ending at or before `at` and clips the one straddling it.
    fn after_time(&self, date: NaiveDate, at: ClockTime) -> Result<Vec<TimeSlot>> {
        let slots = self
            .time_slots(date)?
            .into_iter()
            .filter(|slot| slot.to > at)
            .map(|slot| {
                if slot.from <= at {
                    TimeSlot::new(at, slot.to)
                } else {
                    slot
                }
            })
            .collect();
        Ok(slots)
    }

    /// The start of the next open slot at least `min_duration` long, searching
    /// from `now` over the default horizon and skipping `busy` slots.
    ///
    /// # Errors
    /// Returns `ScheduleError::SearchExhausted` when no day in the horizon has
    /// a qualifying slot, and propagates rule decoding errors.
    pub fn next(
        &self,
        now: NaiveDateTime,
        min_duration: Duration,
        busy: &[TimeSlot],
    ) -> Result<NaiveDateTime> {
        let options = SearchOptions {
            min_duration,
            ..SearchOptions::default()
        };
        self.next_with_options(now, busy, &options)
    }

    /// Same as [`RuleSet::next`] with an explicit horizon.
    ///
    /// The first day is searched from the time of `now`; every later day from
    /// midnight. The busy slots are removed from every day searched.
    pub fn next_with_options(
        &self,
        now: NaiveDateTime,
        busy: &[TimeSlot],
        options: &SearchOptions,
    ) -> Result<NaiveDateTime> {
        let start = now.date();
        let mut at = ClockTime::from_time(now.time());

        for offset in 0..options.horizon_days {
            let Some(day) = start.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };

            let mut slots = self.after_time(day, at)?;
            if !busy.is_empty() {
                slots = slot::subtract_all(&slots, busy);
            }
            trace!(%day, open = slots.len(), "searching day");

            if let Some(found) = slots
                .iter()
                .find(|slot| slot.duration() >= options.min_duration)
            {
                let next = found.from.align(day);
                debug!(%next, "next open slot found");
                return Ok(next);
            }

            at = ClockTime::MIDNIGHT;
        }

        debug!(days = options.horizon_days, "no open slot within horizon");
        Err(ScheduleError::SearchExhausted {
            days: options.horizon_days,
        })
    }

    /// Moves `date` by `days` calendar days, skipping dates inside any
    /// exclusion rule's date range. See [`dates::add_date`].
    pub fn add_date(&self, date: NaiveDate, days: i64) -> NaiveDate {
        dates::add_date(date, days, &self.0)
    }
}

impl From<Vec<ScheduleRule>> for RuleSet {
    fn from(rules: Vec<ScheduleRule>) -> Self {
        RuleSet(rules)
    }
}

impl FromIterator<ScheduleRule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = ScheduleRule>>(iter: T) -> Self {
        RuleSet(iter.into_iter().collect())
    }
}

impl IntoIterator for RuleSet {
    type Item = ScheduleRule;
    type IntoIter = std::vec::IntoIter<ScheduleRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a ScheduleRule;
    type IntoIter = std::slice::Iter<'a, ScheduleRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
