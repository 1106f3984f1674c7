//! Calendar-day arithmetic that steps over excluded dates.

use chrono::{Days, NaiveDate};
use tracing::trace;

use crate::rule::{ScheduleRule, DATE_FORMAT};

/// Moves `date` by `days` calendar days, one day at a time, in the direction
/// of the sign of `days`.
///
/// A date inside the `[date_from, date_to]` range of any exclusion rule is
/// stepped over without counting towards `days`. Exclusions without a full
/// date range, and the weekdays of dated exclusions, play no part here.
///
/// Stops early if the step would leave chrono's representable range.
pub fn add_date(date: NaiveDate, days: i64, rules: &[ScheduleRule]) -> NaiveDate {
    let excludes: Vec<(&str, &str)> = rules
        .iter()
        .filter(|rule| rule.is_exclude())
        .filter_map(|rule| Some((rule.date_from()?, rule.date_to()?)))
        .collect();

    let forward = days >= 0;
    let mut remaining = days.unsigned_abs();
    let mut current = date;

    while remaining > 0 {
        let step = if forward {
            current.checked_add_days(Days::new(1))
        } else {
            current.checked_sub_days(Days::new(1))
        };
        let Some(next) = step else {
            break;
        };
        current = next;

        let formatted = current.format(DATE_FORMAT).to_string();
        let excluded = excludes
            .iter()
            .any(|&(from, to)| from <= formatted.as_str() && formatted.as_str() <= to);
        if excluded {
            trace!(date = %current, "skipping excluded date");
            continue;
        }

        remaining -= 1;
    }

    current
}
