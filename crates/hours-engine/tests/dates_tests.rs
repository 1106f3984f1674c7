//! Tests for date stepping over excluded ranges.

use chrono::{Days, NaiveDate, Weekday};
use hours_engine::{add_date, ClockTime, RuleSet, ScheduleRule};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    day(2020, 7, 20)
}

fn offset(days: i64) -> NaiveDate {
    if days >= 0 {
        today().checked_add_days(Days::new(days as u64)).unwrap()
    } else {
        today().checked_sub_days(Days::new(days.unsigned_abs())).unwrap()
    }
}

fn holiday(from: NaiveDate, to: NaiveDate) -> Vec<ScheduleRule> {
    vec![ScheduleRule::excluded(from, to, &[])]
}

#[test]
fn zero_days_is_a_no_op() {
    assert_eq!(add_date(today(), 0, &[]), today());
}

#[test]
fn plain_steps() {
    assert_eq!(add_date(today(), 1, &[]), offset(1));
    assert_eq!(add_date(today(), -1, &[]), offset(-1));
    assert_eq!(add_date(today(), 10, &[]), offset(10));
}

#[test]
fn holiday_yesterday() {
    let rules = holiday(offset(-1), offset(-1));
    assert_eq!(add_date(today(), -1, &rules), offset(-2));
}

#[test]
fn holiday_yesterday_and_today() {
    let rules = holiday(offset(-1), offset(0));
    assert_eq!(add_date(today(), -1, &rules), offset(-2));
}

#[test]
fn holiday_yesterday_and_day_before_from_tomorrow() {
    // Starting tomorrow, stepping back lands on today and yesterday, both excluded.
    let rules = holiday(offset(-1), offset(0));
    assert_eq!(add_date(offset(1), -1, &rules), offset(-2));
}

#[test]
fn holiday_tomorrow() {
    let rules = holiday(offset(1), offset(1));
    assert_eq!(add_date(today(), 1, &rules), offset(2));
}

#[test]
fn holiday_today_and_tomorrow() {
    let rules = holiday(offset(0), offset(1));
    assert_eq!(add_date(today(), 1, &rules), offset(2));
}

#[test]
fn holiday_tomorrow_and_day_after_from_yesterday() {
    let rules = holiday(offset(0), offset(1));
    assert_eq!(add_date(offset(-1), 1, &rules), offset(2));
}

#[test]
fn open_hours_rules_are_not_exclusions() {
    let rules = vec![ScheduleRule::dated(
        offset(1),
        offset(1),
        ClockTime::new(8, 0),
        ClockTime::new(12, 0),
        &[],
    )];
    assert_eq!(add_date(today(), 1, &rules), offset(1));
}

#[test]
fn recurring_exclusions_do_not_skip() {
    let rules = vec![ScheduleRule::recurring_exclusion(&[Weekday::Tue])];
    assert_eq!(add_date(today(), 1, &rules), offset(1));
}

#[test]
fn rule_set_delegates() {
    let set: RuleSet = holiday(offset(1), offset(3)).into();
    assert_eq!(set.add_date(today(), 2), offset(5));
}
