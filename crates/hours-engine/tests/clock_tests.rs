//! Tests for minute-of-day clock values.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use hours_engine::ClockTime;

#[test]
fn midnight_formats_as_zeroes() {
    assert_eq!(ClockTime::MIDNIGHT.to_string(), "00:00");
}

#[test]
fn encoded_value_is_hour_times_100_plus_minute() {
    let t = ClockTime::new(8, 30);
    assert_eq!(t.as_i64(), 830);
    assert_eq!(t.as_i32(), 830);
    assert_eq!(t.hour(), 8);
    assert_eq!(t.minute(), 30);
    assert_eq!(t.minutes_since_midnight(), 510);
}

#[test]
fn display_pads_hour_and_minute() {
    assert_eq!(ClockTime::new(7, 5).to_string(), "07:05");
    assert_eq!(ClockTime::new(23, 59).to_string(), "23:59");
}

#[test]
fn encode_into_writes_four_digit_field() {
    let mut out = String::from("x:");
    ClockTime::new(1, 5).encode_into(&mut out);
    assert_eq!(out, "x:0105");
}

#[test]
#[should_panic(expected = "invalid hour")]
fn new_rejects_hour_24() {
    ClockTime::new(24, 0);
}

#[test]
#[should_panic(expected = "invalid minute")]
fn new_rejects_minute_60() {
    ClockTime::new(8, 60);
}

#[test]
fn try_new_and_from_encoded_reject_out_of_range() {
    assert_eq!(ClockTime::try_new(24, 0), None);
    assert_eq!(ClockTime::try_new(12, 60), None);
    assert_eq!(ClockTime::from_encoded(860), None);
    assert_eq!(ClockTime::from_encoded(2400), None);
    assert_eq!(ClockTime::from_encoded(2359), Some(ClockTime::new(23, 59)));
}

#[test]
fn align_places_time_on_date_with_zero_seconds() {
    let date = NaiveDate::from_ymd_opt(2020, 7, 20).unwrap();
    let aligned = ClockTime::new(8, 30).align(date);
    assert_eq!(aligned.date(), date);
    assert_eq!(aligned.hour(), 8);
    assert_eq!(aligned.minute(), 30);
    assert_eq!(aligned.second(), 0);
}

#[test]
fn from_time_truncates_seconds() {
    let time = NaiveTime::from_hms_opt(11, 42, 59).unwrap();
    assert_eq!(ClockTime::from_time(time), ClockTime::new(11, 42));
}

#[test]
fn add_carries_minutes_into_hours() {
    assert_eq!(ClockTime::new(8, 45) + Duration::minutes(30), ClockTime::new(9, 15));
}

#[test]
fn add_wraps_past_midnight() {
    assert_eq!(ClockTime::new(23, 30) + Duration::minutes(45), ClockTime::new(0, 15));
    assert_eq!(ClockTime::new(10, 0) + Duration::days(1), ClockTime::new(10, 0));
    assert_eq!(ClockTime::new(0, 10) + Duration::minutes(-20), ClockTime::new(23, 50));
}

#[test]
fn ordering_follows_time_of_day() {
    assert!(ClockTime::new(9, 59) < ClockTime::new(10, 0));
    assert!(ClockTime::MIDNIGHT < ClockTime::new(0, 1));
}

#[test]
fn serde_uses_integer_encoding() {
    let json = serde_json::to_string(&ClockTime::new(17, 30)).unwrap();
    assert_eq!(json, "1730");

    let back: ClockTime = serde_json::from_str("905").unwrap();
    assert_eq!(back, ClockTime::new(9, 5));

    assert!(serde_json::from_str::<ClockTime>("975").is_err());
}

#[test]
fn aligned_time_compares_with_naive_datetime() {
    let date = NaiveDate::from_ymd_opt(2020, 7, 20).unwrap();
    let expected: NaiveDateTime = date.and_hms_opt(14, 0, 0).unwrap();
    assert_eq!(ClockTime::new(14, 0).align(date), expected);
}
