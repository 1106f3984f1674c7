//! Two-letter weekday codes used in the rule encoding.

use chrono::Weekday;

/// Codes indexed by `Weekday::num_days_from_sunday()`.
const CODES: [(&str, Weekday); 7] = [
    ("Su", Weekday::Sun),
    ("Mo", Weekday::Mon),
    ("Tu", Weekday::Tue),
    ("We", Weekday::Wed),
    ("Th", Weekday::Thu),
    ("Fr", Weekday::Fri),
    ("Sa", Weekday::Sat),
];

/// The two-letter code for `weekday` (`Su`, `Mo`, ...).
pub fn code(weekday: Weekday) -> &'static str {
    CODES[weekday.num_days_from_sunday() as usize].0
}

/// Looks up a two-letter code. Anything else, including wrong case, is `None`.
pub fn from_code(code: &[u8]) -> Option<Weekday> {
    CODES
        .iter()
        .find(|(c, _)| c.as_bytes() == code)
        .map(|&(_, weekday)| weekday)
}
