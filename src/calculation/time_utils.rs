//! Calendar and clock helpers.
//!
//! Weeks start on Monday regardless of locale. Clock strings are HH:mm and
//! are parsed leniently: any segment that is not a number counts as zero.

use chrono::{Datelike, Days, NaiveDate};

/// Returns the Monday of the week containing `date`.
///
/// # Examples
///
/// ```
/// use banquet_schedule::calculation::start_of_week;
/// use chrono::NaiveDate;
///
/// // 2026-01-18 is a Sunday; its week began on Monday 2026-01-12.
/// let sunday = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
/// assert_eq!(start_of_week(sunday), NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
/// ```
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday();
    add_days(date, -i64::from(back))
}

/// Shifts `date` by `n` days in either direction.
///
/// Saturates at the calendar bounds chrono supports.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    let magnitude = Days::new(n.unsigned_abs());
    let shifted = if n >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(if n >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Formats a date as `YYYY-MM-DD`.
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a `YYYY-MM-DD` string.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// Returns the seven dates of the week that begins at `week_start`.
pub fn week_days(week_start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|offset| add_days(week_start, offset as i64))
}

/// Returns true if `date` lies within the seven days starting at `week_start`.
pub fn in_week(date: NaiveDate, week_start: NaiveDate) -> bool {
    date >= week_start && date <= add_days(week_start, 6)
}

/// Converts an HH:mm string to minutes since midnight.
///
/// Never fails: a missing minute part is 0 and non-numeric parts are 0.
///
/// # Examples
///
/// ```
/// use banquet_schedule::calculation::minutes;
///
/// assert_eq!(minutes("09:30"), 570);
/// assert_eq!(minutes("7"), 420);
/// assert_eq!(minutes("ab:15"), 15);
/// assert_eq!(minutes(""), 0);
/// ```
pub fn minutes(hhmm: &str) -> i64 {
    let mut parts = hhmm.trim().splitn(2, ':');
    let hours = parts.next().map(lenient_int).unwrap_or(0);
    let mins = parts.next().map(lenient_int).unwrap_or(0);
    hours.saturating_mul(60).saturating_add(mins)
}

/// Formats minutes since midnight as zero-padded HH:mm.
///
/// Values past midnight are not wrapped, so 1500 becomes "25:00".
pub fn hhmm(total_minutes: i64) -> String {
    format!(
        "{:02}:{:02}",
        total_minutes.div_euclid(60),
        total_minutes.rem_euclid(60)
    )
}

fn lenient_int(segment: &str) -> i64 {
    segment.trim().parse().unwrap_or(0)
}
