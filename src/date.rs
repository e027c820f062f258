//! Calendar date parsing module
//!
//! Provides the [`CalendarDate`] type along with parsers for the text forms a
//! date picker hands over: `YYYY/MM/DD`, ISO `YYYY-MM-DD`, the compact
//! `YYYYMMDD` token, and the `, `-delimited multi-select string.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Weekday names indexed by day-of-week (0 = Sunday)
pub const WEEKDAY_JP: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// A year/month/day triple with no time component
///
/// Always a real calendar date: construction goes through `NaiveDate`, which
/// rejects overflow such as February 30th instead of rolling into March.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from its components, rejecting anything that does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or_else(|| Error::InvalidDateFormat(format!("{}/{:02}/{:02}", year, month, day)))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Day-of-week index, 0 = Sunday .. 6 = Saturday
    pub fn weekday_index(&self) -> usize {
        self.0.weekday().num_days_from_sunday() as usize
    }

    /// Japanese single-character weekday name
    pub fn weekday_jp(&self) -> &'static str {
        WEEKDAY_JP[self.weekday_index()]
    }

    /// Compact `YYYYMMDD` token
    pub fn token(&self) -> String {
        format!("{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }

    /// Number of days from `self` to `other` (negative if `other` is earlier)
    pub fn days_until(&self, other: &CalendarDate) -> i64 {
        (other.0 - self.0).num_days()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_date(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Formats tried in turn for separated dates
const DATE_FORMATS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];

/// Parse a single date
///
/// Supported formats:
/// - `"2025/07/01"` or `"2025/7/1"` (picker format)
/// - `"2025-07-01"` (ISO format)
/// - `"20250701"` (compact token)
pub fn parse_date(text: &str) -> Result<CalendarDate> {
    let text = text.trim();
    let invalid = || Error::InvalidDateFormat(text.to_string());

    // Compact token: chrono's %Y is greedy, so split the digits before parsing
    if text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit()) {
        let iso = format!("{}-{}-{}", &text[0..4], &text[4..6], &text[6..8]);
        return NaiveDate::parse_from_str(&iso, "%Y-%m-%d")
            .map(CalendarDate)
            .map_err(|_| invalid());
    }

    // Year must be four digits so the compact token stays eight characters wide
    let year = text.split(['/', '-']).next().unwrap_or_default();
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .map(CalendarDate)
        .ok_or_else(invalid)
}

/// Parse the `, `-delimited multi-select string into dates, in the order given
///
/// Empty pieces (doubled or trailing commas) are skipped. Any piece that is not
/// a valid date fails the whole list.
pub fn parse_date_list(text: &str) -> Result<Vec<CalendarDate>> {
    text.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(parse_date)
        .collect()
}

/// Parse a weekday given as an index or a name (case-insensitive)
///
/// Accepts `0`..`6` (0 = Sunday), Japanese names such as `火`, `火曜` or
/// `火曜日`, and English names or three-letter abbreviations.
pub fn parse_weekday(s: &str) -> Result<Weekday> {
    let trimmed = s.trim();

    if let Ok(index) = trimmed.parse::<usize>() {
        return weekday_from_index(index);
    }

    let jp = trimmed
        .strip_suffix("曜日")
        .or_else(|| trimmed.strip_suffix("曜"))
        .unwrap_or(trimmed);
    if let Some(index) = WEEKDAY_JP.iter().position(|name| *name == jp) {
        return weekday_from_index(index);
    }

    let lower = trimmed.to_lowercase();
    match lower.as_str() {
        "sunday" | "sun" => Ok(Weekday::Sun),
        "monday" | "mon" => Ok(Weekday::Mon),
        "tuesday" | "tue" => Ok(Weekday::Tue),
        "wednesday" | "wed" => Ok(Weekday::Wed),
        "thursday" | "thu" => Ok(Weekday::Thu),
        "friday" | "fri" => Ok(Weekday::Fri),
        "saturday" | "sat" => Ok(Weekday::Sat),
        _ => Err(Error::InvalidWeekday(trimmed.to_string())),
    }
}

/// Map a day-of-week index (0 = Sunday) to a weekday
pub fn weekday_from_index(index: usize) -> Result<Weekday> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        _ => Err(Error::InvalidWeekday(index.to_string())),
    }
}

/// Every day from `start` to `end` inclusive, ascending
///
/// Lazy and bounded only by its arguments. Yields nothing when `start > end`.
pub fn days_inclusive(start: CalendarDate, end: CalendarDate) -> impl Iterator<Item = CalendarDate> {
    start
        .0
        .iter_days()
        .take_while(move |day| *day <= end.0)
        .map(CalendarDate)
}
