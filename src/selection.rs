//! Selection modes and date expansion
//!
//! A [`Selection`] is what the picker hands over when the user presses
//! generate. [`generate`] expands it into a [`ResultSet`] according to its mode.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::Serialize;
use tracing::debug;

use crate::date::{days_inclusive, CalendarDate};
use crate::error::{Error, Result};
use crate::format::{format_date, join_tokens, range_summary, FormattedDate};

/// How a raw date set is expanded into output dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// One date, or every day between the earliest and latest selected
    #[default]
    Range,
    /// Exactly the selected dates
    Multiple,
    /// Every day between start and end that falls on one weekday
    Weekly,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Range => "range",
            SelectionMode::Multiple => "multiple",
            SelectionMode::Weekly => "weekly",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "range" | "single" => Ok(SelectionMode::Range),
            "multiple" | "multi" => Ok(SelectionMode::Multiple),
            "weekly" | "week" => Ok(SelectionMode::Weekly),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

/// A mode together with the inputs it needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Range(Vec<CalendarDate>),
    Multiple(Vec<CalendarDate>),
    Weekly {
        start: CalendarDate,
        end: CalendarDate,
        weekday: Weekday,
    },
}

impl Selection {
    pub fn mode(&self) -> SelectionMode {
        match self {
            Selection::Range(_) => SelectionMode::Range,
            Selection::Multiple(_) => SelectionMode::Multiple,
            Selection::Weekly { .. } => SelectionMode::Weekly,
        }
    }
}

/// Expand a selection into its output dates, ascending
pub fn expand(selection: &Selection) -> Result<Vec<CalendarDate>> {
    match selection {
        Selection::Range(dates) => {
            // Interior picks are irrelevant, only the bounds matter
            let start = dates.iter().min().ok_or(Error::EmptyInput)?;
            let end = dates.iter().max().ok_or(Error::EmptyInput)?;
            Ok(days_inclusive(*start, *end).collect())
        }
        Selection::Multiple(dates) => {
            if dates.is_empty() {
                return Err(Error::EmptyInput);
            }
            let mut dates = dates.clone();
            dates.sort();
            Ok(dates)
        }
        Selection::Weekly { start, end, weekday } => {
            if start > end {
                return Err(Error::InvalidRange {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
            Ok(days_inclusive(*start, *end)
                .filter(|day| day.weekday() == *weekday)
                .collect())
        }
    }
}

/// Ordered output of one generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    pub mode: SelectionMode,
    pub dates: Vec<FormattedDate>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormattedDate> {
        self.dates.iter()
    }

    /// Compact tokens in ascending order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.dates.iter().map(|d| d.yyyymmdd.as_str())
    }

    /// Compact tokens joined with `,`
    pub fn combined(&self) -> String {
        join_tokens(self.tokens())
    }

    /// Summary line when this is a contiguous range of more than one day
    pub fn summary(&self) -> Option<String> {
        if self.mode != SelectionMode::Range || self.dates.len() < 2 {
            return None;
        }
        let first = self.dates.first()?;
        let last = self.dates.last()?;
        Some(range_summary(first, last))
    }
}

/// Expand and format a selection
///
/// Fails before producing anything on empty input, a reversed weekly range, or
/// (upstream) unparseable text.
pub fn generate(selection: &Selection) -> Result<ResultSet> {
    let dates = expand(selection)?;
    debug!(mode = %selection.mode(), count = dates.len(), "generated dates");

    Ok(ResultSet {
        mode: selection.mode(),
        dates: dates.into_iter().map(format_date).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(year, month, day).unwrap()
    }

    #[test]
    fn test_range_single_date() {
        let result = generate(&Selection::Range(vec![ymd(2025, 7, 1)])).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.dates[0].display, "2025年7月1日（火）");
        assert_eq!(result.summary(), None);
    }

    #[test]
    fn test_range_enumerates_bounds() {
        let result = generate(&Selection::Range(vec![ymd(2025, 7, 12), ymd(2025, 7, 1)])).unwrap();
        assert_eq!(result.len(), 12);
        assert_eq!(result.summary().unwrap(), "2025年7月1日（火）～12日（土）");

        let expected: Vec<String> = (1..=12).map(|d| format!("202507{:02}", d)).collect();
        assert_eq!(result.combined(), expected.join(","));
    }

    #[test]
    fn test_range_collapses_to_endpoints() {
        let sparse = vec![ymd(2025, 7, 10), ymd(2025, 7, 3), ymd(2025, 7, 5)];
        let result = expand(&Selection::Range(sparse)).unwrap();
        assert_eq!(result, days_inclusive(ymd(2025, 7, 3), ymd(2025, 7, 10)).collect::<Vec<_>>());
    }

    #[test]
    fn test_range_length_property() {
        let pairs = [
            (ymd(2025, 12, 28), ymd(2026, 1, 5)),
            (ymd(2024, 2, 1), ymd(2024, 3, 31)),
            (ymd(2023, 1, 1), ymd(2023, 12, 31)),
        ];
        for (start, end) in pairs {
            let dates = expand(&Selection::Range(vec![start, end])).unwrap();
            assert_eq!(dates.len() as i64, start.days_until(&end) + 1);
            assert!(dates.windows(2).all(|w| w[0].days_until(&w[1]) == 1));
        }
    }

    #[test]
    fn test_range_cross_year_summary() {
        let result = generate(&Selection::Range(vec![ymd(2025, 12, 28), ymd(2026, 1, 5)])).unwrap();
        assert_eq!(result.summary().unwrap(), "2025年12月28日（日）～2026年1月5日（月）");
    }

    #[test]
    fn test_multiple_sorts_and_keeps_duplicates() {
        let input = vec![ymd(2025, 7, 9), ymd(2025, 7, 1), ymd(2025, 7, 9)];
        let result = generate(&Selection::Multiple(input)).unwrap();
        assert_eq!(result.combined(), "20250701,20250709,20250709");
        assert_eq!(result.summary(), None);
    }

    #[test]
    fn test_weekly_filters_weekday() {
        let selection = Selection::Weekly {
            start: ymd(2025, 7, 1),
            end: ymd(2025, 7, 31),
            weekday: Weekday::Tue,
        };
        let result = generate(&selection).unwrap();
        assert_eq!(result.combined(), "20250701,20250708,20250715,20250722,20250729");
        assert!(result.iter().all(|d| d.display.ends_with("（火）")));
        assert_eq!(result.summary(), None);

        let range = expand(&Selection::Range(vec![ymd(2025, 7, 1), ymd(2025, 7, 31)])).unwrap();
        assert!(result.iter().all(|d| range.contains(&d.date)));
    }

    #[test]
    fn test_weekly_can_be_empty() {
        let selection = Selection::Weekly {
            start: ymd(2025, 7, 1),
            end: ymd(2025, 7, 3),
            weekday: Weekday::Sat,
        };
        assert!(generate(&selection).unwrap().is_empty());
    }

    #[test]
    fn test_weekly_rejects_reversed_range() {
        let selection = Selection::Weekly {
            start: ymd(2025, 7, 31),
            end: ymd(2025, 7, 1),
            weekday: Weekday::Mon,
        };
        assert!(matches!(generate(&selection), Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(generate(&Selection::Range(vec![])), Err(Error::EmptyInput)));
        assert!(matches!(generate(&Selection::Multiple(vec![])), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("range".parse::<SelectionMode>().unwrap(), SelectionMode::Range);
        assert_eq!("Multiple".parse::<SelectionMode>().unwrap(), SelectionMode::Multiple);
        assert_eq!("weekly".parse::<SelectionMode>().unwrap(), SelectionMode::Weekly);
        assert!(matches!("daily".parse::<SelectionMode>(), Err(Error::InvalidMode(ref s)) if s == "daily"));
    }
}
