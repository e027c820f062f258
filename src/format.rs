//! Japanese date formatting

use serde::Serialize;

use crate::date::CalendarDate;

/// Every text form of a single date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedDate {
    pub date: CalendarDate,
    /// `2025年7月1日（火）`
    pub display: String,
    /// `7月1日（火）`
    pub display_short: String,
    /// `1日（火）`
    pub display_day_only: String,
    /// `20250701`
    pub yyyymmdd: String,
}

/// Format a date in every supported form
pub fn format_date(date: CalendarDate) -> FormattedDate {
    let weekday = date.weekday_jp();
    FormattedDate {
        date,
        display: format!("{}年{}月{}日（{}）", date.year(), date.month(), date.day(), weekday),
        display_short: format!("{}月{}日（{}）", date.month(), date.day(), weekday),
        display_day_only: format!("{}日（{}）", date.day(), weekday),
        yyyymmdd: date.token(),
    }
}

/// Summary line for a contiguous range
///
/// The start is always written in full. The end drops whatever it shares with
/// the start: the year and month within one month, the year within one year,
/// nothing across a year boundary.
pub fn range_summary(start: &FormattedDate, end: &FormattedDate) -> String {
    let (s, e) = (start.date, end.date);
    let tail = if s.year() == e.year() && s.month() == e.month() {
        &end.display_day_only
    } else if s.year() == e.year() {
        &end.display_short
    } else {
        &end.display
    };
    format!("{}～{}", start.display, tail)
}

/// Join compact tokens with `,`
pub fn join_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> String {
    tokens.into_iter().collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(year: i32, month: u32, day: u32) -> FormattedDate {
        format_date(CalendarDate::from_ymd(year, month, day).unwrap())
    }

    #[test]
    fn test_format_date() {
        let formatted = fmt(2025, 7, 1);
        assert_eq!(formatted.display, "2025年7月1日（火）");
        assert_eq!(formatted.display_short, "7月1日（火）");
        assert_eq!(formatted.display_day_only, "1日（火）");
        assert_eq!(formatted.yyyymmdd, "20250701");

        let formatted = fmt(2026, 1, 5);
        assert_eq!(formatted.display, "2026年1月5日（月）");
        assert_eq!(formatted.yyyymmdd, "20260105");
    }

    #[test]
    fn test_range_summary_same_month() {
        let summary = range_summary(&fmt(2025, 7, 1), &fmt(2025, 7, 12));
        assert_eq!(summary, "2025年7月1日（火）～12日（土）");
    }

    #[test]
    fn test_range_summary_same_year() {
        let summary = range_summary(&fmt(2025, 7, 28), &fmt(2025, 8, 3));
        assert_eq!(summary, "2025年7月28日（月）～8月3日（日）");
    }

    #[test]
    fn test_range_summary_cross_year() {
        let summary = range_summary(&fmt(2025, 12, 28), &fmt(2026, 1, 5));
        assert_eq!(summary, "2025年12月28日（日）～2026年1月5日（月）");
    }

    #[test]
    fn test_join_tokens() {
        assert_eq!(join_tokens(["20250701", "20250702"]), "20250701,20250702");
        assert_eq!(join_tokens(Vec::<&str>::new()), "");
    }
}
