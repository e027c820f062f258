//! Text blocks written out for a result set

use serde::Serialize;

use crate::selection::ResultSet;

/// Shown in the display block when a generation matched no dates
pub const NO_MATCH_PLACEHOLDER: &str = "条件に合う日付がありませんでした。";

/// The two parallel text blocks plus the comma-joined token string
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RenderedOutput {
    /// Range summary, when the result is a contiguous range of several days
    pub summary: Option<String>,
    /// Long Japanese lines (or the summary, or the placeholder)
    pub display_lines: Vec<String>,
    /// One `YYYYMMDD` token per date
    pub token_lines: Vec<String>,
    /// Tokens joined with `,`
    pub combined: String,
}

impl RenderedOutput {
    /// Display block as one newline-separated text
    pub fn display_text(&self) -> String {
        self.display_lines.join("\n")
    }

    /// Token block as one newline-separated text
    pub fn token_text(&self) -> String {
        self.token_lines.join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.display_lines.is_empty() && self.token_lines.is_empty() && self.combined.is_empty()
    }

    /// Plain-text layout for a terminal: display block, token block, combined string
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in &self.display_lines {
            out.push_str(line);
            out.push('\n');
        }
        if !self.token_lines.is_empty() {
            out.push('\n');
            for line in &self.token_lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&self.combined);
            out.push('\n');
        }
        out
    }
}

/// Render a result set
pub fn render(results: &ResultSet) -> RenderedOutput {
    if results.is_empty() {
        return RenderedOutput {
            summary: None,
            display_lines: vec![NO_MATCH_PLACEHOLDER.to_string()],
            token_lines: Vec::new(),
            combined: String::new(),
        };
    }

    let summary = results.summary();
    let display_lines = match &summary {
        Some(line) => vec![line.clone()],
        None => results.iter().map(|d| d.display.clone()).collect(),
    };

    RenderedOutput {
        summary,
        display_lines,
        token_lines: results.tokens().map(str::to_string).collect(),
        combined: results.combined(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::CalendarDate;
    use crate::selection::{generate, Selection, SelectionMode};

    fn ymd(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(year, month, day).unwrap()
    }

    #[test]
    fn test_render_range() {
        let results = generate(&Selection::Range(vec![ymd(2025, 7, 1), ymd(2025, 7, 3)])).unwrap();
        let output = render(&results);
        assert_eq!(output.display_lines, vec!["2025年7月1日（火）～3日（木）"]);
        assert_eq!(output.token_lines, vec!["20250701", "20250702", "20250703"]);
        assert_eq!(output.combined, "20250701,20250702,20250703");
        assert_eq!(output.summary.as_deref(), Some("2025年7月1日（火）～3日（木）"));
    }

    #[test]
    fn test_render_multiple() {
        let results = generate(&Selection::Multiple(vec![ymd(2025, 7, 3), ymd(2025, 7, 1)])).unwrap();
        let output = render(&results);
        assert_eq!(output.display_lines, vec!["2025年7月1日（火）", "2025年7月3日（木）"]);
        assert_eq!(output.display_text(), "2025年7月1日（火）\n2025年7月3日（木）");
        assert_eq!(output.token_text(), "20250701\n20250703");
        assert_eq!(output.summary, None);
    }

    #[test]
    fn test_render_empty_placeholder() {
        let results = ResultSet {
            mode: SelectionMode::Weekly,
            dates: vec![],
        };
        let output = render(&results);
        assert_eq!(output.display_lines, vec![NO_MATCH_PLACEHOLDER]);
        assert!(output.token_lines.is_empty());
        assert!(output.combined.is_empty());
        assert_eq!(output.to_text(), format!("{}\n", NO_MATCH_PLACEHOLDER));
    }

    #[test]
    fn test_to_text_layout() {
        let results = generate(&Selection::Range(vec![ymd(2025, 7, 1)])).unwrap();
        let text = render(&results).to_text();
        assert_eq!(text, "2025年7月1日（火）\n\n20250701\n\n20250701\n");
    }

    #[test]
    fn test_default_is_blank() {
        assert!(RenderedOutput::default().is_blank());
    }
}
