use chrono::{Datelike, NaiveDateTime, Timelike};

/// Renders a date-time through a display pattern, substituting the `YYYY`,
/// `MM`, `DD`, `HH`, `mm`, `ss` tokens with zero-padded components. Text
/// outside the tokens passes through unchanged.
pub fn format_pattern(datetime: &NaiveDateTime, pattern: &str) -> String {
    pattern
        .replace("YYYY", &format!("{:04}", datetime.year()))
        .replace("MM", &format!("{:02}", datetime.month()))
        .replace("DD", &format!("{:02}", datetime.day()))
        .replace("HH", &format!("{:02}", datetime.hour()))
        .replace("mm", &format!("{:02}", datetime.minute()))
        .replace("ss", &format!("{:02}", datetime.second()))
}
