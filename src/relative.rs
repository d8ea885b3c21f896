//! Human-readable relative formatting ("yesterday", "in 3 days",
//! "about 2 hours ago").
//!
//! Every function takes the reference instant as an argument so results are
//! pure in their inputs; callers pass their own clock reading.

use crate::consts::MONTH_ABBREV;
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Weekday};

/// Formats a date relative to `today` in calendar terms.
///
/// Within a week the weekday is named ("next Friday", "last Monday"),
/// within a month the day count ("in 12 days", "9 days ago"), and anything
/// further shows the plain date, with the year only when it differs.
pub fn relative_date(date: NaiveDate, today: NaiveDate) -> String {
    let days_diff = (date - today).num_days();

    match days_diff {
        -1 => "yesterday".to_string(),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        diff if diff > 1 && diff <= 7 => {
            format!("next {}", weekday_name(date.weekday()))
        }
        diff if (-7..-1).contains(&diff) => {
            format!("last {}", weekday_name(date.weekday()))
        }
        diff if diff > 7 && diff <= 30 => format!("in {diff} days"),
        diff if (-30..-7).contains(&diff) => format!("{} days ago", -diff),
        _ => {
            let month = MONTH_ABBREV[date.month() as usize];
            if date.year() == today.year() {
                format!("{} {:02}", month, date.day())
            } else {
                format!("{} {:02}, {}", month, date.day(), date.year())
            }
        }
    }
}

/// Formats the distance between a target and `now` in approximate words,
/// suffixed "ago" for the past and prefixed "in" for the future.
pub fn distance_in_words(target: NaiveDateTime, now: NaiveDateTime) -> String {
    let delta = now - target;
    let future = delta < TimeDelta::zero();
    let seconds = delta.num_seconds().abs();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let months = days / 30;
    let years = days / 365;

    let phrase = if seconds < 45 {
        "less than a minute".to_string()
    } else if seconds < 90 {
        "a minute".to_string()
    } else if minutes < 45 {
        format!("{minutes} minutes")
    } else if minutes < 90 {
        "about an hour".to_string()
    } else if hours < 24 {
        format!("about {hours} hours")
    } else if hours < 48 {
        "a day".to_string()
    } else if days < 30 {
        format!("{days} days")
    } else if days < 60 {
        "about a month".to_string()
    } else if months < 12 {
        format!("{months} months")
    } else if years < 2 {
        "about a year".to_string()
    } else {
        format!("about {years} years")
    };

    if future {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

/// Get a human-readable weekday name
fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, mi, s).unwrap()
    }

    // 2024-01-15 is a Monday
    const TODAY: (i32, u32, u32) = (2024, 1, 15);

    fn today() -> NaiveDate {
        date(TODAY.0, TODAY.1, TODAY.2)
    }

    #[test]
    fn test_adjacent_days() {
        assert_eq!(relative_date(date(2024, 1, 14), today()), "yesterday");
        assert_eq!(relative_date(today(), today()), "today");
        assert_eq!(relative_date(date(2024, 1, 16), today()), "tomorrow");
    }

    #[test]
    fn test_within_a_week_names_the_weekday() {
        assert_eq!(relative_date(date(2024, 1, 19), today()), "next Friday");
        assert_eq!(relative_date(date(2024, 1, 22), today()), "next Monday");
        assert_eq!(relative_date(date(2024, 1, 12), today()), "last Friday");
        assert_eq!(relative_date(date(2024, 1, 8), today()), "last Monday");
    }

    #[test]
    fn test_within_a_month_counts_days() {
        assert_eq!(relative_date(date(2024, 1, 27), today()), "in 12 days");
        assert_eq!(relative_date(date(2024, 2, 14), today()), "in 30 days");
        assert_eq!(relative_date(date(2024, 1, 6), today()), "9 days ago");
        assert_eq!(relative_date(date(2023, 12, 16), today()), "30 days ago");
    }

    #[test]
    fn test_distant_dates_show_the_date() {
        assert_eq!(relative_date(date(2024, 6, 1), today()), "Jun 01");
        assert_eq!(relative_date(date(2025, 3, 9), today()), "Mar 09, 2025");
        assert_eq!(relative_date(date(2022, 11, 30), today()), "Nov 30, 2022");
    }

    #[test]
    fn test_distance_sub_minute() {
        let now = datetime(2024, 1, 15, 12, 0, 0);
        assert_eq!(
            distance_in_words(datetime(2024, 1, 15, 11, 59, 30), now),
            "less than a minute ago"
        );
        assert_eq!(
            distance_in_words(datetime(2024, 1, 15, 12, 0, 30), now),
            "in less than a minute"
        );
    }

    #[test]
    fn test_distance_minutes_and_hours() {
        let now = datetime(2024, 1, 15, 12, 0, 0);
        assert_eq!(
            distance_in_words(datetime(2024, 1, 15, 11, 59, 0), now),
            "a minute ago"
        );
        assert_eq!(
            distance_in_words(datetime(2024, 1, 15, 11, 55, 0), now),
            "5 minutes ago"
        );
        assert_eq!(
            distance_in_words(datetime(2024, 1, 15, 11, 0, 0), now),
            "about an hour ago"
        );
        assert_eq!(
            distance_in_words(datetime(2024, 1, 15, 9, 0, 0), now),
            "about 3 hours ago"
        );
        assert_eq!(
            distance_in_words(datetime(2024, 1, 15, 15, 0, 0), now),
            "in about 3 hours"
        );
    }

    #[test]
    fn test_distance_days_months_years() {
        let now = datetime(2024, 1, 15, 12, 0, 0);
        assert_eq!(
            distance_in_words(datetime(2024, 1, 14, 6, 0, 0), now),
            "a day ago"
        );
        assert_eq!(
            distance_in_words(datetime(2024, 1, 10, 12, 0, 0), now),
            "5 days ago"
        );
        assert_eq!(
            distance_in_words(datetime(2023, 12, 1, 12, 0, 0), now),
            "about a month ago"
        );
        assert_eq!(
            distance_in_words(datetime(2023, 6, 15, 12, 0, 0), now),
            "7 months ago"
        );
        assert_eq!(
            distance_in_words(datetime(2023, 1, 15, 12, 0, 0), now),
            "about a year ago"
        );
        assert_eq!(
            distance_in_words(datetime(2019, 1, 15, 12, 0, 0), now),
            "about 5 years ago"
        );
        assert_eq!(
            distance_in_words(datetime(2026, 1, 15, 12, 0, 0), now),
            "in about 2 years"
        );
    }
}
