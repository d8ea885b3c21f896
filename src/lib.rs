mod consts;
mod convert;
mod format;
mod mask;
mod prelude;
mod relative;
mod service;
mod types;

pub use consts::*;
pub use convert::{
    TimeUnit, UnknownUnit, add_time, convert_timezone, datetime_to_timestamp, parse_loose_datetime,
    timestamp_to_datetime, zone_datetime,
};
pub use format::format_pattern;
pub use mask::{format_date_part, format_time_part};
pub use relative::{distance_in_words, relative_date};
pub use service::{ServiceError, TimeRequest, TimeResponse, ZonedStamp, handle};
pub use types::{DateString, TimeString, days_in_month, is_leap_year};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::str::FromStr;

/// A local wall-clock date-time value with no attached timezone.
///
/// The six fields are always in range: instants are built either from a
/// completed, mask-clamped string pair or through the validating [`new`]
/// constructor. Ordering is chronological.
///
/// [`new`]: CalendarInstant::new
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")]
pub struct CalendarInstant {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InstantError {
    #[display(fmt = "Invalid date-time format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 0-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Invalid hour: {} (must be 0-{})", "_0", MAX_HOUR)]
    InvalidHour(u8),
    #[display(fmt = "Invalid minute: {} (must be 0-{})", "_0", MAX_MINUTE)]
    InvalidMinute(u8),
    #[display(fmt = "Invalid second: {} (must be 0-{})", "_0", MAX_SECOND)]
    InvalidSecond(u8),
    #[display(fmt = "Empty date-time string")]
    EmptyInput,
}

impl std::error::Error for InstantError {}

impl CalendarInstant {
    /// Creates an instant from raw fields, validating every component.
    ///
    /// # Errors
    /// Returns the matching `InstantError` variant for the first
    /// out-of-range field.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, InstantError> {
        if year > MAX_YEAR {
            return Err(InstantError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(InstantError::InvalidMonth(month));
        }
        if day < MIN_DAY || day > days_in_month(year, month) {
            return Err(InstantError::InvalidDay { year, month, day });
        }
        if hour > MAX_HOUR {
            return Err(InstantError::InvalidHour(hour));
        }
        if minute > MAX_MINUTE {
            return Err(InstantError::InvalidMinute(minute));
        }
        if second > MAX_SECOND {
            return Err(InstantError::InvalidSecond(second));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Combines a completed date/time string pair into an instant.
    ///
    /// Returns `None` while either string is still incomplete. Range
    /// failures cannot happen here: the mask has already clamped every
    /// component.
    pub fn from_parts(date: &DateString, time: &TimeString) -> Option<Self> {
        if !date.is_complete() || !time.is_complete() {
            return None;
        }
        Self::new(
            date.year()?,
            date.month()?,
            date.day()?,
            time.hour()?,
            time.minute()?,
            time.second()?,
        )
        .ok()
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Canonical `YYYY-MM-DD` form of the date half
    pub fn date_string(&self) -> DateString {
        DateString(format!(
            "{:04}-{:02}-{:02}",
            self.year, self.month, self.day
        ))
    }

    /// Canonical `HH:MM:SS` form of the time half
    pub fn time_string(&self) -> TimeString {
        TimeString(format!(
            "{:02}:{:02}:{:02}",
            self.hour, self.minute, self.second
        ))
    }

    /// Bridges into chrono for calendar arithmetic. The fields are local
    /// wall-clock values; no timezone is implied.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )?
        .and_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
        )
    }

    /// Bridges back from chrono. `None` when the calendar date falls
    /// outside the four-digit year range.
    pub fn from_naive(naive: &NaiveDateTime) -> Option<Self> {
        let year = u16::try_from(naive.year()).ok()?;
        let to_u8 = |v: u32| u8::try_from(v).ok();
        Self::new(
            year,
            to_u8(naive.month())?,
            to_u8(naive.day())?,
            to_u8(naive.hour())?,
            to_u8(naive.minute())?,
            to_u8(naive.second())?,
        )
        .ok()
    }
}

impl FromStr for CalendarInstant {
    type Err = InstantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InstantError::EmptyInput);
        }

        let (date_part, time_part) = trimmed
            .split_once([' ', 'T'])
            .ok_or_else(|| InstantError::InvalidFormat(trimmed.to_owned()))?;

        let date_fields: Vec<&str> = date_part.split(DATE_SEPARATOR).collect();
        let time_fields: Vec<&str> = time_part.split(TIME_SEPARATOR).collect();
        if date_fields.len() != 3 || time_fields.len() != 3 {
            return Err(InstantError::InvalidFormat(trimmed.to_owned()));
        }

        Self::new(
            parse_u16(date_fields[0])?,
            parse_u8(date_fields[1])?,
            parse_u8(date_fields[2])?,
            parse_u8(time_fields[0])?,
            parse_u8(time_fields[1])?,
            parse_u8(time_fields[2])?,
        )
    }
}

/// Helper to parse u16 with better error messages
fn parse_u16(s: &str) -> Result<u16, InstantError> {
    s.parse::<u16>()
        .map_err(|_| InstantError::InvalidFormat(s.to_owned()))
}

/// Helper to parse u8 with better error messages
fn parse_u8(s: &str) -> Result<u8, InstantError> {
    s.parse::<u8>()
        .map_err(|_| InstantError::InvalidFormat(s.to_owned()))
}

impl serde::Serialize for CalendarInstant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarInstant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
