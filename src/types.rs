use crate::consts::{
    BLOCK_DIGITS, CENTURY_CYCLE, DATE_COMPLETE_LEN, DATE_SEPARATOR, DAYS_IN_MONTH, FEBRUARY,
    FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_MONTH, TIME_COMPLETE_LEN,
    TIME_SEPARATOR, YEAR_DIGITS,
};
use crate::mask;
use crate::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A progressively-built date string: a valid prefix of `YYYY-MM-DD` whose
/// present components are already range-clamped.
///
/// Only the mask can construct one, so a `DateString` reaching the parser is
/// guaranteed well-formed. Deserialization re-runs the mask, so untrusted
/// input cannot smuggle an unclamped value in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Display, Deref)]
pub struct DateString(pub(crate) String);

impl DateString {
    /// The empty value a field starts from
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True once the string has reached full `YYYY-MM-DD` form
    pub fn is_complete(&self) -> bool {
        self.0.len() == DATE_COMPLETE_LEN
    }

    /// Year component, present once all four digits are typed
    pub fn year(&self) -> Option<u16> {
        parse_segment(&self.0, DATE_SEPARATOR, 0, YEAR_DIGITS)
    }

    /// Month component, present once its two digits are typed
    pub fn month(&self) -> Option<u8> {
        parse_segment(&self.0, DATE_SEPARATOR, 1, BLOCK_DIGITS)
    }

    /// Day component, present once its two digits are typed
    pub fn day(&self) -> Option<u8> {
        parse_segment(&self.0, DATE_SEPARATOR, 2, BLOCK_DIGITS)
    }
}

impl Serialize for DateString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DateString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(mask::format_date_part(&raw))
    }
}

/// A progressively-built time string: a valid prefix of `HH:MM:SS` whose
/// present components are already range-clamped.
///
/// Same construction rules as [`DateString`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Display, Deref)]
pub struct TimeString(pub(crate) String);

impl TimeString {
    /// The empty value a field starts from
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True once the string has reached full `HH:MM:SS` form
    pub fn is_complete(&self) -> bool {
        self.0.len() == TIME_COMPLETE_LEN
    }

    /// Hour component, present once its two digits are typed
    pub fn hour(&self) -> Option<u8> {
        parse_segment(&self.0, TIME_SEPARATOR, 0, BLOCK_DIGITS)
    }

    /// Minute component, present once its two digits are typed
    pub fn minute(&self) -> Option<u8> {
        parse_segment(&self.0, TIME_SEPARATOR, 1, BLOCK_DIGITS)
    }

    /// Second component, present once its two digits are typed
    pub fn second(&self) -> Option<u8> {
        parse_segment(&self.0, TIME_SEPARATOR, 2, BLOCK_DIGITS)
    }
}

impl Serialize for TimeString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TimeString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(mask::format_time_part(&raw))
    }
}

/// Extracts the `idx`-th separator-delimited segment if it has reached its
/// full width. Partial trailing segments stay inaccessible.
fn parse_segment<T: std::str::FromStr>(
    value: &str,
    separator: char,
    idx: usize,
    width: usize,
) -> Option<T> {
    let segment = value.split(separator).nth(idx)?;
    if segment.len() != width {
        return None;
    }
    segment.parse().ok()
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
