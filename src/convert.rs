//! Timestamp, timezone, and calendar arithmetic helpers.

use crate::prelude::*;
use chrono::{DateTime, Months, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unit for calendar arithmetic, matching the unit strings the converter
/// UI exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[display(fmt = "years")]
    Years,
    #[display(fmt = "months")]
    Months,
    #[display(fmt = "days")]
    Days,
    #[display(fmt = "hours")]
    Hours,
    #[display(fmt = "minutes")]
    Minutes,
    #[display(fmt = "seconds")]
    Seconds,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "Unknown time unit: {_0}")]
pub struct UnknownUnit(String);

impl std::error::Error for UnknownUnit {}

impl FromStr for TimeUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "years" | "year" => Ok(Self::Years),
            "months" | "month" => Ok(Self::Months),
            "days" | "day" => Ok(Self::Days),
            "hours" | "hour" => Ok(Self::Hours),
            "minutes" | "minute" => Ok(Self::Minutes),
            "seconds" | "second" => Ok(Self::Seconds),
            other => Err(UnknownUnit(other.to_owned())),
        }
    }
}

/// Unix seconds to UTC date-time. `None` when the timestamp falls outside
/// the representable range.
pub fn timestamp_to_datetime(timestamp: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp, 0)
}

/// UTC date-time to unix seconds
pub fn datetime_to_timestamp(datetime: &DateTime<Utc>) -> i64 {
    datetime.timestamp()
}

/// Parses the date-time shapes callers actually paste: RFC 3339, then
/// `T`-separated, then space-separated, each with and without seconds.
/// Strings carrying an explicit offset are normalized to UTC wall-clock.
pub fn parse_loose_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.naive_utc());
    }

    [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ]
    .into_iter()
    .find_map(|pattern| NaiveDateTime::parse_from_str(value, pattern).ok())
}

/// Anchors wall-clock fields in a timezone. DST-gap times that do not exist
/// yield `None`; ambiguous fall-back times take the earlier mapping.
pub fn zone_datetime(naive: NaiveDateTime, zone: Tz) -> Option<DateTime<Tz>> {
    zone.from_local_datetime(&naive).earliest()
}

/// Reinterprets wall-clock fields from one timezone into another.
pub fn convert_timezone(naive: NaiveDateTime, from: Tz, to: Tz) -> Option<DateTime<Tz>> {
    Some(zone_datetime(naive, from)?.with_timezone(&to))
}

/// Shifts a date-time by a signed amount of calendar units. Month and year
/// steps clamp to the end of shorter months. `None` on overflow.
pub fn add_time(datetime: NaiveDateTime, amount: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    match unit {
        TimeUnit::Years => add_months(datetime, amount.checked_mul(12)?),
        TimeUnit::Months => add_months(datetime, amount),
        TimeUnit::Days => datetime.checked_add_signed(TimeDelta::try_days(amount)?),
        TimeUnit::Hours => datetime.checked_add_signed(TimeDelta::try_hours(amount)?),
        TimeUnit::Minutes => datetime.checked_add_signed(TimeDelta::try_minutes(amount)?),
        TimeUnit::Seconds => datetime.checked_add_signed(TimeDelta::try_seconds(amount)?),
    }
}

fn add_months(datetime: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    if amount >= 0 {
        datetime.checked_add_months(Months::new(u32::try_from(amount).ok()?))
    } else {
        datetime.checked_sub_months(Months::new(u32::try_from(amount.checked_neg()?).ok()?))
    }
}
