//! The time service: one stateless implementation of the current-time,
//! timestamp-conversion, and timezone-conversion operations.
//!
//! [`handle`] is a pure function of the request and the caller-supplied
//! clock reading; hosting it behind HTTP (or anything else) is the
//! embedder's concern.

use crate::consts::PATTERN_DATETIME;
use crate::convert;
use crate::format::format_pattern;
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// RFC 7231 style, the shape `Date.toUTCString()` produces
const UTC_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// An operation with its parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TimeRequest {
    /// Report the current time
    Current,
    /// Expand a unix timestamp into common representations
    Convert { timestamp: i64 },
    /// Reinterpret a wall-clock time from one timezone in another
    Timezone { time: String, from: String, to: String },
}

/// A wall-clock value tagged with its timezone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZonedStamp {
    pub time: String,
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

/// Response payloads, serialized field-for-field like the endpoints they
/// replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TimeResponse {
    Current {
        timestamp: i64,
        iso: String,
        utc: String,
        timezone: String,
    },
    Converted {
        timestamp: i64,
        iso: String,
        utc: String,
        formatted: String,
    },
    Timezone {
        original: ZonedStamp,
        converted: ZonedStamp,
    },
}

/// Error type for time service operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Timestamp outside the representable datetime range.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// Unparseable or nonexistent wall-clock time.
    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    /// Timezone name missing from the tz database.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

impl Serialize for ServiceError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ServiceError", 2)?;
        state.serialize_field("error", &self.to_string())?;
        state.serialize_field("status", "error")?;
        state.end()
    }
}

/// Executes one operation against the supplied clock reading.
///
/// # Errors
/// Returns a `ServiceError` for out-of-range timestamps, unknown timezone
/// names, and unparseable or DST-nonexistent times.
pub fn handle(request: &TimeRequest, now: DateTime<Utc>) -> Result<TimeResponse, ServiceError> {
    log::debug!("time service request: {request:?}");

    match request {
        TimeRequest::Current => Ok(TimeResponse::Current {
            timestamp: now.timestamp(),
            iso: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            utc: now.format(UTC_FORMAT).to_string(),
            timezone: "UTC".to_string(),
        }),

        TimeRequest::Convert { timestamp } => {
            let datetime = convert::timestamp_to_datetime(*timestamp)
                .ok_or(ServiceError::InvalidTimestamp(*timestamp))?;
            Ok(TimeResponse::Converted {
                timestamp: *timestamp,
                iso: datetime.to_rfc3339_opts(SecondsFormat::Millis, true),
                utc: datetime.format(UTC_FORMAT).to_string(),
                formatted: format_pattern(&datetime.naive_utc(), PATTERN_DATETIME),
            })
        }

        TimeRequest::Timezone { time, from, to } => {
            let from_zone = parse_zone(from)?;
            let to_zone = parse_zone(to)?;
            let naive = convert::parse_loose_datetime(time)
                .ok_or_else(|| ServiceError::InvalidTime(time.clone()))?;
            let original = convert::zone_datetime(naive, from_zone)
                .ok_or_else(|| ServiceError::InvalidTime(time.clone()))?;
            let converted = original.with_timezone(&to_zone);

            Ok(TimeResponse::Timezone {
                original: ZonedStamp {
                    time: original.to_rfc3339_opts(SecondsFormat::Secs, false),
                    timezone: from.clone(),
                    formatted: None,
                },
                converted: ZonedStamp {
                    time: converted.to_rfc3339_opts(SecondsFormat::Secs, false),
                    timezone: to.clone(),
                    formatted: Some(format_pattern(&converted.naive_local(), PATTERN_DATETIME)),
                },
            })
        }
    }
}

fn parse_zone(name: &str) -> Result<Tz, ServiceError> {
    name.parse()
        .map_err(|_| ServiceError::UnknownTimezone(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).single().unwrap()
    }

    #[test]
    fn test_current() {
        let response = handle(&TimeRequest::Current, fixed_now()).unwrap();
        assert_eq!(
            response,
            TimeResponse::Current {
                timestamp: 1_705_307_400,
                iso: "2024-01-15T08:30:00.000Z".to_string(),
                utc: "Mon, 15 Jan 2024 08:30:00 GMT".to_string(),
                timezone: "UTC".to_string(),
            }
        );
    }

    #[test]
    fn test_convert_timestamp() {
        let request = TimeRequest::Convert { timestamp: 1_705_307_400 };
        let response = handle(&request, fixed_now()).unwrap();
        assert_eq!(
            response,
            TimeResponse::Converted {
                timestamp: 1_705_307_400,
                iso: "2024-01-15T08:30:00.000Z".to_string(),
                utc: "Mon, 15 Jan 2024 08:30:00 GMT".to_string(),
                formatted: "2024-01-15 08:30:00".to_string(),
            }
        );
    }

    #[test]
    fn test_convert_rejects_out_of_range_timestamp() {
        let request = TimeRequest::Convert { timestamp: i64::MAX };
        assert_eq!(
            handle(&request, fixed_now()),
            Err(ServiceError::InvalidTimestamp(i64::MAX))
        );
    }

    #[test]
    fn test_timezone_conversion() {
        let request = TimeRequest::Timezone {
            time: "2024-01-15 12:00:00".to_string(),
            from: "UTC".to_string(),
            to: "America/New_York".to_string(),
        };
        let response = handle(&request, fixed_now()).unwrap();
        assert_eq!(
            response,
            TimeResponse::Timezone {
                original: ZonedStamp {
                    time: "2024-01-15T12:00:00+00:00".to_string(),
                    timezone: "UTC".to_string(),
                    formatted: None,
                },
                converted: ZonedStamp {
                    time: "2024-01-15T07:00:00-05:00".to_string(),
                    timezone: "America/New_York".to_string(),
                    formatted: Some("2024-01-15 07:00:00".to_string()),
                },
            }
        );
    }

    #[test]
    fn test_timezone_unknown_zone() {
        let request = TimeRequest::Timezone {
            time: "2024-01-15 12:00:00".to_string(),
            from: "Mars/Olympus_Mons".to_string(),
            to: "UTC".to_string(),
        };
        assert_eq!(
            handle(&request, fixed_now()),
            Err(ServiceError::UnknownTimezone("Mars/Olympus_Mons".to_string()))
        );
    }

    #[test]
    fn test_timezone_invalid_time() {
        let request = TimeRequest::Timezone {
            time: "not-a-time".to_string(),
            from: "UTC".to_string(),
            to: "UTC".to_string(),
        };
        assert_eq!(
            handle(&request, fixed_now()),
            Err(ServiceError::InvalidTime("not-a-time".to_string()))
        );
    }

    #[test]
    fn test_timezone_dst_gap_time() {
        let request = TimeRequest::Timezone {
            time: "2024-03-10 02:30:00".to_string(),
            from: "America/New_York".to_string(),
            to: "UTC".to_string(),
        };
        assert_eq!(
            handle(&request, fixed_now()),
            Err(ServiceError::InvalidTime("2024-03-10 02:30:00".to_string()))
        );
    }

    #[test]
    fn test_request_deserializes_from_tagged_json() {
        let request: TimeRequest = serde_json::from_str(r#"{"op":"current"}"#).unwrap();
        assert_eq!(request, TimeRequest::Current);

        let request: TimeRequest =
            serde_json::from_str(r#"{"op":"convert","timestamp":1705307400}"#).unwrap();
        assert_eq!(request, TimeRequest::Convert { timestamp: 1_705_307_400 });

        let request: TimeRequest = serde_json::from_str(
            r#"{"op":"timezone","time":"2024-01-15 12:00:00","from":"UTC","to":"Asia/Tokyo"}"#,
        )
        .unwrap();
        assert!(matches!(request, TimeRequest::Timezone { .. }));
    }

    #[test]
    fn test_response_json_shape() {
        let response = handle(&TimeRequest::Current, fixed_now()).unwrap();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["timestamp"], 1_705_307_400);
        assert_eq!(value["iso"], "2024-01-15T08:30:00.000Z");
        assert_eq!(value["timezone"], "UTC");

        let request = TimeRequest::Timezone {
            time: "2024-01-15 12:00:00".to_string(),
            from: "UTC".to_string(),
            to: "Asia/Tokyo".to_string(),
        };
        let value = serde_json::to_value(handle(&request, fixed_now()).unwrap()).unwrap();
        assert_eq!(value["original"]["timezone"], "UTC");
        assert_eq!(value["converted"]["formatted"], "2024-01-15 21:00:00");
        // the original stamp carries no "formatted" key at all
        assert!(value["original"].get("formatted").is_none());
    }

    #[test]
    fn test_error_json_shape() {
        let error = ServiceError::InvalidTimestamp(42);
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["error"], "Invalid timestamp: 42");
        assert_eq!(value["status"], "error");
    }
}
