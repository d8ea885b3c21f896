//! Digit-mask formatting for date and time input fields.
//!
//! Both formatters are pure functions of the raw text alone: every call
//! strips the input down to its digit stream and rebuilds the clamped string
//! from scratch. Re-deriving the whole value is what keeps backspace and
//! paste-over-selection correct; an append-only mask leaves stale trailing
//! characters behind.

use crate::consts::{
    BLOCK_DIGITS, DATE_COMPLETE_LEN, DATE_SEPARATOR, MAX_DATE_DIGITS, MAX_HOUR, MAX_MINUTE,
    MAX_MONTH, MAX_SECOND, MAX_TIME_DIGITS, MIN_DAY, TIME_COMPLETE_LEN, TIME_SEPARATOR,
    YEAR_DIGITS,
};
use crate::types::{DateString, TimeString, days_in_month};

/// Formats arbitrary text into a clamped `YYYY-MM-DD` prefix.
///
/// Digits are consumed positionally in 4/2/2 blocks; typed separators carry
/// no meaning and are re-inserted once the preceding block is full. A single
/// month digit greater than 1 is zero-padded on the spot (no valid month
/// starts with it), and the day block is clamped against the real month
/// length, leap years included. Digits past the eighth are discarded.
pub fn format_date_part(raw: &str) -> DateString {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DATE_DIGITS)
        .collect();
    if digits.is_empty() {
        return DateString::empty();
    }

    let len = digits.len();
    let year = &digits[..len.min(YEAR_DIGITS)];
    let mut out = String::with_capacity(DATE_COMPLETE_LEN);
    out.push_str(year);

    if len > YEAR_DIGITS {
        let month_raw = &digits[YEAR_DIGITS..len.min(YEAR_DIGITS + BLOCK_DIGITS)];
        let month = clamp_block(month_raw, MIN_DAY, MAX_MONTH);
        out.push(DATE_SEPARATOR);
        out.push_str(&month);

        if len > YEAR_DIGITS + BLOCK_DIGITS {
            // Year and month blocks are necessarily full here, so the real
            // month length is known.
            let year_num: u16 = year.parse().unwrap_or(0);
            let month_num: u8 = month.parse().unwrap_or(MIN_DAY);
            let day_raw = &digits[YEAR_DIGITS + BLOCK_DIGITS..];
            let day = clamp_block(day_raw, MIN_DAY, days_in_month(year_num, month_num));
            out.push(DATE_SEPARATOR);
            out.push_str(&day);
        }
    }

    DateString(out)
}

/// Formats arbitrary text into a clamped `HH:MM:SS` prefix.
///
/// Same positional scheme with 2/2/2 blocks and `:` separators. Hours clamp
/// to [0,23], minutes and seconds to [0,59]; a single hour digit greater
/// than 2 (minute/second digit greater than 5) is zero-padded on the spot.
/// Digits past the sixth are discarded.
pub fn format_time_part(raw: &str) -> TimeString {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_TIME_DIGITS)
        .collect();
    if digits.is_empty() {
        return TimeString::empty();
    }

    let len = digits.len();
    let mut out = String::with_capacity(TIME_COMPLETE_LEN);
    out.push_str(&clamp_block(&digits[..len.min(BLOCK_DIGITS)], 0, MAX_HOUR));

    if len > BLOCK_DIGITS {
        let minute_raw = &digits[BLOCK_DIGITS..len.min(2 * BLOCK_DIGITS)];
        out.push(TIME_SEPARATOR);
        out.push_str(&clamp_block(minute_raw, 0, MAX_MINUTE));

        if len > 2 * BLOCK_DIGITS {
            out.push(TIME_SEPARATOR);
            out.push_str(&clamp_block(&digits[2 * BLOCK_DIGITS..], 0, MAX_SECOND));
        }
    }

    TimeString(out)
}

/// Clamps one 1- or 2-digit block.
///
/// A lone digit that cannot begin any in-range two-digit value is padded to
/// its final form immediately; a lone zero is promoted to the floor when the
/// floor is nonzero (months and days start at 01). Completed blocks clamp to
/// `[floor, ceil]`.
fn clamp_block(digits: &str, floor: u8, ceil: u8) -> String {
    let value: u8 = digits.parse().unwrap_or(0);
    if digits.len() < BLOCK_DIGITS {
        if value > ceil / 10 {
            format!("{value:02}")
        } else if floor > 0 && value == 0 {
            format!("{floor:02}")
        } else {
            digits.to_owned()
        }
    } else {
        format!("{:02}", value.clamp(floor, ceil))
    }
}
