/*!
 * Timestamp codec for SRT and ASS subtitles.
 *
 * Timestamps are decoded into a signed millisecond count so that a shift can
 * be applied with plain integer arithmetic, then encoded back using the
 * field layout of the format they came from:
 *
 * - SRT: `HH:MM:SS,mmm` (hours padded to two digits, milliseconds)
 * - ASS: `H:MM:SS.cc` (hours unpadded, centiseconds)
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{TimestampError, TimestampField};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

// @enum: Supported subtitle container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtitleFormat {
    /// SubRip (`.srt`)
    Srt,
    /// Advanced SubStation Alpha (`.ass`)
    Ass,
}

impl SubtitleFormat {
    /// Separator between seconds and the sub-second fragment
    pub fn decimal_separator(self) -> char {
        match self {
            Self::Srt => ',',
            Self::Ass => '.',
        }
    }

    /// Native precision of the sub-second fragment
    pub fn precision(self) -> SubSecondPrecision {
        match self {
            Self::Srt => SubSecondPrecision::Milliseconds,
            Self::Ass => SubSecondPrecision::Centiseconds,
        }
    }

    /// File extension conventionally used for the format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Ass => "ass",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Srt => write!(f, "SRT"),
            Self::Ass => write!(f, "ASS"),
        }
    }
}

/// Granularity of the fractional part of a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubSecondPrecision {
    Milliseconds,
    Centiseconds,
}

impl SubSecondPrecision {
    /// Number of digits written for this precision
    pub fn digits(self) -> usize {
        match self {
            Self::Milliseconds => 3,
            Self::Centiseconds => 2,
        }
    }

    /// Milliseconds represented by one unit of this precision
    pub fn unit_ms(self) -> i64 {
        match self {
            Self::Milliseconds => 1,
            Self::Centiseconds => 10,
        }
    }

    /// Decode a sub-second fragment into milliseconds.
    ///
    /// The fragment is read as a decimal fraction of a second, so the digit
    /// count decides the scale: `5` is 500ms, `50` is 500ms and `500` is 500ms.
    /// More digits than milliseconds can hold are rejected.
    fn decode_fraction(fragment: &str) -> Option<i64> {
        let value = parse_unsigned(fragment)?;
        match fragment.len() {
            1 => Some(value * 100),
            2 => Some(value * 10),
            3 => Some(value),
            _ => None,
        }
    }
}

/// What to do when a shift moves a timestamp before zero
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NegativeTimestampPolicy {
    /// Fail the whole document
    #[default]
    Reject,
    /// Pin the timestamp to `0`
    Clamp,
}

impl NegativeTimestampPolicy {
    /// Apply the policy to a shifted millisecond value
    pub fn resolve(self, ms: i64) -> Result<i64, TimestampError> {
        match self {
            Self::Reject if ms < 0 => Err(TimestampError::Negative { ms }),
            Self::Clamp => Ok(ms.max(0)),
            Self::Reject => Ok(ms),
        }
    }
}

impl std::str::FromStr for NegativeTimestampPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "clamp" => Ok(Self::Clamp),
            _ => Err(anyhow::anyhow!("Invalid negative timestamp policy: {}", s)),
        }
    }
}

/// Parse a timestamp string of the given format into milliseconds.
///
/// Fails with [`TimestampError::Parse`] naming the first field that is
/// missing, not a non-negative integer, or too large to fit in milliseconds.
pub fn parse_timestamp(timestamp: &str, format: SubtitleFormat) -> Result<i64, TimestampError> {
    let parse_error = |field: TimestampField, value: &str| TimestampError::Parse {
        timestamp: timestamp.to_string(),
        field,
        value: value.to_string(),
    };

    let mut parts = timestamp.splitn(3, ':');
    let hours_part = parts.next().unwrap_or_default();
    let minutes_part = parts.next().unwrap_or_default();
    let seconds_group = parts.next().unwrap_or_default();

    let hours = parse_unsigned(hours_part)
        .ok_or_else(|| parse_error(TimestampField::Hours, hours_part))?;
    let minutes = parse_unsigned(minutes_part)
        .ok_or_else(|| parse_error(TimestampField::Minutes, minutes_part))?;

    let (seconds_part, fraction_part) = seconds_group
        .split_once(format.decimal_separator())
        .unwrap_or((seconds_group, ""));

    let seconds = parse_unsigned(seconds_part)
        .ok_or_else(|| parse_error(TimestampField::Seconds, seconds_part))?;
    let millis = SubSecondPrecision::decode_fraction(fraction_part)
        .ok_or_else(|| parse_error(TimestampField::SubSeconds, fraction_part))?;

    // Each field is charged with the overflow it causes
    let ms = hours
        .checked_mul(MS_PER_HOUR)
        .ok_or_else(|| parse_error(TimestampField::Hours, hours_part))?;
    let ms = minutes
        .checked_mul(MS_PER_MINUTE)
        .and_then(|minutes_ms| ms.checked_add(minutes_ms))
        .ok_or_else(|| parse_error(TimestampField::Minutes, minutes_part))?;
    let ms = seconds
        .checked_mul(MS_PER_SECOND)
        .and_then(|seconds_ms| ms.checked_add(seconds_ms))
        .ok_or_else(|| parse_error(TimestampField::Seconds, seconds_part))?;
    ms.checked_add(millis)
        .ok_or_else(|| parse_error(TimestampField::SubSeconds, fraction_part))
}

/// Format a millisecond count as a timestamp string of the given format.
///
/// Sub-unit precision is truncated (ASS drops the last millisecond digit).
/// Negative values cannot be represented and are rejected.
pub fn format_timestamp(ms: i64, format: SubtitleFormat) -> Result<String, TimestampError> {
    if ms < 0 {
        return Err(TimestampError::Negative { ms });
    }

    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let precision = format.precision();
    let fraction = (ms % MS_PER_SECOND) / precision.unit_ms();

    let formatted = match format {
        SubtitleFormat::Srt => format!(
            "{:02}:{:02}:{:02},{:0width$}",
            hours, minutes, seconds, fraction,
            width = precision.digits()
        ),
        SubtitleFormat::Ass => format!(
            "{}:{:02}:{:02}.{:0width$}",
            hours, minutes, seconds, fraction,
            width = precision.digits()
        ),
    };

    Ok(formatted)
}

/// Add a shift to a timestamp without wrapping around
pub fn apply_shift(ms: i64, shift_ms: i64) -> Result<i64, TimestampError> {
    ms.checked_add(shift_ms)
        .ok_or(TimestampError::Overflow { ms, shift_ms })
}

// Accepts ASCII digits only, so signs and whitespace are rejected
fn parse_unsigned(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
