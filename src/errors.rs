/*!
 * Error types for the subresync application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::fmt;

use thiserror::Error;

/// Numeric component of a subtitle timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampField {
    Hours,
    Minutes,
    Seconds,
    SubSeconds,
}

impl fmt::Display for TimestampField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimestampField::Hours => "hours",
            TimestampField::Minutes => "minutes",
            TimestampField::Seconds => "seconds",
            TimestampField::SubSeconds => "sub-seconds",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when decoding, shifting or encoding a single timestamp
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// A numeric field is missing or not a valid non-negative integer
    #[error("can't convert timestamp '{timestamp}' to duration, error in {field}: '{value}'")]
    Parse {
        /// The whole timestamp as found in the line
        timestamp: String,
        /// Which field failed
        field: TimestampField,
        /// The offending fragment (empty when the field is missing)
        value: String,
    },

    /// The shifted time is before the start of the track
    #[error("shifted timestamp is negative ({ms}ms)")]
    Negative {
        /// Resulting time in milliseconds
        ms: i64,
    },

    /// Adding the shift does not fit in the duration type
    #[error("shifting {ms}ms by {shift_ms}ms overflows")]
    Overflow {
        ms: i64,
        shift_ms: i64,
    },
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// A timing line has fewer delimited fields than its format requires
    #[error("malformed subtitle file at line {line}: expected at least {expected} fields, found {found}")]
    MalformedDocument {
        /// 1-based line number
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A timestamp on a timing line could not be re-timed
    #[error("line {line}: {source}")]
    InvalidTimestamp {
        /// 1-based line number
        line: usize,
        #[source]
        source: TimestampError,
    },
}

/// Errors raised while validating user-supplied settings
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid configuration or command line value
    #[error("Configuration error: {0}")]
    Config(String),
}
