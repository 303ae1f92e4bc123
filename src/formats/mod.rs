/*!
 * Line classification and format-specific rewriting strategies.
 *
 * Each supported subtitle format gets a [`FormatStrategy`] that decides which
 * physical lines carry timing information and how to rewrite them:
 *
 * - `srt`: cue-time lines containing `-->`
 * - `ass`: `Dialogue:` event records
 *
 * Everything a strategy does not classify as a timing line is passed through
 * untouched.
 */

pub mod ass;
pub mod srt;

use crate::errors::SubtitleError;
use crate::timestamp::{
    apply_shift, format_timestamp, parse_timestamp, NegativeTimestampPolicy, SubtitleFormat,
};

pub use ass::AssStrategy;
pub use srt::SrtStrategy;

/// Classification of a single physical line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Carries a start/end timestamp pair
    Timing,
    /// Reproduced verbatim
    Passthrough,
}

/// Format-specific rules for finding and rewriting timestamps in a line
pub trait FormatStrategy: Send + Sync {
    /// Format handled by this strategy
    fn format(&self) -> SubtitleFormat;

    /// Decide whether a line carries timing information
    fn classify(&self, line: &str) -> LineKind;

    /// Rewrite a line already classified as [`LineKind::Timing`]
    fn rewrite_timing_line(
        &self,
        line: &str,
        line_number: usize,
        shifter: &TimestampShifter,
    ) -> Result<String, SubtitleError>;
}

/// Returns the strategy for a format
pub fn strategy_for(format: SubtitleFormat) -> &'static dyn FormatStrategy {
    match format {
        SubtitleFormat::Srt => &SrtStrategy,
        SubtitleFormat::Ass => &AssStrategy,
    }
}

/// Decode, shift and re-encode individual timestamps for one sync operation
#[derive(Debug, Clone, Copy)]
pub struct TimestampShifter {
    format: SubtitleFormat,
    shift_ms: i64,
    policy: NegativeTimestampPolicy,
}

impl TimestampShifter {
    pub fn new(format: SubtitleFormat, shift_ms: i64, policy: NegativeTimestampPolicy) -> Self {
        Self { format, shift_ms, policy }
    }

    pub fn shift_ms(&self) -> i64 {
        self.shift_ms
    }

    /// Shift a single timestamp string, tagging failures with the line number
    pub fn shift(&self, timestamp: &str, line_number: usize) -> Result<String, SubtitleError> {
        let retimed = parse_timestamp(timestamp, self.format)
            .and_then(|ms| apply_shift(ms, self.shift_ms))
            .and_then(|ms| self.policy.resolve(ms))
            .and_then(|ms| format_timestamp(ms, self.format));

        retimed.map_err(|source| SubtitleError::InvalidTimestamp {
            line: line_number,
            source,
        })
    }
}
